use std::fmt;

use tracing::debug;

use crate::exception::{ExcType, Exception};

/// Error returned when a resource limit would be exceeded by an eager operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// Maximum number of materialized items exceeded.
    ///
    /// `count` is `None` when the expected count overflows `usize`.
    Items { limit: usize, count: Option<usize> },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Items { limit, count: Some(count) } => {
                write!(f, "item limit exceeded: {count} > {limit}")
            }
            Self::Items { limit, count: None } => {
                write!(f, "item limit exceeded: result size overflows > {limit}")
            }
        }
    }
}

impl std::error::Error for ResourceError {}

impl From<ResourceError> for Exception {
    fn from(err: ResourceError) -> Self {
        Self::new_msg(ExcType::LimitExceeded, err)
    }
}

/// Limits applied when a primitive materializes its whole result at once.
///
/// Lazy iteration is never limited: a consumer that pulls items one by one is
/// responsible for stopping. All limits are disabled by default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ResourceLimits {
    /// Maximum number of items an eager call may produce.
    pub max_items: Option<usize>,
}

impl ResourceLimits {
    /// Creates a new ResourceLimits with all limits disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum number of materialized items.
    #[must_use]
    pub fn max_items(mut self, limit: usize) -> Self {
        self.max_items = Some(limit);
        self
    }

    /// Checks an expected result size against the item limit.
    ///
    /// `expected` is `None` when computing the size overflowed; that only fails
    /// when a limit is actually configured.
    pub fn check_items(&self, expected: Option<usize>) -> Result<(), ResourceError> {
        let Some(limit) = self.max_items else {
            return Ok(());
        };
        match expected {
            Some(count) if count <= limit => Ok(()),
            count => {
                debug!(limit, ?count, "refusing to materialize result");
                Err(ResourceError::Items { limit, count })
            }
        }
    }
}
