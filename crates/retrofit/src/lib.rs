#![doc = include_str!("../../../README.md")]

mod args;
mod codepoints;
mod combinatorics;
mod exception;
mod flatten;
#[cfg(feature = "inflect")]
pub mod inflect;
mod partition;
mod resource;
#[cfg(feature = "sampling")]
mod sampling;
pub mod sequence;
pub mod text;
mod value;

#[cfg(feature = "sampling")]
pub use crate::sampling::{
    sample, sample_one, sample_one_with_rng, sample_with_rng, shuffle, shuffle_in_place, shuffle_in_place_with_rng,
    shuffle_with_rng,
};
pub use crate::{
    args::{ToInt, ToText},
    codepoints::{Codepoints, DecodePolicy, REPLACEMENT_CODEPOINT, codepoints, decode_codepoints, each_codepoint},
    combinatorics::{Combinations, Product, combinations, combinations_of, each_combination, product, product_of},
    exception::{ExcType, Exception, RunResult},
    flatten::{Nested, flatten, flatten_all, flatten_in_place},
    partition::{Partition, Pattern, partition_first, partition_first_of, partition_last, partition_last_of},
    resource::{ResourceError, ResourceLimits},
    value::{Type, Value},
};
