//! retrofit command-line front end
//!
//! Runs one primitive per invocation. List arguments are JSON, results are printed as
//! JSON on stdout, and failures print `error: <exception>` on stderr.

use std::{
    fmt,
    io::{self, Read},
    process::ExitCode,
};

use clap::{Parser, Subcommand, ValueEnum};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use retrofit::{
    DecodePolicy, ExcType, Exception, Pattern, ResourceLimits, Value, combinations_of, decode_codepoints, flatten,
    inflect::{self, FirstLetter},
    partition_first, partition_last, product_of, sample_one_with_rng, sample_with_rng, shuffle_with_rng,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "retrofit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sequence and text primitives with fixed semantics", long_about = None)]
struct Cli {
    /// Refuse to materialize more than this many result items
    #[arg(long, global = true, value_name = "N")]
    max_items: Option<usize>,

    /// Seed the random generator for reproducible shuffles and samples
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Every k-element combination of a JSON list
    Combinations {
        list: String,
        #[arg(allow_negative_numbers = true)]
        k: i64,
    },

    /// Cartesian product of one or more JSON lists
    Product {
        #[arg(required = true)]
        lists: Vec<String>,
    },

    /// Expand nested JSON lists
    Flatten {
        list: String,

        /// Levels to expand; negative expands everything
        #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
        depth: i64,
    },

    /// Random permutation of a JSON list
    Shuffle { list: String },

    /// Elements drawn without replacement; a single element when N is omitted
    Sample {
        list: String,
        #[arg(allow_negative_numbers = true)]
        n: Option<i64>,
    },

    /// Integer codepoints of UTF-8 text (read from stdin when TEXT is omitted)
    Codepoints {
        text: Option<String>,

        /// Substitute U+FFFD for malformed runs instead of failing
        #[arg(long)]
        lossy: bool,
    },

    /// Split around the first match: [before, match, after]
    Partition {
        text: String,
        pattern: String,

        /// Treat PATTERN as a regular expression
        #[arg(long)]
        regex: bool,
    },

    /// Split around the last match: [before, match, after]
    Rpartition {
        text: String,
        pattern: String,

        /// Treat PATTERN as a regular expression
        #[arg(long)]
        regex: bool,
    },

    /// Rewrite an identifier in another case style
    Inflect {
        #[arg(value_enum)]
        style: Style,
        text: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Style {
    Camelize,
    LowerCamelize,
    Underscore,
    Dasherize,
    Demodulize,
}

#[derive(Debug)]
enum CliError {
    Exception(Exception),
    Json(serde_json::Error),
    Io(io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exception(exc) => write!(f, "{exc}"),
            Self::Json(err) => write!(f, "invalid JSON input: {err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl From<Exception> for CliError {
    fn from(exc: Exception) -> Self {
        Self::Exception(exc)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut limits = ResourceLimits::new();
    if let Some(max_items) = cli.max_items {
        limits = limits.max_items(max_items);
    }
    let mut rng = rng_for(cli.seed);

    match run(cli.command, &limits, &mut *rng) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn rng_for(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
        None => Box::new(rand::thread_rng()),
    }
}

fn run(command: Commands, limits: &ResourceLimits, rng: &mut dyn RngCore) -> Result<serde_json::Value, CliError> {
    debug!(?command, ?limits, "running command");
    let output = match command {
        Commands::Combinations { list, k } => list_output(combinations_of(&parse_list(&list)?, &Value::Int(k), limits)?),
        Commands::Product { lists } => {
            let lists = lists.iter().map(|list| parse_list(list)).collect::<Result<Vec<_>, _>>()?;
            list_output(product_of(&lists, limits)?)
        }
        Commands::Flatten { list, depth } => {
            let list = parse_list(&list)?;
            list_output(flatten(list.as_list()?, depth)?)
        }
        Commands::Shuffle { list } => {
            let list = parse_list(&list)?;
            list_output(shuffle_with_rng(list.as_list()?, rng))
        }
        Commands::Sample { list, n: Some(n) } => {
            let list = parse_list(&list)?;
            list_output(sample_with_rng(list.as_list()?, n, rng)?)
        }
        Commands::Sample { list, n: None } => {
            let list = parse_list(&list)?;
            serde_json::Value::from(sample_one_with_rng(list.as_list()?, rng).cloned().unwrap_or_default())
        }
        Commands::Codepoints { text, lossy } => {
            let bytes = match text {
                Some(text) => text.into_bytes(),
                None => read_stdin()?,
            };
            let policy = if lossy { DecodePolicy::Lossy } else { DecodePolicy::Strict };
            serde_json::Value::from(decode_codepoints(&bytes, policy)?)
        }
        Commands::Partition { text, pattern, regex } => {
            let pattern = pattern_for(&pattern, regex)?;
            parts_output(partition_first(&text, pattern).parts())
        }
        Commands::Rpartition { text, pattern, regex } => {
            let pattern = pattern_for(&pattern, regex)?;
            parts_output(partition_last(&text, pattern).parts())
        }
        Commands::Inflect { style, text } => serde_json::Value::String(match style {
            Style::Camelize => inflect::camelize(&text, FirstLetter::Upper),
            Style::LowerCamelize => inflect::camelize(&text, FirstLetter::Lower),
            Style::Underscore => inflect::underscore(&text),
            Style::Dasherize => inflect::dasherize(&text),
            Style::Demodulize => inflect::demodulize(&text),
        }),
    };
    Ok(output)
}

/// Parses a JSON argument that must be a list.
fn parse_list(source: &str) -> Result<Value, CliError> {
    let value = Value::from(serde_json::from_str::<serde_json::Value>(source)?);
    value.as_list()?;
    Ok(value)
}

fn pattern_for(source: &str, regex: bool) -> Result<Pattern<'_>, CliError> {
    if regex {
        Ok(Pattern::regex(source)?)
    } else {
        Ok(Pattern::from(source))
    }
}

fn read_stdin() -> Result<Vec<u8>, CliError> {
    let mut bytes = Vec::new();
    io::stdin().read_to_end(&mut bytes)?;
    if bytes.is_empty() {
        return Err(Exception::new_msg(ExcType::InvalidArgument, "no text given and stdin is empty").into());
    }
    Ok(bytes)
}

fn list_output(items: Vec<Value>) -> serde_json::Value {
    Value::List(items).into()
}

fn parts_output((before, matched, after): (&str, &str, &str)) -> serde_json::Value {
    serde_json::Value::from(vec![before, matched, after])
}
