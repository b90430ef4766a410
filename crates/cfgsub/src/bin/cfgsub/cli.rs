//! cfgsub cli interface

use clap::{Parser, ValueEnum};
use std::fmt::Formatter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[clap(flatten)]
    pub input: InputArgs,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
pub struct InputArgs {
    /// Path to the input document containing placeholders
    #[clap(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Path to the overrides document
    ///
    /// Its top-level mapping becomes the lookup table for placeholder
    /// keys. May be omitted when -f/--field covers everything.
    #[clap(short = 'e', long = "overrides")]
    pub overrides: Option<PathBuf>,

    /// An ad-hoc 'key=value' override
    ///
    /// Can be specified multiple times. Applied after the overrides
    /// document, so ad-hoc fields win on key collision. Useful as an
    /// alternative to -e when all you're substituting are simple fields.
    #[clap(short = 'f', long = "field")]
    pub fields: Vec<String>,

    /// The regex pattern used to recognize placeholders
    ///
    /// Must contain exactly one capture group; the captured text is the
    /// lookup key.
    #[clap(long = "pattern", default_value = cfgsub::pattern::DEFAULT_PATTERN)]
    pub pattern: String,
}

#[derive(Parser, Debug)]
pub struct OutputArgs {
    #[arg(short = 'F', long = "output-format", default_value_t)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Default, Debug)]
pub enum OutputFormat {
    Json,
    #[default]
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}
