use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::catalog::LoadOptions;
use crate::recommend::DEFAULT_TOP_N;

pub const DEFAULT_DATA_PATH: &str = "ecommerce_data.csv";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_QUERY_INDICES: &[usize] = &[0, 1];

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Command-line
/// flags override whatever is set here.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Product CSV (LOOKALIKE_DATA_PATH)
    pub data_path: PathBuf,
    /// Where charts are written (LOOKALIKE_OUTPUT_DIR)
    pub output_dir: PathBuf,
    /// Recommendations per product (LOOKALIKE_TOP_N)
    pub top_n: usize,
    /// Products queried by `run` when none are given (LOOKALIKE_QUERY_INDICES)
    pub query_indices: Vec<usize>,
    /// CSV field delimiter (LOOKALIKE_DELIMITER)
    pub delimiter: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            top_n: DEFAULT_TOP_N,
            query_indices: DEFAULT_QUERY_INDICES.to_vec(),
            delimiter: b',',
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default; only malformed values are errors.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let top_n = match lookup("LOOKALIKE_TOP_N") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("LOOKALIKE_TOP_N must be a whole number, got {raw:?}"))?,
            None => defaults.top_n,
        };

        let query_indices = match lookup("LOOKALIKE_QUERY_INDICES") {
            Some(raw) => parse_indices(&raw).context("Invalid LOOKALIKE_QUERY_INDICES")?,
            None => defaults.query_indices,
        };

        let delimiter = match lookup("LOOKALIKE_DELIMITER") {
            Some(raw) => parse_delimiter(&raw).context("Invalid LOOKALIKE_DELIMITER")?,
            None => defaults.delimiter,
        };

        Ok(Self {
            data_path: lookup("LOOKALIKE_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            output_dir: lookup("LOOKALIKE_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            top_n,
            query_indices,
            delimiter,
        })
    }

    /// Check that the dataset file exists.
    /// Call this before any command that builds the pipeline.
    pub fn require_dataset(&self) -> Result<()> {
        if !self.data_path.is_file() {
            anyhow::bail!(
                "Dataset not found at {}.\n\
                 Pass --data <PATH> or set LOOKALIKE_DATA_PATH in your .env file.",
                self.data_path.display()
            );
        }
        Ok(())
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            delimiter: self.delimiter,
        }
    }
}

/// Parse a comma-separated list of product indices, e.g. `0, 1, 7`.
pub fn parse_indices(raw: &str) -> Result<Vec<usize>> {
    let indices = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .with_context(|| format!("{s:?} is not a product index"))
        })
        .collect::<Result<Vec<_>>>()?;

    if indices.is_empty() {
        anyhow::bail!("no product indices given");
    }
    Ok(indices)
}

/// Parse a single-byte delimiter. `tab` and `\t` mean a tab character.
pub fn parse_delimiter(raw: &str) -> Result<u8> {
    match raw {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        s => anyhow::bail!("delimiter must be a single ASCII character, got {s:?}"),
    }
}
