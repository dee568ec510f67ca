//! Environment sources
//!
//! The loader never reads `std::env` itself. It asks an `EnvSource` for
//! values, so the real process environment, an env file, or a plain map in
//! a test are interchangeable.

use crate::error::{ApiEnvError, Result};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::debug;

/// Read-only lookup of environment variables by name
pub trait EnvSource {
    /// Raw value of `key`, or `None` if the variable is not defined.
    fn lookup(&self, key: &str) -> Option<&str>;
}

impl EnvSource for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn lookup(&self, key: &str) -> Option<&str> {
        (**self).lookup(key)
    }
}

/// An owned set of environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy the current process environment
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn from_process() -> Self {
        let mut vars = BTreeMap::new();
        for (key, value) in std::env::vars_os() {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => {
                    vars.insert(key, value);
                }
                (key, _) => {
                    debug!("Skipping non UTF-8 environment variable {:?}", key);
                }
            }
        }
        Self { vars }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Read and parse a dotenv-style file
    pub async fn from_env_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading env file {}", path.display());
        let contents = tokio::fs::read_to_string(path).await?;
        Self::parse_env_file(&contents)
    }

    /// Parse dotenv-style `KEY=VALUE` text
    ///
    /// Pairs are collected without touching the process environment. Later
    /// assignments of the same key win.
    pub fn parse_env_file(contents: &str) -> Result<Self> {
        let mut vars = BTreeMap::new();

        for item in dotenvy::from_read_iter(contents.as_bytes()) {
            let (key, value) = item.map_err(|e| env_file_error(contents, e))?;
            vars.insert(key, value);
        }

        Ok(Self { vars })
    }

    /// Combine two environments; values in `overrides` win
    pub fn layered(base: Environment, overrides: Environment) -> Self {
        let mut vars = base.vars;
        vars.extend(overrides.vars);
        Self { vars }
    }

    pub fn set<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl EnvSource for Environment {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

/// Map a dotenvy error to the 1-based line it was raised on
fn env_file_error(contents: &str, error: dotenvy::Error) -> ApiEnvError {
    match error {
        dotenvy::Error::LineParse(line, index) => {
            let first = line.lines().next().unwrap_or_default();
            let line_no = contents
                .lines()
                .position(|l| l.trim_end_matches('\r') == first.trim_end_matches('\r'))
                .map(|pos| pos + 1)
                .unwrap_or(0);
            ApiEnvError::env_file(
                line_no,
                format!("cannot parse '{}' at column {}", first, index),
            )
        }
        dotenvy::Error::Io(e) => ApiEnvError::IoError(e),
        other => ApiEnvError::env_file(0, other.to_string()),
    }
}
