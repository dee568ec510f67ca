//! Resolved configuration snapshot
//!
//! A `ConfigSnapshot` is produced once by the loader and never changes
//! afterward. It can be published process-wide with [`install`] and read
//! from anywhere with [`global`].

use crate::config::spec::{ParamType, Value};
use crate::error::{ApiEnvError, Result};
use serde::Serialize;
use std::fmt;
use std::sync::{Arc, OnceLock};
use tabled::Tabled;
use tracing::info;

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Environment,
    Default,
    Unset,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Environment => write!(f, "environment"),
            ValueSource::Default => write!(f, "default"),
            ValueSource::Unset => write!(f, "unset"),
        }
    }
}

/// One parameter after resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct ResolvedParameter {
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "type")]
    pub param_type: ParamType,
    #[tabled(rename = "Source")]
    pub source: ValueSource,
    #[tabled(rename = "Value")]
    pub value: Value,
}

/// Immutable, fully resolved configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConfigSnapshot {
    entries: Vec<ResolvedParameter>,
}

impl ConfigSnapshot {
    /// Built only by the loader, after every parameter has resolved
    pub(crate) fn from_entries(entries: Vec<ResolvedParameter>) -> Self {
        Self { entries }
    }

    /// Look up the resolved entry for a declared parameter
    pub fn entry(&self, name: &str) -> Result<&ResolvedParameter> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .ok_or_else(|| ApiEnvError::unknown_parameter(name))
    }

    /// Resolved value of a declared parameter
    pub fn get(&self, name: &str) -> Result<&Value> {
        self.entry(name).map(|entry| &entry.value)
    }

    /// String value of a declared string parameter, `None` when unset
    pub fn get_str(&self, name: &str) -> Result<Option<&str>> {
        let entry = self.expect_type(name, ParamType::String)?;
        Ok(entry.value.as_str())
    }

    /// Integer value of a declared integer parameter, `None` when unset
    pub fn get_int(&self, name: &str) -> Result<Option<i64>> {
        let entry = self.expect_type(name, ParamType::Integer)?;
        Ok(entry.value.as_int())
    }

    fn expect_type(&self, name: &str, expected: ParamType) -> Result<&ResolvedParameter> {
        let entry = self.entry(name)?;
        if entry.param_type != expected {
            return Err(ApiEnvError::type_mismatch(name, entry.param_type.to_string()));
        }
        Ok(entry)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    /// Entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedParameter> {
        self.entries.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn entries(&self) -> &[ResolvedParameter] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

static GLOBAL: OnceLock<Arc<ConfigSnapshot>> = OnceLock::new();

/// Publish a snapshot for the rest of the process lifetime
///
/// Only the first call succeeds.
pub fn install(snapshot: ConfigSnapshot) -> Result<Arc<ConfigSnapshot>> {
    let shared = Arc::new(snapshot);
    GLOBAL
        .set(Arc::clone(&shared))
        .map_err(|_| ApiEnvError::AlreadyInitialized)?;
    info!("Published configuration snapshot ({} parameters)", shared.len());
    Ok(shared)
}

/// The published snapshot, if [`install`] has been called
pub fn global() -> Option<Arc<ConfigSnapshot>> {
    GLOBAL.get().cloned()
}
