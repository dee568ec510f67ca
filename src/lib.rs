//! apienv - photo API environment configuration
//!
//! Declares the photo API's configuration parameters, resolves them from an
//! environment source into an immutable typed snapshot, and validates them
//! before the rest of the process starts.

pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod utils;

// Re-export commonly used types
pub use config::{ApiSettings, ConfigLoader, ConfigSnapshot, ParameterSpec, Value};
pub use env::{EnvSource, Environment};
pub use error::{ApiEnvError, Result};
