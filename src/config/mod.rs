//! Configuration management module
//!
//! This module declares configuration parameters, resolves them against an
//! environment source, and exposes the resulting immutable snapshot.

pub mod loader;
pub mod params;
pub mod snapshot;
pub mod spec;

pub use loader::ConfigLoader;
pub use params::{api_parameters, ApiSettings};
pub use snapshot::{ConfigSnapshot, ResolvedParameter, ValueSource};
pub use spec::{ParamType, ParamValue, ParameterBuilder, ParameterSpec, Value};
