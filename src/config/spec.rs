//! Parameter declarations
//!
//! A `ParameterSpec` names one environment variable, its type, whether it
//! is required, and an optional default. Specs are built through a
//! [`ParameterBuilder`] typed by the parameter's Rust type, so a default of
//! the wrong type does not compile.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Declared type of a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Integer,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::String => write!(f, "string"),
            ParamType::Integer => write!(f, "integer"),
        }
    }
}

/// A resolved (or default) parameter value
///
/// `Unset` marks a parameter that is neither in the environment nor
/// defaulted. It is distinct from an empty string and from zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Str(String),
    Unset,
}

impl Value {
    pub fn is_unset(&self) -> bool {
        matches!(self, Value::Unset)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Type this value carries, `None` for `Unset`
    pub fn param_type(&self) -> Option<ParamType> {
        match self {
            Value::Str(_) => Some(ParamType::String),
            Value::Int(_) => Some(ParamType::Integer),
            Value::Unset => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Unset => Ok(()),
        }
    }
}

/// Declaration of a single configuration parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterSpec {
    name: String,
    #[serde(rename = "type")]
    param_type: ParamType,
    required: bool,
    default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

/// Rust types a parameter can be declared with
pub trait ParamValue {
    const TYPE: ParamType;

    fn into_value(self) -> Value;
}

impl ParamValue for String {
    const TYPE: ParamType = ParamType::String;

    fn into_value(self) -> Value {
        Value::Str(self)
    }
}

impl ParamValue for i64 {
    const TYPE: ParamType = ParamType::Integer;

    fn into_value(self) -> Value {
        Value::Int(self)
    }
}

/// Builder for a parameter of type `T`
///
/// ```
/// use apienv::ParameterSpec;
///
/// let spec = ParameterSpec::integer("SHOW_WARNINGS").with_default(1).build();
/// assert_eq!(spec.default(), Some(&apienv::Value::Int(1)));
/// ```
///
/// A default of another type is rejected by the compiler:
///
/// ```compile_fail
/// use apienv::ParameterSpec;
///
/// let spec = ParameterSpec::integer("SHOW_WARNINGS").with_default("1").build();
/// ```
#[derive(Debug, Clone)]
pub struct ParameterBuilder<T> {
    spec: ParameterSpec,
    _type: PhantomData<T>,
}

impl<T: ParamValue> ParameterBuilder<T> {
    fn new<S: Into<String>>(name: S) -> Self {
        Self {
            spec: ParameterSpec {
                name: name.into(),
                param_type: T::TYPE,
                required: false,
                default: None,
                description: None,
            },
            _type: PhantomData,
        }
    }

    pub fn required(mut self) -> Self {
        self.spec.required = true;
        self
    }

    pub fn describe<S: Into<String>>(mut self, description: S) -> Self {
        self.spec.description = Some(description.into());
        self
    }

    /// Value used when the variable is absent from the environment
    pub fn with_default<D: Into<T>>(mut self, default: D) -> Self {
        self.spec.default = Some(default.into().into_value());
        self
    }

    pub fn build(self) -> ParameterSpec {
        self.spec
    }
}

impl<T: ParamValue> From<ParameterBuilder<T>> for ParameterSpec {
    fn from(builder: ParameterBuilder<T>) -> Self {
        builder.build()
    }
}

impl ParameterSpec {
    /// Declare a string parameter
    pub fn string<S: Into<String>>(name: S) -> ParameterBuilder<String> {
        ParameterBuilder::new(name)
    }

    /// Declare an integer parameter
    pub fn integer<S: Into<String>>(name: S) -> ParameterBuilder<i64> {
        ParameterBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param_type(&self) -> ParamType {
        self.param_type
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_type_matched() {
        let spec = ParameterSpec::integer("SHOW_WARNINGS").with_default(1).build();
        assert_eq!(spec.param_type(), ParamType::Integer);
        assert_eq!(spec.default(), Some(&Value::Int(1)));

        let spec = ParameterSpec::string("DEFAULT_AWS_REGION")
            .with_default("us-east-1")
            .build();
        assert_eq!(spec.param_type(), ParamType::String);
        assert_eq!(spec.default(), Some(&Value::Str("us-east-1".to_string())));

        // Every stored default carries the declared type
        for spec in [
            ParameterSpec::integer("A").with_default(-3).build(),
            ParameterSpec::string("B").with_default(String::new()).build(),
        ] {
            assert_eq!(
                spec.default().and_then(Value::param_type),
                Some(spec.param_type())
            );
        }
    }

    #[test]
    fn test_builder() {
        let spec: ParameterSpec = ParameterSpec::string("TABLE_NAME")
            .required()
            .describe("DynamoDB table")
            .into();
        assert_eq!(spec.name(), "TABLE_NAME");
        assert_eq!(spec.param_type(), ParamType::String);
        assert!(spec.is_required());
        assert_eq!(spec.description(), Some("DynamoDB table"));
    }

    #[test]
    fn test_value_serialization() {
        assert_eq!(serde_json::to_string(&Value::Int(0)).unwrap(), "0");
        assert_eq!(serde_json::to_string(&Value::Str("eu".into())).unwrap(), "\"eu\"");
        assert_eq!(serde_json::to_string(&Value::Unset).unwrap(), "null");
        assert_eq!(Value::Unset.to_string(), "");
        assert!(Value::Unset.is_unset());
        assert_eq!(Value::Unset.param_type(), None);
    }
}
