//! Configuration loader
//!
//! Resolves declared parameters against an environment source. Loading is
//! all-or-nothing: the first failing parameter aborts the load and no
//! snapshot is returned.

use crate::config::snapshot::{ConfigSnapshot, ResolvedParameter, ValueSource};
use crate::config::spec::{ParamType, ParameterSpec, Value};
use crate::env::EnvSource;
use crate::error::{ApiEnvError, Result};
use std::collections::HashSet;
use tracing::debug;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Resolve `specs` in declaration order against `env`
    ///
    /// Only a variable that is absent from `env` falls back to its default.
    /// A variable set to the empty string is a present value.
    pub fn load<E: EnvSource + ?Sized>(specs: &[ParameterSpec], env: &E) -> Result<ConfigSnapshot> {
        Self::check_unique(specs)?;

        let entries = specs
            .iter()
            .map(|spec| Self::resolve(spec, env))
            .collect::<Result<Vec<_>>>()?;

        debug!("Resolved {} configuration parameters", entries.len());
        Ok(ConfigSnapshot::from_entries(entries))
    }

    fn check_unique(specs: &[ParameterSpec]) -> Result<()> {
        let mut seen = HashSet::with_capacity(specs.len());
        for spec in specs {
            if !seen.insert(spec.name()) {
                return Err(ApiEnvError::duplicate_parameter(spec.name()));
            }
        }
        Ok(())
    }

    fn resolve<E: EnvSource + ?Sized>(spec: &ParameterSpec, env: &E) -> Result<ResolvedParameter> {
        let name = spec.name();

        let (value, source) = match env.lookup(name) {
            Some(raw) => {
                if spec.is_required() && raw.is_empty() {
                    return Err(ApiEnvError::missing_required(name));
                }
                (coerce(spec, raw)?, ValueSource::Environment)
            }
            None => match spec.default() {
                Some(default) => (default.clone(), ValueSource::Default),
                None if spec.is_required() => {
                    return Err(ApiEnvError::missing_required(name));
                }
                None => (Value::Unset, ValueSource::Unset),
            },
        };

        debug!("{} resolved from {}", name, source);

        Ok(ResolvedParameter {
            name: name.to_string(),
            param_type: spec.param_type(),
            source,
            value,
        })
    }
}

/// Convert a raw environment string to the declared type
fn coerce(spec: &ParameterSpec, raw: &str) -> Result<Value> {
    match spec.param_type() {
        ParamType::String => Ok(Value::Str(raw.to_string())),
        ParamType::Integer => raw
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| ApiEnvError::invalid_value(spec.name(), raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn flags() -> Vec<ParameterSpec> {
        vec![
            ParameterSpec::string("PORT").build(),
            ParameterSpec::integer("SHOW_WARNINGS").with_default(1).build(),
            ParameterSpec::integer("SHOW_ADMIN_TOOLS").with_default(0).build(),
        ]
    }

    #[test]
    fn test_defaults_apply_when_absent() {
        let snapshot = ConfigLoader::load(&flags(), &env(&[])).unwrap();
        assert_eq!(snapshot.get("SHOW_WARNINGS").unwrap(), &Value::Int(1));
        assert_eq!(snapshot.get("SHOW_ADMIN_TOOLS").unwrap(), &Value::Int(0));
        assert_eq!(snapshot.get("PORT").unwrap(), &Value::Unset);
        assert_eq!(snapshot.entry("SHOW_WARNINGS").unwrap().source, ValueSource::Default);
    }

    #[test]
    fn test_environment_overrides_default() {
        let snapshot = ConfigLoader::load(&flags(), &env(&[("SHOW_WARNINGS", "0")])).unwrap();
        assert_eq!(snapshot.get("SHOW_WARNINGS").unwrap(), &Value::Int(0));
        assert_eq!(
            snapshot.entry("SHOW_WARNINGS").unwrap().source,
            ValueSource::Environment
        );
    }

    #[test]
    fn test_integer_coercion() {
        for (raw, expected) in [("42", 42), ("-7", -7), ("+3", 3)] {
            let snapshot =
                ConfigLoader::load(&flags(), &env(&[("SHOW_ADMIN_TOOLS", raw)])).unwrap();
            assert_eq!(snapshot.get_int("SHOW_ADMIN_TOOLS").unwrap(), Some(expected));
        }

        for raw in ["yes", "", " 1", "1.0", "0x1"] {
            let err = ConfigLoader::load(&flags(), &env(&[("SHOW_WARNINGS", raw)])).unwrap_err();
            assert!(
                matches!(err, ApiEnvError::InvalidValue { ref name, raw: ref r } if name == "SHOW_WARNINGS" && r == raw),
                "'{}' should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_missing_required() {
        let specs = vec![
            ParameterSpec::string("PORT").build(),
            ParameterSpec::string("TABLE_NAME").required().build(),
        ];
        let err = ConfigLoader::load(&specs, &env(&[("PORT", "3000")])).unwrap_err();
        assert!(matches!(err, ApiEnvError::MissingRequired { ref name } if name == "TABLE_NAME"));

        // An empty value does not satisfy a required parameter
        let err = ConfigLoader::load(&specs, &env(&[("TABLE_NAME", "")])).unwrap_err();
        assert!(matches!(err, ApiEnvError::MissingRequired { .. }));

        let snapshot = ConfigLoader::load(&specs, &env(&[("TABLE_NAME", "photos")])).unwrap();
        assert_eq!(snapshot.get_str("TABLE_NAME").unwrap(), Some("photos"));
    }

    #[test]
    fn test_required_with_default_uses_default() {
        let specs = vec![ParameterSpec::string("DEFAULT_AWS_REGION")
            .required()
            .with_default("us-east-1")
            .build()];
        let snapshot = ConfigLoader::load(&specs, &env(&[])).unwrap();
        assert_eq!(snapshot.get_str("DEFAULT_AWS_REGION").unwrap(), Some("us-east-1"));
    }

    #[test]
    fn test_empty_string_is_present() {
        let snapshot = ConfigLoader::load(&flags(), &env(&[("PORT", "")])).unwrap();
        assert_eq!(snapshot.get("PORT").unwrap(), &Value::Str(String::new()));
    }

    #[test]
    fn test_first_error_wins() {
        let specs = vec![
            ParameterSpec::integer("A").build(),
            ParameterSpec::string("B").required().build(),
        ];
        let err = ConfigLoader::load(&specs, &env(&[("A", "x")])).unwrap_err();
        assert!(matches!(err, ApiEnvError::InvalidValue { .. }));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let specs = vec![
            ParameterSpec::string("PORT").build(),
            ParameterSpec::integer("PORT").build(),
        ];
        let err = ConfigLoader::load(&specs, &env(&[])).unwrap_err();
        assert!(matches!(err, ApiEnvError::DuplicateParameter { ref name } if name == "PORT"));
    }

    #[test]
    fn test_load_is_deterministic() {
        let vars = env(&[("PORT", "3000"), ("SHOW_ADMIN_TOOLS", "1")]);
        let first = ConfigLoader::load(&flags(), &vars).unwrap();
        let second = ConfigLoader::load(&flags(), &vars).unwrap();
        assert_eq!(first, second);
    }
}
