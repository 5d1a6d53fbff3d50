// SPDX-License-Identifier: MIT

//! Evaluator configuration
//!
//! Limits and module selection applied to every fresh interpreter. The
//! config can be embedded in a host's own serde config, parsed from YAML, or
//! read from `PREDICATE_*` environment variables.

use serde::{Deserialize, Serialize};

use crate::error::PredicateError;
use crate::stdlib;

const ENV_STRICT_VARIABLES: &str = "PREDICATE_STRICT_VARIABLES";
const ENV_MAX_OPERATIONS: &str = "PREDICATE_MAX_OPERATIONS";
const ENV_MAX_CALL_LEVELS: &str = "PREDICATE_MAX_CALL_LEVELS";
const ENV_MAX_STRING_SIZE: &str = "PREDICATE_MAX_STRING_SIZE";
const ENV_MODULES: &str = "PREDICATE_MODULES";

/// Settings for each interpreter instance created by an evaluator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    /// Reject undeclared variables when the unit is loaded
    pub strict_variables: bool,
    /// Abort scripts after this many operations (unlimited when unset)
    pub max_operations: Option<u64>,
    /// Maximum function call nesting depth
    pub max_call_levels: usize,
    /// Maximum length of any string built by the script
    pub max_string_size: Option<usize>,
    /// Script modules that predicates may import
    pub modules: Vec<String>,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            strict_variables: false,
            max_operations: None,
            max_call_levels: 64,
            max_string_size: None,
            modules: stdlib::MODULE_NAMES.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl EvaluatorConfig {
    /// Parse a config from a YAML document
    pub fn from_yaml(content: &str) -> Result<Self, PredicateError> {
        let config: EvaluatorConfig = serde_yaml::from_str(content)
            .map_err(|e| PredicateError::config(format!("invalid YAML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Build a config from the process environment
    pub fn from_env() -> Result<Self, PredicateError> {
        Self::from_vars(std::env::vars())
    }

    /// Build a config from `PREDICATE_*` key/value pairs, starting from the
    /// defaults
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, PredicateError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();

        for (key, value) in vars {
            let value = value.as_ref().trim();
            match key.as_ref() {
                ENV_STRICT_VARIABLES => {
                    config.strict_variables = parse_var(ENV_STRICT_VARIABLES, value)?;
                }
                ENV_MAX_OPERATIONS => {
                    config.max_operations = Some(parse_var(ENV_MAX_OPERATIONS, value)?);
                }
                ENV_MAX_CALL_LEVELS => {
                    config.max_call_levels = parse_var(ENV_MAX_CALL_LEVELS, value)?;
                }
                ENV_MAX_STRING_SIZE => {
                    config.max_string_size = Some(parse_var(ENV_MAX_STRING_SIZE, value)?);
                }
                ENV_MODULES => {
                    config.modules = value
                        .split(',')
                        .map(str::trim)
                        .filter(|m| !m.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                _ => {}
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that every configured module exists
    pub fn validate(&self) -> Result<(), PredicateError> {
        for module in &self.modules {
            if !stdlib::MODULE_NAMES.contains(&module.as_str()) {
                return Err(PredicateError::config(format!(
                    "unknown module '{}', expected one of {:?}",
                    module,
                    stdlib::MODULE_NAMES
                )));
            }
        }
        Ok(())
    }
}

fn parse_var<T>(name: &str, value: &str) -> Result<T, PredicateError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| PredicateError::config(format!("{} must be valid: {}", name, e)))
}
