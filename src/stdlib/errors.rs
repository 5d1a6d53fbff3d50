// SPDX-License-Identifier: MIT

//! `errors` module: structured error values scripts can `throw`
//!
//! ```text
//! import "errors" as errors;
//!
//! throw errors::UNSUPPORTED;
//! throw errors::custom("quota exceeded");
//! ```

use rhai::plugin::*;
use rhai::{Dynamic, EvalAltResult, Module, Position};
use thiserror::Error;

/// Error values visible to predicate scripts
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("unsupported operation")]
    Unsupported,

    #[error("invalid argument")]
    InvalidArgument,

    #[error("not found")]
    NotFound,

    #[error("permission denied")]
    PermissionDenied,

    #[error("error parsing regexp: {message}: `{pattern}`")]
    InvalidPattern { pattern: String, message: String },

    #[error("parse {input:?}: {message}")]
    InvalidUrl { input: String, message: String },

    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("{0}")]
    Custom(String),
}

impl ScriptError {
    /// Raise this error as a script runtime fault
    pub fn into_fault(self) -> Box<EvalAltResult> {
        EvalAltResult::ErrorRuntime(Dynamic::from(self), Position::NONE).into()
    }
}

#[export_module]
mod error_functions {
    use super::ScriptError;

    pub const UNSUPPORTED: ScriptError = ScriptError::Unsupported;
    pub const INVALID_ARGUMENT: ScriptError = ScriptError::InvalidArgument;
    pub const NOT_FOUND: ScriptError = ScriptError::NotFound;
    pub const PERMISSION_DENIED: ScriptError = ScriptError::PermissionDenied;

    /// Create an error carrying a custom message. Named `custom` because
    /// `new` is reserved in scripts.
    pub fn custom(message: &str) -> ScriptError {
        ScriptError::Custom(message.to_string())
    }

    #[rhai_fn(global, name = "to_string", pure)]
    pub fn describe(err: &mut ScriptError) -> String {
        err.to_string()
    }

    #[rhai_fn(global, name = "==", pure)]
    pub fn equals(err: &mut ScriptError, other: ScriptError) -> bool {
        *err == other
    }

    #[rhai_fn(global, name = "!=", pure)]
    pub fn not_equals(err: &mut ScriptError, other: ScriptError) -> bool {
        *err != other
    }
}

pub fn module() -> Module {
    exported_module!(error_functions)
}
