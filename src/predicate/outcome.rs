// SPDX-License-Identifier: MIT

//! Result validation and fault translation
//!
//! Everything that can come back from an invocation ends up here: the
//! returned values, a fault reported by the interpreter, or a Rust panic
//! caught around the call. The output is always a clean boolean or a typed
//! error.

use rhai::{Dynamic, EvalAltResult};
use std::any::Any;

use crate::error::{Fault, PanicError, PredicateError, ReturnError};
use crate::stdlib::errors::ScriptError;

/// What a protected invocation produced: the callable's values or fault, or
/// the payload of a panic that unwound out of it
pub type Invocation = std::thread::Result<Result<Vec<Dynamic>, Fault>>;

/// Turn an invocation into the evaluation result
pub fn translate(invocation: Invocation) -> Result<bool, PredicateError> {
    let values = match invocation {
        Ok(Ok(values)) => values,
        Ok(Err(fault)) => return Err(PanicError::new(fault).into()),
        Err(panic) => return Err(PanicError::new(Fault::from_panic(panic)).into()),
    };

    validate_return(values)
}

/// Require exactly one boolean
pub fn validate_return(mut values: Vec<Dynamic>) -> Result<bool, PredicateError> {
    if values.len() != 1 {
        return Err(ReturnError::Arity(values.len()).into());
    }

    let value = values.remove(0);
    match value.as_bool() {
        Ok(result) => Ok(result),
        Err(actual) => Err(ReturnError::Type {
            value: render(&value),
            actual: actual.to_string(),
        }
        .into()),
    }
}

fn render(value: &Dynamic) -> String {
    if value.is_string() {
        format!("{:?}", value.to_string())
    } else {
        value.to_string()
    }
}

impl Fault {
    /// Convert an interpreter error raised during invocation.
    ///
    /// Errors are reported wrapped in the call (and module) they surfaced
    /// through; the innermost one is the fault.
    pub fn from_eval_error(err: Box<EvalAltResult>) -> Self {
        match *err {
            EvalAltResult::ErrorInFunctionCall(_, _, inner, _) => Self::from_eval_error(inner),
            EvalAltResult::ErrorInModule(_, inner, _) => Self::from_eval_error(inner),
            EvalAltResult::ErrorRuntime(value, _) => Self::from_value(value),
            other => Self::Message(other.to_string()),
        }
    }

    /// Convert a thrown value, unwrapping one level of dynamic wrapping so
    /// structured errors are held directly
    pub fn from_value(value: Dynamic) -> Self {
        let value = value.flatten();

        if value.is::<ScriptError>() {
            return Self::Error(value.cast::<ScriptError>());
        }

        if value.is_string() {
            return Self::Message(value.to_string());
        }

        Self::Value {
            type_name: value.type_name().to_string(),
            rendered: value.to_string(),
        }
    }

    /// Convert the payload of a caught Rust panic
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let payload = match payload.downcast::<String>() {
            Ok(message) => return Self::Message(*message),
            Err(payload) => payload,
        };

        match payload.downcast::<&'static str>() {
            Ok(message) => Self::Message(message.to_string()),
            Err(_) => Self::Message("panic with non-string payload".to_string()),
        }
    }
}
