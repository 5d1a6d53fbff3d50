// SPDX-License-Identifier: MIT

//! Typed error handling for predicate evaluation
//!
//! Every failure an evaluation can hit is a variant of [`PredicateError`].
//! Faults raised while the predicate body runs are carried by [`PanicError`],
//! which keeps the original payload so callers can match on it with
//! [`PredicateError::is`].

use std::error::Error;
use std::fmt;
use thiserror::Error;

use crate::stdlib::errors::ScriptError;

/// Top-level error type for predicate evaluation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredicateError {
    /// The body has no lines, or no line mentions `return`
    #[error("predicate: empty predicate")]
    EmptyPredicate,

    /// The synthesized unit failed to parse or load in the interpreter.
    /// The interpreter's message is kept verbatim.
    #[error("{0}")]
    Load(String),

    /// The entry callable could not be resolved or is not invocable
    #[error("predicate: definition is invalid: {0}")]
    DefinitionInvalid(String),

    /// The entry callable returned something other than one boolean
    #[error("predicate: invalid return value: {0}")]
    ReturnInvalid(#[from] ReturnError),

    /// A fault was raised while the predicate body was running
    #[error("{0}")]
    Panic(#[from] PanicError),

    /// Configuration errors (bad env vars, unknown modules)
    #[error("predicate: configuration error: {0}")]
    Config(String),

    /// The blocking evaluation task could not be joined
    #[error("predicate: evaluation task failed: {0}")]
    Task(String),
}

/// Ways the entry callable's return can be malformed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReturnError {
    #[error("invalid number of return values: expected 1, got {0}")]
    Arity(usize),

    #[error("cannot use {value} (type {actual}) as type bool in return")]
    Type { value: String, actual: String },
}

/// Payload of a fault raised during invocation
#[derive(Debug, Clone, PartialEq)]
pub enum Fault {
    /// A thrown string, a Rust panic message or an interpreter runtime error
    Message(String),
    /// A structured error value thrown by the script
    Error(ScriptError),
    /// Any other thrown value
    Value { type_name: String, rendered: String },
}

impl Fault {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::Message(message) => write!(f, "{}", message),
            Fault::Error(err) => write!(f, "{}", err),
            Fault::Value {
                type_name,
                rendered,
            } => write!(f, "{} ({})", rendered, type_name),
        }
    }
}

/// Error produced when the predicate faults while running.
///
/// Two `PanicError`s are equal when their payloads are equal. When the
/// payload is itself an error it is exposed through [`Error::source`].
#[derive(Debug, Clone, PartialEq)]
pub struct PanicError {
    payload: Fault,
}

impl PanicError {
    pub fn new(payload: Fault) -> Self {
        Self { payload }
    }

    pub fn payload(&self) -> &Fault {
        &self.payload
    }

    /// Check whether this error, or any error it wraps, equals `target`
    pub fn is<E>(&self, target: &E) -> bool
    where
        E: Error + PartialEq + 'static,
    {
        chain_contains(self, target)
    }
}

impl fmt::Display for PanicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "predicate: panic while evaluating: {}", self.payload)
    }
}

impl Error for PanicError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.payload {
            Fault::Error(err) => Some(err),
            _ => None,
        }
    }
}

impl PredicateError {
    /// Check whether this error, or any error in its source chain, equals
    /// `target`.
    pub fn is<E>(&self, target: &E) -> bool
    where
        E: Error + PartialEq + 'static,
    {
        chain_contains(self, target)
    }

    /// Create a definition error
    pub fn definition(reason: impl Into<String>) -> Self {
        Self::DefinitionInvalid(reason.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

fn chain_contains<E>(err: &(dyn Error + 'static), target: &E) -> bool
where
    E: Error + PartialEq + 'static,
{
    let mut current = Some(err);
    while let Some(err) = current {
        if err.downcast_ref::<E>().is_some_and(|e| e == target) {
            return true;
        }
        current = err.source();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            PredicateError::EmptyPredicate.to_string(),
            "predicate: empty predicate"
        );
        assert_eq!(
            PredicateError::Load("Module not found: nope".into()).to_string(),
            "Module not found: nope"
        );
        assert_eq!(
            PredicateError::from(ReturnError::Arity(0)).to_string(),
            "predicate: invalid return value: invalid number of return values: expected 1, got 0"
        );
        assert_eq!(
            PredicateError::from(PanicError::new(Fault::message("test"))).to_string(),
            "predicate: panic while evaluating: test"
        );
    }

    #[test]
    fn test_panic_error_equality() {
        let a = PanicError::new(Fault::Error(ScriptError::Unsupported));
        let b = PanicError::new(Fault::Error(ScriptError::Unsupported));
        let c = PanicError::new(Fault::message("unsupported operation"));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.is(&b));
        assert!(!a.is(&c));
    }

    #[test]
    fn test_is_walks_the_chain() {
        let err = PredicateError::from(PanicError::new(Fault::Error(ScriptError::Unsupported)));

        assert!(err.is(&ScriptError::Unsupported));
        assert!(!err.is(&ScriptError::NotFound));
        assert!(err.is(&PanicError::new(Fault::Error(ScriptError::Unsupported))));
        assert!(err.is(&err.clone()));
    }

    #[test]
    fn test_message_payload_has_no_source() {
        let err = PanicError::new(Fault::message("boom"));
        assert!(err.source().is_none());
        assert!(!err.is(&ScriptError::Custom("boom".into())));
    }

    #[test]
    fn test_return_error_is_source() {
        let err = PredicateError::from(ReturnError::Arity(2));
        assert!(err.is(&ReturnError::Arity(2)));
        assert!(!err.is(&ReturnError::Arity(0)));
    }
}
