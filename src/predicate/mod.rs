// SPDX-License-Identifier: MIT

//! Predicate evaluation
//!
//! A predicate is a script body plus positional arguments `arg0`, `arg1`, ...
//! Evaluation runs the pipeline:
//! - split imports from the body
//! - synthesize the entry function
//! - load it into a fresh interpreter and resolve the entry
//! - invoke it inside a protected scope
//! - validate the return and translate faults

mod engine;
pub mod harness;
mod outcome;
mod splitter;
mod synth;

pub use engine::RhaiInterpreter;
pub use harness::{Callable, Interpreter};
pub use outcome::{translate, validate_return, Invocation};
pub use splitter::{contains_return, is_import_line, split_imports};
pub use synth::{synthesize, Param, SynthesizedUnit, ENTRY_POINT};

use rhai::Dynamic;

use crate::config::EvaluatorConfig;
use crate::error::PredicateError;

/// Evaluates predicates with a fixed configuration.
///
/// Holds no interpreter state: every call builds and drops its own
/// interpreter, so one evaluator can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Evaluate `predicate` against `args`
    pub fn evaluate(&self, predicate: &str, args: &[Dynamic]) -> Result<bool, PredicateError> {
        let unit = synthesize(predicate, args)?;
        let mut interpreter = RhaiInterpreter::new(&self.config)?;
        harness::run(&mut interpreter, &unit, args)
    }

    /// Evaluate on tokio's blocking pool.
    ///
    /// No timeout is applied; wrap the future in `tokio::time::timeout` to
    /// bound how long the caller waits.
    pub async fn evaluate_async(
        &self,
        predicate: impl Into<String>,
        args: Vec<Dynamic>,
    ) -> Result<bool, PredicateError> {
        let evaluator = self.clone();
        let predicate = predicate.into();

        tokio::task::spawn_blocking(move || evaluator.evaluate(&predicate, &args))
            .await
            .map_err(|e| PredicateError::Task(e.to_string()))?
    }
}

/// Evaluate `predicate` against `args` with the default configuration
pub fn evaluate(predicate: &str, args: &[Dynamic]) -> Result<bool, PredicateError> {
    Evaluator::default().evaluate(predicate, args)
}
