// SPDX-License-Identifier: MIT

//! Rhai-backed interpreter
//!
//! A `RhaiInterpreter` owns its own `Engine`, built from scratch with the
//! standard package and the configured script modules. It is never shared
//! between evaluations.

use rhai::packages::{Package, StandardPackage};
use rhai::{Dynamic, Engine, Scope, AST};

use super::harness::{Callable, Interpreter};
use super::synth::SynthesizedUnit;
use crate::config::EvaluatorConfig;
use crate::error::{Fault, PredicateError};
use crate::stdlib;

const SCRIPT_LOG_TARGET: &str = "predicate::script";

pub struct RhaiInterpreter {
    engine: Engine,
    ast: Option<AST>,
}

impl RhaiInterpreter {
    /// Create a fresh interpreter configured by `config`
    pub fn new(config: &EvaluatorConfig) -> Result<Self, PredicateError> {
        let mut engine = Engine::new_raw();

        engine.register_global_module(StandardPackage::new().as_shared_module());
        engine.set_module_resolver(stdlib::resolver(&config.modules)?);

        engine.set_strict_variables(config.strict_variables);
        engine.set_max_call_levels(config.max_call_levels);
        if let Some(max) = config.max_operations {
            engine.set_max_operations(max);
        }
        if let Some(max) = config.max_string_size {
            engine.set_max_string_size(max);
        }

        engine.on_print(|text| log::info!(target: SCRIPT_LOG_TARGET, "{}", text));
        engine.on_debug(|text, source, pos| {
            log::debug!(
                target: SCRIPT_LOG_TARGET,
                "{} @ {}: {}",
                source.unwrap_or("predicate"),
                pos,
                text
            )
        });

        log::debug!("Created interpreter with modules {:?}", config.modules);

        Ok(Self { engine, ast: None })
    }
}

impl Interpreter for RhaiInterpreter {
    fn load(&mut self, unit: &SynthesizedUnit) -> Result<(), PredicateError> {
        // Imports are resolved here, so an unknown module fails the load
        // rather than the call.
        let ast = self
            .engine
            .compile_into_self_contained(&Scope::new(), unit.source())
            .map_err(|err| PredicateError::Load(err.to_string()))?;

        self.ast = Some(ast);
        Ok(())
    }

    fn resolve(&self, name: &str) -> Option<Callable> {
        self.ast
            .as_ref()?
            .iter_functions()
            .find(|f| f.name == name)
            .map(|f| Callable::new(f.name, f.params.len()))
    }

    fn invoke(&mut self, callable: &Callable, args: Vec<Dynamic>) -> Result<Vec<Dynamic>, Fault> {
        let ast = self
            .ast
            .as_ref()
            .ok_or_else(|| Fault::message("no unit loaded"))?;

        let mut scope = Scope::new();
        let value = self
            .engine
            .call_fn::<Dynamic>(&mut scope, ast, callable.name(), args)
            .map_err(Fault::from_eval_error)?;

        if value.is_unit() {
            Ok(Vec::new())
        } else {
            Ok(vec![value])
        }
    }
}
