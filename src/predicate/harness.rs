// SPDX-License-Identifier: MIT

//! Interpreter harness
//!
//! Drives one interpreter through load, resolve and a protected invocation.
//! The interpreter itself sits behind the [`Interpreter`] trait so the
//! harness never depends on a particular engine.

use rhai::Dynamic;
use std::cell::Cell;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

use super::outcome;
use super::synth::SynthesizedUnit;
use crate::error::{Fault, PredicateError};

thread_local! {
    static PROTECTED: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Chain a panic hook that logs panics raised inside [`protected`] instead of
/// printing them. Panics anywhere else go to the previously installed hook.
/// A hook set by the host afterwards replaces this one.
fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if PROTECTED.with(Cell::get) {
                log::debug!("Panic inside predicate invocation: {}", info);
            } else {
                previous(info);
            }
        }));
    });
}

/// Run `f`, catching any panic it raises without reporting it on stderr
fn protected<T>(f: impl FnOnce() -> T) -> std::thread::Result<T> {
    install_quiet_hook();

    let outer = PROTECTED.with(|p| p.replace(true));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    PROTECTED.with(|p| p.set(outer));

    result
}

/// A callable resolved from a loaded unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callable {
    name: String,
    arity: usize,
}

impl Callable {
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Whether this callable can be invoked with `count` arguments
    pub fn accepts(&self, count: usize) -> bool {
        self.arity == count
    }
}

/// An embeddable interpreter able to load source text and call into it.
///
/// Implementations are used for exactly one evaluation and then dropped.
pub trait Interpreter {
    /// Parse and load `unit`. The error message is reported to the caller
    /// verbatim.
    fn load(&mut self, unit: &SynthesizedUnit) -> Result<(), PredicateError>;

    /// Find the callable named `name` in the loaded unit
    fn resolve(&self, name: &str) -> Option<Callable>;

    /// Call `callable` and return the values it produced. A unit return
    /// produces no values.
    fn invoke(&mut self, callable: &Callable, args: Vec<Dynamic>) -> Result<Vec<Dynamic>, Fault>;
}

/// Load `unit` into `interpreter`, call its entry point with `args` and
/// translate whatever comes back
pub fn run<I>(interpreter: &mut I, unit: &SynthesizedUnit, args: &[Dynamic]) -> Result<bool, PredicateError>
where
    I: Interpreter + ?Sized,
{
    interpreter.load(unit)?;

    let callable = interpreter
        .resolve(unit.entry())
        .ok_or_else(|| PredicateError::definition(format!("failed to resolve '{}'", unit.entry())))?;

    if !callable.accepts(args.len()) {
        return Err(PredicateError::definition(format!(
            "'{}' takes {} argument(s) but {} were supplied",
            callable.name(),
            callable.arity(),
            args.len()
        )));
    }

    log::debug!("Invoking '{}' with {} argument(s)", callable.name(), args.len());

    let invocation = protected(|| interpreter.invoke(&callable, args.to_vec()));

    outcome::translate(invocation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PanicError, ReturnError};
    use crate::predicate::synth::synthesize;

    /// What the mock does when invoked
    enum Behavior {
        Return(Vec<Dynamic>),
        Fault(Fault),
        Panic(&'static str),
    }

    /// Mock interpreter with scripted responses for each stage
    struct MockInterpreter {
        load_error: Option<String>,
        callable: Option<Callable>,
        behavior: Behavior,
        received: Vec<Dynamic>,
        invoked_protected: bool,
    }

    impl MockInterpreter {
        fn returning(values: Vec<Dynamic>) -> Self {
            Self {
                load_error: None,
                callable: Some(Callable::new("predicate_do", 0)),
                behavior: Behavior::Return(values),
                received: Vec::new(),
                invoked_protected: false,
            }
        }

        fn with_behavior(behavior: Behavior) -> Self {
            Self {
                behavior,
                ..Self::returning(vec![])
            }
        }
    }

    impl Interpreter for MockInterpreter {
        fn load(&mut self, _unit: &SynthesizedUnit) -> Result<(), PredicateError> {
            match &self.load_error {
                Some(message) => Err(PredicateError::Load(message.clone())),
                None => Ok(()),
            }
        }

        fn resolve(&self, name: &str) -> Option<Callable> {
            self.callable.clone().filter(|c| c.name() == name)
        }

        fn invoke(&mut self, _callable: &Callable, args: Vec<Dynamic>) -> Result<Vec<Dynamic>, Fault> {
            self.received = args;
            self.invoked_protected = PROTECTED.with(Cell::get);
            match &self.behavior {
                Behavior::Return(values) => Ok(values.clone()),
                Behavior::Fault(fault) => Err(fault.clone()),
                Behavior::Panic(message) => panic!("{}", message),
            }
        }
    }

    fn unit() -> SynthesizedUnit {
        synthesize("return true;", &[]).unwrap()
    }

    #[test]
    fn test_returns_boolean() {
        let mut interpreter = MockInterpreter::returning(vec![Dynamic::from(true)]);
        assert_eq!(run(&mut interpreter, &unit(), &[]), Ok(true));
    }

    #[test]
    fn test_load_error_is_verbatim() {
        let mut interpreter = MockInterpreter::returning(vec![]);
        interpreter.load_error = Some("Syntax error: expecting ';'".to_string());

        let err = run(&mut interpreter, &unit(), &[]).unwrap_err();
        assert_eq!(err.to_string(), "Syntax error: expecting ';'");
    }

    #[test]
    fn test_unresolved_entry_is_definition_invalid() {
        let mut interpreter = MockInterpreter::returning(vec![Dynamic::from(true)]);
        interpreter.callable = Some(Callable::new("something_else", 0));

        let err = run(&mut interpreter, &unit(), &[]).unwrap_err();
        assert!(matches!(err, PredicateError::DefinitionInvalid(_)));
    }

    #[test]
    fn test_arity_mismatch_is_not_invocable() {
        let mut interpreter = MockInterpreter::returning(vec![Dynamic::from(true)]);
        interpreter.callable = Some(Callable::new("predicate_do", 2));

        let err = run(&mut interpreter, &unit(), &[]).unwrap_err();
        assert!(matches!(err, PredicateError::DefinitionInvalid(_)));
        assert!(err.to_string().contains("takes 2 argument(s)"));
    }

    #[test]
    fn test_arguments_are_passed_through() {
        let args = vec![Dynamic::from(5_i64), "x".into()];
        let unit = synthesize("return arg0 > 1;", &args).unwrap();
        let mut interpreter = MockInterpreter::returning(vec![Dynamic::from(false)]);
        interpreter.callable = Some(Callable::new("predicate_do", 2));

        assert_eq!(run(&mut interpreter, &unit, &args), Ok(false));
        assert_eq!(interpreter.received.len(), 2);
        assert_eq!(interpreter.received[0].as_int().unwrap(), 5);
    }

    #[test]
    fn test_no_return_values() {
        let mut interpreter = MockInterpreter::returning(vec![]);
        let err = run(&mut interpreter, &unit(), &[]).unwrap_err();
        assert_eq!(err, PredicateError::ReturnInvalid(ReturnError::Arity(0)));
    }

    #[test]
    fn test_fault_is_translated() {
        let mut interpreter = MockInterpreter::with_behavior(Behavior::Fault(Fault::message("test")));
        let err = run(&mut interpreter, &unit(), &[]).unwrap_err();
        assert_eq!(err, PredicateError::Panic(PanicError::new(Fault::message("test"))));
    }

    #[test]
    fn test_panic_is_intercepted() {
        let mut interpreter = MockInterpreter::with_behavior(Behavior::Panic("native code blew up"));
        let err = run(&mut interpreter, &unit(), &[]).unwrap_err();
        assert!(matches!(err, PredicateError::Panic(_)));
        assert!(err.to_string().contains("native code blew up"));
    }

    #[test]
    fn test_panic_hook_is_quiet_only_while_invoking() {
        let mut interpreter = MockInterpreter::with_behavior(Behavior::Panic("quiet"));
        assert!(!PROTECTED.with(Cell::get));

        let err = run(&mut interpreter, &unit(), &[]).unwrap_err();
        assert!(matches!(err, PredicateError::Panic(_)));
        assert!(interpreter.invoked_protected);
        assert!(!PROTECTED.with(Cell::get));
    }

    #[test]
    fn test_protected_scopes_nest() {
        let (nested, outer) = protected(|| {
            let nested = protected(|| PROTECTED.with(Cell::get)).unwrap();
            (nested, PROTECTED.with(Cell::get))
        })
        .unwrap();
        assert!(nested);
        assert!(outer);
        assert!(!PROTECTED.with(Cell::get));
    }
}
