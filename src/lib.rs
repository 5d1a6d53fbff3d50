// SPDX-License-Identifier: MIT

//! Runtime boolean predicates
//!
//! Evaluate a user-supplied script snippet against typed arguments and get a
//! boolean back, without recompiling the host. Useful for configurable
//! routing rules and feature gates.
//!
//! ```
//! use predicate_rs::{evaluate, Dynamic};
//!
//! let predicate = r#"
//!     import "url" as url;
//!
//!     let u = url::try_parse(arg0);
//!     if u == () {
//!         return false;
//!     }
//!
//!     return u.scheme == "https";
//! "#;
//!
//! let args: Vec<Dynamic> = vec!["https://example.com".into()];
//! assert_eq!(evaluate(predicate, &args), Ok(true));
//! ```

pub mod config;
pub mod error;
pub mod predicate;
pub mod stdlib;

pub use config::EvaluatorConfig;
pub use error::{Fault, PanicError, PredicateError, ReturnError};
pub use predicate::{evaluate, Evaluator};
pub use rhai::Dynamic;
pub use stdlib::errors::ScriptError;
