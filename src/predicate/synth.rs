// SPDX-License-Identifier: MIT

//! Function synthesis
//!
//! Turns a body-only predicate into a complete unit:
//!
//! ```text
//! import "url" as url;
//!
//! fn predicate_do(arg0 /* string */, arg1 /* i64 */) {
//!     <body, verbatim>
//! }
//! ```

use rhai::Dynamic;
use std::fmt;

use super::splitter::{contains_return, split_imports};
use crate::error::PredicateError;

/// Name of the synthesized entry function
pub const ENTRY_POINT: &str = "predicate_do";

/// One positional parameter of the entry function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub type_name: String,
}

impl Param {
    fn for_arg(index: usize, arg: &Dynamic) -> Self {
        Self {
            name: format!("arg{}", index),
            type_name: arg.type_name().to_string(),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} /* {} */", self.name, self.type_name)
    }
}

/// Source text built from a predicate, ready to load into an interpreter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedUnit {
    source: String,
    params: Vec<Param>,
}

impl SynthesizedUnit {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Name of the callable to resolve after loading
    pub fn entry(&self) -> &'static str {
        ENTRY_POINT
    }
}

impl fmt::Display for SynthesizedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Split `predicate`, check it has a body, and build the unit for `args`
pub fn synthesize(predicate: &str, args: &[Dynamic]) -> Result<SynthesizedUnit, PredicateError> {
    let (imports, body) = split_imports(predicate.split('\n'));

    if body.is_empty() || !contains_return(&body) {
        return Err(PredicateError::EmptyPredicate);
    }

    log::debug!(
        "Synthesizing predicate: {} import(s), {} body line(s), {} arg(s)",
        imports.len(),
        body.len(),
        args.len()
    );

    let params: Vec<Param> = args
        .iter()
        .enumerate()
        .map(|(i, arg)| Param::for_arg(i, arg))
        .collect();

    let unit = SynthesizedUnit {
        source: render(&imports, &params, &body),
        params,
    };
    log::trace!("Synthesized unit:\n{}", unit);

    Ok(unit)
}

fn render(imports: &[&str], params: &[Param], body: &[&str]) -> String {
    let params = params
        .iter()
        .map(Param::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{imports}\n\nfn {entry}({params}) {{\n{body}\n}}\n",
        imports = imports.join("\n"),
        entry = ENTRY_POINT,
        params = params,
        body = body.join("\n"),
    )
}
