// SPDX-License-Identifier: MIT

//! Standard capability surface for predicates
//!
//! Each fresh interpreter gets a static module resolver serving these
//! modules, so a predicate can write `import "url" as url;` like any other
//! script:
//! - `url` - URL parsing and accessors
//! - `regex` - regular expressions
//! - `errors` - sentinel error values to `throw`
//! - `json` - JSON decoding
//! - `time` - wall-clock helpers

pub mod clock;
pub mod errors;
pub mod json;
pub mod patterns;
pub mod urls;

use rhai::module_resolvers::StaticModuleResolver;
use rhai::Module;

use crate::error::PredicateError;

/// Import paths of every module this crate provides
pub const MODULE_NAMES: &[&str] = &["url", "regex", "errors", "json", "time"];

/// Build the module served under `name`
pub fn module(name: &str) -> Option<Module> {
    let mut module = match name {
        "url" => urls::module(),
        "regex" => patterns::module(),
        "errors" => errors::module(),
        "json" => json::module(),
        "time" => clock::module(),
        _ => return None,
    };
    module.build_index();
    Some(module)
}

/// Build a resolver serving the named modules
pub fn resolver<S: AsRef<str>>(names: &[S]) -> Result<StaticModuleResolver, PredicateError> {
    let mut resolver = StaticModuleResolver::new();

    for name in names {
        let name = name.as_ref();
        let module = module(name)
            .ok_or_else(|| PredicateError::config(format!("unknown module '{}'", name)))?;
        resolver.insert(name, module);
    }

    Ok(resolver)
}
