// SPDX-License-Identifier: MIT

//! `regex` module

use regex::Regex;
use rhai::plugin::*;
use rhai::{EvalAltResult, Module};

use super::errors::ScriptError;

/// A compiled regular expression held by a script
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Compile `pattern`, raising `ScriptError::InvalidPattern` on bad syntax
pub fn compile_pattern(pattern: &str) -> Result<Pattern, Box<EvalAltResult>> {
    Regex::new(pattern).map(Pattern).map_err(|err| {
        ScriptError::InvalidPattern {
            pattern: pattern.to_string(),
            message: describe(&err),
        }
        .into_fault()
    })
}

// The syntax variant renders the pattern with a caret; keep only the reason line.
fn describe(err: &regex::Error) -> String {
    match err {
        regex::Error::Syntax(text) => text
            .lines()
            .last()
            .unwrap_or(text.as_str())
            .trim()
            .trim_start_matches("error: ")
            .to_string(),
        other => other.to_string(),
    }
}

#[export_module]
mod regex_functions {
    use super::{compile_pattern, Pattern};
    use rhai::{Dynamic, EvalAltResult};

    #[rhai_fn(return_raw)]
    pub fn compile(pattern: &str) -> Result<Pattern, Box<EvalAltResult>> {
        compile_pattern(pattern)
    }

    #[rhai_fn(global, name = "is_match", pure)]
    pub fn is_match(pattern: &mut Pattern, text: &str) -> bool {
        pattern.0.is_match(text)
    }

    #[rhai_fn(name = "is_match", return_raw)]
    pub fn is_match_str(pattern: &str, text: &str) -> Result<bool, Box<EvalAltResult>> {
        Ok(compile_pattern(pattern)?.0.is_match(text))
    }

    /// First match in `text`, or `()` when nothing matches
    #[rhai_fn(global, pure)]
    pub fn find(pattern: &mut Pattern, text: &str) -> Dynamic {
        pattern
            .0
            .find(text)
            .map(|m| m.as_str().into())
            .unwrap_or(Dynamic::UNIT)
    }

    #[rhai_fn(global, pure)]
    pub fn replace_all(pattern: &mut Pattern, text: &str, replacement: &str) -> String {
        pattern.0.replace_all(text, replacement).into_owned()
    }

    #[rhai_fn(global, name = "to_string", pure)]
    pub fn describe_pattern(pattern: &mut Pattern) -> String {
        pattern.as_str().to_string()
    }
}

pub fn module() -> Module {
    exported_module!(regex_functions)
}
