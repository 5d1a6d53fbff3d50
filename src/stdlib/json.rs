// SPDX-License-Identifier: MIT

//! `json` module

use rhai::plugin::*;
use rhai::{Dynamic, EvalAltResult, Module};

use super::errors::ScriptError;

/// Decode `text` into script values: objects become maps, arrays become arrays
pub fn decode(text: &str) -> Result<Dynamic, Box<EvalAltResult>> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| ScriptError::InvalidJson(e.to_string()).into_fault())?;
    rhai::serde::to_dynamic(&value)
}

#[export_module]
mod json_functions {
    use super::decode;
    use rhai::{Dynamic, EvalAltResult};

    #[rhai_fn(return_raw)]
    pub fn parse(text: &str) -> Result<Dynamic, Box<EvalAltResult>> {
        decode(text)
    }
}

pub fn module() -> Module {
    exported_module!(json_functions)
}
