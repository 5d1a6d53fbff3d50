// SPDX-License-Identifier: MIT

//! `url` module
//!
//! ```text
//! import "url" as url;
//!
//! let u = url::try_parse(arg0);
//! if u == () {
//!     return false;
//! }
//! return u.scheme == "https";
//! ```

use rhai::plugin::*;
use rhai::Module;
use url::Url;

use super::errors::ScriptError;

fn parse_url(input: &str) -> Result<Url, ScriptError> {
    Url::parse(input).map_err(|e| ScriptError::InvalidUrl {
        input: input.to_string(),
        message: e.to_string(),
    })
}

#[export_module]
mod url_functions {
    use super::{parse_url, Url};
    use rhai::{Dynamic, EvalAltResult, INT};

    /// Parse an absolute URL, raising an error for invalid input
    #[rhai_fn(return_raw)]
    pub fn parse(input: &str) -> Result<Url, Box<EvalAltResult>> {
        parse_url(input).map_err(|e| e.into_fault())
    }

    /// Parse an absolute URL, returning `()` for invalid input
    pub fn try_parse(input: &str) -> Dynamic {
        parse_url(input).map(Dynamic::from).unwrap_or(Dynamic::UNIT)
    }

    #[rhai_fn(global, get = "scheme", pure)]
    pub fn scheme(url: &mut Url) -> String {
        url.scheme().to_string()
    }

    #[rhai_fn(global, get = "host", pure)]
    pub fn host(url: &mut Url) -> String {
        url.host_str().unwrap_or_default().to_string()
    }

    /// Explicit port, falling back to the scheme's default; `()` if neither
    #[rhai_fn(global, get = "port", pure)]
    pub fn port(url: &mut Url) -> Dynamic {
        url.port_or_known_default()
            .map(|p| Dynamic::from(p as INT))
            .unwrap_or(Dynamic::UNIT)
    }

    #[rhai_fn(global, get = "path", pure)]
    pub fn path(url: &mut Url) -> String {
        url.path().to_string()
    }

    #[rhai_fn(global, get = "query", pure)]
    pub fn query(url: &mut Url) -> String {
        url.query().unwrap_or_default().to_string()
    }

    #[rhai_fn(global, name = "to_string", pure)]
    pub fn describe(url: &mut Url) -> String {
        url.to_string()
    }
}

pub fn module() -> Module {
    exported_module!(url_functions)
}
