// SPDX-License-Identifier: MIT

//! Import/body splitting
//!
//! Only the single-line form is recognised: any line whose first non-blank
//! text is `import` is hoisted. Everything else stays in the body, where the
//! interpreter will reject it if it is malformed.

const IMPORT_KEYWORD: &str = "import";
const RETURN_KEYWORD: &str = "return";

/// Whether `line` is an import declaration
pub fn is_import_line(line: &str) -> bool {
    line.trim_start().starts_with(IMPORT_KEYWORD)
}

/// Partition `lines` into `(imports, body)`, keeping relative order
pub fn split_imports<'a, I>(lines: I) -> (Vec<&'a str>, Vec<&'a str>)
where
    I: IntoIterator<Item = &'a str>,
{
    lines.into_iter().partition(|line| is_import_line(line))
}

/// Whether any body line mentions `return`.
///
/// Textual only: a `return` inside a comment or string literal counts.
pub fn contains_return(lines: &[&str]) -> bool {
    lines.iter().any(|line| line.trim().contains(RETURN_KEYWORD))
}
