use crate::diagnostic::{Diagnostic, Severity};
use crate::registry::Rule;
use crate::source::{Line, Source};
use regex::Regex;
use std::sync::OnceLock;

static DEFINITION_RE: OnceLock<Regex> = OnceLock::new();

/// The storage identifier the converter emits for simple storage contracts.
pub const SENTINEL: &str = "storedData";
const DECLARATION: &str = "(define-data-var storedData uint u0)";

/// Whether the document defines `SENTINEL` with `define-data-var`.
///
/// The text is scanned once per `Source`.
///
/// # Panics
///
/// Panics on the first call if the pattern fails to compile.
pub fn is_defined(source: &Source) -> bool {
    source.sentinel_defined(|text| {
        DEFINITION_RE
            .get_or_init(|| Regex::new(r"define-data-var\s+storedData\b").unwrap())
            .is_match(text)
    })
}

/// Use of `storedData` in a document that never defines it.
///
/// This is the one rule that looks beyond the current line.
pub fn undefined_variable(line: &Line, source: &Source, diagnostics: &mut Vec<Diagnostic>) {
    if !line.trimmed.contains(SENTINEL) || is_defined(source) {
        return;
    }

    diagnostics.push(Diagnostic {
        kind: Rule::UndefinedVariable,
        line: line.number,
        column: line.column_of(SENTINEL),
        message: format!("Undefined variable: {SENTINEL}"),
        severity: Severity::Error,
        suggestion: Some("Define variable first".to_string()),
        fix: Some(line.indented(DECLARATION)),
        original_text: SENTINEL.to_string(),
    });
}
