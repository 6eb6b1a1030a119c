use crate::diagnostic::{Diagnostic, Severity};
use crate::registry::Rule;
use crate::source::{Line, Source};
use regex::Regex;
use std::sync::OnceLock;

static RE: OnceLock<Regex> = OnceLock::new();

/// Wrap an expression in Clarity's success response.
pub(crate) fn ok_response(expr: &str) -> String {
    format!("(ok {})", expr.trim())
}

/// Solidity return statement: `return EXPR;`
///
/// # Panics
///
/// Panics on the first call if the pattern fails to compile.
pub fn return_statement(line: &Line, _source: &Source, diagnostics: &mut Vec<Diagnostic>) {
    let re = RE.get_or_init(|| Regex::new(r"^return\s+([^;]+?)\s*;?$").unwrap());

    if let Some(caps) = re.captures(line.trimmed) {
        diagnostics.push(Diagnostic {
            kind: Rule::ReturnStatement,
            line: line.number,
            column: line.column_of("return"),
            message: "Solidity return statement".to_string(),
            severity: Severity::Error,
            suggestion: Some("Use Clarity response format".to_string()),
            fix: Some(line.indented(&ok_response(&caps[1]))),
            original_text: line.trimmed.to_string(),
        });
    }
}
