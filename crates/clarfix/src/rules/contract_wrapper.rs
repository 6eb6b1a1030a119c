use crate::diagnostic::{Diagnostic, Severity};
use crate::registry::Rule;
use crate::source::{Line, Source};
use regex::Regex;
use std::sync::OnceLock;

static RE: OnceLock<Regex> = OnceLock::new();

/// Placeholder left where a contract block used to open.
pub(crate) fn placeholder(name: &str) -> String {
    format!(";; contract {name}")
}

/// Solidity contract block: `contract NAME [is BASES] {`
///
/// # Panics
///
/// Panics on the first call if the pattern fails to compile.
pub fn contract_wrapper(line: &Line, _source: &Source, diagnostics: &mut Vec<Diagnostic>) {
    let re = RE.get_or_init(|| {
        Regex::new(r"^contract\s+(\w+)(?:\s+is\s+[\w\s,]+?)?\s*\{?$").unwrap()
    });

    if let Some(caps) = re.captures(line.trimmed) {
        diagnostics.push(Diagnostic {
            kind: Rule::ContractWrapper,
            line: line.number,
            column: line.column_of("contract"),
            message: "Solidity contract declaration".to_string(),
            severity: Severity::Error,
            suggestion: Some("Remove: Clarity contracts don't need explicit declarations".to_string()),
            fix: Some(line.indented(&placeholder(&caps[1]))),
            original_text: line.trimmed.to_string(),
        });
    }
}
