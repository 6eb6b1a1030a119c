use crate::diagnostic::{Diagnostic, Severity};
use crate::registry::Rule;
use crate::source::{Line, Source};
use regex::Regex;
use std::sync::OnceLock;

static RE: OnceLock<Regex> = OnceLock::new();

/// Solidity event: `event NAME(ARGS);`
///
/// Clarity has no events. The fix leaves a comment pointing at `print`.
///
/// # Panics
///
/// Panics on the first call if the pattern fails to compile.
pub fn event_declaration(line: &Line, _source: &Source, diagnostics: &mut Vec<Diagnostic>) {
    let re = RE.get_or_init(|| Regex::new(r"^event\s+(\w+)\s*\(([^)]*)\)\s*;?$").unwrap());

    if let Some(caps) = re.captures(line.trimmed) {
        let name = &caps[1];
        diagnostics.push(Diagnostic {
            kind: Rule::EventDeclaration,
            line: line.number,
            column: line.column_of("event"),
            message: format!("Solidity event: {name}"),
            severity: Severity::Warning,
            suggestion: Some("Events are not supported in Clarity: emit with print".to_string()),
            fix: Some(line.indented(&format!(";; event {name}: emit with print"))),
            original_text: line.trimmed.to_string(),
        });
    }
}
