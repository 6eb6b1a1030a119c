use crate::diagnostic::{Diagnostic, Severity};
use crate::registry::Rule;
use crate::rules::variable_declaration::clarity_type;
use crate::source::{Line, Source};
use regex::Regex;
use std::sync::OnceLock;

static RE: OnceLock<Regex> = OnceLock::new();

/// Solidity mapping: `mapping(KEY => VALUE) [visibility] NAME;`
///
/// Solidity primitive types are translated, anything else is kept as is.
///
/// # Panics
///
/// Panics on the first call if the pattern fails to compile.
pub fn mapping_declaration(line: &Line, _source: &Source, diagnostics: &mut Vec<Diagnostic>) {
    let re = RE.get_or_init(|| {
        Regex::new(
            r"^mapping\s*\(\s*([^)=]+?)\s*=>\s*([^)]+?)\s*\)\s+(?:(?:public|private|internal)\s+)?(\w+)\s*;?$",
        )
        .unwrap()
    });

    let Some(caps) = re.captures(line.trimmed) else {
        return;
    };
    let key = clarity_type(&caps[1]).unwrap_or(&caps[1]);
    let value = clarity_type(&caps[2]).unwrap_or(&caps[2]);
    let name = &caps[3];
    let map = format!("(define-map {name} {key} {value})");

    diagnostics.push(Diagnostic {
        kind: Rule::MappingDeclaration,
        line: line.number,
        column: line.column_of("mapping"),
        message: format!("Solidity mapping: {name}"),
        severity: Severity::Error,
        suggestion: Some(format!("Convert to Clarity map: {map}")),
        fix: Some(line.indented(&map)),
        original_text: line.trimmed.to_string(),
    });
}
