use crate::diagnostic::{Diagnostic, Severity};
use crate::registry::Rule;
use crate::source::{Line, Source};
use std::cmp::Ordering;

/// Per-line parenthesis balance, counted on the raw line.
///
/// Missing closers are appended at the end of the line, missing openers are
/// inserted right after the indentation. Either way the fixed line balances.
pub fn unbalanced_parens(line: &Line, _source: &Source, diagnostics: &mut Vec<Diagnostic>) {
    let opens = line.raw.matches('(').count();
    let closes = line.raw.matches(')').count();

    let (column, message, suggestion, fix) = match opens.cmp(&closes) {
        Ordering::Equal => return,
        Ordering::Greater => {
            let missing = opens - closes;
            (
                line.width(),
                format!("Missing {missing} closing parenthesis"),
                "Add missing closing parentheses",
                format!("{}{}", line.raw, ")".repeat(missing)),
            )
        }
        Ordering::Less => {
            let extra = closes - opens;
            let indent = line.indent();
            (
                indent.chars().count(),
                format!("Extra {extra} closing parenthesis"),
                "Add matching opening parentheses",
                format!("{indent}{}{}", "(".repeat(extra), &line.raw[indent.len()..]),
            )
        }
    };

    diagnostics.push(Diagnostic {
        kind: Rule::UnbalancedParens,
        line: line.number,
        column,
        message,
        severity: Severity::Error,
        suggestion: Some(suggestion.to_string()),
        fix: Some(fix),
        original_text: line.raw.to_string(),
    });
}
