use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::registry::Rule;

// Declaration order is the ranking order: Info < Warning < Error.
#[derive(Debug, Display, EnumIter, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

// Simplified version of:
// https://github.com/astral-sh/ruff/blob/main/crates/ruff_diagnostics/src/diagnostic.rs
//
// * kind is simply a Rule for our purposes.
// * fix replaces the whole line: there is no Edit nor range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub kind: Rule,
    /// 1-based line number in the text that produced this diagnostic.
    pub line: usize,
    /// 0-based character offset on that line. Advisory only.
    pub column: usize,
    pub message: String,
    pub severity: Severity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Replacement for the entire line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
    /// The fragment that triggered the match, for display only.
    pub original_text: String,
}

impl Diagnostic {
    /// The fix, if there is one worth applying.
    pub fn applicable_fix(&self) -> Option<&str> {
        self.fix.as_deref().filter(|fix| !fix.is_empty())
    }
}

/// Severity counts over one analysis.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

impl Summary {
    pub fn new(diagnostics: &[Diagnostic]) -> Self {
        diagnostics
            .iter()
            .fold(Self::default(), |mut summary, diagnostic| {
                match diagnostic.severity {
                    Severity::Error => summary.errors += 1,
                    Severity::Warning => summary.warnings += 1,
                    Severity::Info => summary.infos += 1,
                }
                summary
            })
    }

    /// Info diagnostics are not actionable and do not count as issues.
    pub const fn issues(&self) -> usize {
        self.errors + self.warnings
    }

    pub const fn has_issues(&self) -> bool {
        self.issues() > 0
    }
}

/// Line numbers carrying at least one diagnostic, deduplicated, in order.
pub fn error_lines(diagnostics: &[Diagnostic]) -> Vec<usize> {
    let mut lines: Vec<usize> = diagnostics.iter().map(|diagnostic| diagnostic.line).collect();
    lines.dedup();
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnostic(line: usize, severity: Severity) -> Diagnostic {
        Diagnostic {
            kind: Rule::UnnecessarySemicolon,
            line,
            column: 0,
            message: String::new(),
            severity,
            suggestion: None,
            fix: None,
            original_text: String::new(),
        }
    }

    #[test]
    fn severity_ranking() {
        assert!(Severity::Error > Severity::Warning);
        assert!(Severity::Warning > Severity::Info);
        assert_eq!(Severity::Warning.to_string(), "warning");
    }

    #[test]
    fn summary_counts() {
        let diagnostics = [
            diagnostic(1, Severity::Error),
            diagnostic(1, Severity::Warning),
            diagnostic(3, Severity::Info),
        ];
        let summary = Summary::new(&diagnostics);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.warnings, 1);
        assert_eq!(summary.issues(), 2);
        assert_eq!(error_lines(&diagnostics), vec![1, 3]);
    }

    #[test]
    fn empty_fix_is_not_applicable() {
        let mut diag = diagnostic(1, Severity::Warning);
        diag.fix = Some(String::new());
        assert_eq!(diag.applicable_fix(), None);
        diag.fix = Some("(ok u1)".to_string());
        assert_eq!(diag.applicable_fix(), Some("(ok u1)"));
    }
}
