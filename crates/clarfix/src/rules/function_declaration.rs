use crate::diagnostic::{Diagnostic, Severity};
use crate::registry::Rule;
use crate::source::{Line, Source};
use regex::Regex;
use std::sync::OnceLock;

static RE: OnceLock<Regex> = OnceLock::new();

/// Zero or more Solidity function modifiers, captured as a whole.
pub(crate) const MODIFIERS: &str =
    r"((?:\s*\b(?:public|private|internal|external|view|pure|payable)\b)*)";

const READ_ONLY_MODIFIERS: [&str; 2] = ["view", "pure"];

/// Clarity header for a Solidity function.
///
/// `view` and `pure` functions become read-only, everything else is public.
/// Parameters are kept verbatim.
pub(crate) fn clarity_header(name: &str, params: &str, modifiers: &str) -> String {
    let qualifier = if modifiers
        .split_whitespace()
        .any(|modifier| READ_ONLY_MODIFIERS.contains(&modifier))
    {
        "read-only"
    } else {
        "public"
    };
    let params = params.trim();
    if params.is_empty() {
        format!("(define-{qualifier} ({name}))")
    } else {
        format!("(define-{qualifier} ({name} {params}))")
    }
}

/// Solidity function declaration:
/// `function NAME(PARAMS) [MODIFIERS] [returns (...)] {`
///
/// # Panics
///
/// Panics on the first call if the pattern fails to compile.
//
// Only the header is rewritten, the body is left to the other rules.
// The header is emitted closed so that it does not trip UnbalancedParens.
pub fn function_declaration(line: &Line, _source: &Source, diagnostics: &mut Vec<Diagnostic>) {
    let re = RE.get_or_init(|| {
        Regex::new(&format!(
            r"^function\s+(\w+)\s*\(([^)]*)\){MODIFIERS}\s*(?:returns\s*\([^)]*\))?\s*\{{?"
        ))
        .unwrap()
    });

    let Some(caps) = re.captures(line.trimmed) else {
        return;
    };
    let name = &caps[1];
    let header = clarity_header(name, &caps[2], &caps[3]);

    diagnostics.push(Diagnostic {
        kind: Rule::FunctionDeclaration,
        line: line.number,
        column: line.column_of("function"),
        message: format!("Solidity function declaration: {name}"),
        severity: Severity::Error,
        suggestion: Some(format!("Convert to Clarity: {header}")),
        fix: Some(line.indented(&header)),
        original_text: caps[0].to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_rule;

    macro_rules! test_fd {
        ($name:ident, $text:expr, $expected:expr) => {
            test_rule!($name, function_declaration, $text, $expected);
        };
    }

    fn first_fix(text: &str) -> Option<String> {
        let source = Source::new(text);
        let mut diagnostics = Vec::new();
        function_declaration(&source[0], &source, &mut diagnostics);
        diagnostics.into_iter().next().and_then(|diagnostic| diagnostic.fix)
    }

    test_fd!(fd_ok_clarity, "(define-public (foo (a uint)) (ok a))", true);
    test_fd!(fd_ok_call, "functional(x)", true);
    test_fd!(fd_nok_public, "function foo(uint256 a) public returns (uint256) {", false);
    test_fd!(fd_nok_bare, "function foo() {", false);
    test_fd!(fd_nok_indented, "    function foo() external payable {", false);

    #[test]
    fn public_header() {
        let fix = first_fix("function foo(uint256 a) public returns (uint256) {").unwrap();
        assert!(fix.starts_with("(define-public (foo uint256 a)"), "{fix}");
    }

    #[test]
    fn view_and_pure_are_read_only() {
        let fix = first_fix("function foo(uint256 a) view returns (uint256) {").unwrap();
        assert!(fix.starts_with("(define-read-only (foo uint256 a)"), "{fix}");
        let fix = first_fix("function add(uint a, uint b) public pure returns (uint) {").unwrap();
        assert_eq!(fix, "(define-read-only (add uint a, uint b))");
    }

    #[test]
    fn keeps_indentation() {
        let fix = first_fix("  function get() public view returns (uint256) {").unwrap();
        assert_eq!(fix, "  (define-read-only (get))");
    }

    #[test]
    fn column_points_at_keyword() {
        let source = Source::new("    function f() public {");
        let mut diagnostics = Vec::new();
        function_declaration(&source[0], &source, &mut diagnostics);
        assert_eq!(diagnostics[0].column, 4);
        assert_eq!(diagnostics[0].severity, Rule::FunctionDeclaration.severity());
    }
}
