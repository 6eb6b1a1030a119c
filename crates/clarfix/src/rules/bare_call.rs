use crate::diagnostic::{Diagnostic, Severity};
use crate::registry::Rule;
use crate::source::{Line, Source};
use itertools::Itertools;
use regex::Regex;
use std::sync::OnceLock;

static RE: OnceLock<Regex> = OnceLock::new();

/// C-style call statement: `NAME(ARGS);`
///
/// The fix rewrites it in prefix notation, turning the comma separated
/// arguments into space separated ones.
///
/// # Panics
///
/// Panics on the first call if the pattern fails to compile.
pub fn bare_function_call(line: &Line, _source: &Source, diagnostics: &mut Vec<Diagnostic>) {
    let re = RE.get_or_init(|| Regex::new(r"^(\w+)\s*\(([^)]*)\)\s*;?$").unwrap());

    if line.trimmed.starts_with('(') || line.trimmed.contains("define-") {
        return;
    }
    let Some(caps) = re.captures(line.trimmed) else {
        return;
    };

    let name = &caps[1];
    let args = caps[2]
        .split(',')
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .join(" ");
    let call = if args.is_empty() {
        format!("({name})")
    } else {
        format!("({name} {args})")
    };

    diagnostics.push(Diagnostic {
        kind: Rule::BareFunctionCall,
        line: line.number,
        column: line.indent().chars().count(),
        message: "Function call needs Clarity syntax".to_string(),
        severity: Severity::Error,
        suggestion: Some(format!("Wrap in parentheses for Clarity: {call}")),
        fix: Some(line.indented(&call)),
        original_text: line.trimmed.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_rule;

    macro_rules! test_bfc {
        ($name:ident, $text:expr, $expected:expr) => {
            test_rule!($name, bare_function_call, $text, $expected);
        };
    }

    fn fix(text: &str) -> Option<String> {
        let source = Source::new(text);
        let mut diagnostics = Vec::new();
        bare_function_call(&source[0], &source, &mut diagnostics);
        diagnostics.pop().and_then(|diagnostic| diagnostic.fix)
    }

    test_bfc!(bfc_ok_prefix, "(foo 1 2)", true);
    test_bfc!(bfc_ok_unclosed, "foo(1 2", true);
    test_bfc!(bfc_ok_assignment, "x = foo(1);", true);
    test_bfc!(bfc_ok_declaration, "function foo() public {", true);
    test_bfc!(bfc_ok_mapping, "mapping(address => uint) balances;", true);
    test_bfc!(bfc_nok_call, "foo(1, 2);", false);
    test_bfc!(bfc_nok_no_args, "  refresh()", false);

    #[test]
    fn prefix_notation() {
        assert_eq!(fix("foo(1, 2);").as_deref(), Some("(foo 1 2)"));
        assert_eq!(fix("foo(1 2)").as_deref(), Some("(foo 1 2)"));
        assert_eq!(fix("  refresh()").as_deref(), Some("  (refresh)"));
    }
}
