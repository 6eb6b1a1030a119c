use crate::diagnostic::{Diagnostic, Severity};
use crate::registry::Rule;
use crate::source::{COMMENT, Line, Source};

/// Trailing statement terminator, which Clarity does not use.
pub fn unnecessary_semicolon(line: &Line, _source: &Source, diagnostics: &mut Vec<Diagnostic>) {
    if line.trimmed.starts_with(COMMENT) {
        return;
    }
    let Some(stripped) = line.trimmed.strip_suffix(';') else {
        return;
    };

    let column = line
        .raw
        .rfind(';')
        .map_or(0, |idx| line.raw[..idx].chars().count());

    diagnostics.push(Diagnostic {
        kind: Rule::UnnecessarySemicolon,
        line: line.number,
        column,
        message: "Unnecessary semicolon".to_string(),
        severity: Severity::Warning,
        suggestion: Some("Remove semicolon: not needed in Clarity".to_string()),
        fix: Some(line.indented(stripped.trim_end())),
        original_text: line.trimmed.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_rule;

    macro_rules! test_us {
        ($name:ident, $text:expr, $expected:expr) => {
            test_rule!($name, unnecessary_semicolon, $text, $expected);
        };
    }

    test_us!(us_ok_clarity, "(var-set x u1)", true);
    test_us!(us_ok_comment, ";; a comment;", true);
    test_us!(us_ok_inner, "a; b", true);
    test_us!(us_nok_basic, "x = 1;", false);
    test_us!(us_nok_spaced, "  x = 1 ;  ", false);

    #[test]
    fn fix_strips_terminator() {
        let source = Source::new("  x = 1 ;");
        let mut diagnostics = Vec::new();
        unnecessary_semicolon(&source[0], &source, &mut diagnostics);
        assert_eq!(diagnostics[0].fix.as_deref(), Some("  x = 1"));
        assert_eq!(diagnostics[0].column, 8);
        assert_eq!(diagnostics[0].severity, Severity::Warning);
    }
}
