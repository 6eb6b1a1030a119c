use crate::diagnostic::{Diagnostic, Severity};
use crate::registry::Rule;
use crate::source::{Line, Source};
use regex::Regex;
use std::sync::OnceLock;

static RE: OnceLock<Regex> = OnceLock::new();

/// Clarity spelling of a Solidity primitive type.
pub(crate) fn clarity_type(solidity: &str) -> Option<&'static str> {
    match solidity {
        "uint256" | "uint" => Some("uint"),
        "int256" | "int" => Some("int"),
        "bool" => Some("bool"),
        "string" => Some("(string-ascii 100)"),
        "address" => Some("principal"),
        _ => None,
    }
}

/// Clarity initial value for a declaration, defaulting to the zero value
/// of the type. Unsigned literals gain the `u` prefix.
fn clarity_value(solidity: &str, initial: Option<&str>) -> String {
    let is_unsigned = matches!(solidity, "uint256" | "uint");
    match initial {
        Some(value) if is_unsigned && value.chars().all(|c| c.is_ascii_digit()) => {
            format!("u{value}")
        }
        Some(value) => value.to_string(),
        None => match solidity {
            "int256" | "int" => "0",
            "bool" => "false",
            "string" => "\"\"",
            "address" => "tx-sender",
            _ => "u0",
        }
        .to_string(),
    }
}

/// Solidity state variable: `TYPE NAME [= VALUE];`
///
/// # Panics
///
/// Panics on the first call if the pattern fails to compile.
pub fn variable_declaration(line: &Line, _source: &Source, diagnostics: &mut Vec<Diagnostic>) {
    let re = RE.get_or_init(|| {
        Regex::new(r"^(uint256|uint|int256|int|bool|string|address)\s+(\w+)(?:\s*=\s*([^;]+?))?\s*;?$")
            .unwrap()
    });

    let Some(caps) = re.captures(line.trimmed) else {
        return;
    };
    let solidity = &caps[1];
    let name = &caps[2];
    let Some(ty) = clarity_type(solidity) else {
        return;
    };
    let value = clarity_value(solidity, caps.get(3).map(|m| m.as_str()));
    let declaration = format!("(define-data-var {name} {ty} {value})");

    diagnostics.push(Diagnostic {
        kind: Rule::VariableDeclaration,
        line: line.number,
        column: line.column_of(solidity),
        message: format!("Solidity variable: {solidity} {name}"),
        severity: Severity::Error,
        suggestion: Some(format!("Convert to: {declaration}")),
        fix: Some(line.indented(&declaration)),
        original_text: line.trimmed.to_string(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_rule;

    macro_rules! test_vd {
        ($name:ident, $text:expr, $expected:expr) => {
            test_rule!($name, variable_declaration, $text, $expected);
        };
    }

    macro_rules! test_vd_fix {
        ($name:ident, $text:expr, $expected:expr) => {
            #[test]
            fn $name() {
                let source = Source::new($text);
                let mut diagnostics = Vec::new();
                variable_declaration(&source[0], &source, &mut diagnostics);
                assert_eq!(diagnostics.len(), 1, "(text: {})", $text);
                assert_eq!(diagnostics[0].fix.as_deref(), Some($expected));
            }
        };
    }

    test_vd!(vd_ok_clarity, "(define-data-var x uint u5)", true);
    test_vd!(vd_ok_expression, "uint256 x = 5; foo();", true);
    test_vd!(vd_ok_unknown_type, "bytes32 hash;", true);
    test_vd!(vd_nok_init, "uint256 x = 5;", false);
    test_vd!(vd_nok_no_semicolon, "bool flag", false);

    test_vd_fix!(vd_fix_uint, "uint256 x = 5;", "(define-data-var x uint u5)");
    test_vd_fix!(vd_fix_uint_default, "uint total;", "(define-data-var total uint u0)");
    test_vd_fix!(vd_fix_uint_expression, "uint y = x + 1;", "(define-data-var y uint x + 1)");
    test_vd_fix!(vd_fix_int, "int256 delta = -3;", "(define-data-var delta int -3)");
    test_vd_fix!(vd_fix_int_default, "int delta;", "(define-data-var delta int 0)");
    test_vd_fix!(vd_fix_bool_default, "bool paused;", "(define-data-var paused bool false)");
    test_vd_fix!(vd_fix_bool, "bool paused = true;", "(define-data-var paused bool true)");
    test_vd_fix!(
        vd_fix_string,
        "string name = \"token\";",
        "(define-data-var name (string-ascii 100) \"token\")"
    );
    test_vd_fix!(
        vd_fix_string_default,
        "string name;",
        "(define-data-var name (string-ascii 100) \"\")"
    );
    test_vd_fix!(
        vd_fix_address_default,
        "  address owner;",
        "  (define-data-var owner principal tx-sender)"
    );
}
