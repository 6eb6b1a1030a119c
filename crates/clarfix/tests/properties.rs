use clarfix::diagnostic::{Diagnostic, Severity};
use clarfix::linter::{Conflict, analyze, rectify};
use clarfix::registry::Rule;
use pretty_assertions::assert_eq;

const MAX_ROUNDS: usize = 10;

const KNOWN_BAD: &[&str] = &[
    "uint256 x = 5;",
    "return 5;",
    "foo(1 2",
    "mapping(principal => uint) balances;",
    "function foo(uint256 a) public returns (uint256) {",
    "event Ping();",
    "contract Counter {\n    uint256 count = 0;\n    function get() public view returns (uint256) {\n        return count;\n    }\n}",
    "(define-public (set (v uint))\n    (ok (var-set storedData v)))",
];

const PATHOLOGICAL: &[&str] = &[
    "",
    " ",
    "(",
    ")",
    ";",
    "{",
    "}",
    "((((((((",
    "))))))))",
    ")(",
    "\n\n\n\n",
    "\r\n",
    "return",
    "return ;",
    "function",
    "function (",
    "contract {",
    "mapping(=>)",
    "storedData",
    "é(ü;",
    "a;;b;",
    ";;",
    "uint256",
    "}\n}\n}",
    "foo(,,,)",
];

fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

fn errors(diagnostics: &[Diagnostic]) -> usize {
    diagnostics
        .iter()
        .filter(|diagnostic| diagnostic.severity == Severity::Error)
        .count()
}

fn assert_in_range(text: &str, diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        assert!(
            (1..=line_count(text)).contains(&diagnostic.line),
            "line {} out of range in {text:?}",
            diagnostic.line
        );
    }
}

#[test]
fn empty_and_blank_input() {
    for text in ["", " ", "\n", "\t\t", " \n \r\n "] {
        assert!(analyze(text).is_empty(), "{text:?}");
        assert_eq!(rectify(text, &[], Conflict::default()), "");
    }
}

#[test]
fn lines_are_in_range() {
    for text in KNOWN_BAD.iter().chain(PATHOLOGICAL) {
        assert_in_range(text, &analyze(text));
    }
}

#[test]
fn errors_never_increase() {
    for text in KNOWN_BAD {
        let mut text = text.to_string();
        let mut diagnostics = analyze(&text);
        let mut previous = errors(&diagnostics);

        for _ in 0..MAX_ROUNDS {
            if previous == 0 {
                break;
            }
            text = rectify(&text, &diagnostics, Conflict::default());
            diagnostics = analyze(&text);
            let current = errors(&diagnostics);
            assert!(current <= previous, "{previous} -> {current} errors in {text:?}");
            previous = current;
        }

        assert_eq!(previous, 0, "errors left in {text:?}");
    }
}

#[test]
fn round_trip_never_panics() {
    for text in KNOWN_BAD.iter().chain(PATHOLOGICAL) {
        for conflict in [Conflict::HighestSeverity, Conflict::LastWins] {
            let rectified = rectify(text, &analyze(text), conflict);
            assert_in_range(&rectified, &analyze(&rectified));
        }
    }
}

#[test]
fn stale_diagnostics_fail_closed() {
    let old = "uint256 a = 1;\nuint256 b = 2;\nreturn a;";
    let diagnostics = analyze(old);
    let new = "uint256 a = 1;";
    assert_eq!(rectify(new, &diagnostics, Conflict::default()), new);
}

fn fix_for(text: &str, rule: Rule) -> Option<String> {
    analyze(text)
        .into_iter()
        .find(|diagnostic| diagnostic.kind == rule)
        .and_then(|diagnostic| diagnostic.fix)
}

#[test]
fn typed_state_variable() {
    let diagnostics = analyze("uint256 x = 5;");
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(diagnostics[0].fix.as_deref(), Some("(define-data-var x uint u5)"));
    assert_eq!(diagnostics[1].severity, Severity::Warning);
    assert_eq!(diagnostics[1].original_text, "uint256 x = 5;");
}

#[test]
fn public_function_header() {
    let fix = fix_for(
        "function foo(uint256 a) public returns (uint256) {",
        Rule::FunctionDeclaration,
    )
    .unwrap();
    assert!(fix.starts_with("(define-public (foo uint256 a)"), "{fix}");
}

#[test]
fn view_function_header() {
    let fix = fix_for(
        "function foo(uint256 a) view returns (uint256) {",
        Rule::FunctionDeclaration,
    )
    .unwrap();
    assert!(fix.starts_with("(define-read-only (foo uint256 a)"), "{fix}");
}

#[test]
fn return_statement() {
    assert_eq!(
        fix_for("return 5;", Rule::ReturnStatement).as_deref(),
        Some("(ok 5)")
    );
}

#[test]
fn missing_closing_paren() {
    let diagnostics = analyze("foo(1 2");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].kind, Rule::UnbalancedParens);
    assert_eq!(diagnostics[0].severity, Severity::Error);
    assert_eq!(diagnostics[0].message, "Missing 1 closing parenthesis");
    assert_eq!(diagnostics[0].fix.as_deref(), Some("foo(1 2)"));
}

#[test]
fn mapping_declaration() {
    let text = ";; balances\nmapping(principal => uint) balances;";
    assert_eq!(
        fix_for(text, Rule::MappingDeclaration).as_deref(),
        Some("(define-map balances principal uint)")
    );
}

#[test]
fn contract_is_rectified_in_one_pass() {
    let text = "contract Counter {\n    uint256 count = 0;\n    function get() public view returns (uint256) {\n        return count;\n    }\n}";
    let rectified = rectify(text, &analyze(text), Conflict::default());
    assert_eq!(
        rectified,
        ";; contract Counter\n    (define-data-var count uint u0)\n    (define-read-only (get))\n        (ok count)"
    );
    assert!(analyze(&rectified).is_empty());
}

#[test]
fn clean_clarity_survives_rectify() {
    let text = "(print (get-contract owner { id: u1 }))\nreturn 1;";
    let diagnostics = analyze(text);
    assert!(diagnostics.iter().all(|diagnostic| diagnostic.line == 2));
    assert_eq!(
        rectify(text, &diagnostics, Conflict::default()),
        "(print (get-contract owner { id: u1 }))\n(ok 1)"
    );
}
