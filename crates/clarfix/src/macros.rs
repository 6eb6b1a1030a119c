/// Macro to test a single rule function.
///
/// `$expected` is whether the text is clean, i.e. produces no diagnostics.
#[macro_export]
macro_rules! test_rule {
    ($name:ident, $rule_fn:expr, $text:expr, $expected:expr) => {
        #[test]
        fn $name() {
            let text = $text;
            let source = $crate::source::Source::new(text);
            let mut diagnostics = Vec::new();
            for line in &source {
                if !line.is_skipped() {
                    $rule_fn(line, &source, &mut diagnostics);
                }
            }
            assert_eq!(diagnostics.is_empty(), $expected, "(text: {text})");
        }
    };
}

/// Macro to test fixing until stable.
#[macro_export]
macro_rules! test_fix {
    ($name:ident, $config:expr, $text:expr, $expected:expr) => {
        #[test]
        fn $name() {
            let text = $text;
            let res = $crate::linter::fix(text, $config, $crate::linter::Conflict::default());
            let received = res.0;
            assert_eq!(received, $expected, "(text: {text})");
        }
    };
}
