//! Whole-document passes run after the line fixes.
//!
//! Line fixes only ever see one line at a time. These passes catch what they
//! miss: wrappers and headers the line patterns did not recognise, and the
//! blank lines left behind by removed braces.
use crate::rules::{MODIFIERS, clarity_header, ok_response, placeholder};
use crate::source::COMMENT;
use regex::{Captures, Regex};
use std::sync::OnceLock;

// Keywords must start a statement: `-` is not a word character, so a plain `\b`
// would also match inside kebab-case names such as `get-contract`. The
// boundary is captured as group 1 and written back.
const STATEMENT_START: &str = r"(^|[^\w-])";

static CONTRACT_RE: OnceLock<Regex> = OnceLock::new();
static BRACE_RE: OnceLock<Regex> = OnceLock::new();
static FUNCTION_RE: OnceLock<Regex> = OnceLock::new();
static RETURN_RE: OnceLock<Regex> = OnceLock::new();
static BLANK_RUN_RE: OnceLock<Regex> = OnceLock::new();
static WHITESPACE_LINE_RE: OnceLock<Regex> = OnceLock::new();

/// Apply every pass in order.
///
/// # Panics
///
/// Panics on the first call if any pattern fails to compile.
pub fn normalize(text: &str) -> String {
    let text = map_code(text, strip_contract_wrapper);
    let text = strip_closing_braces(&text);
    let text = map_code(&text, rewrite_function_header);
    let text = map_code(&text, rewrite_return);
    let text = map_code(&text, |code| code.replace(';', ""));
    let text = collapse_blank_lines(&text);
    let text = clear_whitespace_lines(&text);
    text.trim().to_string()
}

/// Run `f` on the code part of every line, leaving comments untouched.
fn map_code<F>(text: &str, f: F) -> String
where
    F: Fn(&str) -> String,
{
    text.split('\n')
        .map(|line| match line.find(COMMENT) {
            Some(idx) => format!("{}{}", f(&line[..idx]), &line[idx..]),
            None => f(line),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn strip_contract_wrapper(code: &str) -> String {
    let re = CONTRACT_RE.get_or_init(|| {
        Regex::new(&format!(r"{STATEMENT_START}contract\s+(\w+)[^{{\n]*\{{")).unwrap()
    });
    re.replace_all(code, |caps: &Captures| {
        format!("{}{}", &caps[1], placeholder(&caps[2]))
    })
    .into_owned()
}

fn strip_closing_braces(text: &str) -> String {
    let re = BRACE_RE.get_or_init(|| Regex::new(r"(?m)^[ \t]*\}[ \t]*;?[ \t]*\r?$").unwrap());
    re.replace_all(text, "").into_owned()
}

fn rewrite_function_header(code: &str) -> String {
    let re = FUNCTION_RE.get_or_init(|| {
        Regex::new(&format!(
            r"{STATEMENT_START}function\s+(\w+)\s*\(([^)]*)\){MODIFIERS}\s*(?:returns\s*\([^)]*\))?\s*\{{"
        ))
        .unwrap()
    });
    re.replace_all(code, |caps: &Captures| {
        format!("{}{}", &caps[1], clarity_header(&caps[2], &caps[3], &caps[4]))
    })
    .into_owned()
}

fn rewrite_return(code: &str) -> String {
    let re = RETURN_RE.get_or_init(|| {
        Regex::new(&format!(r"{STATEMENT_START}return\s+([^;}}]+);?")).unwrap()
    });
    re.replace_all(code, |caps: &Captures| {
        format!("{}{}", &caps[1], ok_response(&caps[2]))
    })
    .into_owned()
}

fn collapse_blank_lines(text: &str) -> String {
    let re = BLANK_RUN_RE.get_or_init(|| Regex::new(r"\n\s*\n\s*\n").unwrap());
    re.replace_all(text, "\n\n").into_owned()
}

fn clear_whitespace_lines(text: &str) -> String {
    let re = WHITESPACE_LINE_RE.get_or_init(|| Regex::new(r"(?m)^[ \t\r]+$").unwrap());
    re.replace_all(text, "").into_owned()
}
