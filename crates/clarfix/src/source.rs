use std::cell::OnceCell;
use std::ops::Deref;

/// Clarity line comment marker.
pub const COMMENT: &str = ";;";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// 1-based.
    pub number: usize,
    /// The line as written, minus a trailing carriage return.
    pub raw: &'a str,
    pub trimmed: &'a str,
}

impl<'a> Line<'a> {
    pub fn new(number: usize, line: &'a str) -> Self {
        let raw = line.strip_suffix('\r').unwrap_or(line);
        Self {
            number,
            raw,
            trimmed: raw.trim(),
        }
    }

    pub fn indent(&self) -> &'a str {
        let end = self.raw.len() - self.raw.trim_start().len();
        &self.raw[..end]
    }

    pub fn is_blank(&self) -> bool {
        self.trimmed.is_empty()
    }

    pub fn is_comment(&self) -> bool {
        self.trimmed.starts_with(COMMENT)
    }

    /// Blank lines and comments are never checked.
    pub fn is_skipped(&self) -> bool {
        self.is_blank() || self.is_comment()
    }

    /// Character offset of the first `needle` in the raw line, or 0 if absent.
    pub fn column_of(&self, needle: &str) -> usize {
        self.raw
            .find(needle)
            .map_or(0, |idx| self.raw[..idx].chars().count())
    }

    /// Width of the raw line in characters.
    pub fn width(&self) -> usize {
        self.raw.chars().count()
    }

    /// Prefix `content` with this line's indentation.
    pub fn indented(&self, content: &str) -> String {
        format!("{}{content}", self.indent())
    }
}

/// A text snapshot split into lines.
///
/// Splitting is done on `\n` only, so a trailing newline yields a last empty
/// line, and `Source::new("")` has exactly one (blank) line.
#[derive(Debug)]
pub struct Source<'a> {
    text: &'a str,
    lines: Vec<Line<'a>>,
    sentinel_defined: OnceCell<bool>,
}

impl<'a> Source<'a> {
    pub fn new(text: &'a str) -> Self {
        let lines = text
            .split('\n')
            .enumerate()
            .map(|(idx, line)| Line::new(idx + 1, line))
            .collect();
        Self {
            text,
            lines,
            sentinel_defined: OnceCell::new(),
        }
    }

    /// Whether the text defines `storedData`. `lookup` runs at most once per
    /// snapshot; later calls return the first answer.
    pub(crate) fn sentinel_defined(&self, lookup: impl FnOnce(&'a str) -> bool) -> bool {
        *self.sentinel_defined.get_or_init(|| lookup(self.text))
    }
}

impl<'a> Deref for Source<'a> {
    type Target = [Line<'a>];

    fn deref(&self) -> &Self::Target {
        &self.lines
    }
}

impl<'b, 'a> IntoIterator for &'b Source<'a> {
    type Item = &'b Line<'a>;
    type IntoIter = std::slice::Iter<'b, Line<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
