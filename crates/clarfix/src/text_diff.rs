use colored::Colorize;
use similar::{ChangeTag, TextDiff};

// From ruff CodeDiff
pub struct CodeDiff<'a> {
    diff: TextDiff<'a, 'a, 'a, str>,
    header: Option<(&'a str, &'a str)>,
    missing_newline_hint: bool,
}

impl<'a> CodeDiff<'a> {
    pub fn new(original: &'a str, modified: &'a str) -> Self {
        let diff = TextDiff::from_lines(original, modified);
        Self {
            diff,
            header: None,
            missing_newline_hint: true,
        }
    }

    pub const fn header(mut self, original: &'a str, modified: &'a str) -> Self {
        self.header = Some((original, modified));
        self
    }
}

impl std::fmt::Display for CodeDiff<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some((original, modified)) = self.header {
            writeln!(f, "--- {}", original.red())?;
            writeln!(f, "+++ {}", modified.green())?;
        }

        let mut unified = self.diff.unified_diff();
        unified.missing_newline_hint(self.missing_newline_hint);

        // Individual hunks (section of changes)
        for hunk in unified.iter_hunks() {
            writeln!(f, "{}", hunk.header().to_string().cyan())?;

            // individual lines
            for change in hunk.iter_changes() {
                let value = change.value();
                let newline = if change.missing_newline() { "\n" } else { "" };
                match change.tag() {
                    ChangeTag::Equal => write!(f, " {value}{newline}")?,
                    ChangeTag::Delete => {
                        write!(f, "{}{}", "-".red(), format!("{value}{newline}").red())?;
                    }
                    ChangeTag::Insert => {
                        write!(f, "{}{}", "+".green(), format!("{value}{newline}").green())?;
                    }
                }
            }
        }

        Ok(())
    }
}
