//! Named linter for historical reasons: it checks and it fixes.
use colored::Colorize;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::IntoEnumIterator;
use tracing::{debug, warn};

use crate::cleanup::normalize;
use crate::diagnostic::Diagnostic;
use crate::registry::Rule;
use crate::source::{Line, Source};

#[allow(clippy::wildcard_imports)]
use crate::rules::*;

type Config<'a> = &'a [Rule];

/// Which fix survives when several rules fire on the same line.
///
/// Fixes replace whole lines, so only one of them can be kept.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Conflict {
    /// Keep the fix of the most severe diagnostic. Ties go to the rule that
    /// comes first in the catalogue.
    #[default]
    HighestSeverity,
    /// Keep the fix of the last diagnostic reported for the line.
    LastWins,
}

impl Conflict {
    fn pick<'a>(self, mut group: impl Iterator<Item = &'a Diagnostic>) -> Option<&'a Diagnostic> {
        match self {
            Self::LastWins => group.last(),
            Self::HighestSeverity => {
                let first = group.next()?;
                Some(group.fold(first, |best, diagnostic| {
                    if diagnostic.severity > best.severity {
                        diagnostic
                    } else {
                        best
                    }
                }))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RectifyError {
    #[error("diagnostic on line {line} is out of range for a text of {lines} lines")]
    LineOutOfRange { line: usize, lines: usize },
}

type RuleFn = fn(&Line, &Source, &mut Vec<Diagnostic>);

fn check_line(line: &Line, source: &Source, config: Config) -> Vec<Diagnostic> {
    let mut diagnostics = vec![];

    for rule in config {
        #[allow(clippy::enum_glob_use)]
        use Rule::*;
        let rule_fn: RuleFn = match rule {
            FunctionDeclaration => function_declaration,
            VariableDeclaration => variable_declaration,
            ContractWrapper => contract_wrapper,
            ReturnStatement => return_statement,
            UnnecessarySemicolon => unnecessary_semicolon,
            UnbalancedParens => unbalanced_parens,
            BareFunctionCall => bare_function_call,
            UndefinedVariable => undefined_variable,
            MappingDeclaration => mapping_declaration,
            EventDeclaration => event_declaration,
        };
        rule_fn(line, source, &mut diagnostics);
    }

    diagnostics
}

/// Check `text` with the rules in `config`.
///
/// Rules always run in catalogue order, whatever the order of `config`.
/// Diagnostics come out top to bottom, and in catalogue order within a line.
pub fn check(text: &str, config: Config) -> Vec<Diagnostic> {
    if text.trim().is_empty() {
        return vec![];
    }

    let rules: Vec<Rule> = Rule::iter().filter(|rule| config.contains(rule)).collect();
    let source = Source::new(text);

    let mut diagnostics = Vec::new();
    for line in &source {
        if line.is_skipped() {
            continue;
        }
        diagnostics.extend(check_line(line, &source, &rules));
    }

    debug!(lines = source.len(), diagnostics = diagnostics.len(), "checked");
    diagnostics
}

/// Check `text` with every rule.
pub fn analyze(text: &str) -> Vec<Diagnostic> {
    let all: Vec<Rule> = Rule::iter().collect();
    check(text, &all)
}

/// One fix per line, bottom line first.
fn select_fixes(diagnostics: &[Diagnostic], conflict: Conflict) -> Vec<&Diagnostic> {
    // Stable: same-line diagnostics keep the order they were reported in.
    let by_line = diagnostics
        .iter()
        .filter(|diagnostic| diagnostic.applicable_fix().is_some())
        .sorted_by(|a, b| b.line.cmp(&a.line))
        .chunk_by(|diagnostic| diagnostic.line);

    let mut selected = Vec::new();
    for (_, group) in &by_line {
        if let Some(diagnostic) = conflict.pick(group) {
            selected.push(diagnostic);
        }
    }
    selected
}

/// Apply the fixes in `diagnostics` to `text`, then run the cleanup passes.
///
/// `diagnostics` must come from checking this exact `text`. Nothing is
/// applied if any fix points outside of it.
pub fn try_rectify(
    text: &str,
    diagnostics: &[Diagnostic],
    conflict: Conflict,
) -> Result<String, RectifyError> {
    let mut lines: Vec<&str> = text.split('\n').collect();

    if let Some(diagnostic) = diagnostics
        .iter()
        .filter(|diagnostic| diagnostic.applicable_fix().is_some())
        .find(|diagnostic| diagnostic.line == 0 || diagnostic.line > lines.len())
    {
        return Err(RectifyError::LineOutOfRange {
            line: diagnostic.line,
            lines: lines.len(),
        });
    }

    let selected = select_fixes(diagnostics, conflict);
    debug!(fixes = selected.len(), "applying line fixes");
    for diagnostic in selected {
        if let Some(fix) = diagnostic.applicable_fix() {
            lines[diagnostic.line - 1] = fix;
        }
    }

    Ok(normalize(&lines.join("\n")))
}

/// Fail-closed `try_rectify`: on error the original text comes back unchanged.
pub fn rectify(text: &str, diagnostics: &[Diagnostic], conflict: Conflict) -> String {
    try_rectify(text, diagnostics, conflict).unwrap_or_else(|err| {
        warn!("rectification failed, keeping original text: {err}");
        text.to_string()
    })
}

const MAX_ITERATIONS: usize = 100;

pub type Counter = HashMap<Rule, usize>;

/// Repeatedly check and rectify until stable.
//
// cf
// ruff_linter/src/linter.rs::lint_fix
// https://github.com/astral-sh/ruff/blob/main/crates/ruff_linter/src/linter.rs
//
// Stops when nothing fixable is left, or when a pass does not change the
// text: some diagnostics have fixes that do not make them go away.
pub fn fix(text: &str, config: Config, conflict: Conflict) -> (String, Counter) {
    let mut transformed = text.to_string();
    let mut fixed = Counter::new();
    let mut iterations = 0;

    loop {
        let diagnostics = check(&transformed, config);
        let selected = select_fixes(&diagnostics, conflict);
        if selected.is_empty() {
            break;
        }

        let rectified = match try_rectify(&transformed, &diagnostics, conflict) {
            Ok(rectified) => rectified,
            Err(err) => {
                warn!("stopping fix loop: {err}");
                break;
            }
        };
        if rectified == transformed {
            break;
        }

        for diagnostic in selected {
            *fixed.entry(diagnostic.kind).or_insert(0) += 1;
        }
        transformed = rectified;

        iterations += 1;
        if iterations == MAX_ITERATIONS {
            warn!("exceeded maximum iterations in fix");
            break;
        }
    }

    (transformed, fixed)
}

/// The line holding the diagnostic, with the offending fragment in red.
fn get_context_message(text: &str, diagnostic: &Diagnostic) -> String {
    let Some(line) = text.split('\n').nth(diagnostic.line.saturating_sub(1)) else {
        return String::new();
    };
    let line = line.trim();

    match line.find(diagnostic.original_text.trim()) {
        Some(start) if !diagnostic.original_text.trim().is_empty() => {
            let end = start + diagnostic.original_text.trim().len();
            format!("{}{}{}", &line[..start], line[start..end].red(), &line[end..])
        }
        _ => line.to_string(),
    }
}

fn get_rich_context_message(text: &str, diagnostic: &Diagnostic) -> String {
    let fixable = if diagnostic.applicable_fix().is_some() {
        format!("[{}]", "*".to_string().cyan())
    } else {
        "   ".to_string()
    };
    format!(
        "{}:{}: {:<3} {} {} | {}",
        diagnostic.line,
        diagnostic.column,
        format!("{}", diagnostic.kind).cyan(),
        fixable,
        diagnostic.message,
        get_context_message(text, diagnostic),
    )
}

// https://github.com/astral-sh/ruff/blob/fc59e1b17f0a538a0150ea5a63de6305a8810c62/crates/ruff_linter/src/linter.rs#L382
pub fn lint_only(text: &str, config: Config) -> (Vec<String>, Counter) {
    let diagnostics = check(text, config);
    let mut statistics = Counter::new();
    let messages = diagnostics
        .iter()
        .map(|diagnostic| {
            *statistics.entry(diagnostic.kind).or_insert(0) += 1;
            get_rich_context_message(text, diagnostic)
        })
        .collect();

    (messages, statistics)
}
