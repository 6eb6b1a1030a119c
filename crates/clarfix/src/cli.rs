use crate::linter::Conflict;
use crate::registry::{Rule, RuleSelector};
use clap::builder::{PossibleValue, TypedValueParser};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use strum::IntoEnumIterator;

#[derive(Debug, Parser)]
#[command(
    name = "clarfix",
    about = "Clarfix: a rule-based checker and fixer for Solidity leftovers in Clarity code.",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Args {
    /// Path to config file (default: clarfix.toml, if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run Clarfix on the given files
    Check(CheckCommand),

    /// List the available rules
    Rules,

    /// Generate shell completions
    GenerateCompletions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// Cf. https://github.com/astral-sh/ruff/blob/1bdb22c13972b3a3dc9cb4ef31fbf37db051dd1c/crates/ruff/src/args.rs#L185
#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Files to process. Anything other than .clar or .txt files will be ignored.
    #[arg(value_parser, required = true)]
    pub files: Vec<PathBuf>,

    /// Replace the input file.
    #[arg(long)]
    pub fix: bool,

    /// Show differences between original and corrected text.
    #[arg(long)]
    pub diff: bool,

    /// Specify which rules to check. Overrides the config file.
    #[arg(
        long,
        value_delimiter = ',',
        value_name = "RULE_CODE",
        value_parser = RuleSelectorParser,
        hide_possible_values = true,
    )]
    pub select: Option<Vec<RuleSelector>>,

    /// Specify which rules to ignore. Overrides the config file.
    #[arg(
        long,
        value_delimiter = ',',
        value_name = "RULE_CODE",
        value_parser = RuleSelectorParser,
        hide_possible_values = true,
    )]
    pub ignore: Option<Vec<RuleSelector>>,

    /// Which fix to keep when several rules fire on one line.
    #[arg(long, value_enum)]
    pub conflict: Option<Conflict>,

    /// Show statistics after processing.
    #[arg(long)]
    pub statistics: bool,
}

#[derive(Debug, Clone)]
pub struct RuleSelectorParser;

impl TypedValueParser for RuleSelectorParser {
    type Value = RuleSelector;

    fn parse_ref(
        &self,
        cmd: &clap::Command,
        arg: Option<&clap::Arg>,
        value: &std::ffi::OsStr,
    ) -> Result<Self::Value, clap::Error> {
        let value = value
            .to_str()
            .ok_or_else(|| clap::Error::new(clap::error::ErrorKind::InvalidUtf8))?;

        value.parse().map_err(|_| {
            let mut error = clap::Error::new(clap::error::ErrorKind::ValueValidation).with_cmd(cmd);
            if let Some(arg) = arg {
                error.insert(
                    clap::error::ContextKind::InvalidArg,
                    clap::error::ContextValue::String(arg.to_string()),
                );
            }
            error.insert(
                clap::error::ContextKind::InvalidValue,
                clap::error::ContextValue::String(value.to_string()),
            );
            error
        })
    }

    fn possible_values(&self) -> Option<Box<dyn Iterator<Item = PossibleValue> + '_>> {
        Some(Box::new(
            std::iter::once(PossibleValue::new("ALL").help("all rules")).chain(Rule::iter().map(
                |rule| {
                    let code: String = rule.to_string();
                    PossibleValue::new(code).help(rule.description())
                },
            )),
        ))
    }
}
