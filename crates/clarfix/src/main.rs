use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::CommandFactory;
use clap::Parser;
use clap_complete::generate;
use colored::Colorize;
use itertools::Itertools;
use strum::IntoEnumIterator;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use clarfix::cli::{Args, CheckCommand, Command};
use clarfix::config::Config;
use clarfix::diagnostic::Severity;
use clarfix::linter::{Counter, fix, lint_only};
use clarfix::registry::{Rule, rule_to_name};
use clarfix::text_diff::CodeDiff;

const EXTENSIONS: &[&str] = &["clar", "txt"];

#[derive(Copy, Clone)]
pub enum ExitStatus {
    Success,
    Failure,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => Self::from(0),
            ExitStatus::Failure => Self::from(1),
        }
    }
}

fn read_file(path: &Path) -> Result<String, ExitStatus> {
    std::fs::read_to_string(path).map_err(|err| {
        eprintln!("Failed to read file {}: {err}", path.display());
        ExitStatus::Failure
    })
}

fn write_file(path: &Path, content: &str) -> Result<(), ExitStatus> {
    std::fs::write(path, content).map_err(|err| {
        eprintln!("Failed to write to file {}: {err}", path.display());
        ExitStatus::Failure
    })
}

fn get_source_files(files: Vec<PathBuf>) -> Result<Vec<PathBuf>, ExitStatus> {
    let (source_files, skipped): (Vec<_>, Vec<_>) = files.into_iter().partition(|file| {
        file.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| EXTENSIONS.contains(&ext))
    });
    for file in &skipped {
        debug!("skipping {}", file.display());
    }
    if source_files.is_empty() {
        Err(ExitStatus::Success)
    } else {
        Ok(source_files)
    }
}

fn time_it<T, F: FnOnce() -> T>(label: &str, f: F) -> T {
    let start = std::time::Instant::now();
    let result = f();
    debug!("{}: {:.2?}", label, start.elapsed());
    result
}

fn init_logging(verbose: bool) {
    let default = if verbose { "clarfix=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn run() -> Result<ExitStatus, ExitStatus> {
    let args = Args::parse();
    init_logging(args.verbose);

    match args.command {
        Command::Check(check_args) => {
            let config = load_config(args.config.as_deref(), &check_args)?;
            time_it("Execution time", || run_check_command(check_args, &config))
        }
        Command::Rules => {
            run_rules_command();
            Ok(ExitStatus::Success)
        }
        Command::GenerateCompletions { shell } => {
            // https://github.com/BurntSushi/ripgrep/blob/master/FAQ.md#complete
            // clarfix generate-completions fish > ~/.config/fish/completions/clarfix.fish
            let mut cmd = Args::command();
            let bin_name = cmd.get_name().to_string();
            generate(shell, &mut cmd, bin_name, &mut io::stdout());
            Ok(ExitStatus::Success)
        }
    }
}

/// The config file, with command line flags taking precedence.
fn load_config(path: Option<&Path>, args: &CheckCommand) -> Result<Config, ExitStatus> {
    let mut config = Config::discover(path).map_err(|err| {
        eprintln!("{}: {err}", "error".red().bold());
        ExitStatus::Failure
    })?;
    if let Some(select) = &args.select {
        config.select.clone_from(select);
    }
    if let Some(ignore) = &args.ignore {
        config.ignore.clone_from(ignore);
    }
    if let Some(conflict) = args.conflict {
        config.conflict = conflict;
    }
    Ok(config)
}

fn run_rules_command() {
    for rule in Rule::iter() {
        println!(
            "{:<4} {:<8} {:<22} {}",
            rule.to_string().cyan(),
            rule.severity(),
            rule_to_name(rule),
            rule.description()
        );
    }
}

fn run_check_command(args: CheckCommand, config: &Config) -> Result<ExitStatus, ExitStatus> {
    let source_files = get_source_files(args.files)?;
    let rules = config.rules();

    debug!(
        "Config: [{}]",
        rules.iter().map(ToString::to_string).join(", ")
    );

    let mut global_statistics_counter = Counter::new();

    for file in &source_files {
        let text = read_file(file)?;

        let statistics_counter = if args.diff || args.fix {
            let (fixed, statistics_counter) = fix(&text, &rules, config.conflict);
            if args.diff {
                let name = file.display().to_string();
                let text_diff = CodeDiff::new(&text, &fixed).header(&name, &name);
                print!("{text_diff}");
            }
            if args.fix && fixed != text {
                write_file(file, &fixed)?;
            }
            statistics_counter
        } else {
            let (messages, statistics_counter) = lint_only(&text, &rules);
            if !args.statistics && !messages.is_empty() {
                for message in &messages {
                    println!("{}:{message}", file.display().to_string().purple());
                }
            }
            statistics_counter
        };

        for (key, value) in statistics_counter {
            *global_statistics_counter.entry(key).or_insert(0) += value;
        }
    }

    if args.statistics {
        print_statistics(&global_statistics_counter);
    }

    let n_diagnostics = global_statistics_counter.values().sum::<usize>();
    let n_errors = global_statistics_counter
        .iter()
        .filter(|(rule, _)| rule.severity() == Severity::Error)
        .map(|(_, cnt)| cnt)
        .sum::<usize>();

    if n_diagnostics == 0 {
        println!("No issues!");
    } else if args.fix {
        println!("Fixed {n_diagnostics} issues.");
    } else if args.diff {
        println!("{n_diagnostics} issues would be fixed.");
    } else {
        println!(
            "Found {} issues ({} errors).\n[{}] fixable with the `--fix` option.",
            n_diagnostics,
            n_errors,
            "*".to_string().cyan(),
        );
    }

    if n_errors > 0 && !args.fix && !args.diff {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}

fn print_statistics(counter: &Counter) {
    let padding = counter
        .values()
        .map(|k| k.to_string().len())
        .max()
        .unwrap_or(0);

    counter
        .iter()
        .sorted_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)))
        .for_each(|(k, v)| {
            println!(
                "{:padding$}    {:<4} {:<8} {:?}",
                v,
                format!("{k}").red().bold(),
                k.severity(),
                k
            );
        });
}

fn main() -> ExitCode {
    run().unwrap_or_else(Into::into).into()
}
