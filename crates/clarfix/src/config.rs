//! Configuration schema (clarfix.toml)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use tracing::debug;

use crate::linter::Conflict;
use crate::registry::{Rule, RuleSelector};
use crate::session::Debounce;

pub const CONFIG_FILE: &str = "clarfix.toml";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Rules to run, by code, or "ALL"
    pub select: Vec<RuleSelector>,

    /// Rules to skip, applied after `select`
    pub ignore: Vec<RuleSelector>,

    /// Which fix to keep when several rules fire on one line
    pub conflict: Conflict,

    /// Quiet intervals before re-analysis in a live session
    pub debounce: Debounce,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            select: vec![RuleSelector::All],
            ignore: Vec::new(),
            conflict: Conflict::default(),
            debounce: Debounce::default(),
        }
    }
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml)?)
    }

    /// Use `path` if given, else `clarfix.toml` in the current directory if it
    /// exists, else the defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        let default_path = Path::new(CONFIG_FILE);
        if default_path.exists() {
            debug!("loading {}", default_path.display());
            Self::from_file(default_path)
        } else {
            debug!("no {CONFIG_FILE} found, using defaults");
            Ok(Self::default())
        }
    }

    /// The selected rules, in catalogue order.
    ///
    /// Ignoring a rule that was not selected is not an error.
    pub fn rules(&self) -> Vec<Rule> {
        Rule::iter()
            .filter(|rule| self.select.iter().any(|selector| selector.contains(*rule)))
            .filter(|rule| !self.ignore.iter().any(|selector| selector.contains(*rule)))
            .collect()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.rules().len(), Rule::iter().count());
        assert_eq!(config.conflict, Conflict::HighestSeverity);
        assert_eq!(config.debounce.edit_ms, 1000);
        assert_eq!(config.debounce.rectify_ms, 500);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn full_file() {
        let config = Config::from_toml(
            r#"
            select = ["ALL"]
            ignore = ["US", "ED"]
            conflict = "last-wins"

            [debounce]
            edit_ms = 300
            "#,
        )
        .unwrap();

        assert_eq!(config.conflict, Conflict::LastWins);
        assert_eq!(config.debounce.edit_ms, 300);
        assert_eq!(config.debounce.rectify_ms, 500);
        let rules = config.rules();
        assert!(!rules.contains(&Rule::UnnecessarySemicolon));
        assert!(!rules.contains(&Rule::EventDeclaration));
        assert_eq!(rules.len(), Rule::iter().count() - 2);
    }

    #[test]
    fn selection_keeps_catalogue_order() {
        let config = Config::from_toml(r#"select = ["UV", "FD"]"#).unwrap();
        assert_eq!(
            config.rules(),
            vec![Rule::FunctionDeclaration, Rule::UndefinedVariable]
        );
    }

    #[test]
    fn unknown_code_is_rejected() {
        let err = Config::from_toml(r#"select = ["NOPE"]"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(Config::from_toml("colour = true").is_err());
    }

    #[test]
    fn missing_file() {
        let err = Config::from_file(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn round_trip_through_toml() {
        let config = Config {
            ignore: vec![RuleSelector::Selection(Rule::BareFunctionCall)],
            ..Config::default()
        };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }
}
