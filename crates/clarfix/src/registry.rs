use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{EnumIter, IntoStaticStr};

use crate::diagnostic::Severity;

/// The rule catalogue.
///
/// Declaration order is the order in which rules run on a line, and therefore
/// the order of same-line diagnostics.
#[derive(EnumIter, IntoStaticStr, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Serialize, Deserialize)]
pub enum Rule {
    FunctionDeclaration,
    VariableDeclaration,
    ContractWrapper,
    ReturnStatement,
    UnnecessarySemicolon,
    UnbalancedParens,
    BareFunctionCall,
    UndefinedVariable,
    MappingDeclaration,
    EventDeclaration,
}

impl Rule {
    pub const fn severity(&self) -> Severity {
        match self {
            Self::UnnecessarySemicolon | Self::EventDeclaration => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub const fn description(&self) -> &'static str {
        #[allow(clippy::enum_glob_use)]
        use Rule::*;
        match self {
            FunctionDeclaration => "Solidity function header instead of define-public/define-read-only",
            VariableDeclaration => "Solidity typed state variable instead of define-data-var",
            ContractWrapper => "Solidity contract block, which Clarity does not have",
            ReturnStatement => "return statement instead of an (ok ...) response",
            UnnecessarySemicolon => "trailing semicolon",
            UnbalancedParens => "more opening than closing parentheses on a line, or the reverse",
            BareFunctionCall => "C-style call instead of prefix notation",
            UndefinedVariable => "storedData used but never defined",
            MappingDeclaration => "Solidity mapping instead of define-map",
            EventDeclaration => "Solidity event, which has no Clarity equivalent",
        }
    }
}

/// Get the code from the name:
/// "FunctionDeclaration" => "FD"
fn name_to_code(name: &str) -> String {
    name.chars().filter(|c| c.is_uppercase()).collect()
}

/// Get the rule from the code:
/// "FD" => `Rule::FunctionDeclaration`
pub fn code_to_rule(code: &str) -> Option<Rule> {
    Rule::iter().find(|rule| {
        let name: &'static str = rule.into();
        name_to_code(name) == code
    })
}

/// Get the name from the rule:
/// `Rule::FunctionDeclaration` => "FunctionDeclaration"
pub fn rule_to_name(rule: Rule) -> &'static str {
    rule.into()
}

/// Get the code from the rule:
/// `Rule::FunctionDeclaration` => "FD"
pub fn rule_to_code(rule: Rule) -> String {
    name_to_code(rule_to_name(rule))
}

impl std::str::FromStr for Rule {
    type Err = String;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        code_to_rule(code).ok_or_else(|| format!("Unknown rule code: {code}"))
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", rule_to_code(*self))
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", rule_to_name(*self))
    }
}

// The whole point of selector is to deal with the --select ALL
// option in the CLI and `select = ["ALL"]` in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RuleSelector {
    All,
    Selection(Rule),
}

impl RuleSelector {
    pub fn contains(&self, rule: Rule) -> bool {
        match self {
            Self::All => true,
            Self::Selection(selection) => *selection == rule,
        }
    }
}

impl std::str::FromStr for RuleSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(Self::All),
            _ => Ok(Self::Selection(s.parse()?)),
        }
    }
}

impl TryFrom<String> for RuleSelector {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RuleSelector> for String {
    fn from(selector: RuleSelector) -> Self {
        match selector {
            RuleSelector::All => "ALL".to_string(),
            RuleSelector::Selection(rule) => rule.to_string(),
        }
    }
}
