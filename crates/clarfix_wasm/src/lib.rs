use serde::Serialize;
use strum::IntoEnumIterator;
use wasm_bindgen::prelude::*;

use clarfix::config::Config;
use clarfix::diagnostic::{Diagnostic, Severity};
use clarfix::linter::{self, Conflict};
use clarfix::registry::{Rule, RuleSelector, rule_to_name};
use clarfix::session::Millis;

#[derive(Debug, Serialize)]
struct RuleInfo {
    code: String,
    name: &'static str,
    severity: Severity,
    description: &'static str,
}

fn rule_info(rule: Rule) -> RuleInfo {
    RuleInfo {
        code: rule.to_string(),
        name: rule_to_name(rule),
        severity: rule.severity(),
        description: rule.description(),
    }
}

fn parse_rules(codes: &[String]) -> Result<Vec<Rule>, String> {
    let config = Config {
        select: codes
            .iter()
            .map(|code| code.parse::<RuleSelector>())
            .collect::<Result<_, _>>()?,
        ..Config::default()
    };
    Ok(config.rules())
}

// performance.now() is a float and may carry a fractional part.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_millis(now: f64) -> Millis {
    if now.is_finite() && now > 0.0 {
        now as Millis
    } else {
        0
    }
}

/// Every rule, in catalogue order.
#[wasm_bindgen]
pub fn rules() -> Result<JsValue, JsError> {
    let rules: Vec<RuleInfo> = Rule::iter().map(rule_info).collect();
    Ok(serde_wasm_bindgen::to_value(&rules)?)
}

/// Check `text` with every rule.
#[wasm_bindgen]
pub fn analyze(text: &str) -> Result<JsValue, JsError> {
    let diagnostics = linter::analyze(text);
    Ok(serde_wasm_bindgen::to_value(&diagnostics)?)
}

/// Check `text` with the rules whose codes are given, or "ALL".
#[wasm_bindgen]
pub fn check(text: &str, codes: JsValue) -> Result<JsValue, JsError> {
    let codes: Vec<String> = serde_wasm_bindgen::from_value(codes)?;
    let rules = parse_rules(&codes).map_err(|err| JsError::new(&err))?;
    let diagnostics = linter::check(text, &rules);
    Ok(serde_wasm_bindgen::to_value(&diagnostics)?)
}

/// Apply `diagnostics` (as returned by `analyze` on this `text`).
///
/// Returns `text` unchanged if they do not fit it.
#[wasm_bindgen]
pub fn rectify(text: &str, diagnostics: JsValue) -> Result<String, JsError> {
    let diagnostics: Vec<Diagnostic> = serde_wasm_bindgen::from_value(diagnostics)?;
    match linter::try_rectify(text, &diagnostics, Conflict::default()) {
        Ok(rectified) => Ok(rectified),
        Err(err) => {
            web_sys::console::warn_1(&format!("clarfix: {err}").into());
            Ok(text.to_string())
        }
    }
}

/// Check and rectify until nothing fixable is left.
#[wasm_bindgen]
pub fn fix(text: &str) -> String {
    let all: Vec<Rule> = Rule::iter().collect();
    let (fixed, _) = linter::fix(text, &all, Conflict::default());
    fixed
}

/// An editor buffer, re-analyzed after edits settle.
///
/// The host drives it: call `tick(performance.now())` once `nextDeadline`
/// has passed.
#[wasm_bindgen]
pub struct Session {
    inner: clarfix::session::Session,
}

#[wasm_bindgen]
impl Session {
    /// `config` is the contents of a clarfix.toml, if any.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<Session, JsError> {
        let config = match config {
            Some(toml) => Config::from_toml(&toml)?,
            None => Config::default(),
        };
        Ok(Self {
            inner: clarfix::session::Session::new(&config),
        })
    }

    #[wasm_bindgen(getter)]
    pub fn text(&self) -> String {
        self.inner.text().to_string()
    }

    #[wasm_bindgen(getter)]
    #[allow(clippy::cast_precision_loss)]
    pub fn revision(&self) -> f64 {
        self.inner.revision() as f64
    }

    #[wasm_bindgen(getter, js_name = isAnalyzing)]
    pub fn is_analyzing(&self) -> bool {
        self.inner.is_analyzing()
    }

    #[wasm_bindgen(getter, js_name = isRectifying)]
    pub fn is_rectifying(&self) -> bool {
        self.inner.is_rectifying()
    }

    #[wasm_bindgen(getter, js_name = nextDeadline)]
    #[allow(clippy::cast_precision_loss)]
    pub fn next_deadline(&self) -> Option<f64> {
        self.inner.next_deadline().map(|due| due as f64)
    }

    /// Diagnostics for the current text, or `null` while they are out of date.
    pub fn diagnostics(&self) -> Result<JsValue, JsError> {
        match self.inner.diagnostics() {
            Some(diagnostics) => Ok(serde_wasm_bindgen::to_value(diagnostics)?),
            None => Ok(JsValue::NULL),
        }
    }

    #[wasm_bindgen(js_name = errorLines)]
    pub fn error_lines(&self) -> Vec<u32> {
        self.inner
            .error_lines()
            .into_iter()
            .map(|line| u32::try_from(line).unwrap_or(u32::MAX))
            .collect()
    }

    pub fn edit(&mut self, text: &str, now: f64) {
        self.inner.edit(text, to_millis(now));
    }

    /// Returns the new revision.
    #[wasm_bindgen(js_name = requestRectify)]
    #[allow(clippy::cast_precision_loss)]
    pub fn request_rectify(&mut self, now: f64) -> Result<f64, JsError> {
        let revision = self.inner.request_rectify(to_millis(now))?;
        Ok(revision as f64)
    }

    /// The analysis event, or `undefined` if nothing was due.
    pub fn tick(&mut self, now: f64) -> Result<JsValue, JsError> {
        match self.inner.tick(to_millis(now)) {
            Some(event) => Ok(serde_wasm_bindgen::to_value(&event)?),
            None => Ok(JsValue::UNDEFINED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_from_float() {
        assert_eq!(to_millis(1234.9), 1234);
        assert_eq!(to_millis(-5.0), 0);
        assert_eq!(to_millis(f64::NAN), 0);
    }

    #[test]
    fn rule_codes() {
        assert_eq!(
            parse_rules(&["ED".to_string(), "FD".to_string()]).unwrap(),
            vec![Rule::FunctionDeclaration, Rule::EventDeclaration]
        );
        assert_eq!(parse_rules(&["ALL".to_string()]).unwrap().len(), 10);
        assert!(parse_rules(&["XX".to_string()]).is_err());
    }

    #[test]
    fn rule_listing() {
        let info = rule_info(Rule::UnnecessarySemicolon);
        assert_eq!(info.code, "US");
        assert_eq!(info.name, "UnnecessarySemicolon");
        assert_eq!(info.severity, Severity::Warning);
    }
}
