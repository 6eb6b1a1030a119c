//! A live buffer that is re-checked as it changes.
//!
//! This is the host side of `check` and `rectify`: it owns the text, decides
//! when analysis runs, and guarantees that diagnostics are only ever shown for
//! the text that produced them.
//!
//! Time is passed in explicitly, in milliseconds on whatever monotonic clock
//! the host uses (`performance.now()` in a browser). Nothing here sleeps or
//! spawns: the host calls [`Session::tick`] when [`Session::next_deadline`]
//! is due.
//!
//! ```
//! use clarfix::session::{Event, Session};
//!
//! let mut session = Session::default();
//! session.edit("return 5;", 0);
//! assert!(session.tick(999).is_none());
//!
//! let Some(Event::Analyzed { error_lines, .. }) = session.tick(1000) else {
//!     panic!("analysis should be due");
//! };
//! assert_eq!(error_lines, vec![1]);
//!
//! session.request_rectify(1200).unwrap();
//! assert_eq!(session.text(), "(ok 5)");
//! assert!(session.is_rectifying());
//! ```
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::diagnostic::{Diagnostic, Summary, error_lines};
use crate::linter::{Conflict, RectifyError, check, try_rectify};
use crate::registry::Rule;

pub type Millis = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Debounce {
    /// Quiet interval after the last edit.
    pub edit_ms: Millis,
    /// Delay before re-checking a rectified text.
    pub rectify_ms: Millis,
}

impl Default for Debounce {
    fn default() -> Self {
        Self {
            edit_ms: 1000,
            rectify_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    Edit,
    Rectify,
}

/// A scheduled analysis. There is at most one; scheduling replaces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    revision: u64,
    due: Millis,
    trigger: Trigger,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    #[serde(rename_all = "camelCase")]
    Analyzed {
        revision: u64,
        trigger: Trigger,
        summary: Summary,
        error_lines: Vec<usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("a rectification is already in flight")]
    Busy,
    #[error("the diagnostics are out of date with the text")]
    Stale,
    #[error("nothing to fix")]
    NothingToFix,
    #[error(transparent)]
    Rectify(#[from] RectifyError),
}

#[derive(Debug)]
struct Analysis {
    revision: u64,
    diagnostics: Vec<Diagnostic>,
}

#[derive(Debug)]
pub struct Session {
    rules: Vec<Rule>,
    conflict: Conflict,
    debounce: Debounce,
    text: String,
    revision: u64,
    analysis: Option<Analysis>,
    pending: Option<Pending>,
    rectifying: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            rules: config.rules(),
            conflict: config.conflict,
            debounce: config.debounce,
            text: String::new(),
            revision: 0,
            analysis: Some(Analysis {
                revision: 0,
                diagnostics: Vec::new(),
            }),
            pending: None,
            rectifying: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Bumped on every change to the text.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Diagnostics for the current text, or `None` while they are out of date.
    pub fn diagnostics(&self) -> Option<&[Diagnostic]> {
        self.analysis
            .as_ref()
            .filter(|analysis| analysis.revision == self.revision)
            .map(|analysis| analysis.diagnostics.as_slice())
    }

    pub fn summary(&self) -> Option<Summary> {
        self.diagnostics().map(Summary::new)
    }

    pub fn error_lines(&self) -> Vec<usize> {
        self.diagnostics().map(error_lines).unwrap_or_default()
    }

    pub const fn is_analyzing(&self) -> bool {
        self.pending.is_some()
    }

    pub const fn is_rectifying(&self) -> bool {
        self.rectifying
    }

    /// When the host should call `tick` next.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.pending.map(|pending| pending.due)
    }

    /// Replace the text. Never refused, even while rectifying.
    ///
    /// Any pending analysis is for older text and is dropped.
    pub fn edit(&mut self, text: &str, now: Millis) {
        self.text = text.to_string();
        self.revision += 1;

        if self.text.trim().is_empty() {
            // Nothing to analyze: clear right away.
            self.pending = None;
            self.rectifying = false;
            self.analysis = Some(Analysis {
                revision: self.revision,
                diagnostics: Vec::new(),
            });
        } else {
            self.schedule(now.saturating_add(self.debounce.edit_ms), Trigger::Edit);
        }
    }

    /// Rectify the current text with its current diagnostics.
    ///
    /// On success the rectified text replaces the buffer and a re-check is
    /// scheduled; the session stays rectifying until that check lands. On
    /// failure the buffer is left as it was.
    pub fn request_rectify(&mut self, now: Millis) -> Result<u64, SessionError> {
        if self.rectifying {
            return Err(SessionError::Busy);
        }
        let diagnostics = self.diagnostics().ok_or(SessionError::Stale)?;
        if !diagnostics
            .iter()
            .any(|diagnostic| diagnostic.applicable_fix().is_some())
        {
            return Err(SessionError::NothingToFix);
        }

        let rectified = try_rectify(&self.text, diagnostics, self.conflict)?;

        self.text = rectified;
        self.revision += 1;
        self.rectifying = true;
        self.schedule(now.saturating_add(self.debounce.rectify_ms), Trigger::Rectify);
        Ok(self.revision)
    }

    /// Run the pending analysis if it is due.
    pub fn tick(&mut self, now: Millis) -> Option<Event> {
        let pending = self.pending.filter(|pending| pending.due <= now)?;
        self.pending = None;
        debug_assert_eq!(pending.revision, self.revision);

        let diagnostics = check(&self.text, &self.rules);
        let event = Event::Analyzed {
            revision: pending.revision,
            trigger: pending.trigger,
            summary: Summary::new(&diagnostics),
            error_lines: error_lines(&diagnostics),
        };
        debug!(revision = pending.revision, diagnostics = diagnostics.len(), "analyzed");

        self.analysis = Some(Analysis {
            revision: pending.revision,
            diagnostics,
        });
        self.rectifying = false;
        Some(event)
    }

    fn schedule(&mut self, due: Millis, trigger: Trigger) {
        if let Some(previous) = self.pending.replace(Pending {
            revision: self.revision,
            due,
            trigger,
        }) {
            debug!(revision = previous.revision, "cancelled pending analysis");
        }
    }
}
