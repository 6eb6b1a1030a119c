pub mod cleanup;
pub mod cli;
pub mod config;
pub mod diagnostic;
pub mod registry;
pub mod session;
pub mod source;
pub mod text_diff;

pub mod linter;
pub mod macros;
pub mod rules;

pub use diagnostic::{Diagnostic, Severity, Summary};
pub use linter::{Conflict, RectifyError, analyze, check, fix, rectify, try_rectify};
pub use registry::Rule;
