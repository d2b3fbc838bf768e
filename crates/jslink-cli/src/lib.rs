//! jslink CLI - link JavaScript sources by their doc-comment directives.
//!
//! # Architecture
//!
//! - [`cli`] - clap argument definitions
//! - [`config`] - layered configuration (defaults, file, `JSLINK_*`, flags)
//! - [`commands`] - `build`, `check` and `graph`
//! - [`error`] - error type with hints and miette rendering
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - terminal output

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
