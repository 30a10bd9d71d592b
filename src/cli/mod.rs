//! Command Line Interface (CLI) layer for adjust-line-endings.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for single-file and pre-commit
//! (batch) flows. It wires user-provided options to the library functions
//! exposed via `polyglot_eol::api`.
//!
//! If you are embedding the rewrite into another tool, prefer calling
//! `polyglot_eol::api` directly instead of the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
