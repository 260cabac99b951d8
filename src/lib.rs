//! `refactor` rewrites a literal substring across a directory tree.
//!
//! It provides the core logic for the `refactor` command-line tool but can
//! also be used as a library. A run has three steps, executed in order:
//!
//! - `scanner`: walks the tree, skipping hidden entries, and collects every
//!   file and directory whose name contains the pattern, or every entry with
//!   `Selection::Everything`.
//! - `replacer`: rewrites matching lines inside the text files among them,
//!   skipping binary content.
//! - `file_renamer`: renames the matching paths, keeping later entries in
//!   sync with directories renamed earlier.
//!
//! Every change passes through `prompt::Interaction`, which either asks for
//! confirmation or, in quiet mode, announces the change and applies it.

pub mod cli;
pub mod config;
pub mod errors;
pub mod file_renamer;
pub mod logging;
pub mod output_formatter;
pub mod prompt;
pub mod replacer;
pub mod runner;
pub mod scanner;

// Re-export main types for easier access by library users.
pub use config::Settings;
pub use errors::{Error, Result};
pub use file_renamer::FileRenamer;
pub use output_formatter::{Highlighter, OutputFormatter};
pub use prompt::{Confirm, PromptConfirm};
pub use replacer::Replacer;
pub use runner::{RunSummary, run};
pub use scanner::{PathSet, Selection, scan, scan_with};
