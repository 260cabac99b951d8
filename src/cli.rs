use clap::{ArgAction, CommandFactory, Parser};
use serde::Deserialize;
use std::ffi::OsString;
use std::path::PathBuf;

/// Bulk literal search-and-replace for file contents and file names.
///
/// `refactor` walks a directory tree, rewrites every line that contains the
/// `--from` substring and renames every file or directory whose name contains
/// it. Each change is confirmed interactively unless `--quiet` is given.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Bulk literal search-and-replace across file contents and file names",
    long_about = "refactor - rewrite a literal substring everywhere under a directory.

Both file contents and file/directory names are refactored:
  • Every line containing the pattern is shown before and after the change
  • Each edit and rename is confirmed with y/n unless --quiet is set
  • Hidden files and directories (leading '.') are never touched
  • Binary files are detected and skipped

QUICK EXAMPLES:
  refactor -f OldName -t NewName                 # Interactive, current directory
  refactor -f old_pkg -t new_pkg -d src/ -q      # Apply everything without asking
  refactor -f Foo -t Bar -e .java --skip-files   # Only contents of .java files"
)]
pub struct Args {
    /// The substring to be refactored.
    #[arg(short = 'f', long = "from")]
    pub from: Option<String>,

    /// The substring to refactor to.
    #[arg(short = 't', long = "to")]
    pub to: Option<String>,

    /// The root directory to recurse and refactor.
    #[arg(short = 'd', long = "dir", default_value = ".")]
    pub dir: PathBuf,

    /// Quiet mode. Do not confirm each step.
    #[arg(short, long)]
    pub quiet: bool,

    /// Skip renaming files and directories. Only refactor contents.
    #[arg(long = "skip-files", visible_aliases = ["sf", "skf"])]
    pub skip_files: bool,

    /// Skip file contents. Only refactor file and directory names.
    #[arg(long = "skip-content", visible_aliases = ["sc", "skc"])]
    pub skip_content: bool,

    /// Search the contents of every file, not only files whose name contains
    /// the pattern.
    #[arg(short = 'a', long = "all-files")]
    pub all_files: bool,

    /// Limit the refactor to one file extension (example: .java).
    #[arg(short = 'e', long = "ext")]
    pub extension: Option<String>,

    /// Path to a YAML file with default option values.
    #[arg(short, long, env = "REFACTOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Format of the summary printed at the end of the run.
    #[arg(long, value_enum)]
    pub format: Option<SummaryFormat>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Output formats for the end-of-run summary.
#[derive(clap::ValueEnum, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SummaryFormat {
    /// Human-readable counters.
    #[default]
    Text,
    /// Pretty-printed JSON, suitable for scripting.
    Json,
}

impl Args {
    /// `true` when both `--from` and `--to` were given and are non-empty.
    pub fn has_patterns(&self) -> bool {
        let present = |s: &Option<String>| s.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.from) && present(&self.to)
    }
}

/// Single-dash spellings of the skip flags, e.g. `-sf`, mapped to their long
/// form. clap only knows single-character short flags.
const LEGACY_FLAGS: [(&str, &str); 4] = [
    ("-sf", "--skip-files"),
    ("-skf", "--skip-files"),
    ("-sc", "--skip-content"),
    ("-skc", "--skip-content"),
];

/// Flags whose next argument is a value and must be left alone.
const VALUE_FLAGS: [&str; 11] = [
    "-f", "--from", "-t", "--to", "-d", "--dir", "-e", "--ext", "-c", "--config", "--format",
];

/// Rewrites `-sf`/`-skf`/`-sc`/`-skc` into the flags clap understands.
pub fn expand_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut expanded = Vec::new();
    let mut takes_value = false;
    let mut after_separator = false;

    for arg in args {
        let replacement = match arg.to_str() {
            Some(text) if !takes_value && !after_separator => LEGACY_FLAGS
                .iter()
                .find(|(legacy, _)| *legacy == text)
                .map(|(_, long)| OsString::from(*long)),
            _ => None,
        };
        after_separator |= !takes_value && arg == "--";
        takes_value = !after_separator && arg.to_str().is_some_and(|a| VALUE_FLAGS.contains(&a));
        expanded.push(replacement.unwrap_or(arg));
    }
    expanded
}

/// Parses command-line arguments and returns the populated `Args` struct.
pub fn parse_args() -> Args {
    Args::parse_from(expand_legacy_flags(std::env::args_os()))
}

/// The text printed when the required patterns are missing.
pub fn usage() -> String {
    let mut command = Args::command();
    format!(
        "refactor - CLI refactor tool.\n\n\
         QUICK START EXAMPLES:\n  \
         refactor -f OldName -t NewName              # Confirm each change\n  \
         refactor -f OldName -t NewName -q           # Apply without asking\n  \
         refactor -f OldName -t NewName -e .rs -d src\n  \
         refactor -f OldName -t NewName -sf          # Contents only (also -skf, --skip-files)\n\n{}",
        command.render_help()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_flags() {
        let args = Args::try_parse_from([
            "refactor", "-f", "old", "-t", "new", "-d", "src", "-q", "-e", ".java",
        ])
        .unwrap();

        assert_eq!(args.from.as_deref(), Some("old"));
        assert_eq!(args.to.as_deref(), Some("new"));
        assert_eq!(args.dir, PathBuf::from("src"));
        assert!(args.quiet);
        assert_eq!(args.extension.as_deref(), Some(".java"));
        assert!(args.has_patterns());
    }

    #[test]
    fn test_skip_flag_aliases() {
        let args = Args::try_parse_from(["refactor", "-f", "a", "-t", "b", "--sf", "--skc"]).unwrap();
        assert!(args.skip_files);
        assert!(args.skip_content);
    }

    #[test]
    fn test_single_dash_skip_flags() {
        let argv = ["refactor", "-f", "a", "-t", "b", "-sf", "-skc"].map(OsString::from);
        let args = Args::try_parse_from(expand_legacy_flags(argv)).unwrap();
        assert!(args.skip_files);
        assert!(args.skip_content);
    }

    #[test]
    fn test_legacy_spelling_as_value_is_kept() {
        let argv = ["refactor", "-f", "-sf", "-t", "-sc"].map(OsString::from);
        let args = Args::try_parse_from(expand_legacy_flags(argv)).unwrap();
        assert_eq!(args.from.as_deref(), Some("-sf"));
        assert_eq!(args.to.as_deref(), Some("-sc"));
        assert!(!args.skip_files);
        assert!(!args.skip_content);
    }

    #[test]
    fn test_missing_or_empty_patterns() {
        let args = Args::try_parse_from(["refactor", "-f", "a"]).unwrap();
        assert!(!args.has_patterns());

        let args = Args::try_parse_from(["refactor", "-f", "a", "-t", ""]).unwrap();
        assert!(!args.has_patterns());
    }

    #[test]
    fn test_usage_mentions_flags() {
        let text = usage();
        assert!(text.contains("--from"));
        assert!(text.contains("--skip-content"));
    }
}
