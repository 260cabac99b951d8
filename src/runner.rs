use crate::config::Settings;
use crate::errors::Result;
use crate::file_renamer::{FileRenamer, RenameStats};
use crate::output_formatter::Highlighter;
use crate::prompt::{Confirm, Interaction};
use crate::replacer::{ContentStats, Replacer};
use crate::scanner::{self, Selection};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Counters for one complete run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub root_dir: PathBuf,
    pub files_found: usize,
    pub paths_found: usize,
    pub binary_skipped: usize,
    pub files_rewritten: usize,
    pub lines_rewritten: usize,
    pub lines_declined: usize,
    pub paths_renamed: usize,
    pub renames_declined: usize,
    pub renames_blocked: usize,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    fn new(settings: &Settings, files_found: usize, paths_found: usize) -> Self {
        Self {
            root_dir: settings.root_dir.clone(),
            files_found,
            paths_found,
            binary_skipped: 0,
            files_rewritten: 0,
            lines_rewritten: 0,
            lines_declined: 0,
            paths_renamed: 0,
            renames_declined: 0,
            renames_blocked: 0,
            finished_at: Utc::now(),
        }
    }

    fn add_content(&mut self, stats: ContentStats) {
        self.binary_skipped += stats.binary_skipped;
        self.files_rewritten += stats.files_rewritten;
        self.lines_rewritten += stats.lines_rewritten;
        self.lines_declined += stats.lines_declined;
    }

    fn add_renames(&mut self, stats: RenameStats) {
        self.paths_renamed += stats.renamed;
        self.renames_declined += stats.declined;
        self.renames_blocked += stats.blocked;
    }
}

/// Scans the tree, then rewrites contents, then renames paths.
///
/// Contents go first so that the file list from the scan is still valid when
/// the files are opened.
pub fn run<W: Write>(
    settings: &Settings,
    confirm: &mut dyn Confirm,
    out: &mut W,
) -> Result<RunSummary> {
    let highlighter = Highlighter::new(settings.color);
    let root = &settings.root_dir;

    writeln!(out, "Checking if directory '{}' exists...", root.display())?;
    let selection = if settings.all_files {
        Selection::Everything
    } else {
        Selection::NameContains(&settings.from)
    };
    let mut paths = scanner::scan_with(root, selection, settings.extension.as_deref())?;
    for hidden in &paths.hidden_dirs {
        writeln!(out, "Hidden directory skipped: {}", hidden.display())?;
    }
    writeln!(out, "Directory exists! Built list of matching files.")?;
    writeln!(out, "{} total files found...", paths.files_only.len())?;
    writeln!(
        out,
        "{} total files and directories found...\n",
        paths.all_matches.len()
    )?;
    log::debug!(
        "Scan of {} matched {} paths",
        root.display(),
        paths.all_matches.len()
    );

    let mut summary = RunSummary::new(settings, paths.files_only.len(), paths.all_matches.len());
    let mut ctx = Interaction::new(out, confirm, settings.quiet, highlighter);

    if !settings.skip_content {
        writeln!(ctx.out, "{}\n", highlighter.heading("Checking file contents..."))?;
        let replacer = Replacer::new(settings.from.as_str(), settings.to.as_str());
        summary.add_content(replacer.rewrite_contents(&paths.files_only, &mut ctx)?);
        writeln!(ctx.out, "Done checking file contents...\n")?;
    }

    if !settings.skip_files {
        writeln!(
            ctx.out,
            "{}\n",
            highlighter.heading("Checking files and directory names...")
        )?;
        let renamer = FileRenamer::new(
            settings.from.as_str(),
            settings.to.as_str(),
            settings.extension.clone(),
        );
        summary.add_renames(renamer.rename_paths(&mut paths.all_matches, &mut ctx)?);
        writeln!(ctx.out, "Done checking files and directory names...\n")?;
    }

    if settings.skip_files && settings.skip_content {
        let message = "Both --skip-files and --skip-content were provided. Nothing to refactor!";
        writeln!(ctx.out, "{}\n", highlighter.notice(message))?;
    }

    summary.finished_at = Utc::now();
    Ok(summary)
}
