use crate::errors::{Error, Result};
use crate::prompt::Interaction;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Characters outside printable ASCII that still count as text: tab and the
/// typographic quotes/colon editors like to insert.
const ALLOWED_NON_ASCII: [char; 5] = ['\t', '\u{201C}', '\u{2019}', '\u{201D}', '\u{FF1A}'];

/// One line of a file, split from the terminator it was read with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub body: String,
    /// `"\n"`, `"\r\n"`, or `""` for an unterminated last line.
    pub terminator: &'static str,
}

/// The lines of one file together with its binary/text classification.
///
/// Binary snapshots carry no lines; they are never rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContentSnapshot {
    pub lines: Vec<Line>,
    pub binary: bool,
}

impl FileContentSnapshot {
    /// Splits `bytes` into lines and classifies them.
    ///
    /// Content is binary when it is not UTF-8 or any line holds a character
    /// outside 32..=126 that is not in the allowed set. Most non-English text
    /// is therefore classified binary.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let Ok(text) = std::str::from_utf8(bytes) else {
            return Self::binary();
        };

        let mut lines = Vec::new();
        for raw in text.split_inclusive('\n') {
            let (body, terminator) = if let Some(body) = raw.strip_suffix("\r\n") {
                (body, "\r\n")
            } else if let Some(body) = raw.strip_suffix('\n') {
                (body, "\n")
            } else {
                (raw, "")
            };
            if !body.chars().all(is_text_char) {
                return Self::binary();
            }
            lines.push(Line {
                body: body.to_string(),
                terminator,
            });
        }

        Self {
            lines,
            binary: false,
        }
    }

    fn binary() -> Self {
        Self {
            lines: Vec::new(),
            binary: true,
        }
    }

    /// Reassembles the file, every line followed by its original terminator.
    pub fn render(&self) -> String {
        let mut output = String::new();
        for line in &self.lines {
            output.push_str(&line.body);
            output.push_str(line.terminator);
        }
        output
    }
}

fn is_text_char(c: char) -> bool {
    matches!(c, ' '..='~') || ALLOWED_NON_ASCII.contains(&c)
}

/// The result of processing a single file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessResult {
    /// Lines that were rewritten.
    pub changes: usize,
    /// Matching lines the user chose to keep.
    pub declined: usize,
    /// `true` if the file was written back.
    pub modified: bool,
    /// `true` if the file was skipped as binary.
    pub binary: bool,
}

/// Totals of a content pass over many files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentStats {
    pub files_rewritten: usize,
    pub lines_rewritten: usize,
    pub lines_declined: usize,
    pub binary_skipped: usize,
}

/// Line-oriented literal replacement inside files.
pub struct Replacer {
    from: String,
    to: String,
}

impl Replacer {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Returns `line` with every occurrence replaced, or `None` when it has none.
    pub fn rewrite_line(&self, line: &str) -> Option<String> {
        line.contains(&self.from)
            .then(|| line.replace(&self.from, &self.to))
    }

    /// Runs `process_file` over every candidate in order.
    ///
    /// Any I/O error aborts the pass.
    pub fn rewrite_contents<W: Write>(
        &self,
        files: &[PathBuf],
        ctx: &mut Interaction<'_, W>,
    ) -> Result<ContentStats> {
        let mut stats = ContentStats::default();
        for path in files {
            let result = self.process_file(path, ctx)?;
            if result.binary {
                stats.binary_skipped += 1;
            }
            if result.modified {
                stats.files_rewritten += 1;
            }
            stats.lines_rewritten += result.changes;
            stats.lines_declined += result.declined;
        }
        Ok(stats)
    }

    /// Shows and (after approval) applies every matching line of one file.
    ///
    /// The file is written back only if at least one line changed.
    pub fn process_file<W: Write>(
        &self,
        path: &Path,
        ctx: &mut Interaction<'_, W>,
    ) -> Result<ProcessResult> {
        let bytes = fs::read(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut snapshot = FileContentSnapshot::from_bytes(&bytes);
        let mut result = ProcessResult::default();

        if snapshot.binary {
            let message = format!("File {} is binary. Skipping...", path.display());
            writeln!(ctx.out, "{}", ctx.highlighter.notice(&message))?;
            result.binary = true;
            return Ok(result);
        }

        for (idx, line) in snapshot.lines.iter_mut().enumerate() {
            let Some(replaced) = self.rewrite_line(&line.body) else {
                continue;
            };

            let before = ctx.highlighter.removed_line(idx + 1, &line.body, &self.from);
            let after = ctx
                .highlighter
                .added_line(idx + 1, &line.body, &self.from, &self.to);
            writeln!(ctx.out, "\n{before}\n{after}\n")?;

            let approved = ctx.approve(
                &format!("Refactor line {} in file '{}'?", idx + 1, path.display()),
                &format!("Refactoring in file '{}'...", path.display()),
            )?;
            if approved {
                line.body = replaced;
                result.changes += 1;
            } else {
                writeln!(ctx.out, "Skipping refactor in file...")?;
                result.declined += 1;
            }
        }

        if result.changes > 0 {
            write_atomically(path, snapshot.render().as_bytes())?;
            log::info!("Rewrote {} line(s) in {}", result.changes, path.display());
            result.modified = true;
        }

        Ok(result)
    }
}

/// Replaces the contents of `path` through a temporary file in the same
/// directory, keeping the original permissions.
fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let write_error = |source: std::io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(parent).map_err(write_error)?;
    temp_file.write_all(contents).map_err(write_error)?;

    let perms = fs::metadata(path).map_err(write_error)?.permissions();
    fs::set_permissions(temp_file.path(), perms).map_err(write_error)?;

    temp_file.persist(path)?;
    Ok(())
}
