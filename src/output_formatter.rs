use crate::cli::SummaryFormat;
use crate::errors::Result;
use crate::runner::RunSummary;
use colored::{Color, Colorize};
use std::io::Write;
use std::path::{MAIN_SEPARATOR, Path};

/// Semantic coloring for everything the tool shows on the terminal.
///
/// When disabled every method returns plain text, which keeps the rest of the
/// crate free of escape codes.
#[derive(Debug, Clone, Copy)]
pub struct Highlighter {
    enabled: bool,
}

impl Highlighter {
    const REMOVED: Color = Color::Red;
    const ADDED: Color = Color::Green;
    const PATTERN: Color = Color::Blue;
    const HEADING: Color = Color::Cyan;
    const NOTICE: Color = Color::Yellow;

    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled && !text.is_empty() {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Paints `line` in `base`, with every `pattern` occurrence swapped for
    /// `shown` in the pattern color.
    fn paint_occurrences(&self, line: &str, pattern: &str, shown: &str, base: Color) -> String {
        line.split(pattern)
            .map(|segment| self.paint(segment, base))
            .collect::<Vec<_>>()
            .join(&self.paint(shown, Self::PATTERN))
    }

    /// The unmodified line, prefixed with `-` and its 1-based number.
    pub fn removed_line(&self, number: usize, line: &str, from: &str) -> String {
        format!(
            "{}\t\t{}",
            self.paint(&format!("- {number}."), Self::REMOVED),
            self.paint_occurrences(line, from, from, Self::REMOVED)
        )
    }

    /// The modified line, prefixed with `+` and its 1-based number.
    pub fn added_line(&self, number: usize, line: &str, from: &str, to: &str) -> String {
        format!(
            "{}\t\t{}",
            self.paint(&format!("+ {number}."), Self::ADDED),
            self.paint_occurrences(line, from, to, Self::ADDED)
        )
    }

    /// A path about to be renamed, with its base name highlighted.
    pub fn old_path(&self, path: &Path) -> String {
        self.path_with_name(path, Self::REMOVED)
    }

    /// A rename target, with its base name highlighted.
    pub fn new_path(&self, path: &Path) -> String {
        self.path_with_name(path, Self::ADDED)
    }

    fn path_with_name(&self, path: &Path, color: Color) -> String {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => format!(
                "{}{}{}",
                parent.display(),
                MAIN_SEPARATOR,
                self.paint(&name, color)
            ),
            None => self.paint(&name, color),
        }
    }

    pub fn heading(&self, text: &str) -> String {
        self.paint(text, Self::HEADING)
    }

    pub fn notice(&self, text: &str) -> String {
        self.paint(text, Self::NOTICE)
    }
}

/// Writes the end-of-run summary.
pub struct OutputFormatter {
    format: SummaryFormat,
}

impl OutputFormatter {
    pub fn new(format: SummaryFormat) -> Self {
        Self { format }
    }

    pub fn write_summary<W: Write>(&self, writer: &mut W, summary: &RunSummary) -> Result<()> {
        let output = match self.format {
            SummaryFormat::Text => self.format_text(summary),
            SummaryFormat::Json => self.format_json(summary)?,
        };
        writer.write_all(output.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn format_text(&self, summary: &RunSummary) -> String {
        let rows = [
            ("Files found", summary.files_found),
            ("Paths found", summary.paths_found),
            ("Binary skipped", summary.binary_skipped),
            ("Files rewritten", summary.files_rewritten),
            ("Lines rewritten", summary.lines_rewritten),
            ("Lines declined", summary.lines_declined),
            ("Paths renamed", summary.paths_renamed),
            ("Renames declined", summary.renames_declined),
            ("Renames blocked", summary.renames_blocked),
        ];

        let mut output = format!("{}\n", "-".repeat(50));
        for (label, value) in rows {
            output.push_str(&format!("{label:<17}: {value}\n"));
        }
        output
    }

    fn format_json(&self, summary: &RunSummary) -> Result<String> {
        let mut json = serde_json::to_string_pretty(summary)?;
        json.push('\n');
        Ok(json)
    }
}
