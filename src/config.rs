use crate::cli::{Args, SummaryFormat};
use crate::errors::Result;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// The fully resolved options for one run.
///
/// Built once from the command line (and the optional defaults file) and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// The literal substring to replace. Never empty.
    pub from: String,
    /// The replacement substring. Never empty.
    pub to: String,
    /// The directory tree to refactor.
    pub root_dir: PathBuf,
    /// Apply every change without asking.
    pub quiet: bool,
    /// Do not rename files or directories.
    pub skip_files: bool,
    /// Do not rewrite file contents.
    pub skip_content: bool,
    /// Search the contents of every file, not only files whose name matches.
    pub all_files: bool,
    /// Exact extension filter including the leading dot, e.g. `.java`.
    pub extension: Option<String>,
    /// Whether terminal colors are used.
    pub color: bool,
    /// How the end-of-run summary is printed.
    pub format: SummaryFormat,
}

/// Default option values read from a YAML file.
///
/// ```yaml
/// quiet: false
/// extension: .java
/// color: true
/// format: json
/// ```
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileDefaults {
    pub quiet: Option<bool>,
    pub skip_files: Option<bool>,
    pub skip_content: Option<bool>,
    pub all_files: Option<bool>,
    pub extension: Option<String>,
    pub color: Option<bool>,
    pub format: Option<SummaryFormat>,
}

impl Settings {
    /// Merges the command line with the defaults file.
    ///
    /// Returns `Ok(None)` when `--from` or `--to` is missing or empty, or when
    /// they are equal. The caller then prints usage and exits without touching
    /// the tree.
    pub fn resolve(args: &Args, defaults: FileDefaults) -> Result<Option<Self>> {
        let (Some(from), Some(to)) = (args.from.as_deref(), args.to.as_deref()) else {
            return Ok(None);
        };
        if from.is_empty() || to.is_empty() {
            return Ok(None);
        }
        if from == to {
            log::warn!("--from and --to are both '{from}', nothing would change");
            return Ok(None);
        }

        let extension = args
            .extension
            .as_deref()
            .or(defaults.extension.as_deref())
            .and_then(normalize_extension);

        Ok(Some(Self {
            from: from.to_string(),
            to: to.to_string(),
            root_dir: args.dir.clone(),
            quiet: args.quiet || defaults.quiet.unwrap_or(false),
            skip_files: args.skip_files || defaults.skip_files.unwrap_or(false),
            skip_content: args.skip_content || defaults.skip_content.unwrap_or(false),
            all_files: args.all_files || defaults.all_files.unwrap_or(false),
            extension,
            color: !args.no_color && defaults.color.unwrap_or(true),
            format: args.format.or(defaults.format).unwrap_or_default(),
        }))
    }
}

/// Normalizes an extension filter so it always carries its leading dot.
///
/// An empty filter means "no filter".
pub fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "." {
        return None;
    }
    if trimmed.starts_with('.') {
        Some(trimmed.to_string())
    } else {
        Some(format!(".{trimmed}"))
    }
}

/// A utility for locating and loading the defaults file.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Finds the defaults file.
    ///
    /// An explicitly given path must exist. Without one, the per-user file
    /// `refactor/config.yaml` under `XDG_CONFIG_HOME` (or the platform config
    /// directory) is used when present.
    pub fn find_config(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(format!("Config file '{}' not found", path.display()).into());
        }

        Ok(Self::user_config_path().filter(|path| path.exists()))
    }

    fn user_config_path() -> Option<PathBuf> {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(dirs::config_dir)
            .map(|dir| dir.join("refactor").join("config.yaml"))
    }

    /// Loads `FileDefaults` from a YAML file. An empty file yields the defaults.
    pub fn load_defaults_from(path: &Path) -> Result<FileDefaults> {
        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(FileDefaults::default());
        }
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// Finds and loads the defaults file, falling back to empty defaults.
    pub fn load_defaults(explicit: Option<&Path>) -> Result<FileDefaults> {
        match Self::find_config(explicit)? {
            Some(path) => {
                log::debug!("Loading defaults from {}", path.display());
                Self::load_defaults_from(&path)
            }
            None => Ok(FileDefaults::default()),
        }
    }
}
