use crate::errors::{Error, Result};
use crate::prompt::Interaction;
use crate::scanner::matches_extension;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Totals of a rename pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenameStats {
    pub renamed: usize,
    pub declined: usize,
    /// Renames skipped because the target already existed.
    pub blocked: usize,
}

/// Renames files and directories whose base name contains a literal pattern.
pub struct FileRenamer {
    from: String,
    to: String,
    extension: Option<String>,
}

impl FileRenamer {
    pub fn new(from: impl Into<String>, to: impl Into<String>, extension: Option<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            extension,
        }
    }

    /// Computes the new path for `path`, or `None` if it should be left alone.
    ///
    /// Only the base name changes; every occurrence of the pattern in it is
    /// replaced.
    pub fn get_new_path(&self, path: &Path) -> Option<PathBuf> {
        if !matches_extension(path, self.extension.as_deref()) {
            return None;
        }
        let file_name = path.file_name()?.to_str()?;
        if !file_name.contains(&self.from) {
            return None;
        }
        Some(path.with_file_name(file_name.replace(&self.from, &self.to)))
    }

    /// Renames every eligible entry of `paths`, in order.
    ///
    /// `paths` is updated after each rename so that entries nested under a
    /// renamed directory keep pointing at their current location.
    pub fn rename_paths<W: Write>(
        &self,
        paths: &mut [PathBuf],
        ctx: &mut Interaction<'_, W>,
    ) -> Result<RenameStats> {
        let mut stats = RenameStats::default();

        for idx in 0..paths.len() {
            let current = paths[idx].clone();
            let Some(target) = self.get_new_path(&current) else {
                continue;
            };

            if fs::symlink_metadata(&target).is_ok() {
                log::warn!(
                    "Not renaming {}: {} already exists",
                    current.display(),
                    target.display()
                );
                let message = format!("'{}' already exists. Skipping...", target.display());
                writeln!(ctx.out, "{}\n", ctx.highlighter.notice(&message))?;
                stats.blocked += 1;
                continue;
            }

            let question = format!(
                "Rename '{}' to '{}'?",
                ctx.highlighter.old_path(&current),
                ctx.highlighter.new_path(&target)
            );
            let announcement = format!("Refactoring file '{}'...", current.display());
            if !ctx.approve(&question, &announcement)? {
                writeln!(ctx.out, "Skipping refactor for file...\n")?;
                stats.declined += 1;
                continue;
            }

            fs::rename(&current, &target).map_err(|source| Error::Rename {
                from: current.clone(),
                to: target.clone(),
                source,
            })?;
            log::info!("Renamed {} -> {}", current.display(), target.display());
            propagate_rename(paths, &current, &target);
            stats.renamed += 1;
        }

        Ok(stats)
    }
}

/// Re-points every entry at or below `old` to live under `new`.
///
/// Matching is by whole path components, so `a/foo` does not touch `a/foo2`.
pub fn propagate_rename(paths: &mut [PathBuf], old: &Path, new: &Path) {
    for path in paths.iter_mut() {
        let updated = match path.strip_prefix(old) {
            Ok(rest) if rest.as_os_str().is_empty() => new.to_path_buf(),
            Ok(rest) => new.join(rest),
            Err(_) => continue,
        };
        *path = updated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output_formatter::Highlighter;
    use crate::prompt::PromptConfirm;
    use crate::scanner::{Selection, scan, scan_with};
    use std::io::{self, Cursor};
    use tempfile::TempDir;

    fn rename_quiet(renamer: &FileRenamer, paths: &mut [PathBuf]) -> RenameStats {
        let mut out = Vec::new();
        let mut confirm = PromptConfirm::new(io::empty(), Vec::new());
        let mut ctx = Interaction::new(&mut out, &mut confirm, true, Highlighter::new(false));
        renamer.rename_paths(paths, &mut ctx).unwrap()
    }

    #[test]
    fn test_get_new_path() {
        let renamer = FileRenamer::new("old", "new", None);
        assert_eq!(
            renamer.get_new_path(Path::new("old_dir/old_old.txt")),
            Some(PathBuf::from("old_dir/new_new.txt"))
        );
        assert_eq!(renamer.get_new_path(Path::new("old_dir/plain.txt")), None);

        let filtered = FileRenamer::new("old", "new", Some(".txt".into()));
        assert_eq!(filtered.get_new_path(Path::new("report_old.java")), None);
        assert_eq!(filtered.get_new_path(Path::new("old_dir")), None);
        assert!(filtered.get_new_path(Path::new("notes_old.txt")).is_some());
    }

    #[test]
    fn test_propagate_is_component_wise() {
        let mut paths = vec![
            PathBuf::from("root/foo_old"),
            PathBuf::from("root/foo_old/inner_old.rs"),
            PathBuf::from("root/foo_old2/x_old"),
        ];

        propagate_rename(&mut paths, Path::new("root/foo_old"), Path::new("root/foo_new"));

        assert_eq!(
            paths,
            vec![
                PathBuf::from("root/foo_new"),
                PathBuf::from("root/foo_new/inner_old.rs"),
                PathBuf::from("root/foo_old2/x_old"),
            ]
        );
    }

    #[test]
    fn test_nested_directories_rename() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("proj_old/src_old")).unwrap();
        fs::write(root.join("proj_old/src_old/main_old.go"), "package main\n").unwrap();

        let mut paths = scan(root, "old", None).unwrap().all_matches;
        let stats = rename_quiet(&FileRenamer::new("old", "new", None), &mut paths);

        assert_eq!(stats.renamed, 3);
        assert_eq!(
            paths,
            vec![
                root.join("proj_new"),
                root.join("proj_new/src_new"),
                root.join("proj_new/src_new/main_new.go"),
            ]
        );
        assert!(root.join("proj_new/src_new/main_new.go").is_file());
        assert!(!root.join("proj_old").exists());
    }

    #[test]
    fn test_nested_file_without_pattern_is_tracked() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("proj_old/src_old")).unwrap();
        fs::write(root.join("proj_old/src_old/main.go"), "").unwrap();

        let mut paths = scan(root, "old", None).unwrap().all_matches;
        rename_quiet(&FileRenamer::new("old", "new", None), &mut paths);

        assert_eq!(paths, vec![root.join("proj_new"), root.join("proj_new/src_new")]);
        assert!(paths.iter().all(|p| p.exists()));
        assert!(root.join("proj_new/src_new/main.go").is_file());
    }

    #[test]
    fn test_all_files_selection_tracks_unmatched_file() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("proj_old/src_old")).unwrap();
        fs::write(root.join("proj_old/src_old/main.go"), "").unwrap();

        let mut paths = scan_with(root, Selection::Everything, None).unwrap().all_matches;
        let stats = rename_quiet(&FileRenamer::new("old", "new", None), &mut paths);

        assert_eq!(stats.renamed, 2);
        assert_eq!(
            paths,
            vec![
                root.join("proj_new"),
                root.join("proj_new/src_new"),
                root.join("proj_new/src_new/main.go"),
            ]
        );
        assert!(paths.iter().all(|p| p.exists()));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_renamed_not_followed() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("target.txt"), "old").unwrap();
        std::os::unix::fs::symlink("target.txt", root.join("link_old")).unwrap();

        let mut paths = scan(root, "old", None).unwrap().all_matches;
        rename_quiet(&FileRenamer::new("old", "new", None), &mut paths);

        let link = fs::symlink_metadata(root.join("link_new")).unwrap();
        assert!(link.file_type().is_symlink());
        assert!(fs::symlink_metadata(root.join("link_old")).is_err());
        assert_eq!(fs::read_to_string(root.join("target.txt")).unwrap(), "old");
    }

    #[test]
    fn test_second_run_finds_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("a_old/b_old")).unwrap();
        fs::write(root.join("a_old/b_old/c_old.txt"), "").unwrap();

        let mut paths = scan(root, "old", None).unwrap().all_matches;
        rename_quiet(&FileRenamer::new("old", "new", None), &mut paths);

        assert!(scan(root, "old", None).unwrap().all_matches.is_empty());
    }

    #[test]
    fn test_extension_filter_protects_other_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("report_old.java"), "old").unwrap();
        fs::write(root.join("notes_old.txt"), "old").unwrap();

        let mut paths = scan(root, "old", Some(".txt")).unwrap().all_matches;
        let stats = rename_quiet(&FileRenamer::new("old", "new", Some(".txt".into())), &mut paths);

        assert_eq!(stats.renamed, 1);
        assert!(root.join("report_old.java").exists());
        assert!(root.join("notes_new.txt").exists());
    }

    #[test]
    fn test_existing_target_is_not_clobbered() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a_old.txt"), "source").unwrap();
        fs::write(root.join("a_new.txt"), "existing").unwrap();

        let mut paths = vec![root.join("a_old.txt")];
        let stats = rename_quiet(&FileRenamer::new("old", "new", None), &mut paths);

        assert_eq!(stats.blocked, 1);
        assert_eq!(fs::read_to_string(root.join("a_new.txt")).unwrap(), "existing");
        assert_eq!(fs::read_to_string(root.join("a_old.txt")).unwrap(), "source");
    }

    #[test]
    fn test_declined_rename_keeps_children_paths() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("dir_old")).unwrap();
        fs::write(root.join("dir_old/file_old.txt"), "").unwrap();

        let mut paths = scan(root, "old", None).unwrap().all_matches;
        let mut out = Vec::new();
        let mut confirm = PromptConfirm::new(Cursor::new("n\ny\n"), Vec::new());
        let mut ctx = Interaction::new(&mut out, &mut confirm, false, Highlighter::new(false));
        let stats = FileRenamer::new("old", "new", None)
            .rename_paths(&mut paths, &mut ctx)
            .unwrap();

        assert_eq!(stats.declined, 1);
        assert_eq!(stats.renamed, 1);
        assert!(root.join("dir_old/file_new.txt").is_file());
        assert_eq!(paths[1], root.join("dir_old/file_new.txt"));
    }
}
