//! Rewrite run statistics and summary reporting

use std::fmt::Write;
use std::path::PathBuf;

/// Kind of filesystem entry involved in a rename
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Dir,
    /// Symbolic link (never followed)
    Symlink,
    /// Anything else (sockets, fifos, devices)
    Other,
}

impl EntryKind {
    /// Short label used in reports
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Dir => "dir",
            Self::Symlink => "symlink",
            Self::Other => "other",
        }
    }
}

/// A rename performed (or planned, in dry-run mode)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    /// Path before the rename
    pub from: PathBuf,
    /// Path after the rename
    pub to: PathBuf,
    /// Kind of entry renamed
    pub kind: EntryKind,
}

/// A content edit performed (or planned) on a regular file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentEdit {
    /// File path at the time it was edited
    pub path: PathBuf,
    /// Unified diff of the edit, when diffs are captured
    pub diff: Option<String>,
}

/// Outcome of a rewrite run
#[derive(Debug, Clone, Default)]
pub struct RewriteResult {
    /// Directories processed by a shallow rewrite
    pub directories_visited: usize,
    /// Regular files whose contents were read
    pub files_scanned: usize,
    /// Files skipped because their contents are not UTF-8
    pub files_skipped: usize,
    /// Content edits, in processing order
    pub edits: Vec<ContentEdit>,
    /// Renames, in processing order
    pub renames: Vec<Rename>,
    /// Whether this run was a dry run
    pub dry_run: bool,
}

impl RewriteResult {
    /// Number of files whose contents changed
    #[must_use]
    pub fn files_modified(&self) -> usize {
        self.edits.len()
    }

    /// Number of entries renamed
    #[must_use]
    pub fn paths_renamed(&self) -> usize {
        self.renames.len()
    }

    /// Whether the run changed (or would change) anything
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.edits.is_empty() || !self.renames.is_empty()
    }
}

/// Rewrite run reporter
pub struct RewriteReporter;

impl RewriteReporter {
    /// One line per planned action, prefixed like the dry-run executor output
    #[must_use]
    pub fn generate_plan(result: &RewriteResult) -> String {
        let mut output = String::new();
        let prefix = if result.dry_run {
            "[DRY RUN] Would "
        } else {
            ""
        };

        for edit in &result.edits {
            let verb = if result.dry_run { "modify" } else { "Modified" };
            let _ = writeln!(output, "{prefix}{verb}: {}", edit.path.display());
            if let Some(diff) = &edit.diff {
                output.push_str(diff);
            }
        }

        for rename in &result.renames {
            let verb = if result.dry_run { "rename" } else { "Renamed" };
            let _ = writeln!(
                output,
                "{prefix}{verb} {}: {} -> {}",
                rename.kind.label(),
                rename.from.display(),
                rename.to.display()
            );
        }

        output
    }

    /// Generate a summary report
    #[must_use]
    pub fn generate_summary(result: &RewriteResult) -> String {
        let mut output = String::new();

        if result.dry_run {
            output.push_str("\n=== Rewrite Summary (dry run) ===\n");
        } else {
            output.push_str("\n=== Rewrite Summary ===\n");
        }
        let _ = writeln!(output, "Directories: {}", result.directories_visited);
        let _ = writeln!(output, "Scanned:     {}", result.files_scanned);
        let _ = writeln!(output, "Modified:    {}", result.files_modified());
        let _ = writeln!(output, "Renamed:     {}", result.paths_renamed());
        if result.files_skipped > 0 {
            let _ = writeln!(output, "Skipped:     {} (not UTF-8)", result.files_skipped);
        }

        if result.has_changes() {
            output.push_str("Status: ✓ Rewritten\n");
        } else {
            output.push_str("Status: ✓ Nothing to change\n");
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result(dry_run: bool) -> RewriteResult {
        RewriteResult {
            directories_visited: 3,
            files_scanned: 5,
            files_skipped: 0,
            edits: vec![ContentEdit {
                path: PathBuf::from("root/foo.py"),
                diff: None,
            }],
            renames: vec![Rename {
                from: PathBuf::from("root/bar.py"),
                to: PathBuf::from("root/foo.py"),
                kind: EntryKind::File,
            }],
            dry_run,
        }
    }

    #[test]
    fn test_summary_counts() {
        let summary = RewriteReporter::generate_summary(&sample_result(false));

        assert!(summary.contains("Directories: 3"));
        assert!(summary.contains("Scanned:     5"));
        assert!(summary.contains("Modified:    1"));
        assert!(summary.contains("Renamed:     1"));
        assert!(!summary.contains("Skipped"));
        assert!(summary.contains("✓ Rewritten"));
    }

    #[test]
    fn test_summary_without_changes() {
        let summary = RewriteReporter::generate_summary(&RewriteResult::default());
        assert!(summary.contains("Nothing to change"));
    }

    #[test]
    fn test_plan_dry_run_prefix() {
        let plan = RewriteReporter::generate_plan(&sample_result(true));

        assert!(plan.contains("[DRY RUN] Would modify: root/foo.py"));
        assert!(plan.contains("[DRY RUN] Would rename file: root/bar.py -> root/foo.py"));
    }

    #[test]
    fn test_plan_real_run() {
        let plan = RewriteReporter::generate_plan(&sample_result(false));

        assert!(plan.contains("Modified: root/foo.py"));
        assert!(plan.contains("Renamed file: root/bar.py -> root/foo.py"));
        assert!(!plan.contains("DRY RUN"));
    }
}
