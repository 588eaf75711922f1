//! Tree traversal that renames while walking
//!
//! Directories are processed from an explicit stack. Each pending entry
//! carries the directory's on-disk path and its logical path (the path it
//! has once every rename so far is applied). Child paths are always derived
//! from the post-rename parent, so nothing stale survives a rename.

mod content;
mod rename;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, trace};

use crate::error::{Result, RewriteError};
use crate::options::{NameScope, RewriteOptions};
use crate::pattern::Pattern;
use crate::report::{EntryKind, Rename, RewriteResult};
use content::ContentOutcome;
use rename::RenameExecutor;

/// A directory waiting on the traversal stack
#[derive(Debug, Clone)]
struct PendingDir {
    /// Where the directory currently lives on disk
    disk: PathBuf,
    /// Where it lives after renames; equal to `disk` outside dry runs
    logical: PathBuf,
}

impl PendingDir {
    fn same(path: PathBuf) -> Self {
        Self {
            disk: path.clone(),
            logical: path,
        }
    }
}

/// Mutable state owned by a single run
struct RunState {
    /// Directory that full-path matching is relative to
    base: PathBuf,
    executor: RenameExecutor,
    result: RewriteResult,
}

impl RunState {
    fn new(base: PathBuf, dry_run: bool) -> Self {
        Self {
            base,
            executor: RenameExecutor::new(dry_run),
            result: RewriteResult {
                dry_run,
                ..RewriteResult::default()
            },
        }
    }
}

/// Rewrites file contents and names below a root directory
pub struct TreeRewriter {
    pattern: Pattern,
    options: RewriteOptions,
}

impl TreeRewriter {
    /// Create a rewriter for a compiled pattern
    #[must_use]
    pub const fn new(pattern: Pattern, options: RewriteOptions) -> Self {
        Self { pattern, options }
    }

    /// The pattern applied by this rewriter
    #[must_use]
    pub const fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// The options this rewriter runs with
    #[must_use]
    pub const fn options(&self) -> &RewriteOptions {
        &self.options
    }

    /// Rewrite the whole tree under `root`
    ///
    /// The root's own name is rewritten first (unless disabled), then every
    /// directory is given a shallow rewrite in depth-first order. A failure
    /// stops the run and leaves earlier changes in place.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::NotADirectory`] if `root` is not a directory,
    /// [`RewriteError::Collision`] if a rename target already exists, and
    /// propagates any I/O error.
    pub fn run(&self, root: &Path) -> Result<RewriteResult> {
        let root = resolve_dir(root)?;
        let mut state = RunState::new(self.base_for(&root), self.options.dry_run);

        info!(
            root = %root.display(),
            pattern = self.pattern.as_str(),
            dry_run = self.options.dry_run,
            "starting rewrite"
        );

        let mut stack = vec![self.prepare_root(root, &mut state)?];
        while let Some(dir) = stack.pop() {
            let children = self.rewrite_level(&dir, &mut state)?;
            // Reverse so siblings pop in name order.
            stack.extend(children.into_iter().rev());
        }

        let result = state.result;
        info!(
            directories = result.directories_visited,
            modified = result.files_modified(),
            renamed = result.paths_renamed(),
            "rewrite finished"
        );

        Ok(result)
    }

    /// Rewrite the root directory's own name
    ///
    /// Returns the path traversal should start from: the renamed root, or
    /// the unchanged root in dry-run mode or when root renaming is off.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::NotADirectory`] if `root` is not a directory,
    /// [`RewriteError::Collision`] if the new name is taken, and propagates
    /// any I/O error.
    pub fn rename_root(&self, root: &Path) -> Result<PathBuf> {
        let root = resolve_dir(root)?;
        let base = root.parent().unwrap_or(&root).to_path_buf();
        let mut state = RunState::new(base, self.options.dry_run);

        Ok(self.prepare_root(root, &mut state)?.disk)
    }

    /// Rewrite the immediate children of `dir` only
    ///
    /// The directory itself is never renamed, so name matching is relative to
    /// `dir` and its own segment never appears in a child's matched text.
    /// Returns the on-disk paths of the
    /// child directories after renaming, together with the run statistics.
    ///
    /// # Errors
    ///
    /// Same as [`TreeRewriter::run`], except the directory itself is never
    /// renamed.
    pub fn rewrite_shallow(&self, dir: &Path) -> Result<(Vec<PathBuf>, RewriteResult)> {
        let dir = resolve_dir(dir)?;
        let mut state = RunState::new(dir.clone(), self.options.dry_run);

        let children = self.rewrite_level(&PendingDir::same(dir), &mut state)?;
        let paths = children.into_iter().map(|child| child.disk).collect();

        Ok((paths, state.result))
    }

    /// Directory that full-path matching is relative to
    ///
    /// When the root keeps its name, its own segment is left out of the
    /// matched text so it can never be rewritten through a child's path.
    fn base_for(&self, root: &Path) -> PathBuf {
        if self.options.rename_root {
            root.parent().unwrap_or(root).to_path_buf()
        } else {
            root.to_path_buf()
        }
    }

    fn prepare_root(&self, root: PathBuf, state: &mut RunState) -> Result<PendingDir> {
        if !self.options.rename_root {
            return Ok(PendingDir::same(root));
        }

        // Only the basename is rewritten; the parent stays fixed.
        let Some(target) =
            rename::target_path(&self.pattern, NameScope::Basename, &state.base, &root)
        else {
            return Ok(PendingDir::same(root));
        };

        state.executor.execute(&root, &root, &target)?;
        state.result.renames.push(Rename {
            from: root.clone(),
            to: target.clone(),
            kind: EntryKind::Dir,
        });

        let disk = if self.options.dry_run { root } else { target.clone() };
        Ok(PendingDir {
            disk,
            logical: target,
        })
    }

    /// One shallow rewrite: contents first, then names, then child discovery
    fn rewrite_level(&self, dir: &PendingDir, state: &mut RunState) -> Result<Vec<PendingDir>> {
        trace!(dir = %dir.logical.display(), "visiting directory");

        let meta = fs::symlink_metadata(&dir.disk)?;
        if !meta.is_dir() {
            return Err(RewriteError::NotADirectory(dir.logical.clone()));
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&dir.disk)? {
            let entry = entry?;
            entries.push((entry.file_name(), entry_kind(&entry.file_type()?)));
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        for (name, kind) in &entries {
            if *kind != EntryKind::File {
                continue;
            }
            state.result.files_scanned += 1;
            let disk = dir.disk.join(name);
            let logical = dir.logical.join(name);
            match content::rewrite_file(&self.pattern, &self.options, &disk, &logical)? {
                ContentOutcome::Unchanged => {}
                ContentOutcome::Modified(edit) => state.result.edits.push(edit),
                ContentOutcome::Skipped => state.result.files_skipped += 1,
            }
        }

        let mut children = Vec::new();
        for (name, kind) in entries {
            let disk = dir.disk.join(&name);
            let logical = dir.logical.join(&name);

            let child = match rename::target_path(
                &self.pattern,
                self.options.name_scope,
                &state.base,
                &logical,
            ) {
                Some(target) => {
                    state.executor.execute(&disk, &logical, &target)?;
                    state.result.renames.push(Rename {
                        from: logical,
                        to: target.clone(),
                        kind,
                    });
                    let disk = if self.options.dry_run { disk } else { target.clone() };
                    PendingDir {
                        disk,
                        logical: target,
                    }
                }
                None => PendingDir { disk, logical },
            };

            if kind == EntryKind::Dir {
                children.push(child);
            }
        }

        state.result.directories_visited += 1;
        Ok(children)
    }
}

/// Check that `path` is a directory and make it absolute
fn resolve_dir(path: &Path) -> Result<PathBuf> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(dunce::canonicalize(path)?),
        _ => Err(RewriteError::NotADirectory(path.to_path_buf())),
    }
}

fn entry_kind(file_type: &fs::FileType) -> EntryKind {
    if file_type.is_symlink() {
        EntryKind::Symlink
    } else if file_type.is_dir() {
        EntryKind::Dir
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    }
}
