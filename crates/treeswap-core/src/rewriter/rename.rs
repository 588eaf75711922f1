//! Rename target computation and collision-checked moves

use std::borrow::Cow;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, RewriteError};
use crate::options::NameScope;
use crate::pattern::Pattern;

/// Compute the new path for `logical`, or `None` when the name is unchanged
///
/// With [`NameScope::FullPath`] the pattern sees the path relative to `base`,
/// so components above the traversal base are never rewritten.
pub(crate) fn target_path(
    pattern: &Pattern,
    scope: NameScope,
    base: &Path,
    logical: &Path,
) -> Option<PathBuf> {
    match scope {
        NameScope::FullPath => {
            let relative = logical.strip_prefix(base).ok()?;
            let text = utf8_or_warn(relative, logical)?;
            changed(pattern.replace(text), text).map(|new| base.join(new))
        }
        NameScope::Basename => {
            let name = logical.file_name()?;
            let text = utf8_or_warn(Path::new(name), logical)?;
            let parent = logical.parent()?;
            changed(pattern.replace(text), text).map(|new| parent.join(new))
        }
    }
}

fn utf8_or_warn<'p>(text: &'p Path, full: &Path) -> Option<&'p str> {
    let text = text.to_str();
    if text.is_none() {
        warn!(path = %full.display(), "skipping rename of non-UTF-8 path");
    }
    text
}

fn changed(replaced: Cow<'_, str>, original: &str) -> Option<String> {
    match replaced {
        Cow::Borrowed(_) => None,
        Cow::Owned(new) if new == original => None,
        Cow::Owned(new) => Some(new),
    }
}

/// Moves entries, refusing to overwrite anything that already exists
pub(crate) struct RenameExecutor {
    dry_run: bool,
    /// Destinations claimed by earlier planned renames (dry run only)
    planned: HashSet<PathBuf>,
    /// Paths that earlier planned renames moved away from (dry run only)
    vacated: HashSet<PathBuf>,
}

impl RenameExecutor {
    pub(crate) fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            planned: HashSet::new(),
            vacated: HashSet::new(),
        }
    }

    /// Move `from` (on disk) to `to`
    ///
    /// `logical_from` is only used for error reporting, so a dry run reports
    /// the path the entry would have had at that point.
    pub(crate) fn execute(&mut self, from: &Path, logical_from: &Path, to: &Path) -> Result<()> {
        if self.is_taken(to)? {
            return Err(RewriteError::Collision {
                from: logical_from.to_path_buf(),
                to: to.to_path_buf(),
            });
        }

        if self.dry_run {
            self.planned.insert(to.to_path_buf());
            self.vacated.insert(logical_from.to_path_buf());
        } else {
            fs::rename(from, to)?;
        }
        debug!(from = %logical_from.display(), to = %to.display(), dry_run = self.dry_run, "renamed");

        Ok(())
    }

    /// Whether `path` is occupied once every earlier rename is applied
    fn is_taken(&self, path: &Path) -> Result<bool> {
        if self.planned.contains(path) {
            return Ok(true);
        }
        if self.vacated.contains(path) {
            return Ok(false);
        }
        Self::exists(path)
    }

    fn exists(path: &Path) -> Result<bool> {
        match fs::symlink_metadata(path) {
            Ok(_) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn pattern() -> Pattern {
        Pattern::new("bar", "foo").unwrap()
    }

    #[test]
    fn test_full_path_rewrites_every_segment_below_base() {
        let base = Path::new("/work");
        let target = target_path(
            &pattern(),
            NameScope::FullPath,
            base,
            Path::new("/work/bar_root/bar/bar.txt"),
        );

        assert_eq!(target, Some(PathBuf::from("/work/foo_root/foo/foo.txt")));
    }

    #[test]
    fn test_full_path_ignores_components_above_base() {
        let target = target_path(
            &pattern(),
            NameScope::FullPath,
            Path::new("/bar"),
            Path::new("/bar/root/file.txt"),
        );

        assert_eq!(target, None);
    }

    #[test]
    fn test_basename_scope_leaves_parents_alone() {
        let target = target_path(
            &pattern(),
            NameScope::Basename,
            Path::new("/work"),
            Path::new("/work/bar_root/bar.txt"),
        );

        assert_eq!(target, Some(PathBuf::from("/work/bar_root/foo.txt")));
    }

    #[test]
    fn test_identity_replacement_is_unchanged() {
        let pattern = Pattern::new("bar", "bar").unwrap();
        let target = target_path(
            &pattern,
            NameScope::FullPath,
            Path::new("/work"),
            Path::new("/work/bar"),
        );

        assert_eq!(target, None);
    }

    #[test]
    fn test_execute_moves_entry() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("bar.txt");
        let to = tmp.path().join("foo.txt");
        fs::write(&from, "x").unwrap();

        RenameExecutor::new(false).execute(&from, &from, &to).unwrap();

        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "x");
    }

    #[test]
    fn test_execute_refuses_existing_destination() {
        let tmp = TempDir::new().unwrap();
        let from = tmp.path().join("bar.txt");
        let to = tmp.path().join("foo.txt");
        fs::write(&from, "from").unwrap();
        fs::write(&to, "to").unwrap();

        let err = RenameExecutor::new(false)
            .execute(&from, &from, &to)
            .unwrap_err();

        assert!(matches!(err, RewriteError::Collision { .. }));
        assert_eq!(fs::read_to_string(&from).unwrap(), "from");
        assert_eq!(fs::read_to_string(&to).unwrap(), "to");
    }

    #[test]
    fn test_dry_run_tracks_planned_destinations() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        let to = tmp.path().join("c");
        fs::write(&a, "").unwrap();
        fs::write(&b, "").unwrap();

        let mut executor = RenameExecutor::new(true);
        executor.execute(&a, &a, &to).unwrap();
        assert!(a.exists());
        assert!(!to.exists());

        let err = executor.execute(&b, &b, &to).unwrap_err();
        assert!(matches!(err, RewriteError::Collision { .. }));
    }

    #[test]
    fn test_dry_run_target_freed_by_earlier_rename() {
        let tmp = TempDir::new().unwrap();
        let aab = tmp.path().join("aab");
        let aabb = tmp.path().join("aabb");
        fs::write(&aab, "").unwrap();
        fs::write(&aabb, "").unwrap();

        let mut executor = RenameExecutor::new(true);
        executor.execute(&aab, &aab, &tmp.path().join("aa")).unwrap();
        executor.execute(&aabb, &aabb, &aab).unwrap();

        assert!(aab.exists());
        assert!(aabb.exists());
    }
}
