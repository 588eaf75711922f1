//! Options controlling a rewrite run
//!
//! The defaults reproduce the plain `treeswap <root> --old --new` behavior:
//! names are matched against the full path below the root's parent, the root
//! directory itself is renamed, and non-UTF-8 file contents are an error.

/// Which part of a path the pattern sees when computing a new name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameScope {
    /// Match against the whole path relative to the root's parent
    #[default]
    FullPath,
    /// Match against the entry's own final component only
    Basename,
}

/// Configuration for a [`TreeRewriter`](crate::TreeRewriter) run
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct RewriteOptions {
    /// Compute edits and renames without touching the filesystem
    pub dry_run: bool,
    /// Rewrite the root directory's own name before traversal
    pub rename_root: bool,
    /// Path portion used for name substitution
    pub name_scope: NameScope,
    /// Skip files whose contents are not UTF-8 instead of failing
    pub skip_non_utf8: bool,
    /// Record a unified diff for every content edit
    pub capture_diffs: bool,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            rename_root: true,
            name_scope: NameScope::FullPath,
            skip_non_utf8: false,
            capture_diffs: false,
        }
    }
}

impl RewriteOptions {
    /// Create options with default behavior
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable dry-run mode
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Choose whether the root directory name is rewritten
    #[must_use]
    pub const fn with_rename_root(mut self, rename_root: bool) -> Self {
        self.rename_root = rename_root;
        self
    }

    /// Set the name substitution scope
    #[must_use]
    pub const fn with_name_scope(mut self, name_scope: NameScope) -> Self {
        self.name_scope = name_scope;
        self
    }

    /// Skip non-UTF-8 files instead of failing on them
    #[must_use]
    pub const fn with_skip_non_utf8(mut self, skip: bool) -> Self {
        self.skip_non_utf8 = skip;
        self
    }

    /// Record unified diffs for content edits
    #[must_use]
    pub const fn with_capture_diffs(mut self, capture: bool) -> Self {
        self.capture_diffs = capture;
        self
    }
}
