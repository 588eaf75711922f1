//! In-place content substitution for regular files

use std::borrow::Cow;
use std::fmt::Write;
use std::fs;
use std::path::Path;

use similar::{ChangeTag, TextDiff};
use tracing::{debug, warn};

use crate::error::{Result, RewriteError};
use crate::options::RewriteOptions;
use crate::pattern::Pattern;
use crate::report::ContentEdit;

const DIFF_CONTEXT_LINES: usize = 3;

/// What happened to a single file's contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ContentOutcome {
    /// No match, file left untouched
    Unchanged,
    /// Contents rewritten (or would be, in dry-run mode)
    Modified(ContentEdit),
    /// Contents are not UTF-8 and skipping was requested
    Skipped,
}

/// Rewrite the file at `path`, writing back only when something changed
///
/// `display_path` names the file in the returned edit and in diffs.
pub(crate) fn rewrite_file(
    pattern: &Pattern,
    options: &RewriteOptions,
    path: &Path,
    display_path: &Path,
) -> Result<ContentOutcome> {
    let bytes = fs::read(path)?;
    let Ok(contents) = String::from_utf8(bytes) else {
        if options.skip_non_utf8 {
            warn!(path = %display_path.display(), "skipping non-UTF-8 file");
            return Ok(ContentOutcome::Skipped);
        }
        return Err(RewriteError::NonUtf8Content(display_path.to_path_buf()));
    };

    let rewritten = match pattern.replace(&contents) {
        Cow::Borrowed(_) => return Ok(ContentOutcome::Unchanged),
        Cow::Owned(rewritten) if rewritten == contents => return Ok(ContentOutcome::Unchanged),
        Cow::Owned(rewritten) => rewritten,
    };

    let diff = options
        .capture_diffs
        .then(|| unified_diff(&contents, &rewritten, display_path));

    if !options.dry_run {
        fs::write(path, &rewritten)?;
    }
    debug!(path = %display_path.display(), dry_run = options.dry_run, "rewrote contents");

    Ok(ContentOutcome::Modified(ContentEdit {
        path: display_path.to_path_buf(),
        diff,
    }))
}

/// Plain unified diff between the old and new contents of `path`
pub(crate) fn unified_diff(before: &str, after: &str, path: &Path) -> String {
    let diff = TextDiff::from_lines(before, after);
    let mut output = String::new();

    let _ = writeln!(output, "--- {}", path.display());
    let _ = writeln!(output, "+++ {}", path.display());

    for (idx, group) in diff.grouped_ops(DIFF_CONTEXT_LINES).iter().enumerate() {
        if idx > 0 {
            output.push_str("...\n");
        }

        for op in group {
            for change in diff.iter_changes(op) {
                let sign = match change.tag() {
                    ChangeTag::Delete => "-",
                    ChangeTag::Insert => "+",
                    ChangeTag::Equal => " ",
                };
                let newline = if change.value().ends_with('\n') {
                    ""
                } else {
                    "\n"
                };

                let _ = write!(output, "{sign}{}{newline}", change.value());
            }
        }
    }

    output
}
