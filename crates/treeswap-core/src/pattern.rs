//! Compiled substitution pattern

use std::borrow::Cow;

use regex::{NoExpand, Regex};

use crate::error::{Result, RewriteError};

/// A compiled "old" pattern together with its replacement text
///
/// Built once per run and borrowed by every rewrite operation.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    replacement: String,
    expand: bool,
}

impl Pattern {
    /// Compile `old` as a regular expression
    ///
    /// `new` may reference capture groups using `$1` or `${name}`.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::EmptyPattern`] if `old` is empty and
    /// [`RewriteError::InvalidPattern`] if it does not compile.
    pub fn new(old: &str, new: &str) -> Result<Self> {
        Self::build(old, new, true)
    }

    /// Treat `old` as literal text and `new` as verbatim replacement
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::EmptyPattern`] if `old` is empty.
    pub fn literal(old: &str, new: &str) -> Result<Self> {
        Self::build(&regex::escape(old), new, false)
    }

    fn build(old: &str, new: &str, expand: bool) -> Result<Self> {
        if old.is_empty() {
            return Err(RewriteError::EmptyPattern);
        }

        Ok(Self {
            regex: Regex::new(old)?,
            replacement: new.to_string(),
            expand,
        })
    }

    /// Replace every match in `text`
    ///
    /// Returns `Cow::Borrowed` when nothing matched.
    #[must_use]
    pub fn replace<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if self.expand {
            self.regex.replace_all(text, self.replacement.as_str())
        } else {
            self.regex.replace_all(text, NoExpand(&self.replacement))
        }
    }

    /// Source of the compiled regular expression
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_all_occurrences() {
        let pattern = Pattern::new("bar", "foo").unwrap();
        assert_eq!(pattern.replace("bar bar_module"), "foo foo_module");
    }

    #[test]
    fn test_no_match_borrows() {
        let pattern = Pattern::new("bar", "foo").unwrap();
        assert!(matches!(pattern.replace("nothing here"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_capture_group_expansion() {
        let pattern = Pattern::new(r"get_(\w+)", "fetch_$1").unwrap();
        assert_eq!(pattern.replace("get_user()"), "fetch_user()");
    }

    #[test]
    fn test_literal_escapes_metacharacters() {
        let pattern = Pattern::literal("a.b", "$1").unwrap();
        assert_eq!(pattern.replace("a.b axb"), "$1 axb");
        assert!(matches!(pattern.replace("axb"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_empty_pattern_rejected() {
        assert!(matches!(Pattern::new("", "x"), Err(RewriteError::EmptyPattern)));
        assert!(matches!(
            Pattern::literal("", "x"),
            Err(RewriteError::EmptyPattern)
        ));
    }

    #[test]
    fn test_invalid_regex_rejected() {
        assert!(matches!(
            Pattern::new("(unclosed", "x"),
            Err(RewriteError::InvalidPattern(_))
        ));
    }
}
