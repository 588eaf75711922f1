use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while compiling a pattern or rewriting a tree
#[derive(Debug, Error)]
pub enum RewriteError {
    /// The root, or a path popped for traversal, is not a directory
    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A computed rename target already exists
    #[error("cannot rename {} to {}: destination already exists", .from.display(), .to.display())]
    Collision {
        /// Path being renamed
        from: PathBuf,
        /// Destination that is already taken
        to: PathBuf,
    },

    /// A regular file whose contents are not valid UTF-8
    #[error("file is not valid UTF-8: {}", .0.display())]
    NonUtf8Content(PathBuf),

    /// The old pattern was empty
    #[error("pattern must not be empty")]
    EmptyPattern,

    /// The old pattern failed to compile
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Underlying filesystem failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias using [`RewriteError`]
pub type Result<T> = std::result::Result<T, RewriteError>;

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    #[test]
    fn test_io_error_is_transparent() {
        let err = RewriteError::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert_eq!(err.to_string(), "denied");
    }

    #[test]
    fn test_collision_message_names_both_paths() {
        let err = RewriteError::Collision {
            from: PathBuf::from("/tmp/a/bar"),
            to: PathBuf::from("/tmp/a/foo"),
        };
        let message = err.to_string();
        assert!(message.contains("/tmp/a/bar"));
        assert!(message.contains("/tmp/a/foo"));
        assert!(message.contains("already exists"));
    }
}
