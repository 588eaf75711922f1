use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Recursive find-and-replace for file contents and names
///
/// Replaces every match of --old with --new in the contents of every file
/// below STARTING and in the names of every file and directory, including
/// STARTING itself unless --keep-root-name is given.
#[derive(Parser, Debug)]
#[command(name = "treeswap")]
#[command(about, long_about = None, version)]
#[command(after_help = "Example:\n  treeswap . --old=bar --new=foo")]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Root directory of the replacement
    #[arg(value_name = "STARTING")]
    pub starting: PathBuf,

    /// Pattern to replace (regular expression unless --literal)
    #[arg(long, value_name = "PATTERN", allow_hyphen_values = true)]
    pub old: String,

    /// Replacement text; `$1` and `${name}` refer to capture groups
    #[arg(long, value_name = "REPLACEMENT", allow_hyphen_values = true)]
    pub new: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace) and print a summary
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Preview changes without executing (dry-run)
    #[arg(long)]
    pub dry_run: bool,

    /// Show a unified diff for every file that would change
    #[arg(long, requires = "dry_run")]
    pub diff: bool,

    /// Treat --old as literal text and --new as verbatim replacement
    #[arg(long)]
    pub literal: bool,

    /// Do not rename the starting directory itself
    #[arg(long)]
    pub keep_root_name: bool,

    /// Match names against each entry's basename instead of its full path
    #[arg(long)]
    pub basename_only: bool,

    /// Skip files whose contents are not UTF-8 instead of failing
    #[arg(long)]
    pub skip_non_utf8: bool,
}
