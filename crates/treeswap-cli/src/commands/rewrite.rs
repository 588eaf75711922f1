use anyhow::Context;
use tracing::debug;
use treeswap_core::{NameScope, Pattern, RewriteOptions, RewriteReporter, TreeRewriter};

use crate::cli::Cli;

pub struct Rewrite;

impl Rewrite {
    pub fn execute(cli: &Cli) -> anyhow::Result<()> {
        debug!(
            starting = %cli.starting.display(),
            old = %cli.old,
            new = %cli.new,
            literal = cli.literal,
            "executing rewrite command"
        );

        let pattern = Self::build_pattern(cli).context("Invalid --old pattern")?;
        let options = Self::build_options(cli);
        let rewriter = TreeRewriter::new(pattern, options);
        debug!(
            regex = rewriter.pattern().as_str(),
            options = ?rewriter.options(),
            "built rewriter"
        );

        let result = rewriter.run(&cli.starting)?;

        // Success is silent unless a preview or summary was asked for.
        if cli.dry_run || cli.verbose > 0 {
            print!("{}", RewriteReporter::generate_plan(&result));
            println!("{}", RewriteReporter::generate_summary(&result));
        }

        Ok(())
    }

    fn build_pattern(cli: &Cli) -> treeswap_core::Result<Pattern> {
        if cli.literal {
            Pattern::literal(&cli.old, &cli.new)
        } else {
            Pattern::new(&cli.old, &cli.new)
        }
    }

    fn build_options(cli: &Cli) -> RewriteOptions {
        let name_scope = if cli.basename_only {
            NameScope::Basename
        } else {
            NameScope::FullPath
        };

        RewriteOptions::new()
            .with_dry_run(cli.dry_run)
            .with_rename_root(!cli.keep_root_name)
            .with_name_scope(name_scope)
            .with_skip_non_utf8(cli.skip_non_utf8)
            .with_capture_diffs(cli.diff)
    }
}
