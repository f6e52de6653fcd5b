//! @acp:module "Run Command"
//! @acp:summary "Resolve (command, project) and write the script for the shell wrapper"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Implements `devlocal <command> [<project>]`, and the usage listing when
//! both are omitted.

use anyhow::{Context as _, Result};
use console::style;

use crate::config::{ConfigDir, Context, UnresolvedProject};
use crate::directive::{DirectiveBuilder, Request};
use crate::git;
use crate::index::RepoIndex;
use crate::script::{ScriptWriter, WriteOutcome};
use crate::usage::render_usage;

/// Options for the run command
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Command token (project, global or `pwd`)
    pub command: Option<String>,
    /// Project token (name, alias or repository)
    pub project: Option<String>,
    /// Where the YAML files and `commands.sh` live
    pub config_dir: ConfigDir,
    /// Print directives even if config.yml says otherwise
    pub verbose: bool,
    /// Override for `unresolvedProject`
    pub unresolved: Option<UnresolvedProject>,
}

/// Execute the run command
pub fn execute_run(options: RunOptions) -> Result<()> {
    let config_dir = &options.config_dir;

    let created = config_dir
        .bootstrap()
        .with_context(|| format!("Failed to set up {}", config_dir.path().display()))?;
    for path in &created {
        eprintln!("{} Created {}", style("✓").green(), path.display());
    }

    config_dir
        .clear_stale_script()
        .context("Failed to remove previous commands.sh")?;

    let ctx = Context::load(config_dir)?;
    let repos = RepoIndex::discover(ctx.config.root())?;
    let request = Request::new(options.command, options.project);

    if request.is_empty() {
        print!(
            "{}",
            render_usage(&repos, &ctx.projects, &ctx.commands, &ctx.config)
        );
        println!();
        return Ok(());
    }

    let mut builder = DirectiveBuilder::new(&ctx);
    if let Some(policy) = options.unresolved {
        builder = builder.with_policy(policy);
    }

    let selection = builder.select(&request, &repos)?;
    let directives = builder.build(&request, selection.as_ref())?;

    if request.command.is_none() {
        if let Some(selection) = &selection {
            git::show_branch(ctx.config.target_dir(&selection.dir));
        }
    }

    let writer = ScriptWriter::new(config_dir.script_path(), options.verbose || ctx.config.verbose);
    if let WriteOutcome::Written(count) = writer.write(&directives)? {
        tracing::debug!(count, path = %writer.path().display(), "Script ready");
    }

    Ok(())
}
