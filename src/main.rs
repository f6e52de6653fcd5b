#![forbid(unsafe_code)]
//! devlocal Command Line Interface

use std::path::PathBuf;

use clap::Parser;
use console::style;
use tracing_subscriber::EnvFilter;

use devlocal::commands::{execute_run, execute_shell_init, RunOptions, ShellInitOptions};
use devlocal::{ConfigDir, UnresolvedProject};

#[derive(Parser)]
#[command(name = "devlocal")]
#[command(about = "Navigate between projects, set env variables and run commands")]
#[command(version)]
struct Cli {
    /// Command to run (project command, general command or `pwd`)
    command: Option<String>,

    /// Project name, alias or repository to switch to
    project: Option<String>,

    /// Config directory holding the YAML files and commands.sh
    #[arg(long, env = "DEVLOCAL_HOME")]
    config_dir: Option<PathBuf>,

    /// Print the generated directives
    #[arg(short, long)]
    verbose: bool,

    /// What to do when the project matches nothing (overrides config.yml)
    #[arg(long, value_enum)]
    unresolved: Option<UnresolvedArg>,

    /// Print the dl/go shell functions and exit
    #[arg(long, conflicts_with_all = ["command", "project"])]
    shell_init: bool,
}

/// Unresolved project policy
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum UnresolvedArg {
    Error,
    Passthrough,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("DEVLOCAL_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", style("✗").red(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_dir = ConfigDir::locate(cli.config_dir)?;

    if cli.shell_init {
        return execute_shell_init(ShellInitOptions {
            config_dir,
            binary: env!("CARGO_BIN_NAME").to_string(),
        });
    }

    let unresolved = cli.unresolved.map(|arg| match arg {
        UnresolvedArg::Error => UnresolvedProject::Error,
        UnresolvedArg::Passthrough => UnresolvedProject::Passthrough,
    });

    execute_run(RunOptions {
        command: cli.command,
        project: cli.project,
        config_dir,
        verbose: cli.verbose,
        unresolved,
    })
}
