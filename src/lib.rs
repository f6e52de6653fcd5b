#![forbid(unsafe_code)]

//! @acp:module "devlocal Library"
//! @acp:summary "Resolve projects and commands into a script for the calling shell"
//! @acp:domain cli
//! @acp:layer api
//! @acp:stability stable
//!
//! # devlocal
//!
//! A child process cannot change its parent shell's directory or
//! environment, so devlocal writes what should happen to a script and a
//! small shell function sources it.
//!
//! ## Features
//!
//! - **Projects**: named directories with aliases, env vars and init steps
//! - **Repo discovery**: any git checkout under `baseDir` is selectable by name
//! - **Commands**: project-scoped commands shadow global ones; lists chain with `&&`
//! - **Safe output**: the script is replaced atomically and never half-written
//!
//! ## Example
//!
//! ```rust,no_run
//! use devlocal::{ConfigDir, Context, DirectiveBuilder, RepoIndex, Request, ScriptWriter};
//!
//! fn main() -> anyhow::Result<()> {
//!     let dir = ConfigDir::locate(None)?;
//!     let ctx = Context::load(&dir)?;
//!     let repos = RepoIndex::discover(ctx.config.root())?;
//!
//!     let request = Request::new(Some("test".into()), Some("web".into()));
//!     let directives = DirectiveBuilder::new(&ctx).plan(&request, &repos)?;
//!
//!     ScriptWriter::new(dir.script_path(), false).write(&directives)?;
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod config;
pub mod directive;
pub mod error;
pub mod git;
pub mod index;
pub mod resolve;
pub mod script;
pub mod usage;

// Re-exports
pub use config::{CommandValue, Commands, Config, ConfigDir, Context, Project, Projects, UnresolvedProject};
pub use directive::{resolve_command, Directive, DirectiveBuilder, Request, ResolvedCommand};
pub use error::{DevlocalError, Result};
pub use index::{Repo, RepoIndex};
pub use resolve::{resolve_project, MatchSource, Selection};
pub use script::{echo_directives, render_script, ScriptWriter, WriteOutcome};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
