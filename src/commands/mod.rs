//! @acp:module "Commands"
//! @acp:summary "CLI command implementations"
//! @acp:domain cli
//! @acp:layer handler
//!
//! Provides implementations for all CLI commands.
//! Each command is in its own submodule for maintainability.

pub mod run;
pub mod shell_init;

pub use run::{execute_run, RunOptions};
pub use shell_init::{execute_shell_init, render_shell_init, ShellInitOptions};
