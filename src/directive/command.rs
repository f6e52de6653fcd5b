//! @acp:module "Command Resolver"
//! @acp:summary "Project command → global command → pwd builtin"
//! @acp:domain cli
//! @acp:layer service

use crate::config::{CommandValue, Commands, Config};
use crate::error::{DevlocalError, Result};
use crate::resolve::Selection;

use super::Directive;

/// Built-in command printing the selected project's absolute directory
pub const BUILTIN_PWD: &str = "pwd";

/// Where a configured command was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandScope {
    Project,
    Global,
}

/// @acp:summary "Outcome of command resolution"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedCommand<'a> {
    Configured {
        name: String,
        value: &'a CommandValue,
        scope: CommandScope,
    },
    /// The `pwd` builtin, carrying the absolute directory to print
    PrintDir(String),
}

impl ResolvedCommand<'_> {
    /// @acp:summary "Flatten into a single directive"
    pub fn into_directive(self) -> Result<Directive> {
        match self {
            ResolvedCommand::Configured { name, value, .. } => value
                .flatten()
                .map(Directive::Run)
                .ok_or(DevlocalError::EmptyCommand(name)),
            ResolvedCommand::PrintDir(dir) => Ok(Directive::PrintDir(dir)),
        }
    }
}

/// @acp:summary "Resolve a command token against the selection and the global registry"
///
/// A project that defines `token` at all shadows the global registry for
/// that token. `pwd` is only used when neither defines it.
pub fn resolve_command<'a>(
    token: &str,
    selection: Option<&Selection<'a>>,
    registry: &'a Commands,
    config: &Config,
) -> Result<ResolvedCommand<'a>> {
    if let Some(value) = selection.and_then(|s| s.command(token)) {
        return Ok(configured(token, value, CommandScope::Project));
    }

    if let Some(value) = registry.get(token) {
        return Ok(configured(token, value, CommandScope::Global));
    }

    if token == BUILTIN_PWD {
        let dir = match selection {
            Some(selection) => config.target_dir(&selection.dir),
            None => config.root(),
        };
        return Ok(ResolvedCommand::PrintDir(dir));
    }

    Err(DevlocalError::CommandNotFound(token.to_string()))
}

fn configured<'a>(token: &str, value: &'a CommandValue, scope: CommandScope) -> ResolvedCommand<'a> {
    tracing::debug!(command = token, ?scope, "Resolved command");
    ResolvedCommand::Configured {
        name: token.to_string(),
        value,
        scope,
    }
}
