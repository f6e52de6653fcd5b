//! @acp:module "Directives"
//! @acp:summary "Shell directives emitted for a resolved project/command pair"
//! @acp:domain cli
//! @acp:layer model
//!
//! A [`Directive`] is one line of the sourced script. Values are written
//! literally; env values are only double-quoted, not escaped.

pub mod builder;
pub mod command;

use std::fmt;

pub use builder::{DirectiveBuilder, Request};
pub use command::{resolve_command, CommandScope, ResolvedCommand, BUILTIN_PWD};

/// @acp:summary "One line of the generated script"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `cd <dir>`
    ChangeDir(String),
    /// `nvm use`, emitted when the target holds an `.nvmrc`
    UseNodeVersion,
    /// `export env KEY="VALUE"`
    Export { key: String, value: String },
    /// A project init step, verbatim
    Init(String),
    /// A resolved command, already flattened to one line
    Run(String),
    /// `echo <dir>` from the `pwd` builtin
    PrintDir(String),
}

impl Directive {
    pub fn export(key: impl Into<String>, value: impl Into<String>) -> Self {
        Directive::Export {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::ChangeDir(dir) => write!(f, "cd {}", dir),
            Directive::UseNodeVersion => f.write_str("nvm use"),
            Directive::Export { key, value } => write!(f, "export env {}=\"{}\"", key, value),
            Directive::Init(line) | Directive::Run(line) => f.write_str(line),
            Directive::PrintDir(dir) => write!(f, "echo {}", dir),
        }
    }
}
