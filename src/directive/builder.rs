//! @acp:module "Directive Builder"
//! @acp:summary "Composes navigation, env, init and command directives for one request"
//! @acp:domain cli
//! @acp:layer service

use std::path::Path;

use crate::config::{Context, UnresolvedProject};
use crate::error::Result;
use crate::index::RepoIndex;
use crate::resolve::{resolve_project, Selection};

use super::command::{resolve_command, BUILTIN_PWD};
use super::Directive;

/// @acp:summary "The (command, project) pair supplied on the command line"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    pub command: Option<String>,
    pub project: Option<String>,
}

impl Request {
    /// Empty tokens count as absent, so `dl "" web` navigates only.
    /// Anything else is kept verbatim.
    pub fn new(command: Option<String>, project: Option<String>) -> Self {
        fn token(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }
        Self {
            command: token(command),
            project: token(project),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.command.is_none() && self.project.is_none()
    }

    /// True when the shell should land in the project directory
    pub fn navigates(&self) -> bool {
        self.project.is_some() && self.command.as_deref() != Some(BUILTIN_PWD)
    }
}

/// @acp:summary "Builds directives from an immutable context"
pub struct DirectiveBuilder<'a> {
    ctx: &'a Context,
    policy: UnresolvedProject,
}

impl<'a> DirectiveBuilder<'a> {
    pub fn new(ctx: &'a Context) -> Self {
        Self {
            ctx,
            policy: ctx.config.unresolved_project,
        }
    }

    /// Override the configured unresolved-project policy
    pub fn with_policy(mut self, policy: UnresolvedProject) -> Self {
        self.policy = policy;
        self
    }

    /// @acp:summary "Resolve the project token, if any, under the active policy"
    pub fn select(&self, request: &Request, repos: &'a RepoIndex) -> Result<Option<Selection<'a>>> {
        request
            .project
            .as_deref()
            .map(|token| {
                let selection = resolve_project(token, &self.ctx.projects, repos);
                self.policy.apply(selection, token)
            })
            .transpose()
    }

    /// @acp:summary "Resolve then build"
    pub fn plan(&self, request: &Request, repos: &'a RepoIndex) -> Result<Vec<Directive>> {
        let selection = self.select(request, repos)?;
        self.build(request, selection.as_ref())
    }

    /// @acp:summary "Ordered directives for an already resolved selection"
    pub fn build(&self, request: &Request, selection: Option<&Selection<'_>>) -> Result<Vec<Directive>> {
        let mut directives = Vec::new();
        let command = request.command.as_deref();

        if let (true, Some(selection)) = (request.navigates(), selection) {
            let target = self.ctx.config.target_dir(&selection.dir);
            let has_nvmrc = Path::new(&target).join(".nvmrc").exists();

            directives.push(Directive::ChangeDir(target));
            if has_nvmrc {
                directives.push(Directive::UseNodeVersion);
            }

            for (key, value) in selection.env() {
                directives.push(Directive::export(key, value));
            }

            if command.is_none() {
                directives.extend(selection.init_cmds().iter().cloned().map(Directive::Init));
                return Ok(directives);
            }
        }

        if let Some(token) = command {
            let resolved = resolve_command(token, selection, &self.ctx.commands, &self.ctx.config)?;
            directives.push(resolved.into_directive()?);
        }

        Ok(directives)
    }
}
