//! @acp:module "Project Resolver"
//! @acp:summary "Maps a project token to a configured project, discovered repo or literal directory"
//! @acp:domain cli
//! @acp:layer service
//!
//! Resolution is an ordered rule table: exact key, alias, discovered repo.
//! The first rule that matches wins; when none does, the token is passed
//! through as a directory name and the caller's [`UnresolvedProject`] policy
//! decides whether that is acceptable.

use std::borrow::Cow;

use crate::config::{CommandValue, Project, Projects, UnresolvedProject};
use crate::error::{DevlocalError, Result};
use crate::index::RepoIndex;

/// How a selection was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    Exact,
    Alias,
    Repo,
    Passthrough,
}

/// @acp:summary "The resolved target of a project token"
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    /// Directory relative to `baseDir`
    pub dir: Cow<'a, str>,
    /// The configured project, if the token named one
    pub project: Option<&'a Project>,
    pub source: MatchSource,
}

impl<'a> Selection<'a> {
    /// True unless the token fell through to passthrough
    pub fn is_found(&self) -> bool {
        self.source != MatchSource::Passthrough
    }

    pub fn env(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.project
            .into_iter()
            .flat_map(|p| p.env.iter())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn init_cmds(&self) -> &'a [String] {
        self.project.map(|p| p.init_cmds.as_slice()).unwrap_or(&[])
    }

    /// Project-scoped command definition, if any
    pub fn command(&self, token: &str) -> Option<&'a CommandValue> {
        self.project.and_then(|p| p.cmds.get(token))
    }

    fn configured(project: &'a Project, source: MatchSource) -> Self {
        Self {
            dir: Cow::Borrowed(project.dir.as_str()),
            project: Some(project),
            source,
        }
    }
}

type Rule = for<'a> fn(&str, &'a Projects, &'a RepoIndex) -> Option<Selection<'a>>;

/// Resolution order; earlier rules shadow later ones
const RULES: [Rule; 3] = [by_exact_name, by_alias, by_repo];

/// @acp:summary "Resolve a project token (never fails; see `Selection::is_found`)"
pub fn resolve_project<'a>(
    token: &str,
    projects: &'a Projects,
    repos: &'a RepoIndex,
) -> Selection<'a> {
    for rule in RULES {
        if let Some(selection) = rule(token, projects, repos) {
            tracing::debug!(token, source = ?selection.source, dir = %selection.dir, "Resolved project");
            return selection;
        }
    }

    tracing::debug!(token, "No project or repo matched, passing token through");
    Selection {
        dir: Cow::Owned(token.to_string()),
        project: None,
        source: MatchSource::Passthrough,
    }
}

fn by_exact_name<'a>(token: &str, projects: &'a Projects, _: &'a RepoIndex) -> Option<Selection<'a>> {
    projects
        .get(token)
        .map(|project| Selection::configured(project, MatchSource::Exact))
}

fn by_alias<'a>(token: &str, projects: &'a Projects, _: &'a RepoIndex) -> Option<Selection<'a>> {
    projects
        .values()
        .find(|project| project.has_alias(token))
        .map(|project| Selection::configured(project, MatchSource::Alias))
}

fn by_repo<'a>(token: &str, _: &'a Projects, repos: &'a RepoIndex) -> Option<Selection<'a>> {
    repos.find(token).map(|repo| Selection {
        dir: Cow::Borrowed(repo.relative_path.as_str()),
        project: None,
        source: MatchSource::Repo,
    })
}

impl UnresolvedProject {
    /// @acp:summary "Accept or reject a passthrough selection"
    pub fn apply<'a>(self, selection: Selection<'a>, token: &str) -> Result<Selection<'a>> {
        match (self, selection.is_found()) {
            (UnresolvedProject::Error, false) => Err(DevlocalError::ProjectNotFound(token.to_string())),
            _ => Ok(selection),
        }
    }
}
