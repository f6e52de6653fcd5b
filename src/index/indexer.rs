//! @acp:module "Repository Indexer"
//! @acp:summary "Discovers git repositories below the base directory"
//! @acp:domain cli
//! @acp:layer service
//!
//! Walks the base directory depth-first in directory listing order. A
//! directory holding a `.git` entry is recorded and not descended into, so
//! nested checkouts (submodules, vendored repos) never shadow their parent.

use std::io::ErrorKind;
use std::path::{Component, Path};

use walkdir::WalkDir;

use crate::error::{DevlocalError, Result};

/// @acp:summary "A discovered repository"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repo {
    /// Final path segment, lower-cased for case-insensitive lookup
    pub name: String,
    /// Location relative to the discovery root, `/`-separated
    pub relative_path: String,
}

impl Repo {
    pub fn new(name: impl Into<String>, relative_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relative_path: relative_path.into(),
        }
    }

    /// Directory holding the repo, relative to the root (empty at top level)
    pub fn parent_dir(&self) -> &str {
        self.relative_path
            .rsplit_once('/')
            .map(|(parent, _)| parent)
            .unwrap_or("")
    }
}

/// @acp:summary "Ordered list of repositories found under one root"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoIndex {
    repos: Vec<Repo>,
}

impl RepoIndex {
    pub fn new(repos: Vec<Repo>) -> Self {
        Self { repos }
    }

    /// @acp:summary "Walk `root` and record every top-most git checkout"
    /// @acp:ai-careful "Runs on every invocation; keep the walk shallow at leaves"
    pub fn discover<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(DevlocalError::RootNotFound(root.to_path_buf()));
        }

        let mut repos = Vec::new();
        let mut walker = WalkDir::new(root).into_iter();

        while let Some(next) = walker.next() {
            let entry = match next {
                Ok(entry) => entry,
                Err(e) => {
                    let not_found = e
                        .io_error()
                        .map(|io| io.kind() == ErrorKind::NotFound)
                        .unwrap_or(false);
                    if !not_found {
                        tracing::warn!("Skipping unreadable directory: {}", e);
                    }
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            if entry.path().join(".git").exists() {
                let relative = relative_path(root, entry.path());
                let name = entry.file_name().to_string_lossy().to_lowercase();
                tracing::debug!(%name, path = %relative, "Discovered repository");
                repos.push(Repo::new(name, relative));
                walker.skip_current_dir();
            }
        }

        Ok(Self { repos })
    }

    /// @acp:summary "First repo whose name matches `token` ignoring case"
    pub fn find(&self, token: &str) -> Option<&Repo> {
        let wanted = token.to_lowercase();
        self.repos.iter().find(|repo| repo.name == wanted)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Repo> {
        self.repos.iter()
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }
}

fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
