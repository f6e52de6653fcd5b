//! @acp:module "Configuration"
//! @acp:summary "Config, project and command registries loaded from the config directory"
//! @acp:domain cli
//! @acp:layer config
//!
//! Everything here is read once per invocation and then only borrowed.
//! [`Context`] bundles the three parsed files and is passed explicitly to
//! the resolvers and the directive builder.

pub mod dir;
pub mod project;

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{DevlocalError, Result};

pub use dir::ConfigDir;
pub use project::{CommandValue, Commands, Project, Projects};

/// @acp:summary "Global settings from config.yml"
/// @acp:lock normal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Root directory for projects and repository discovery
    pub base_dir: String,

    /// Echo generated directives to stdout (accepts `true`/`false` or `0`/`1`)
    #[serde(default, deserialize_with = "flag")]
    pub verbose: bool,

    /// `[from, to]` replacement applied to directories in the project listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_listing_dir_alias: Option<(String, String)>,

    /// Behavior when a project token matches nothing
    #[serde(default)]
    pub unresolved_project: UnresolvedProject,
}

impl Config {
    pub fn new(base_dir: impl Into<String>) -> Self {
        Self {
            base_dir: base_dir.into(),
            verbose: false,
            repo_listing_dir_alias: None,
            unresolved_project: UnresolvedProject::default(),
        }
    }

    /// @acp:summary "Base directory with `~` expanded and trailing slashes removed"
    pub fn root(&self) -> String {
        let expanded = expand_home(&self.base_dir);
        let trimmed = expanded.trim_end_matches('/');
        if trimmed.is_empty() && expanded.starts_with('/') {
            "/".to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Absolute location of a project directory
    pub fn target_dir(&self, dir: &str) -> String {
        let root = self.root();
        if root == "/" {
            format!("/{}", dir)
        } else {
            format!("{}/{}", root, dir)
        }
    }
}

/// @acp:summary "Policy for project tokens that only resolve via passthrough"
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedProject {
    /// Report "Project not found" and exit non-zero
    #[default]
    Error,
    /// Treat the token as a directory name under `baseDir`
    Passthrough,
}

/// @acp:summary "Immutable resolution context: config plus both registries"
#[derive(Debug, Clone)]
pub struct Context {
    pub config: Config,
    pub projects: Projects,
    pub commands: Commands,
}

impl Context {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            projects: Projects::new(),
            commands: Commands::new(),
        }
    }

    pub fn with_projects(mut self, projects: Projects) -> Self {
        self.projects = projects;
        self
    }

    pub fn with_commands(mut self, commands: Commands) -> Self {
        self.commands = commands;
        self
    }

    /// @acp:summary "Parse config.yml, projects.yml and commands.yml"
    pub fn load(dir: &ConfigDir) -> Result<Self> {
        let config: Config = read_yaml(&dir.config_path())?.ok_or_else(|| {
            DevlocalError::Config(format!(
                "{} is empty; it must at least set baseDir",
                dir.config_path().display()
            ))
        })?;
        let projects: Projects = read_yaml(&dir.projects_path())?.unwrap_or_default();
        let commands: Commands = read_yaml(&dir.commands_path())?.unwrap_or_default();

        tracing::debug!(
            projects = projects.len(),
            commands = commands.len(),
            base_dir = %config.base_dir,
            "Loaded configuration"
        );

        Ok(Self {
            config,
            projects,
            commands,
        })
    }
}

/// Read one YAML file; `None` when it holds no document (blank or comments only)
fn read_yaml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        DevlocalError::Config(format!("cannot read {}: {}", path.display(), e))
    })?;

    if is_blank_yaml(&content) {
        return Ok(None);
    }

    serde_yaml::from_str(&content)
        .map(Some)
        .map_err(|e| DevlocalError::Config(format!("{}: {}", path.display(), e)))
}

fn is_blank_yaml(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---"
    })
}

fn expand_home(path: &str) -> String {
    if path == "~" || path.starts_with("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{}", home.to_string_lossy(), &path[1..]);
        }
    }
    path.to_string()
}

fn flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    match Value::deserialize(deserializer)? {
        Value::Bool(b) => Ok(b),
        Value::Null => Ok(false),
        Value::Number(n) => Ok(n.as_f64().map(|v| v != 0.0).unwrap_or(false)),
        other => Err(D::Error::custom(format!(
            "expected a boolean or number, found {:?}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let yaml = r#"
baseDir: /home/user/dev
verbose: 1
repoListingDirAlias: [/home/user/dev, "~dev"]
unresolvedProject: passthrough
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.base_dir, "/home/user/dev");
        assert!(config.verbose);
        assert_eq!(
            config.repo_listing_dir_alias,
            Some(("/home/user/dev".to_string(), "~dev".to_string()))
        );
        assert_eq!(config.unresolved_project, UnresolvedProject::Passthrough);
    }

    #[test]
    fn test_config_defaults() {
        let config: Config = serde_yaml::from_str("baseDir: /srv\nverbose: 0\n").unwrap();
        assert_eq!(config, Config::new("/srv"));
        assert_eq!(config.unresolved_project, UnresolvedProject::Error);
    }

    #[test]
    fn test_missing_base_dir_is_error() {
        assert!(serde_yaml::from_str::<Config>("verbose: true\n").is_err());
    }

    #[test]
    fn test_root_and_target_dir() {
        let config = Config::new("/base/");
        assert_eq!(config.root(), "/base");
        assert_eq!(config.target_dir("foo"), "/base/foo");
        assert_eq!(Config::new("/").target_dir("foo"), "/foo");
    }

    #[test]
    fn test_root_expands_home() {
        let home = dirs::home_dir().unwrap();
        let config = Config::new("~/dev");
        assert_eq!(config.root(), format!("{}/dev", home.to_string_lossy()));
        assert_eq!(Config::new("~other/dev").root(), "~other/dev");
    }

    #[test]
    fn test_load_context() {
        let temp = TempDir::new().unwrap();
        let dir = ConfigDir::new(temp.path());
        std::fs::write(dir.config_path(), "baseDir: /base\n").unwrap();
        std::fs::write(dir.projects_path(), "# nothing yet\n").unwrap();
        std::fs::write(dir.commands_path(), "build: make\n").unwrap();

        let ctx = Context::load(&dir).unwrap();
        assert_eq!(ctx.config.base_dir, "/base");
        assert!(ctx.projects.is_empty());
        assert_eq!(ctx.commands["build"], CommandValue::from("make"));
    }

    #[test]
    fn test_load_reports_missing_file() {
        let temp = TempDir::new().unwrap();
        let dir = ConfigDir::new(temp.path());
        std::fs::write(dir.config_path(), "baseDir: /base\n").unwrap();

        let err = Context::load(&dir).unwrap_err();
        assert!(matches!(err, DevlocalError::Config(_)));
        assert!(err.to_string().contains("projects.yml"));
    }

    #[test]
    fn test_load_rejects_empty_config() {
        let temp = TempDir::new().unwrap();
        let dir = ConfigDir::new(temp.path());
        std::fs::write(dir.config_path(), "").unwrap();
        std::fs::write(dir.projects_path(), "").unwrap();
        std::fs::write(dir.commands_path(), "").unwrap();

        let err = Context::load(&dir).unwrap_err();
        assert!(err.to_string().contains("baseDir"));
    }
}
