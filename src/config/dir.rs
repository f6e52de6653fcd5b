//! @acp:module "Config Directory"
//! @acp:summary "Location, first-run bootstrap and output path of ~/.devlocal"
//! @acp:domain cli
//! @acp:layer io

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DevlocalError, Result};

const PROJECTS_FILE: &str = "projects.yml";
const COMMANDS_FILE: &str = "commands.yml";
const CONFIG_FILE: &str = "config.yml";
const SCRIPT_FILE: &str = "commands.sh";

/// Bundled defaults written on first run
const DEFAULTS: [(&str, &str); 3] = [
    (PROJECTS_FILE, include_str!("../../defaults/projects.yml")),
    (COMMANDS_FILE, include_str!("../../defaults/commands.yml")),
    (CONFIG_FILE, include_str!("../../defaults/config.yml")),
];

/// @acp:summary "The directory holding the YAML files and the generated script"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDir {
    root: PathBuf,
}

impl ConfigDir {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// @acp:summary "Use the given directory, or fall back to ~/.devlocal"
    pub fn locate(explicit: Option<PathBuf>) -> Result<Self> {
        if let Some(root) = explicit {
            return Ok(Self::new(root));
        }
        dirs::home_dir()
            .map(|home| Self::new(home.join(".devlocal")))
            .ok_or_else(|| DevlocalError::Config("cannot determine home directory".into()))
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    pub fn projects_path(&self) -> PathBuf {
        self.root.join(PROJECTS_FILE)
    }

    pub fn commands_path(&self) -> PathBuf {
        self.root.join(COMMANDS_FILE)
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// The script the shell wrapper sources after each run
    pub fn script_path(&self) -> PathBuf {
        self.root.join(SCRIPT_FILE)
    }

    /// @acp:summary "Create the directory and copy bundled defaults on first run"
    ///
    /// Returns the files that were written. Existing files are never
    /// overwritten, so a partially set up directory gets only what it lacks.
    pub fn bootstrap(&self) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.root)?;

        let mut created = Vec::new();
        for (name, content) in DEFAULTS {
            let path = self.root.join(name);
            if !path.exists() {
                fs::write(&path, content)?;
                tracing::debug!(path = %path.display(), "Wrote default config file");
                created.push(path);
            }
        }
        Ok(created)
    }

    /// @acp:summary "Remove the script left behind by a previous invocation"
    pub fn clear_stale_script(&self) -> Result<()> {
        match fs::remove_file(self.script_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bootstrap_writes_defaults() {
        let temp = TempDir::new().unwrap();
        let dir = ConfigDir::new(temp.path().join(".devlocal"));

        let created = dir.bootstrap().unwrap();
        assert_eq!(created.len(), 3);
        assert!(dir.config_path().exists());
        assert!(dir.projects_path().exists());
        assert!(dir.commands_path().exists());

        // Second run leaves everything alone
        assert!(dir.bootstrap().unwrap().is_empty());
    }

    #[test]
    fn test_bootstrap_keeps_user_files() {
        let temp = TempDir::new().unwrap();
        let dir = ConfigDir::new(temp.path());
        fs::write(dir.config_path(), "baseDir: /mine\n").unwrap();

        let created = dir.bootstrap().unwrap();
        assert_eq!(created.len(), 2);
        assert_eq!(
            fs::read_to_string(dir.config_path()).unwrap(),
            "baseDir: /mine\n"
        );
    }

    #[test]
    fn test_bundled_defaults_parse() {
        let temp = TempDir::new().unwrap();
        let dir = ConfigDir::new(temp.path());
        dir.bootstrap().unwrap();

        let ctx = crate::config::Context::load(&dir).unwrap();
        assert_eq!(ctx.config.base_dir, "~/dev");
        assert!(ctx.commands.contains_key("update"));
    }

    #[test]
    fn test_clear_stale_script() {
        let temp = TempDir::new().unwrap();
        let dir = ConfigDir::new(temp.path());

        // Nothing to remove is fine
        dir.clear_stale_script().unwrap();

        fs::write(dir.script_path(), "cd /old\n").unwrap();
        dir.clear_stale_script().unwrap();
        assert!(!dir.script_path().exists());
    }

    #[test]
    fn test_locate_explicit() {
        let dir = ConfigDir::locate(Some(PathBuf::from("/tmp/dl"))).unwrap();
        assert_eq!(dir.script_path(), PathBuf::from("/tmp/dl/commands.sh"));
    }
}
