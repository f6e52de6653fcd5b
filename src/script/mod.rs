//! @acp:module "Script Assembler"
//! @acp:summary "Writes directives as the script the shell wrapper sources"
//! @acp:domain cli
//! @acp:layer io
//!
//! The script always starts with `set -o pipefail` and ends with a bare
//! `echo`, which wrappers use to tell that the script ran to completion.
//! Writes go through a temporary file in the same directory and a rename,
//! so a sourcing shell never sees a half-written script.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::directive::Directive;
use crate::error::{DevlocalError, Result};

/// Makes the sourcing shell fail a pipeline on its first failing step
pub const PIPEFAIL: &str = "set -o pipefail";

/// Trailing sentinel line
pub const SENTINEL: &str = "echo";

/// Result of [`ScriptWriter::write`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Script written with this many directives
    Written(usize),
    /// Nothing to write; any existing file was left untouched
    Skipped,
}

/// @acp:summary "Render directives into the full script text"
pub fn render_script(directives: &[Directive]) -> String {
    let mut script = String::with_capacity(64 * (directives.len() + 2));
    script.push_str(PIPEFAIL);
    script.push('\n');
    for directive in directives {
        script.push_str(&directive.to_string());
        script.push('\n');
    }
    script.push_str(SENTINEL);
    script.push('\n');
    script
}

/// @acp:summary "Print directives one per line, followed by a blank line"
pub fn echo_directives<W: Write>(out: &mut W, directives: &[Directive]) -> Result<()> {
    for directive in directives {
        writeln!(out, "{}", directive)?;
    }
    writeln!(out)?;
    Ok(())
}

/// @acp:summary "Atomically writes the sourced script"
#[derive(Debug, Clone)]
pub struct ScriptWriter {
    path: PathBuf,
    verbose: bool,
}

impl ScriptWriter {
    pub fn new<P: AsRef<Path>>(path: P, verbose: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            verbose,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// @acp:summary "Overwrite the script; no-op for an empty directive list"
    pub fn write(&self, directives: &[Directive]) -> Result<WriteOutcome> {
        if directives.is_empty() {
            tracing::debug!(path = %self.path.display(), "No directives, leaving script untouched");
            return Ok(WriteOutcome::Skipped);
        }

        if self.verbose {
            echo_directives(&mut std::io::stdout().lock(), directives)?;
        }

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(render_script(directives).as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(&self.path)
            .map_err(|e| DevlocalError::Io(e.error))?;

        tracing::debug!(path = %self.path.display(), count = directives.len(), "Wrote script");
        Ok(WriteOutcome::Written(directives.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn sample() -> Vec<Directive> {
        vec![
            Directive::ChangeDir("/test/dir".into()),
            Directive::Init("npm install".into()),
        ]
    }

    #[test]
    fn test_render_script() {
        assert_eq!(
            render_script(&sample()),
            "set -o pipefail\ncd /test/dir\nnpm install\necho\n"
        );
    }

    #[test]
    fn test_write_creates_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("commands.sh");

        let outcome = ScriptWriter::new(&path, false).write(&sample()).unwrap();
        assert_eq!(outcome, WriteOutcome::Written(2));

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("set -o pipefail\n"));
        assert!(content.ends_with("\necho\n"));
    }

    #[test]
    fn test_write_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("commands.sh");
        let writer = ScriptWriter::new(&path, false);

        writer.write(&sample()).unwrap();
        let first = fs::read(&path).unwrap();
        writer.write(&sample()).unwrap();
        assert_eq!(fs::read(&path).unwrap(), first);
    }

    #[test]
    fn test_write_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("commands.sh");
        fs::write(&path, "cd /somewhere/else\nrm -rf build\n").unwrap();

        ScriptWriter::new(&path, false)
            .write(&[Directive::Run("make".into())])
            .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "set -o pipefail\nmake\necho\n");
    }

    #[test]
    fn test_empty_directives_never_touch_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("commands.sh");
        let writer = ScriptWriter::new(&path, false);

        assert_eq!(writer.write(&[]).unwrap(), WriteOutcome::Skipped);
        assert!(!path.exists());

        fs::write(&path, "previous").unwrap();
        writer.write(&[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "previous");
    }

    #[test]
    fn test_echo_matches_script_body() {
        let mut out = Vec::new();
        echo_directives(&mut out, &sample()).unwrap();
        let echoed = String::from_utf8(out).unwrap();
        assert_eq!(echoed, "cd /test/dir\nnpm install\n\n");

        let script = render_script(&sample());
        let body: Vec<_> = script.lines().skip(1).take(sample().len()).collect();
        assert_eq!(echoed.lines().take(body.len()).collect::<Vec<_>>(), body);
    }

    #[test]
    fn test_leaves_no_temp_files() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("commands.sh");
        ScriptWriter::new(&path, true).write(&sample()).unwrap();

        let entries: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
