//! @acp:module "Git"
//! @acp:summary "Best-effort branch listing for the selected project"
//! @acp:domain cli
//! @acp:layer integration

use std::path::Path;
use std::process::{Command, Stdio};

/// @acp:summary "Output of `git branch` run inside `dir`, if it is a repository"
///
/// The child gets `dir` as its working directory; ours never changes.
/// Every failure (no `.git`, git missing, non-zero exit) yields `None`.
pub fn branches<P: AsRef<Path>>(dir: P) -> Option<String> {
    let dir = dir.as_ref();
    if !dir.join(".git").exists() {
        return None;
    }

    let output = Command::new("git")
        .arg("branch")
        .current_dir(dir)
        .stdin(Stdio::null())
        .output();

    match output {
        Ok(output) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).into_owned())
        }
        Ok(output) => {
            tracing::debug!(
                dir = %dir.display(),
                status = ?output.status.code(),
                "git branch failed"
            );
            None
        }
        Err(e) => {
            tracing::debug!(dir = %dir.display(), "Could not run git: {}", e);
            None
        }
    }
}

/// Print the branch list of `dir`, ignoring all errors
pub fn show_branch<P: AsRef<Path>>(dir: P) {
    if let Some(listing) = branches(dir) {
        print!("{}", listing);
    }
}
