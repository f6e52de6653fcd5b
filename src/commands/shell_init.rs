//! @acp:module "Shell Init Command"
//! @acp:summary "Print the dl/go shell functions that source the generated script"
//! @acp:domain cli
//! @acp:layer handler

use std::path::Path;

use anyhow::Result;

use crate::config::ConfigDir;

/// Options for the shell-init command
#[derive(Debug, Clone)]
pub struct ShellInitOptions {
    pub config_dir: ConfigDir,
    /// Binary the `dl` function invokes
    pub binary: String,
}

/// Execute the shell-init command
pub fn execute_shell_init(options: ShellInitOptions) -> Result<()> {
    print!(
        "{}",
        render_shell_init(&options.config_dir.script_path(), &options.binary)
    );
    Ok(())
}

/// POSIX functions for `eval "$(devlocal --shell-init)"` in a shell rc file
pub fn render_shell_init(script: &Path, binary: &str) -> String {
    let script = script.display();
    format!(
        r#"dl() {{
  command {binary} "$@" || return $?
  if [ -f "{script}" ]; then
    . "{script}"
  fi
}}

go() {{
  dl "" "$@"
}}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_shell_init() {
        let out = render_shell_init(Path::new("/home/me/.devlocal/commands.sh"), "devlocal");
        assert!(out.starts_with("dl() {\n  command devlocal \"$@\" || return $?\n"));
        assert!(out.contains(". \"/home/me/.devlocal/commands.sh\""));
        assert!(out.contains("go() {\n  dl \"\" \"$@\"\n}"));
    }
}
