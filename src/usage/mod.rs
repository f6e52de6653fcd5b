//! @acp:module "Usage"
//! @acp:summary "Listing of discovered projects and available commands"
//! @acp:domain cli
//! @acp:layer presentation

use console::style;

use crate::config::{Commands, Config, Projects};
use crate::index::RepoIndex;

const RULE_WIDTH: usize = 40;

/// @acp:summary "Render the help screen shown when no arguments are given"
pub fn render_usage(repos: &RepoIndex, projects: &Projects, commands: &Commands, config: &Config) -> String {
    let mut lines = vec![
        String::new(),
        style("** devlocal **").white().on_blue().bold().to_string(),
        String::new(),
        "Navigate between projects, set env variables and run commands.".to_string(),
        String::new(),
        "Usage:  dl <command> [<project>]".to_string(),
        "   or:  go <project>".to_string(),
        String::new(),
        style("Projects").blue().to_string(),
        format!("  project-specific {}", style("commands").green()),
        "-".repeat(RULE_WIDTH),
    ];

    let padding = repos.iter().map(|r| r.name.len()).max().unwrap_or(0);

    let mut listed: Vec<_> = repos.iter().collect();
    listed.sort_by_cached_key(|r| format!("{}|{}", r.name, r.relative_path));

    for repo in listed {
        let parent = listing_dir(repo.parent_dir(), config);
        lines.push(format!(
            "{} {} {}",
            style(&repo.name).blue(),
            " ".repeat(padding - repo.name.len()),
            parent
        ));

        if let Some(project) = projects.get(&repo.name) {
            for cmd in sorted(project.cmds.keys()) {
                lines.push(format!("  {}", style(cmd).green()));
            }
        }
    }

    lines.push(String::new());
    lines.push("General commands".to_string());
    for cmd in sorted(commands.keys()) {
        lines.push(format!("  {}", style(cmd).green()));
    }
    lines.push(String::new());

    lines.join("\n")
}

/// Apply `repoListingDirAlias` (first occurrence only)
fn listing_dir(dir: &str, config: &Config) -> String {
    match &config.repo_listing_dir_alias {
        Some((from, to)) if !from.is_empty() => dir.replacen(from.as_str(), to, 1),
        _ => dir.to_string(),
    }
}

fn sorted<'a>(keys: impl Iterator<Item = &'a String>) -> Vec<&'a str> {
    let mut keys: Vec<&str> = keys.map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CommandValue, Project};
    use crate::index::Repo;

    fn render(config: &Config) -> String {
        let repos = RepoIndex::new(vec![
            Repo::new("zeta", "work/zeta"),
            Repo::new("api", "work/backend/api"),
        ]);

        let mut projects = Projects::new();
        let mut api = Project::new("work/backend/api");
        api.cmds.insert("start".into(), CommandValue::from("cargo run"));
        api.cmds.insert("bench".into(), CommandValue::from("cargo bench"));
        projects.insert("api".into(), api);

        let mut commands = Commands::new();
        commands.insert("update".into(), CommandValue::from("git pull"));
        commands.insert("install".into(), CommandValue::from("npm install"));

        console::strip_ansi_codes(&render_usage(&repos, &projects, &commands, config)).into_owned()
    }

    #[test]
    fn test_repos_sorted_with_parent_dir() {
        let out = render(&Config::new("/base"));
        let api = out.find("api   work/backend").unwrap();
        let zeta = out.find("zeta  work").unwrap();
        assert!(api < zeta);
    }

    #[test]
    fn test_project_commands_listed_sorted() {
        let out = render(&Config::new("/base"));
        let bench = out.find("  bench").unwrap();
        let start = out.find("  start").unwrap();
        let zeta = out.find("zeta").unwrap();
        assert!(bench < start && start < zeta);
    }

    #[test]
    fn test_general_commands_sorted() {
        let out = render(&Config::new("/base"));
        let general = out.find("General commands").unwrap();
        let install = out.find("  install").unwrap();
        let update = out.find("  update").unwrap();
        assert!(general < install && install < update);
    }

    #[test]
    fn test_dir_alias_applied() {
        let mut config = Config::new("/base");
        config.repo_listing_dir_alias = Some(("work".into(), "~w".into()));
        let out = render(&config);
        assert!(out.contains("~w/backend"));
        assert!(!out.contains("work/backend"));
    }
}
