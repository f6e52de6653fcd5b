//! @acp:module "Project Registry"
//! @acp:summary "Project and command definitions parsed from projects.yml and commands.yml"
//! @acp:domain cli
//! @acp:layer model

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Projects keyed by name, in file order
pub type Projects = IndexMap<String, Project>;

/// Global fallback commands, in file order
pub type Commands = IndexMap<String, CommandValue>;

/// @acp:summary "A configured project (one entry of projects.yml)"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Directory relative to `baseDir`
    pub dir: String,

    /// Alternate names that select this project
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Variables exported after changing into the project
    #[serde(default, deserialize_with = "scalar_map")]
    pub env: IndexMap<String, String>,

    /// Steps run when the project is selected without a command
    #[serde(default)]
    pub init_cmds: Vec<String>,

    /// Project-scoped commands, shadowing the global ones
    #[serde(default)]
    pub cmds: IndexMap<String, CommandValue>,
}

impl Project {
    pub fn new(dir: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            ..Default::default()
        }
    }

    pub fn has_alias(&self, token: &str) -> bool {
        self.aliases.iter().any(|a| a == token)
    }
}

/// @acp:summary "A command: one shell line or an ordered list of steps"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandValue {
    Single(String),
    Sequence(Vec<String>),
}

impl CommandValue {
    /// @acp:summary "Flatten into one shell line; later steps run only if earlier ones succeed"
    ///
    /// Returns `None` for a sequence with no steps.
    pub fn flatten(&self) -> Option<String> {
        match self {
            CommandValue::Single(line) => Some(line.clone()),
            CommandValue::Sequence(steps) if steps.is_empty() => None,
            CommandValue::Sequence(steps) => Some(steps.join(" && ")),
        }
    }
}

impl From<&str> for CommandValue {
    fn from(line: &str) -> Self {
        CommandValue::Single(line.to_string())
    }
}

impl From<Vec<&str>> for CommandValue {
    fn from(steps: Vec<&str>) -> Self {
        CommandValue::Sequence(steps.into_iter().map(String::from).collect())
    }
}

/// Env values may be written as plain YAML scalars (`PORT: 3000`, `DEBUG: true`)
fn scalar_map<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_yaml::Value;

    let raw: Option<IndexMap<String, Value>> = Option::deserialize(deserializer)?;
    let mut out = IndexMap::new();
    for (key, value) in raw.unwrap_or_default() {
        let text = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Null => String::new(),
            _ => {
                return Err(D::Error::custom(format!(
                    "env value for '{}' must be a string, number or boolean",
                    key
                )))
            }
        };
        out.insert(key, text);
    }
    Ok(out)
}
