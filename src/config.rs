//! Configuration loading for standup-cli.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::todoist::Section;

/// Stored in place of an LLM token when the user skips that prompt.
pub const LLM_TOKEN_SKIPPED: &str = "not-provided";

pub const KEY_TODOIST_TOKEN: &str = "todoistToken";
pub const KEY_DEFAULT_PROJECT_ID: &str = "defaultProjectId";
pub const KEY_LLM_TOKEN: &str = "llmToken";
pub const KEY_DEFAULT_SECTION_ID: &str = "defaultSectionId";
pub const KEY_SECTIONS: &str = "sections";

/// Get the config directory (~/.config/standup-cli), or `STANDUP_CONFIG_DIR`.
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("STANDUP_CONFIG_DIR") {
        return Ok(PathBuf::from(dir));
    }

    let home = directories::UserDirs::new()
        .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))?;

    Ok(home.home_dir().join(".config").join("standup-cli"))
}

/// Get the config file path.
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.json"))
}

/// Typed snapshot of the config file, read once per invocation.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todoist_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_project_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_section_id: Option<String>,

    /// Section snapshot taken at setup, used by `view` without a network call.
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Settings {
    pub fn todoist_token(&self) -> Result<&str> {
        non_blank(self.todoist_token.as_deref()).ok_or_else(|| Error::needs_setup("No Todoist token configured"))
    }

    pub fn project_id(&self) -> Result<&str> {
        non_blank(self.default_project_id.as_deref())
            .ok_or_else(|| Error::needs_setup("No default project configured"))
    }

    pub fn section_id(&self) -> Result<&str> {
        non_blank(self.default_section_id.as_deref())
            .ok_or_else(|| Error::needs_setup("No default section configured"))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Key-value access to persisted configuration.
pub trait ConfigStore {
    fn get(&self, key: &str) -> Result<Option<Value>>;

    fn set(&self, key: &str, value: Value) -> Result<()>;

    /// Remove a key; missing keys are not an error.
    fn unset(&self, key: &str) -> Result<()>;

    fn snapshot(&self) -> Result<Settings>;
}

/// `ConfigStore` over a pretty-printed JSON object on disk.
pub struct JsonConfigStore {
    path: PathBuf,
}

impl JsonConfigStore {
    pub fn open_default() -> Result<Self> {
        Ok(Self::at(get_config_path()?))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn create_if_missing(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, "{}")?;
        tracing::info!("Created config file at {}", self.path.display());
        Ok(())
    }

    fn read_object(&self) -> Result<Map<String, Value>> {
        self.create_if_missing()?;
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        match serde_json::from_str::<Value>(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(Error::Config(format!(
                "{} does not contain a JSON object",
                self.path.display()
            ))),
        }
    }

    fn write_object(&self, map: Map<String, Value>) -> Result<()> {
        let content = serde_json::to_string_pretty(&Value::Object(map))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl ConfigStore for JsonConfigStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_object()?.remove(key))
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        let mut map = self.read_object()?;
        map.insert(key.to_string(), value);
        self.write_object(map)?;
        tracing::debug!("Updated config key {}", key);
        Ok(())
    }

    fn unset(&self, key: &str) -> Result<()> {
        let mut map = self.read_object()?;
        if map.remove(key).is_some() {
            self.write_object(map)?;
        }
        Ok(())
    }

    fn snapshot(&self) -> Result<Settings> {
        let settings = serde_json::from_value(Value::Object(self.read_object()?))?;
        tracing::debug!("Loaded settings from {}", self.path.display());
        Ok(settings)
    }
}
