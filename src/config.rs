use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::Error;

const CONFIG_FILE_NAME: &str = ".pipellm.yaml";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User configuration from `~/.pipellm.yaml`. Loaded once per invocation and
/// immutable afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api_key: String,
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    api_url: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
    #[serde(default)]
    pub prompts: Vec<PromptEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptEntry {
    pub name: String,
    pub prompt: String,
}

impl Config {
    /// Loads the config from the fixed path under the user's home directory.
    pub fn load() -> Result<Self, Error> {
        let home = dirs::home_dir().ok_or(Error::HomeDirUnavailable)?;
        Self::load_from(&home.join(CONFIG_FILE_NAME))
    }

    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let raw = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound {
            path: path.to_path_buf(),
        })?;
        Self::parse(&raw, path)
    }

    fn parse(raw: &str, path: &Path) -> Result<Self, Error> {
        let cfg: Self = serde_yaml::from_str(raw).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            path = %path.display(),
            prompt_count = cfg.prompts.len(),
            model = cfg.model(),
            "loaded configuration"
        );
        Ok(cfg)
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
    }

    /// Returns the template of the first entry whose trimmed name matches the
    /// trimmed lookup name case-insensitively. Duplicate names are allowed;
    /// stored order decides. An empty lookup name never matches.
    pub fn find_prompt(&self, name: &str) -> Option<&str> {
        let needle = name.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        self.prompts
            .iter()
            .find(|entry| entry.name.trim().to_lowercase() == needle)
            .map(|entry| entry.prompt.as_str())
    }
}
