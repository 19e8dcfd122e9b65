//! Configuration loading for pharmagen.
//! Reads pharmagen.toml (or .yaml/.yml) from `--config`, the PHARMAGEN_CONFIG
//! env var, or the current directory. A missing file means defaults.

use anyhow::Context;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "pharmagen.toml";
const CONFIG_ENV_VAR: &str = "PHARMAGEN_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmMode {
    #[default]
    Disabled,
    Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    #[serde(rename = "openai")]
    OpenAi,
    #[default]
    Gemini,
    #[serde(rename = "openai_compatible")]
    OpenAiCompatible,
}

impl BackendKind {
    /// Env var consulted when the config file has no key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            BackendKind::OpenAi           => "PHARMAGEN_OPENAI_API_KEY",
            BackendKind::Gemini           => "PHARMAGEN_GEMINI_API_KEY",
            BackendKind::OpenAiCompatible => "PHARMAGEN_COMPAT_API_KEY",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub mode: LlmMode,
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    pub max_tokens: Option<u32>,
    #[serde(default = "default_openai")]
    pub openai: BackendSettings,
    #[serde(default = "default_gemini")]
    pub gemini: BackendSettings,
    #[serde(default = "default_openai_compatible")]
    pub openai_compatible: BackendSettings,
}

fn default_temperature()  -> f32 { 0.2 }
fn default_timeout_secs() -> u64 { 60 }

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            mode: LlmMode::default(),
            backend: BackendKind::default(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            max_tokens: None,
            openai: default_openai(),
            gemini: default_gemini(),
            openai_compatible: default_openai_compatible(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendSettings {
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_openai() -> BackendSettings {
    BackendSettings { model: "gpt-4o-mini".to_string(), api_key: None, base_url: None }
}

fn default_gemini() -> BackendSettings {
    BackendSettings { model: "gemini-2.5-flash".to_string(), api_key: None, base_url: None }
}

fn default_openai_compatible() -> BackendSettings {
    BackendSettings {
        model: "llama3:8b".to_string(),
        api_key: None,
        base_url: Some("http://localhost:11434".to_string()),
    }
}

impl LlmConfig {
    /// Settings of the selected backend.
    pub fn selected(&self) -> &BackendSettings {
        match self.backend {
            BackendKind::OpenAi           => &self.openai,
            BackendKind::Gemini           => &self.gemini,
            BackendKind::OpenAiCompatible => &self.openai_compatible,
        }
    }

    /// API key for the selected backend: the config value if non-blank,
    /// else the backend's env var.
    pub fn resolve_api_key(&self) -> Option<SecretString> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    pub fn resolve_api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<SecretString> {
        self.selected()
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| lookup(self.backend.api_key_env()).filter(|k| !k.trim().is_empty()))
            .map(SecretString::from)
    }
}

mod tests;

impl Config {
    /// Load configuration. `explicit` wins over PHARMAGEN_CONFIG, which wins
    /// over ./pharmagen.toml.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        if !path.exists() {
            tracing::warn!(path = %path.display(), "Config file not found; using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Parse a config file, choosing YAML or TOML by extension.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;

        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let config: Config = if is_yaml {
            serde_yaml::from_str(&content)
                .with_context(|| format!("parsing YAML config {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("parsing TOML config {}", path.display()))?
        };

        tracing::debug!(path = %path.display(), mode = ?config.llm.mode, "Config loaded");
        Ok(config)
    }
}
