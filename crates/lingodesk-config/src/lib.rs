pub mod general;
pub mod keybindings;
pub mod theme;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub use general::{ApiConfig, AuthConfig, GeneralConfig};
pub use keybindings::{check_collisions, validate_keybindings, KeybindingsConfig};
pub use theme::{Palette, ThemeConfig, ThemePreset};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
}

pub const DEFAULT_CONFIG: &str = include_str!("defaults.toml");

const MAX_PAGE_SIZE: u32 = 500;

impl Default for AppConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG).expect("embedded defaults must parse")
    }
}

/// Where the effective configuration was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Defaults,
    File(PathBuf),
}

/// A resolved configuration plus everything worth warning about, reported once logging is up.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub source: ConfigSource,
    pub warnings: Vec<String>,
}

impl AppConfig {
    /// An explicit path must exist and parse. Without one, the per-user file is optional and a
    /// broken one falls back to the embedded defaults with a warning.
    pub fn resolve(explicit: Option<&Path>) -> anyhow::Result<LoadedConfig> {
        let (config, source, mut warnings) = match explicit {
            Some(path) => {
                let config = Self::load_from(path).with_context(|| format!("loading {}", path.display()))?;
                (config, ConfigSource::File(path.to_path_buf()), Vec::new())
            }
            None => Self::resolve_user_file(&Self::default_path()),
        };
        warnings.extend(config.problems());
        Ok(LoadedConfig { config, source, warnings })
    }

    fn resolve_user_file(path: &Path) -> (Self, ConfigSource, Vec<String>) {
        if !path.exists() {
            return (Self::default(), ConfigSource::Defaults, Vec::new());
        }
        match Self::load_from(path) {
            Ok(config) => (config, ConfigSource::File(path.to_path_buf()), Vec::new()),
            Err(e) => {
                let warning = format!("ignoring {}: {e:#}", path.display());
                (Self::default(), ConfigSource::Defaults, vec![warning])
            }
        }
    }

    /// Embedded defaults with `text` layered on top.
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        let user: AppConfig = toml::from_str(text)?;
        let mut config = Self::default();
        config.layer(user);
        Ok(config)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    pub fn default_path() -> PathBuf {
        dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("lingodesk").join("config.toml")
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn init_default() -> anyhow::Result<PathBuf> {
        let path = Self::default_path();
        Self::init_default_at(&path)?;
        Ok(path)
    }

    /// Writes the commented defaults file; never overwrites.
    pub fn init_default_at(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!("Config already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, DEFAULT_CONFIG)?;
        Ok(())
    }

    /// Sections replace wholesale except keybindings, which merge per key.
    fn layer(&mut self, user: AppConfig) {
        self.general = user.general;
        self.api = user.api;
        self.auth = user.auth;
        self.theme = user.theme;
        self.keybindings.merge(user.keybindings);
    }

    /// Values that parse but cannot work against the admin API.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let url = self.api.base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            problems.push(format!("api.base_url must start with http:// or https:// (got \"{url}\")"));
        }
        if self.api.page_size == 0 || self.api.page_size > MAX_PAGE_SIZE {
            problems.push(format!("api.page_size must be between 1 and {MAX_PAGE_SIZE} (got {})", self.api.page_size));
        }
        if self.api.timeout_secs == 0 {
            problems.push("api.timeout_secs must be at least 1".to_string());
        }
        if self.general.tick_rate_ms == 0 {
            problems.push("general.tick_rate_ms must be at least 1".to_string());
        }
        problems
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs.max(1))
    }

    pub fn tick_rate_ms(&self) -> u64 {
        self.general.tick_rate_ms.max(1)
    }
}

#[cfg(test)]
mod tests;
