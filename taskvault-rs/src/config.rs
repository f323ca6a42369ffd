//! Configuration loaded from `~/.config/obsidian-tasks/config.toml`.

use crate::error::{Result, VaultError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration.
///
/// Unknown tables (for instance a `[theme]` section read by a renderer) are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub vault: VaultConfig,

    #[serde(default)]
    pub tasks: TasksConfig,
}

/// Where the daily notes live and how they are named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Vault root. Empty means "not configured".
    #[serde(default)]
    pub path: String,

    /// Daily notes directory, relative to the vault root.
    #[serde(default = "default_daily_notes_dir")]
    pub daily_notes_dir: String,

    /// chrono strftime pattern for daily note file names (without `.md`).
    #[serde(default = "default_daily_note_format")]
    pub daily_note_format: String,
}

/// Task scanning options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TasksConfig {
    /// Heading line that bounds the task section. Empty scans whole files.
    #[serde(default = "default_section_heading")]
    pub section_heading: String,

    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,

    #[serde(default = "default_lookahead_days")]
    pub lookahead_days: u32,

    /// Tags whose tasks (and sub-tag tasks) are hidden. `#` is optional.
    #[serde(default)]
    pub exclude_tags: Vec<String>,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            daily_notes_dir: default_daily_notes_dir(),
            daily_note_format: default_daily_note_format(),
        }
    }
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            section_heading: default_section_heading(),
            lookback_days: default_lookback_days(),
            lookahead_days: default_lookahead_days(),
            exclude_tags: Vec::new(),
        }
    }
}

fn default_daily_notes_dir() -> String {
    "Notes/Daily Notes".to_string()
}

fn default_daily_note_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_section_heading() -> String {
    "## :LiPencil: Open Space".to_string()
}

fn default_lookback_days() -> u32 {
    7
}

fn default_lookahead_days() -> u32 {
    14
}

impl Config {
    /// Default config file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("obsidian-tasks").join("config.toml"))
    }

    /// Load from the default location; a missing file yields defaults.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.is_file() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Pick the vault root: CLI override first, then the config value.
    pub fn resolve_vault_path(&self, cli_vault: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = cli_vault {
            return Ok(path.to_path_buf());
        }
        if !self.vault.path.trim().is_empty() {
            return Ok(PathBuf::from(self.vault.path.trim()));
        }
        Err(VaultError::Config(
            "No vault path configured. Set vault.path in ~/.config/obsidian-tasks/config.toml or use --vault."
                .to_string(),
        ))
    }

    /// Excluded tags in `#tag` form.
    pub fn excluded_tags(&self) -> Vec<String> {
        self.tasks
            .exclude_tags
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(|t| {
                if t.starts_with('#') {
                    t.to_string()
                } else {
                    format!("#{}", t)
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.vault.daily_notes_dir, "Notes/Daily Notes");
        assert_eq!(config.vault.daily_note_format, "%Y-%m-%d");
        assert_eq!(config.tasks.section_heading, "## :LiPencil: Open Space");
        assert_eq!(config.tasks.lookback_days, 7);
        assert_eq!(config.tasks.lookahead_days, 14);
        assert!(config.tasks.exclude_tags.is_empty());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse(
            "[vault]\npath = \"/notes\"\n\n[tasks]\nlookahead_days = 3\n\n[theme]\naccent = \"#7571F9\"\n",
        )
        .unwrap();
        assert_eq!(config.vault.path, "/notes");
        assert_eq!(config.vault.daily_notes_dir, "Notes/Daily Notes");
        assert_eq!(config.tasks.lookahead_days, 3);
        assert_eq!(config.tasks.lookback_days, 7);
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::parse("[vault\npath = 1");
        assert!(matches!(result, Err(VaultError::TomlParse(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[tasks]\nsection_heading = \"## Tasks\"\nexclude_tags = [\"habit\"]\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.tasks.section_heading, "## Tasks");
        assert_eq!(config.excluded_tags(), vec!["#habit"]);
    }

    #[test]
    fn test_resolve_vault_path() {
        let mut config = Config::default();
        assert!(matches!(config.resolve_vault_path(None), Err(VaultError::Config(_))));

        config.vault.path = "/from/config".to_string();
        assert_eq!(config.resolve_vault_path(None).unwrap(), PathBuf::from("/from/config"));
        assert_eq!(
            config.resolve_vault_path(Some(Path::new("/from/cli"))).unwrap(),
            PathBuf::from("/from/cli")
        );
    }

    #[test]
    fn test_excluded_tags_normalized() {
        let mut config = Config::default();
        config.tasks.exclude_tags = vec!["#habit".into(), "work/meetings".into(), "  ".into()];
        assert_eq!(config.excluded_tags(), vec!["#habit", "#work/meetings"]);
    }
}
