//! # Configuration
//!
//! Stored as `config.json` in the scope directory: `.checkpad/` for the
//! project scope, the user data directory for the global scope. A missing file
//! means defaults.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `docs-dir` | `markdown-files` | Directory of `.md` documents, relative to the scope root |
//! | `server-url` | unset | When set, documents are read from this server instead |
//! | `export-name` | `checklist_exportado` | Default file name for HTML exports |

use crate::error::{CheckpadError, Result};
use crate::export::DEFAULT_HTML_NAME;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_DOCS_DIR: &str = "markdown-files";

pub const CONFIG_KEYS: &[&str] = &["docs-dir", "server-url", "export-name"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckpadConfig {
    #[serde(default = "default_docs_dir")]
    pub docs_dir: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,

    #[serde(default = "default_export_name")]
    pub export_name: String,
}

fn default_docs_dir() -> String {
    DEFAULT_DOCS_DIR.to_string()
}

fn default_export_name() -> String {
    DEFAULT_HTML_NAME.to_string()
}

impl Default for CheckpadConfig {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
            server_url: None,
            export_name: default_export_name(),
        }
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('_', "-")
}

impl CheckpadConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(CheckpadError::Io)?;
        let config: CheckpadConfig =
            serde_json::from_str(&content).map_err(CheckpadError::Serialization)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(CheckpadError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(CheckpadError::Serialization)?;
        fs::write(config_path, content).map_err(CheckpadError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match normalize_key(key).as_str() {
            "docs-dir" => Some(self.docs_dir.clone()),
            "server-url" => Some(self.server_url.clone().unwrap_or_default()),
            "export-name" => Some(self.export_name.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        let value = value.trim();
        match normalize_key(key).as_str() {
            "docs-dir" => {
                if value.is_empty() {
                    return Err("docs-dir cannot be empty".to_string());
                }
                self.docs_dir = value.to_string();
            }
            "server-url" => {
                self.server_url = match value {
                    "" | "none" => None,
                    url if url.starts_with("http://") || url.starts_with("https://") => {
                        Some(url.trim_end_matches('/').to_string())
                    }
                    other => return Err(format!("Invalid server url: {}", other)),
                };
            }
            "export-name" => {
                crate::export::validate_filename(value).map_err(|e| e.to_string())?;
                self.export_name = if value.is_empty() {
                    default_export_name()
                } else {
                    value.to_string()
                };
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    /// All keys with their current values, in display order.
    pub fn entries(&self) -> Vec<(String, String)> {
        CONFIG_KEYS
            .iter()
            .map(|key| (key.to_string(), self.get(key).unwrap_or_default()))
            .collect()
    }

    /// The documents directory, resolved against `root` when relative.
    pub fn docs_path(&self, root: &Path) -> PathBuf {
        let dir = Path::new(&self.docs_dir);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            root.join(dir)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = CheckpadConfig::default();
        assert_eq!(config.docs_dir, "markdown-files");
        assert_eq!(config.server_url, None);
        assert_eq!(config.export_name, "checklist_exportado");
    }

    #[test]
    fn test_load_missing_config() {
        let dir = TempDir::new().unwrap();
        let config = CheckpadConfig::load(dir.path()).unwrap();
        assert_eq!(config, CheckpadConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let mut config = CheckpadConfig::default();
        config.set("docs-dir", "docs").unwrap();
        config.set("server-url", "http://localhost:3000/").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = CheckpadConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.docs_dir, "docs");
        assert_eq!(loaded.server_url.as_deref(), Some("http://localhost:3000"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"docs_dir": "notes"}"#).unwrap();
        let config = CheckpadConfig::load(dir.path()).unwrap();
        assert_eq!(config.docs_dir, "notes");
        assert_eq!(config.export_name, "checklist_exportado");
    }

    #[test]
    fn test_get_accepts_underscores() {
        let config = CheckpadConfig::default();
        assert_eq!(config.get("docs_dir").as_deref(), Some("markdown-files"));
        assert_eq!(config.get("nope"), None);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = CheckpadConfig::default();
        assert!(config.set("server-url", "ftp://x").is_err());
        assert!(config.set("export-name", "a/b").is_err());
        assert!(config.set("docs-dir", " ").is_err());
        assert!(config.set("colour", "red").is_err());
    }

    #[test]
    fn test_unset_server_url() {
        let mut config = CheckpadConfig::default();
        config.set("server-url", "https://example.org").unwrap();
        config.set("server-url", "none").unwrap();
        assert_eq!(config.server_url, None);
    }

    #[test]
    fn test_docs_path_resolution() {
        let config = CheckpadConfig::default();
        assert_eq!(
            config.docs_path(Path::new("/work")),
            PathBuf::from("/work/markdown-files")
        );
    }
}
