// src/config/mod.rs
//
// Settings are layered: defaults, then an optional TOML file, then the
// environment (`GEMINI_API_KEY`, `GEMINI_MODEL`), then command-line flags.

use crate::document::DEFAULT_OUTPUT_DIR;
use crate::error::{Result, TodoError};
use crate::generation::gemini::{DEFAULT_API_BASE, DEFAULT_MODEL};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const MODEL_VAR: &str = "GEMINI_MODEL";

/// Shape of the optional config file. Every key may be omitted.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub api_base: Option<String>,
    pub output_dir: Option<PathBuf>,
}

impl FileConfig {
    pub fn read(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| TodoError::Config(format!("cannot read {}: {e}", path.display())))?;
        toml::from_str(&raw)
            .map_err(|e| TodoError::Config(format!("invalid {}: {e}", path.display())))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub api_base: String,
    pub output_dir: PathBuf,
}

impl Config {
    /// Loads the file (if any) and applies the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => FileConfig::read(path)?,
            None => FileConfig::default(),
        };
        Self::from_sources(file, |name| std::env::var(name).ok())
    }

    pub fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let api_key = non_empty(env(API_KEY_VAR))
            .or(non_empty(file.api_key))
            .ok_or_else(|| {
                TodoError::Config(format!(
                    "no API key: set {API_KEY_VAR} or `api_key` in the config file"
                ))
            })?;

        Ok(Self {
            api_key,
            model: non_empty(env(MODEL_VAR))
                .or(non_empty(file.model))
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: non_empty(file.api_base).unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            output_dir: file
                .output_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        })
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_key_is_set() {
        let config = Config::from_sources(FileConfig::default(), env_of(&[(API_KEY_VAR, "k")]))
            .unwrap();
        assert_eq!(
            config,
            Config {
                api_key: "k".into(),
                model: "gemini-2.0-flash".into(),
                api_base: DEFAULT_API_BASE.into(),
                output_dir: PathBuf::from("pdfs"),
            }
        );
    }

    #[test]
    fn environment_overrides_file() {
        let file = FileConfig {
            api_key: Some("from-file".into()),
            model: Some("file-model".into()),
            api_base: None,
            output_dir: Some(PathBuf::from("out")),
        };
        let config = Config::from_sources(
            file,
            env_of(&[(API_KEY_VAR, "from-env"), (MODEL_VAR, "env-model")]),
        )
        .unwrap();
        assert_eq!(config.api_key, "from-env");
        assert_eq!(config.model, "env-model");
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn missing_or_blank_key_is_config_error() {
        let err = Config::from_sources(FileConfig::default(), env_of(&[(API_KEY_VAR, "  ")]))
            .unwrap_err();
        assert!(matches!(err, TodoError::Config(_)));
    }

    #[test]
    fn reads_toml_file_and_rejects_unknown_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let good = tmp.path().join("good.toml");
        fs::write(&good, "api_key = \"abc\"\noutput_dir = \"answers\"\n").unwrap();
        let file = FileConfig::read(&good).unwrap();
        assert_eq!(file.api_key.as_deref(), Some("abc"));
        assert_eq!(file.output_dir, Some(PathBuf::from("answers")));

        let bad = tmp.path().join("bad.toml");
        fs::write(&bad, "apikey = \"abc\"\n").unwrap();
        assert!(matches!(FileConfig::read(&bad), Err(TodoError::Config(_))));
    }

    #[test]
    fn builder_overrides() {
        let config = Config::from_sources(FileConfig::default(), env_of(&[(API_KEY_VAR, "k")]))
            .unwrap()
            .with_model("gemini-1.5-pro")
            .with_output_dir("elsewhere");
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.output_dir, PathBuf::from("elsewhere"));
    }
}
