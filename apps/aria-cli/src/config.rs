use anyhow::Result;
use command_core::PipelineConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default = "default_history_path")]
    pub history_path: String,
    #[serde(default = "default_templates_path")]
    pub templates_path: String,
}

fn default_history_path() -> String {
    "data/history.jsonl".to_string()
}

fn default_templates_path() -> String {
    "data/templates.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            history_path: default_history_path(),
            templates_path: default_templates_path(),
        }
    }
}

impl Config {
    /// Load the config file, writing the defaults out when it does not exist
    /// yet so the user has something to edit.
    pub fn load(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            let contents = fs::read_to_string(path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            let config = Self::default();
            config.save(path)?;
            Ok(config)
        }
    }

    pub fn save(&self, path: &str) -> Result<()> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
