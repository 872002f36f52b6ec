use crate::error::{Result, ShiptrackError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root folder for per-record item folders
    pub files_root: PathBuf,
    /// Registry blob file
    pub registry_path: PathBuf,
    /// Site list workbook
    pub site_list_path: PathBuf,
    /// Folder of stored notification emails
    pub emails_dir: PathBuf,
    /// Custom notification template; None uses the built-in one
    pub template_path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ShiptrackError::Config("home directory not found".into()))?;
        Ok(home.join(".config").join("shiptrack").join("config.json"))
    }

    /// Notification template body, from the configured file when set
    pub fn notification_template(&self) -> Result<String> {
        match &self.template_path {
            Some(path) => Ok(std::fs::read_to_string(path)?),
            None => Ok(crate::email::NOTIFICATION_TEMPLATE.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            files_root: PathBuf::from("./files"),
            registry_path: PathBuf::from("./settings/registry.json"),
            site_list_path: PathBuf::from("./settings/site_list.xlsx"),
            emails_dir: PathBuf::from("./emails"),
            template_path: None,
        }
    }
}
