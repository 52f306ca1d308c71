use crate::catalog::Catalog;
use crate::error::{AgroDoseError, Result};
use crate::models::DEFAULT_DATE_FORMAT;
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// External catalog file; the built-in catalog is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    #[serde(default = "default_area_ha")]
    pub default_area_ha: f64,
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_area_ha() -> f64 {
    1.0
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Config {
    /// Load config from the override path or standard locations.
    ///
    /// An explicit override must exist; otherwise a missing file yields defaults.
    pub fn load(config_override: Option<&PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => {
                if !p.exists() {
                    return Err(AgroDoseError::Config(format!(
                        "Config file not found at {:?}",
                        p
                    )));
                }
                p.clone()
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| AgroDoseError::Config(format!("Failed to read config: {}", e)))?;

        let config = Self::from_yaml(&config_str)?;
        tracing::debug!(path = %config_path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // Substitute environment variables
        let content = Self::substitute_env_vars(content);

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| AgroDoseError::Config(format!("Failed to parse config: {}", e)))?;

        if !config.default_area_ha.is_finite() || config.default_area_ha <= 0.0 {
            return Err(AgroDoseError::Config(format!(
                "default_area_ha must be positive, got {}",
                config.default_area_ha
            )));
        }
        Ok(config)
    }

    /// Search for config.yaml in the working directory, then the XDG config directory.
    fn find_config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("agrodose").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Default path for writing new config files (~/.config/agrodose/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AgroDoseError::Config("Cannot determine config directory".into()))?
            .join("agrodose");
        Ok(config_dir.join("config.yaml"))
    }

    /// Catalog named by `catalog_path`, or the built-in one.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::load(path),
            None => Catalog::builtin(),
        }
    }

    /// Run interactive setup prompts and write config to disk.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("AgroDose setup");
        println!();

        let catalog_path: String = Input::new()
            .with_prompt("  Catalog file (leave blank for built-in)")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| AgroDoseError::Config(format!("Input error: {}", e)))?;

        let default_area_ha: f64 = Input::new()
            .with_prompt("  Default area (ha)")
            .default(1.0)
            .validate_with(|v: &f64| {
                if v.is_finite() && *v > 0.0 {
                    Ok(())
                } else {
                    Err("area must be positive")
                }
            })
            .interact_text()
            .map_err(|e| AgroDoseError::Config(format!("Input error: {}", e)))?;

        let date_format: String = Input::new()
            .with_prompt("  Date format")
            .default(DEFAULT_DATE_FORMAT.to_string())
            .interact_text()
            .map_err(|e| AgroDoseError::Config(format!("Input error: {}", e)))?;

        let config = Config {
            catalog_path: if catalog_path.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(catalog_path.trim()))
            },
            default_area_ha,
            date_format,
        };

        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| AgroDoseError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# AgroDose Configuration\n# Generated by `agrodose init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!();
        println!("Configuration saved to {}", config_path.display());

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        let re = match regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}") {
            Ok(re) => re,
            Err(_) => return result,
        };

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: None,
            default_area_ha: default_area_ha(),
            date_format: default_date_format(),
        }
    }
}
