use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use dirs::home_dir;
use serde::{Deserialize, Serialize};

use crate::{
    currency::{CurrencyCode, LocaleConfig},
    errors::NatilleraError,
    savings::DEFAULT_INTEREST_RATE_PCT,
};

const DEFAULT_DIR_NAME: &str = ".natillera";
const CONFIG_FILE: &str = "config.json";
const HOME_ENV: &str = "NATILLERA_HOME";
const TMP_SUFFIX: &str = "tmp";

fn default_rate() -> f64 {
    DEFAULT_INTEREST_RATE_PCT
}

fn default_history_limit() -> usize {
    20
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    /// Rate given to savings accounts created without one.
    #[serde(default = "default_rate")]
    pub default_interest_rate_pct: f64,
    /// How many ledger rows history views show.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "es-CO".into(),
            currency: "COP".into(),
            default_interest_rate_pct: DEFAULT_INTEREST_RATE_PCT,
            history_limit: default_history_limit(),
        }
    }
}

impl Config {
    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::for_tag(&self.locale, CurrencyCode::new(&self.currency))
    }

    /// Applies a `key value` pair coming from the shell.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), NatilleraError> {
        match key {
            "locale" => self.locale = value.to_string(),
            "currency" => self.currency = value.to_uppercase(),
            "default_interest_rate_pct" | "rate" => {
                self.default_interest_rate_pct = parse_value(key, value)?;
            }
            "history_limit" => self.history_limit = parse_value(key, value)?,
            other => {
                return Err(NatilleraError::Config(format!(
                    "unknown configuration key `{other}`"
                )))
            }
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, NatilleraError> {
    value
        .parse()
        .map_err(|_| NatilleraError::Config(format!("invalid value `{value}` for `{key}`")))
}

/// Returns the application data directory, defaulting to `~/.natillera`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, NatilleraError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, NatilleraError> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<Config, NatilleraError> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<(), NatilleraError> {
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), NatilleraError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_interest_rate_pct, 8.5);
    }

    #[test]
    fn saved_configuration_is_reloaded() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().join("nested")).unwrap();
        let mut config = Config::default();
        config.set("history_limit", "5").unwrap();
        config.set("currency", "usd").unwrap();
        manager.save(&config).unwrap();

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.history_limit, 5);
        assert_eq!(loaded.currency, "USD");
        assert!(!tmp_path(manager.path()).exists());
    }

    #[test]
    fn older_files_without_new_fields_still_load() {
        let dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).unwrap();
        fs::write(manager.path(), r#"{"locale":"en-US","currency":"USD"}"#).unwrap();
        let config = manager.load().unwrap();
        assert_eq!(config.history_limit, 20);
        assert_eq!(config.locale_config().grouping_separator, ',');
    }

    #[test]
    fn rejects_unknown_keys_and_bad_values() {
        let mut config = Config::default();
        assert!(matches!(
            config.set("theme", "dark"),
            Err(NatilleraError::Config(_))
        ));
        assert!(config.set("history_limit", "many").is_err());
    }
}
