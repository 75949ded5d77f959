use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use menu_grid_core::GridSettings;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub store: StoreConfig,
    pub grid: GridConfig,
    pub events: EventsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StoreConfig {
    /// JSON document holding the full menu list
    pub path: String,
    /// Write an empty list at startup when the document is missing
    pub create_if_missing: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GridConfig {
    pub default_cols: u32,
    pub default_gap: u32,
    pub debounce_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct EventsConfig {
    pub capacity: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub json: bool,
    /// Also write daily rolling log files here
    pub directory: Option<String>,
}

impl Settings {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("store.path", "public/data/data.json")?
            .set_default("store.create_if_missing", true)?
            .set_default("grid.default_cols", 6)?
            .set_default("grid.default_gap", 0)?
            .set_default("grid.debounce_ms", 100)?
            .set_default("events.capacity", 64)?
            .set_default("logging.json", true)?
            .add_source(File::with_name("config/settings").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }

    pub fn store_path(&self) -> PathBuf {
        PathBuf::from(&self.store.path)
    }

    pub fn grid_settings(&self) -> GridSettings {
        GridSettings {
            cols: self.grid.default_cols,
            gap: self.grid.default_gap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load_without_config_file() {
        let settings = Settings::load().unwrap();
        assert!(settings.events.capacity > 0);
        assert!((1..=12).contains(&settings.grid.default_cols));
        assert!(!settings.store.path.is_empty());
    }
}
