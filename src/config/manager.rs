use super::{evolution::EvolutionConfig, mutation::MutationConfig, traits::validate_section};
use crate::error::EvobugError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Environment prefix for layered configuration (`EVOBUG_EVOLUTION__SEED=7`)
pub const ENV_PREFIX: &str = "EVOBUG";

/// Setting this variable to `0` forces the built-in mutant catalogue
pub const FORCE_FALLBACK_VAR: &str = "EVOBUG_MUTPY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub mutation: MutationConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), EvobugError> {
        validate_section(&self.evolution)?;
        validate_section(&self.mutation)?;
        Ok(())
    }

    /// Apply the legacy fallback switch, reading variables through `lookup`
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if lookup(FORCE_FALLBACK_VAR).as_deref() == Some("0") {
            log::info!("{}=0, forcing fallback mutation scoring", FORCE_FALLBACK_VAR);
            self.mutation.force_fallback = true;
        }
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), EvobugError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| EvobugError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| EvobugError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;

        *self.config.write().unwrap_or_else(|e| e.into_inner()) = config;
        Ok(())
    }

    /// Load an optional TOML file, then environment variables on top of it.
    pub fn load_layered<P: AsRef<Path>>(&self, path: P) -> Result<(), EvobugError> {
        let layered = config::Config::builder()
            .add_source(config::File::from(path.as_ref()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| EvobugError::Configuration(format!("Failed to layer config: {}", e)))?;

        let mut config: AppConfig = layered
            .try_deserialize()
            .map_err(|e| EvobugError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        *self.config.write().unwrap_or_else(|e| e.into_inner()) = config;
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), EvobugError> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| EvobugError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| EvobugError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn update<F>(&self, f: F) -> Result<(), EvobugError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.config.write().unwrap_or_else(|e| e.into_inner());
        let mut candidate = config.clone();
        f(&mut candidate);
        candidate.validate()?;
        *config = candidate;
        Ok(())
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
