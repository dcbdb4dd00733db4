//! Engine configuration
//!
//! Loaded with figment. Priority (highest to lowest):
//! 1. Environment variables prefixed `HP12C_` (`HP12C_DISPLAY__DECIMAL_PLACES=4`)
//! 2. An optional YAML file
//! 3. Built-in defaults, which reproduce the calculator's factory behaviour

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::display::MAX_DECIMAL_PLACES;
use crate::error::{EngineError, Result};

pub const ENV_PREFIX: &str = "HP12C_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub display: DisplayConfig,
    pub solver: SolverConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Places shown at start-up and restored by ON
    pub decimal_places: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { decimal_places: 2 }
    }
}

/// Secant-method settings for solving the interest rate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub max_iterations: u32,
    pub tolerance: Decimal,
    pub first_guess: Decimal,
    pub second_guess: Decimal,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            tolerance: Decimal::new(1, 9),
            first_guess: Decimal::new(5, 3),
            second_guess: Decimal::new(1, 2),
        }
    }
}

impl EngineConfig {
    /// Load defaults, then `path` (if any), then `HP12C_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(EngineConfig::default()));
        if let Some(path) = path {
            if !path.exists() {
                return Err(EngineError::config(format!("config file not found: {}", path.display())));
            }
            figment = figment.merge(Yaml::file(path));
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        Self::from_figment(&figment)
    }

    /// Extract and validate from an already assembled figment
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let config: EngineConfig = figment
            .extract()
            .map_err(|e| EngineError::config(format!("Failed to load configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.display.decimal_places > MAX_DECIMAL_PLACES {
            return Err(EngineError::config(format!(
                "display.decimal_places must be 0..={}, got {}",
                MAX_DECIMAL_PLACES, self.display.decimal_places
            )));
        }
        if self.solver.max_iterations == 0 {
            return Err(EngineError::config("solver.max_iterations must be positive"));
        }
        if self.solver.tolerance <= Decimal::ZERO {
            return Err(EngineError::config("solver.tolerance must be positive"));
        }
        if self.solver.first_guess == self.solver.second_guess {
            return Err(EngineError::config("solver guesses must differ"));
        }
        Ok(())
    }
}
