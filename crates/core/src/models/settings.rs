use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// How the projection picks its annual growth rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthModel {
    /// `base_growth_rate` for every portfolio, regardless of mix
    #[default]
    Uniform,
    /// Value-weighted mean of each asset's expected return
    AssetBlend,
}

/// Engine configuration. Every field has a default, so a partial JSON
/// document only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineSettings {
    /// Currency assigned to holdings that don't state one (e.g., "USD", "EUR").
    pub default_currency: String,

    /// Annual growth rate of the base scenario (0.075 = 7.5%)
    pub base_growth_rate: f64,

    /// Factor applied to base-case values for the optimistic scenario
    pub optimistic_multiplier: f64,

    /// Factor applied to base-case values for the pessimistic scenario
    pub pessimistic_multiplier: f64,

    /// Upper bound on the what-if horizon in years
    pub max_horizon_years: u32,

    /// Risk points added for a fully concentrated portfolio (HHI = 1)
    pub concentration_penalty: f64,

    pub growth_model: GrowthModel,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            default_currency: "USD".to_string(),
            base_growth_rate: 0.075,
            optimistic_multiplier: 1.30,
            pessimistic_multiplier: 0.75,
            max_horizon_years: 30,
            concentration_penalty: 25.0,
            growth_model: GrowthModel::Uniform,
        }
    }
}

impl EngineSettings {
    /// Parse settings from JSON and validate them.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let settings: EngineSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(self).map_err(|e| CoreError::Serialization(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.default_currency.trim().is_empty() {
            return Err(CoreError::InvalidSettings(
                "default currency must not be empty".into(),
            ));
        }
        if !self.base_growth_rate.is_finite() || self.base_growth_rate <= -1.0 {
            return Err(CoreError::InvalidSettings(format!(
                "base growth rate must be finite and greater than -1, got {}",
                self.base_growth_rate
            )));
        }
        for (name, value) in [
            ("optimistic multiplier", self.optimistic_multiplier),
            ("pessimistic multiplier", self.pessimistic_multiplier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::InvalidSettings(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !(0.0..=100.0).contains(&self.concentration_penalty) {
            return Err(CoreError::InvalidSettings(format!(
                "concentration penalty must be within [0, 100], got {}",
                self.concentration_penalty
            )));
        }
        Ok(())
    }
}
