use crate::models::analytics::AllocationMap;
use crate::models::asset::UnifiedAsset;
use crate::services::allocation_service::AllocationService;

/// Score returned for a portfolio with nothing in it.
pub const NEUTRAL_RISK_SCORE: u8 = 50;

/// Risk and diversification scoring.
///
/// Both scores share one concentration measure: the Herfindahl index of
/// category weights, `HHI = Σ w²`, which is 1 for a single-category
/// portfolio and 1/n for value spread evenly over n categories.
pub struct RiskService {
    allocation_service: AllocationService,
    concentration_penalty: f64,
}

impl RiskService {
    /// `concentration_penalty` is the number of risk points added when
    /// the whole portfolio sits in one category.
    pub fn new(concentration_penalty: f64) -> Self {
        Self {
            allocation_service: AllocationService::new(),
            concentration_penalty,
        }
    }

    /// Herfindahl index over category weights. 0 for an empty portfolio.
    pub fn concentration_index(&self, assets: &[UnifiedAsset]) -> f64 {
        Self::hhi(&self.allocation_service.weights(assets))
    }

    /// Composite risk in [0, 100].
    ///
    /// Value-weighted mean of category risk coefficients scaled to 100,
    /// plus `concentration_penalty × HHI`. Neutral 50 when there is no value.
    pub fn risk_score(&self, assets: &[UnifiedAsset]) -> u8 {
        let weights = self.allocation_service.weights(assets);
        if weights.is_empty() {
            return NEUTRAL_RISK_SCORE;
        }

        let weighted: f64 = weights
            .iter()
            .map(|(category, w)| w * category.risk_coefficient())
            .sum();

        Self::to_score(weighted * 100.0 + self.concentration_penalty * Self::hhi(&weights))
    }

    /// `100 × (1 − HHI)` in [0, 100]. 0 when there is no value to spread.
    pub fn diversification_score(&self, assets: &[UnifiedAsset]) -> u8 {
        let weights = self.allocation_service.weights(assets);
        if weights.is_empty() {
            return 0;
        }
        Self::to_score(100.0 * (1.0 - Self::hhi(&weights)))
    }

    fn hhi(weights: &AllocationMap) -> f64 {
        weights.values().map(|w| w * w).sum()
    }

    fn to_score(raw: f64) -> u8 {
        if raw.is_nan() {
            return NEUTRAL_RISK_SCORE;
        }
        raw.clamp(0.0, 100.0).round() as u8
    }
}

impl Default for RiskService {
    fn default() -> Self {
        Self::new(25.0)
    }
}
