use crate::models::asset::UnifiedAsset;

/// Sums market value across normalized assets. Cannot fail.
pub struct ValuationService;

impl ValuationService {
    pub fn new() -> Self {
        Self
    }

    /// Σ quantity × current price. Returns 0 for an empty list.
    pub fn total_value(&self, assets: &[UnifiedAsset]) -> f64 {
        assets.iter().map(UnifiedAsset::value).sum()
    }

    /// Σ quantity × purchase price.
    pub fn total_cost_basis(&self, assets: &[UnifiedAsset]) -> f64 {
        assets.iter().map(UnifiedAsset::cost_basis).sum()
    }
}

impl Default for ValuationService {
    fn default() -> Self {
        Self::new()
    }
}
