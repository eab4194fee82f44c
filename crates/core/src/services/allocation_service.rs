use std::collections::BTreeMap;

use crate::models::analytics::{AllocationMap, HoldingBreakdown};
use crate::models::asset::{AssetCategory, UnifiedAsset};
use crate::services::valuation_service::ValuationService;

/// Breaks portfolio value down by category and by holding.
pub struct AllocationService {
    valuation_service: ValuationService,
}

impl AllocationService {
    pub fn new() -> Self {
        Self {
            valuation_service: ValuationService::new(),
        }
    }

    /// Category → percentage of total value.
    ///
    /// Empty when total value is 0 (no division by zero). Categories whose
    /// holdings are all worth 0 are left out.
    pub fn allocation(&self, assets: &[UnifiedAsset]) -> AllocationMap {
        self.weights(assets)
            .into_iter()
            .map(|(category, w)| (category, w * 100.0))
            .collect()
    }

    /// Category → fraction of total value, in [0, 1].
    pub fn weights(&self, assets: &[UnifiedAsset]) -> BTreeMap<AssetCategory, f64> {
        let total = self.valuation_service.total_value(assets);
        if total <= 0.0 {
            return BTreeMap::new();
        }

        let mut by_category: BTreeMap<AssetCategory, f64> = BTreeMap::new();
        for asset in assets {
            *by_category.entry(asset.category).or_insert(0.0) += asset.value();
        }

        by_category
            .into_iter()
            .filter(|(_, value)| *value > 0.0)
            .map(|(category, value)| (category, value / total))
            .collect()
    }

    /// Per-holding breakdown, sorted by allocation (largest first).
    pub fn holdings_breakdown(&self, assets: &[UnifiedAsset]) -> Vec<HoldingBreakdown> {
        let total = self.valuation_service.total_value(assets);

        let mut breakdown: Vec<HoldingBreakdown> = assets
            .iter()
            .map(|asset| {
                let current_value = asset.value();
                let cost_basis = asset.cost_basis();
                let gain_loss = current_value - cost_basis;
                HoldingBreakdown {
                    id: asset.id.clone(),
                    name: asset.name.clone(),
                    category: asset.category,
                    quantity: asset.quantity,
                    current_value,
                    cost_basis,
                    gain_loss,
                    return_pct: if cost_basis > 0.0 {
                        (gain_loss / cost_basis) * 100.0
                    } else {
                        0.0
                    },
                    allocation_pct: if total > 0.0 {
                        (current_value / total) * 100.0
                    } else {
                        0.0
                    },
                }
            })
            .collect();

        breakdown.sort_by(|a, b| {
            b.allocation_pct
                .partial_cmp(&a.allocation_pct)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        breakdown
    }
}

impl Default for AllocationService {
    fn default() -> Self {
        Self::new()
    }
}
