use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::asset::AssetCategory;

/// Category → percentage of total portfolio value (0–100).
///
/// Only categories with nonzero value are present. Percentages are not
/// forced to sum to exactly 100; consumers tolerate small rounding drift.
pub type AllocationMap = BTreeMap<AssetCategory, f64>;

/// Coarse label for a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Low below 35, High from 65 up, Moderate in between.
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=34 => RiskLevel::Low,
            35..=64 => RiskLevel::Moderate,
            _ => RiskLevel::High,
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Moderate => write!(f, "Moderate"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// Summary of the whole portfolio, as rendered by the dashboard KPIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    /// Currency used for all monetary values
    pub currency: String,

    /// Σ quantity × current price
    pub total_value: f64,

    /// Σ quantity × purchase price
    pub total_cost_basis: f64,

    /// total_value - total_cost_basis
    pub total_gain_loss: f64,

    /// (total_gain_loss / total_cost_basis) * 100, or 0 without a cost basis
    pub total_return_pct: f64,

    pub allocation: AllocationMap,

    /// Composite risk, 0–100
    pub risk_score: u8,

    pub risk_level: RiskLevel,

    /// Spread of value across categories, 0–100
    pub diversification_score: u8,

    /// Per-holding breakdown, largest allocation first
    pub holdings: Vec<HoldingBreakdown>,
}

/// Breakdown of a single holding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingBreakdown {
    pub id: String,
    pub name: Option<String>,
    pub category: AssetCategory,
    pub quantity: f64,
    pub current_value: f64,
    pub cost_basis: f64,
    pub gain_loss: f64,
    pub return_pct: f64,

    /// This holding's value / total portfolio value × 100
    pub allocation_pct: f64,
}
