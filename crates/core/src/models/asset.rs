use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The category of a holding.
/// Determines the risk coefficient and the default return/volatility
/// assumptions substituted when a holding record omits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    /// Individual equities (AAPL, MSFT, etc.)
    Stock,
    /// Exchange-traded funds
    Etf,
    /// Government and corporate bonds
    Bond,
    /// Real estate, valued as a whole (or by ownership share)
    Property,
    /// Cryptocurrencies (BTC, ETH, etc.)
    Crypto,
    /// Tax-advantaged retirement accounts (401k, IRA, pension)
    RetirementAccount,
    /// Cash and cash equivalents
    Cash,
}

impl AssetCategory {
    /// Every category, lowest risk first.
    pub const ALL: [AssetCategory; 7] = [
        AssetCategory::Cash,
        AssetCategory::Bond,
        AssetCategory::Property,
        AssetCategory::RetirementAccount,
        AssetCategory::Etf,
        AssetCategory::Stock,
        AssetCategory::Crypto,
    ];

    /// Risk weight in [0, 1] used by the risk score.
    pub fn risk_coefficient(self) -> f64 {
        match self {
            AssetCategory::Cash => 0.05,
            AssetCategory::Bond => 0.25,
            AssetCategory::Property => 0.45,
            AssetCategory::RetirementAccount => 0.45,
            AssetCategory::Etf => 0.55,
            AssetCategory::Stock => 0.70,
            AssetCategory::Crypto => 0.95,
        }
    }

    /// Annual expected return assumed when a holding doesn't provide one.
    pub fn default_expected_return(self) -> f64 {
        match self {
            AssetCategory::Cash => 0.02,
            AssetCategory::Bond => 0.04,
            AssetCategory::Property => 0.05,
            AssetCategory::RetirementAccount => 0.065,
            AssetCategory::Etf => 0.07,
            AssetCategory::Stock => 0.08,
            AssetCategory::Crypto => 0.15,
        }
    }

    /// Annualised volatility assumed when a holding doesn't provide one.
    pub fn default_volatility(self) -> f64 {
        match self {
            AssetCategory::Cash => 0.01,
            AssetCategory::Bond => 0.06,
            AssetCategory::Property => 0.10,
            AssetCategory::RetirementAccount => 0.12,
            AssetCategory::Etf => 0.15,
            AssetCategory::Stock => 0.20,
            AssetCategory::Crypto => 0.60,
        }
    }
}

impl std::fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetCategory::Stock => write!(f, "Stock"),
            AssetCategory::Etf => write!(f, "ETF"),
            AssetCategory::Bond => write!(f, "Bond"),
            AssetCategory::Property => write!(f, "Property"),
            AssetCategory::Crypto => write!(f, "Crypto"),
            AssetCategory::RetirementAccount => write!(f, "Retirement Account"),
            AssetCategory::Cash => write!(f, "Cash"),
        }
    }
}

/// The engine's normalized representation of a single holding.
///
/// Produced by the normalization service and never mutated afterwards.
/// `value()` is always derived from `quantity × current_price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedAsset {
    /// Opaque identifier, unique within a portfolio snapshot
    pub id: String,

    /// Ticker symbol or display name, if the record had one
    pub name: Option<String>,

    pub category: AssetCategory,

    /// Units held (always >= 0)
    pub quantity: f64,

    /// Price per unit at acquisition (always >= 0)
    pub purchase_price: f64,

    /// Latest price per unit (always >= 0)
    pub current_price: f64,

    pub currency: String,
    pub region: Option<String>,
    pub exchange: Option<String>,
    pub purchase_date: Option<NaiveDate>,

    /// Annual expected return as a fraction (0.075 = 7.5%)
    pub expected_return: f64,

    /// Annualised volatility as a fraction (0.15 = 15%)
    pub volatility: f64,
}

impl UnifiedAsset {
    /// Current market value: `quantity × current_price`.
    pub fn value(&self) -> f64 {
        self.quantity * self.current_price
    }

    /// Amount originally paid: `quantity × purchase_price`.
    pub fn cost_basis(&self) -> f64 {
        self.quantity * self.purchase_price
    }
}
