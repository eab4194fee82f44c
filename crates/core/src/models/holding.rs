use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A raw holding record as supplied by the portfolio store.
///
/// Records are heterogeneous: market securities carry quantity and prices,
/// property carries a valuation, accounts carry a balance. The `"type"`
/// field selects the variant when decoding JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawHolding {
    Stock(MarketPosition),
    Etf(MarketPosition),
    Crypto(MarketPosition),
    Bond(BondPosition),
    Property(PropertyHolding),
    RetirementAccount(AccountBalance),
    Cash(AccountBalance),
}

/// A position in an exchange-traded instrument (stock, ETF, crypto).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarketPosition {
    pub id: Option<String>,
    pub symbol: Option<String>,
    pub quantity: Option<f64>,
    pub purchase_price: Option<f64>,
    pub current_price: Option<f64>,
    pub currency: Option<String>,
    pub region: Option<String>,
    pub exchange: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub expected_return: Option<f64>,
    pub volatility: Option<f64>,
    /// Free-form data the engine ignores (sector, notes, broker, ...)
    pub metadata: HashMap<String, serde_json::Value>,
}

/// A bond position. Same shape as a market position plus coupon details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BondPosition {
    #[serde(flatten)]
    pub position: MarketPosition,

    /// Annual coupon as a fraction; used as the expected return when
    /// the record doesn't state one explicitly.
    pub coupon_rate: Option<f64>,

    pub maturity_date: Option<NaiveDate>,
}

/// A property holding, valued as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PropertyHolding {
    pub id: Option<String>,
    pub name: Option<String>,
    pub purchase_price: Option<f64>,
    pub current_value: Option<f64>,
    /// Fraction of the property owned, in [0, 1]. Defaults to 1.
    pub ownership_share: Option<f64>,
    pub currency: Option<String>,
    pub region: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub expected_return: Option<f64>,
    pub volatility: Option<f64>,
    pub metadata: HashMap<String, serde_json::Value>,
}

/// A balance-only holding: retirement account or cash.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountBalance {
    pub id: Option<String>,
    pub name: Option<String>,
    pub balance: Option<f64>,
    /// Total paid in; defaults to the balance (no gain/loss).
    pub cost_basis: Option<f64>,
    pub institution: Option<String>,
    pub currency: Option<String>,
    pub region: Option<String>,
    pub opened_date: Option<NaiveDate>,
    pub expected_return: Option<f64>,
    pub volatility: Option<f64>,
    pub metadata: HashMap<String, serde_json::Value>,
}
