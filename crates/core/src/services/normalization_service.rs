use log::warn;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::asset::{AssetCategory, UnifiedAsset};
use crate::models::holding::{AccountBalance, MarketPosition, PropertyHolding, RawHolding};

/// Maps heterogeneous holding records into `UnifiedAsset`s.
///
/// Pure business logic, no I/O. Every record yields exactly one asset, in
/// input order. Missing optional fields get category defaults; negative
/// amounts are clamped to zero. Non-finite numbers are rejected, as are
/// finite fields whose product (value or cost basis) overflows.
pub struct NormalizationService;

impl NormalizationService {
    pub fn new() -> Self {
        Self
    }

    /// Normalize every record. `default_currency` is used for records
    /// that don't state a currency.
    pub fn normalize(
        &self,
        holdings: &[RawHolding],
        default_currency: &str,
    ) -> Result<Vec<UnifiedAsset>, CoreError> {
        holdings
            .iter()
            .map(|h| self.normalize_one(h, default_currency))
            .collect()
    }

    pub fn normalize_one(
        &self,
        holding: &RawHolding,
        default_currency: &str,
    ) -> Result<UnifiedAsset, CoreError> {
        match holding {
            RawHolding::Stock(p) => {
                Self::from_market(p, AssetCategory::Stock, None, default_currency)
            }
            RawHolding::Etf(p) => Self::from_market(p, AssetCategory::Etf, None, default_currency),
            RawHolding::Crypto(p) => {
                Self::from_market(p, AssetCategory::Crypto, None, default_currency)
            }
            RawHolding::Bond(b) => {
                // Coupon stands in for the expected return when none is given
                let coupon = b.coupon_rate.filter(|c| c.is_finite() && *c >= 0.0);
                Self::from_market(&b.position, AssetCategory::Bond, coupon, default_currency)
            }
            RawHolding::Property(p) => Self::from_property(p, default_currency),
            RawHolding::RetirementAccount(a) => {
                Self::from_account(a, AssetCategory::RetirementAccount, default_currency)
            }
            RawHolding::Cash(a) => Self::from_account(a, AssetCategory::Cash, default_currency),
        }
    }

    fn from_market(
        p: &MarketPosition,
        category: AssetCategory,
        fallback_return: Option<f64>,
        default_currency: &str,
    ) -> Result<UnifiedAsset, CoreError> {
        let id = Self::resolve_id(p.id.as_deref());
        let quantity = Self::amount(&id, "quantity", p.quantity)?.unwrap_or(0.0);
        let purchase_price = Self::amount(&id, "purchasePrice", p.purchase_price)?;
        let current_price = Self::amount(&id, "currentPrice", p.current_price)?;

        Self::checked(UnifiedAsset {
            name: p.symbol.as_ref().map(|s| s.to_uppercase()),
            category,
            quantity,
            purchase_price: purchase_price.or(current_price).unwrap_or(0.0),
            current_price: current_price.or(purchase_price).unwrap_or(0.0),
            currency: Self::currency(p.currency.as_deref(), default_currency),
            region: p.region.clone(),
            exchange: p.exchange.clone(),
            purchase_date: p.purchase_date,
            expected_return: Self::expected_return(category, p.expected_return, fallback_return),
            volatility: Self::volatility(category, p.volatility),
            id,
        })
    }

    fn from_property(
        p: &PropertyHolding,
        default_currency: &str,
    ) -> Result<UnifiedAsset, CoreError> {
        let category = AssetCategory::Property;
        let id = Self::resolve_id(p.id.as_deref());
        let purchase_price = Self::amount(&id, "purchasePrice", p.purchase_price)?;
        let current_value = Self::amount(&id, "currentValue", p.current_value)?;
        let share = Self::amount(&id, "ownershipShare", p.ownership_share)?
            .map(|s| s.min(1.0))
            .unwrap_or(1.0);

        Self::checked(UnifiedAsset {
            name: p.name.clone(),
            category,
            quantity: share,
            purchase_price: purchase_price.or(current_value).unwrap_or(0.0),
            current_price: current_value.or(purchase_price).unwrap_or(0.0),
            currency: Self::currency(p.currency.as_deref(), default_currency),
            region: p.region.clone(),
            exchange: None,
            purchase_date: p.purchase_date,
            expected_return: Self::expected_return(category, p.expected_return, None),
            volatility: Self::volatility(category, p.volatility),
            id,
        })
    }

    fn from_account(
        a: &AccountBalance,
        category: AssetCategory,
        default_currency: &str,
    ) -> Result<UnifiedAsset, CoreError> {
        let id = Self::resolve_id(a.id.as_deref());
        let balance = Self::amount(&id, "balance", a.balance)?.unwrap_or(0.0);
        let cost_basis = Self::amount(&id, "costBasis", a.cost_basis)?.unwrap_or(balance);

        Self::checked(UnifiedAsset {
            name: a.name.clone(),
            category,
            quantity: 1.0,
            purchase_price: cost_basis,
            current_price: balance,
            currency: Self::currency(a.currency.as_deref(), default_currency),
            region: a.region.clone(),
            exchange: a.institution.clone(),
            purchase_date: a.opened_date,
            expected_return: Self::expected_return(category, a.expected_return, None),
            volatility: Self::volatility(category, a.volatility),
            id,
        })
    }

    fn checked(asset: UnifiedAsset) -> Result<UnifiedAsset, CoreError> {
        if asset.value().is_finite() && asset.cost_basis().is_finite() {
            Ok(asset)
        } else {
            Err(CoreError::InvalidHolding {
                id: asset.id,
                field: "value".to_string(),
            })
        }
    }

    /// Validate an optional amount: non-finite is an error, negative clamps to 0.
    fn amount(id: &str, field: &str, value: Option<f64>) -> Result<Option<f64>, CoreError> {
        match value {
            None => Ok(None),
            Some(v) if !v.is_finite() => Err(CoreError::InvalidHolding {
                id: id.to_string(),
                field: field.to_string(),
            }),
            Some(v) if v < 0.0 => {
                warn!("Holding {id}: negative {field} ({v}) clamped to 0");
                Ok(Some(0.0))
            }
            Some(v) => Ok(Some(v)),
        }
    }

    fn resolve_id(id: Option<&str>) -> String {
        match id.map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => Uuid::new_v4().to_string(),
        }
    }

    fn currency(currency: Option<&str>, default_currency: &str) -> String {
        match currency.map(str::trim) {
            Some(c) if !c.is_empty() => c.to_uppercase(),
            _ => default_currency.to_uppercase(),
        }
    }

    fn expected_return(category: AssetCategory, given: Option<f64>, fallback: Option<f64>) -> f64 {
        given
            .filter(|r| r.is_finite() && *r > -1.0)
            .or(fallback)
            .unwrap_or_else(|| category.default_expected_return())
    }

    fn volatility(category: AssetCategory, given: Option<f64>) -> f64 {
        given
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or_else(|| category.default_volatility())
    }
}

impl Default for NormalizationService {
    fn default() -> Self {
        Self::new()
    }
}
