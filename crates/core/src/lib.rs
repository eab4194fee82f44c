pub mod errors;
pub mod models;
pub mod services;

use chrono::NaiveDate;
use log::debug;
use models::{
    analytics::{AllocationMap, PortfolioSnapshot, RiskLevel},
    asset::UnifiedAsset,
    chart::{HistoryPoint, ProjectionChartRow, WhatIfChartRow},
    holding::RawHolding,
    projection::{Assumptions, ScenarioBundle, WhatIfAssumptions, WhatIfResult},
    settings::EngineSettings,
};
use rand::Rng;
use serde::Serialize;
use services::{
    allocation_service::AllocationService, chart_service::ChartService,
    normalization_service::NormalizationService, projection_service::ProjectionService,
    risk_service::RiskService, scenario_service::ScenarioService,
    valuation_service::ValuationService,
};

use errors::CoreError;

/// Main entry point for the portfolio engine.
///
/// Holds immutable settings and the services built from them. Every method
/// takes `&self` and computes from its arguments alone, so one engine can be
/// shared between any number of callers.
#[must_use]
pub struct PortfolioEngine {
    settings: EngineSettings,
    normalization_service: NormalizationService,
    valuation_service: ValuationService,
    allocation_service: AllocationService,
    risk_service: RiskService,
    projection_service: ProjectionService,
    scenario_service: ScenarioService,
    chart_service: ChartService,
}

impl std::fmt::Debug for PortfolioEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PortfolioEngine")
            .field("settings", &self.settings)
            .finish()
    }
}

impl Default for PortfolioEngine {
    fn default() -> Self {
        Self::build(EngineSettings::default())
    }
}

impl PortfolioEngine {
    /// Create an engine with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom settings. Settings are validated first.
    pub fn with_settings(settings: EngineSettings) -> Result<Self, CoreError> {
        settings.validate()?;
        Ok(Self::build(settings))
    }

    #[must_use]
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    // ── Input ───────────────────────────────────────────────────────

    /// Decode a JSON array of holding records.
    pub fn holdings_from_json(json: &str) -> Result<Vec<RawHolding>, CoreError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Normalize raw records into unified assets (one per record, same order).
    pub fn normalize(&self, holdings: &[RawHolding]) -> Result<Vec<UnifiedAsset>, CoreError> {
        self.normalization_service
            .normalize(holdings, &self.settings.default_currency)
    }

    // ── Valuation & Allocation ──────────────────────────────────────

    #[must_use]
    pub fn total_value(&self, assets: &[UnifiedAsset]) -> f64 {
        self.valuation_service.total_value(assets)
    }

    #[must_use]
    pub fn allocation(&self, assets: &[UnifiedAsset]) -> AllocationMap {
        self.allocation_service.allocation(assets)
    }

    // ── Scores ──────────────────────────────────────────────────────

    #[must_use]
    pub fn risk_score(&self, assets: &[UnifiedAsset]) -> u8 {
        self.risk_service.risk_score(assets)
    }

    #[must_use]
    pub fn diversification_score(&self, assets: &[UnifiedAsset]) -> u8 {
        self.risk_service.diversification_score(assets)
    }

    /// Everything the dashboard KPIs show, in one pass.
    #[must_use]
    pub fn analyze(&self, assets: &[UnifiedAsset]) -> PortfolioSnapshot {
        let total_value = self.valuation_service.total_value(assets);
        let total_cost_basis = self.valuation_service.total_cost_basis(assets);
        let total_gain_loss = total_value - total_cost_basis;
        let risk_score = self.risk_service.risk_score(assets);

        debug!(
            "Analyzed {} assets: value {total_value:.2}, risk {risk_score}",
            assets.len()
        );

        PortfolioSnapshot {
            currency: self.settings.default_currency.clone(),
            total_value,
            total_cost_basis,
            total_gain_loss,
            total_return_pct: if total_cost_basis > 0.0 {
                (total_gain_loss / total_cost_basis) * 100.0
            } else {
                0.0
            },
            allocation: self.allocation_service.allocation(assets),
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
            diversification_score: self.risk_service.diversification_score(assets),
            holdings: self.allocation_service.holdings_breakdown(assets),
        }
    }

    /// Normalize then analyze.
    pub fn analyze_holdings(&self, holdings: &[RawHolding]) -> Result<PortfolioSnapshot, CoreError> {
        let assets = self.normalize(holdings)?;
        Ok(self.analyze(&assets))
    }

    // ── Projections ─────────────────────────────────────────────────

    /// Base, optimistic and pessimistic projections over `horizon_years`.
    pub fn project(
        &self,
        assets: &[UnifiedAsset],
        monthly_contribution: f64,
        horizon_years: i32,
    ) -> Result<ScenarioBundle, CoreError> {
        self.projection_service
            .project(assets, monthly_contribution, horizon_years)
    }

    /// Current plan vs. modified plan, over a shared horizon.
    pub fn what_if(
        &self,
        assets: &[UnifiedAsset],
        current: &Assumptions,
        modified: &WhatIfAssumptions,
        current_age: i32,
    ) -> Result<WhatIfResult, CoreError> {
        self.scenario_service
            .compare(assets, current, modified, current_age)
    }

    /// First year the base case reaches `target`, if within the bundle.
    #[must_use]
    pub fn years_to_target(&self, bundle: &ScenarioBundle, target: f64) -> Option<u32> {
        self.projection_service
            .years_to_target(&bundle.base_case, target)
    }

    // ── Charts ──────────────────────────────────────────────────────

    #[must_use]
    pub fn projection_chart(&self, bundle: &ScenarioBundle) -> Vec<ProjectionChartRow> {
        self.chart_service.projection_chart(bundle)
    }

    #[must_use]
    pub fn what_if_chart(&self, result: &WhatIfResult) -> Vec<WhatIfChartRow> {
        self.chart_service.what_if_chart(result)
    }

    /// Simulated daily history ending at `as_of`. See
    /// [`ChartService::simulate_history`].
    pub fn simulate_history<R: Rng + ?Sized>(
        &self,
        assets: &[UnifiedAsset],
        as_of: NaiveDate,
        days: u32,
        rng: &mut R,
    ) -> Vec<HistoryPoint> {
        self.chart_service.simulate_history(assets, as_of, days, rng)
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Encode any engine output (snapshot, bundle, what-if result) as JSON.
    pub fn to_json<T: Serialize>(value: &T) -> Result<String, CoreError> {
        serde_json::to_string(value).map_err(|e| CoreError::Serialization(e.to_string()))
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(settings: EngineSettings) -> Self {
        let normalization_service = NormalizationService::new();
        let valuation_service = ValuationService::new();
        let allocation_service = AllocationService::new();
        let risk_service = RiskService::new(settings.concentration_penalty);
        let projection_service = ProjectionService::new(&settings);
        let scenario_service = ScenarioService::new(&settings);
        let chart_service = ChartService::new();

        Self {
            settings,
            normalization_service,
            valuation_service,
            allocation_service,
            risk_service,
            projection_service,
            scenario_service,
            chart_service,
        }
    }
}
