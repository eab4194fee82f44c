use log::debug;

use crate::errors::CoreError;
use crate::models::asset::UnifiedAsset;
use crate::models::projection::{ProjectionPoint, ProjectionSeries, ScenarioBundle};
use crate::models::settings::{EngineSettings, GrowthModel};
use crate::services::valuation_service::ValuationService;

/// Deterministic multi-year growth projections.
///
/// This is the single place projection math lives. Every chart, KPI and
/// what-if comparison derives its numbers from here:
///
/// ```text
/// V_0 = total value,            C_0 = V_0
/// V_t = V_{t-1} × (1 + r) + 12m C_t = C_{t-1} + 12m
/// G_t = V_t − C_t
/// ```
///
/// Optimistic and pessimistic paths scale the base-case values by fixed
/// multipliers (from year 1 on) instead of being simulated separately, so
/// the three curves always stay consistent with each other.
pub struct ProjectionService {
    valuation_service: ValuationService,
    base_growth_rate: f64,
    optimistic_multiplier: f64,
    pessimistic_multiplier: f64,
    growth_model: GrowthModel,
}

impl ProjectionService {
    pub fn new(settings: &EngineSettings) -> Self {
        Self {
            valuation_service: ValuationService::new(),
            base_growth_rate: settings.base_growth_rate,
            optimistic_multiplier: settings.optimistic_multiplier,
            pessimistic_multiplier: settings.pessimistic_multiplier,
            growth_model: settings.growth_model,
        }
    }

    /// Annual growth rate used for these assets under the configured model.
    pub fn growth_rate(&self, assets: &[UnifiedAsset]) -> f64 {
        match self.growth_model {
            GrowthModel::Uniform => self.base_growth_rate,
            GrowthModel::AssetBlend => {
                let total = self.valuation_service.total_value(assets);
                if total <= 0.0 {
                    return self.base_growth_rate;
                }
                assets
                    .iter()
                    .map(|a| a.value() * a.expected_return)
                    .sum::<f64>()
                    / total
            }
        }
    }

    /// Project the portfolio under all three scenarios.
    pub fn project(
        &self,
        assets: &[UnifiedAsset],
        monthly_contribution: f64,
        horizon_years: i32,
    ) -> Result<ScenarioBundle, CoreError> {
        let starting_value = self.valuation_service.total_value(assets);
        let rate = self.growth_rate(assets);
        let base_case = self.base_case(starting_value, rate, monthly_contribution, horizon_years)?;

        Ok(ScenarioBundle {
            optimistic: Self::scale(&base_case, self.optimistic_multiplier),
            pessimistic: Self::scale(&base_case, self.pessimistic_multiplier),
            base_case,
        })
    }

    /// Base-case path from an explicit starting value and rate.
    ///
    /// Returns `horizon_years + 1` points, year 0 first.
    pub fn base_case(
        &self,
        starting_value: f64,
        annual_rate: f64,
        monthly_contribution: f64,
        horizon_years: i32,
    ) -> Result<ProjectionSeries, CoreError> {
        if horizon_years < 0 {
            return Err(CoreError::InvalidHorizon(horizon_years));
        }
        if !monthly_contribution.is_finite() || monthly_contribution < 0.0 {
            return Err(CoreError::InvalidContribution(monthly_contribution));
        }

        debug!(
            "Projecting {horizon_years} years from {starting_value:.2} at {:.2}% with {monthly_contribution:.2}/month",
            annual_rate * 100.0
        );

        let yearly_contribution = monthly_contribution * 12.0;
        let horizon = horizon_years as u32;
        let mut series = Vec::with_capacity(horizon as usize + 1);

        let mut value = starting_value;
        let mut contributions = starting_value;
        series.push(ProjectionPoint::new(0, value, contributions));

        for year in 1..=horizon {
            value = value * (1.0 + annual_rate) + yearly_contribution;
            contributions += yearly_contribution;
            series.push(ProjectionPoint::new(year, value, contributions));
        }

        Ok(series)
    }

    /// First year whose projected value reaches `target`, if any.
    pub fn years_to_target(&self, series: &[ProjectionPoint], target: f64) -> Option<u32> {
        series
            .iter()
            .find(|p| p.total_value >= target)
            .map(|p| p.year)
    }

    /// Scale values from year 1 onwards; contributions are unchanged.
    fn scale(base_case: &[ProjectionPoint], multiplier: f64) -> ProjectionSeries {
        base_case
            .iter()
            .map(|p| {
                if p.year == 0 {
                    *p
                } else {
                    ProjectionPoint::new(p.year, p.total_value * multiplier, p.contributions)
                }
            })
            .collect()
    }
}

impl Default for ProjectionService {
    fn default() -> Self {
        Self::new(&EngineSettings::default())
    }
}
