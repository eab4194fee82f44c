use chrono::{Days, NaiveDate};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::models::asset::UnifiedAsset;
use crate::models::chart::{HistoryPoint, ProjectionChartRow, WhatIfChartRow};
use crate::models::projection::{ScenarioBundle, WhatIfResult};
use crate::services::valuation_service::ValuationService;

/// Trading days per year, used to turn annual volatility into daily.
const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Generates chart-ready data sets from engine results.
///
/// The core computes all the numbers; the frontend only renders.
pub struct ChartService {
    valuation_service: ValuationService,
}

impl ChartService {
    pub fn new() -> Self {
        Self {
            valuation_service: ValuationService::new(),
        }
    }

    /// One row per projected year with all three scenarios side by side.
    pub fn projection_chart(&self, bundle: &ScenarioBundle) -> Vec<ProjectionChartRow> {
        bundle
            .base_case
            .iter()
            .zip(&bundle.optimistic)
            .zip(&bundle.pessimistic)
            .map(|((base, opt), pess)| ProjectionChartRow {
                year: base.year,
                base_case: base.total_value,
                optimistic: opt.total_value,
                pessimistic: pess.total_value,
                contributions: base.contributions,
            })
            .collect()
    }

    /// One row per year comparing the current plan with the what-if plan.
    pub fn what_if_chart(&self, result: &WhatIfResult) -> Vec<WhatIfChartRow> {
        result
            .current
            .iter()
            .zip(&result.what_if)
            .map(|(current, what_if)| WhatIfChartRow {
                year: current.year,
                current: current.total_value,
                what_if: what_if.total_value,
                difference: what_if.total_value - current.total_value,
            })
            .collect()
    }

    /// Value-weighted annual volatility of the portfolio. 0 when empty.
    pub fn portfolio_volatility(&self, assets: &[UnifiedAsset]) -> f64 {
        let total = self.valuation_service.total_value(assets);
        if total <= 0.0 {
            return 0.0;
        }
        assets.iter().map(|a| a.value() * a.volatility).sum::<f64>() / total
    }

    /// Simulated daily history for `days` days back from `as_of`, plus `as_of`
    /// itself (`days + 1` points).
    ///
    /// Walks backwards from today's total value with normally distributed
    /// daily returns (`σ_annual / √252`). The last point is exactly today's
    /// value. All randomness comes from `rng`; pass a seeded `StdRng` for
    /// reproducible output.
    pub fn simulate_history<R: Rng + ?Sized>(
        &self,
        assets: &[UnifiedAsset],
        as_of: NaiveDate,
        days: u32,
        rng: &mut R,
    ) -> Vec<HistoryPoint> {
        let daily_sigma = self.portfolio_volatility(assets) / TRADING_DAYS_PER_YEAR.sqrt();
        let daily_sigma = if daily_sigma.is_finite() { daily_sigma } else { 0.0 };

        // values[0] is today, values[n] is n days ago
        let mut values = Vec::with_capacity((days as usize).saturating_add(1));
        let mut value = self.valuation_service.total_value(assets);
        values.push(value);
        for _ in 0..days {
            let z: f64 = StandardNormal.sample(&mut *rng);
            let daily_return = (daily_sigma * z).max(-0.99);
            value /= 1.0 + daily_return;
            values.push(value);
        }

        let mut history: Vec<HistoryPoint> = values
            .into_iter()
            .enumerate()
            .map_while(|(offset, portfolio_value)| {
                as_of
                    .checked_sub_days(Days::new(offset as u64))
                    .map(|date| HistoryPoint {
                        date,
                        portfolio_value,
                    })
            })
            .collect();
        history.reverse();
        history
    }
}

impl Default for ChartService {
    fn default() -> Self {
        Self::new()
    }
}
