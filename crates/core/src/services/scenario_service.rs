use log::debug;

use crate::errors::CoreError;
use crate::models::asset::UnifiedAsset;
use crate::models::projection::{Assumptions, WhatIfAssumptions, WhatIfResult};
use crate::models::settings::EngineSettings;
use crate::services::projection_service::ProjectionService;
use crate::services::valuation_service::ValuationService;

/// What-if comparisons: two base-case projections over a shared year axis.
pub struct ScenarioService {
    projection_service: ProjectionService,
    valuation_service: ValuationService,
    max_horizon_years: u32,
}

impl ScenarioService {
    pub fn new(settings: &EngineSettings) -> Self {
        Self {
            projection_service: ProjectionService::new(settings),
            valuation_service: ValuationService::new(),
            max_horizon_years: settings.max_horizon_years,
        }
    }

    /// Compare the current plan with a modified one.
    ///
    /// The horizon runs to the later of the two retirement ages, capped at
    /// `max_horizon_years`. The modified plan's `additional_investment` is
    /// added once, to the starting value. With identical plans and no lump
    /// sum both series are identical.
    pub fn compare(
        &self,
        assets: &[UnifiedAsset],
        current: &Assumptions,
        modified: &WhatIfAssumptions,
        current_age: i32,
    ) -> Result<WhatIfResult, CoreError> {
        for retirement_age in [current.retirement_age, modified.retirement_age] {
            if retirement_age < current_age {
                return Err(CoreError::InvalidAgeRange {
                    current_age,
                    retirement_age,
                });
            }
        }
        let lump_sum = modified.additional_investment;
        if !lump_sum.is_finite() || lump_sum < 0.0 {
            return Err(CoreError::InvalidContribution(lump_sum));
        }

        let horizon = self.horizon(current, modified, current_age);
        debug!("What-if comparison over {horizon} years (current age {current_age})");

        let starting_value = self.valuation_service.total_value(assets);
        let rate = self.projection_service.growth_rate(assets);

        let current_series = self.projection_service.base_case(
            starting_value,
            rate,
            current.monthly_contribution,
            horizon,
        )?;
        let what_if_series = self.projection_service.base_case(
            starting_value + lump_sum,
            rate,
            modified.monthly_contribution,
            horizon,
        )?;

        Ok(WhatIfResult {
            current: current_series,
            what_if: what_if_series,
        })
    }

    fn horizon(&self, current: &Assumptions, modified: &WhatIfAssumptions, current_age: i32) -> i32 {
        let years = current.retirement_age.max(modified.retirement_age) - current_age;
        let cap = i32::try_from(self.max_horizon_years).unwrap_or(i32::MAX);
        years.min(cap)
    }
}

impl Default for ScenarioService {
    fn default() -> Self {
        Self::new(&EngineSettings::default())
    }
}
