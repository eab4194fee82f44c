use serde::{Deserialize, Serialize};

/// One year of a projected portfolio path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionPoint {
    /// Years from today (0 = starting point)
    pub year: u32,

    /// Simulated portfolio value at the end of this year
    pub total_value: f64,

    /// Starting value plus everything contributed so far
    pub contributions: f64,

    /// total_value - contributions. Negative only when a pessimistic
    /// adjustment pushes the value below what was paid in.
    pub growth: f64,
}

impl ProjectionPoint {
    pub fn new(year: u32, total_value: f64, contributions: f64) -> Self {
        Self {
            year,
            total_value,
            contributions,
            growth: total_value - contributions,
        }
    }
}

/// Year-ascending sequence of projection points, `horizon + 1` long.
pub type ProjectionSeries = Vec<ProjectionPoint>;

/// The named growth scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Base,
    Optimistic,
    Pessimistic,
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scenario::Base => write!(f, "Base case"),
            Scenario::Optimistic => write!(f, "Optimistic"),
            Scenario::Pessimistic => write!(f, "Pessimistic"),
        }
    }
}

/// Three projections of equal length, anchored to the same starting value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioBundle {
    pub base_case: ProjectionSeries,
    pub optimistic: ProjectionSeries,
    pub pessimistic: ProjectionSeries,
}

impl ScenarioBundle {
    pub fn get(&self, scenario: Scenario) -> &ProjectionSeries {
        match scenario {
            Scenario::Base => &self.base_case,
            Scenario::Optimistic => &self.optimistic,
            Scenario::Pessimistic => &self.pessimistic,
        }
    }

    /// Number of projected years (series length minus the year-0 point).
    pub fn horizon(&self) -> u32 {
        self.base_case.len().saturating_sub(1) as u32
    }
}

/// Contribution plan the user currently follows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assumptions {
    pub monthly_contribution: f64,
    pub retirement_age: i32,
}

/// Alternative plan explored in the what-if panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfAssumptions {
    pub monthly_contribution: f64,
    pub retirement_age: i32,

    /// One-time lump sum added at year 0 only
    #[serde(default)]
    pub additional_investment: f64,
}

impl From<Assumptions> for WhatIfAssumptions {
    fn from(a: Assumptions) -> Self {
        Self {
            monthly_contribution: a.monthly_contribution,
            retirement_age: a.retirement_age,
            additional_investment: 0.0,
        }
    }
}

/// Two parallel futures over the same year axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfResult {
    pub current: ProjectionSeries,
    pub what_if: ProjectionSeries,
}

impl WhatIfResult {
    /// Point-wise `what_if - current` total values.
    pub fn differences(&self) -> Vec<f64> {
        self.current
            .iter()
            .zip(&self.what_if)
            .map(|(c, w)| w.total_value - c.total_value)
            .collect()
    }

    /// Difference at the final year, 0 for empty series.
    pub fn final_difference(&self) -> f64 {
        self.differences().last().copied().unwrap_or(0.0)
    }
}
