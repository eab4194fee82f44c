use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the scenario projection chart.
///
/// The core computes the numbers; the frontend just renders them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionChartRow {
    pub year: u32,
    pub base_case: f64,
    pub optimistic: f64,
    pub pessimistic: f64,

    /// Cumulative amount paid in (shared by all three scenarios)
    pub contributions: f64,
}

/// One row of the what-if comparison chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatIfChartRow {
    pub year: u32,
    pub current: f64,
    pub what_if: f64,

    /// what_if - current
    pub difference: f64,
}

/// A single day of the simulated performance history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub portfolio_value: f64,
}
