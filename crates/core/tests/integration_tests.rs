// ═══════════════════════════════════════════════════════════════════
// Integration Tests: PortfolioEngine facade, JSON in / JSON out
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;

use portfolio_engine_core::errors::CoreError;
use portfolio_engine_core::models::analytics::{PortfolioSnapshot, RiskLevel};
use portfolio_engine_core::models::asset::AssetCategory;
use portfolio_engine_core::models::projection::{
    Assumptions, ScenarioBundle, WhatIfAssumptions, WhatIfResult,
};
use portfolio_engine_core::models::settings::{EngineSettings, GrowthModel};
use portfolio_engine_core::PortfolioEngine;

const HOLDINGS_JSON: &str = r#"[
    {"type":"stock","id":"aapl","symbol":"AAPL","quantity":10,"purchasePrice":150,"currentPrice":185,"exchange":"NASDAQ","region":"US"},
    {"type":"etf","id":"vti","symbol":"VTI","quantity":20,"purchasePrice":200,"currentPrice":250},
    {"type":"bond","id":"ust","quantity":5,"purchasePrice":1000,"currentPrice":980,"couponRate":0.04},
    {"type":"crypto","id":"btc","symbol":"BTC","quantity":0.05,"currentPrice":60000,"volatility":0.7},
    {"type":"property","id":"flat","currentValue":300000,"purchasePrice":250000,"ownershipShare":0.1},
    {"type":"retirement_account","id":"401k","balance":40000,"costBasis":30000,"institution":"Fidelity"},
    {"type":"cash","id":"savings","balance":5000,"currency":"usd"}
]"#;

fn engine_and_assets() -> (PortfolioEngine, Vec<portfolio_engine_core::models::asset::UnifiedAsset>) {
    let engine = PortfolioEngine::new();
    let holdings = PortfolioEngine::holdings_from_json(HOLDINGS_JSON).unwrap();
    let assets = engine.normalize(&holdings).unwrap();
    (engine, assets)
}

// 1850 + 5000 + 4900 + 3000 + 30000 + 40000 + 5000
const EXPECTED_TOTAL: f64 = 89_750.0;

// ═══════════════════════════════════════════════════════════════════
// Dashboard snapshot
// ═══════════════════════════════════════════════════════════════════

mod snapshot {
    use super::*;

    #[test]
    fn full_portfolio_snapshot() {
        let (engine, assets) = engine_and_assets();
        assert_eq!(assets.len(), 7);

        let snapshot = engine.analyze(&assets);
        assert_eq!(snapshot.currency, "USD");
        assert!((snapshot.total_value - EXPECTED_TOTAL).abs() < 1e-6);
        assert_eq!(snapshot.allocation.len(), 7);
        let sum: f64 = snapshot.allocation.values().sum();
        assert!((sum - 100.0).abs() <= 0.5);
        assert!(snapshot.risk_score <= 100);
        assert!(snapshot.diversification_score <= 100);
        assert_eq!(snapshot.risk_level, RiskLevel::from_score(snapshot.risk_score));
        assert_eq!(snapshot.holdings.len(), 7);
        assert_eq!(snapshot.holdings[0].id, "401k");
    }

    #[test]
    fn cost_basis_and_gain() {
        let (engine, assets) = engine_and_assets();
        let snapshot = engine.analyze(&assets);
        // 1500 + 4000 + 5000 + 3000 + 25000 + 30000 + 5000
        assert!((snapshot.total_cost_basis - 73_500.0).abs() < 1e-6);
        assert!((snapshot.total_gain_loss - 16_250.0).abs() < 1e-6);
        assert!((snapshot.total_return_pct - 16_250.0 / 73_500.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn facade_matches_snapshot() {
        let (engine, assets) = engine_and_assets();
        let snapshot = engine.analyze(&assets);
        assert_eq!(engine.total_value(&assets), snapshot.total_value);
        assert_eq!(engine.allocation(&assets), snapshot.allocation);
        assert_eq!(engine.risk_score(&assets), snapshot.risk_score);
        assert_eq!(engine.diversification_score(&assets), snapshot.diversification_score);
    }

    #[test]
    fn analyze_holdings_in_one_call() {
        let engine = PortfolioEngine::new();
        let holdings = PortfolioEngine::holdings_from_json(HOLDINGS_JSON).unwrap();
        let snapshot = engine.analyze_holdings(&holdings).unwrap();
        assert!((snapshot.total_value - EXPECTED_TOTAL).abs() < 1e-6);
    }

    #[test]
    fn empty_portfolio_is_well_defined() {
        let engine = PortfolioEngine::new();
        let snapshot = engine.analyze(&[]);
        assert_eq!(snapshot.total_value, 0.0);
        assert!(snapshot.allocation.is_empty());
        assert_eq!(snapshot.risk_score, 50);
        assert_eq!(snapshot.risk_level, RiskLevel::Moderate);
        assert_eq!(snapshot.diversification_score, 0);
        assert_eq!(snapshot.total_return_pct, 0.0);
        assert!(snapshot.holdings.is_empty());
    }

    #[test]
    fn two_halves_vs_single_asset() {
        let engine = PortfolioEngine::new();
        let halves = PortfolioEngine::holdings_from_json(
            r#"[{"type":"stock","quantity":5,"currentPrice":100},
                {"type":"bond","quantity":1,"currentPrice":500}]"#,
        )
        .unwrap();
        let single = PortfolioEngine::holdings_from_json(
            r#"[{"type":"stock","quantity":10,"currentPrice":100}]"#,
        )
        .unwrap();
        let halves = engine.analyze_holdings(&halves).unwrap();
        let single = engine.analyze_holdings(&single).unwrap();

        assert_eq!(halves.allocation.len(), 2);
        assert!((halves.allocation[&AssetCategory::Stock] - 50.0).abs() < 1e-9);
        assert!((halves.allocation[&AssetCategory::Bond] - 50.0).abs() < 1e-9);
        assert!(halves.diversification_score > single.diversification_score);
        assert!(halves.risk_score < single.risk_score);
    }

    #[test]
    fn overflowing_holding_never_reaches_the_scores() {
        let engine = PortfolioEngine::new();
        let holdings = PortfolioEngine::holdings_from_json(
            r#"[{"type":"stock","id":"huge","quantity":1e200,"currentPrice":1e200},
                {"type":"bond"}]"#,
        )
        .unwrap();
        assert!(matches!(
            engine.normalize(&holdings),
            Err(CoreError::InvalidHolding { ref id, .. }) if id == "huge"
        ));
        assert!(engine.analyze_holdings(&holdings).is_err());
    }

    #[test]
    fn snapshot_json_roundtrip() {
        let (engine, assets) = engine_and_assets();
        let snapshot = engine.analyze(&assets);
        let json = PortfolioEngine::to_json(&snapshot).unwrap();
        assert!(json.contains("\"totalValue\""));
        assert!(json.contains("\"retirement_account\""));
        let back: PortfolioSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.risk_score, snapshot.risk_score);
        assert_eq!(back.allocation, snapshot.allocation);
    }
}

// ═══════════════════════════════════════════════════════════════════
// Projections & what-if
// ═══════════════════════════════════════════════════════════════════

mod projections {
    use super::*;

    #[test]
    fn one_year_with_monthly_contributions() {
        let engine = PortfolioEngine::new();
        let holdings = PortfolioEngine::holdings_from_json(
            r#"[{"type":"stock","quantity":10,"currentPrice":100}]"#,
        )
        .unwrap();
        let assets = engine.normalize(&holdings).unwrap();
        let bundle = engine.project(&assets, 500.0, 1).unwrap();
        assert!((bundle.base_case[1].total_value - 7075.0).abs() < 1e-9);
        assert!((bundle.base_case[1].contributions - 7000.0).abs() < 1e-9);
        assert!((bundle.base_case[1].growth - 75.0).abs() < 1e-9);
    }

    #[test]
    fn bundle_json_roundtrip() {
        let (engine, assets) = engine_and_assets();
        let bundle = engine.project(&assets, 1000.0, 10).unwrap();
        let json = PortfolioEngine::to_json(&bundle).unwrap();
        assert!(json.contains("\"baseCase\""));
        let back: ScenarioBundle = serde_json::from_str(&json).unwrap();
        assert_eq!(back.base_case.len(), 11);
        assert_eq!(back.base_case[0].year, 0);
    }

    #[test]
    fn chart_rows_and_target() {
        let (engine, assets) = engine_and_assets();
        let bundle = engine.project(&assets, 1000.0, 20).unwrap();
        let rows = engine.projection_chart(&bundle);
        assert_eq!(rows.len(), 21);
        assert!(rows.iter().all(|r| r.pessimistic <= r.base_case && r.base_case <= r.optimistic));

        let year = engine.years_to_target(&bundle, 250_000.0).unwrap();
        assert!(bundle.base_case[year as usize].total_value >= 250_000.0);
        assert!(bundle.base_case[year as usize - 1].total_value < 250_000.0);
    }

    #[test]
    fn what_if_identity() {
        let (engine, assets) = engine_and_assets();
        let plan = Assumptions {
            monthly_contribution: 750.0,
            retirement_age: 67,
        };
        let result = engine.what_if(&assets, &plan, &plan.into(), 37).unwrap();
        assert_eq!(result.current, result.what_if);
        assert_eq!(result.current.len(), 31);

        // matches a plain projection of the same plan
        let bundle = engine.project(&assets, 750.0, 30).unwrap();
        assert_eq!(result.current, bundle.base_case);
    }

    #[test]
    fn what_if_with_lump_sum_and_raise() {
        let (engine, assets) = engine_and_assets();
        let plan = Assumptions {
            monthly_contribution: 500.0,
            retirement_age: 60,
        };
        let modified = WhatIfAssumptions {
            monthly_contribution: 900.0,
            retirement_age: 60,
            additional_investment: 20_000.0,
        };
        let result = engine.what_if(&assets, &plan, &modified, 40).unwrap();
        assert_eq!(result.current.len(), result.what_if.len());
        assert!((result.differences()[0] - 20_000.0).abs() < 1e-6);
        assert!(result.final_difference() > 20_000.0);

        let rows = engine.what_if_chart(&result);
        assert_eq!(rows.len(), 21);

        let json = PortfolioEngine::to_json(&result).unwrap();
        let back: WhatIfResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.what_if.len(), 21);
    }

    #[test]
    fn parameter_errors_surface_through_facade() {
        let (engine, assets) = engine_and_assets();
        assert!(matches!(
            engine.project(&assets, 100.0, -5),
            Err(CoreError::InvalidHorizon(-5))
        ));
        assert!(matches!(
            engine.project(&assets, -100.0, 5),
            Err(CoreError::InvalidContribution(_))
        ));
        let plan = Assumptions {
            monthly_contribution: 100.0,
            retirement_age: 50,
        };
        assert!(matches!(
            engine.what_if(&assets, &plan, &plan.into(), 55),
            Err(CoreError::InvalidAgeRange { .. })
        ));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════════════════════════════

mod configuration {
    use super::*;

    #[test]
    fn custom_settings_change_projection() {
        let settings = EngineSettings::from_json(r#"{"baseGrowthRate":0.05}"#).unwrap();
        let engine = PortfolioEngine::with_settings(settings).unwrap();
        let bundle = engine.project(&[], 100.0, 2).unwrap();
        assert!((bundle.base_case[2].total_value - (1200.0 * 1.05 + 1200.0)).abs() < 1e-9);
    }

    #[test]
    fn asset_blend_uses_holding_returns() {
        let settings = EngineSettings {
            growth_model: GrowthModel::AssetBlend,
            ..EngineSettings::default()
        };
        let engine = PortfolioEngine::with_settings(settings).unwrap();
        let holdings = PortfolioEngine::holdings_from_json(
            r#"[{"type":"cash","balance":1000}]"#,
        )
        .unwrap();
        let assets = engine.normalize(&holdings).unwrap();
        let bundle = engine.project(&assets, 0.0, 1).unwrap();
        assert!((bundle.base_case[1].total_value - 1020.0).abs() < 1e-9);
    }

    #[test]
    fn default_currency_flows_into_assets_and_snapshot() {
        let settings = EngineSettings {
            default_currency: "EUR".into(),
            ..EngineSettings::default()
        };
        let engine = PortfolioEngine::with_settings(settings).unwrap();
        let holdings = PortfolioEngine::holdings_from_json(
            r#"[{"type":"stock","quantity":1,"currentPrice":10}]"#,
        )
        .unwrap();
        let assets = engine.normalize(&holdings).unwrap();
        assert_eq!(assets[0].currency, "EUR");
        assert_eq!(engine.analyze(&assets).currency, "EUR");
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let settings = EngineSettings {
            base_growth_rate: f64::NAN,
            ..EngineSettings::default()
        };
        assert!(matches!(
            PortfolioEngine::with_settings(settings),
            Err(CoreError::InvalidSettings(_))
        ));
    }

    #[test]
    fn malformed_holdings_json() {
        assert!(matches!(
            PortfolioEngine::holdings_from_json(r#"[{"type":"stock","quantity":"many"}]"#),
            Err(CoreError::Deserialization(_))
        ));
    }

    #[test]
    fn debug_output_shows_settings() {
        let engine = PortfolioEngine::new();
        let debug = format!("{engine:?}");
        assert!(debug.contains("PortfolioEngine"));
        assert!(debug.contains("base_growth_rate"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// Simulated history
// ═══════════════════════════════════════════════════════════════════

mod history {
    use super::*;

    #[test]
    fn seeded_history_through_facade() {
        let (engine, assets) = engine_and_assets();
        let as_of = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let a = engine.simulate_history(&assets, as_of, 365, &mut StdRng::seed_from_u64(2024));
        let b = engine.simulate_history(&assets, as_of, 365, &mut StdRng::seed_from_u64(2024));
        assert_eq!(a, b);
        assert_eq!(a.len(), 366);
        assert!((a.last().unwrap().portfolio_value - EXPECTED_TOTAL).abs() < 1e-6);
        for pair in a.windows(2) {
            assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
        }
    }
}
