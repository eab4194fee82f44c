pub mod allocation_service;
pub mod chart_service;
pub mod normalization_service;
pub mod projection_service;
pub mod risk_service;
pub mod scenario_service;
pub mod valuation_service;
