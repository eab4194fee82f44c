pub mod analytics;
pub mod asset;
pub mod chart;
pub mod holding;
pub mod projection;
pub mod settings;
