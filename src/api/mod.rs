mod engine;
mod engine_config;

pub use engine::ChartEngine;
pub use engine_config::ChartEngineConfig;
