//! storychart: scroll-driven chart engine for data-journalism interactives.
//!
//! This crate provides the state machinery behind a scrollytelling article:
//! postcode/suburb lookup over statistical-area reference tables, a
//! quintile/region classifier for personalising the story, and a per-chart
//! engine that turns scroll markers and viewport events into deterministic
//! enter/update/exit mark commands for a host-owned animation layer.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod geo;
pub mod interaction;
pub mod render;
pub mod story;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{StoryError, StoryResult};
