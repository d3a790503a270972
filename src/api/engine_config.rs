use crate::core::margins::MarginTuning;
use crate::core::types::{ChartKind, Viewport};
use crate::interaction::{DockConfig, ResizeConfig};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartEngineConfig {
    pub kind: ChartKind,
    pub viewport: Viewport,
    /// Take the config snapshot and run the initial draw on first dock.
    pub trigger_on_dock: bool,
    pub dock: DockConfig,
    pub resize: ResizeConfig,
    pub margin_tuning: MarginTuning,
}

impl ChartEngineConfig {
    #[must_use]
    pub fn new(kind: ChartKind, viewport: Viewport) -> Self {
        Self {
            kind,
            viewport,
            trigger_on_dock: true,
            dock: DockConfig::default(),
            resize: ResizeConfig::default(),
            margin_tuning: MarginTuning::default(),
        }
    }

    #[must_use]
    pub fn with_trigger_on_dock(mut self, trigger_on_dock: bool) -> Self {
        self.trigger_on_dock = trigger_on_dock;
        self
    }

    #[must_use]
    pub fn with_dock(mut self, dock: DockConfig) -> Self {
        self.dock = dock;
        self
    }

    #[must_use]
    pub fn with_resize(mut self, resize: ResizeConfig) -> Self {
        self.resize = resize;
        self
    }

    #[must_use]
    pub fn with_margin_tuning(mut self, margin_tuning: MarginTuning) -> Self {
        self.margin_tuning = margin_tuning;
        self
    }
}
