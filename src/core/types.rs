use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Which of the story's chart families an engine instance renders.
///
/// `Dot2` is the auxiliary average-line chart: it shares the dot chart's
/// six-band x axis but draws per-series mean paths instead of area dots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Dot,
    Dot2,
}

impl ChartKind {
    /// Number of x-axis category bands for this chart family.
    #[must_use]
    pub fn band_count(self) -> u8 {
        match self {
            ChartKind::Line => 5,
            ChartKind::Dot | ChartKind::Dot2 => 6,
        }
    }
}
