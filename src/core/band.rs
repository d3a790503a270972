use serde::{Deserialize, Serialize};

use crate::core::margins::Margin;
use crate::core::types::{ChartKind, Viewport};
use crate::error::{StoryError, StoryResult};

/// One tick on the categorical x axis.
///
/// Real category bands sit between synthetic spacer ticks so that marks are
/// offset mid-band rather than on the grid lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BandTick {
    Start,
    Band(u8),
    Spacer(u8),
    End,
}

/// Point scale over a fixed list of category ticks.
///
/// Five numbered bands for line charts (quintiles), six for dot charts
/// (remoteness/advantage regions). The tick list for five bands is
/// `start, 1, spacer2, 2, spacer3, 3, spacer4, 4, spacer5, 5, end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandScale {
    band_count: u8,
}

impl BandScale {
    pub fn new(band_count: u8) -> StoryResult<Self> {
        if !(2..=12).contains(&band_count) {
            return Err(StoryError::InvalidData(format!(
                "band count {band_count} out of supported range"
            )));
        }
        Ok(Self { band_count })
    }

    #[must_use]
    pub fn for_kind(kind: ChartKind) -> Self {
        // band_count is always valid for known chart kinds
        Self {
            band_count: kind.band_count(),
        }
    }

    #[must_use]
    pub fn band_count(self) -> u8 {
        self.band_count
    }

    /// Full tick list including the synthetic edge and spacer ticks.
    #[must_use]
    pub fn ticks(self) -> Vec<BandTick> {
        let mut ticks = Vec::with_capacity(2 * usize::from(self.band_count) + 1);
        ticks.push(BandTick::Start);
        for band in 1..=self.band_count {
            if band > 1 {
                ticks.push(BandTick::Spacer(band));
            }
            ticks.push(BandTick::Band(band));
        }
        ticks.push(BandTick::End);
        ticks
    }

    /// Pixel x of a numbered band inside the plot area.
    pub fn position(self, band: u8, viewport: Viewport, margin: Margin) -> StoryResult<f64> {
        if !viewport.is_valid() {
            return Err(StoryError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        if band == 0 || band > self.band_count {
            return Err(StoryError::InvalidData(format!(
                "band {band} outside 1..={}",
                self.band_count
            )));
        }

        let last_index = 2.0 * f64::from(self.band_count);
        let step = margin.plot_width(viewport) / last_index;
        let tick_index = f64::from(2 * band - 1);
        Ok(margin.left + tick_index * step)
    }
}
