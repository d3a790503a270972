use serde::{Deserialize, Serialize};

use crate::core::types::Viewport;
use crate::error::{StoryError, StoryResult};

/// Plot margins in pixels, derived from the viewport on every resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margin {
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            top: 0.0,
            right: 0.0,
            bottom: 0.0,
            left: 0.0,
        }
    }

    pub fn from_viewport(viewport: Viewport) -> StoryResult<Self> {
        Self::from_viewport_tuned(viewport, MarginTuning::default())
    }

    pub fn from_viewport_tuned(viewport: Viewport, tuning: MarginTuning) -> StoryResult<Self> {
        if !viewport.is_valid() {
            return Err(StoryError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        tuning.validate()?;

        let width = f64::from(viewport.width);
        let height = f64::from(viewport.height);
        Ok(Self {
            top: height * tuning.top_ratio,
            right: width * tuning.right_ratio,
            bottom: height * tuning.bottom_ratio,
            left: width * tuning.left_ratio,
        })
    }

    #[must_use]
    pub fn plot_width(self, viewport: Viewport) -> f64 {
        f64::from(viewport.width) - self.left - self.right
    }

    #[must_use]
    pub fn plot_height(self, viewport: Viewport) -> f64 {
        f64::from(viewport.height) - self.top - self.bottom
    }
}

/// Margin ratios relative to viewport size.
///
/// The defaults leave room for the chart title block above and the
/// category/label gutter to the right of the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginTuning {
    pub top_ratio: f64,
    pub right_ratio: f64,
    pub bottom_ratio: f64,
    pub left_ratio: f64,
}

impl Default for MarginTuning {
    fn default() -> Self {
        Self {
            top_ratio: 0.2,
            right_ratio: 0.15,
            bottom_ratio: 0.1,
            left_ratio: 0.12,
        }
    }
}

impl MarginTuning {
    fn validate(self) -> StoryResult<()> {
        for (value, name) in [
            (self.top_ratio, "top_ratio"),
            (self.right_ratio, "right_ratio"),
            (self.bottom_ratio, "bottom_ratio"),
            (self.left_ratio, "left_ratio"),
        ] {
            if !value.is_finite() || !(0.0..0.5).contains(&value) {
                return Err(StoryError::InvalidData(format!(
                    "margin tuning `{name}` must be finite and in [0, 0.5)"
                )));
            }
        }
        Ok(())
    }
}
