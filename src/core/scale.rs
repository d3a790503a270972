use crate::core::margins::Margin;
use crate::core::types::Viewport;
use crate::error::{StoryError, StoryResult};

/// Linear y scale with an inverted pixel range.
///
/// Domain max maps to the top of the plot area, domain min to the bottom,
/// so larger values draw higher on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    domain_min: f64,
    domain_max: f64,
}

impl ValueScale {
    pub fn new(domain_min: f64, domain_max: f64) -> StoryResult<Self> {
        if !domain_min.is_finite() || !domain_max.is_finite() || domain_min >= domain_max {
            return Err(StoryError::InvalidData(
                "value scale domain must be finite with min < max".to_owned(),
            ));
        }

        Ok(Self {
            domain_min,
            domain_max,
        })
    }

    /// Scale from zero up to the configured y-axis maximum.
    pub fn from_y_max(y_max: f64) -> StoryResult<Self> {
        Self::new(0.0, y_max)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    pub fn value_to_pixel(self, value: f64, viewport: Viewport, margin: Margin) -> StoryResult<f64> {
        if !viewport.is_valid() {
            return Err(StoryError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        if !value.is_finite() {
            return Err(StoryError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_max - self.domain_min;
        let normalized = (value - self.domain_min) / span;
        let bottom = f64::from(viewport.height) - margin.bottom;
        Ok(bottom - normalized * margin.plot_height(viewport))
    }

    pub fn pixel_to_value(self, pixel: f64, viewport: Viewport, margin: Margin) -> StoryResult<f64> {
        if !viewport.is_valid() {
            return Err(StoryError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        if !pixel.is_finite() {
            return Err(StoryError::InvalidData("pixel must be finite".to_owned()));
        }

        let bottom = f64::from(viewport.height) - margin.bottom;
        let normalized = (bottom - pixel) / margin.plot_height(viewport);
        Ok(self.domain_min + normalized * (self.domain_max - self.domain_min))
    }

    /// Pixel position of the zero line, the resting place for entering and
    /// not-published marks.
    pub fn baseline(self, viewport: Viewport, margin: Margin) -> StoryResult<f64> {
        self.value_to_pixel(self.domain_min.max(0.0), viewport, margin)
    }
}
