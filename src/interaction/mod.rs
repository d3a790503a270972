use serde::{Deserialize, Serialize};

use crate::core::types::Viewport;
use crate::error::{StoryError, StoryResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DockState {
    Undocked,
    Docked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DockTransition {
    Docked,
    Undocked,
}

/// Intersection threshold at which a chart counts as docked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DockConfig {
    pub threshold: f64,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self { threshold: 0.9 }
    }
}

impl DockConfig {
    pub fn validate(self) -> StoryResult<Self> {
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(StoryError::InvalidData(
                "dock threshold must be finite and in [0, 1]".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Tracks docked/undocked transitions from viewport-intersection ratios.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DockTracker {
    config: DockConfig,
    state: DockState,
    has_been_docked: bool,
}

impl DockTracker {
    pub fn new(config: DockConfig) -> StoryResult<Self> {
        Ok(Self {
            config: config.validate()?,
            state: DockState::Undocked,
            has_been_docked: false,
        })
    }

    #[must_use]
    pub fn is_docked(self) -> bool {
        self.state == DockState::Docked
    }

    /// Whether the chart has ever docked; the one-time config snapshot and
    /// the redraw-on-config-change gate both key off this.
    #[must_use]
    pub fn has_been_docked(self) -> bool {
        self.has_been_docked
    }

    /// Feeds one intersection observation; returns the transition, if any.
    pub fn observe(&mut self, ratio: f64) -> Option<DockTransition> {
        let next = if ratio >= self.config.threshold {
            DockState::Docked
        } else {
            DockState::Undocked
        };

        if next == self.state {
            return None;
        }

        self.state = next;
        match next {
            DockState::Docked => {
                self.has_been_docked = true;
                Some(DockTransition::Docked)
            }
            DockState::Undocked => Some(DockTransition::Undocked),
        }
    }
}

/// Jitter suppression for resize events.
///
/// Mobile browser chrome (address bar show/hide) fires height-only resizes
/// that would otherwise thrash the axes; height deltas below the threshold
/// with an unchanged width are ignored outright.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResizeConfig {
    pub is_mobile: bool,
    pub height_jitter_px: u32,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            is_mobile: false,
            height_jitter_px: 128,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeDecision {
    Recompute,
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeTracker {
    config: ResizeConfig,
    last: Option<Viewport>,
}

impl ResizeTracker {
    #[must_use]
    pub fn new(config: ResizeConfig) -> Self {
        Self { config, last: None }
    }

    #[must_use]
    pub fn last_viewport(self) -> Option<Viewport> {
        self.last
    }

    /// Classifies one resize event and records it as the new baseline.
    pub fn observe(&mut self, next: Viewport) -> ResizeDecision {
        let Some(last) = self.last.replace(next) else {
            return ResizeDecision::Recompute;
        };

        if last == next {
            return ResizeDecision::Ignore;
        }

        if self.config.is_mobile && last.width == next.width {
            let delta = last.height.abs_diff(next.height);
            if delta > 0 && delta < self.config.height_jitter_px {
                return ResizeDecision::Ignore;
            }
        }

        ResizeDecision::Recompute
    }
}
