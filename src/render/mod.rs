mod frame;
mod join;
mod marks;
mod null_animator;

pub use frame::{
    DOT_RADIUS, EmphasisContext, project_average_path, project_average_series, project_dot_labels,
    project_dots, project_line,
};
pub use join::{JoinPhase, keyed_join};
pub use marks::{DotMark, LabelAlign, LabelKind, LabelMark, Mark, PathMark};
pub use null_animator::NullAnimator;

use serde::{Deserialize, Serialize};

use crate::error::StoryResult;

/// Fixed animation durations, in milliseconds.
pub mod durations {
    pub const LINE_ENTER_MS: u32 = 2000;
    pub const DOT_ENTER_MS: u32 = 1000;
    pub const DOT_UPDATE_MS: u32 = 1000;
    pub const DOT_EXIT_MS: u32 = 1000;
    pub const Y_AXIS_MS: u32 = 1000;
    /// Per-mark stagger applied to entering/updating dots.
    pub const STAGGER_MS: f64 = 0.5;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransitionSpec {
    pub duration_ms: u32,
    pub delay_ms: f64,
}

impl TransitionSpec {
    #[must_use]
    pub const fn new(duration_ms: u32) -> Self {
        Self {
            duration_ms,
            delay_ms: 0.0,
        }
    }

    /// No animation at all; the mark jumps to its target.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(0)
    }

    /// Near-instant reposition used for pure resizes.
    #[must_use]
    pub const fn instant() -> Self {
        Self::new(1)
    }

    #[must_use]
    pub fn with_delay(mut self, delay_ms: f64) -> Self {
        self.delay_ms = delay_ms;
        self
    }
}

/// One step of a draw pass, produced by the pure join and consumed by an
/// `Animator`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MarkCommand {
    /// New mark: appears at its baseline state, then animates to value.
    Enter {
        mark: Mark,
        transition: TransitionSpec,
    },
    /// Existing mark moves to a new position/appearance.
    Update {
        key: String,
        to: Mark,
        transition: TransitionSpec,
    },
    /// Mark's backing datum disappeared: fade out, then remove.
    Exit {
        key: String,
        transition: TransitionSpec,
    },
    /// Y axis redraw; animated only when the domain maximum changed.
    Axis {
        y_max: f64,
        transition: TransitionSpec,
    },
}

/// Contract implemented by the host's animation layer.
///
/// The engine produces deterministic command batches; interpreting them
/// (DOM/SVG transitions) is the only impure part of a draw pass.
pub trait Animator {
    fn apply(&mut self, commands: &[MarkCommand]) -> StoryResult<()>;
}
