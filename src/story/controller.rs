use tracing::debug;

use crate::core::types::ChartKind;
use crate::story::config::{StoryStep, StoryTable};

/// Routes scroll markers to the three chart slots.
///
/// Each chart kind has one slot; a marker whose step targets that kind
/// replaces the slot's config, and the other two slots keep whatever they
/// last received. The host stages the returned step on the matching engine.
#[derive(Debug, Clone)]
pub struct MarkerController {
    table: StoryTable,
    line: Option<StoryStep>,
    dot: Option<StoryStep>,
    dot2: Option<StoryStep>,
}

impl MarkerController {
    #[must_use]
    pub fn new(table: StoryTable) -> Self {
        Self {
            table,
            line: None,
            dot: None,
            dot2: None,
        }
    }

    #[must_use]
    pub fn table(&self) -> &StoryTable {
        &self.table
    }

    /// Handles one marker crossing. Unknown keys are a no-op.
    pub fn on_marker(&mut self, key: &str) -> Option<&StoryStep> {
        let Some(step) = self.table.get(key) else {
            debug!(key, "marker has no story step, ignoring");
            return None;
        };

        let step = step.clone();
        let slot = match step.chart_type {
            ChartKind::Line => &mut self.line,
            ChartKind::Dot => &mut self.dot,
            ChartKind::Dot2 => &mut self.dot2,
        };
        *slot = Some(step);
        slot.as_ref()
    }

    /// Last config dispatched to the given kind's slot, if any.
    #[must_use]
    pub fn slot(&self, kind: ChartKind) -> Option<&StoryStep> {
        match kind {
            ChartKind::Line => self.line.as_ref(),
            ChartKind::Dot => self.dot.as_ref(),
            ChartKind::Dot2 => self.dot2.as_ref(),
        }
    }
}
