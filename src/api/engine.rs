use tracing::debug;

use crate::api::engine_config::ChartEngineConfig;
use crate::core::band::BandScale;
use crate::core::margins::{Margin, MarginTuning};
use crate::core::scale::ValueScale;
use crate::core::types::{ChartKind, Viewport};
use crate::data::tables::SeriesStore;
use crate::error::{StoryError, StoryResult};
use crate::interaction::{DockTracker, DockTransition, ResizeDecision, ResizeTracker};
use crate::render::{
    Animator, EmphasisContext, JoinPhase, Mark, MarkCommand, TransitionSpec, durations, keyed_join,
    project_average_path, project_average_series, project_dot_labels, project_dots, project_line,
};
use crate::story::config::StoryStep;

/// Per-chart-instance render state machine.
///
/// One engine owns one chart slot: it tracks dock state, snapshots the
/// staged story step on first dock, and turns every configuration or
/// viewport change into a deterministic batch of mark commands for the
/// host's animation layer. All state lives on the instance and dies with
/// it; nothing is shared across charts.
pub struct ChartEngine<A: Animator> {
    animator: A,
    kind: ChartKind,
    viewport: Viewport,
    margin: Margin,
    margin_tuning: MarginTuning,
    dock: DockTracker,
    resize: ResizeTracker,
    trigger_on_dock: bool,
    /// Latest config received from the marker controller; applied on dock.
    staged: Option<StoryStep>,
    /// Config currently driving the drawn marks.
    snapshot: Option<StoryStep>,
    own_quintile: Option<u8>,
    own_region: Option<u8>,
    own_area_name: Option<String>,
    render_bars: bool,
    last_y_max: Option<f64>,
    marks: Vec<Mark>,
}

impl<A: Animator> ChartEngine<A> {
    pub fn new(animator: A, config: ChartEngineConfig) -> StoryResult<Self> {
        if !config.viewport.is_valid() {
            return Err(StoryError::InvalidViewport {
                width: config.viewport.width,
                height: config.viewport.height,
            });
        }

        let margin = Margin::from_viewport_tuned(config.viewport, config.margin_tuning)?;
        let dock = DockTracker::new(config.dock)?;
        let mut resize = ResizeTracker::new(config.resize);
        // Prime the tracker so the construction viewport is the baseline.
        let _ = resize.observe(config.viewport);

        Ok(Self {
            animator,
            kind: config.kind,
            viewport: config.viewport,
            margin,
            margin_tuning: config.margin_tuning,
            dock,
            resize,
            trigger_on_dock: config.trigger_on_dock,
            staged: None,
            snapshot: None,
            own_quintile: None,
            own_region: None,
            own_area_name: None,
            render_bars: false,
            last_y_max: None,
            marks: Vec::new(),
        })
    }

    #[must_use]
    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn margin(&self) -> Margin {
        self.margin
    }

    #[must_use]
    pub fn is_docked(&self) -> bool {
        self.dock.is_docked()
    }

    #[must_use]
    pub fn has_been_docked(&self) -> bool {
        self.dock.has_been_docked()
    }

    /// Currently drawn marks, after all transitions settle.
    #[must_use]
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    #[must_use]
    pub fn animator(&self) -> &A {
        &self.animator
    }

    #[must_use]
    pub fn into_animator(self) -> A {
        self.animator
    }

    /// Updates the reader's classification used for own-bar highlighting
    /// and own-dot labelling.
    pub fn set_session(
        &mut self,
        quintile: Option<u8>,
        region: Option<u8>,
        area_name: Option<String>,
    ) {
        self.own_quintile = quintile;
        self.own_region = region;
        self.own_area_name = area_name;
    }

    /// Receives a story step from the marker controller.
    ///
    /// Before the first dock the step is only staged; once the chart has
    /// docked, each staged step becomes the snapshot and triggers a redraw.
    pub fn stage_config(&mut self, step: StoryStep, store: &SeriesStore) -> StoryResult<()> {
        step.validate()?;
        if step.chart_type != self.kind {
            return Err(StoryError::InvalidData(format!(
                "story step for {:?} staged on a {:?} engine",
                step.chart_type, self.kind
            )));
        }

        self.staged = Some(step);
        if self.dock.is_docked() || self.dock.has_been_docked() {
            self.snapshot = self.staged.clone();
            self.redraw(store, None)?;
        }
        Ok(())
    }

    /// Feeds one intersection-observer callback.
    pub fn on_intersection(&mut self, ratio: f64, store: &SeriesStore) -> StoryResult<()> {
        match self.dock.observe(ratio) {
            Some(DockTransition::Docked) => {
                if !self.trigger_on_dock {
                    return Ok(());
                }
                debug!(kind = ?self.kind, "chart docked, applying staged config");
                self.render_bars = true;
                self.snapshot = self.staged.clone();
                self.redraw(store, None)
            }
            Some(DockTransition::Undocked) => {
                debug!(kind = ?self.kind, "chart undocked, clearing marks");
                self.render_bars = false;
                self.snapshot = None;
                self.own_quintile = None;
                self.own_region = None;
                self.redraw(store, None)
            }
            None => Ok(()),
        }
    }

    /// Feeds one resize event; trivial jitter is ignored outright.
    pub fn resize(&mut self, viewport: Viewport, store: &SeriesStore) -> StoryResult<ResizeDecision> {
        let decision = self.resize.observe(viewport);
        if decision == ResizeDecision::Ignore {
            return Ok(decision);
        }

        if !viewport.is_valid() {
            return Err(StoryError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        self.viewport = viewport;
        self.margin = Margin::from_viewport_tuned(viewport, self.margin_tuning)?;

        if self.dock.has_been_docked() {
            let y_max_unchanged = self.snapshot.as_ref().map(|step| step.y_max) == self.last_y_max;
            // A pure resize repositions marks without re-animating them.
            let transition = y_max_unchanged.then(TransitionSpec::instant);
            self.redraw(store, transition)?;
        }
        Ok(decision)
    }

    /// Bar indices to emphasize: the step's own list, plus the reader's
    /// quintile (line) or region (dot) appended when not already present.
    #[must_use]
    pub fn highlight_bands(&self) -> Vec<u8> {
        if !self.render_bars {
            return Vec::new();
        }
        let Some(snapshot) = &self.snapshot else {
            return Vec::new();
        };

        let mut bands = snapshot.highlight_bars.clone();
        if snapshot.highlight_own_bar {
            let own = match self.kind {
                ChartKind::Line => self.own_quintile,
                ChartKind::Dot | ChartKind::Dot2 => self.own_region,
            };
            if let Some(band) = own {
                if !bands.contains(&band) {
                    bands.push(band);
                }
            }
        }
        bands
    }

    fn redraw(
        &mut self,
        store: &SeriesStore,
        override_transition: Option<TransitionSpec>,
    ) -> StoryResult<()> {
        let target = self.project_target(store)?;
        let phases = keyed_join(&self.marks, &target);

        let mut commands = Vec::with_capacity(phases.len() + 1);
        if let Some(snapshot) = &self.snapshot {
            let y_max_changed = self.last_y_max != Some(snapshot.y_max);
            commands.push(MarkCommand::Axis {
                y_max: snapshot.y_max,
                transition: if y_max_changed {
                    TransitionSpec::new(durations::Y_AXIS_MS)
                } else {
                    TransitionSpec::none()
                },
            });
        }

        let mut mark_index = 0usize;
        for phase in phases {
            match phase {
                JoinPhase::Enter(mark) => {
                    let transition =
                        override_transition.unwrap_or_else(|| enter_transition(&mark, mark_index));
                    mark_index += 1;
                    commands.push(MarkCommand::Enter { mark, transition });
                }
                JoinPhase::Update { key, to } => {
                    let transition =
                        override_transition.unwrap_or_else(|| update_transition(&to, mark_index));
                    mark_index += 1;
                    commands.push(MarkCommand::Update {
                        key,
                        to,
                        transition,
                    });
                }
                JoinPhase::Exit { key } => {
                    let transition = override_transition
                        .unwrap_or(TransitionSpec::new(durations::DOT_EXIT_MS));
                    commands.push(MarkCommand::Exit { key, transition });
                }
            }
        }

        self.animator.apply(&commands)?;
        self.last_y_max = self.snapshot.as_ref().map(|step| step.y_max);
        self.marks = target;
        Ok(())
    }

    fn project_target(&self, store: &SeriesStore) -> StoryResult<Vec<Mark>> {
        let Some(snapshot) = &self.snapshot else {
            return Ok(Vec::new());
        };

        let value_scale = ValueScale::from_y_max(snapshot.y_max)?;
        let band_scale = BandScale::for_kind(self.kind);
        let mut marks = Vec::new();

        match self.kind {
            ChartKind::Line => {
                for line in &snapshot.lines {
                    marks.extend(project_line(
                        &line.line_name,
                        line.dot_color.as_deref(),
                        line.label_text.as_deref(),
                        store.rows(&line.data_key),
                        band_scale,
                        value_scale,
                        self.viewport,
                        self.margin,
                    )?);
                }
            }
            ChartKind::Dot => {
                if let Some(dots) = &snapshot.dots {
                    let rows = store.rows(&dots.data_key);
                    let emphasis = EmphasisContext {
                        own_area_name: self.own_area_name.clone(),
                        label_own_dot: snapshot.label_own_dot,
                        show_low_high: snapshot.show_low_high_dots,
                        testimonial_area: snapshot.testimonial_area.clone(),
                    };

                    if let Some(average) = project_average_path(
                        rows,
                        band_scale,
                        value_scale,
                        self.viewport,
                        self.margin,
                        snapshot.hide_dotted_line,
                    )? {
                        marks.push(average);
                    }
                    marks.extend(project_dots(
                        rows,
                        dots.dot_color.as_deref(),
                        band_scale,
                        value_scale,
                        self.viewport,
                        self.margin,
                        &emphasis,
                    )?);
                    marks.extend(project_dot_labels(
                        rows,
                        band_scale,
                        value_scale,
                        self.viewport,
                        self.margin,
                        &emphasis,
                        dots.dot_color.as_deref(),
                    )?);
                }
            }
            ChartKind::Dot2 => {
                for series in &snapshot.averages {
                    marks.extend(project_average_series(
                        &series.key,
                        &series.name,
                        series.color.as_deref(),
                        &series.values,
                        band_scale,
                        value_scale,
                        self.viewport,
                        self.margin,
                    )?);
                }
            }
        }

        Ok(marks)
    }
}

fn enter_transition(mark: &Mark, index: usize) -> TransitionSpec {
    match mark {
        Mark::Path(_) => TransitionSpec::new(durations::LINE_ENTER_MS),
        Mark::Dot(_) => TransitionSpec::new(durations::DOT_ENTER_MS)
            .with_delay(index as f64 * durations::STAGGER_MS),
        Mark::Label(_) => TransitionSpec::none(),
    }
}

fn update_transition(mark: &Mark, index: usize) -> TransitionSpec {
    match mark {
        Mark::Path(_) => TransitionSpec::new(durations::DOT_UPDATE_MS),
        Mark::Dot(_) => TransitionSpec::new(durations::DOT_UPDATE_MS)
            .with_delay(index as f64 * durations::STAGGER_MS),
        Mark::Label(_) => TransitionSpec::none(),
    }
}
