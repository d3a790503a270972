use storychart::api::{ChartEngine, ChartEngineConfig};
use storychart::core::types::{ChartKind, Viewport};
use storychart::data::tables::SeriesStore;
use storychart::error::StoryResult;
use storychart::interaction::{ResizeConfig, ResizeDecision};
use storychart::render::{Animator, Mark, MarkCommand, NullAnimator, durations};
use storychart::story::config::{DotSpec, LineSpec, StoryStep};

/// Test animator that keeps the settled mark set and every command batch.
#[derive(Debug, Default)]
struct RecordingAnimator {
    inner: NullAnimator,
    batches: Vec<Vec<MarkCommand>>,
}

impl Animator for RecordingAnimator {
    fn apply(&mut self, commands: &[MarkCommand]) -> StoryResult<()> {
        self.batches.push(commands.to_vec());
        self.inner.apply(commands)
    }
}

fn viewport() -> Viewport {
    Viewport::new(1000, 800)
}

fn line_store() -> SeriesStore {
    let mut store = SeriesStore::new();
    store
        .load(
            "gp-attendances",
            r#"[
                {"area_code": "1", "area_name": "Quintile 1", "group": 1, "value": 10},
                {"area_code": "2", "area_name": "Quintile 2", "group": 2, "value": 20},
                {"area_code": "3", "area_name": "Quintile 3", "group": 3, "value": "NP"},
                {"area_code": "4", "area_name": "Quintile 4", "group": 4, "value": 40},
                {"area_code": "5", "area_name": "Quintile 5", "group": 5, "value": 50},
                {"area_code": "0", "area_name": "Australia", "group": "National", "value": 30}
            ]"#,
        )
        .expect("load line series");
    store
}

fn dot_store() -> SeriesStore {
    let mut store = SeriesStore::new();
    store
        .load(
            "specialist-attendances",
            r#"[
                {"area_code": "11", "area_name": "Alice Springs", "group": 1, "value": 5},
                {"area_code": "12", "area_name": "Dubbo", "group": 2, "value": 15},
                {"area_code": "13", "area_name": "Hobart", "group": 2, "value": "NP"},
                {"area_code": "14", "area_name": "Ballarat", "group": 3, "value": 25},
                {"area_code": "15", "area_name": "Logan", "group": 4, "value": 35},
                {"area_code": "16", "area_name": "Parramatta", "group": 5, "value": 45},
                {"area_code": "17", "area_name": "North Sydney", "group": 6, "value": 55},
                {"area_code": "0", "area_name": "Australia", "group": "National", "value": 30},
                {"area_code": "99", "area_name": "Norfolk Island", "group": "ungrouped", "value": 60}
            ]"#,
        )
        .expect("load dot series");
    store
}

fn line_step(y_max: f64) -> StoryStep {
    StoryStep {
        chart_type: ChartKind::Line,
        y_max,
        highlight_bars: Vec::new(),
        highlight_own_bar: false,
        lines: vec![LineSpec {
            line_name: "gp".to_owned(),
            data_key: "gp-attendances".to_owned(),
            label_text: Some("GP visits".to_owned()),
            dot_color: None,
        }],
        dots: None,
        averages: Vec::new(),
        testimonial_area: None,
        show_low_high_dots: false,
        label_own_dot: false,
        chart_title: None,
        hide_dotted_line: false,
    }
}

fn dot_step(y_max: f64) -> StoryStep {
    StoryStep {
        chart_type: ChartKind::Dot,
        y_max,
        highlight_bars: Vec::new(),
        highlight_own_bar: false,
        lines: Vec::new(),
        dots: Some(DotSpec {
            data_key: "specialist-attendances".to_owned(),
            dot_color: None,
        }),
        averages: Vec::new(),
        testimonial_area: None,
        show_low_high_dots: false,
        label_own_dot: false,
        chart_title: None,
        hide_dotted_line: false,
    }
}

fn line_engine() -> ChartEngine<NullAnimator> {
    ChartEngine::new(
        NullAnimator::new(),
        ChartEngineConfig::new(ChartKind::Line, viewport()),
    )
    .expect("engine init")
}

fn dot_engine() -> ChartEngine<NullAnimator> {
    ChartEngine::new(
        NullAnimator::new(),
        ChartEngineConfig::new(ChartKind::Dot, viewport()),
    )
    .expect("engine init")
}

#[test]
fn staged_config_waits_for_the_first_dock() {
    let store = line_store();
    let mut engine = line_engine();

    engine
        .stage_config(line_step(60.0), &store)
        .expect("stage config");
    assert_eq!(engine.animator().mark_count(), 0);
    assert!(!engine.has_been_docked());

    engine.on_intersection(0.95, &store).expect("dock");
    assert!(engine.is_docked());
    assert!(engine.has_been_docked());
    assert!(engine.animator().mark_count() > 0);
    assert_eq!(engine.animator().last_axis_y_max, Some(60.0));
}

#[test]
fn intersection_below_the_threshold_never_docks() {
    let store = line_store();
    let mut engine = line_engine();

    engine
        .stage_config(line_step(60.0), &store)
        .expect("stage config");
    engine.on_intersection(0.85, &store).expect("observe");
    assert!(!engine.is_docked());
    assert_eq!(engine.animator().mark_count(), 0);
}

#[test]
fn line_chart_skips_not_published_and_national_rows() {
    let store = line_store();
    let mut engine = line_engine();

    engine
        .stage_config(line_step(60.0), &store)
        .expect("stage config");
    engine.on_intersection(1.0, &store).expect("dock");

    // Bands 1, 2, 4, 5 have dots; band 3 is NP and the national row is
    // never rendered.
    assert_eq!(engine.animator().dot_count(), 4);
    assert!(engine.animator().mark("gp:3").is_none());
    assert!(engine.animator().mark("Australia").is_none());

    let path = engine.animator().mark("gp:path").expect("series path");
    match path {
        Mark::Path(path) => assert_eq!(path.segments.len(), 2),
        other => panic!("unexpected mark: {other:?}"),
    }

    assert!(engine.animator().mark("label:gp").is_some());
}

#[test]
fn not_published_dots_rest_invisible_at_the_baseline() {
    let store = dot_store();
    let mut engine = dot_engine();

    engine
        .stage_config(dot_step(60.0), &store)
        .expect("stage config");
    engine.on_intersection(1.0, &store).expect("dock");

    let published = engine.animator().mark("Dubbo").expect("published dot");
    let suppressed = engine.animator().mark("Hobart").expect("suppressed dot");

    match (published, suppressed) {
        (Mark::Dot(published), Mark::Dot(suppressed)) => {
            assert_eq!(suppressed.opacity, 0.0);
            assert_eq!(published.opacity, 1.0);
            // Both sit in band 2, but the suppressed dot rests at the
            // bottom of the plot area.
            assert_eq!(suppressed.x, published.x);
            assert!(suppressed.y > published.y);
            assert_eq!(suppressed.y, 720.0);
        }
        other => panic!("unexpected marks: {other:?}"),
    }
}

#[test]
fn dot_chart_hides_national_and_ungrouped_rows_but_keeps_the_average() {
    let store = dot_store();
    let mut engine = dot_engine();

    engine
        .stage_config(dot_step(60.0), &store)
        .expect("stage config");
    engine.on_intersection(1.0, &store).expect("dock");

    assert!(engine.animator().mark("Australia").is_none());
    assert!(engine.animator().mark("Norfolk Island").is_none());

    let average = engine
        .animator()
        .mark("group-average")
        .expect("average path");
    match average {
        Mark::Path(path) => {
            assert!(path.dashed);
            // One point per band that has a published value.
            assert_eq!(path.segments[0].len(), 6);
        }
        other => panic!("unexpected mark: {other:?}"),
    }
}

#[test]
fn undock_clears_marks_and_highlights() {
    let store = line_store();
    let mut engine = line_engine();

    let mut step = line_step(60.0);
    step.highlight_bars = vec![2];
    step.highlight_own_bar = true;
    engine.set_session(Some(4), None, None);
    engine.stage_config(step, &store).expect("stage config");

    engine.on_intersection(1.0, &store).expect("dock");
    assert!(engine.animator().mark_count() > 0);
    assert_eq!(engine.highlight_bands(), vec![2, 4]);

    engine.on_intersection(0.1, &store).expect("undock");
    assert!(!engine.is_docked());
    assert!(engine.has_been_docked());
    assert_eq!(engine.animator().mark_count(), 0);
    assert!(engine.highlight_bands().is_empty());
}

#[test]
fn own_bar_is_not_duplicated_when_already_highlighted() {
    let store = line_store();
    let mut engine = line_engine();

    let mut step = line_step(60.0);
    step.highlight_bars = vec![4];
    step.highlight_own_bar = true;
    engine.set_session(Some(4), None, None);
    engine.stage_config(step, &store).expect("stage config");
    engine.on_intersection(1.0, &store).expect("dock");

    assert_eq!(engine.highlight_bands(), vec![4]);
}

#[test]
fn dot_chart_appends_the_readers_region() {
    let store = dot_store();
    let mut engine = dot_engine();

    let mut step = dot_step(60.0);
    step.highlight_bars = vec![1];
    step.highlight_own_bar = true;
    engine.set_session(Some(3), Some(6), None);
    engine.stage_config(step, &store).expect("stage config");
    engine.on_intersection(1.0, &store).expect("dock");

    // Dot charts highlight the region, not the quintile.
    assert_eq!(engine.highlight_bands(), vec![1, 6]);
}

#[test]
fn restaging_while_docked_redraws_with_the_new_config() {
    let store = line_store();
    let mut engine = line_engine();

    engine
        .stage_config(line_step(60.0), &store)
        .expect("stage first config");
    engine.on_intersection(1.0, &store).expect("dock");
    let marks_after_dock = engine.animator().mark_count();

    engine
        .stage_config(line_step(120.0), &store)
        .expect("stage second config");
    assert_eq!(engine.animator().last_axis_y_max, Some(120.0));
    assert_eq!(engine.animator().mark_count(), marks_after_dock);
}

#[test]
fn identical_config_applied_twice_leaves_one_mark_per_datum() {
    let store = dot_store();
    let mut engine = dot_engine();

    engine
        .stage_config(dot_step(60.0), &store)
        .expect("stage config");
    engine.on_intersection(1.0, &store).expect("dock");
    let first_count = engine.animator().mark_count();
    let enters = engine.animator().enter_count;

    engine
        .stage_config(dot_step(60.0), &store)
        .expect("restage config");
    assert_eq!(engine.animator().mark_count(), first_count);
    // Second application only updates; nothing enters twice.
    assert_eq!(engine.animator().enter_count, enters);
    assert!(engine.animator().update_count >= first_count);
}

#[test]
fn mobile_height_jitter_is_ignored_entirely() {
    let store = dot_store();
    let mut engine = ChartEngine::new(
        NullAnimator::new(),
        ChartEngineConfig::new(ChartKind::Dot, viewport()).with_resize(ResizeConfig {
            is_mobile: true,
            height_jitter_px: 128,
        }),
    )
    .expect("engine init");

    engine
        .stage_config(dot_step(60.0), &store)
        .expect("stage config");
    engine.on_intersection(1.0, &store).expect("dock");
    let commands_before = engine.animator().last_command_count;
    let margin_before = engine.margin();

    // Browser chrome collapsing: height shrinks 100 px, width unchanged.
    let decision = engine
        .resize(Viewport::new(1000, 700), &store)
        .expect("resize");
    assert_eq!(decision, ResizeDecision::Ignore);
    assert_eq!(engine.viewport(), viewport());
    assert_eq!(engine.margin(), margin_before);
    assert_eq!(engine.animator().last_command_count, commands_before);

    // A real rotation passes through.
    let decision = engine
        .resize(Viewport::new(700, 1000), &store)
        .expect("resize");
    assert_eq!(decision, ResizeDecision::Recompute);
    assert_eq!(engine.viewport(), Viewport::new(700, 1000));
}

#[test]
fn y_axis_animates_only_when_the_domain_changes() {
    let store = line_store();
    let mut engine = ChartEngine::new(
        RecordingAnimator::default(),
        ChartEngineConfig::new(ChartKind::Line, viewport()),
    )
    .expect("engine init");

    engine
        .stage_config(line_step(60.0), &store)
        .expect("stage config");
    engine.on_intersection(1.0, &store).expect("dock");

    let axis_transition = |batch: &[MarkCommand]| {
        batch.iter().find_map(|command| match command {
            MarkCommand::Axis { transition, .. } => Some(*transition),
            _ => None,
        })
    };

    let dock_batch = engine.animator().batches.last().expect("dock batch");
    assert_eq!(
        axis_transition(dock_batch).expect("axis command").duration_ms,
        durations::Y_AXIS_MS
    );

    // Same y max: axis redraw is instant.
    engine
        .stage_config(line_step(60.0), &store)
        .expect("restage same y max");
    let same_batch = engine.animator().batches.last().expect("restage batch");
    assert_eq!(
        axis_transition(same_batch).expect("axis command").duration_ms,
        0
    );

    // New y max: axis animates again.
    engine
        .stage_config(line_step(120.0), &store)
        .expect("restage new y max");
    let changed_batch = engine.animator().batches.last().expect("restage batch");
    assert_eq!(
        axis_transition(changed_batch)
            .expect("axis command")
            .duration_ms,
        durations::Y_AXIS_MS
    );
}

#[test]
fn pure_resize_repositions_without_animating() {
    let store = line_store();
    let mut engine = ChartEngine::new(
        RecordingAnimator::default(),
        ChartEngineConfig::new(ChartKind::Line, viewport()),
    )
    .expect("engine init");

    engine
        .stage_config(line_step(60.0), &store)
        .expect("stage config");
    engine.on_intersection(1.0, &store).expect("dock");

    let decision = engine
        .resize(Viewport::new(1400, 900), &store)
        .expect("resize");
    assert_eq!(decision, ResizeDecision::Recompute);

    let batch = engine.animator().batches.last().expect("resize batch");
    for command in batch {
        match command {
            MarkCommand::Axis { transition, .. } => assert_eq!(transition.duration_ms, 0),
            MarkCommand::Enter { transition, .. }
            | MarkCommand::Update { transition, .. }
            | MarkCommand::Exit { transition, .. } => assert_eq!(transition.duration_ms, 1),
        }
    }
}

#[test]
fn entering_dots_stagger_their_delays() {
    let store = dot_store();
    let mut engine = ChartEngine::new(
        RecordingAnimator::default(),
        ChartEngineConfig::new(ChartKind::Dot, viewport()),
    )
    .expect("engine init");

    engine
        .stage_config(dot_step(60.0), &store)
        .expect("stage config");
    engine.on_intersection(1.0, &store).expect("dock");

    let batch = engine.animator().batches.last().expect("dock batch");
    let dot_delays: Vec<f64> = batch
        .iter()
        .filter_map(|command| match command {
            MarkCommand::Enter {
                mark: Mark::Dot(_),
                transition,
            } => Some(transition.delay_ms),
            _ => None,
        })
        .collect();

    assert!(dot_delays.len() > 1);
    for window in dot_delays.windows(2) {
        assert!(window[1] > window[0]);
    }
}

#[test]
fn staging_the_wrong_chart_kind_is_rejected() {
    let store = dot_store();
    let mut engine = line_engine();
    assert!(engine.stage_config(dot_step(60.0), &store).is_err());
}

#[test]
fn invalid_viewport_is_rejected_at_construction() {
    let config = ChartEngineConfig::new(ChartKind::Line, Viewport::new(0, 800));
    assert!(ChartEngine::new(NullAnimator::new(), config).is_err());
}
