use approx::assert_relative_eq;
use storychart::core::band::{BandScale, BandTick};
use storychart::core::margins::{Margin, MarginTuning};
use storychart::core::scale::ValueScale;
use storychart::core::types::{ChartKind, Viewport};

fn viewport() -> Viewport {
    Viewport::new(1000, 800)
}

fn margin() -> Margin {
    Margin::from_viewport(viewport()).expect("margin from viewport")
}

#[test]
fn margins_follow_viewport_ratios() {
    let margin = margin();
    assert_relative_eq!(margin.top, 160.0);
    assert_relative_eq!(margin.right, 150.0);
    assert_relative_eq!(margin.bottom, 80.0);
    assert_relative_eq!(margin.left, 120.0);
    assert_relative_eq!(margin.plot_width(viewport()), 730.0);
    assert_relative_eq!(margin.plot_height(viewport()), 560.0);
}

#[test]
fn margin_tuning_rejects_out_of_range_ratios() {
    let tuning = MarginTuning {
        top_ratio: 0.6,
        ..MarginTuning::default()
    };
    assert!(Margin::from_viewport_tuned(viewport(), tuning).is_err());
}

#[test]
fn value_scale_is_inverted() {
    let scale = ValueScale::from_y_max(100.0).expect("scale");
    let top = scale
        .value_to_pixel(100.0, viewport(), margin())
        .expect("map max");
    let bottom = scale
        .value_to_pixel(0.0, viewport(), margin())
        .expect("map min");

    assert_relative_eq!(top, 160.0);
    assert_relative_eq!(bottom, 720.0);
    assert!(top < bottom);
}

#[test]
fn value_scale_round_trips() {
    let scale = ValueScale::from_y_max(250.0).expect("scale");
    for value in [0.0, 12.5, 100.0, 249.9] {
        let pixel = scale
            .value_to_pixel(value, viewport(), margin())
            .expect("to pixel");
        let back = scale
            .pixel_to_value(pixel, viewport(), margin())
            .expect("to value");
        assert_relative_eq!(back, value, epsilon = 1e-9);
    }
}

#[test]
fn baseline_sits_at_domain_zero() {
    let scale = ValueScale::from_y_max(80.0).expect("scale");
    let baseline = scale.baseline(viewport(), margin()).expect("baseline");
    let zero = scale
        .value_to_pixel(0.0, viewport(), margin())
        .expect("zero");
    assert_relative_eq!(baseline, zero);
}

#[test]
fn value_scale_rejects_degenerate_domains() {
    assert!(ValueScale::from_y_max(0.0).is_err());
    assert!(ValueScale::from_y_max(-5.0).is_err());
    assert!(ValueScale::from_y_max(f64::NAN).is_err());
    assert!(ValueScale::new(5.0, 5.0).is_err());
}

#[test]
fn band_scale_tick_lists_interleave_spacers() {
    let five = BandScale::for_kind(ChartKind::Line);
    assert_eq!(
        five.ticks(),
        vec![
            BandTick::Start,
            BandTick::Band(1),
            BandTick::Spacer(2),
            BandTick::Band(2),
            BandTick::Spacer(3),
            BandTick::Band(3),
            BandTick::Spacer(4),
            BandTick::Band(4),
            BandTick::Spacer(5),
            BandTick::Band(5),
            BandTick::End,
        ]
    );

    let six = BandScale::for_kind(ChartKind::Dot);
    assert_eq!(six.ticks().len(), 13);
    assert_eq!(six.band_count(), 6);
}

#[test]
fn band_positions_sit_between_spacers() {
    let scale = BandScale::for_kind(ChartKind::Line);
    let viewport = viewport();
    let margin = margin();

    let first = scale.position(1, viewport, margin).expect("band 1");
    let last = scale.position(5, viewport, margin).expect("band 5");
    let step = margin.plot_width(viewport) / 10.0;

    assert_relative_eq!(first, margin.left + step);
    assert_relative_eq!(last, margin.left + 9.0 * step);

    // Uniform spacing between consecutive bands.
    let mut previous = first;
    for band in 2..=5 {
        let position = scale.position(band, viewport, margin).expect("band");
        assert_relative_eq!(position - previous, 2.0 * step, epsilon = 1e-9);
        previous = position;
    }
}

#[test]
fn band_positions_stay_inside_the_plot_area() {
    for kind in [ChartKind::Line, ChartKind::Dot] {
        let scale = BandScale::for_kind(kind);
        for band in 1..=scale.band_count() {
            let x = scale.position(band, viewport(), margin()).expect("band");
            assert!(x > margin().left);
            assert!(x < f64::from(viewport().width) - margin().right);
        }
    }
}

#[test]
fn band_out_of_range_is_rejected() {
    let scale = BandScale::for_kind(ChartKind::Line);
    assert!(scale.position(0, viewport(), margin()).is_err());
    assert!(scale.position(6, viewport(), margin()).is_err());
    assert!(BandScale::new(1).is_err());
}
