use crate::core::band::BandScale;
use crate::core::margins::Margin;
use crate::core::scale::ValueScale;
use crate::core::stats::{group_averages, lowest_highest};
use crate::core::types::Viewport;
use crate::core::value::SeriesGroup;
use crate::data::records::SeriesRow;
use crate::error::StoryResult;
use crate::render::marks::{DotMark, LabelAlign, LabelKind, LabelMark, Mark, PathMark};

pub const DOT_RADIUS: f64 = 6.0;

const EMPHASIS_COLOR: &str = "black";
const DEFAULT_COLOR: &str = "steelblue";
const AVERAGE_COLOR: &str = "black";

/// Which marks deserve special treatment in the current story step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmphasisContext {
    /// Name of the reader's resolved area, if a selection was made.
    pub own_area_name: Option<String>,
    pub label_own_dot: bool,
    pub show_low_high: bool,
    pub testimonial_area: Option<String>,
}

impl EmphasisContext {
    fn is_own(&self, row: &SeriesRow) -> bool {
        self.label_own_dot
            && self
                .own_area_name
                .as_deref()
                .is_some_and(|own| own == row.area_name)
    }
}

/// Projects a dot dataset into circle marks, keyed by area name.
///
/// Ungrouped rows are not rendered at all; national rows stay off-canvas
/// (they exist only for mean calculations); not-published rows sit at the
/// baseline with zero opacity instead of a numeric position.
pub fn project_dots(
    rows: &[SeriesRow],
    dot_color: Option<&str>,
    band_scale: BandScale,
    value_scale: ValueScale,
    viewport: Viewport,
    margin: Margin,
    emphasis: &EmphasisContext,
) -> StoryResult<Vec<Mark>> {
    let low_high = if emphasis.show_low_high {
        lowest_highest(rows, |row| row.value)
    } else {
        None
    };

    let baseline = value_scale.baseline(viewport, margin)?;
    let mut marks = Vec::with_capacity(rows.len());

    for (index, row) in rows.iter().enumerate() {
        let Some(band) = row.group.band() else {
            continue;
        };

        let x = band_scale.position(band, viewport, margin)?;
        let (y, opacity) = match row.value.published() {
            Some(value) => (value_scale.value_to_pixel(value, viewport, margin)?, 1.0),
            None => (baseline, 0.0),
        };

        let is_extreme = low_high
            .is_some_and(|extremes| index == extremes.lowest || index == extremes.highest);
        let emphasized = is_extreme || emphasis.is_own(row);

        let color = if emphasized {
            EMPHASIS_COLOR.to_owned()
        } else {
            dot_color.unwrap_or(DEFAULT_COLOR).to_owned()
        };

        marks.push(Mark::Dot(DotMark {
            key: row.area_name.clone(),
            x,
            y,
            radius: DOT_RADIUS,
            color,
            opacity,
            emphasized,
        }));
    }

    Ok(marks)
}

/// Dashed per-band average path over the published, banded rows.
///
/// Returns `None` when no band has a published value.
pub fn project_average_path(
    rows: &[SeriesRow],
    band_scale: BandScale,
    value_scale: ValueScale,
    viewport: Viewport,
    margin: Margin,
    hidden: bool,
) -> StoryResult<Option<Mark>> {
    let averages = group_averages(rows, |row| row.group, |row| row.value);
    if averages.is_empty() {
        return Ok(None);
    }

    let mut points = Vec::with_capacity(averages.len());
    for average in &averages {
        let x = band_scale.position(average.band, viewport, margin)?;
        let y = value_scale.value_to_pixel(average.mean, viewport, margin)?;
        points.push((x, y));
    }

    Ok(Some(Mark::Path(PathMark {
        key: "group-average".to_owned(),
        segments: vec![points],
        color: AVERAGE_COLOR.to_owned(),
        dashed: true,
        opacity: if hidden { 0.0 } else { 1.0 },
    })))
}

/// Low/high, own-area and testimonial labels for a dot dataset.
pub fn project_dot_labels(
    rows: &[SeriesRow],
    band_scale: BandScale,
    value_scale: ValueScale,
    viewport: Viewport,
    margin: Margin,
    emphasis: &EmphasisContext,
    testimonial_color: Option<&str>,
) -> StoryResult<Vec<Mark>> {
    let mut labels = Vec::new();

    if emphasis.show_low_high {
        if let Some(extremes) = lowest_highest(rows, |row| row.value) {
            for (index, kind, key) in [
                (extremes.lowest, LabelKind::Low, "label:low"),
                (extremes.highest, LabelKind::High, "label:high"),
            ] {
                if let Some(label) = area_label(
                    &rows[index],
                    kind,
                    key,
                    None,
                    band_scale,
                    value_scale,
                    viewport,
                    margin,
                )? {
                    labels.push(label);
                }
            }
        }
    }

    if emphasis.label_own_dot {
        let own_row = emphasis
            .own_area_name
            .as_deref()
            .and_then(|own| rows.iter().find(|row| row.area_name == own));
        if let Some(row) = own_row {
            if let Some(label) = area_label(
                row,
                LabelKind::OwnArea,
                "label:own",
                None,
                band_scale,
                value_scale,
                viewport,
                margin,
            )? {
                labels.push(label);
            }
        }
    }

    let testimonial_row = emphasis
        .testimonial_area
        .as_deref()
        .and_then(|name| rows.iter().find(|row| row.area_name == name));
    if let Some(row) = testimonial_row {
        if let Some(label) = area_label(
            row,
            LabelKind::Testimonial,
            "label:testimonial",
            testimonial_color,
            band_scale,
            value_scale,
            viewport,
            margin,
        )? {
            labels.push(label);
        }
    }

    Ok(labels)
}

#[allow(clippy::too_many_arguments)]
fn area_label(
    row: &SeriesRow,
    kind: LabelKind,
    key: &str,
    color: Option<&str>,
    band_scale: BandScale,
    value_scale: ValueScale,
    viewport: Viewport,
    margin: Margin,
) -> StoryResult<Option<Mark>> {
    let Some(band) = row.group.band() else {
        return Ok(None);
    };
    let Some(value) = row.value.published() else {
        return Ok(None);
    };

    Ok(Some(Mark::Label(LabelMark {
        key: key.to_owned(),
        text: row.area_name.clone(),
        x: band_scale.position(band, viewport, margin)?,
        y: value_scale.value_to_pixel(value, viewport, margin)?,
        align: label_align(band),
        kind,
        color: color.map(str::to_owned),
    })))
}

/// Labels on the left half of the axis hang right of their mark and vice
/// versa, so text never leaves the plot area.
fn label_align(band: u8) -> LabelAlign {
    if band < 5 {
        LabelAlign::Left
    } else {
        LabelAlign::Right
    }
}

/// Projects one line-chart series: a path with per-band dots and an
/// optional start label, all keyed under the line name.
#[allow(clippy::too_many_arguments)]
pub fn project_line(
    line_name: &str,
    color: Option<&str>,
    label_text: Option<&str>,
    rows: &[SeriesRow],
    band_scale: BandScale,
    value_scale: ValueScale,
    viewport: Viewport,
    margin: Margin,
) -> StoryResult<Vec<Mark>> {
    let color = color.unwrap_or(DEFAULT_COLOR);
    let mut marks = Vec::with_capacity(rows.len() + 2);

    let mut segments: Vec<Vec<(f64, f64)>> = Vec::new();
    let mut current: Vec<(f64, f64)> = Vec::new();

    for row in rows {
        // National rows are kept in the dataset for means but never drawn.
        if row.group == SeriesGroup::National {
            continue;
        }
        let Some(band) = row.group.band() else {
            continue;
        };

        let x = band_scale.position(band, viewport, margin)?;
        match row.value.published() {
            Some(value) => {
                let y = value_scale.value_to_pixel(value, viewport, margin)?;
                current.push((x, y));
                marks.push(Mark::Dot(DotMark {
                    key: format!("{line_name}:{band}"),
                    x,
                    y,
                    radius: DOT_RADIUS,
                    color: color.to_owned(),
                    opacity: 1.0,
                    emphasized: false,
                }));
            }
            None => {
                // Not-published breaks the path into a gap.
                if current.len() > 1 {
                    segments.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            }
        }
    }
    if current.len() > 1 {
        segments.push(current);
    }

    let path_start = segments.first().and_then(|segment| segment.first()).copied();
    if !segments.is_empty() {
        marks.push(Mark::Path(PathMark {
            key: format!("{line_name}:path"),
            segments,
            color: color.to_owned(),
            dashed: false,
            opacity: 1.0,
        }));
    }

    if let (Some(text), Some((x, y))) = (label_text, path_start) {
        marks.push(Mark::Label(LabelMark {
            key: format!("label:{line_name}"),
            text: text.to_owned(),
            x,
            y,
            align: LabelAlign::Left,
            kind: LabelKind::Line,
            color: Some(color.to_owned()),
        }));
    }

    Ok(marks)
}

/// Projects one precomputed average series (the `dot2` chart family):
/// band-indexed values become a path with a name label at its end.
#[allow(clippy::too_many_arguments)]
pub fn project_average_series(
    series_key: &str,
    name: &str,
    color: Option<&str>,
    values: &[f64],
    band_scale: BandScale,
    value_scale: ValueScale,
    viewport: Viewport,
    margin: Margin,
) -> StoryResult<Vec<Mark>> {
    let color = color.unwrap_or(DEFAULT_COLOR);
    let mut points = Vec::with_capacity(values.len());
    for (index, value) in values.iter().enumerate() {
        if !value.is_finite() {
            continue;
        }
        let band = index as u8 + 1;
        if band > band_scale.band_count() {
            break;
        }
        let x = band_scale.position(band, viewport, margin)?;
        let y = value_scale.value_to_pixel(*value, viewport, margin)?;
        points.push((x, y));
    }

    if points.len() < 2 {
        return Ok(Vec::new());
    }

    let end = points[points.len() - 1];
    Ok(vec![
        Mark::Path(PathMark {
            key: series_key.to_owned(),
            segments: vec![points],
            color: color.to_owned(),
            dashed: false,
            opacity: 1.0,
        }),
        Mark::Label(LabelMark {
            key: format!("label:{series_key}"),
            text: name.to_owned(),
            x: end.0,
            y: end.1,
            align: LabelAlign::Left,
            kind: LabelKind::Average,
            color: Some(color.to_owned()),
        }),
    ])
}
