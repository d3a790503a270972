use serde::{Deserialize, Serialize};

use crate::data::tables::ReferenceTables;
use crate::geo::classifier::{Classification, ClassifyOutcome};

/// Behaviour flags for one content panel, parsed from its markup config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelConfig {
    /// Replace the panel's static copy with personalised copy.
    pub swap: bool,
    pub scrollout: bool,
    pub scrollout_top: bool,
    /// Scrolls out at the bottom only; skips the top fade entirely.
    pub scrollout_bottom: bool,
    pub spacer_top: bool,
    pub spacer_bottom: bool,
}

/// Fade geometry for panels entering from the bottom of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeTuning {
    /// Distance from the viewport bottom over which the panel fades in.
    pub threshold_px: f64,
    /// The fade starts this far before the panel's top crosses the bottom
    /// edge, so panels are invisible slightly off-screen.
    pub offset_px: f64,
    /// Residual opacity for panels entirely outside the viewport.
    pub offscreen_opacity: f64,
}

impl Default for FadeTuning {
    fn default() -> Self {
        Self {
            threshold_px: 400.0,
            offset_px: -10.0,
            offscreen_opacity: 0.1,
        }
    }
}

/// Opacity for a panel whose bounding box spans `top..bottom` in viewport
/// coordinates.
///
/// Linear in how far the panel's top has risen past the viewport bottom,
/// clamped to [0, 1]. Panels wholly outside the viewport keep a residual
/// opacity so they never pop in from nothing.
#[must_use]
pub fn fade_opacity(
    config: PanelConfig,
    tuning: FadeTuning,
    top: f64,
    bottom: f64,
    viewport_height: f64,
) -> f64 {
    if bottom < 0.0 || top > viewport_height {
        return tuning.offscreen_opacity;
    }
    if config.scrollout_bottom {
        return 1.0;
    }

    let risen = viewport_height - top;
    let span = tuning.threshold_px - tuning.offset_px;
    if span <= 0.0 {
        return 1.0;
    }
    ((risen - tuning.offset_px) / span).clamp(0.0, 1.0)
}

/// What a panel renders: its original nodes, or personalised copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PanelContent {
    /// Pass-through panel; nodes emitted unchanged.
    Static(Vec<String>),
    /// Swap panel with copy built from the reader's classification.
    Personalised(Vec<String>),
    /// Swap panel for a reader we could not classify.
    Fallback(Vec<String>),
}

impl PanelContent {
    #[must_use]
    pub fn paragraphs(&self) -> &[String] {
        match self {
            PanelContent::Static(nodes)
            | PanelContent::Personalised(nodes)
            | PanelContent::Fallback(nodes) => nodes,
        }
    }
}

/// Renders one panel's content.
///
/// Non-swap panels keep their static nodes. Swap panels build copy from the
/// reader's classification joined with the service-usage table by area code;
/// any gap in that chain (no match, tables not ready, value not published)
/// degrades to generic copy rather than failing.
#[must_use]
pub fn render_panel(
    config: PanelConfig,
    nodes: &[String],
    outcome: &ClassifyOutcome,
    tables: &ReferenceTables,
) -> PanelContent {
    if !config.swap {
        return PanelContent::Static(nodes.to_vec());
    }

    match outcome.classification() {
        Some(classification) => PanelContent::Personalised(personalised_copy(classification, tables)),
        None => PanelContent::Fallback(fallback_copy()),
    }
}

fn personalised_copy(classification: &Classification, tables: &ReferenceTables) -> Vec<String> {
    let area = &classification.resolved_area;
    let mut paragraphs = vec![format!(
        "Your area, {}, is in the {} and counts as {}.",
        area.name,
        quintile_description(classification.quintile),
        region_description(classification.region),
    )];

    let usage = tables.service_usage_for(&area.code);
    let services = usage.and_then(|usage| usage.services_per_100.published());
    let dollars = usage.and_then(|usage| usage.dollars_per_100.published());
    let percent = usage.and_then(|usage| usage.percent_of_people.published());

    match (services, dollars, percent) {
        (Some(services), Some(dollars), Some(percent)) => {
            paragraphs.push(format!(
                "In {}, people received {services:.0} services per 100 \
                 residents, costing ${dollars:.0} per 100 residents, and \
                 {percent:.0}% of people used the service at least once.",
                area.name,
            ));
        }
        _ => {
            // Suppressed for privacy in small areas.
            paragraphs.push(format!(
                "Figures for {} were not published, so we can't show how \
                 your area compares.",
                area.name,
            ));
        }
    }

    paragraphs
}

fn fallback_copy() -> Vec<String> {
    vec![
        "We couldn't match your search to an area, so the charts show the \
         national picture instead."
            .to_owned(),
    ]
}

/// Quintile axis labels, 1 (most disadvantaged) to 5.
#[must_use]
pub fn quintile_description(quintile: u8) -> &'static str {
    match quintile {
        1 => "most disadvantaged fifth of areas",
        2 => "second-most disadvantaged fifth of areas",
        3 => "middle fifth of areas",
        4 => "second-most advantaged fifth of areas",
        _ => "most advantaged fifth of areas",
    }
}

/// Remoteness/advantage axis labels, 1 (remote) to 6.
#[must_use]
pub fn region_description(region: u8) -> &'static str {
    match region {
        1 => "remote",
        2 => "outer regional",
        3 => "inner regional",
        4 => "major city, low advantage",
        5 => "major city, medium advantage",
        _ => "major city, high advantage",
    }
}
