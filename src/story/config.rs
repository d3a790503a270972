use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::types::ChartKind;
use crate::error::{StoryError, StoryResult};

/// One series of a line chart: which dataset it draws and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineSpec {
    pub line_name: String,
    pub data_key: String,
    #[serde(default)]
    pub label_text: Option<String>,
    #[serde(default)]
    pub dot_color: Option<String>,
}

/// The dot chart's dataset selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DotSpec {
    pub data_key: String,
    #[serde(default)]
    pub dot_color: Option<String>,
}

/// One precomputed mean series for the average-line chart; `values` are
/// band-indexed (index 0 is band 1).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AverageSeries {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    pub values: Vec<f64>,
}

/// One entry of the story configuration table: everything a chart needs to
/// reconfigure itself when the reader scrolls past the matching marker.
///
/// Entries are static, loaded once at build time and selected (never
/// mutated) by marker key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryStep {
    pub chart_type: ChartKind,
    pub y_max: f64,
    #[serde(default)]
    pub highlight_bars: Vec<u8>,
    #[serde(default)]
    pub highlight_own_bar: bool,
    #[serde(default)]
    pub lines: Vec<LineSpec>,
    #[serde(default)]
    pub dots: Option<DotSpec>,
    #[serde(default)]
    pub averages: Vec<AverageSeries>,
    #[serde(default)]
    pub testimonial_area: Option<String>,
    #[serde(default)]
    pub show_low_high_dots: bool,
    #[serde(default)]
    pub label_own_dot: bool,
    #[serde(default)]
    pub chart_title: Option<String>,
    /// Dot charts can carry the dashed group average without showing it.
    #[serde(default)]
    pub hide_dotted_line: bool,
}

impl StoryStep {
    pub fn validate(&self) -> StoryResult<()> {
        if !self.y_max.is_finite() || self.y_max <= 0.0 {
            return Err(StoryError::InvalidData(
                "story step y_max must be finite and > 0".to_owned(),
            ));
        }

        let band_count = self.chart_type.band_count();
        for band in &self.highlight_bars {
            if *band == 0 || *band > band_count {
                return Err(StoryError::InvalidData(format!(
                    "highlight bar {band} outside 1..={band_count}"
                )));
            }
        }
        Ok(())
    }
}

/// The marker-key → story-step table, in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryTable(IndexMap<String, StoryStep>);

impl StoryTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> StoryResult<Self> {
        let table: Self = serde_json::from_str(json)
            .map_err(|source| StoryError::TableParse {
                table: "story",
                source,
            })?;
        for (key, step) in &table.0 {
            step.validate().map_err(|err| {
                StoryError::InvalidData(format!("story step `{key}`: {err}"))
            })?;
        }
        Ok(table)
    }

    pub fn insert(&mut self, key: impl Into<String>, step: StoryStep) -> StoryResult<()> {
        step.validate()?;
        self.0.insert(key.into(), step);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&StoryStep> {
        self.0.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
