use serde::{Deserialize, Serialize};

use crate::core::value::{MetricValue, SeriesGroup};

/// One statistical area: static reference data, loaded once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaRecord {
    pub code: String,
    pub name: String,
    pub state: String,
}

/// Fraction of a postcode's population inside one area.
///
/// Many-to-many: a postcode can map to several areas, and the ratios for a
/// fixed postcode need not sum to 1 (population outside mapped areas is
/// implicit).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostcodeAreaMapping {
    pub postcode: String,
    pub area_code: String,
    pub ratio: f64,
}

/// How the reader picked their place: digits or a suburb name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionKind {
    Postcode,
    Suburb,
}

/// The session's single mutable value, overwritten on each new selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSelection {
    pub postcode: String,
    pub kind: SelectionKind,
    pub value: Option<String>,
}

impl UserSelection {
    #[must_use]
    pub fn postcode(postcode: impl Into<String>) -> Self {
        Self {
            postcode: postcode.into(),
            kind: SelectionKind::Postcode,
            value: None,
        }
    }

    #[must_use]
    pub fn suburb(postcode: impl Into<String>, suburb: impl Into<String>) -> Self {
        Self {
            postcode: postcode.into(),
            kind: SelectionKind::Suburb,
            value: Some(suburb.into()),
        }
    }
}

/// One chart datum: an area's value within a category band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRow {
    pub area_code: String,
    pub area_name: String,
    pub group: SeriesGroup,
    pub value: MetricValue,
}

/// Per-area service-usage figures backing the personalised narrative copy.
///
/// An empty string in the source JSON means "not published", distinct from
/// zero; `MetricValue` keeps that distinction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceUsage {
    pub name: String,
    pub services_per_100: MetricValue,
    pub dollars_per_100: MetricValue,
    pub percent_of_people: MetricValue,
}
