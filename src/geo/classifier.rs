use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::data::records::UserSelection;
use crate::data::tables::ReferenceTables;

/// The area chosen for the reader's postcode: the mapping with the highest
/// population ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedArea {
    pub code: String,
    pub name: String,
    pub state: String,
    pub ratio: f64,
}

/// Everything the narrative layer needs to personalise copy and highlight
/// the reader's position in the charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Socio-economic quintile, 1 (most disadvantaged) to 5.
    pub quintile: u8,
    pub resolved_area: ResolvedArea,
    /// Remoteness/advantage bucket, 1 (remote) to 6 (major city, high advantage).
    pub region: u8,
}

/// Result of classifying a selection.
///
/// `NotReady` means a required reference table has not finished loading;
/// `NoMatch` means the lookup chain broke somewhere (no area mapping, no
/// decile, or no region entry) and the caller should fall back to generic
/// copy. Neither is an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifyOutcome {
    Classified(Classification),
    NoMatch,
    NotReady,
}

impl ClassifyOutcome {
    #[must_use]
    pub fn classification(&self) -> Option<&Classification> {
        match self {
            ClassifyOutcome::Classified(classification) => Some(classification),
            ClassifyOutcome::NoMatch | ClassifyOutcome::NotReady => None,
        }
    }
}

/// `ceil(decile / 2)`, clamped to the quintile domain.
#[must_use]
pub fn quintile_from_decile(decile: u8) -> u8 {
    (decile.div_ceil(2)).clamp(1, 5)
}

/// Maps a selection to quintile, resolved area and region bucket.
pub fn classify(tables: &ReferenceTables, selection: &UserSelection) -> ClassifyOutcome {
    if !tables.has_postcode_to_decile() || !tables.has_postcode_to_area() {
        error!(
            postcode = selection.postcode.as_str(),
            "classify called before reference tables loaded"
        );
        return ClassifyOutcome::NotReady;
    }

    let Some(resolved_area) = resolve_area(tables, &selection.postcode) else {
        warn!(
            postcode = selection.postcode.as_str(),
            "postcode has no area mapping"
        );
        return ClassifyOutcome::NoMatch;
    };

    let Some(decile) = tables.decile_for(&selection.postcode) else {
        warn!(
            postcode = selection.postcode.as_str(),
            "postcode has no decile entry"
        );
        return ClassifyOutcome::NoMatch;
    };

    let Some(region) = tables.region_for(&resolved_area.code) else {
        warn!(
            area_code = resolved_area.code.as_str(),
            "area has no region entry"
        );
        return ClassifyOutcome::NoMatch;
    };

    ClassifyOutcome::Classified(Classification {
        quintile: quintile_from_decile(decile),
        resolved_area,
        region,
    })
}

/// Argmax by ratio over the postcode's mappings.
///
/// Tie-break: when several areas share the maximum ratio, the smallest area
/// code wins, so the result is independent of table order.
fn resolve_area(tables: &ReferenceTables, postcode: &str) -> Option<ResolvedArea> {
    let mappings = tables.mappings_for(postcode);
    let best = mappings.iter().max_by(|a, b| {
        a.ratio
            .partial_cmp(&b.ratio)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.area_code.cmp(&a.area_code))
    })?;

    let (name, state) = match tables.area_record(&best.area_code) {
        Some(record) => (record.name.clone(), record.state.clone()),
        // Area table still loading: fall back to the bare code.
        None => (best.area_code.clone(), String::new()),
    };

    Some(ResolvedArea {
        code: best.area_code.clone(),
        name,
        state,
        ratio: best.ratio,
    })
}
