use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::value::{MetricValue, SeriesGroup};

/// Mean of the published values inside one x-axis band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupAverage {
    pub band: u8,
    pub mean: f64,
}

/// Per-band means over the published, banded rows of a dataset.
///
/// Ungrouped and national rows carry no band and are skipped, as are
/// not-published values; a band with no published rows yields no entry.
/// Results are ordered by band.
pub fn group_averages<T>(
    rows: &[T],
    group_of: impl Fn(&T) -> SeriesGroup,
    value_of: impl Fn(&T) -> MetricValue,
) -> Vec<GroupAverage> {
    let mut sums: Vec<(f64, usize)> = Vec::new();

    for row in rows {
        let Some(band) = group_of(row).band() else {
            continue;
        };
        let Some(value) = value_of(row).published() else {
            continue;
        };

        let slot = usize::from(band);
        if sums.len() <= slot {
            sums.resize(slot + 1, (0.0, 0));
        }
        sums[slot].0 += value;
        sums[slot].1 += 1;
    }

    sums.iter()
        .enumerate()
        .filter(|(_, (_, count))| *count > 0)
        .map(|(band, (sum, count))| GroupAverage {
            band: band as u8,
            mean: sum / *count as f64,
        })
        .collect()
}

/// Indices of the rows holding the lowest and highest published values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LowHigh {
    pub lowest: usize,
    pub highest: usize,
}

/// Finds the extremes among published values; ties keep the first row seen.
///
/// Returns `None` when no row has a published value.
pub fn lowest_highest<T>(rows: &[T], value_of: impl Fn(&T) -> MetricValue) -> Option<LowHigh> {
    let published = rows
        .iter()
        .enumerate()
        .filter_map(|(index, row)| value_of(row).published().map(|value| (index, value)));

    let mut lowest: Option<(usize, f64)> = None;
    let mut highest: Option<(usize, f64)> = None;
    for (index, value) in published {
        if lowest.is_none_or(|(_, low)| OrderedFloat(value) < OrderedFloat(low)) {
            lowest = Some((index, value));
        }
        if highest.is_none_or(|(_, high)| OrderedFloat(value) > OrderedFloat(high)) {
            highest = Some((index, value));
        }
    }

    match (lowest, highest) {
        (Some((low_index, _)), Some((high_index, _))) => Some(LowHigh {
            lowest: low_index,
            highest: high_index,
        }),
        _ => None,
    }
}
