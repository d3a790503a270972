use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::data::tables::ReferenceTables;

/// Tunables for free-text area search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolverTuning {
    /// Shortest name query that triggers a fuzzy search.
    pub min_query_len: usize,
    /// Fuzzy score floor; candidates below it are dropped.
    pub min_score: f64,
    pub max_results: usize,
}

impl Default for ResolverTuning {
    fn default() -> Self {
        Self {
            min_query_len: 3,
            min_score: 0.55,
            max_results: 10,
        }
    }
}

/// One ranked area candidate for a query.
///
/// `ratio` is present for postcode queries (the fraction of the postcode's
/// population inside the area) and absent for name matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub code: String,
    pub name: String,
    pub state: String,
    pub ratio: Option<f64>,
    pub score: f64,
}

/// Resolves postcode digits or suburb/area names to ranked candidates.
///
/// Pure function of the query and the loaded reference tables; a table that
/// has not finished loading yields an empty result, never an error.
#[derive(Debug)]
pub struct Resolver<'a> {
    tables: &'a ReferenceTables,
    tuning: ResolverTuning,
}

impl<'a> Resolver<'a> {
    #[must_use]
    pub fn new(tables: &'a ReferenceTables) -> Self {
        Self::with_tuning(tables, ResolverTuning::default())
    }

    #[must_use]
    pub fn with_tuning(tables: &'a ReferenceTables, tuning: ResolverTuning) -> Self {
        Self { tables, tuning }
    }

    #[must_use]
    pub fn resolve(&self, query: &str) -> Vec<Candidate> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        if is_postcode_query(query) {
            self.resolve_postcode(query)
        } else {
            self.resolve_name(query)
        }
    }

    fn resolve_postcode(&self, digits: &str) -> Vec<Candidate> {
        let Some(mappings) = self.tables.postcode_mappings() else {
            warn!("postcode lookup requested before area mappings loaded");
            return Vec::new();
        };

        // Dedupe by area code, keeping the best ratio seen for each area.
        let mut by_area: IndexMap<&str, f64> = IndexMap::new();
        for mapping in mappings {
            if !mapping.postcode.starts_with(digits) {
                continue;
            }
            let entry = by_area.entry(mapping.area_code.as_str()).or_insert(0.0);
            if mapping.ratio > *entry {
                *entry = mapping.ratio;
            }
        }

        let mut candidates: Vec<Candidate> = by_area
            .into_iter()
            .map(|(code, ratio)| match self.tables.area_record(code) {
                Some(record) => Candidate {
                    code: record.code.clone(),
                    name: record.name.clone(),
                    state: record.state.clone(),
                    ratio: Some(ratio),
                    score: ratio,
                },
                None => {
                    debug!(area_code = code, "mapped area missing from area table");
                    Candidate {
                        code: code.to_owned(),
                        name: code.to_owned(),
                        state: String::new(),
                        ratio: Some(ratio),
                        score: ratio,
                    }
                }
            })
            .collect();

        candidates.sort_by(|a, b| {
            OrderedFloat(b.score)
                .cmp(&OrderedFloat(a.score))
                .then_with(|| a.code.cmp(&b.code))
        });
        candidates.truncate(self.tuning.max_results);
        candidates
    }

    fn resolve_name(&self, query: &str) -> Vec<Candidate> {
        if query.chars().count() < self.tuning.min_query_len {
            return Vec::new();
        }

        let Some(areas) = self.tables.areas() else {
            warn!("name lookup requested before area table loaded");
            return Vec::new();
        };

        let needle = query.to_lowercase();
        let mut candidates: Vec<Candidate> = areas
            .iter()
            .filter_map(|record| {
                let score = name_score(&needle, &record.name);
                if score < self.tuning.min_score {
                    return None;
                }
                Some(Candidate {
                    code: record.code.clone(),
                    name: record.name.clone(),
                    state: record.state.clone(),
                    ratio: None,
                    score,
                })
            })
            .collect();

        candidates.sort_by(|a, b| {
            OrderedFloat(b.score)
                .cmp(&OrderedFloat(a.score))
                .then_with(|| a.code.cmp(&b.code))
        });
        candidates.truncate(self.tuning.max_results);
        candidates
    }
}

fn is_postcode_query(query: &str) -> bool {
    (1..=4).contains(&query.len()) && query.bytes().all(|byte| byte.is_ascii_digit())
}

/// Edit-distance score with a substring boost so partial suburb names rank
/// their containing areas first.
fn name_score(needle_lower: &str, candidate: &str) -> f64 {
    let haystack = candidate.to_lowercase();
    let base = strsim::normalized_levenshtein(needle_lower, &haystack);
    if haystack.contains(needle_lower) {
        (base + 0.35).min(1.0)
    } else {
        base
    }
}
