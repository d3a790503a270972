use indexmap::IndexMap;
use tracing::warn;

use crate::data::records::{AreaRecord, PostcodeAreaMapping, SeriesRow, ServiceUsage};
use crate::error::{StoryError, StoryResult};

/// Read-only reference tables, each loaded independently.
///
/// Tables arrive asynchronously from the host; every accessor tolerates an
/// absent table so the absence of any one degrades only the dependent
/// feature, never the whole interactive.
#[derive(Debug, Default)]
pub struct ReferenceTables {
    areas: Option<Vec<AreaRecord>>,
    postcode_to_area: Option<Vec<PostcodeAreaMapping>>,
    postcode_to_decile: Option<IndexMap<String, u8>>,
    area_to_region: Option<IndexMap<String, u8>>,
    suburb_to_postcode: Option<IndexMap<String, String>>,
    postcodes: Option<Vec<String>>,
    service_usage: Option<IndexMap<String, ServiceUsage>>,
}

impl ReferenceTables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_areas(&mut self, json: &str) -> StoryResult<()> {
        let areas: Vec<AreaRecord> = parse(json, "areas")?;
        self.areas = Some(areas);
        Ok(())
    }

    pub fn load_postcode_to_area(&mut self, json: &str) -> StoryResult<()> {
        let mappings: Vec<PostcodeAreaMapping> = parse(json, "postcode_to_area")?;
        for mapping in &mappings {
            if !mapping.ratio.is_finite() || mapping.ratio <= 0.0 || mapping.ratio > 1.0 {
                return Err(StoryError::InvalidData(format!(
                    "postcode {} -> area {} has ratio {} outside (0, 1]",
                    mapping.postcode, mapping.area_code, mapping.ratio
                )));
            }
        }
        self.postcode_to_area = Some(mappings);
        Ok(())
    }

    pub fn load_postcode_to_decile(&mut self, json: &str) -> StoryResult<()> {
        let deciles: IndexMap<String, u8> = parse(json, "postcode_to_decile")?;
        for (postcode, decile) in &deciles {
            if !(1..=10).contains(decile) {
                return Err(StoryError::InvalidData(format!(
                    "postcode {postcode} has decile {decile} outside 1..=10"
                )));
            }
        }
        self.postcode_to_decile = Some(deciles);
        Ok(())
    }

    pub fn load_area_to_region(&mut self, json: &str) -> StoryResult<()> {
        let regions: IndexMap<String, u8> = parse(json, "area_to_region")?;
        for (area, region) in &regions {
            if !(1..=6).contains(region) {
                return Err(StoryError::InvalidData(format!(
                    "area {area} has region {region} outside 1..=6"
                )));
            }
        }
        self.area_to_region = Some(regions);
        Ok(())
    }

    pub fn load_suburb_to_postcode(&mut self, json: &str) -> StoryResult<()> {
        self.suburb_to_postcode = Some(parse(json, "suburb_to_postcode")?);
        Ok(())
    }

    pub fn load_postcodes(&mut self, json: &str) -> StoryResult<()> {
        self.postcodes = Some(parse(json, "postcodes")?);
        Ok(())
    }

    pub fn load_service_usage(&mut self, json: &str) -> StoryResult<()> {
        self.service_usage = Some(parse(json, "service_usage")?);
        Ok(())
    }

    #[must_use]
    pub fn has_areas(&self) -> bool {
        self.areas.is_some()
    }

    #[must_use]
    pub fn has_postcode_to_area(&self) -> bool {
        self.postcode_to_area.is_some()
    }

    #[must_use]
    pub fn has_postcode_to_decile(&self) -> bool {
        self.postcode_to_decile.is_some()
    }

    #[must_use]
    pub fn has_area_to_region(&self) -> bool {
        self.area_to_region.is_some()
    }

    #[must_use]
    pub fn areas(&self) -> Option<&[AreaRecord]> {
        self.areas.as_deref()
    }

    #[must_use]
    pub fn area_record(&self, code: &str) -> Option<&AreaRecord> {
        self.areas
            .as_ref()?
            .iter()
            .find(|record| record.code == code)
    }

    /// All area mappings for one postcode, in table order.
    #[must_use]
    pub fn mappings_for(&self, postcode: &str) -> Vec<&PostcodeAreaMapping> {
        match &self.postcode_to_area {
            Some(mappings) => mappings
                .iter()
                .filter(|mapping| mapping.postcode == postcode)
                .collect(),
            None => Vec::new(),
        }
    }

    #[must_use]
    pub fn postcode_mappings(&self) -> Option<&[PostcodeAreaMapping]> {
        self.postcode_to_area.as_deref()
    }

    #[must_use]
    pub fn decile_for(&self, postcode: &str) -> Option<u8> {
        self.postcode_to_decile.as_ref()?.get(postcode).copied()
    }

    #[must_use]
    pub fn region_for(&self, area_code: &str) -> Option<u8> {
        self.area_to_region.as_ref()?.get(area_code).copied()
    }

    #[must_use]
    pub fn postcode_for_suburb(&self, suburb: &str) -> Option<&str> {
        self.suburb_to_postcode
            .as_ref()?
            .get(suburb)
            .map(String::as_str)
    }

    #[must_use]
    pub fn is_known_postcode(&self, postcode: &str) -> bool {
        match &self.postcodes {
            Some(postcodes) => postcodes.iter().any(|known| known == postcode),
            None => false,
        }
    }

    #[must_use]
    pub fn service_usage_for(&self, area_code: &str) -> Option<&ServiceUsage> {
        self.service_usage.as_ref()?.get(area_code)
    }
}

/// Named chart datasets keyed by story data key.
///
/// The reserved `empty` key always resolves to an empty dataset; engines use
/// it to exit all marks on undock.
#[derive(Debug, Default)]
pub struct SeriesStore {
    sets: IndexMap<String, Vec<SeriesRow>>,
}

pub const EMPTY_DATA_KEY: &str = "empty";

impl SeriesStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, rows: Vec<SeriesRow>) {
        self.sets.insert(key.into(), rows);
    }

    pub fn load(&mut self, key: impl Into<String>, json: &str) -> StoryResult<()> {
        let rows: Vec<SeriesRow> = parse(json, "series")?;
        self.sets.insert(key.into(), rows);
        Ok(())
    }

    /// Rows for a data key; unknown keys resolve to the empty dataset.
    #[must_use]
    pub fn rows(&self, key: &str) -> &[SeriesRow] {
        if key == EMPTY_DATA_KEY {
            return &[];
        }
        match self.sets.get(key) {
            Some(rows) => rows,
            None => {
                warn!(data_key = key, "unknown series data key, using empty");
                &[]
            }
        }
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        key == EMPTY_DATA_KEY || self.sets.contains_key(key)
    }
}

fn parse<T: serde::de::DeserializeOwned>(json: &str, table: &'static str) -> StoryResult<T> {
    serde_json::from_str(json).map_err(|source| StoryError::TableParse { table, source })
}
