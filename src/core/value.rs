use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Sentinel used by the published datasets for suppressed statistics.
const NOT_PUBLISHED: &str = "NP";

/// A published statistic or the "Not Published" sentinel.
///
/// `"NP"` and the empty string both deserialize to `NotPublished`; the
/// distinction from zero is load-bearing and must survive round trips.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Published(f64),
    NotPublished,
}

impl MetricValue {
    #[must_use]
    pub fn is_published(self) -> bool {
        matches!(self, MetricValue::Published(_))
    }

    #[must_use]
    pub fn published(self) -> Option<f64> {
        match self {
            MetricValue::Published(value) => Some(value),
            MetricValue::NotPublished => None,
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MetricValue::Published(value) => serializer.serialize_f64(*value),
            MetricValue::NotPublished => serializer.serialize_str(NOT_PUBLISHED),
        }
    }
}

struct MetricValueVisitor;

impl<'de> Visitor<'de> for MetricValueVisitor {
    type Value = MetricValue;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a number, \"NP\", or an empty string")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        if !value.is_finite() {
            return Err(E::custom("metric value must be finite"));
        }
        Ok(MetricValue::Published(value))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        self.visit_f64(value as f64)
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        self.visit_f64(value as f64)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        if value.is_empty() || value == NOT_PUBLISHED {
            return Ok(MetricValue::NotPublished);
        }
        value
            .parse::<f64>()
            .map_err(|_| E::custom(format!("unrecognized metric value `{value}`")))
            .and_then(|parsed| self.visit_f64(parsed))
    }
}

impl<'de> Deserialize<'de> for MetricValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MetricValueVisitor)
    }
}

/// Category assignment of one series row.
///
/// `National` rows stay in the dataset for mean calculations but are never
/// rendered as marks; `Ungrouped` rows are excluded from both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesGroup {
    Band(u8),
    Ungrouped,
    National,
}

impl SeriesGroup {
    #[must_use]
    pub fn band(self) -> Option<u8> {
        match self {
            SeriesGroup::Band(band) => Some(band),
            SeriesGroup::Ungrouped | SeriesGroup::National => None,
        }
    }
}

impl Serialize for SeriesGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SeriesGroup::Band(band) => serializer.serialize_str(&band.to_string()),
            SeriesGroup::Ungrouped => serializer.serialize_str("ungrouped"),
            SeriesGroup::National => serializer.serialize_str("National"),
        }
    }
}

struct SeriesGroupVisitor;

impl<'de> Visitor<'de> for SeriesGroupVisitor {
    type Value = SeriesGroup;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a band number, \"ungrouped\", or \"National\"")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        u8::try_from(value)
            .ok()
            .filter(|band| (1..=12).contains(band))
            .map(SeriesGroup::Band)
            .ok_or_else(|| E::custom(format!("band {value} out of range")))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        u64::try_from(value)
            .map_err(|_| E::custom(format!("band {value} out of range")))
            .and_then(|unsigned| self.visit_u64(unsigned))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        match value {
            "ungrouped" => Ok(SeriesGroup::Ungrouped),
            "National" => Ok(SeriesGroup::National),
            other => other
                .parse::<u64>()
                .map_err(|_| E::custom(format!("unrecognized series group `{other}`")))
                .and_then(|band| self.visit_u64(band)),
        }
    }
}

impl<'de> Deserialize<'de> for SeriesGroup {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(SeriesGroupVisitor)
    }
}
