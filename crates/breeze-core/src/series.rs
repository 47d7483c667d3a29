// ── Time series ──
//
// Minimal tabular series: timestamp -> optional value, ordered by time.
// Gaps reported by the API as `null` are kept as `None`.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;

const NAIVE_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Series {
    points: BTreeMap<NaiveDateTime, Option<f64>>,
}

impl Series {
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDateTime, Option<f64>)>,
    {
        Self {
            points: points.into_iter().collect(),
        }
    }

    /// Parse the `data` object of a `data.json` entry.
    ///
    /// Timestamps may be RFC 3339 (normalized to UTC) or naive. Values must
    /// be numbers, numeric strings, or `null`.
    pub fn parse(raw: &BTreeMap<String, Value>) -> Result<Self, CoreError> {
        let mut points = BTreeMap::new();
        for (stamp, value) in raw {
            points.insert(parse_timestamp(stamp)?, parse_value(stamp, value)?);
        }
        Ok(Self { points })
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, at: &NaiveDateTime) -> Option<Option<f64>> {
        self.points.get(at).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDateTime, &Option<f64>)> {
        self.points.iter()
    }

    /// Non-null values in time order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.values().filter_map(|v| *v)
    }

    pub fn first_timestamp(&self) -> Option<NaiveDateTime> {
        self.points.keys().next().copied()
    }

    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        self.points.keys().next_back().copied()
    }

    /// Mean of the non-null values.
    pub fn mean(&self) -> Option<f64> {
        let (sum, n) = self.values().fold((0.0, 0u32), |(s, n), v| (s + v, n + 1));
        (n > 0).then(|| sum / f64::from(n))
    }
}

fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, CoreError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_utc());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| CoreError::MalformedSeries {
            message: format!("unparseable timestamp '{raw}'"),
        })
}

fn parse_value(stamp: &str, value: &Value) -> Result<Option<f64>, CoreError> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n.as_f64().map(Some).ok_or_else(|| CoreError::MalformedSeries {
            message: format!("non-finite value at {stamp}"),
        }),
        Value::String(s) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| CoreError::MalformedSeries {
                message: format!("non-numeric value '{s}' at {stamp}"),
            }),
        other => Err(CoreError::MalformedSeries {
            message: format!("unexpected value {other} at {stamp}"),
        }),
    }
}
