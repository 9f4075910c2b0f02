use crate::error::TelemetryError;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;

/// Runtime numeric readings keyed by metric name, e.g. dissolved-gas concentrations.
///
/// Serialized as a flat JSON object: `{ "h2": 150, "ch4": 60 }`.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct Telemetry {
    readings: AHashMap<String, f64>,
}

impl Telemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load telemetry from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, TelemetryError> {
        let content = fs::read_to_string(path).map_err(|source| TelemetryError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, TelemetryError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Dissolved-gas readings used when no telemetry file is provided.
    pub fn dga_sample() -> Self {
        [
            ("h2", 150.0),
            ("ch4", 60.0),
            ("c2h6", 20.0),
            ("c2h4", 50.0),
            ("c2h2", 150.0),
            ("h2_gas_generation_rate", 400.0),
            ("total_hydrocarbons_content", 300.0),
        ]
        .into_iter()
        .collect()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.readings.get(name).copied()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.readings.insert(name.into(), value)
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.readings.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl From<AHashMap<String, f64>> for Telemetry {
    fn from(readings: AHashMap<String, f64>) -> Self {
        Self { readings }
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Telemetry {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            readings: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
