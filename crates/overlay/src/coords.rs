//! Coordinate configuration
//!
//! Every drawing position the renderer uses is resolved against a
//! `CoordinateConfig` by dotted key path (`tabelas.cols.desc`,
//! `totais.yTop`, …) with a caller-supplied default. The config is a plain
//! JSON document so template geometry can be re-calibrated without touching
//! code; a missing or corrupt file degrades to the built-in defaults
//! instead of failing the render.

use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;

/// Immutable mapping from dotted key paths to numeric values
///
/// Built once and never mutated; concurrent renders share it freely.
#[derive(Debug, Clone)]
pub struct CoordinateConfig {
    root: Value,
}

impl CoordinateConfig {
    /// Parse a configuration from a JSON string
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        Ok(Self {
            root: serde_json::from_str(json)?,
        })
    }

    /// The built-in fallback: only the two required page indices
    pub fn minimal() -> Self {
        Self {
            root: json!({
                "pageIndexes": { "headerTotais": 0, "tables": 6 }
            }),
        }
    }

    /// Look up a float by dotted path, with a default
    ///
    /// Any missing intermediate segment or non-numeric leaf yields the
    /// default; lookup never errors.
    pub fn get_f64(&self, path: &str, default: f64) -> f64 {
        self.lookup(path).and_then(Value::as_f64).unwrap_or(default)
    }

    /// Look up a non-negative integer by dotted path, with a default
    pub fn get_usize(&self, path: &str, default: usize) -> usize {
        self.lookup(path)
            .and_then(Value::as_u64)
            .map(|v| v as usize)
            .unwrap_or(default)
    }

    /// Read a probe array by dotted path (empty when absent or malformed)
    pub fn probes(&self, path: &str) -> Vec<Probe> {
        self.lookup(path)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }

    fn lookup(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(&self.root, |current, segment| current.get(segment))
    }
}

impl Default for CoordinateConfig {
    fn default() -> Self {
        Self::minimal()
    }
}

/// A calibration marker: cross-hair plus label at a configured point
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Probe {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub label: Option<String>,
}

impl Probe {
    /// The label to draw, falling back to the probe's coordinates
    pub fn label_or_coords(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => format!("({},{})", self.x as i64, self.y as i64),
        }
    }
}

/// Load the coordinate configuration from a file
///
/// On any read or parse failure, logs a warning and returns
/// [`CoordinateConfig::minimal`] — a missing coordinate file must never
/// stop the system from rendering.
pub fn load_coordinate_config<P: AsRef<Path>>(path: P) -> CoordinateConfig {
    let path = path.as_ref();
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|text| CoordinateConfig::from_json_str(&text).map_err(|e| e.to_string()));

    match parsed {
        Ok(config) => config,
        Err(e) => {
            log::warn!(
                "coordinate config {} unavailable ({e}); using built-in defaults",
                path.display()
            );
            CoordinateConfig::minimal()
        }
    }
}
