//! Workload tables: named bandwidth and latency bounds

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::error::{PlotError, PlotResult};
use crate::estimator::{self, PlotPoint};

/// A workload with its bandwidth [B/s] and latency [s] bounds
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct WorkloadEntry {
    pub name: String,
    pub bandwidth_lo: f64,
    pub bandwidth_hi: f64,
    pub latency_lo: f64,
    pub latency_hi: f64,
    /// Optional `#rrggbb` override of the palette color
    #[serde(default)]
    pub color: Option<String>,
}

impl WorkloadEntry {
    pub fn new(
        name: &str,
        bandwidth: (f64, f64),
        latency: (f64, f64),
    ) -> Self {
        Self {
            name: name.to_string(),
            bandwidth_lo: bandwidth.0,
            bandwidth_hi: bandwidth.1,
            latency_lo: latency.0,
            latency_hi: latency.1,
            color: None,
        }
    }
}

/// Ordered table of workloads; order decides palette colors and legend order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorkloadTable {
    entries: Vec<WorkloadEntry>,
}

impl WorkloadTable {
    /// Builds a table, rejecting duplicate workload names
    pub fn make(entries: Vec<WorkloadEntry>) -> PlotResult<Self> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.name.as_str()) {
                return Err(PlotError::ConfigError(format!(
                    "Duplicate workload '{}'",
                    entry.name
                )));
            }
        }
        Ok(Self { entries })
    }

    /// Loads a table from a CSV file with header
    /// `name,bandwidth_lo,bandwidth_hi,latency_lo,latency_hi[,color]`
    pub fn from_csv(path: impl AsRef<Path>) -> PlotResult<Self> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path.as_ref())?;
        Self::from_reader(reader)
    }

    pub fn from_reader<R: std::io::Read>(
        mut reader: csv::Reader<R>,
    ) -> PlotResult<Self> {
        let mut entries = Vec::new();
        for record in reader.deserialize() {
            let mut entry: WorkloadEntry = record?;
            // Blank colors fall back to the palette
            if entry.color.as_deref().is_some_and(str::is_empty) {
                entry.color = None;
            }
            entries.push(entry);
        }
        Self::make(entries)
    }

    pub fn entries(&self) -> &[WorkloadEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Derives every plot point, in table order.
    /// Fails on the first workload with an invalid bound.
    pub fn points(&self) -> PlotResult<Vec<PlotPoint>> {
        self.entries.iter().map(estimator::estimate).collect()
    }
}
