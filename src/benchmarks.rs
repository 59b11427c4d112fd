//! Category benchmark tables and variance computation.
//!
//! The built-in tables are constructed once and handed to [`compare`] by
//! reference; a JSON file can replace them for a whole run.

use crate::error::{DashboardError, Result};
use crate::metrics::AggregateValue;
use crate::types::{Category, MetricRow};
use crate::util::round_to;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Base label -> threshold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkTable(BTreeMap<String, f64>);

impl BenchmarkTable {
    pub fn get(&self, base_label: &str) -> Option<f64> {
        self.0.get(base_label).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl<const N: usize> From<[(&str, f64); N]> for BenchmarkTable {
    fn from(entries: [(&str, f64); N]) -> Self {
        Self(entries.iter().map(|(k, v)| (k.to_string(), *v)).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSet {
    pub rural: BenchmarkTable,
    pub urban: BenchmarkTable,
    #[serde(skip)]
    empty: BenchmarkTable,
}

pub static BUILTIN_BENCHMARKS: Lazy<BenchmarkSet> = Lazy::new(BenchmarkSet::builtin);

impl BenchmarkSet {
    pub fn new(rural: BenchmarkTable, urban: BenchmarkTable) -> Self {
        Self { rural, urban, empty: BenchmarkTable::default() }
    }

    pub fn builtin() -> Self {
        let rural = BenchmarkTable::from([
            ("Weekly Off", 14.0),
            ("Special Off (Night Out/IC, Online)", 25.0),
            ("Others", 1.70),
            ("Long Leave & Absent", 2.0),
            ("Sick Leave", 2.0),
            ("Spot Absent", 1.0),
            ("Double Duty", 16.0),
            ("Off Cancellation", 0.00),
            ("Services / Driver Check", 2.18),
        ]);
        let urban = BenchmarkTable::from([
            ("Weekly Off", 14.0),
            ("Special Off (Night Out/IC, Online)", 27.4),
            ("Others", 1.0),
            ("Long Leave & Absent", 6.0),
            ("Sick Leave", 2.0),
            ("Spot Absent", 2.0),
            ("Double Duty", 8.0),
            ("Off Cancellation", 0.00),
            ("Services / Driver Check", 2.43),
        ]);
        Self::new(rural, urban)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let set: BenchmarkSet =
            serde_json::from_str(&text).map_err(|source| DashboardError::Benchmarks {
                path: path.to_path_buf(),
                source,
            })?;
        debug!(
            path = %path.display(),
            rural = set.rural.len(),
            urban = set.urban.len(),
            "benchmark override loaded"
        );
        Ok(set)
    }

    /// Unknown or missing categories get an empty table.
    pub fn for_category(&self, category: Option<&Category>) -> &BenchmarkTable {
        match category {
            Some(Category::Rural) => &self.rural,
            Some(Category::Urban) => &self.urban,
            _ => &self.empty,
        }
    }
}

/// Line each aggregate up with its threshold. Variance uses the unrounded
/// aggregate; the reported value is rounded to 2 places.
pub fn compare(aggregates: &[AggregateValue], table: &BenchmarkTable) -> Vec<MetricRow> {
    aggregates
        .iter()
        .map(|agg| {
            let benchmark = table.get(agg.metric.base_label());
            let variance = match (agg.value, benchmark) {
                (Some(v), Some(b)) => Some(round_to(v - b, 2)),
                _ => None,
            };
            MetricRow {
                label: agg.metric.label(),
                benchmark,
                value: agg.value.map(|v| round_to(v, 2)),
                variance,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Metric;
    use std::io::Write;

    fn aggregates(value: f64) -> Vec<AggregateValue> {
        Metric::ALL
            .iter()
            .map(|&metric| AggregateValue { metric, value: Some(value) })
            .collect()
    }

    #[test]
    fn selects_table_by_category() {
        let set = BenchmarkSet::builtin();
        assert_eq!(set.for_category(Some(&Category::Rural)).get("Double Duty"), Some(16.0));
        assert_eq!(set.for_category(Some(&Category::Urban)).get("Double Duty"), Some(8.0));
        assert!(set.for_category(Some(&Category::Other("Hill".into()))).is_empty());
        assert!(set.for_category(None).is_empty());
    }

    #[test]
    fn variance_is_rounded_difference() {
        let set = BenchmarkSet::builtin();
        let rows = compare(&aggregates(16.2), set.for_category(Some(&Category::Urban)));
        let weekly = rows.iter().find(|r| r.label == "Weekly Off (%)").unwrap();
        assert_eq!(weekly.benchmark, Some(14.0));
        assert_eq!(weekly.variance, Some(2.2));

        let planned = rows.iter().find(|r| r.label == "Planned Schedules").unwrap();
        assert_eq!(planned.benchmark, None);
        assert_eq!(planned.variance, None);
        assert_eq!(planned.value, Some(16.2));
    }

    #[test]
    fn zero_benchmark_is_not_missing() {
        let set = BenchmarkSet::builtin();
        let rows = compare(&aggregates(0.5), set.for_category(Some(&Category::Rural)));
        let off = rows.iter().find(|r| r.label == "Off Cancellation (%)").unwrap();
        assert_eq!(off.benchmark, Some(0.0));
        assert_eq!(off.variance, Some(0.5));
    }

    #[test]
    fn unknown_category_has_no_variances() {
        let set = BenchmarkSet::builtin();
        let rows = compare(&aggregates(99.0), set.for_category(None));
        assert!(rows.iter().all(|r| r.benchmark.is_none() && r.variance.is_none()));
        assert!(rows.iter().all(|r| r.value == Some(99.0)));
    }

    #[test]
    fn null_value_gives_null_variance() {
        let mut aggs = aggregates(1.0);
        aggs[2].value = None;
        let rows = compare(&aggs, BUILTIN_BENCHMARKS.for_category(Some(&Category::Rural)));
        assert_eq!(rows[2].benchmark, Some(14.0));
        assert_eq!(rows[2].variance, None);
    }

    #[test]
    fn loads_override_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, r#"{{"rural": {{"Weekly Off": 10.0}}, "urban": {{}}}}"#).unwrap();
        let set = BenchmarkSet::from_json_file(f.path()).unwrap();
        assert_eq!(set.rural.get("Weekly Off"), Some(10.0));
        assert!(set.urban.is_empty());

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        write!(bad, "not json").unwrap();
        assert!(matches!(
            BenchmarkSet::from_json_file(bad.path()),
            Err(DashboardError::Benchmarks { .. })
        ));
    }
}
