//! Chart partitioning of a report into the fixed display palette.
//!
//! This is a presentation view over [`classify`]; it never consults a
//! taxonomy of its own.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::category::DisplayBucket;
use crate::report::ForecastReport;
use crate::taxonomy::classify;

/// Items and cost collapsed into one display bucket.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayGroup {
    pub items: Vec<String>,
    pub total_cost: f64,
}

pub type DisplayBreakdown = BTreeMap<DisplayBucket, DisplayGroup>;

/// Partition a report's line items into display buckets, in line order.
pub fn display_breakdown(report: &ForecastReport) -> DisplayBreakdown {
    let mut buckets = DisplayBreakdown::new();
    for item in &report.materials {
        let group = buckets.entry(classify(&item.name).display_bucket()).or_default();
        group.items.push(item.name.clone());
        if item.total_cost.is_finite() {
            group.total_cost += item.total_cost;
        }
    }
    buckets
}
