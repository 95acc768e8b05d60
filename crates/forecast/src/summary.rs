//! Forecast aggregation engine.
//!
//! Groups a report's line items by [`Category`], preserving line order within
//! each group, and cross-checks the grouped totals against the report's
//! declared figures.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::category::Category;
use crate::report::{ForecastReport, ReportWarning};
use crate::taxonomy::classify;

/// Names and summed cost of one category.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup {
    /// Insertion-ordered; repeats are kept if the report repeats a name.
    pub material_names: Vec<String>,
    pub total_cost: f64,
}

/// Category → group mapping, recomputed on every aggregation.
///
/// Only categories that occur in the report are present.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct GroupedSummary {
    groups: BTreeMap<Category, CategoryGroup>,
}

impl GroupedSummary {
    pub fn get(&self, category: Category) -> Option<&CategoryGroup> {
        self.groups.get(&category)
    }

    /// Summed cost of a category, `0` when absent.
    pub fn total_for(&self, category: Category) -> f64 {
        self.get(category).map(|g| g.total_cost).unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, &CategoryGroup)> {
        self.groups.iter()
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.groups.keys().copied()
    }

    /// Σ category totals.
    pub fn total(&self) -> f64 {
        self.groups.values().map(|g| g.total_cost).sum()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn push(&mut self, category: Category, name: &str, cost: f64) {
        let group = self.groups.entry(category).or_default();
        group.material_names.push(name.to_string());
        group.total_cost += cost;
    }
}

/// Output of [`aggregate`]: the summary plus advisory warnings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregation {
    pub summary: GroupedSummary,
    pub warnings: Vec<ReportWarning>,
}

impl Aggregation {
    pub fn is_consistent(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Group a report's line items by category.
///
/// Never fails: unknown names land in [`Category::Miscellaneous`] and
/// inconsistencies are returned as warnings.
pub fn aggregate(report: &ForecastReport) -> Aggregation {
    let mut summary = GroupedSummary::default();

    for item in &report.materials {
        let cost = if item.total_cost.is_finite() { item.total_cost } else { 0.0 };
        summary.push(classify(&item.name), &item.name, cost);
    }

    let warnings = report.validate_against(summary.total());
    for warning in &warnings {
        tracing::warn!(project = %report.project_name, "forecast report inconsistency: {warning}");
    }

    Aggregation { summary, warnings }
}
