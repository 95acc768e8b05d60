//! Dashboard aggregate.
//!
//! The local derivation is recomputed from the dataset on every call so it
//! always reflects records appended by fallback-create.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gridcast_core::lenient::f64_or_zero;

use crate::records::{Dataset, ProjectStatus};

/// `systemStatus` reported when the stats were derived locally.
pub const LOCAL_FALLBACK_STATUS: &str = "LocalFallback";

/// Accuracy reported when no forecast carries an accuracy figure.
pub const PLACEHOLDER_FORECAST_ACCURACY: f64 = 94.5;

/// In-progress projects below this completion percentage are critical.
pub const CRITICAL_COMPLETION_THRESHOLD: f64 = 70.0;

/// Headline numbers of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_projects: u64,
    #[serde(default)]
    pub active_projects: u64,
    #[serde(default)]
    pub critical_projects: u64,
    #[serde(default)]
    pub total_materials: u64,
    /// Inventory lines flagged critical or warning.
    #[serde(default)]
    pub low_stock_items: u64,
    #[serde(default)]
    pub pending_orders: u64,
    #[serde(default, rename = "recommendedPOs")]
    pub recommended_pos: u64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub monthly_spend: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub forecast_accuracy: f64,
    /// Marker distinguishing remote (`BackendReady`) from local results.
    #[serde(default)]
    pub system_status: String,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub total_budget: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub total_spend: f64,
    #[serde(default)]
    pub last_updated: String,
}

impl DashboardStats {
    /// Derive the stats from a dataset.
    pub fn derive(data: &Dataset, now: DateTime<Utc>) -> Self {
        let count = |n: usize| n as u64;

        let active = data
            .projects
            .iter()
            .filter(|p| p.status == ProjectStatus::InProgress)
            .count();
        let critical = data
            .projects
            .iter()
            .filter(|p| p.is_behind(CRITICAL_COMPLETION_THRESHOLD))
            .count();
        let at_risk = data
            .inventory
            .iter()
            .filter(|i| i.alert_level.is_at_risk())
            .count();
        let pending = data.procurement.iter().filter(|o| o.status.is_open()).count();
        let spend: f64 = data.procurement.iter().map(|o| o.total_cost).sum();

        Self {
            total_projects: count(data.projects.len()),
            active_projects: count(active),
            critical_projects: count(critical),
            total_materials: count(data.materials.len()),
            low_stock_items: count(at_risk),
            pending_orders: count(pending),
            recommended_pos: 0,
            monthly_spend: spend,
            forecast_accuracy: mean_accuracy(data.forecasts.iter().filter_map(|f| f.accuracy))
                .unwrap_or(PLACEHOLDER_FORECAST_ACCURACY),
            system_status: LOCAL_FALLBACK_STATUS.to_string(),
            total_budget: data.projects.iter().map(|p| p.budget).sum(),
            total_spend: spend,
            last_updated: now.to_rfc3339(),
        }
    }

    pub fn is_local_fallback(&self) -> bool {
        self.system_status == LOCAL_FALLBACK_STATUS
    }
}

/// Mean of the given accuracy figures, `None` when there are none.
pub fn mean_accuracy(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}
