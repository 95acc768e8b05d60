//! Canonical record schema.
//!
//! These are the field names consumed by every caller, whether a value came
//! from the remote gateway (after remapping) or from the local store. Numbers
//! are read leniently so a remote payload with a stray string or `null` still
//! decodes.

use serde::{Deserialize, Serialize};

use gridcast_core::lenient::{f64_or_zero, opt_f64};
use gridcast_core::{ForecastId, MaterialId, OrderId, ProjectId, SupplierId, UserId};

/// Lifecycle status of a project.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    Planning,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "On Hold")]
    OnHold,
    Completed,
    #[serde(other)]
    Unknown,
}

/// Stock alert raised on an inventory line.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Critical,
    Warning,
    #[default]
    #[serde(other)]
    Normal,
}

impl AlertLevel {
    /// Critical or warning.
    pub fn is_at_risk(&self) -> bool {
        matches!(self, AlertLevel::Critical | AlertLevel::Warning)
    }
}

/// Status of a procurement order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Approved,
    #[serde(rename = "In Transit")]
    InTransit,
    Delivered,
    Cancelled,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Pending or approved, i.e. not yet shipped.
    pub fn is_open(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Approved)
    }
}

/// A construction project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub budget: f64,
    #[serde(default)]
    pub status: ProjectStatus,
    /// Percent complete; absent on records the remote service creates.
    #[serde(default, deserialize_with = "opt_f64", skip_serializing_if = "Option::is_none")]
    pub completion: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tower_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substation_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "opt_f64", skip_serializing_if = "Option::is_none")]
    pub line_length: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64", skip_serializing_if = "Option::is_none")]
    pub distance_from_storage: Option<f64>,
    /// Share of required material already covered; set on listings.
    #[serde(default, deserialize_with = "opt_f64", skip_serializing_if = "Option::is_none")]
    pub fulfillment: Option<f64>,
}

impl Project {
    /// A freshly created project: `Planning`, zero completion.
    pub fn from_new(id: ProjectId, new: NewProject) -> Self {
        Self {
            id,
            name: new.name,
            budget: new.budget,
            status: ProjectStatus::Planning,
            completion: Some(0.0),
            user_id: new.user_id,
            project_category: new.project_category,
            project_type: new.project_type,
            region: new.region,
            location: new.location,
            terrain: new.terrain,
            tower_type: new.tower_type,
            substation_type: new.substation_type,
            start_date: new.start_date,
            end_date: new.end_date,
            line_length: new.line_length,
            distance_from_storage: new.distance_from_storage,
            fulfillment: None,
        }
    }

    /// In progress with completion below `threshold` percent.
    ///
    /// A project without a completion figure is treated as complete.
    pub fn is_behind(&self, threshold: f64) -> bool {
        self.status == ProjectStatus::InProgress && self.completion.unwrap_or(100.0) < threshold
    }
}

/// Input of the create-project operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub name: String,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub budget: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terrain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tower_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substation_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "opt_f64", skip_serializing_if = "Option::is_none")]
    pub line_length: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64", skip_serializing_if = "Option::is_none")]
    pub distance_from_storage: Option<f64>,
}

impl NewProject {
    pub fn new(name: impl Into<String>, budget: f64) -> Self {
        Self {
            name: name.into(),
            budget,
            ..Self::default()
        }
    }
}

/// Material master-data entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialRecord {
    pub id: MaterialId,
    pub name: String,
    pub category: String,
    pub unit: String,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub unit_cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_time_days: Option<u32>,
}

/// Stock position of one material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub material_id: MaterialId,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub current_stock: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub reorder_level: f64,
    #[serde(default)]
    pub alert_level: AlertLevel,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub projected_shortfall: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse: Option<String>,
}

/// Material joined with its stock position, as listed on the materials view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialSummary {
    pub id: MaterialId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "opt_f64", skip_serializing_if = "Option::is_none")]
    pub unit_cost: Option<f64>,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub current_stock: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub reorder_level: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_level: Option<AlertLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "opt_f64", skip_serializing_if = "Option::is_none")]
    pub projected_shortfall: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse: Option<String>,
}

impl MaterialSummary {
    /// Join a material with its stock position (if any).
    pub fn join(material: &MaterialRecord, stock: Option<&InventoryRecord>) -> Self {
        Self {
            id: material.id.clone(),
            name: material.name.clone(),
            category: Some(material.category.clone()),
            unit: Some(material.unit.clone()),
            unit_cost: Some(material.unit_cost),
            current_stock: stock.map(|s| s.current_stock).unwrap_or(0.0),
            reorder_level: stock.map(|s| s.reorder_level).unwrap_or(0.0),
            alert_level: stock.map(|s| s.alert_level),
            status: None,
            projected_shortfall: stock.map(|s| s.projected_shortfall),
            warehouse: stock.and_then(|s| s.warehouse.clone()),
        }
    }

    pub fn has_projected_shortage(&self) -> bool {
        self.projected_shortfall.is_some_and(|s| s > 0.0)
    }
}

/// A material supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: SupplierId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "opt_f64", skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default, deserialize_with = "opt_f64", skip_serializing_if = "Option::is_none")]
    pub lead_time_days: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64", skip_serializing_if = "Option::is_none")]
    pub reliability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

/// A purchase order placed with a supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcurementOrder {
    pub id: OrderId,
    #[serde(default)]
    pub supplier: String,
    #[serde(default)]
    pub material: String,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub total_cost: f64,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_delivery: Option<String>,
}

/// A previously run forecast, as kept in the local store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRecord {
    pub id: ForecastId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    pub project_name: String,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub estimated_cost: f64,
    #[serde(default, deserialize_with = "opt_f64", skip_serializing_if = "Option::is_none")]
    pub actual_cost: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64", skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// One row of the forecast history view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastHistoryEntry {
    #[serde(default)]
    pub project_name: String,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub estimated_cost: f64,
    #[serde(default, deserialize_with = "opt_f64")]
    pub actual_cost: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64")]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<&ForecastRecord> for ForecastHistoryEntry {
    fn from(record: &ForecastRecord) -> Self {
        Self {
            project_name: record.project_name.clone(),
            estimated_cost: record.estimated_cost,
            actual_cost: record.actual_cost,
            accuracy: record.accuracy,
            status: record.status.clone(),
        }
    }
}

/// Optional filters on the forecast history.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ForecastFilter {
    pub fn matches(&self, entry: &ForecastHistoryEntry) -> bool {
        let name_ok = self
            .project_name
            .as_deref()
            .is_none_or(|name| entry.project_name == name);
        let status_ok = self
            .status
            .as_deref()
            .is_none_or(|status| entry.status.as_deref() == Some(status));
        name_ok && status_ok
    }

    /// Query-string pairs for the remote history endpoint.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(name) = &self.project_name {
            pairs.push(("projectName".to_string(), name.clone()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status".to_string(), status.clone()));
        }
        pairs
    }
}

/// The full local dataset. Its shape is an external contract.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(default)]
    pub materials: Vec<MaterialRecord>,
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
    #[serde(default)]
    pub inventory: Vec<InventoryRecord>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub forecasts: Vec<ForecastRecord>,
    #[serde(default)]
    pub procurement: Vec<ProcurementOrder>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_labels_match_the_store_schema() {
        let p: Project = serde_json::from_value(json!({
            "id": "PRJ001", "name": "A", "budget": 10, "status": "In Progress", "completion": 40
        }))
        .unwrap();
        assert_eq!(p.status, ProjectStatus::InProgress);
        assert!(p.is_behind(70.0));

        let unknown: Project = serde_json::from_value(json!({"id": 4, "status": "Archived"})).unwrap();
        assert_eq!(unknown.status, ProjectStatus::Unknown);
        assert_eq!(unknown.id.as_str(), "4");
    }

    #[test]
    fn project_without_completion_is_not_behind() {
        let p: Project =
            serde_json::from_value(json!({"id": "PRJ009", "status": "In Progress"})).unwrap();
        assert!(!p.is_behind(70.0));
    }

    #[test]
    fn created_project_serializes_with_lifecycle_defaults() {
        let project = Project::from_new(ProjectId::sequenced(3), NewProject::new("X", 500.0));
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(
            json,
            json!({"id": "PRJ003", "name": "X", "budget": 500.0, "status": "Planning", "completion": 0.0})
        );
    }

    #[test]
    fn alert_and_order_levels() {
        let lvl: AlertLevel = serde_json::from_value(json!("warning")).unwrap();
        assert!(lvl.is_at_risk());
        let other: AlertLevel = serde_json::from_value(json!("good")).unwrap();
        assert_eq!(other, AlertLevel::Normal);

        let st: OrderStatus = serde_json::from_value(json!("In Transit")).unwrap();
        assert!(!st.is_open());
        assert!(OrderStatus::Approved.is_open());
    }

    #[test]
    fn filter_matches_and_encodes() {
        let entry = ForecastHistoryEntry {
            project_name: "Line A".into(),
            estimated_cost: 1.0,
            actual_cost: None,
            accuracy: None,
            status: Some("Completed".into()),
        };
        assert!(ForecastFilter::default().matches(&entry));

        let filter = ForecastFilter {
            project_name: Some("Line A".into()),
            status: Some("Active".into()),
        };
        assert!(!filter.matches(&entry));
        assert_eq!(
            filter.to_query(),
            vec![
                ("projectName".to_string(), "Line A".to_string()),
                ("status".to_string(), "Active".to_string())
            ]
        );
    }
}
