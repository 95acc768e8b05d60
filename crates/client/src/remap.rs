//! Remote → canonical field-name tables.
//!
//! The remote service is inconsistent about key naming (snake_case model
//! columns, camelCase view rows). Each record shape declares one
//! [`SchemaMap`]; translation is a single generic pass over JSON objects.

use serde_json::{Map, Value};

/// One canonical field and the remote spellings it may arrive under.
///
/// The first remote spelling is the one used when sending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub canonical: &'static str,
    pub remote: &'static [&'static str],
}

const fn field(canonical: &'static str, remote: &'static [&'static str]) -> FieldMapping {
    FieldMapping { canonical, remote }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaMap {
    pub name: &'static str,
    pub fields: &'static [FieldMapping],
}

pub const PROJECT: SchemaMap = SchemaMap {
    name: "project",
    fields: &[
        field("name", &["project_name", "projectName"]),
        field("budget", &["project_budget", "projectBudget"]),
        field("userId", &["user_id"]),
        field("projectCategory", &["category", "project_category"]),
        field("projectType", &["project_type"]),
        field("towerType", &["tower_type"]),
        field("substationType", &["substation_type"]),
        field("startDate", &["start_date", "created_at"]),
        field("endDate", &["end_date"]),
        field("lineLength", &["line_length", "transmission_line_length_km"]),
        field("distanceFromStorage", &["distance_from_storage", "distance_from_storage_unit"]),
    ],
};

/// History rows: a remote `project_name/total/budget/accuracy/status` tuple.
pub const FORECAST_HISTORY: SchemaMap = SchemaMap {
    name: "forecast_history",
    fields: &[
        field("projectName", &["project_name"]),
        field("estimatedCost", &["total", "estimated_cost"]),
        field("actualCost", &["budget", "actual_cost"]),
        field("accuracy", &["forecast_accuracy"]),
        field("status", &["forecast_status"]),
    ],
};

pub const MATERIAL_SUMMARY: SchemaMap = SchemaMap {
    name: "material_summary",
    fields: &[
        field("name", &["material_name"]),
        field("currentStock", &["current_stock", "quantity"]),
        field("reorderLevel", &["reorder_level"]),
        field("unitCost", &["unit_cost", "cost"]),
        field("alertLevel", &["alert_level"]),
        field("projectedShortfall", &["projected_shortfall"]),
    ],
};

pub const PROCUREMENT_ORDER: SchemaMap = SchemaMap {
    name: "procurement_order",
    fields: &[
        field("totalCost", &["total_cost"]),
        field("orderDate", &["order_date"]),
        field("expectedDelivery", &["expected_delivery"]),
    ],
};

pub const SUPPLIER: SchemaMap = SchemaMap {
    name: "supplier",
    fields: &[field("leadTimeDays", &["lead_time_days"])],
};

impl SchemaMap {
    /// Rename remote keys to canonical ones.
    ///
    /// A canonical key already present wins; otherwise the first remote
    /// spelling present is moved. Unmapped keys pass through. Arrays are
    /// translated element-wise.
    pub fn to_canonical(&self, value: Value) -> Value {
        match value {
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|v| self.to_canonical(v)).collect())
            }
            Value::Object(mut map) => {
                for mapping in self.fields {
                    if map.contains_key(mapping.canonical) {
                        continue;
                    }
                    if let Some(v) = take_first(&mut map, mapping.remote) {
                        map.insert(mapping.canonical.to_string(), v);
                    }
                }
                Value::Object(map)
            }
            other => other,
        }
    }

    /// Rename canonical keys to the primary remote spelling.
    pub fn to_remote(&self, value: Value) -> Value {
        match value {
            Value::Array(items) => {
                Value::Array(items.into_iter().map(|v| self.to_remote(v)).collect())
            }
            Value::Object(mut map) => {
                for mapping in self.fields {
                    let Some(primary) = mapping.remote.first() else {
                        continue;
                    };
                    if map.contains_key(*primary) {
                        continue;
                    }
                    if let Some(v) = map.remove(mapping.canonical) {
                        map.insert((*primary).to_string(), v);
                    }
                }
                Value::Object(map)
            }
            other => other,
        }
    }
}

fn take_first(map: &mut Map<String, Value>, keys: &[&str]) -> Option<Value> {
    keys.iter().find_map(|key| map.remove(*key))
}

/// Unwrap `{ "<key>": [...] }` envelopes; anything else is returned as is.
pub fn unwrap_list(value: Value, key: &str) -> Value {
    match value {
        Value::Object(mut map) if map.get(key).is_some_and(Value::is_array) => {
            map.remove(key).unwrap_or(Value::Null)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn history_tuple_is_renamed() {
        let remote = json!([{
            "project_name": "Ridge Line",
            "total": 1180.0,
            "budget": 1500.0,
            "accuracy": 91.2,
            "status": "Completed"
        }]);

        let canonical = FORECAST_HISTORY.to_canonical(remote);
        assert_eq!(
            canonical,
            json!([{
                "projectName": "Ridge Line",
                "estimatedCost": 1180.0,
                "actualCost": 1500.0,
                "accuracy": 91.2,
                "status": "Completed"
            }])
        );
    }

    #[test]
    fn canonical_key_wins_over_alias() {
        let remote = json!({ "projectName": "A", "project_name": "B" });
        let canonical = FORECAST_HISTORY.to_canonical(remote);
        assert_eq!(canonical["projectName"], "A");
    }

    #[test]
    fn first_alias_present_is_used() {
        let canonical = PROJECT.to_canonical(json!({ "projectName": "B", "project_name": "A" }));
        assert_eq!(canonical["name"], "A");
        assert_eq!(canonical["projectName"], "B");

        let canonical = PROJECT.to_canonical(json!({ "projectName": "B" }));
        assert_eq!(canonical["name"], "B");
    }

    #[test]
    fn unmapped_keys_and_scalars_pass_through() {
        let value = json!({ "id": 3, "terrain": "Hilly" });
        assert_eq!(PROJECT.to_canonical(value.clone()), value);
        assert_eq!(PROJECT.to_canonical(json!("text")), json!("text"));
        assert_eq!(PROJECT.to_canonical(Value::Null), Value::Null);
    }

    #[test]
    fn project_response_maps_to_canonical_names() {
        let remote = json!({
            "id": 12,
            "user_id": 1,
            "project_name": "North Grid",
            "project_budget": 5000.0,
            "location": "Pune",
            "category": "Transmission",
            "tower_type": "Lattice",
            "terrain": null,
            "created_at": "2025-12-04T10:00:00"
        });
        let canonical = PROJECT.to_canonical(remote);
        assert_eq!(canonical["name"], "North Grid");
        assert_eq!(canonical["budget"], 5000.0);
        assert_eq!(canonical["userId"], 1);
        assert_eq!(canonical["projectCategory"], "Transmission");
        assert_eq!(canonical["towerType"], "Lattice");
        assert_eq!(canonical["startDate"], "2025-12-04T10:00:00");
    }

    #[test]
    fn to_remote_uses_primary_spelling() {
        let canonical = json!({ "name": "North Grid", "budget": 10.0, "projectCategory": "Both", "location": "Pune" });
        let remote = PROJECT.to_remote(canonical);
        assert_eq!(
            remote,
            json!({ "project_name": "North Grid", "project_budget": 10.0, "category": "Both", "location": "Pune" })
        );
    }

    #[test]
    fn envelopes_are_unwrapped_only_around_arrays() {
        assert_eq!(unwrap_list(json!({ "forecasts": [1, 2] }), "forecasts"), json!([1, 2]));
        assert_eq!(unwrap_list(json!([1]), "forecasts"), json!([1]));
        let not_list = json!({ "forecasts": 3 });
        assert_eq!(unwrap_list(not_list.clone(), "forecasts"), not_list);
    }
}
