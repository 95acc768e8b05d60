//! Bundled reference dataset.
//!
//! A small, fixed snapshot of master data used when the remote service cannot
//! be reached.

use gridcast_core::{ForecastId, MaterialId, OrderId, ProjectId, SupplierId};

use crate::records::{
    AlertLevel, Dataset, ForecastRecord, InventoryRecord, MaterialRecord, OrderStatus, ProcurementOrder,
    Project, ProjectStatus, Supplier,
};

fn material(id: &str, name: &str, category: &str, unit: &str, unit_cost: f64, lead: u32) -> MaterialRecord {
    MaterialRecord {
        id: MaterialId::new(id),
        name: name.to_string(),
        category: category.to_string(),
        unit: unit.to_string(),
        unit_cost,
        lead_time_days: Some(lead),
    }
}

fn stock(id: &str, current: f64, reorder: f64, alert_level: AlertLevel, shortfall: f64, warehouse: &str) -> InventoryRecord {
    InventoryRecord {
        material_id: MaterialId::new(id),
        current_stock: current,
        reorder_level: reorder,
        alert_level,
        projected_shortfall: shortfall,
        warehouse: Some(warehouse.to_string()),
    }
}

fn supplier(id: &str, name: &str, location: &str, rating: f64, lead: f64, materials: &[&str]) -> Supplier {
    Supplier {
        id: SupplierId::new(id),
        name: name.to_string(),
        location: Some(location.to_string()),
        rating: Some(rating),
        materials: materials.iter().map(|m| m.to_string()).collect(),
        lead_time_days: Some(lead),
        reliability: None,
        contact: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn project(
    ordinal: usize,
    name: &str,
    category: &str,
    region: &str,
    location: &str,
    budget: f64,
    status: ProjectStatus,
    completion: f64,
) -> Project {
    Project {
        id: ProjectId::sequenced(ordinal),
        name: name.to_string(),
        budget,
        status,
        completion: Some(completion),
        user_id: None,
        project_category: Some(category.to_string()),
        project_type: None,
        region: Some(region.to_string()),
        location: Some(location.to_string()),
        terrain: Some("Mixed".to_string()),
        tower_type: None,
        substation_type: None,
        start_date: None,
        end_date: None,
        line_length: None,
        distance_from_storage: None,
        fulfillment: None,
    }
}

fn forecast(id: &str, project: usize, name: &str, estimated: f64, actual: Option<f64>, accuracy: Option<f64>, status: &str) -> ForecastRecord {
    ForecastRecord {
        id: ForecastId::new(id),
        project_id: Some(ProjectId::sequenced(project)),
        project_name: name.to_string(),
        estimated_cost: estimated,
        actual_cost: actual,
        accuracy,
        status: Some(status.to_string()),
        created_at: None,
    }
}

fn order(id: &str, supplier: &str, material: &str, quantity: f64, total_cost: f64, status: OrderStatus, date: &str) -> ProcurementOrder {
    ProcurementOrder {
        id: OrderId::new(id),
        supplier: supplier.to_string(),
        material: material.to_string(),
        quantity,
        total_cost,
        status,
        order_date: Some(date.to_string()),
        expected_delivery: None,
    }
}

/// The bundled dataset.
pub fn dataset() -> Dataset {
    Dataset {
        materials: vec![
            material("MAT001", "Tower Steel", "Steel & Structure", "kg", 68.0, 30),
            material("MAT002", "ACSR Conductor", "Conductors & Wires", "km", 500_000.0, 45),
            material("MAT003", "Disc Insulator", "Hardware & Fittings", "units", 800.0, 21),
            material("MAT004", "Cement (OPC 53)", "Foundation", "bags", 360.0, 7),
            material("MAT005", "Current Transformer", "Electrical Equipment", "units", 35_000.0, 60),
            material("MAT006", "OPGW Cable", "Conductors & Wires", "km", 200_000.0, 40),
        ],
        suppliers: vec![
            supplier("SUP001", "Bharat Steel Works", "Raipur", 4.5, 28.0, &["MAT001"]),
            supplier("SUP002", "Apex Conductors Ltd", "Vadodara", 4.2, 40.0, &["MAT002", "MAT006"]),
            supplier("SUP003", "Deccan Electricals", "Hyderabad", 3.9, 55.0, &["MAT003", "MAT005"]),
        ],
        inventory: vec![
            stock("MAT001", 120_000.0, 150_000.0, AlertLevel::Warning, 30_000.0, "Nagpur"),
            stock("MAT002", 42.0, 30.0, AlertLevel::Normal, 0.0, "Vadodara"),
            stock("MAT003", 1_800.0, 5_000.0, AlertLevel::Critical, 3_200.0, "Hyderabad"),
            stock("MAT004", 9_000.0, 6_000.0, AlertLevel::Normal, 0.0, "Raipur"),
            stock("MAT005", 14.0, 12.0, AlertLevel::Normal, 0.0, "Hyderabad"),
            stock("MAT006", 18.0, 25.0, AlertLevel::Warning, 7.0, "Vadodara"),
        ],
        projects: vec![
            project(1, "Raipur-Bilaspur 400kV Line", "Transmission", "Central", "Chhattisgarh", 850_000_000.0, ProjectStatus::InProgress, 62.0),
            project(2, "Pune GIS Substation", "Substation", "West", "Maharashtra", 420_000_000.0, ProjectStatus::InProgress, 81.0),
            project(3, "Guwahati Ring Main", "Transmission", "North East", "Assam", 310_000_000.0, ProjectStatus::Planning, 0.0),
            project(4, "Madurai 220kV Upgrade", "Substation", "South", "Tamil Nadu", 190_000_000.0, ProjectStatus::Completed, 100.0),
        ],
        forecasts: vec![
            forecast("FC001", 1, "Raipur-Bilaspur 400kV Line", 812_000_000.0, None, None, "Active"),
            forecast("FC002", 4, "Madurai 220kV Upgrade", 182_500_000.0, Some(190_000_000.0), Some(96.1), "Completed"),
            forecast("FC003", 2, "Pune GIS Substation", 405_000_000.0, None, None, "Active"),
        ],
        procurement: vec![
            order("PO001", "Bharat Steel Works", "Tower Steel", 50_000.0, 3_400_000.0, OrderStatus::Pending, "2025-11-18"),
            order("PO002", "Apex Conductors Ltd", "ACSR Conductor", 12.0, 6_000_000.0, OrderStatus::Approved, "2025-11-20"),
            order("PO003", "Deccan Electricals", "Disc Insulator", 4_000.0, 3_200_000.0, OrderStatus::InTransit, "2025-11-02"),
            order("PO004", "Apex Conductors Ltd", "OPGW Cable", 8.0, 1_600_000.0, OrderStatus::Delivered, "2025-10-14"),
        ],
    }
}
