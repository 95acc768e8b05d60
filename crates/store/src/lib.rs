//! `gridcast-store`
//!
//! **Responsibility:** the Local Reference Store.
//!
//! An explicitly-owned, injectable in-memory dataset (materials, suppliers,
//! inventory, projects, forecasts, procurement orders) that the access layer
//! reads from when the remote service is unavailable. The record schema in
//! [`records`] is the canonical shape consumed by the rest of the system.

pub mod records;
pub mod seed;
pub mod stats;
pub mod store;

pub use records::{
    AlertLevel, Dataset, ForecastFilter, ForecastHistoryEntry, ForecastRecord, InventoryRecord,
    MaterialRecord, MaterialSummary, NewProject, OrderStatus, ProcurementOrder, Project,
    ProjectStatus, Supplier,
};
pub use stats::{DashboardStats, LOCAL_FALLBACK_STATUS, PLACEHOLDER_FORECAST_ACCURACY};
pub use store::ReferenceStore;
