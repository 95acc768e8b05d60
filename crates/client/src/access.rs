//! Resilient data access.
//!
//! Each public method makes exactly one remote attempt. On failure the
//! operation's [`FallbackPolicy`] decides between answering from the local
//! [`ReferenceStore`] and surfacing the error. No state carries over between
//! calls: every call tries the remote service again.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use gridcast_core::{ProjectId, UserId};
use gridcast_forecast::ForecastReport;
use gridcast_store::stats::mean_accuracy;
use gridcast_store::{
    DashboardStats, ForecastFilter, ForecastHistoryEntry, MaterialSummary, NewProject,
    PLACEHOLDER_FORECAST_ACCURACY, ProcurementOrder, Project, ReferenceStore, Supplier,
};

use crate::gateway::{encoded_path, GatewayError, RemoteGateway};
use crate::operation::{FallbackPolicy, Operation};
use crate::remap::{self, SchemaMap};
use crate::request::{ForecastInput, ForecastRequest};

/// User id sent with project creation when none is given.
pub const DEFAULT_REMOTE_USER_ID: u64 = 1;

/// Failure of an operation whose policy does not fall back.
///
/// Displays the remote message unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{source}")]
pub struct AccessError {
    pub operation: Operation,
    pub source: GatewayError,
}

impl AccessError {
    pub fn status(&self) -> Option<u16> {
        self.source.status()
    }
}

/// Forecast page summary, derived from history and material stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastOverview {
    pub total_forecasts: usize,
    /// Forecasts with no actual cost recorded yet.
    pub active_forecasts: usize,
    pub projected_shortages: usize,
    pub forecast_accuracy: f64,
    pub history: Vec<ForecastHistoryEntry>,
    pub materials: Vec<MaterialSummary>,
}

impl ForecastOverview {
    pub fn derive(history: Vec<ForecastHistoryEntry>, materials: Vec<MaterialSummary>) -> Self {
        let active_forecasts = history.iter().filter(|h| h.actual_cost.is_none()).count();
        let projected_shortages = materials.iter().filter(|m| m.has_projected_shortage()).count();
        let forecast_accuracy = mean_accuracy(history.iter().filter_map(|h| h.accuracy))
            .unwrap_or(PLACEHOLDER_FORECAST_ACCURACY);

        Self {
            total_forecasts: history.len(),
            active_forecasts,
            projected_shortages,
            forecast_accuracy,
            history,
            materials,
        }
    }
}

pub struct ResilientAccess {
    gateway: Arc<dyn RemoteGateway>,
    store: Arc<ReferenceStore>,
}

impl ResilientAccess {
    pub fn new(gateway: Arc<dyn RemoteGateway>, store: Arc<ReferenceStore>) -> Self {
        Self { gateway, store }
    }

    pub fn store(&self) -> &ReferenceStore {
        &self.store
    }

    // ---- reads (LocalRead) -------------------------------------------------

    pub async fn dashboard_stats(&self) -> DashboardStats {
        self.or_local(
            Operation::DashboardStats,
            self.fetch("/dashboard/stats", &[], None),
            ReferenceStore::dashboard_stats,
        )
        .await
    }

    pub async fn materials_summary(&self) -> Vec<MaterialSummary> {
        self.or_local(
            Operation::MaterialsSummary,
            self.fetch("/materials/summary", &[], Some(&remap::MATERIAL_SUMMARY)),
            ReferenceStore::materials_summary,
        )
        .await
    }

    /// Projects, optionally scoped to one user on the remote side.
    ///
    /// The local listing is not scoped.
    pub async fn projects(&self, user_id: Option<&UserId>) -> Vec<Project> {
        let path = match user_id {
            Some(id) => encoded_path(&["projects", "user", id.as_str()]),
            None => "/projects".to_string(),
        };
        self.or_local(
            Operation::Projects,
            self.fetch(&path, &[], Some(&remap::PROJECT)),
            ReferenceStore::projects,
        )
        .await
    }

    pub async fn project(&self, id: &ProjectId) -> Option<Project> {
        let path = encoded_path(&["projects", id.as_str()]);
        self.or_local(
            Operation::ProjectById,
            self.fetch(&path, &[], Some(&remap::PROJECT)),
            |store| store.find_project(id),
        )
        .await
    }

    pub async fn forecast_history(&self, filter: &ForecastFilter) -> Vec<ForecastHistoryEntry> {
        let query = filter.to_query();
        let remote = async {
            let value = self.gateway.get("/forecast/history", &query).await?;
            decode::<Vec<ForecastHistoryEntry>>(
                remap::unwrap_list(value, "forecasts"),
                Some(&remap::FORECAST_HISTORY),
            )
        };
        self.or_local(Operation::ForecastHistory, remote, |store| {
            store.forecast_history(filter)
        })
        .await
    }

    pub async fn procurement_orders(&self) -> Vec<ProcurementOrder> {
        self.or_local(
            Operation::ProcurementOrders,
            self.fetch("/procurement", &[], Some(&remap::PROCUREMENT_ORDER)),
            ReferenceStore::procurement_orders,
        )
        .await
    }

    pub async fn suppliers(&self) -> Vec<Supplier> {
        self.or_local(
            Operation::Suppliers,
            self.fetch("/suppliers", &[], Some(&remap::SUPPLIER)),
            ReferenceStore::suppliers,
        )
        .await
    }

    /// History and material stock fetched concurrently; each side falls back
    /// on its own.
    pub async fn forecast_overview(&self) -> ForecastOverview {
        let filter = ForecastFilter::default();
        let (history, materials) =
            tokio::join!(self.forecast_history(&filter), self.materials_summary());
        ForecastOverview::derive(history, materials)
    }

    // ---- writes ------------------------------------------------------------

    /// Create a project remotely, or in the local store when that fails.
    pub async fn create_project(&self, new: NewProject) -> Project {
        let remote = async {
            let body = create_project_body(&new)?;
            let value = self.gateway.post("/projects/create", &body).await?;
            decode::<Project>(value, Some(&remap::PROJECT))
        };
        match remote.await {
            Ok(project) => project,
            Err(err) => {
                self.log_fallback(Operation::CreateProject, &err);
                self.store.create_project(new)
            }
        }
    }

    /// Generate and persist a forecast. Failures are never masked.
    ///
    /// An invalid form fails with [`GatewayError::InvalidRequest`] before any
    /// remote call.
    pub async fn save_forecast(
        &self,
        request: &ForecastRequest,
    ) -> Result<ForecastReport, AccessError> {
        self.generate(Operation::SaveForecast, "/forecast/save", request)
            .await
    }

    /// Generate a forecast without persisting it. Failures are never masked.
    pub async fn predict_forecast(
        &self,
        request: &ForecastRequest,
    ) -> Result<ForecastReport, AccessError> {
        self.generate(Operation::PredictForecast, "/forecast/predict", request)
            .await
    }

    async fn generate(
        &self,
        op: Operation,
        path: &str,
        request: &ForecastRequest,
    ) -> Result<ForecastReport, AccessError> {
        let remote = async {
            request
                .validate()
                .map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;
            let body = to_body(&ForecastInput::from(request))?;
            let value = self.gateway.post(path, &body).await?;
            let report: ForecastReport = decode(value, None)?;
            Ok::<_, GatewayError>(report.normalized())
        };
        self.remote_only(op, remote).await
    }

    // ---- policy combinators ------------------------------------------------

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
        schema: Option<&SchemaMap>,
    ) -> Result<T, GatewayError> {
        let value = self.gateway.get(path, query).await?;
        decode(value, schema)
    }

    async fn or_local<T>(
        &self,
        op: Operation,
        remote: impl Future<Output = Result<T, GatewayError>>,
        local: impl FnOnce(&ReferenceStore) -> T,
    ) -> T {
        debug_assert_eq!(op.policy(), FallbackPolicy::LocalRead, "{op}");
        match remote.await {
            Ok(value) => value,
            Err(err) => {
                self.log_fallback(op, &err);
                local(&self.store)
            }
        }
    }

    async fn remote_only<T>(
        &self,
        op: Operation,
        remote: impl Future<Output = Result<T, GatewayError>>,
    ) -> Result<T, AccessError> {
        debug_assert_eq!(op.policy(), FallbackPolicy::Propagate, "{op}");
        remote.await.map_err(|source| {
            tracing::error!(
                operation = op.name(),
                route = op.route(),
                error = %source,
                "remote call failed"
            );
            AccessError { operation: op, source }
        })
    }

    fn log_fallback(&self, op: Operation, err: &GatewayError) {
        tracing::warn!(
            operation = op.name(),
            route = op.route(),
            error = %err,
            "remote call failed; using local store"
        );
    }
}

fn decode<T: DeserializeOwned>(value: Value, schema: Option<&SchemaMap>) -> Result<T, GatewayError> {
    let value = match schema {
        Some(map) => map.to_canonical(value),
        None => value,
    };
    serde_json::from_value(value).map_err(|e| GatewayError::Malformed(e.to_string()))
}

fn to_body<T: Serialize>(value: &T) -> Result<Value, GatewayError> {
    serde_json::to_value(value).map_err(|e| GatewayError::InvalidRequest(e.to_string()))
}

/// Remote create body: service field names plus a `user_id`.
fn create_project_body(new: &NewProject) -> Result<Value, GatewayError> {
    let mut body = remap::PROJECT.to_remote(to_body(new)?);
    if let Value::Object(map) = &mut body {
        map.entry("user_id")
            .or_insert_with(|| Value::from(DEFAULT_REMOTE_USER_ID));
    }
    Ok(body)
}
