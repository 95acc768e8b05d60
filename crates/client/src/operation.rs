//! Operation descriptors.
//!
//! Every remote operation declares up front whether its failures are
//! absorbed by local data. The access layer consults the descriptor instead
//! of deciding per call site.

use core::fmt;

/// What happens when the remote call for an operation fails.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Answer from the local reference store.
    LocalRead,
    /// Apply the write to the local reference store and return its result.
    LocalWrite,
    /// Surface the failure to the caller.
    Propagate,
}

impl FallbackPolicy {
    pub fn absorbs_failure(&self) -> bool {
        !matches!(self, FallbackPolicy::Propagate)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operation {
    DashboardStats,
    MaterialsSummary,
    Projects,
    ProjectById,
    CreateProject,
    SaveForecast,
    PredictForecast,
    ForecastHistory,
    ProcurementOrders,
    Suppliers,
}

impl Operation {
    pub const ALL: [Operation; 10] = [
        Operation::DashboardStats,
        Operation::MaterialsSummary,
        Operation::Projects,
        Operation::ProjectById,
        Operation::CreateProject,
        Operation::SaveForecast,
        Operation::PredictForecast,
        Operation::ForecastHistory,
        Operation::ProcurementOrders,
        Operation::Suppliers,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::DashboardStats => "dashboard_stats",
            Operation::MaterialsSummary => "materials_summary",
            Operation::Projects => "projects",
            Operation::ProjectById => "project_by_id",
            Operation::CreateProject => "create_project",
            Operation::SaveForecast => "save_forecast",
            Operation::PredictForecast => "predict_forecast",
            Operation::ForecastHistory => "forecast_history",
            Operation::ProcurementOrders => "procurement_orders",
            Operation::Suppliers => "suppliers",
        }
    }

    /// Method and path pattern on the remote service.
    pub fn route(&self) -> &'static str {
        match self {
            Operation::DashboardStats => "GET /dashboard/stats",
            Operation::MaterialsSummary => "GET /materials/summary",
            Operation::Projects => "GET /projects | /projects/user/{id}",
            Operation::ProjectById => "GET /projects/{id}",
            Operation::CreateProject => "POST /projects/create",
            Operation::SaveForecast => "POST /forecast/save",
            Operation::PredictForecast => "POST /forecast/predict",
            Operation::ForecastHistory => "GET /forecast/history",
            Operation::ProcurementOrders => "GET /procurement",
            Operation::Suppliers => "GET /suppliers",
        }
    }

    pub fn policy(&self) -> FallbackPolicy {
        match self {
            Operation::CreateProject => FallbackPolicy::LocalWrite,
            Operation::SaveForecast | Operation::PredictForecast => FallbackPolicy::Propagate,
            _ => FallbackPolicy::LocalRead,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
