//! Forecast submission.
//!
//! [`ForecastRequest`] is the form the dashboard collects; [`ForecastInput`]
//! is the body the prediction service expects.

use serde::{Deserialize, Serialize};

use gridcast_core::{DomainError, DomainResult, ProjectId};

/// Line length sent when the form leaves it empty or non-positive.
pub const DEFAULT_LINE_LENGTH_KM: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ProjectId>,
    pub project_name: String,
    #[serde(default)]
    pub project_category: String,
    /// `Tower`, `Substation` or `Both`.
    #[serde(default)]
    pub project_type: String,
    #[serde(default)]
    pub budget: f64,
    /// State; the location is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub terrain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_from_storage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_length: Option<f64>,
}

impl ForecastRequest {
    pub fn new(project_name: impl Into<String>, budget: f64) -> Self {
        Self {
            project_name: project_name.into(),
            budget,
            ..Self::default()
        }
    }

    /// Reject forms the prediction service cannot price.
    pub fn validate(&self) -> DomainResult<()> {
        if self.project_name.trim().is_empty() {
            return Err(DomainError::validation("project name is required"));
        }
        if !self.budget.is_finite() || self.budget < 0.0 {
            return Err(DomainError::validation(format!(
                "budget must be a non-negative amount, got {}",
                self.budget
            )));
        }
        Ok(())
    }
}

/// Request body for `/forecast/save` and `/forecast/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastInput {
    pub project_category_main: String,
    pub project_type: String,
    pub project_budget_price_in_lake: f64,
    pub state: String,
    pub terrain: String,
    pub distance_from_storage_unit: f64,
    pub transmission_line_length_km: f64,
    pub location: String,
    pub project_name: String,
}

impl From<&ForecastRequest> for ForecastInput {
    fn from(req: &ForecastRequest) -> Self {
        let line_length = req
            .line_length
            .filter(|km| km.is_finite() && *km > 0.0)
            .unwrap_or(DEFAULT_LINE_LENGTH_KM);

        Self {
            project_category_main: req.project_category.clone(),
            project_type: req.project_type.clone(),
            project_budget_price_in_lake: req.budget,
            state: req.region.clone().unwrap_or_else(|| req.location.clone()),
            terrain: req.terrain.clone(),
            distance_from_storage_unit: req.distance_from_storage.unwrap_or(0.0),
            transmission_line_length_km: line_length,
            location: req.location.clone(),
            project_name: req.project_name.clone(),
        }
    }
}
