//! Forecast report model.
//!
//! A report is created by the remote forecast-generation call and is immutable
//! once received. Costs are read leniently: a missing or non-numeric cost is
//! `0`, never a decoding failure.

use serde::{Deserialize, Serialize};

use gridcast_core::lenient::{f64_or_zero, opt_f64};
use gridcast_core::{approx_eq, gst_for, ForecastId, GST_RATE};

use crate::pricing::unit_cost;

/// One priced material entry within a forecast report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialLineItem {
    /// Taxonomy key.
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub unit_cost: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub total_cost: f64,
}

impl MaterialLineItem {
    pub fn new(name: impl Into<String>, quantity: f64, unit_cost: f64) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit: None,
            unit_cost,
            total_cost: quantity * unit_cost,
        }
    }

    /// Line item costed from the unit-price catalogue.
    pub fn priced(name: impl Into<String>, quantity: f64) -> Self {
        let name = name.into();
        let cost = unit_cost(&name);
        let mut item = Self::new(name, quantity, cost);
        item.unit = Some("units".to_string());
        item
    }
}

/// Raw model output: one predicted quantity per material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialPrediction {
    #[serde(default)]
    pub material_name: String,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub predicted_value: f64,
}

/// Forecast report as returned by `/forecast/save` or `/forecast/predict`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ForecastReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast_id: Option<ForecastId>,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub project_type: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub location: String,
    #[serde(default, deserialize_with = "opt_f64", skip_serializing_if = "Option::is_none")]
    pub line_length: Option<f64>,
    /// Model confidence, 0–100.
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub confidence: f64,
    #[serde(default)]
    pub materials: Vec<MaterialLineItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub predictions: Vec<MaterialPrediction>,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub subtotal: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub gst: f64,
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub total: f64,
}

/// Advisory inconsistency found in a report.
///
/// Warnings never block rendering; they are surfaced next to the result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportWarning {
    LineTotalMismatch { name: String, declared: f64, expected: f64 },
    SubtotalMismatch { declared: f64, computed: f64 },
    GstMismatch { declared: f64, expected: f64 },
    TotalMismatch { declared: f64, expected: f64 },
    ConfidenceOutOfRange { confidence: f64 },
}

impl core::fmt::Display for ReportWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ReportWarning::LineTotalMismatch { name, declared, expected } => write!(
                f,
                "line item '{name}' declares total {declared} but quantity x unit cost is {expected}"
            ),
            ReportWarning::SubtotalMismatch { declared, computed } => write!(
                f,
                "declared subtotal {declared} differs from summed line totals {computed}"
            ),
            ReportWarning::GstMismatch { declared, expected } => {
                write!(f, "declared GST {declared} differs from expected {expected}")
            }
            ReportWarning::TotalMismatch { declared, expected } => {
                write!(f, "declared total {declared} differs from subtotal + GST {expected}")
            }
            ReportWarning::ConfidenceOutOfRange { confidence } => {
                write!(f, "confidence {confidence} is outside 0-100")
            }
        }
    }
}

impl ForecastReport {
    /// Build a report from line items, deriving subtotal, GST and total.
    pub fn from_materials(materials: Vec<MaterialLineItem>) -> Self {
        let mut report = Self {
            materials,
            ..Self::default()
        };
        report.recompute_totals();
        report
    }

    fn recompute_totals(&mut self) {
        self.subtotal = self.line_total_sum();
        self.gst = gst_for(self.subtotal);
        self.total = self.subtotal + self.gst;
    }

    /// Σ `totalCost` over the line items, in their given order.
    pub fn line_total_sum(&self) -> f64 {
        self.materials.iter().map(|m| m.total_cost).sum()
    }

    /// Fill in `materials` from raw `predictions` when the service sent only the
    /// latter. Reports that already carry line items are returned unchanged.
    pub fn normalized(mut self) -> Self {
        if self.materials.is_empty() && !self.predictions.is_empty() {
            self.materials = self
                .predictions
                .iter()
                .map(|p| MaterialLineItem::priced(p.material_name.clone(), p.predicted_value))
                .collect();
            self.recompute_totals();
        }
        self
    }

    /// Every advisory inconsistency in the report.
    pub fn validate(&self) -> Vec<ReportWarning> {
        self.validate_against(self.line_total_sum())
    }

    /// Validate using an externally computed subtotal (e.g. Σ category totals).
    pub(crate) fn validate_against(&self, computed_subtotal: f64) -> Vec<ReportWarning> {
        let mut warnings = Vec::new();

        for item in &self.materials {
            let expected = item.quantity * item.unit_cost;
            if !approx_eq(item.total_cost, expected) {
                warnings.push(ReportWarning::LineTotalMismatch {
                    name: item.name.clone(),
                    declared: item.total_cost,
                    expected,
                });
            }
        }

        if !approx_eq(self.subtotal, computed_subtotal) {
            warnings.push(ReportWarning::SubtotalMismatch {
                declared: self.subtotal,
                computed: computed_subtotal,
            });
        }

        // The service may send GST rounded or unrounded; both are consistent.
        let exact_gst = self.subtotal * GST_RATE;
        if !approx_eq(self.gst, exact_gst) && !approx_eq(self.gst, gst_for(self.subtotal)) {
            warnings.push(ReportWarning::GstMismatch {
                declared: self.gst,
                expected: gst_for(self.subtotal),
            });
        }

        let expected_total = self.subtotal + self.gst;
        if !approx_eq(self.total, expected_total) {
            warnings.push(ReportWarning::TotalMismatch {
                declared: self.total,
                expected: expected_total,
            });
        }

        if !(0.0..=100.0).contains(&self.confidence) {
            warnings.push(ReportWarning::ConfidenceOutOfRange {
                confidence: self.confidence,
            });
        }

        warnings
    }
}
