//! `gridcast-forecast`
//!
//! **Responsibility:** turn a forecast report received from the prediction
//! service into display-ready groupings.
//!
//! - [`taxonomy`]: total classifier from material name to [`Category`].
//! - [`report`]: forecast report model, normalisation and advisory validation.
//! - [`summary`]: aggregation engine (per-category names and cost totals).
//! - [`display`]: collapsing categories into the chart palette.
//! - [`pricing`]: estimated unit-price catalogue used by the prediction service.
//!
//! Everything here is pure and synchronous; no I/O.

pub mod category;
pub mod display;
pub mod pricing;
pub mod report;
pub mod summary;
pub mod taxonomy;

pub use category::{Category, DisplayBucket};
pub use display::{display_breakdown, DisplayBreakdown, DisplayGroup};
pub use pricing::unit_cost;
pub use report::{ForecastReport, MaterialLineItem, MaterialPrediction, ReportWarning};
pub use summary::{aggregate, Aggregation, CategoryGroup, GroupedSummary};
pub use taxonomy::{classify, PRICE_SUFFIX};
