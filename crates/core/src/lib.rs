//! `gridcast-core`: foundation building blocks shared by every gridcast crate.
//!
//! This crate contains **pure** primitives (no I/O, no async).

pub mod error;
pub mod id;
pub mod lenient;
pub mod money;

pub use error::{DomainError, DomainResult};
pub use id::{ForecastId, MaterialId, OrderId, ProjectId, SupplierId, UserId};
pub use money::{approx_eq, gst_for, tolerance_for, GST_RATE};
