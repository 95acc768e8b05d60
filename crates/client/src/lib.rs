//! `gridcast-client`
//!
//! **Responsibility:** data access for the forecasting dashboard.
//!
//! This crate provides:
//! - [`gateway`]: HTTP/JSON client for the remote forecasting service
//! - [`remap`]: declared remote → canonical field-name tables
//! - [`access`]: per-operation try-remote / local-fallback policy
//! - [`session`] and [`auth`]: the session credential contract and sign-in flow
//!
//! The remote service is the authority; the local reference store only
//! answers when a call fails, and only for operations whose policy allows it.

pub mod access;
pub mod auth;
pub mod config;
pub mod gateway;
pub mod operation;
pub mod remap;
pub mod request;
pub mod session;

pub use access::{AccessError, ForecastOverview, ResilientAccess};
pub use auth::{AuthClient, AuthError};
pub use config::ClientConfig;
pub use gateway::{GatewayError, HttpGateway, RemoteGateway};
pub use operation::{FallbackPolicy, Operation};
pub use request::{ForecastInput, ForecastRequest};
pub use session::{AppUser, InMemorySessionStore, Session, SessionStore};
