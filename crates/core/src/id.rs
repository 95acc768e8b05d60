//! Record identifiers used across the reference store and the remote gateway.
//!
//! The remote service issues integer ids while the local reference store uses
//! prefixed strings (`PRJ001`). Every identifier is therefore a string newtype
//! that deserializes from either a JSON string or a JSON number.

use core::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DomainError;

/// Identifier of a construction project.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProjectId(String);

/// Identifier of a material in the master data.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MaterialId(String);

/// Identifier of a supplier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SupplierId(String);

/// Identifier of a procurement order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct OrderId(String);

/// Identifier of a saved forecast.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ForecastId(String);

/// Identifier of an authenticated user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

macro_rules! impl_string_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $t {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $t {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::invalid_id(format!("{}: empty", $name)));
                }
                Ok(Self(trimmed.to_string()))
            }
        }

        impl<'de> Deserialize<'de> for $t {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                crate::lenient::string_or_number(deserializer).map(Self)
            }
        }
    };
}

impl_string_newtype!(ProjectId, "ProjectId");
impl_string_newtype!(MaterialId, "MaterialId");
impl_string_newtype!(SupplierId, "SupplierId");
impl_string_newtype!(OrderId, "OrderId");
impl_string_newtype!(ForecastId, "ForecastId");
impl_string_newtype!(UserId, "UserId");

impl ProjectId {
    /// Prefix of locally-issued project ids.
    pub const LOCAL_PREFIX: &'static str = "PRJ";

    /// Locally-issued id for the given 1-based ordinal: `PRJ001`, `PRJ002`, ...
    ///
    /// Ordinals above 999 keep all of their digits (`PRJ1000`).
    pub fn sequenced(ordinal: usize) -> Self {
        Self(format!("{}{:03}", Self::LOCAL_PREFIX, ordinal))
    }

    /// The ordinal of a locally-issued id, `None` for remote/foreign ids.
    pub fn local_ordinal(&self) -> Option<usize> {
        let digits = self.0.strip_prefix(Self::LOCAL_PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}
