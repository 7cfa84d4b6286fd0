//! # Product Types
//!
//! Read-only catalog types. The catalog itself is an external collaborator;
//! this module only defines the shape the trust/transaction core consumes.

use crate::error::ShopError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Catalog category for a product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Weapon,
    Vehicle,
    Throwable,
}

impl ProductKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductKind::Weapon => "weapon",
            ProductKind::Vehicle => "vehicle",
            ProductKind::Throwable => "throwable",
        }
    }
}

impl FromStr for ProductKind {
    type Err = ShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weapon" => Ok(ProductKind::Weapon),
            "vehicle" => Ok(ProductKind::Vehicle),
            "throwable" => Ok(ProductKind::Throwable),
            other => Err(ShopError::Validation(format!(
                "unknown product kind: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A product as held server-side.
///
/// `price` is in minor units (cents). `payment_reference` is the
/// processor-side price identifier; it is the only thing the payment
/// gateway ever sees, so prices can never be asserted by a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub product_id: i64,
    pub name: String,
    pub kind: ProductKind,
    /// Price in minor units, authoritative at checkout time
    pub price: i64,
    /// Processor-side price id (e.g. a Stripe `price_...`)
    pub payment_reference: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            ProductKind::Weapon,
            ProductKind::Vehicle,
            ProductKind::Throwable,
        ] {
            assert_eq!(kind.as_str().parse::<ProductKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!("boat".parse::<ProductKind>().is_err());
    }
}
