//! Static subscription price table.
//!
//! Built once at startup and passed into the components that need it.
//! Read-only after construction, so unsynchronized concurrent reads are
//! safe. Amounts are authoritative: checkout never takes an amount from
//! client input.

use std::collections::HashMap;

use super::PaymentError;

/// Price of a subscription package, in minor units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price {
    pub amount_cents: i64,
    pub currency: &'static str,
}

/// Immutable package-id to price mapping.
#[derive(Debug, Clone)]
pub struct PriceTable {
    prices: HashMap<&'static str, Price>,
}

impl PriceTable {
    /// The shipped catalog: a single monthly package at $29.00.
    pub fn standard() -> Self {
        let mut prices = HashMap::new();
        prices.insert(
            "monthly",
            Price {
                amount_cents: 29_00,
                currency: "usd",
            },
        );
        Self { prices }
    }

    /// Looks up a package, failing with `UnknownPackage` otherwise.
    pub fn price_for(&self, package_id: &str) -> Result<&Price, PaymentError> {
        self.prices
            .get(package_id)
            .ok_or_else(|| PaymentError::UnknownPackage(package_id.to_string()))
    }
}
