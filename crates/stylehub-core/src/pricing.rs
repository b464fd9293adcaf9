//! Order pricing: subtotal, delivery fee, and total.
//!
//! Every function here is pure and total. Quantities below 1 are rejected by
//! the form validator before they ever reach these functions.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::catalog::Item;

/// Two-valued delivery-fee selector.
///
/// Serialized with the API's `shipping_option` names: `"inside"` for the
/// near zone and `"outside"` for the far zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryZone {
    #[default]
    #[serde(rename = "inside")]
    DomesticNear,
    #[serde(rename = "outside")]
    DomesticFar,
}

impl DeliveryZone {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryZone::DomesticNear => "inside",
            DeliveryZone::DomesticFar => "outside",
        }
    }
}

impl std::fmt::Display for DeliveryZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DeliveryZone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inside" | "near" | "domestic-near" => Ok(DeliveryZone::DomesticNear),
            "outside" | "far" | "domestic-far" => Ok(DeliveryZone::DomesticFar),
            other => Err(format!(
                "unknown delivery zone '{other}'; expected 'near' or 'far'"
            )),
        }
    }
}

/// Fixed delivery fees per zone. Values come from deployment configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShippingRates {
    pub near: Decimal,
    pub far: Decimal,
}

impl Default for ShippingRates {
    fn default() -> Self {
        Self {
            near: Decimal::from(80),
            far: Decimal::from(140),
        }
    }
}

impl ShippingRates {
    /// Returns the fee for `zone`. Independent of item and quantity.
    #[must_use]
    pub fn shipping_cost(&self, zone: DeliveryZone) -> Decimal {
        match zone {
            DeliveryZone::DomesticNear => self.near,
            DeliveryZone::DomesticFar => self.far,
        }
    }
}

/// `item.price * quantity`, saturating at `Decimal::MAX`.
#[must_use]
pub fn subtotal(item: &Item, quantity: u32) -> Decimal {
    item.price.saturating_mul(Decimal::from(quantity))
}

/// `subtotal + shipping_cost(zone)`.
#[must_use]
pub fn total(item: &Item, quantity: u32, rates: &ShippingRates, zone: DeliveryZone) -> Decimal {
    subtotal(item, quantity).saturating_add(rates.shipping_cost(zone))
}

/// Price breakdown shown in the order summary and sent with the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

impl OrderTotals {
    #[must_use]
    pub fn compute(item: &Item, quantity: u32, rates: &ShippingRates, zone: DeliveryZone) -> Self {
        let subtotal = subtotal(item, quantity);
        let shipping = rates.shipping_cost(zone);
        Self {
            subtotal,
            shipping,
            total: subtotal.saturating_add(shipping),
        }
    }
}

/// Whole-percent discount of `item.price` against its list price, rounded to
/// the nearest integer.
///
/// Returns `None` when there is no list price or it does not exceed the
/// selling price.
#[must_use]
pub fn discount_percent(item: &Item) -> Option<u32> {
    let list = item.list_price?;
    if list <= item.price || list <= Decimal::ZERO {
        return None;
    }
    let pct = (Decimal::ONE - item.price / list) * Decimal::ONE_HUNDRED;
    pct.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u32()
}
