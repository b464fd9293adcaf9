//! Storefront analytics events.
//!
//! Events are handed to an [`EventSink`]. The default [`TracingSink`] writes
//! each one as a structured `tracing` record under the `stylehub::tracking`
//! target, so any subscriber can route them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use stylehub_core::{DeliveryZone, Item, ItemId, OrderSubmission};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TrackingEvent {
    /// The product detail viewer was opened.
    ViewProductDetails {
        product_id: ItemId,
        title: String,
        price: Decimal,
        brand: String,
    },
    /// A purchase session was opened.
    BuyNowClick {
        product_id: ItemId,
        title: String,
        price: Decimal,
        brand: String,
    },
    /// An order was accepted.
    OrderComplete {
        product_id: ItemId,
        title: String,
        price: Decimal,
        brand: String,
        size: String,
        quantity: u32,
        total_price: Decimal,
        shipping_cost: Decimal,
        customer_location: DeliveryZone,
    },
}

impl TrackingEvent {
    #[must_use]
    pub fn view_product_details(item: &Item) -> Self {
        TrackingEvent::ViewProductDetails {
            product_id: item.id,
            title: item.title.clone(),
            price: item.price,
            brand: item.brand.clone(),
        }
    }

    #[must_use]
    pub fn buy_now_click(item: &Item) -> Self {
        TrackingEvent::BuyNowClick {
            product_id: item.id,
            title: item.title.clone(),
            price: item.price,
            brand: item.brand.clone(),
        }
    }

    /// `size` is the display name of the ordered variant.
    #[must_use]
    pub fn order_complete(item: &Item, size: &str, order: &OrderSubmission) -> Self {
        TrackingEvent::OrderComplete {
            product_id: item.id,
            title: item.title.clone(),
            price: item.price,
            brand: item.brand.clone(),
            size: size.to_string(),
            quantity: order.quantity,
            total_price: order.total,
            shipping_cost: order.shipping_cost,
            customer_location: order.zone,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            TrackingEvent::ViewProductDetails { .. } => "view_product_details",
            TrackingEvent::BuyNowClick { .. } => "buy_now_click",
            TrackingEvent::OrderComplete { .. } => "order_complete",
        }
    }
}

/// A [`TrackingEvent`] stamped with the time it happened.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedEvent {
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub event: TrackingEvent,
}

impl TrackedEvent {
    #[must_use]
    pub fn now(event: TrackingEvent) -> Self {
        Self {
            at: Utc::now(),
            event,
        }
    }
}

pub trait EventSink: Send + Sync {
    fn record(&self, event: &TrackedEvent);
}

/// Emits events as `info` records with the payload serialized to JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: &TrackedEvent) {
        match serde_json::to_string(event) {
            Ok(payload) => tracing::info!(
                target: "stylehub::tracking",
                event = event.event.name(),
                at = %event.at.to_rfc3339(),
                %payload,
                "tracking event"
            ),
            Err(e) => tracing::warn!(
                target: "stylehub::tracking",
                event = event.event.name(),
                error = %e,
                "failed to serialize tracking event"
            ),
        }
    }
}
