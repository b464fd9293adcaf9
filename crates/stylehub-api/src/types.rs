//! Wire schemas for the storefront commerce API.
//!
//! Each endpoint has exactly one canonical shape. A body that does not match
//! it fails deserialization and surfaces as [`crate::ApiError::Deserialize`];
//! there is no guessing between alternative layouts.
//!
//! ### Prices
//! The backend emits prices either as JSON numbers (`29.99`) or as decimal
//! strings (`"29.99"`). `rust_decimal`'s deserializer accepts both.
//!
//! ### List price
//! Collection items name the pre-markdown price `discount`; featured items
//! name it `discount_price`. Both map onto one field through a serde alias.
//!
//! ### Variant identity
//! Variants carry `id` (used for selection) and `size_id` (sent with orders).
//! `size_id` falls back to `id` when the backend omits it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stylehub_core::DeliveryZone;

/// `{"status": "success", "data": [...]}` envelope used by list endpoints.
#[derive(Debug, Deserialize)]
pub struct ListEnvelope<T> {
    pub status: String,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A catalog item from `GET /products/collections` or `GET /products/featured`.
#[derive(Debug, Deserialize)]
pub struct WireItem {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub brand: Option<String>,
    pub price: Decimal,
    #[serde(default, alias = "discount")]
    pub discount_price: Option<Decimal>,
    pub image: String,
    #[serde(default, rename = "hoverImage")]
    pub hover_image: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub sizes: Vec<WireSize>,
}

/// A size variant nested inside [`WireItem::sizes`].
#[derive(Debug, Deserialize)]
pub struct WireSize {
    pub id: i64,
    #[serde(default)]
    pub size_id: Option<i64>,
    pub name: String,
    /// Stock count. Negative values seen from the backend are treated as zero.
    pub quantity: i64,
}

/// Body of `GET /products/{id}`.
#[derive(Debug, Deserialize)]
pub struct WireProductDetail {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub brand: Option<WireBrand>,
    #[serde(default)]
    pub images: Vec<WireImage>,
}

#[derive(Debug, Deserialize)]
pub struct WireBrand {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct WireImage {
    pub url: String,
    #[serde(default)]
    pub is_primary: bool,
}

/// One entry of the `GET /faqs` array.
#[derive(Debug, Deserialize)]
pub struct WireFaq {
    pub id: i64,
    pub question: String,
    pub answer: String,
}

/// `{"success": true, "data": {...}}` from `GET /settings`.
#[derive(Debug, Deserialize)]
pub struct SettingsEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Option<WireSettings>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WireSettings {
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub favicon: Option<String>,
}

/// Body of `POST /orders`. Money fields go out as JSON numbers.
#[derive(Debug, Serialize)]
pub struct OrderRequest {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub shipping_option: DeliveryZone,
    pub quantity: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub shipping_cost: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub product_id: i64,
    pub size_id: i64,
}

/// Response of `POST /orders`: `{"status": "success"}` or an error payload.
#[derive(Debug, Default, Deserialize)]
pub struct OrderResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
