//! The seam between storefront state machines and the remote commerce API.
//!
//! [`crate::StorefrontClient`] is the production implementation; tests
//! substitute in-memory fakes.

use std::future::Future;

use stylehub_core::{Faq, Item, ItemDetail, ItemId, OrderSubmission, SiteSettings};

use crate::error::ApiError;

/// Which catalog listing to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    Collections,
    Featured,
}

impl CatalogKind {
    /// Endpoint path relative to the API base URL.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            CatalogKind::Collections => "products/collections",
            CatalogKind::Featured => "products/featured",
        }
    }
}

impl std::fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogKind::Collections => write!(f, "collections"),
            CatalogKind::Featured => write!(f, "featured"),
        }
    }
}

/// Successful order acknowledgement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderAck {
    pub message: Option<String>,
}

/// Remote operations the storefront flows depend on.
pub trait StorefrontApi: Send + Sync {
    fn fetch_items(
        &self,
        kind: CatalogKind,
    ) -> impl Future<Output = Result<Vec<Item>, ApiError>> + Send;

    fn fetch_item_detail(
        &self,
        id: ItemId,
    ) -> impl Future<Output = Result<ItemDetail, ApiError>> + Send;

    fn fetch_faqs(&self) -> impl Future<Output = Result<Vec<Faq>, ApiError>> + Send;

    fn fetch_settings(&self) -> impl Future<Output = Result<SiteSettings, ApiError>> + Send;

    /// Issues exactly one order-creation request. Never retried.
    fn create_order(
        &self,
        order: &OrderSubmission,
    ) -> impl Future<Output = Result<OrderAck, ApiError>> + Send;
}
