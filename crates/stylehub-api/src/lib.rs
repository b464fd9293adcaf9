pub mod api;
pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use api::{CatalogKind, OrderAck, StorefrontApi};
pub use client::StorefrontClient;
pub use error::{ApiError, GENERIC_FAILURE_MESSAGE};
