pub mod app_config;
pub mod availability;
pub mod catalog;
pub mod config;
pub mod order;
pub mod pricing;
pub mod validation;

pub use app_config::{AppConfig, Environment};
pub use availability::{is_available, item_has_stock, max_quantity, BuyAffordance};
pub use catalog::{Faq, Item, ItemDetail, ItemId, ProductImage, SiteSettings, Variant, VariantId};
pub use config::{load_app_config, load_app_config_from_env};
pub use order::{
    OrderDraft, OrderSubmission, OrderSummary, ShippingField, ShippingInfo, SubmissionStatus,
};
pub use pricing::{DeliveryZone, OrderTotals, ShippingRates};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
