//! HTTP client for the storefront commerce API.
//!
//! Wraps `reqwest` with typed response decoding and one canonical schema per
//! endpoint. List endpoints check the `"status"` field of the JSON envelope
//! and surface a non-success status as [`ApiError::Rejected`]. No request is
//! retried; timeouts come from the configured client timeout.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use stylehub_core::{AppConfig, Faq, Item, ItemDetail, ItemId, OrderSubmission, SiteSettings};

use crate::api::{CatalogKind, OrderAck, StorefrontApi};
use crate::error::ApiError;
use crate::normalize::{
    normalize_detail, normalize_faq, normalize_item, normalize_settings, order_request,
};
use crate::types::{
    ListEnvelope, OrderResponse, SettingsEnvelope, WireFaq, WireItem, WireProductDetail,
};

const SUCCESS_STATUS: &str = "success";

/// Client for the storefront commerce API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct StorefrontClient {
    client: Client,
    base_url: Url,
}

impl StorefrontClient {
    /// Creates a client rooted at `base_url` (e.g. `"https://shop.example/api"`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client` cannot
    /// be constructed, or [`ApiError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: ensure the base URL ends with exactly one slash so that
        // `Url::join` appends endpoint paths instead of replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ApiError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Creates a client from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`StorefrontClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(
            &config.api_base_url,
            config.request_timeout_secs,
            &config.user_agent,
        )
    }

    /// Fetches one catalog listing.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::UnexpectedStatus`] on a non-2xx status.
    /// - [`ApiError::Rejected`] if the envelope status is not `"success"`.
    /// - [`ApiError::Deserialize`] if the body does not match the schema.
    pub async fn fetch_catalog(&self, kind: CatalogKind) -> Result<Vec<Item>, ApiError> {
        let url = self.endpoint(kind.path())?;
        let body = self.send_json(self.client.get(url.clone()), &url).await?;
        let envelope: ListEnvelope<WireItem> = decode(body, &format!("{kind} listing"))?;
        if envelope.status != SUCCESS_STATUS {
            return Err(ApiError::Rejected {
                message: envelope.message,
            });
        }
        tracing::debug!(%kind, count = envelope.data.len(), "fetched catalog listing");
        Ok(envelope.data.into_iter().map(normalize_item).collect())
    }

    /// Fetches `GET /products/collections`.
    ///
    /// # Errors
    ///
    /// See [`StorefrontClient::fetch_catalog`].
    pub async fn fetch_collections(&self) -> Result<Vec<Item>, ApiError> {
        self.fetch_catalog(CatalogKind::Collections).await
    }

    /// Fetches `GET /products/featured`.
    ///
    /// # Errors
    ///
    /// See [`StorefrontClient::fetch_catalog`].
    pub async fn fetch_featured(&self) -> Result<Vec<Item>, ApiError> {
        self.fetch_catalog(CatalogKind::Featured).await
    }

    /// Fetches extended detail for one item.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::UnexpectedStatus`] on a non-2xx status (including 404).
    /// - [`ApiError::Deserialize`] if the body does not match the schema.
    pub async fn fetch_product(&self, id: ItemId) -> Result<ItemDetail, ApiError> {
        let url = self.endpoint(&format!("products/{id}"))?;
        let body = self.send_json(self.client.get(url.clone()), &url).await?;
        let detail: WireProductDetail = decode(body, &format!("product {id}"))?;
        Ok(normalize_detail(id, detail))
    }

    /// Fetches the FAQ list.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::UnexpectedStatus`] on a non-2xx status.
    /// - [`ApiError::Deserialize`] if the body is not an array of FAQ entries.
    pub async fn fetch_faqs(&self) -> Result<Vec<Faq>, ApiError> {
        let url = self.endpoint("faqs")?;
        let body = self.send_json(self.client.get(url.clone()), &url).await?;
        let faqs: Vec<WireFaq> = decode(body, "faqs")?;
        Ok(faqs.into_iter().map(normalize_faq).collect())
    }

    /// Fetches store branding settings.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::UnexpectedStatus`] on a non-2xx status.
    /// - [`ApiError::Rejected`] if the envelope reports `"success": false`.
    /// - [`ApiError::Deserialize`] if the body does not match the schema.
    pub async fn fetch_settings(&self) -> Result<SiteSettings, ApiError> {
        let url = self.endpoint("settings")?;
        let body = self.send_json(self.client.get(url.clone()), &url).await?;
        let envelope: SettingsEnvelope = decode(body, "settings")?;
        if !envelope.success {
            return Err(ApiError::Rejected { message: None });
        }
        Ok(normalize_settings(envelope.data.unwrap_or_default()))
    }

    /// Submits one order. The request is sent exactly once.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::UnexpectedStatus`] on a non-2xx status, carrying the
    ///   body's `message` when present.
    /// - [`ApiError::Rejected`] if a 2xx body does not report `"success"`.
    /// - [`ApiError::Deserialize`] if the body is not JSON.
    pub async fn place_order(&self, order: &OrderSubmission) -> Result<OrderAck, ApiError> {
        let url = self.endpoint("orders")?;
        let request = self.client.post(url.clone()).json(&order_request(order));
        let body = self.send_json(request, &url).await?;
        let response: OrderResponse = decode(body, "order response")?;
        if response.status.as_deref() != Some(SUCCESS_STATUS) {
            return Err(ApiError::Rejected {
                message: response.message,
            });
        }
        tracing::info!(
            item_id = %order.item_id,
            size_id = %order.size_id,
            quantity = order.quantity,
            "order accepted"
        );
        Ok(OrderAck {
            message: response.message,
        })
    }

    /// Resolves an endpoint path against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join '{path}': {e}"),
            })
    }

    /// Sends `request` and parses the body as JSON.
    ///
    /// A non-2xx status becomes [`ApiError::UnexpectedStatus`]; the body's
    /// `message` field is kept so callers can show it verbatim.
    async fn send_json(
        &self,
        request: RequestBuilder,
        url: &Url,
    ) -> Result<serde_json::Value, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| {
                    v.get("message")
                        .and_then(serde_json::Value::as_str)
                        .map(str::to_owned)
                });
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}

fn decode<T: DeserializeOwned>(body: serde_json::Value, context: &str) -> Result<T, ApiError> {
    serde_json::from_value(body).map_err(|e| ApiError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}

impl StorefrontApi for StorefrontClient {
    async fn fetch_items(&self, kind: CatalogKind) -> Result<Vec<Item>, ApiError> {
        self.fetch_catalog(kind).await
    }

    async fn fetch_item_detail(&self, id: ItemId) -> Result<ItemDetail, ApiError> {
        self.fetch_product(id).await
    }

    async fn fetch_faqs(&self) -> Result<Vec<Faq>, ApiError> {
        StorefrontClient::fetch_faqs(self).await
    }

    async fn fetch_settings(&self) -> Result<SiteSettings, ApiError> {
        StorefrontClient::fetch_settings(self).await
    }

    async fn create_order(&self, order: &OrderSubmission) -> Result<OrderAck, ApiError> {
        self.place_order(order).await
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
