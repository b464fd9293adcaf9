//! FAQ and branding content. Failures fall back to empty content.

use stylehub_api::StorefrontApi;
use stylehub_core::{Faq, SiteSettings};

/// Fetches the FAQ list, or an empty list if the fetch fails.
pub async fn load_faqs<A: StorefrontApi>(api: &A) -> Vec<Faq> {
    match api.fetch_faqs().await {
        Ok(faqs) => faqs,
        Err(e) => {
            tracing::warn!(error = %e, "faq fetch failed");
            Vec::new()
        }
    }
}

/// Fetches store settings, or defaults (bundled assets) if the fetch fails.
pub async fn load_settings<A: StorefrontApi>(api: &A) -> SiteSettings {
    match api.fetch_settings().await {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "settings fetch failed");
            SiteSettings::default()
        }
    }
}
