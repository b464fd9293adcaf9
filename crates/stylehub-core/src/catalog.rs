use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog item identifier, as assigned by the commerce API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Size variant identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantId(pub i64);

impl std::fmt::Display for VariantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A purchasable catalog entry (collection piece or featured product).
///
/// Immutable for the duration of a purchase session; replaced wholesale when
/// the catalog is refetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub brand: String,
    /// Selling price in the store currency.
    pub price: Decimal,
    /// Pre-markdown list price, shown struck through when set.
    pub list_price: Option<Decimal>,
    /// Primary image URL.
    pub image: String,
    /// Alternate image shown while the item is hovered.
    pub hover_image: Option<String>,
    pub featured: bool,
    /// Size variants in display order.
    pub variants: Vec<Variant>,
}

impl Item {
    /// Looks up a variant by its selection identity.
    #[must_use]
    pub fn variant(&self, id: VariantId) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == id)
    }

    /// Image to display for the item: the hover image while hovered (when one
    /// exists), otherwise the primary image.
    #[must_use]
    pub fn display_image(&self, hovered: bool) -> &str {
        match (&self.hover_image, hovered) {
            (Some(hover), true) => hover,
            _ => &self.image,
        }
    }
}

/// A size option of an [`Item`] with its own stock count.
///
/// Stock is authoritative server-side; the client never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Selection identity within the item.
    pub id: VariantId,
    /// Identity sent with orders (`size_id` on the wire).
    pub size_id: VariantId,
    /// Display name, e.g. `"M"` or `"42 EU"`.
    pub name: String,
    /// Units in stock.
    pub quantity: u32,
}

/// Extended product information shown by the detail viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    pub brand: Option<String>,
    pub images: Vec<ProductImage>,
}

impl ItemDetail {
    /// The image flagged primary, falling back to the first gallery image.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images
            .iter()
            .find(|img| img.is_primary)
            .or_else(|| self.images.first())
            .map(|img| img.url.as_str())
    }

    /// Gallery URLs in API order.
    #[must_use]
    pub fn gallery(&self) -> Vec<&str> {
        self.images.iter().map(|img| img.url.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    pub url: String,
    pub is_primary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub id: i64,
    pub question: String,
    pub answer: String,
}

/// Store branding. Every field is optional; callers fall back to bundled
/// assets when a value is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub logo: Option<String>,
    pub phone_number: Option<String>,
    pub favicon: Option<String>,
}
