//! Conversion from wire schemas to [`stylehub_core`] domain types.

use stylehub_core::{
    Faq, Item, ItemDetail, ItemId, OrderSubmission, ProductImage, SiteSettings, Variant,
    VariantId,
};

use crate::types::{OrderRequest, WireFaq, WireItem, WireProductDetail, WireSettings, WireSize};

#[must_use]
pub fn normalize_item(item: WireItem) -> Item {
    Item {
        id: ItemId(item.id),
        title: item.title,
        brand: item.brand.unwrap_or_default(),
        price: item.price,
        list_price: item.discount_price,
        image: item.image,
        // Treat an empty hover image the same as a missing one.
        hover_image: item.hover_image.filter(|s| !s.is_empty()),
        featured: item.featured,
        variants: item.sizes.into_iter().map(normalize_size).collect(),
    }
}

fn normalize_size(size: WireSize) -> Variant {
    Variant {
        id: VariantId(size.id),
        size_id: VariantId(size.size_id.unwrap_or(size.id)),
        name: size.name,
        quantity: u32::try_from(size.quantity.max(0)).unwrap_or(u32::MAX),
    }
}

#[must_use]
pub fn normalize_detail(id: ItemId, detail: WireProductDetail) -> ItemDetail {
    ItemDetail {
        id,
        name: detail.name,
        description: detail.description.filter(|s| !s.is_empty()),
        brand: detail.brand.map(|b| b.name),
        images: detail
            .images
            .into_iter()
            .map(|img| ProductImage {
                url: img.url,
                is_primary: img.is_primary,
            })
            .collect(),
    }
}

#[must_use]
pub fn normalize_faq(faq: WireFaq) -> Faq {
    Faq {
        id: faq.id,
        question: faq.question,
        answer: faq.answer,
    }
}

#[must_use]
pub fn normalize_settings(settings: WireSettings) -> SiteSettings {
    SiteSettings {
        logo: settings.logo.filter(|s| !s.is_empty()),
        phone_number: settings.phone_number.filter(|s| !s.is_empty()),
        favicon: settings.favicon.filter(|s| !s.is_empty()),
    }
}

#[must_use]
pub fn order_request(order: &OrderSubmission) -> OrderRequest {
    OrderRequest {
        name: order.name.clone(),
        phone: order.phone.clone(),
        address: order.address.clone(),
        city: order.city.clone(),
        shipping_option: order.zone,
        quantity: order.quantity,
        subtotal: order.subtotal,
        shipping_cost: order.shipping_cost,
        total: order.total,
        product_id: order.item_id.0,
        size_id: order.size_id.0,
    }
}
