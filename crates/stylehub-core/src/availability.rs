//! Which size variants can be bought, and how many.

use crate::catalog::{Item, Variant};

/// A variant is purchasable iff it has stock.
#[must_use]
pub fn is_available(variant: &Variant) -> bool {
    variant.quantity > 0
}

/// Upper bound for the quantity input: the selected variant's stock, or `1`
/// while nothing is selected.
#[must_use]
pub fn max_quantity(selected: Option<&Variant>) -> u32 {
    selected.map_or(1, |v| v.quantity)
}

/// `true` if at least one variant of `item` is purchasable.
#[must_use]
pub fn item_has_stock(item: &Item) -> bool {
    item.variants.iter().any(is_available)
}

/// Item-level call to action shown on catalog cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuyAffordance {
    Buy,
    OutOfStock,
}

impl BuyAffordance {
    #[must_use]
    pub fn for_item(item: &Item) -> Self {
        if item_has_stock(item) {
            BuyAffordance::Buy
        } else {
            BuyAffordance::OutOfStock
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            BuyAffordance::Buy => "Buy Now",
            BuyAffordance::OutOfStock => "Out of Stock",
        }
    }
}
