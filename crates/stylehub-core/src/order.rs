//! In-progress purchase state and the immutable order snapshot built from it.

use rust_decimal::Decimal;

use crate::catalog::{Item, ItemId, Variant, VariantId};
use crate::pricing::{DeliveryZone, OrderTotals, ShippingRates};
use crate::validation::ValidationError;

/// Free-text shipping form fields. All four are required at submit time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShippingField {
    Name,
    Phone,
    Address,
    City,
}

impl ShippingField {
    pub const ALL: [ShippingField; 4] = [
        ShippingField::Name,
        ShippingField::Phone,
        ShippingField::Address,
        ShippingField::City,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ShippingField::Name => "name",
            ShippingField::Phone => "phone",
            ShippingField::Address => "address",
            ShippingField::City => "city",
        }
    }
}

impl std::fmt::Display for ShippingField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Customer contact and delivery details.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingInfo {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zone: DeliveryZone,
}

impl ShippingInfo {
    #[must_use]
    pub fn field(&self, field: ShippingField) -> &str {
        match field {
            ShippingField::Name => &self.name,
            ShippingField::Phone => &self.phone,
            ShippingField::Address => &self.address,
            ShippingField::City => &self.city,
        }
    }

    pub fn set_field(&mut self, field: ShippingField, value: String) {
        match field {
            ShippingField::Name => self.name = value,
            ShippingField::Phone => self.phone = value,
            ShippingField::Address => self.address = value,
            ShippingField::City => self.city = value,
        }
    }

    /// Required fields that are currently empty, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<ShippingField> {
        ShippingField::ALL
            .into_iter()
            .filter(|&f| self.field(f).is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Mutable purchase state for one session, owned by the purchase workflow.
///
/// Invariant: once a variant is selected, `quantity` stays within
/// `1..=variant.quantity`, and it resets to 1 whenever the variant changes.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub item: Item,
    pub variant: Option<Variant>,
    pub quantity: u32,
    pub shipping: ShippingInfo,
    pub status: SubmissionStatus,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl OrderDraft {
    #[must_use]
    pub fn new(item: Item, shipping: ShippingInfo) -> Self {
        Self {
            item,
            variant: None,
            quantity: 1,
            shipping,
            status: SubmissionStatus::Idle,
            error: None,
            success: None,
        }
    }

    #[must_use]
    pub fn totals(&self, rates: &ShippingRates) -> OrderTotals {
        OrderTotals::compute(&self.item, self.quantity, rates, self.shipping.zone)
    }

    /// Read-only view for the order summary panel.
    #[must_use]
    pub fn summary(&self, rates: &ShippingRates) -> OrderSummary {
        let totals = self.totals(rates);
        OrderSummary {
            title: self.item.title.clone(),
            variant_name: self.variant.as_ref().map(|v| v.name.clone()),
            unit_price: self.item.price,
            quantity: self.quantity,
            subtotal: totals.subtotal,
            shipping: totals.shipping,
            total: totals.total,
            stock_note: self
                .variant
                .as_ref()
                .map(|v| format!("{} items in stock for size {}", v.quantity, v.name)),
        }
    }
}

/// Immutable order snapshot sent once per validated submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSubmission {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zone: DeliveryZone,
    pub quantity: u32,
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub total: Decimal,
    pub item_id: ItemId,
    pub size_id: VariantId,
}

impl OrderSubmission {
    /// Snapshots `draft` with totals computed from `rates`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingVariant`] if no variant is selected.
    /// Field completeness is the validator's job, not this constructor's.
    pub fn from_draft(draft: &OrderDraft, rates: &ShippingRates) -> Result<Self, ValidationError> {
        let variant = draft
            .variant
            .as_ref()
            .ok_or(ValidationError::MissingVariant)?;
        let totals = draft.totals(rates);
        Ok(Self {
            name: draft.shipping.name.clone(),
            phone: draft.shipping.phone.clone(),
            address: draft.shipping.address.clone(),
            city: draft.shipping.city.clone(),
            zone: draft.shipping.zone,
            quantity: draft.quantity,
            subtotal: totals.subtotal,
            shipping_cost: totals.shipping,
            total: totals.total,
            item_id: draft.item.id,
            size_id: variant.size_id,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub title: String,
    pub variant_name: Option<String>,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub subtotal: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
    pub stock_note: Option<String>,
}

impl OrderSummary {
    /// Cash on delivery is the only payment method.
    pub const PAYMENT_METHOD: &'static str = "Cash on Delivery";
}
