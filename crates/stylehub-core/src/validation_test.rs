use rust_decimal::Decimal;

use super::*;
use crate::catalog::{Item, ItemId, Variant, VariantId};
use crate::order::ShippingInfo;

fn make_item(stock: u32) -> Item {
    Item {
        id: ItemId(1),
        title: "Wool Coat".to_string(),
        brand: "StyleHub".to_string(),
        price: Decimal::from(120),
        list_price: None,
        image: "coat.jpg".to_string(),
        hover_image: None,
        featured: false,
        variants: vec![Variant {
            id: VariantId(5),
            size_id: VariantId(5),
            name: "L".to_string(),
            quantity: stock,
        }],
    }
}

fn filled_shipping() -> ShippingInfo {
    ShippingInfo {
        name: "Rahim Uddin".to_string(),
        phone: "01711111111".to_string(),
        address: "House 4, Road 7".to_string(),
        city: "Dhaka".to_string(),
        ..ShippingInfo::default()
    }
}

/// A draft that passes every rule: variant selected, fields filled, qty 1.
fn submittable(stock: u32) -> OrderDraft {
    let item = make_item(stock);
    let mut draft = OrderDraft::new(item, filled_shipping());
    draft.variant = draft.item.variants.first().cloned();
    draft
}

#[test]
fn complete_draft_can_submit() {
    assert!(can_submit(&submittable(3)));
}

#[test]
fn missing_variant_blocks_submit() {
    let mut draft = submittable(3);
    draft.variant = None;
    assert_eq!(
        validate_submission(&draft),
        Err(ValidationError::MissingVariant)
    );
    assert!(!can_submit(&draft));
}

#[test]
fn any_empty_field_blocks_submit() {
    for field in ShippingField::ALL {
        let mut draft = submittable(3);
        draft.shipping.set_field(field, String::new());
        assert_eq!(
            validate_submission(&draft),
            Err(ValidationError::MissingFields(vec![field])),
            "expected {field} to be reported missing"
        );
    }
}

#[test]
fn missing_fields_message_is_user_facing() {
    let mut draft = submittable(3);
    draft.shipping.name.clear();
    let err = validate_submission(&draft).unwrap_err();
    assert_eq!(err.to_string(), "Please fill out all required fields");
}

#[test]
fn quantity_above_stock_blocks_submit() {
    let mut draft = submittable(2);
    draft.quantity = 3;
    let err = validate_submission(&draft).unwrap_err();
    assert_eq!(err, ValidationError::InsufficientStock { available: 2 });
    assert_eq!(
        err.to_string(),
        "Only 2 items available for the selected size."
    );
}

#[test]
fn in_flight_submission_blocks_submit() {
    let mut draft = submittable(3);
    draft.status = SubmissionStatus::Submitting;
    assert_eq!(
        validate_submission(&draft),
        Err(ValidationError::SubmissionInFlight)
    );
}

#[test]
fn failed_status_does_not_block_resubmit() {
    let mut draft = submittable(3);
    draft.status = SubmissionStatus::Failed;
    assert!(can_submit(&draft));
}

#[test]
fn increment_stops_at_variant_stock() {
    let mut draft = submittable(3);
    assert!(can_increment_quantity(&draft));
    draft.quantity = 3;
    assert!(!can_increment_quantity(&draft));
}

#[test]
fn increment_disallowed_without_variant() {
    let mut draft = submittable(3);
    draft.variant = None;
    assert!(!can_increment_quantity(&draft));
}

#[test]
fn decrement_stops_at_one() {
    let mut draft = submittable(3);
    assert!(!can_decrement_quantity(&draft));
    draft.quantity = 2;
    assert!(can_decrement_quantity(&draft));
}

#[test]
fn clamp_accepts_only_in_range_values() {
    assert_eq!(clamp_quantity_input(1, 3), Some(1));
    assert_eq!(clamp_quantity_input(3, 3), Some(3));
    assert_eq!(clamp_quantity_input(0, 3), None);
    assert_eq!(clamp_quantity_input(-2, 3), None);
    assert_eq!(clamp_quantity_input(5, 3), None);
    assert_eq!(clamp_quantity_input(i64::MAX, u32::MAX), None);
}

#[test]
fn parse_quantity_rejects_non_numeric_text() {
    assert_eq!(parse_quantity_input(" 2 ", 3), Some(2));
    assert_eq!(parse_quantity_input("two", 3), None);
    assert_eq!(parse_quantity_input("", 3), None);
}
