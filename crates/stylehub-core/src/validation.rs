//! Submission gate and quantity predicates for the order form.
//!
//! Nothing here mutates an [`OrderDraft`]; the purchase workflow decides what
//! to do with each verdict.

use thiserror::Error;

use crate::availability::max_quantity;
use crate::order::{OrderDraft, ShippingField, SubmissionStatus};

/// Why a draft cannot be submitted. `Display` is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill out all required fields")]
    MissingVariant,

    #[error("Please fill out all required fields")]
    MissingFields(Vec<ShippingField>),

    #[error("Only {available} items available for the selected size.")]
    InsufficientStock { available: u32 },

    #[error("an order is already being submitted")]
    SubmissionInFlight,
}

/// Full submit-time check, reporting the first failing rule.
///
/// # Errors
///
/// Returns the [`ValidationError`] describing why the draft is not
/// submittable.
pub fn validate_submission(draft: &OrderDraft) -> Result<(), ValidationError> {
    if draft.status == SubmissionStatus::Submitting {
        return Err(ValidationError::SubmissionInFlight);
    }
    let variant = draft
        .variant
        .as_ref()
        .ok_or(ValidationError::MissingVariant)?;
    let missing = draft.shipping.missing_fields();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }
    if draft.quantity > variant.quantity {
        return Err(ValidationError::InsufficientStock {
            available: variant.quantity,
        });
    }
    Ok(())
}

/// `true` iff a variant is selected, every shipping field is filled, the
/// quantity fits the variant's stock, and no submission is in flight.
#[must_use]
pub fn can_submit(draft: &OrderDraft) -> bool {
    validate_submission(draft).is_ok()
}

#[must_use]
pub fn can_increment_quantity(draft: &OrderDraft) -> bool {
    draft.quantity < max_quantity(draft.variant.as_ref())
}

#[must_use]
pub fn can_decrement_quantity(draft: &OrderDraft) -> bool {
    draft.quantity > 1
}

/// Accepts a typed quantity only when it lies in `1..=max`.
///
/// Out-of-range input is rejected rather than clamped so the caller keeps
/// its previous valid quantity.
#[must_use]
pub fn clamp_quantity_input(raw: i64, max: u32) -> Option<u32> {
    u32::try_from(raw).ok().filter(|q| (1..=max).contains(q))
}

/// Parses raw text from the quantity input and applies
/// [`clamp_quantity_input`]. Non-numeric text is rejected.
#[must_use]
pub fn parse_quantity_input(raw: &str, max: u32) -> Option<u32> {
    raw.trim()
        .parse::<i64>()
        .ok()
        .and_then(|q| clamp_quantity_input(q, max))
}

#[cfg(test)]
#[path = "validation_test.rs"]
mod tests;
