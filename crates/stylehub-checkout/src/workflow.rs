//! Purchase session state machine.
//!
//! [`PurchaseWorkflow`] owns the one open [`OrderDraft`] and changes it only
//! through the named transitions below. It performs no I/O. [`PurchaseWorkflow::submit`]
//! hands back the order to send along with a [`SubmissionTicket`], and the
//! caller routes the response back through
//! [`PurchaseWorkflow::complete_submission`]. Responses and timers that carry
//! a ticket or session id from an earlier session are dropped.
//!
//! ```text
//! Closed ─open─▶ Selecting ─variant─▶ VariantChosen ─submit─▶ Submitting
//!                                          ▲                    │    │
//!                                          └──edit── Failed ◀───┘    ▼
//! Closed ◀──────────────auto-close / close────────────────── Succeeded
//! ```

use stylehub_api::{ApiError, OrderAck};
use stylehub_core::availability::{is_available, max_quantity};
use stylehub_core::validation::{
    can_decrement_quantity, can_increment_quantity, can_submit, clamp_quantity_input,
    parse_quantity_input, validate_submission,
};
use stylehub_core::{
    DeliveryZone, Item, OrderDraft, OrderSubmission, OrderSummary, ShippingField, ShippingInfo,
    ShippingRates, SubmissionStatus, ValidationError, VariantId,
};

pub const ORDER_SUCCESS_MESSAGE: &str =
    "Your order has been placed successfully! We'll contact you shortly.";

/// Identity of one purchase session, from open to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "session-{}", self.0)
    }
}

/// Correlates an order response with the submit attempt that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionTicket {
    session: SessionId,
    attempt: u32,
}

impl SubmissionTicket {
    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }
}

/// How a session was dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Cancel,
    Backdrop,
    Escape,
    AutoClose,
}

impl std::fmt::Display for CloseReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CloseReason::Cancel => write!(f, "cancel"),
            CloseReason::Backdrop => write!(f, "backdrop"),
            CloseReason::Escape => write!(f, "escape"),
            CloseReason::AutoClose => write!(f, "auto-close"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Closed,
    Selecting,
    VariantChosen,
    Submitting,
    Succeeded,
    Failed,
}

/// An order ready to be sent exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOrder {
    pub ticket: SubmissionTicket,
    pub order: OrderSubmission,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed; the caller must send `order` and report back.
    Dispatched(PendingOrder),
    /// Validation failed; the draft now carries the message. No request.
    Rejected(ValidationError),
    /// No session is open or a submission is already in flight.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// The order was accepted; the session should auto-close.
    Succeeded {
        session: SessionId,
        order: OrderSubmission,
    },
    Failed {
        session: SessionId,
        message: String,
    },
    /// The response belongs to a closed or superseded session.
    Stale,
}

#[derive(Debug)]
struct Session {
    id: SessionId,
    draft: OrderDraft,
    visible: bool,
    attempt: u32,
    in_flight: Option<OrderSubmission>,
}

/// Owner of the purchase session and its [`OrderDraft`].
#[derive(Debug)]
pub struct PurchaseWorkflow {
    rates: ShippingRates,
    next_session: u64,
    session: Option<Session>,
    remembered: ShippingInfo,
}

impl PurchaseWorkflow {
    #[must_use]
    pub fn new(rates: ShippingRates) -> Self {
        Self {
            rates,
            next_session: 1,
            session: None,
            remembered: ShippingInfo::default(),
        }
    }

    #[must_use]
    pub fn rates(&self) -> &ShippingRates {
        &self.rates
    }

    #[must_use]
    pub fn state(&self) -> WorkflowState {
        let Some(session) = &self.session else {
            return WorkflowState::Closed;
        };
        match session.draft.status {
            SubmissionStatus::Submitting => WorkflowState::Submitting,
            SubmissionStatus::Succeeded => WorkflowState::Succeeded,
            SubmissionStatus::Failed => WorkflowState::Failed,
            SubmissionStatus::Idle if session.draft.variant.is_some() => {
                WorkflowState::VariantChosen
            }
            SubmissionStatus::Idle => WorkflowState::Selecting,
        }
    }

    #[must_use]
    pub fn session_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(|s| s.id)
    }

    #[must_use]
    pub fn draft(&self) -> Option<&OrderDraft> {
        self.session.as_ref().map(|s| &s.draft)
    }

    /// `true` once the deferred open signal for the current session fired.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.visible)
    }

    /// Shipping details that will prefill the next session.
    #[must_use]
    pub fn remembered_shipping(&self) -> &ShippingInfo {
        &self.remembered
    }

    #[must_use]
    pub fn summary(&self) -> Option<OrderSummary> {
        self.draft().map(|d| d.summary(&self.rates))
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.draft().is_some_and(can_submit)
    }

    #[must_use]
    pub fn can_increment_quantity(&self) -> bool {
        self.draft().is_some_and(can_increment_quantity)
    }

    #[must_use]
    pub fn can_decrement_quantity(&self) -> bool {
        self.draft().is_some_and(can_decrement_quantity)
    }

    /// Starts a session for `item`, replacing any open one.
    ///
    /// Shipping fields start from the last-used defaults.
    pub fn open_session(&mut self, item: Item) -> SessionId {
        if self.session.is_some() {
            self.close_session(CloseReason::Cancel);
        }
        let id = SessionId(self.next_session);
        self.next_session += 1;
        tracing::debug!(session = %id, item_id = %item.id, "purchase session opened");
        self.session = Some(Session {
            id,
            draft: OrderDraft::new(item, self.remembered.clone()),
            visible: false,
            attempt: 0,
            in_flight: None,
        });
        id
    }

    /// Applies the deferred visual-open signal. Ignored for stale sessions.
    pub fn mark_visible(&mut self, session: SessionId) -> bool {
        match self.session.as_mut() {
            Some(s) if s.id == session => {
                s.visible = true;
                true
            }
            _ => false,
        }
    }

    /// Selects a variant by id and resets the quantity to 1.
    ///
    /// Unknown or out-of-stock variants leave the selection unchanged.
    pub fn select_variant(&mut self, id: VariantId) -> bool {
        self.edit(|draft| {
            let Some(variant) = draft.item.variant(id).filter(|v| is_available(v)).cloned() else {
                return false;
            };
            draft.variant = Some(variant);
            draft.quantity = 1;
            true
        })
    }

    /// Sets the quantity if `raw` lies within `1..=max_quantity`; otherwise
    /// keeps the previous value.
    pub fn change_quantity(&mut self, raw: i64) -> bool {
        self.edit(|draft| {
            match clamp_quantity_input(raw, max_quantity(draft.variant.as_ref())) {
                Some(q) => {
                    draft.quantity = q;
                    true
                }
                None => false,
            }
        })
    }

    /// Like [`PurchaseWorkflow::change_quantity`] for typed text.
    pub fn change_quantity_text(&mut self, raw: &str) -> bool {
        self.edit(|draft| {
            match parse_quantity_input(raw, max_quantity(draft.variant.as_ref())) {
                Some(q) => {
                    draft.quantity = q;
                    true
                }
                None => false,
            }
        })
    }

    pub fn increment_quantity(&mut self) -> bool {
        self.edit(|draft| {
            if !can_increment_quantity(draft) {
                return false;
            }
            draft.quantity += 1;
            true
        })
    }

    pub fn decrement_quantity(&mut self) -> bool {
        self.edit(|draft| {
            if !can_decrement_quantity(draft) {
                return false;
            }
            draft.quantity -= 1;
            true
        })
    }

    /// Free-text assignment. Validation waits until submit.
    pub fn update_shipping_field(&mut self, field: ShippingField, value: impl Into<String>) -> bool {
        let value = value.into();
        self.edit(|draft| {
            draft.shipping.set_field(field, value);
            true
        })
    }

    pub fn set_zone(&mut self, zone: DeliveryZone) -> bool {
        self.edit(|draft| {
            draft.shipping.zone = zone;
            true
        })
    }

    /// Clears the session's error message.
    pub fn dismiss_error(&mut self) -> bool {
        match self.session.as_mut() {
            Some(s) if s.draft.error.is_some() => {
                s.draft.error = None;
                true
            }
            _ => false,
        }
    }

    /// Validates the draft and, when it passes, moves to `Submitting` and
    /// returns the one order to send.
    pub fn submit(&mut self) -> SubmitOutcome {
        let Some(session) = self.session.as_mut() else {
            return SubmitOutcome::Ignored;
        };
        match session.draft.status {
            SubmissionStatus::Submitting => {
                tracing::debug!(session = %session.id, "submit ignored: order already in flight");
                return SubmitOutcome::Ignored;
            }
            SubmissionStatus::Succeeded => {
                tracing::debug!(session = %session.id, "submit ignored: order already placed");
                return SubmitOutcome::Ignored;
            }
            _ => {}
        }

        let draft = &mut session.draft;
        let order = match validate_submission(draft)
            .and_then(|()| OrderSubmission::from_draft(draft, &self.rates))
        {
            Ok(order) => order,
            Err(err) => {
                tracing::debug!(session = %session.id, error = %err, "order form rejected");
                draft.status = SubmissionStatus::Failed;
                draft.error = Some(err.to_string());
                draft.success = None;
                return SubmitOutcome::Rejected(err);
            }
        };

        session.attempt += 1;
        draft.status = SubmissionStatus::Submitting;
        draft.error = None;
        draft.success = None;
        session.in_flight = Some(order.clone());

        SubmitOutcome::Dispatched(PendingOrder {
            ticket: SubmissionTicket {
                session: session.id,
                attempt: session.attempt,
            },
            order,
        })
    }

    /// Routes an order response back to the session that issued it.
    ///
    /// Responses for a closed or replaced session, or for an earlier
    /// attempt, are discarded and leave all state untouched.
    pub fn complete_submission(
        &mut self,
        ticket: SubmissionTicket,
        result: Result<OrderAck, ApiError>,
    ) -> CompletionOutcome {
        let current = self.session.as_mut().filter(|s| {
            s.id == ticket.session
                && s.attempt == ticket.attempt
                && s.draft.status == SubmissionStatus::Submitting
        });
        let Some(session) = current else {
            tracing::debug!(session = %ticket.session, "discarding stale order response");
            return CompletionOutcome::Stale;
        };
        let Some(order) = session.in_flight.take() else {
            return CompletionOutcome::Stale;
        };

        let draft = &mut session.draft;
        match result {
            Ok(_) => {
                draft.status = SubmissionStatus::Succeeded;
                draft.success = Some(ORDER_SUCCESS_MESSAGE.to_string());
                draft.error = None;
                draft.shipping = ShippingInfo::default();
                self.remembered = ShippingInfo::default();
                tracing::info!(session = %session.id, item_id = %order.item_id, "order placed");
                CompletionOutcome::Succeeded {
                    session: session.id,
                    order,
                }
            }
            Err(err) => {
                let message = err.user_message();
                tracing::warn!(session = %session.id, error = %err, "order submission failed");
                draft.status = SubmissionStatus::Failed;
                draft.error = Some(message.clone());
                CompletionOutcome::Failed {
                    session: session.id,
                    message,
                }
            }
        }
    }

    /// Fires the post-success auto-close. Ignored unless `session` is still
    /// open and succeeded.
    pub fn auto_close(&mut self, session: SessionId) -> bool {
        let due = self
            .session
            .as_ref()
            .is_some_and(|s| s.id == session && s.draft.status == SubmissionStatus::Succeeded);
        if !due {
            tracing::debug!(%session, "auto-close ignored");
            return false;
        }
        self.close_session(CloseReason::AutoClose).is_some()
    }

    /// Closes the current session from any state and clears the draft.
    ///
    /// An in-flight request keeps running; its response will be discarded.
    /// The draft's shipping details become the next session's defaults.
    pub fn close_session(&mut self, reason: CloseReason) -> Option<SessionId> {
        let session = self.session.take()?;
        if session.draft.status == SubmissionStatus::Submitting {
            tracing::debug!(session = %session.id, "closing with an order still in flight");
        }
        tracing::debug!(session = %session.id, %reason, "purchase session closed");
        self.remembered = session.draft.shipping;
        Some(session.id)
    }

    /// Runs `f` against an editable draft. The form is locked while an order
    /// is in flight or after it succeeded. A successful edit clears a failed
    /// status so the user can resubmit.
    fn edit(&mut self, f: impl FnOnce(&mut OrderDraft) -> bool) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let draft = &mut session.draft;
        if matches!(
            draft.status,
            SubmissionStatus::Submitting | SubmissionStatus::Succeeded
        ) {
            return false;
        }
        let changed = f(draft);
        if changed && draft.status == SubmissionStatus::Failed {
            draft.status = SubmissionStatus::Idle;
        }
        changed
    }
}

#[cfg(test)]
#[path = "workflow_test.rs"]
mod tests;
