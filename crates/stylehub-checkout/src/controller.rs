//! Async driver for [`PurchaseWorkflow`].
//!
//! The controller spawns the one order request per submit, the deferred open
//! signal, and the post-success auto-close timer. Each of these reports back
//! as a [`CheckoutEvent`] on an internal channel. The caller pulls events with
//! [`CheckoutController::next_event`] and applies them with
//! [`CheckoutController::handle_event`], so all state changes happen on the
//! caller's task.

use std::sync::Arc;
use std::time::Duration;

use stylehub_api::{ApiError, OrderAck, StorefrontApi};
use stylehub_core::{AppConfig, Item, ShippingRates};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::tracking::{EventSink, TrackedEvent, TrackingEvent, TracingSink};
use crate::workflow::{
    CloseReason, CompletionOutcome, PurchaseWorkflow, SessionId, SubmissionTicket, SubmitOutcome,
    WorkflowState,
};

/// Completion events produced by background tasks.
#[derive(Debug)]
pub enum CheckoutEvent {
    OpenElapsed(SessionId),
    SubmissionFinished {
        ticket: SubmissionTicket,
        result: Result<OrderAck, ApiError>,
    },
    AutoCloseElapsed(SessionId),
}

/// What applying a [`CheckoutEvent`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Opened,
    Completed(CompletionOutcome),
    AutoClosed,
    /// The event referred to a session that is no longer current.
    Ignored,
}

pub struct CheckoutController<A> {
    api: A,
    workflow: PurchaseWorkflow,
    sink: Arc<dyn EventSink>,
    open_delay: Duration,
    auto_close_delay: Duration,
    events_tx: mpsc::UnboundedSender<CheckoutEvent>,
    events_rx: mpsc::UnboundedReceiver<CheckoutEvent>,
    auto_close: Option<JoinHandle<()>>,
}

impl<A> CheckoutController<A>
where
    A: StorefrontApi + Clone + 'static,
{
    #[must_use]
    pub fn new(
        api: A,
        rates: ShippingRates,
        open_delay: Duration,
        auto_close_delay: Duration,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            api,
            workflow: PurchaseWorkflow::new(rates),
            sink: Arc::new(TracingSink),
            open_delay,
            auto_close_delay,
            events_tx,
            events_rx,
            auto_close: None,
        }
    }

    #[must_use]
    pub fn from_config(api: A, config: &AppConfig) -> Self {
        Self::new(
            api,
            config.shipping_rates,
            config.open_delay(),
            config.auto_close_delay(),
        )
    }

    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    #[must_use]
    pub fn workflow(&self) -> &PurchaseWorkflow {
        &self.workflow
    }

    /// Direct access for form edits (variant, quantity, shipping fields).
    pub fn workflow_mut(&mut self) -> &mut PurchaseWorkflow {
        &mut self.workflow
    }

    #[must_use]
    pub fn state(&self) -> WorkflowState {
        self.workflow.state()
    }

    /// Opens a purchase session for `item` and schedules the open signal.
    pub fn open(&mut self, item: Item) -> SessionId {
        self.cancel_auto_close();
        self.record(TrackingEvent::buy_now_click(&item));
        let session = self.workflow.open_session(item);

        let tx = self.events_tx.clone();
        let delay = self.open_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(CheckoutEvent::OpenElapsed(session));
        });
        session
    }

    /// Validates the draft and, if it passes, spawns exactly one order
    /// request. A submit while one is in flight is ignored.
    pub fn submit(&mut self) -> SubmitOutcome {
        let outcome = self.workflow.submit();
        if let SubmitOutcome::Dispatched(pending) = &outcome {
            let api = self.api.clone();
            let tx = self.events_tx.clone();
            let ticket = pending.ticket;
            let order = pending.order.clone();
            tracing::debug!(
                session = %ticket.session(),
                item_id = %order.item_id,
                "dispatching order"
            );
            tokio::spawn(async move {
                let result = api.create_order(&order).await;
                let _ = tx.send(CheckoutEvent::SubmissionFinished { ticket, result });
            });
        }
        outcome
    }

    /// Closes the current session and cancels a pending auto-close. An
    /// in-flight order request is left to finish; its response is dropped.
    pub fn close(&mut self, reason: CloseReason) -> Option<SessionId> {
        self.cancel_auto_close();
        self.workflow.close_session(reason)
    }

    /// Waits for the next background event.
    pub async fn next_event(&mut self) -> Option<CheckoutEvent> {
        self.events_rx.recv().await
    }

    pub fn handle_event(&mut self, event: CheckoutEvent) -> Applied {
        match event {
            CheckoutEvent::OpenElapsed(session) => {
                if self.workflow.mark_visible(session) {
                    Applied::Opened
                } else {
                    Applied::Ignored
                }
            }
            CheckoutEvent::SubmissionFinished { ticket, result } => {
                let outcome = self.workflow.complete_submission(ticket, result);
                if let CompletionOutcome::Succeeded { session, order } = &outcome {
                    if let Some(draft) = self.workflow.draft() {
                        let size = draft.variant.as_ref().map_or("", |v| v.name.as_str());
                        self.record(TrackingEvent::order_complete(&draft.item, size, order));
                    }
                    self.schedule_auto_close(*session);
                }
                if outcome == CompletionOutcome::Stale {
                    Applied::Ignored
                } else {
                    Applied::Completed(outcome)
                }
            }
            CheckoutEvent::AutoCloseElapsed(session) => {
                if self.workflow.auto_close(session) {
                    self.auto_close = None;
                    Applied::AutoClosed
                } else {
                    Applied::Ignored
                }
            }
        }
    }

    /// Pulls and applies one event.
    pub async fn step(&mut self) -> Option<Applied> {
        let event = self.next_event().await?;
        Some(self.handle_event(event))
    }

    /// Applies events until no order is in flight. Returns the state then.
    pub async fn settle_submission(&mut self) -> WorkflowState {
        while self.workflow.state() == WorkflowState::Submitting {
            if self.step().await.is_none() {
                break;
            }
        }
        self.workflow.state()
    }

    /// Applies events until a succeeded session has auto-closed.
    pub async fn await_auto_close(&mut self) {
        while self.workflow.state() == WorkflowState::Succeeded {
            if self.step().await.is_none() {
                break;
            }
        }
    }

    fn schedule_auto_close(&mut self, session: SessionId) {
        self.cancel_auto_close();
        let tx = self.events_tx.clone();
        let delay = self.auto_close_delay;
        self.auto_close = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(CheckoutEvent::AutoCloseElapsed(session));
        }));
    }

    fn cancel_auto_close(&mut self) {
        if let Some(handle) = self.auto_close.take() {
            handle.abort();
        }
    }

    fn record(&self, event: TrackingEvent) {
        self.sink.record(&TrackedEvent::now(event));
    }
}
