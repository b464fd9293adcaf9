//! `CheckoutController` tests against an in-memory API on tokio's paused clock.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rust_decimal::Decimal;
use stylehub_api::{ApiError, CatalogKind, OrderAck, StorefrontApi};
use stylehub_checkout::{
    Applied, CheckoutController, CloseReason, EventSink, SubmitOutcome, TrackedEvent,
    TrackingEvent, WorkflowState,
};
use stylehub_core::{
    Faq, Item, ItemDetail, ItemId, OrderSubmission, ShippingField, ShippingRates, SiteSettings,
    Variant, VariantId,
};

const OPEN_DELAY: Duration = Duration::from_millis(50);
const AUTO_CLOSE: Duration = Duration::from_secs(3);

#[derive(Clone)]
struct FakeApi {
    calls: Arc<AtomicU32>,
    responses: Arc<Mutex<VecDeque<Result<OrderAck, ApiError>>>>,
    latency: Duration,
}

impl FakeApi {
    fn new(latency: Duration) -> Self {
        Self {
            calls: Arc::new(AtomicU32::new(0)),
            responses: Arc::new(Mutex::new(VecDeque::new())),
            latency,
        }
    }

    fn push_response(&self, response: Result<OrderAck, ApiError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    fn order_calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl StorefrontApi for FakeApi {
    async fn fetch_items(&self, _kind: CatalogKind) -> Result<Vec<Item>, ApiError> {
        Ok(Vec::new())
    }

    async fn fetch_item_detail(&self, _id: ItemId) -> Result<ItemDetail, ApiError> {
        Err(ApiError::Rejected { message: None })
    }

    async fn fetch_faqs(&self) -> Result<Vec<Faq>, ApiError> {
        Ok(Vec::new())
    }

    async fn fetch_settings(&self) -> Result<SiteSettings, ApiError> {
        Ok(SiteSettings::default())
    }

    async fn create_order(&self, _order: &OrderSubmission) -> Result<OrderAck, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.latency).await;
        let next = self.responses.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(OrderAck::default()))
    }
}

#[derive(Default)]
struct RecordingSink(Mutex<Vec<TrackedEvent>>);

impl RecordingSink {
    fn names(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().iter().map(|e| e.event.name()).collect()
    }
}

impl EventSink for RecordingSink {
    fn record(&self, event: &TrackedEvent) {
        self.0.lock().unwrap().push(event.clone());
    }
}

fn item(id: i64) -> Item {
    Item {
        id: ItemId(id),
        title: "Linen Shirt".to_string(),
        brand: "StyleHub".to_string(),
        price: Decimal::new(2999, 2),
        list_price: None,
        image: "shirt.jpg".to_string(),
        hover_image: None,
        featured: false,
        variants: vec![Variant {
            id: VariantId(2),
            size_id: VariantId(20),
            name: "M".to_string(),
            quantity: 3,
        }],
    }
}

fn controller(api: &FakeApi, sink: &Arc<RecordingSink>) -> CheckoutController<FakeApi> {
    CheckoutController::new(api.clone(), ShippingRates::default(), OPEN_DELAY, AUTO_CLOSE)
        .with_sink(sink.clone())
}

fn fill_form(ctl: &mut CheckoutController<FakeApi>) {
    let wf = ctl.workflow_mut();
    assert!(wf.select_variant(VariantId(2)));
    wf.update_shipping_field(ShippingField::Name, "Rahim");
    wf.update_shipping_field(ShippingField::Phone, "01711111111");
    wf.update_shipping_field(ShippingField::Address, "House 4, Road 2");
    wf.update_shipping_field(ShippingField::City, "Dhaka");
}

#[tokio::test(start_paused = true)]
async fn rapid_double_submit_sends_one_request() {
    let api = FakeApi::new(Duration::from_millis(200));
    let sink = Arc::new(RecordingSink::default());
    let mut ctl = controller(&api, &sink);

    ctl.open(item(7));
    fill_form(&mut ctl);

    assert!(matches!(ctl.submit(), SubmitOutcome::Dispatched(_)));
    assert_eq!(ctl.submit(), SubmitOutcome::Ignored);

    assert_eq!(ctl.settle_submission().await, WorkflowState::Succeeded);
    assert_eq!(api.order_calls(), 1);
    assert!(ctl.workflow().is_visible());
}

#[tokio::test(start_paused = true)]
async fn failed_submit_keeps_draft_then_retry_succeeds_and_auto_closes() {
    let api = FakeApi::new(Duration::from_millis(200));
    api.push_response(Err(ApiError::UnexpectedStatus {
        status: 422,
        url: "https://shop.example/api/orders".to_string(),
        message: Some("Out of stock".to_string()),
    }));
    api.push_response(Ok(OrderAck::default()));
    let sink = Arc::new(RecordingSink::default());
    let mut ctl = controller(&api, &sink);

    ctl.open(item(7));
    fill_form(&mut ctl);
    ctl.submit();
    assert_eq!(ctl.settle_submission().await, WorkflowState::Failed);

    let draft = ctl.workflow().draft().unwrap();
    assert_eq!(draft.error.as_deref(), Some("Out of stock"));
    assert_eq!(draft.shipping.name, "Rahim");
    assert_eq!(draft.shipping.city, "Dhaka");

    assert!(matches!(ctl.submit(), SubmitOutcome::Dispatched(_)));
    assert_eq!(ctl.settle_submission().await, WorkflowState::Succeeded);
    assert_eq!(api.order_calls(), 2);

    let succeeded_at = tokio::time::Instant::now();
    ctl.await_auto_close().await;
    assert_eq!(ctl.state(), WorkflowState::Closed);
    assert!(succeeded_at.elapsed() >= AUTO_CLOSE);

    assert_eq!(sink.names(), vec!["buy_now_click", "order_complete"]);
}

#[tokio::test(start_paused = true)]
async fn order_complete_event_carries_order_details() {
    let api = FakeApi::new(Duration::from_millis(10));
    let sink = Arc::new(RecordingSink::default());
    let mut ctl = controller(&api, &sink);

    ctl.open(item(7));
    fill_form(&mut ctl);
    ctl.workflow_mut().change_quantity(2);
    ctl.submit();
    ctl.settle_submission().await;

    let events = sink.0.lock().unwrap();
    let last = events.last().map(|e| e.event.clone());
    assert_eq!(
        last,
        Some(TrackingEvent::OrderComplete {
            product_id: ItemId(7),
            title: "Linen Shirt".to_string(),
            price: Decimal::new(2999, 2),
            brand: "StyleHub".to_string(),
            size: "M".to_string(),
            quantity: 2,
            total_price: Decimal::new(13998, 2),
            shipping_cost: Decimal::from(80),
            customer_location: stylehub_core::DeliveryZone::DomesticNear,
        })
    );
}

#[tokio::test(start_paused = true)]
async fn late_response_after_close_leaves_new_session_alone() {
    let api = FakeApi::new(Duration::from_millis(500));
    let sink = Arc::new(RecordingSink::default());
    let mut ctl = controller(&api, &sink);

    ctl.open(item(7));
    fill_form(&mut ctl);
    assert!(matches!(ctl.submit(), SubmitOutcome::Dispatched(_)));

    ctl.close(CloseReason::Cancel);
    assert_eq!(ctl.state(), WorkflowState::Closed);

    let next = ctl.open(item(8));
    ctl.workflow_mut()
        .update_shipping_field(ShippingField::City, "Sylhet");
    let before = ctl.workflow().draft().unwrap().clone();

    // Stale open signal, fresh open signal, then the late order response.
    let mut applied = Vec::new();
    for _ in 0..3 {
        applied.push(ctl.step().await.unwrap());
    }
    assert_eq!(applied.iter().filter(|a| **a == Applied::Ignored).count(), 2);
    assert!(applied.contains(&Applied::Opened));

    assert_eq!(ctl.workflow().session_id(), Some(next));
    assert_eq!(ctl.workflow().draft().unwrap(), &before);
    assert_eq!(ctl.state(), WorkflowState::Selecting);
    assert_eq!(api.order_calls(), 1);
    assert!(!sink.names().contains(&"order_complete"));
}

#[tokio::test(start_paused = true)]
async fn submit_after_success_does_not_block_auto_close() {
    let api = FakeApi::new(Duration::from_millis(20));
    let sink = Arc::new(RecordingSink::default());
    let mut ctl = controller(&api, &sink);

    ctl.open(item(7));
    fill_form(&mut ctl);
    ctl.submit();
    assert_eq!(ctl.settle_submission().await, WorkflowState::Succeeded);

    assert_eq!(ctl.submit(), SubmitOutcome::Ignored);
    assert_eq!(ctl.state(), WorkflowState::Succeeded);

    ctl.await_auto_close().await;
    assert_eq!(ctl.state(), WorkflowState::Closed);
    assert_eq!(api.order_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn manual_close_cancels_pending_auto_close() {
    let api = FakeApi::new(Duration::from_millis(200));
    let sink = Arc::new(RecordingSink::default());
    let mut ctl = controller(&api, &sink);

    ctl.open(item(7));
    fill_form(&mut ctl);
    ctl.submit();
    assert_eq!(ctl.settle_submission().await, WorkflowState::Succeeded);

    ctl.close(CloseReason::Escape);
    ctl.open(item(8));
    assert_eq!(ctl.step().await, Some(Applied::Opened));

    // No auto-close event is left to fire against the new session.
    let quiet = tokio::time::timeout(AUTO_CLOSE * 2, ctl.step()).await;
    assert!(quiet.is_err());
    assert_eq!(ctl.state(), WorkflowState::Selecting);
}

#[tokio::test(start_paused = true)]
async fn invalid_form_never_reaches_the_network() {
    let api = FakeApi::new(Duration::from_millis(10));
    let sink = Arc::new(RecordingSink::default());
    let mut ctl = controller(&api, &sink);

    ctl.open(item(7));
    ctl.workflow_mut().select_variant(VariantId(2));

    assert!(matches!(ctl.submit(), SubmitOutcome::Rejected(_)));
    assert_eq!(ctl.state(), WorkflowState::Failed);
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(api.order_calls(), 0);
}
