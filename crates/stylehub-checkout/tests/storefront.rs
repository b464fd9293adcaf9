//! End-to-end flows against a wiremock commerce API.

use std::time::Duration;

use stylehub_api::{CatalogKind, StorefrontClient};
use stylehub_checkout::{
    load_faqs, load_settings, CatalogBrowser, CatalogStatus, CheckoutController, DetailState,
    ProductDetailViewer, SubmitOutcome, WorkflowState, DETAIL_LOAD_FAILED_MESSAGE,
};
use stylehub_core::{ItemId, ShippingField, ShippingRates, VariantId};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> StorefrontClient {
    StorefrontClient::new(base_url, 5, "stylehub-test/0.1")
        .expect("client construction should not fail")
}

fn featured_body(count: i64) -> serde_json::Value {
    let data: Vec<_> = (1..=count)
        .map(|id| {
            serde_json::json!({
                "id": id,
                "title": format!("Item {id}"),
                "brand": "StyleHub",
                "price": 25,
                "image": format!("{id}.jpg"),
                "hoverImage": format!("{id}-alt.jpg"),
                "featured": true,
                "sizes": [{ "id": id * 10, "size_id": id * 100, "name": "M", "quantity": id % 3 }]
            })
        })
        .collect();
    serde_json::json!({ "status": "success", "data": data })
}

#[tokio::test]
async fn catalog_loads_with_show_more_window() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/featured"))
        .respond_with(ResponseTemplate::new(200).set_body_json(featured_body(10)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut browser = CatalogBrowser::new(CatalogKind::Featured, 8);
    assert_eq!(browser.load(&client).await, 10);
    assert_eq!(browser.status(), CatalogStatus::Loaded);
    assert_eq!(browser.visible_items().len(), 8);
    assert!(browser.has_more());

    browser.toggle_show_all();
    assert_eq!(browser.visible_items().len(), 10);
}

#[tokio::test]
async fn catalog_fetch_error_renders_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/collections"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut browser = CatalogBrowser::new(CatalogKind::Collections, 8);
    assert_eq!(browser.load(&client).await, 0);
    assert_eq!(browser.status(), CatalogStatus::Failed);
    assert!(browser.is_empty());
}

#[tokio::test]
async fn catalog_unparseable_body_renders_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/collections"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "products": [] })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut browser = CatalogBrowser::new(CatalogKind::Collections, 8);
    assert_eq!(browser.load(&client).await, 0);
    assert_eq!(browser.status(), CatalogStatus::Failed);
}

#[tokio::test]
async fn detail_viewer_loads_and_fails_gracefully() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "name": "Wool Coat",
            "description": "Double-breasted.",
            "brand": { "name": "StyleHub" },
            "images": [{ "url": "coat.jpg", "is_primary": true }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/5"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut viewer = ProductDetailViewer::new();

    viewer.load(&client, ItemId(4), None).await;
    assert_eq!(viewer.detail().map(|d| d.name.as_str()), Some("Wool Coat"));
    assert_eq!(viewer.active_image(), Some("coat.jpg"));

    let state = viewer.load(&client, ItemId(5), None).await;
    assert!(matches!(
        state,
        DetailState::Failed { id: ItemId(5), message } if message == DETAIL_LOAD_FAILED_MESSAGE
    ));
}

#[tokio::test]
async fn site_content_falls_back_on_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/faqs"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/settings"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(load_faqs(&client).await.is_empty());
    assert_eq!(load_settings(&client).await, stylehub_core::SiteSettings::default());
}

#[tokio::test]
async fn checkout_sends_one_order_and_auto_closes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": "success" }))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/products/featured"))
        .respond_with(ResponseTemplate::new(200).set_body_json(featured_body(2)))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut browser = CatalogBrowser::new(CatalogKind::Featured, 8);
    browser.load(&client).await;
    let item = browser.item(ItemId(1)).cloned().expect("item 1 should be listed");

    let mut ctl = CheckoutController::new(
        client,
        ShippingRates::default(),
        Duration::from_millis(5),
        Duration::from_millis(150),
    );
    ctl.open(item);
    let wf = ctl.workflow_mut();
    assert!(wf.select_variant(VariantId(10)));
    wf.update_shipping_field(ShippingField::Name, "Rahim");
    wf.update_shipping_field(ShippingField::Phone, "01711111111");
    wf.update_shipping_field(ShippingField::Address, "House 4, Road 2");
    wf.update_shipping_field(ShippingField::City, "Dhaka");

    assert!(matches!(ctl.submit(), SubmitOutcome::Dispatched(_)));
    assert_eq!(ctl.submit(), SubmitOutcome::Ignored);

    assert_eq!(ctl.settle_submission().await, WorkflowState::Succeeded);
    ctl.await_auto_close().await;
    assert_eq!(ctl.state(), WorkflowState::Closed);
    // `expect(1)` on the orders mock is verified when the server drops.
}
