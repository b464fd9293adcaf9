use super::*;

fn test_client(base_url: &str) -> StorefrontClient {
    StorefrontClient::new(base_url, 30, "stylehub-test/0.1")
        .expect("client construction should not fail")
}

#[test]
fn endpoint_appends_path_to_base() {
    let client = test_client("https://shop.example/api");
    let url = client.endpoint("products/collections").unwrap();
    assert_eq!(url.as_str(), "https://shop.example/api/products/collections");
}

#[test]
fn endpoint_strips_trailing_slashes() {
    let client = test_client("https://shop.example/api//");
    let url = client.endpoint("orders").unwrap();
    assert_eq!(url.as_str(), "https://shop.example/api/orders");
}

#[test]
fn endpoint_formats_product_id() {
    let client = test_client("https://shop.example/api");
    let url = client.endpoint(&format!("products/{}", ItemId(42))).unwrap();
    assert_eq!(url.as_str(), "https://shop.example/api/products/42");
}

#[test]
fn catalog_kind_paths() {
    let client = test_client("https://shop.example");
    assert_eq!(
        client.endpoint(CatalogKind::Featured.path()).unwrap().as_str(),
        "https://shop.example/products/featured"
    );
}

#[test]
fn new_rejects_unparseable_base_url() {
    let result = StorefrontClient::new("not a url", 30, "stylehub-test/0.1");
    assert!(
        matches!(result, Err(ApiError::InvalidBaseUrl { ref base_url, .. }) if base_url == "not a url"),
        "expected InvalidBaseUrl, got: {result:?}"
    );
}
