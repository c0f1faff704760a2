//! End-to-end checkout flows against a wiremock commerce API.

use pizzeria_client::{Checkout, CheckoutError, CheckoutState, PowerClient};
use pizzeria_core::{Address, Customer};
use rust_decimal::Decimal;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> PowerClient {
    PowerClient::with_base_urls(base_url, base_url, "pizzeria-test/0.1", Some(5))
        .expect("client construction should not fail")
}

fn sample_address() -> Address {
    Address::new("1 Main St", "City", "Region", "A1A1A1", "House")
}

async fn mount_locator(server: &MockServer) {
    let body = serde_json::json!({
        "Address": {"Street": "1 MAIN ST", "City": "CITY", "Region": "REGION", "PostalCode": "A1A1A1"},
        "Stores": [
            {"StoreID": "10090", "AddressDescription": "9 First Ave\nCity", "IsOnlineNow": true},
            {"StoreID": "10091", "AddressDescription": "5 Third Ave\nCity", "IsOnlineNow": true}
        ]
    });
    Mock::given(method("GET"))
        .and(path("/power/store-locator"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(server)
        .await;
}

async fn mount_ok(server: &MockServer, endpoint: &str, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path(endpoint))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(server)
        .await;
}

/// Drives a checkout up to the cart stage with one medium cheese/bacon pizza.
async fn checkout_with_cart(client: &PowerClient) -> Checkout<'_> {
    let mut checkout = Checkout::new(client);
    checkout.set_address(sample_address()).unwrap();
    checkout.locate_stores().await.expect("should locate stores");
    checkout.select_store(2).expect("store 2 exists");
    checkout
        .add_pizza("medium", &["cheese, bacon"])
        .expect("store is selected");
    checkout
}

#[tokio::test]
async fn full_checkout_places_order() {
    let server = MockServer::start().await;
    mount_locator(&server).await;
    mount_ok(&server, "/power/validate-order", serde_json::json!({"Status": 0})).await;
    mount_ok(
        &server,
        "/power/price-order",
        serde_json::json!({"Status": 0, "Order": {"Amounts": {"Payment": 20.15}}}),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/power/place-order"))
        .and(body_partial_json(serde_json::json!({
            "Order": {
                "StoreID": "10091",
                "FirstName": "Ada",
                "Phone": "6045550123",
                "Address": {"Street": "1 MAIN ST", "Type": "House"},
                "Amounts": {"Payment": 20.15}
            }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"Status": 1, "Order": {"OrderID": "X1"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut checkout = checkout_with_cart(&client).await;
    assert_eq!(checkout.state(), CheckoutState::CartBuilt);
    assert_eq!(checkout.order().store_id(), "10091");
    assert!(checkout.candidates().is_empty());

    checkout.validate().await.expect("validation should succeed");
    assert!(checkout.order().products_locked());

    let total = checkout.price().await.expect("pricing should succeed");
    assert_eq!(total, Decimal::new(2015, 2));

    checkout.confirm(true).unwrap();
    checkout
        .set_customer(Customer::new("Ada", "Lovelace", "ada@example.com", "604-555-0123"))
        .unwrap();
    let placed = checkout.place().await.expect("placement should succeed");

    assert_eq!(placed.order_id.as_deref(), Some("X1"));
    assert_eq!(checkout.state(), CheckoutState::Placed);
}

#[tokio::test]
async fn failed_validation_keeps_cart_open() {
    let server = MockServer::start().await;
    mount_locator(&server).await;
    Mock::given(method("POST"))
        .and(path("/power/validate-order"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut checkout = checkout_with_cart(&client).await;

    let err = checkout.validate().await.unwrap_err();
    assert!(matches!(err, CheckoutError::Deserialize { .. }));
    assert_eq!(checkout.state(), CheckoutState::CartBuilt);
    assert!(!checkout.order().products_locked());

    checkout
        .add_pizza("l", &["ham"])
        .expect("cart is still open after a failed validation");
    assert_eq!(checkout.order().products().len(), 2);
    assert_eq!(checkout.order().products()[1].id, 1);
}

#[tokio::test]
async fn validation_failure_status_does_not_block_checkout() {
    let server = MockServer::start().await;
    mount_locator(&server).await;
    mount_ok(
        &server,
        "/power/validate-order",
        serde_json::json!({"Status": -1, "StatusItems": [{"Code": "StoreClosed"}]}),
    )
    .await;

    let client = test_client(&server.uri());
    let mut checkout = checkout_with_cart(&client).await;

    checkout
        .validate()
        .await
        .expect("a parseable validation response advances the checkout");
    assert_eq!(checkout.state(), CheckoutState::Validated);
    assert!(checkout.order().products_locked());
}

#[tokio::test]
async fn failed_pricing_stays_validated() {
    let server = MockServer::start().await;
    mount_locator(&server).await;
    mount_ok(&server, "/power/validate-order", serde_json::json!({"Status": 0})).await;
    Mock::given(method("POST"))
        .and(path("/power/price-order"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut checkout = checkout_with_cart(&client).await;
    checkout.validate().await.unwrap();

    assert!(matches!(checkout.price().await, Err(CheckoutError::Http(_))));
    assert_eq!(checkout.state(), CheckoutState::Validated);
    assert!(checkout.order().price_quote().is_none());
}

#[tokio::test]
async fn declined_confirmation_aborts_without_placing() {
    let server = MockServer::start().await;
    mount_locator(&server).await;
    mount_ok(&server, "/power/validate-order", serde_json::json!({"Status": 0})).await;
    mount_ok(
        &server,
        "/power/price-order",
        serde_json::json!({"Order": {"Amounts": {"Payment": 9.99}}}),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/power/place-order"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let mut checkout = checkout_with_cart(&client).await;
    checkout.validate().await.unwrap();
    checkout.price().await.unwrap();

    assert!(matches!(checkout.confirm(false), Err(CheckoutError::UserAbort)));
    assert_eq!(checkout.state(), CheckoutState::Aborted);
    assert!(matches!(
        checkout.place().await,
        Err(CheckoutError::OutOfOrder {
            state: CheckoutState::Aborted,
            ..
        })
    ));
}

#[tokio::test]
async fn invalid_store_choice_keeps_candidates() {
    let server = MockServer::start().await;
    mount_locator(&server).await;

    let client = test_client(&server.uri());
    let mut checkout = Checkout::new(&client);
    checkout.set_address(sample_address()).unwrap();
    let stores = checkout.locate_stores().await.unwrap();
    assert_eq!(stores.len(), 2);

    assert!(matches!(
        checkout.select_store(3),
        Err(CheckoutError::InvalidSelection {
            choice: 3,
            available: 2
        })
    ));
    assert_eq!(checkout.state(), CheckoutState::StoresLocated);
    assert_eq!(checkout.candidates().len(), 2);
    assert_eq!(checkout.select_store(1).unwrap().id, "10090");
}

#[tokio::test]
async fn placing_without_customer_phone_fails() {
    let server = MockServer::start().await;
    mount_locator(&server).await;
    mount_ok(&server, "/power/validate-order", serde_json::json!({"Status": 0})).await;
    mount_ok(
        &server,
        "/power/price-order",
        serde_json::json!({"Order": {"Amounts": {"Payment": 9.99}}}),
    )
    .await;

    let client = test_client(&server.uri());
    let mut checkout = checkout_with_cart(&client).await;
    checkout.validate().await.unwrap();
    checkout.price().await.unwrap();
    checkout.confirm(true).unwrap();

    assert!(matches!(
        checkout.place().await,
        Err(CheckoutError::Order(_))
    ));
    assert_eq!(checkout.state(), CheckoutState::Confirmed);
}
