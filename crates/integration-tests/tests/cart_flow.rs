//! Integration tests for the cart flow.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The shop server running (cargo run -p printworks-server)
//! - At least one admin user (pw-cli admin create ...)
//!
//! Run with: cargo test -p printworks-integration-tests -- --ignored

use printworks_integration_tests::{base_url, session_client};
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

/// Log in as the test admin and return the authenticated client.
async fn admin_client() -> Client {
    let client = session_client();
    let base = base_url();

    let email =
        std::env::var("TEST_ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".to_string());
    let password =
        std::env::var("TEST_ADMIN_PASSWORD").unwrap_or_else(|_| "admin-password".to_string());

    let resp = client
        .post(format!("{base}/api/auth/login"))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("login request failed");
    assert_eq!(resp.status(), StatusCode::OK, "admin login failed");

    client
}

/// Test helper: create a product with variants via the admin API.
async fn create_sized_product(client: &Client, name: &str, sizes: &Value) -> Value {
    let base = base_url();
    let form = reqwest::multipart::Form::new()
        .text("name", name.to_string())
        .text("description", "integration test product")
        .text("price", "40.00")
        .text("sizes", sizes.to_string());

    let resp = client
        .post(format!("{base}/api/admin/products"))
        .multipart(form)
        .send()
        .await
        .expect("create product failed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    resp.json().await.expect("product body")
}

/// Test helper: delete a product via the admin API.
async fn delete_product(client: &Client, id: &str) {
    let base = base_url();
    let _ = client
        .delete(format!("{base}/api/admin/products/{id}"))
        .send()
        .await;
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_zero_quantity_size_is_omitted_and_rejected() {
    let admin = admin_client().await;

    // Only the 8x10 row should persist; 11x14 has zero stock and is omitted.
    let product = create_sized_product(
        &admin,
        "Omission Check",
        &json!([
            { "templateName": "8x10", "dimensions": "8x10", "checked": true, "quantity": 2, "additionalPrice": "0" },
            { "templateName": "11x14", "dimensions": "11x14", "checked": true, "quantity": 0, "additionalPrice": "5" },
        ]),
    )
    .await;

    let variants = product["variants"].as_array().expect("variants array");
    assert_eq!(variants.len(), 1);
    assert_eq!(variants[0]["label"], "8x10");

    // Adding the omitted size must be rejected: the variant does not exist.
    let shopper = session_client();
    let base = base_url();
    let resp = shopper
        .post(format!("{base}/api/cart/add"))
        .json(&json!({
            "productId": product["id"],
            "quantity": 1,
            "size": "11x14",
        }))
        .send()
        .await
        .expect("add request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    delete_product(&admin, product["id"].as_str().expect("id")).await;
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_capacity_is_enforced_across_adds() {
    let admin = admin_client().await;
    let product = create_sized_product(
        &admin,
        "Capacity Check",
        &json!([
            { "templateName": "8x10", "dimensions": "8x10", "checked": true, "quantity": 3, "additionalPrice": "0" },
        ]),
    )
    .await;
    let product_id = product["id"].as_str().expect("id").to_owned();

    let shopper = session_client();
    let base = base_url();
    let add = |quantity: u32| {
        let shopper = shopper.clone();
        let base = base.clone();
        let product_id = product_id.clone();
        async move {
            shopper
                .post(format!("{base}/api/cart/add"))
                .json(&json!({ "productId": product_id, "quantity": quantity, "size": "8x10" }))
                .send()
                .await
                .expect("add request failed")
        }
    };

    assert_eq!(add(2).await.status(), StatusCode::OK);

    // The overshooting add is rejected whole; the cart keeps quantity 2.
    let rejected = add(2).await;
    assert_eq!(rejected.status(), StatusCode::CONFLICT);
    let body: Value = rejected.json().await.expect("error body");
    assert_eq!(body["message"], "only 3 available");

    let cart: Value = shopper
        .get(format!("{base}/api/cart"))
        .send()
        .await
        .expect("cart request failed")
        .json()
        .await
        .expect("cart body");
    assert_eq!(cart["items"][0]["quantity"], 2);

    // Topping up to exactly the stock still works.
    assert_eq!(add(1).await.status(), StatusCode::OK);

    delete_product(&admin, &product_id).await;
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_variant_lines_stay_distinct_and_remove_is_exact() {
    let admin = admin_client().await;
    let product = create_sized_product(
        &admin,
        "Identity Check",
        &json!([
            { "templateName": "8x10", "dimensions": "8x10", "checked": true, "quantity": 5, "additionalPrice": "0" },
            { "templateName": "11x14", "dimensions": "11x14", "checked": true, "quantity": 5, "additionalPrice": "5" },
        ]),
    )
    .await;
    let product_id = product["id"].as_str().expect("id").to_owned();

    let shopper = session_client();
    let base = base_url();

    for size in ["8x10", "11x14"] {
        let resp = shopper
            .post(format!("{base}/api/cart/add"))
            .json(&json!({ "productId": product_id, "quantity": 1, "size": size }))
            .send()
            .await
            .expect("add request failed");
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let cart: Value = shopper
        .get(format!("{base}/api/cart"))
        .send()
        .await
        .expect("cart request failed")
        .json()
        .await
        .expect("cart body");
    assert_eq!(cart["items"].as_array().expect("items").len(), 2);

    // Removing one size leaves exactly the other.
    let resp = shopper
        .delete(format!("{base}/api/cart/remove/{product_id}?size=8x10"))
        .send()
        .await
        .expect("remove request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    let cart: Value = resp.json().await.expect("cart body");
    let items = cart["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["variantLabel"], "11x14");

    delete_product(&admin, &product_id).await;
}
