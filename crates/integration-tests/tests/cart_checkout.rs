//! Integration tests for the cart and the three-step checkout.

use axum::http::StatusCode;
use kinnk_integration_tests::TestContext;

const SHIPPING: &[(&str, &str)] = &[
    ("firstName", "Ada"),
    ("lastName", "Lovelace"),
    ("email", "ada@example.com"),
    ("phone", "555-0100"),
    ("street", "1 Analytical Way"),
    ("apartment", ""),
    ("city", "Portland"),
    ("state", "OR"),
    ("zipCode", "97201"),
    ("country", "US"),
];

const PAYMENT: &[(&str, &str)] = &[
    ("cardholderName", "Ada Lovelace"),
    ("cardNumber", "4242 4242 4242 4242"),
    ("expiryDate", "12/30"),
    ("cvv", "123"),
];

async fn add_two_black_tees(ctx: &mut TestContext) {
    let resp = ctx
        .post_form(
            "/cart/add",
            &[
                ("product_id", "prod-001"),
                ("size", "M"),
                ("color", "Black"),
                ("quantity", "2"),
            ],
        )
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/cart"));
}

// ============================================================================
// Cart
// ============================================================================

#[tokio::test]
async fn test_add_to_cart_computes_totals() {
    let mut ctx = TestContext::new();
    add_two_black_tees(&mut ctx).await;

    let resp = ctx.get("/cart").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Essential Tee Black"));
    assert!(resp.body.contains("M / Black"));
    // 59.98 + 4.80 tax + 9.99 shipping
    assert!(resp.body.contains("$59.98"));
    assert!(resp.body.contains("$4.80"));
    assert!(resp.body.contains("$74.77"));
    assert!(resp.body.contains("Add $15.02 more for free shipping"));

    let resp = ctx.get("/cart/count").await;
    assert!(resp.body.contains(">2<"));
    assert!(ctx.event_names().contains(&"add_to_cart".to_string()));
}

#[tokio::test]
async fn test_same_variant_merges_and_update_to_zero_removes() {
    let mut ctx = TestContext::new();
    add_two_black_tees(&mut ctx).await;
    add_two_black_tees(&mut ctx).await;

    let resp = ctx.get("/cart/count").await;
    assert!(resp.body.contains(">4<"));

    ctx.post_form(
        "/cart/update",
        &[
            ("product_id", "prod-001"),
            ("size", "M"),
            ("color", "Black"),
            ("quantity", "0"),
        ],
    )
    .await;

    let resp = ctx.get("/cart").await;
    assert!(resp.body.contains("Your cart is empty"));
    assert!(ctx.event_names().contains(&"remove_from_cart".to_string()));
}

#[tokio::test]
async fn test_out_of_stock_product_is_not_added() {
    let mut ctx = TestContext::new();
    let resp = ctx
        .post_form("/cart/add", &[("product_id", "prod-009")])
        .await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    let location = resp.location.unwrap_or_default();
    assert!(location.starts_with("/products/canvas-tote?error="));

    let resp = ctx.get(&location).await;
    assert!(resp.body.contains("This product is out of stock"));

    let resp = ctx.get("/cart").await;
    assert!(resp.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_add_unknown_product_is_not_found() {
    let mut ctx = TestContext::new();
    let resp = ctx
        .post_form("/cart/add", &[("product_id", "prod-missing")])
        .await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_clear_cart() {
    let mut ctx = TestContext::new();
    add_two_black_tees(&mut ctx).await;

    ctx.post_form("/cart/clear", &[]).await;

    let resp = ctx.get("/cart/count").await;
    assert!(!resp.body.contains("cart-count"));
}

// ============================================================================
// Checkout
// ============================================================================

#[tokio::test]
async fn test_checkout_with_empty_cart_redirects_to_cart() {
    let mut ctx = TestContext::new();
    let resp = ctx.get("/checkout").await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/cart"));
}

#[tokio::test]
async fn test_checkout_flow_reaches_confirmation() {
    let mut ctx = TestContext::new();
    add_two_black_tees(&mut ctx).await;

    let resp = ctx.get("/checkout").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Continue to payment"));

    let resp = ctx.post_form("/checkout/shipping", SHIPPING).await;
    assert_eq!(resp.location.as_deref(), Some("/checkout"));
    let resp = ctx.get("/checkout").await;
    assert!(resp.body.contains("Place order"));
    assert!(resp.body.contains("1 Analytical Way"));

    let resp = ctx.post_form("/checkout/place-order", PAYMENT).await;
    assert_eq!(resp.location.as_deref(), Some("/checkout"));

    let resp = ctx.get("/checkout").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Thank you for your order"));
    assert!(resp.body.contains("order-"));
    assert!(resp.body.contains("$74.77"));

    let names = ctx.event_names();
    assert!(names.contains(&"begin_checkout".to_string()));
    assert!(names.contains(&"purchase".to_string()));

    // The cart is emptied and the confirmation is shown only once
    let resp = ctx.get("/cart/count").await;
    assert!(!resp.body.contains("cart-count"));
    let resp = ctx.get("/checkout").await;
    assert_eq!(resp.location.as_deref(), Some("/cart"));
}

#[tokio::test]
async fn test_incomplete_shipping_stays_on_shipping_step() {
    let mut ctx = TestContext::new();
    add_two_black_tees(&mut ctx).await;

    ctx.post_form("/checkout/shipping", &[("firstName", "Ada"), ("country", "CA")])
        .await;

    let resp = ctx.get("/checkout").await;
    assert!(resp.body.contains("Please fill in"));
    assert!(resp.body.contains("Continue to payment"));
    assert!(resp.body.contains(r#"value="Ada""#));
}

#[tokio::test]
async fn test_back_from_payment_keeps_address() {
    let mut ctx = TestContext::new();
    add_two_black_tees(&mut ctx).await;
    ctx.post_form("/checkout/shipping", SHIPPING).await;

    ctx.post_form("/checkout/back", &[]).await;

    let resp = ctx.get("/checkout").await;
    assert!(resp.body.contains("Continue to payment"));
    assert!(resp.body.contains(r#"value="Portland""#));
}

#[tokio::test]
async fn test_incomplete_payment_is_rejected() {
    let mut ctx = TestContext::new();
    add_two_black_tees(&mut ctx).await;
    ctx.post_form("/checkout/shipping", SHIPPING).await;

    ctx.post_form("/checkout/place-order", &[("cardholderName", "Ada")])
        .await;

    let resp = ctx.get("/checkout").await;
    assert!(resp.body.contains("Place order"));
    assert!(resp.body.contains("Please fill in"));
    assert!(!ctx.event_names().contains(&"purchase".to_string()));
}
