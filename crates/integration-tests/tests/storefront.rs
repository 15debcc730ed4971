//! Storefront pages and the session cart, served against the fake REST API.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use stay_young_integration_tests::{PRODUCT_SLUG, browser, spawn_fake_api, spawn_storefront};

#[tokio::test]
async fn test_health_and_readiness() {
    let api = spawn_fake_api().await;
    let base = spawn_storefront(&api).await;
    let client = browser();

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "ok");

    let resp = client
        .get(format!("{base}/health/ready"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_home_lists_products() {
    let api = spawn_fake_api().await;
    let base = spawn_storefront(&api).await;

    let resp = browser().get(format!("{base}/")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.unwrap();
    assert!(body.contains("Rice Toner"));
    assert!(body.contains(&format!("/product/{PRODUCT_SLUG}")));
    assert!(body.contains("17% off"));
}

#[tokio::test]
async fn test_product_detail() {
    let api = spawn_fake_api().await;
    let base = spawn_storefront(&api).await;

    let resp = browser()
        .get(format!("{base}/product/{PRODUCT_SLUG}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.unwrap();
    assert!(body.contains("<title>rice-toner | Stay Young</title>"));
    assert!(body.contains("Milky toner for glowing skin"));
    assert!(body.contains("Cruelty Free"));
    // Bare category id resolved through GET /category
    assert!(body.contains("<li>toner</li>"));
    assert!(body.contains("Add to cart"));
}

#[tokio::test]
async fn test_unknown_product_is_not_found() {
    let api = spawn_fake_api().await;
    let base = spawn_storefront(&api).await;

    let resp = browser()
        .get(format!("{base}/product/no-such-serum"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_to_cart_shows_toast_and_line() {
    let api = spawn_fake_api().await;
    let base = spawn_storefront(&api).await;
    let client = browser();

    let resp = client
        .post(format!("{base}/cart/add"))
        .form(&[("slug", PRODUCT_SLUG), ("return_to", "/products")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.url().path(), "/cart");

    let body = resp.text().await.unwrap();
    assert!(body.contains("Added to cart"));
    assert!(body.contains("Rice Toner"));

    // Toasts show once
    let body = client
        .get(format!("{base}/cart"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(!body.contains("Added to cart"));
}

#[tokio::test]
async fn test_cart_quantity_capped_at_fifteen() {
    let api = spawn_fake_api().await;
    let base = spawn_storefront(&api).await;
    let client = browser();
    let return_to = format!("/product/{PRODUCT_SLUG}");

    for _ in 0..15 {
        let resp = client
            .post(format!("{base}/cart/add"))
            .form(&[("slug", PRODUCT_SLUG), ("return_to", return_to.as_str())])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.url().path(), "/cart");
    }

    let resp = client
        .post(format!("{base}/cart/add"))
        .form(&[("slug", PRODUCT_SLUG), ("return_to", return_to.as_str())])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.url().path(), return_to);
    assert!(resp.text().await.unwrap().contains("Max quantity selected"));

    let count = client
        .get(format!("{base}/cart/count"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(count.contains(">15<"));
}

#[tokio::test]
async fn test_update_to_zero_removes_line() {
    let api = spawn_fake_api().await;
    let base = spawn_storefront(&api).await;
    let client = browser();

    client
        .post(format!("{base}/cart/add"))
        .form(&[("slug", PRODUCT_SLUG)])
        .send()
        .await
        .unwrap();

    let resp = client
        .post(format!("{base}/cart/update"))
        .form(&[("slug", PRODUCT_SLUG), ("quantity", "0")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.url().path(), "/cart");
    assert!(resp.text().await.unwrap().contains("Your cart is empty"));
}

#[tokio::test]
async fn test_invalid_quantity_shows_toast() {
    let api = spawn_fake_api().await;
    let base = spawn_storefront(&api).await;
    let client = browser();

    client
        .post(format!("{base}/cart/add"))
        .form(&[("slug", PRODUCT_SLUG)])
        .send()
        .await
        .unwrap();

    for quantity in ["-1", "", "2.5"] {
        let resp = client
            .post(format!("{base}/cart/update"))
            .form(&[("slug", PRODUCT_SLUG), ("quantity", quantity)])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK, "quantity {quantity:?}");
        assert_eq!(resp.url().path(), "/cart");

        let body = resp.text().await.unwrap();
        assert!(body.contains("Quantity must be a whole number"));
        // Line is untouched
        assert!(body.contains(r#"name="quantity" value="1""#));
    }
}
