//! Admin product management, served against the fake REST API.

#![allow(clippy::unwrap_used)]

use reqwest::{Client, StatusCode};
use stay_young_integration_tests::{
    DUPLICATE_NAME, FakeApi, PRODUCT_ID, browser, spawn_admin, spawn_admin_for, spawn_fake_api,
    unreachable_api_url,
};

const TOKEN: &str = "test-admin-token";

async fn signed_in() -> (FakeApi, String, Client) {
    let api = spawn_fake_api().await;
    let base = spawn_admin(&api).await;
    let client = browser();

    let resp = client
        .post(format!("{base}/admin/login"))
        .form(&[("token", TOKEN)])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.url().path(), "/admin/products");

    (api, base, client)
}

fn product_form(name: &str) -> Vec<(&'static str, String)> {
    vec![
        ("name", name.to_string()),
        ("subName", "Snail mucin essence".to_string()),
        ("category", "c1".to_string()),
        ("category", "c2".to_string()),
        ("detailTags", "CRUELTY_FREE".to_string()),
        ("image1", "https://cdn.example.com/essence-1.jpg".to_string()),
        ("image2", String::new()),
        ("image3", "https://cdn.example.com/essence-3.jpg".to_string()),
        ("image4", String::new()),
        ("image5", String::new()),
        ("discountedPrice", "899".to_string()),
        ("price", "1100".to_string()),
        ("stockAvailable", "25".to_string()),
        ("description", "Lightweight essence.".to_string()),
    ]
}

#[tokio::test]
async fn test_products_require_access_token() {
    let api = spawn_fake_api().await;
    let base = spawn_admin(&api).await;

    let resp = browser()
        .get(format!("{base}/admin/products"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.url().path(), "/admin/login");
    assert!(resp.text().await.unwrap().contains("Access Token"));
}

#[tokio::test]
async fn test_empty_token_rejected() {
    let api = spawn_fake_api().await;
    let base = spawn_admin(&api).await;

    let resp = browser()
        .post(format!("{base}/admin/login"))
        .form(&[("token", "   ")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.url().path(), "/admin/login");
    assert!(resp.text().await.unwrap().contains("Access token is required"));
}

#[tokio::test]
async fn test_products_table_lists_api_products() {
    let (_api, base, client) = signed_in().await;

    let body = client
        .get(format!("{base}/admin/products"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Rice Toner"));
    assert!(body.contains(&format!("/admin/products/{PRODUCT_ID}/edit")));
}

#[tokio::test]
async fn test_new_form_lists_categories_and_tags() {
    let (_api, base, client) = signed_in().await;

    let body = client
        .get(format!("{base}/admin/products/new"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Product Information"));
    assert!(body.contains("Select Category"));
    assert!(body.contains("serum"));
    assert!(body.contains("Select Detail Tags"));
    assert!(body.contains("Vegan Friendly"));
    assert!(body.contains("Enter Image 5"));
    assert!(body.contains("Launch Product"));
}

#[tokio::test]
async fn test_invalid_form_shows_errors_without_saving() {
    let (api, base, client) = signed_in().await;

    let mut form = product_form("");
    form.retain(|(key, _)| *key != "category");

    let resp = client
        .post(format!("{base}/admin/products"))
        .form(&form)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = resp.text().await.unwrap();
    assert!(body.contains("Name is required"));
    assert!(body.contains("At least one category must be selected"));
    assert!(body.contains("Snail mucin essence"));
    assert!(api.writes().is_empty());
}

#[tokio::test]
async fn test_create_posts_draft_with_bearer_token() {
    let (api, base, client) = signed_in().await;

    let resp = client
        .post(format!("{base}/admin/products"))
        .form(&product_form("Snail Essence"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.unwrap();
    assert!(body.contains("Product Added Successfully"));
    // Form is reset after a successful create
    assert!(!body.contains("Snail mucin essence"));

    let writes = api.writes();
    assert_eq!(writes.len(), 1);
    let write = &writes[0];
    assert_eq!(write.method, reqwest::Method::POST);
    assert_eq!(write.path, "/api/product");
    assert_eq!(
        write.authorization.as_deref(),
        Some(format!("Bearer {TOKEN}").as_str())
    );
    assert_eq!(write.body["name"], "Snail Essence");
    assert_eq!(write.body["subName"], "Snail mucin essence");
    assert_eq!(write.body["category"], serde_json::json!(["c1", "c2"]));
    assert_eq!(write.body["detailTags"], serde_json::json!(["CRUELTY_FREE"]));
    assert_eq!(
        write.body["images"],
        serde_json::json!([
            "https://cdn.example.com/essence-1.jpg",
            "https://cdn.example.com/essence-3.jpg"
        ])
    );
    assert_eq!(write.body["stockAvailable"], 25);
}

#[tokio::test]
async fn test_api_error_message_is_shown_and_form_kept() {
    let (_api, base, client) = signed_in().await;

    let body = client
        .post(format!("{base}/admin/products"))
        .form(&product_form(DUPLICATE_NAME))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Product with this name already exists"));
    assert!(body.contains(DUPLICATE_NAME));
}

#[tokio::test]
async fn test_edit_form_prefilled_from_product() {
    let (_api, base, client) = signed_in().await;

    let body = client
        .get(format!("{base}/admin/products/{PRODUCT_ID}/edit"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Update Product"));
    assert!(body.contains("value=\"Rice Toner\""));
    assert!(body.contains("Image 1 Preview"));
    assert!(body.contains(&format!("action=\"/admin/products/{PRODUCT_ID}\"")));
}

#[tokio::test]
async fn test_update_patches_and_redirects_with_toast() {
    let (api, base, client) = signed_in().await;

    let resp = client
        .post(format!("{base}/admin/products/{PRODUCT_ID}"))
        .form(&product_form("Rice Toner"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.url().path(), "/admin/products");
    assert!(resp.text().await.unwrap().contains("Product Updated Successfully"));

    let writes = api.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].method, reqwest::Method::PATCH);
    assert_eq!(writes[0].path, format!("/api/product/{PRODUCT_ID}"));
}

#[tokio::test]
async fn test_delete_sends_delete() {
    let (api, base, client) = signed_in().await;

    let resp = client
        .post(format!("{base}/admin/products/{PRODUCT_ID}/delete"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.url().path(), "/admin/products");
    assert!(resp.text().await.unwrap().contains("Product Deleted Successfully"));

    let writes = api.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].method, reqwest::Method::DELETE);
}

#[tokio::test]
async fn test_preview_renders_images_without_saving() {
    let (api, base, client) = signed_in().await;

    let body = client
        .post(format!("{base}/admin/products/preview"))
        .form(&product_form("Snail Essence"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Image 1 Preview"));
    assert!(body.contains("Image 3 Preview"));
    assert!(!body.contains("Image 2 Preview"));
    assert!(api.writes().is_empty());
}

#[tokio::test]
async fn test_logout_clears_token() {
    let (_api, base, client) = signed_in().await;

    let resp = client
        .post(format!("{base}/admin/logout"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.url().path(), "/admin/login");

    let resp = client
        .get(format!("{base}/admin/products"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.url().path(), "/admin/login");
}

#[tokio::test]
async fn test_unreachable_api_keeps_form_with_generic_toast() {
    let base = spawn_admin_for(&unreachable_api_url().await).await;
    let client = browser();

    client
        .post(format!("{base}/admin/login"))
        .form(&[("token", TOKEN)])
        .send()
        .await
        .unwrap();

    let resp = client
        .post(format!("{base}/admin/products"))
        .form(&product_form("Snail Essence"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.unwrap();
    assert!(body.contains("An error occurred. Please try again."));
    assert!(body.contains(r#"value="Snail Essence""#));
    assert!(body.contains(r#"value="https://cdn.example.com/essence-1.jpg""#));
    assert!(body.contains("Lightweight essence."));
}
