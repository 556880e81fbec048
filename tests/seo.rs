// tests/seo.rs

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn missing_page_is_404_publicly_and_a_template_for_admins() {
    let app = TestApp::spawn().await;

    let res = app.get("/api/seo/about", None).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let cookie = app.login().await;
    let res = app.get("/api/admin/seo/about", Some(&cookie)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.body,
        json!({
            "page": "about",
            "title": "",
            "description": "",
            "ogTitle": null,
            "ogDescription": null,
            "keywords": [],
        })
    );
}

#[tokio::test]
async fn upsert_replaces_and_update_merges() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;

    let res = app
        .request(
            "POST",
            "/api/admin/seo",
            Some(json!({
                "page": "home",
                "title": "Curtains and blinds",
                "description": "Made-to-measure window dressing",
                "ogTitle": "Nowest",
                "keywords": ["curtains", "blinds"],
            })),
            Some(&cookie),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    let id = res.body["id"].clone();

    let res = app
        .request(
            "POST",
            "/api/admin/seo",
            Some(json!({
                "page": "home",
                "title": "Window dressing",
                "description": "Curtains, blinds and shutters",
            })),
            Some(&cookie),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["id"], id);
    assert!(res.body["ogTitle"].is_null());
    assert_eq!(res.body["keywords"], json!([]));

    let res = app
        .request(
            "PUT",
            "/api/admin/seo/home",
            Some(json!({ "keywords": ["shutters"], "ogTitle": "Nowest home" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["title"], "Window dressing");
    assert_eq!(res.body["keywords"], json!(["shutters"]));
    assert_eq!(res.body["ogTitle"], "Nowest home");

    let res = app.get("/api/seo/home", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["ogTitle"], "Nowest home");
}

#[tokio::test]
async fn updating_or_deleting_an_unknown_page_is_not_found() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;

    let res = app
        .request("PUT", "/api/admin/seo/contact", Some(json!({ "title": "Contact" })), Some(&cookie))
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    let res = app.request("DELETE", "/api/admin/seo/contact", None, Some(&cookie)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_is_ordered_by_page() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;

    for page in ["products", "about", "home"] {
        let res = app
            .request(
                "POST",
                "/api/admin/seo",
                Some(json!({ "page": page, "title": page, "description": page })),
                Some(&cookie),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK);
    }

    let res = app.get("/api/admin/seo", Some(&cookie)).await;
    let pages: Vec<&str> = res.body.as_array().unwrap().iter().map(|s| s["page"].as_str().unwrap()).collect();
    assert_eq!(pages, vec!["about", "home", "products"]);

    let res = app.request("DELETE", "/api/admin/seo/about", None, Some(&cookie)).await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);
    let res = app.get("/api/admin/seo", Some(&cookie)).await;
    assert_eq!(res.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn pages_lists_configured_keys() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;

    let res = app.get("/api/admin/seo/pages", Some(&cookie)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({ "pages": [] }));

    for page in ["portfolio", "contact"] {
        app.request(
            "POST",
            "/api/admin/seo",
            Some(json!({ "page": page, "title": page, "description": page })),
            Some(&cookie),
        )
        .await;
    }

    let res = app.get("/api/admin/seo/pages", Some(&cookie)).await;
    assert_eq!(res.body, json!({ "pages": ["contact", "portfolio"] }));
}
