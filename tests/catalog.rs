// tests/catalog.rs

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn product_lifecycle() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;

    let res = app
        .request(
            "POST",
            "/api/admin/products",
            Some(json!({
                "category": "curtains",
                "name": "Linen sheer",
                "description": "Light-filtering linen curtain",
                "image": "/uploads/linen.jpg",
                "features": ["washable", "made to measure"],
            })),
            Some(&cookie),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    let id = res.body["id"].as_str().unwrap().to_string();
    assert_eq!(res.body["features"], json!(["washable", "made to measure"]));
    assert!(res.body["createdAt"].is_string());

    let res = app.get("/api/products", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body.as_array().unwrap().len(), 1);

    let res = app
        .request(
            "PUT",
            &format!("/api/admin/products/{id}"),
            Some(json!({ "name": "Linen sheer XL" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "Linen sheer XL");
    assert_eq!(res.body["category"], "curtains");
    assert_eq!(res.body["image"], "/uploads/linen.jpg");

    let res = app
        .request(
            "PUT",
            &format!("/api/admin/products/{id}"),
            Some(json!({ "image": "" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body["image"].is_null());
    assert_eq!(res.body["name"], "Linen sheer XL");

    let res = app
        .request("DELETE", &format!("/api/admin/products/{id}"), None, Some(&cookie))
        .await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let res = app.get(&format!("/api/admin/products/{id}"), Some(&cookie)).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body["error"], "Product not found");

    let res = app
        .request("DELETE", &format!("/api/admin/products/{id}"), None, Some(&cookie))
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn products_filter_by_category_newest_first() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;

    for (category, name) in [("curtains", "Velvet"), ("blinds", "Roller"), ("curtains", "Linen")] {
        let res = app
            .request(
                "POST",
                "/api/admin/products",
                Some(json!({ "category": category, "name": name, "description": "x" })),
                Some(&cookie),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED);
    }

    let res = app.get("/api/products?category=curtains", None).await;
    let names: Vec<&str> = res.body.as_array().unwrap().iter().map(|p| p["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Linen", "Velvet"]);

    let res = app.get("/api/products?category=", None).await;
    assert_eq!(res.body.as_array().unwrap().len(), 3);

    let res = app.get("/api/products?category=shutters", None).await;
    assert_eq!(res.body, json!([]));
}

#[tokio::test]
async fn invalid_product_payloads_are_rejected() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;

    let res = app
        .request(
            "POST",
            "/api/admin/products",
            Some(json!({ "category": "", "name": "No category", "description": "x" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "One or more fields are invalid.");
    assert!(res.body["details"]["category"].is_array());

    let res = app
        .request(
            "POST",
            "/api/admin/products",
            Some(json!({ "name": "Missing category" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

}

#[tokio::test]
async fn malformed_ids_get_a_json_error() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;

    let res = app.get("/api/admin/products/not-a-uuid", Some(&cookie)).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["error"].as_str().is_some_and(|e| !e.is_empty()));

    let res = app
        .request("DELETE", "/api/admin/portfolio/1234", None, Some(&cookie))
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["error"].is_string());
}

#[tokio::test]
async fn updating_a_missing_product_is_not_found() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;

    let res = app
        .request(
            "PUT",
            "/api/admin/products/00000000-0000-0000-0000-000000000000",
            Some(json!({ "name": "Ghost" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn portfolio_items_clear_optional_fields_with_empty_strings() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;

    let res = app
        .request(
            "POST",
            "/api/admin/portfolio",
            Some(json!({
                "title": "Seaside villa",
                "client": "Rossi family",
                "location": "Rimini",
                "category": "residential",
            })),
            Some(&cookie),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    let id = res.body["id"].as_str().unwrap().to_string();

    let res = app
        .request(
            "PUT",
            &format!("/api/admin/portfolio/{id}"),
            Some(json!({ "client": "", "location": "Riccione" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body["client"].is_null());
    assert_eq!(res.body["location"], "Riccione");
    assert_eq!(res.body["category"], "residential");

    let res = app.get("/api/portfolio", None).await;
    assert_eq!(res.body[0]["title"], "Seaside villa");
}

#[tokio::test]
async fn brochures_are_public_and_managed_by_admins() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;

    let res = app
        .request(
            "POST",
            "/api/admin/brochures",
            Some(json!({
                "title": "2025 collection",
                "description": "Full catalogue",
                "pdfPath": "/brochures/2025.pdf",
            })),
            Some(&cookie),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED);
    let id = res.body["id"].as_str().unwrap().to_string();

    let res = app.get("/api/brochures", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body[0]["pdfPath"], "/brochures/2025.pdf");

    let res = app
        .request(
            "PUT",
            &format!("/api/admin/brochures/{id}"),
            Some(json!({ "pdfPath": "" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);

    let res = app
        .request("DELETE", &format!("/api/admin/brochures/{id}"), None, Some(&cookie))
        .await;
    assert_eq!(res.status, StatusCode::NO_CONTENT);

    let res = app.get("/api/brochures", None).await;
    assert_eq!(res.body, json!([]));
}

async fn create(app: &TestApp, cookie: &str, uri: &str, body: serde_json::Value) -> String {
    let res = app.request("POST", uri, Some(body), Some(cookie)).await;
    assert_eq!(res.status, StatusCode::CREATED);
    res.body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn single_items_are_public() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;

    let product = create(
        &app,
        &cookie,
        "/api/admin/products",
        json!({ "category": "blinds", "name": "Roller Blind", "description": "Daylight control" }),
    )
    .await;
    let item = create(&app, &cookie, "/api/admin/portfolio", json!({ "title": "Loft" })).await;
    let brochure = create(
        &app,
        &cookie,
        "/api/admin/brochures",
        json!({ "title": "Fabrics", "description": "Swatches", "pdfPath": "/b/fabrics.pdf" }),
    )
    .await;

    let res = app.get(&format!("/api/products/{product}"), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "Roller Blind");

    let res = app.get(&format!("/api/portfolio/{item}"), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["title"], "Loft");

    let res = app.get(&format!("/api/brochures/{brochure}"), None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["pdfPath"], "/b/fabrics.pdf");

    let missing = "00000000-0000-0000-0000-000000000000";
    for uri in [
        format!("/api/products/{missing}"),
        format!("/api/portfolio/{missing}"),
        format!("/api/brochures/{missing}"),
    ] {
        let res = app.get(&uri, None).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn search_is_case_insensitive_and_treats_wildcards_literally() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;

    create(
        &app,
        &cookie,
        "/api/admin/products",
        json!({ "category": "blinds", "name": "Roller Blind", "description": "Blackout fabric" }),
    )
    .await;
    create(
        &app,
        &cookie,
        "/api/admin/products",
        json!({ "category": "curtains", "name": "Linen Curtain", "description": "100% linen" }),
    )
    .await;

    let res = app.get("/api/products/search?q=BLIND", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body.as_array().unwrap().len(), 1);
    assert_eq!(res.body[0]["name"], "Roller Blind");

    let res = app.get("/api/products/search?q=%25", None).await;
    assert_eq!(res.body.as_array().unwrap().len(), 1);
    assert_eq!(res.body[0]["name"], "Linen Curtain");

    let res = app.get("/api/products/search?q=_", None).await;
    assert_eq!(res.body, json!([]));

    let res = app.get("/api/products/search?q=", None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["details"]["q"].is_array());

    let res = app.get("/api/products/search", None).await;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert!(res.body["error"].is_string());
}

#[tokio::test]
async fn portfolio_and_brochures_are_searchable() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;

    create(
        &app,
        &cookie,
        "/api/admin/portfolio",
        json!({ "title": "Seaside villa", "client": "Rossi family" }),
    )
    .await;
    create(&app, &cookie, "/api/admin/portfolio", json!({ "title": "City office" })).await;
    create(
        &app,
        &cookie,
        "/api/admin/brochures",
        json!({ "title": "Outdoor awnings", "description": "Summer range", "pdfPath": "/b/awnings.pdf" }),
    )
    .await;

    let res = app.get("/api/portfolio/search?q=rossi", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body.as_array().unwrap().len(), 1);
    assert_eq!(res.body[0]["title"], "Seaside villa");

    let res = app.get("/api/brochures/search?q=summer", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body[0]["title"], "Outdoor awnings");

    let res = app.get("/api/brochures/search?q=winter", None).await;
    assert_eq!(res.body, json!([]));
}

#[tokio::test]
async fn categories_are_distinct_sorted_and_admin_only() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;

    for category in ["curtains", "blinds", "curtains"] {
        create(
            &app,
            &cookie,
            "/api/admin/products",
            json!({ "category": category, "name": "P", "description": "D" }),
        )
        .await;
    }
    for category in [Some("residential"), None, Some("commercial")] {
        create(
            &app,
            &cookie,
            "/api/admin/portfolio",
            json!({ "title": "Job", "category": category }),
        )
        .await;
    }

    let res = app.get("/api/admin/products/categories", Some(&cookie)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({ "categories": ["blinds", "curtains"] }));

    let res = app.get("/api/admin/portfolio/categories", Some(&cookie)).await;
    assert_eq!(res.body, json!({ "categories": ["commercial", "residential"] }));

    let res = app.get("/api/admin/products/categories", None).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app.get("/api/portfolio?category=commercial", None).await;
    assert_eq!(res.body.as_array().unwrap().len(), 1);
    let res = app.get("/api/portfolio", None).await;
    assert_eq!(res.body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn brochure_stats_count_brochures() {
    let app = TestApp::spawn().await;
    let cookie = app.login().await;

    let res = app.get("/api/admin/brochures/stats", Some(&cookie)).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, json!({ "totalBrochures": 0 }));

    create(
        &app,
        &cookie,
        "/api/admin/brochures",
        json!({ "title": "Catalogue", "description": "All products", "pdfPath": "/b/all.pdf" }),
    )
    .await;

    let res = app.get("/api/admin/brochures/stats", Some(&cookie)).await;
    assert_eq!(res.body, json!({ "totalBrochures": 1 }));
}
