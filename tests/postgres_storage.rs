// tests/postgres_storage.rs
//
// Runs the Postgres repositories against a throwaway database per test.
// Needs `DATABASE_URL` pointing at a server where the user may create databases:
//
//     cargo test --features postgres-tests --test postgres_storage

#![cfg(feature = "postgres-tests")]

use chrono::{Duration, Utc};
use nowest_backend::{
    common::error::AppError,
    db::{PgStorage, Storage},
    models::{
        analytics::NewPageView,
        brochures::CreateBrochurePayload,
        leads::{CreateLeadPayload, LeadChanges, LeadStatus},
        portfolio::{CreatePortfolioPayload, UpdatePortfolioPayload},
        products::{CreateProductPayload, UpdateProductPayload},
        seo::UpsertSeoPayload,
    },
};
use sqlx::PgPool;
use uuid::Uuid;

fn product(category: &str, name: &str, description: &str) -> CreateProductPayload {
    CreateProductPayload {
        category: category.into(),
        name: name.into(),
        description: description.into(),
        image: Some("/uploads/p.jpg".into()),
        features: vec!["Blackout".into(), "Motorised".into()],
    }
}

fn portfolio(title: &str, client: Option<&str>, category: Option<&str>) -> CreatePortfolioPayload {
    CreatePortfolioPayload {
        title: title.into(),
        description: Some("Whole-house fit-out".into()),
        image: None,
        client: client.map(str::to_owned),
        location: Some("Bologna".into()),
        category: category.map(str::to_owned),
    }
}

fn lead(name: &str) -> CreateLeadPayload {
    CreateLeadPayload {
        name: name.into(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: Some("051 123456".into()),
        project_details: "Roman blinds for the kitchen".into(),
    }
}

fn view(page: &str, agent: &str) -> NewPageView {
    NewPageView {
        page: page.into(),
        user_agent: agent.into(),
        referrer: None,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn product_round_trip_and_partial_updates(pool: PgPool) {
    let storage = PgStorage::new(pool);

    let created = storage
        .create_product(product("blinds", "Roller Blind", "Daylight control"))
        .await
        .unwrap();
    assert_eq!(storage.get_product(created.id).await.unwrap(), Some(created.clone()));
    assert_eq!(created.features, vec!["Blackout".to_string(), "Motorised".to_string()]);

    let renamed = storage
        .update_product(
            created.id,
            UpdateProductPayload {
                name: Some("Roller Blind XL".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Roller Blind XL");
    assert_eq!(renamed.image.as_deref(), Some("/uploads/p.jpg"));
    assert_eq!(renamed.category, "blinds");

    let cleared = storage
        .update_product(
            created.id,
            UpdateProductPayload {
                image: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.image, None);
    assert_eq!(cleared.name, "Roller Blind XL");

    let missing = storage
        .update_product(Uuid::new_v4(), UpdateProductPayload::default())
        .await;
    assert!(matches!(missing, Err(AppError::NotFound("Product"))));

    storage.delete_product(created.id).await.unwrap();
    assert!(storage.get_product(created.id).await.unwrap().is_none());
    assert!(matches!(
        storage.delete_product(created.id).await,
        Err(AppError::NotFound("Product"))
    ));
}

#[sqlx::test(migrations = "./migrations")]
async fn products_filter_search_and_list_categories(pool: PgPool) {
    let storage = PgStorage::new(pool);

    storage.create_product(product("curtains", "Linen Curtain", "100% linen")).await.unwrap();
    storage.create_product(product("blinds", "Venetian Blind", "Aluminium slats")).await.unwrap();
    storage.create_product(product("curtains", "Velvet Drape", "Heavy velvet")).await.unwrap();

    let curtains = storage.list_products(Some("curtains")).await.unwrap();
    let names: Vec<&str> = curtains.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Velvet Drape", "Linen Curtain"]);

    assert_eq!(
        storage.product_categories().await.unwrap(),
        vec!["blinds".to_string(), "curtains".to_string()]
    );

    let hits = storage.search_products("BLIND").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Venetian Blind");

    let percent = storage.search_products("%").await.unwrap();
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].name, "Linen Curtain");
    assert!(storage.search_products("_").await.unwrap().is_empty());

    assert_eq!(storage.count_products().await.unwrap(), 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn portfolio_nullable_columns_clear_and_keep(pool: PgPool) {
    let storage = PgStorage::new(pool);

    let item = storage
        .create_portfolio_item(portfolio("Seaside villa", Some("Rossi family"), Some("residential")))
        .await
        .unwrap();
    storage
        .create_portfolio_item(portfolio("City office", None, Some("commercial")))
        .await
        .unwrap();
    storage.create_portfolio_item(portfolio("Loft", None, None)).await.unwrap();

    let updated = storage
        .update_portfolio_item(
            item.id,
            UpdatePortfolioPayload {
                client: Some(String::new()),
                location: Some("Rimini".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.client, None);
    assert_eq!(updated.location.as_deref(), Some("Rimini"));
    assert_eq!(updated.category.as_deref(), Some("residential"));
    assert_eq!(updated.description.as_deref(), Some("Whole-house fit-out"));

    assert_eq!(
        storage.portfolio_categories().await.unwrap(),
        vec!["commercial".to_string(), "residential".to_string()]
    );
    assert_eq!(storage.list_portfolio(Some("commercial")).await.unwrap().len(), 1);
    assert_eq!(storage.list_portfolio(None).await.unwrap().len(), 3);

    let hits = storage.search_portfolio("villa").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, item.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn lead_status_maps_to_the_enum_type(pool: PgPool) {
    let storage = PgStorage::new(pool);

    let anna = storage.create_lead(lead("Anna")).await.unwrap();
    storage.create_lead(lead("Luca")).await.unwrap();
    assert_eq!(anna.status, LeadStatus::New);

    let contacted = storage.update_lead_status(anna.id, LeadStatus::Contacted).await.unwrap();
    assert_eq!(contacted.status, LeadStatus::Contacted);

    let listed = storage.list_leads(Some(LeadStatus::Contacted)).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Anna");
    assert_eq!(storage.count_leads(Some(LeadStatus::New)).await.unwrap(), 1);
    assert_eq!(storage.count_leads(None).await.unwrap(), 2);

    let edited = storage
        .update_lead(
            anna.id,
            LeadChanges {
                phone: Some(String::new()),
                status: Some(LeadStatus::Converted),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.phone, None);
    assert_eq!(edited.status, LeadStatus::Converted);
    assert_eq!(edited.email, "anna@example.com");
    assert_eq!(edited.project_details.as_deref(), Some("Roman blinds for the kitchen"));

    let missing = storage.update_lead(Uuid::new_v4(), LeadChanges::default()).await;
    assert!(matches!(missing, Err(AppError::NotFound("Lead"))));

    assert_eq!(storage.search_leads("LUCA@").await.unwrap().len(), 1);
    assert_eq!(storage.search_leads("kitchen").await.unwrap().len(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_admin_username_is_a_conflict(pool: PgPool) {
    let storage = PgStorage::new(pool);

    storage.create_admin("admin", "hash").await.unwrap();
    let err = storage.create_admin("admin", "other").await.unwrap_err();

    assert!(matches!(err, AppError::UsernameAlreadyExists));
}

#[sqlx::test(migrations = "./migrations")]
async fn seo_upsert_replaces_the_row_in_place(pool: PgPool) {
    let storage = PgStorage::new(pool);

    let first = storage
        .upsert_seo_settings(UpsertSeoPayload {
            page: "home".into(),
            title: "Home".into(),
            description: "Curtains".into(),
            og_title: Some("OG".into()),
            og_description: None,
            keywords: vec!["curtains".into()],
        })
        .await
        .unwrap();

    let second = storage
        .upsert_seo_settings(UpsertSeoPayload {
            page: "home".into(),
            title: "Welcome".into(),
            description: "Curtains and blinds".into(),
            og_title: None,
            og_description: None,
            keywords: vec![],
        })
        .await
        .unwrap();

    assert_eq!(second.id, first.id);
    assert_eq!(second.title, "Welcome");
    assert_eq!(second.og_title, None);
    assert!(second.keywords.is_empty());
    assert_eq!(storage.list_seo_settings().await.unwrap().len(), 1);

    storage.delete_seo_settings("home").await.unwrap();
    assert!(matches!(
        storage.delete_seo_settings("home").await,
        Err(AppError::NotFound(_))
    ));
}

#[sqlx::test(migrations = "./migrations")]
async fn page_view_aggregates_and_cleanup(pool: PgPool) {
    let storage = PgStorage::new(pool.clone());

    storage.create_page_view(view("/products", "a")).await.unwrap();
    storage.create_page_view(view("/products", "b")).await.unwrap();
    let old = storage.create_page_view(view("/", "a")).await.unwrap();

    sqlx::query(r#"UPDATE page_views SET "timestamp" = NOW() - INTERVAL '100 days' WHERE id = $1"#)
        .bind(old.id)
        .execute(&pool)
        .await
        .unwrap();

    let top = storage.top_pages(10, None).await.unwrap();
    assert_eq!(top[0].page, "/products");
    assert_eq!(top[0].count, 2);
    assert_eq!(storage.count_unique_visitors(None).await.unwrap(), 2);

    let since = Some(Utc::now() - Duration::days(30));
    assert_eq!(storage.count_page_views(since).await.unwrap(), 2);
    assert!(storage.page_views_for_page("/", since).await.unwrap().is_empty());

    let deleted = storage
        .delete_page_views_before(Utc::now() - Duration::days(90))
        .await
        .unwrap();
    assert_eq!(deleted, 1);
    assert_eq!(storage.count_page_views(None).await.unwrap(), 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn brochures_count_and_search(pool: PgPool) {
    let storage = PgStorage::new(pool);

    storage
        .create_brochure(CreateBrochurePayload {
            title: "Outdoor awnings".into(),
            description: "Summer range".into(),
            pdf_path: "/b/awnings.pdf".into(),
        })
        .await
        .unwrap();

    assert_eq!(storage.count_brochures().await.unwrap(), 1);
    assert_eq!(storage.search_brochures("SUMMER").await.unwrap().len(), 1);
    assert!(storage.search_brochures("winter").await.unwrap().is_empty());
}
