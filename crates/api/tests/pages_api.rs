//! Integration tests for the page content endpoints.
//!
//! Each page stores its entire content as one row with per-section
//! read/update contracts; these tests exercise the round-trip, isolation,
//! default-seeding, and absence-handling guarantees end to end.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Section round trips
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn put_then_get_returns_what_was_put(pool: PgPool) {
    let app = common::build_test_app(pool);
    let payload = json!({
        "heading": "Easter at Grace",
        "subheading": "Join us Sunday at 10",
        "backgroundImage": "/images/easter.jpg",
    });

    let response = put_json(
        app.clone(),
        "/api/v1/pages/home/sections/hero",
        payload.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], payload);

    let response = get(app, "/api/v1/pages/home/sections/hero").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], payload);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_shaped_section_round_trips(pool: PgPool) {
    let app = common::build_test_app(pool);
    let payload = json!({
        "heading": "Holy Week",
        "items": [
            {"name": "Maundy Thursday", "day": "Thursday", "time": "7:00 PM"},
            {"name": "Good Friday", "day": "Friday", "time": "7:00 PM"},
        ],
    });

    let response = put_json(
        app.clone(),
        "/api/v1/pages/services-events/sections/schedule",
        payload.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, "/api/v1/pages/services-events/sections/schedule").await;
    assert_eq!(body_json(response).await["data"], payload);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn updating_one_section_never_changes_another(pool: PgPool) {
    let app = common::build_test_app(pool);
    let hero = json!({
        "heading": "H",
        "subheading": "S",
        "backgroundImage": "/h.jpg",
    });

    put_json(app.clone(), "/api/v1/pages/home/sections/hero", hero.clone()).await;
    put_json(
        app.clone(),
        "/api/v1/pages/home/sections/about",
        json!({ "title": "About", "content": "Some text" }),
    )
    .await;

    let response = get(app, "/api/v1/pages/home/sections/hero").await;
    assert_eq!(body_json(response).await["data"], hero);
}

// ---------------------------------------------------------------------------
// Absence handling and default seeding
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn absent_home_page_answers_with_defaults_without_creating_a_row(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = get(app, "/api/v1/pages/home/sections/hero").await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["heading"], "Welcome to Grace Community Church");
    assert!(data["subheading"].is_string());
    assert!(data["backgroundImage"].is_string());

    // Reads never persist.
    let count: i64 = sqlx::query_scalar("SELECT count(*) FROM home_page")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn absent_get_involved_page_is_a_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/v1/pages/get-involved/sections/hero").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert!(json["error"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn first_put_creates_the_row_and_seeds_sibling_defaults(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = put_json(
        app.clone(),
        "/api/v1/pages/home/sections/about",
        json!({ "title": "About Us", "content": "Line1\nLine2" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Exactly one row was written.
    let count: i64 = sqlx::query_scalar("SELECT count(*) FROM home_page")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);

    // The written section holds the given values...
    let row: (String, String) =
        sqlx::query_as("SELECT about_title, about_content FROM home_page")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(row.0, "About Us");
    assert_eq!(row.1, "Line1\nLine2");

    // ...and an unrelated section answers with its documented defaults.
    let response = get(app, "/api/v1/pages/home/sections/events").await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["heading"], "Upcoming Events");
    assert_eq!(data["items"], json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn put_creates_rows_even_for_404_on_absent_pages(pool: PgPool) {
    let app = common::build_test_app(pool);

    put_json(
        app.clone(),
        "/api/v1/pages/get-involved/sections/hero",
        json!({ "heading": "Get Involved", "subheading": "Serve" }),
    )
    .await;

    let response = get(app, "/api/v1/pages/get-involved/sections/contact").await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["heading"], "Contact Us");
}

// ---------------------------------------------------------------------------
// Validation and unknown slugs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn missing_required_field_fails_validation_before_persistence(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = put_json(
        app,
        "/api/v1/pages/home/sections/hero",
        json!({ "heading": "only one key" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");

    // Nothing was written.
    let count: i64 = sqlx::query_scalar("SELECT count(*) FROM home_page")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn list_field_must_be_an_array(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = put_json(
        app,
        "/api/v1/pages/home/sections/events",
        json!({ "heading": "Events", "items": "not a list" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_page_and_section_slugs_are_404(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/v1/pages/no-such-page/sections/hero").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");

    let response = get(app, "/api/v1/pages/home/sections/no-such-section").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Whole-record escape hatch
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn whole_record_export_contains_every_column(pool: PgPool) {
    let app = common::build_test_app(pool);

    put_json(
        app.clone(),
        "/api/v1/pages/home/sections/hero",
        json!({ "heading": "H", "subheading": "S", "backgroundImage": "/h.jpg" }),
    )
    .await;

    let response = get(app, "/api/v1/pages/home").await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["hero_heading"], "H");
    assert_eq!(data["about_title"], "About Us");
    assert_eq!(data["events_items"], "[]");
    assert_eq!(data["donation_bible_verse_reference"], "2 Corinthians 9:7");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn whole_record_import_round_trips(pool: PgPool) {
    let app = common::build_test_app(pool);

    // Export the default record, tweak one column, import it back.
    let response = get(app.clone(), "/api/v1/pages/home").await;
    let mut record = body_json(response).await["data"].clone();
    record["hero_heading"] = json!("Replaced Heading");

    let response = put_json(app.clone(), "/api/v1/pages/home", record.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(app, "/api/v1/pages/home").await;
    assert_eq!(body_json(response).await["data"], record);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn whole_record_import_requires_a_complete_record(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = put_json(
        app,
        "/api/v1/pages/home",
        json!({ "hero_heading": "only one column" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Rendered rich text
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn rendered_query_segments_rich_text_fields(pool: PgPool) {
    let app = common::build_test_app(pool);

    put_json(
        app.clone(),
        "/api/v1/pages/home/sections/about",
        json!({ "title": "About Us", "content": "Line1\nLine2\n\nSecond paragraph" }),
    )
    .await;

    let response = get(app, "/api/v1/pages/home/sections/about?rendered=true").await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    // The scalar title stays a plain string.
    assert_eq!(data["title"], "About Us");
    // The rich-text content becomes a block tree.
    assert_eq!(data["content"]["kind"], "blocks");
    assert_eq!(
        data["content"]["value"],
        json!([["Line1", "Line2"], ["Second paragraph"]])
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rendered_query_resolves_escaped_newlines(pool: PgPool) {
    let app = common::build_test_app(pool);

    // The stored text contains the two-character sequence `\n`, not a
    // real newline.
    put_json(
        app.clone(),
        "/api/v1/pages/home/sections/about",
        json!({ "title": "About Us", "content": "Line1\\nLine2" }),
    )
    .await;

    // Raw reads keep the escape sequence as stored.
    let response = get(app.clone(), "/api/v1/pages/home/sections/about").await;
    assert_eq!(
        body_json(response).await["data"]["content"],
        "Line1\\nLine2"
    );

    // Rendered reads resolve it before segmentation.
    let response = get(app, "/api/v1/pages/home/sections/about?rendered=true").await;
    let data = &body_json(response).await["data"];
    assert_eq!(data["content"]["kind"], "blocks");
    assert_eq!(data["content"]["value"], json!([["Line1", "Line2"]]));
}
