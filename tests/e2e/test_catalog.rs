use crate::e2e::helpers;

use helpers::assertions::assert_movie_response;
use helpers::fake_catalog::{FakeCatalog, MOVIES_PER_PAGE, TOTAL_PAGES};
use helpers::TestContext;
use hyper::StatusCode;
use movie_browser::domain::catalog::Category;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_the_four_categories(ctx: &TestContext) {
    let response = ctx.client.get("/api/categories").await.unwrap();
    response.assert_status(StatusCode::OK);

    let categories = response.body.as_ref().unwrap().as_array().unwrap();
    let ids: Vec<&str> = categories
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["popular", "now_playing", "top_rated", "upcoming"]);

    assert_eq!(categories[1]["label"], "NOW PLAYING");
    assert_eq!(categories[0]["shows_date_range"], false);
    assert_eq!(categories[1]["shows_date_range"], true);
    assert_eq!(categories[3]["shows_date_range"], true);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_list_supported_languages(ctx: &TestContext) {
    let response = ctx.client.get("/api/languages").await.unwrap();
    response.assert_status(StatusCode::OK);

    let languages: Vec<String> = response.json().unwrap();
    assert_eq!(languages, vec!["en".to_string(), "es".to_string()]);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_first_popular_page_by_default(ctx: &TestContext) {
    let response = ctx.client.get("/api/movies").await.unwrap();
    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["category"], "popular");
    assert_eq!(body["language"], "en");
    assert_eq!(body["page"], 1);
    assert_eq!(body["total_pages"], TOTAL_PAGES);
    assert_eq!(body["cached"], false);
    assert!(body.get("captured_at").is_some());
    assert!(body.get("dates").is_none(), "popular should carry no dates");

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), MOVIES_PER_PAGE as usize);
    for movie in results {
        assert_movie_response(movie);
    }
    assert_eq!(
        results[0]["id"],
        FakeCatalog::movie_id("en", Category::Popular, 1, 0)
    );

    let query = ctx.catalog.last_query().unwrap();
    assert_eq!(query.category, Category::Popular);
    assert_eq!(query.language.as_str(), "en");
    assert_eq!(query.page, 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_repeated_queries_from_cache(ctx: &TestContext) {
    let path = "/api/movies?category=top_rated&language=es&page=2";

    let first = ctx.client.get(path).await.unwrap();
    first.assert_status(StatusCode::OK);
    assert_eq!(first.body.as_ref().unwrap()["cached"], false);

    let second = ctx.client.get(path).await.unwrap();
    second.assert_status(StatusCode::OK);

    let body = second.body.as_ref().unwrap();
    assert_eq!(body["cached"], true);
    assert_eq!(
        body["captured_at"],
        first.body.as_ref().unwrap()["captured_at"],
        "cached entry should keep its capture time"
    );
    assert_eq!(body["results"], first.body.as_ref().unwrap()["results"]);
    assert_eq!(ctx.catalog.calls(), 1);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_key_cache_by_category_language_and_page(ctx: &TestContext) {
    ctx.client.get("/api/movies?page=1").await.unwrap();
    ctx.client.get("/api/movies?page=2").await.unwrap();
    ctx.client.get("/api/movies?language=es").await.unwrap();
    ctx.client.get("/api/movies?category=upcoming").await.unwrap();

    assert_eq!(ctx.catalog.calls(), 4);

    let response = ctx.client.get("/api/movies?page=2").await.unwrap();
    assert_eq!(response.body.as_ref().unwrap()["cached"], true);
    assert_eq!(ctx.catalog.calls(), 4);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_dates_for_now_playing(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/movies?category=now_playing")
        .await
        .unwrap();
    response.assert_status(StatusCode::OK);

    let dates = &response.body.as_ref().unwrap()["dates"];
    assert_eq!(dates["minimum"], "2024-05-01");
    assert_eq!(dates["maximum"], "2024-06-12");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unknown_category(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/movies?category=trending")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Unknown category");
    assert_eq!(ctx.catalog.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_invalid_language(ctx: &TestContext) {
    let response = ctx
        .client
        .get("/api/movies?language=spanish")
        .await
        .unwrap();

    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Invalid language code");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_invalid_page(ctx: &TestContext) {
    let response = ctx.client.get("/api/movies?page=abc").await.unwrap();
    response
        .assert_status(StatusCode::BAD_REQUEST)
        .assert_error_message("Invalid page");

    let response = ctx.client.get("/api/movies?page=0").await.unwrap();
    response.assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(ctx.catalog.calls(), 0);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_bad_gateway_when_catalog_fails(ctx: &TestContext) {
    ctx.catalog.set_failing(true);

    let response = ctx.client.get("/api/movies").await.unwrap();
    response.assert_status(StatusCode::BAD_GATEWAY);

    // Failures are not cached
    ctx.catalog.set_failing(false);
    let response = ctx.client.get("/api/movies").await.unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap()["cached"], false);
    assert_eq!(ctx.catalog.calls(), 2);
}

#[tokio::test]
async fn it_should_refetch_after_cache_entry_expires() {
    let catalog = Arc::new(FakeCatalog::new());
    let client = helpers::spawn_app(catalog.clone(), Duration::from_millis(200)).await;

    let response = client.get("/api/movies").await.unwrap();
    assert_eq!(response.body.as_ref().unwrap()["cached"], false);

    let response = client.get("/api/movies").await.unwrap();
    assert_eq!(response.body.as_ref().unwrap()["cached"], true);
    assert_eq!(catalog.calls(), 1);

    tokio::time::sleep(Duration::from_millis(400)).await;

    let response = client.get("/api/movies").await.unwrap();
    response.assert_status(StatusCode::OK);
    assert_eq!(response.body.as_ref().unwrap()["cached"], false);
    assert_eq!(catalog.calls(), 2);
}
