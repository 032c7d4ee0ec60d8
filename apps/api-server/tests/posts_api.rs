use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use api_server::handlers::configure_routes;
use api_server::observability::RequestIdMiddleware;
use api_server::state::AppState;

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new(AppState::in_memory()))
                .configure(configure_routes),
        )
        .await
    };
}

macro_rules! create {
    ($app:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json($body)
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let post: Value = test::read_body_json(resp).await;
        post
    }};
}

#[actix_web::test]
async fn health_reports_ok() {
    let app = app!();
    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["ok"], true);
}

#[actix_web::test]
async fn list_starts_empty() {
    let app = app!();
    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn create_returns_201_with_trimmed_title() {
    let app = app!();
    let post = create!(app, json!({ "title": "  First  ", "body": "hello" }));

    assert_eq!(post["title"], "First");
    assert_eq!(post["body"], "hello");
    assert!(post["id"].is_i64());
    assert!(post["created_at"].is_string());
    assert!(post["updated_at"].is_string());
}

#[actix_web::test]
async fn create_without_body_stores_null() {
    let app = app!();
    let post = create!(app, json!({ "title": "No body" }));

    assert_eq!(post["body"], Value::Null);
}

#[actix_web::test]
async fn create_rejects_blank_title_and_persists_nothing() {
    let app = app!();

    for body in [json!({ "title": "   " }), json!({ "body": "orphan" }), json!({ "title": "" })] {
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let problem: Value = test::read_body_json(resp).await;
        assert_eq!(problem["status"], 422);
        assert_eq!(problem["errors"]["title"][0], "The title field is required.");
    }

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn create_rejects_overlong_title() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .set_json(json!({ "title": "x".repeat(256) }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn create_reports_non_string_fields_per_field() {
    let app = app!();
    let cases = [
        (json!({ "title": 5 }), "title", "The title field must be a string."),
        (json!({ "title": "ok", "body": 7 }), "body", "The body field must be a string."),
    ];

    for (body, field, message) in cases {
        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{field}");

        let problem: Value = test::read_body_json(resp).await;
        assert_eq!(problem["errors"][field], json!([message]));
    }

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let app = app!();
    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let problem: Value = test::read_body_json(resp).await;
    assert_eq!(problem["status"], 400);
}

#[actix_web::test]
async fn ids_are_unique_and_list_is_newest_first() {
    let app = app!();
    let a = create!(app, json!({ "title": "A" }));
    let b = create!(app, json!({ "title": "B" }));
    let c = create!(app, json!({ "title": "C" }));
    assert_ne!(a["id"], b["id"]);
    assert_ne!(b["id"], c["id"]);

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();

    assert_eq!(titles, ["C", "B", "A"]);
}

#[actix_web::test]
async fn show_unknown_or_non_numeric_id_is_404() {
    let app = app!();

    for uri in ["/api/posts/999", "/api/posts/abc"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[actix_web::test]
async fn update_body_only_keeps_title() {
    let app = app!();
    let post = create!(app, json!({ "title": "Keep me", "body": "old" }));
    let uri = format!("/api/posts/{}", post["id"]);

    let req = test::TestRequest::patch()
        .uri(&uri)
        .set_json(json!({ "body": "new" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["title"], "Keep me");
    assert_eq!(updated["body"], "new");

    let req = test::TestRequest::get().uri(&uri).to_request();
    let shown: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(shown, updated);
}

#[actix_web::test]
async fn update_title_only_keeps_body() {
    let app = app!();
    let post = create!(app, json!({ "title": "Old", "body": "stay" }));
    let uri = format!("/api/posts/{}", post["id"]);

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({ "title": "New" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(updated["title"], "New");
    assert_eq!(updated["body"], "stay");
}

#[actix_web::test]
async fn update_null_body_clears_it() {
    let app = app!();
    let post = create!(app, json!({ "title": "T", "body": "gone soon" }));
    let uri = format!("/api/posts/{}", post["id"]);

    let req = test::TestRequest::patch()
        .uri(&uri)
        .set_json(json!({ "body": null }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(updated["body"], Value::Null);
}

#[actix_web::test]
async fn update_invalid_title_is_422_and_unknown_id_is_404() {
    let app = app!();
    let post = create!(app, json!({ "title": "T" }));

    let req = test::TestRequest::put()
        .uri(&format!("/api/posts/{}", post["id"]))
        .set_json(json!({ "title": "  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let problem: Value = test::read_body_json(resp).await;
    assert_eq!(problem["errors"]["title"], json!(["The title field must be a string."]));

    let req = test::TestRequest::put()
        .uri("/api/posts/424242")
        .set_json(json!({ "title": "  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri("/api/posts/424242")
        .set_json(json!({ "title": "fine" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn update_reports_non_string_fields_per_field() {
    let app = app!();
    let post = create!(app, json!({ "title": "T", "body": "B" }));
    let uri = format!("/api/posts/{}", post["id"]);
    let cases = [
        (json!({ "title": 5 }), "title", "The title field must be a string."),
        (json!({ "body": 7 }), "body", "The body field must be a string."),
    ];

    for (body, field, message) in cases {
        let req = test::TestRequest::patch().uri(&uri).set_json(body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY, "{field}");

        let problem: Value = test::read_body_json(resp).await;
        assert_eq!(problem["errors"][field], json!([message]));
    }

    let req = test::TestRequest::get().uri(&uri).to_request();
    let shown: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(shown, post);
}

#[actix_web::test]
async fn empty_update_changes_nothing() {
    let app = app!();
    let post = create!(app, json!({ "title": "Still" }));
    let uri = format!("/api/posts/{}", post["id"]);

    let req = test::TestRequest::patch().uri(&uri).set_json(json!({})).to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(updated, post);
}

#[actix_web::test]
async fn destroy_then_show_is_404() {
    let app = app!();
    let post = create!(app, json!({ "title": "Doomed" }));
    let uri = format!("/api/posts/{}", post["id"]);

    let req = test::TestRequest::delete().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let body = test::read_body(resp).await;
    assert!(body.is_empty());

    let req = test::TestRequest::get().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn request_id_is_echoed() {
    let app = app!();
    let req = test::TestRequest::get()
        .uri("/api/health")
        .insert_header(("X-Request-ID", "abc-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.headers().get("x-request-id").unwrap(), "abc-123");
}
