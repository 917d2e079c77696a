//! End-to-end checks of the uniform response envelope.
//!
//! Every test drives the same app assembly `main` uses, so the route
//! table, extractor configuration, and route fallback are covered as
//! deployed.

use std::time::Duration;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::json;
use url::Url;

use book_catalogue::api::Envelope;
use book_catalogue::api::books::ROLE_HEADER;
use book_catalogue::api::health::HealthState;
use book_catalogue::domain::Catalogue;
use book_catalogue::outbound::summary::SummaryClient;
use book_catalogue::server::configure_app;

/// Summariser client pointing at an ephemeral port that was bound and
/// released, so dialling it reliably fails with a transport error.
async fn summary_client() -> web::Data<SummaryClient> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let address = listener.local_addr().expect("probe address");
    drop(listener);
    let endpoint = Url::parse(&format!("http://{address}/v1/summaries")).expect("probe URL parses");
    let client = SummaryClient::new(endpoint, Duration::from_secs(1)).expect("client builds");
    web::Data::new(client)
}

async fn spawn_app(
    health: web::Data<HealthState>,
) -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    let catalogue = web::Data::new(Catalogue::new());
    let summary = summary_client().await;
    test::init_service(
        App::new().configure(move |cfg| configure_app(cfg, catalogue, summary, health)),
    )
    .await
}

async fn ready_app() -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    spawn_app(health).await
}

fn draft() -> serde_json::Value {
    json!({
        "title": "The Left Hand of Darkness",
        "author": "Ursula K. Le Guin",
        "publishedYear": 1969,
    })
}

#[actix_web::test]
async fn unmatched_routes_get_the_route_not_found_envelope() {
    let app = ready_app().await;

    let request = test::TestRequest::get()
        .uri("/definitely/not/here")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let envelope: Envelope = test::read_body_json(response).await;
    assert!(!envelope.is_success());
    assert_eq!(envelope.status_code(), 404);
    assert_eq!(envelope.message(), "This API endpoint is not found.");
    assert_eq!(
        envelope.data(),
        Some(&json!("No endpoint GET /definitely/not/here."))
    );
}

#[actix_web::test]
async fn adding_and_fetching_a_book_uses_success_envelopes() {
    let app = ready_app().await;

    let request = test::TestRequest::post()
        .uri("/api/v1/books")
        .set_json(draft())
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let envelope: Envelope = test::read_body_json(response).await;
    assert!(envelope.is_success());
    assert_eq!(envelope.status_code(), 200);
    assert_eq!(envelope.message(), "Add Success");
    let added = envelope.data().expect("book payload present");
    assert_eq!(added.get("id"), Some(&json!(1)));

    let request = test::TestRequest::get().uri("/api/v1/books/1").to_request();
    let response = test::call_service(&app, request).await;
    let envelope: Envelope = test::read_body_json(response).await;
    assert_eq!(envelope.message(), "Find One Success");
    assert_eq!(
        envelope.data().and_then(|data| data.get("title")),
        Some(&json!("The Left Hand of Darkness"))
    );
}

#[actix_web::test]
async fn listing_returns_every_book() {
    let app = ready_app().await;
    for _ in 0..2 {
        let request = test::TestRequest::post()
            .uri("/api/v1/books")
            .set_json(draft())
            .to_request();
        let response = test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let request = test::TestRequest::get().uri("/api/v1/books").to_request();
    let response = test::call_service(&app, request).await;
    let envelope: Envelope = test::read_body_json(response).await;
    assert_eq!(envelope.message(), "Find All Success");
    let books = envelope
        .data()
        .and_then(|data| data.as_array())
        .expect("array payload");
    assert_eq!(books.len(), 2);
}

#[actix_web::test]
async fn invalid_drafts_get_the_field_error_map() {
    let app = ready_app().await;

    let request = test::TestRequest::post()
        .uri("/api/v1/books")
        .set_json(json!({
            "title": "  ",
            "author": "",
            "publishedYear": 0,
        }))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let envelope: Envelope = test::read_body_json(response).await;
    assert_eq!(envelope.status_code(), 400);
    assert_eq!(
        envelope.message(),
        "Provided arguments are invalid, see data for details."
    );
    let data = envelope.data().expect("field map present");
    assert_eq!(data.get("title"), Some(&json!("must not be blank")));
    assert_eq!(data.get("author"), Some(&json!("must not be blank")));
    assert!(data.get("publishedYear").is_some());
}

#[actix_web::test]
async fn malformed_bodies_get_the_generic_500_envelope() {
    let app = ready_app().await;

    let request = test::TestRequest::post()
        .uri("/api/v1/books")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let envelope: Envelope = test::read_body_json(response).await;
    assert_eq!(envelope.status_code(), 500);
    assert_eq!(envelope.message(), "A server internal error occurs.");
}

#[actix_web::test]
async fn unknown_ids_get_the_not_found_envelope() {
    let app = ready_app().await;

    let request = test::TestRequest::get()
        .uri("/api/v1/books/999")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let envelope: Envelope = test::read_body_json(response).await;
    assert_eq!(envelope.status_code(), 404);
    assert_eq!(envelope.message(), "Could not find book with id 999.");
}

#[actix_web::test]
async fn deleting_without_the_admin_role_is_forbidden() {
    let app = ready_app().await;
    let request = test::TestRequest::post()
        .uri("/api/v1/books")
        .set_json(draft())
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let request = test::TestRequest::delete()
        .uri("/api/v1/books/1")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let envelope: Envelope = test::read_body_json(response).await;
    assert_eq!(envelope.status_code(), 403);
    assert_eq!(envelope.message(), "No permission.");

    let request = test::TestRequest::delete()
        .uri("/api/v1/books/1")
        .insert_header((ROLE_HEADER, "admin"))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let envelope: Envelope = test::read_body_json(response).await;
    assert_eq!(envelope.message(), "Delete Success");

    let request = test::TestRequest::get().uri("/api/v1/books/1").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn summary_transport_failures_get_the_generic_500_envelope() {
    let app = ready_app().await;

    let request = test::TestRequest::get()
        .uri("/api/v1/books/summary")
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let envelope: Envelope = test::read_body_json(response).await;
    assert!(!envelope.is_success());
    assert_eq!(envelope.status_code(), 500);
    assert_eq!(envelope.message(), "A server internal error occurs.");
    assert!(envelope.data().is_some());
}

#[actix_web::test]
async fn readiness_follows_the_health_state() {
    let app = spawn_app(web::Data::new(HealthState::new())).await;

    let request = test::TestRequest::get().uri("/health/ready").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let request = test::TestRequest::get().uri("/health/live").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let app = ready_app().await;
    let request = test::TestRequest::get().uri("/health/ready").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
}
