//! Application assembly: routes, shared state, and boundary error handling.
//!
//! `configure_app` is shared between `main` and the integration tests so
//! both exercise the same route table, extractor configuration, and route
//! fallback.

use actix_web::{HttpRequest, HttpResponse, web};

use crate::api::books::{
    add_book, delete_book, find_book, list_books, summarise_books, update_book,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::health::{HealthState, live, ready};
use crate::domain::{Catalogue, DomainError};
use crate::outbound::summary::SummaryClient;

/// Register routes and shared state on an actix `App`.
pub fn configure_app(
    cfg: &mut web::ServiceConfig,
    catalogue: web::Data<Catalogue>,
    summary: web::Data<SummaryClient>,
    health: web::Data<HealthState>,
) {
    let api = web::scope("/api/v1")
        // `/books/summary` must register ahead of `/books/{id}`.
        .service(summarise_books)
        .service(list_books)
        .service(add_book)
        .service(find_book)
        .service(update_book)
        .service(delete_book);

    cfg.app_data(catalogue)
        .app_data(summary)
        .app_data(health)
        .app_data(json_config())
        .app_data(path_config())
        .service(api)
        .service(ready)
        .service(live)
        .default_service(web::route().to(route_fallback));
}

/// Route extractor failures through the translation boundary so malformed
/// bodies get the uniform envelope instead of actix's bare 400.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::from(DomainError::internal(format!("request body rejected: {err}"))).into()
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        ApiError::from(DomainError::internal(format!(
            "path parameter rejected: {err}"
        )))
        .into()
    })
}

async fn route_fallback(request: HttpRequest) -> ApiResult<HttpResponse> {
    Err(DomainError::route_not_found(request.method().as_str(), request.path()).into())
}
