//! Book catalogue REST handlers.
//!
//! Handlers return [`ApiResult`]; any `DomainError` raised below converts
//! through the translation boundary on the way out, so success and failure
//! share one envelope shape.

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use serde::Serialize;

use super::envelope::Envelope;
use super::error::{ApiError, ApiResult};
use crate::domain::{BookDraft, Catalogue, DomainError};
use crate::outbound::summary::SummaryClient;

/// Request header naming the caller's role.
pub const ROLE_HEADER: &str = "x-catalogue-role";
const ADMIN_ROLE: &str = "admin";

fn enveloped(message: &str, value: &impl Serialize) -> ApiResult<HttpResponse> {
    let data = serde_json::to_value(value).map_err(|err| {
        ApiError::from(DomainError::internal(format!(
            "response serialisation failed: {err}"
        )))
    })?;
    Ok(HttpResponse::Ok().json(Envelope::success(message, Some(data))))
}

/// List every book in the catalogue.
#[get("/books")]
pub async fn list_books(catalogue: web::Data<Catalogue>) -> ApiResult<HttpResponse> {
    let books = catalogue.list()?;
    enveloped("Find All Success", &books)
}

/// Fetch a catalogue summary from the external summariser.
#[get("/books/summary")]
pub async fn summarise_books(
    catalogue: web::Data<Catalogue>,
    client: web::Data<SummaryClient>,
) -> ApiResult<HttpResponse> {
    let books = catalogue.list()?;
    let summary = client.summarise(&books).await?;
    enveloped("Summarize Success", &summary)
}

/// Fetch one book by id.
#[get("/books/{id}")]
pub async fn find_book(
    catalogue: web::Data<Catalogue>,
    id: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    let book = catalogue.find_by_id(id.into_inner())?;
    enveloped("Find One Success", &book)
}

/// Add a new book.
#[post("/books")]
pub async fn add_book(
    catalogue: web::Data<Catalogue>,
    draft: web::Json<BookDraft>,
) -> ApiResult<HttpResponse> {
    let book = catalogue.add(draft.into_inner())?;
    enveloped("Add Success", &book)
}

/// Replace the book stored under `id`.
#[put("/books/{id}")]
pub async fn update_book(
    catalogue: web::Data<Catalogue>,
    id: web::Path<u64>,
    draft: web::Json<BookDraft>,
) -> ApiResult<HttpResponse> {
    let book = catalogue.update(id.into_inner(), draft.into_inner())?;
    enveloped("Update Success", &book)
}

/// Delete the book stored under `id`. Requires the admin role.
#[delete("/books/{id}")]
pub async fn delete_book(
    request: HttpRequest,
    catalogue: web::Data<Catalogue>,
    id: web::Path<u64>,
) -> ApiResult<HttpResponse> {
    require_admin(&request)?;
    catalogue.delete(id.into_inner())?;
    Ok(HttpResponse::Ok().json(Envelope::success("Delete Success", None)))
}

fn require_admin(request: &HttpRequest) -> Result<(), ApiError> {
    let role = request
        .headers()
        .get(ROLE_HEADER)
        .and_then(|value| value.to_str().ok());
    if role == Some(ADMIN_ROLE) {
        return Ok(());
    }
    Err(DomainError::forbidden(format!(
        "deleting catalogue entries requires the {ADMIN_ROLE} role"
    ))
    .into())
}
