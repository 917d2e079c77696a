//! Reqwest-backed summariser client.
//!
//! This adapter owns transport details only: request serialisation, the
//! outbound timeout, and mapping HTTP failures into the domain taxonomy. A
//! non-2xx reply becomes [`DomainError::Upstream`] carrying the status and
//! the raw response body; transport failures fold into the default arm.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::domain::{Book, DomainError};

/// Client for the external catalogue summariser service.
#[derive(Debug, Clone)]
pub struct SummaryClient {
    client: Client,
    endpoint: Url,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryRequest {
    titles: Vec<String>,
}

impl SummaryRequest {
    fn from_books(books: &[Book]) -> Self {
        Self {
            titles: books.iter().map(|book| book.title.clone()).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryReply {
    summary: String,
}

impl SummaryClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    /// Ask the summariser for a prose summary of the given books.
    pub async fn summarise(&self, books: &[Book]) -> Result<String, DomainError> {
        let request = SummaryRequest::from_books(books);
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;
        if status.is_client_error() || status.is_server_error() {
            return Err(DomainError::upstream(status.as_u16(), body));
        }

        let reply: SummaryReply = serde_json::from_str(&body).map_err(|err| {
            DomainError::internal(format!("summariser reply is not valid JSON: {err}"))
        })?;
        Ok(reply.summary)
    }
}

fn map_transport_error(error: reqwest::Error) -> DomainError {
    DomainError::internal(format!("summariser unreachable: {error}"))
}
