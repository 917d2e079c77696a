//! Service entry-point: settings, tracing bootstrap, and the HTTP server.

use std::time::Duration;

use actix_web::{App, HttpServer, web};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
use url::Url;

use book_catalogue::api::health::HealthState;
use book_catalogue::domain::Catalogue;
use book_catalogue::outbound::summary::SummaryClient;
use book_catalogue::server::configure_app;

/// Runtime settings, each overridable from the environment.
#[derive(Debug, Parser)]
#[command(name = "book-catalogue", about = "Book catalogue REST API")]
struct Settings {
    /// Address to bind the HTTP listener on.
    #[arg(long, env = "BIND_ADDRESS", default_value = "0.0.0.0")]
    bind_address: String,
    /// Port to bind the HTTP listener on.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
    /// Endpoint of the catalogue summariser service.
    #[arg(
        long,
        env = "SUMMARY_URL",
        default_value = "http://127.0.0.1:9090/v1/summaries"
    )]
    summary_url: Url,
    /// Request timeout for summariser calls, in seconds.
    #[arg(long, env = "SUMMARY_TIMEOUT_SECONDS", default_value_t = 30)]
    summary_timeout_seconds: u64,
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = Settings::parse();
    let summary_client = SummaryClient::new(
        settings.summary_url.clone(),
        Duration::from_secs(settings.summary_timeout_seconds),
    )
    .map_err(|e| std::io::Error::other(format!("summariser client construction failed: {e}")))?;

    let catalogue = web::Data::new(Catalogue::new());
    let summary = web::Data::new(summary_client);
    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness flip below still works.
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        let catalogue = catalogue.clone();
        let summary = summary.clone();
        let health = server_health_state.clone();
        App::new().configure(move |cfg| configure_app(cfg, catalogue, summary, health))
    })
    .bind((settings.bind_address.as_str(), settings.port))?;

    health_state.mark_ready();
    server.run().await
}
