mod api;
mod config;
mod db;
mod import;
mod models;
mod raw_sql;
mod schema;
mod store;
mod telemetry;

use anyhow::Context;
use axum::extract::MatchedPath;
use axum::http::Request;
use clap::{Parser, Subcommand};
use std::env;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::Span;
use utoipa_swagger_ui::SwaggerUi;

/// Shared by every handler
pub struct AppContext {
    pub pool: db::DbPool,
    pub config: config::Config,
    pub started_at: Instant,
}

/// Application state shared across all handlers
pub type AppState = Arc<AppContext>;

#[derive(Parser)]
#[command(name = "catalog-server")]
#[command(about = "Recipe catalog API server and data importer")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (default)
    Serve,

    /// Replace the catalog with recipes from a JSON file
    Import {
        /// Path to the JSON file (JSON_DATA_PATH takes precedence)
        path: Option<String>,
    },

    /// Print the OpenAPI document and exit
    Openapi,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Openapi) = cli.command {
        println!("{}", api::openapi().to_pretty_json()?);
        return Ok(());
    }

    let _telemetry = telemetry::init_telemetry("catalog-server");

    let config = config::Config::from_env().context("Invalid configuration")?;

    match cli.command {
        Some(Commands::Import { path }) => {
            let candidate = import::source_path(env::var("JSON_DATA_PATH").ok(), path);
            tokio::task::spawn_blocking(move || {
                let pool = db::create_pool(&config.database_url)?;
                import::run(&pool, &candidate)
            })
            .await
            .context("Import task panicked")?
        }
        Some(Commands::Serve) | None => serve(config).await,
        Some(Commands::Openapi) => Ok(()),
    }
}

async fn serve(config: config::Config) -> anyhow::Result<()> {
    let database_url = config.database_url.clone();
    let pool = tokio::task::spawn_blocking(move || db::create_pool(&database_url))
        .await
        .context("Database setup task panicked")??;

    let port = config.port;
    let state: AppState = Arc::new(AppContext {
        pool,
        config,
        started_at: Instant::now(),
    });

    let swagger_ui = SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::openapi());

    let app = api::app(state).merge(swagger_ui).layer(
        TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                let matched_path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str)
                    .unwrap_or(request.uri().path());

                // Health probes are frequent and uninteresting
                if matched_path == "/api/health" {
                    tracing::trace_span!("http_request")
                } else {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %matched_path,
                    )
                }
            })
            .on_request(|_request: &Request<_>, _span: &Span| {})
            .on_response(
                |response: &axum::http::Response<_>, latency: std::time::Duration, span: &Span| {
                    if span.metadata().map(|m| m.level()) == Some(&tracing::Level::TRACE) {
                        return;
                    }
                    let status = response.status().as_u16();
                    if status >= 500 {
                        tracing::error!(
                            status = %status,
                            latency_ms = %latency.as_millis(),
                            "request failed with server error"
                        );
                    } else {
                        tracing::info!(
                            status = %status,
                            latency_ms = %latency.as_millis(),
                            "request completed"
                        );
                    }
                },
            )
            .on_failure(
                |error: tower_http::classify::ServerErrorsFailureClass,
                 latency: std::time::Duration,
                 _span: &Span| {
                    tracing::error!(
                        error = %error,
                        latency_ms = %latency.as_millis(),
                        "request failed"
                    );
                },
            ),
    );

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    tracing::info!("Server listening on {}", listener.local_addr()?);
    tracing::info!("API index at http://localhost:{}/api", port);
    tracing::info!("Swagger UI available at http://localhost:{}/swagger-ui/", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, shutting down gracefully");
}
