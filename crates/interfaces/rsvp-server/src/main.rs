//! Wedding RSVP server: couple setup, guest forms and the response dashboard.

use axum::http::Request;
use camino::Utf8PathBuf;
use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use rsvp_server::{router, AppState, Config};

#[derive(Parser, Debug)]
#[command(name = "rsvp-server")]
#[command(about = "Serve wedding RSVP pages and their JSON API", long_about = None)]
struct Args {
    /// Overrides RSVP_BIND_ADDR.
    #[arg(long)]
    bind: Option<String>,

    /// Overrides RSVP_DATA_DIR.
    #[arg(long)]
    data_dir: Option<Utf8PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env()?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(dir) = args.data_dir {
        config.data_dir = Some(dir);
    }
    let bind_addr = config.bind_addr.clone();

    let state = AppState::new(config)?;

    let app = router(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "starting rsvp server");

    axum::serve(listener, app).await?;

    Ok(())
}
