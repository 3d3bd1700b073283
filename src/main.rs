use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockroom::config::{AuthConfig, Config};
use stockroom::routes::{build_router, AppState};

#[derive(Parser)]
#[command(name = "stockroomd", about = "Flat-file product/order store API", version)]
struct Args {
  /// Port to listen on
  #[arg(short, long, env = "PORT", default_value_t = 5000)]
  port: u16,
  /// Path of the backing JSON document
  #[arg(long, env = "DATA_FILE", default_value = "./data/db.json")]
  data_file: PathBuf,
  /// API key accepted in the x-api-key header
  #[arg(long, env = "API_KEY")]
  api_key: Option<String>,
  /// Token accepted as "Authorization: Bearer"
  #[arg(long, env = "BEARER_TOKEN")]
  bearer_token: Option<String>,
  /// Username for basic authentication
  #[arg(long, env = "BASIC_USER")]
  basic_user: Option<String>,
  /// Password for basic authentication
  #[arg(long, env = "BASIC_PASS")]
  basic_pass: Option<String>,
  #[arg(long, env = "LOG_LEVEL", default_value = "info")]
  log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
  dotenvy::dotenv().ok();
  let args = Args::parse();

  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| args.log_level.clone().into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let config = Config {
    port: args.port,
    data_file: args.data_file,
    auth: AuthConfig {
      api_key: args.api_key,
      bearer_token: args.bearer_token,
      basic_user: args.basic_user,
      basic_pass: args.basic_pass,
    },
  };

  if config.auth.api_key.is_none() {
    tracing::warn!("API_KEY is not set; unauthenticated requests will get 500");
  }

  let state = Arc::new(AppState::new(config.clone()));
  state.store.ensure().await?;
  tracing::info!("Data file: {}", config.data_file.display());

  let app = build_router(state);

  let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
  let listener = TcpListener::bind(addr).await?;
  tracing::info!("Store API listening on {}", addr);

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;

  tracing::info!("Shutdown complete");
  Ok(())
}

async fn shutdown_signal() {
  let ctrl_c = async {
    tokio::signal::ctrl_c()
      .await
      .expect("Failed to install Ctrl+C handler");
  };

  #[cfg(unix)]
  let terminate = async {
    tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
      .expect("Failed to install SIGTERM handler")
      .recv()
      .await;
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    _ = ctrl_c => tracing::info!("Received SIGINT"),
    _ = terminate => tracing::info!("Received SIGTERM"),
  }
}
