mod app;
mod config;
mod fixtures;
mod handlers;
mod state;
mod storage;

use anyhow::Result;
use clap::Parser;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{app::create_app, config::Config, state::AppState};

#[cfg(not(any(feature = "dynamodb", feature = "inmemory")))]
compile_error!("Must enable a storage feature: 'dynamodb' or 'inmemory'");

#[cfg(all(feature = "dynamodb", feature = "inmemory"))]
compile_error!("Features 'dynamodb' and 'inmemory' are mutually exclusive");

/// Persistent session manager backed by a schema-flexible cloud table.
#[derive(Parser, Debug)]
#[command(name = "sessionmgr")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "8080", env = "PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sessionmgr=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();

    // Credential, connection, or provisioning failure here is fatal: the
    // process must not begin serving requests without a live store.
    let state = init_state(&config).await?;

    let app = create_app(state);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolve credentials, connect, and provision the session table.
#[cfg(feature = "dynamodb")]
async fn init_state(config: &Config) -> Result<AppState> {
    use std::sync::Arc;

    use sessionmgr_core::credentials;
    use sessionmgr_core::storage::{PollBudget, TableAdmin, TableDescriptor};

    use crate::storage::dynamodb::{connect, ConnectOptions, DynamoStore};

    let bundle = match &config.credentials_file {
        Some(path) => credentials::resolve_from_file(path)?,
        None => credentials::resolve_from_map(&config::credential_source_from_env())?,
    };

    let handle = connect(
        bundle,
        &config.table_name,
        ConnectOptions {
            max_concurrency: config.max_concurrency,
        },
    )
    .await?;

    let store = Arc::new(DynamoStore::new(handle));
    let descriptor = TableDescriptor::new(store.table().to_string());
    store
        .ensure_table(&descriptor, PollBudget::PROVISIONING)
        .await?;

    if let Some(dir) = &config.fixture_dir {
        fixtures::seed_from_dir(store.as_ref(), dir).await?;
    }

    Ok(AppState::new(store.clone(), store))
}

/// Local-development state without a cloud table.
#[cfg(all(feature = "inmemory", not(feature = "dynamodb")))]
async fn init_state(config: &Config) -> Result<AppState> {
    use std::sync::Arc;

    use sessionmgr_core::storage::{PollBudget, TableAdmin, TableDescriptor};

    use crate::storage::inmemory::InMemoryStore;

    let store = Arc::new(InMemoryStore::default());
    store
        .ensure_table(
            &TableDescriptor::new(config.table_name.clone()),
            PollBudget::PROVISIONING,
        )
        .await?;

    if let Some(dir) = &config.fixture_dir {
        fixtures::seed_from_dir(store.as_ref(), dir).await?;
    }

    Ok(AppState::new(store.clone(), store))
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
