use gatehouse_identity::{AuthService, IdentityClient};
use gatehouse_server::{
    app::build_router, auth::AppState, config::ServerConfig, items::ItemStore,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // A missing .env file is fine; the process environment still applies
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!(
        auth_enabled = config.auth_enabled(),
        identity_provider = %config.kratos.public_url(),
        "Loaded configuration"
    );

    // The HTTP client pool connects lazily on first use
    let identity_client =
        IdentityClient::new(&config.kratos).expect("failed to build identity provider client");
    let auth_service = AuthService::new(identity_client);

    let items = match config.items_store() {
        Some((uri, mongo)) => {
            let store = ItemStore::connect(uri, mongo)
                .await
                .expect("failed to configure MongoDB client");
            tracing::info!(database = %mongo.database, "items routes enabled");
            Some(Arc::new(store))
        }
        None => None,
    };

    let app_state = Arc::new(AppState::from_config(auth_service, &config));
    let app = build_router(app_state, items, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.bind_addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("shutting down");
}
