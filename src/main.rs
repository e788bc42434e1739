use axum::{
    routing::{get, post},
    Router,
};
use catatuang::advisor::Advisor;
use catatuang::app_state::AppState;
use catatuang::db::TransactionsDb;
use catatuang::handlers::{status_handler, telegram_webhook_handler};
use catatuang::taxonomy::Taxonomy;
use catatuang::telegram::TelegramApi;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::error;
use tracing::info;

#[tokio::main]
async fn main() {
    // initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // init file DB standing in for the spreadsheet row store
    let transaction_db: TransactionsDb = match TransactionsDb::new_transactions_db() {
        Ok(db) => db,
        Err(e) => {
            error!("Error creating TransactionsDb: {:#?}", e);
            return;
        }
    };

    // init Telegram API caller
    let telegram_api = match TelegramApi::new() {
        Ok(api) => api,
        Err(e) => {
            error!("Error creating TelegramApi: {:#?}", e);
            return;
        }
    };

    // init advice generator (runs on rule-based fallback without an API key)
    let advisor = match Advisor::new() {
        Ok(advisor) => advisor,
        Err(e) => {
            error!("Error creating Advisor: {:#?}", e);
            return;
        }
    };

    // App State; the taxonomy is built once and injected, never global
    let app_state = AppState {
        transaction_db,
        telegram_api,
        advisor,
        taxonomy: Arc::new(Taxonomy::new()),
    };

    info!(
        "Loaded {} transactions from store.",
        app_state.transaction_db.rows().len()
    );

    // build our application with a route
    let app = Router::new()
        .route("/", get(status_handler))
        .route("/telegram/webhook", post(telegram_webhook_handler))
        .with_state(app_state)
        .layer((
            TraceLayer::new_for_http(),
            // Graceful shutdown will wait for outstanding requests to complete. Add a timeout so
            // requests don't hang forever.
            TimeoutLayer::new(Duration::from_secs(10)),
        ));

    // run our app with hyper, listening globally on port 3000
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

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
            info!("Received Ctrl+C, shutting down.");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down.");
        },
    }
}
