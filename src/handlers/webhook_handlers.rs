use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::{error, info};

use crate::app_state::AppState;
use crate::command::BotContext;
use crate::telegram::Update;
use crate::transaction::now_wib;

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub status: &'static str,
    pub message: &'static str,
}

/// POST handler for the Telegram webhook. Every update is acked with 200:
/// Telegram retries non-2xx responses, and a failed reply should not cause
/// redelivery of an already-recorded transaction.
pub async fn telegram_webhook_handler(
    State(app_state): State<AppState>,
    Json(update): Json<Update>,
) -> Json<WebhookAck> {
    let Some(message) = update.message else {
        return Json(WebhookAck {
            status: "success",
            message: "No message to process",
        });
    };
    let Some(text) = message.text.clone() else {
        return Json(WebhookAck {
            status: "success",
            message: "No message to process",
        });
    };

    info!("Processing message from chat {}", message.chat.id);

    let ctx = BotContext {
        db: &app_state.transaction_db,
        advisor: &app_state.advisor,
        taxonomy: &app_state.taxonomy,
    };
    let reply = ctx
        .handle_message(&text, &message.source_id(), message.first_name(), now_wib())
        .await;

    if let Err(e) = app_state.telegram_api.send_message(message.chat.id, &reply).await {
        error!("Error sending Telegram reply: {:#?}", e);
    }

    Json(WebhookAck {
        status: "success",
        message: "Message processed",
    })
}

/// GET handler used as a liveness check and webhook-URL smoke test.
pub async fn status_handler() -> String {
    "🤖 CatatUang Bot is running!".to_string()
}
