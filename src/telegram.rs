/*!
Structs and API caller for the Telegram Bot side: the inbound webhook
`Update` subset this bot cares about, and the outbound `sendMessage` call.
*/

mod api;

pub use self::api::*;

use serde::{Deserialize, Serialize};

/// Incoming Telegram webhook payload. Only the fields the bot consumes are
/// deserialized; everything else is ignored.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: String,
}

impl Message {
    /// Provenance id recorded on every row, e.g. `telegram_budi_42`.
    pub fn source_id(&self) -> String {
        match &self.from {
            Some(user) => match &user.username {
                Some(username) => format!("telegram_{}_{}", username, user.id),
                None => format!("telegram_{}", user.id),
            },
            None => "telegram_unknown".to_string(),
        }
    }

    pub fn first_name(&self) -> &str {
        match &self.from {
            Some(user) if !user.first_name.is_empty() => &user.first_name,
            _ => "User",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_deserializes_from_webhook_json() {
        let json = r#"{
            "update_id": 10001,
            "message": {
                "message_id": 1,
                "chat": {"id": 42, "type": "private"},
                "from": {"id": 7, "username": "budi", "first_name": "Budi"},
                "text": "50000 makanan nasi padang"
            }
        }"#;
        let update: Update = serde_json::from_str(json).unwrap();
        let message = update.message.unwrap();
        assert_eq!(message.chat.id, 42);
        assert_eq!(message.text.as_deref(), Some("50000 makanan nasi padang"));
        assert_eq!(message.source_id(), "telegram_budi_7");
        assert_eq!(message.first_name(), "Budi");
    }

    #[test]
    fn missing_sender_falls_back_to_unknown() {
        let message = Message::default();
        assert_eq!(message.source_id(), "telegram_unknown");
        assert_eq!(message.first_name(), "User");
    }
}
