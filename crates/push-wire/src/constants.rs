use serde::{Deserialize, Serialize};

/// Product name, used as the notification title fallback.
pub const PRODUCT_NAME: &str = "Kopro";

/// Body text shown when a push carries none.
pub const DEFAULT_BODY: &str = "Nouvelle notification de votre résidence";

/// Application icon used for both `icon` and `badge` fallbacks.
pub const APP_ICON: &str = "/icons/icon-192.png";

/// De-duplication key applied when a push carries no `tag`.
pub const DEFAULT_TAG: &str = "default";

/// Navigation target when a push or click carries no `url`.
pub const DEFAULT_URL: &str = "/";

/// Maximum envelope size in bytes on the local delivery channel (256 KB).
///
/// Push payloads are small JSON records; anything larger is a client bug.
pub const WS_MAX_MESSAGE_SIZE: usize = 256 * 1024;

/// Envelope message type on the local delivery channel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    /// A push payload forwarded by the wrapper for OS delivery.
    #[serde(rename = "push")]
    Push,
    /// A notification click reported back by the OS shelf.
    #[serde(rename = "notification_click")]
    NotificationClick,
    #[serde(rename = "ping")]
    Ping,
    #[serde(rename = "pong")]
    Pong,
    #[serde(rename = "error")]
    Error,

    /// Forward compatibility: unknown message types deserialize here.
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_type_serialization() {
        assert_eq!(
            serde_json::to_string(&MessageType::Push).unwrap(),
            "\"push\""
        );
        assert_eq!(
            serde_json::to_string(&MessageType::NotificationClick).unwrap(),
            "\"notification_click\""
        );
        assert_eq!(
            serde_json::to_string(&MessageType::Pong).unwrap(),
            "\"pong\""
        );
    }

    #[test]
    fn message_type_deserialization() {
        let mt: MessageType = serde_json::from_str("\"push\"").unwrap();
        assert_eq!(mt, MessageType::Push);
    }

    #[test]
    fn unknown_message_type() {
        let mt: MessageType = serde_json::from_str("\"some_future_type\"").unwrap();
        assert_eq!(mt, MessageType::Unknown);
    }
}
