//! Push payload parsing and default-filling.
//!
//! A push arrives as an opaque byte blob. Decoding is lenient by contract:
//! a malformed payload degrades to an empty record so the user still sees
//! a best-effort notification, never a silent drop.

use serde::{Deserialize, Serialize};

use crate::constants::{APP_ICON, DEFAULT_BODY, DEFAULT_TAG, DEFAULT_URL, PRODUCT_NAME};

/// A button attached to a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    pub action: String,
    pub title: String,
}

/// The push message as sent by the messaging backend.
///
/// Every field is optional; unknown fields are ignored. Defaults are not
/// applied here: [`NotificationSpec::resolve`] owns that, keeping the raw
/// wire shape inspectable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PushPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<ActionDescriptor>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_interaction: Option<bool>,
}

impl PushPayload {
    /// Decodes a raw push blob.
    ///
    /// Never fails: unparseable bytes yield an empty record, which resolves
    /// to an all-defaults notification.
    pub fn decode(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }
}

/// Display fields for one OS notification, fully resolved.
///
/// Produced from a [`PushPayload`] by filling every missing field with its
/// documented default. `data_url` rides along with the notification so the
/// click handler can recover the navigation target later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSpec {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub tag: String,
    pub actions: Vec<ActionDescriptor>,
    pub require_interaction: bool,
    pub data_url: String,
}

impl NotificationSpec {
    /// Fills defaults for every field the payload left out.
    pub fn resolve(payload: PushPayload) -> Self {
        Self {
            title: payload.title.unwrap_or_else(|| PRODUCT_NAME.to_string()),
            body: payload.body.unwrap_or_else(|| DEFAULT_BODY.to_string()),
            icon: payload.icon.clone().unwrap_or_else(|| APP_ICON.to_string()),
            badge: payload.icon.unwrap_or_else(|| APP_ICON.to_string()),
            tag: payload.tag.unwrap_or_else(|| DEFAULT_TAG.to_string()),
            actions: payload.actions.unwrap_or_default(),
            require_interaction: payload.require_interaction.unwrap_or(false),
            data_url: payload.url.unwrap_or_else(|| DEFAULT_URL.to_string()),
        }
    }

    /// Resolves straight from raw bytes (lenient decode + default-filling).
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::resolve(PushPayload::decode(bytes))
    }
}
