//! The notification router: lifecycle, push handling, click routing.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use kopro_push_wire::NotificationSpec;
use kopro_push_wire::constants::DEFAULT_URL;

use crate::shelf::NotificationShelf;
use crate::windows::WindowRegistry;

/// Lifecycle phase of one router installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterPhase {
    /// Created but not yet installed.
    Installing,
    /// Eligible to handle events; windows not yet claimed.
    Active,
    /// Active handler for all open application windows.
    Controlling,
}

/// A notification click reported back by the OS shelf.
///
/// Carries the `tag` of the clicked notification and the `data_url`
/// attached at show-time, if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickEvent {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Routes push payloads to OS notifications and notification clicks to
/// application windows.
///
/// One router per installation; per-notification state lives with the OS
/// shelf, never in here, so the host can suspend and resume the router
/// at any time.
pub struct NotificationRouter<S, W> {
    origin: String,
    phase: Mutex<RouterPhase>,
    shelf: Arc<S>,
    windows: Arc<W>,
}

impl<S: NotificationShelf, W: WindowRegistry> NotificationRouter<S, W> {
    /// Creates a router for the given application origin.
    pub fn new(origin: impl Into<String>, shelf: Arc<S>, windows: Arc<W>) -> Arc<Self> {
        Arc::new(Self {
            origin: origin.into(),
            phase: Mutex::new(RouterPhase::Installing),
            shelf,
            windows,
        })
    }

    /// The origin this router matches windows against.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> RouterPhase {
        *self.phase.lock().expect("poisoned")
    }

    /// Install transition: becomes eligible immediately, never waiting on
    /// a previously installed instance to finish.
    pub fn install(&self) {
        let mut phase = self.phase.lock().expect("poisoned");
        if *phase == RouterPhase::Installing {
            *phase = RouterPhase::Active;
            info!(origin = %self.origin, "router installed, active immediately");
        }
    }

    /// Activation transition: claims every currently open window right
    /// away rather than waiting for their next navigation.
    pub async fn activate(&self) {
        self.install();
        let claimed = self.windows.claim_all().await;
        *self.phase.lock().expect("poisoned") = RouterPhase::Controlling;
        info!(claimed, "router controlling all open windows");
    }

    /// Handles one incoming push payload.
    ///
    /// Decoding is lenient: a malformed payload degrades to the default
    /// notification instead of being dropped. Returns once the shelf has
    /// acknowledged the notification, so the caller can hold the unit of
    /// work open until then. Shelf failures are absorbed here; there is
    /// no user-visible error path from this layer.
    pub async fn handle_push(&self, payload: Vec<u8>) {
        let spec = NotificationSpec::from_bytes(&payload);
        debug!(tag = %spec.tag, title = %spec.title, "push received");
        if let Err(e) = self.shelf.show(spec).await {
            warn!("failed to show notification: {e}");
        }
    }

    /// Handles one notification click.
    ///
    /// Dismisses the notification, then routes to the most recently
    /// focused window at the router's origin, or opens a new window when
    /// none is open. A blocked open surfaces only as an absent window.
    pub async fn handle_click(&self, click: ClickEvent) {
        self.shelf.dismiss(click.tag).await;

        let url = click.url.unwrap_or_else(|| DEFAULT_URL.to_string());

        // Always a fresh enumeration: stale handles must not be acted on.
        let windows = self.windows.enumerate().await;
        let target = windows
            .iter()
            .filter(|w| w.origin == self.origin)
            .max_by_key(|w| w.last_focused);

        match target {
            Some(window) => {
                debug!(id = ?window.id, %url, "routing click to open window");
                if let Err(e) = self.windows.navigate(window.id, url).await {
                    warn!("navigate failed: {e}");
                    return;
                }
                if let Err(e) = self.windows.focus(window.id).await {
                    warn!("focus failed: {e}");
                }
            }
            None => {
                debug!(%url, "no open window, opening a new one");
                if let Err(e) = self.windows.open(url).await {
                    // Not retried and not surfaced: window chrome owns
                    // any user-facing error.
                    debug!("window open failed: {e}");
                }
            }
        }
    }
}
