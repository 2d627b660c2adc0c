//! Desktop notification shelf backed by `notify-rust`.
//!
//! Production [`NotificationShelf`] for the push daemon. Tag-keyed
//! replacement is delegated to the desktop notification server; dismissal
//! of an individual tag is not portable across servers and is treated as
//! a no-op here.

use notify_rust::{Notification, Timeout};
use tracing::debug;

use kopro_push_wire::NotificationSpec;
use kopro_router::{NotificationShelf, RouterFuture, ShelfError};

/// Default display duration in milliseconds.
const DEFAULT_TIMEOUT_MS: u32 = 5000;

/// Shelf that renders notifications through the desktop's notification
/// server.
pub struct DesktopShelf {
    app_name: String,
    timeout_ms: u32,
}

impl DesktopShelf {
    /// Creates a shelf announcing itself under the given application name.
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Overrides the display duration.
    pub fn with_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

impl NotificationShelf for DesktopShelf {
    fn show(&self, spec: NotificationSpec) -> RouterFuture<'_, Result<(), ShelfError>> {
        let app_name = self.app_name.clone();
        // Sticky notifications stay until acted on; the rest time out.
        let timeout = if spec.require_interaction {
            Timeout::Never
        } else {
            Timeout::Milliseconds(self.timeout_ms)
        };
        Box::pin(async move {
            // The desktop notification bus is synchronous; keep it off the
            // runtime threads.
            let result = tokio::task::spawn_blocking(move || {
                Notification::new()
                    .summary(&spec.title)
                    .body(&spec.body)
                    .icon(&spec.icon)
                    .appname(&app_name)
                    .timeout(timeout)
                    .show()
            })
            .await;

            match result {
                Ok(Ok(_handle)) => Ok(()),
                Ok(Err(e)) => Err(ShelfError::Unavailable(e.to_string())),
                Err(e) => Err(ShelfError::Unavailable(e.to_string())),
            }
        })
    }

    fn dismiss(&self, tag: String) -> RouterFuture<'_, ()> {
        Box::pin(async move {
            // Per-tag dismissal is not portable across notification
            // servers; the clicked notification is already gone.
            debug!(%tag, "dismiss delegated to the notification server");
        })
    }
}
