//! The OS notification subsystem seam.

use kopro_push_wire::NotificationSpec;

use crate::RouterFuture;

/// Errors surfaced by a notification shelf backend.
#[derive(Debug, thiserror::Error)]
pub enum ShelfError {
    #[error("notification backend unavailable: {0}")]
    Unavailable(String),

    #[error("notification rejected: {0}")]
    Rejected(String),
}

/// The OS notification subsystem.
///
/// Implementations own presentation and tag-keyed de-duplication: showing
/// a notification whose `tag` matches a visible one replaces it in place.
/// `show` resolves only once the OS has acknowledged the notification;
/// callers hold their unit of work open on it.
pub trait NotificationShelf: Send + Sync + 'static {
    /// Shows (or replaces, by tag) one notification.
    fn show(&self, spec: NotificationSpec) -> RouterFuture<'_, Result<(), ShelfError>>;

    /// Dismisses the visible notification with this tag. Dismissing an
    /// absent tag is a no-op.
    fn dismiss(&self, tag: String) -> RouterFuture<'_, ()>;
}
