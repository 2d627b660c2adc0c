//! The client window set seam.

use crate::RouterFuture;

/// Opaque identifier for one application window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u64);

/// One currently open application window, as enumerated at click time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowHandle {
    pub id: WindowId,
    /// Scheme + host + port of the document the window shows.
    pub origin: String,
    /// Monotonic focus sequence: higher means focused more recently.
    pub last_focused: u64,
}

/// Errors surfaced by a window registry backend.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("window {0:?} is gone")]
    Gone(WindowId),

    #[error("window open blocked")]
    OpenBlocked,

    #[error("registry backend error: {0}")]
    Backend(String),
}

/// The set of currently open application windows.
///
/// `enumerate` is re-queried on every click and handles are never cached,
/// so the router cannot act on a window that closed in the meantime.
pub trait WindowRegistry: Send + Sync + 'static {
    /// All currently open windows, including ones the router does not
    /// control yet.
    fn enumerate(&self) -> RouterFuture<'_, Vec<WindowHandle>>;

    /// Takes control of every open window immediately. Returns how many
    /// windows were claimed.
    fn claim_all(&self) -> RouterFuture<'_, usize>;

    /// Navigates an open window to a new URL.
    fn navigate(&self, id: WindowId, url: String) -> RouterFuture<'_, Result<(), RegistryError>>;

    /// Brings an open window to foreground focus.
    fn focus(&self, id: WindowId) -> RouterFuture<'_, Result<(), RegistryError>>;

    /// Opens a new window at the URL. A blocked popup surfaces as
    /// [`RegistryError::OpenBlocked`].
    fn open(&self, url: String) -> RouterFuture<'_, Result<WindowId, RegistryError>>;
}
