//! Window registry for a headless daemon.
//!
//! The daemon hosts no application windows of its own, so enumeration is
//! always empty and every routed click opens a fresh window through the
//! configured opener command (xdg-open and friends). Navigation and focus
//! of spawned windows are out of the daemon's reach.

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, warn};

use kopro_router::{RegistryError, RouterFuture, WindowHandle, WindowId, WindowRegistry};

/// Opens URLs through an external opener command.
pub struct OpenerWindows {
    origin: String,
    opener: String,
    next_id: AtomicU64,
}

impl OpenerWindows {
    pub fn new(origin: impl Into<String>, opener: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            opener: opener.into(),
            next_id: AtomicU64::new(1),
        }
    }

    /// Resolves a click URL against the application origin.
    fn resolve_target(&self, url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{url}", self.origin)
        } else {
            url.to_string()
        }
    }
}

impl WindowRegistry for OpenerWindows {
    fn enumerate(&self) -> RouterFuture<'_, Vec<WindowHandle>> {
        // No window introspection from here: clicks always open fresh.
        Box::pin(async move { Vec::new() })
    }

    fn claim_all(&self) -> RouterFuture<'_, usize> {
        Box::pin(async move { 0 })
    }

    fn navigate(&self, id: WindowId, _url: String) -> RouterFuture<'_, Result<(), RegistryError>> {
        Box::pin(async move { Err(RegistryError::Gone(id)) })
    }

    fn focus(&self, id: WindowId) -> RouterFuture<'_, Result<(), RegistryError>> {
        Box::pin(async move { Err(RegistryError::Gone(id)) })
    }

    fn open(&self, url: String) -> RouterFuture<'_, Result<WindowId, RegistryError>> {
        let target = self.resolve_target(&url);
        Box::pin(async move {
            debug!(%target, opener = %self.opener, "opening window");
            match tokio::process::Command::new(&self.opener)
                .arg(&target)
                .spawn()
            {
                Ok(_child) => Ok(WindowId(self.next_id.fetch_add(1, Ordering::SeqCst))),
                Err(e) => {
                    warn!(opener = %self.opener, "opener failed: {e}");
                    Err(RegistryError::Backend(e.to_string()))
                }
            }
        })
    }
}
