//! In-memory shelf and window registry fakes shared across tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use kopro_push_wire::NotificationSpec;

use crate::RouterFuture;
use crate::shelf::{NotificationShelf, ShelfError};
use crate::windows::{RegistryError, WindowHandle, WindowId, WindowRegistry};

/// In-memory shelf mimicking OS tag replacement.
pub(crate) struct MemoryShelf {
    visible: Mutex<Vec<NotificationSpec>>,
    fail: bool,
    delay: Option<Duration>,
}

impl MemoryShelf {
    pub fn new() -> Self {
        Self {
            visible: Mutex::new(Vec::new()),
            fail: false,
            delay: None,
        }
    }

    /// A shelf whose `show` always fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// A shelf whose `show` takes a while to be acknowledged.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new()
        }
    }

    /// Currently visible notifications, in delivery order.
    pub fn visible(&self) -> Vec<NotificationSpec> {
        self.visible.lock().unwrap().clone()
    }
}

impl NotificationShelf for MemoryShelf {
    fn show(&self, spec: NotificationSpec) -> RouterFuture<'_, Result<(), ShelfError>> {
        Box::pin(async move {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                return Err(ShelfError::Rejected("test shelf rejects".into()));
            }
            let mut visible = self.visible.lock().unwrap();
            // Same tag replaces in place, like the OS shelf.
            if let Some(existing) = visible.iter_mut().find(|n| n.tag == spec.tag) {
                *existing = spec;
            } else {
                visible.push(spec);
            }
            Ok(())
        })
    }

    fn dismiss(&self, tag: String) -> RouterFuture<'_, ()> {
        Box::pin(async move {
            self.visible.lock().unwrap().retain(|n| n.tag != tag);
        })
    }
}

/// A call observed by [`MemoryWindows`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RegistryCall {
    Navigate(WindowId, String),
    Focus(WindowId),
    Open(String),
}

/// In-memory window registry recording every routing call.
pub(crate) struct MemoryWindows {
    windows: Mutex<Vec<WindowHandle>>,
    calls: Mutex<Vec<RegistryCall>>,
    claimed: AtomicUsize,
    next_id: AtomicU64,
    focus_seq: AtomicU64,
    opens_blocked: AtomicBool,
}

impl MemoryWindows {
    pub fn new() -> Self {
        Self {
            windows: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
            claimed: AtomicUsize::new(0),
            next_id: AtomicU64::new(1),
            focus_seq: AtomicU64::new(1),
            opens_blocked: AtomicBool::new(false),
        }
    }

    pub fn add_window(&self, origin: &str) -> WindowId {
        let id = WindowId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let last_focused = self.focus_seq.fetch_add(1, Ordering::SeqCst);
        self.windows.lock().unwrap().push(WindowHandle {
            id,
            origin: origin.to_string(),
            last_focused,
        });
        id
    }

    /// Marks a window as the most recently focused one.
    pub fn touch_focus(&self, id: WindowId) {
        let seq = self.focus_seq.fetch_add(1, Ordering::SeqCst);
        if let Some(w) = self.windows.lock().unwrap().iter_mut().find(|w| w.id == id) {
            w.last_focused = seq;
        }
    }

    /// Makes subsequent `open` calls fail like a blocked popup.
    pub fn block_opens(&self) {
        self.opens_blocked.store(true, Ordering::SeqCst);
    }

    pub fn claimed(&self) -> usize {
        self.claimed.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> Vec<RegistryCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl WindowRegistry for MemoryWindows {
    fn enumerate(&self) -> RouterFuture<'_, Vec<WindowHandle>> {
        Box::pin(async move { self.windows.lock().unwrap().clone() })
    }

    fn claim_all(&self) -> RouterFuture<'_, usize> {
        Box::pin(async move {
            let count = self.windows.lock().unwrap().len();
            self.claimed.store(count, Ordering::SeqCst);
            count
        })
    }

    fn navigate(&self, id: WindowId, url: String) -> RouterFuture<'_, Result<(), RegistryError>> {
        Box::pin(async move {
            self.calls
                .lock()
                .unwrap()
                .push(RegistryCall::Navigate(id, url));
            if self.windows.lock().unwrap().iter().any(|w| w.id == id) {
                Ok(())
            } else {
                Err(RegistryError::Gone(id))
            }
        })
    }

    fn focus(&self, id: WindowId) -> RouterFuture<'_, Result<(), RegistryError>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(RegistryCall::Focus(id));
            self.touch_focus(id);
            Ok(())
        })
    }

    fn open(&self, url: String) -> RouterFuture<'_, Result<WindowId, RegistryError>> {
        Box::pin(async move {
            self.calls.lock().unwrap().push(RegistryCall::Open(url));
            if self.opens_blocked.load(Ordering::SeqCst) {
                return Err(RegistryError::OpenBlocked);
            }
            let id = WindowId(self.next_id.fetch_add(1, Ordering::SeqCst));
            let last_focused = self.focus_seq.fetch_add(1, Ordering::SeqCst);
            self.windows.lock().unwrap().push(WindowHandle {
                id,
                origin: String::new(),
                last_focused,
            });
            Ok(id)
        })
    }
}
