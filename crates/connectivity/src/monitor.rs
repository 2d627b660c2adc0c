//! The connectivity monitor: signal intake, subscriptions, disposal.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use tracing::debug;

use crate::state::{ConnectivityState, LinkSignal};

type Callback = Arc<dyn Fn(&ConnectivityState) + Send + Sync>;

/// Platform binding the monitor reads its signals from.
///
/// `attach` must register the platform listeners and forward every signal
/// into the given [`SignalSink`]. Dropping the returned guard releases the
/// listeners.
pub trait SignalSource {
    /// Best-effort snapshot at initialization time. When link-quality
    /// metadata is unavailable, report `EffectiveType::Unknown`.
    fn initial_state(&self) -> ConnectivityState;

    /// Registers platform listeners feeding the sink.
    fn attach(&self, sink: SignalSink) -> ListenerGuard;
}

/// Handle a [`SignalSource`] uses to push signals into its monitor.
///
/// Holds only a weak reference: a sink outliving its monitor delivers
/// nowhere instead of keeping the monitor alive.
#[derive(Clone)]
pub struct SignalSink {
    inner: Weak<Inner>,
}

impl SignalSink {
    /// Delivers one platform signal. A no-op after the monitor is disposed.
    pub fn emit(&self, signal: LinkSignal) {
        if let Some(inner) = self.inner.upgrade() {
            inner.handle_signal(signal);
        }
    }
}

/// Releases platform listeners when dropped or explicitly released.
pub struct ListenerGuard(Option<Box<dyn FnOnce() + Send>>);

impl ListenerGuard {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self(Some(Box::new(release)))
    }

    /// Guard for sources with nothing to release.
    pub fn noop() -> Self {
        Self(None)
    }

    fn release(&mut self) {
        if let Some(f) = self.0.take() {
            f();
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.release();
    }
}

/// Handle returned by [`ConnectivityMonitor::subscribe`].
///
/// `unsubscribe` is idempotent and safe to call any number of times; the
/// subscription is NOT released on drop, matching the explicit-disposal
/// contract of the monitor.
pub struct Subscription {
    id: u64,
    inner: Weak<Inner>,
}

impl Subscription {
    /// Removes the callback. Subsequent calls are no-ops.
    pub fn unsubscribe(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.subscribers.lock().expect("poisoned").remove(&self.id);
        }
    }
}

struct Inner {
    state: Mutex<ConnectivityState>,
    subscribers: Mutex<HashMap<u64, Callback>>,
    next_id: AtomicU64,
    disposed: AtomicBool,
    guards: Mutex<Vec<ListenerGuard>>,
}

impl Inner {
    fn handle_signal(&self, signal: LinkSignal) {
        if self.disposed.load(Ordering::Acquire) {
            return;
        }

        let snapshot = {
            let mut state = self.state.lock().expect("poisoned");
            let next = state.apply(signal);
            if next == *state {
                return;
            }
            *state = next;
            next
        };
        debug!(?signal, ?snapshot, "connectivity changed");

        // Each change dispatches its own notification; callbacks run
        // synchronously in this turn, outside the state lock so they can
        // read the monitor back.
        let callbacks: Vec<Callback> = self
            .subscribers
            .lock()
            .expect("poisoned")
            .values()
            .cloned()
            .collect();
        for cb in callbacks {
            cb(&snapshot);
        }
    }
}

/// Maintains a single continuously-updated [`ConnectivityState`] and
/// notifies subscribers on every change.
///
/// All mutation funnels through [`SignalSink::emit`]; reads never block on
/// anything but a short state lock and never fail.
pub struct ConnectivityMonitor {
    inner: Arc<Inner>,
}

impl ConnectivityMonitor {
    /// Creates a monitor bound to a platform source: takes the initial
    /// snapshot and registers the source's listeners.
    pub fn new(source: &dyn SignalSource) -> Self {
        let monitor = Self::with_initial(source.initial_state());
        let guard = source.attach(monitor.sink());
        monitor
            .inner
            .guards
            .lock()
            .expect("poisoned")
            .push(guard);
        monitor
    }

    /// Creates an unbound monitor from a snapshot. Signals are fed through
    /// [`ConnectivityMonitor::sink`].
    pub fn with_initial(initial: ConnectivityState) -> Self {
        // Re-derive so a hand-built snapshot can't smuggle in an
        // inconsistent slow flag.
        let state = ConnectivityState::derive(initial.is_online, initial.effective_type);
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                subscribers: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(0),
                disposed: AtomicBool::new(false),
                guards: Mutex::new(Vec::new()),
            }),
        }
    }

    /// A sink for feeding signals into this monitor.
    pub fn sink(&self) -> SignalSink {
        SignalSink {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// The last computed snapshot. Never blocks on platform calls, never fails.
    pub fn state(&self) -> ConnectivityState {
        *self.inner.state.lock().expect("poisoned")
    }

    /// Registers a callback invoked with the new state on every change.
    pub fn subscribe(
        &self,
        callback: impl Fn(&ConnectivityState) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .subscribers
            .lock()
            .expect("poisoned")
            .insert(id, Arc::new(callback));
        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Releases platform listeners and drops all subscribers.
    ///
    /// After disposal no callback is ever invoked again and further signals
    /// are ignored. Idempotent.
    pub fn dispose(&self) {
        if self.inner.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        self.inner.subscribers.lock().expect("poisoned").clear();
        let mut guards = self.inner.guards.lock().expect("poisoned");
        for guard in guards.iter_mut() {
            guard.release();
        }
        guards.clear();
        debug!("connectivity monitor disposed");
    }
}
