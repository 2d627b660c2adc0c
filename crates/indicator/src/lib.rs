//! Connectivity banner state for the client UI.
//!
//! Timer-free and rendering-free: this crate only derives WHICH banner is
//! visible from the connectivity state. Visual styling belongs to the UI
//! layer.

use std::sync::{Arc, Mutex};

use kopro_connectivity::{ConnectivityMonitor, ConnectivityState, EffectiveType, Subscription};

/// The transient connectivity banner. Exactly one variant applies at any
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    /// Online on an acceptable link: show nothing.
    Hidden,
    /// No connectivity.
    Offline,
    /// Online but on a slow link; carries the effective type for display.
    Degraded(EffectiveType),
}

impl Banner {
    /// Derives the banner from a connectivity snapshot.
    pub fn from_state(state: &ConnectivityState) -> Self {
        if !state.is_online {
            Self::Offline
        } else if state.is_slow_connection {
            Self::Degraded(state.effective_type)
        } else {
            Self::Hidden
        }
    }
}

/// Tracks the current banner by subscribing to a [`ConnectivityMonitor`].
pub struct IndicatorPresenter {
    current: Arc<Mutex<Banner>>,
    subscription: Subscription,
}

impl IndicatorPresenter {
    /// Subscribes to the monitor and seeds the banner from its current
    /// state.
    pub fn attach(monitor: &ConnectivityMonitor) -> Self {
        let current = Arc::new(Mutex::new(Banner::from_state(&monitor.state())));
        let shared = current.clone();
        let subscription = monitor.subscribe(move |state| {
            *shared.lock().expect("poisoned") = Banner::from_state(state);
        });
        Self {
            current,
            subscription,
        }
    }

    /// The banner to render right now.
    pub fn banner(&self) -> Banner {
        *self.current.lock().expect("poisoned")
    }

    /// Stops tracking. Safe to call more than once.
    pub fn detach(&self) {
        self.subscription.unsubscribe();
    }
}
