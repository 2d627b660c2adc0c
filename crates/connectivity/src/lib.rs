//! Network reachability and link-quality monitoring.
//!
//! Maintains a single continuously-updated [`ConnectivityState`] from
//! platform online/offline and link-change signals, and notifies
//! subscribers on every change. The monitor trusts platform-reported
//! signals and never probes the network itself, so captive portals and
//! carrier proxies can produce false positives.

mod monitor;
mod state;

pub use monitor::{ConnectivityMonitor, ListenerGuard, SignalSink, SignalSource, Subscription};
pub use state::{ConnectivityState, EffectiveType, LinkSignal};
