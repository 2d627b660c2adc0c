//! Connectivity state and its transition inputs.

use serde::{Deserialize, Serialize};

/// Coarse link-quality classification reported by the platform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectiveType {
    #[serde(rename = "slow-2g")]
    Slow2g,
    #[serde(rename = "2g")]
    TwoG,
    #[serde(rename = "3g")]
    ThreeG,
    #[serde(rename = "4g")]
    FourG,
    /// No link-quality metadata available on this platform.
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl EffectiveType {
    /// Whether this classification counts as a slow link.
    pub fn is_slow(self) -> bool {
        matches!(self, Self::Slow2g | Self::TwoG)
    }
}

/// A platform connectivity signal consumed by the monitor.
///
/// Online/offline flips and link-quality changes arrive independently:
/// a link can degrade while staying online.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSignal {
    Online,
    Offline,
    LinkChanged(EffectiveType),
}

/// Snapshot of network reachability and link quality.
///
/// `is_slow_connection` is derived, never set independently: it is true
/// exactly when the link is online with a slow-2g or 2g effective type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectivityState {
    pub is_online: bool,
    pub is_slow_connection: bool,
    pub effective_type: EffectiveType,
}

impl ConnectivityState {
    /// Builds a state with `is_slow_connection` recomputed from the inputs.
    pub fn derive(is_online: bool, effective_type: EffectiveType) -> Self {
        Self {
            is_online,
            is_slow_connection: is_online && effective_type.is_slow(),
            effective_type,
        }
    }

    /// Applies one platform signal, returning the resulting state.
    pub fn apply(self, signal: LinkSignal) -> Self {
        match signal {
            LinkSignal::Online => Self::derive(true, self.effective_type),
            LinkSignal::Offline => Self::derive(false, self.effective_type),
            LinkSignal::LinkChanged(effective_type) => Self::derive(self.is_online, effective_type),
        }
    }
}

impl Default for ConnectivityState {
    /// Best-effort default: online with no link metadata.
    fn default() -> Self {
        Self::derive(true, EffectiveType::Unknown)
    }
}
