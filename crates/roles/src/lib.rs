//! Role tiers and access hierarchy.
//!
//! Four fixed tiers with a strict ordering: owner > manager > council
//! > resident. The ranks are part of the access-control contract, not
//! display hints; comparisons go through them.

use serde::{Deserialize, Serialize};

/// A user's role within a residence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "owner")]
    Owner,
    #[serde(rename = "manager")]
    Manager,
    /// Conseil syndical member.
    #[serde(rename = "cs")]
    CouncilMember,
    #[serde(rename = "resident")]
    Resident,
}

impl Role {
    /// All roles, highest tier first.
    pub const ALL: [Role; 4] = [
        Role::Owner,
        Role::Manager,
        Role::CouncilMember,
        Role::Resident,
    ];

    /// Numeric tier used for access comparisons.
    pub fn rank(self) -> u8 {
        match self {
            Role::Owner => 100,
            Role::Manager => 60,
            Role::CouncilMember => 40,
            Role::Resident => 20,
        }
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Role::Owner => "Propriétaire",
            Role::Manager => "Gestionnaire",
            Role::CouncilMember => "Conseil syndical",
            Role::Resident => "Résident",
        }
    }

    /// Whether this role sits at or above the required tier.
    pub fn at_least(self, required: Role) -> bool {
        self.rank() >= required.rank()
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
