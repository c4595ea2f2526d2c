//! Enumeration types describing an organism's condition.

use serde::{Deserialize, Serialize};

/// Why an organism died. [`DeathReason::NotDead`] is the value for the living.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathReason {
    /// The organism is alive.
    #[default]
    NotDead,
    /// Stored energy reached zero.
    Starved,
    /// Tick age exceeded the species life span.
    OldAge,
    /// Another organism inflicted lethal damage.
    Killed,
    /// The organism's code raised an error.
    Error,
    /// The organism's code exceeded its time slice.
    Timeout,
    /// The organism's code attempted a forbidden operation.
    SecurityException,
    /// The organism's code asked to be removed.
    Suicide,
    /// The species was blacklisted by the host.
    Blacklisted,
}

impl core::fmt::Display for DeathReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotDead => write!(f, "not_dead"),
            Self::Starved => write!(f, "starved"),
            Self::OldAge => write!(f, "old_age"),
            Self::Killed => write!(f, "killed"),
            Self::Error => write!(f, "error"),
            Self::Timeout => write!(f, "timeout"),
            Self::SecurityException => write!(f, "security_exception"),
            Self::Suicide => write!(f, "suicide"),
            Self::Blacklisted => write!(f, "blacklisted"),
        }
    }
}

/// Coarse energy bucket relative to the organism's radius-scaled capacity.
///
/// Ordered from emptiest to fullest, so `state >= EnergyState::Normal`
/// reads naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyState {
    /// No stored energy.
    Dead,
    /// At most one fifth of capacity.
    Deterioration,
    /// Above one fifth, at most two fifths.
    Hungry,
    /// Above two fifths, at most four fifths.
    Normal,
    /// Above four fifths.
    Full,
}

impl EnergyState {
    /// Number of capacity fifths this bucket reaches up to.
    pub const fn upper_fifths(self) -> u32 {
        match self {
            Self::Dead => 0,
            Self::Deterioration => 1,
            Self::Hungry => 2,
            Self::Normal => 4,
            Self::Full => 5,
        }
    }
}

/// What the renderer shows an organism doing for the tick just completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayAction {
    /// The organism is dead.
    Dead,
    /// The organism was teleported by the host.
    Teleported,
    /// The organism attacked another organism.
    Attacked,
    /// The organism ate.
    Ate,
    /// The organism moved or is still moving.
    Moved,
    /// The organism defended against an attack.
    Defended,
    /// The organism reproduced or is incubating.
    Reproduced,
    /// Nothing visible happened.
    NoAction,
}
