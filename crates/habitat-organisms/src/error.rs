//! Error types for organism state operations.
//!
//! Every mutator on [`OrganismState`](crate::OrganismState) is
//! all-or-nothing: when it returns an error the state is unchanged. The
//! engine should treat these errors as defects in its own sequencing, not
//! as per-organism faults to retry.

use habitat_types::OrganismId;

/// Broad classification of a [`StateError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The state's gates or liveness forbid the operation.
    InvalidStateOperation,
    /// The requested value would break an organism invariant.
    DomainInvariantViolation,
}

/// Errors returned by organism state mutators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// The state has been frozen.
    #[error("organism {organism}: state is not mutable")]
    NotMutable {
        /// The organism whose state was frozen.
        organism: OrganismId,
    },

    /// Position and size were locked after spatial indexing.
    #[error("organism {organism}: size and position are locked")]
    SizePositionLocked {
        /// The locked organism.
        organism: OrganismId,
    },

    /// The organism is dead.
    #[error("organism {organism}: organism is dead")]
    DeadOrganism {
        /// The dead organism.
        organism: OrganismId,
    },

    /// Radius may only grow.
    #[error("organism {organism}: radius {requested} does not exceed current radius {current}")]
    RadiusNotIncreasing {
        /// The organism.
        organism: OrganismId,
        /// Current radius.
        current: u32,
        /// Requested radius.
        requested: u32,
    },

    /// Food chunk counts must be positive.
    #[error("organism {organism}: food chunk count must be positive")]
    InvalidFoodChunks {
        /// The organism.
        organism: OrganismId,
    },

    /// A reproduce action was set while a previous one is still incubating.
    #[error("organism {organism}: already incubating ({incubation_ticks} ticks)")]
    AlreadyIncubating {
        /// The organism.
        organism: OrganismId,
        /// Incubation ticks accumulated so far.
        incubation_ticks: u32,
    },

    /// `NotDead` is not a cause of death.
    #[error("organism {organism}: not_dead is not a valid death reason")]
    InvalidDeathReason {
        /// The organism.
        organism: OrganismId,
    },

    /// Energy values must be numbers.
    #[error("organism {organism}: energy value is NaN")]
    NonFiniteEnergy {
        /// The organism.
        organism: OrganismId,
    },

    /// Plants cannot take move actions.
    #[error("organism {organism}: plants cannot move")]
    StationaryOrganism {
        /// The plant.
        organism: OrganismId,
    },

    /// The operation only applies to animals.
    #[error("organism {organism}: operation requires an animal")]
    NotAnAnimal {
        /// The plant.
        organism: OrganismId,
    },
}

impl StateError {
    /// Classify this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotMutable { .. } | Self::SizePositionLocked { .. } | Self::DeadOrganism { .. } => {
                ErrorKind::InvalidStateOperation
            }
            Self::RadiusNotIncreasing { .. }
            | Self::InvalidFoodChunks { .. }
            | Self::AlreadyIncubating { .. }
            | Self::InvalidDeathReason { .. }
            | Self::NonFiniteEnergy { .. }
            | Self::StationaryOrganism { .. }
            | Self::NotAnAnimal { .. } => ErrorKind::DomainInvariantViolation,
        }
    }

    /// The organism the failed operation targeted.
    pub const fn organism(&self) -> OrganismId {
        match self {
            Self::NotMutable { organism }
            | Self::SizePositionLocked { organism }
            | Self::DeadOrganism { organism }
            | Self::RadiusNotIncreasing { organism, .. }
            | Self::InvalidFoodChunks { organism }
            | Self::AlreadyIncubating { organism, .. }
            | Self::InvalidDeathReason { organism }
            | Self::NonFiniteEnergy { organism }
            | Self::StationaryOrganism { organism }
            | Self::NotAnAnimal { organism } => *organism,
        }
    }
}
