//! The one-way mutability gate carried by every organism state.
//!
//! ```text
//! Open --lock--> SizePositionLocked --freeze--> Frozen
//!   \______________________freeze_______________^
//! ```
//!
//! No transition leads back. A frozen gate also reports position and size
//! as locked, since nothing can change them any more.

/// Mutability of an organism state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gate {
    /// Every mutator is allowed.
    #[default]
    Open,
    /// Position, radius and move-action mutators are refused; others allowed.
    SizePositionLocked,
    /// Every mutator is refused.
    Frozen,
}

impl Gate {
    /// Whether any mutator may run.
    pub const fn is_mutable(self) -> bool {
        !matches!(self, Self::Frozen)
    }

    /// Whether position and size mutators are refused.
    pub const fn is_size_position_locked(self) -> bool {
        !matches!(self, Self::Open)
    }

    /// Whether the state has been frozen.
    pub const fn is_frozen(self) -> bool {
        matches!(self, Self::Frozen)
    }
}
