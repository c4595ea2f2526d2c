//! Frozen organism states shared across threads.
//!
//! Once the engine finishes a tick it converts each state into a
//! [`SharedOrganismState`]. The conversion freezes the state and moves it
//! behind an [`Arc`], so the renderer and sandboxed organism code can hold
//! cheap clones without ever reaching a mutator.

use std::ops::Deref;
use std::sync::Arc;

use crate::state::OrganismState;

/// A frozen, reference-counted, read-only organism state.
#[derive(Debug, Clone)]
pub struct SharedOrganismState(Arc<OrganismState>);

impl SharedOrganismState {
    /// Whether two handles point at the same snapshot.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.0, &other.0)
    }
}

impl Deref for SharedOrganismState {
    type Target = OrganismState;

    fn deref(&self) -> &OrganismState {
        &self.0
    }
}

impl OrganismState {
    /// Freeze this state and share it.
    pub fn into_shared(mut self) -> SharedOrganismState {
        self.make_immutable();
        SharedOrganismState(Arc::new(self))
    }
}

impl From<OrganismState> for SharedOrganismState {
    fn from(state: OrganismState) -> Self {
        state.into_shared()
    }
}
