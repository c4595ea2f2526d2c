//! Per-tick organism state for the Habitat ecosystem.
//!
//! The engine owns one mutable [`OrganismState`] per organism while a tick
//! runs, then freezes it into a [`SharedOrganismState`] that the renderer
//! and organism code may read concurrently. Every mutator is gated on the
//! state's mutability, its position/size lock and the organism being alive,
//! and returns a [`StateError`] instead of changing anything when refused.
//!
//! # Modules
//!
//! - [`annotations`] -- Renderer-owned side table keyed by organism id
//! - [`body`] -- Plant and animal growth, damage and healing
//! - [`error`] -- [`StateError`] and its [`ErrorKind`]
//! - [`factory`] -- Spawning new and offspring organisms
//! - [`gate`] -- The one-way mutability gate
//! - [`shared`] -- Frozen, `Arc`-shared snapshots
//! - [`spatial`] -- Cell-granular adjacency
//! - [`state`] -- [`OrganismState`] and its mutators

pub mod annotations;
pub mod body;
pub mod error;
pub mod factory;
pub mod gate;
pub mod shared;
pub mod spatial;
pub mod state;

#[cfg(test)]
mod test_support;

// Re-export primary types at crate root for convenience.
pub use annotations::RenderAnnotations;
pub use body::Body;
pub use error::{ErrorKind, StateError};
pub use factory::{spawn, spawn_offspring};
pub use gate::Gate;
pub use shared::SharedOrganismState;
pub use spatial::CellFootprint;
pub use state::OrganismState;
