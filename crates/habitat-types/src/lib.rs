//! Shared value types for the Habitat ecosystem.
//!
//! Everything here is plain data with no engine dependencies: the species
//! and organism crates build on it, and the same types are what the
//! renderer and organism code observe.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe UUID wrappers for organisms and actions
//! - [`geometry`] -- Integer [`Point`]s and the approximate-magnitude [`Vector`]
//! - [`enums`] -- Death reasons, energy buckets, display actions
//! - [`grid`] -- Power-of-two [`CellGrid`] for cell-granular spatial tests
//! - [`actions`] -- Move and reproduce actions submitted by organism code
//! - [`events`] -- Tick-scoped event results

pub mod actions;
pub mod enums;
pub mod events;
pub mod geometry;
pub mod grid;
pub mod ids;

// Re-export all public types at crate root for convenience.
pub use actions::{MoveToAction, ReproduceAction};
pub use enums::{DeathReason, DisplayAction, EnergyState};
pub use events::{EventResults, EventResultsFrozen, OrganismEvent};
pub use geometry::{Point, Vector};
pub use grid::CellGrid;
pub use ids::{ActionId, OrganismId};
