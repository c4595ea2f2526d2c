//! Actions organism code submits to the engine.
//!
//! Actions are immutable once built. Organism states hold them behind
//! [`Arc`](std::sync::Arc) so clones of a state alias the same action.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::ids::{ActionId, OrganismId};

/// Request to travel toward `destination` at `speed` pixels per tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveToAction {
    /// Identifier of this action.
    pub id: ActionId,
    /// The organism that issued the action.
    pub organism_id: OrganismId,
    /// Target position.
    pub destination: Point,
    /// Requested speed in pixels per tick.
    pub speed: u32,
}

impl MoveToAction {
    /// Build a move action with a fresh id.
    pub fn new(organism_id: OrganismId, destination: Point, speed: u32) -> Self {
        Self {
            id: ActionId::new(),
            organism_id,
            destination,
            speed,
        }
    }
}

/// Request to begin incubating offspring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReproduceAction {
    /// Identifier of this action.
    pub id: ActionId,
    /// The organism that issued the action.
    pub organism_id: OrganismId,
    /// Opaque payload handed to the offspring, if any.
    pub dna: Option<Vec<u8>>,
}

impl ReproduceAction {
    /// Build a reproduce action with a fresh id.
    pub fn new(organism_id: OrganismId, dna: Option<Vec<u8>>) -> Self {
        Self {
            id: ActionId::new(),
            organism_id,
            dna,
        }
    }
}
