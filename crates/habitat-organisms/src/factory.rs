//! Creating organisms.
//!
//! Every organism starts the same way: a fresh id, radius raised from zero
//! to the species' initial radius, energy seeded at the top of the
//! `Hungry` bucket, the growth wait running, and a `Born` event recorded.

use std::sync::Arc;

use habitat_species::Species;
use habitat_types::{EnergyState, OrganismEvent, OrganismId, Point};

use crate::error::StateError;
use crate::state::OrganismState;

/// Spawn a first-generation organism of `species` at `position`.
pub fn spawn(species: Arc<Species>, position: Point) -> Result<OrganismState, StateError> {
    birth(species, position, 0)
}

/// Spawn the offspring of `parent` at `position`.
///
/// The offspring shares the parent's species and is one generation later.
/// The parent is not modified; ending its incubation is the caller's job.
pub fn spawn_offspring(
    parent: &OrganismState,
    position: Point,
) -> Result<OrganismState, StateError> {
    birth(
        Arc::clone(parent.species()),
        position,
        parent.generation().saturating_add(1),
    )
}

fn birth(
    species: Arc<Species>,
    position: Point,
    generation: u32,
) -> Result<OrganismState, StateError> {
    let initial_radius = species.initial_radius();
    let mut state = OrganismState::newborn(OrganismId::new(), species, position, generation);

    state.increase_radius_to(initial_radius)?;
    let seed_energy = state.upper_boundary_for(EnergyState::Hungry);
    state.set_stored_energy(seed_energy)?;
    state.reset_growth_wait()?;
    state.record_event(OrganismEvent::Born)?;

    tracing::debug!(
        organism = %state.id(),
        species = state.species().name(),
        generation,
        x = position.x,
        y = position.y,
        radius = initial_radius,
        "organism spawned"
    );

    Ok(state)
}
