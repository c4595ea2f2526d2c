//! Dry-run a freshly spawned organism through a few ticks.

use std::sync::Arc;

use habitat_organisms::{RenderAnnotations, SharedOrganismState, StateError, spawn};
use habitat_species::{Species, SpeciesKind};
use habitat_types::{DeathReason, DisplayAction, EnergyState, OrganismId, Point};
use serde::Serialize;

/// Ticks each sample organism is run for.
pub const DRY_RUN_TICKS: u32 = 12;

/// What one species looks like after a short dry run.
#[derive(Debug, Clone, Serialize)]
pub struct SpeciesReport {
    /// Id of the sample organism; its summary annotation is keyed by it.
    pub organism: OrganismId,
    /// Species name.
    pub name: String,
    /// `plant`, `herbivore` or `carnivore`.
    pub kind: &'static str,
    /// Characteristic points spent.
    pub points_spent: u32,
    /// Number of budget warnings.
    pub warnings: usize,
    /// Life span in ticks.
    pub life_span: u32,
    /// Radius after the dry run.
    pub radius: u32,
    /// Stored energy after the dry run.
    pub stored_energy: f64,
    /// Energy bucket after the dry run.
    pub energy_state: EnergyState,
    /// Death reason, `not_dead` if the sample survived.
    pub death_reason: DeathReason,
    /// Display action for the final tick.
    pub display_action: DisplayAction,
}

/// Spawn one organism of `species` and run it for [`DRY_RUN_TICKS`].
///
/// Each tick clones the previous frozen snapshot, ages it, lets it grow,
/// locks it and freezes it again, the way the engine would. The final
/// snapshot's summary is also stored in `annotations`.
pub fn dry_run(
    species: &Arc<Species>,
    annotations: &RenderAnnotations<serde_json::Value>,
) -> Result<SpeciesReport, StateError> {
    let mut current = spawn(Arc::clone(species), Point::default())?.into_shared();

    for _ in 0..DRY_RUN_TICKS {
        if !current.is_alive() {
            break;
        }
        current = next_tick(&current)?;
    }

    let kind = match species.kind() {
        SpeciesKind::Plant { .. } => "plant",
        SpeciesKind::Animal(animal) if animal.carnivore => "carnivore",
        SpeciesKind::Animal(_) => "herbivore",
    };
    let summary = serde_json::json!({
        "kind": kind,
        "percent_injured": current.percent_injured(),
        "direction": current.actual_direction(),
    });
    if let Some(previous) = annotations.set(current.id(), summary) {
        tracing::warn!(organism = %current.id(), %previous, "replaced existing annotation");
    }

    Ok(SpeciesReport {
        organism: current.id(),
        name: species.name().to_owned(),
        kind,
        points_spent: species.points_spent(),
        warnings: species.warnings().len(),
        life_span: species.life_span(),
        radius: current.radius(),
        stored_energy: current.stored_energy(),
        energy_state: current.energy_state(),
        death_reason: current.death_reason(),
        display_action: current.previous_display_action(),
    })
}

fn next_tick(previous: &SharedOrganismState) -> Result<SharedOrganismState, StateError> {
    let mut next = previous.clone_mutable();
    next.add_tick_to_age()?;
    if next.is_alive() {
        let grew = next.grow()?;
        tracing::trace!(organism = %next.id(), grew, "dry tick");
    }
    next.lock_size_and_position()?;
    Ok(next.into_shared())
}
