//! Per-tick organism state.
//!
//! An [`OrganismState`] is a snapshot of one organism for one tick. The
//! engine creates it mutable (via [`crate::factory`] or
//! [`OrganismState::clone_mutable`]), applies mutators, optionally locks
//! position and size once the organism is spatially indexed, and finally
//! freezes it. Frozen states are what the renderer and untrusted organism
//! code get to see.
//!
//! # Gating
//!
//! | Mutator | Mutable | Unlocked | Alive |
//! |---------|:-------:|:--------:|:-----:|
//! | `add_tick_to_age`, `set_stored_energy`, `burn_energy` | x | | x |
//! | `increase_radius_to`, `set_position`, `set_current_move_action` | x | x | x |
//! | `set_current_reproduce_action`, `reset_*_wait`, `kill` | x | | x |
//! | `add_incubation_tick`, `set_food_chunks`, `record_event`, `lock_size_and_position` | x | | |
//!
//! Checks run in the order frozen, locked, dead, then value checks.

use core::f64::consts::TAU;
use std::num::NonZeroU32;
use std::sync::Arc;

use habitat_species::Species;
use habitat_types::{
    DeathReason, DisplayAction, EnergyState, EventResults, EventResultsFrozen, MoveToAction,
    OrganismEvent, OrganismId, Point, ReproduceAction, Vector,
};

use crate::body::Body;
use crate::error::StateError;
use crate::gate::Gate;

/// One organism's simulation attributes for one tick.
#[derive(Debug)]
pub struct OrganismState {
    id: OrganismId,
    species: Arc<Species>,
    generation: u32,
    pub(crate) gate: Gate,
    alive: bool,
    death_reason: DeathReason,
    stored_energy: f64,
    radius: u32,
    tick_age: u32,
    food_chunks: Option<NonZeroU32>,
    growth_wait: u32,
    reproduction_wait: u32,
    incubation_ticks: u32,
    position: Point,
    actual_direction: i32,
    current_move_action: Option<Arc<MoveToAction>>,
    current_reproduce_action: Option<Arc<ReproduceAction>>,
    events: EventResults,
    pub(crate) body: Body,
}

impl OrganismState {
    /// A living, radius-zero state. Only the factory builds these, and it
    /// immediately raises the radius and seeds energy.
    pub(crate) fn newborn(
        id: OrganismId,
        species: Arc<Species>,
        position: Point,
        generation: u32,
    ) -> Self {
        let body = Body::for_species(&species);
        Self {
            id,
            species,
            generation,
            gate: Gate::Open,
            alive: true,
            death_reason: DeathReason::NotDead,
            stored_energy: 0.0,
            radius: 0,
            tick_age: 0,
            food_chunks: None,
            growth_wait: 0,
            reproduction_wait: 0,
            incubation_ticks: 0,
            position,
            actual_direction: 0,
            current_move_action: None,
            current_reproduce_action: None,
            events: EventResults::new(),
            body,
        }
    }

    /// A fresh, mutable, unlocked copy of this state.
    ///
    /// Actions are shared with the source (they are immutable); the event
    /// results start empty because they never carry across ticks.
    pub fn clone_mutable(&self) -> Self {
        Self {
            id: self.id,
            species: Arc::clone(&self.species),
            generation: self.generation,
            gate: Gate::Open,
            alive: self.alive,
            death_reason: self.death_reason,
            stored_energy: self.stored_energy,
            radius: self.radius,
            tick_age: self.tick_age,
            food_chunks: self.food_chunks,
            growth_wait: self.growth_wait,
            reproduction_wait: self.reproduction_wait,
            incubation_ticks: self.incubation_ticks,
            position: self.position,
            actual_direction: self.actual_direction,
            current_move_action: self.current_move_action.clone(),
            current_reproduce_action: self.current_reproduce_action.clone(),
            events: EventResults::new(),
            body: self.body,
        }
    }

    // -----------------------------------------------------------------------
    // Gate checks
    // -----------------------------------------------------------------------

    pub(crate) const fn ensure_mutable(&self) -> Result<(), StateError> {
        if self.gate.is_mutable() {
            Ok(())
        } else {
            Err(StateError::NotMutable { organism: self.id })
        }
    }

    pub(crate) const fn ensure_unlocked(&self) -> Result<(), StateError> {
        match self.gate {
            Gate::Open => Ok(()),
            Gate::SizePositionLocked => Err(StateError::SizePositionLocked { organism: self.id }),
            Gate::Frozen => Err(StateError::NotMutable { organism: self.id }),
        }
    }

    pub(crate) const fn ensure_alive(&self) -> Result<(), StateError> {
        if self.alive {
            Ok(())
        } else {
            Err(StateError::DeadOrganism { organism: self.id })
        }
    }

    /// Unchecked death. Callers have already passed the gate checks.
    pub(crate) fn die(&mut self, reason: DeathReason) {
        self.alive = false;
        self.current_move_action = None;
        self.stored_energy = 0.0;
        self.death_reason = reason;
        tracing::debug!(
            organism = %self.id,
            species = self.species.name(),
            %reason,
            age = self.tick_age,
            "organism died"
        );
    }

    // -----------------------------------------------------------------------
    // Mutators
    // -----------------------------------------------------------------------

    /// Advance age by one tick.
    ///
    /// Growth and reproduction waits count down first (stopping at zero),
    /// then an organism older than its species life span dies of old age.
    pub fn add_tick_to_age(&mut self) -> Result<(), StateError> {
        self.ensure_mutable()?;
        self.ensure_alive()?;

        self.tick_age = self.tick_age.saturating_add(1);
        self.growth_wait = self.growth_wait.saturating_sub(1);
        self.reproduction_wait = self.reproduction_wait.saturating_sub(1);

        if self.tick_age > self.species.life_span() {
            self.die(DeathReason::OldAge);
        }
        Ok(())
    }

    /// Set stored energy.
    ///
    /// A value at or below zero starves the organism. A value above
    /// [`Self::max_energy`] is clamped to it.
    pub fn set_stored_energy(&mut self, energy: f64) -> Result<(), StateError> {
        self.ensure_mutable()?;
        self.ensure_alive()?;
        if energy.is_nan() {
            return Err(StateError::NonFiniteEnergy { organism: self.id });
        }

        if energy <= 0.0 {
            self.die(DeathReason::Starved);
            return Ok(());
        }

        self.stored_energy = energy.min(self.max_energy());
        Ok(())
    }

    /// Spend `delta` energy, starving if nothing would remain.
    pub fn burn_energy(&mut self, delta: f64) -> Result<(), StateError> {
        self.ensure_mutable()?;
        self.ensure_alive()?;
        if delta.is_nan() {
            return Err(StateError::NonFiniteEnergy { organism: self.id });
        }

        let remaining = self.stored_energy - delta;
        if remaining <= 0.0 {
            self.die(DeathReason::Starved);
            return Ok(());
        }
        self.set_stored_energy(remaining)
    }

    /// Grow to `radius`, which must exceed the current radius.
    pub fn increase_radius_to(&mut self, radius: u32) -> Result<(), StateError> {
        self.ensure_unlocked()?;
        self.ensure_alive()?;
        if radius <= self.radius {
            return Err(StateError::RadiusNotIncreasing {
                organism: self.id,
                current: self.radius,
                requested: radius,
            });
        }
        self.radius = radius;
        Ok(())
    }

    /// Move the organism and re-derive its facing.
    pub fn set_position(&mut self, position: Point) -> Result<(), StateError> {
        self.ensure_unlocked()?;
        self.ensure_alive()?;
        self.position = position;
        self.update_direction();
        Ok(())
    }

    /// Replace the move action (or stop with `None`) and re-derive facing.
    pub fn set_current_move_action(
        &mut self,
        action: Option<Arc<MoveToAction>>,
    ) -> Result<(), StateError> {
        self.ensure_unlocked()?;
        self.ensure_alive()?;
        if action.is_some() && self.body.is_plant() {
            return Err(StateError::StationaryOrganism { organism: self.id });
        }
        self.current_move_action = action;
        self.update_direction();
        Ok(())
    }

    /// Start incubating with `Some`, or end incubation with `None`.
    ///
    /// `None` covers both an aborted and a completed reproduction and
    /// resets the incubation count. Starting while a previous incubation
    /// has already accumulated ticks is refused.
    pub fn set_current_reproduce_action(
        &mut self,
        action: Option<Arc<ReproduceAction>>,
    ) -> Result<(), StateError> {
        self.ensure_mutable()?;
        self.ensure_alive()?;
        match action {
            None => {
                self.incubation_ticks = 0;
                self.current_reproduce_action = None;
            }
            Some(_) if self.incubation_ticks != 0 => {
                return Err(StateError::AlreadyIncubating {
                    organism: self.id,
                    incubation_ticks: self.incubation_ticks,
                });
            }
            Some(action) => self.current_reproduce_action = Some(action),
        }
        Ok(())
    }

    /// Count one more tick of incubation.
    pub fn add_incubation_tick(&mut self) -> Result<(), StateError> {
        self.ensure_mutable()?;
        self.incubation_ticks = self.incubation_ticks.saturating_add(1);
        Ok(())
    }

    /// Restart the growth countdown from the species growth wait.
    pub fn reset_growth_wait(&mut self) -> Result<(), StateError> {
        self.ensure_mutable()?;
        self.ensure_alive()?;
        self.growth_wait = self.species.growth_wait();
        Ok(())
    }

    /// Restart the reproduction countdown from the species reproduction wait.
    pub fn reset_reproduction_wait(&mut self) -> Result<(), StateError> {
        self.ensure_mutable()?;
        self.ensure_alive()?;
        self.reproduction_wait = self.species.reproduction_wait();
        Ok(())
    }

    /// Set how many food chunks the organism offers when eaten.
    pub fn set_food_chunks(&mut self, chunks: u32) -> Result<(), StateError> {
        self.ensure_mutable()?;
        let chunks =
            NonZeroU32::new(chunks).ok_or(StateError::InvalidFoodChunks { organism: self.id })?;
        self.food_chunks = Some(chunks);
        Ok(())
    }

    /// Record something that happened to the organism this tick.
    pub fn record_event(&mut self, event: OrganismEvent) -> Result<(), StateError> {
        self.ensure_mutable()?;
        self.events
            .push(event)
            .map_err(|EventResultsFrozen| StateError::NotMutable { organism: self.id })
    }

    /// Kill the organism. There is no way back.
    pub fn kill(&mut self, reason: DeathReason) -> Result<(), StateError> {
        self.ensure_mutable()?;
        self.ensure_alive()?;
        if reason == DeathReason::NotDead {
            return Err(StateError::InvalidDeathReason { organism: self.id });
        }
        self.die(reason);
        Ok(())
    }

    /// Refuse further position and size changes. Call once the organism
    /// has been placed in the spatial index. Idempotent while mutable.
    pub fn lock_size_and_position(&mut self) -> Result<(), StateError> {
        self.ensure_mutable()?;
        self.gate = Gate::SizePositionLocked;
        Ok(())
    }

    /// Freeze the state and its event results. Idempotent.
    pub fn make_immutable(&mut self) {
        self.gate = Gate::Frozen;
        self.events.make_immutable();
    }

    fn update_direction(&mut self) {
        let Some(action) = &self.current_move_action else {
            return;
        };
        let Some(unit) = Vector::subtract(self.position, action.destination).unit_vector() else {
            return;
        };

        let mut angle = unit.x().clamp(-1.0, 1.0).acos();
        if unit.y() < 0.0 {
            angle = TAU - angle;
        }
        self.actual_direction = radians_to_degrees(angle);
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Unique organism id, shared by every tick's snapshot.
    pub const fn id(&self) -> OrganismId {
        self.id
    }

    /// The organism's species.
    pub const fn species(&self) -> &Arc<Species> {
        &self.species
    }

    /// Generation number; seed organisms are generation zero.
    pub const fn generation(&self) -> u32 {
        self.generation
    }

    /// Whether the organism is alive.
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Why the organism died, or [`DeathReason::NotDead`].
    pub const fn death_reason(&self) -> DeathReason {
        self.death_reason
    }

    /// Stored energy.
    pub const fn stored_energy(&self) -> f64 {
        self.stored_energy
    }

    /// Radius in pixels.
    pub const fn radius(&self) -> u32 {
        self.radius
    }

    /// Ticks lived.
    pub const fn tick_age(&self) -> u32 {
        self.tick_age
    }

    /// Food chunks offered when eaten, if set.
    pub fn food_chunks(&self) -> Option<u32> {
        self.food_chunks.map(NonZeroU32::get)
    }

    /// Ticks until the organism may grow again.
    pub const fn growth_wait(&self) -> u32 {
        self.growth_wait
    }

    /// Ticks until the organism may reproduce again.
    pub const fn reproduction_wait(&self) -> u32 {
        self.reproduction_wait
    }

    /// Ticks of incubation accumulated.
    pub const fn incubation_ticks(&self) -> u32 {
        self.incubation_ticks
    }

    /// Position in world pixels.
    pub const fn position(&self) -> Point {
        self.position
    }

    /// Facing in whole degrees, 0-359.
    pub const fn actual_direction(&self) -> i32 {
        self.actual_direction
    }

    /// The move action in progress.
    pub const fn current_move_action(&self) -> Option<&Arc<MoveToAction>> {
        self.current_move_action.as_ref()
    }

    /// The reproduce action in progress.
    pub const fn current_reproduce_action(&self) -> Option<&Arc<ReproduceAction>> {
        self.current_reproduce_action.as_ref()
    }

    /// Events recorded this tick.
    pub const fn events(&self) -> &EventResults {
        &self.events
    }

    /// Plant or animal body.
    pub const fn body(&self) -> &Body {
        &self.body
    }

    /// Whether a move action is in progress.
    pub const fn is_moving(&self) -> bool {
        self.current_move_action.is_some()
    }

    /// Whether a reproduce action is in progress.
    pub const fn is_incubating(&self) -> bool {
        self.current_reproduce_action.is_some()
    }

    /// Whether the state still accepts mutators.
    pub const fn is_mutable(&self) -> bool {
        self.gate.is_mutable()
    }

    /// Whether the state has been frozen.
    pub const fn is_frozen(&self) -> bool {
        self.gate.is_frozen()
    }

    /// Whether position and size can no longer change.
    pub const fn is_size_position_locked(&self) -> bool {
        self.gate.is_size_position_locked()
    }

    // -----------------------------------------------------------------------
    // Derived
    // -----------------------------------------------------------------------

    /// Energy capacity at the current radius.
    pub fn max_energy(&self) -> f64 {
        self.species.max_energy_for_radius(self.radius)
    }

    /// Energy ceiling of `state` at the current radius.
    pub fn upper_boundary_for(&self, state: EnergyState) -> f64 {
        self.max_energy() / 5.0 * f64::from(state.upper_fifths())
    }

    /// Which fifth of capacity the stored energy falls in.
    pub fn energy_state(&self) -> EnergyState {
        let bucket = self.max_energy() / 5.0;
        let energy = self.stored_energy;
        if energy > bucket * 4.0 {
            EnergyState::Full
        } else if energy > bucket * 2.0 {
            EnergyState::Normal
        } else if energy > bucket {
            EnergyState::Hungry
        } else if energy > 0.0 {
            EnergyState::Deterioration
        } else {
            EnergyState::Dead
        }
    }

    /// Whether the organism has reached its species' mature radius.
    pub fn is_mature(&self) -> bool {
        self.radius == self.species.mature_radius()
    }

    /// What to show for the tick just completed. The first match wins:
    /// dead, teleported, attacked, ate, moved, defended, reproduced.
    pub fn previous_display_action(&self) -> DisplayAction {
        if !self.alive {
            DisplayAction::Dead
        } else if self.events.teleported() {
            DisplayAction::Teleported
        } else if self.events.attacked() {
            DisplayAction::Attacked
        } else if self.events.ate() {
            DisplayAction::Ate
        } else if self.events.move_completed() || self.is_moving() {
            DisplayAction::Moved
        } else if self.events.defended() {
            DisplayAction::Defended
        } else if self.events.reproduce_completed() || self.is_incubating() {
            DisplayAction::Reproduced
        } else {
            DisplayAction::NoAction
        }
    }
}

/// Whole degrees in `0..360`, truncating.
#[allow(clippy::cast_possible_truncation)]
fn radians_to_degrees(angle: f64) -> i32 {
    ((angle / (TAU / 360.0)) as i32).rem_euclid(360)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use habitat_types::{ActionId, DeathReason, OrganismEvent};

    use super::*;
    use crate::factory::spawn;
    use crate::test_support::{fern, grazer};

    fn living_grazer() -> OrganismState {
        spawn(grazer(), Point::new(100, 100)).unwrap()
    }

    fn move_to(state: &OrganismState, x: i32, y: i32) -> Option<Arc<MoveToAction>> {
        Some(Arc::new(MoveToAction::new(state.id(), Point::new(x, y), 5)))
    }

    #[test]
    fn aging_counts_down_timers_and_stops_at_zero() {
        let mut state = living_grazer();
        assert_eq!(state.growth_wait(), 10);
        for _ in 0..12 {
            assert!(state.add_tick_to_age().is_ok());
        }
        assert_eq!(state.tick_age(), 12);
        assert_eq!(state.growth_wait(), 0);
        assert_eq!(state.reproduction_wait(), 0);
    }

    #[test]
    fn old_age_kills_on_the_tick_past_life_span() {
        let mut state = living_grazer();
        let life_span = state.species().life_span();
        for _ in 0..life_span {
            assert!(state.add_tick_to_age().is_ok());
        }
        assert!(state.is_alive());

        assert!(state.reset_growth_wait().is_ok());
        assert!(state.add_tick_to_age().is_ok());
        assert!(!state.is_alive());
        assert_eq!(state.death_reason(), DeathReason::OldAge);
        // The timer still counted down on the fatal tick.
        assert_eq!(state.growth_wait(), state.species().growth_wait() - 1);
        assert!(matches!(
            state.add_tick_to_age(),
            Err(StateError::DeadOrganism { .. })
        ));
    }

    #[test]
    fn non_positive_energy_starves() {
        for energy in [0.0, -0.5, -1000.0, f64::NEG_INFINITY] {
            let mut state = living_grazer();
            assert!(state.set_stored_energy(energy).is_ok());
            assert!(!state.is_alive());
            assert_eq!(state.death_reason(), DeathReason::Starved);
            assert!(state.stored_energy().abs() < f64::EPSILON);
            assert_eq!(state.energy_state(), EnergyState::Dead);
        }
    }

    #[test]
    fn energy_is_clamped_to_capacity() {
        let mut state = living_grazer();
        let capacity = state.max_energy();
        assert!(state.set_stored_energy(capacity * 10.0).is_ok());
        assert!((state.stored_energy() - capacity).abs() < 1e-9);
        assert_eq!(state.energy_state(), EnergyState::Full);

        assert!(state.set_stored_energy(capacity / 2.0).is_ok());
        assert!((state.stored_energy() - capacity / 2.0).abs() < 1e-9);
    }

    #[test]
    fn nan_energy_is_rejected_without_change() {
        let mut state = living_grazer();
        let before = state.stored_energy();
        assert!(matches!(
            state.set_stored_energy(f64::NAN),
            Err(StateError::NonFiniteEnergy { .. })
        ));
        assert!((state.stored_energy() - before).abs() < f64::EPSILON);
        assert!(state.is_alive());
    }

    #[test]
    fn burning_everything_starves() {
        let mut state = living_grazer();
        let energy = state.stored_energy();
        assert!(state.burn_energy(energy / 2.0).is_ok());
        assert!((state.stored_energy() - energy / 2.0).abs() < 1e-9);
        assert!(state.burn_energy(energy / 2.0).is_ok());
        assert!(!state.is_alive());
        assert_eq!(state.death_reason(), DeathReason::Starved);
    }

    #[test]
    fn energy_buckets_follow_fifths() {
        let mut state = living_grazer();
        let fifth = state.max_energy() / 5.0;
        let cases = [
            (fifth * 0.5, EnergyState::Deterioration),
            (fifth, EnergyState::Deterioration),
            (fifth * 1.5, EnergyState::Hungry),
            (fifth * 2.0, EnergyState::Hungry),
            (fifth * 3.0, EnergyState::Normal),
            (fifth * 4.0, EnergyState::Normal),
            (fifth * 4.5, EnergyState::Full),
        ];
        for (energy, expected) in cases {
            assert!(state.set_stored_energy(energy).is_ok());
            assert_eq!(state.energy_state(), expected, "energy {energy}");
        }
    }

    #[test]
    fn radius_only_increases() {
        let mut state = living_grazer();
        let start = state.radius();
        for radius in [start + 1, start + 4, start + 5] {
            assert!(state.increase_radius_to(radius).is_ok());
            assert_eq!(state.radius(), radius);
        }
        let current = state.radius();
        for radius in [current, current - 1, 0] {
            assert_eq!(
                state.increase_radius_to(radius),
                Err(StateError::RadiusNotIncreasing {
                    organism: state.id(),
                    current,
                    requested: radius,
                })
            );
            assert_eq!(state.radius(), current);
        }
    }

    #[test]
    fn facing_follows_move_destination() {
        let mut state = living_grazer();
        // Due east.
        assert!(state.set_current_move_action(move_to(&state, 200, 100)).is_ok());
        assert_eq!(state.actual_direction(), 0);
        // Due south in screen coordinates (positive y).
        assert!(state.set_current_move_action(move_to(&state, 100, 200)).is_ok());
        assert_eq!(state.actual_direction(), 90);
        // Due west.
        assert!(state.set_current_move_action(move_to(&state, 0, 100)).is_ok());
        assert_eq!(state.actual_direction(), 180);
        // Negative y reflects the angle.
        assert!(state.set_current_move_action(move_to(&state, 100, 0)).is_ok());
        assert_eq!(state.actual_direction(), 270);
    }

    #[test]
    fn facing_uses_the_fast_unit_vector() {
        let mut state = living_grazer();
        // (3, 4): fast unit x = 3 / 5.5, acos -> 56.944 degrees, truncated.
        assert!(state.set_current_move_action(move_to(&state, 103, 104)).is_ok());
        assert_eq!(state.actual_direction(), 56);
    }

    #[test]
    fn facing_recomputed_when_position_changes() {
        let mut state = living_grazer();
        assert!(state.set_current_move_action(move_to(&state, 200, 100)).is_ok());
        assert_eq!(state.actual_direction(), 0);
        assert!(state.set_position(Point::new(300, 100)).is_ok());
        assert_eq!(state.actual_direction(), 180);
    }

    #[test]
    fn facing_kept_without_move_action_or_at_destination() {
        let mut state = living_grazer();
        assert!(state.set_current_move_action(move_to(&state, 100, 200)).is_ok());
        assert_eq!(state.actual_direction(), 90);

        assert!(state.set_position(Point::new(100, 200)).is_ok());
        assert_eq!(state.actual_direction(), 90);

        assert!(state.set_current_move_action(None).is_ok());
        assert!(state.set_position(Point::new(0, 0)).is_ok());
        assert_eq!(state.actual_direction(), 90);
    }

    #[test]
    fn plants_cannot_take_move_actions() {
        let mut plant = spawn(fern(), Point::new(10, 10)).unwrap();
        let action = move_to(&plant, 50, 50);
        assert!(matches!(
            plant.set_current_move_action(action),
            Err(StateError::StationaryOrganism { .. })
        ));
        assert!(plant.set_current_move_action(None).is_ok());
    }

    #[test]
    fn reproduce_action_lifecycle() {
        let mut state = living_grazer();
        let action = Arc::new(ReproduceAction::new(state.id(), None));
        assert!(state.set_current_reproduce_action(Some(Arc::clone(&action))).is_ok());
        assert!(state.is_incubating());

        assert!(state.add_incubation_tick().is_ok());
        assert!(state.add_incubation_tick().is_ok());
        assert_eq!(state.incubation_ticks(), 2);

        let again = Arc::new(ReproduceAction::new(state.id(), None));
        assert_eq!(
            state.set_current_reproduce_action(Some(again)),
            Err(StateError::AlreadyIncubating {
                organism: state.id(),
                incubation_ticks: 2,
            })
        );
        assert!(state.current_reproduce_action().is_some_and(|a| Arc::ptr_eq(a, &action)));

        assert!(state.set_current_reproduce_action(None).is_ok());
        assert_eq!(state.incubation_ticks(), 0);
        assert!(!state.is_incubating());
    }

    #[test]
    fn kill_is_irreversible() {
        let mut state = living_grazer();
        assert!(state.set_current_move_action(move_to(&state, 0, 0)).is_ok());
        assert!(state.kill(DeathReason::Killed).is_ok());

        assert!(!state.is_alive());
        assert!(!state.is_moving());
        assert!(state.stored_energy().abs() < f64::EPSILON);
        assert_eq!(state.death_reason(), DeathReason::Killed);

        let dead = |r: Result<(), StateError>| matches!(r, Err(StateError::DeadOrganism { .. }));
        assert!(dead(state.kill(DeathReason::Starved)));
        assert!(dead(state.add_tick_to_age()));
        assert!(dead(state.set_stored_energy(10.0)));
        assert!(dead(state.burn_energy(1.0)));
        assert!(dead(state.increase_radius_to(40)));
        assert!(dead(state.set_position(Point::new(1, 1))));
        assert!(dead(state.set_current_reproduce_action(None)));
        assert_eq!(state.death_reason(), DeathReason::Killed);
    }

    #[test]
    fn not_dead_is_not_a_death_reason() {
        let mut state = living_grazer();
        assert!(matches!(
            state.kill(DeathReason::NotDead),
            Err(StateError::InvalidDeathReason { .. })
        ));
        assert!(state.is_alive());
    }

    #[test]
    fn dead_organisms_can_still_be_portioned_into_food() {
        let mut state = living_grazer();
        assert!(state.kill(DeathReason::Killed).is_ok());
        assert!(state.set_food_chunks(12).is_ok());
        assert_eq!(state.food_chunks(), Some(12));
        assert!(matches!(
            state.set_food_chunks(0),
            Err(StateError::InvalidFoodChunks { .. })
        ));
        assert_eq!(state.food_chunks(), Some(12));
    }

    #[test]
    fn lock_blocks_only_position_and_size() {
        let mut state = living_grazer();
        assert!(state.lock_size_and_position().is_ok());
        assert!(state.is_size_position_locked());
        assert!(state.is_mutable());

        let locked = |r: Result<(), StateError>| {
            matches!(r, Err(StateError::SizePositionLocked { .. }))
        };
        assert!(locked(state.set_position(Point::new(0, 0))));
        assert!(locked(state.increase_radius_to(30)));
        let action = move_to(&state, 0, 0);
        assert!(locked(state.set_current_move_action(action)));

        assert!(state.burn_energy(1.0).is_ok());
        assert!(state.add_tick_to_age().is_ok());
        assert!(state.add_incubation_tick().is_ok());
        assert!(state.reset_reproduction_wait().is_ok());
        assert!(state.lock_size_and_position().is_ok());
    }

    #[test]
    fn frozen_state_refuses_every_mutator() {
        let mut state = living_grazer();
        state.make_immutable();
        state.make_immutable();
        assert!(state.is_frozen());
        assert!(state.events().is_frozen());

        let frozen = |r: Result<(), StateError>| matches!(r, Err(StateError::NotMutable { .. }));
        assert!(frozen(state.add_tick_to_age()));
        assert!(frozen(state.set_stored_energy(5.0)));
        assert!(frozen(state.burn_energy(1.0)));
        assert!(frozen(state.increase_radius_to(30)));
        assert!(frozen(state.set_position(Point::new(0, 0))));
        assert!(frozen(state.set_current_move_action(None)));
        assert!(frozen(state.set_current_reproduce_action(None)));
        assert!(frozen(state.add_incubation_tick()));
        assert!(frozen(state.reset_growth_wait()));
        assert!(frozen(state.reset_reproduction_wait()));
        assert!(frozen(state.set_food_chunks(3)));
        assert!(frozen(state.record_event(OrganismEvent::Teleported)));
        assert!(frozen(state.kill(DeathReason::Killed)));
        assert!(frozen(state.lock_size_and_position()));
        assert!(state.is_alive());
    }

    #[test]
    fn frozen_check_precedes_dead_check() {
        let mut state = living_grazer();
        assert!(state.kill(DeathReason::Suicide).is_ok());
        state.make_immutable();
        assert!(matches!(
            state.add_tick_to_age(),
            Err(StateError::NotMutable { .. })
        ));
    }

    #[test]
    fn clone_mutable_resets_gates_and_copies_position() {
        let mut source = living_grazer();
        assert!(source.set_current_move_action(move_to(&source, 0, 0)).is_ok());
        assert!(source.record_event(OrganismEvent::Teleported).is_ok());
        assert!(source.lock_size_and_position().is_ok());
        source.make_immutable();

        let mut copy = source.clone_mutable();
        assert!(copy.is_mutable());
        assert!(!copy.is_size_position_locked());
        assert_eq!(copy.id(), source.id());
        assert!(copy.events().events().is_empty());
        assert!(matches!(
            (copy.current_move_action(), source.current_move_action()),
            (Some(a), Some(b)) if Arc::ptr_eq(a, b)
        ));

        assert!(copy.set_position(Point::new(7, 7)).is_ok());
        assert_eq!(copy.position(), Point::new(7, 7));
        assert_eq!(source.position(), Point::new(100, 100));
    }

    #[test]
    fn maturity_is_exact_radius_match() {
        let mut state = living_grazer();
        let mature = state.species().mature_radius();
        assert!(!state.is_mature());
        assert!(state.increase_radius_to(mature).is_ok());
        assert!(state.is_mature());
    }

    #[test]
    fn display_action_priority() {
        let mut state = living_grazer();
        assert_eq!(state.previous_display_action(), DisplayAction::NoAction);

        let action = Arc::new(ReproduceAction::new(state.id(), None));
        assert!(state.set_current_reproduce_action(Some(action)).is_ok());
        assert_eq!(state.previous_display_action(), DisplayAction::Reproduced);

        let rival = OrganismId::new();
        assert!(state.record_event(OrganismEvent::Defended { attacker: rival }).is_ok());
        assert_eq!(state.previous_display_action(), DisplayAction::Defended);

        assert!(state.set_current_move_action(move_to(&state, 0, 0)).is_ok());
        assert_eq!(state.previous_display_action(), DisplayAction::Moved);

        assert!(state.record_event(OrganismEvent::Ate { food: OrganismId::new() }).is_ok());
        assert_eq!(state.previous_display_action(), DisplayAction::Ate);

        // Moving and attacking in the same tick shows the attack.
        assert!(state.record_event(OrganismEvent::Attacked { target: rival }).is_ok());
        assert_eq!(state.previous_display_action(), DisplayAction::Attacked);

        assert!(state.record_event(OrganismEvent::Teleported).is_ok());
        assert_eq!(state.previous_display_action(), DisplayAction::Teleported);

        assert!(state.kill(DeathReason::Killed).is_ok());
        assert_eq!(state.previous_display_action(), DisplayAction::Dead);
    }

    #[test]
    fn completed_move_counts_as_moved_when_stopped() {
        let mut state = living_grazer();
        let event = OrganismEvent::MoveCompleted {
            action_id: ActionId::new(),
            reached_destination: true,
        };
        assert!(state.record_event(event).is_ok());
        assert!(!state.is_moving());
        assert_eq!(state.previous_display_action(), DisplayAction::Moved);
    }

    #[test]
    fn radians_to_degrees_truncates() {
        assert_eq!(radians_to_degrees(0.0), 0);
        assert_eq!(radians_to_degrees(TAU / 360.0 * 45.9), 45);
        assert_eq!(radians_to_degrees(TAU), 0);
    }
}
