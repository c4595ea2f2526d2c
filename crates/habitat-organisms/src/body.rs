//! Plant and animal bodies.
//!
//! The two organism kinds share [`OrganismState`] and differ only in how
//! they grow, take damage and heal:
//!
//! | | Plant | Animal |
//! |---|---|---|
//! | Damage | refused; burn energy instead | accumulates until lethal |
//! | Healing | restores energy | clears damage, burns energy |
//! | Growth | free once the wait elapses | also needs `Normal` energy and pays for it |
//! | Moving | never | with a move action |

use habitat_species::Species;
use habitat_types::{DeathReason, EnergyState};

use crate::error::StateError;
use crate::state::OrganismState;

/// Kind-specific organism state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    /// A stationary organism whose damage is lost energy.
    Plant,
    /// A mobile organism that accumulates damage.
    Animal {
        /// Damage taken and not yet healed.
        damage: u32,
    },
}

impl Body {
    /// The body a newborn of `species` starts with.
    pub const fn for_species(species: &Species) -> Self {
        if species.is_plant() {
            Self::Plant
        } else {
            Self::Animal { damage: 0 }
        }
    }

    /// Whether this is a plant body.
    pub const fn is_plant(self) -> bool {
        matches!(self, Self::Plant)
    }
}

impl OrganismState {
    /// Accumulated damage, or `None` for plants.
    pub const fn damage(&self) -> Option<u32> {
        match self.body {
            Body::Animal { damage } => Some(damage),
            Body::Plant => None,
        }
    }

    /// Grow one pixel if the organism is ready to.
    ///
    /// Returns `false` (and changes nothing) while the growth wait is
    /// running, once mature, or for an animal without enough energy to
    /// pay the growth cost from a `Normal` or `Full` reserve.
    pub fn grow(&mut self) -> Result<bool, StateError> {
        self.ensure_unlocked()?;
        self.ensure_alive()?;

        if self.growth_wait() > 0 || self.radius() >= self.species().mature_radius() {
            return Ok(false);
        }

        let next = self.radius().saturating_add(1);
        match self.species().animal().map(|a| a.growth_energy_cost) {
            None => {
                self.increase_radius_to(next)?;
            }
            Some(cost) => {
                if self.energy_state() < EnergyState::Normal || self.stored_energy() - cost <= 0.0
                {
                    return Ok(false);
                }
                self.increase_radius_to(next)?;
                self.burn_energy(cost)?;
            }
        }
        self.reset_growth_wait()?;

        tracing::trace!(organism = %self.id(), radius = next, "organism grew");
        Ok(true)
    }

    /// Take `amount` damage.
    ///
    /// An animal dies once its accumulated damage reaches its lethal
    /// threshold, which scales with radius. Plants have no damage to
    /// accumulate; callers burn their energy instead.
    pub fn cause_damage(&mut self, amount: u32) -> Result<(), StateError> {
        self.ensure_mutable()?;
        self.ensure_alive()?;

        let Body::Animal { damage } = self.body else {
            return Err(StateError::NotAnAnimal {
                organism: self.id(),
            });
        };
        let damage = damage.saturating_add(amount);
        self.body = Body::Animal { damage };
        if damage >= self.lethal_damage() {
            self.die(DeathReason::Killed);
        }
        Ok(())
    }

    /// Heal up to `amount` damage.
    ///
    /// Animals clear damage and burn
    /// `energy_per_healed_damage` per point cleared, which may starve
    /// them. Plants regain `amount` energy up to capacity.
    pub fn heal_damage(&mut self, amount: u32) -> Result<(), StateError> {
        self.ensure_mutable()?;
        self.ensure_alive()?;

        match self.body {
            Body::Plant => self.set_stored_energy(self.stored_energy() + f64::from(amount)),
            Body::Animal { damage } => {
                let healed = amount.min(damage);
                if healed == 0 {
                    return Ok(());
                }
                let per_point = self
                    .species()
                    .animal()
                    .map_or(0.0, |a| a.energy_per_healed_damage);
                self.body = Body::Animal {
                    damage: damage.saturating_sub(healed),
                };
                self.burn_energy(f64::from(healed) * per_point)
            }
        }
    }

    /// How injured the organism is, from `0.0` (unhurt) to `1.0`.
    ///
    /// Animals measure damage against the lethal threshold; plants measure
    /// missing energy against capacity.
    pub fn percent_injured(&self) -> f64 {
        match self.body {
            Body::Animal { damage } => {
                let lethal = self.lethal_damage();
                if lethal == 0 {
                    return 0.0;
                }
                (f64::from(damage) / f64::from(lethal)).min(1.0)
            }
            Body::Plant => {
                let capacity = self.max_energy();
                if capacity <= 0.0 {
                    return 0.0;
                }
                (1.0 - self.stored_energy() / capacity).clamp(0.0, 1.0)
            }
        }
    }

    /// Damage that kills an animal at the current radius. Zero for plants.
    pub fn lethal_damage(&self) -> u32 {
        self.species().animal().map_or(0, |a| {
            a.lethal_damage_per_unit_radius.saturating_mul(self.radius())
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
