//! Validated species records.
//!
//! A [`SpeciesDeclaration`] is what a species author provides: a name, a
//! kind, a mature radius and (for animals) raw characteristic points.
//! [`Species::from_declaration`] checks it against the [`EngineSettings`]
//! and produces an immutable [`Species`] with every derived value resolved.
//! A declaration that fails any check produces no species at all.
//!
//! Species are shared read-only by every organism of that species, normally
//! behind an [`Arc`](std::sync::Arc).

use std::collections::BTreeMap;

use habitat_types::CellGrid;
use serde::{Deserialize, Serialize};

use crate::budget::{self, BudgetWarning};
use crate::characteristics::Characteristic;
use crate::error::SpeciesError;
use crate::settings::EngineSettings;

/// Kind-specific part of a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclaredKind {
    /// A stationary organism that spreads seeds.
    Plant {
        /// How far from the parent seeds may land, in pixels.
        seed_spread_distance: u32,
    },
    /// A mobile organism that buys characteristics with points.
    Animal {
        /// Whether the animal eats other animals.
        #[serde(default)]
        carnivore: bool,
    },
}

/// A species as authored, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesDeclaration {
    /// Display name; must be unique within a catalog.
    pub name: String,
    /// Plant or animal, with kind-specific fields.
    #[serde(flatten)]
    pub kind: DeclaredKind,
    /// Radius at which the organism stops growing.
    pub mature_radius: u32,
    /// Raw points per category. Required for animals, forbidden for plants.
    #[serde(default)]
    pub characteristics: BTreeMap<Characteristic, u32>,
}

/// Derived capabilities of an animal species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalCharacteristics {
    /// Whether the animal eats other animals.
    pub carnivore: bool,
    /// Food consumed per tick per unit radius.
    pub eating_speed_per_unit_radius: f64,
    /// Damage inflicted per unit radius (carnivore multiplier applied).
    pub attack_damage_per_unit_radius: f64,
    /// Damage absorbed per unit radius (carnivore multiplier applied).
    pub defend_damage_per_unit_radius: f64,
    /// Top speed in pixels per tick.
    pub max_speed: f64,
    /// Percent odds of being invisible to others.
    pub invisible_odds: f64,
    /// Vision radius in pixels.
    pub eyesight_radius: f64,
    /// Accumulated damage per unit radius that kills the animal.
    pub lethal_damage_per_unit_radius: u32,
    /// Energy burned per point of damage healed.
    pub energy_per_healed_damage: f64,
    /// Energy burned per growth step.
    pub growth_energy_cost: f64,
    /// Raw points declared per category.
    pub raw_points: BTreeMap<Characteristic, u32>,
}

/// Plant or animal, with kind-specific derived values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpeciesKind {
    /// A stationary seed-spreading organism.
    Plant {
        /// How far from the parent seeds may land, in pixels.
        seed_spread_distance: u32,
    },
    /// A mobile organism.
    Animal(AnimalCharacteristics),
}

/// An immutable, validated species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    name: String,
    kind: SpeciesKind,
    mature_radius: u32,
    initial_radius: u32,
    life_span: u32,
    reproduction_wait: u32,
    growth_wait: u32,
    incubation_ticks: u32,
    max_energy_per_unit_radius: f64,
    grid: CellGrid,
    points_spent: u32,
    warnings: Vec<BudgetWarning>,
}

impl Species {
    /// Validate `declaration` against `settings`.
    ///
    /// # Errors
    ///
    /// Returns a [`SpeciesError`] if the name is empty, the mature radius
    /// is out of range, a plant declares points, or an animal's points are
    /// incomplete or over budget.
    pub fn from_declaration(
        declaration: &SpeciesDeclaration,
        settings: &EngineSettings,
    ) -> Result<Self, SpeciesError> {
        let name = declaration.name.trim();
        if name.is_empty() {
            return Err(SpeciesError::EmptyName);
        }

        let mature_radius = declaration.mature_radius;
        if mature_radius < settings.min_mature_radius || mature_radius > settings.max_mature_radius
        {
            return Err(SpeciesError::MatureRadiusOutOfRange {
                species: name.to_owned(),
                mature_radius,
                min: settings.min_mature_radius,
                max: settings.max_mature_radius,
            });
        }

        let overflow = |context| SpeciesError::ArithmeticOverflow {
            species: name.to_owned(),
            context,
        };
        let life_span = mature_radius
            .checked_mul(settings.life_span_per_unit_radius)
            .ok_or_else(|| overflow("life span"))?;
        let reproduction_wait = mature_radius
            .checked_mul(settings.reproduction_wait_per_unit_radius)
            .ok_or_else(|| overflow("reproduction wait"))?;

        // Settings are validated on load, but a hand-built value may not be.
        let grid = CellGrid::new(settings.grid_width_power_of_2)
            .ok_or_else(|| overflow("grid cell width"))?;

        let species = match &declaration.kind {
            DeclaredKind::Plant {
                seed_spread_distance,
            } => {
                if !declaration.characteristics.is_empty() {
                    return Err(SpeciesError::UnexpectedCharacteristics {
                        species: name.to_owned(),
                    });
                }
                Self {
                    name: name.to_owned(),
                    kind: SpeciesKind::Plant {
                        seed_spread_distance: (*seed_spread_distance)
                            .min(settings.max_seed_spread_distance),
                    },
                    mature_radius,
                    initial_radius: settings.plant_initial_radius,
                    life_span,
                    reproduction_wait,
                    growth_wait: settings.plant_growth_wait,
                    incubation_ticks: settings.plant_incubation_ticks,
                    max_energy_per_unit_radius: settings.plant_max_energy_per_unit_radius,
                    grid,
                    points_spent: 0,
                    warnings: Vec::new(),
                }
            }
            DeclaredKind::Animal { carnivore } => {
                let rules = &settings.characteristics;
                let tally = budget::tally(
                    name,
                    &declaration.characteristics,
                    rules,
                    settings.max_available_characteristic_points,
                )?;
                let mut warnings = budget::collect_warnings(&tally, rules);
                let attack_points = tally.raw(Characteristic::AttackDamage);
                if !*carnivore && attack_points > 0 {
                    warnings.push(BudgetWarning {
                        characteristic: Some(Characteristic::AttackDamage),
                        message: format!("{attack_points} attack points on a herbivore"),
                    });
                }

                let derive = |c: Characteristic| rules.rule(c).derive(tally.raw(c));
                let damage_multiplier = if *carnivore {
                    settings.carnivore_damage_multiplier
                } else {
                    1.0
                };

                let animal = AnimalCharacteristics {
                    carnivore: *carnivore,
                    eating_speed_per_unit_radius: derive(Characteristic::EatingSpeed),
                    attack_damage_per_unit_radius: derive(Characteristic::AttackDamage)
                        * damage_multiplier,
                    defend_damage_per_unit_radius: derive(Characteristic::DefendDamage)
                        * damage_multiplier,
                    max_speed: derive(Characteristic::MaximumSpeed),
                    invisible_odds: derive(Characteristic::Camouflage),
                    eyesight_radius: derive(Characteristic::Eyesight),
                    lethal_damage_per_unit_radius: settings.lethal_damage_per_unit_radius,
                    energy_per_healed_damage: settings.energy_per_healed_damage,
                    growth_energy_cost: settings.animal_growth_energy_cost,
                    raw_points: Characteristic::ALL
                        .iter()
                        .map(|c| (*c, tally.raw(*c)))
                        .collect(),
                };

                Self {
                    name: name.to_owned(),
                    max_energy_per_unit_radius: derive(Characteristic::MaximumEnergy),
                    kind: SpeciesKind::Animal(animal),
                    mature_radius,
                    initial_radius: settings.animal_initial_radius,
                    life_span,
                    reproduction_wait,
                    growth_wait: settings.animal_growth_wait,
                    incubation_ticks: settings.animal_incubation_ticks,
                    grid,
                    points_spent: tally.spent(),
                    warnings,
                }
            }
        };

        for warning in &species.warnings {
            tracing::debug!(species = %species.name, %warning, "characteristic budget warning");
        }

        Ok(species)
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Plant or animal details.
    pub const fn kind(&self) -> &SpeciesKind {
        &self.kind
    }

    /// Whether this is a plant species.
    pub const fn is_plant(&self) -> bool {
        matches!(self.kind, SpeciesKind::Plant { .. })
    }

    /// Animal characteristics, or `None` for plants.
    pub const fn animal(&self) -> Option<&AnimalCharacteristics> {
        match &self.kind {
            SpeciesKind::Animal(animal) => Some(animal),
            SpeciesKind::Plant { .. } => None,
        }
    }

    /// Radius at which growth stops.
    pub const fn mature_radius(&self) -> u32 {
        self.mature_radius
    }

    /// Radius a newly spawned organism starts at.
    pub const fn initial_radius(&self) -> u32 {
        self.initial_radius
    }

    /// Tick age beyond which an organism dies of old age.
    pub const fn life_span(&self) -> u32 {
        self.life_span
    }

    /// Ticks to wait between reproductions.
    pub const fn reproduction_wait(&self) -> u32 {
        self.reproduction_wait
    }

    /// Ticks to wait between growth steps.
    pub const fn growth_wait(&self) -> u32 {
        self.growth_wait
    }

    /// Ticks an offspring incubates before birth.
    pub const fn incubation_ticks(&self) -> u32 {
        self.incubation_ticks
    }

    /// Energy capacity per unit radius.
    pub const fn max_energy_per_unit_radius(&self) -> f64 {
        self.max_energy_per_unit_radius
    }

    /// Energy capacity of an organism of this species at `radius`.
    pub fn max_energy_for_radius(&self, radius: u32) -> f64 {
        self.max_energy_per_unit_radius * f64::from(radius)
    }

    /// The spatial grid organisms of this species are tested on.
    pub const fn grid(&self) -> CellGrid {
        self.grid
    }

    /// Characteristic points spent (zero for plants).
    pub const fn points_spent(&self) -> u32 {
        self.points_spent
    }

    /// Advisory warnings collected during validation.
    pub fn warnings(&self) -> &[BudgetWarning] {
        &self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animal(name: &str, carnivore: bool, points: [u32; 7]) -> SpeciesDeclaration {
        SpeciesDeclaration {
            name: name.to_owned(),
            kind: DeclaredKind::Animal { carnivore },
            mature_radius: 30,
            characteristics: Characteristic::ALL.into_iter().zip(points).collect(),
        }
    }

    fn plant(name: &str) -> SpeciesDeclaration {
        SpeciesDeclaration {
            name: name.to_owned(),
            kind: DeclaredKind::Plant {
                seed_spread_distance: 40,
            },
            mature_radius: 25,
            characteristics: BTreeMap::new(),
        }
    }

    #[test]
    fn animal_derives_values_from_points() {
        let settings = EngineSettings::default();
        let species = Species::from_declaration(
            &animal("Grazer", false, [20, 20, 10, 10, 20, 10, 10]),
            &settings,
        );
        assert!(species.is_ok(), "{species:?}");
        let Ok(species) = species else { return };

        assert_eq!(species.points_spent(), 100);
        assert_eq!(species.life_span(), 3000);
        assert_eq!(species.reproduction_wait(), 300);
        assert_eq!(species.initial_radius(), 3);
        assert!((species.max_energy_per_unit_radius() - 100.0).abs() < 1e-9);
        assert!((species.max_energy_for_radius(10) - 1000.0).abs() < 1e-9);

        let traits = species.animal();
        assert!(traits.is_some());
        let speed = traits.map(|a| a.max_speed).unwrap_or_default();
        assert!((speed - 10.0).abs() < 1e-9);
    }

    #[test]
    fn carnivore_multiplier_applies_after_tally() {
        let settings = EngineSettings::default();
        let points = [20, 20, 10, 10, 20, 10, 10];
        let herbivore = Species::from_declaration(&animal("Grazer", false, points), &settings);
        let carnivore = Species::from_declaration(&animal("Stalker", true, points), &settings);
        let (Ok(herbivore), Ok(carnivore)) = (herbivore, carnivore) else {
            panic!("both declarations are within budget");
        };

        // Same fairness accounting...
        assert_eq!(herbivore.points_spent(), carnivore.points_spent());

        // ...but doubled attack and defend.
        let attack = |s: &Species| s.animal().map(|a| a.attack_damage_per_unit_radius);
        let defend = |s: &Species| s.animal().map(|a| a.defend_damage_per_unit_radius);
        let ratio = attack(&carnivore).unwrap_or_default() / attack(&herbivore).unwrap_or(1.0);
        assert!((ratio - 2.0).abs() < 1e-9);
        let ratio = defend(&carnivore).unwrap_or_default() / defend(&herbivore).unwrap_or(1.0);
        assert!((ratio - 2.0).abs() < 1e-9);
    }

    #[test]
    fn herbivore_attack_points_warn() {
        let settings = EngineSettings::default();
        let points = [20, 20, 10, 10, 20, 10, 10];
        let herbivore = Species::from_declaration(&animal("Grazer", false, points), &settings);
        let carnivore = Species::from_declaration(&animal("Stalker", true, points), &settings);
        let attack_warning = |s: &Species| {
            s.warnings()
                .iter()
                .any(|w| w.characteristic == Some(Characteristic::AttackDamage))
        };
        assert!(herbivore.as_ref().is_ok_and(attack_warning));
        assert!(carnivore.as_ref().is_ok_and(|s| !attack_warning(s)));
    }

    #[test]
    fn over_budget_animal_is_rejected() {
        let settings = EngineSettings::default();
        let result = Species::from_declaration(
            &animal("Greedy", false, [20, 20, 10, 10, 20, 10, 11]),
            &settings,
        );
        assert!(matches!(
            result,
            Err(SpeciesError::BudgetExceeded { spent: 101, budget: 100, .. })
        ));
    }

    #[test]
    fn plant_uses_settings_energy_and_rejects_points() {
        let settings = EngineSettings::default();
        let fern = Species::from_declaration(&plant("Fern"), &settings);
        assert!(fern.as_ref().is_ok_and(Species::is_plant));
        assert!(fern.as_ref().is_ok_and(|s| s.animal().is_none()));
        assert!(
            fern.as_ref()
                .is_ok_and(|s| (s.max_energy_per_unit_radius() - 60.0).abs() < 1e-9)
        );

        let mut spiky = plant("Spiky");
        spiky.characteristics.insert(Characteristic::AttackDamage, 5);
        assert!(matches!(
            Species::from_declaration(&spiky, &settings),
            Err(SpeciesError::UnexpectedCharacteristics { .. })
        ));
    }

    #[test]
    fn mature_radius_must_be_in_range() {
        let settings = EngineSettings::default();
        let mut tiny = plant("Moss");
        tiny.mature_radius = 24;
        assert!(matches!(
            Species::from_declaration(&tiny, &settings),
            Err(SpeciesError::MatureRadiusOutOfRange { min: 25, max: 48, .. })
        ));
    }

    #[test]
    fn blank_name_is_rejected() {
        let settings = EngineSettings::default();
        assert_eq!(
            Species::from_declaration(&plant("   "), &settings),
            Err(SpeciesError::EmptyName)
        );
    }

    #[test]
    fn seed_spread_is_clamped_to_settings() {
        let settings = EngineSettings::default();
        let mut weed = plant("Weed");
        weed.kind = DeclaredKind::Plant {
            seed_spread_distance: 10_000,
        };
        let species = Species::from_declaration(&weed, &settings);
        assert!(matches!(
            species.map(|s| s.kind().clone()),
            Ok(SpeciesKind::Plant {
                seed_spread_distance: 200
            })
        ));
    }
}
