//! Engine-wide constants that shape every species.
//!
//! [`EngineSettings`] has built-in defaults for every field. Hosts can
//! override them from a YAML/TOML file and from `HABITAT_*` environment
//! variables (nested keys separated by `__`, e.g.
//! `HABITAT_CHARACTERISTICS__MAXIMUM_SPEED__CAP=20`). Loaded settings are
//! validated before use. Every source is layered over the defaults, so an
//! override may name a single nested field.

use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use habitat_types::CellGrid;
use habitat_types::grid::MAX_GRID_POWER_OF_2;
use serde::{Deserialize, Serialize};

use crate::characteristics::{Characteristic, CharacteristicRules};
use crate::error::SettingsError;

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "HABITAT";

/// Engine constants applied when species are defined and organisms spawned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Cell width is `2^grid_width_power_of_2` pixels (default: 3).
    pub grid_width_power_of_2: u32,

    /// Characteristic point budget per animal species (default: 100).
    pub max_available_characteristic_points: u32,

    /// Smallest allowed mature radius (default: 25).
    pub min_mature_radius: u32,

    /// Largest allowed mature radius (default: 48).
    pub max_mature_radius: u32,

    /// Radius of a newly spawned plant (default: 3).
    pub plant_initial_radius: u32,

    /// Radius of a newly spawned animal (default: 3).
    pub animal_initial_radius: u32,

    /// Life span in ticks per unit of mature radius (default: 100).
    pub life_span_per_unit_radius: u32,

    /// Ticks between reproductions per unit of mature radius (default: 10).
    pub reproduction_wait_per_unit_radius: u32,

    /// Ticks between plant growth steps (default: 8).
    pub plant_growth_wait: u32,

    /// Ticks between animal growth steps (default: 10).
    pub animal_growth_wait: u32,

    /// Ticks a plant incubates seeds (default: 10).
    pub plant_incubation_ticks: u32,

    /// Ticks an animal incubates offspring (default: 20).
    pub animal_incubation_ticks: u32,

    /// Plant energy capacity per unit radius (default: 60.0).
    pub plant_max_energy_per_unit_radius: f64,

    /// Largest seed spread distance a plant may declare (default: 200).
    pub max_seed_spread_distance: u32,

    /// Multiplier on carnivore attack/defend values (default: 2.0).
    pub carnivore_damage_multiplier: f64,

    /// Damage per unit radius that kills an animal (default: 10).
    pub lethal_damage_per_unit_radius: u32,

    /// Energy burned per point of damage healed (default: 1.0).
    pub energy_per_healed_damage: f64,

    /// Energy an animal burns for each growth step (default: 5.0).
    pub animal_growth_energy_cost: f64,

    /// Point-to-value rules for each characteristic.
    pub characteristics: CharacteristicRules,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            grid_width_power_of_2: 3,
            max_available_characteristic_points: 100,
            min_mature_radius: 25,
            max_mature_radius: 48,
            plant_initial_radius: 3,
            animal_initial_radius: 3,
            life_span_per_unit_radius: 100,
            reproduction_wait_per_unit_radius: 10,
            plant_growth_wait: 8,
            animal_growth_wait: 10,
            plant_incubation_ticks: 10,
            animal_incubation_ticks: 20,
            plant_max_energy_per_unit_radius: 60.0,
            max_seed_spread_distance: 200,
            carnivore_damage_multiplier: 2.0,
            lethal_damage_per_unit_radius: 10,
            energy_per_healed_damage: 1.0,
            animal_growth_energy_cost: 5.0,
            characteristics: CharacteristicRules::default(),
        }
    }
}

impl EngineSettings {
    /// Load settings from an optional file plus `HABITAT_*` environment overrides.
    ///
    /// The file format is inferred from the extension.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        let settings = Self::from_config(config)?;
        tracing::debug!(
            grid_width_power_of_2 = settings.grid_width_power_of_2,
            budget = settings.max_available_characteristic_points,
            "engine settings loaded"
        );
        Ok(settings)
    }

    /// Parse settings from an in-memory document, without environment overrides.
    pub fn parse(contents: &str, format: FileFormat) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(Config::try_from(&Self::default())?)
            .add_source(File::from_str(contents, format))
            .build()?;
        Self::from_config(config)
    }

    fn from_config(config: Config) -> Result<Self, SettingsError> {
        let settings: Self = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// The spatial grid these settings describe.
    pub fn grid(&self) -> Result<CellGrid, SettingsError> {
        CellGrid::new(self.grid_width_power_of_2).ok_or_else(|| SettingsError::Invalid {
            field: "grid_width_power_of_2",
            reason: format!("must be at most {MAX_GRID_POWER_OF_2}"),
        })
    }

    /// Check cross-field consistency.
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.grid()?;

        if self.min_mature_radius == 0 || self.min_mature_radius > self.max_mature_radius {
            return Err(SettingsError::Invalid {
                field: "min_mature_radius",
                reason: format!(
                    "must be positive and at most max_mature_radius ({})",
                    self.max_mature_radius
                ),
            });
        }

        for (field, radius) in [
            ("plant_initial_radius", self.plant_initial_radius),
            ("animal_initial_radius", self.animal_initial_radius),
        ] {
            if radius == 0 || radius > self.min_mature_radius {
                return Err(SettingsError::Invalid {
                    field,
                    reason: format!(
                        "must be positive and at most min_mature_radius ({})",
                        self.min_mature_radius
                    ),
                });
            }
        }

        if self.life_span_per_unit_radius == 0 {
            return Err(SettingsError::Invalid {
                field: "life_span_per_unit_radius",
                reason: String::from("must be positive"),
            });
        }

        if self.lethal_damage_per_unit_radius == 0 {
            return Err(SettingsError::Invalid {
                field: "lethal_damage_per_unit_radius",
                reason: String::from("must be positive"),
            });
        }

        for (field, value) in [
            ("plant_max_energy_per_unit_radius", self.plant_max_energy_per_unit_radius),
            ("carnivore_damage_multiplier", self.carnivore_damage_multiplier),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }

        for (field, value) in [
            ("energy_per_healed_damage", self.energy_per_healed_damage),
            ("animal_growth_energy_cost", self.animal_growth_energy_cost),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::Invalid {
                    field,
                    reason: format!("must be a non-negative number, got {value}"),
                });
            }
        }

        for characteristic in Characteristic::ALL {
            let rule = self.characteristics.rule(characteristic);
            let cap_ok = rule.cap.is_none_or(|cap| cap.is_finite() && cap >= rule.base);
            if !rule.base.is_finite() || !rule.per_point.is_finite() || rule.per_point < 0.0 || !cap_ok
            {
                return Err(SettingsError::Invalid {
                    field: "characteristics",
                    reason: format!("rule for {characteristic} is not a valid non-decreasing rule"),
                });
            }
        }

        Ok(())
    }
}
