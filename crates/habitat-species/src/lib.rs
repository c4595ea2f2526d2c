//! Species definition for the Habitat ecosystem.
//!
//! This crate turns author-supplied species declarations into validated,
//! immutable [`Species`] records. It sits between `habitat-types` (plain
//! values) and `habitat-organisms` (per-tick organism state), and is the
//! only place the characteristic point budget is enforced.
//!
//! # Modules
//!
//! - [`budget`] -- Point tally against the global budget, plus advisory warnings
//! - [`catalog`] -- YAML species catalogs, validated entry by entry
//! - [`characteristics`] -- Categories and point-to-value rules
//! - [`error`] -- [`SpeciesError`], [`SettingsError`], [`CatalogError`]
//! - [`settings`] -- [`EngineSettings`] loaded through the `config` crate
//! - [`species`] -- [`SpeciesDeclaration`] in, [`Species`] out

pub mod budget;
pub mod catalog;
pub mod characteristics;
pub mod error;
pub mod settings;
pub mod species;

// Re-export primary types at crate root for convenience.
pub use budget::{BudgetTally, BudgetWarning, collect_warnings, tally};
pub use catalog::{Catalog, load_catalog, load_catalog_file, parse_declarations};
pub use characteristics::{Characteristic, CharacteristicRule, CharacteristicRules};
pub use error::{CatalogError, SettingsError, SpeciesError};
pub use settings::EngineSettings;
pub use species::{AnimalCharacteristics, DeclaredKind, Species, SpeciesDeclaration, SpeciesKind};
