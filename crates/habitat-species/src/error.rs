//! Error types for the `habitat-species` crate.
//!
//! Species errors are raised once, when a species is defined, and mean the
//! species is unusable. They never occur during simulation.

use crate::characteristics::Characteristic;

/// A species declaration was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeciesError {
    /// The species name is empty or whitespace.
    #[error("species name must not be empty")]
    EmptyName,

    /// An animal omitted a required characteristic category.
    #[error("species {species}: missing characteristic {characteristic}")]
    MissingCharacteristic {
        /// The rejected species.
        species: String,
        /// The category that was not declared.
        characteristic: Characteristic,
    },

    /// The summed point cost exceeds the global budget.
    #[error("species {species}: {spent} characteristic points exceed the budget of {budget}")]
    BudgetExceeded {
        /// The rejected species.
        species: String,
        /// Total point cost declared.
        spent: u32,
        /// The global budget.
        budget: u32,
    },

    /// A point cost did not fit in a `u32`.
    #[error("species {species}: point cost overflow in {characteristic}")]
    PointOverflow {
        /// The rejected species.
        species: String,
        /// The category whose cost overflowed.
        characteristic: Characteristic,
    },

    /// The mature radius is outside the engine's allowed range.
    #[error("species {species}: mature radius {mature_radius} outside [{min}, {max}]")]
    MatureRadiusOutOfRange {
        /// The rejected species.
        species: String,
        /// The declared mature radius.
        mature_radius: u32,
        /// Smallest allowed mature radius.
        min: u32,
        /// Largest allowed mature radius.
        max: u32,
    },

    /// A plant declared characteristic points, which only animals take.
    #[error("species {species}: plants do not take characteristic points")]
    UnexpectedCharacteristics {
        /// The rejected species.
        species: String,
    },

    /// A derived timer did not fit in a `u32`.
    #[error("species {species}: arithmetic overflow computing {context}")]
    ArithmeticOverflow {
        /// The rejected species.
        species: String,
        /// What was being computed.
        context: &'static str,
    },
}

/// Engine settings could not be loaded or are inconsistent.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A configuration source could not be read or deserialized.
    #[error("failed to load settings: {source}")]
    Source {
        /// The underlying config error.
        #[from]
        source: config::ConfigError,
    },

    /// A value is outside its valid range.
    #[error("invalid setting {field}: {reason}")]
    Invalid {
        /// Name of the offending setting.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// A species catalog could not be read.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read the catalog file from disk.
    #[error("failed to read species catalog: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse catalog YAML.
    #[error("failed to parse species catalog YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// Two entries share a name.
    #[error("duplicate species name: {0}")]
    DuplicateName(String),
}

impl From<serde_yml::Error> for CatalogError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}
