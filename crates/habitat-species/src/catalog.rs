//! Species catalogs: a YAML list of declarations validated in one pass.
//!
//! Each entry is validated independently. A rejected entry does not stop
//! the others from loading; it is reported in [`Catalog::rejected`].
//!
//! ```yaml
//! - name: Fern
//!   kind: plant
//!   seed_spread_distance: 40
//!   mature_radius: 25
//! - name: Grazer
//!   kind: animal
//!   mature_radius: 30
//!   characteristics:
//!     maximum_energy: 20
//!     eating_speed: 20
//!     attack_damage: 10
//!     defend_damage: 10
//!     maximum_speed: 20
//!     camouflage: 10
//!     eyesight: 10
//! ```

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use crate::error::{CatalogError, SpeciesError};
use crate::settings::EngineSettings;
use crate::species::{Species, SpeciesDeclaration};

/// The outcome of loading a catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Species that passed validation, in file order.
    pub accepted: Vec<Arc<Species>>,
    /// Validation failures, in file order.
    pub rejected: Vec<SpeciesError>,
}

impl Catalog {
    /// Look up an accepted species by name.
    pub fn get(&self, name: &str) -> Option<&Arc<Species>> {
        self.accepted.iter().find(|s| s.name() == name)
    }
}

/// Parse declarations from YAML without validating them.
pub fn parse_declarations(yaml: &str) -> Result<Vec<SpeciesDeclaration>, CatalogError> {
    let declarations: Vec<SpeciesDeclaration> = serde_yml::from_str(yaml)?;
    let mut seen = BTreeSet::new();
    for declaration in &declarations {
        if !seen.insert(declaration.name.trim()) {
            return Err(CatalogError::DuplicateName(declaration.name.clone()));
        }
    }
    Ok(declarations)
}

/// Parse and validate a catalog from YAML.
pub fn load_catalog(yaml: &str, settings: &EngineSettings) -> Result<Catalog, CatalogError> {
    let mut catalog = Catalog::default();
    for declaration in parse_declarations(yaml)? {
        match Species::from_declaration(&declaration, settings) {
            Ok(species) => catalog.accepted.push(Arc::new(species)),
            Err(error) => {
                tracing::warn!(species = %declaration.name, %error, "species rejected");
                catalog.rejected.push(error);
            }
        }
    }
    Ok(catalog)
}

/// Read a catalog file from disk and validate it.
pub fn load_catalog_file(path: &Path, settings: &EngineSettings) -> Result<Catalog, CatalogError> {
    let contents = std::fs::read_to_string(path)?;
    load_catalog(&contents, settings)
}
