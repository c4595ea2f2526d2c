//! Species fixtures for unit tests.

use std::collections::BTreeMap;
use std::sync::Arc;

use habitat_species::{
    Characteristic, DeclaredKind, EngineSettings, Species, SpeciesDeclaration,
};

/// A herbivore that spends the whole budget: 100 energy per unit radius.
pub(crate) fn grazer() -> Arc<Species> {
    let declaration = SpeciesDeclaration {
        name: String::from("Grazer"),
        kind: DeclaredKind::Animal { carnivore: false },
        mature_radius: 30,
        characteristics: Characteristic::ALL
            .into_iter()
            .zip([20, 20, 10, 10, 20, 10, 10])
            .collect(),
    };
    species(&declaration)
}

/// A plant with 60 energy per unit radius.
pub(crate) fn fern() -> Arc<Species> {
    let declaration = SpeciesDeclaration {
        name: String::from("Fern"),
        kind: DeclaredKind::Plant {
            seed_spread_distance: 40,
        },
        mature_radius: 25,
        characteristics: BTreeMap::new(),
    };
    species(&declaration)
}

#[allow(clippy::unwrap_used)]
fn species(declaration: &SpeciesDeclaration) -> Arc<Species> {
    Arc::new(Species::from_declaration(declaration, &EngineSettings::default()).unwrap())
}
