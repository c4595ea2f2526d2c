//! Species catalog inspector for the Habitat ecosystem.
//!
//! Loads engine settings and a species catalog, reports which species were
//! accepted or rejected, then spawns one organism per accepted species and
//! runs it through a few dry ticks. The per-species report is printed to
//! stdout as JSON; everything else goes to the log.
//!
//! ```text
//! habitat-inspect [species.yaml] [habitat-settings.yaml]
//! ```
//!
//! Both paths are optional. Without a settings file the built-in defaults
//! apply, and `HABITAT_*` environment variables override either.

mod report;

use std::path::{Path, PathBuf};

use anyhow::Context;
use habitat_organisms::RenderAnnotations;
use habitat_species::{EngineSettings, load_catalog_file};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::report::{DRY_RUN_TICKS, dry_run};

/// Catalog read when no path is given.
const DEFAULT_CATALOG: &str = "species.yaml";

/// Settings file read, if present, when no path is given.
const DEFAULT_SETTINGS: &str = "habitat-settings.yaml";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args_os().skip(1).map(PathBuf::from);
    let catalog_path = args.next().unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG));
    let settings_path = args.next().or_else(|| {
        let default = Path::new(DEFAULT_SETTINGS);
        default.exists().then(|| default.to_path_buf())
    });

    let settings = EngineSettings::load(settings_path.as_deref())
        .context("failed to load engine settings")?;
    info!(
        settings = ?settings_path,
        budget = settings.max_available_characteristic_points,
        grid_power_of_2 = settings.grid_width_power_of_2,
        "settings loaded"
    );

    let catalog = load_catalog_file(&catalog_path, &settings)
        .with_context(|| format!("failed to load catalog {}", catalog_path.display()))?;
    info!(
        catalog = %catalog_path.display(),
        accepted = catalog.accepted.len(),
        rejected = catalog.rejected.len(),
        "catalog loaded"
    );
    for error in &catalog.rejected {
        warn!(%error, "rejected species");
    }
    if catalog.accepted.is_empty() {
        anyhow::bail!("no species in {} passed validation", catalog_path.display());
    }

    let annotations = RenderAnnotations::new();
    let mut reports = Vec::with_capacity(catalog.accepted.len());
    for species in &catalog.accepted {
        for warning in species.warnings() {
            warn!(species = species.name(), %warning, "budget warning");
        }
        let report = dry_run(species, &annotations)
            .with_context(|| format!("dry run failed for {}", species.name()))?;
        info!(
            species = report.name,
            radius = report.radius,
            energy_state = ?report.energy_state,
            display_action = ?report.display_action,
            ticks = DRY_RUN_TICKS,
            "dry run complete"
        );
        reports.push(report);
    }

    let json = serde_json::to_string_pretty(&reports).context("failed to encode report")?;
    println!("{json}");
    Ok(())
}
