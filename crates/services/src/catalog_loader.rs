use std::path::Path;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::Deserialize;

use drill_core::model::{Catalog, Scenario};

use crate::error::CatalogLoadError;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    scenarios: Vec<Scenario>,
}

/// Parse a `{ "scenarios": [...] }` document into a validated catalog.
///
/// # Errors
///
/// Returns `CatalogLoadError::Parse` for malformed JSON and `CatalogLoadError::Invalid`
/// when the scenarios fail catalog validation.
pub fn parse_catalog(json: &str) -> Result<Catalog, CatalogLoadError> {
    let file: CatalogFile = serde_json::from_str(json)?;
    Ok(Catalog::new(file.scenarios)?)
}

/// Read and validate a catalog file.
///
/// # Errors
///
/// Returns `CatalogLoadError::Io` if the file cannot be read, otherwise as `parse_catalog`.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogLoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_catalog(&raw)
}

/// Return the same scenarios in a random order.
///
/// # Errors
///
/// Returns `CatalogLoadError::Invalid` only if revalidation fails, which cannot happen
/// for a catalog that was valid before shuffling.
pub fn shuffle_catalog<R: Rng + ?Sized>(
    catalog: Catalog,
    rng: &mut R,
) -> Result<Catalog, CatalogLoadError> {
    let mut scenarios = catalog.into_scenarios();
    scenarios.shuffle(rng);
    Ok(Catalog::new(scenarios)?)
}
