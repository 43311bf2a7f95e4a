//! JSON manifests for tooling that consumes compiler output.

use serde::Serialize;

use silica_resolve::{BatchOutcome, CompiledChip, FeatureSet};

/// The merged result of a batch run: which chips compiled and the
/// deduplicated union of their capability features.
#[derive(Debug, Clone, Serialize)]
pub struct BatchManifest {
    /// Successfully compiled configurations, in input order.
    pub chips: Vec<String>,
    /// Configurations that failed, in input order.
    pub failed: Vec<String>,
    /// Union of all successful configurations' feature sets.
    pub features: FeatureSet,
}

impl BatchManifest {
    /// Build the manifest from a batch outcome.
    pub fn from_outcome(outcome: &BatchOutcome) -> Self {
        Self {
            chips: outcome.compiled.iter().map(|c| c.name.clone()).collect(),
            failed: outcome.failures.iter().map(|f| f.chip.clone()).collect(),
            features: outcome.manifest.clone(),
        }
    }
}

/// Serialize one compiled configuration as pretty JSON.
pub fn chip_json(compiled: &CompiledChip) -> serde_json::Result<String> {
    serde_json::to_string_pretty(compiled)
}

/// Serialize a batch manifest as pretty JSON.
pub fn manifest_json(manifest: &BatchManifest) -> serde_json::Result<String> {
    serde_json::to_string_pretty(manifest)
}
