//! Capability-feature tracking and family/version consistency.

use std::collections::{BTreeSet, HashMap};

use crate::error::CompileError;

/// The deduplicated capability tokens of one configuration.
///
/// A `BTreeSet` so iteration (and therefore emission) is deterministic, and
/// so batch merging is a plain commutative union.
pub type FeatureSet = BTreeSet<String>;

/// Tracks family/version usage within one configuration.
///
/// Two tokens accumulate per classified peripheral: `_{family}` and
/// `_{family}_{version}`. A family seen with two different versions is a
/// fatal inconsistency — downstream drivers are selected per family, so
/// there is no way to honor both.
#[derive(Debug, Clone, Default)]
pub struct FeatureTracker {
    versions: HashMap<String, String>,
    features: FeatureSet,
}

impl FeatureTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one classified peripheral.
    pub fn observe(
        &mut self,
        chip: &str,
        family: &str,
        version: &str,
        peripheral: &str,
    ) -> Result<(), CompileError> {
        if let Some(first) = self.versions.get(family) {
            if first != version {
                return Err(CompileError::FamilyVersionConflict {
                    chip: chip.to_string(),
                    family: family.to_string(),
                    first: first.clone(),
                    second: version.to_string(),
                    peripheral: peripheral.to_string(),
                });
            }
        } else {
            self.versions
                .insert(family.to_string(), version.to_string());
        }

        self.features.insert(format!("_{family}"));
        self.features.insert(format!("_{family}_{version}"));
        Ok(())
    }

    /// Consume the tracker, yielding the configuration's feature set.
    pub fn into_features(self) -> FeatureSet {
        self.features
    }
}

/// Union per-configuration feature sets into one deduplicated manifest.
///
/// The union is commutative and associative, so batch order never changes
/// the result.
pub fn merge_feature_sets<I>(sets: I) -> FeatureSet
where
    I: IntoIterator<Item = FeatureSet>,
{
    let mut merged = FeatureSet::new();
    for set in sets {
        merged.extend(set);
    }
    merged
}
