//! Pipeline orchestrator: one linear pass per configuration, map/reduce
//! across a batch.

use serde::Serialize;

use silica_model::{AlternateFunctionTable, ChipDescription};

use crate::afmatch::{match_pin_functions, PinBinding};
use crate::error::CompileError;
use crate::family::FamilyRegistry;
use crate::features::{merge_feature_sets, FeatureSet, FeatureTracker};
use crate::report::CompileReport;
use crate::resolver::{resolve_peripherals, PeripheralKind, ResolvedPeripheral};
use crate::singleton::{enumerate_singletons, physical_pins, Singleton};
use crate::vector::{build_vector, VectorEntry};

/// The complete resolved output of one configuration.
#[derive(Debug, Clone, Serialize)]
pub struct CompiledChip {
    /// Configuration name.
    pub name: String,
    /// Classified peripherals in declaration order.
    pub peripherals: Vec<ResolvedPeripheral>,
    /// Ordered singleton tokens.
    pub singletons: Vec<Singleton>,
    /// Ordered pin bindings.
    pub pin_bindings: Vec<PinBinding>,
    /// Dense interrupt vector.
    pub vector: Vec<VectorEntry>,
    /// This configuration's capability features.
    pub features: FeatureSet,
    /// Summary counts.
    pub report: CompileReport,
}

/// Compile one configuration.
///
/// A single linear pass with no backtracking: classification (with version
/// consistency checked inline), singleton enumeration, AF matching against
/// the physical pin set, vector construction. Any failure aborts the
/// configuration with no partial output.
pub fn compile(
    chip: &ChipDescription,
    af: &AlternateFunctionTable,
    registry: &FamilyRegistry,
) -> Result<CompiledChip, CompileError> {
    let mut tracker = FeatureTracker::new();
    let entries = resolve_peripherals(chip, registry, &mut tracker)?;
    let singletons = enumerate_singletons(&chip.name, &entries)?;
    let pins = physical_pins(&entries);
    let pin_bindings = match_pin_functions(&entries, &pins, af, registry);
    let vector = build_vector(&chip.name, &chip.interrupts)?;
    let features = tracker.into_features();

    let report = CompileReport {
        chip: chip.name.clone(),
        peripherals: entries.len(),
        opaque: entries
            .iter()
            .filter(|e| e.peripheral.kind == PeripheralKind::Opaque)
            .count(),
        singletons: singletons.len(),
        pin_bindings: pin_bindings.len(),
        vector_slots: vector.len(),
        reserved_slots: vector.iter().filter(|e| e.is_reserved()).count(),
        features: features.len(),
    };

    Ok(CompiledChip {
        name: chip.name.clone(),
        peripherals: entries.into_iter().map(|e| e.peripheral).collect(),
        singletons,
        pin_bindings,
        vector,
        features,
        report,
    })
}

/// One configuration's failure within a batch.
#[derive(Debug)]
pub struct BatchFailure {
    /// The configuration that failed.
    pub chip: String,
    /// Why it failed.
    pub error: CompileError,
}

/// The outcome of compiling a batch of configurations.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Successfully compiled configurations, in input order.
    pub compiled: Vec<CompiledChip>,
    /// Per-configuration failures, in input order.
    pub failures: Vec<BatchFailure>,
    /// Feature sets of the successes, merged and deduplicated.
    pub manifest: FeatureSet,
}

impl BatchOutcome {
    /// Whether every configuration in the batch succeeded.
    pub fn all_succeeded(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Compile a batch of configurations: map each independently, then reduce
/// feature sets with a commutative union.
///
/// A failing configuration is recorded and skipped; the rest of the batch
/// is unaffected. Overall success requires every configuration to succeed.
pub fn compile_batch(
    configs: &[(ChipDescription, AlternateFunctionTable)],
    registry: &FamilyRegistry,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    for (chip, af) in configs {
        match compile(chip, af, registry) {
            Ok(compiled) => outcome.compiled.push(compiled),
            Err(error) => outcome.failures.push(BatchFailure {
                chip: chip.name.clone(),
                error,
            }),
        }
    }
    outcome.manifest = merge_feature_sets(outcome.compiled.iter().map(|c| c.features.clone()));
    outcome
}
