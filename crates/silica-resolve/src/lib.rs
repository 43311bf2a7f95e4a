//! Resolution pipeline for the silica compiler.
//!
//! Turns a loaded chip description into flat, uniquely named resource
//! handles through a single linear pass: peripheral classification via a
//! family-keyed handler registry, alternate-function pin matching,
//! resource-singleton enumeration, interrupt-vector construction, and
//! cross-peripheral version-consistency checking.
//!
//! Everything here is pure computation over immutable input: a failed stage
//! aborts the configuration with no partial output, and batch compilation
//! isolates configurations from each other.

pub mod afmatch;
pub mod error;
pub mod family;
pub mod features;
pub mod pipeline;
pub mod report;
pub mod resolver;
pub mod singleton;
pub mod vector;

pub use afmatch::{match_pin_functions, PinBinding};
pub use error::CompileError;
pub use family::{
    DmaFamily, Expansion, FamilyHandler, FamilyRegistry, GpioFamily, PlainFamily, Resolution,
    ResolveContext, DMA_CHANNELS, EXTI_LINES, GPIO_PINS_PER_PORT, GPIO_PORT_STRIDE,
};
pub use features::{merge_feature_sets, FeatureSet, FeatureTracker};
pub use pipeline::{compile, compile_batch, BatchFailure, BatchOutcome, CompiledChip};
pub use report::CompileReport;
pub use resolver::{resolve_peripherals, PeripheralKind, ResolvedEntry, ResolvedPeripheral};
pub use singleton::{enumerate_singletons, physical_pins, Singleton, SingletonOwner};
pub use vector::{build_vector, decode_vector, VectorEntry};
