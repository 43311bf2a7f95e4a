//! Output rendering for the silica compiler.
//!
//! Takes the resolved model and produces what downstream consumers eat:
//! macro-table declaration files for the HAL, JSON manifests for tooling,
//! and spliced sections of existing build-configuration documents.

pub mod declarations;
pub mod manifest;
pub mod splice;

pub use declarations::{feature_section, render_chip};
pub use manifest::{chip_json, manifest_json, BatchManifest};
pub use splice::{splice_between, SpliceError};
