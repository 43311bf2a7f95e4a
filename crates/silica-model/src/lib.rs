//! Chip description and alternate-function table model for the silica compiler.
//!
//! A chip is described by two TOML documents:
//! - **Chip description** (`<name>.chip.toml`): peripherals with their block
//!   identifiers and base addresses, plus the interrupt table.
//! - **Alternate-function table** (`<id>.af.toml`): per-pin signal-to-selector
//!   mappings, shared between chips of one family.
//!
//! Both use arrays-of-tables so declaration order survives a load/compile
//! round trip — downstream emission is required to preserve it.

pub mod af;
pub mod block;
pub mod chip;
pub mod error;
pub mod parse;

pub use af::{AlternateFunctionTable, PinFunctions};
pub use block::BlockId;
pub use chip::{ChipDescription, InterruptDescriptor, PeripheralDescriptor};
pub use error::{ModelError, Result};
pub use parse::{
    discover_chips, load_af_toml, load_chip_toml, load_configuration, parse_af_toml,
    parse_chip_toml, validate_af, validate_chip, ValidationIssue,
};
