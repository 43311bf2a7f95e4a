//! Chip description: the declared peripheral and interrupt tables.

use serde::{Deserialize, Serialize};

/// A complete chip configuration as declared in a `.chip.toml` document.
///
/// Peripherals and interrupts are arrays-of-tables, not maps: declaration
/// order is load-bearing (emission must preserve it) and TOML maps would
/// not round-trip it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChipDescription {
    /// Chip name (also the configuration identifier in batch runs).
    pub name: String,
    /// Chip family tag (informational, e.g. a product line).
    pub family: String,
    /// Identifier of the AF table document this chip uses.
    pub af_table: String,
    /// Declared peripherals in declaration order.
    #[serde(default)]
    pub peripherals: Vec<PeripheralDescriptor>,
    /// Interrupt table in declaration order.
    #[serde(default)]
    pub interrupts: Vec<InterruptDescriptor>,
}

/// One declared peripheral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PeripheralDescriptor {
    /// Instance name (`USART1`, `GPIOA`, ...).
    pub name: String,
    /// Block identifier `family_version/Variant`. Absent for address-only
    /// declarations that no driver resolves.
    #[serde(default)]
    pub block: Option<String>,
    /// Register base address.
    pub address: u64,
    /// Clock reference feeding this peripheral.
    #[serde(default)]
    pub clock: Option<String>,
}

/// One interrupt table entry: name and vector slot number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterruptDescriptor {
    /// Interrupt (handler) name.
    pub name: String,
    /// Vector slot number.
    pub slot: u32,
}

impl ChipDescription {
    /// Look up a declared peripheral by name.
    pub fn peripheral(&self, name: &str) -> Option<&PeripheralDescriptor> {
        self.peripherals.iter().find(|p| p.name == name)
    }
}
