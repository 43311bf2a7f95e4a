//! Compile report summarizing one configuration's resolved outputs.

use std::fmt;

use serde::Serialize;

/// Summary counts for one compiled configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileReport {
    /// Configuration name.
    pub chip: String,
    /// Peripherals classified (blockless declarations excluded).
    pub peripherals: usize,
    /// Of those, how many resolved opaque.
    pub opaque: usize,
    /// Singleton tokens enumerated (EXTI lines included).
    pub singletons: usize,
    /// Pin bindings matched.
    pub pin_bindings: usize,
    /// Interrupt vector length.
    pub vector_slots: usize,
    /// Of those, how many are reserved.
    pub reserved_slots: usize,
    /// Capability features accumulated.
    pub features: usize,
}

impl fmt::Display for CompileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Compile Report ===")?;
        writeln!(f, "Chip: {}", self.chip)?;
        writeln!(
            f,
            "Peripherals: {} resolved ({} opaque)",
            self.peripherals, self.opaque
        )?;
        writeln!(f, "Singletons: {}", self.singletons)?;
        writeln!(f, "Pin bindings: {}", self.pin_bindings)?;
        writeln!(
            f,
            "Vector slots: {} ({} reserved)",
            self.vector_slots, self.reserved_slots
        )?;
        writeln!(f, "Features: {}", self.features)?;
        Ok(())
    }
}
