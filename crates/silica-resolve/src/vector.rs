//! Interrupt vector construction: name→slot table to dense vector layout.

use std::collections::BTreeMap;

use serde::Serialize;

use silica_model::InterruptDescriptor;

use crate::error::CompileError;

/// One slot of the interrupt vector.
///
/// Every slot up to the highest claimed one is materialized; `handler` is
/// `None` for an explicitly reserved slot. Both the hardware vector table
/// and downstream validation depend on gaps never being implicit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VectorEntry {
    /// Slot index.
    pub slot: u32,
    /// External handler name, or `None` for a reserved slot.
    pub handler: Option<String>,
}

impl VectorEntry {
    /// Whether this slot is explicitly reserved.
    pub fn is_reserved(&self) -> bool {
        self.handler.is_none()
    }
}

/// Invert the interrupt table into a dense, gap-filled vector.
///
/// The vector's length is `max(slot) + 1` (zero for an empty table). Two
/// names claiming the same slot is a fatal collision naming both.
pub fn build_vector(
    chip: &str,
    interrupts: &[InterruptDescriptor],
) -> Result<Vec<VectorEntry>, CompileError> {
    let mut by_slot: BTreeMap<u32, &str> = BTreeMap::new();
    for irq in interrupts {
        if let Some(first) = by_slot.insert(irq.slot, &irq.name) {
            return Err(CompileError::InterruptSlotCollision {
                chip: chip.to_string(),
                slot: irq.slot,
                first: first.to_string(),
                second: irq.name.clone(),
            });
        }
    }

    let length = by_slot.keys().next_back().map_or(0, |max| max + 1);
    Ok((0..length)
        .map(|slot| VectorEntry {
            slot,
            handler: by_slot.get(&slot).map(|name| name.to_string()),
        })
        .collect())
}

/// Recover the name→slot mapping from a built vector.
///
/// Reserved entries are skipped; the result is exactly the mapping the
/// vector was built from.
pub fn decode_vector(entries: &[VectorEntry]) -> BTreeMap<String, u32> {
    entries
        .iter()
        .filter_map(|e| e.handler.clone().map(|name| (name, e.slot)))
        .collect()
}
