//! Peripheral classification: declared descriptors to resolved records.

use serde::Serialize;

use silica_model::{BlockId, ChipDescription, ModelError};

use crate::error::CompileError;
use crate::family::{Expansion, FamilyRegistry, ResolveContext};
use crate::features::FeatureTracker;

/// A classified peripheral.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPeripheral {
    /// Instance name.
    pub name: String,
    /// Driver family token.
    pub family: String,
    /// Family version tag.
    pub version: String,
    /// Register base address.
    pub address: u64,
    /// Family-specific extra data.
    pub kind: PeripheralKind,
}

/// Family-specific extra data attached to a resolved peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PeripheralKind {
    /// An expanded GPIO port with its derived letter and stride index.
    GpioPort { port: char, index: u32 },
    /// An expanded DMA controller.
    DmaController { channels: u8 },
    /// A known family resolved as a plain singleton.
    Plain,
    /// An unknown family: address-only singleton, no specialized bindings.
    Opaque,
}

/// One resolved peripheral together with its singleton contribution.
#[derive(Debug, Clone)]
pub struct ResolvedEntry {
    pub peripheral: ResolvedPeripheral,
    pub expansion: Expansion,
}

/// Classify every declared peripheral, preserving declaration order.
///
/// Peripherals without a block identifier are not resolvable drivers and
/// are skipped. Unregistered families resolve opaque. Version consistency
/// is checked through `features` as each block is classified.
pub fn resolve_peripherals(
    chip: &ChipDescription,
    registry: &FamilyRegistry,
    features: &mut FeatureTracker,
) -> Result<Vec<ResolvedEntry>, CompileError> {
    let ctx = ResolveContext {
        chip: &chip.name,
        gpio_base: chip.peripheral("GPIOA").map(|p| p.address),
    };

    let mut entries = Vec::new();
    for peripheral in &chip.peripherals {
        let Some(block_str) = &peripheral.block else {
            continue;
        };
        let block = BlockId::parse(block_str).ok_or_else(|| ModelError::MalformedBlock {
            peripheral: peripheral.name.clone(),
            block: block_str.clone(),
        })?;

        features.observe(&chip.name, &block.family, &block.version, &peripheral.name)?;

        let resolution = match registry.get(&block.family) {
            Some(handler) => handler.resolve(&ctx, peripheral, &block)?,
            None => crate::family::Resolution {
                peripheral: ResolvedPeripheral {
                    name: peripheral.name.clone(),
                    family: block.family.clone(),
                    version: block.version.clone(),
                    address: peripheral.address,
                    kind: PeripheralKind::Opaque,
                },
                expansion: Expansion::Single,
            },
        };

        entries.push(ResolvedEntry {
            peripheral: resolution.peripheral,
            expansion: resolution.expansion,
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use silica_model::{InterruptDescriptor, PeripheralDescriptor};

    fn chip(peripherals: Vec<PeripheralDescriptor>) -> ChipDescription {
        ChipDescription {
            name: "demo".into(),
            family: "demo".into(),
            af_table: "af0".into(),
            peripherals,
            interrupts: Vec::<InterruptDescriptor>::new(),
        }
    }

    fn descriptor(name: &str, block: Option<&str>, address: u64) -> PeripheralDescriptor {
        PeripheralDescriptor {
            name: name.to_string(),
            block: block.map(str::to_string),
            address,
            clock: None,
        }
    }

    #[test]
    fn blockless_peripherals_are_skipped() {
        let chip = chip(vec![
            descriptor("SYSCFG", None, 0x4001_0000),
            descriptor("USART1", Some("usart_v1/USART"), 0x4001_3800),
        ]);
        let mut features = FeatureTracker::new();
        let entries =
            resolve_peripherals(&chip, &FamilyRegistry::builtin(), &mut features).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].peripheral.name, "USART1");
    }

    #[test]
    fn declaration_order_is_preserved() {
        let chip = chip(vec![
            descriptor("USART2", Some("usart_v1/USART"), 0x4000_4400),
            descriptor("GPIOA", Some("gpio_v1/GPIO"), 0x4001_0800),
            descriptor("USART1", Some("usart_v1/USART"), 0x4001_3800),
        ]);
        let mut features = FeatureTracker::new();
        let entries =
            resolve_peripherals(&chip, &FamilyRegistry::builtin(), &mut features).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.peripheral.name.as_str()).collect();
        assert_eq!(names, ["USART2", "GPIOA", "USART1"]);
    }

    #[test]
    fn unknown_family_resolves_opaque() {
        let chip = chip(vec![descriptor("CRC", Some("crc_v3/CRC"), 0x4002_3000)]);
        let mut features = FeatureTracker::new();
        let entries =
            resolve_peripherals(&chip, &FamilyRegistry::builtin(), &mut features).unwrap();
        assert_eq!(entries[0].peripheral.kind, PeripheralKind::Opaque);
        assert_eq!(entries[0].expansion, Expansion::Single);
        // Opaque families still participate in the feature set.
        assert!(features.clone().into_features().contains("_crc_v3"));
    }

    #[test]
    fn malformed_block_is_a_schema_error() {
        let chip = chip(vec![descriptor("USART1", Some("usartv1"), 0x4001_3800)]);
        let mut features = FeatureTracker::new();
        let err =
            resolve_peripherals(&chip, &FamilyRegistry::builtin(), &mut features).unwrap_err();
        assert!(matches!(
            err,
            CompileError::Model(ModelError::MalformedBlock { .. })
        ));
    }

    #[test]
    fn version_conflict_surfaces_from_resolution() {
        let chip = chip(vec![
            descriptor("USART1", Some("usart_v1/USART"), 0x4001_3800),
            descriptor("USART2", Some("usart_v2/USART"), 0x4000_4400),
        ]);
        let mut features = FeatureTracker::new();
        let err =
            resolve_peripherals(&chip, &FamilyRegistry::builtin(), &mut features).unwrap_err();
        assert!(matches!(err, CompileError::FamilyVersionConflict { .. }));
    }
}
