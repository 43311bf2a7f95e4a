//! TOML loading, discovery, and structural validation for chip documents.
//!
//! Chip descriptions are stored as `<name>.chip.toml` and AF tables as
//! `<id>.af.toml` files in a data directory. This module provides functions
//! to load, discover, and validate these files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::af::AlternateFunctionTable;
use crate::block::BlockId;
use crate::chip::ChipDescription;
use crate::error::{ModelError, Result};

/// A structural issue found in a chip document.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity: "error" or "warning".
    pub severity: &'static str,
    /// Human-readable description.
    pub message: String,
}

/// Load a chip description from a `.chip.toml` file.
pub fn load_chip_toml(path: &Path) -> Result<ChipDescription> {
    if !path.exists() {
        return Err(ModelError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_chip_toml(&content)
}

/// Parse a chip description from a TOML string.
pub fn parse_chip_toml(toml_str: &str) -> Result<ChipDescription> {
    let chip: ChipDescription = toml::from_str(toml_str)?;
    Ok(chip)
}

/// Load an AF table from a `.af.toml` file.
pub fn load_af_toml(path: &Path) -> Result<AlternateFunctionTable> {
    if !path.exists() {
        return Err(ModelError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_af_toml(&content)
}

/// Parse an AF table from a TOML string.
pub fn parse_af_toml(toml_str: &str) -> Result<AlternateFunctionTable> {
    let af: AlternateFunctionTable = toml::from_str(toml_str)?;
    Ok(af)
}

/// Load a chip by name from a data directory, together with the AF table it
/// references.
///
/// The chip lives at `<data_dir>/<name>.chip.toml` and its AF table at
/// `<data_dir>/<af-table>.af.toml`. A dangling AF reference is reported as
/// [`ModelError::UnknownAfTable`] rather than a bare file-not-found so batch
/// output names the offending chip.
pub fn load_configuration(
    data_dir: &Path,
    chip_name: &str,
) -> Result<(ChipDescription, AlternateFunctionTable)> {
    let chip = load_chip_toml(&data_dir.join(format!("{chip_name}.chip.toml")))?;
    let af_path = data_dir.join(format!("{}.af.toml", chip.af_table));
    if !af_path.exists() {
        return Err(ModelError::UnknownAfTable {
            chip: chip.name.clone(),
            id: chip.af_table.clone(),
        });
    }
    let af = load_af_toml(&af_path)?;
    Ok((chip, af))
}

/// Discover all `.chip.toml` files in a data directory.
///
/// Returns a list of (chip_name, file_path) pairs sorted by name.
pub fn discover_chips(data_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    if !data_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut chips = Vec::new();
    let entries = std::fs::read_dir(data_dir)?;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
            if file_name.ends_with(".chip.toml") {
                let name = file_name.strip_suffix(".chip.toml").unwrap().to_string();
                chips.push((name, path));
            }
        }
    }
    chips.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(chips)
}

/// Validate a chip description for structural correctness.
///
/// Returns `Ok(())` if valid, or `Err(issues)` with a list of problems.
/// These are the inconsistencies the compiler can detect without resolving
/// anything: duplicate names, duplicate slots, malformed block identifiers.
pub fn validate_chip(chip: &ChipDescription) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    // 1. Peripheral names are unique
    let mut seen = HashSet::new();
    for p in &chip.peripherals {
        if !seen.insert(p.name.as_str()) {
            issues.push(ValidationIssue {
                severity: "error",
                message: format!("peripheral '{}' is declared more than once", p.name),
            });
        }
    }

    // 2. Block identifiers parse
    for p in &chip.peripherals {
        if let Some(ref block) = p.block {
            if BlockId::parse(block).is_none() {
                issues.push(ValidationIssue {
                    severity: "error",
                    message: format!(
                        "peripheral '{}' has malformed block identifier '{}' \
                         (expected family_version/Variant)",
                        p.name, block
                    ),
                });
            }
        }
    }

    // 3. Interrupt names are unique
    let mut seen = HashSet::new();
    for irq in &chip.interrupts {
        if !seen.insert(irq.name.as_str()) {
            issues.push(ValidationIssue {
                severity: "error",
                message: format!("interrupt '{}' is declared more than once", irq.name),
            });
        }
    }

    // 4. Interrupt slots are unique
    let mut slots = HashSet::new();
    for irq in &chip.interrupts {
        if !slots.insert(irq.slot) {
            issues.push(ValidationIssue {
                severity: "error",
                message: format!(
                    "vector slot {} is claimed by more than one interrupt ('{}' among them)",
                    irq.slot, irq.name
                ),
            });
        }
    }

    // 5. Peripherals without blocks are unusual but allowed
    for p in &chip.peripherals {
        if p.block.is_none() {
            issues.push(ValidationIssue {
                severity: "warning",
                message: format!("peripheral '{}' has no block and will not be resolved", p.name),
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Validate an AF table for structural correctness.
pub fn validate_af(af: &AlternateFunctionTable) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    let mut seen = HashSet::new();
    for p in &af.pins {
        if !seen.insert(p.pin.as_str()) {
            issues.push(ValidationIssue {
                severity: "error",
                message: format!("pin '{}' appears more than once in AF table '{}'", p.pin, af.id),
            });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHIP_TOML: &str = r#"
name = "demo-m0"
family = "demo"
af-table = "af0"

[[peripherals]]
name = "GPIOA"
block = "gpio_v1/GPIO"
address = 0x40010800

[[peripherals]]
name = "USART1"
block = "usart_v1/USART"
address = 0x40013800
clock = "apb2"

[[interrupts]]
name = "USART1"
slot = 37
"#;

    const AF_TOML: &str = r#"
id = "af0"

[[pins]]
pin = "PA9"
[pins.signals]
USART1_TX = 7

[[pins]]
pin = "PA10"
[pins.signals]
USART1_RX = 7
"#;

    #[test]
    fn parse_chip() {
        let chip = parse_chip_toml(CHIP_TOML).unwrap();
        assert_eq!(chip.name, "demo-m0");
        assert_eq!(chip.af_table, "af0");
        assert_eq!(chip.peripherals.len(), 2);
        assert_eq!(chip.interrupts.len(), 1);
        assert_eq!(chip.interrupts[0].slot, 37);
    }

    #[test]
    fn parse_preserves_declaration_order() {
        let chip = parse_chip_toml(CHIP_TOML).unwrap();
        let names: Vec<_> = chip.peripherals.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["GPIOA", "USART1"]);
    }

    #[test]
    fn parse_af() {
        let af = parse_af_toml(AF_TOML).unwrap();
        assert_eq!(af.id, "af0");
        assert_eq!(af.selector("PA9", "USART1_TX"), Some(7));
        assert_eq!(af.selector("PA10", "USART1_RX"), Some(7));
    }

    #[test]
    fn parse_invalid_returns_error() {
        assert!(parse_chip_toml("this is not valid toml [[[").is_err());
        assert!(parse_af_toml("nor [[[ this").is_err());
    }

    #[test]
    fn parse_missing_field_returns_error() {
        assert!(parse_chip_toml("name = \"incomplete\"\n").is_err());
    }

    #[test]
    fn load_not_found() {
        let result = load_chip_toml(Path::new("/nonexistent/x.chip.toml"));
        assert!(matches!(result.unwrap_err(), ModelError::NotFound { .. }));
    }

    #[test]
    fn load_configuration_resolves_af_reference() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("demo-m0.chip.toml"), CHIP_TOML).unwrap();
        std::fs::write(dir.path().join("af0.af.toml"), AF_TOML).unwrap();

        let (chip, af) = load_configuration(dir.path(), "demo-m0").unwrap();
        assert_eq!(chip.name, "demo-m0");
        assert_eq!(af.id, "af0");
    }

    #[test]
    fn load_configuration_dangling_af_reference() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("demo-m0.chip.toml"), CHIP_TOML).unwrap();

        let err = load_configuration(dir.path(), "demo-m0").unwrap_err();
        match err {
            ModelError::UnknownAfTable { chip, id } => {
                assert_eq!(chip, "demo-m0");
                assert_eq!(id, "af0");
            }
            other => panic!("expected UnknownAfTable, got {other}"),
        }
    }

    #[test]
    fn discover_chips_finds_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("zeta.chip.toml"), CHIP_TOML).unwrap();
        std::fs::write(dir.path().join("alpha.chip.toml"), CHIP_TOML).unwrap();
        // Non-.chip.toml files should be ignored
        std::fs::write(dir.path().join("af0.af.toml"), AF_TOML).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignore me").unwrap();

        let chips = discover_chips(dir.path()).unwrap();
        assert_eq!(chips.len(), 2);
        assert_eq!(chips[0].0, "alpha");
        assert_eq!(chips[1].0, "zeta");
    }

    #[test]
    fn discover_missing_dir() {
        let chips = discover_chips(Path::new("/nonexistent/dir")).unwrap();
        assert!(chips.is_empty());
    }

    #[test]
    fn validate_clean_chip() {
        let chip = parse_chip_toml(CHIP_TOML).unwrap();
        assert!(validate_chip(&chip).is_ok());
    }

    #[test]
    fn validate_duplicate_peripheral() {
        let mut chip = parse_chip_toml(CHIP_TOML).unwrap();
        let dup = chip.peripherals[0].clone();
        chip.peripherals.push(dup);
        let issues = validate_chip(&chip).unwrap_err();
        assert!(issues.iter().any(|i| i.message.contains("more than once")));
    }

    #[test]
    fn validate_malformed_block() {
        let mut chip = parse_chip_toml(CHIP_TOML).unwrap();
        chip.peripherals[1].block = Some("usartv1".into());
        let issues = validate_chip(&chip).unwrap_err();
        assert!(issues.iter().any(|i| i.message.contains("malformed block")));
    }

    #[test]
    fn validate_duplicate_slot() {
        let mut chip = parse_chip_toml(CHIP_TOML).unwrap();
        chip.interrupts.push(crate::chip::InterruptDescriptor {
            name: "SPI1".into(),
            slot: 37,
        });
        let issues = validate_chip(&chip).unwrap_err();
        assert!(issues.iter().any(|i| i.message.contains("slot 37")));
    }

    #[test]
    fn validate_blockless_peripheral_warns() {
        let mut chip = parse_chip_toml(CHIP_TOML).unwrap();
        chip.peripherals.push(crate::chip::PeripheralDescriptor {
            name: "SYSCFG".into(),
            block: None,
            address: 0x4001_0000,
            clock: None,
        });
        let issues = validate_chip(&chip).unwrap_err();
        assert!(issues.iter().any(|i| i.severity == "warning"));
        assert!(issues.iter().all(|i| i.severity != "error"));
    }

    #[test]
    fn validate_duplicate_af_pin() {
        let mut af = parse_af_toml(AF_TOML).unwrap();
        let dup = af.pins[0].clone();
        af.pins.push(dup);
        let issues = validate_af(&af).unwrap_err();
        assert!(issues.iter().any(|i| i.message.contains("PA9")));
    }
}
