//! `silica list` — list chip configurations in the data directory.

use std::path::Path;

use anyhow::Result;

use silica_model::{discover_chips, load_chip_toml};

/// Print the discovered chip configurations.
pub fn run(data_dir: &Path) -> Result<()> {
    let chips = discover_chips(data_dir)?;
    if chips.is_empty() {
        println!(
            "no chip configurations found in {} (expected <name>.chip.toml files)",
            data_dir.display()
        );
        return Ok(());
    }

    for (name, path) in &chips {
        match load_chip_toml(path) {
            Ok(chip) => println!(
                "{name}  ({} peripherals, {} interrupts, AF table '{}')",
                chip.peripherals.len(),
                chip.interrupts.len(),
                chip.af_table
            ),
            Err(e) => println!("{name}  (unreadable: {e})"),
        }
    }
    Ok(())
}
