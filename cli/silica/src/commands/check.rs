//! `silica check` — validate a chip document without compiling it.

use std::path::Path;

use anyhow::{bail, Context, Result};

use silica_model::{load_configuration, validate_af, validate_chip};

/// Validate one configuration's documents and report structural issues.
pub fn run(data_dir: &Path, chip_name: &str) -> Result<()> {
    let (chip, af) = load_configuration(data_dir, chip_name)
        .with_context(|| format!("loading chip '{chip_name}' from {}", data_dir.display()))?;

    let mut issues = Vec::new();
    if let Err(found) = validate_chip(&chip) {
        issues.extend(found);
    }
    if let Err(found) = validate_af(&af) {
        issues.extend(found);
    }

    if issues.is_empty() {
        println!("{}: OK", chip.name);
        return Ok(());
    }

    for issue in &issues {
        println!("{}: {}", issue.severity, issue.message);
    }

    let errors = issues.iter().filter(|i| i.severity == "error").count();
    if errors > 0 {
        bail!("{errors} error(s) in '{}'", chip.name);
    }
    Ok(())
}
