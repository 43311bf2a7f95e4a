//! `silica build` — compile one chip configuration.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use silica_emit::{chip_json, render_chip};
use silica_resolve::{compile, FamilyRegistry};

/// Compile one configuration and write or print its declarations.
pub fn run(
    data_dir: &Path,
    chip_name: &str,
    out: Option<&Path>,
    format: Option<&str>,
    report: bool,
) -> Result<()> {
    let (chip, af) = silica_model::load_configuration(data_dir, chip_name)
        .with_context(|| format!("loading chip '{chip_name}' from {}", data_dir.display()))?;

    let registry = FamilyRegistry::builtin();
    let compiled = compile(&chip, &af, &registry)?;

    let text = match format.unwrap_or("decls") {
        "decls" => render_chip(&compiled),
        "json" => chip_json(&compiled).context("serializing compiled chip")?,
        other => bail!("unknown format: '{other}'. Choose: decls, json"),
    };

    match out {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            println!("Compiled '{}' -> {}", compiled.name, path.display());
        }
        None => print!("{text}"),
    }

    if report {
        print!("{}", compiled.report);
    }

    Ok(())
}
