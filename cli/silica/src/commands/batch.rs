//! `silica batch` — compile every chip configuration and merge the feature
//! manifest.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use silica_emit::{feature_section, manifest_json, render_chip, splice_between, BatchManifest};
use silica_model::discover_chips;
use silica_resolve::{compile_batch, BatchFailure, FamilyRegistry};

/// Delimiters for the spliced feature section in build-configuration files.
const FEATURES_BEGIN: &str = "# BEGIN FEATURES";
const FEATURES_END: &str = "# END FEATURES";

/// Compile a (filtered) batch of configurations.
///
/// Every configuration is compiled independently; failures are reported and
/// the rest of the batch continues. The run succeeds only if every
/// configuration succeeded.
pub fn run(
    data_dir: &Path,
    filter: Option<&str>,
    out_dir: &Path,
    manifest_path: Option<&Path>,
    splice_path: Option<&Path>,
) -> Result<()> {
    let discovered = discover_chips(data_dir)?;
    let selected: Vec<_> = discovered
        .into_iter()
        .filter(|(name, _)| filter.map_or(true, |f| name.contains(f)))
        .collect();
    if selected.is_empty() {
        bail!(
            "no chip configurations selected in {} (filter: {})",
            data_dir.display(),
            filter.unwrap_or("<none>")
        );
    }

    // Load everything first; a configuration that fails to load is a batch
    // failure like any other, not a reason to stop.
    let mut configs = Vec::new();
    let mut load_failures = Vec::new();
    for (name, _) in &selected {
        match silica_model::load_configuration(data_dir, name) {
            Ok(pair) => configs.push(pair),
            Err(error) => load_failures.push(BatchFailure {
                chip: name.clone(),
                error: error.into(),
            }),
        }
    }

    let registry = FamilyRegistry::builtin();
    let mut outcome = compile_batch(&configs, &registry);
    outcome.failures.extend(load_failures);

    fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;
    for compiled in &outcome.compiled {
        let path = out_dir.join(format!("{}.decls.rs", compiled.name));
        fs::write(&path, render_chip(compiled))
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Compiled '{}' -> {}", compiled.name, path.display());
    }

    for failure in &outcome.failures {
        eprintln!("{}: error: {}", failure.chip, failure.error);
    }

    if let Some(path) = manifest_path {
        let manifest = BatchManifest::from_outcome(&outcome);
        let json = manifest_json(&manifest).context("serializing batch manifest")?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        println!("Manifest -> {}", path.display());
    }

    if let Some(path) = splice_path {
        let document = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let section = format!("\n{}", feature_section(&outcome.manifest));
        let updated = splice_between(&document, FEATURES_BEGIN, FEATURES_END, &section)
            .with_context(|| format!("splicing features into {}", path.display()))?;
        fs::write(path, updated).with_context(|| format!("writing {}", path.display()))?;
        println!("Features spliced into {}", path.display());
    }

    println!(
        "Batch: {} compiled, {} failed",
        outcome.compiled.len(),
        outcome.failures.len()
    );
    if !outcome.all_succeeded() {
        bail!("batch failed for {} configuration(s)", outcome.failures.len());
    }
    Ok(())
}
