//! Declaration rendering: macro tables consumed by the downstream HAL.
//!
//! Each output of the pipeline becomes one macro table. The HAL invokes a
//! table with `pattern => expansion;` arms and receives one inner-macro
//! invocation per row, so it can pick out the rows it knows and ignore the
//! rest. Row order follows the pipeline's ordered output, which makes the
//! rendering reproducible byte for byte.

use silica_resolve::{CompiledChip, FeatureSet};

/// Render one macro table.
fn make_table(out: &mut String, name: &str, rows: &[Vec<String>]) {
    out.push_str("#[macro_export]\n");
    out.push_str(&format!("macro_rules! {name} {{\n"));
    out.push_str("    ($($pat:tt => $code:tt;)*) => {\n");
    out.push_str(&format!("        macro_rules! __{name}_inner {{\n"));
    out.push_str("            $(($pat) => $code;)*\n");
    out.push_str("            ($_:tt) => {}\n");
    out.push_str("        }\n");
    for row in rows {
        out.push_str(&format!("        __{name}_inner!(({}));\n", row.join(",")));
    }
    out.push_str("    };\n");
    out.push_str("}\n");
}

/// Render a compiled configuration as declaration text.
///
/// Rendering the same `CompiledChip` twice yields byte-identical output.
pub fn render_chip(compiled: &CompiledChip) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "// Generated declarations for chip '{}'. Do not edit.\n",
        compiled.name
    ));

    let singleton_rows: Vec<Vec<String>> = compiled
        .singletons
        .iter()
        .map(|s| vec![s.token.clone()])
        .collect();
    make_table(&mut out, "singletons", &singleton_rows);

    let binding_rows: Vec<Vec<String>> = compiled
        .pin_bindings
        .iter()
        .map(|b| {
            vec![
                b.peripheral.clone(),
                b.role.clone(),
                b.pin.clone(),
                b.af.to_string(),
            ]
        })
        .collect();
    make_table(&mut out, "pin_bindings", &binding_rows);

    let vector_rows: Vec<Vec<String>> = compiled
        .vector
        .iter()
        .map(|entry| {
            vec![
                entry.slot.to_string(),
                entry
                    .handler
                    .clone()
                    .unwrap_or_else(|| "RESERVED".to_string()),
            ]
        })
        .collect();
    make_table(&mut out, "interrupt_vector", &vector_rows);

    let feature_rows: Vec<Vec<String>> = compiled
        .features
        .iter()
        .map(|f| vec![f.clone()])
        .collect();
    make_table(&mut out, "features", &feature_rows);

    out
}

/// Render a feature set as a plain one-token-per-line section, suitable for
/// splicing into a build-configuration document.
pub fn feature_section(features: &FeatureSet) -> String {
    let mut out = String::new();
    for feature in features {
        out.push_str(feature);
        out.push('\n');
    }
    out
}
