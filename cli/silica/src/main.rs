//! silica CLI — compile declarative chip descriptions into HAL binding
//! declarations.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "silica", version, about = "Hardware-description compiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile one chip configuration
    Build {
        /// Chip name (matches <name>.chip.toml in the data directory)
        chip: String,
        /// Directory holding chip and AF documents
        #[arg(long, default_value = "chips")]
        data_dir: PathBuf,
        /// Output file (stdout if omitted)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Output format (decls, json)
        #[arg(long)]
        format: Option<String>,
        /// Print the compile report
        #[arg(long)]
        report: bool,
    },
    /// Compile every chip configuration in the data directory
    Batch {
        /// Directory holding chip and AF documents
        #[arg(long, default_value = "chips")]
        data_dir: PathBuf,
        /// Only compile chips whose name contains this substring
        #[arg(long)]
        filter: Option<String>,
        /// Directory for per-chip declaration files
        #[arg(long, default_value = "out")]
        out_dir: PathBuf,
        /// Write the merged feature manifest as JSON to this file
        #[arg(long)]
        manifest: Option<PathBuf>,
        /// Splice the merged feature list into this file between
        /// `# BEGIN FEATURES` and `# END FEATURES` markers
        #[arg(long)]
        splice_into: Option<PathBuf>,
    },
    /// List chip configurations in the data directory
    List {
        /// Directory holding chip and AF documents
        #[arg(long, default_value = "chips")]
        data_dir: PathBuf,
    },
    /// Validate a chip document without compiling it
    Check {
        /// Chip name (matches <name>.chip.toml in the data directory)
        chip: String,
        /// Directory holding chip and AF documents
        #[arg(long, default_value = "chips")]
        data_dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Build {
            chip,
            data_dir,
            out,
            format,
            report,
        } => commands::build::run(&data_dir, &chip, out.as_deref(), format.as_deref(), report),

        Commands::Batch {
            data_dir,
            filter,
            out_dir,
            manifest,
            splice_into,
        } => commands::batch::run(
            &data_dir,
            filter.as_deref(),
            &out_dir,
            manifest.as_deref(),
            splice_into.as_deref(),
        ),

        Commands::List { data_dir } => commands::list::run(&data_dir),

        Commands::Check { chip, data_dir } => commands::check::run(&data_dir, &chip),
    }
}

#[cfg(test)]
mod integration_tests {
    use std::fs;
    use std::path::Path;

    use super::*;

    const DEMO_CHIP: &str = r#"
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

    const DEMO_CHIP_SPI: &str = r#"
name = "demo-m1"
family = "demo"
af-table = "af0"

[[peripherals]]
name = "GPIOA"
block = "gpio_v1/GPIO"
address = 0x40010800

[[peripherals]]
name = "SPI1"
block = "spi_v2/SPI"
address = 0x40013000

[[interrupts]]
name = "SPI1"
slot = 35
"#;

    const BROKEN_CHIP: &str = r#"
name = "demo-bad"
family = "demo"
af-table = "af0"

[[interrupts]]
name = "EXTI9_5"
slot = 23

[[interrupts]]
name = "TIM1_UP"
slot = 23
"#;

    const DEMO_AF: &str = r#"
id = "af0"

[[pins]]
pin = "PA9"
[pins.signals]
USART1_TX = 7

[[pins]]
pin = "PA10"
[pins.signals]
USART1_RX = 7

[[pins]]
pin = "PA5"
[pins.signals]
SPI1_SCK = 5
"#;

    fn write_data_dir(dir: &Path) {
        fs::write(dir.join("demo-m0.chip.toml"), DEMO_CHIP).unwrap();
        fs::write(dir.join("demo-m1.chip.toml"), DEMO_CHIP_SPI).unwrap();
        fs::write(dir.join("af0.af.toml"), DEMO_AF).unwrap();
    }

    /// Full workflow: list → check → build → batch.
    #[test]
    fn list_check_build_batch_workflow() {
        let dir = tempfile::tempdir().unwrap();
        write_data_dir(dir.path());

        commands::list::run(dir.path()).unwrap();
        commands::check::run(dir.path(), "demo-m0").unwrap();

        let out = dir.path().join("demo-m0.decls.rs");
        commands::build::run(dir.path(), "demo-m0", Some(out.as_path()), None, true).unwrap();
        let text = fs::read_to_string(&out).unwrap();
        assert!(text.contains("__singletons_inner!((PA0));"));
        assert!(text.contains("__pin_bindings_inner!((USART1,TX,PA9,7));"));
        assert!(text.contains("__features_inner!((_usart_v1));"));

        let out_dir = dir.path().join("out");
        let manifest = dir.path().join("manifest.json");
        commands::batch::run(dir.path(), None, &out_dir, Some(manifest.as_path()), None).unwrap();
        assert!(out_dir.join("demo-m0.decls.rs").is_file());
        assert!(out_dir.join("demo-m1.decls.rs").is_file());

        let manifest_text = fs::read_to_string(&manifest).unwrap();
        assert!(manifest_text.contains("_usart_v1"));
        assert!(manifest_text.contains("_spi_v2"));
    }

    /// Building twice produces byte-identical output.
    #[test]
    fn build_is_deterministic_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        write_data_dir(dir.path());

        let first = dir.path().join("first.rs");
        let second = dir.path().join("second.rs");
        commands::build::run(dir.path(), "demo-m0", Some(first.as_path()), None, false).unwrap();
        commands::build::run(dir.path(), "demo-m0", Some(second.as_path()), None, false).unwrap();

        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    /// JSON output parses and carries the vector.
    #[test]
    fn build_json_format() {
        let dir = tempfile::tempdir().unwrap();
        write_data_dir(dir.path());

        let out = dir.path().join("demo-m0.json");
        commands::build::run(dir.path(), "demo-m0", Some(out.as_path()), Some("json"), false).unwrap();

        let text = fs::read_to_string(&out).unwrap();
        assert!(text.contains("\"vector\""));
        assert!(text.contains("\"PA15\""));
    }

    #[test]
    fn build_unknown_format_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_data_dir(dir.path());

        let result = commands::build::run(dir.path(), "demo-m0", None, Some("xml"), false);
        assert!(result.is_err());
    }

    #[test]
    fn build_missing_chip_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_data_dir(dir.path());

        let result = commands::build::run(dir.path(), "no-such-chip", None, None, false);
        assert!(result.is_err());
    }

    /// A failing configuration fails the batch but not its neighbors.
    #[test]
    fn batch_continues_past_failures() {
        let dir = tempfile::tempdir().unwrap();
        write_data_dir(dir.path());
        fs::write(dir.path().join("demo-bad.chip.toml"), BROKEN_CHIP).unwrap();

        let out_dir = dir.path().join("out");
        let manifest = dir.path().join("manifest.json");
        let result = commands::batch::run(dir.path(), None, &out_dir, Some(manifest.as_path()), None);
        assert!(result.is_err(), "batch with a broken chip must fail overall");

        // The healthy configurations still produced output.
        assert!(out_dir.join("demo-m0.decls.rs").is_file());
        assert!(out_dir.join("demo-m1.decls.rs").is_file());
        assert!(!out_dir.join("demo-bad.decls.rs").exists());

        let manifest_text = fs::read_to_string(&manifest).unwrap();
        assert!(manifest_text.contains("demo-bad"));
        assert!(manifest_text.contains("_usart_v1"));
    }

    /// --filter narrows the batch.
    #[test]
    fn batch_filter_selects_subset() {
        let dir = tempfile::tempdir().unwrap();
        write_data_dir(dir.path());

        let out_dir = dir.path().join("out");
        commands::batch::run(dir.path(), Some("m1"), &out_dir, None, None).unwrap();
        assert!(out_dir.join("demo-m1.decls.rs").is_file());
        assert!(!out_dir.join("demo-m0.decls.rs").exists());
    }

    #[test]
    fn batch_empty_selection_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_data_dir(dir.path());

        let out_dir = dir.path().join("out");
        let result = commands::batch::run(dir.path(), Some("zzz"), &out_dir, None, None);
        assert!(result.is_err());
    }

    /// --splice-into refreshes the delimited section of an existing file.
    #[test]
    fn batch_splices_feature_section() {
        let dir = tempfile::tempdir().unwrap();
        write_data_dir(dir.path());

        let config = dir.path().join("hal-config.txt");
        fs::write(
            &config,
            "# hal build config\n# BEGIN FEATURES\n_stale\n# END FEATURES\ntail\n",
        )
        .unwrap();

        let out_dir = dir.path().join("out");
        commands::batch::run(dir.path(), None, &out_dir, None, Some(config.as_path())).unwrap();

        let text = fs::read_to_string(&config).unwrap();
        assert!(!text.contains("_stale"));
        assert!(text.contains("_usart_v1"));
        assert!(text.contains("_spi_v2"));
        assert!(text.starts_with("# hal build config\n# BEGIN FEATURES\n"));
        assert!(text.ends_with("# END FEATURES\ntail\n"));
    }

    /// check reports structural issues and fails on errors.
    #[test]
    fn check_rejects_duplicate_slots() {
        let dir = tempfile::tempdir().unwrap();
        write_data_dir(dir.path());
        fs::write(dir.path().join("demo-bad.chip.toml"), BROKEN_CHIP).unwrap();

        let result = commands::check::run(dir.path(), "demo-bad");
        assert!(result.is_err());
    }

    #[test]
    fn list_handles_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        commands::list::run(dir.path()).unwrap();
    }
}
