use clap::{Args, Parser, Subcommand};
use ips_core::{
    save_bundle, validate_file, BundleStats, Generator, HttpEnricher, Locale, ObservationMode,
    ResourceCounts, ValidationReport,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ips")]
#[command(about = "Synthetic FHIR International Patient Summary generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a synthetic IPS document bundle
    Generate(GenerateArgs),
    /// Validate existing IPS JSON files
    Validate {
        /// Files to validate
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Locale tag (en_US or en_IE)
    #[arg(long, default_value = "en_US")]
    locale: String,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// Output file path (defaults to ips_sample_{timestamp}.json)
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Fix the patient's logical id instead of deriving one
    #[arg(long)]
    patient_id: Option<String>,

    /// Enrich condition texts via the configured completion provider
    #[arg(long)]
    enrich: bool,

    /// Emit laboratory observations instead of vital signs
    #[arg(long)]
    labs: bool,

    #[command(flatten)]
    counts: CountArgs,
}

#[derive(Args)]
struct CountArgs {
    /// Number of allergies
    #[arg(long, default_value_t = 2)]
    allergies: usize,

    /// Number of medication statements
    #[arg(long, default_value_t = 3)]
    medications: usize,

    /// Number of conditions
    #[arg(long, default_value_t = 2)]
    conditions: usize,

    /// Number of immunizations
    #[arg(long, default_value_t = 3)]
    immunizations: usize,

    /// Number of procedures
    #[arg(long, default_value_t = 1)]
    procedures: usize,

    /// Number of observations
    #[arg(long, default_value_t = 2)]
    observations: usize,
}

impl From<&CountArgs> for ResourceCounts {
    fn from(args: &CountArgs) -> Self {
        Self {
            allergies: args.allergies,
            medications: args.medications,
            conditions: args.conditions,
            immunizations: args.immunizations,
            procedures: args.procedures,
            observations: args.observations,
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive("ips=info".parse()?))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => run_generate(&args),
        Commands::Validate { files } => {
            let all_valid = run_validate(&files)?;
            if !all_valid {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

fn run_generate(args: &GenerateArgs) -> anyhow::Result<()> {
    let locale: Locale = args.locale.parse()?;
    println!("Generating FHIR International Patient Summary ({locale})...");

    let mut generator = match args.seed {
        Some(seed) => Generator::seeded(locale, seed),
        None => Generator::new(locale),
    };
    if args.enrich {
        match HttpEnricher::from_env() {
            Ok(enricher) => generator = generator.with_enricher(Box::new(enricher)),
            Err(err) => tracing::warn!("enrichment unavailable, continuing without: {err}"),
        }
    }

    let mode = if args.labs {
        ObservationMode::Laboratory
    } else {
        ObservationMode::VitalSigns
    };
    let counts = ResourceCounts::from(&args.counts);
    let bundle = generator.assemble(&counts, args.patient_id.as_deref(), mode);

    let output = args.output.clone().unwrap_or_else(default_output_path);
    save_bundle(&bundle, &output)?;

    println!("IPS bundle generated successfully");
    println!("Saved to: {}", output.display());
    print_stats(&BundleStats::of(&bundle));

    Ok(())
}

fn default_output_path() -> PathBuf {
    let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("ips_sample_{stamp}.json"))
}

fn print_stats(stats: &BundleStats) {
    println!("\nBundle statistics:");
    println!("  - Total entries: {}", stats.entries);
    println!("  - Bundle ID: {}", stats.bundle_id);
    if let Some(timestamp) = &stats.timestamp {
        println!("  - Timestamp: {timestamp}");
    }

    println!("\nResource summary:");
    for (resource_type, count) in &stats.resource_counts {
        println!("  - {resource_type}: {count}");
    }
}

fn run_validate(files: &[PathBuf]) -> anyhow::Result<bool> {
    let mut valid_count = 0usize;
    let mut invalid_count = 0usize;

    for path in files {
        match validate_file(path) {
            Ok(report) => {
                print_report(path, &report);
                if report.is_valid() {
                    valid_count += 1;
                } else {
                    invalid_count += 1;
                }
            }
            Err(err) => {
                println!("\n{}: cannot validate: {err}", path.display());
                invalid_count += 1;
            }
        }
    }

    if files.len() > 1 {
        println!(
            "\nSummary: {valid_count} valid, {invalid_count} invalid out of {} total",
            files.len()
        );
    }

    Ok(invalid_count == 0)
}

fn print_report(path: &Path, report: &ValidationReport) {
    println!("\nValidation results: {}", path.display());
    if report.is_valid() {
        println!("VALID - bundle conforms to the IPS document structure");
    } else {
        println!("INVALID - bundle has validation errors");
    }

    if !report.errors.is_empty() {
        println!("Errors:");
        for error in &report.errors {
            println!("  - {error}");
        }
    }
    if !report.warnings.is_empty() {
        println!("Warnings:");
        for warning in &report.warnings {
            println!("  - {warning}");
        }
    }

    let info = &report.info;
    println!("Information:");
    println!("  - Bundle ID: {}", info.bundle_id);
    println!("  - Entry count: {}", info.entry_count);
    if let Some(timestamp) = &info.timestamp {
        println!("  - Timestamp: {timestamp}");
    }
    println!("  - IPS profile declared: {}", info.ips_profile);
    if !info.resource_counts.is_empty() {
        println!("  - Resource counts:");
        for (resource_type, count) in &info.resource_counts {
            println!("    - {resource_type}: {count}");
        }
    }
    if !info.section_titles.is_empty() {
        println!("  - Composition sections:");
        for title in &info.section_titles {
            println!("    - {title}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn default_output_name_is_timestamped() {
        let path = default_output_path();
        let name = path.to_str().expect("utf-8 file name");
        assert!(name.starts_with("ips_sample_"));
        assert!(name.ends_with(".json"));
        // ips_sample_YYYYMMDD_HHMMSS.json
        assert_eq!(name.len(), "ips_sample_".len() + 15 + ".json".len());
    }

    #[test]
    fn count_flags_map_onto_resource_counts() {
        let cli = Cli::parse_from([
            "ips",
            "generate",
            "--allergies",
            "1",
            "--medications",
            "0",
            "--observations",
            "4",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate subcommand");
        };
        let counts = ResourceCounts::from(&args.counts);
        assert_eq!(counts.allergies, 1);
        assert_eq!(counts.medications, 0);
        assert_eq!(counts.conditions, 2);
        assert_eq!(counts.observations, 4);
        assert_eq!(counts.total(), 10);
    }

    #[test]
    fn generated_file_validates_in_place() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let output = dir.path().join("ips.json");

        let mut generator = Generator::seeded(Locale::EnUs, 5);
        let bundle = generator.assemble(
            &ResourceCounts::default(),
            None,
            ObservationMode::VitalSigns,
        );
        save_bundle(&bundle, &output).expect("write bundle file");

        let report = validate_file(&output).expect("validate written file");
        assert!(report.is_valid(), "errors: {:?}", report.errors);
    }
}
