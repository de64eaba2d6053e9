use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use event_insight::{
    extract_headline, extract_host, init_reference_tables, Dataset, EvaluationConfig,
    EvaluationReport, InsightEngine, MethodChoice,
};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "event-insight")]
#[command(author = "Hummer Team")]
#[command(version = "0.1.0")]
#[command(about = "Outlier, skew and reference-code helpers for event-record data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate outliers and skew of numeric columns in a CSV or TSV file
    Evaluate {
        /// Path to a .csv or .tsv file
        #[arg(short, long)]
        file: PathBuf,

        /// Column to evaluate (all numeric columns if omitted)
        #[arg(short, long)]
        column: Option<String>,

        /// TOML file with default and per-column options
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: RangeArgs,

        /// Print reports as JSON
        #[arg(long)]
        json: bool,
    },

    /// Extract the publisher name from news URLs
    Host {
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Extract the headline slug from news URLs
    Headline {
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Look up codes in the reference tables
    Lookup {
        /// Directory holding event_codes.tsv, geo_type_codes.tsv,
        /// un_country_codes.tsv and role_codes.tsv
        #[arg(short, long)]
        tables: PathBuf,

        #[arg(required = true)]
        codes: Vec<String>,
    },
}

/// Command-line overrides applied on top of the config defaults
#[derive(Args)]
struct RangeArgs {
    /// Outlier method: auto, iqr or z-score
    #[arg(short, long)]
    method: Option<MethodChoice>,

    /// Multiplier for the chosen method (1.5 for iqr, 3 for z-score by default)
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Smallest legitimate value of the metric
    #[arg(long, allow_hyphen_values = true)]
    lower_limit: Option<f64>,

    /// Largest legitimate value of the metric
    #[arg(long, allow_hyphen_values = true)]
    upper_limit: Option<f64>,

    /// Fail when a skew transform is undefined for the data
    #[arg(long)]
    strict_transforms: bool,
}

impl RangeArgs {
    fn apply(&self, config: &mut EvaluationConfig) {
        let defaults = &mut config.defaults;
        if let Some(method) = self.method {
            defaults.range.method = method;
        }
        if let Some(threshold) = self.threshold {
            defaults.range.threshold = Some(threshold);
        }
        if let Some(lower) = self.lower_limit {
            defaults.range.lower_limit = Some(lower);
        }
        if let Some(upper) = self.upper_limit {
            defaults.range.upper_limit = Some(upper);
        }
        if self.strict_transforms {
            defaults.strict_transforms = true;
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate {
            file,
            column,
            config,
            overrides,
            json,
        } => {
            let mut config = match config {
                Some(path) => EvaluationConfig::load(&path)?,
                None => EvaluationConfig::default(),
            };
            overrides.apply(&mut config);

            let dataset = Dataset::load(&file)?;
            let name = dataset.name.clone();
            let mut engine = InsightEngine::with_config(config);
            engine.add_dataset(dataset);

            let reports: Vec<(String, EvaluationReport)> = match column {
                Some(field) => {
                    let report = engine.evaluate_column(&name, &field)?;
                    vec![(field, report)]
                }
                None => engine
                    .evaluate_all(&name)?
                    .into_iter()
                    // Failed columns are already logged at warn by the engine
                    .filter_map(|evaluation| {
                        let field = evaluation.field;
                        evaluation.result.ok().map(|report| (field, report))
                    })
                    .collect(),
            };

            if json {
                let map: serde_json::Map<String, serde_json::Value> = reports
                    .iter()
                    .map(|(field, report)| {
                        serde_json::to_value(report).map(|value| (field.clone(), value))
                    })
                    .collect::<serde_json::Result<_>>()
                    .context("failed to serialize reports")?;
                println!("{}", serde_json::to_string_pretty(&map)?);
            } else {
                for (field, report) in &reports {
                    print_report(field, report);
                }
            }
        }

        Commands::Host { urls } => {
            for url in urls {
                println!("{}\t{}", url, extract_host(&url).unwrap_or_default());
            }
        }

        Commands::Headline { urls } => {
            for url in urls {
                println!("{}\t{}", url, extract_headline(&url).unwrap_or_default());
            }
        }

        Commands::Lookup { tables, codes } => {
            let tables = init_reference_tables(&tables)?;
            for code in codes {
                match tables.describe(&code) {
                    Some((table, label)) => println!("{}\t{}\t{}", code, table, label),
                    None => println!("{}\t-\tunknown code", code),
                }
            }
        }
    }

    Ok(())
}

fn print_report(field: &str, report: &EvaluationReport) {
    println!("\n=== Evaluation of '{}' ===", field);
    println!("{}", report);
    println!(
        "Kept {} of {} values",
        report.series.non_outliers.len(),
        report.series.raw.len()
    );
}
