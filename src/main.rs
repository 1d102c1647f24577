use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use ev_adoption_analyzer::{
    analysis::{fit_dataset, project, CurveFitter, FitDiagnostics},
    config::AnalysisConfig,
    io::{self, CsvReadOptions},
    models::AdoptionDataset,
    visualization::{
        print_intervals_table, print_params_table, print_projection_table, print_scurve_chart,
        print_timeline,
    },
};

#[derive(Parser)]
#[command(
    name = "ev-analyzer",
    about = "EV Adoption Analyzer - Logistic S-curve fitting and projection tool",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit S-curves to every entity and report the parameters
    Fit {
        /// Path to input file (CSV or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Path to a TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Comma-separated entity filter (overrides config)
        #[arg(short, long)]
        entities: Option<String>,

        /// Confidence level for parameter intervals (0.0-1.0)
        #[arg(long)]
        confidence: Option<f64>,

        /// Write fitted parameters to this file (.csv or .json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,

        /// Show per-entity parameter confidence intervals
        #[arg(long)]
        intervals: bool,
    },

    /// Project one entity's adoption share to a horizon year
    Project {
        /// Path to input file (CSV or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Entity to project
        #[arg(short, long)]
        entity: String,

        /// Path to a TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Last projected year (overrides config)
        #[arg(long)]
        horizon: Option<f64>,

        /// Show the text S-curve chart
        #[arg(long, default_value = "true")]
        chart: bool,
    },

    /// Render a policy timeline from a policy CSV
    Timeline {
        /// Path to policy CSV (region,policy,kind,start,end)
        #[arg(short, long)]
        input: PathBuf,

        /// Path to a TOML configuration file (region colors)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Display a quick summary of the dataset
    Summary {
        /// Path to input file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Convert adoption data between formats
    Convert {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },
}

fn load_config(path: &Option<PathBuf>) -> Result<AnalysisConfig> {
    match path {
        Some(p) => Ok(AnalysisConfig::from_path(p)?),
        None => Ok(AnalysisConfig::default()),
    }
}

fn load_dataset(path: &PathBuf, csv_options: &CsvReadOptions) -> Result<AdoptionDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => Ok(io::read_csv_with(path, csv_options)?),
        "json" => Ok(io::read_json(path)?),
        _ => anyhow::bail!("Unsupported file format: .{ext}. Use .csv or .json"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Fit {
            input,
            config,
            entities,
            confidence,
            output,
            pretty,
            intervals,
        } => {
            let mut cfg = load_config(&config)?;
            if let Some(list) = entities {
                cfg.entities = Some(list.split(',').map(|e| e.trim().to_string()).collect());
            }
            if let Some(c) = confidence {
                cfg.confidence = c;
            }

            println!(
                "\n{}",
                format!("S-Curve Fit: {}", input.display()).bold().cyan()
            );

            let csv_options = CsvReadOptions {
                share_column: cfg.share_column.clone(),
            };
            let mut dataset = load_dataset(&input, &csv_options)?;
            dataset.series.retain(|s| cfg.includes_entity(&s.entity));
            println!(
                "  Loaded {} entities with {} observations",
                dataset.num_entities(),
                dataset.num_samples()
            );

            let fitter = CurveFitter::new(cfg.fit_options());
            let result = fit_dataset(&dataset, &fitter, cfg.confidence);
            print_params_table(&result);

            if intervals {
                for fit in &result.fits {
                    print_intervals_table(fit);
                }
            }

            if let Some(out) = output {
                let out_ext = out
                    .extension()
                    .and_then(|e| e.to_str())
                    .unwrap_or("")
                    .to_lowercase();
                match out_ext.as_str() {
                    "csv" => io::write_params_csv(&result, &out)?,
                    "json" => io::write_params_json(&result, &out, pretty)?,
                    _ => anyhow::bail!("Unsupported output format: .{out_ext}"),
                }
                println!(
                    "\n{} Wrote {} fitted entities to {}",
                    "Success:".green().bold(),
                    result.fits.len(),
                    out.display()
                );
            }
        }

        Commands::Project {
            input,
            entity,
            config,
            horizon,
            chart,
        } => {
            let mut cfg = load_config(&config)?;
            if let Some(h) = horizon {
                cfg.horizon_year = h;
            }

            let csv_options = CsvReadOptions {
                share_column: cfg.share_column.clone(),
            };
            let dataset = load_dataset(&input, &csv_options)?;
            let series = dataset
                .entity(&entity)
                .ok_or_else(|| anyhow::anyhow!("Entity not found: {entity}"))?;
            let (start, _) = series
                .year_range()
                .ok_or_else(|| anyhow::anyhow!("Entity has no observations: {entity}"))?;

            println!(
                "\n{}",
                format!("Projection: {entity} to {:.0}", cfg.horizon_year)
                    .bold()
                    .cyan()
            );

            let fitter = CurveFitter::new(cfg.fit_options());
            let params = fitter.fit(&series.samples)?;
            let diagnostics = FitDiagnostics::compute(&series.samples, &params, cfg.confidence)?;
            println!(
                "  L = {:.4}, k = {:.4}, t0 = {:.2} (RMSE {:.4}, R² {:.4})",
                params.l, params.k, params.t0, diagnostics.rmse, diagnostics.r_squared
            );

            let projection = project(&params, start, cfg.horizon_year);
            print_projection_table(&entity, &projection);
            if chart {
                print_scurve_chart(&entity, &series.samples, &projection);
            }
        }

        Commands::Timeline { input, config } => {
            let cfg = load_config(&config)?;
            let timeline = io::read_timeline_csv(&input)?;
            println!(
                "  Loaded {} bands and {} events",
                timeline.bands.len(),
                timeline.events.len()
            );
            print_timeline(&timeline, &cfg);
        }

        Commands::Summary { input } => {
            let dataset = load_dataset(&input, &CsvReadOptions::default())?;

            println!("\n{}", "Quick Summary".bold().cyan());
            println!("{}", "=".repeat(40));
            println!("  Name:           {}", dataset.name);
            println!("  Entities:       {}", dataset.num_entities());
            println!("  Observations:   {}", dataset.num_samples());
            if let Some((lo, hi)) = dataset.year_range() {
                println!("  Year range:     {lo:.0}-{hi:.0}");
            }
            for series in &dataset.series {
                let latest = series
                    .samples
                    .last()
                    .map(|s| format!("{:.1}% in {:.0}", s.share * 100.0, s.year))
                    .unwrap_or_else(|| "no data".to_string());
                println!("    {:<28} {:>3} obs, latest {}", series.entity, series.len(), latest);
            }
        }

        Commands::Convert {
            input,
            output,
            pretty,
        } => {
            let dataset = load_dataset(&input, &CsvReadOptions::default())?;

            let out_ext = output
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_lowercase();

            match out_ext.as_str() {
                "csv" => io::write_csv(&dataset, &output)?,
                "json" => io::write_json(&dataset, &output, pretty)?,
                _ => anyhow::bail!("Unsupported output format: .{out_ext}"),
            }

            println!(
                "{} Converted {} -> {}",
                "Success:".green().bold(),
                input.display(),
                output.display()
            );
        }
    }

    Ok(())
}
