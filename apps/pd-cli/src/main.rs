use clap::{Parser, Subcommand, ValueEnum};
use pd_app::{
    AppError, AppResult, DiagramConfig, Scale, build_diagram_for, compound_service, load_config,
    save_svg, to_json, write_csv,
};
use pd_compounds::{Compound, Dataset};
use pd_core::{PressureUnit, TemperatureUnit};
use pd_curves::CurveKind;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pd-cli")]
#[command(about = "Phase diagrams from Clausius-Clapeyron and Antoine relations", long_about = None)]
struct Cli {
    /// CSV dataset to use instead of the built-in one
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// YAML file describing a single compound (replaces the identifier)
    #[arg(long, global = true)]
    compound_file: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List compounds in the dataset
    List {
        /// Case-insensitive substring of name, formula or CAS number
        #[arg(long)]
        filter: Option<String>,
    },
    /// Show a compound's normalized properties (K, Pa, J/mol, cm³/mol)
    Show {
        /// Name, formula or CAS number (exact match)
        id: Option<String>,
    },
    /// Export sampled curves
    Curves {
        /// Name, formula or CAS number (exact match)
        id: Option<String>,
        /// Curve to evaluate (repeatable; default all four)
        #[arg(long = "curve")]
        curves: Vec<CurveKind>,
        /// Samples per curve
        #[arg(long)]
        samples: Option<usize>,
        #[arg(long, value_enum, default_value_t = Format::Csv)]
        format: Format,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render the phase diagram as SVG
    Plot {
        /// Name, formula or CAS number (exact match)
        id: Option<String>,
        /// Diagram configuration YAML
        #[arg(long)]
        config: Option<PathBuf>,
        /// Curve to draw (repeatable; default from config)
        #[arg(long = "curve")]
        curves: Vec<CurveKind>,
        /// Linear pressure axis instead of logarithmic
        #[arg(long)]
        linear: bool,
        /// Temperature unit: K, C or F
        #[arg(long)]
        t_unit: Option<TemperatureUnit>,
        /// Pressure unit: Pa, kPa, MPa, bar, atm or mmHg
        #[arg(long)]
        p_unit: Option<PressureUnit>,
        /// Output SVG path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Csv,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> AppResult<()> {
    let sources = Sources {
        dataset: cli.dataset,
        compound_file: cli.compound_file,
    };

    match cli.command {
        Commands::List { filter } => cmd_list(&sources, filter.as_deref()),
        Commands::Show { id } => cmd_show(&sources, id.as_deref()),
        Commands::Curves {
            id,
            curves,
            samples,
            format,
            output,
        } => cmd_curves(
            &sources,
            id.as_deref(),
            curves,
            samples,
            format,
            output.as_deref(),
        ),
        Commands::Plot {
            id,
            config,
            curves,
            linear,
            t_unit,
            p_unit,
            output,
        } => {
            let mut config = match config {
                Some(path) => load_config(&path)?,
                None => DiagramConfig::default(),
            };
            if !curves.is_empty() {
                config.curves = curves;
            }
            if linear {
                config.display.scale = Scale::Linear;
            }
            if let Some(unit) = t_unit {
                config.display.temperature_unit = unit;
            }
            if let Some(unit) = p_unit {
                config.display.pressure_unit = unit;
            }
            if output.is_some() {
                config.output = output;
            }
            cmd_plot(&sources, id.as_deref(), config)
        }
    }
}

/// Where compounds come from: a dataset or a single YAML compound.
struct Sources {
    dataset: Option<PathBuf>,
    compound_file: Option<PathBuf>,
}

impl Sources {
    fn dataset(&self, fallback: Option<&Path>) -> AppResult<Dataset> {
        compound_service::open_dataset(self.dataset.as_deref().or(fallback))
    }

    fn compound(&self, id: Option<&str>, dataset_fallback: Option<&Path>) -> AppResult<Compound> {
        if let Some(path) = &self.compound_file {
            return compound_service::load_compound_file(path);
        }
        let id = id.ok_or_else(|| {
            AppError::InvalidInput(
                "a compound identifier is required unless --compound-file is given".to_string(),
            )
        })?;
        compound_service::get_compound(&self.dataset(dataset_fallback)?, id)
    }
}

fn cmd_list(sources: &Sources, filter: Option<&str>) -> AppResult<()> {
    let dataset = sources.dataset(None)?;
    let compounds = compound_service::list_compounds(&dataset, filter);

    if compounds.is_empty() {
        println!("No compounds found");
    } else {
        println!("{:<20} {:<10} {}", "NAME", "FORMULA", "CAS");
        for c in compounds {
            println!("{:<20} {:<10} {}", c.name, c.formula, c.cas);
        }
    }
    Ok(())
}

fn show_opt(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v} {unit}"),
        None => "-".to_string(),
    }
}

fn cmd_show(sources: &Sources, id: Option<&str>) -> AppResult<()> {
    let c = sources.compound(id, None)?;

    println!("{} ({}, CAS {})", c.name, c.formula, c.cas);
    println!(
        "  Triple point:             {} K, {} Pa",
        c.triple.temperature_k, c.triple.pressure_pa
    );
    println!(
        "  Critical point:           {} K, {}",
        c.critical_temperature_k,
        show_opt(c.critical_pressure_pa, "Pa")
    );
    println!(
        "  Enthalpy of fusion:       {}",
        show_opt(c.enthalpy_fusion_j_per_mol, "J/mol")
    );
    println!(
        "  Melting volume:           {}",
        match c.melting_volume {
            Some(v) => format!("{} cm³/mol ({:?})", v.cm3_per_mol, v.source),
            None => "-".to_string(),
        }
    );
    println!(
        "  Enthalpy of sublimation:  {}",
        show_opt(c.enthalpy_sublimation_j_per_mol, "J/mol")
    );
    println!(
        "  Enthalpy of vaporization: {}",
        match c.enthalpy_vaporization {
            Some(h) => format!("{} J/mol ({:?})", h.j_per_mol, h.source),
            None => "-".to_string(),
        }
    );
    match c.antoine {
        Some(fit) => {
            let (t_min, t_max) = fit.valid_range();
            println!(
                "  Antoine (Pa, K):          A = {:.5}, B = {}, C = {:.2}, {} K .. {} K",
                fit.a, fit.b, fit.c, t_min, t_max
            );
        }
        None => println!("  Antoine (Pa, K):          -"),
    }
    Ok(())
}

fn cmd_curves(
    sources: &Sources,
    id: Option<&str>,
    curves: Vec<CurveKind>,
    samples: Option<usize>,
    format: Format,
    output: Option<&Path>,
) -> AppResult<()> {
    let mut config = DiagramConfig::default();
    if !curves.is_empty() {
        config.curves = curves;
    }
    if let Some(n) = samples {
        config.samples = n;
    }

    let compound = sources.compound(id, None)?;
    let diagram = build_diagram_for(&compound, &config)?;

    let mut buf = Vec::new();
    match format {
        Format::Csv => write_csv(&diagram, &mut buf, &config.display)?,
        Format::Json => buf.extend_from_slice(to_json(&diagram)?.as_bytes()),
    }

    if let Some(path) = output {
        std::fs::write(path, &buf)?;
        let points: usize = diagram.curves.iter().map(|c| c.len()).sum();
        println!(
            "✓ Exported {} curves ({} points) to {}",
            diagram.curves.len(),
            points,
            path.display()
        );
    } else {
        io::stdout().write_all(&buf)?;
    }

    Ok(())
}

fn cmd_plot(sources: &Sources, id: Option<&str>, config: DiagramConfig) -> AppResult<()> {
    let compound = sources.compound(id, config.dataset.as_deref())?;
    let diagram = build_diagram_for(&compound, &config)?;

    let path = config
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}.svg", diagram.default_title())));
    save_svg(&diagram, &config.display, &path)?;

    println!("✓ Diagram written to {}", path.display());
    if !diagram.omitted.is_empty() {
        let names: Vec<&str> = diagram.omitted.iter().map(|k| k.display_name()).collect();
        println!("  omitted (missing data): {}", names.join(", "));
    }
    Ok(())
}
