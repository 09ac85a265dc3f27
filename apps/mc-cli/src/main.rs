use clap::{Args, Parser, Subcommand, ValueEnum};
use mc_app::{AppError, AppResult, DesignReport, DistillationSession, run_case};
use mc_column::{RefluxSweep, Spacing, TowerSpec};
use mc_core::units::{k, to_celsius};
use mc_thermo::{
    AntoineTable, ChemicalPair, CoefficientSource, Component, EquilibriumModel, RaoultModel,
    filter_chemical_catalog,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mccabe")]
#[command(about = "McCabe-Thiele binary distillation design", long_about = None)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List chemicals with their normal boiling points
    Chemicals {
        /// Delimited coefficient table to list instead of the built-in one
        #[arg(long)]
        table: Option<PathBuf>,
        /// Only show names, formulas or aliases containing this text
        #[arg(long)]
        filter: Option<String>,
    },
    /// Export the x-y equilibrium curve as CSV
    Curve {
        #[command(flatten)]
        pair: PairArgs,
        /// Include temperatures (T-x-y rows, ascending temperature)
        #[arg(long)]
        txy: bool,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Count equilibrium stages for a tower spec
    Stages {
        #[command(flatten)]
        pair: PairArgs,
        #[command(flatten)]
        tower: TowerArgs,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run a YAML case file
    Case {
        /// Path to the case YAML file
        case_path: PathBuf,
        /// Print the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Stage counts over a range of reflux ratios
    Sweep {
        #[command(flatten)]
        pair: PairArgs,
        #[command(flatten)]
        tower: TowerArgs,
        /// First reflux ratio
        #[arg(long)]
        from: f64,
        /// Last reflux ratio
        #[arg(long)]
        to: f64,
        /// Number of ratios
        #[arg(long, default_value_t = 10)]
        points: usize,
        /// Spacing between ratios
        #[arg(long, value_enum, default_value_t = SpacingArg::Linear)]
        spacing: SpacingArg,
        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },
    /// Bubble temperature of a liquid with the given light fraction
    Temperature {
        #[command(flatten)]
        pair: PairArgs,
        /// Liquid mole fraction of the light component
        x: f64,
    },
}

#[derive(Args)]
struct PairArgs {
    /// Light (lower boiling) chemical
    light: String,
    /// Heavy (higher boiling) chemical
    heavy: String,
    /// Delimited coefficient table (comma separated, with header)
    #[arg(long)]
    table: Option<PathBuf>,
}

#[derive(Args)]
struct TowerArgs {
    /// Reflux ratio L/D
    #[arg(long, default_value_t = 2.0)]
    reflux: f64,
    /// Bottoms light fraction
    #[arg(long)]
    bottoms: f64,
    /// Feed light fraction
    #[arg(long)]
    feed: f64,
    /// Distillate light fraction
    #[arg(long)]
    distillate: f64,
    /// Murphree stage efficiency
    #[arg(long, default_value_t = 1.0)]
    murphree: f64,
}

#[derive(Clone, Copy, ValueEnum)]
enum SpacingArg {
    Linear,
    Log,
}

fn main() -> AppResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Chemicals { table, filter } => cmd_chemicals(table.as_deref(), filter.as_deref()),
        Commands::Curve { pair, txy, output } => cmd_curve(&pair, txy, output.as_deref()),
        Commands::Stages { pair, tower, json } => cmd_stages(&pair, &tower, json),
        Commands::Case { case_path, json } => cmd_case(&case_path, json),
        Commands::Sweep {
            pair,
            tower,
            from,
            to,
            points,
            spacing,
            json,
        } => {
            let spacing = match spacing {
                SpacingArg::Linear => Spacing::Linear,
                SpacingArg::Log => Spacing::Logarithmic,
            };
            let sweep = RefluxSweep::new(from, to, points, spacing)?;
            cmd_sweep(&pair, &tower, &sweep, json)
        }
        Commands::Temperature { pair, x } => cmd_temperature(&pair, x),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_table(path: Option<&Path>) -> AppResult<AntoineTable> {
    match path {
        Some(path) => Ok(AntoineTable::from_path(path, ',', true)?),
        None => Ok(AntoineTable::builtin()),
    }
}

fn open_session(pair: &PairArgs, spec: TowerSpec) -> AppResult<DistillationSession> {
    let table = load_table(pair.table.as_deref())?;
    DistillationSession::new(
        Box::new(table),
        ChemicalPair::new(&pair.light, &pair.heavy),
        spec,
    )
}

fn tower_spec(args: &TowerArgs) -> AppResult<TowerSpec> {
    Ok(TowerSpec::new(
        args.reflux,
        args.bottoms,
        args.feed,
        args.distillate,
        args.murphree,
    )?)
}

fn cmd_chemicals(table: Option<&Path>, filter: Option<&str>) -> AppResult<()> {
    if table.is_none() {
        let entries = filter_chemical_catalog(filter.unwrap_or(""));
        println!("{:<16} {:<8} {:>10} {:>10}", "name", "formula", "Tb [K]", "Tb [C]");
        for entry in entries {
            let tb = entry.coefficients.boiling_point();
            println!(
                "{:<16} {:<8} {:>10.2} {:>10.2}",
                entry.name,
                entry.formula,
                tb,
                to_celsius(k(tb))
            );
        }
        return Ok(());
    }

    let table = load_table(table)?;
    let query = filter.map(str::to_lowercase);
    println!("{:<16} {:>10} {:>10}", "name", "Tb [K]", "Tb [C]");
    for name in table.names() {
        if let Some(q) = &query {
            if !name.to_lowercase().contains(q.as_str()) {
                continue;
            }
        }
        let tb = table.require(name)?.boiling_point();
        println!("{:<16} {:>10.2} {:>10.2}", name, tb, to_celsius(k(tb)));
    }
    Ok(())
}

fn cmd_curve(pair: &PairArgs, txy: bool, output: Option<&Path>) -> AppResult<()> {
    let table = load_table(pair.table.as_deref())?;
    let system =
        mc_thermo::BinarySystem::new(ChemicalPair::new(&pair.light, &pair.heavy), &table)?;

    let mut csv = String::new();
    if txy {
        csv.push_str("t_k,x,y\n");
        for p in system.txy() {
            csv.push_str(&format!("{},{},{}\n", p.t_k, p.x, p.y));
        }
    } else {
        csv.push_str("x,y\n");
        for (x, y) in system.curve().points() {
            csv.push_str(&format!("{},{}\n", x, y));
        }
    }

    if let Some(path) = output {
        std::fs::write(path, csv).map_err(|e| AppError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        println!(
            "✓ Exported {} points for {}/{} to {}",
            system.curve().len(),
            system.pair().light,
            system.pair().heavy,
            path.display()
        );
    } else {
        print!("{}", csv);
    }
    Ok(())
}

fn cmd_stages(pair: &PairArgs, tower: &TowerArgs, json: bool) -> AppResult<()> {
    let session = open_session(pair, tower_spec(tower)?)?;
    print_report(&DesignReport::from_session(&session), json)
}

fn cmd_case(case_path: &Path, json: bool) -> AppResult<()> {
    tracing::debug!(path = %case_path.display(), "running case");
    let report = run_case(case_path)?;
    print_report(&report, json)
}

fn print_report(report: &DesignReport, json: bool) -> AppResult<()> {
    if json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    let line = &report.operating_line;
    println!(
        "Chemicals: {} (light) / {} (heavy)",
        report.chemicals.light, report.chemicals.heavy
    );
    println!(
        "Temperature window: {} K .. {} K",
        report.temperature_bounds.low, report.temperature_bounds.high
    );
    println!(
        "Rectifying line: y = {:.4} x + {:.4}",
        line.rectifying.slope, line.rectifying.intercept
    );
    println!(
        "Stripping line:  y = {:.4} x + {:.4}",
        line.stripping.slope, line.stripping.intercept
    );
    println!("Stages: {}", report.stages);
    println!("Feed stage: {}", report.feed_step);
    Ok(())
}

fn cmd_sweep(pair: &PairArgs, tower: &TowerArgs, sweep: &RefluxSweep, json: bool) -> AppResult<()> {
    let session = open_session(pair, tower_spec(tower)?)?;
    let rows = session.sweep(sweep);

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("{}", sweep);
    println!("{:>10} {:>8} {:>6}", "R", "stages", "feed");
    for row in &rows {
        println!(
            "{:>10.4} {:>8} {:>6}",
            row.reflux_ratio,
            row.result.steps.to_string(),
            row.result.feed_step
        );
    }
    Ok(())
}

fn cmd_temperature(pair: &PairArgs, x: f64) -> AppResult<()> {
    if !(0.0..=1.0).contains(&x) {
        return Err(AppError::InvalidInput(format!(
            "liquid fraction must lie in [0, 1], got {x}"
        )));
    }
    let table = load_table(pair.table.as_deref())?;
    let system =
        mc_thermo::BinarySystem::new(ChemicalPair::new(&pair.light, &pair.heavy), &table)?;
    let outcome = system.temperature_for_fraction(x)?;

    let model: &RaoultModel = system.model();
    let y = model.vapor_fraction(x, outcome.value);
    println!(
        "T = {:.2} K ({:.2} C), y = {:.4}{}",
        outcome.value,
        to_celsius(k(outcome.value)),
        y,
        if outcome.converged { "" } else { " (not converged)" }
    );
    println!(
        "Pure boiling points: {} {:.2} K, {} {:.2} K",
        system.pair().light,
        system.boiling_point(Component::Light),
        system.pair().heavy,
        system.boiling_point(Component::Heavy)
    );
    Ok(())
}
