//! `vectorsim` - run the vector-borne epidemic simulation from the command line.
//!
//! Runtime inputs not given as flags are read from stdin, one per line, in the
//! order output path, seed, progress interval.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vectorsim_core::metrics::{CsvSink, LogProgress, ProgressReporter};
use vectorsim_core::{Orchestrator, RunSummary, SimulationConfig};

#[derive(Parser, Debug)]
#[command(
    name = "vectorsim",
    version,
    about = "Spatial agent-based simulation of mosquito-borne disease transmission"
)]
struct Cli {
    /// CSV file for the sampled hourly series.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for the random stream.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Seconds between progress reports (0 disables).
    #[arg(long)]
    progress_secs: Option<u64>,

    /// JSON file overriding any subset of the default parameters.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also write the end-of-day series to this CSV file.
    #[arg(long)]
    daily: Option<PathBuf>,

    /// Override the simulated horizon in hours.
    #[arg(long)]
    hours: Option<usize>,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let (mut config, config_has_seed) = load_config(cli.config.as_ref())?;
    if let Some(seed) = cli.seed {
        config.rng_seed = seed;
    }
    if let Some(hours) = cli.hours {
        config.horizon_hours = hours;
    }

    if cli.print_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let output = match cli.output {
        Some(path) => path,
        None => PathBuf::from(prompt::<String>(&mut input, "Output CSV path")?),
    };
    if cli.seed.is_none() && !config_has_seed {
        config.rng_seed = prompt(&mut input, "RNG seed")?;
    }
    let progress_secs = match cli.progress_secs {
        Some(secs) => secs,
        None => prompt(&mut input, "Progress interval in seconds (0 disables)")?,
    };

    let mut orchestrator = Orchestrator::new(config).context("failed to initialize simulation")?;

    let mut sink = CsvSink::create(&output)
        .with_context(|| format!("failed to open output file {}", output.display()))?;
    if let Some(daily) = &cli.daily {
        sink = sink
            .with_daily_file(daily)
            .with_context(|| format!("failed to open daily output file {}", daily.display()))?;
    }
    let mut progress = ProgressReporter::every_secs(progress_secs, Box::new(LogProgress));

    info!(output = %output.display(), seed = orchestrator.config().rng_seed, "running");
    let summary = orchestrator
        .run(&mut sink, progress.as_mut())
        .context("simulation run failed")?;

    print_summary(&summary, &output, cli.daily.as_ref());
    Ok(())
}

/// Defaults, overlaid with the JSON file if one is given. Also reports
/// whether the file named a seed.
fn load_config(path: Option<&PathBuf>) -> Result<(SimulationConfig, bool)> {
    let Some(path) = path else {
        return Ok((SimulationConfig::default(), false));
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let document: serde_json::Value = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    let has_seed = document.get("rng_seed").is_some();
    let config = serde_json::from_value(document)
        .with_context(|| format!("invalid config file {}", path.display()))?;
    Ok((config, has_seed))
}

fn prompt<T>(input: &mut impl BufRead, label: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("no value given for {label}");
    }
    let answer = line.trim();
    if answer.is_empty() {
        bail!("no value given for {label}");
    }
    answer
        .parse()
        .with_context(|| format!("could not parse {label} from {answer:?}"))
}

fn print_summary(summary: &RunSummary, output: &Path, daily: Option<&PathBuf>) {
    let counts = &summary.final_counts;
    match summary.cpu_time {
        Some(cpu) => println!(
            "Simulation finished in {:.2}s wall, {:.2}s CPU",
            summary.wall_time.as_secs_f64(),
            cpu.as_secs_f64()
        ),
        None => println!("Simulation finished in {:.2}s wall", summary.wall_time.as_secs_f64()),
    }
    println!("  hourly series: {} ({} rows)", output.display(), summary.rows_emitted);
    if let Some(daily) = daily {
        println!("  daily series:  {} ({} rows)", daily.display(), summary.days_emitted);
    }
    println!("  ticks:               {}", summary.ticks);
    println!("  human exposures:     {}", summary.human_exposures);
    println!("  vector infections:   {}", summary.vector_infections);
    println!(
        "  peak humans infected: {} (hour {})",
        summary.peak_humans_infected, summary.peak_tick
    );
    println!(
        "  mosquitoes: {} born, {} died of age, {} starved, {} alive",
        summary.births,
        summary.deaths_old_age,
        summary.deaths_starvation,
        summary.final_mosquito_total
    );
    println!(
        "  final humans S/E/I/R: {}/{}/{}/{}",
        counts.humans_susceptible,
        counts.humans_exposed,
        counts.humans_infected,
        counts.humans_recovered
    );
}
