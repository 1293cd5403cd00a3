use anyhow::{Context, Result};
use benchci::cli::{AnalyzeArgs, Cli, Command, FitErrorArgs, OutputFormat};
use benchci::csv_input;
use benchci::statistics::{analyze_series, AnalysisConfig};
use benchci::throughput::{fit_error_with_naive, ONE_SECOND};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; diagnostics go to stderr, reports to stdout
fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        tracing::Level::DEBUG
    } else if quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Layer configuration sources: file or preset, then individual flags
fn build_config(args: &AnalyzeArgs) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::default(),
    };

    if let Some(preset) = args.preset {
        config.max_autocorrelation = preset.max_autocorrelation();
    }
    if let Some(ac) = args.max_autocorrelation {
        if !(ac > 0.0 && ac <= 1.0) {
            anyhow::bail!("Invalid value for --ac: {} (must be in (0, 1])", ac);
        }
        config.max_autocorrelation = ac;
    }
    if let Some(level) = args.confidence_level {
        config.confidence_level = level;
    }
    if let Some(method) = args.mean_method {
        config.mean_method = method;
    }
    if let Some(width) = args.ci_width {
        config.target_ci_width = Some(width);
    }

    config.validate().context("Invalid analysis configuration")?;
    Ok(config)
}

fn run_analyze(args: &AnalyzeArgs) -> Result<()> {
    let config = build_config(args)?;
    let input = csv_input::open_input(&args.input)?;
    let series = csv_input::read_series(input, args.field, args.ignore_lines)
        .with_context(|| format!("Failed to load series from {}", args.input.display()))?;
    if series.is_empty() {
        anyhow::bail!("No readings found in {}", args.input.display());
    }

    let analysis = analyze_series(&series, &config)?;
    match args.format {
        OutputFormat::Text => {
            print!("{}", analysis.to_report_string());
            if let Some(width) = config.target_ci_width {
                println!("target_ci_width_met {}", analysis.meets_width(width));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
    }

    if analysis.optimal_subsession_size.is_none() && series.len() > 1 {
        anyhow::bail!(
            "Cannot find a subsession size with autocorrelation within {}; more readings are needed",
            config.max_autocorrelation
        );
    }
    Ok(())
}

fn run_fit_error(args: &FitErrorArgs) -> Result<()> {
    let summary = csv_input::read_round_summary(csv_input::open_input(&args.summary)?)
        .with_context(|| format!("Failed to load summary from {}", args.summary.display()))?;
    let rounds = csv_input::read_rounds(csv_input::open_input(&args.rounds)?)
        .with_context(|| format!("Failed to load rounds from {}", args.rounds.display()))?;

    let model = summary.model()?;
    let naive_v = match args.naive_v {
        Some(v) => v / ONE_SECOND,
        None => summary.naive_v(),
    };
    tracing::debug!(
        alpha = model.alpha,
        v = model.v,
        naive_v,
        rounds = rounds.len(),
        "loaded throughput data"
    );

    let report = fit_error_with_naive(&rounds, &model, naive_v)?;
    match args.format {
        OutputFormat::Text => print!("{}", report.to_report_string()),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose, args.quiet);

    match &args.command {
        Command::Analyze(analyze) => run_analyze(analyze),
        Command::FitError(fit) => run_fit_error(fit),
    }
}
