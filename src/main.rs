use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use colored::Colorize;
use miette::Result;
use std::path::PathBuf;
use tracing::{info, warn};

use injectlint::analysis::registry::{all_registries, detectors_for};
use injectlint::analysis::{LintRunner, Severity};
use injectlint::baseline::Baseline;
use injectlint::config::Config;
use injectlint::discovery::FileFinder;
use injectlint::graph::{GraphBuilder, ParallelGraphBuilder};
use injectlint::refactor::FixApplier;
use injectlint::report::{self, ReportFormat, ReportOptions, Reporter};

/// injectlint - Lint Dagger, Anvil and Hilt usage in Android projects (Kotlin/Java)
#[derive(Parser, Debug)]
#[command(name = "injectlint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the project directory (or single file) to analyze
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target directories to analyze (can be specified multiple times)
    #[arg(short, long)]
    target: Vec<PathBuf>,

    /// Glob patterns to exclude (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: OutputFormat,

    /// Output file (for json/sarif formats)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Issue ids to turn on, including those off by default (comma-separated or repeated)
    #[arg(long, value_name = "ID", value_delimiter = ',')]
    enable: Vec<String>,

    /// Issue ids to turn off (comma-separated or repeated)
    #[arg(long, value_name = "ID", value_delimiter = ',')]
    disable: Vec<String>,

    /// Print every issue the registries provide and exit
    #[arg(long)]
    list_issues: bool,

    /// Apply the proposed fixes
    #[arg(long)]
    fix: bool,

    /// Confirm each fix and choose between alternative fixes
    #[arg(long)]
    interactive: bool,

    /// Dry run - show what --fix would change without writing files
    #[arg(long)]
    dry_run: bool,

    /// Baseline file for ignoring existing issues
    /// New issues not in baseline will be reported
    #[arg(long, value_name = "FILE")]
    baseline: Option<PathBuf>,

    /// Generate a baseline file from current results
    #[arg(long, value_name = "FILE")]
    generate_baseline: Option<PathBuf>,

    /// Enable parallel processing (enabled by default)
    #[arg(long, default_value = "true", action = clap::ArgAction::Set)]
    parallel: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    #[default]
    Terminal,
    Compact,
    Json,
    Sarif,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Compact => ReportFormat::Compact,
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::Sarif => ReportFormat::Sarif,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completions
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    init_logging(cli.verbose, cli.quiet);

    info!("injectlint v{}", env!("CARGO_PKG_VERSION"));

    if cli.list_issues {
        list_issues(&cli)?;
        return Ok(());
    }

    let config = load_config(&cli)?;

    if run_analysis(&config, &cli)? {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        // Try to load from default locations
        let root = if cli.path.is_file() {
            cli.path.parent().map(PathBuf::from).unwrap_or_default()
        } else {
            cli.path.clone()
        };
        Config::from_default_locations(&root)?
    };

    // Override with CLI arguments
    if !cli.target.is_empty() {
        config.targets = cli.target.clone();
    }
    config.exclude.extend(cli.exclude.iter().cloned());
    config.enable.extend(cli.enable.iter().cloned());
    config.disable.extend(cli.disable.iter().cloned());
    config.parallel = cli.parallel;
    config.sanitize();

    Ok(config)
}

fn list_issues(cli: &Cli) -> Result<()> {
    let registries = all_registries();
    match cli.format {
        OutputFormat::Json | OutputFormat::Sarif => {
            report::print_catalogue_json(&registries, cli.output.as_deref())?
        }
        OutputFormat::Terminal | OutputFormat::Compact => report::print_catalogue(&registries),
    }
    Ok(())
}

/// Returns whether error-severity findings remain
fn run_analysis(config: &Config, cli: &Cli) -> Result<bool> {
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Instant;

    let start_time = Instant::now();
    let format = ReportFormat::from(cli.format);
    // Status lines would corrupt machine-readable output on stdout
    let chatty = !cli.quiet && !(format.is_machine_readable() && cli.output.is_none());

    // Step 1: Discover files
    info!("Discovering files...");
    let finder = FileFinder::new(config);
    let files = finder.find_files(&cli.path)?;

    info!("Found {} files to analyze", files.len());

    if files.is_empty() {
        if chatty {
            println!("{}", "No Kotlin or Java files found.".yellow());
        }
        return Ok(false);
    }

    // Step 2: Parse files and build graph
    let graph = if config.parallel {
        info!("Parsing {} files in parallel...", files.len());
        ParallelGraphBuilder::new().build_from_files(&files)?
    } else {
        let pb = if chatty {
            ProgressBar::new(files.len() as u64)
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        info!("Parsing files...");
        let mut graph_builder = GraphBuilder::new();

        for file in &files {
            if let Err(e) = graph_builder.process_file(file) {
                warn!("Skipping {}: {}", file.path.display(), e);
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        graph_builder.build()
    };

    info!(
        "Parsed {} files into {} declarations in {:.2}s",
        files.len(),
        graph.len(),
        start_time.elapsed().as_secs_f64()
    );

    // Step 3: Run detectors
    info!("Running detectors...");
    let runner = LintRunner::new(detectors_for(config)).with_config(config);
    let findings = runner.run(&graph);
    info!("{} findings", findings.len());

    // Step 4: Generate baseline if requested
    if let Some(ref baseline_path) = cli.generate_baseline {
        info!("Generating baseline file...");
        let baseline = Baseline::from_findings(&findings, &cli.path);
        baseline.save(baseline_path)?;
        if chatty {
            println!(
                "{}",
                format!(
                    "📋 Baseline generated: {} ({} issues)",
                    baseline_path.display(),
                    baseline.len()
                )
                .green()
            );
        }
    }

    // Step 5: Filter by baseline if provided
    let findings = if let Some(ref baseline_path) = cli.baseline {
        let baseline = Baseline::load(baseline_path)?;
        let stats = baseline.stats(&findings, &cli.path);
        if chatty {
            println!("{}", format!("📋 Baseline: {}", stats).cyan());
        }

        // Only report new issues not in baseline
        let new_issues: Vec<_> = baseline
            .filter_new(&findings, &cli.path)
            .into_iter()
            .cloned()
            .collect();

        if new_issues.is_empty() && stats.baselined_found > 0 && chatty {
            println!("{}", "✓ No new issues found!".green());
        }

        new_issues
    } else {
        findings
    };

    // Step 6: Report results
    let mut report_options = ReportOptions::new();
    report_options.output_path = cli.output.clone();
    report_options.base_path = Some(cli.path.clone());
    report_options.show_fixes = !cli.fix;

    let reporter = Reporter::with_options(format, report_options);
    reporter.report(&findings)?;

    // Step 7: Apply fixes if requested
    if cli.fix || cli.dry_run {
        let applier = FixApplier::new(cli.interactive, cli.dry_run);
        let summary = applier.apply(&findings)?;
        if chatty {
            let verb = if cli.dry_run { "Would apply" } else { "Applied" };
            println!(
                "{}",
                format!(
                    "🔧 {} {} fixes in {} files ({} skipped)",
                    verb, summary.fixes_applied, summary.files_changed, summary.fixes_skipped
                )
                .green()
            );
        }
    }

    info!(
        "Analysis completed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(findings.iter().any(|f| f.severity == Severity::Error))
}
