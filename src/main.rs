use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use move_semantics::reporter::{OutputFormat, ReportOptions};
use move_semantics::{AllocationProfiler, BenchConfig, Reporter, bench, demo};
use std::io;
use std::process;

#[derive(Clone, ValueEnum)]
enum OutputFormatArg {
    Text,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser)]
#[command(author, version, about = "Copy versus move construction demos", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase verbosity (can be specified multiple times: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format for benchmark results
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    output: OutputFormatArg,

    /// Save the benchmark report to file for later comparison
    #[arg(long, global = true)]
    save: Option<String>,

    /// Compare the benchmark against a previously saved report
    #[arg(long, global = true)]
    compare: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which constructor the forwarding factory selects
    Forward,
    /// Copy and then move a small buffer, printing each size
    Ownership,
    /// Time copy-construction against move-construction of a holder
    Bench {
        /// Number of integers in the buffer (at most i32::MAX)
        #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u32).range(..=i32::MAX as i64))]
        size: u32,

        /// Constructions per timed run
        #[arg(long, default_value_t = 10_000_000)]
        iterations: usize,

        /// Untimed constructions before each phase
        #[arg(long, default_value_t = 0)]
        warmup: usize,

        /// Timed runs per phase
        #[arg(long, default_value_t = 1)]
        repetitions: usize,

        /// Skip counting allocations during the phases
        #[arg(long)]
        no_alloc_tracking: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let report_options = ReportOptions {
        verbosity: cli.verbose,
        format: cli.output.clone().into(),
        save: cli.save.clone(),
        compare: cli.compare.clone(),
    };

    let result = match cli.command {
        Commands::Forward => forward_command(),
        Commands::Ownership => ownership_command(),
        Commands::Bench {
            size,
            iterations,
            warmup,
            repetitions,
            no_alloc_tracking,
        } => {
            let config = BenchConfig {
                size: size as usize,
                iterations,
                warmup,
                repetitions,
                track_allocations: !no_alloc_tracking,
            };
            bench_command(config, report_options)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn forward_command() -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    demo::forwarding(&mut stdout.lock())?;
    Ok(())
}

fn ownership_command() -> Result<(), Box<dyn std::error::Error>> {
    let stdout = io::stdout();
    demo::ownership(&mut stdout.lock())?;
    Ok(())
}

fn bench_command(
    config: BenchConfig,
    report_options: ReportOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    if config.repetitions == 0 {
        return Err("--repetitions must be at least 1".into());
    }

    // Only print status messages for text output
    if report_options.format == OutputFormat::Text {
        println!(
            "🔍 Timing {} copies and {} moves of a {}-element buffer...",
            config.iterations.saturating_mul(config.repetitions),
            config.iterations.saturating_mul(config.repetitions),
            config.size
        );
        if report_options.verbosity >= 1 && config.warmup > 0 {
            println!(
                "{}",
                format!("   {} warmup iterations per phase", config.warmup).dimmed()
            );
        }
    }

    let report = bench::run(&config);

    if config.track_allocations {
        AllocationProfiler::write_report()
            .map_err(|e| format!("failed to write allocation profile: {}", e))?;
    }

    Reporter::print_report(&report, &report_options)
}
