use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};

use sqrubber::dump::OutputTarget;
use sqrubber::{clean_dump, resolve_dump, CleanOptions, CollisionOptions, SqrubberError};

#[derive(Parser)]
#[command(name = "sqrubber")]
#[command(version, about = "Standardize names in SQL dumps and resolve table collisions")]
struct Cli {
    /// Log level for diagnostics on stderr (RUST_LOG overrides)
    #[arg(long, global = true, value_enum, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct OutputArgs {
    /// Output path (defaults to <input>.cleaned)
    #[arg(short, long, conflicts_with_all = ["print", "overwrite"])]
    output: Option<PathBuf>,

    /// Print the result to stdout only
    #[arg(short, long)]
    print: bool,

    /// Write the result back over the input file
    #[arg(long, conflicts_with = "print")]
    overwrite: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Standardize table and column names and tag each source with a marker
    Clean {
        /// Input dump file(s), combined in the order given
        #[arg(short, long = "infile", required = true, num_args = 1..)]
        infile: Vec<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,

        /// Prefix prepended to every table name
        #[arg(long)]
        prefix: Option<String>,

        /// Schema qualifier applied to every table name
        #[arg(long)]
        schema: Option<String>,
    },
    /// Rename tables created by more than one source in a combined dump
    Collisions {
        /// Combined dump produced by `sqrubber clean`
        #[arg(short, long = "infile")]
        infile: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Clean { .. } => "clean",
            Commands::Collisions { .. } => "collisions",
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

fn init_tracing(level: LogLevel) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Clean {
            infile,
            output,
            prefix,
            schema,
        } => {
            let options = CleanOptions {
                inputs: infile,
                output: output.output,
                print_only: output.print,
                overwrite: output.overwrite,
                prefix,
                schema,
            };
            if let OutputTarget::File(path) = clean_dump(options)? {
                eprintln!("Wrote {}", path.display());
            }
        }
        Commands::Collisions { infile, output } => {
            let options = CollisionOptions {
                input: infile,
                output: output.output,
                print_only: output.print,
                overwrite: output.overwrite,
            };
            let (report, target) = resolve_dump(options)?;
            for (dump, suffix) in &report.suffixes {
                eprintln!("{dump} -> _{suffix}");
            }
            eprintln!(
                "Renamed {} DROP, {} CREATE and {} INSERT lines ({} CREATE without data)",
                report.drops_rewritten,
                report.creates_rewritten,
                report.inserts_rewritten,
                report.orphaned_creates.len()
            );
            if let OutputTarget::File(path) = target {
                eprintln!("Wrote {}", path.display());
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    let name = cli.command.name();
    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            if err
                .downcast_ref::<SqrubberError>()
                .is_some_and(SqrubberError::is_input_error)
            {
                eprintln!("\nFor usage, try 'sqrubber {name} --help'.");
            }
            ExitCode::FAILURE
        }
    }
}
