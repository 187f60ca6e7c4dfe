/// Command-line tool for inspecting PDF object streams (`/Type /ObjStm`).
///
/// The input file holds an object stream's *decompressed* data. Its layout
/// comes either from explicit `--first`/`--count` flags or from the stream
/// dictionary passed with `--dict`.
///
/// # Command overview
///
/// ```text
/// pdfobj <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print every object the stream contains
///   validate   Check that the stream decodes cleanly
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Log decoder progress to stderr (debug level)
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                     |
/// |------|---------------------------------------------|
/// | 0    | Success                                     |
/// | 1    | Error (I/O failure, malformed stream, etc.) |
///
/// Diagnostics and logs go to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod cmd_inspect;
mod cmd_validate;
mod stream;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Inspect and validate PDF object streams.
#[derive(Parser)]
#[command(name = "pdfobj", version, about = "PDF object stream inspector")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log decoder progress at debug level (overrides `RUST_LOG`).
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Decode an object stream and print every object it contains.
    Inspect(InspectArgs),
    /// Decode an object stream and report whether it is well formed.
    Validate(ValidateArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Where the stream data lives and how it is laid out.
///
/// ```text
/// ┌────────────────────────┬───────────────────────────────────────────┐
/// │ Flag                   │ Effect                                    │
/// ├────────────────────────┼───────────────────────────────────────────┤
/// │ --first N --count N    │ Layout given directly                     │
/// │ --dict '<< ... >>'     │ Layout read from /First and /N            │
/// │ --cap-numbers          │ Clamp numbers beyond 2^53 − 1             │
/// └────────────────────────┴───────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct StreamArgs {
    /// File holding the decompressed object stream data.
    pub file: PathBuf,

    /// Byte offset of the first object (the stream's `/First`).
    #[arg(long, requires = "count", conflicts_with = "dict")]
    pub first: Option<usize>,

    /// Number of objects in the stream (the stream's `/N`).
    #[arg(long, requires = "first", conflicts_with = "dict")]
    pub count: Option<usize>,

    /// The stream dictionary, in PDF syntax.
    #[arg(long)]
    pub dict: Option<String>,

    /// Clamp numbers beyond the safe magnitude instead of keeping them.
    #[arg(long)]
    pub cap_numbers: bool,
}

/// Arguments for `pdfobj inspect`.
///
/// Prints one line per decoded object, `N G R = value`, in object number
/// order, followed by the document's safe-to-modify status.
#[derive(clap::Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub stream: StreamArgs,

    /// Print a JSON report instead of text.
    #[arg(long)]
    pub json: bool,

    /// Show only this object number.
    #[arg(long)]
    pub object: Option<u32>,
}

/// Arguments for `pdfobj validate`.
///
/// Exits with code 0 when every member parses and code 1 otherwise.
#[derive(clap::Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub stream: StreamArgs,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
