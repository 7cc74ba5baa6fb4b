mod cli;
mod cmd;
mod error;
mod format;
mod io;
mod oracle;

use clap::Parser;
use tracing_subscriber::EnvFilter;

pub use cli::{Cli, Command, OutputFormat};

use cmd::compare::CompareArgs;
use cmd::discover::DiscoverArgs;
use error::CliError;

/// Installs the stderr log subscriber. `RUST_LOG` overrides the level chosen
/// by `--quiet` / `--verbose`.
fn init_tracing(cli: &Cli) {
    let default_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn dispatch(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Discover {
            folder,
            output,
            oracle,
            sampling,
        } => cmd::discover::run(
            &DiscoverArgs {
                folder,
                output,
                oracle,
                seed: sampling.seed,
            },
            &cli.format,
        ),
        Command::Compare {
            reference,
            candidate,
            threshold,
            report,
        } => cmd::compare::run(
            &CompareArgs {
                reference,
                candidate,
                threshold: *threshold,
                report: report.as_deref(),
            },
            cli.max_file_size,
            &cli.format,
        ),
        Command::Profile { folder, sampling } => {
            cmd::profile::run(folder, sampling.seed, &cli.format)
        }
        Command::Inspect { folder } => cmd::inspect::run(folder, &cli.format),
        Command::ExtractGt { folder, output } => cmd::extract_gt::run(folder, output, &cli.format),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = dispatch(&cli) {
        eprintln!("{}", e.message());
        std::process::exit(e.exit_code());
    }
}
