//! snapbump CLI
//!
//! Updates the `.spec` and `.changes` files in the current directory to the
//! latest upstream git snapshot of a component.

use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use tracing::{debug, error, info, Level};
use tracing_subscriber::FmtSubscriber;

use snapbump::{
    config::{DEFAULT_AUTHOR, DEFAULT_TARBALL_HOST},
    pipeline, Config, Result,
};

#[derive(Parser)]
#[command(name = "snapbump")]
#[command(about = "Update a package recipe to the latest upstream git snapshot", long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Upstream component (e.g., nova)
    #[arg(long)]
    component: String,

    /// Upstream tarball version (e.g., master)
    #[arg(long)]
    version: String,

    /// Local tarball filename, also written to the Source: field
    #[arg(long)]
    filename: String,

    /// Package name
    #[arg(long)]
    package: String,

    /// Output directory (accepted for source service compatibility, unused)
    #[arg(long)]
    outdir: Option<PathBuf>,

    /// Host serving the snapshot tarballs
    #[arg(long, env = "SNAPBUMP_TARBALL_HOST", default_value = DEFAULT_TARBALL_HOST)]
    host: String,

    /// Author of the generated .changes entry
    #[arg(long, env = "VC_MAILADDR", default_value = DEFAULT_AUTHOR)]
    author: String,

    /// Directory holding the .spec and .changes files (default: current directory)
    #[arg(long)]
    workdir: Option<PathBuf>,
}

fn setup_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    exit_code(run(cli))
}

fn exit_code(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    if let Some(outdir) = &cli.outdir {
        debug!("Ignoring --outdir {:?}", outdir);
    }

    let workdir = match cli.workdir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let config = Config::new(cli.component, cli.version, cli.filename, cli.package, workdir)
        .with_host(cli.host)
        .with_author(cli.author);

    let summary = pipeline::run(&config)?;
    info!(
        "Updated {} to {} ({} new commits, {} spec files, {} changes files)",
        config.package,
        summary.version,
        summary.new_commits,
        summary.spec_files.len(),
        summary.changes_files.len()
    );

    Ok(())
}
