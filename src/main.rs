use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use labinv::LabPaths;

/// Build an Ansible lab inventory from the virtual machine launch trace.
///
/// Reads `trace/launch_output.log`, writes a sanitized copy next to it,
/// and generates `inventory/lab.yml`.
#[derive(Parser)]
#[command(name = "labinv", version, about, long_about = None)]
struct Cli {}

fn main() -> ExitCode {
    let _cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    if let Err(err) = labinv::generate(&LabPaths::default()) {
        error!("{:#}", err);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
