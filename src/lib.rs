//! Build an Ansible lab inventory from a virtual machine launch trace.
//!
//! Provisioning a simulated router lab leaves a console transcript behind.
//! This crate turns that transcript into a machine-readable inventory in
//! three steps:
//!
//! 1. [`sanitize_file`] strips terminal escape sequences from the raw
//!    transcript.
//! 2. [`scan_hosts`] scans the clean copy for router name and
//!    management-address announcements and pairs them into host records.
//! 3. [`write_inventory`] serializes the records, plus the fixed
//!    connection variables, as a YAML inventory.
//!
//! [`generate`] wires the steps together over the fixed [`LabPaths`]
//! layout.

pub mod inventory;
pub mod paths;
pub mod trace;

pub use inventory::{write_inventory, InventoryError};
pub use paths::LabPaths;
pub use trace::{sanitize_file, scan_hosts, AnsiStripper, HostRecord};

use anyhow::{bail, Context, Result};
use tracing::info;

/// Run the full trace-to-inventory build over the given layout.
///
/// Fails without touching any file when the launch trace is missing, and
/// refuses to produce an inventory when no routers were discovered. The
/// sanitized copy from a previous run is always removed first.
pub fn generate(paths: &LabPaths) -> Result<()> {
    if !paths.launch_log.exists() {
        bail!(
            "launch trace {} does not exist; are the virtual machines running?",
            paths.launch_log.display()
        );
    }

    if paths.clean_log.exists() {
        std::fs::remove_file(&paths.clean_log).with_context(|| {
            format!("failed to remove stale {}", paths.clean_log.display())
        })?;
    }

    sanitize_file(&paths.launch_log, &paths.clean_log)
        .context("failed to sanitize launch trace")?;

    let hosts = scan_hosts(&paths.clean_log).context("failed to scan launch trace")?;

    write_inventory(&hosts, &paths.inventory).context("failed to generate inventory")?;

    info!("inventory build complete");
    Ok(())
}
