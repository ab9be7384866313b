//! Fixed file locations used by the inventory build.
//!
//! The tool always runs against the lab directory layout: the launch trace
//! under `trace/` and the generated inventory under `inventory/`. None of
//! these are configurable on the command line.

use std::path::PathBuf;

/// File locations for one inventory build.
#[derive(Debug, Clone)]
pub struct LabPaths {
    /// Raw launch transcript captured from the virtual machine consoles.
    pub launch_log: PathBuf,
    /// Sanitized copy of the transcript, recreated on every run.
    pub clean_log: PathBuf,
    /// Generated Ansible inventory.
    pub inventory: PathBuf,
}

impl Default for LabPaths {
    fn default() -> Self {
        Self {
            launch_log: PathBuf::from("trace/launch_output.log"),
            clean_log: PathBuf::from("trace/launch_output.save"),
            inventory: PathBuf::from("inventory/lab.yml"),
        }
    }
}
