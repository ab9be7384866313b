//! Launch trace processing.
//!
//! The raw transcript captured from the virtual machine consoles goes
//! through two steps: [`sanitize_file`] removes terminal escape sequences,
//! then [`scan_hosts`] pairs router name and management-address
//! announcements into host records.

mod extract;
mod sanitize;

pub use extract::{scan_hosts, HostRecord};
pub use sanitize::{sanitize_file, AnsiStripper};
