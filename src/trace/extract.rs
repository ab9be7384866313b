//! Router discovery scan over a sanitized launch trace.
//!
//! The trace interleaves console output from every router. Each router
//! announces its hostname on a "Router name" line and, some lines later,
//! the link-local address of its management interface. The scan pairs the
//! two with a single pending-name slot: a name is held until its address
//! arrives, and a newer name replaces one that never got an address.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

/// Line marker announcing a router's hostname.
const NAME_MARKER: &str = "Router name";

/// Line marker announcing the management interface link-local address.
const ADDRESS_MARKER: &str = "mgmt G1 IPv6 LL address";

/// Zone suffix of the management address as seen from the host side.
const HOST_ZONE_SUFFIX: &str = "%enp0s1";

/// Forwarded SSH port every router listens on.
const SSH_PORT: u16 = 2222;

/// Connection attributes for one discovered router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostRecord {
    /// Link-local address rewritten with the host-side zone suffix.
    pub ansible_host: String,
    /// Forwarded SSH port.
    pub ansible_port: u16,
}

/// Scan state: at most one router name is held while waiting for its
/// address line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanState {
    /// No name seen since the last emitted record.
    Idle,
    /// A name was captured and is waiting for its address.
    Pending(String),
}

impl ScanState {
    /// Feed one trimmed line; returns a completed record when the line
    /// closes a (name, address) pair.
    fn observe(&mut self, line: &str) -> Option<(String, HostRecord)> {
        if line.contains(NAME_MARKER) {
            // The last name seen before an address wins; a later name
            // replaces an earlier one that never received its address.
            if let Some(name) = parse_name(line) {
                *self = ScanState::Pending(name);
            }
        } else if line.contains(ADDRESS_MARKER) {
            if let ScanState::Pending(name) = self {
                if let Some(address) = parse_address(line) {
                    let record = HostRecord {
                        ansible_host: address,
                        ansible_port: SSH_PORT,
                    };
                    let name = std::mem::take(name);
                    *self = ScanState::Idle;
                    return Some((name, record));
                }
            }
        }
        None
    }
}

/// Text after the first `:`, trimmed, truncated at the first `.`.
///
/// Returns `None` when the line carries no colon or the name comes out
/// empty; either way the line does not change the scan state.
fn parse_name(line: &str) -> Option<String> {
    let (_, rest) = line.split_once(':')?;
    let rest = rest.trim();
    let name = match rest.find('.') {
        Some(pos) => &rest[..pos],
        None => rest,
    };
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Text after the first ` :` (space-colon), trimmed, truncated at the first
/// `%`, then rewritten with the host-side zone suffix.
fn parse_address(line: &str) -> Option<String> {
    let (_, rest) = line.split_once(" :")?;
    let rest = rest.trim();
    let bare = match rest.find('%') {
        Some(pos) => &rest[..pos],
        None => rest,
    };
    Some(format!("{bare}{HOST_ZONE_SUFFIX}"))
}

/// Scan a sanitized launch trace and collect one record per discovered
/// router, keyed by name.
///
/// A name that recurs keeps its latest record. Lines matching neither
/// marker are skipped, as is an address line with no name pending and a
/// name still pending at end of input.
pub fn scan_hosts(trace: &Path) -> Result<BTreeMap<String, HostRecord>> {
    let src =
        File::open(trace).with_context(|| format!("failed to open {}", trace.display()))?;
    let reader = BufReader::new(src);

    let mut hosts = BTreeMap::new();
    let mut state = ScanState::Idle;
    for line in reader.lines() {
        let line =
            line.with_context(|| format!("failed to read {}", trace.display()))?;
        if let Some((name, record)) = state.observe(line.trim()) {
            hosts.insert(name, record);
        }
    }

    info!("discovered {} router(s) in {}", hosts.len(), trace.display());
    Ok(hosts)
}
