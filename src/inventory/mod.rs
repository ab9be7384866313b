//! Ansible inventory document and writer.
//!
//! The generated document carries a single `routers` group: the discovered
//! hosts plus a fixed variable block wiring up the `network_cli` connection.
//! Credentials stay templated so the playbook can inject them at run time.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::trace::HostRecord;

/// Errors raised while writing the inventory.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    #[error("no router records extracted; refusing to write an empty inventory")]
    NoHosts,

    #[error("failed to serialize inventory: {0}")]
    Serialize(#[from] serde_yaml::Error),

    #[error("failed to write inventory: {0}")]
    Io(#[from] std::io::Error),
}

/// Top-level inventory document. Field order here is the key order in the
/// emitted YAML.
#[derive(Debug, Serialize)]
struct Inventory<'a> {
    routers: RouterGroup<'a>,
}

#[derive(Debug, Serialize)]
struct RouterGroup<'a> {
    hosts: &'a BTreeMap<String, HostRecord>,
    vars: GroupVars,
}

/// Connection variables shared by every router in the group.
#[derive(Debug, Serialize)]
struct GroupVars {
    ansible_ssh_user: &'static str,
    ansible_ssh_pass: &'static str,
    ansible_connection: &'static str,
    ansible_network_os: &'static str,
}

impl Default for GroupVars {
    fn default() -> Self {
        Self {
            ansible_ssh_user: "{{ vm_user }}",
            ansible_ssh_pass: "{{ vm_pass }}",
            ansible_connection: "network_cli",
            ansible_network_os: "ios",
        }
    }
}

/// Render the inventory document for `hosts` as YAML.
fn render(hosts: &BTreeMap<String, HostRecord>) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(&Inventory {
        routers: RouterGroup {
            hosts,
            vars: GroupVars::default(),
        },
    })
}

/// Write the inventory for `hosts` to `path`, creating parent directories
/// as needed and overwriting any previous file.
///
/// Refuses to write an empty mapping: zero discovered routers is an error,
/// not an empty inventory.
pub fn write_inventory(
    hosts: &BTreeMap<String, HostRecord>,
    path: &Path,
) -> Result<(), InventoryError> {
    if hosts.is_empty() {
        return Err(InventoryError::NoHosts);
    }

    let document = render(hosts)?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, document)?;

    info!("inventory written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_hosts() -> BTreeMap<String, HostRecord> {
        let mut hosts = BTreeMap::new();
        hosts.insert(
            "R1".to_string(),
            HostRecord {
                ansible_host: "fe80::1%enp0s1".to_string(),
                ansible_port: 2222,
            },
        );
        hosts.insert(
            "R2".to_string(),
            HostRecord {
                ansible_host: "fe80::2%enp0s1".to_string(),
                ansible_port: 2222,
            },
        );
        hosts
    }

    #[test]
    fn refuses_empty_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory/lab.yml");

        let err = write_inventory(&BTreeMap::new(), &path).unwrap_err();

        assert!(matches!(err, InventoryError::NoHosts));
        assert!(!path.exists());
    }

    #[test]
    fn empty_mapping_leaves_existing_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lab.yml");
        fs::write(&path, "previous contents\n").unwrap();

        write_inventory(&BTreeMap::new(), &path).unwrap_err();

        assert_eq!(fs::read_to_string(&path).unwrap(), "previous contents\n");
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep/nested/lab.yml");

        write_inventory(&sample_hosts(), &path).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn overwrites_previous_inventory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lab.yml");
        fs::write(&path, "stale\n").unwrap();

        write_inventory(&sample_hosts(), &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(!written.contains("stale"));
        assert!(written.contains("fe80::1%enp0s1"));
    }

    #[test]
    fn document_keeps_group_hosts_vars_order() {
        let yaml = render(&sample_hosts()).unwrap();

        let routers = yaml.find("routers:").unwrap();
        let hosts = yaml.find("hosts:").unwrap();
        let vars = yaml.find("vars:").unwrap();
        assert!(routers < hosts);
        assert!(hosts < vars);

        let user = yaml.find("ansible_ssh_user").unwrap();
        let pass = yaml.find("ansible_ssh_pass").unwrap();
        let connection = yaml.find("ansible_connection").unwrap();
        let network_os = yaml.find("ansible_network_os").unwrap();
        assert!(user < pass);
        assert!(pass < connection);
        assert!(connection < network_os);
    }

    #[test]
    fn document_carries_host_attributes_and_fixed_vars() {
        let yaml = render(&sample_hosts()).unwrap();
        let doc: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();

        let hosts = &doc["routers"]["hosts"];
        assert_eq!(
            hosts["R1"]["ansible_host"].as_str(),
            Some("fe80::1%enp0s1")
        );
        assert_eq!(hosts["R1"]["ansible_port"].as_u64(), Some(2222));
        assert_eq!(
            hosts["R2"]["ansible_host"].as_str(),
            Some("fe80::2%enp0s1")
        );

        let vars = &doc["routers"]["vars"];
        assert_eq!(vars["ansible_ssh_user"].as_str(), Some("{{ vm_user }}"));
        assert_eq!(vars["ansible_ssh_pass"].as_str(), Some("{{ vm_pass }}"));
        assert_eq!(vars["ansible_connection"].as_str(), Some("network_cli"));
        assert_eq!(vars["ansible_network_os"].as_str(), Some("ios"));
    }
}
