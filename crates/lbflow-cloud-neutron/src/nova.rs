//! openstack CLI wrapper for compute lookups
//!
//! Only the instance resolution the attachment workflow needs: find a
//! server by name and read its per-network addresses.

use crate::credentials::OsCredentials;
use crate::error::{NeutronError, Result};
use lbflow_cloud::model::InstanceNetwork;
use serde::Deserialize;
use std::process::Stdio;
use tokio::process::Command;

/// openstack CLI wrapper
pub struct NovaCli {
    credentials: OsCredentials,
}

impl NovaCli {
    pub fn new(credentials: OsCredentials) -> Self {
        Self { credentials }
    }

    async fn run_command(&self, args: &[&str]) -> Result<String> {
        let which = Command::new("which").arg("openstack").output().await?;
        if !which.status.success() {
            return Err(NeutronError::OpenstackNotFound);
        }

        let mut cmd = Command::new("openstack");
        cmd.envs(self.credentials.env_vars());
        cmd.args(args);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("Running: openstack {}", args.join(" "));

        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(NeutronError::CommandFailed(stderr.to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Find a server by exact name.
    ///
    /// `--name` filters server side by regex, so the listing is narrowed
    /// there and matched exactly here.
    pub async fn find_server(&self, name: &str) -> Result<Option<ServerSummary>> {
        let output = self
            .run_command(&["server", "list", "--name", name, "-f", "json"])
            .await?;

        let trimmed = output.trim();
        let summaries: Vec<ServerSummary> = if trimmed.is_empty() || trimmed == "[]" {
            Vec::new()
        } else {
            serde_json::from_str(trimmed)?
        };

        Ok(summaries.into_iter().find(|server| server.name == name))
    }

    /// Full server details, including the addresses map.
    pub async fn show_server(&self, id: &str) -> Result<ServerDetails> {
        let output = self
            .run_command(&["server", "show", id, "-f", "json"])
            .await?;
        Ok(serde_json::from_str(&output)?)
    }
}

/// Row of `openstack server list` (capitalized keys).
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSummary {
    #[serde(rename = "ID")]
    pub id: String,

    #[serde(rename = "Name")]
    pub name: String,
}

/// Output of `openstack server show` (lowercase keys).
#[derive(Debug, Clone, Deserialize)]
pub struct ServerDetails {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub addresses: serde_json::Value,
}

impl ServerDetails {
    /// Per-network addresses, in the decoded listing order.
    pub fn networks(&self) -> Vec<InstanceNetwork> {
        parse_addresses(&self.addresses)
    }
}

/// Decode the `addresses` field of a server.
///
/// Newer clients emit a map of network name to address list; older ones
/// emit the legacy `"net=10.0.0.7, 172.24.4.2; other=..."` string. Both
/// occur in the wild, so both are handled.
fn parse_addresses(value: &serde_json::Value) -> Vec<InstanceNetwork> {
    match value {
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(name, addrs)| InstanceNetwork {
                name: name.clone(),
                addresses: addrs
                    .as_array()
                    .map(|list| {
                        list.iter()
                            .filter_map(|addr| addr.as_str().map(str::to_string))
                            .collect()
                    })
                    .unwrap_or_default(),
            })
            .collect(),
        serde_json::Value::String(legacy) => legacy
            .split(';')
            .filter_map(|entry| {
                let (name, addrs) = entry.trim().split_once('=')?;
                Some(InstanceNetwork {
                    name: name.trim().to_string(),
                    addresses: addrs
                        .split(',')
                        .map(|addr| addr.trim().to_string())
                        .filter(|addr| !addr.is_empty())
                        .collect(),
                })
            })
            .collect(),
        _ => Vec::new(),
    }
}
