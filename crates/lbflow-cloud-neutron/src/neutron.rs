//! neutron CLI wrapper
//!
//! Wraps the `neutron` command line tool (LBaaS v1 commands) with JSON
//! output. Each method maps to exactly one CLI invocation; retries and
//! idempotency live in the workflow layer above.

use crate::credentials::OsCredentials;
use crate::error::{NeutronError, Result};
use lbflow_cloud::model::{
    FloatingIp, HealthMonitor, HealthMonitorSpec, Member, MemberSpec, Pool, PoolSpec, Protocol,
    ResourceKind, Subnet, VirtualIp, VirtualIpSpec,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::process::Stdio;
use tokio::process::Command;

/// neutron CLI wrapper
pub struct NeutronCli {
    credentials: OsCredentials,
}

impl NeutronCli {
    pub fn new(credentials: OsCredentials) -> Self {
        Self { credentials }
    }

    /// Check that the neutron CLI is installed and the credentials are
    /// accepted, by issuing one cheap read.
    pub async fn check_auth(&self) -> Result<()> {
        let which = Command::new("which").arg("neutron").output().await?;
        if !which.status.success() {
            return Err(NeutronError::NeutronNotFound);
        }

        self.run_command(&["net-list", "-c", "id", "-f", "json"])
            .await?;
        Ok(())
    }

    /// Run a neutron command and return stdout.
    async fn run_command(&self, args: &[&str]) -> Result<String> {
        let mut cmd = Command::new("neutron");
        cmd.envs(self.credentials.env_vars());
        cmd.args(args);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("Running: neutron {}", args.join(" "));

        let output = cmd.output().await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(NeutronError::CommandFailed(stderr.to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    pub async fn list_pools(&self) -> Result<Vec<Pool>> {
        let output = self.run_command(&["lb-pool-list", "-f", "json"]).await?;
        parse_listing(&output)
    }

    pub async fn create_pool(&self, spec: &PoolSpec) -> Result<Pool> {
        let output = self
            .run_command(&[
                "lb-pool-create",
                "--name",
                spec.name.as_str(),
                "--lb-method",
                spec.lb_method.as_str(),
                "--protocol",
                spec.protocol.as_str(),
                "--subnet-id",
                spec.subnet_id.as_str(),
                "-f",
                "json",
            ])
            .await?;

        Ok(serde_json::from_str(&output)?)
    }

    pub async fn create_vip(&self, spec: &VirtualIpSpec) -> Result<VirtualIp> {
        let port_str = spec.protocol_port.to_string();
        let output = self
            .run_command(&[
                "lb-vip-create",
                "--name",
                spec.name.as_str(),
                "--protocol-port",
                port_str.as_str(),
                "--protocol",
                spec.protocol.as_str(),
                "--subnet-id",
                spec.subnet_id.as_str(),
                spec.pool_id.as_str(),
                "-f",
                "json",
            ])
            .await?;

        Ok(serde_json::from_str(&output)?)
    }

    pub async fn show_vip(&self, id: &str) -> Result<VirtualIp> {
        let output = self
            .run_command(&["lb-vip-show", id, "-f", "json"])
            .await?;
        Ok(serde_json::from_str(&output)?)
    }

    pub async fn create_health_monitor(&self, spec: &HealthMonitorSpec) -> Result<HealthMonitor> {
        let delay_str = spec.delay.to_string();
        let retries_str = spec.max_retries.to_string();
        let timeout_str = spec.timeout.to_string();

        let mut args = vec![
            "lb-healthmonitor-create",
            "--delay",
            delay_str.as_str(),
            "--max-retries",
            retries_str.as_str(),
            "--timeout",
            timeout_str.as_str(),
            "--type",
            spec.kind.as_str(),
        ];

        // The HTTP probe options are rejected by neutron for TCP monitors.
        if spec.kind != Protocol::Tcp {
            args.extend_from_slice(&[
                "--http-method",
                spec.http_method.as_str(),
                "--url-path",
                spec.url_path.as_str(),
                "--expected-codes",
                spec.expected_codes.as_str(),
            ]);
        }

        args.extend_from_slice(&["-f", "json"]);

        let output = self.run_command(&args).await?;
        Ok(serde_json::from_str(&output)?)
    }

    pub async fn associate_health_monitor(&self, monitor_id: &str, pool_id: &str) -> Result<()> {
        self.run_command(&["lb-healthmonitor-associate", monitor_id, pool_id])
            .await?;
        Ok(())
    }

    pub async fn list_floatingips(&self) -> Result<Vec<FloatingIp>> {
        let output = self.run_command(&["floatingip-list", "-f", "json"]).await?;
        parse_listing(&output)
    }

    pub async fn create_floatingip(&self, network_id: &str) -> Result<FloatingIp> {
        let output = self
            .run_command(&["floatingip-create", network_id, "-f", "json"])
            .await?;
        Ok(serde_json::from_str(&output)?)
    }

    /// Bind a floating IP to a port, targeting a specific fixed address.
    pub async fn associate_floatingip(
        &self,
        floatingip_id: &str,
        port_id: &str,
        fixed_ip_address: &str,
    ) -> Result<()> {
        self.run_command(&[
            "floatingip-associate",
            floatingip_id,
            port_id,
            "--fixed-ip-address",
            fixed_ip_address,
        ])
        .await?;
        Ok(())
    }

    pub async fn list_subnets(&self) -> Result<Vec<Subnet>> {
        let output = self
            .run_command(&["subnet-list", "-c", "id", "-c", "network_id", "-f", "json"])
            .await?;
        parse_listing(&output)
    }

    pub async fn list_members(&self) -> Result<Vec<Member>> {
        let output = self
            .run_command(&[
                "lb-member-list",
                "-c",
                "id",
                "-c",
                "pool_id",
                "-c",
                "address",
                "-c",
                "protocol_port",
                "-f",
                "json",
            ])
            .await?;
        parse_listing(&output)
    }

    pub async fn create_member(&self, spec: &MemberSpec) -> Result<Member> {
        let port_str = spec.protocol_port.to_string();
        let output = self
            .run_command(&[
                "lb-member-create",
                "--address",
                spec.address.as_str(),
                "--protocol-port",
                port_str.as_str(),
                spec.pool_id.as_str(),
                "-f",
                "json",
            ])
            .await?;
        Ok(serde_json::from_str(&output)?)
    }

    /// Resolve a name-or-id reference to the resource's id.
    pub async fn resolve_id(&self, kind: ResourceKind, name_or_id: &str) -> Result<String> {
        let command = match kind {
            ResourceKind::Network => "net-show",
            ResourceKind::Pool => "lb-pool-show",
        };
        let output = self
            .run_command(&[command, name_or_id, "-f", "json"])
            .await?;
        let resource: IdOnly = serde_json::from_str(&output)?;
        Ok(resource.id)
    }
}

/// Id field of any show output.
#[derive(Debug, Deserialize)]
struct IdOnly {
    id: String,
}

/// Parse a listing, treating empty output as an empty listing.
fn parse_listing<T: DeserializeOwned>(output: &str) -> Result<Vec<T>> {
    let trimmed = output.trim();
    if trimmed.is_empty() || trimmed == "[]" {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(trimmed)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pool_listing() {
        let output = r#"[
          {"id": "p-1", "name": "lb1", "lb_method": "ROUND_ROBIN",
           "protocol": "HTTP", "subnet_id": "s-1"},
          {"id": "p-2", "name": "lb2", "lb_method": "LEAST_CONNECTIONS",
           "protocol": "TCP", "subnet_id": "s-1"}
        ]"#;

        let pools: Vec<Pool> = parse_listing(output).unwrap();
        assert_eq!(pools.len(), 2);
        assert_eq!(pools[0].name, "lb1");
        assert_eq!(pools[1].lb_method, "LEAST_CONNECTIONS");
    }

    #[test]
    fn test_parse_empty_listing() {
        let pools: Vec<Pool> = parse_listing("").unwrap();
        assert!(pools.is_empty());
        let pools: Vec<Pool> = parse_listing("[]\n").unwrap();
        assert!(pools.is_empty());
    }

    #[test]
    fn test_parse_vip_without_address() {
        let output = r#"{"id": "v-1", "name": "lb1-vip", "pool_id": "p-1",
                         "port_id": "port-9", "protocol": "HTTP",
                         "protocol_port": 80}"#;

        let vip: VirtualIp = serde_json::from_str(output).unwrap();
        assert_eq!(vip.port_id, "port-9");
        assert!(vip.address.is_none());
    }

    #[test]
    fn test_parse_vip_with_address() {
        let output = r#"{"id": "v-1", "name": "lb1-vip", "address": "10.0.0.4",
                         "port_id": "port-9", "protocol_port": 80}"#;

        let vip: VirtualIp = serde_json::from_str(output).unwrap();
        assert_eq!(vip.address.as_deref(), Some("10.0.0.4"));
    }

    #[test]
    fn test_parse_floatingip_listing() {
        let output = r#"[{"id": "f-1", "floating_ip_address": "203.0.113.5",
                          "port_id": null, "fixed_ip_address": null}]"#;

        let fips: Vec<FloatingIp> = parse_listing(output).unwrap();
        assert_eq!(fips[0].floating_ip_address, "203.0.113.5");
        assert!(fips[0].port_id.is_none());
    }

    #[test]
    fn test_parse_member_listing() {
        let output = r#"[{"id": "m-1", "pool_id": "p-1",
                          "address": "10.0.0.7", "protocol_port": 2003}]"#;

        let members: Vec<Member> = parse_listing(output).unwrap();
        assert_eq!(members[0].address, "10.0.0.7");
        assert_eq!(members[0].protocol_port, 2003);
    }
}
