//! Provisioning parameters
//!
//! One immutable value constructed at the process boundary and passed into
//! the workflow; there is no process-wide configuration state.

use crate::model::{BalancingMethod, HealthHttpMethod, Protocol};

/// Declarative description of the desired load balancer.
#[derive(Debug, Clone)]
pub struct ProvisionParams {
    /// Internal network hosting the pool and VIP.
    pub network: String,
    /// External network to allocate the floating IP from.
    pub external_network: String,
    /// Pool name; this is the idempotency key for the whole workflow.
    pub name: String,
    pub protocol: Protocol,
    pub health_http_method: HealthHttpMethod,
    pub url_path: String,
    pub balancing_method: BalancingMethod,
    pub port: u16,
    /// Seconds between health probes.
    pub interval: u32,
    pub max_retries: u32,
    pub timeout: u32,
    /// Expected HTTP status codes, e.g. "200-299".
    pub expected_codes: String,
    /// Reuse this existing floating IP instead of allocating a new one.
    pub floating_ip_address: Option<String>,
    pub healthcheck_protocol: Protocol,
}

impl ProvisionParams {
    /// Build params with the defaults of the provisioning operation.
    pub fn new(
        network: impl Into<String>,
        external_network: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            network: network.into(),
            external_network: external_network.into(),
            name: name.into(),
            protocol: Protocol::Http,
            health_http_method: HealthHttpMethod::Get,
            url_path: "/".to_string(),
            balancing_method: BalancingMethod::LeastConnections,
            port: 80,
            interval: 2,
            max_retries: 3,
            timeout: 1,
            expected_codes: "200-299".to_string(),
            floating_ip_address: None,
            healthcheck_protocol: Protocol::Http,
        }
    }

    /// Name of the VIP created alongside the pool.
    pub fn vip_name(&self) -> String {
        format!("{}-vip", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = ProvisionParams::new("net0", "ext0", "lb1");

        assert_eq!(params.protocol, Protocol::Http);
        assert_eq!(params.balancing_method, BalancingMethod::LeastConnections);
        assert_eq!(params.health_http_method, HealthHttpMethod::Get);
        assert_eq!(params.port, 80);
        assert_eq!(params.interval, 2);
        assert_eq!(params.max_retries, 3);
        assert_eq!(params.timeout, 1);
        assert_eq!(params.expected_codes, "200-299");
        assert_eq!(params.url_path, "/");
        assert!(params.floating_ip_address.is_none());
    }

    #[test]
    fn test_vip_name() {
        let params = ProvisionParams::new("net0", "ext0", "lb1");
        assert_eq!(params.vip_name(), "lb1-vip");
    }
}
