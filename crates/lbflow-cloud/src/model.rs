//! Remote resource model
//!
//! Every entity lives in the remote control plane and is identified by an
//! opaque id. Names are only used for lookup; the control plane does not
//! enforce name uniqueness, so name-based lookups resolve to the first
//! entry in listing order.

use crate::error::CloudError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Listener protocol for pools, VIPs and health checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Protocol {
    Http,
    Https,
    Tcp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "HTTP",
            Protocol::Https => "HTTPS",
            Protocol::Tcp => "TCP",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = CloudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "HTTP" => Ok(Protocol::Http),
            "HTTPS" => Ok(Protocol::Https),
            "TCP" => Ok(Protocol::Tcp),
            other => Err(CloudError::InvalidParameter(format!(
                "protocol must be one of HTTP, HTTPS, TCP (got {other})"
            ))),
        }
    }
}

/// Load balancing policy applied to a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BalancingMethod {
    RoundRobin,
    LeastConnections,
    SourceIp,
}

impl BalancingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BalancingMethod::RoundRobin => "ROUND_ROBIN",
            BalancingMethod::LeastConnections => "LEAST_CONNECTIONS",
            BalancingMethod::SourceIp => "SOURCE_IP",
        }
    }
}

impl fmt::Display for BalancingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BalancingMethod {
    type Err = CloudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ROUND_ROBIN" => Ok(BalancingMethod::RoundRobin),
            "LEAST_CONNECTIONS" => Ok(BalancingMethod::LeastConnections),
            "SOURCE_IP" => Ok(BalancingMethod::SourceIp),
            other => Err(CloudError::InvalidParameter(format!(
                "balancing method must be one of ROUND_ROBIN, LEAST_CONNECTIONS, SOURCE_IP (got {other})"
            ))),
        }
    }
}

/// HTTP method used by a health monitor probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthHttpMethod {
    Get,
    Put,
    Post,
}

impl HealthHttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthHttpMethod::Get => "GET",
            HealthHttpMethod::Put => "PUT",
            HealthHttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HealthHttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HealthHttpMethod {
    type Err = CloudError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HealthHttpMethod::Get),
            "PUT" => Ok(HealthHttpMethod::Put),
            "POST" => Ok(HealthHttpMethod::Post),
            other => Err(CloudError::InvalidParameter(format!(
                "health http method must be one of GET, PUT, POST (got {other})"
            ))),
        }
    }
}

/// Resource kinds resolvable by name or id on the control plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Network,
    Pool,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Network => "network",
            ResourceKind::Pool => "pool",
        }
    }
}

/// A named group of backend members balanced under one policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pool {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub lb_method: String,
    #[serde(default)]
    pub protocol: String,
    #[serde(default)]
    pub subnet_id: String,
}

/// Request to create a pool.
#[derive(Debug, Clone)]
pub struct PoolSpec {
    pub name: String,
    pub lb_method: BalancingMethod,
    pub protocol: Protocol,
    pub subnet_id: String,
}

/// The listener address/port pair clients connect to, bound to a pool.
///
/// `address` is assigned asynchronously by the control plane and may be
/// absent immediately after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualIp {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub pool_id: String,
    #[serde(default)]
    pub port_id: String,
    #[serde(default)]
    pub protocol: String,
    #[serde(default)]
    pub protocol_port: u16,
    #[serde(default)]
    pub address: Option<String>,
}

/// Request to create a virtual IP.
#[derive(Debug, Clone)]
pub struct VirtualIpSpec {
    pub name: String,
    pub pool_id: String,
    pub subnet_id: String,
    pub protocol: Protocol,
    pub protocol_port: u16,
}

/// A periodic probe definition associated with a pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthMonitor {
    pub id: String,
    #[serde(default)]
    pub delay: u32,
    #[serde(default)]
    pub http_method: String,
    #[serde(default)]
    pub max_retries: u32,
    #[serde(default)]
    pub timeout: u32,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub expected_codes: String,
}

/// Request to create a health monitor.
#[derive(Debug, Clone)]
pub struct HealthMonitorSpec {
    pub delay: u32,
    pub http_method: HealthHttpMethod,
    pub max_retries: u32,
    pub url_path: String,
    pub timeout: u32,
    pub kind: Protocol,
    pub expected_codes: String,
}

/// One backend instance's address/port registered under a pool.
///
/// Uniquely identified by the (pool id, address) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub pool_id: String,
    pub address: String,
    #[serde(default)]
    pub protocol_port: u16,
}

/// Request to create a member.
#[derive(Debug, Clone)]
pub struct MemberSpec {
    pub pool_id: String,
    pub address: String,
    pub protocol_port: u16,
}

/// A publicly routable address bindable to an internal port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingIp {
    pub id: String,
    pub floating_ip_address: String,
    #[serde(default)]
    pub port_id: Option<String>,
    #[serde(default)]
    pub fixed_ip_address: Option<String>,
}

/// Request to allocate a floating IP on an external network.
#[derive(Debug, Clone)]
pub struct FloatingIpSpec {
    pub floating_network_id: String,
}

/// Binding of a floating IP to an internal port and fixed address.
#[derive(Debug, Clone)]
pub struct FloatingIpBinding {
    pub port_id: String,
    pub fixed_ip_address: String,
}

/// An IP range belonging to a network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subnet {
    pub id: String,
    pub network_id: String,
}

/// A compute instance with its per-network addresses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub networks: Vec<InstanceNetwork>,
}

/// Addresses an instance holds on one network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceNetwork {
    pub name: String,
    pub addresses: Vec<String>,
}

impl Instance {
    /// First address of the first network in listing order.
    ///
    /// Instances can hold several addresses across several networks; the
    /// attachment workflow only ever uses this one.
    pub fn first_address(&self) -> Option<&str> {
        self.networks
            .iter()
            .find_map(|net| net.addresses.first())
            .map(|addr| addr.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_round_trip() {
        assert_eq!("HTTP".parse::<Protocol>().unwrap(), Protocol::Http);
        assert_eq!("https".parse::<Protocol>().unwrap(), Protocol::Https);
        assert_eq!(Protocol::Tcp.to_string(), "TCP");
        assert!("UDP".parse::<Protocol>().is_err());
    }

    #[test]
    fn test_balancing_method_parse() {
        assert_eq!(
            "LEAST_CONNECTIONS".parse::<BalancingMethod>().unwrap(),
            BalancingMethod::LeastConnections
        );
        assert!("FASTEST".parse::<BalancingMethod>().is_err());
    }

    #[test]
    fn test_instance_first_address() {
        let instance = Instance {
            id: "i-1".to_string(),
            name: "web-1".to_string(),
            networks: vec![
                InstanceNetwork {
                    name: "empty-net".to_string(),
                    addresses: vec![],
                },
                InstanceNetwork {
                    name: "private".to_string(),
                    addresses: vec!["10.0.0.7".to_string(), "10.0.0.8".to_string()],
                },
            ],
        };

        assert_eq!(instance.first_address(), Some("10.0.0.7"));
    }

    #[test]
    fn test_instance_without_addresses() {
        let instance = Instance {
            id: "i-2".to_string(),
            name: "bare".to_string(),
            networks: vec![],
        };

        assert_eq!(instance.first_address(), None);
    }
}
