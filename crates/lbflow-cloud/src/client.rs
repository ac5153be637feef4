//! Control plane client capability traits
//!
//! The workflows in this crate consume these traits instead of a concrete
//! API client, so the remote control plane can be swapped out (or faked in
//! tests). `lbflow-cloud-neutron` provides the OpenStack implementation.

use crate::error::Result;
use crate::model::{
    FloatingIp, FloatingIpBinding, FloatingIpSpec, HealthMonitor, HealthMonitorSpec, Instance,
    Member, MemberSpec, Pool, PoolSpec, ResourceKind, Subnet, VirtualIp, VirtualIpSpec,
};
use async_trait::async_trait;

/// Networking control plane operations consumed by the workflows.
///
/// Listings return resources in the control plane's own order; name-based
/// resolution in the workflows takes the first match.
#[async_trait]
pub trait NetworkControlClient: Send + Sync {
    async fn list_pools(&self) -> Result<Vec<Pool>>;

    async fn create_pool(&self, spec: &PoolSpec) -> Result<Pool>;

    async fn create_virtual_ip(&self, spec: &VirtualIpSpec) -> Result<VirtualIp>;

    async fn show_virtual_ip(&self, id: &str) -> Result<VirtualIp>;

    async fn create_health_monitor(&self, spec: &HealthMonitorSpec) -> Result<HealthMonitor>;

    /// Associate an existing health monitor with a pool.
    async fn associate_health_monitor(&self, monitor_id: &str, pool_id: &str) -> Result<()>;

    async fn list_floating_ips(&self) -> Result<Vec<FloatingIp>>;

    async fn create_floating_ip(&self, spec: &FloatingIpSpec) -> Result<FloatingIp>;

    /// Bind a floating IP to an internal port and fixed address.
    async fn update_floating_ip(&self, id: &str, binding: &FloatingIpBinding) -> Result<()>;

    async fn list_subnets(&self) -> Result<Vec<Subnet>>;

    async fn list_members(&self) -> Result<Vec<Member>>;

    async fn create_member(&self, spec: &MemberSpec) -> Result<Member>;

    /// Resolve a resource reference (name or id) to its id.
    async fn resolve_resource_id(&self, kind: ResourceKind, name_or_id: &str) -> Result<String>;
}

/// Compute control plane operations consumed by the attachment workflow.
#[async_trait]
pub trait ComputeControlClient: Send + Sync {
    /// Find an instance by name, including its network addresses.
    async fn find_instance_by_name(&self, name: &str) -> Result<Instance>;
}
