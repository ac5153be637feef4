//! Trait implementations over the CLI wrappers
//!
//! Thin adapters from the `lbflow-cloud` capability traits onto
//! [`NeutronCli`] and [`NovaCli`], converting errors into the workflow
//! error type.

use crate::credentials::OsCredentials;
use crate::neutron::NeutronCli;
use crate::nova::NovaCli;
use async_trait::async_trait;
use lbflow_cloud::model::{
    FloatingIp, FloatingIpBinding, FloatingIpSpec, HealthMonitor, HealthMonitorSpec, Instance,
    Member, MemberSpec, Pool, PoolSpec, ResourceKind, Subnet, VirtualIp, VirtualIpSpec,
};
use lbflow_cloud::{CloudError, ComputeControlClient, NetworkControlClient};

/// Networking control plane backed by the neutron CLI.
pub struct NeutronNetworkClient {
    cli: NeutronCli,
}

impl NeutronNetworkClient {
    pub fn new(credentials: OsCredentials) -> Self {
        Self {
            cli: NeutronCli::new(credentials),
        }
    }

    /// Verify CLI presence and credentials with one cheap read.
    pub async fn check_auth(&self) -> lbflow_cloud::Result<()> {
        self.cli.check_auth().await.map_err(CloudError::from)
    }
}

#[async_trait]
impl NetworkControlClient for NeutronNetworkClient {
    async fn list_pools(&self) -> lbflow_cloud::Result<Vec<Pool>> {
        Ok(self.cli.list_pools().await?)
    }

    async fn create_pool(&self, spec: &PoolSpec) -> lbflow_cloud::Result<Pool> {
        Ok(self.cli.create_pool(spec).await?)
    }

    async fn create_virtual_ip(&self, spec: &VirtualIpSpec) -> lbflow_cloud::Result<VirtualIp> {
        Ok(self.cli.create_vip(spec).await?)
    }

    async fn show_virtual_ip(&self, id: &str) -> lbflow_cloud::Result<VirtualIp> {
        Ok(self.cli.show_vip(id).await?)
    }

    async fn create_health_monitor(
        &self,
        spec: &HealthMonitorSpec,
    ) -> lbflow_cloud::Result<HealthMonitor> {
        Ok(self.cli.create_health_monitor(spec).await?)
    }

    async fn associate_health_monitor(
        &self,
        monitor_id: &str,
        pool_id: &str,
    ) -> lbflow_cloud::Result<()> {
        Ok(self.cli.associate_health_monitor(monitor_id, pool_id).await?)
    }

    async fn list_floating_ips(&self) -> lbflow_cloud::Result<Vec<FloatingIp>> {
        Ok(self.cli.list_floatingips().await?)
    }

    async fn create_floating_ip(&self, spec: &FloatingIpSpec) -> lbflow_cloud::Result<FloatingIp> {
        Ok(self.cli.create_floatingip(&spec.floating_network_id).await?)
    }

    async fn update_floating_ip(
        &self,
        id: &str,
        binding: &FloatingIpBinding,
    ) -> lbflow_cloud::Result<()> {
        Ok(self
            .cli
            .associate_floatingip(id, &binding.port_id, &binding.fixed_ip_address)
            .await?)
    }

    async fn list_subnets(&self) -> lbflow_cloud::Result<Vec<Subnet>> {
        Ok(self.cli.list_subnets().await?)
    }

    async fn list_members(&self) -> lbflow_cloud::Result<Vec<Member>> {
        Ok(self.cli.list_members().await?)
    }

    async fn create_member(&self, spec: &MemberSpec) -> lbflow_cloud::Result<Member> {
        Ok(self.cli.create_member(spec).await?)
    }

    async fn resolve_resource_id(
        &self,
        kind: ResourceKind,
        name_or_id: &str,
    ) -> lbflow_cloud::Result<String> {
        Ok(self.cli.resolve_id(kind, name_or_id).await?)
    }
}

/// Compute control plane backed by the openstack CLI.
pub struct NovaComputeClient {
    cli: NovaCli,
}

impl NovaComputeClient {
    pub fn new(credentials: OsCredentials) -> Self {
        Self {
            cli: NovaCli::new(credentials),
        }
    }
}

#[async_trait]
impl ComputeControlClient for NovaComputeClient {
    async fn find_instance_by_name(&self, name: &str) -> lbflow_cloud::Result<Instance> {
        let summary = self
            .cli
            .find_server(name)
            .await?
            .ok_or_else(|| CloudError::InstanceNotFound(name.to_string()))?;

        let details = self.cli.show_server(&summary.id).await?;
        Ok(Instance {
            networks: details.networks(),
            id: details.id,
            name: details.name,
        })
    }
}
