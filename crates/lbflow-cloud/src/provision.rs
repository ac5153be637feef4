//! Load balancer provisioning workflow
//!
//! Creates pool → VIP → health monitor → association → floating IP →
//! binding, in that order, each step feeding the next. The workflow is
//! idempotent on the pool name: when a pool with the requested name
//! already exists the run reports `Unchanged` and performs no mutation.

use crate::check::IdempotencyChecker;
use crate::client::NetworkControlClient;
use crate::error::{CloudError, Result};
use crate::model::{
    FloatingIpBinding, FloatingIpSpec, HealthMonitorSpec, PoolSpec, ResourceKind, VirtualIpSpec,
};
use crate::params::ProvisionParams;
use crate::retry::RetryPolicy;

/// Result of one provisioning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// All resources were created; clients can reach the pool at this
    /// floating address.
    Provisioned { floating_ip: String },
    /// A pool with this name already exists; nothing was created.
    Unchanged { name: String },
}

impl ProvisionOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, ProvisionOutcome::Provisioned { .. })
    }

    pub fn floating_ip(&self) -> Option<&str> {
        match self {
            ProvisionOutcome::Provisioned { floating_ip } => Some(floating_ip),
            ProvisionOutcome::Unchanged { .. } => None,
        }
    }
}

/// Drives the ordered creation of all load balancer resources.
pub struct ResourceProvisioner<'a> {
    net: &'a dyn NetworkControlClient,
    retry: RetryPolicy,
}

impl<'a> ResourceProvisioner<'a> {
    pub fn new(net: &'a dyn NetworkControlClient) -> Self {
        Self {
            net,
            retry: RetryPolicy::default(),
        }
    }

    /// Override the retry policy for propagation-sensitive calls.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Provision the load balancer described by `params`.
    ///
    /// The creation sequence is strict; every step depends on the output
    /// of the previous one. A terminal failure at any step aborts the run
    /// and leaves the already created resources behind: there is no
    /// compensating deletion, so a failed run requires manual cleanup on
    /// the control plane.
    pub async fn provision(&self, params: &ProvisionParams) -> Result<ProvisionOutcome> {
        let checker = IdempotencyChecker::new(self.net);
        if checker.pool_exists(&params.name).await? {
            tracing::info!(name = %params.name, "load balancer pool already exists");
            return Ok(ProvisionOutcome::Unchanged {
                name: params.name.clone(),
            });
        }

        let subnet_id = self.first_subnet_id(&params.network).await?;

        let pool = self
            .net
            .create_pool(&PoolSpec {
                name: params.name.clone(),
                lb_method: params.balancing_method,
                protocol: params.protocol,
                subnet_id: subnet_id.clone(),
            })
            .await?;
        tracing::info!(pool_id = %pool.id, name = %params.name, "created pool");

        let vip = self
            .net
            .create_virtual_ip(&VirtualIpSpec {
                name: params.vip_name(),
                pool_id: pool.id.clone(),
                subnet_id,
                protocol: params.protocol,
                protocol_port: params.port,
            })
            .await?;
        tracing::info!(vip_id = %vip.id, port_id = %vip.port_id, "created virtual ip");

        let vip_address = self.resolve_vip_address(&vip.id).await?;
        tracing::info!(vip_address = %vip_address, "virtual ip address assigned");

        let monitor = self
            .net
            .create_health_monitor(&HealthMonitorSpec {
                delay: params.interval,
                http_method: params.health_http_method,
                max_retries: params.max_retries,
                url_path: params.url_path.clone(),
                timeout: params.timeout,
                kind: params.healthcheck_protocol,
                expected_codes: params.expected_codes.clone(),
            })
            .await?;

        // Association can race the monitor's own creation visibility.
        let net = self.net;
        let monitor_id = monitor.id.clone();
        let pool_id = pool.id.clone();
        self.retry
            .run(|| {
                let monitor_id = monitor_id.clone();
                let pool_id = pool_id.clone();
                async move { net.associate_health_monitor(&monitor_id, &pool_id).await }
            })
            .await?;
        tracing::info!(monitor_id = %monitor.id, pool_id = %pool.id, "associated health monitor");

        let floating_ip = match &params.floating_ip_address {
            None => {
                let external_id = self
                    .net
                    .resolve_resource_id(ResourceKind::Network, &params.external_network)
                    .await?;
                let fip = self
                    .net
                    .create_floating_ip(&FloatingIpSpec {
                        floating_network_id: external_id,
                    })
                    .await?;
                tracing::info!(fip = %fip.floating_ip_address, "allocated floating ip");
                fip
            }
            Some(address) => {
                let fip = self.find_floating_ip(address).await?;
                tracing::info!(fip = %fip.floating_ip_address, "reusing existing floating ip");
                fip
            }
        };

        self.net
            .update_floating_ip(
                &floating_ip.id,
                &FloatingIpBinding {
                    port_id: vip.port_id.clone(),
                    fixed_ip_address: vip_address,
                },
            )
            .await?;
        tracing::info!(
            fip = %floating_ip.floating_ip_address,
            port_id = %vip.port_id,
            "bound floating ip to virtual ip port"
        );

        Ok(ProvisionOutcome::Provisioned {
            floating_ip: floating_ip.floating_ip_address,
        })
    }

    /// First subnet of the named network, in listing order.
    async fn first_subnet_id(&self, network: &str) -> Result<String> {
        let network_id = self
            .net
            .resolve_resource_id(ResourceKind::Network, network)
            .await?;
        let subnets = self.net.list_subnets().await?;

        subnets
            .into_iter()
            .find(|subnet| subnet.network_id == network_id)
            .map(|subnet| subnet.id)
            .ok_or_else(|| CloudError::SubnetNotFound(network.to_string()))
    }

    /// Poll the VIP until the control plane has assigned its address.
    async fn resolve_vip_address(&self, vip_id: &str) -> Result<String> {
        let net = self.net;
        let id = vip_id.to_string();
        self.retry
            .run(|| {
                let id = id.clone();
                async move {
                    let vip = net.show_virtual_ip(&id).await?;
                    vip.address.ok_or_else(|| {
                        CloudError::Api(format!("virtual ip {id} has no address yet"))
                    })
                }
            })
            .await
    }

    /// Look up an existing floating IP by its literal address.
    ///
    /// Retried because a freshly allocated address can take a moment to
    /// appear in listings.
    async fn find_floating_ip(&self, address: &str) -> Result<crate::model::FloatingIp> {
        let net = self.net;
        let address = address.to_string();
        self.retry
            .run(|| {
                let address = address.clone();
                async move {
                    let fips = net.list_floating_ips().await?;
                    fips.into_iter()
                        .find(|fip| fip.floating_ip_address == address)
                        .ok_or_else(|| CloudError::FloatingIpNotFound(address.clone()))
                }
            })
            .await
    }
}
