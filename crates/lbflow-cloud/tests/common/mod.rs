use async_trait::async_trait;
use lbflow_cloud::model::{
    FloatingIp, FloatingIpBinding, FloatingIpSpec, HealthMonitor, HealthMonitorSpec, Instance,
    InstanceNetwork, Member, MemberSpec, Pool, PoolSpec, ResourceKind, Subnet, VirtualIp,
    VirtualIpSpec,
};
use lbflow_cloud::{CloudError, ComputeControlClient, NetworkControlClient, Result, RetryPolicy};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

/// Retry policy with millisecond delays so workflow tests stay fast.
#[allow(dead_code)]
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 7,
        initial_delay: Duration::from_millis(1),
        max_delay: Duration::from_millis(2),
        backoff_multiplier: 2.0,
    }
}

/// In-memory control plane recording every mutating call.
#[derive(Default)]
pub struct FakeControlPlane {
    pub pools: Mutex<Vec<Pool>>,
    pub vips: Mutex<Vec<VirtualIp>>,
    pub monitors: Mutex<Vec<HealthMonitor>>,
    pub associations: Mutex<Vec<(String, String)>>,
    pub members: Mutex<Vec<Member>>,
    pub floating_ips: Mutex<Vec<FloatingIp>>,
    pub subnets: Mutex<Vec<Subnet>>,
    pub networks: Mutex<HashMap<String, String>>,
    /// Names of mutating calls, in invocation order.
    pub mutations: Mutex<Vec<String>>,
    /// show_virtual_ip returns no address for this many calls.
    pub vip_polls_until_address: AtomicU32,
    /// associate_health_monitor fails this many times before succeeding.
    pub associate_failures: AtomicU32,
    /// When set, create_member always fails.
    pub member_create_fails: AtomicBool,
    next_id: AtomicU32,
}

#[allow(dead_code)]
impl FakeControlPlane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_network(&self, name: &str, id: &str) {
        self.networks
            .lock()
            .unwrap()
            .insert(name.to_string(), id.to_string());
    }

    pub fn add_subnet(&self, id: &str, network_id: &str) {
        self.subnets.lock().unwrap().push(Subnet {
            id: id.to_string(),
            network_id: network_id.to_string(),
        });
    }

    pub fn add_pool(&self, name: &str) -> String {
        let id = self.next("pool");
        self.pools.lock().unwrap().push(Pool {
            id: id.clone(),
            name: name.to_string(),
            lb_method: "LEAST_CONNECTIONS".to_string(),
            protocol: "HTTP".to_string(),
            subnet_id: "sub0".to_string(),
        });
        id
    }

    pub fn add_floating_ip(&self, address: &str) -> String {
        let id = self.next("fip");
        self.floating_ips.lock().unwrap().push(FloatingIp {
            id: id.clone(),
            floating_ip_address: address.to_string(),
            port_id: None,
            fixed_ip_address: None,
        });
        id
    }

    pub fn mutation_log(&self) -> Vec<String> {
        self.mutations.lock().unwrap().clone()
    }

    fn next(&self, prefix: &str) -> String {
        let n = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{prefix}-{n}")
    }

    fn record(&self, call: &str) {
        self.mutations.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl NetworkControlClient for FakeControlPlane {
    async fn list_pools(&self) -> Result<Vec<Pool>> {
        Ok(self.pools.lock().unwrap().clone())
    }

    async fn create_pool(&self, spec: &PoolSpec) -> Result<Pool> {
        self.record("create_pool");
        let pool = Pool {
            id: self.next("pool"),
            name: spec.name.clone(),
            lb_method: spec.lb_method.to_string(),
            protocol: spec.protocol.to_string(),
            subnet_id: spec.subnet_id.clone(),
        };
        self.pools.lock().unwrap().push(pool.clone());
        Ok(pool)
    }

    async fn create_virtual_ip(&self, spec: &VirtualIpSpec) -> Result<VirtualIp> {
        self.record("create_virtual_ip");
        let vip = VirtualIp {
            id: self.next("vip"),
            name: spec.name.clone(),
            pool_id: spec.pool_id.clone(),
            port_id: self.next("port"),
            protocol: spec.protocol.to_string(),
            protocol_port: spec.protocol_port,
            address: None,
        };
        self.vips.lock().unwrap().push(vip.clone());
        Ok(vip)
    }

    async fn show_virtual_ip(&self, id: &str) -> Result<VirtualIp> {
        let mut vip = self
            .vips
            .lock()
            .unwrap()
            .iter()
            .find(|vip| vip.id == id)
            .cloned()
            .ok_or_else(|| CloudError::ResourceNotFound(format!("vip {id}")))?;

        let pending = self.vip_polls_until_address.load(Ordering::SeqCst);
        if pending > 0 {
            self.vip_polls_until_address
                .store(pending - 1, Ordering::SeqCst);
        } else {
            vip.address = Some("10.0.0.100".to_string());
        }
        Ok(vip)
    }

    async fn create_health_monitor(&self, spec: &HealthMonitorSpec) -> Result<HealthMonitor> {
        self.record("create_health_monitor");
        let monitor = HealthMonitor {
            id: self.next("hm"),
            delay: spec.delay,
            http_method: spec.http_method.to_string(),
            max_retries: spec.max_retries,
            timeout: spec.timeout,
            kind: spec.kind.to_string(),
            expected_codes: spec.expected_codes.clone(),
        };
        self.monitors.lock().unwrap().push(monitor.clone());
        Ok(monitor)
    }

    async fn associate_health_monitor(&self, monitor_id: &str, pool_id: &str) -> Result<()> {
        let pending = self.associate_failures.load(Ordering::SeqCst);
        if pending > 0 {
            self.associate_failures.store(pending - 1, Ordering::SeqCst);
            return Err(CloudError::Api(format!(
                "health monitor {monitor_id} not yet visible"
            )));
        }
        self.record("associate_health_monitor");
        self.associations
            .lock()
            .unwrap()
            .push((monitor_id.to_string(), pool_id.to_string()));
        Ok(())
    }

    async fn list_floating_ips(&self) -> Result<Vec<FloatingIp>> {
        Ok(self.floating_ips.lock().unwrap().clone())
    }

    async fn create_floating_ip(&self, _spec: &FloatingIpSpec) -> Result<FloatingIp> {
        self.record("create_floating_ip");
        let address = format!("198.51.100.{}", self.floating_ips.lock().unwrap().len() + 1);
        let fip = FloatingIp {
            id: self.next("fip"),
            floating_ip_address: address,
            port_id: None,
            fixed_ip_address: None,
        };
        self.floating_ips.lock().unwrap().push(fip.clone());
        Ok(fip)
    }

    async fn update_floating_ip(&self, id: &str, binding: &FloatingIpBinding) -> Result<()> {
        self.record("update_floating_ip");
        let mut fips = self.floating_ips.lock().unwrap();
        let fip = fips
            .iter_mut()
            .find(|fip| fip.id == id)
            .ok_or_else(|| CloudError::ResourceNotFound(format!("floating ip {id}")))?;
        fip.port_id = Some(binding.port_id.clone());
        fip.fixed_ip_address = Some(binding.fixed_ip_address.clone());
        Ok(())
    }

    async fn list_subnets(&self) -> Result<Vec<Subnet>> {
        Ok(self.subnets.lock().unwrap().clone())
    }

    async fn list_members(&self) -> Result<Vec<Member>> {
        Ok(self.members.lock().unwrap().clone())
    }

    async fn create_member(&self, spec: &MemberSpec) -> Result<Member> {
        if self.member_create_fails.load(Ordering::SeqCst) {
            return Err(CloudError::Api("member quota exceeded".to_string()));
        }
        self.record("create_member");
        let member = Member {
            id: self.next("member"),
            pool_id: spec.pool_id.clone(),
            address: spec.address.clone(),
            protocol_port: spec.protocol_port,
        };
        self.members.lock().unwrap().push(member.clone());
        Ok(member)
    }

    async fn resolve_resource_id(&self, kind: ResourceKind, name_or_id: &str) -> Result<String> {
        match kind {
            ResourceKind::Network => {
                let networks = self.networks.lock().unwrap();
                networks
                    .get(name_or_id)
                    .cloned()
                    .or_else(|| {
                        networks
                            .values()
                            .find(|id| id.as_str() == name_or_id)
                            .cloned()
                    })
                    .ok_or_else(|| {
                        CloudError::ResourceNotFound(format!("network {name_or_id}"))
                    })
            }
            ResourceKind::Pool => self
                .pools
                .lock()
                .unwrap()
                .iter()
                .find(|pool| pool.name == name_or_id || pool.id == name_or_id)
                .map(|pool| pool.id.clone())
                .ok_or_else(|| CloudError::ResourceNotFound(format!("pool {name_or_id}"))),
        }
    }
}

/// In-memory compute service resolving instances by name.
#[derive(Default)]
pub struct FakeCompute {
    pub instances: Mutex<HashMap<String, Instance>>,
}

#[allow(dead_code)]
impl FakeCompute {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_instance(&self, name: &str, address: &str) {
        let instance = Instance {
            id: format!("i-{name}"),
            name: name.to_string(),
            networks: vec![InstanceNetwork {
                name: "private".to_string(),
                addresses: vec![address.to_string()],
            }],
        };
        self.instances
            .lock()
            .unwrap()
            .insert(name.to_string(), instance);
    }

    pub fn add_instance_without_address(&self, name: &str) {
        let instance = Instance {
            id: format!("i-{name}"),
            name: name.to_string(),
            networks: vec![],
        };
        self.instances
            .lock()
            .unwrap()
            .insert(name.to_string(), instance);
    }
}

#[async_trait]
impl ComputeControlClient for FakeCompute {
    async fn find_instance_by_name(&self, name: &str) -> Result<Instance> {
        self.instances
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| CloudError::InstanceNotFound(name.to_string()))
    }
}
