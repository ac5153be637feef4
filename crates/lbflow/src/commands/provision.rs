use colored::Colorize;
use lbflow_cloud::{ProvisionOutcome, ProvisionParams, ResourceProvisioner};
use lbflow_cloud_neutron::{NeutronNetworkClient, OsCredentials};

pub async fn handle(params: ProvisionParams) -> anyhow::Result<()> {
    let credentials = OsCredentials::from_env().map_err(lbflow_cloud::CloudError::from)?;
    let net = NeutronNetworkClient::new(credentials);
    net.check_auth().await?;

    println!(
        "{}",
        format!("Provisioning load balancer {}...", params.name)
            .blue()
            .bold()
    );

    let provisioner = ResourceProvisioner::new(&net);
    match provisioner.provision(&params).await? {
        ProvisionOutcome::Provisioned { floating_ip } => {
            println!(
                "{}",
                format!("Load balancer reachable at {floating_ip}").green()
            );
            println!(
                "changed=true msg=\"Load balancer created with floating ip: {floating_ip}\" fip={floating_ip}"
            );
        }
        ProvisionOutcome::Unchanged { name } => {
            println!("{}", format!("Load balancer {name} already exists").dimmed());
            println!("changed=false msg=\"Load balancer exists\"");
        }
    }

    Ok(())
}
