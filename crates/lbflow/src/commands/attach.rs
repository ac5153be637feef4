use colored::Colorize;
use lbflow_cloud::{AttachOutcome, MemberAttacher};
use lbflow_cloud_neutron::{NeutronNetworkClient, NovaComputeClient, OsCredentials};

pub async fn handle(server: &str, pool: &str, port: u16) -> anyhow::Result<()> {
    let credentials = OsCredentials::from_env().map_err(lbflow_cloud::CloudError::from)?;
    let net = NeutronNetworkClient::new(credentials.clone());
    net.check_auth().await?;
    let compute = NovaComputeClient::new(credentials);

    println!(
        "{}",
        format!("Attaching {server} to pool {pool}...").blue().bold()
    );

    let attacher = MemberAttacher::new(&net, &compute);
    match attacher.attach(server, pool, port).await? {
        AttachOutcome::Attached { address } => {
            println!("{}", format!("Attached {address}:{port}").green());
            println!("changed=true msg=\"Instance attached\"");
        }
        AttachOutcome::AlreadyAttached { address } => {
            println!("{}", format!("{address} is already a member").dimmed());
            println!("changed=false msg=\"Instance already attached\"");
        }
    }

    Ok(())
}
