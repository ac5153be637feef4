mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use lbflow_cloud::model::{BalancingMethod, HealthHttpMethod, Protocol};

#[derive(Parser)]
#[command(name = "lbflow")]
#[command(about = "Idempotent load balancer provisioning for OpenStack", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision a load balancer (pool, VIP, health monitor, floating IP)
    Provision {
        /// Load balancer pool name; repeated runs with the same name are no-ops
        name: String,
        /// Internal network hosting the pool and VIP
        #[arg(long, env = "LBFLOW_NETWORK")]
        network: String,
        /// External network to allocate the floating IP from
        #[arg(long, env = "LBFLOW_EXTERNAL_NETWORK")]
        external_network: String,
        /// Listener protocol (HTTP, HTTPS, TCP)
        #[arg(long, default_value_t = Protocol::Http)]
        protocol: Protocol,
        /// Balancing method (ROUND_ROBIN, LEAST_CONNECTIONS, SOURCE_IP)
        #[arg(long, default_value_t = BalancingMethod::LeastConnections)]
        method: BalancingMethod,
        /// Listener port
        #[arg(long, default_value_t = 80)]
        port: u16,
        /// Seconds between health probes
        #[arg(long, default_value_t = 2)]
        interval: u32,
        /// Probe failures before a member is marked down
        #[arg(long, default_value_t = 3)]
        max_retries: u32,
        /// Probe timeout in seconds
        #[arg(long, default_value_t = 1)]
        timeout: u32,
        /// HTTP method used by the health probe (GET, PUT, POST)
        #[arg(long, default_value_t = HealthHttpMethod::Get)]
        health_http_method: HealthHttpMethod,
        /// URL path probed by the health monitor
        #[arg(long, default_value = "/")]
        url_path: String,
        /// HTTP status codes the probe accepts
        #[arg(long, default_value = "200-299")]
        expected_codes: String,
        /// Health check protocol (HTTP, HTTPS, TCP)
        #[arg(long, default_value_t = Protocol::Http)]
        healthcheck_protocol: Protocol,
        /// Reuse this existing floating IP instead of allocating one
        #[arg(long)]
        floating_ip_address: Option<String>,
    },
    /// Attach a named instance to a load balancer pool
    Attach {
        /// Instance name to attach
        server: String,
        /// Load balancer pool name
        #[arg(long)]
        pool: String,
        /// Port the member listens on
        #[arg(long, default_value_t = 80)]
        port: u16,
    },
    /// Print version information
    Version,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("{} {}", "error:".red().bold(), err);
        println!("failed=true msg={:?}", err.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Provision {
            name,
            network,
            external_network,
            protocol,
            method,
            port,
            interval,
            max_retries,
            timeout,
            health_http_method,
            url_path,
            expected_codes,
            healthcheck_protocol,
            floating_ip_address,
        } => {
            let mut params = lbflow_cloud::ProvisionParams::new(network, external_network, name);
            params.protocol = protocol;
            params.balancing_method = method;
            params.port = port;
            params.interval = interval;
            params.max_retries = max_retries;
            params.timeout = timeout;
            params.health_http_method = health_http_method;
            params.url_path = url_path;
            params.expected_codes = expected_codes;
            params.healthcheck_protocol = healthcheck_protocol;
            params.floating_ip_address = floating_ip_address;

            commands::provision::handle(params).await
        }
        Commands::Attach { server, pool, port } => {
            commands::attach::handle(&server, &pool, port).await
        }
        Commands::Version => {
            println!("lbflow {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
