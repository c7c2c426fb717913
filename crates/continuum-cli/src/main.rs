use anyhow::Result;
use clap::{Parser, Subcommand};
use continuum_core::{PhysicalNode, RingConfig};
use tracing::info;

mod commands;

#[derive(Parser)]
#[command(name = "continuum", about = "Consistent hash ring lookups")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Hash algorithm (md5, fnv1a, xxh3)
    #[arg(long, global = true)]
    hash: Option<String>,

    /// Virtual nodes per physical node
    #[arg(long, global = true)]
    replicas: Option<u32>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the sample cache ring scenario
    Demo,
    /// Resolve keys against a ring built from config and --node flags
    Lookup {
        /// Keys to resolve
        #[arg(required = true)]
        keys: Vec<String>,
        /// Node as host:port, may be repeated (replaces configured nodes)
        #[arg(long = "node")]
        nodes: Vec<PhysicalNode>,
        /// Distinct nodes to return per key
        #[arg(long, default_value = "1")]
        count: usize,
    },
    /// Show the physical nodes and their virtual nodes
    Nodes {
        /// Node as host:port, may be repeated (replaces configured nodes)
        #[arg(long = "node")]
        nodes: Vec<PhysicalNode>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "continuum=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = RingConfig::load(cli.config.as_deref())?;
    if let Some(hash) = cli.hash {
        config.hash_algorithm = hash;
    }
    if let Some(replicas) = cli.replicas {
        config.replicas_per_node = replicas;
    }

    info!(
        hash = %config.hash_algorithm,
        replicas_per_node = config.replicas_per_node,
        "Loaded ring configuration"
    );

    match cli.command {
        Commands::Demo => {
            commands::demo::run(&config, cli.json)?;
        }
        Commands::Lookup { keys, nodes, count } => {
            if !nodes.is_empty() {
                config.nodes = nodes;
            }
            commands::lookup::run(&config, &keys, count, cli.json)?;
        }
        Commands::Nodes { nodes } => {
            if !nodes.is_empty() {
                config.nodes = nodes;
            }
            commands::lookup::nodes(&config, cli.json)?;
        }
    }

    Ok(())
}
