use std::path::PathBuf;

use armrender::{AppError, RenderOptions};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "armrender")]
#[command(version)]
#[command(
    about = "Render deployment template fragments from a cluster specification",
    long_about = None
)]
struct Cli {
    /// Path to armrender.toml (defaults to ./armrender.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand an asset against the master profile or an agent pool
    #[clap(visible_alias = "r")]
    Render {
        /// Asset name, relative to the asset root
        asset: String,
        /// Cluster specification JSON
        #[arg(short, long)]
        cluster: PathBuf,
        /// Agent pool to render against instead of the master profile
        #[arg(short, long)]
        pool: Option<String>,
        /// Escape output for embedding in a JSON string
        #[arg(long)]
        single_line: bool,
    },
    /// Generate the cluster kubeconfig
    #[clap(visible_alias = "kc")]
    Kubeconfig {
        #[arg(short, long)]
        cluster: PathBuf,
        /// Override the location used for the master FQDN
        #[arg(short, long)]
        location: Option<String>,
    },
    /// Fetch linked templates for opted-in extensions
    LinkedTemplates {
        #[arg(short, long)]
        cluster: PathBuf,
    },
    /// Print deployment parameters as JSON
    Params {
        #[arg(short, long)]
        cluster: PathBuf,
    },
    /// Gzip and base64-encode a script
    CustomScript {
        /// Script file
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result: Result<String, AppError> = match cli.command {
        Commands::Render { asset, cluster, pool, single_line } => {
            let options = RenderOptions { asset, pool, single_line };
            armrender::render(config, &cluster, &options)
        }
        Commands::Kubeconfig { cluster, location } => {
            armrender::kubeconfig(config, &cluster, location.as_deref())
        }
        Commands::LinkedTemplates { cluster } => armrender::linked_templates(config, &cluster),
        Commands::Params { cluster } => armrender::params(config, &cluster),
        Commands::CustomScript { file } => armrender::custom_script(&file),
    };

    match result {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
