use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chainops_tools::config::{self, Config, DeployToml};

#[derive(Parser)]
#[command(name = "chainops")]
#[command(about = "CLI tools for EVM deployment configuration")]
struct Cli {
    /// Config file path (defaults to $CHAINOPS_CONFIG, then chainops.toml)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the configuration and report secret-hygiene warnings
    Check,
    /// Print the resolved configuration (keys redacted)
    Show {
        /// Emit JSON instead of the text summary
        #[arg(long)]
        json: bool,
    },
    /// List configured networks
    Networks,
    /// Write a starter chainops.toml with ${VAR} placeholders
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

const INIT_TEMPLATE: &str = r#"# chainops.toml - deployment configuration
# Secrets come from the environment (a .env file is honored);
# never inline endpoint API keys or private keys here.

solidity = "0.8.0"

[networks.sepolia]
url = "${SEPOLIA_RPC_URL}"
accounts = ["${SEPOLIA_PRIVATE_KEY}"]
chain_id = 11155111

[networks.localhost]
url = "http://127.0.0.1:8545"
"#;

fn config_path(cli_file: Option<PathBuf>) -> PathBuf {
    cli_file
        .or_else(|| {
            std::env::var(config::CONFIG_PATH_VAR)
                .ok()
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(config::CONFIG_FILE))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let path = config_path(cli.file);

    match cli.command {
        Commands::Check => {
            let raw = DeployToml::read(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            for warning in config::inline_secret_warnings(&raw) {
                eprintln!("warning: {}", warning);
            }
            let resolved = Config::resolve(&raw)?;
            for (name, net) in &resolved.networks {
                println!(
                    "ok: {} ({}, {} account(s))",
                    name,
                    net.host(),
                    net.accounts.len()
                );
            }
            println!(
                "Configuration OK: {} network(s), solidity {}",
                resolved.networks.len(),
                resolved.solidity
            );
            Ok(())
        }
        Commands::Show { json } => {
            let resolved = Config::load_from(&path)?;
            if json {
                println!("{}", resolved.to_json()?);
            } else {
                resolved.print_summary();
            }
            Ok(())
        }
        Commands::Networks => {
            let resolved = Config::load_from(&path)?;
            if resolved.networks.is_empty() {
                println!("(no networks configured)");
            }
            for (name, net) in &resolved.networks {
                let mut line = format!(
                    "{:<16} {:<40} {} account(s)",
                    name,
                    net.host(),
                    net.accounts.len()
                );
                if let Some(desc) = &net.description {
                    line.push_str(&format!("  # {}", desc));
                }
                println!("{}", line);
            }
            Ok(())
        }
        Commands::Init { force } => {
            if path.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            fs::write(&path, INIT_TEMPLATE)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote {}", path.display());
            Ok(())
        }
    }
}
