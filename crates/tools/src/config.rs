//! Multi-network deployment configuration management
//!
//! This module provides the typed, strongly-validated configuration record
//! handed to the external compile/deploy toolchain. Configuration is
//! resolved in priority order:
//!
//! 1. Environment variables (CHAINOPS_*)
//! 2. chainops.toml network entries
//! 3. Built-in presets for well-known networks
//!
//! Secrets never live in the file itself: endpoint URLs and account keys
//! are written as `${VAR}` placeholders and expanded from the environment
//! at load time.
//!
//! # Examples
//!
//! ```rust,no_run
//! use chainops_tools::config::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::load()?;
//! println!("Solidity: {}", config.solidity);
//! println!("Networks: {}", config.networks.len());
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::keys::PrivateKey;
use crate::network::{KnownNetwork, NetworkConfig};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "chainops.toml";

/// Env var naming a non-default config file path.
pub const CONFIG_PATH_VAR: &str = "CHAINOPS_CONFIG";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid endpoint URL for network `{network}`: {reason}")]
    InvalidUrl { network: String, reason: String },

    #[error("Invalid private key in network `{network}`: {reason}")]
    InvalidAccount { network: String, reason: String },

    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid solidity version `{0}`: expected MAJOR.MINOR.PATCH")]
    InvalidSolcVersion(String),

    #[error("Placeholder references unset environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Configuration file not found: {0}")]
    MissingConfigFile(PathBuf),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

/// Solidity compiler version, `MAJOR.MINOR.PATCH`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolcVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SolcVersion {
    /// Parse a version string such as `"0.8.0"`.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let mut parts = s.split('.');
        let (major, minor, patch) = match (parts.next(), parts.next(), parts.next(), parts.next())
        {
            (Some(a), Some(b), Some(c), None) => (a, b, c),
            _ => return Err(ConfigError::InvalidSolcVersion(s.to_string())),
        };
        let num = |p: &str| {
            p.parse::<u64>()
                .map_err(|_| ConfigError::InvalidSolcVersion(s.to_string()))
        };
        Ok(SolcVersion {
            major: num(major)?,
            minor: num(minor)?,
            patch: num(patch)?,
        })
    }
}

impl fmt::Display for SolcVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Raw per-network entry from chainops.toml, before expansion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkProfile {
    /// Endpoint URL, possibly containing `${VAR}` placeholders
    pub url: Option<String>,
    /// Account entries, possibly containing `${VAR}` placeholders
    #[serde(default)]
    pub accounts: Vec<String>,
    #[serde(default)]
    pub chain_id: Option<u64>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Complete chainops.toml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployToml {
    /// Solidity compiler version string
    pub solidity: Option<String>,
    /// Network name -> raw entry. TOML rejects duplicate table keys, which
    /// enforces network-name uniqueness at parse time.
    #[serde(default)]
    pub networks: BTreeMap<String, NetworkProfile>,
}

impl DeployToml {
    /// Read and parse the raw config file.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let raw: DeployToml = toml::from_str(&content)?;
        debug!(path = %path.display(), networks = raw.networks.len(), "parsed config file");
        Ok(raw)
    }
}

/// Expand `${VAR}` placeholders from the environment.
///
/// Returns an error naming the variable if a placeholder is unset, and a
/// validation error if a `${` is never closed. The input is not echoed in
/// errors since account entries may hold key material.
fn expand_env(input: &str) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find('}').ok_or_else(|| {
            ConfigError::ValidationError("unterminated ${...} placeholder".to_string())
        })?;
        let name = &after[..end];
        let value =
            std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))?;
        out.push_str(&value);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// CHAINOPS_<NETWORK>_<SUFFIX> env var name for per-network overrides.
///
/// Network names are uppercased and every character outside `[A-Za-z0-9]`
/// maps to `_`, so the result is always a valid env-var name. Names that
/// differ only in such characters (`my-fork`, `my.fork`, `my_fork`) share
/// one override variable.
fn env_key(network: &str, suffix: &str) -> String {
    let mapped: String = network
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("CHAINOPS_{}_{}", mapped, suffix)
}

fn parse_rpc_url(network: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        network: network.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidUrl {
            network: network.to_string(),
            reason: format!("unsupported scheme `{}`, expected http or https", other),
        }),
    }
}

/// Resolved, read-only deployment configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Compiler version for the external toolchain
    pub solidity: SolcVersion,
    /// Network name -> resolved descriptor
    pub networks: BTreeMap<String, NetworkConfig>,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// # Resolution Order
    ///
    /// 1. Load `.env` if present (non-fatal)
    /// 2. Read the file named by `CHAINOPS_CONFIG`, else `chainops.toml`
    /// 3. Overlay CHAINOPS_* env vars on top of file values
    /// 4. Expand `${VAR}` placeholders in URLs and accounts
    /// 5. Validate every field
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file is missing or malformed, a
    /// placeholder is unset, or any URL/key/version fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        let path = std::env::var(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(CONFIG_FILE));
        Self::load_from(&path)
    }

    /// Load configuration from an explicit file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = DeployToml::read(path)?;
        Self::resolve(&raw)
    }

    /// Resolve a raw file into the validated record.
    pub fn resolve(raw: &DeployToml) -> Result<Self, ConfigError> {
        let solidity_str = std::env::var("CHAINOPS_SOLIDITY")
            .ok()
            .or_else(|| raw.solidity.clone())
            .ok_or_else(|| ConfigError::MissingField("solidity".to_string()))?;
        let solidity = SolcVersion::parse(&solidity_str)?;

        let mut networks = BTreeMap::new();
        for (name, profile) in &raw.networks {
            networks.insert(name.clone(), Self::resolve_network(name, profile)?);
        }

        let config = Config { solidity, networks };
        config.validate()?;
        Ok(config)
    }

    fn resolve_network(name: &str, profile: &NetworkProfile) -> Result<NetworkConfig, ConfigError> {
        let preset = KnownNetwork::from_name(name);

        let url_raw = match std::env::var(env_key(name, "URL")) {
            Ok(v) => {
                debug!(network = name, "endpoint URL taken from environment override");
                Some(v)
            }
            Err(_) => profile.url.clone(),
        };
        let url_raw = match url_raw {
            Some(raw) => expand_env(&raw)?,
            None => preset
                .map(|p| p.default_rpc_url().to_string())
                .ok_or_else(|| ConfigError::MissingField(format!("networks.{}.url", name)))?,
        };
        let url = parse_rpc_url(name, &url_raw)?;

        let mut accounts = Vec::new();
        if let Ok(key) = std::env::var(env_key(name, "KEY")) {
            debug!(network = name, "signing key taken from environment override");
            accounts.push(PrivateKey::parse(&key).map_err(|e| ConfigError::InvalidAccount {
                network: name.to_string(),
                reason: e.to_string(),
            })?);
        }
        for entry in &profile.accounts {
            let expanded = expand_env(entry)?;
            accounts.push(PrivateKey::parse(&expanded).map_err(|e| {
                ConfigError::InvalidAccount {
                    network: name.to_string(),
                    reason: e.to_string(),
                }
            })?);
        }

        let chain_id = profile.chain_id.or_else(|| preset.map(|p| p.chain_id()));

        Ok(NetworkConfig {
            url,
            accounts,
            chain_id,
            description: profile.description.clone(),
        })
    }

    /// Re-check every invariant on an already-constructed record.
    ///
    /// `resolve` runs this automatically; it exists separately so records
    /// built in code get the same checks as records loaded from disk.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, net) in &self.networks {
            parse_rpc_url(name, net.url.as_str())?;
        }
        Ok(())
    }

    /// Print the resolved configuration. Key material stays redacted.
    pub fn print_summary(&self) {
        println!("╔════════════════════════════════════════════════════════════════╗");
        println!("║          CHAINOPS DEPLOYMENT CONFIGURATION RESOLVED            ║");
        println!("╚════════════════════════════════════════════════════════════════╝");
        println!("  Solidity:            {}", self.solidity);

        if self.networks.is_empty() {
            println!("  Networks:            (none configured)");
        }
        for (name, net) in &self.networks {
            println!("  Network:             {}", name);
            println!("    Endpoint host:     {}", net.host());
            match net.chain_id {
                Some(id) => println!("    Chain ID:          {}", id),
                None => println!("    Chain ID:          (unknown)"),
            }
            println!("    Accounts:          {}", net.accounts.len());
            if let Some(desc) = &net.description {
                println!("    Description:       {}", desc);
            }
        }
    }

    /// Get configuration as JSON, with accounts redacted.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// Manual Serialize impl so the version renders as a string and accounts go
// through PrivateKey's redacting serializer.
impl Serialize for Config {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("solidity", &self.solidity.to_string())?;
        map.serialize_entry("networks", &self.networks)?;
        map.end()
    }
}

/// Hygiene report: account entries written as literal keys instead of
/// `${VAR}` placeholders. Inlined secrets in version-controlled config are
/// a credential-leak hazard; `chainops check` surfaces them as warnings.
pub fn inline_secret_warnings(raw: &DeployToml) -> Vec<String> {
    let mut warnings = Vec::new();
    for (name, profile) in &raw.networks {
        for (idx, entry) in profile.accounts.iter().enumerate() {
            if !entry.contains("${") {
                warnings.push(format!(
                    "networks.{}.accounts[{}] embeds a literal private key; \
                     move it to an environment variable and reference it as ${{VAR}}",
                    name, idx
                ));
            }
        }
    }
    warnings
}
