//! Per-network connection parameters.
//!
//! A network descriptor pairs a JSON-RPC endpoint with the accounts allowed
//! to sign on that network. Well-known public networks carry preset chain
//! ids and fallback endpoints so a minimal config entry still resolves.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use url::Url;

use crate::keys::PrivateKey;

/// Networks with built-in presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownNetwork {
    /// Ethereum mainnet - production
    Mainnet,
    /// Sepolia - the public Ethereum test network
    Sepolia,
    /// Local development node (hardhat node, anvil, geth --dev)
    Localhost,
}

impl KnownNetwork {
    /// Match a configured network name against the presets.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "mainnet" => Some(KnownNetwork::Mainnet),
            "sepolia" => Some(KnownNetwork::Sepolia),
            "localhost" => Some(KnownNetwork::Localhost),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KnownNetwork::Mainnet => "mainnet",
            KnownNetwork::Sepolia => "sepolia",
            KnownNetwork::Localhost => "localhost",
        }
    }

    /// EIP-155 chain id used when the config entry omits one.
    pub fn chain_id(&self) -> u64 {
        match self {
            KnownNetwork::Mainnet => 1,
            KnownNetwork::Sepolia => 11_155_111,
            KnownNetwork::Localhost => 31_337,
        }
    }

    /// Public fallback endpoint used when the config entry omits a URL.
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            KnownNetwork::Mainnet => "https://rpc.ankr.com/eth",
            KnownNetwork::Sepolia => "https://rpc.sepolia.org",
            KnownNetwork::Localhost => "http://127.0.0.1:8545",
        }
    }
}

impl fmt::Display for KnownNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolved connection parameters for one target network.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint, validated as an http(s) URL
    pub url: Url,
    /// Signing credentials, in priority order; may be empty
    pub accounts: Vec<PrivateKey>,
    /// EIP-155 chain id, if known
    pub chain_id: Option<u64>,
    /// Free-form note from the config file, shown in listings
    pub description: Option<String>,
}

impl NetworkConfig {
    /// Endpoint host, for display without the path (API keys often live in
    /// the URL path).
    pub fn host(&self) -> &str {
        self.url.host_str().unwrap_or("")
    }
}

// Accounts serialize through PrivateKey's redacting impl.
impl Serialize for NetworkConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("url", self.url.as_str())?;
        map.serialize_entry("chain_id", &self.chain_id)?;
        map.serialize_entry("accounts", &self.accounts)?;
        map.serialize_entry("description", &self.description)?;
        map.end()
    }
}
