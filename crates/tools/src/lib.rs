//! ChainOps Tools Library
//!
//! Provides typed, validated network/account configuration for EVM smart
//! contract deployment. The external compiler and deployer consume the
//! resolved record; this crate owns loading, secret sourcing, and
//! validation.

pub mod config;
pub mod keys;
pub mod network;

pub use config::{Config, ConfigError, DeployToml, SolcVersion};
pub use keys::PrivateKey;
pub use network::{KnownNetwork, NetworkConfig};
