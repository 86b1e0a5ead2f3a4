//! PTB Configuration Module
//!
//! This module provides protocol constants and configuration types for the
//! programmable transaction block builder, signer and executor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Protocol limits constants
pub const MAX_PROGRAMMABLE_TX_COMMANDS: usize = 1024;
pub const MAX_OBJECT_INPUTS: usize = 2048;
pub const MAX_GAS_PAYMENT_OBJECTS: usize = 256;
pub const MAX_PURE_ARGUMENT_SIZE: usize = 16 * 1024;
pub const MAX_TYPE_ARGUMENTS: usize = 16;

/// Inputs and commands are addressed by `u16` indices
pub const MAX_ADDRESSABLE_INDICES: usize = u16::MAX as usize + 1;

/// Maximum number of keys in a multisig key set
pub const MAX_SIGNERS_IN_MULTISIG: usize = 10;

/// Size of an address / object id in bytes
pub const ADDRESS_LENGTH: usize = 32;
/// Size of an object or transaction digest in bytes
pub const DIGEST_LENGTH: usize = 32;

/// Gas defaults used by the offline flows
pub const DEFAULT_GAS_PRICE: u64 = 1_000;
pub const DEFAULT_GAS_BUDGET: u64 = 100_000_000;

/// Public fullnode endpoints
pub const MAINNET_RPC_URL: &str = "https://fullnode.mainnet.sui.io:443";
pub const TESTNET_RPC_URL: &str = "https://fullnode.testnet.sui.io:443";
pub const DEVNET_RPC_URL: &str = "https://fullnode.devnet.sui.io:443";
pub const LOCALNET_RPC_URL: &str = "http://127.0.0.1:9000";

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Network the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    #[default]
    Testnet,
    Devnet,
    Localnet,
}

impl Network {
    /// Gets the public fullnode endpoint for this network
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_RPC_URL,
            Network::Testnet => TESTNET_RPC_URL,
            Network::Devnet => DEVNET_RPC_URL,
            Network::Localnet => LOCALNET_RPC_URL,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
            Network::Devnet => write!(f, "devnet"),
            Network::Localnet => write!(f, "localnet"),
        }
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" => Ok(Network::Testnet),
            "devnet" | "dev" => Ok(Network::Devnet),
            "localnet" | "local" => Ok(Network::Localnet),
            _ => Err(format!("Unknown network: {}", s)),
        }
    }
}

/// How long a submission blocks before the node answers.
///
/// Only affects latency, never the payload format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ExecutionMode {
    WaitForEffectsCert,
    #[default]
    WaitForLocalExecution,
}

impl ExecutionMode {
    /// Gets the request type string used on the JSON-RPC wire
    pub fn as_request_type(&self) -> &'static str {
        match self {
            ExecutionMode::WaitForEffectsCert => "WaitForEffectsCert",
            ExecutionMode::WaitForLocalExecution => "WaitForLocalExecution",
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_request_type())
    }
}

impl FromStr for ExecutionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WaitForEffectsCert" | "await-certificate" => Ok(ExecutionMode::WaitForEffectsCert),
            "WaitForLocalExecution" | "await-local-execution" => {
                Ok(ExecutionMode::WaitForLocalExecution)
            }
            _ => Err(format!("Unknown execution mode: {}", s)),
        }
    }
}

/// Structural limits enforced when a transaction is frozen
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BuilderLimits {
    pub max_commands: usize,
    pub max_object_inputs: usize,
    pub max_gas_objects: usize,
    pub max_pure_argument_size: usize,
    pub max_type_arguments: usize,
    /// Reject frozen transactions that leave a produced value unconsumed
    pub strict_linearity: bool,
}

impl Default for BuilderLimits {
    fn default() -> Self {
        Self {
            max_commands: MAX_PROGRAMMABLE_TX_COMMANDS,
            max_object_inputs: MAX_OBJECT_INPUTS,
            max_gas_objects: MAX_GAS_PAYMENT_OBJECTS,
            max_pure_argument_size: MAX_PURE_ARGUMENT_SIZE,
            max_type_arguments: MAX_TYPE_ARGUMENTS,
            strict_linearity: false,
        }
    }
}

/// Gas defaults applied to new builders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GasConfig {
    pub price: u64,
    pub budget: u64,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            price: DEFAULT_GAS_PRICE,
            budget: DEFAULT_GAS_BUDGET,
        }
    }
}

/// RPC client configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RpcConfig {
    pub network: Network,
    /// Overrides the network's public endpoint
    pub url: Option<String>,
    pub request_timeout_secs: u64,
    pub execution_mode: ExecutionMode,
}

impl RpcConfig {
    /// Gets the endpoint, preferring an explicit url over the network default
    pub fn endpoint(&self) -> &str {
        self.url
            .as_deref()
            .unwrap_or_else(|| self.network.default_rpc_url())
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            network: Network::Testnet,
            url: None,
            request_timeout_secs: 30,
            execution_mode: ExecutionMode::WaitForLocalExecution,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// Compact single-line format
    Compact,
    /// JSON format for machine parsing
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, text, compact)
    pub format: LogFormat,

    /// Enable ANSI colors
    pub color: bool,

    /// Include target in log output
    pub include_target: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
            color: true,
            include_target: true,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PtbConfig {
    pub limits: BuilderLimits,
    pub gas: GasConfig,
    pub rpc: RpcConfig,
    pub logging: LogConfig,
}

impl PtbConfig {
    /// Parses a configuration from TOML text
    pub fn from_toml_str(source: &str) -> ConfigResult<Self> {
        let config: PtbConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Checks the values a TOML file can get wrong
    pub fn validate(&self) -> ConfigResult<()> {
        if self.limits.max_commands == 0 {
            return Err(ConfigError::Invalid(
                "limits.max_commands must be at least 1".to_string(),
            ));
        }
        if self.limits.max_commands > MAX_ADDRESSABLE_INDICES {
            return Err(ConfigError::Invalid(format!(
                "limits.max_commands must be at most {}",
                MAX_ADDRESSABLE_INDICES
            )));
        }
        if self.limits.max_object_inputs > MAX_ADDRESSABLE_INDICES {
            return Err(ConfigError::Invalid(format!(
                "limits.max_object_inputs must be at most {}",
                MAX_ADDRESSABLE_INDICES
            )));
        }
        if self.limits.max_gas_objects == 0 {
            return Err(ConfigError::Invalid(
                "limits.max_gas_objects must be at least 1".to_string(),
            ));
        }
        if self.rpc.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "rpc.request_timeout_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_protocol_limits() {
        let config = PtbConfig::default();
        assert_eq!(config.limits.max_commands, 1024);
        assert_eq!(config.limits.max_object_inputs, 2048);
        assert!(!config.limits.strict_linearity);
        assert_eq!(config.gas.price, 1_000);
        assert_eq!(config.gas.budget, 100_000_000);
        assert_eq!(config.rpc.endpoint(), TESTNET_RPC_URL);
    }

    #[test]
    fn test_network_round_trip() {
        for network in [
            Network::Mainnet,
            Network::Testnet,
            Network::Devnet,
            Network::Localnet,
        ] {
            assert_eq!(network.to_string().parse::<Network>().unwrap(), network);
        }
        assert!("moonnet".parse::<Network>().is_err());
    }

    #[test]
    fn test_execution_mode_aliases() {
        assert_eq!(
            "await-certificate".parse::<ExecutionMode>().unwrap(),
            ExecutionMode::WaitForEffectsCert
        );
        assert_eq!(
            "WaitForLocalExecution".parse::<ExecutionMode>().unwrap(),
            ExecutionMode::WaitForLocalExecution
        );
    }
}
