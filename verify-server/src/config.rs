//! Server Configuration
//!
//! Handles loading configuration from an optional `verify-server.toml` file
//! layered under environment variables (and a `.env` file, if present).

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// Stellar testnet RPC endpoint
pub const TESTNET_RPC_URL: &str = "https://soroban-testnet.stellar.org";
/// Stellar testnet network passphrase
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("Failed to load configuration: {0}")]
    Source(#[from] config::ConfigError),
    #[error("Invalid socket address {0}")]
    SocketAddr(String),
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub json_logs: bool,

    /// CORS allowed origins
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Soroban RPC endpoint
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// Network passphrase the transactions are built for
    #[serde(default = "default_network_passphrase")]
    pub network_passphrase: String,

    /// Verifier contract id (C...)
    pub contract_id: Option<String>,

    /// Source account secret seed (S...), only used to derive the address
    pub source_secret: Option<String>,

    /// Source account public key (G...)
    pub source_public_key: Option<String>,

    /// Transaction fee in stroops
    #[serde(default = "default_base_fee")]
    pub base_fee: u32,

    /// Transaction validity window in seconds
    #[serde(default = "default_tx_timeout_secs")]
    pub tx_timeout_secs: u64,

    /// snarkjs executable used for proof generation
    #[serde(default = "default_snarkjs_bin")]
    pub snarkjs_bin: PathBuf,

    /// Compiled circuit (wasm witness generator)
    #[serde(default = "default_circuit_wasm")]
    pub circuit_wasm: PathBuf,

    /// Groth16 proving key
    #[serde(default = "default_proving_key")]
    pub proving_key: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_rpc_url() -> String {
    TESTNET_RPC_URL.to_string()
}

fn default_network_passphrase() -> String {
    TESTNET_PASSPHRASE.to_string()
}

fn default_base_fee() -> u32 {
    100
}

fn default_tx_timeout_secs() -> u64 {
    30
}

fn default_snarkjs_bin() -> PathBuf {
    PathBuf::from("snarkjs")
}

fn default_circuit_wasm() -> PathBuf {
    PathBuf::from("circuits/multiplier2.wasm")
}

fn default_proving_key() -> PathBuf {
    PathBuf::from("proving/multiplier2_final.zkey")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            json_logs: false,
            cors_origins: default_cors_origins(),
            rpc_url: default_rpc_url(),
            network_passphrase: default_network_passphrase(),
            contract_id: None,
            source_secret: None,
            source_public_key: None,
            base_fee: default_base_fee(),
            tx_timeout_secs: default_tx_timeout_secs(),
            snarkjs_bin: default_snarkjs_bin(),
            circuit_wasm: default_circuit_wasm(),
            proving_key: default_proving_key(),
        }
    }
}

impl Config {
    /// Load configuration from `verify-server.toml` (optional) and environment variables
    pub fn load() -> Result<Self, ConfigLoadError> {
        // Load .env file if present
        let _ = dotenvy::dotenv();

        let source = config::Config::builder()
            .add_source(config::File::with_name("verify-server").required(false))
            .add_source(
                config::Environment::default()
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("cors_origins"),
            )
            .build()?;

        Self::from_source(source)
    }

    /// Deserialize from an already built configuration source
    pub fn from_source(source: config::Config) -> Result<Self, ConfigLoadError> {
        let mut config: Config = source.try_deserialize()?;
        config.contract_id = non_empty(config.contract_id);
        config.source_secret = non_empty(config.source_secret);
        config.source_public_key = non_empty(config.source_public_key);
        Ok(config)
    }

    /// Get socket address for binding
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigLoadError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse().map_err(|_| ConfigLoadError::SocketAddr(addr))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
