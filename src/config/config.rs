use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// HTTP listener configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

/// PostgreSQL database connection configuration.
///
/// Holds the token registry and the analytics collections
/// (history, roi, liquidity, providers).
#[derive(Debug, Deserialize, Clone)]
pub struct PostgresSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,
}

fn default_pool_size() -> usize {
    16
}

/// Ethereum node and Bancor contract configuration.
///
/// The reference converter is the BNT/DAI pool used to turn BNT prices
/// into USD prices.
#[derive(Debug, Deserialize, Clone)]
pub struct ChainSettings {
    pub rpc_url: String,
    #[serde(default = "default_bnt_address")]
    pub bnt_address: String,
    #[serde(default = "default_reference_converter")]
    pub reference_converter: String,
    /// Size of the trailing volume window, in blocks
    #[serde(default = "default_blocks_per_day")]
    pub blocks_per_day: u64,
    #[serde(default = "default_rpc_timeout_secs")]
    pub rpc_timeout_secs: u64,
}

fn default_bnt_address() -> String {
    "0x1F573D6Fb3F13d689FF844B4cE37794d79a7FF1C".to_string()
}

fn default_reference_converter() -> String {
    "0xE03374cAcf4600F56BDDbDC82c07b375f318fc5C".to_string()
}

fn default_blocks_per_day() -> u64 {
    6_500 // ~13.3s blocks
}

fn default_rpc_timeout_secs() -> u64 {
    30
}

/// Query defaults for the time-series endpoints.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    /// Window used when a request omits `start`
    #[serde(default = "default_range_days")]
    pub default_range_days: u32,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            default_range_days: default_range_days(),
        }
    }
}

fn default_range_days() -> u32 {
    30
}

/// Root application configuration.
///
/// Loaded from `config.yaml` at startup, with `LPSTATS__SECTION__KEY`
/// environment variables taking precedence.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    pub postgres: PostgresSettings,
    pub chain: ChainSettings,
    #[serde(default)]
    pub api: ApiSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name("config"))
            .add_source(Environment::with_prefix("LPSTATS").separator("__"))
            .build()?;

        let settings: Settings = s.try_deserialize()?;

        Ok(settings)
    }
}
