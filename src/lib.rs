pub mod abis;
pub mod api;
pub mod config;
pub mod db;
pub mod onchain;
pub mod utils;

pub use self::api::{router, AppState};
pub use self::config::Settings;
pub use self::db::{AnalyticsStore, Database};
pub use self::onchain::{Aggregator, RpcChainReader};
