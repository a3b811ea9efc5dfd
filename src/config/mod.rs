#[allow(clippy::module_inception)]
mod config;

pub use self::config::{ApiSettings, ChainSettings, PostgresSettings, ServerSettings, Settings};
