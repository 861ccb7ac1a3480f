mod error;
mod google;
mod loader;

use std::path::Path;

use serde::Deserialize;

pub use error::Error;
pub use google::GoogleConfig;

pub type Result<T> = std::result::Result<T, error::Error>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub google: GoogleConfig,
}

impl Config {
    /// Reads a TOML file, expanding `{{ env.NAME }}` placeholders first.
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Config> {
        loader::load(path)
    }

    /// Same as [`Config::load`] for an in-memory document.
    pub fn parse(content: &str) -> crate::Result<Config> {
        loader::parse(content)
    }
}
