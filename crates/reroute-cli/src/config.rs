//! Configuration file loading.

use anyhow::{Context, Result};
use reroute_core::EngineConfig;
use std::fs;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_CONFIG_PATH: &str = "reroute.toml";

/// Load the engine configuration.
///
/// An explicit path must exist. Without one, `./reroute.toml` is used
/// when present and the built-in defaults otherwise.
pub fn load(explicit: Option<&Path>) -> Result<EngineConfig> {
    match explicit {
        Some(path) => read(path),
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_PATH);
            if fallback.exists() {
                read(fallback)
            } else {
                debug!("no {DEFAULT_CONFIG_PATH} found, using built-in defaults");
                Ok(EngineConfig::default())
            }
        }
    }
}

fn read(path: &Path) -> Result<EngineConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config =
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
    debug!("loaded config from {}", path.display());
    Ok(config)
}
