//! Configuration loading for the loopvol plugin.
//!
//! Handles loading PluginOptions from a JSON file. Logging is configured by
//! that same file, so problems found here are returned to the caller and
//! logged once the sink is up.

use std::path::Path;

use anyhow::Context;
use loopvol::PluginOptions;

/// Options loaded from disk, plus a note if the file could not be used.
pub struct LoadedConfig {
    pub options: PluginOptions,
    pub warning: Option<String>,
}

/// Load PluginOptions from `config_path`.
///
/// Returns defaults if the file is missing, unreadable or invalid.
pub fn load_config(config_path: &Path) -> LoadedConfig {
    if !config_path.exists() {
        return LoadedConfig {
            options: PluginOptions::default(),
            warning: None,
        };
    }

    match try_load_json(config_path) {
        Ok(options) => LoadedConfig {
            options,
            warning: None,
        },
        Err(e) => LoadedConfig {
            options: PluginOptions::default(),
            warning: Some(format!("{:#}; using defaults", e)),
        },
    }
}

fn try_load_json(config_path: &Path) -> anyhow::Result<PluginOptions> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file {}", config_path.display()))?;

    serde_json::from_str::<PluginOptions>(&content)
        .with_context(|| format!("Failed to parse config file {}", config_path.display()))
}
