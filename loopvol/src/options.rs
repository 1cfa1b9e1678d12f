//! Configuration for the volume plugin.

use std::path::PathBuf;

use loopvol_shared::constants::config::DEFAULT_LOG_LEVEL;
use loopvol_shared::constants::image::DEFAULT_STAGING_DIR;
use serde::{Deserialize, Serialize};

/// Plugin-wide options, usually loaded from the JSON config file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginOptions {
    /// Directory holding the backing images.
    ///
    /// Image paths are `<staging_dir>/<volume id>.img`; changing this on a
    /// node with existing volumes makes them invisible to the plugin.
    /// Default: /tmp
    #[serde(default = "default_staging_dir")]
    pub staging_dir: PathBuf,

    /// Diagnostic log file. No logging happens when unset.
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Filter directive for the diagnostic log (e.g. "info", "loopvol=debug").
    ///
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_staging_dir() -> PathBuf {
    PathBuf::from(DEFAULT_STAGING_DIR)
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            staging_dir: default_staging_dir(),
            log_file: None,
            log_level: default_log_level(),
        }
    }
}
