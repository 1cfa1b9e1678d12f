//! Host lookups and diagnostic logging helpers.

pub mod logging;

use std::path::PathBuf;

use loopvol_shared::errors::{LoopvolError, LoopvolResult};

/// Directories searched after `PATH`. Loop and mount tools live in sbin,
/// which is often missing from the environment the orchestrator passes us.
const SBIN_DIRS: &[&str] = &["/usr/local/sbin", "/usr/sbin", "/sbin"];

/// Find a host binary on `PATH` or in the sbin directories.
///
/// # Returns
/// * `Ok(PathBuf)` - Path to the first matching binary
/// * `Err(...)` - Binary not found in any searched location
pub fn find_binary(binary_name: &str) -> LoopvolResult<PathBuf> {
    let mut candidates: Vec<PathBuf> = std::env::var_os("PATH")
        .map(|path| {
            std::env::split_paths(&path)
                .map(|dir| dir.join(binary_name))
                .collect()
        })
        .unwrap_or_default();

    for dir in SBIN_DIRS {
        let candidate = PathBuf::from(dir).join(binary_name);
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }

    for candidate in &candidates {
        if candidate.is_file() {
            tracing::debug!(binary = %candidate.display(), "Found binary");
            return Ok(candidate.clone());
        }
    }

    let locations = candidates
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(LoopvolError::Unexpected(format!(
        "Binary '{}' not found.\nSearched locations:\n{}",
        binary_name, locations
    )))
}
