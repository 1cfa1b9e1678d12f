//! Filesystem creation on freshly provisioned devices.

use std::sync::Arc;

use loopvol_shared::constants::filesystem::{MKFS, TYPE};
use loopvol_shared::errors::LoopvolResult;

use crate::exec::{CommandExecutor, HostCommand};

/// Formats devices with the single supported filesystem type.
///
/// Performs no detection of an existing filesystem: the caller decides
/// whether formatting is needed.
pub struct FilesystemProvisioner {
    executor: Arc<dyn CommandExecutor>,
}

impl FilesystemProvisioner {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    /// Format `device` unconditionally.
    pub fn format(&self, device: &str) -> LoopvolResult<()> {
        tracing::info!("Formatting {} with {}", device, TYPE);

        // -F: don't prompt, -q: quiet
        let cmd = HostCommand::new(MKFS).arg("-F").arg("-q").arg(device);
        self.executor.run(&cmd)?;

        tracing::info!("Formatted {} successfully", device);
        Ok(())
    }
}
