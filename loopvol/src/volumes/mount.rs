//! Mounting devices into pod directories.

use std::path::Path;
use std::sync::Arc;

use loopvol_shared::constants::filesystem::TYPE;
use loopvol_shared::constants::tools::{MOUNT, UMOUNT};
use loopvol_shared::errors::{LoopvolError, LoopvolResult};

use crate::exec::{CommandExecutor, HostCommand};

/// Mounts devices at directories and unmounts them again.
pub struct MountController {
    executor: Arc<dyn CommandExecutor>,
}

impl MountController {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    /// Mount `device` at `mount_dir` with default options.
    ///
    /// `mount_dir` and any missing parents are created first.
    pub fn mount(&self, device: &str, mount_dir: &Path) -> LoopvolResult<()> {
        tracing::info!("Mounting {} → {}", device, mount_dir.display());

        std::fs::create_dir_all(mount_dir).map_err(|e| {
            LoopvolError::Unexpected(format!(
                "Failed to create mount point {}: {}",
                mount_dir.display(),
                e
            ))
        })?;

        let cmd = HostCommand::new(MOUNT)
            .arg("-t")
            .arg(TYPE)
            .arg(device)
            .path_arg(mount_dir);
        self.executor.run(&cmd)?;

        tracing::info!("Mounted {} → {}", device, mount_dir.display());
        Ok(())
    }

    /// Unmount `mount_dir`.
    ///
    /// A directory that does not exist has nothing mounted on it, so this is
    /// a successful no-op. A directory that cannot be checked is an error.
    /// The directory itself is never removed.
    pub fn unmount(&self, mount_dir: &Path) -> LoopvolResult<()> {
        let exists = mount_dir.try_exists().map_err(|e| {
            LoopvolError::Unexpected(format!(
                "Failed to check mount point {}: {}",
                mount_dir.display(),
                e
            ))
        })?;
        if !exists {
            tracing::info!(
                "Mount point {} does not exist, nothing to unmount",
                mount_dir.display()
            );
            return Ok(());
        }

        let cmd = HostCommand::new(UMOUNT).path_arg(mount_dir);
        self.executor.run(&cmd)?;

        tracing::info!("Unmounted {}", mount_dir.display());
        Ok(())
    }
}
