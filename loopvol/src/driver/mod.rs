//! Volume lifecycle driver.
//!
//! Maps the plugin subcommands onto the volume components:
//!
//! ```text
//! unprovisioned --attach--> attached --mount--> mounted
//!       ^                      |  ^               |
//!       +-------detach---------+  +----unmount----+
//! ```
//!
//! The states live entirely in host state (image files, loop table, mount
//! table). The driver keeps nothing between invocations and does not enforce
//! the ordering; the orchestrator does.

mod request;
mod response;

use std::path::Path;
use std::sync::Arc;

use loopvol_shared::constants::filesystem::{MKFS, TYPE};
use loopvol_shared::constants::tools::{LOOP_CONTROL, LOSETUP, MOUNT, UMOUNT};
use loopvol_shared::errors::LoopvolResult;

use crate::exec::CommandExecutor;
use crate::options::PluginOptions;
use crate::util;
use crate::volumes::{FilesystemProvisioner, ImageStore, LoopDeviceManager, MountController};

pub use request::{AttachRequest, DetachRequest, MountParams, MountRequest, UnmountRequest};
pub use response::{DriverResponse, DriverStatus};

/// Dispatches one lifecycle operation end-to-end.
pub struct VolumeDriver {
    images: ImageStore,
    loops: LoopDeviceManager,
    filesystems: FilesystemProvisioner,
    mounts: MountController,
}

impl VolumeDriver {
    pub fn new(options: &PluginOptions, executor: Arc<dyn CommandExecutor>) -> Self {
        Self {
            images: ImageStore::new(&options.staging_dir),
            loops: LoopDeviceManager::new(executor.clone()),
            filesystems: FilesystemProvisioner::new(executor.clone()),
            mounts: MountController::new(executor),
        }
    }

    /// Report readiness. Always succeeds; problems are only logged.
    pub fn init(&self) -> LoopvolResult<DriverResponse> {
        for tool in [LOSETUP, MKFS, MOUNT, UMOUNT] {
            match util::find_binary(tool) {
                Ok(path) => tracing::debug!("{} available at {}", tool, path.display()),
                Err(e) => tracing::warn!("{}", e),
            }
        }

        if !Path::new(LOOP_CONTROL).exists() {
            tracing::warn!(
                "{} not found; is the loop kernel module loaded?",
                LOOP_CONTROL
            );
        }

        let euid = unsafe { libc::geteuid() };
        if euid != 0 {
            tracing::warn!(
                "Running as euid={}; losetup and mount usually need root",
                euid
            );
        }

        tracing::info!(
            "Driver initialized (staging_dir={})",
            self.images.staging_dir().display()
        );
        Ok(DriverResponse::success())
    }

    /// Provision the volume's image if needed and bind it to a loop device.
    ///
    /// Only an image created by this call is formatted. If binding or
    /// formatting fails, the work done so far is rolled back: the device is
    /// detached and a newly created image is removed, so a retry starts over.
    pub fn attach(&self, request: &AttachRequest) -> LoopvolResult<DriverResponse> {
        if let Some(node) = &request.node_name {
            tracing::debug!("Attach requested for node {}", node);
        }

        let image = self.images.ensure_image(&request.volume_id)?;
        let device = self.loops.attach(image.path())?;

        if image.was_created()
            && let Err(e) = self.filesystems.format(&device)
        {
            tracing::warn!("Formatting {} failed, detaching it again", device);
            if let Err(detach_err) = self.loops.detach(&device) {
                tracing::warn!("Failed to detach {} after format error: {}", device, detach_err);
            }
            return Err(e);
        }

        let image_path = image.persist();
        tracing::info!(
            "Volume {} attached: {} → {}",
            request.volume_id,
            image_path.display(),
            device
        );

        Ok(DriverResponse::attached(device))
    }

    pub fn mount(&self, request: &MountRequest) -> LoopvolResult<DriverResponse> {
        tracing::debug!(
            "Mount requested for pod {} (readwrite={})",
            request.params.pod_name.as_deref().unwrap_or("-"),
            request.params.readwrite.as_deref().unwrap_or("-")
        );

        if let Some(fs_type) = request.params.fs_type.as_deref()
            && !fs_type.is_empty()
            && fs_type != TYPE
        {
            tracing::warn!(
                "Requested fsType {} ignored; volumes are always {}",
                fs_type,
                TYPE
            );
        }

        self.mounts.mount(&request.device, &request.mount_dir)?;
        Ok(DriverResponse::success())
    }

    pub fn unmount(&self, request: &UnmountRequest) -> LoopvolResult<DriverResponse> {
        self.mounts.unmount(&request.mount_dir)?;
        Ok(DriverResponse::success())
    }

    pub fn detach(&self, request: &DetachRequest) -> LoopvolResult<DriverResponse> {
        if let Some(node) = &request.node_name {
            tracing::debug!("Detach requested for node {}", node);
        }

        self.loops.detach(&request.device)?;
        Ok(DriverResponse::success())
    }
}
