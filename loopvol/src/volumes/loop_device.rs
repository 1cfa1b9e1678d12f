//! Loop device operations (losetup).

use std::path::Path;
use std::sync::Arc;

use loopvol_shared::constants::tools::LOSETUP;
use loopvol_shared::errors::{LoopvolError, LoopvolResult};

use crate::exec::{CommandExecutor, HostCommand};

/// Diagnostics losetup prints when every loop slot is taken.
const EXHAUSTED_MARKERS: &[&str] = &[
    "could not find any free loop device",
    "cannot find an unused loop device",
    "no free loop device",
];

/// Binds backing images to loop block devices.
pub struct LoopDeviceManager {
    executor: Arc<dyn CommandExecutor>,
}

impl LoopDeviceManager {
    pub fn new(executor: Arc<dyn CommandExecutor>) -> Self {
        Self { executor }
    }

    /// Bind `image` to the next free loop device and return the device path.
    ///
    /// The kernel picks the slot. The assigned path is the last
    /// whitespace-delimited token of losetup's output.
    pub fn attach(&self, image: &Path) -> LoopvolResult<String> {
        let cmd = HostCommand::new(LOSETUP)
            .arg("--find")
            .arg("--show")
            .path_arg(image);

        let output = self.executor.run(&cmd).map_err(|e| match e {
            LoopvolError::ExternalCommand { ref message, .. } if is_exhausted(message) => {
                LoopvolError::ResourceExhausted(format!(
                    "no free loop device for {}: {}",
                    image.display(),
                    message.trim()
                ))
            }
            other => other,
        })?;

        let device = assigned_device(&output).ok_or_else(|| {
            LoopvolError::Unexpected(format!(
                "{} reported no loop device for {}",
                LOSETUP,
                image.display()
            ))
        })?;

        tracing::info!("Attached {} to {}", image.display(), device);
        Ok(device.to_string())
    }

    /// Unbind `device`. Fails if the device is not bound or is busy.
    pub fn detach(&self, device: &str) -> LoopvolResult<()> {
        let cmd = HostCommand::new(LOSETUP).arg("-d").arg(device);
        self.executor.run(&cmd)?;

        tracing::info!("Detached {}", device);
        Ok(())
    }
}

fn assigned_device(output: &str) -> Option<&str> {
    output.split_whitespace().last()
}

fn is_exhausted(message: &str) -> bool {
    let message = message.to_lowercase();
    EXHAUSTED_MARKERS
        .iter()
        .any(|marker| message.contains(marker))
}
