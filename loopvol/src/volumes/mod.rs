//! Volume components.
//!
//! - `ImageStore` - sparse backing images keyed by volume identifier
//! - `LoopDeviceManager` - binds images to loop block devices
//! - `FilesystemProvisioner` - formats freshly created images
//! - `MountController` - mounts and unmounts devices

mod filesystem;
mod image;
mod loop_device;
mod mount;

pub use filesystem::FilesystemProvisioner;
pub use image::{ImageStore, VolumeImage};
pub use loop_device::LoopDeviceManager;
pub use mount::MountController;
