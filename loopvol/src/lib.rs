//! loopvol - block-backed persistent volumes from sparse loopback images.
//!
//! The library implements the attach/mount/unmount/detach lifecycle of an
//! exec-style volume plugin. Every host tool runs through a
//! [`CommandExecutor`], so the whole lifecycle can be driven against a test
//! double without touching the kernel.

pub mod driver;
pub mod exec;
pub mod options;
pub mod util;
pub mod volumes;

pub use driver::{
    AttachRequest, DetachRequest, DriverResponse, DriverStatus, MountRequest, UnmountRequest,
    VolumeDriver,
};
pub use exec::{CommandExecutor, HostCommand, HostExecutor};
pub use options::PluginOptions;

pub use loopvol_shared::constants;
pub use loopvol_shared::errors::{ErrorKind, LoopvolError, LoopvolResult};
