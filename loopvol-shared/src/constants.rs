//! Constants shared by the library and the plugin binary.
//!
//! Image size and filesystem type are part of the on-host contract: images
//! created by one release must be usable by the next.

/// Backing image configuration
pub mod image {
    /// Logical size of every backing image (3 GiB, sparse)
    pub const SIZE_BYTES: u64 = 3 * 1024 * 1024 * 1024;

    /// File extension appended to the volume identifier
    pub const EXTENSION: &str = "img";

    /// Default directory holding the backing images
    pub const DEFAULT_STAGING_DIR: &str = "/tmp";
}

/// Filesystem applied to freshly created images
pub mod filesystem {
    /// The single supported filesystem type
    pub const TYPE: &str = "ext4";

    /// Formatting tool for [`TYPE`]
    pub const MKFS: &str = "mkfs.ext4";
}

/// Host tools invoked by the plugin
pub mod tools {
    pub const LOSETUP: &str = "losetup";
    pub const MOUNT: &str = "mount";
    pub const UMOUNT: &str = "umount";

    /// Loop control device used to allocate free loop slots
    pub const LOOP_CONTROL: &str = "/dev/loop-control";
}

/// Plugin configuration defaults
pub mod config {
    /// Default configuration file location
    pub const DEFAULT_CONFIG_FILE: &str = "/etc/loopvol/config.json";

    /// Default diagnostic log level when a log file is configured
    pub const DEFAULT_LOG_LEVEL: &str = "info";
}

/// Environment variable names
pub mod envs {
    pub const CONFIG: &str = "LOOPVOL_CONFIG";
    pub const STAGING_DIR: &str = "LOOPVOL_STAGING_DIR";
    pub const LOG_FILE: &str = "LOOPVOL_LOG_FILE";
}
