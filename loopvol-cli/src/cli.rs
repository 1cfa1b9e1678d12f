//! CLI definition and argument parsing for the loopvol plugin.
//!
//! The orchestrator calls the plugin as `loopvol <subcommand> <args...>`.
//! Global flags exist for operators and tests; the orchestrator never passes
//! them and relies on the config file or environment instead.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use loopvol::PluginOptions;
use loopvol::constants::config::DEFAULT_CONFIG_FILE;
use loopvol::constants::envs;

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "loopvol",
    author,
    version,
    about = "Exec volume plugin backed by sparse loopback images"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalFlags,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize the storage driver
    Init(crate::commands::init::InitArgs),

    /// Create the volume image if needed and bind it to a loop device
    Attach(crate::commands::attach::AttachArgs),

    /// Mount an attached device at a directory
    Mount(crate::commands::mount::MountArgs),

    /// Unmount a directory
    Unmount(crate::commands::unmount::UnmountArgs),

    /// Unbind a loop device
    Detach(crate::commands::detach::DetachArgs),

    /// Optional plugin calls this driver does not implement
    #[command(external_subcommand)]
    Unsupported(Vec<String>),
}

// ============================================================================
// GLOBAL FLAGS
// ============================================================================

#[derive(Args, Debug, Clone)]
pub struct GlobalFlags {
    /// Log at debug level (only effective with a log file)
    #[arg(long, global = true)]
    pub debug: bool,

    /// Configuration file
    #[arg(long, global = true, env = envs::CONFIG, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Directory holding the backing images
    #[arg(long, global = true, env = envs::STAGING_DIR)]
    pub staging_dir: Option<PathBuf>,

    /// Diagnostic log file
    #[arg(long, global = true, env = envs::LOG_FILE)]
    pub log_file: Option<PathBuf>,
}

impl GlobalFlags {
    /// Override config file values with flags and environment
    pub fn apply_to(&self, options: &mut PluginOptions) {
        if let Some(dir) = &self.staging_dir {
            options.staging_dir = dir.clone();
        }
        if let Some(file) = &self.log_file {
            options.log_file = Some(file.clone());
        }
        if self.debug {
            options.log_level = "debug".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_attach_with_node_name() {
        let cli = Cli::try_parse_from(["loopvol", "attach", r#"{"project_id":"p1"}"#, "node-1"])
            .unwrap();
        match cli.command {
            Commands::Attach(args) => {
                assert_eq!(args.json_params, r#"{"project_id":"p1"}"#);
                assert_eq!(args.node_name.as_deref(), Some("node-1"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_detach_with_node_name() {
        let cli = Cli::try_parse_from(["loopvol", "detach", "/dev/loop3", "node-1"]).unwrap();
        match cli.command {
            Commands::Detach(args) => {
                assert_eq!(args.device, "/dev/loop3");
                assert_eq!(args.node_name.as_deref(), Some("node-1"));
            }
            other => panic!("unexpected command: {other:?}"),
        }

        let cli = Cli::try_parse_from(["loopvol", "detach", "/dev/loop3"]).unwrap();
        match cli.command {
            Commands::Detach(args) => assert_eq!(args.node_name, None),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_mount_positionals() {
        let cli = Cli::try_parse_from(["loopvol", "mount", "/mnt/p1", "/dev/loop0", "{}"]).unwrap();
        match cli.command {
            Commands::Mount(args) => {
                assert_eq!(args.mount_dir, "/mnt/p1");
                assert_eq!(args.device, "/dev/loop0");
                assert_eq!(args.json_params, "{}");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_subcommand_is_unsupported() {
        let cli = Cli::try_parse_from(["loopvol", "getvolumename", "{}"]).unwrap();
        match cli.command {
            Commands::Unsupported(args) => assert_eq!(args, vec!["getvolumename", "{}"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_flags_override_options() {
        let cli = Cli::try_parse_from([
            "loopvol",
            "--staging-dir",
            "/srv/images",
            "--debug",
            "init",
        ])
        .unwrap();

        let mut options = PluginOptions::default();
        cli.global.apply_to(&mut options);

        assert_eq!(options.staging_dir, PathBuf::from("/srv/images"));
        assert_eq!(options.log_level, "debug");
        assert_eq!(options.log_file, None);
    }
}
