//! loopvol shared code
//!
//! This crate contains the error taxonomy and the constants used by
//! both the volume library (loopvol) and the plugin binary (loopvol-cli).

pub mod constants;
pub mod errors;

pub use errors::{ErrorKind, LoopvolError, LoopvolResult};
