pub mod attach;
pub mod detach;
pub mod init;
pub mod mount;
pub mod unmount;

use loopvol::{DriverResponse, LoopvolResult};

/// Answer an optional plugin call this driver does not implement.
pub fn unsupported(args: &[String]) -> LoopvolResult<DriverResponse> {
    let name = args.first().map(String::as_str).unwrap_or("");
    tracing::debug!("Unsupported call: {:?}", args);
    Ok(DriverResponse::not_supported(name))
}
