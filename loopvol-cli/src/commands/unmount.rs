use clap::Args;
use loopvol::{DriverResponse, LoopvolResult, UnmountRequest, VolumeDriver};

#[derive(Args, Debug)]
pub struct UnmountArgs {
    /// Directory to unmount; a missing directory is not an error
    pub mount_dir: String,
}

pub fn execute(args: UnmountArgs, driver: &VolumeDriver) -> LoopvolResult<DriverResponse> {
    let request = UnmountRequest::new(args.mount_dir)?;
    driver.unmount(&request)
}
