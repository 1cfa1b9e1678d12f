use clap::Args;
use loopvol::{DriverResponse, LoopvolResult, MountRequest, VolumeDriver};

#[derive(Args, Debug)]
pub struct MountArgs {
    /// Directory to mount the volume at (created if missing)
    pub mount_dir: String,

    /// Device returned by attach
    pub device: String,

    /// JSON object of mount options
    pub json_params: String,
}

pub fn execute(args: MountArgs, driver: &VolumeDriver) -> LoopvolResult<DriverResponse> {
    let request = MountRequest::new(args.mount_dir, args.device, &args.json_params)?;
    driver.mount(&request)
}
