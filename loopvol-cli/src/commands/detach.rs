use clap::Args;
use loopvol::{DetachRequest, DriverResponse, LoopvolResult, VolumeDriver};

#[derive(Args, Debug)]
pub struct DetachArgs {
    /// Loop device returned by attach
    pub device: String,

    /// Node the volume is detached from (accepted for compatibility, unused)
    pub node_name: Option<String>,
}

pub fn execute(args: DetachArgs, driver: &VolumeDriver) -> LoopvolResult<DriverResponse> {
    let request = DetachRequest::new(args.device, args.node_name)?;
    driver.detach(&request)
}
