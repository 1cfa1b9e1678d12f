use clap::Args;
use loopvol::{DriverResponse, LoopvolResult, VolumeDriver};

/// Initialize the storage driver
#[derive(Args, Debug)]
pub struct InitArgs {}

pub fn execute(_args: InitArgs, driver: &VolumeDriver) -> LoopvolResult<DriverResponse> {
    driver.init()
}
