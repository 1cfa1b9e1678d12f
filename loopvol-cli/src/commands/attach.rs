use clap::Args;
use loopvol::{AttachRequest, DriverResponse, LoopvolResult, VolumeDriver};

#[derive(Args, Debug)]
pub struct AttachArgs {
    /// JSON object, e.g. '{"project_id": "f8cf98ed-299e-4423-a167-870e8658e081"}'
    pub json_params: String,

    /// Node the volume is attached to (accepted for compatibility, unused)
    pub node_name: Option<String>,
}

pub fn execute(args: AttachArgs, driver: &VolumeDriver) -> LoopvolResult<DriverResponse> {
    let request = AttachRequest::from_json(&args.json_params, args.node_name)?;
    driver.attach(&request)
}
