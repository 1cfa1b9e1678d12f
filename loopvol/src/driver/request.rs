//! Typed requests for the driver operations.
//!
//! Each request is built from the raw command-line values and validates its
//! required fields up front, so the operations only ever see complete input.

use std::path::PathBuf;

use loopvol_shared::errors::{LoopvolError, LoopvolResult};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Parse `json_params`, which must be a JSON object.
fn parse_params(json_params: &str) -> LoopvolResult<Map<String, Value>> {
    match serde_json::from_str::<Value>(json_params)? {
        Value::Object(map) => Ok(map),
        other => Err(LoopvolError::InvalidArgument(format!(
            "json_params must be a JSON object, got: {}",
            other
        ))),
    }
}

fn require(field: &str, value: String) -> LoopvolResult<String> {
    if value.is_empty() {
        return Err(LoopvolError::InvalidArgument(format!(
            "must specify {}",
            field
        )));
    }
    Ok(value)
}

/// Like [`require`], for values passed to host tools as positional operands.
/// A leading `-` would be parsed as an option.
fn require_operand(field: &str, value: String) -> LoopvolResult<String> {
    let value = require(field, value)?;
    if value.starts_with('-') {
        return Err(LoopvolError::InvalidArgument(format!(
            "{} must not start with '-': {}",
            field, value
        )));
    }
    Ok(value)
}

#[derive(Debug, Default, Deserialize)]
struct AttachParams {
    #[serde(default)]
    project_id: Option<String>,
}

/// Options the orchestrator passes to mount. Only used for diagnostics.
///
/// Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MountParams {
    #[serde(rename = "kubernetes.io/fsType", default)]
    pub fs_type: Option<String>,

    #[serde(rename = "kubernetes.io/readwrite", default)]
    pub readwrite: Option<String>,

    #[serde(rename = "kubernetes.io/pod.name", default)]
    pub pod_name: Option<String>,
}

/// Attach: provision the image for a volume and bind it to a loop device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachRequest {
    pub volume_id: String,
    pub node_name: Option<String>,
}

impl AttachRequest {
    /// Build from `{"project_id": "<id>"}`.
    pub fn from_json(json_params: &str, node_name: Option<String>) -> LoopvolResult<Self> {
        let params = parse_params(json_params)?;
        let params: AttachParams = serde_json::from_value(Value::Object(params))?;
        let volume_id = require("project_id", params.project_id.unwrap_or_default())?;

        Ok(Self {
            volume_id,
            node_name,
        })
    }
}

/// Mount: mount an attached device into a pod directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountRequest {
    pub mount_dir: PathBuf,
    pub device: String,
    pub params: MountParams,
}

impl MountRequest {
    pub fn new(mount_dir: String, device: String, json_params: &str) -> LoopvolResult<Self> {
        let mount_dir = require_operand("mount_dir", mount_dir)?;
        let device = require_operand("device", device)?;
        let params = parse_params(json_params)?;
        let params: MountParams = serde_json::from_value(Value::Object(params))?;

        Ok(Self {
            mount_dir: PathBuf::from(mount_dir),
            device,
            params,
        })
    }
}

/// Unmount: release whatever is mounted at a pod directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnmountRequest {
    pub mount_dir: PathBuf,
}

impl UnmountRequest {
    pub fn new(mount_dir: String) -> LoopvolResult<Self> {
        Ok(Self {
            mount_dir: PathBuf::from(require_operand("mount_dir", mount_dir)?),
        })
    }
}

/// Detach: unbind a loop device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetachRequest {
    pub device: String,
    pub node_name: Option<String>,
}

impl DetachRequest {
    pub fn new(device: String, node_name: Option<String>) -> LoopvolResult<Self> {
        Ok(Self {
            device: require_operand("device", device)?,
            node_name,
        })
    }
}
