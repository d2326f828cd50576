//! Named parameter presets. The comparison view diffs a configuration
//! against one of these baselines.
//!
//! Presets load from a YAML file so alternate baselines can be dropped in
//! without a rebuild; a missing or unreadable file falls back to the
//! built-in pair.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::blaster::BlasterParams;
use crate::sim::rifle::RifleParams;

pub const DEFAULT_PRESETS_PATH: &str = "data/presets.yaml";

/// One named configuration. Exactly one of the weapon fields is expected to
/// be set; a preset with neither is ignored by consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blaster: Option<BlasterParams>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rifle: Option<RifleParams>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PresetFile {
    #[serde(default)]
    presets: Vec<Preset>,
}

/// The baseline pair every comparison defaults to: both weapons at stock
/// stats, reload included, rifle rocket on.
pub fn builtin_presets() -> Vec<Preset> {
    vec![
        Preset {
            name: "blaster_baseline".to_string(),
            blaster: Some(BlasterParams::default()),
            rifle: None,
        },
        Preset {
            name: "rifle_baseline".to_string(),
            blaster: None,
            rifle: Some(RifleParams::default()),
        },
    ]
}

/// Load presets from `path`, falling back to [builtin_presets] when the file
/// is missing or does not parse.
pub fn load_presets(path: &str) -> Vec<Preset> {
    let path = Path::new(path);
    if !path.exists() {
        return builtin_presets();
    }
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(_) => return builtin_presets(),
    };
    match serde_yaml::from_str::<PresetFile>(&raw) {
        Ok(file) if !file.presets.is_empty() => file.presets,
        _ => builtin_presets(),
    }
}
