//! JSON payload construction and boundary validation for the local API.
//!
//! The simulators themselves never fail under valid input, so the only
//! error taxonomy here is "body did not parse" versus "parameters outside
//! the UI domain" (non-finite numbers, zero rates, out-of-range sliders).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::preset::{load_presets, DEFAULT_PRESETS_PATH};
use crate::sim::blaster::{self, simulate_blaster_cycle, BlasterParams};
use crate::sim::metrics::CycleResult;
use crate::sim::rifle::{
    self, simulate_rifle_cycle, RifleParams, RIFLE_RELOAD_SECONDS, ROCKET_COOLDOWN_SECONDS,
};
use crate::sweep::{rate_breakpoints, sweep_rifle_grid};
use crate::parallel::WorkerPool;

pub const SLIDER_MAX: u32 = 20;
pub const RUN_SPEED_MAX: u32 = 100;

#[derive(Debug)]
pub enum SimulateError {
    Parse(serde_json::Error),
    Validation(String),
}

impl fmt::Display for SimulateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Validation(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for SimulateError {}

impl From<serde_json::Error> for SimulateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

pub fn health_payload() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&serde_json::json!({
        "status": "ok",
        "service": "dryfire-api",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn presets_payload() -> Result<String, serde_json::Error> {
    let presets = load_presets(DEFAULT_PRESETS_PATH);
    serde_json::to_string_pretty(&serde_json::json!({ "presets": presets }))
}

fn validate_blaster(params: &BlasterParams) -> Result<(), SimulateError> {
    if !params.weapon_power_percent.is_finite() || params.weapon_power_percent < 0.0 {
        return Err(SimulateError::Validation(
            "weapon_power_percent must be finite and >= 0".to_string(),
        ));
    }
    if !params.attack_speed_percent.is_finite() || params.attack_speed_percent <= 0.0 {
        return Err(SimulateError::Validation(
            "attack_speed_percent must be finite and > 0".to_string(),
        ));
    }
    Ok(())
}

fn validate_rifle(params: &RifleParams) -> Result<(), SimulateError> {
    for (field, value) in [
        ("damage_bonus_pct", params.damage_bonus_pct),
        ("rate_bonus_pct", params.rate_bonus_pct),
        ("ability_power_pct", params.ability_power_pct),
    ] {
        if value > SLIDER_MAX {
            return Err(SimulateError::Validation(format!(
                "{field} must be at most {SLIDER_MAX}"
            )));
        }
    }
    if params.run_speed_capacity_pct > RUN_SPEED_MAX {
        return Err(SimulateError::Validation(format!(
            "run_speed_capacity_pct must be at most {RUN_SPEED_MAX}"
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
struct BlasterResponse {
    status: &'static str,
    weapon: &'static str,
    magazine_size: u32,
    result: CycleResult,
}

pub fn simulate_blaster_payload(body: &str) -> Result<String, SimulateError> {
    let params: BlasterParams = serde_json::from_str(body)?;
    validate_blaster(&params)?;
    let response = BlasterResponse {
        status: "ok",
        weapon: "blaster",
        magazine_size: blaster::magazine_size(&params),
        result: simulate_blaster_cycle(&params),
    };
    Ok(serde_json::to_string_pretty(&response)?)
}

/// Summary stats the UI shows next to the timeline.
#[derive(Debug, Clone, Serialize)]
struct RifleSummary {
    magazine_size: u32,
    effective_rate: f64,
    effective_damage_per_shot: f64,
    reload_seconds: f64,
    rocket_cooldown_seconds: f64,
}

#[derive(Debug, Clone, Serialize)]
struct RifleResponse {
    status: &'static str,
    weapon: &'static str,
    summary: RifleSummary,
    result: CycleResult,
}

pub fn simulate_rifle_payload(body: &str) -> Result<String, SimulateError> {
    let params: RifleParams = serde_json::from_str(body)?;
    validate_rifle(&params)?;
    let response = RifleResponse {
        status: "ok",
        weapon: "rifle",
        summary: RifleSummary {
            magazine_size: rifle::magazine_size(&params),
            effective_rate: rifle::effective_rate(&params),
            effective_damage_per_shot: rifle::effective_damage_per_shot(&params),
            reload_seconds: RIFLE_RELOAD_SECONDS,
            rocket_cooldown_seconds: ROCKET_COOLDOWN_SECONDS,
        },
        result: simulate_rifle_cycle(&params),
    };
    Ok(serde_json::to_string_pretty(&response)?)
}

/// Baseline-vs-current comparison. The baseline defaults to the stock
/// configuration of the requested weapon; the two runs are independent pure
/// calls and execute in parallel.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "weapon", rename_all = "snake_case")]
pub enum CompareRequest {
    Blaster {
        current: BlasterParams,
        #[serde(default)]
        baseline: Option<BlasterParams>,
    },
    Rifle {
        current: RifleParams,
        #[serde(default)]
        baseline: Option<RifleParams>,
    },
}

#[derive(Debug, Clone, Serialize)]
struct CompareResponse {
    status: &'static str,
    weapon: &'static str,
    baseline: CycleResult,
    current: CycleResult,
    /// Shared time axis for rendering both tracks, in seconds.
    max_duration_seconds: f64,
}

pub fn compare_payload(body: &str) -> Result<String, SimulateError> {
    let request: CompareRequest = serde_json::from_str(body)?;
    let (weapon, baseline, current) = match request {
        CompareRequest::Blaster { current, baseline } => {
            let baseline = baseline.unwrap_or_default();
            validate_blaster(&baseline)?;
            validate_blaster(&current)?;
            let (base_result, current_result) = rayon::join(
                || simulate_blaster_cycle(&baseline),
                || simulate_blaster_cycle(&current),
            );
            ("blaster", base_result, current_result)
        }
        CompareRequest::Rifle { current, baseline } => {
            let baseline = baseline.unwrap_or_default();
            validate_rifle(&baseline)?;
            validate_rifle(&current)?;
            let (base_result, current_result) = rayon::join(
                || simulate_rifle_cycle(&baseline),
                || simulate_rifle_cycle(&current),
            );
            ("rifle", base_result, current_result)
        }
    };

    let max_duration_seconds = baseline
        .total_duration_seconds
        .max(current.total_duration_seconds);
    let response = CompareResponse {
        status: "ok",
        weapon,
        baseline,
        current,
        max_duration_seconds,
    };
    Ok(serde_json::to_string_pretty(&response)?)
}

#[derive(Debug, Clone, Serialize)]
struct SweepResponse {
    status: &'static str,
    breakpoints: Vec<crate::sweep::RateBreakpoint>,
    grid: Vec<crate::sweep::SweepPoint>,
}

/// Rifle slider-grid sweep. Body may be an explicit loadout template or
/// empty for the stock loadout.
pub fn sweep_payload(body: &str) -> Result<String, SimulateError> {
    let template: RifleParams = if body.trim().is_empty() {
        RifleParams::default()
    } else {
        serde_json::from_str(body)?
    };
    validate_rifle(&template)?;
    let response = SweepResponse {
        status: "ok",
        breakpoints: rate_breakpoints(),
        grid: sweep_rifle_grid(&template, &WorkerPool::default()),
    };
    Ok(serde_json::to_string_pretty(&response)?)
}
