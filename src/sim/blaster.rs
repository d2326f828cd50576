//! Volley-based blaster simulator.
//!
//! The weapon fires fixed-size volleys with a fixed micro-interval between
//! shots inside a volley and an attack-speed-scaled recovery pause between
//! volleys, optionally preceded by a reload and always preceded by a cocking
//! phase. Per-shot damage is constant; there is no ramping.

use serde::{Deserialize, Serialize};

use crate::sim::metrics::CycleResult;
use crate::sim::timeline::{EventKind, TimelineBuilder, TICKS_PER_SECOND};

pub const BLASTER_BASE_CLIP: u32 = 180;
pub const BLASTER_VOLLEY_SIZE: u32 = 12;

const RELOAD_TICKS: u64 = (15 * TICKS_PER_SECOND) / 10; // 1.5 s
const COCKING_NOMINAL_TICKS: u64 = (3 * TICKS_PER_SECOND) / 10; // 0.3 s
const RECOVERY_NOMINAL_TICKS: u64 = (45 * TICKS_PER_SECOND) / 100; // 0.45 s
const INTRA_VOLLEY_TICKS: u64 = (3 * TICKS_PER_SECOND) / 100; // 0.03 s, fixed

/// The blaster's two discrete firing modes. The per-hit value is fixed per
/// mode; an enum keeps invalid in-between values unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlasterMode {
    Healing,
    Damage,
}

impl BlasterMode {
    pub const fn value_per_hit(self) -> f64 {
        match self {
            Self::Healing => 6.0,
            Self::Damage => 7.5,
        }
    }
}

/// Three independent additive magazine-capacity modifiers. The multiplier is
/// 1 plus the sum of the enabled fractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CapacityMods {
    #[serde(default)]
    pub plus20: bool,
    #[serde(default)]
    pub plus25: bool,
    #[serde(default)]
    pub plus40: bool,
}

impl CapacityMods {
    pub fn multiplier(self) -> f64 {
        let mut multiplier = 1.0;
        if self.plus20 {
            multiplier += 0.20;
        }
        if self.plus25 {
            multiplier += 0.25;
        }
        if self.plus40 {
            multiplier += 0.40;
        }
        multiplier
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlasterParams {
    pub mode: BlasterMode,
    /// Damage multiplier as a percentage (100 = baseline). UI range is
    /// 100–200 but any finite value ≥ 0 is accepted.
    pub weapon_power_percent: f64,
    /// Time-compression multiplier as a percentage. Must be > 0; the UI
    /// range is 100–200.
    pub attack_speed_percent: f64,
    #[serde(default)]
    pub capacity_mods: CapacityMods,
    pub reload_enabled: bool,
}

impl Default for BlasterParams {
    fn default() -> Self {
        Self {
            mode: BlasterMode::Damage,
            weapon_power_percent: 100.0,
            attack_speed_percent: 100.0,
            capacity_mods: CapacityMods::default(),
            reload_enabled: true,
        }
    }
}

/// Absolute simulation inputs derived from the user-facing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
struct NormalizedBlaster {
    damage_per_hit: f64,
    power_multiplier: f64,
    speed_multiplier: f64,
    magazine_size: u32,
    reload_enabled: bool,
}

fn normalize(params: &BlasterParams) -> NormalizedBlaster {
    NormalizedBlaster {
        damage_per_hit: params.mode.value_per_hit(),
        power_multiplier: params.weapon_power_percent / 100.0,
        speed_multiplier: params.attack_speed_percent / 100.0,
        magazine_size: (BLASTER_BASE_CLIP as f64 * params.capacity_mods.multiplier()).floor()
            as u32,
        reload_enabled: params.reload_enabled,
    }
}

/// Magazine size after capacity modifiers, floored.
pub fn magazine_size(params: &BlasterParams) -> u32 {
    normalize(params).magazine_size
}

/// Divide a nominal phase duration by the attack-speed multiplier, rounding
/// up to the next whole tick. Ceiling is deliberate: a phase compressed by
/// attack speed shortens but never measures to zero ticks.
fn scaled_phase_ticks(nominal_ticks: u64, speed_multiplier: f64) -> u64 {
    (nominal_ticks as f64 / speed_multiplier).ceil() as u64
}

/// Simulate one full blaster cycle: optional reload, cocking, then the
/// magazine in volleys of [BLASTER_VOLLEY_SIZE].
///
/// Sustained output is `total_damage × TICKS_PER_SECOND / final_tick`, i.e.
/// total damage over the full measured cycle. A magazine of zero produces a
/// reload/cock-only timeline with zero damage.
pub fn simulate_blaster_cycle(params: &BlasterParams) -> CycleResult {
    run_cycle(&normalize(params))
}

fn run_cycle(input: &NormalizedBlaster) -> CycleResult {
    let cocking_ticks = scaled_phase_ticks(COCKING_NOMINAL_TICKS, input.speed_multiplier);
    let recovery_ticks = scaled_phase_ticks(RECOVERY_NOMINAL_TICKS, input.speed_multiplier);
    let damage_per_shot = input.damage_per_hit * input.power_multiplier;

    let mut builder = TimelineBuilder::new();

    if input.reload_enabled {
        builder.push_block(EventKind::Reload, RELOAD_TICKS);
    }
    builder.push_block(EventKind::Cast, cocking_ticks);

    for shot in 1..=input.magazine_size {
        let first_of_volley = (shot - 1) % BLASTER_VOLLEY_SIZE == 0;
        if !first_of_volley {
            builder.push_block(EventKind::Interval, INTRA_VOLLEY_TICKS);
        }

        builder.push_fire(shot, damage_per_shot);

        let end_of_volley = shot % BLASTER_VOLLEY_SIZE == 0;
        let ammo_left = shot < input.magazine_size;
        if end_of_volley && ammo_left {
            builder.push_block(EventKind::Recovery, recovery_ticks);
        }
    }

    let end_tick = builder.end_tick();
    let total_damage = input.magazine_size as f64 * damage_per_shot;
    let sustained_dps = if end_tick > 0 {
        total_damage * TICKS_PER_SECOND as f64 / end_tick as f64
    } else {
        0.0
    };

    CycleResult::from_timeline(builder.finish(), end_tick, total_damage, sustained_dps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_magazine_yields_a_reload_and_cock_only_timeline() {
        let input = NormalizedBlaster {
            damage_per_hit: 7.5,
            power_multiplier: 1.0,
            speed_multiplier: 1.0,
            magazine_size: 0,
            reload_enabled: true,
        };

        let result = run_cycle(&input);
        assert_eq!(result.total_damage, 0.0);
        assert_eq!(result.sustained_dps, 0.0);

        let kinds: Vec<EventKind> = result.timeline.iter().map(|event| event.kind).collect();
        assert_eq!(kinds, vec![EventKind::Reload, EventKind::Cast]);
        assert_eq!(
            result.total_duration_ticks,
            RELOAD_TICKS + COCKING_NOMINAL_TICKS
        );
    }

    #[test]
    fn zero_magazine_without_reload_leaves_only_the_cock() {
        let input = NormalizedBlaster {
            damage_per_hit: 6.0,
            power_multiplier: 1.0,
            speed_multiplier: 1.0,
            magazine_size: 0,
            reload_enabled: false,
        };

        let result = run_cycle(&input);
        assert_eq!(result.total_damage, 0.0);
        let kinds: Vec<EventKind> = result.timeline.iter().map(|event| event.kind).collect();
        assert_eq!(kinds, vec![EventKind::Cast]);
    }
}
