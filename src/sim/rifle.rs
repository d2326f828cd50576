//! Continuous-fire rifle simulator with the chaingun ramp, the two-phase
//! serum buff, and the rocket opener.
//!
//! One cycle is: reload, optional rocket cast, then one magazine of
//! automatic fire — or two magazines under serum, where the second magazine
//! fires at the compounded serum rate with a damage penalty. The chaingun
//! stack counter carries across both magazines and is clamped at use time.

use serde::{Deserialize, Serialize};

use crate::sim::blaster::CapacityMods;
use crate::sim::burst::{
    bullets_in_window, damage_for_bullets, CHAINGUN_MAX_STACKS, CHAINGUN_STACK_PER_SHOT,
};
use crate::sim::metrics::{BurstMetrics, CycleResult, PhaseBreakdown};
use crate::sim::timeline::{seconds_to_ticks, EventKind, TimelineBuilder, TICKS_PER_SECOND};

pub const RIFLE_BASE_DAMAGE: f64 = 19.0;
pub const RIFLE_BASE_RATE: f64 = 9.0;
pub const RIFLE_BASE_MAGAZINE: u32 = 30;
pub const RIFLE_RELOAD_SECONDS: f64 = 1.5;
pub const ROCKET_CAST_SECONDS: f64 = 0.5;
pub const ROCKET_COOLDOWN_SECONDS: f64 = 6.0;
pub const BURST_WINDOW_SECONDS: f64 = 0.5;

pub const SERUM_PASSIVE_RATE: f64 = 1.25;
pub const SERUM_ACTIVE_RATE: f64 = 1.5;
pub const SERUM_DAMAGE_MULTIPLIER: f64 = 0.85;
const SERUM_RELOAD_SECONDS: f64 = 0.0;

/// Each slider step is a +5% real bonus.
const STEP_FRACTION: f64 = 0.05;

/// The rocket's two independent sub-modifiers. Each combination maps to one
/// of four fixed base damage values; the bonuses are not additive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RocketMods {
    /// Split-projectile variant.
    #[serde(default)]
    pub double: bool,
    /// Enlarged splash radius variant.
    #[serde(default)]
    pub radius: bool,
}

/// Base rocket damage for a modifier combination. An explicit four-way
/// lookup so the combination space stays obvious and exhaustively testable.
pub fn rocket_base_damage(mods: RocketMods) -> f64 {
    match (mods.double, mods.radius) {
        (false, false) => 120.0,
        (true, false) => 171.6,
        (false, true) => 144.0,
        (true, true) => 187.2,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RifleParams {
    /// Weapon damage slider, 0–20 steps of +5%.
    pub damage_bonus_pct: u32,
    /// Fire rate slider, 0–20 steps of +5%.
    pub rate_bonus_pct: u32,
    /// Rocket power slider, 0–20 steps of +5%.
    pub ability_power_pct: u32,
    #[serde(default)]
    pub capacity_mods: CapacityMods,
    /// Extra multiplicative capacity bonus, 0–100 percent.
    pub run_speed_capacity_pct: u32,
    pub chaingun_enabled: bool,
    pub serum_enabled: bool,
    pub rocket_enabled: bool,
    #[serde(default)]
    pub rocket_mods: RocketMods,
}

impl Default for RifleParams {
    fn default() -> Self {
        Self {
            damage_bonus_pct: 0,
            rate_bonus_pct: 0,
            ability_power_pct: 0,
            capacity_mods: CapacityMods::default(),
            run_speed_capacity_pct: 0,
            chaingun_enabled: false,
            serum_enabled: false,
            rocket_enabled: true,
            rocket_mods: RocketMods::default(),
        }
    }
}

/// Absolute simulation inputs derived from the slider/toggle parameters.
/// Serum multipliers are NOT folded in here; the simulation applies them
/// per phase.
#[derive(Debug, Clone, Copy, PartialEq)]
struct NormalizedRifle {
    base_damage: f64,
    base_rate: f64,
    magazine_size: u32,
    reload_seconds: f64,
    ability_multiplier: f64,
}

fn normalize(params: &RifleParams) -> NormalizedRifle {
    let capacity = RIFLE_BASE_MAGAZINE as f64
        * params.capacity_mods.multiplier()
        * (1.0 + params.run_speed_capacity_pct as f64 / 100.0);
    NormalizedRifle {
        base_damage: RIFLE_BASE_DAMAGE * (1.0 + params.damage_bonus_pct as f64 * STEP_FRACTION),
        base_rate: RIFLE_BASE_RATE * (1.0 + params.rate_bonus_pct as f64 * STEP_FRACTION),
        magazine_size: capacity.floor() as u32,
        reload_seconds: RIFLE_RELOAD_SECONDS,
        ability_multiplier: 1.0 + params.ability_power_pct as f64 * STEP_FRACTION,
    }
}

/// Magazine size after capacity modifiers and the run-speed bonus, floored.
pub fn magazine_size(params: &RifleParams) -> u32 {
    normalize(params).magazine_size
}

/// Fire rate shown in the summary: the strongest phase's rate.
pub fn effective_rate(params: &RifleParams) -> f64 {
    let input = normalize(params);
    if params.serum_enabled {
        input.base_rate * SERUM_PASSIVE_RATE * SERUM_ACTIVE_RATE
    } else {
        input.base_rate
    }
}

/// Per-shot damage shown in the summary: penalized when serum is active.
pub fn effective_damage_per_shot(params: &RifleParams) -> f64 {
    let input = normalize(params);
    if params.serum_enabled {
        input.base_damage * SERUM_DAMAGE_MULTIPLIER
    } else {
        input.base_damage
    }
}

/// Rate and damage multiplier for one firing phase.
fn phase_profile(input: &NormalizedRifle, serum: bool, phase_index: u32) -> (f64, f64) {
    if !serum {
        return (input.base_rate, 1.0);
    }
    if phase_index == 0 {
        // Phase 1: passive rate bonus only.
        (input.base_rate * SERUM_PASSIVE_RATE, 1.0)
    } else {
        // Phase 2: compounded rate bonus with the damage penalty.
        (
            input.base_rate * SERUM_PASSIVE_RATE * SERUM_ACTIVE_RATE,
            SERUM_DAMAGE_MULTIPLIER,
        )
    }
}

/// Simulate one full rifle cycle.
///
/// `total_damage` and `sustained_dps` count bullet damage only; rocket
/// damage rides on the cast event and in [BurstMetrics::ability_damage].
/// Sustained DPS divides by analytic fire time plus reload time — the
/// rocket cast is excluded from the denominator.
pub fn simulate_rifle_cycle(params: &RifleParams) -> CycleResult {
    run_cycle(params, &normalize(params))
}

fn run_cycle(params: &RifleParams, input: &NormalizedRifle) -> CycleResult {
    let mut builder = TimelineBuilder::new();
    builder.push_block(EventKind::Reload, seconds_to_ticks(input.reload_seconds));

    let rocket_damage = if params.rocket_enabled {
        let damage = rocket_base_damage(params.rocket_mods) * input.ability_multiplier;
        builder.push_cast(seconds_to_ticks(ROCKET_CAST_SECONDS), damage);
        damage
    } else {
        0.0
    };

    let magazines: u32 = if params.serum_enabled { 2 } else { 1 };
    let mut chaingun_stacks: u32 = 0;
    let mut total_bullet_damage = 0.0;
    let mut total_fire_seconds = 0.0;
    let mut total_reload_seconds = 0.0;
    let mut phases = PhaseBreakdown::default();

    for magazine in 0..magazines {
        let (phase_rate, phase_damage_multiplier) =
            phase_profile(input, params.serum_enabled, magazine);
        let interval_ticks = TICKS_PER_SECOND as f64 / phase_rate;

        if magazine > 0 {
            // Serum refills the magazine instantly between phases.
            builder.advance_fractional(SERUM_RELOAD_SECONDS * TICKS_PER_SECOND as f64);
            total_reload_seconds += SERUM_RELOAD_SECONDS;
        }

        let mut phase_bullet_damage = 0.0;
        for shot in 0..input.magazine_size {
            let effective_stacks = if params.chaingun_enabled {
                let clamped = chaingun_stacks.min(CHAINGUN_MAX_STACKS);
                chaingun_stacks += 1;
                clamped
            } else {
                0
            };
            let chaingun_multiplier = 1.0 + effective_stacks as f64 * CHAINGUN_STACK_PER_SHOT;
            let bullet_damage = input.base_damage * phase_damage_multiplier * chaingun_multiplier;

            phase_bullet_damage += bullet_damage;
            builder.push_fire(magazine * input.magazine_size + shot + 1, bullet_damage);

            // The last shot of a phase does not wait out its interval.
            if shot + 1 < input.magazine_size {
                builder.advance_fractional(interval_ticks);
            }
        }

        let phase_seconds = input.magazine_size as f64 / phase_rate;
        total_fire_seconds += phase_seconds;
        total_bullet_damage += phase_bullet_damage;
        if magazine == 0 {
            phases.primary_fire_seconds = phase_seconds;
            phases.primary_bullet_damage = phase_bullet_damage;
        } else {
            phases.boosted_fire_seconds = phase_seconds;
            phases.boosted_bullet_damage = phase_bullet_damage;
        }
    }

    total_reload_seconds += input.reload_seconds;
    let sustained_dps = total_bullet_damage / (total_fire_seconds + total_reload_seconds);

    // Burst is best-case and independent of the cycle above: strongest phase
    // stats, chaingun ramp from a cold stack count.
    let (burst_rate, burst_damage_multiplier) = if params.serum_enabled {
        (
            input.base_rate * SERUM_PASSIVE_RATE * SERUM_ACTIVE_RATE,
            SERUM_DAMAGE_MULTIPLIER,
        )
    } else {
        (input.base_rate, 1.0)
    };
    let window_bullets = bullets_in_window(burst_rate, BURST_WINDOW_SECONDS);
    let burst_bullet_damage = damage_for_bullets(
        input.base_damage * burst_damage_multiplier,
        window_bullets,
        params.chaingun_enabled,
    );

    let end_tick = builder.end_tick();
    let mut result =
        CycleResult::from_timeline(builder.finish(), end_tick, total_bullet_damage, sustained_dps);
    result.burst = Some(BurstMetrics {
        total: rocket_damage + burst_bullet_damage,
        ability_damage: rocket_damage,
        bullet_damage: burst_bullet_damage,
        bullets_in_window: window_bullets,
    });
    result.phases = Some(phases);
    result
}
