//! Aggregate metrics derived from a simulated firing cycle.

use serde::Serialize;

use crate::sim::timeline::{ticks_to_seconds, TimelineEvent};

/// Result of one full cycle simulation. Recomputed from scratch on every
/// parameter change; nothing in here is mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleResult {
    pub timeline: Vec<TimelineEvent>,
    /// Tick at which the last event ends.
    pub total_duration_ticks: u64,
    pub total_duration_seconds: f64,
    /// Sum of all fire-event damage. Ability (cast) damage is reported
    /// separately via [BurstMetrics::ability_damage] so that the final fire
    /// event's cumulative damage always equals this field.
    pub total_damage: f64,
    pub sustained_dps: f64,
    /// Best-case short-window output. Rifle only; the blaster model defines
    /// no burst window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub burst: Option<BurstMetrics>,
    /// Per-phase diagnostic split. Rifle only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phases: Option<PhaseBreakdown>,
}

impl CycleResult {
    pub fn from_timeline(
        timeline: Vec<TimelineEvent>,
        end_tick: u64,
        total_damage: f64,
        sustained_dps: f64,
    ) -> Self {
        Self {
            timeline,
            total_duration_ticks: end_tick,
            total_duration_seconds: ticks_to_seconds(end_tick),
            total_damage,
            sustained_dps,
            burst: None,
            phases: None,
        }
    }
}

/// Damage deliverable in the 0.5 s best-case window: one ability hit plus the
/// bullets that fit in the window, ramped from a cold stack count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BurstMetrics {
    pub total: f64,
    pub ability_damage: f64,
    pub bullet_damage: f64,
    pub bullets_in_window: u32,
}

/// Fire-time and damage split between the unbuffed and buffed magazines of a
/// phased cycle. Seconds are analytic (`magazine / rate`), matching the
/// sustained-DPS denominator rather than the rounded timeline.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PhaseBreakdown {
    pub primary_fire_seconds: f64,
    pub primary_bullet_damage: f64,
    pub boosted_fire_seconds: f64,
    pub boosted_bullet_damage: f64,
}

impl PhaseBreakdown {
    pub fn primary_dps(&self) -> f64 {
        if self.primary_fire_seconds > 0.0 {
            self.primary_bullet_damage / self.primary_fire_seconds
        } else {
            0.0
        }
    }

    pub fn boosted_dps(&self) -> f64 {
        if self.boosted_fire_seconds > 0.0 {
            self.boosted_bullet_damage / self.boosted_fire_seconds
        } else {
            0.0
        }
    }
}
