//! Parameter sweeps over the rifle's slider grid.
//!
//! Answers the "where do the breakpoints sit" questions the interactive UI
//! annotates: which rate-slider positions add a bullet to the 0.5 s burst
//! window, and which damage/rate combination yields the best sustained or
//! burst output for a given loadout.

use rayon::prelude::*;
use serde::Serialize;

use crate::parallel::WorkerPool;
use crate::sim::rifle::{
    simulate_rifle_cycle, RifleParams, BURST_WINDOW_SECONDS, RIFLE_BASE_RATE,
};

pub const SLIDER_MAX_STEPS: u32 = 20;

/// A rate-slider position at which the 0.5 s auto-aim window gains a bullet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateBreakpoint {
    /// Bullets in the window once this breakpoint is reached.
    pub bullets: u32,
    /// Exact slider position (fractional steps) where the count flips.
    pub slider_steps: f64,
    /// Rounded +% label for display (each step is +5%).
    pub percent_label: u32,
    /// Fire rate in shots/s required for this bullet count.
    pub required_rate: f64,
}

/// Breakpoints across the whole rate slider range, serum not applied.
pub fn rate_breakpoints() -> Vec<RateBreakpoint> {
    let min_rate = RIFLE_BASE_RATE;
    let max_rate = RIFLE_BASE_RATE * (1.0 + SLIDER_MAX_STEPS as f64 * 0.05);
    let min_bullets = (min_rate * BURST_WINDOW_SECONDS).floor() as u32 + 1;
    let max_bullets = (max_rate * BURST_WINDOW_SECONDS).floor() as u32 + 1;

    let mut points = Vec::new();
    for bullets in (min_bullets + 1)..=max_bullets {
        let required_rate = (bullets - 1) as f64 / BURST_WINDOW_SECONDS;
        let slider_steps = (required_rate / RIFLE_BASE_RATE - 1.0) / 0.05;
        if slider_steps >= 0.0 && slider_steps <= SLIDER_MAX_STEPS as f64 {
            points.push(RateBreakpoint {
                bullets,
                slider_steps,
                percent_label: (slider_steps * 5.0).round() as u32,
                required_rate,
            });
        }
    }
    points
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub damage_bonus_pct: u32,
    pub rate_bonus_pct: u32,
    pub sustained_dps: f64,
    pub burst_total: f64,
}

/// Evaluate every damage × rate slider combination for the given loadout
/// (toggles and capacity mods are taken from `template`; the two sliders are
/// overridden per grid point). Points come back ranked by sustained DPS,
/// burst as tiebreak. Each evaluation is an independent pure call, so the
/// grid parallelizes trivially.
pub fn sweep_rifle_grid(template: &RifleParams, pool: &WorkerPool) -> Vec<SweepPoint> {
    let grid: Vec<(u32, u32)> = (0..=SLIDER_MAX_STEPS)
        .flat_map(|damage| (0..=SLIDER_MAX_STEPS).map(move |rate| (damage, rate)))
        .collect();

    let mut points: Vec<SweepPoint> = pool.install(|| {
        grid.par_iter()
            .map(|&(damage_bonus_pct, rate_bonus_pct)| {
                let params = RifleParams {
                    damage_bonus_pct,
                    rate_bonus_pct,
                    ..*template
                };
                let result = simulate_rifle_cycle(&params);
                SweepPoint {
                    damage_bonus_pct,
                    rate_bonus_pct,
                    sustained_dps: result.sustained_dps,
                    burst_total: result.burst.map(|b| b.total).unwrap_or(0.0),
                }
            })
            .collect()
    });

    points.sort_by(|a, b| {
        b.sustained_dps
            .partial_cmp(&a.sustained_dps)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(
                b.burst_total
                    .partial_cmp(&a.burst_total)
                    .unwrap_or(std::cmp::Ordering::Equal),
            )
    });
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoints_are_within_slider_range_and_ascending() {
        let points = rate_breakpoints();
        assert!(!points.is_empty());
        let mut last_bullets = 0;
        for point in &points {
            assert!(point.bullets > last_bullets);
            assert!(point.slider_steps >= 0.0 && point.slider_steps <= 20.0);
            last_bullets = point.bullets;
        }
        // Base rate 9/s gives 5 bullets; the first gained bullet is the 6th,
        // needing 10 shots/s = slider 10/9-1 over 0.05 ≈ 2.22 steps.
        assert_eq!(points[0].bullets, 6);
        assert_eq!(points[0].required_rate, 10.0);
    }

    #[test]
    fn grid_is_ranked_by_sustained_dps() {
        let points = sweep_rifle_grid(&RifleParams::default(), &WorkerPool::default());
        assert_eq!(points.len(), 21 * 21);
        for pair in points.windows(2) {
            assert!(pair[0].sustained_dps >= pair[1].sustained_dps);
        }
        // Maxed sliders dominate the sustained ranking.
        assert_eq!(points[0].damage_bonus_pct, 20);
        assert_eq!(points[0].rate_bonus_pct, 20);
    }
}
