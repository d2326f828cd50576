//! Burst-window helpers: how many bullets fit in a short window and what
//! they deal under the chaingun ramp, in closed form.

pub const CHAINGUN_STACK_PER_SHOT: f64 = 0.004;
pub const CHAINGUN_MAX_STACKS: u32 = 100;

const WINDOW_EPSILON: f64 = 1e-9;

/// Bullets landed inside a window of `window_seconds` at `rate` shots/s.
///
/// The first bullet of a burst fires instantly at t=0, so the window holds
/// one more bullet than the interval count: `floor(rate × window) + 1`. The
/// epsilon keeps exact breakpoints (e.g. rate 10 over 0.5 s) from flooring
/// down a bullet.
pub fn bullets_in_window(rate: f64, window_seconds: f64) -> u32 {
    (rate * window_seconds + WINDOW_EPSILON).floor() as u32 + 1
}

/// Total bonus stacks accumulated across `bullets` shots from a cold start.
///
/// Shot i carries min(i-1, cap) stacks, so the sum is triangular up to the
/// cap and linear at the cap rate beyond it.
pub fn chaingun_bonus_stacks(bullets: u32) -> u64 {
    if bullets <= 1 {
        return 0;
    }
    let ramping = (bullets - 1).min(CHAINGUN_MAX_STACKS) as u64;
    let full_ramp_sum = ramping * (ramping + 1) / 2;
    if bullets - 1 <= CHAINGUN_MAX_STACKS {
        return full_ramp_sum;
    }
    let beyond_cap = (bullets - 1 - CHAINGUN_MAX_STACKS) as u64;
    full_ramp_sum + beyond_cap * CHAINGUN_MAX_STACKS as u64
}

/// Damage of `bullets` consecutive shots at `base_damage` each, with the
/// chaingun ramp applied from a cold start when enabled. Zero bullets deal
/// zero damage.
pub fn damage_for_bullets(base_damage: f64, bullets: u32, chaingun_enabled: bool) -> f64 {
    if bullets == 0 {
        return 0.0;
    }
    if !chaingun_enabled {
        return base_damage * bullets as f64;
    }
    let bonus_stacks = chaingun_bonus_stacks(bullets) as f64;
    let bonus_multiplier = 1.0 + (CHAINGUN_STACK_PER_SHOT * bonus_stacks) / bullets as f64;
    base_damage * bullets as f64 * bonus_multiplier
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_count_includes_the_instant_first_shot() {
        assert_eq!(bullets_in_window(9.0, 0.5), 5);
        // Exact breakpoint: 10 × 0.5 = 5 intervals → 6 bullets, not 5.
        assert_eq!(bullets_in_window(10.0, 0.5), 6);
        assert_eq!(bullets_in_window(9.9, 0.5), 5);
    }

    #[test]
    fn bonus_stacks_degenerate_cases() {
        assert_eq!(chaingun_bonus_stacks(0), 0);
        assert_eq!(chaingun_bonus_stacks(1), 0);
        assert_eq!(chaingun_bonus_stacks(2), 1);
    }

    #[test]
    fn bonus_stacks_triangular_below_cap() {
        // 30 bullets → 29 ramping shots → 29×30/2.
        assert_eq!(chaingun_bonus_stacks(30), 29 * 30 / 2);
    }

    #[test]
    fn bonus_stacks_linear_beyond_cap() {
        let cap = CHAINGUN_MAX_STACKS as u64;
        let full = cap * (cap + 1) / 2;
        assert_eq!(chaingun_bonus_stacks(101), full);
        assert_eq!(chaingun_bonus_stacks(101 + 7), full + 7 * cap);
    }

    #[test]
    fn damage_without_chaingun_is_linear() {
        assert_eq!(damage_for_bullets(19.0, 6, false), 114.0);
        assert_eq!(damage_for_bullets(19.0, 0, true), 0.0);
    }
}
