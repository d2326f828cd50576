//! Discrete timeline primitives shared by both weapon simulators.
//!
//! Time is measured in integer ticks at [TICKS_PER_SECOND]. The unit is ten
//! times the source domain's 60 frames/s so that every fixed phase duration
//! (including the 0.03 s intra-volley micro-interval) converts to a whole
//! number of ticks with no floating-point truncation.

use serde::Serialize;

/// Tick rate of the simulation clock. 600 ticks = 1 second.
pub const TICKS_PER_SECOND: u64 = 600;

pub fn ticks_to_seconds(ticks: u64) -> f64 {
    ticks as f64 / TICKS_PER_SECOND as f64
}

pub fn seconds_to_ticks(seconds: f64) -> u64 {
    (seconds * TICKS_PER_SECOND as f64).round() as u64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Reload,
    Cast,
    Fire,
    Interval,
    Recovery,
}

/// One entry in the firing-cycle timeline. Fire events are instantaneous
/// (duration 0) and carry damage bookkeeping; block events carry only a span.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineEvent {
    pub kind: EventKind,
    pub start_tick: u64,
    pub duration_ticks: u64,
    /// 1-based shot number across the whole cycle. Fire events only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_index: Option<u32>,
    /// Damage (or healing) contributed by this event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage: Option<f64>,
    /// Running sum of all fire damage up to and including this event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cumulative_damage: Option<f64>,
}

/// Append-only clock + event accumulator.
///
/// The cursor is kept in f64 ticks: the blaster advances by whole ticks
/// (exact in f64), the rifle by fractional shot intervals. Event start
/// ticks are rounded from the cursor at emission, so rounding never
/// accumulates into drift and starts are non-decreasing.
#[derive(Debug, Default)]
pub struct TimelineBuilder {
    events: Vec<TimelineEvent>,
    cursor_ticks: f64,
    cumulative_damage: f64,
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn current_tick(&self) -> u64 {
        self.cursor_ticks.round() as u64
    }

    /// Emit a block event (reload, cast, interval, recovery) spanning
    /// `duration_ticks` whole ticks and advance the clock past it.
    pub fn push_block(&mut self, kind: EventKind, duration_ticks: u64) {
        self.events.push(TimelineEvent {
            kind,
            start_tick: self.current_tick(),
            duration_ticks,
            sequence_index: None,
            damage: None,
            cumulative_damage: None,
        });
        self.cursor_ticks += duration_ticks as f64;
    }

    /// Emit a cast event that deals ability damage on completion. The damage
    /// is recorded on the event but excluded from the fire-damage running sum.
    pub fn push_cast(&mut self, duration_ticks: u64, damage: f64) {
        self.events.push(TimelineEvent {
            kind: EventKind::Cast,
            start_tick: self.current_tick(),
            duration_ticks,
            sequence_index: None,
            damage: Some(damage),
            cumulative_damage: None,
        });
        self.cursor_ticks += duration_ticks as f64;
    }

    /// Emit an instantaneous fire event and fold its damage into the
    /// cumulative total. Does not advance the clock.
    pub fn push_fire(&mut self, sequence_index: u32, damage: f64) {
        self.cumulative_damage += damage;
        self.events.push(TimelineEvent {
            kind: EventKind::Fire,
            start_tick: self.current_tick(),
            duration_ticks: 0,
            sequence_index: Some(sequence_index),
            damage: Some(damage),
            cumulative_damage: Some(self.cumulative_damage),
        });
    }

    /// Advance the clock by a fractional number of ticks without emitting an
    /// event (rifle shot spacing).
    pub fn advance_fractional(&mut self, ticks: f64) {
        self.cursor_ticks += ticks;
    }

    pub fn cumulative_damage(&self) -> f64 {
        self.cumulative_damage
    }

    /// Tick at which the last emitted event ends (= current clock position).
    pub fn end_tick(&self) -> u64 {
        self.current_tick()
    }

    pub fn finish(self) -> Vec<TimelineEvent> {
        self.events
    }
}

pub fn serialize_timeline_json(events: &[TimelineEvent]) -> Result<String, serde_json::Error> {
    serde_json::to_string(events)
}
