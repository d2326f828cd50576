pub mod blaster;
pub mod burst;
pub mod export_csv;
pub mod metrics;
pub mod rifle;
pub mod timeline;

pub use blaster::{simulate_blaster_cycle, BlasterMode, BlasterParams, CapacityMods};
pub use burst::{bullets_in_window, chaingun_bonus_stacks, damage_for_bullets};
pub use metrics::{BurstMetrics, CycleResult, PhaseBreakdown};
pub use rifle::{rocket_base_damage, simulate_rifle_cycle, RifleParams, RocketMods};
pub use timeline::{
    serialize_timeline_json, ticks_to_seconds, EventKind, TimelineBuilder, TimelineEvent,
    TICKS_PER_SECOND,
};
