pub mod preset;

pub use preset::{builtin_presets, load_presets, Preset, DEFAULT_PRESETS_PATH};
