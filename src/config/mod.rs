// ==========================================
// Breather Advisor - Configuration Layer
// ==========================================

pub mod global;

pub use global::{
    ConfigPatch, GlobalConfig, Overrides, DEFAULT_MAX_AMBIENT_F, DEFAULT_MIN_AMBIENT_F,
    DEFAULT_SAFETY_FACTOR,
};
