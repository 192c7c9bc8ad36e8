//! Rex Run - a minimalist endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (jump physics, obstacle field, collision)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native wall-clock helper
//! - `settings`: User preferences (HUD, theme, focus behavior)

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
///
/// Simulation units are field units per tick: the core never sees wall-clock
/// time, only discrete steps. The driver paces steps at `SIM_DT`.
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Field dimensions (origin top-left, y grows downward)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 300.0;
    /// Height of the ground band at the bottom of the field
    pub const GROUND_HEIGHT: f32 = 50.0;
    /// Y of the ground line the runner and obstacles stand on
    pub const GROUND_Y: f32 = FIELD_HEIGHT - GROUND_HEIGHT;

    /// Runner geometry; x is fixed for the whole run
    pub const RUNNER_X: f32 = 50.0;
    pub const RUNNER_WIDTH: f32 = 40.0;
    pub const RUNNER_HEIGHT: f32 = 40.0;

    /// Downward acceleration while airborne (units/tick²)
    pub const GRAVITY: f32 = 0.8;
    /// Impulse applied on takeoff (units/tick, negative = up)
    pub const JUMP_VELOCITY: f32 = -15.0;

    /// Obstacle geometry: fixed width, height drawn per spawn
    pub const OBSTACLE_WIDTH: f32 = 20.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 30.0;
    pub const OBSTACLE_MAX_HEIGHT: f32 = 50.0;

    /// Scroll speed before the difficulty ramp (units/tick)
    pub const BASE_SCROLL_SPEED: f32 = 5.0;
    /// One extra unit of speed per this many points
    pub const SPEEDUP_SCORE_STEP: u32 = 5;

    /// Spawn gate period: one spawn attempt per this many ticks
    pub const SPAWN_INTERVAL_TICKS: u32 = 60;
    /// Default spawn-gap bounds (units) below the ramp threshold
    pub const SPAWN_GAP_MIN: f32 = 300.0;
    pub const SPAWN_GAP_MAX: f32 = 600.0;
    /// Gap bounds start shrinking once the score passes this
    pub const RAMP_SCORE_THRESHOLD: u32 = 10;
    /// Units of gap shrink per point of score
    pub const GAP_SHRINK_PER_POINT: f32 = 5.0;
    /// Hard floors the gap bounds never shrink past
    pub const SPAWN_GAP_MIN_FLOOR: f32 = 200.0;
    pub const SPAWN_GAP_MAX_FLOOR: f32 = 400.0;
}
