//! Cottage Olympics - a not-so-serious garden-tool throwing event
//!
//! Core modules:
//! - `sim`: Deterministic simulation (run-up, throw, flight, field generation)
//! - `catalog`: Throwable items and their physical properties
//! - `tuning`: Data-driven game balance
//! - `hud`: Presentation outputs derived from simulation state
//! - `render`: Geometry builders for ground, markers and items

pub mod catalog;
pub mod error;
pub mod hud;
pub mod render;
pub mod sim;
pub mod tuning;

pub use catalog::{Catalog, ItemDefinition, SimulationParameters};
pub use error::{ConfigError, FieldError};
pub use tuning::Tuning;

/// Game configuration constants
///
/// These are the defaults `Tuning::default()` is built from.
pub mod consts {
    /// Fixed simulation timestep (one tick per rendered frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Runner defaults
    pub const RUN_SPEED: f32 = 200.0;
    pub const RUNNER_START_X: f32 = 50.0;
    pub const RUNNER_START_Y: f32 = 520.0;
    /// Where the carried item sits relative to the runner
    pub const CARRY_OFFSET_X: f32 = 20.0;
    pub const CARRY_OFFSET_Y: f32 = -10.0;
    /// Distance is measured from here; reaching it forces the throw
    pub const THROW_LINE_X: f32 = 300.0;
    pub const PIXELS_PER_METER: f32 = 20.0;

    /// Aim (degrees)
    pub const MIN_AIM: f32 = 5.0;
    pub const MAX_AIM: f32 = 85.0;
    pub const INITIAL_AIM: f32 = 45.0;
    pub const AIM_STEP: f32 = 1.0;

    /// Throw power (launch speed, pixels/s)
    pub const MIN_POWER: f32 = 200.0;
    pub const MAX_POWER: f32 = 800.0;
    pub const POWER_STEP: f32 = 50.0;
    pub const INITIAL_POWER: f32 = 500.0;

    /// Field generation
    pub const CHUNK_WIDTH: f32 = 800.0;
    pub const LOOKAHEAD_CHUNKS: u32 = 2;
    pub const MAX_CHUNKS: usize = 20;
    /// Largest cap a tuning file may ask for
    pub const MAX_CHUNKS_LIMIT: usize = 4096;
    pub const MARKER_SPACING: f32 = 100.0;
    pub const GROUND_TOP: f32 = 564.0;
    pub const GROUND_THICKNESS: f32 = 32.0;

    /// Physics
    pub const GRAVITY: f32 = 600.0;
    pub const ITEM_TEXTURE_SIZE: f32 = 100.0;
    /// Both velocity components below this (while grounded) means at rest
    pub const REST_SPEED: f32 = 5.0;
    pub const GROUND_FRICTION: f32 = 0.92;
    pub const IMPACT_BOUNCE_SCALE: f32 = 0.3;
    pub const IMPACT_REFERENCE_SPEED: f32 = 500.0;
    pub const HORIZONTAL_RESTITUTION: f32 = 0.4;
    pub const LAUNCH_JITTER: (f32, f32) = (0.98, 1.02);
    pub const SPIN_JITTER: (f32, f32) = (0.95, 1.05);
    pub const WIND_STRENGTH: f32 = 0.15;
    pub const WIND_PERIOD_MS: f32 = 3000.0;
    /// Wind only blows above this y (or while rising)
    pub const WIND_ALTITUDE: f32 = 400.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// View
    pub const VIEWPORT_WIDTH: f32 = 800.0;
}

/// Whole meters between the throw line and `x` (negative behind the line)
#[inline]
pub fn distance_meters(x: f32, throw_line_x: f32, pixels_per_meter: f32) -> i32 {
    ((x - throw_line_x) / pixels_per_meter).floor() as i32
}

/// Engine clock in milliseconds for a tick count
#[inline]
pub fn ticks_to_ms(ticks: u64) -> f32 {
    (ticks as f64 * consts::SIM_DT as f64 * 1000.0) as f32
}
