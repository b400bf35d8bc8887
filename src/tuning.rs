//! Data-driven game balance
//!
//! Every number the play scene uses, grouped by concern. Loadable from
//! JSON; missing sections and fields fall back to the defaults in `consts`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Run-up and distance measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunTuning {
    /// Runner speed (pixels/s)
    pub speed: f32,
    pub runner_start: Vec2,
    /// Carried item position relative to the runner
    pub carry_offset: Vec2,
    pub throw_line_x: f32,
    pub pixels_per_meter: f32,
}

impl Default for RunTuning {
    fn default() -> Self {
        Self {
            speed: RUN_SPEED,
            runner_start: Vec2::new(RUNNER_START_X, RUNNER_START_Y),
            carry_offset: Vec2::new(CARRY_OFFSET_X, CARRY_OFFSET_Y),
            throw_line_x: THROW_LINE_X,
            pixels_per_meter: PIXELS_PER_METER,
        }
    }
}

/// A stepped, clamped input range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRange {
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub initial: f32,
}

impl StepRange {
    /// Step up or down by whole steps, never leaving `[min, max]`.
    ///
    /// A step that would overshoot is refused, so the value always stays a
    /// whole number of steps away from `initial`.
    pub fn stepped(&self, value: f32, steps: i32) -> f32 {
        let mut value = value;
        let dir = steps.signum() as f32;
        for _ in 0..steps.unsigned_abs() {
            let next = value + dir * self.step;
            if next < self.min || next > self.max {
                break;
            }
            value = next;
        }
        value
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        let invalid = |reason: String| Err(ConfigError::Invalid { field, reason });
        if !(self.step > 0.0) {
            return invalid(format!("step must be positive ({})", self.step));
        }
        if !(self.min <= self.initial && self.initial <= self.max) {
            return invalid(format!(
                "initial {} must lie within [{}, {}]",
                self.initial, self.min, self.max
            ));
        }
        Ok(())
    }
}

/// Field generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldTuning {
    pub chunk_width: f32,
    /// Chunks kept generated ahead of the projectile's chunk
    pub lookahead_chunks: u32,
    pub max_chunks: usize,
    pub marker_spacing: f32,
    /// y of the ground's top surface
    pub ground_top: f32,
    pub ground_thickness: f32,
    /// Evict chunks well behind the projectile instead of stopping at the cap
    pub evict_behind: bool,
}

impl Default for FieldTuning {
    fn default() -> Self {
        Self {
            chunk_width: CHUNK_WIDTH,
            lookahead_chunks: LOOKAHEAD_CHUNKS,
            max_chunks: MAX_CHUNKS,
            marker_spacing: MARKER_SPACING,
            ground_top: GROUND_TOP,
            ground_thickness: GROUND_THICKNESS,
            evict_behind: false,
        }
    }
}

/// Projectile physics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    /// Ambient gravity (pixels/s^2)
    pub gravity: f32,
    pub item_texture_size: f32,
    pub rest_speed: f32,
    /// Horizontal velocity multiplier per ground contact
    pub ground_friction: f32,
    pub impact_bounce_scale: f32,
    pub impact_reference_speed: f32,
    pub horizontal_restitution: f32,
    pub launch_jitter: (f32, f32),
    pub spin_jitter: (f32, f32),
    pub wind_strength: f32,
    pub wind_period_ms: f32,
    pub wind_altitude: f32,
    pub world_height: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            item_texture_size: ITEM_TEXTURE_SIZE,
            rest_speed: REST_SPEED,
            ground_friction: GROUND_FRICTION,
            impact_bounce_scale: IMPACT_BOUNCE_SCALE,
            impact_reference_speed: IMPACT_REFERENCE_SPEED,
            horizontal_restitution: HORIZONTAL_RESTITUTION,
            launch_jitter: LAUNCH_JITTER,
            spin_jitter: SPIN_JITTER,
            wind_strength: WIND_STRENGTH,
            wind_period_ms: WIND_PERIOD_MS,
            wind_altitude: WIND_ALTITUDE,
            world_height: WORLD_HEIGHT,
        }
    }
}

/// Camera/view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewTuning {
    pub viewport_width: f32,
}

impl Default for ViewTuning {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
        }
    }
}

/// Complete play-scene configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub run: RunTuning,
    pub aim: StepRange,
    pub power: StepRange,
    pub field: FieldTuning,
    pub physics: PhysicsTuning,
    pub view: ViewTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            run: RunTuning::default(),
            aim: StepRange {
                min: MIN_AIM,
                max: MAX_AIM,
                step: AIM_STEP,
                initial: INITIAL_AIM,
            },
            power: StepRange {
                min: MIN_POWER,
                max: MAX_POWER,
                step: POWER_STEP,
                initial: INITIAL_POWER,
            },
            field: FieldTuning::default(),
            physics: PhysicsTuning::default(),
            view: ViewTuning::default(),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning file
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check ranges the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value > 0.0 && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be positive and finite ({value})"),
                })
            }
        }
        fn jitter(field: &'static str, (lo, hi): (f32, f32)) -> Result<(), ConfigError> {
            if lo > 0.0 && lo <= 1.0 && 1.0 <= hi {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("range [{lo}, {hi}] must be positive and contain 1.0"),
                })
            }
        }

        self.aim.validate("aim")?;
        self.power.validate("power")?;
        if self.aim.min < 0.0 || self.aim.max > 90.0 {
            return Err(ConfigError::Invalid {
                field: "aim",
                reason: format!("[{}, {}] must stay within [0, 90]", self.aim.min, self.aim.max),
            });
        }
        positive("power.min", self.power.min)?;
        positive("run.speed", self.run.speed)?;
        positive("run.pixels_per_meter", self.run.pixels_per_meter)?;
        positive("field.chunk_width", self.field.chunk_width)?;
        positive("field.marker_spacing", self.field.marker_spacing)?;
        positive("field.ground_thickness", self.field.ground_thickness)?;
        if self.field.max_chunks > MAX_CHUNKS_LIMIT {
            return Err(ConfigError::Invalid {
                field: "field.max_chunks",
                reason: format!(
                    "{} exceeds the limit of {}",
                    self.field.max_chunks, MAX_CHUNKS_LIMIT
                ),
            });
        }
        if self.field.max_chunks <= self.field.lookahead_chunks as usize {
            return Err(ConfigError::Invalid {
                field: "field.max_chunks",
                reason: format!(
                    "{} cannot hold the initial {} chunks",
                    self.field.max_chunks,
                    self.field.lookahead_chunks + 1
                ),
            });
        }
        positive("physics.gravity", self.physics.gravity)?;
        positive("physics.item_texture_size", self.physics.item_texture_size)?;
        positive("physics.rest_speed", self.physics.rest_speed)?;
        positive("physics.impact_reference_speed", self.physics.impact_reference_speed)?;
        positive("physics.wind_period_ms", self.physics.wind_period_ms)?;
        positive("physics.world_height", self.physics.world_height)?;
        if !(0.0..=1.0).contains(&self.physics.ground_friction) {
            return Err(ConfigError::Invalid {
                field: "physics.ground_friction",
                reason: format!("{} must be within [0, 1]", self.physics.ground_friction),
            });
        }
        jitter("physics.launch_jitter", self.physics.launch_jitter)?;
        jitter("physics.spin_jitter", self.physics.spin_jitter)?;
        positive("view.viewport_width", self.view.viewport_width)?;
        Ok(())
    }
}
