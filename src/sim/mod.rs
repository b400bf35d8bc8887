//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Simulation time from the tick counter, never the wall clock
//! - No rendering or platform dependencies

pub mod body;
pub mod camera;
pub mod field;
pub mod projectile;
pub mod state;
pub mod tick;

pub use body::ArcadeBody;
pub use camera::{CameraFollow, FollowCamera};
pub use field::{DistanceMarker, FieldChunk, FieldGenerator, GroundSurface};
pub use projectile::{Restitution, resolve_ground_contact};
pub use state::{EntityId, GameEvent, GamePhase, GameState, ThrowState};
pub use tick::{TickInput, autopilot_input, tick};
