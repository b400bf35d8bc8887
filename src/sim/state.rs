//! Game state and core simulation types
//!
//! Everything one round of the event needs lives in `GameState`; the
//! per-round player-facing values live in `ThrowState`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::ArcadeBody;
use super::field::FieldGenerator;
use super::projectile::Restitution;
use crate::catalog::{Catalog, ItemDefinition, SimulationParameters};
use crate::distance_meters;
use crate::tuning::Tuning;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Standing at the start, power can be adjusted
    Ready,
    /// Running toward the throw line
    Running,
    /// Item in the air (or bouncing/rolling)
    Flying,
    /// Item at rest, waiting for restart
    Finish,
}

impl GamePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Ready => "READY",
            GamePhase::Running => "RUNNING",
            GamePhase::Flying => "FLYING",
            GamePhase::Finish => "FINISH",
        }
    }
}

/// Stable handle the presentation layer uses to refer to simulated things
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Per-round player-facing state. Only an explicit restart resets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrowState {
    pub phase: GamePhase,
    /// Degrees above horizontal
    pub aim_angle: f32,
    /// Launch speed (pixels/s)
    pub power: f32,
    /// Farthest distance reached this round (meters from the throw line)
    pub max_distance: i32,
    /// Camera has been told to follow the projectile
    pub camera_following: bool,
}

impl ThrowState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            phase: GamePhase::Ready,
            aim_angle: tuning.aim.initial,
            power: tuning.power.initial,
            max_distance: 0,
            camera_following: false,
        }
    }

    /// Power as a whole percentage of the maximum
    pub fn power_percent(&self, max_power: f32) -> u32 {
        (self.power / max_power * 100.0).floor() as u32
    }
}

/// The athlete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Runner {
    pub id: EntityId,
    pub pos: Vec2,
    /// Horizontal speed (pixels/s), zero once the item is released
    pub vel_x: f32,
}

/// The thrown item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub body: ArcadeBody,
    /// Parameters applied at release; `None` while still carried
    pub params: Option<SimulationParameters>,
    pub at_rest: bool,
}

/// Things that happened during a tick, for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PhaseChanged {
        from: GamePhase,
        to: GamePhase,
    },
    Thrown {
        velocity: Vec2,
        angular_velocity: f32,
    },
    GroundContact {
        impact_speed: f32,
        restitution: Restitution,
    },
    /// `Some` = start following that entity, `None` = stop following
    CameraFollow {
        target: Option<EntityId>,
    },
    ChunkGenerated {
        index: u64,
        start_x: f32,
    },
    ChunkEvicted {
        index: u64,
    },
    /// Chunk cap hit; no more ground will appear this round
    GenerationCapReached {
        right_edge: f32,
    },
    /// Restart requested; host should show item selection
    ReturnToSelection,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    /// Fresh generator for the next throw; every call yields a new stream
    pub fn next_rng(&mut self) -> Pcg32 {
        let mixed = self
            .seed
            .wrapping_add(self.stream.wrapping_mul(0x9E37_79B9_7F4A_7C15));
        self.stream += 1;
        Pcg32::seed_from_u64(mixed)
    }
}

/// Complete play-scene state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    /// Active item (read-only for the round)
    pub item: ItemDefinition,
    pub throw: ThrowState,
    pub runner: Runner,
    pub projectile: Projectile,
    pub field: FieldGenerator,
    pub rng_state: RngState,
    /// Engine clock; keeps running across restarts
    pub time_ticks: u64,
    /// Result of the last finished round
    pub final_distance: Option<i32>,
    /// Pending events for the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new round with the given item. Unknown ids fall back to the
    /// catalog default.
    pub fn new(catalog: &Catalog, item_id: &str, tuning: Tuning, seed: u64) -> Self {
        let item = catalog.lookup(item_id).clone();
        let throw = ThrowState::new(&tuning);
        let field = FieldGenerator::new(&tuning.field, &tuning.run);
        let mut state = Self {
            runner: Runner {
                id: EntityId(1),
                pos: tuning.run.runner_start,
                vel_x: 0.0,
            },
            projectile: Projectile {
                id: EntityId(2),
                body: ArcadeBody::default(),
                params: None,
                at_rest: false,
            },
            tuning,
            item,
            throw,
            field,
            rng_state: RngState::new(seed),
            time_ticks: 0,
            final_distance: None,
            events: Vec::new(),
            next_id: 1,
        };
        state.reset_round();
        log::info!(
            "Round ready with {} (seed {})",
            state.item.name,
            state.rng_state.seed
        );
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Explicit restart: reset the round and hand control back to selection
    pub fn restart(&mut self) {
        let from = self.throw.phase;
        log::info!("Restart requested in {}", from.as_str());
        self.events.push(GameEvent::CameraFollow { target: None });
        self.reset_round();
        if from != GamePhase::Ready {
            self.events.push(GameEvent::PhaseChanged {
                from,
                to: GamePhase::Ready,
            });
        }
        self.events.push(GameEvent::ReturnToSelection);
    }

    /// Start a fresh round with another item (selection flow re-entry)
    pub fn select_item(&mut self, catalog: &Catalog, item_id: &str) {
        self.item = catalog.lookup(item_id).clone();
        log::info!("Selected {}", self.item.name);
        self.reset_round();
    }

    /// Rebuild runner, projectile, field and throw state for a new round
    fn reset_round(&mut self) {
        self.throw = ThrowState::new(&self.tuning);
        self.final_distance = None;

        let runner_id = self.next_entity_id();
        let projectile_id = self.next_entity_id();
        self.runner = Runner {
            id: runner_id,
            pos: self.tuning.run.runner_start,
            vel_x: 0.0,
        };

        let extent = self.tuning.physics.item_texture_size * self.item.visual.scale;
        let mut body = ArcadeBody::new(
            self.tuning.run.runner_start + self.tuning.run.carry_offset,
            Vec2::splat(extent),
        );
        body.enabled = false;
        self.projectile = Projectile {
            id: projectile_id,
            body,
            params: None,
            at_rest: false,
        };

        self.field = FieldGenerator::new(&self.tuning.field, &self.tuning.run);
        self.field.ensure_generated(0.0, &mut self.events);
    }

    /// Record a phase change
    pub fn set_phase(&mut self, to: GamePhase) {
        let from = self.throw.phase;
        if from == to {
            return;
        }
        log::info!("Phase {} -> {}", from.as_str(), to.as_str());
        self.throw.phase = to;
        self.events.push(GameEvent::PhaseChanged { from, to });
    }

    /// Distance of the projectile from the throw line right now
    pub fn current_distance(&self) -> i32 {
        distance_meters(
            self.projectile.body.pos.x,
            self.tuning.run.throw_line_x,
            self.tuning.run.pixels_per_meter,
        )
    }

    /// Entity the camera should follow, if any
    pub fn follow_target(&self) -> Option<EntityId> {
        self.throw.camera_following.then_some(self.projectile.id)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
