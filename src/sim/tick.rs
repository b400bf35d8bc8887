//! Fixed timestep simulation tick
//!
//! Drives the play state machine: READY -> RUNNING -> FLYING -> FINISH, with
//! restart honored from any phase.

use super::projectile::{launch, step_flight};
use super::state::{GameEvent, GamePhase, GameState};
use crate::catalog::derive_parameters;
use crate::ticks_to_ms;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Start running (one-shot)
    pub start: bool,
    /// Release the item (one-shot)
    pub throw: bool,
    /// Reset the round from any phase (one-shot)
    pub restart: bool,
    /// One power step up (one-shot)
    pub power_up: bool,
    /// One power step down (one-shot)
    pub power_down: bool,
    /// Raise the aim while held
    pub aim_up: bool,
    /// Lower the aim while held
    pub aim_down: bool,
}

impl TickInput {
    /// Drop the one-shot signals, keeping held ones
    pub fn clear_one_shots(&mut self) {
        self.start = false;
        self.throw = false;
        self.restart = false;
        self.power_up = false;
        self.power_down = false;
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.time_ticks += 1;

    // Restart overrides everything else this tick
    if input.restart {
        state.restart();
        return;
    }

    match state.throw.phase {
        GamePhase::Ready => {
            adjust_power(state, input);
            if input.start {
                state.runner.vel_x = state.tuning.run.speed;
                state.set_phase(GamePhase::Running);
            }
        }
        GamePhase::Running => tick_running(state, input, dt),
        GamePhase::Flying => tick_flying(state, dt),
        GamePhase::Finish => {}
    }
}

fn adjust_power(state: &mut GameState, input: &TickInput) {
    let steps = input.power_up as i32 - input.power_down as i32;
    if steps != 0 {
        state.throw.power = state.tuning.power.stepped(state.throw.power, steps);
    }
}

fn tick_running(state: &mut GameState, input: &TickInput, dt: f32) {
    let steps = input.aim_up as i32 - input.aim_down as i32;
    if steps != 0 {
        state.throw.aim_angle = state.tuning.aim.stepped(state.throw.aim_angle, steps);
    }
    adjust_power(state, input);

    state.runner.pos.x += state.runner.vel_x * dt;
    state.projectile.body.pos = state.runner.pos + state.tuning.run.carry_offset;

    let at_line = state.runner.pos.x >= state.tuning.run.throw_line_x;
    if input.throw || at_line {
        if at_line && !input.throw {
            log::info!("Runner reached the throw line, releasing");
        }
        throw_item(state);
    }
}

/// Release the carried item with the current aim and power
fn throw_item(state: &mut GameState) {
    let params = derive_parameters(&state.item, state.tuning.physics.item_texture_size);
    let mut rng = state.rng_state.next_rng();
    let result = launch(
        &mut state.projectile.body,
        &params,
        state.throw.aim_angle,
        state.throw.power,
        &state.tuning.physics,
        &mut rng,
    );
    state.projectile.params = Some(params);
    state.runner.vel_x = 0.0;

    log::info!(
        "Threw {} at {:.0} deg, power {:.0} -> velocity ({:.1}, {:.1})",
        state.item.name,
        state.throw.aim_angle,
        state.throw.power,
        result.velocity.x,
        result.velocity.y
    );
    state.events.push(GameEvent::Thrown {
        velocity: result.velocity,
        angular_velocity: result.angular_velocity,
    });
    state.set_phase(GamePhase::Flying);
}

fn tick_flying(state: &mut GameState, dt: f32) {
    let Some(params) = state.projectile.params else {
        return;
    };

    let step = step_flight(
        &mut state.projectile.body,
        &params,
        &state.field,
        &state.tuning.physics,
        dt,
        ticks_to_ms(state.time_ticks),
    );
    if let Some((impact_speed, restitution)) = step.contact {
        state.events.push(GameEvent::GroundContact {
            impact_speed,
            restitution,
        });
    }

    let distance = state.current_distance();
    state.throw.max_distance = state.throw.max_distance.max(distance);

    let x = state.projectile.body.pos.x;
    if !state.throw.camera_following && x > state.tuning.view.viewport_width / 2.0 {
        state.throw.camera_following = true;
        state.events.push(GameEvent::CameraFollow {
            target: Some(state.projectile.id),
        });
    }

    state.field.ensure_generated(x, &mut state.events);

    if step.at_rest {
        state.projectile.at_rest = true;
        state.final_distance = Some(state.throw.max_distance);
        log::info!(
            "{} came to rest at {}m",
            state.item.name,
            state.throw.max_distance
        );
        state.set_phase(GamePhase::Finish);
    }
}

/// Inputs that play a round unattended: start, steer aim and power toward
/// the targets while running, and let the throw line release the item.
pub fn autopilot_input(state: &GameState, target_angle: f32, target_power: f32) -> TickInput {
    let throw = &state.throw;
    let mut input = TickInput::default();
    match throw.phase {
        GamePhase::Ready => {
            input.start = true;
        }
        GamePhase::Running => {
            let aim_step = state.tuning.aim.step;
            if throw.aim_angle + aim_step <= target_angle {
                input.aim_up = true;
            } else if throw.aim_angle - aim_step >= target_angle {
                input.aim_down = true;
            }
            let power_step = state.tuning.power.step;
            if throw.power + power_step <= target_power {
                input.power_up = true;
            } else if throw.power - power_step >= target_power {
                input.power_down = true;
            }
        }
        GamePhase::Flying | GamePhase::Finish => {}
    }
    input
}
