//! Projectile model
//!
//! Turns item parameters into a launched body, applies wind while the item
//! is airborne, and decides how each ground contact bounces and slows it.
//! The contact policy is a pure function so it can be tested without a
//! running simulation.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::ArcadeBody;
use super::field::FieldGenerator;
use crate::catalog::SimulationParameters;
use crate::tuning::PhysicsTuning;

/// Bounce coefficients for the two axes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Restitution {
    pub horizontal: f32,
    pub vertical: f32,
}

/// What the launch produced (for logging and events)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub velocity: Vec2,
    pub angular_velocity: f32,
    pub power_jitter: f32,
    pub spin_jitter: f32,
}

/// Result of one airborne step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlightStep {
    /// Impact speed and resulting restitution, if the ground was hit
    pub contact: Option<(f32, Restitution)>,
    /// Horizontal velocity added by wind this step
    pub wind: f32,
    pub at_rest: bool,
}

/// Per-body gravity scale: heavier items fall faster
#[inline]
pub fn gravity_multiplier(mass: f32) -> f32 {
    1.0 + mass * 0.1
}

/// Configure a body from item parameters
pub fn apply_parameters(body: &mut ArcadeBody, params: &SimulationParameters, physics: &PhysicsTuning) {
    body.drag = Vec2::new(params.linear_drag, params.linear_drag * 0.5);
    body.gravity = physics.gravity * gravity_multiplier(params.mass);
    body.size = Vec2::splat(params.sprite_extent);
    body.origin_shift = params.center_of_mass_offset;
    body.angular_drag = params.angular_drag;
    body.restitution = Restitution {
        horizontal: params.bounciness,
        vertical: params.bounciness,
    };
}

/// Launch velocity for an aim angle (degrees) and power. Screen y points down.
#[inline]
pub fn launch_velocity(angle_deg: f32, power: f32, jitter: f32) -> Vec2 {
    let theta = angle_deg.to_radians();
    Vec2::new(theta.cos() * power * jitter, -theta.sin() * power * jitter)
}

/// Configure, aim and release the body
pub fn launch<R: Rng>(
    body: &mut ArcadeBody,
    params: &SimulationParameters,
    angle_deg: f32,
    power: f32,
    physics: &PhysicsTuning,
    rng: &mut R,
) -> Launch {
    apply_parameters(body, params, physics);

    let (lo, hi) = physics.launch_jitter;
    let power_jitter = rng.random_range(lo..=hi);
    let (lo, hi) = physics.spin_jitter;
    let spin_jitter = rng.random_range(lo..=hi);

    body.vel = launch_velocity(angle_deg, power, power_jitter);
    body.angular_velocity = params.angular_velocity * spin_jitter;
    body.enabled = true;
    body.touching_down = false;

    Launch {
        velocity: body.vel,
        angular_velocity: body.angular_velocity,
        power_jitter,
        spin_jitter,
    }
}

/// Horizontal wind impulse for this step.
///
/// Blows only while rising or above the wind altitude, oscillates slowly
/// with simulation time, grows with altitude and with the item's drag.
pub fn wind_impulse(pos_y: f32, vel_y: f32, drag_x: f32, time_ms: f32, physics: &PhysicsTuning) -> f32 {
    if !(vel_y < 0.0 || pos_y < physics.wind_altitude) {
        return 0.0;
    }
    let altitude_factor = 1.0 - pos_y / physics.world_height;
    let drag_effect = drag_x * 10.0;
    (time_ms / physics.wind_period_ms).sin() * physics.wind_strength * altitude_factor * drag_effect
}

/// Ground contact policy.
///
/// Harder impacts bounce more; every contact (including micro-bounces while
/// rolling) bleeds horizontal speed, so bounces decay into a roll and stop.
/// Returns the velocity to separate with and the restitution to use.
pub fn resolve_ground_contact(
    velocity: Vec2,
    bounciness: f32,
    physics: &PhysicsTuning,
) -> (Vec2, Restitution) {
    let bounce_factor =
        physics.impact_bounce_scale * (velocity.y.abs() / physics.impact_reference_speed);
    let restitution = Restitution {
        horizontal: physics.horizontal_restitution,
        vertical: bounciness * (1.0 + bounce_factor),
    };
    let velocity = Vec2::new(velocity.x * physics.ground_friction, velocity.y);
    (velocity, restitution)
}

/// Both velocity components below the threshold while on the ground
#[inline]
pub fn is_at_rest(body: &ArcadeBody, rest_speed: f32) -> bool {
    body.touching_down && body.vel.x.abs() < rest_speed && body.vel.y.abs() < rest_speed
}

/// Advance an airborne item one step: integrate, resolve ground contact,
/// then apply wind if it is still in the air.
pub fn step_flight(
    body: &mut ArcadeBody,
    params: &SimulationParameters,
    field: &FieldGenerator,
    physics: &PhysicsTuning,
    dt: f32,
    time_ms: f32,
) -> FlightStep {
    let mut step = FlightStep::default();

    body.integrate(dt);

    if let Some(contact) = body.ground_overlap(field.surfaces()) {
        let impact_speed = body.vel.y.abs();
        let (velocity, restitution) = resolve_ground_contact(body.vel, params.bounciness, physics);
        body.vel = velocity;
        body.restitution = restitution;
        body.separate(&contact);
        log::debug!(
            "Ground contact at x={:.1}: impact {:.1}, restitution {:.3}",
            body.pos.x,
            impact_speed,
            restitution.vertical
        );
        step.contact = Some((impact_speed, restitution));
    }

    if !body.touching_down {
        step.wind = wind_impulse(body.pos.y, body.vel.y, body.drag.x, time_ms, physics);
        body.vel.x += step.wind;
    }

    step.at_rest = is_at_rest(body, physics.rest_speed);
    step
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, derive_parameters};
    use crate::tuning::{FieldTuning, RunTuning, Tuning};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn params(id: &str) -> SimulationParameters {
        let catalog = Catalog::default();
        derive_parameters(catalog.lookup(id), 100.0)
    }

    fn field() -> FieldGenerator {
        let mut field = FieldGenerator::new(&FieldTuning::default(), &RunTuning::default());
        field.ensure_generated(0.0, &mut Vec::new());
        field
    }

    #[test]
    fn test_hammer_launch_at_45_degrees() {
        let physics = PhysicsTuning::default();
        let hammer = params("hammer");
        for seed in 0..50 {
            let mut body = ArcadeBody::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let launch = launch(&mut body, &hammer, 45.0, 500.0, &physics, &mut rng);

            let nominal = 500.0 * std::f32::consts::FRAC_1_SQRT_2;
            assert!((launch.velocity.x / nominal - 1.0).abs() <= 0.0201);
            assert!((launch.velocity.y / -nominal - 1.0).abs() <= 0.0201);
            // Same jitter on both components
            assert!((launch.velocity.x + launch.velocity.y).abs() < 1e-3);
            assert!((0.95..=1.05).contains(&(launch.angular_velocity / 300.0)));
            assert!(body.enabled);
        }
    }

    #[test]
    fn test_hammer_gravity_multiplier() {
        let physics = PhysicsTuning::default();
        let hammer = params("hammer");
        let mut body = ArcadeBody::default();
        apply_parameters(&mut body, &hammer, &physics);
        // weight 5 -> mass 1.0 -> 1.1x ambient
        assert!((gravity_multiplier(hammer.mass) - 1.1).abs() < 1e-6);
        assert!((body.gravity - 660.0).abs() < 1e-3);
        assert!((body.drag.x - 0.05).abs() < 1e-6);
        assert!((body.drag.y - 0.025).abs() < 1e-6);
        assert_eq!(body.restitution.vertical, 0.15);
        assert!((body.origin_shift.x - 7.0).abs() < 1e-4);
    }

    #[test]
    fn test_jitter_is_unbiased() {
        let physics = PhysicsTuning::default();
        let hammer = params("hammer");
        let mut rng = Pcg32::seed_from_u64(99);
        let n = 2000;
        let mut sum = 0.0;
        for _ in 0..n {
            let mut body = ArcadeBody::default();
            sum += launch(&mut body, &hammer, 30.0, 400.0, &physics, &mut rng).power_jitter;
        }
        assert!((sum / n as f32 - 1.0).abs() < 0.002);
    }

    #[test]
    fn test_resolve_ground_contact() {
        let physics = PhysicsTuning::default();
        let (velocity, restitution) =
            resolve_ground_contact(Vec2::new(100.0, 500.0), 0.15, &physics);
        assert!((velocity.x - 92.0).abs() < 1e-4);
        assert_eq!(velocity.y, 500.0);
        // 0.3 * (500 / 500) = 0.3 extra
        assert!((restitution.vertical - 0.195).abs() < 1e-6);
        assert_eq!(restitution.horizontal, 0.4);

        let (_, gentle) = resolve_ground_contact(Vec2::new(0.0, 0.0), 0.15, &physics);
        assert_eq!(gentle.vertical, 0.15);
    }

    #[test]
    fn test_friction_compounds_per_contact() {
        let physics = PhysicsTuning::default();
        let mut velocity = Vec2::new(100.0, 10.0);
        for _ in 0..10 {
            velocity = resolve_ground_contact(velocity, 0.2, &physics).0;
        }
        assert!((velocity.x - 100.0 * 0.92f32.powi(10)).abs() < 1e-3);
    }

    #[test]
    fn test_wind_only_when_rising_or_high() {
        let physics = PhysicsTuning::default();
        let t = 4712.0; // sin(t/3000) is about 1
        // Low and falling: calm
        assert_eq!(wind_impulse(500.0, 10.0, 0.05, t, &physics), 0.0);
        // Low but rising: blows
        assert!(wind_impulse(500.0, -10.0, 0.05, t, &physics) > 0.0);
        // High and falling: blows
        let high = wind_impulse(100.0, 10.0, 0.05, t, &physics);
        let expected = (t / 3000.0).sin() * 0.15 * (1.0 - 100.0 / 600.0) * 0.5;
        assert!((high - expected).abs() < 1e-6);
        // Stronger higher up
        assert!(wind_impulse(50.0, 10.0, 0.05, t, &physics) > high);
        // No wind at t = 0
        assert_eq!(wind_impulse(100.0, -10.0, 0.05, 0.0, &physics), 0.0);
    }

    #[test]
    fn test_rest_requires_ground_contact() {
        let mut body = ArcadeBody::default();
        body.vel = Vec2::new(1.0, 1.0);
        assert!(!is_at_rest(&body, 5.0));
        body.touching_down = true;
        assert!(is_at_rest(&body, 5.0));
        body.vel.x = 6.0;
        assert!(!is_at_rest(&body, 5.0));
    }

    #[test]
    fn test_flight_lands_and_comes_to_rest() {
        let tuning = Tuning::default();
        let field = field();
        let hammer = params("hammer");
        let mut body = ArcadeBody::new(Vec2::new(320.0, 510.0), Vec2::splat(35.0));
        let mut rng = Pcg32::seed_from_u64(3);
        launch(&mut body, &hammer, 45.0, 500.0, &tuning.physics, &mut rng);

        let mut contacts = 0;
        let mut rested = false;
        for tick in 1..2000u32 {
            let step = step_flight(
                &mut body,
                &hammer,
                &field,
                &tuning.physics,
                crate::consts::SIM_DT,
                crate::ticks_to_ms(tick as u64),
            );
            if step.contact.is_some() {
                contacts += 1;
            }
            if step.at_rest {
                rested = true;
                break;
            }
        }
        assert!(rested);
        assert!(contacts > 1);
        assert!(body.pos.x > 600.0);
        assert!((body.max().y - tuning.field.ground_top).abs() < 0.5);
    }

    #[test]
    fn test_falls_through_where_no_ground_exists() {
        let tuning = Tuning::default();
        let field = field();
        let hammer = params("hammer");
        // Beyond the generated right edge (2400)
        let mut body = ArcadeBody::new(Vec2::new(3000.0, 540.0), Vec2::splat(35.0));
        apply_parameters(&mut body, &hammer, &tuning.physics);
        body.enabled = true;
        for tick in 1..120u64 {
            let step = step_flight(
                &mut body,
                &hammer,
                &field,
                &tuning.physics,
                crate::consts::SIM_DT,
                crate::ticks_to_ms(tick),
            );
            assert!(step.contact.is_none());
            assert!(!step.at_rest);
        }
        assert!(body.pos.y > tuning.physics.world_height);
    }
}
