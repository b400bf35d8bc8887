//! Arcade rigid body
//!
//! Axis-aligned body with per-body gravity, linear drag and restitution,
//! resolved against the static ground surfaces of the field. This is the
//! physics service the projectile model drives; the policy deciding how a
//! bounce behaves lives in `projectile`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::field::GroundSurface;
use super::projectile::Restitution;

/// A dynamic axis-aligned body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArcadeBody {
    /// Sprite position (center of the visual)
    pub pos: Vec2,
    pub vel: Vec2,
    /// Collision box size
    pub size: Vec2,
    /// Collision box center relative to `pos`
    pub origin_shift: Vec2,
    /// Linear deceleration per axis (pixels/s^2)
    pub drag: Vec2,
    /// Effective downward acceleration for this body
    pub gravity: f32,
    pub restitution: Restitution,
    /// Degrees
    pub rotation: f32,
    /// Degrees/s
    pub angular_velocity: f32,
    /// Angular deceleration (degrees/s^2)
    pub angular_drag: f32,
    /// Disabled bodies are not integrated (e.g. while carried)
    pub enabled: bool,
    /// Set when the body was pushed out of the ground this step
    pub touching_down: bool,
}

/// Overlap between a body and a ground surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundContact {
    pub surface_top: f32,
    /// How far the body's bottom sank below the surface
    pub penetration: f32,
}

impl ArcadeBody {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            pos,
            size,
            enabled: true,
            ..Default::default()
        }
    }

    /// Collision box center
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.origin_shift
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center() - self.size * 0.5
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center() + self.size * 0.5
    }

    /// Advance velocity, position and rotation by one step
    pub fn integrate(&mut self, dt: f32) {
        self.touching_down = false;
        if !self.enabled {
            return;
        }

        self.vel.y += self.gravity * dt;
        self.vel.x = decelerate(self.vel.x, self.drag.x * dt);
        self.vel.y = decelerate(self.vel.y, self.drag.y * dt);
        self.pos += self.vel * dt;

        self.angular_velocity = decelerate(self.angular_velocity, self.angular_drag * dt);
        self.rotation = (self.rotation + self.angular_velocity * dt) % 360.0;
    }

    /// First ground surface the collision box overlaps
    pub fn ground_overlap<'a>(
        &self,
        surfaces: impl IntoIterator<Item = &'a GroundSurface>,
    ) -> Option<GroundContact> {
        if !self.enabled {
            return None;
        }
        let (min, max) = (self.min(), self.max());
        surfaces
            .into_iter()
            .find(|s| max.x > s.left && min.x < s.right && max.y > s.top && min.y < s.bottom)
            .map(|s| GroundContact {
                surface_top: s.top,
                penetration: max.y - s.top,
            })
    }

    /// Push the body out of the ground and bounce with the current restitution
    pub fn separate(&mut self, contact: &GroundContact) {
        self.pos.y -= contact.penetration;
        if self.vel.y > 0.0 {
            self.vel.y = -self.vel.y * self.restitution.vertical;
        }
        self.touching_down = true;
    }
}

/// Move `value` toward zero by `amount` without crossing it
#[inline]
fn decelerate(value: f32, amount: f32) -> f32 {
    if value - amount > 0.0 {
        value - amount
    } else if value + amount < 0.0 {
        value + amount
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ground() -> GroundSurface {
        GroundSurface::new(0.0, 800.0, 564.0, 32.0).expect("valid surface")
    }

    #[test]
    fn test_decelerate_stops_at_zero() {
        assert_eq!(decelerate(10.0, 3.0), 7.0);
        assert_eq!(decelerate(-10.0, 3.0), -7.0);
        assert_eq!(decelerate(2.0, 3.0), 0.0);
        assert_eq!(decelerate(-2.0, 3.0), 0.0);
        assert_eq!(decelerate(5.0, 0.0), 5.0);
    }

    #[test]
    fn test_disabled_body_does_not_move() {
        let mut body = ArcadeBody::new(Vec2::new(10.0, 10.0), Vec2::splat(20.0));
        body.enabled = false;
        body.gravity = 600.0;
        body.vel = Vec2::new(100.0, 0.0);
        body.integrate(1.0 / 60.0);
        assert_eq!(body.pos, Vec2::new(10.0, 10.0));
        assert!(body.ground_overlap([&ground()]).is_none());
    }

    #[test]
    fn test_gravity_accelerates_downward() {
        let mut body = ArcadeBody::new(Vec2::new(100.0, 100.0), Vec2::splat(20.0));
        body.gravity = 600.0;
        for _ in 0..60 {
            body.integrate(1.0 / 60.0);
        }
        assert!((body.vel.y - 600.0).abs() < 0.01);
        assert!(body.pos.y > 100.0);
    }

    #[test]
    fn test_ground_overlap_uses_shifted_box() {
        let surface = ground();
        // Sprite bottom at 560 would miss, but the box is shifted 7px down
        let mut body = ArcadeBody::new(Vec2::new(100.0, 550.0), Vec2::splat(20.0));
        assert!(body.ground_overlap([&surface]).is_none());
        body.origin_shift = Vec2::new(0.0, 7.0);
        let contact = body.ground_overlap([&surface]).expect("overlap");
        assert!((contact.penetration - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_no_surface_means_no_contact() {
        let surface = ground();
        let body = ArcadeBody::new(Vec2::new(900.0, 570.0), Vec2::splat(20.0));
        assert!(body.ground_overlap([&surface]).is_none());
    }

    #[test]
    fn test_separate_bounces_with_vertical_restitution() {
        let surface = ground();
        let mut body = ArcadeBody::new(Vec2::new(100.0, 560.0), Vec2::splat(20.0));
        body.vel = Vec2::new(50.0, 200.0);
        body.restitution = Restitution {
            horizontal: 0.4,
            vertical: 0.5,
        };
        let contact = body.ground_overlap([&surface]).expect("overlap");
        body.separate(&contact);
        assert!((body.max().y - 564.0).abs() < 1e-3);
        assert!((body.vel.y + 100.0).abs() < 1e-3);
        assert_eq!(body.vel.x, 50.0);
        assert!(body.touching_down);

        // Next integrate clears the flag
        body.integrate(1.0 / 60.0);
        assert!(!body.touching_down);
    }
}
