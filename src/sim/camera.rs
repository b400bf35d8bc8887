//! Camera follow adapter
//!
//! The simulation only decides *when* the camera should follow the thrown
//! item (`GameEvent::CameraFollow`). How it follows belongs to the
//! presentation side; `FollowCamera` is a small horizontal follower that
//! mirrors the classic side-scrolling behavior.

use glam::Vec2;

use super::state::{EntityId, GameEvent};

/// Receiver of follow toggles
pub trait CameraFollow {
    fn start_follow(&mut self, target: EntityId);
    fn stop_follow(&mut self);

    /// Route a simulation event to the follow toggles
    fn handle_event(&mut self, event: &GameEvent) {
        if let GameEvent::CameraFollow { target } = event {
            match target {
                Some(id) => self.start_follow(*id),
                None => self.stop_follow(),
            }
        }
    }
}

/// Horizontally scrolling camera that eases toward its target
#[derive(Debug, Clone)]
pub struct FollowCamera {
    pub scroll_x: f32,
    pub viewport_width: f32,
    /// Fraction of the remaining distance covered per update
    pub lerp: f32,
    /// Keeps the target this far left of center
    pub lead: f32,
    target: Option<EntityId>,
}

impl FollowCamera {
    pub fn new(viewport_width: f32) -> Self {
        Self {
            scroll_x: 0.0,
            viewport_width,
            lerp: 0.9,
            lead: 200.0,
            target: None,
        }
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    /// Ease toward the followed entity's position (no-op when not following)
    pub fn update(&mut self, target_pos: Vec2) {
        if self.target.is_none() {
            return;
        }
        let desired = (target_pos.x + self.lead - self.viewport_width / 2.0).max(0.0);
        self.scroll_x += (desired - self.scroll_x) * self.lerp;
    }

    /// World x at the center of the view
    pub fn midpoint(&self) -> f32 {
        self.scroll_x + self.viewport_width / 2.0
    }
}

impl CameraFollow for FollowCamera {
    fn start_follow(&mut self, target: EntityId) {
        log::debug!("Camera following entity {}", target.0);
        self.target = Some(target);
    }

    fn stop_follow(&mut self) {
        self.target = None;
        self.scroll_x = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_toggles_from_events() {
        let mut camera = FollowCamera::new(800.0);
        camera.handle_event(&GameEvent::CameraFollow {
            target: Some(EntityId(2)),
        });
        assert_eq!(camera.target(), Some(EntityId(2)));
        camera.handle_event(&GameEvent::ReturnToSelection);
        assert_eq!(camera.target(), Some(EntityId(2)));
        camera.handle_event(&GameEvent::CameraFollow { target: None });
        assert_eq!(camera.target(), None);
    }

    #[test]
    fn test_idle_camera_does_not_scroll() {
        let mut camera = FollowCamera::new(800.0);
        camera.update(Vec2::new(5000.0, 300.0));
        assert_eq!(camera.scroll_x, 0.0);
        assert_eq!(camera.midpoint(), 400.0);
    }

    #[test]
    fn test_follow_keeps_target_left_of_center() {
        let mut camera = FollowCamera::new(800.0);
        camera.start_follow(EntityId(2));
        for _ in 0..30 {
            camera.update(Vec2::new(2000.0, 300.0));
        }
        // Target sits `lead` pixels left of the midpoint
        assert!((camera.midpoint() - 2200.0).abs() < 0.5);

        camera.stop_follow();
        assert_eq!(camera.scroll_x, 0.0);
    }
}
