//! Presentation outputs
//!
//! Everything a HUD needs to draw, derived from `GameState` without
//! touching it. Text matches the in-game prompts and controls panel.

use glam::Vec2;

use crate::sim::{EntityId, GamePhase, GameState};

pub const TITLE: &str = "COTTAGE OLYMPICS";

/// One-line instruction shown for each phase
pub fn prompt(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Ready => "Press SPACE to start running!",
        GamePhase::Running => {
            "Aim with UP/DOWN, adjust power with LEFT/RIGHT, press SPACE to throw!"
        }
        GamePhase::Flying => "Watch it fly!",
        GamePhase::Finish => "Press R to restart",
    }
}

/// The four lines of the controls panel
pub fn control_hints(phase: GamePhase, power_percent: u32, score: i32) -> [String; 4] {
    match phase {
        GamePhase::Ready => [
            "• SPACE: Start running".to_string(),
            "• LEFT/RIGHT: Adjust power".to_string(),
            format!("• Power: {power_percent}%"),
            "• R: Restart game anytime".to_string(),
        ],
        GamePhase::Running => [
            "• UP/DOWN: Adjust angle".to_string(),
            "• LEFT/RIGHT: Adjust power".to_string(),
            "• SPACE: Stop and throw".to_string(),
            "• R: Restart game anytime".to_string(),
        ],
        GamePhase::Flying => [
            "• Watch your item fly!".to_string(),
            "• Physics affects trajectory".to_string(),
            "• Camera follows the throw".to_string(),
            "• R: Restart game anytime".to_string(),
        ],
        GamePhase::Finish => [
            "• R: Restart game".to_string(),
            format!("• Your score: {score}m"),
            "• Can you do better?".to_string(),
            "• Try another item!".to_string(),
        ],
    }
}

/// Aim arrow drawn at the carried item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimIndicator {
    pub visible: bool,
    pub origin: Vec2,
    /// Radians, screen space (negative = pointing up)
    pub rotation: f32,
    /// Horizontal stretch of the arrow sprite
    pub scale_x: f32,
}

impl AimIndicator {
    pub fn from_state(state: &GameState) -> Self {
        let throw = &state.throw;
        Self {
            visible: matches!(throw.phase, GamePhase::Ready | GamePhase::Running),
            origin: state.projectile.body.pos,
            rotation: -throw.aim_angle.to_radians(),
            scale_x: throw.power / state.tuning.power.max * 2.0,
        }
    }
}

/// Snapshot of everything the HUD shows this frame
#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    pub phase: GamePhase,
    pub item_name: String,
    /// Degrees
    pub angle: f32,
    pub power_percent: u32,
    /// Current distance from the throw line (meters, may be negative)
    pub distance: i32,
    /// Farthest distance this round
    pub best_distance: i32,
    pub camera_follow: Option<EntityId>,
    pub prompt: &'static str,
    pub controls: [String; 4],
    pub aim: AimIndicator,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        let throw = &state.throw;
        let power_percent = throw.power_percent(state.tuning.power.max);
        let score = state.final_distance.unwrap_or(throw.max_distance);
        Self {
            phase: throw.phase,
            item_name: state.item.name.clone(),
            angle: throw.aim_angle,
            power_percent,
            distance: state.current_distance(),
            best_distance: throw.max_distance,
            camera_follow: state.follow_target(),
            prompt: prompt(throw.phase),
            controls: control_hints(throw.phase, power_percent, score),
            aim: AimIndicator::from_state(state),
        }
    }

    /// Status line for text output
    pub fn status_line(&self) -> String {
        format!(
            "[{}] {} | Angle: {:.0}° | Power: {}% | Distance: {}m",
            self.phase.as_str(),
            self.item_name,
            self.angle,
            self.power_percent,
            self.best_distance
        )
    }
}
