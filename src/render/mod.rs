//! Frame geometry
//!
//! Turns simulation state into colored triangles and text labels in world
//! space. Uploading and drawing them is the host's business.

pub mod shapes;
pub mod vertex;

use glam::Vec2;

pub use vertex::{Vertex, as_bytes, colors};

use crate::hud::AimIndicator;
use crate::sim::{FieldChunk, GamePhase, GameState};

/// Text to draw at a world position
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub pos: Vec2,
    pub text: String,
}

/// Everything visible in one frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub vertices: Vec<Vertex>,
    pub labels: Vec<TextLabel>,
}

/// Ground and marker geometry for one chunk.
///
/// Markers stand on the chunk's ground, or on `default_top` when the
/// chunk has no surface.
pub fn chunk_geometry(chunk: &FieldChunk, default_top: f32, frame: &mut Frame) {
    if let Some(ground) = &chunk.ground {
        frame.vertices.extend(shapes::ground(ground));
    }
    let top = chunk.ground.map_or(default_top, |g| g.top);
    for marker in &chunk.markers {
        frame.vertices.extend(shapes::marker_tick(marker, top));
        if let Some(text) = marker.label() {
            frame.labels.push(TextLabel {
                pos: Vec2::new(marker.x, top + 16.0),
                text,
            });
        }
    }
}

/// Build the frame for the horizontal window starting at `scroll_x`
pub fn build_frame(state: &GameState, scroll_x: f32) -> Frame {
    let mut frame = Frame::default();
    let view_right = scroll_x + state.tuning.view.viewport_width;
    let ground_top = state.tuning.field.ground_top;

    for chunk in state
        .field
        .chunks()
        .filter(|c| c.end_x > scroll_x && c.start_x < view_right)
    {
        chunk_geometry(chunk, ground_top, &mut frame);
    }

    let line_x = state.tuning.run.throw_line_x;
    if (scroll_x..=view_right).contains(&line_x) {
        frame.vertices.extend(shapes::line(
            Vec2::new(line_x, ground_top),
            Vec2::new(line_x, ground_top - 40.0),
            3.0,
            colors::THROW_LINE,
        ));
    }

    // Runner: body plus head
    let runner = state.runner.pos;
    frame.vertices.extend(shapes::rect(
        runner - Vec2::new(10.0, 20.0),
        runner + Vec2::new(10.0, 44.0),
        colors::RUNNER,
    ));
    frame.vertices.extend(shapes::circle(
        runner - Vec2::new(0.0, 30.0),
        10.0,
        colors::RUNNER_HEAD,
        12,
    ));

    let body = &state.projectile.body;
    frame.vertices.extend(shapes::item(
        &state.item.visual,
        state.tuning.physics.item_texture_size,
        body.pos,
        body.rotation,
    ));

    let aim = AimIndicator::from_state(state);
    if aim.visible {
        frame
            .vertices
            .extend(shapes::aim_arrow(aim.origin, aim.rotation, aim.scale_x));
    }

    if let (GamePhase::Finish, Some(distance)) = (state.throw.phase, state.final_distance) {
        frame.labels.push(TextLabel {
            pos: body.pos - Vec2::new(0.0, 40.0),
            text: format!("{distance}m"),
        });
    }

    frame
}
