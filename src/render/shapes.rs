//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors};
use crate::catalog::{ItemVisual, ShapePart};
use crate::sim::{DistanceMarker, GroundSurface};

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Two triangles covering an axis-aligned rectangle
pub fn rect(min: Vec2, max: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    quad([min, Vec2::new(max.x, min.y), max, Vec2::new(min.x, max.y)], color)
}

/// Two triangles for four corners in winding order
pub fn quad(corners: [Vec2; 4], color: [f32; 4]) -> Vec<Vertex> {
    let [a, b, c, d] = corners;
    [a, b, c, a, c, d]
        .iter()
        .map(|p| Vertex::new(p.x, p.y, color))
        .collect()
}

/// Thick line segment
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x) * (width * 0.5);
    quad([from + perp, to + perp, to - perp, from - perp], color)
}

/// Convex polygon as a triangle fan
pub fn polygon(points: &[Vec2], color: [f32; 4]) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }
    let mut vertices = Vec::with_capacity((points.len() - 2) * 3);
    let first = points[0];
    for pair in points[1..].windows(2) {
        vertices.push(Vertex::new(first.x, first.y, color));
        vertices.push(Vertex::new(pair[0].x, pair[0].y, color));
        vertices.push(Vertex::new(pair[1].x, pair[1].y, color));
    }
    vertices
}

/// Ground slab: grass strip on top of soil
pub fn ground(surface: &GroundSurface) -> Vec<Vertex> {
    let grass_depth = 6.0_f32.min(surface.bottom - surface.top);
    let mut vertices = rect(
        Vec2::new(surface.left, surface.top),
        Vec2::new(surface.right, surface.bottom),
        colors::SOIL,
    );
    vertices.extend(rect(
        Vec2::new(surface.left, surface.top),
        Vec2::new(surface.right, surface.top + grass_depth),
        colors::GRASS,
    ));
    vertices
}

/// Vertical tick standing on the ground at a marker
pub fn marker_tick(marker: &DistanceMarker, ground_top: f32) -> Vec<Vertex> {
    let height = if marker.meters.is_some() { 20.0 } else { 10.0 };
    line(
        Vec2::new(marker.x, ground_top),
        Vec2::new(marker.x, ground_top - height),
        2.0,
        colors::MARKER,
    )
}

/// Item silhouette.
///
/// Parts are authored in texture space (`texture_size` square, y down);
/// they are scaled by the item's visual scale, rotated by `rotation_deg`
/// around the texture center, and placed at `pos`.
pub fn item(visual: &ItemVisual, texture_size: f32, pos: Vec2, rotation_deg: f32) -> Vec<Vertex> {
    let half = Vec2::splat(texture_size * 0.5);
    let rot = Vec2::from_angle(rotation_deg.to_radians());
    let to_world = |p: Vec2| pos + rot.rotate((p - half) * visual.scale);

    if visual.parts.is_empty() {
        let h = texture_size * 0.5;
        let corners = [
            Vec2::new(-h, -h),
            Vec2::new(h, -h),
            Vec2::new(h, h),
            Vec2::new(-h, h),
        ];
        return quad(corners.map(|c| to_world(c + half)), visual.tint);
    }

    let mut vertices = Vec::new();
    for part in &visual.parts {
        match part {
            ShapePart::Rect { min, size, color } => {
                let corners = [
                    *min,
                    *min + Vec2::new(size.x, 0.0),
                    *min + *size,
                    *min + Vec2::new(0.0, size.y),
                ];
                vertices.extend(quad(corners.map(to_world), *color));
            }
            ShapePart::Polygon { points, color } => {
                let points: Vec<Vec2> = points.iter().map(|p| to_world(*p)).collect();
                vertices.extend(polygon(&points, *color));
            }
            ShapePart::Circle {
                center,
                radius,
                color,
            } => {
                vertices.extend(circle(to_world(*center), radius * visual.scale, *color, 12));
            }
        }
    }
    vertices
}

/// Aim arrow: shaft plus head, pointing along `rotation` (radians, y down)
pub fn aim_arrow(origin: Vec2, rotation: f32, scale_x: f32) -> Vec<Vertex> {
    let dir = Vec2::from_angle(rotation);
    let perp = Vec2::new(-dir.y, dir.x);
    let length = 40.0 * scale_x;
    let tip = origin + dir * length;
    let head_base = origin + dir * (length - 10.0).max(0.0);

    let mut vertices = line(origin, head_base, 4.0, colors::AIM_ARROW);
    vertices.extend(polygon(
        &[tip, head_base + perp * 7.0, head_base - perp * 7.0],
        colors::AIM_ARROW,
    ));
    vertices
}
