//! Procedural playing field
//!
//! The ground is generated in fixed-width chunks just ahead of the flying
//! item. Chunks are contiguous, never overlap, and never change once
//! created. The number of retained chunks is capped so a runaway item
//! cannot grow the world without bound.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::state::GameEvent;
use crate::distance_meters;
use crate::error::FieldError;
use crate::tuning::{FieldTuning, RunTuning};

/// Static collision rectangle under a chunk
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundSurface {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl GroundSurface {
    pub fn new(left: f32, right: f32, top: f32, thickness: f32) -> Result<Self, FieldError> {
        let width = right - left;
        if !left.is_finite() || !right.is_finite() || !top.is_finite() || !thickness.is_finite()
        {
            return Err(FieldError::NonFinite { start: left, width });
        }
        if thickness <= 0.0 {
            return Err(FieldError::Degenerate(thickness));
        }
        if right <= left {
            return Err(FieldError::PrecisionLost { start: left, width });
        }
        Ok(Self {
            left,
            right,
            top,
            bottom: top + thickness,
        })
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }
}

/// Distance tick on the ground
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceMarker {
    pub x: f32,
    /// Meters from the throw line; `None` at or behind it
    pub meters: Option<i32>,
}

impl DistanceMarker {
    pub fn label(&self) -> Option<String> {
        self.meters.map(|m| format!("{m}m"))
    }
}

/// One generated segment of the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChunk {
    /// Sequence number; chunk `i` starts at `i * chunk_width`
    pub index: u64,
    pub start_x: f32,
    pub end_x: f32,
    /// `None` if the surface could not be built
    pub ground: Option<GroundSurface>,
    pub markers: Vec<DistanceMarker>,
}

/// Generates and retains field chunks ahead of a moving x position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldGenerator {
    chunks: VecDeque<FieldChunk>,
    right_edge: f32,
    next_index: u64,
    chunk_width: f32,
    lookahead: u32,
    max_chunks: usize,
    marker_spacing: f32,
    ground_top: f32,
    ground_thickness: f32,
    evict_behind: bool,
    throw_line_x: f32,
    pixels_per_meter: f32,
    cap_reported: bool,
}

impl FieldGenerator {
    /// Empty field; call `ensure_generated` to populate it
    pub fn new(field: &FieldTuning, run: &RunTuning) -> Self {
        Self {
            chunks: VecDeque::with_capacity(field.max_chunks.min(64)),
            right_edge: 0.0,
            next_index: 0,
            chunk_width: field.chunk_width,
            lookahead: field.lookahead_chunks,
            max_chunks: field.max_chunks,
            marker_spacing: field.marker_spacing,
            ground_top: field.ground_top,
            ground_thickness: field.ground_thickness,
            evict_behind: field.evict_behind,
            throw_line_x: run.throw_line_x,
            pixels_per_meter: run.pixels_per_meter,
            cap_reported: false,
        }
    }

    /// Make sure ground exists up to `lookahead` chunks past the chunk
    /// containing `object_x`. Returns the number of chunks created.
    pub fn ensure_generated(&mut self, object_x: f32, events: &mut Vec<GameEvent>) -> usize {
        if !object_x.is_finite() {
            log::warn!("Ignoring field extension for non-finite x={}", object_x);
            return 0;
        }

        let object_chunk = (object_x / self.chunk_width).floor();
        let target_edge = self.chunk_width * (object_chunk + self.lookahead as f32 + 1.0);
        let mut created = 0;

        while self.right_edge < target_edge {
            if self.chunks.len() >= self.max_chunks && !self.evict_oldest(object_chunk, events) {
                if !self.cap_reported {
                    log::warn!(
                        "Field generation cap of {} chunks reached at x={}",
                        self.max_chunks,
                        self.right_edge
                    );
                    events.push(GameEvent::GenerationCapReached {
                        right_edge: self.right_edge,
                    });
                    self.cap_reported = true;
                }
                break;
            }

            let chunk = self.synthesize(self.next_index);
            if chunk.end_x <= self.right_edge {
                log::error!(
                    "Field generation stalled at x={}: chunk {} does not advance the edge",
                    self.right_edge,
                    chunk.index
                );
                break;
            }

            log::debug!(
                "Field chunk {} created at x={} ({} markers)",
                chunk.index,
                chunk.start_x,
                chunk.markers.len()
            );
            events.push(GameEvent::ChunkGenerated {
                index: chunk.index,
                start_x: chunk.start_x,
            });
            self.right_edge = chunk.end_x;
            self.next_index += 1;
            self.chunks.push_back(chunk);
            created += 1;
        }

        created
    }

    /// Drop the oldest chunk if it lies a full chunk behind the object
    fn evict_oldest(&mut self, object_chunk: f32, events: &mut Vec<GameEvent>) -> bool {
        if !self.evict_behind {
            return false;
        }
        let behind = (object_chunk - 1.0) * self.chunk_width;
        match self.chunks.front() {
            Some(oldest) if oldest.end_x <= behind => {
                let index = oldest.index;
                self.chunks.pop_front();
                log::debug!("Field chunk {} evicted", index);
                events.push(GameEvent::ChunkEvicted { index });
                true
            }
            _ => false,
        }
    }

    /// Build chunk `index`: ground surface plus distance markers
    fn synthesize(&self, index: u64) -> FieldChunk {
        let start_x = index as f32 * self.chunk_width;
        let end_x = (index + 1) as f32 * self.chunk_width;

        let ground = match GroundSurface::new(start_x, end_x, self.ground_top, self.ground_thickness)
        {
            Ok(surface) => Some(surface),
            Err(e) => {
                log::error!("Failed to create ground for chunk {}: {}", index, e);
                None
            }
        };

        let first_slot = (start_x / self.marker_spacing).ceil() as i64;
        let max_markers = (self.chunk_width / self.marker_spacing).ceil() as i64 + 1;
        let mut markers = Vec::new();
        for slot in first_slot..first_slot + max_markers {
            let x = slot as f32 * self.marker_spacing;
            if !(x < end_x) {
                break;
            }
            if x < start_x {
                continue;
            }
            let meters = (x > self.throw_line_x)
                .then(|| distance_meters(x, self.throw_line_x, self.pixels_per_meter));
            markers.push(DistanceMarker { x, meters });
        }

        FieldChunk {
            index,
            start_x,
            end_x,
            ground,
            markers,
        }
    }

    /// Rightmost generated x
    pub fn right_edge(&self) -> f32 {
        self.right_edge
    }

    /// Leftmost retained x
    pub fn left_edge(&self) -> f32 {
        self.chunks.front().map_or(self.right_edge, |c| c.start_x)
    }

    pub fn chunks(&self) -> impl Iterator<Item = &FieldChunk> {
        self.chunks.iter()
    }

    /// Ground surfaces of all retained chunks
    pub fn surfaces(&self) -> impl Iterator<Item = &GroundSurface> {
        self.chunks.iter().filter_map(|c| c.ground.as_ref())
    }

    /// Chunk covering `x`, if retained
    pub fn chunk_at(&self, x: f32) -> Option<&FieldChunk> {
        self.chunks.iter().find(|c| c.start_x <= x && x < c.end_x)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn chunk_width(&self) -> f32 {
        self.chunk_width
    }

    pub fn max_chunks(&self) -> usize {
        self.max_chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn generator(field: FieldTuning) -> FieldGenerator {
        FieldGenerator::new(&field, &RunTuning::default())
    }

    fn assert_contiguous(field: &FieldGenerator) {
        let chunks: Vec<_> = field.chunks().collect();
        for pair in chunks.windows(2) {
            assert_eq!(pair[0].end_x, pair[1].start_x);
            assert!(pair[0].start_x < pair[1].start_x);
        }
        if let Some(last) = chunks.last() {
            assert_eq!(last.end_x, field.right_edge());
        }
    }

    #[test]
    fn test_initial_seed_covers_three_chunks() {
        let mut field = generator(FieldTuning::default());
        let mut events = Vec::new();
        assert_eq!(field.ensure_generated(0.0, &mut events), 3);
        assert_eq!(field.len(), 3);
        assert_eq!(field.right_edge(), 2400.0);
        assert_eq!(events.len(), 3);
        assert_contiguous(&field);
    }

    #[test]
    fn test_extension_is_idempotent_within_a_chunk() {
        let mut field = generator(FieldTuning::default());
        let mut events = Vec::new();
        field.ensure_generated(0.0, &mut events);
        assert_eq!(field.ensure_generated(799.0, &mut events), 0);
        assert_eq!(field.ensure_generated(800.0, &mut events), 1);
        assert_eq!(field.right_edge(), 3200.0);
    }

    #[test]
    fn test_markers_every_hundred_units_labeled_downrange() {
        let mut field = generator(FieldTuning::default());
        field.ensure_generated(0.0, &mut Vec::new());
        let first = field.chunks().next().expect("first chunk");
        let xs: Vec<f32> = first.markers.iter().map(|m| m.x).collect();
        assert_eq!(xs, [0.0, 100.0, 200.0, 300.0, 400.0, 500.0, 600.0, 700.0]);

        // At or before the throw line: tick only
        assert_eq!(first.markers[0].meters, None);
        assert_eq!(first.markers[3].meters, None);
        assert_eq!(first.markers[3].label(), None);
        // 100px past the line at 20px/m
        assert_eq!(first.markers[4].meters, Some(5));
        assert_eq!(first.markers[4].label().as_deref(), Some("5m"));

        let second = field.chunks().nth(1).expect("second chunk");
        assert_eq!(second.markers[0].x, 800.0);
        assert_eq!(second.markers[0].meters, Some(25));
    }

    #[test]
    fn test_cap_stops_generation() {
        let mut field = generator(FieldTuning {
            max_chunks: 5,
            ..Default::default()
        });
        let mut events = Vec::new();
        field.ensure_generated(0.0, &mut events);
        field.ensure_generated(100_000.0, &mut events);
        assert_eq!(field.len(), 5);
        assert_eq!(field.right_edge(), 4000.0);
        let caps = events
            .iter()
            .filter(|e| matches!(e, GameEvent::GenerationCapReached { .. }))
            .count();
        assert_eq!(caps, 1);

        // Further calls neither grow nor re-report
        events.clear();
        field.ensure_generated(200_000.0, &mut events);
        assert_eq!(field.len(), 5);
        assert!(events.is_empty());
        assert!(field.chunk_at(5000.0).is_none());
    }

    #[test]
    fn test_evict_behind_keeps_ground_ahead() {
        let mut field = generator(FieldTuning {
            max_chunks: 5,
            evict_behind: true,
            ..Default::default()
        });
        let mut events = Vec::new();
        field.ensure_generated(0.0, &mut events);
        field.ensure_generated(8000.0, &mut events);
        assert!(field.len() <= 5);
        assert!(field.right_edge() >= 8000.0 + 2.0 * 800.0);
        assert!(field.chunk_at(8000.0).is_some());
        assert!(events.iter().any(|e| matches!(e, GameEvent::ChunkEvicted { index: 0 })));
        assert_contiguous(&field);
    }

    #[test]
    fn test_huge_cap_does_not_preallocate() {
        let mut field = generator(FieldTuning {
            max_chunks: usize::MAX,
            ..Default::default()
        });
        assert!(field.is_empty());
        assert_eq!(field.max_chunks(), usize::MAX);
        assert_eq!(field.ensure_generated(0.0, &mut Vec::new()), 3);
    }

    #[test]
    fn test_ground_failure_does_not_stop_generation() {
        let mut field = generator(FieldTuning {
            ground_thickness: f32::NAN,
            ..Default::default()
        });
        assert_eq!(field.ensure_generated(0.0, &mut Vec::new()), 3);
        assert!(field.chunks().all(|c| c.ground.is_none() && !c.markers.is_empty()));
        assert_eq!(field.surfaces().count(), 0);
    }

    #[test]
    fn test_precision_exhaustion_stalls_instead_of_looping() {
        let mut field = generator(FieldTuning {
            chunk_width: 1.0,
            marker_spacing: 1.0,
            ..Default::default()
        });
        field.next_index = 1 << 25;
        field.right_edge = (1u64 << 25) as f32;
        let created = field.ensure_generated(field.right_edge + 1.0, &mut Vec::new());
        assert_eq!(created, 0);
    }

    #[test]
    fn test_ground_surface_validation() {
        assert!(GroundSurface::new(0.0, 800.0, 564.0, 32.0).is_ok());
        assert!(matches!(
            GroundSurface::new(f32::NAN, 800.0, 564.0, 32.0),
            Err(FieldError::NonFinite { .. })
        ));
        assert_eq!(
            GroundSurface::new(0.0, 800.0, 564.0, 0.0),
            Err(FieldError::Degenerate(0.0))
        );
        assert_eq!(
            FieldError::Degenerate(-2.0).to_string(),
            "Degenerate ground thickness -2"
        );
        assert!(matches!(
            GroundSurface::new(5.0, 5.0, 564.0, 32.0),
            Err(FieldError::PrecisionLost { .. })
        ));
    }

    #[test]
    fn test_non_finite_x_is_ignored() {
        let mut field = generator(FieldTuning::default());
        assert_eq!(field.ensure_generated(f32::NAN, &mut Vec::new()), 0);
        assert!(field.is_empty());
    }

    proptest! {
        #[test]
        fn prop_field_stays_contiguous_and_capped(
            steps in prop::collection::vec(0.0f32..5_000.0, 1..40),
            max_chunks in 3usize..25,
            evict_behind in any::<bool>(),
        ) {
            let mut field = generator(FieldTuning {
                max_chunks,
                evict_behind,
                ..Default::default()
            });
            let mut events = Vec::new();
            let mut x = 0.0f32;
            let mut last_edge = field.right_edge();
            field.ensure_generated(x, &mut events);
            for step in steps {
                x += step;
                field.ensure_generated(x, &mut events);
                prop_assert!(field.len() <= max_chunks);
                prop_assert!(field.right_edge() >= last_edge);
                last_edge = field.right_edge();
                let chunks: Vec<_> = field.chunks().collect();
                for pair in chunks.windows(2) {
                    prop_assert_eq!(pair[0].end_x, pair[1].start_x);
                }
            }
        }
    }
}
