//! Trail geometry - the zig-zag progress trail through path milestones.
//!
//! Progress is measured in path units `p ∈ [0, N-1]`: node 0 is the start of the
//! first path and node `k` is the k-th milestone. Between nodes the trail follows
//! one cubic Bézier per segment. The filled part of the trail is a polyline whose
//! last vertex is the exact curve point at `p`, so a marker drawn with
//! [`TrailGeometry::marker`] sits flush on the fill.

use std::fmt::Write as _;

use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::*;

// ============================================================================
// LAYOUT
// ============================================================================

/// Layout knobs for the trail. Persisted with the progression settings.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(default)]
pub struct TrailConfig {
    pub height: f32,
    pub pad_x: f32,
    pub base_y: f32,
    pub amplitude: f32,
    pub samples_per_segment: usize,
    pub control_fraction: f32,
    pub min_usable_width: f32,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            height: TRAIL_HEIGHT,
            pad_x: TRAIL_PAD_X,
            base_y: TRAIL_BASE_Y,
            amplitude: TRAIL_AMPLITUDE,
            samples_per_segment: TRAIL_SAMPLES_PER_SEGMENT,
            control_fraction: TRAIL_CONTROL_FRACTION,
            min_usable_width: TRAIL_MIN_USABLE_WIDTH,
        }
    }
}

/// Piecewise-linear map from a level index to path units.
/// Level 0 is 0, the k-th milestone is k, anything past the last milestone is its ordinal.
pub fn level_to_units(level: usize, milestones: &[usize]) -> f32 {
    let mut sorted = milestones.to_vec();
    sorted.sort_unstable();
    if level == 0 {
        return 0.0;
    }
    for (i, &m) in sorted.iter().enumerate() {
        if level < m {
            let start = if i == 0 { 0 } else { sorted[i - 1] };
            let t = (level - start) as f32 / (m - start).max(1) as f32;
            return i as f32 + t.clamp(0.0, 1.0);
        }
    }
    sorted.len() as f32
}

// ============================================================================
// CURVE
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BezierSegment {
    pub p0: Vec2,
    pub c1: Vec2,
    pub c2: Vec2,
    pub p1: Vec2,
}

impl BezierSegment {
    /// Smooth segment between two nodes: controls are pushed horizontally toward each other.
    pub fn between(p0: Vec2, p1: Vec2, control_fraction: f32) -> Self {
        let dx = p1.x - p0.x;
        Self {
            p0,
            c1: Vec2::new(p0.x + dx * control_fraction, p0.y),
            c2: Vec2::new(p1.x - dx * control_fraction, p1.y),
            p1,
        }
    }

    /// Closed-form cubic evaluation.
    pub fn point_at(&self, t: f32) -> Vec2 {
        let mt = 1.0 - t;
        self.p0 * (mt * mt * mt)
            + self.c1 * (3.0 * mt * mt * t)
            + self.c2 * (3.0 * mt * t * t)
            + self.p1 * (t * t * t)
    }
}

/// Trail nodes and segments for one container width.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrailGeometry {
    nodes: Vec<Vec2>,
    segments: Vec<BezierSegment>,
    samples_per_segment: usize,
    view_box: Vec2,
}

impl TrailGeometry {
    /// Lay out `node_count` nodes across `width`. A non-positive width yields an empty trail.
    pub fn new(width: f32, node_count: usize, config: &TrailConfig) -> Self {
        let samples_per_segment = config.samples_per_segment.max(1);
        if width <= 0.0 || node_count == 0 {
            return Self { samples_per_segment, ..Self::default() };
        }

        let usable = (width - config.pad_x * 2.0).max(config.min_usable_width);
        let view_box = Vec2::new(width.max(usable + config.pad_x * 2.0), config.height);
        let step = if node_count > 1 { usable / (node_count - 1) as f32 } else { 0.0 };
        let nodes: Vec<Vec2> = (0..node_count)
            .map(|i| {
                let x = config.pad_x + i as f32 * step;
                let y = if i % 2 == 0 {
                    let drop = if i == 0 { 0.0 } else { config.amplitude * TRAIL_EVEN_DROP };
                    config.base_y + drop
                } else {
                    let rise = if i + 2 == node_count {
                        config.amplitude * TRAIL_PENULTIMATE_RISE
                    } else {
                        config.amplitude
                    };
                    config.base_y - rise
                };
                Vec2::new(x, y)
            })
            .collect();
        let segments = nodes
            .windows(2)
            .map(|pair| BezierSegment::between(pair[0], pair[1], config.control_fraction))
            .collect();

        Self { nodes, segments, samples_per_segment, view_box }
    }

    /// Drawing area `(width, height)` that holds every node. Zero for an empty trail.
    pub fn view_box(&self) -> Vec2 {
        self.view_box
    }

    pub fn nodes(&self) -> &[Vec2] {
        &self.nodes
    }

    pub fn segments(&self) -> &[BezierSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Largest meaningful progress value, `N - 1`.
    pub fn max_units(&self) -> f32 {
        self.nodes.len().saturating_sub(1) as f32
    }

    /// Split clamped progress into (segment index, local t).
    fn locate(&self, units: f32) -> (usize, f32) {
        let p = units.clamp(0.0, self.max_units());
        let segment = p.floor();
        (segment as usize, p - segment)
    }

    /// Polyline through every segment, `samples_per_segment` points each.
    pub fn full_polyline(&self) -> Vec<Vec2> {
        self.truncated(self.max_units())
    }

    /// Polyline from node 0 ending exactly at the curve point for `units`.
    /// Empty when there is nothing to fill.
    pub fn truncated(&self, units: f32) -> Vec<Vec2> {
        let Some(&start) = self.nodes.first() else {
            return Vec::new();
        };
        let (segment, t_end) = self.locate(units);
        let samples = self.samples_per_segment;

        let mut points = vec![start];
        for seg in self.segments.iter().take(segment) {
            points.extend((1..=samples).map(|s| seg.point_at(s as f32 / samples as f32)));
        }
        if let Some(seg) = self.segments.get(segment).filter(|_| t_end > 0.0) {
            let steps = ((samples as f32 * t_end).ceil() as usize).max(1);
            points.extend((1..steps).map(|s| seg.point_at(s as f32 / steps as f32 * t_end)));
            points.push(seg.point_at(t_end));
        }

        if points.len() <= 1 {
            return Vec::new();
        }
        points
    }

    /// Exact curve point for `units`. Falls back to the origin for an empty trail.
    pub fn marker(&self, units: f32) -> Vec2 {
        let (segment, t_end) = self.locate(units);
        match self.segments.get(segment) {
            Some(seg) => seg.point_at(t_end),
            None => self.nodes.last().copied().unwrap_or(Vec2::ZERO),
        }
    }

    /// SVG path data for the full smooth curve (`M ... C ...`).
    pub fn full_curve_svg(&self) -> String {
        let Some(start) = self.nodes.first() else {
            return String::new();
        };
        let mut d = format!("M {} {}", start.x, start.y);
        for seg in &self.segments {
            let _ = write!(
                d,
                " C {} {} {} {} {} {}",
                seg.c1.x, seg.c1.y, seg.c2.x, seg.c2.y, seg.p1.x, seg.p1.y
            );
        }
        d
    }

    /// SVG path data for the filled polyline at `units` (`M ... L ...`).
    pub fn truncated_svg(&self, units: f32) -> String {
        polyline_svg(&self.truncated(units))
    }
}

pub fn polyline_svg(points: &[Vec2]) -> String {
    let mut iter = points.iter();
    let Some(first) = iter.next() else {
        return String::new();
    };
    let mut d = format!("M {} {}", first.x, first.y);
    for p in iter {
        let _ = write!(d, " L {} {}", p.x, p.y);
    }
    d
}
