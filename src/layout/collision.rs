//! Collision resolution in target space.
//!
//! Groups are placed one at a time, in reading order. Each group's pixel
//! anchor is converted to target units and its height is inflated by a
//! safety multiplier, since the target renderer's font metrics run taller
//! than the measuring surface's. When the footprint overlaps something
//! already placed, it is pushed down to just below the lowest-reaching
//! rectangle it collides with, and checked again.
//!
//! Pushing is bounded. A group that still collides after the last attempt is
//! placed where it stands and flagged.
//!
//! The placed set is an explicit accumulator folded over the groups, so the
//! resolver is a pure function of its input.

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, ScaleFactors};
use crate::layout::paragraph::RenderGroup;
use crate::pipeline::config::PackerConfig;

/// Resolved footprint of one group, in target units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedRect {
    /// Left edge
    pub x: f32,
    /// Top edge after pushing
    pub y: f32,
    /// Width
    pub w: f32,
    /// Estimated occupied height
    pub h: f32,
    /// Number of downward pushes applied
    pub attempts: u32,
    /// False when the attempt bound ran out with a collision outstanding
    pub resolved: bool,
}

impl PlacedRect {
    /// Footprint as a rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Strict axis-aligned overlap test.
    pub fn intersects(&self, other: &PlacedRect) -> bool {
        self.rect().intersects(&other.rect())
    }
}

/// Parameters of the collision resolver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionParams {
    /// Factor applied to converted group heights
    pub height_multiplier: f32,
    /// Maximum downward pushes per group
    pub max_push_attempts: u32,
    /// Clearance below a colliding rectangle (target units)
    pub push_gap_units: f32,
}

impl CollisionParams {
    /// Extract resolver parameters from a packer configuration.
    pub fn from_config(config: &PackerConfig) -> Self {
        Self {
            height_multiplier: config.height_multiplier,
            max_push_attempts: config.max_push_attempts,
            push_gap_units: config.push_gap_units,
        }
    }
}

impl Default for CollisionParams {
    fn default() -> Self {
        Self::from_config(&PackerConfig::default())
    }
}

/// Initial target-space footprint of a group, before any pushing.
pub fn initial_footprint(
    group: &RenderGroup,
    scale: &ScaleFactors,
    params: &CollisionParams,
) -> Rect {
    Rect::new(
        scale.x_units(group.x()),
        scale.y_units(group.y()),
        scale.x_units(group.w()),
        scale.y_units(group.h_web()) * params.height_multiplier,
    )
}

/// The rectangles placed so far.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlacedSet {
    rects: Vec<PlacedRect>,
}

impl PlacedSet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Placed rectangles in placement order.
    pub fn rects(&self) -> &[PlacedRect] {
        &self.rects
    }

    /// Consume the set, returning the placed rectangles.
    pub fn into_rects(self) -> Vec<PlacedRect> {
        self.rects
    }

    /// Place a group, returning the extended set.
    pub fn place(
        self,
        group: &RenderGroup,
        scale: &ScaleFactors,
        params: &CollisionParams,
    ) -> Self {
        self.place_rect(initial_footprint(group, scale, params), params)
    }

    /// Place a target-space candidate, returning the extended set.
    pub fn place_rect(mut self, candidate: Rect, params: &CollisionParams) -> Self {
        let mut current = candidate;
        let mut attempts = 0;
        let mut blocker = self.lowest_collision(&current);

        while let Some(bottom) = blocker {
            if attempts >= params.max_push_attempts {
                break;
            }
            current = current.with_y(bottom + params.push_gap_units);
            attempts += 1;
            blocker = self.lowest_collision(&current);
        }

        let resolved = blocker.is_none();
        if !resolved {
            log::warn!(
                "Collision unresolved after {} attempts at ({:.3}, {:.3}) {:.3}x{:.3}; \
                 placing anyway",
                attempts,
                current.x,
                current.y,
                current.width,
                current.height
            );
        }
        log::trace!(
            "Placed ({:.3}, {:.3}) {:.3}x{:.3} after {} pushes",
            current.x,
            current.y,
            current.width,
            current.height,
            attempts
        );

        self.rects.push(PlacedRect {
            x: current.x,
            y: current.y,
            w: current.width,
            h: current.height,
            attempts,
            resolved,
        });
        self
    }

    /// Lowest bottom edge among placed rectangles overlapping `candidate`.
    fn lowest_collision(&self, candidate: &Rect) -> Option<f32> {
        self.rects
            .iter()
            .map(PlacedRect::rect)
            .filter(|r| r.intersects(candidate))
            .map(|r| r.bottom())
            .fold(None, |acc, b| Some(acc.map_or(b, |a: f32| a.max(b))))
    }
}

/// Place every group in order, returning one rectangle per group.
pub fn resolve_collisions(
    groups: &[RenderGroup],
    scale: &ScaleFactors,
    params: &CollisionParams,
) -> Vec<PlacedRect> {
    let placed = groups
        .iter()
        .fold(PlacedSet::new(), |set, group| set.place(group, scale, params))
        .into_rects();

    let pushed = placed.iter().filter(|p| p.attempts > 0).count();
    let unresolved = placed.iter().filter(|p| !p.resolved).count();
    log::debug!(
        "Collision resolution: {} placed, {} pushed, {} unresolved",
        placed.len(),
        pushed,
        unresolved
    );

    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{CanvasSize, CoordinateSpaces, SourceSize};
    use crate::layout::measurement::{ElementKind, ElementMeasurement};

    fn identity() -> ScaleFactors {
        ScaleFactors { sx: 1.0, sy: 1.0 }
    }

    fn group(x: f32, y: f32, w: f32, h: f32) -> RenderGroup {
        let m = ElementMeasurement::new(ElementKind::Paragraph, x, y, w, h).with_text("text");
        RenderGroup::new(vec![m], 0.0).unwrap()
    }

    fn unit_params() -> CollisionParams {
        CollisionParams {
            height_multiplier: 1.0,
            max_push_attempts: 10,
            push_gap_units: 0.1,
        }
    }

    #[test]
    fn test_initial_footprint_scales_and_inflates() {
        let spaces = CoordinateSpaces::new(CanvasSize::WIDESCREEN, SourceSize::HD).unwrap();
        let g = group(128.0, 72.0, 640.0, 100.0);

        let rect = initial_footprint(&g, &spaces.scale(), &CollisionParams::default());

        assert_eq!(rect.x, 1.0);
        assert!((rect.y - 0.5625).abs() < 1e-6);
        assert_eq!(rect.width, 5.0);
        assert!((rect.height - 100.0 * 0.0078125 * 1.6).abs() < 1e-6);
    }

    #[test]
    fn test_non_overlapping_groups_are_not_pushed() {
        let placed = resolve_collisions(
            &[group(0.0, 0.0, 10.0, 10.0), group(0.0, 20.0, 10.0, 10.0)],
            &identity(),
            &unit_params(),
        );

        assert_eq!(placed[1].y, 20.0);
        assert_eq!(placed[1].attempts, 0);
        assert!(placed.iter().all(|p| p.resolved));
    }

    #[test]
    fn test_touching_edges_are_not_collisions() {
        let placed = resolve_collisions(
            &[group(0.0, 0.0, 10.0, 10.0), group(0.0, 10.0, 10.0, 10.0)],
            &identity(),
            &unit_params(),
        );
        assert_eq!(placed[1].y, 10.0);
        assert_eq!(placed[1].attempts, 0);
    }

    #[test]
    fn test_side_by_side_groups_are_not_pushed() {
        let placed = resolve_collisions(
            &[group(0.0, 0.0, 10.0, 10.0), group(10.0, 0.0, 10.0, 10.0)],
            &identity(),
            &unit_params(),
        );
        assert_eq!(placed[1].y, 0.0);
    }

    #[test]
    fn test_same_top_pushes_below_first() {
        let placed = resolve_collisions(
            &[group(0.0, 5.0, 10.0, 10.0), group(3.0, 5.0, 10.0, 4.0)],
            &identity(),
            &unit_params(),
        );

        assert!((placed[1].y - 15.1).abs() < 1e-5);
        assert_eq!(placed[1].attempts, 1);
        assert!(!placed[0].intersects(&placed[1]));
    }

    #[test]
    fn test_push_clears_lowest_colliding_rect() {
        // The candidate overlaps both placed rects; one push must clear both.
        let params = unit_params();
        let set = PlacedSet::new()
            .place_rect(Rect::new(0.0, 0.0, 5.0, 10.0), &params)
            .place_rect(Rect::new(5.0, 0.0, 5.0, 30.0), &params)
            .place_rect(Rect::new(0.0, 2.0, 10.0, 5.0), &params);

        let last = set.rects()[2];
        assert!((last.y - 30.1).abs() < 1e-5);
        assert_eq!(last.attempts, 1);
    }

    #[test]
    fn test_push_rechecks_against_all_placed() {
        let params = unit_params();
        let set = PlacedSet::new()
            .place_rect(Rect::new(0.0, 0.0, 10.0, 10.0), &params)
            .place_rect(Rect::new(0.0, 12.0, 10.0, 10.0), &params)
            .place_rect(Rect::new(0.0, 5.0, 10.0, 5.0), &params);

        // 5 -> 10.1 (collides with the second rect) -> 22.1
        let last = set.rects()[2];
        assert!((last.y - 22.1).abs() < 1e-4);
        assert_eq!(last.attempts, 2);
        assert!(last.resolved);
    }

    #[test]
    fn test_attempt_bound_places_anyway() {
        let params = CollisionParams {
            max_push_attempts: 1,
            ..unit_params()
        };
        let set = PlacedSet::new()
            .place_rect(Rect::new(0.0, 0.0, 10.0, 10.0), &params)
            .place_rect(Rect::new(0.0, 11.0, 10.0, 10.0), &params)
            .place_rect(Rect::new(0.0, 5.0, 10.0, 5.0), &params);

        let rects = set.into_rects();
        assert_eq!(rects.len(), 3);
        assert_eq!(rects[2].attempts, 1);
        assert!(!rects[2].resolved);
        assert!(rects[2].intersects(&rects[1]));
    }

    #[test]
    fn test_zero_attempts_never_pushes() {
        let params = CollisionParams {
            max_push_attempts: 0,
            ..unit_params()
        };
        let set = PlacedSet::new()
            .place_rect(Rect::new(0.0, 0.0, 10.0, 10.0), &params)
            .place_rect(Rect::new(0.0, 5.0, 10.0, 10.0), &params);

        assert_eq!(set.rects()[1].y, 5.0);
        assert!(!set.rects()[1].resolved);
    }

    #[test]
    fn test_resolution_is_pairwise_disjoint() {
        let groups: Vec<RenderGroup> =
            (0..8).map(|i| group(i as f32 * 3.0, i as f32 * 4.0, 50.0, 12.0)).collect();
        let placed = resolve_collisions(&groups, &identity(), &unit_params());

        for (i, a) in placed.iter().enumerate() {
            assert!(a.resolved);
            for b in &placed[i + 1..] {
                assert!(!a.intersects(b));
            }
        }
        // Reading order survives pushing.
        for pair in placed.windows(2) {
            assert!(pair[0].y < pair[1].y);
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(resolve_collisions(&[], &identity(), &unit_params()).is_empty());
    }
}
