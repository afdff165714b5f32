//! Placement transform composition.
//!
//! Every drawable entity is positioned by a single transform on its scene
//! node: translate to the computed offset, then mirror horizontally when the
//! entity faces left. Mirroring reuses a single rightward-authored asset for
//! both facing directions; the extra width term keeps the flipped drawing
//! inside the same bounding box.

use kurbo::{Affine, Vec2};

use crate::config::Direction;
use crate::scene::{NodeId, SceneGraph, fmt_number};

/// Inputs to the placement transform. Absent inputs default to
/// zero/identity; there are no error conditions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Offset in the parent's local coordinates.
    pub offset: Vec2,
    /// Entity width, consumed only when mirroring.
    pub width: f64,
    /// Facing direction; `Left` mirrors around the entity's own box.
    pub direction: Direction,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            width: 0.0,
            direction: Direction::Right,
        }
    }
}

impl Placement {
    pub fn new(offset: Vec2, width: f64, direction: Direction) -> Self {
        Self {
            offset,
            width,
            direction,
        }
    }

    /// Translation-only placement, for entities with no facing direction.
    pub fn at(offset: Vec2) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }

    fn parts(self) -> (f64, f64, f64) {
        let (tx, sx) = match self.direction {
            Direction::Left => (self.offset.x + self.width, -1.0),
            Direction::Right => (self.offset.x, 1.0),
        };
        (tx, self.offset.y, sx)
    }

    /// Equivalent affine: translate, then scale `(±1, 1)`.
    pub fn to_affine(self) -> Affine {
        let (tx, ty, sx) = self.parts();
        Affine::translate(Vec2::new(tx, ty)) * Affine::scale_non_uniform(sx, 1.0)
    }

    /// The same transform as an SVG attribute value.
    pub fn to_svg_transform(self) -> String {
        let (tx, ty, sx) = self.parts();
        format!(
            "translate({}, {}),scale({}, 1)",
            fmt_number(tx),
            fmt_number(ty),
            fmt_number(sx)
        )
    }
}

/// Write `placement` onto `node`'s transform attribute.
pub fn apply(scene: &mut SceneGraph, node: NodeId, placement: Placement) {
    scene.set_attr(node, "transform", placement.to_svg_transform());
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn default_placement_is_identity() {
        assert_eq!(Placement::default().to_affine(), Affine::IDENTITY);
        assert_eq!(
            Placement::default().to_svg_transform(),
            "translate(0, 0),scale(1, 1)"
        );
    }

    #[test]
    fn left_facing_translates_past_own_width_then_mirrors() {
        let p = Placement::new(Vec2::new(10.0, 0.0), 40.0, Direction::Left);
        assert_eq!(p.to_svg_transform(), "translate(50, 0),scale(-1, 1)");

        // The asset's left edge lands where the mirrored right edge was:
        // local (0,0) maps to x = 50, local (40,0) maps back to x = 10.
        let affine = p.to_affine();
        assert_eq!(affine * Point::new(0.0, 0.0), Point::new(50.0, 0.0));
        assert_eq!(affine * Point::new(40.0, 0.0), Point::new(10.0, 0.0));
    }

    #[test]
    fn right_facing_is_a_plain_translation() {
        let p = Placement::new(Vec2::new(10.0, 5.0), 40.0, Direction::Right);
        assert_eq!(p.to_affine(), Affine::translate(Vec2::new(10.0, 5.0)));
        assert_eq!(p.to_svg_transform(), "translate(10, 5),scale(1, 1)");
    }

    #[test]
    fn apply_writes_the_transform_attribute() {
        let mut scene = SceneGraph::new();
        let g = scene.create_element("g");
        apply(
            &mut scene,
            g,
            Placement::at(Vec2::new(405.0, 15.0)),
        );
        assert_eq!(
            scene.attr(g, "transform"),
            Some("translate(405, 15),scale(1, 1)")
        );
    }
}
