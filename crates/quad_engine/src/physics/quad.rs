//! World-space quads

use crate::foundation::math::{Point2, Vec2};

/// Four world-space corners in collider winding order
///
/// Corner 0 shares one edge with corner 1 and the adjacent edge with
/// corner 3; those two edges are the quad's local axes. The quad is assumed
/// convex. Zero-length edges are tolerated by the collision math but give
/// approximate answers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    /// Corners `c0..c3`
    pub corners: [Point2; 4],
}

impl Quad {
    /// Create a quad from corners in winding order
    pub fn new(corners: [Point2; 4]) -> Self {
        Self { corners }
    }

    /// Axis-aligned rectangle centered on `(cx, cy)`
    pub fn from_center(cx: f32, cy: f32, half_width: f32, half_height: f32) -> Self {
        Self::new([
            Point2::new(cx - half_width, cy - half_height),
            Point2::new(cx + half_width, cy - half_height),
            Point2::new(cx + half_width, cy + half_height),
            Point2::new(cx - half_width, cy + half_height),
        ])
    }

    /// Corner 0, the origin of the quad's local frame
    pub fn origin(&self) -> Point2 {
        self.corners[0]
    }

    /// Edge from corner 0 to corner 1
    pub fn edge_u(&self) -> Vec2 {
        self.corners[1] - self.corners[0]
    }

    /// Edge from corner 0 to corner 3
    pub fn edge_v(&self) -> Vec2 {
        self.corners[3] - self.corners[0]
    }

    /// Average of the four corners
    pub fn center(&self) -> Point2 {
        let sum = self.corners.iter().fold(Vec2::zeros(), |acc, c| acc + c.coords);
        Point2::from(sum * 0.25)
    }

    /// Copy of this quad shifted by `offset`
    #[must_use]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.corners.map(|corner| corner + offset))
    }
}
