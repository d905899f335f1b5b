//! Scene nodes and the quad provider contract
//!
//! The collision code never looks at transforms directly. It only asks a
//! [`QuadProvider`] for its four world-space corners and for the world-space
//! image of a local displacement.

use crate::foundation::math::{Point2, Rotation2, Vec2};
use crate::physics::Quad;

/// Anything that can report a world-space quad
///
/// Implementations must be pure for a fixed frame: calling either method
/// twice without moving the provider yields the same answer.
pub trait QuadProvider {
    /// World-space corners; corner 0 shares an edge with corners 1 and 3
    fn world_corners(&self) -> [Point2; 4];

    /// Transform a local displacement into a world-space direction
    fn world_direction(&self, dx: f32, dy: f32) -> Vec2;

    /// World-space quad built from [`world_corners`](Self::world_corners)
    fn world_quad(&self) -> Quad {
        Quad::new(self.world_corners())
    }
}

/// Position, rotation (radians) and non-uniform scale in the plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    /// World-space position of the node origin
    pub position: Point2,
    /// Counter-clockwise rotation in radians
    pub rotation: f32,
    /// Scale applied before rotation
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Point2::origin(),
            rotation: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform2D {
    /// Create a transform with only position
    pub fn from_position(x: f32, y: f32) -> Self {
        Self {
            position: Point2::new(x, y),
            ..Default::default()
        }
    }

    /// Map a local vector through scale and rotation
    pub fn transform_vector(&self, local: Vec2) -> Vec2 {
        Rotation2::new(self.rotation) * local.component_mul(&self.scale)
    }

    /// Map a local point to world space
    pub fn transform_point(&self, local: Point2) -> Point2 {
        self.position + self.transform_vector(local.coords)
    }
}

/// Rectangular scene node
///
/// The node covers `size` in local space, with `anchor` selecting which
/// fraction of the rectangle sits on the node origin (`(0.5, 0.5)` centers it).
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Local-to-world transform
    pub transform: Transform2D,
    /// Local width and height
    pub size: Vec2,
    /// Pivot inside the rectangle, in fractions of `size`
    pub anchor: Vec2,
}

impl SceneNode {
    /// Centered node of the given size at the origin
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            transform: Transform2D::default(),
            size: Vec2::new(width, height),
            anchor: Vec2::new(0.5, 0.5),
        }
    }

    /// Move the node origin to `(x, y)`
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.transform.position = Point2::new(x, y);
        self
    }

    /// Set the rotation in radians
    pub fn with_rotation(mut self, radians: f32) -> Self {
        self.transform.rotation = radians;
        self
    }

    /// Set the scale
    pub fn with_scale(mut self, sx: f32, sy: f32) -> Self {
        self.transform.scale = Vec2::new(sx, sy);
        self
    }

    /// Set the pivot
    pub fn with_anchor(mut self, ax: f32, ay: f32) -> Self {
        self.anchor = Vec2::new(ax, ay);
        self
    }

    /// Current world-space position of the node origin
    pub fn position(&self) -> Point2 {
        self.transform.position
    }

    /// Shift the node by a world-space offset
    pub fn translate(&mut self, offset: Vec2) {
        self.transform.position += offset;
    }

    /// Corners in local space, in collider winding order
    pub fn local_corners(&self) -> [Point2; 4] {
        let origin = Point2::from(-self.anchor.component_mul(&self.size));
        [
            origin,
            origin + Vec2::new(self.size.x, 0.0),
            origin + self.size,
            origin + Vec2::new(0.0, self.size.y),
        ]
    }
}

impl QuadProvider for SceneNode {
    fn world_corners(&self) -> [Point2; 4] {
        self.local_corners().map(|corner| self.transform.transform_point(corner))
    }

    fn world_direction(&self, dx: f32, dy: f32) -> Vec2 {
        self.transform.transform_vector(Vec2::new(dx, dy))
    }
}
