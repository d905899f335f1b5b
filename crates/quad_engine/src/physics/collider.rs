//! Collider capability
//!
//! A [`Collider`] is attached to exactly one entity and only remembers that
//! entity's handle. Geometry comes from the owner's scene node each time a
//! query runs, through a [`ColliderView`].

use crate::ecs::Entity;
use crate::foundation::collections::Key;
use crate::foundation::math::{Point2, Vec2};
use super::box_collider::{self, Impact, VELOCITY_EPSILON};
use super::collision::Collision;
use super::quad::Quad;

/// Geometric shape behind a collider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderShape {
    /// No geometry: never overlaps, never impacts
    Empty,
    /// The owner's full world-space quad
    Box,
}

/// Collision capability owned by one entity
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    owner: Entity,
    shape: ColliderShape,
    /// Detect-only collider that never blocks movement
    pub is_trigger: bool,
}

impl Collider {
    /// Create a solid collider with the given shape
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            owner: Entity::null(),
            shape,
            is_trigger: false,
        }
    }

    /// Solid box collider
    pub fn boxed() -> Self {
        Self::new(ColliderShape::Box)
    }

    /// Collider without geometry
    pub fn empty() -> Self {
        Self::new(ColliderShape::Empty)
    }

    /// Mark this as a trigger collider
    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// Owning entity (null until attached to a world entity)
    pub fn owner(&self) -> Entity {
        self.owner
    }

    /// Shape of this collider
    pub fn shape(&self) -> ColliderShape {
        self.shape
    }

    /// True for colliders with geometry
    pub fn is_geometric(&self) -> bool {
        self.shape != ColliderShape::Empty
    }

    pub(crate) fn bind_owner(&mut self, owner: Entity) {
        self.owner = owner;
    }
}

/// A collider paired with its owner's current world-space quad
#[derive(Debug, Clone, Copy)]
pub struct ColliderView<'a> {
    collider: &'a Collider,
    quad: Quad,
}

impl<'a> ColliderView<'a> {
    /// Pair a collider with the quad its owner occupies this frame
    pub fn new(collider: &'a Collider, quad: Quad) -> Self {
        Self { collider, quad }
    }

    /// Owning entity
    pub fn entity(&self) -> Entity {
        self.collider.owner
    }

    /// Underlying collider
    pub fn collider(&self) -> &'a Collider {
        self.collider
    }

    /// World-space quad used for queries
    pub fn quad(&self) -> &Quad {
        &self.quad
    }

    /// Trigger flag of the underlying collider
    pub fn is_trigger(&self) -> bool {
        self.collider.is_trigger
    }

    fn both_boxes(&self, other: &ColliderView<'_>) -> bool {
        self.collider.shape == ColliderShape::Box && other.collider.shape == ColliderShape::Box
    }

    /// True iff the two colliders currently overlap
    pub fn hit_test(&self, other: &ColliderView<'_>) -> bool {
        self.both_boxes(other) && box_collider::hit_test(&self.quad, &other.quad)
    }

    /// True iff the point lies within this collider
    pub fn hit_test_point(&self, x: f32, y: f32) -> bool {
        match self.collider.shape {
            ColliderShape::Box => box_collider::hit_test_point(&self.quad, Point2::new(x, y)),
            ColliderShape::Empty => false,
        }
    }

    /// Time of impact when this collider is swept by `(vx, vy)` against a stationary `other`
    pub fn time_of_impact(&self, other: &ColliderView<'_>, vx: f32, vy: f32) -> Impact {
        self.sweep(other, Vec2::new(vx, vy), VELOCITY_EPSILON)
    }

    /// [`time_of_impact`](Self::time_of_impact) with an explicit zero-velocity threshold
    pub fn sweep(&self, other: &ColliderView<'_>, velocity: Vec2, epsilon: f32) -> Impact {
        if self.both_boxes(other) {
            box_collider::time_of_impact(&self.quad, &other.quad, velocity, epsilon)
        } else {
            Impact::none()
        }
    }

    /// Minimal-penetration separation data if the colliders overlap
    pub fn collision_info(&self, other: &ColliderView<'_>) -> Option<Collision> {
        if !self.both_boxes(other) {
            return None;
        }
        box_collider::collision_info(&self.quad, &other.quad).map(|contact| {
            Collision::from_contact(
                self.entity(),
                other.entity(),
                contact.point,
                contact.normal,
                contact.depth,
            )
        })
    }
}
