//! Collision result records

use crate::ecs::Entity;
use crate::foundation::math::{Point2, Vec2};

/// One detected overlap or impact between two entities
///
/// Built fresh by each query and never mutated afterwards. Sweep results
/// carry a time of impact and leave `point`/`penetration_depth` at zero;
/// static-overlap results carry a contact point and depth with a zero time
/// of impact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    entity: Entity,
    other: Entity,
    normal: Vec2,
    point: Point2,
    time_of_impact: f32,
    penetration_depth: f32,
}

impl Collision {
    /// Result of a swept query
    pub fn from_sweep(entity: Entity, other: Entity, time_of_impact: f32, normal: Vec2) -> Self {
        Self {
            entity,
            other,
            normal,
            point: Point2::origin(),
            time_of_impact,
            penetration_depth: 0.0,
        }
    }

    /// Result of a static-overlap query
    pub fn from_contact(
        entity: Entity,
        other: Entity,
        point: Point2,
        normal: Vec2,
        penetration_depth: f32,
    ) -> Self {
        Self {
            entity,
            other,
            normal,
            point,
            time_of_impact: 0.0,
            penetration_depth,
        }
    }

    /// The entity that issued the query
    pub fn entity(&self) -> Entity {
        self.entity
    }

    /// The entity it collided with
    pub fn other(&self) -> Entity {
        self.other
    }

    /// Unit contact normal
    pub fn normal(&self) -> Vec2 {
        self.normal
    }

    /// Representative contact point (origin for sweep results)
    pub fn point(&self) -> Point2 {
        self.point
    }

    /// Fraction of the requested displacement before contact (zero for overlaps)
    pub fn time_of_impact(&self) -> f32 {
        self.time_of_impact
    }

    /// Separation distance along the normal (zero for sweeps)
    pub fn penetration_depth(&self) -> f32 {
        self.penetration_depth
    }
}
