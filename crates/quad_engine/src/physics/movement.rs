//! Movement against registered colliders
//!
//! [`move_until_blocked`] sweeps an entity's quad along a requested local
//! displacement, stops it at the first solid collider in the way and reports
//! that contact. Trigger colliders never block.

use log::trace;

use crate::ecs::{Entity, World};
use crate::scene::QuadProvider;
use super::box_collider::Impact;
use super::collision::Collision;
use super::collision_system::{CollisionError, CollisionRegistry};

/// Move `entity` by the local displacement `(dx, dy)` until something blocks it
///
/// The displacement goes through the node's `world_direction` first. When
/// `candidates` is `None` every registered collider except the mover is
/// considered. The node is moved by the safe fraction of the displacement
/// and the earliest collision is returned; `None` means the full move
/// happened.
pub fn move_until_blocked(
    world: &mut World,
    registry: &CollisionRegistry,
    entity: Entity,
    dx: f32,
    dy: f32,
    candidates: Option<&[Entity]>,
) -> Result<Option<Collision>, CollisionError> {
    let velocity = world
        .node(entity)
        .ok_or(CollisionError::UnknownEntity(entity))?
        .world_direction(dx, dy);

    let blocker = match world.collider_view(entity) {
        Some(this) => {
            let candidates: Vec<Entity> = match candidates {
                Some(list) => list.to_vec(),
                None => registry.colliders().collect(),
            };

            let mut earliest: Option<(Entity, Impact)> = None;
            for other in candidates {
                if other == entity {
                    continue;
                }
                let Some(other_view) = world.collider_view(other) else {
                    continue;
                };
                if other_view.is_trigger() {
                    continue;
                }
                let impact = this.sweep(&other_view, velocity, registry.velocity_epsilon());
                if impact.is_hit() && earliest.map_or(true, |(_, best)| impact.toi < best.toi) {
                    earliest = Some((other, impact));
                }
            }
            earliest
        }
        None => None,
    };

    let fraction = blocker.map_or(1.0, |(_, impact)| impact.toi.max(0.0));
    if let Some(node) = world.node_mut(entity) {
        node.translate(velocity * fraction);
    }

    Ok(blocker.map(|(other, impact)| {
        trace!("{:?} blocked by {:?} at toi {}", entity, other, impact.toi);
        Collision::from_sweep(entity, other, impact.toi.max(0.0), impact.normal)
    }))
}

/// Push `entity` out of `other` along the minimal penetration axis
///
/// Returns the overlap that was resolved, or `None` if the two did not
/// overlap.
pub fn resolve_penetration(
    world: &mut World,
    entity: Entity,
    other: Entity,
) -> Result<Option<Collision>, CollisionError> {
    if !world.contains(entity) {
        return Err(CollisionError::UnknownEntity(entity));
    }
    if !world.contains(other) {
        return Err(CollisionError::UnknownEntity(other));
    }

    let collision = match (world.collider_view(entity), world.collider_view(other)) {
        (Some(this), Some(that)) => this.collision_info(&that),
        _ => None,
    };

    if let Some(collision) = collision {
        if let Some(node) = world.node_mut(entity) {
            node.translate(-collision.normal() * collision.penetration_depth());
        }
    }
    Ok(collision)
}
