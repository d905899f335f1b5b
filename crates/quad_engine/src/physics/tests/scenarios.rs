use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;

use crate::core::CollisionConfig;
use crate::ecs::{Entity, EntityDesc, World};
use crate::foundation::math::Vec2;
use crate::physics::{Collidable, Collider, CollisionContext, CollisionError, CollisionRegistry};
use crate::scene::{CommandQueue, SceneCommand, SceneNode};

fn unit_box(world: &mut World, x: f32, y: f32) -> Entity {
    world.spawn(EntityDesc::new(SceneNode::new(1.0, 1.0).at(x, y)).with_collider(Collider::boxed()))
}

#[test]
fn test_separated_squares_sweep_into_contact() {
    let mut world = World::new();
    let a = unit_box(&mut world, 0.0, 0.0);
    let b = unit_box(&mut world, 3.0, 0.0);
    let a_view = world.collider_view(a).unwrap();
    let b_view = world.collider_view(b).unwrap();

    assert!(!a_view.hit_test(&b_view));

    // Closing the 2.0 gap takes the whole of a (2, 0) sweep
    let exact = a_view.time_of_impact(&b_view, 2.0, 0.0);
    assert_relative_eq!(exact.toi, 1.0, epsilon = 1e-5);
    assert_relative_eq!(exact.normal.x.abs(), 1.0, epsilon = 1e-5);

    let overshoot = a_view.time_of_impact(&b_view, 3.0, 0.0);
    assert_relative_eq!(overshoot.toi, 2.0 / 3.0, epsilon = 1e-5);
    assert_relative_eq!(overshoot.normal, Vec2::new(-1.0, 0.0), epsilon = 1e-5);
}

#[test]
fn test_overlap_reports_penetration_on_x() {
    let mut world = World::new();
    let a = unit_box(&mut world, 0.0, 0.0);
    let b = unit_box(&mut world, 0.5, 0.0);
    let a_view = world.collider_view(a).unwrap();
    let b_view = world.collider_view(b).unwrap();

    assert!(a_view.hit_test(&b_view));
    let info = a_view.collision_info(&b_view).unwrap();
    assert_eq!(info.entity(), a);
    assert_eq!(info.other(), b);
    assert_relative_eq!(info.penetration_depth(), 0.5, epsilon = 1e-5);
    assert_relative_eq!(info.normal().y, 0.0, epsilon = 1e-5);
    assert_relative_eq!(info.normal().x.abs(), 1.0, epsilon = 1e-5);
}

#[test]
fn test_point_containment_in_entity_quad() {
    let mut world = World::new();
    let square = world.spawn(EntityDesc::new(SceneNode::new(2.0, 2.0)).with_collider(Collider::boxed()));
    let view = world.collider_view(square).unwrap();

    assert!(view.hit_test_point(0.0, 0.0));
    assert!(!view.hit_test_point(2.0, 0.0));
}

struct RegisterOnHit {
    newcomer: Entity,
    outcome: Option<Result<(), CollisionError>>,
}

impl Collidable for RegisterOnHit {
    fn on_collision(&mut self, ctx: &mut CollisionContext<'_>, _other: Entity) -> Result<(), CollisionError> {
        self.outcome = Some(ctx.register(self.newcomer));
        Ok(())
    }
}

fn reentrancy_world(safe_mode: bool) -> (World, CollisionRegistry, Entity, Rc<RefCell<RegisterOnHit>>) {
    let mut world = World::new();
    let mut registry = CollisionRegistry::new(&CollisionConfig::default().with_safe_mode(safe_mode));

    let newcomer = unit_box(&mut world, 0.1, 0.0);
    let handler = Rc::new(RefCell::new(RegisterOnHit { newcomer, outcome: None }));
    let player = world.spawn(
        EntityDesc::new(SceneNode::new(1.0, 1.0))
            .with_collider(Collider::boxed())
            .with_handler(handler.clone()),
    );
    let wall = unit_box(&mut world, 0.5, 0.0);
    registry.register(&world, player).unwrap();
    registry.register(&world, wall).unwrap();

    (world, registry, newcomer, handler)
}

#[test]
fn test_strict_mode_rejects_reentrant_registration() {
    let (world, mut registry, newcomer, handler) = reentrancy_world(true);
    let mut commands = CommandQueue::new();

    registry.step(&world, &mut commands).unwrap();

    assert!(matches!(
        handler.borrow().outcome,
        Some(Err(CollisionError::Reentrant { .. }))
    ));
    assert!(!registry.is_registered(newcomer));
}

#[test]
fn test_permissive_mode_skips_for_current_frame() {
    let (world, mut registry, newcomer, handler) = reentrancy_world(false);
    let mut commands = CommandQueue::new();

    let dispatched = registry.step(&world, &mut commands).unwrap();

    assert_eq!(dispatched, 1);
    assert_eq!(handler.borrow().outcome, Some(Ok(())));
    assert!(registry.is_registered(newcomer));
}

#[test]
fn test_deferred_registration_applies_after_step() {
    struct DeferOnHit(Entity);

    impl Collidable for DeferOnHit {
        fn on_collision(&mut self, ctx: &mut CollisionContext<'_>, _other: Entity) -> Result<(), CollisionError> {
            ctx.defer(SceneCommand::Register(self.0));
            Ok(())
        }
    }

    let mut world = World::new();
    let mut registry = CollisionRegistry::new(&CollisionConfig::default());
    let mut commands = CommandQueue::new();

    let newcomer = unit_box(&mut world, 0.1, 0.0);
    let player = world.spawn(
        EntityDesc::new(SceneNode::new(1.0, 1.0))
            .with_collider(Collider::boxed())
            .with_handler(Rc::new(RefCell::new(DeferOnHit(newcomer)))),
    );
    let wall = unit_box(&mut world, 0.5, 0.0);
    registry.register(&world, player).unwrap();
    registry.register(&world, wall).unwrap();

    registry.step(&world, &mut commands).unwrap();
    assert!(!registry.is_registered(newcomer));

    commands.flush(&mut world, &mut registry).unwrap();
    assert!(registry.is_registered(newcomer));
}

#[derive(Default)]
struct Tally {
    seen: Vec<Entity>,
}

impl Collidable for Tally {
    fn on_collision(&mut self, _ctx: &mut CollisionContext<'_>, other: Entity) -> Result<(), CollisionError> {
        self.seen.push(other);
        Ok(())
    }
}

#[test]
fn test_trigger_only_step_still_queries_solids() {
    let mut world = World::new();
    let mut registry = CollisionRegistry::new(&CollisionConfig::default().with_triggers_only(true));
    let mut commands = CommandQueue::new();

    let tally = Rc::new(RefCell::new(Tally::default()));
    let sensor = world.spawn(
        EntityDesc::new(SceneNode::new(1.0, 1.0))
            .with_collider(Collider::boxed())
            .with_handler(tally.clone()),
    );
    let solid = unit_box(&mut world, 0.5, 0.0);
    registry.register(&world, sensor).unwrap();
    registry.register(&world, solid).unwrap();

    assert_eq!(registry.step(&world, &mut commands).unwrap(), 0);
    assert!(tally.borrow().seen.is_empty());

    assert_eq!(registry.current_collisions(&world, sensor, false, true), vec![solid]);
    assert!(registry.current_collisions(&world, sensor, true, false).is_empty());
}
