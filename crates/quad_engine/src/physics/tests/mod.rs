//! Cross-module collision tests
//!
//! `properties` samples random quads and checks the geometric laws every
//! query must obey. `scenarios` drives the full world/registry stack through
//! the canonical cases.

mod scenarios;

use rand::rngs::StdRng;
use rand::Rng;

use crate::foundation::math::{Point2, Rotation2, Vec2};
use crate::physics::Quad;

/// Rectangle with random center, size and rotation
pub(super) fn random_rect(rng: &mut StdRng) -> Quad {
    let center = Vec2::new(rng.gen_range(-4.0..4.0), rng.gen_range(-4.0..4.0));
    let half = Vec2::new(rng.gen_range(0.2..2.0), rng.gen_range(0.2..2.0));
    let rotation = Rotation2::new(rng.gen_range(0.0..std::f32::consts::TAU));

    let corner = |x: f32, y: f32| Point2::from(center + rotation * Vec2::new(x, y));
    Quad::new([
        corner(-half.x, -half.y),
        corner(half.x, -half.y),
        corner(half.x, half.y),
        corner(-half.x, half.y),
    ])
}
