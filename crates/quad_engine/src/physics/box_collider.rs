//! Oriented quad collision geometry
//!
//! All tests work in the parametric frame of one quad's slab: for an edge of
//! quad `C`, `t = 0` is the line through that edge's start corner and `t = 1`
//! is the opposite edge. The other quad's corners are projected into that
//! frame and compared against `[0, 1]`. Each quad contributes two slabs, so
//! every query considers four candidate separating axes.
//!
//! Degenerate quads are not rejected. A slab whose depth vector has no
//! component along the edge normal divides by `1.0` instead of zero, which
//! keeps the math finite without claiming a meaningful answer.

use crate::foundation::math::{normalize_or_zero, perp, Point2, Vec2};
use super::quad::Quad;

/// Default threshold below which a projected sweep velocity counts as zero
pub const VELOCITY_EPSILON: f32 = 1e-6;

/// Result of a swept query
///
/// `toi` is the fraction of the requested displacement at which the shapes
/// first touch. Values `>= 1` mean no impact during this displacement;
/// [`Impact::none`] uses `+inf`. `normal` opposes the sweep direction and is
/// only meaningful when an impact exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impact {
    /// Time of impact as a fraction of the displacement
    pub toi: f32,
    /// Unit contact normal, `dot(normal, velocity) <= 0`
    pub normal: Vec2,
}

impl Impact {
    /// The "no collision" sentinel
    pub fn none() -> Self {
        Self {
            toi: f32::INFINITY,
            normal: Vec2::zeros(),
        }
    }

    /// True when contact happens within the requested displacement
    pub fn is_hit(&self) -> bool {
        self.toi < 1.0
    }
}

/// Static penetration data for two overlapping quads
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing away from the first quad
    pub normal: Vec2,
    /// Deepest corner on the winning axis
    pub point: Point2,
    /// Distance along `normal` needed to separate the quads
    pub depth: f32,
}

/// Extent of a quad's corners in a slab frame
#[derive(Debug, Clone, Copy)]
struct Extent {
    min: f32,
    max: f32,
    min_corner: usize,
    max_corner: usize,
}

impl Extent {
    fn separated(&self) -> bool {
        self.max <= 0.0 || self.min >= 1.0
    }
}

/// One candidate separating axis
#[derive(Debug, Clone, Copy)]
struct Slab {
    origin: Point2,
    normal: Vec2,
    denom: f32,
}

impl Slab {
    fn new(origin: Point2, edge: Vec2, depth: Vec2) -> Self {
        let normal = perp(edge);
        let denom = depth.dot(&normal);
        Self {
            origin,
            normal,
            denom: if denom == 0.0 { 1.0 } else { denom },
        }
    }

    fn param(&self, point: &Point2) -> f32 {
        (*point - self.origin).dot(&self.normal) / self.denom
    }

    fn extent(&self, quad: &Quad) -> Extent {
        let mut extent = Extent {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
            min_corner: 0,
            max_corner: 0,
        };
        for (i, corner) in quad.corners.iter().enumerate() {
            let t = self.param(corner);
            if t < extent.min {
                extent.min = t;
                extent.min_corner = i;
            }
            if t > extent.max {
                extent.max = t;
                extent.max_corner = i;
            }
        }
        extent
    }

    /// Unit world direction of increasing `t`
    fn axis(&self) -> Vec2 {
        normalize_or_zero(self.normal) * self.denom.signum()
    }

    /// World distance between `t = 0` and `t = 1`
    fn width(&self) -> f32 {
        let len = self.normal.norm();
        if len > 0.0 {
            self.denom.abs() / len
        } else {
            0.0
        }
    }
}

fn slabs(quad: &Quad) -> [Slab; 2] {
    let origin = quad.origin();
    let u = quad.edge_u();
    let v = quad.edge_v();
    [Slab::new(origin, u, v), Slab::new(origin, v, u)]
}

/// True if one of `frame`'s two slabs separates `other` from it
fn separated_by_slabs_of(frame: &Quad, other: &Quad) -> bool {
    slabs(frame).iter().any(|slab| slab.extent(other).separated())
}

/// Overlap test; touching edges do not count as overlap
pub fn hit_test(a: &Quad, b: &Quad) -> bool {
    !separated_by_slabs_of(a, b) && !separated_by_slabs_of(b, a)
}

/// Point containment, boundary inclusive
pub fn hit_test_point(quad: &Quad, point: Point2) -> bool {
    slabs(quad).iter().all(|slab| {
        let t = slab.param(&point);
        (0.0..=1.0).contains(&t)
    })
}

/// Minimal-penetration separation data, or `None` when separated
///
/// The reported normal points away from `this`; moving `other` by
/// `normal * depth` (or `this` by the opposite) separates the quads.
pub fn collision_info(this: &Quad, other: &Quad) -> Option<Contact> {
    let mut best: Option<Contact> = None;
    let mut consider = |depth: f32, normal: Vec2, point: Point2| {
        if best.map_or(true, |current| depth < current.depth) {
            best = Some(Contact { normal, point, depth });
        }
    };

    // `sign` flips normals found in the other quad's frame so they still
    // point away from `this`
    for (frame, subject, sign) in [(this, other, 1.0_f32), (other, this, -1.0_f32)] {
        for slab in slabs(frame) {
            let extent = slab.extent(subject);
            if extent.max < 0.0 || extent.min > 1.0 {
                return None;
            }
            let axis = slab.axis();
            let width = slab.width();

            // Subject reaching in through the frame's t = 0 side
            consider(
                extent.max * width,
                -axis * sign,
                subject.corners[extent.max_corner],
            );
            // Subject reaching in through the t = 1 side
            consider(
                (1.0 - extent.min) * width,
                axis * sign,
                subject.corners[extent.min_corner],
            );
        }
    }

    best
}

/// Swept time of impact of `this` moving by `velocity` against a stationary `other`
///
/// Every slab yields an entry and exit time for the projected intervals; a
/// hit needs all four intervals open at once, so the latest entry and the
/// earliest exit decide the result.
pub fn time_of_impact(this: &Quad, other: &Quad, velocity: Vec2, epsilon: f32) -> Impact {
    let mut max_toi = f32::NEG_INFINITY;
    let mut min_toe = f32::INFINITY;
    let mut normal = Vec2::zeros();

    // In `this`'s frame the other quad moves by -velocity
    for (frame, subject, subject_velocity) in [(this, other, -velocity), (other, this, velocity)] {
        for slab in slabs(frame) {
            let extent = slab.extent(subject);
            let projected = subject_velocity.dot(&normalize_or_zero(slab.normal));

            let (entry, exit) = if projected.abs() <= epsilon {
                if extent.separated() {
                    (f32::INFINITY, f32::NEG_INFINITY)
                } else {
                    (f32::NEG_INFINITY, f32::INFINITY)
                }
            } else {
                let dt = subject_velocity.dot(&slab.normal) / slab.denom;
                if dt > 0.0 {
                    (-extent.max / dt, (1.0 - extent.min) / dt)
                } else {
                    ((1.0 - extent.min) / dt, -extent.max / dt)
                }
            };

            if entry > max_toi {
                max_toi = entry;
                normal = slab.normal;
            }
            min_toe = min_toe.min(exit);

            if min_toe <= max_toi || min_toe <= 0.0 {
                return Impact::none();
            }
        }
    }

    let mut normal = normalize_or_zero(normal);
    if normal.dot(&velocity) > 0.0 {
        normal = -normal;
    }

    if max_toi >= 0.0 {
        Impact { toi: max_toi, normal }
    } else if max_toi.abs() < min_toe.abs() {
        // Already overlapping and still moving deeper
        Impact { toi: 0.0, normal }
    } else {
        Impact::none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_square(cx: f32, cy: f32) -> Quad {
        Quad::from_center(cx, cy, 0.5, 0.5)
    }

    /// Square of side `2 * half` rotated by `angle` around its center
    fn rotated_square(cx: f32, cy: f32, half: f32, angle: f32) -> Quad {
        let (s, c) = angle.sin_cos();
        let corner = |x: f32, y: f32| Point2::new(cx + x * c - y * s, cy + x * s + y * c);
        Quad::new([
            corner(-half, -half),
            corner(half, -half),
            corner(half, half),
            corner(-half, half),
        ])
    }

    #[test]
    fn test_separated_squares_do_not_hit() {
        assert!(!hit_test(&unit_square(0.0, 0.0), &unit_square(3.0, 0.0)));
        assert!(hit_test(&unit_square(0.0, 0.0), &unit_square(0.5, 0.0)));
    }

    #[test]
    fn test_touching_edges_do_not_hit() {
        assert!(!hit_test(&unit_square(0.0, 0.0), &unit_square(1.0, 0.0)));
        assert!(hit_test(&unit_square(0.0, 0.0), &unit_square(0.999, 0.0)));
    }

    #[test]
    fn test_contained_quad_hits() {
        let big = Quad::from_center(0.0, 0.0, 5.0, 5.0);
        let small = unit_square(1.0, 1.0);
        assert!(hit_test(&big, &small));
        assert!(hit_test(&small, &big));
    }

    #[test]
    fn test_rotated_diamond_near_corner() {
        // A diamond whose bounding box overlaps the square but whose edges do not
        let square = unit_square(0.0, 0.0);
        let diamond = rotated_square(1.15, 1.15, 0.5, std::f32::consts::FRAC_PI_4);
        assert!(!hit_test(&square, &diamond));
        assert!(!hit_test(&diamond, &square));

        let closer = rotated_square(0.8, 0.8, 0.5, std::f32::consts::FRAC_PI_4);
        assert!(hit_test(&square, &closer));
    }

    #[test]
    fn test_point_containment() {
        let square = Quad::from_center(0.0, 0.0, 1.0, 1.0);
        assert!(hit_test_point(&square, Point2::new(0.0, 0.0)));
        assert!(hit_test_point(&square, Point2::new(1.0, 1.0)));
        assert!(!hit_test_point(&square, Point2::new(2.0, 0.0)));
        assert!(!hit_test_point(&square, Point2::new(0.0, -1.01)));
    }

    #[test]
    fn test_point_in_rotated_quad() {
        let diamond = rotated_square(0.0, 0.0, 1.0, std::f32::consts::FRAC_PI_4);
        assert!(hit_test_point(&diamond, Point2::new(0.0, 1.3)));
        assert!(!hit_test_point(&diamond, Point2::new(0.9, 0.9)));
    }

    #[test]
    fn test_penetration_along_x() {
        let contact = collision_info(&unit_square(0.0, 0.0), &unit_square(0.5, 0.0)).unwrap();
        assert_relative_eq!(contact.depth, 0.5, epsilon = 1e-5);
        assert_relative_eq!(contact.normal, Vec2::new(1.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_penetration_normal_points_away_from_self() {
        let contact = collision_info(&unit_square(0.0, 0.0), &unit_square(0.0, -0.8)).unwrap();
        assert_relative_eq!(contact.depth, 0.2, epsilon = 1e-5);
        assert_relative_eq!(contact.normal, Vec2::new(0.0, -1.0), epsilon = 1e-5);

        let reversed = collision_info(&unit_square(0.0, -0.8), &unit_square(0.0, 0.0)).unwrap();
        assert_relative_eq!(reversed.normal, Vec2::new(0.0, 1.0), epsilon = 1e-5);
    }

    #[test]
    fn test_penetration_none_when_apart() {
        assert!(collision_info(&unit_square(0.0, 0.0), &unit_square(2.0, 0.0)).is_none());
    }

    #[test]
    fn test_sweep_reaches_contact_at_end_of_step() {
        let impact = time_of_impact(
            &unit_square(0.0, 0.0),
            &unit_square(3.0, 0.0),
            Vec2::new(2.0, 0.0),
            VELOCITY_EPSILON,
        );
        assert_relative_eq!(impact.toi, 1.0, epsilon = 1e-5);
        assert_relative_eq!(impact.normal, Vec2::new(-1.0, 0.0), epsilon = 1e-5);
        assert!(!impact.is_hit());
    }

    #[test]
    fn test_sweep_partial_step() {
        let impact = time_of_impact(
            &unit_square(0.0, 0.0),
            &unit_square(3.0, 0.0),
            Vec2::new(3.0, 0.0),
            VELOCITY_EPSILON,
        );
        assert_relative_eq!(impact.toi, 2.0 / 3.0, epsilon = 1e-5);
        assert!(impact.is_hit());
        assert!(impact.normal.dot(&Vec2::new(3.0, 0.0)) <= 0.0);
    }

    #[test]
    fn test_sweep_moving_away_misses() {
        let impact = time_of_impact(
            &unit_square(0.0, 0.0),
            &unit_square(3.0, 0.0),
            Vec2::new(-3.0, 0.0),
            VELOCITY_EPSILON,
        );
        assert_eq!(impact, Impact::none());
    }

    #[test]
    fn test_sweep_parallel_and_separated_never_hits() {
        // Sliding past along y while offset in x
        let impact = time_of_impact(
            &unit_square(0.0, 0.0),
            &unit_square(2.0, 5.0),
            Vec2::new(0.0, 10.0),
            VELOCITY_EPSILON,
        );
        assert!(impact.toi.is_infinite());
    }

    #[test]
    fn test_sweep_sliding_along_touching_wall() {
        let impact = time_of_impact(
            &unit_square(0.0, 0.0),
            &unit_square(1.0, 0.0),
            Vec2::new(0.0, 0.5),
            VELOCITY_EPSILON,
        );
        assert!(!impact.is_hit());
    }

    #[test]
    fn test_sweep_from_touching_into_wall_is_immediate() {
        let impact = time_of_impact(
            &unit_square(0.0, 0.0),
            &unit_square(1.0, 0.0),
            Vec2::new(0.5, 0.0),
            VELOCITY_EPSILON,
        );
        assert_relative_eq!(impact.toi, 0.0);
        assert_relative_eq!(impact.normal, Vec2::new(-1.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_sweep_overlapping_moving_deeper_reports_zero() {
        // Overlap of 0.1 on x, pushing further in
        let impact = time_of_impact(
            &unit_square(0.0, 0.0),
            &unit_square(0.9, 0.0),
            Vec2::new(0.5, 0.0),
            VELOCITY_EPSILON,
        );
        assert_relative_eq!(impact.toi, 0.0);
    }

    #[test]
    fn test_sweep_overlapping_moving_out_misses() {
        let impact = time_of_impact(
            &unit_square(0.0, 0.0),
            &unit_square(0.9, 0.0),
            Vec2::new(-0.5, 0.0),
            VELOCITY_EPSILON,
        );
        assert!(!impact.is_hit());
    }

    #[test]
    fn test_sweep_zero_velocity() {
        let apart = time_of_impact(
            &unit_square(0.0, 0.0),
            &unit_square(3.0, 0.0),
            Vec2::zeros(),
            VELOCITY_EPSILON,
        );
        assert_eq!(apart, Impact::none());

        let overlapping = time_of_impact(
            &unit_square(0.0, 0.0),
            &unit_square(0.5, 0.0),
            Vec2::zeros(),
            VELOCITY_EPSILON,
        );
        assert!(!overlapping.is_hit());
    }

    #[test]
    fn test_sweep_diagonal_hits_rotated_wall() {
        let wall = rotated_square(3.0, 0.0, 1.0, 0.3);
        let mover = unit_square(0.0, 0.0);
        let velocity = Vec2::new(4.0, 0.0);
        let impact = time_of_impact(&mover, &wall, velocity, VELOCITY_EPSILON);

        assert!(impact.is_hit());
        assert!(impact.normal.dot(&velocity) <= 0.0);
        assert_relative_eq!(impact.normal.norm(), 1.0, epsilon = 1e-5);

        let before = mover.translated(velocity * (impact.toi - 1e-3));
        let after = mover.translated(velocity * (impact.toi + 1e-3));
        assert!(!hit_test(&before, &wall));
        assert!(hit_test(&after, &wall));
    }

    /// Parallelogram leaning right: base from (0, 0) to (2, 0), height 1
    fn sheared(dx: f32, dy: f32) -> Quad {
        Quad::new([
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(3.0, 1.0),
            Point2::new(1.0, 1.0),
        ])
        .translated(Vec2::new(dx, dy))
    }

    /// Isosceles trapezoid with base 4 and top 2; its right leg is not
    /// parallel to corner 0's side edge
    fn trapezoid() -> Quad {
        Quad::new([
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(3.0, 2.0),
            Point2::new(1.0, 2.0),
        ])
    }

    #[test]
    fn test_sheared_penetration_uses_slab_height() {
        // The slanted side edge is sqrt(2) long but the slab is only 1 tall
        let lower = sheared(0.0, 0.0);
        let upper = sheared(0.5, 0.8);
        let contact = collision_info(&lower, &upper).unwrap();

        assert_relative_eq!(contact.depth, 0.2, epsilon = 1e-5);
        assert_relative_eq!(contact.normal, Vec2::new(0.0, 1.0), epsilon = 1e-5);

        let push = contact.normal * contact.depth;
        assert!(hit_test(&lower, &upper.translated(push * 0.9)));
        assert!(!hit_test(&lower, &upper.translated(push + contact.normal * 1e-4)));
    }

    #[test]
    fn test_sheared_penetration_against_square() {
        let lower = sheared(0.0, 0.0);
        let square = Quad::from_center(1.5, 1.3, 0.5, 0.5);
        let contact = collision_info(&lower, &square).unwrap();

        assert_relative_eq!(contact.depth, 0.2, epsilon = 1e-5);
        assert_relative_eq!(contact.normal, Vec2::new(0.0, 1.0), epsilon = 1e-5);

        let separated = square.translated(contact.normal * (contact.depth + 1e-4));
        assert!(!hit_test(&lower, &separated));
    }

    #[test]
    fn test_trapezoid_needs_both_passes() {
        // Inside the slabs spanned by the trapezoid's corner 0 edges but
        // beyond its slanted right leg; only the square's own axes separate
        let trapezoid = trapezoid();
        let square = Quad::from_center(4.3, 1.6, 0.2, 0.2);

        assert!(!separated_by_slabs_of(&trapezoid, &square));
        assert!(separated_by_slabs_of(&square, &trapezoid));
        assert!(!hit_test(&trapezoid, &square));
        assert!(!hit_test(&square, &trapezoid));
    }

    #[test]
    fn test_trapezoid_hit_test_is_symmetric() {
        let trapezoid = trapezoid();
        let inside = Quad::from_center(3.0, 1.0, 0.3, 0.3);
        assert!(hit_test(&trapezoid, &inside));
        assert!(hit_test(&inside, &trapezoid));

        for step in 0..28 {
            let x = -1.5 + step as f32 * 0.25;
            let square = Quad::from_center(x, 1.0, 0.2, 0.2);
            assert_eq!(
                hit_test(&trapezoid, &square),
                hit_test(&square, &trapezoid),
                "asymmetric at x = {}",
                x
            );
        }
    }

    #[test]
    fn test_degenerate_edge_does_not_panic() {
        let p = Point2::new(0.0, 0.0);
        let collapsed = Quad::new([p, p, Point2::new(0.0, 1.0), Point2::new(0.0, 1.0)]);
        let square = unit_square(0.0, 0.5);

        // Answers are approximate; only finiteness is guaranteed
        let _ = hit_test(&collapsed, &square);
        let _ = collision_info(&collapsed, &square);
        let impact = time_of_impact(&collapsed, &square, Vec2::new(1.0, 0.0), VELOCITY_EPSILON);
        assert!(!impact.toi.is_nan());
    }
}
