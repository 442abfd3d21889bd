//=========================================================================
// Collision Primitives
//=========================================================================
//
// World-space overlap tests between actors.
//
// An actor stores a `CollisionShape` (what kind of volume) and derives a
// `CollisionPrimitive` (where it is) from its transform on demand, so
// moving an actor never leaves a stale collider behind.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::math::Vec3;
use crate::game::actor::Transform3D;

//=== CollisionShape ======================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionShape {
    /// Axis-aligned box matching the transform's scale (unit cube scaled).
    Box,
    /// Sphere of fixed radius centred on the translation.
    Sphere { radius: f32 },
}

//=== CollisionPrimitive ==================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionPrimitive {
    Box { min: Vec3, max: Vec3 },
    Sphere { center: Vec3, radius: f32 },
}

impl CollisionPrimitive {
    pub fn from_transform(shape: CollisionShape, transform: &Transform3D) -> Self {
        match shape {
            CollisionShape::Box => {
                let half = transform.scale * 0.5;
                Self::Box {
                    min: transform.translation - half,
                    max: transform.translation + half,
                }
            }
            CollisionShape::Sphere { radius } => Self::Sphere {
                center: transform.translation,
                radius,
            },
        }
    }

    pub fn center(&self) -> Vec3 {
        match *self {
            Self::Box { min, max } => (min + max) * 0.5,
            Self::Sphere { center, .. } => center,
        }
    }

    /// Strict overlap: touching faces do not count.
    pub fn intersects(&self, other: &CollisionPrimitive) -> bool {
        match (*self, *other) {
            (Self::Box { min: a_min, max: a_max }, Self::Box { min: b_min, max: b_max }) => {
                a_min.x < b_max.x
                    && b_min.x < a_max.x
                    && a_min.y < b_max.y
                    && b_min.y < a_max.y
                    && a_min.z < b_max.z
                    && b_min.z < a_max.z
            }
            (Self::Sphere { center: a, radius: ra }, Self::Sphere { center: b, radius: rb }) => {
                let reach = ra + rb;
                (a - b).dot(a - b) < reach * reach
            }
            (Self::Box { min, max }, Self::Sphere { center, radius })
            | (Self::Sphere { center, radius }, Self::Box { min, max }) => {
                box_sphere(min, max, center, radius)
            }
        }
    }
}

fn box_sphere(min: Vec3, max: Vec3, center: Vec3, radius: f32) -> bool {
    let closest = Vec3::new(
        center.x.clamp(min.x, max.x),
        center.y.clamp(min.y, max.y),
        center.z.clamp(min.z, max.z),
    );
    let offset = center - closest;
    offset.dot(offset) < radius * radius
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn boxed(at: Vec3, scale: Vec3) -> CollisionPrimitive {
        CollisionPrimitive::from_transform(CollisionShape::Box, &Transform3D::new(at, scale))
    }

    fn sphere(at: Vec3, radius: f32) -> CollisionPrimitive {
        CollisionPrimitive::from_transform(
            CollisionShape::Sphere { radius },
            &Transform3D::new(at, Vec3::ONE),
        )
    }

    #[test]
    fn box_extents_follow_scale() {
        let b = boxed(Vec3::new(0.0, 1.5, -100.0), Vec3::new(4.0, 3.0, 1.0));
        assert_eq!(
            b,
            CollisionPrimitive::Box {
                min: Vec3::new(-2.0, 0.0, -100.5),
                max: Vec3::new(2.0, 3.0, -99.5),
            }
        );
        assert_eq!(b.center(), Vec3::new(0.0, 1.5, -100.0));
    }

    #[test]
    fn overlapping_boxes_intersect() {
        let a = boxed(Vec3::ZERO, Vec3::ONE * 2.0);
        let b = boxed(Vec3::new(1.5, 0.0, 0.0), Vec3::ONE * 2.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn touching_boxes_do_not_intersect() {
        let a = boxed(Vec3::ZERO, Vec3::ONE * 2.0);
        let b = boxed(Vec3::new(2.0, 0.0, 0.0), Vec3::ONE * 2.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn separated_on_one_axis_is_enough() {
        let a = boxed(Vec3::ZERO, Vec3::ONE);
        let b = boxed(Vec3::new(0.0, 0.0, 5.0), Vec3::ONE);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn spheres() {
        let a = sphere(Vec3::ZERO, 1.0);
        assert!(a.intersects(&sphere(Vec3::new(1.5, 0.0, 0.0), 1.0)));
        assert!(!a.intersects(&sphere(Vec3::new(3.0, 0.0, 0.0), 1.0)));
    }

    #[test]
    fn box_and_sphere_in_both_orders() {
        let b = boxed(Vec3::ZERO, Vec3::ONE * 2.0);
        let near = sphere(Vec3::new(1.5, 0.0, 0.0), 1.0);
        let far = sphere(Vec3::new(1.5, 1.5, 0.0), 0.5);

        assert!(b.intersects(&near));
        assert!(near.intersects(&b));
        assert!(!b.intersects(&far));
    }

    #[test]
    fn sphere_containing_box_centre() {
        let b = boxed(Vec3::new(0.0, 1.0, 145.0), Vec3::ONE * 2.0);
        let zone = sphere(Vec3::new(0.0, 1.0, 145.0), 4.0);
        assert!(zone.intersects(&b));
    }
}
