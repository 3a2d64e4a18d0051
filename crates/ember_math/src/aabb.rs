use crate::{axis, Interval, Point3, Ray};

/// Axis-aligned bounding box given by its minimum and maximum corners.
///
/// `Aabb::default()` is the zero-volume box at the origin. It is a real box,
/// not a stand-in for "no bounds"; callers that may lack bounds use
/// `Option<Aabb>`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Aabb {
    pub min: Point3,
    pub max: Point3,
}

impl Aabb {
    /// Create a box from its corners, taken as given.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Create the box spanned by two arbitrary opposite corners.
    pub fn from_points(a: Point3, b: Point3) -> Self {
        Self::new(a.min(b), a.max(b))
    }

    /// Grow this box to also cover `other`.
    ///
    /// Both corners track both inputs: the new minimum is the component-wise
    /// minimum of the two minimums, the new maximum the component-wise
    /// maximum of the two maximums.
    pub fn surround(&mut self, other: &Aabb) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// The smallest box covering both inputs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        let mut merged = *box0;
        merged.surround(box1);
        merged
    }

    /// Test if a ray intersects this box within `ray_t`.
    ///
    /// Slab method: each axis narrows the parametric interval to where the
    /// ray is between that axis' two planes. A zero direction component gives
    /// an infinite reciprocal, so a ray parallel to a slab is either always
    /// or never inside it.
    pub fn hit(&self, ray: &Ray, mut ray_t: Interval) -> bool {
        let origin = ray.origin();
        let direction = ray.direction();

        for a in 0..3 {
            let inv_d = 1.0 / axis(direction, a);
            let orig = axis(origin, a);

            let mut t0 = (axis(self.min, a) - orig) * inv_d;
            let mut t1 = (axis(self.max, a) - orig) * inv_d;
            if inv_d < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }

        true
    }
}
