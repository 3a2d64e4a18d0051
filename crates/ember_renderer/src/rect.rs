//! Axis-aligned rectangles.
//!
//! Each rectangle lies in a plane `axis = k` and spans a 2D range on the two
//! remaining axes. All three kinds share one implementation parameterised by
//! axis indices.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use ember_math::{Aabb, Interval, Point3, Vec3};
use std::sync::Arc;

/// Half-thickness given to rectangle bounds along their normal, so the slab
/// test never sees a zero-width box.
const RECT_THICKNESS: f64 = 0.0001;

struct AxisRect {
    /// In-plane axes (u along `a`, v along `b`) and the normal axis
    a: usize,
    b: usize,
    normal: usize,
    a_range: (f64, f64),
    b_range: (f64, f64),
    k: f64,
    material: Arc<dyn Material>,
}

impl AxisRect {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let origin = ray.origin();
        let direction = ray.direction();

        let t = (self.k - origin[self.normal]) / direction[self.normal];
        if !ray_t.contains(t) {
            return None;
        }

        let a = origin[self.a] + t * direction[self.a];
        let b = origin[self.b] + t * direction[self.b];
        let (a0, a1) = self.a_range;
        let (b0, b1) = self.b_range;
        if a < a0 || a > a1 || b < b0 || b > b1 {
            return None;
        }

        let mut outward_normal = Vec3::ZERO;
        outward_normal[self.normal] = 1.0;

        let uv = ((a - a0) / (a1 - a0), (b - b0) / (b1 - b0));
        Some(HitRecord::new(
            ray,
            t,
            outward_normal,
            uv,
            self.material.as_ref(),
        ))
    }

    fn bounding_box(&self) -> Aabb {
        let mut min = Point3::ZERO;
        let mut max = Point3::ZERO;

        min[self.a] = self.a_range.0;
        max[self.a] = self.a_range.1;
        min[self.b] = self.b_range.0;
        max[self.b] = self.b_range.1;
        min[self.normal] = self.k - RECT_THICKNESS;
        max[self.normal] = self.k + RECT_THICKNESS;

        Aabb::new(min, max)
    }
}

/// Rectangle in the plane `z = k`, spanning `x0..x1` and `y0..y1`.
pub struct XyRect(AxisRect);

impl XyRect {
    pub fn new(
        (x0, x1): (f64, f64),
        (y0, y1): (f64, f64),
        k: f64,
        material: Arc<dyn Material>,
    ) -> Self {
        Self(AxisRect {
            a: 0,
            b: 1,
            normal: 2,
            a_range: (x0, x1),
            b_range: (y0, y1),
            k,
            material,
        })
    }
}

/// Rectangle in the plane `y = k`, spanning `x0..x1` and `z0..z1`.
pub struct XzRect(AxisRect);

impl XzRect {
    pub fn new(
        (x0, x1): (f64, f64),
        (z0, z1): (f64, f64),
        k: f64,
        material: Arc<dyn Material>,
    ) -> Self {
        Self(AxisRect {
            a: 0,
            b: 2,
            normal: 1,
            a_range: (x0, x1),
            b_range: (z0, z1),
            k,
            material,
        })
    }
}

/// Rectangle in the plane `x = k`, spanning `y0..y1` and `z0..z1`.
pub struct YzRect(AxisRect);

impl YzRect {
    pub fn new(
        (y0, y1): (f64, f64),
        (z0, z1): (f64, f64),
        k: f64,
        material: Arc<dyn Material>,
    ) -> Self {
        Self(AxisRect {
            a: 1,
            b: 2,
            normal: 0,
            a_range: (y0, y1),
            b_range: (z0, z1),
            k,
            material,
        })
    }
}

impl Hittable for XyRect {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        self.0.hit(ray, ray_t)
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Option<Aabb> {
        Some(self.0.bounding_box())
    }
}

impl Hittable for XzRect {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        self.0.hit(ray, ray_t)
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Option<Aabb> {
        Some(self.0.bounding_box())
    }
}

impl Hittable for YzRect {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        self.0.hit(ray, ray_t)
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Option<Aabb> {
        Some(self.0.bounding_box())
    }
}
