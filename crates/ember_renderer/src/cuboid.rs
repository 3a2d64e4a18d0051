//! Axis-aligned box built from six rectangles.

use crate::{
    hittable::{HitRecord, Hittable, HittableList},
    Material, Ray, XyRect, XzRect, YzRect,
};
use ember_math::{Aabb, Interval, Point3};
use std::sync::Arc;

/// A rectangular prism between two corners, every face sharing one material.
pub struct Cuboid {
    min: Point3,
    max: Point3,
    sides: HittableList,
}

impl Cuboid {
    pub fn new(p0: Point3, p1: Point3, material: Arc<dyn Material>) -> Self {
        let Aabb { min, max } = Aabb::from_points(p0, p1);

        let mut sides = HittableList::new();
        let x = (min.x, max.x);
        let y = (min.y, max.y);
        let z = (min.z, max.z);

        sides.push(XyRect::new(x, y, max.z, material.clone()));
        sides.push(XyRect::new(x, y, min.z, material.clone()));
        sides.push(XzRect::new(x, z, max.y, material.clone()));
        sides.push(XzRect::new(x, z, min.y, material.clone()));
        sides.push(YzRect::new(y, z, max.x, material.clone()));
        sides.push(YzRect::new(y, z, min.x, material));

        Self { min, max, sides }
    }
}

impl Hittable for Cuboid {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        self.sides.hit(ray, ray_t)
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Option<Aabb> {
        Some(Aabb::new(self.min, self.max))
    }
}
