//! Sphere whose centre moves linearly during the shutter interval.

use crate::{
    hittable::{HitRecord, Hittable},
    sphere::{hit_sphere, sphere_bounds},
    Material, Ray,
};
use ember_math::{Aabb, Interval, Point3};
use std::sync::Arc;

/// A sphere at `center0` at `time0` and `center1` at `time1`.
///
/// Rays see the sphere where it is at their own sample time, which is what
/// produces motion blur.
pub struct MovingSphere {
    center0: Point3,
    center1: Point3,
    time0: f64,
    time1: f64,
    radius: f64,
    material: Arc<dyn Material>,
}

impl MovingSphere {
    pub fn new(
        (center0, center1): (Point3, Point3),
        (time0, time1): (f64, f64),
        radius: f64,
        material: Arc<dyn Material>,
    ) -> Self {
        Self {
            center0,
            center1,
            time0,
            time1,
            radius,
            material,
        }
    }

    /// Centre at `time`, extrapolated linearly outside the keyframes.
    pub fn center(&self, time: f64) -> Point3 {
        let span = self.time1 - self.time0;
        if span == 0.0 {
            return self.center0;
        }
        self.center0 + ((time - self.time0) / span) * (self.center1 - self.center0)
    }
}

impl Hittable for MovingSphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        hit_sphere(
            ray,
            ray_t,
            self.center(ray.time()),
            self.radius,
            self.material.as_ref(),
        )
    }

    fn bounding_box(&self, time0: f64, time1: f64) -> Option<Aabb> {
        let box0 = sphere_bounds(self.center(time0), self.radius);
        let box1 = sphere_bounds(self.center(time1), self.radius);
        Some(Aabb::surrounding(&box0, &box1))
    }
}
