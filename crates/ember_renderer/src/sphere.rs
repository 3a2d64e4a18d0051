//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use ember_math::{Aabb, Interval, Point3, Vec3};
use std::f64::consts::PI;
use std::sync::Arc;

/// A sphere primitive.
///
/// A negative radius keeps the same surface but turns the normals inward,
/// which is how hollow glass is modelled.
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Arc<dyn Material>,
}

impl Sphere {
    pub fn new(center: Point3, radius: f64, material: Arc<dyn Material>) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        hit_sphere(ray, ray_t, self.center, self.radius, self.material.as_ref())
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Option<Aabb> {
        Some(sphere_bounds(self.center, self.radius))
    }
}

/// Intersect a ray with a sphere at a fixed centre.
///
/// Shared by static and moving spheres.
pub(crate) fn hit_sphere<'a>(
    ray: &Ray,
    ray_t: Interval,
    center: Point3,
    radius: f64,
    material: &'a dyn Material,
) -> Option<HitRecord<'a>> {
    let oc = ray.origin() - center;
    let a = ray.direction().length_squared();
    let half_b = oc.dot(ray.direction());
    let c = oc.length_squared() - radius * radius;

    let discriminant = half_b * half_b - a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrtd = discriminant.sqrt();

    // Find the nearest root in the acceptable range
    let mut root = (-half_b - sqrtd) / a;
    if !ray_t.contains(root) {
        root = (-half_b + sqrtd) / a;
        if !ray_t.contains(root) {
            return None;
        }
    }

    let outward_normal = (ray.at(root) - center) / radius;
    Some(HitRecord::new(
        ray,
        root,
        outward_normal,
        sphere_uv(outward_normal),
        material,
    ))
}

pub(crate) fn sphere_bounds(center: Point3, radius: f64) -> Aabb {
    let rvec = Vec3::splat(radius.abs());
    Aabb::new(center - rvec, center + rvec)
}

/// Surface coordinates of a point `p` on the unit sphere.
///
/// `u` is the angle around the Y axis starting from -X, `v` the angle from
/// -Y up to +Y, both scaled to [0, 1].
pub fn sphere_uv(p: Vec3) -> (f64, f64) {
    let theta = (-p.y).acos();
    let phi = (-p.z).atan2(p.x) + PI;

    (phi / (2.0 * PI), theta / PI)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use ember_math::Color;

    fn unit_sphere() -> Sphere {
        Sphere::new(
            Vec3::ZERO,
            1.0,
            Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5))),
        )
    }

    #[test]
    fn test_sphere_hit_front() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0), 0.0);

        let rec = sphere
            .hit(&ray, Interval::from_min(0.001))
            .expect("ray aims at the sphere");

        assert!((rec.t - 4.0).abs() < 1e-12);
        assert!((rec.p - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-12);
        assert!((rec.normal - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-12);
        assert!(rec.front_face);
    }

    #[test]
    fn test_sphere_hit_far_root_from_inside() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::X, 0.0);

        let rec = sphere.hit(&ray, Interval::from_min(0.001)).expect("inside hit");

        assert!((rec.t - 1.0).abs() < 1e-12);
        assert!(!rec.front_face);
        // Normal faces back against the ray
        assert!((rec.normal + Vec3::X).length() < 1e-12);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere();

        let ray = Ray::new(Vec3::new(0.0, 5.0, 5.0), Vec3::new(0.0, 0.0, -1.0), 0.0);
        assert!(sphere.hit(&ray, Interval::from_min(0.001)).is_none());

        // Both roots behind the interval
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, 1.0), 0.0);
        assert!(sphere.hit(&ray, Interval::from_min(0.001)).is_none());

        // Interval ends before the surface
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0), 0.0);
        assert!(sphere.hit(&ray, Interval::new(0.001, 3.5)).is_none());
    }

    #[test]
    fn test_negative_radius_flips_normal() {
        let sphere = Sphere::new(
            Vec3::ZERO,
            -1.0,
            Arc::new(Lambertian::new(Color::ONE)),
        );
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0), 0.0);
        let rec = sphere.hit(&ray, Interval::from_min(0.001)).expect("hit");

        assert!((rec.t - 4.0).abs() < 1e-12);
        assert!(!rec.front_face);
        assert_eq!(
            sphere.bounding_box(0.0, 1.0),
            Some(Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0)))
        );
    }

    #[test]
    fn test_sphere_uv() {
        let cases = [
            (Vec3::new(1.0, 0.0, 0.0), (0.5, 0.5)),
            (Vec3::new(-1.0, 0.0, 0.0), (0.0, 0.5)),
            (Vec3::new(0.0, 1.0, 0.0), (0.5, 1.0)),
            (Vec3::new(0.0, -1.0, 0.0), (0.5, 0.0)),
            (Vec3::new(0.0, 0.0, 1.0), (0.25, 0.5)),
            (Vec3::new(0.0, 0.0, -1.0), (0.75, 0.5)),
        ];

        for (p, (u, v)) in cases {
            let (got_u, got_v) = sphere_uv(p);
            assert!((got_u - u).abs() < 1e-9, "u for {p:?}: {got_u}");
            assert!((got_v - v).abs() < 1e-9, "v for {p:?}: {got_v}");
        }
    }
}
