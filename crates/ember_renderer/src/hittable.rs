//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Material, Ray};
use ember_math::{Aabb, Interval, Point3, Vec3};
use std::sync::Arc;

/// Record of a ray-object intersection.
///
/// Borrows the material of the primitive that was hit, so a record never
/// outlives the scene it came from.
#[derive(Clone)]
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Point3,
    /// Surface normal at intersection (always points against the ray)
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: &'a dyn Material,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Surface coordinates
    pub u: f64,
    pub v: f64,
    /// Whether the ray approached from the side the outward normal points to
    pub front_face: bool,
}

impl<'a> HitRecord<'a> {
    /// Build a record for a hit at `t` along `ray`.
    ///
    /// `outward_normal` must be unit length and point out of the surface; the
    /// stored normal is flipped to face the ray when needed.
    pub fn new(
        ray: &Ray,
        t: f64,
        outward_normal: Vec3,
        (u, v): (f64, f64),
        material: &'a dyn Material,
    ) -> Self {
        let mut rec = Self {
            p: ray.at(t),
            normal: outward_normal,
            material,
            t,
            u,
            v,
            front_face: true,
        };
        rec.set_face_normal(ray, outward_normal);
        rec
    }

    /// Set the face normal based on ray direction and outward normal.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        // If the ray and normal point in the same direction, we're inside
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Return the nearest intersection with `ray` whose parameter lies in
    /// `ray_t`, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;

    /// Bounds of this object over the shutter window `[time0, time1]`.
    ///
    /// `None` means the object has no finite bounds and cannot be placed in
    /// a BVH.
    fn bounding_box(&self, time0: f64, time1: f64) -> Option<Aabb>;
}

/// An ordered list of hittable objects queried by linear scan.
#[derive(Clone, Default)]
pub struct HittableList {
    objects: Vec<Arc<dyn Hittable>>,
}

impl HittableList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Arc<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Add an object by value.
    pub fn push<H: Hittable + 'static>(&mut self, object: H) {
        self.add(Arc::new(object));
    }

    pub fn clear(&mut self) {
        self.objects.clear();
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects(&self) -> &[Arc<dyn Hittable>] {
        &self.objects
    }

    pub fn into_objects(self) -> Vec<Arc<dyn Hittable>> {
        self.objects
    }
}

impl From<Vec<Arc<dyn Hittable>>> for HittableList {
    fn from(objects: Vec<Arc<dyn Hittable>>) -> Self {
        Self { objects }
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;

        for object in &self.objects {
            // Skip anything farther than the best hit so far
            let max = closest.as_ref().map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = object.hit(ray, ray_t.with_max(max)) {
                closest = Some(rec);
            }
        }

        closest
    }

    fn bounding_box(&self, time0: f64, time1: f64) -> Option<Aabb> {
        self.objects
            .iter()
            .filter_map(|object| object.bounding_box(time0, time1))
            .reduce(|acc, bbox| Aabb::surrounding(&acc, &bbox))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Lambertian, Sphere};
    use ember_math::Color;

    fn grey() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Color::splat(0.5)))
    }

    #[test]
    fn test_list_returns_nearest() {
        let mut world = HittableList::new();
        world.push(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, grey()));
        world.push(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, grey()));
        world.push(Sphere::new(Vec3::new(0.0, 0.0, -6.0), 1.0, grey()));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 0.0);
        let rec = world.hit(&ray, Interval::from_min(0.001)).expect("should hit");

        assert!((rec.t - 2.0).abs() < 1e-9);
        assert!((rec.p.z + 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_list_miss() {
        let mut world = HittableList::new();
        world.push(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, grey()));

        let ray = Ray::new(Vec3::ZERO, Vec3::Y, 0.0);
        assert!(world.hit(&ray, Interval::from_min(0.001)).is_none());
    }

    #[test]
    fn test_list_bounding_box() {
        let mut world = HittableList::new();
        assert!(world.bounding_box(0.0, 1.0).is_none());

        world.push(Sphere::new(Vec3::new(5.0, 5.0, 5.0), 1.0, grey()));
        world.push(Sphere::new(Vec3::new(-5.0, 2.0, 0.0), 1.0, grey()));
        let bbox = world.bounding_box(0.0, 1.0).expect("bounded");

        // The origin is not part of the union
        assert_eq!(bbox.min, Vec3::new(-6.0, 1.0, -1.0));
        assert_eq!(bbox.max, Vec3::new(6.0, 6.0, 6.0));
    }

    #[test]
    fn test_list_bounding_box_skips_unbounded_members() {
        let mut world = HittableList::new();
        world.push(HittableList::new());
        assert!(world.bounding_box(0.0, 1.0).is_none());

        world.push(Sphere::new(Vec3::ZERO, 2.0, grey()));
        let bbox = world.bounding_box(0.0, 1.0).expect("bounded");
        assert_eq!(bbox.max, Vec3::splat(2.0));
    }

    #[test]
    fn test_face_normal_flips_for_inside_hits() {
        let material = Lambertian::new(Color::ONE);
        let ray = Ray::new(Vec3::ZERO, Vec3::X, 0.0);
        let rec = HitRecord::new(&ray, 1.0, Vec3::X, (0.0, 0.0), &material);

        assert!(!rec.front_face);
        assert_eq!(rec.normal, -Vec3::X);
        assert_eq!(rec.p, Vec3::X);
    }
}
