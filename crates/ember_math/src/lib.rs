//! Ember math - vectors, rays, intervals and bounding boxes.
//!
//! Everything the renderer computes with lives here. Vectors are
//! double precision (`glam::DVec3`), aliased as `Vec3`, `Point3` and `Color`
//! depending on what they carry.

pub use glam::{dvec3, DVec3};

mod aabb;
mod interval;
mod ray;
mod sampling;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;
pub use sampling::{
    gen_f64, gen_range, random_in_hemisphere, random_in_unit_disk, random_in_unit_sphere,
    random_unit_vector, random_vec, random_vec_range,
};

/// Three-component vector.
pub type Vec3 = DVec3;

/// A position in world space.
pub type Point3 = DVec3;

/// Linear RGB, nominally in [0, 1] per channel before tonemapping.
pub type Color = DVec3;

/// Component magnitude below which a vector counts as zero.
const NEAR_ZERO: f64 = 1e-8;

/// True if every component of `v` is close to zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.x.abs() < NEAR_ZERO && v.y.abs() < NEAR_ZERO && v.z.abs() < NEAR_ZERO
}

/// Mirror `v` about the normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with normal `n`.
///
/// `etai_over_etat` is the ratio of refractive indices across the surface.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Component accessor by axis index (0=X, 1=Y, 2=Z).
#[inline]
pub fn axis(v: Vec3, axis: usize) -> f64 {
    match axis {
        0 => v.x,
        1 => v.y,
        _ => v.z,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
    }

    #[test]
    fn test_near_zero() {
        assert!(near_zero(Vec3::new(1e-9, -1e-9, 0.0)));
        assert!(!near_zero(Vec3::new(1e-9, 1e-3, 0.0)));
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_straight_through() {
        // Head-on incidence passes straight through regardless of the ratio
        let out = refract(-Vec3::Z, Vec3::Z, 1.0 / 1.5);
        assert!((out - (-Vec3::Z)).length() < 1e-12);
    }

    #[test]
    fn test_refract_matches_snell() {
        let eta = 1.0 / 1.5;
        let incoming = Vec3::new(1.0, -1.0, 0.0).normalize();
        let out = refract(incoming, Vec3::Y, eta);

        let sin_in = incoming.x;
        let sin_out = out.normalize().x;
        assert!((sin_out - eta * sin_in).abs() < 1e-9);
        assert!((out.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_axis() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(axis(v, 0), 1.0);
        assert_eq!(axis(v, 1), 2.0);
        assert_eq!(axis(v, 2), 3.0);
    }
}
