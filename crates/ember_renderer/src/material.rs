//! Material trait for surface scattering.

use crate::{hittable::HitRecord, SolidColor, Texture};
use ember_math::{
    gen_f64, near_zero, random_in_unit_sphere, random_unit_vector, reflect, refract, Color,
    Point3, Ray,
};
use rand::RngCore;
use std::sync::Arc;

/// How light interacts with a surface.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `Some((attenuation, scattered_ray))` if the ray scatters,
    /// or `None` if the ray is absorbed.
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)>;

    /// Light emitted at the given surface coordinates and point.
    ///
    /// Most materials return black (no emission).
    fn emitted(&self, _u: f64, _v: f64, _p: Point3) -> Color {
        Color::ZERO
    }
}

/// Lambertian (diffuse) material.
pub struct Lambertian {
    albedo: Arc<dyn Texture>,
}

impl Lambertian {
    /// Diffuse material with a constant albedo.
    pub fn new(albedo: Color) -> Self {
        Self::with_texture(Arc::new(SolidColor::new(albedo)))
    }

    pub fn with_texture(albedo: Arc<dyn Texture>) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if near_zero(scatter_direction) {
            scatter_direction = rec.normal;
        }

        let scattered = Ray::new(rec.p, scatter_direction, ray_in.time());
        let attenuation = self.albedo.value(rec.u, rec.v, rec.p);
        Some((attenuation, scattered))
    }
}

/// Metal (specular) material.
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn fuzz(&self) -> f64 {
        self.fuzz
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)> {
        let reflected = reflect(ray_in.direction(), rec.normal);
        let scattered_dir = reflected + self.fuzz * random_in_unit_sphere(rng);

        // Fuzz can push the reflection below the surface; absorb it then
        if scattered_dir.dot(rec.normal) > 0.0 {
            let scattered = Ray::new(rec.p, scattered_dir, ray_in.time());
            Some((self.albedo, scattered))
        } else {
            None
        }
    }
}

/// Dielectric (glass) material.
pub struct Dielectric {
    /// Index of refraction
    ior: f64,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f64) -> Self {
        Self { ior }
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f64, ior: f64) -> f64 {
        let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)> {
        let attenuation = Color::ONE;
        let refraction_ratio = if rec.front_face {
            1.0 / self.ior
        } else {
            self.ior
        };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract
            || Self::reflectance(cos_theta, refraction_ratio) > gen_f64(rng)
        {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        let scattered = Ray::new(rec.p, direction, ray_in.time());
        Some((attenuation, scattered))
    }
}

/// Diffuse light emitter.
pub struct DiffuseLight {
    emit: Arc<dyn Texture>,
}

impl DiffuseLight {
    /// Create a new diffuse light with the given emission color.
    pub fn new(emit: Color) -> Self {
        Self::with_texture(Arc::new(SolidColor::new(emit)))
    }

    pub fn with_texture(emit: Arc<dyn Texture>) -> Self {
        Self { emit }
    }
}

impl Material for DiffuseLight {
    fn scatter(
        &self,
        _ray_in: &Ray,
        _rec: &HitRecord,
        _rng: &mut dyn RngCore,
    ) -> Option<(Color, Ray)> {
        // Lights don't scatter rays
        None
    }

    fn emitted(&self, u: f64, v: f64, p: Point3) -> Color {
        self.emit.value(u, v, p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CheckerTexture;
    use ember_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record<'a>(material: &'a dyn Material, ray: &Ray, normal: Vec3) -> HitRecord<'a> {
        HitRecord::new(ray, 1.0, normal, (0.5, 0.5), material)
    }

    #[test]
    fn test_lambertian_scatters_off_surface() {
        let material = Lambertian::new(Color::new(0.2, 0.4, 0.6));
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), -Vec3::Y, 0.25);
        let rec = record(&material, &ray, Vec3::Y);
        let mut rng = StdRng::seed_from_u64(5);

        for _ in 0..500 {
            let (attenuation, scattered) = material.scatter(&ray, &rec, &mut rng).expect("scatters");
            assert_eq!(attenuation, Color::new(0.2, 0.4, 0.6));
            assert_eq!(scattered.origin(), rec.p);
            assert_eq!(scattered.time(), 0.25);
            assert!(scattered.direction().dot(rec.normal) >= 0.0);
            assert!(!near_zero(scattered.direction()));
        }
    }

    /// Replays a fixed cycle of raw 64-bit draws.
    struct CycleRng {
        draws: Vec<u64>,
        next: usize,
    }

    impl RngCore for CycleRng {
        fn next_u32(&mut self) -> u32 {
            (self.next_u64() >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            let draw = self.draws[self.next % self.draws.len()];
            self.next += 1;
            draw
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn test_lambertian_falls_back_to_normal_when_sample_cancels_it() {
        // Uniform f64 draws of 0.5, 0.25, 0.5 map to the point (0, -0.5, 0),
        // so the unit sample is exactly -Y and cancels the +Y normal
        let mut rng = CycleRng {
            draws: vec![1 << 63, 1 << 62, 1 << 63],
            next: 0,
        };
        let material = Lambertian::new(Color::splat(0.5));
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), -Vec3::Y, 0.0);
        let rec = record(&material, &ray, Vec3::Y);

        assert_eq!(random_unit_vector(&mut rng), -rec.normal);

        let (_, scattered) = material.scatter(&ray, &rec, &mut rng).expect("scatters");
        assert_eq!(scattered.direction(), rec.normal);
        assert_eq!(scattered.origin(), rec.p);
    }

    #[test]
    fn test_lambertian_attenuation_stays_in_texture_range() {
        let odd = Color::new(0.1, 0.0, 0.3);
        let even = Color::new(0.9, 0.8, 0.7);
        let material =
            Lambertian::with_texture(Arc::new(CheckerTexture::from_colors(odd, even)));
        let mut rng = StdRng::seed_from_u64(9);

        for i in 0..200 {
            let origin = Vec3::new(i as f64 * 0.037, 1.0, i as f64 * -0.051);
            let ray = Ray::new(origin, -Vec3::Y, 0.0);
            let rec = HitRecord::new(&ray, 1.0, Vec3::Y, (0.0, 0.0), &material);

            let (attenuation, _) = material.scatter(&ray, &rec, &mut rng).expect("scatters");
            assert!(attenuation.cmpge(odd.min(even)).all());
            assert!(attenuation.cmple(odd.max(even)).all());
        }
    }

    #[test]
    fn test_metal_mirror_reflection() {
        let material = Metal::new(Color::new(0.8, 0.6, 0.2), 0.0);
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0), 0.0);
        let rec = record(&material, &ray, Vec3::Y);
        let mut rng = StdRng::seed_from_u64(1);

        let (attenuation, scattered) = material.scatter(&ray, &rec, &mut rng).expect("reflects");
        assert_eq!(attenuation, Color::new(0.8, 0.6, 0.2));
        assert_eq!(scattered.direction(), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_metal_fuzz_is_clamped_and_can_absorb() {
        assert_eq!(Metal::new(Color::ONE, 3.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::ONE, -1.0).fuzz(), 0.0);

        // Grazing ray with maximum fuzz: some samples dip below the surface
        let material = Metal::new(Color::ONE, 1.0);
        let ray = Ray::new(Vec3::new(-1.0, 0.01, 0.0), Vec3::new(1.0, -0.01, 0.0), 0.0);
        let rec = record(&material, &ray, Vec3::Y);
        let mut rng = StdRng::seed_from_u64(2);

        let mut absorbed = 0;
        for _ in 0..200 {
            match material.scatter(&ray, &rec, &mut rng) {
                Some((_, scattered)) => assert!(scattered.direction().dot(rec.normal) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let material = Dielectric::new(1.5);
        // Leaving glass at a steep angle: back face, so the ratio is 1.5
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.2, 0.0), 0.0);
        let rec = record(&material, &ray, Vec3::Y);
        assert!(!rec.front_face);
        let mut rng = StdRng::seed_from_u64(4);

        for _ in 0..100 {
            let (attenuation, scattered) = material.scatter(&ray, &rec, &mut rng).expect("scatters");
            assert_eq!(attenuation, Color::ONE);
            // Always reflected back below the surface
            assert!(scattered.direction().y < 0.0);
        }
    }

    #[test]
    fn test_dielectric_mostly_refracts_head_on() {
        let material = Dielectric::new(1.5);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), -Vec3::Y, 0.0);
        let rec = record(&material, &ray, Vec3::Y);
        let mut rng = StdRng::seed_from_u64(8);

        let refracted = (0..1000)
            .filter_map(|_| material.scatter(&ray, &rec, &mut rng))
            .filter(|(_, scattered)| scattered.direction().y < 0.0)
            .count();

        // Schlick gives 4% reflectance at normal incidence
        assert!(refracted > 900, "refracted {refracted} of 1000");
        assert!(refracted < 1000);
    }

    #[test]
    fn test_diffuse_light_emits_and_absorbs() {
        let material = DiffuseLight::new(Color::new(4.0, 4.0, 4.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::Z, 0.0);
        let rec = record(&material, &ray, -Vec3::Z);
        let mut rng = StdRng::seed_from_u64(0);

        assert!(material.scatter(&ray, &rec, &mut rng).is_none());
        assert_eq!(material.emitted(0.0, 0.0, Point3::ZERO), Color::splat(4.0));
        assert_eq!(
            Lambertian::new(Color::ONE).emitted(0.0, 0.0, Point3::ZERO),
            Color::ZERO
        );
    }
}
