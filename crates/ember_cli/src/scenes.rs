//! Built-in demo scenes.
//!
//! Each scene supplies its geometry together with the camera and background
//! it was composed for. A job file or command-line flags may override both.

use ember_math::{gen_f64, gen_range, random_vec, random_vec_range};
use ember_renderer::{
    CameraSettings, CheckerTexture, Color, Cuboid, Dielectric, DiffuseLight, HittableList,
    ImageTexture, Lambertian, Material, Metal, MovingSphere, Point3, Sphere, Vec3, XyRect,
    XzRect, YzRect,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Names accepted by `--scene` and the job file's `scene` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SceneName {
    /// Checker ground with diffuse, hollow glass and metal spheres
    #[default]
    Initial,
    /// Field of small random spheres with three large ones
    Random,
    /// Image-textured globe
    Earth,
    /// Emissive sphere among glass and metal
    SimpleLight,
    /// Grey ground and one blue sphere
    TwoSpheres,
    /// Rectangles and boxes under an area light
    Boxes,
}

/// A scene ready to render.
pub struct Scene {
    pub world: HittableList,
    pub camera: CameraSettings,
    pub background: Color,
}

const SKY: Color = Color::new(0.7, 0.8, 1.0);

impl SceneName {
    /// Build the scene. `rng` drives any random placement; `texture` is the
    /// image used by the earth scene.
    pub fn build(self, texture: &Path, rng: &mut dyn RngCore) -> Scene {
        match self {
            SceneName::Initial => initial(),
            SceneName::Random => random(rng),
            SceneName::Earth => earth(texture),
            SceneName::SimpleLight => simple_light(),
            SceneName::TwoSpheres => two_spheres(),
            SceneName::Boxes => boxes(),
        }
    }
}

fn checker_ground() -> Arc<dyn Material> {
    Arc::new(Lambertian::with_texture(Arc::new(CheckerTexture::from_colors(
        Color::splat(0.1),
        Color::splat(0.9),
    ))))
}

/// Camera looking down -Z from the origin's neighbourhood at unit-scale
/// spheres.
fn close_up_camera() -> CameraSettings {
    CameraSettings::default()
        .with_position(Point3::new(0.0, 0.5, 2.0), Point3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_lens(40.0, 0.0, 3.0)
        .with_aspect_ratio(3.0 / 2.0)
}

fn initial() -> Scene {
    let mut world = HittableList::new();

    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));

    world.push(Sphere::new(
        Point3::new(0.0, -100.5, -1.0),
        100.0,
        checker_ground(),
    ));
    world.push(Sphere::new(
        Point3::new(0.0, 0.0, -1.0),
        0.5,
        Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5))),
    ));
    world.push(Sphere::new(Point3::new(-1.0, 0.0, -1.0), 0.5, glass.clone()));
    // Negative radius flips the normals, making the glass ball hollow
    world.push(Sphere::new(Point3::new(-1.0, 0.0, -1.0), -0.45, glass));
    world.push(Sphere::new(
        Point3::new(1.0, 0.0, -1.0),
        0.5,
        Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.0)),
    ));

    Scene {
        world,
        camera: close_up_camera(),
        background: SKY,
    }
}

fn random(rng: &mut dyn RngCore) -> Scene {
    let mut world = HittableList::new();

    world.push(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(Color::splat(0.5))),
    ));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f64(rng);
            let center = Point3::new(
                a as f64 + 0.9 * gen_f64(rng),
                0.2,
                b as f64 + 0.9 * gen_f64(rng),
            );

            // Leave room around the large metal sphere
            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                let albedo = random_vec(rng) * random_vec(rng);
                let center1 = center + Vec3::new(0.0, gen_range(rng, 0.0, 0.5), 0.0);
                world.push(MovingSphere::new(
                    (center, center1),
                    (0.0, 1.0),
                    0.2,
                    Arc::new(Lambertian::new(albedo)),
                ));
            } else if choose_mat < 0.95 {
                let albedo = random_vec_range(rng, 0.5, 1.0);
                let fuzz = gen_range(rng, 0.0, 0.5);
                world.push(Sphere::new(center, 0.2, Arc::new(Metal::new(albedo, fuzz))));
            } else {
                world.push(Sphere::new(center, 0.2, Arc::new(Dielectric::new(1.5))));
            }
        }
    }

    world.push(Sphere::new(
        Point3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::new(1.5)),
    ));
    world.push(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    ));
    world.push(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    ));

    let camera = CameraSettings::default()
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.1, 10.0)
        .with_aspect_ratio(3.0 / 2.0)
        .with_shutter(0.0, 1.0);

    Scene {
        world,
        camera,
        background: SKY,
    }
}

fn earth(texture: &Path) -> Scene {
    let earth_texture = Arc::new(ImageTexture::open(texture));
    let mut world = HittableList::new();
    world.push(Sphere::new(
        Point3::ZERO,
        2.0,
        Arc::new(Lambertian::with_texture(earth_texture)),
    ));

    let camera = CameraSettings::default()
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.0, 10.0)
        .with_aspect_ratio(16.0 / 9.0);

    Scene {
        world,
        camera,
        background: SKY,
    }
}

fn simple_light() -> Scene {
    let mut world = HittableList::new();

    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));

    world.push(Sphere::new(
        Point3::new(0.0, -100.5, -1.0),
        100.0,
        checker_ground(),
    ));
    world.push(Sphere::new(
        Point3::new(0.0, 0.0, -1.0),
        0.5,
        Arc::new(DiffuseLight::new(Color::splat(4.0))),
    ));
    world.push(Sphere::new(Point3::new(-1.0, 0.0, -1.0), 0.5, glass.clone()));
    world.push(Sphere::new(Point3::new(-1.0, 0.0, -1.0), -0.45, glass));
    world.push(Sphere::new(
        Point3::new(1.0, 0.0, -1.0),
        0.5,
        Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.0)),
    ));

    Scene {
        world,
        camera: close_up_camera(),
        background: Color::splat(0.02),
    }
}

fn two_spheres() -> Scene {
    let mut world = HittableList::new();
    world.push(Sphere::new(
        Point3::new(0.0, -100.5, -1.0),
        100.0,
        Arc::new(Lambertian::new(Color::splat(0.5))),
    ));
    world.push(Sphere::new(
        Point3::new(0.0, 0.0, -1.0),
        0.5,
        Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5))),
    ));

    let camera = CameraSettings::default()
        .with_lens(90.0, 0.0, 1.0)
        .with_aspect_ratio(16.0 / 9.0);

    Scene {
        world,
        camera,
        background: SKY,
    }
}

fn boxes() -> Scene {
    let mut world = HittableList::new();

    let white: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.73)));
    let red: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let green: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.12, 0.45, 0.15)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::splat(15.0)));

    // Open-fronted room, 0..555 on every axis
    world.push(YzRect::new((0.0, 555.0), (0.0, 555.0), 555.0, green));
    world.push(YzRect::new((0.0, 555.0), (0.0, 555.0), 0.0, red));
    world.push(XzRect::new((213.0, 343.0), (227.0, 332.0), 554.0, light));
    world.push(XzRect::new((0.0, 555.0), (0.0, 555.0), 0.0, white.clone()));
    world.push(XzRect::new((0.0, 555.0), (0.0, 555.0), 555.0, white.clone()));
    world.push(XyRect::new((0.0, 555.0), (0.0, 555.0), 555.0, white.clone()));

    world.push(Cuboid::new(
        Point3::new(130.0, 0.0, 65.0),
        Point3::new(295.0, 165.0, 230.0),
        white.clone(),
    ));
    world.push(Cuboid::new(
        Point3::new(265.0, 0.0, 295.0),
        Point3::new(430.0, 330.0, 460.0),
        white,
    ));

    let camera = CameraSettings::default()
        .with_position(
            Point3::new(278.0, 278.0, -800.0),
            Point3::new(278.0, 278.0, 0.0),
            Vec3::Y,
        )
        .with_lens(40.0, 0.0, 10.0)
        .with_aspect_ratio(1.0);

    Scene {
        world,
        camera,
        background: Color::ZERO,
    }
}
