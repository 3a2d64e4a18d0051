mod job;
mod output;
mod scenes;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use ember_renderer::{render, BvhNode, Camera, CameraSettings};
use job::Job;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scenes::SceneName;
use std::path::PathBuf;

/// Render a demo scene with the Ember path tracer.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Scene to render
    #[arg(long, value_enum)]
    scene: Option<SceneName>,

    /// JSON job file; flags given here override its fields
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Width of the rendered image; height follows the camera aspect ratio
    #[arg(short, long)]
    width: Option<u32>,

    /// Samples per pixel
    #[arg(short, long)]
    samples: Option<u32>,

    /// Maximum bounces per path
    #[arg(short, long)]
    depth: Option<u32>,

    /// Seed for scene layout and sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Image used by the earth scene
    #[arg(long)]
    texture: Option<PathBuf>,

    /// Output file (.png, .ppm or .bmp)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl Args {
    /// Fold command-line overrides into a job.
    fn apply(self, mut job: Job) -> Job {
        if let Some(scene) = self.scene {
            job.scene = scene;
        }
        job.image_width = self.width.or(job.image_width);
        job.samples_per_pixel = self.samples.or(job.samples_per_pixel);
        job.max_depth = self.depth.or(job.max_depth);
        job.seed = self.seed.or(job.seed);
        job.texture = self.texture.or(job.texture);
        job.output = self.output.or(job.output);
        job
    }
}

/// Widest or tallest frame a camera may ask for.
const MAX_ASPECT_RATIO: f64 = 100.0;

fn check_camera(settings: &CameraSettings) -> Result<()> {
    ensure!(
        settings.look_from != settings.look_at,
        "Camera look_from and look_at are both {}",
        settings.look_from
    );
    ensure!(
        settings.vup.cross(settings.look_from - settings.look_at) != ember_math::Vec3::ZERO,
        "Camera vup {} is parallel to the view direction",
        settings.vup
    );
    ensure!(
        settings.aspect_ratio > 0.0 && settings.vfov > 0.0 && settings.vfov < 180.0,
        "Camera needs a positive aspect ratio and a field of view in (0, 180) degrees"
    );
    ensure!(
        (1.0 / MAX_ASPECT_RATIO..=MAX_ASPECT_RATIO).contains(&settings.aspect_ratio),
        "Camera aspect ratio {} is outside 1/{MAX_ASPECT_RATIO}..={MAX_ASPECT_RATIO}",
        settings.aspect_ratio
    );
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();
    let job = match &args.config {
        Some(path) => Job::load(path)?,
        None => Job::default(),
    };
    let job = args.apply(job);

    let seed = job.seed.unwrap_or_default();
    let mut rng = StdRng::seed_from_u64(seed);

    log::info!("Building scene {:?}", job.scene);
    let scene = job.scene.build(job.texture_path(), &mut rng);

    let camera_settings = job.camera_settings(scene.camera);
    check_camera(&camera_settings)?;
    let config = job.render_config(camera_settings.aspect_ratio, scene.background);

    let object_count = scene.world.len();
    let world = BvhNode::from_list(
        scene.world,
        camera_settings.time0,
        camera_settings.time1,
        &mut rng,
    )
    .with_context(|| format!("Failed to build BVH for scene {:?}", job.scene))?;
    log::info!("Scene ready: {} objects", object_count);

    let camera = Camera::new(&camera_settings);
    let image = render(&camera, &world, &config);

    output::save(&image, job.output_path())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_math::Vec3;
    use std::path::Path;

    #[test]
    fn test_flags_override_job() {
        let job = Job {
            scene: SceneName::Earth,
            image_width: Some(800),
            samples_per_pixel: Some(64),
            ..Job::default()
        };
        let args = Args::try_parse_from([
            "ember",
            "--scene",
            "boxes",
            "--samples",
            "4",
            "-o",
            "out.ppm",
        ])
        .expect("valid args");

        let job = args.apply(job);
        assert_eq!(job.scene, SceneName::Boxes);
        assert_eq!(job.image_width, Some(800));
        assert_eq!(job.samples_per_pixel, Some(4));
        assert_eq!(job.output_path(), Path::new("out.ppm"));
    }

    #[test]
    fn test_unknown_scene_is_rejected() {
        assert!(Args::try_parse_from(["ember", "--scene", "cornell"]).is_err());
    }

    #[test]
    fn test_degenerate_cameras_are_rejected() {
        assert!(check_camera(&CameraSettings::default()).is_ok());

        let same_point = CameraSettings::default().with_position(Vec3::ONE, Vec3::ONE, Vec3::Y);
        assert!(check_camera(&same_point).is_err());

        let looking_up = CameraSettings::default().with_position(Vec3::ZERO, Vec3::Y, Vec3::Y);
        assert!(check_camera(&looking_up).is_err());
    }

    #[test]
    fn test_extreme_aspect_ratios_are_rejected() {
        for aspect in [1e-9, 1e-3, 1e3, 1e9] {
            let camera = CameraSettings::default().with_aspect_ratio(aspect);
            assert!(check_camera(&camera).is_err(), "aspect {aspect}");
        }
        for aspect in [0.5, 16.0 / 9.0, MAX_ASPECT_RATIO] {
            let camera = CameraSettings::default().with_aspect_ratio(aspect);
            assert!(check_camera(&camera).is_ok(), "aspect {aspect}");
        }
    }
}
