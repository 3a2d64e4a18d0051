//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with bounded depth
//! - Emissive surfaces over a constant background
//! - Anti-aliasing, depth of field and motion blur via per-sample jitter
//! - Row-parallel rendering with a deterministic RNG per row

use crate::{Camera, Hittable, Ray};
use ember_math::{gen_f64, Color, Interval};
use image::{Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Instant;

/// Closest hit distance accepted by the integrator, to avoid shadow acne.
pub const T_MIN: f64 = 0.001;

/// Largest height `RenderConfig::with_width` will derive.
pub const MAX_DERIVED_HEIGHT: u32 = 16_384;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub image_width: u32,
    pub image_height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Radiance returned by rays that escape the scene
    pub background: Color,
    /// Base seed; each row derives its own generator from it
    pub seed: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            image_height: 225,
            samples_per_pixel: 100,
            max_depth: 50,
            background: Color::new(0.7, 0.8, 1.0),
            seed: 0,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set the width and derive the height from an aspect ratio. The height
    /// is clamped to `1..=MAX_DERIVED_HEIGHT`.
    pub fn with_width(mut self, width: u32, aspect_ratio: f64) -> Self {
        let height = width as f64 / aspect_ratio;
        self.image_width = width;
        self.image_height = if height.is_nan() {
            1
        } else {
            height.clamp(1.0, MAX_DERIVED_HEIGHT as f64) as u32
        };
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples;
        self.max_depth = max_depth;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.image_width as f64 / self.image_height.max(1) as f64
    }
}

/// Compute the color seen by a ray.
///
/// Follows the path through up to `depth` scatter events. Each surface adds
/// its emission and attenuates whatever the scattered ray brings back; rays
/// that escape return `background`.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    background: Color,
    rng: &mut dyn RngCore,
) -> Color {
    // Bounce limit reached, no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::from_min(T_MIN)) else {
        return background;
    };

    let emitted = rec.material.emitted(rec.u, rec.v, rec.p);

    match rec.material.scatter(ray, &rec, rng) {
        Some((attenuation, scattered)) => {
            emitted + attenuation * ray_color(&scattered, world, depth - 1, background, rng)
        }
        None => emitted,
    }
}

/// Convert an averaged linear color to 8-bit RGB.
///
/// Each channel is clamped to `[0, 0.999]`, gamma corrected with a square
/// root and scaled by 255.999 before truncation.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    let channel = |c: f64| (255.999 * c.clamp(0.0, 0.999).sqrt()) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// Render a single pixel with multi-sampling.
///
/// `(x, y)` are image coordinates with `y = 0` the top row. Returns the mean
/// linear radiance over `samples_per_pixel` jittered camera rays.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    if config.samples_per_pixel == 0 {
        return Color::ZERO;
    }

    // Viewport t grows upwards while image rows grow downwards
    let row_from_bottom = config.image_height.saturating_sub(1).saturating_sub(y);
    let u_span = config.image_width.saturating_sub(1).max(1) as f64;
    let v_span = config.image_height.saturating_sub(1).max(1) as f64;

    let mut pixel_color = Color::ZERO;
    for _ in 0..config.samples_per_pixel {
        let s = (x as f64 + gen_f64(rng)) / u_span;
        let t = (row_from_bottom as f64 + gen_f64(rng)) / v_span;
        let ray = camera.get_ray(s, t, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, config.background, rng);
    }

    pixel_color / config.samples_per_pixel as f64
}

/// Averaged linear radiance per pixel, row-major with the top row first.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Tonemapped RGB bytes, three per pixel.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| color_to_rgb8(*color))
            .collect()
    }

    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            Rgb(color_to_rgb8(self.get(x, y)))
        })
    }
}

/// Salt separating row streams from other generators seeded with the same
/// render seed.
const ROW_SEED_SALT: u64 = 0xD1B5_4A32_D192_ED03;

/// Seed for one row's generator. Never equal to `seed` itself.
fn row_seed(seed: u64, row: usize) -> u64 {
    (seed ^ ROW_SEED_SALT).wrapping_add((row as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// Render the entire scene to an image buffer.
///
/// Rows are traced in parallel on the rayon pool. Every row owns a generator
/// seeded from `config.seed` and its index, so a given seed reproduces the
/// same image regardless of how rows are scheduled.
pub fn render(camera: &Camera, world: &dyn Hittable, config: &RenderConfig) -> ImageBuffer {
    let mut image = ImageBuffer::new(config.image_width, config.image_height);
    if image.pixels.is_empty() {
        log::warn!(
            "Nothing to render for a {}x{} image",
            config.image_width,
            config.image_height
        );
        return image;
    }

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        config.image_width,
        config.image_height,
        config.samples_per_pixel,
        config.max_depth
    );

    let start = Instant::now();
    let camera_rays = AtomicU64::new(0);
    let rows_done = AtomicUsize::new(0);
    let height = config.image_height as usize;
    let report_every = (height / 10).max(1);

    image
        .pixels
        .par_chunks_mut(config.image_width as usize)
        .enumerate()
        .for_each(|(y, row)| {
            let mut rng = StdRng::seed_from_u64(row_seed(config.seed, y));

            for (x, pixel) in row.iter_mut().enumerate() {
                *pixel = render_pixel(camera, world, x as u32, y as u32, config, &mut rng);
            }

            camera_rays.fetch_add(
                row.len() as u64 * config.samples_per_pixel as u64,
                Ordering::Relaxed,
            );
            let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
            if done % report_every == 0 || done == height {
                log::debug!("Rows: {}/{}", done, height);
            }
        });

    let elapsed = start.elapsed();
    let rays = camera_rays.into_inner();
    log::info!(
        "Render complete in {:.2}s ({} camera rays, {:.2} Mrays/s)",
        elapsed.as_secs_f64(),
        rays,
        rays as f64 / elapsed.as_secs_f64().max(1e-9) / 1e6
    );

    image
}
