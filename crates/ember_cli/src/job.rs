//! Render job description loaded from JSON.
//!
//! Every field is optional. Anything left out falls back to the scene's own
//! camera and background, then to the built-in render defaults.

use crate::scenes::SceneName;
use anyhow::{Context, Result};
use ember_renderer::{CameraSettings, Color, RenderConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_WIDTH: u32 = 400;
pub const DEFAULT_OUTPUT: &str = "ember.png";
pub const DEFAULT_TEXTURE: &str = "textures/earthmap.jpg";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Job {
    pub scene: SceneName,
    pub image_width: Option<u32>,
    pub samples_per_pixel: Option<u32>,
    pub max_depth: Option<u32>,
    pub seed: Option<u64>,
    pub background: Option<Color>,
    /// Replaces the scene's camera when present
    pub camera: Option<CameraSettings>,
    /// Image for the earth scene
    pub texture: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl Job {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job file {}", path.display()))?;
        let job = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse job file {}", path.display()))?;
        log::debug!("Loaded job file {}", path.display());
        Ok(job)
    }

    /// Camera to render with, given the scene's preferred one.
    pub fn camera_settings(&self, scene_camera: CameraSettings) -> CameraSettings {
        self.camera.unwrap_or(scene_camera)
    }

    /// Render settings for a camera with the given aspect ratio.
    pub fn render_config(&self, aspect_ratio: f64, scene_background: Color) -> RenderConfig {
        let defaults = RenderConfig::default();

        RenderConfig::default()
            .with_width(self.image_width.unwrap_or(DEFAULT_WIDTH), aspect_ratio)
            .with_quality(
                self.samples_per_pixel.unwrap_or(defaults.samples_per_pixel),
                self.max_depth.unwrap_or(defaults.max_depth),
            )
            .with_background(self.background.unwrap_or(scene_background))
            .with_seed(self.seed.unwrap_or(defaults.seed))
    }

    pub fn texture_path(&self) -> &Path {
        self.texture
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_TEXTURE))
    }

    pub fn output_path(&self) -> &Path {
        self.output
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_OUTPUT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_renderer::Point3;

    #[test]
    fn test_empty_job_uses_defaults() {
        let job: Job = serde_json::from_str("{}").expect("valid");
        assert_eq!(job, Job::default());

        let config = job.render_config(2.0, Color::splat(0.25));
        assert_eq!(config.image_width, DEFAULT_WIDTH);
        assert_eq!(config.image_height, DEFAULT_WIDTH / 2);
        assert_eq!(config.samples_per_pixel, 100);
        assert_eq!(config.max_depth, 50);
        assert_eq!(config.background, Color::splat(0.25));
        assert_eq!(job.output_path(), Path::new(DEFAULT_OUTPUT));
    }

    #[test]
    fn test_job_overrides_scene() {
        let job: Job = serde_json::from_str(
            r#"{
                "scene": "random",
                "image_width": 120,
                "samples_per_pixel": 8,
                "background": [0.0, 0.0, 0.0],
                "camera": { "look_from": [1.0, 2.0, 3.0], "aspect_ratio": 1.5 }
            }"#,
        )
        .expect("valid");

        assert_eq!(job.scene, SceneName::Random);

        let camera = job.camera_settings(CameraSettings::default());
        assert_eq!(camera.look_from, Point3::new(1.0, 2.0, 3.0));

        let config = job.render_config(camera.aspect_ratio, Color::ONE);
        assert_eq!((config.image_width, config.image_height), (120, 80));
        assert_eq!(config.samples_per_pixel, 8);
        assert_eq!(config.background, Color::ZERO);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        assert!(serde_json::from_str::<Job>(r#"{ "samples": 4 }"#).is_err());
        assert!(serde_json::from_str::<Job>(r#"{ "scene": "cornell" }"#).is_err());
    }

    #[test]
    fn test_load_reports_missing_file() {
        let err = Job::load(Path::new("no/such/job.json")).expect_err("missing");
        assert!(err.to_string().contains("no/such/job.json"));
    }
}
