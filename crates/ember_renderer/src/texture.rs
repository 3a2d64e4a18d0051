//! Textures supply the colour a material sees at a surface point.

use ember_math::{Color, Point3};
use image::RgbImage;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Texture {path} has no pixels")]
    Empty { path: String },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// Colour returned by image textures that failed to load.
pub const MISSING_TEXTURE_COLOR: Color = Color::new(0.0, 1.0, 1.0);

/// A colour as a function of surface coordinates and position.
pub trait Texture: Send + Sync {
    fn value(&self, u: f64, v: f64, p: Point3) -> Color;
}

/// A texture with one constant colour.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    color: Color,
}

impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(Color::new(r, g, b))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f64, _v: f64, _p: Point3) -> Color {
        self.color
    }
}

/// A 3D checkerboard alternating between two textures.
///
/// Cells are selected by the sign of `sin(10x)·sin(10y)·sin(10z)`, so the
/// pattern is solid in space rather than painted on in UV.
pub struct CheckerTexture {
    odd: Arc<dyn Texture>,
    even: Arc<dyn Texture>,
}

impl CheckerTexture {
    pub fn new(odd: Arc<dyn Texture>, even: Arc<dyn Texture>) -> Self {
        Self { odd, even }
    }

    pub fn from_colors(odd: Color, even: Color) -> Self {
        Self::new(Arc::new(SolidColor::new(odd)), Arc::new(SolidColor::new(even)))
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f64, v: f64, p: Point3) -> Color {
        let sines = (10.0 * p.x).sin() * (10.0 * p.y).sin() * (10.0 * p.z).sin();
        if sines < 0.0 {
            self.odd.value(u, v, p)
        } else {
            self.even.value(u, v, p)
        }
    }
}

/// A texture backed by a decoded RGB8 image.
///
/// Sampling is nearest-pixel with clamped edges; `v = 0` is the bottom row of
/// the image. A texture whose image failed to load samples as cyan so the
/// failure is visible in the render.
pub struct ImageTexture {
    image: Option<RgbImage>,
    load_error: Option<TextureError>,
}

impl ImageTexture {
    /// Wrap already-decoded pixels.
    pub fn from_image(image: RgbImage) -> Self {
        Self {
            image: Some(image),
            load_error: None,
        }
    }

    /// Load an image file, failing on any decode error.
    pub fn try_open(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();

        let image = image::open(path)
            .map_err(|source| TextureError::Load {
                path: display.clone(),
                source,
            })?
            .to_rgb8();

        if image.width() == 0 || image.height() == 0 {
            return Err(TextureError::Empty { path: display });
        }

        log::debug!(
            "Loaded texture: {} ({}x{})",
            display,
            image.width(),
            image.height()
        );

        Ok(Self::from_image(image))
    }

    /// Load an image file, falling back to the cyan sentinel on failure.
    ///
    /// The failure is logged and kept; see [`ImageTexture::load_error`].
    pub fn open(path: impl AsRef<Path>) -> Self {
        match Self::try_open(path) {
            Ok(texture) => texture,
            Err(err) => {
                log::warn!("{err}; rendering it as cyan");
                Self {
                    image: None,
                    load_error: Some(err),
                }
            }
        }
    }

    /// The error that replaced this texture with the sentinel, if any.
    pub fn load_error(&self) -> Option<&TextureError> {
        self.load_error.as_ref()
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|img| img.dimensions())
    }
}

impl Texture for ImageTexture {
    fn value(&self, u: f64, v: f64, _p: Point3) -> Color {
        let Some(image) = &self.image else {
            return MISSING_TEXTURE_COLOR;
        };
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return MISSING_TEXTURE_COLOR;
        }

        // Flip v to image row order
        let u = u.clamp(0.0, 1.0);
        let v = 1.0 - v.clamp(0.0, 1.0);

        let i = ((u * width as f64) as u32).min(width - 1);
        let j = ((v * height as f64) as u32).min(height - 1);

        let [r, g, b] = image.get_pixel(i, j).0;
        let color_scale = 1.0 / 255.0;
        Color::new(r as f64, g as f64, b as f64) * color_scale
    }
}
