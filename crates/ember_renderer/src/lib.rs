//! Ember renderer - CPU Monte Carlo path tracing.
//!
//! Scenes are built from [`Hittable`] primitives that share [`Material`]s and
//! [`Texture`]s through `Arc`, usually wrapped in a [`BvhNode`]. A [`Camera`]
//! and a [`RenderConfig`] then drive [`render`], which traces rows in
//! parallel into an [`ImageBuffer`] of averaged linear radiance.
//!
//! All randomness flows through an explicit `&mut dyn RngCore`, so a fixed
//! seed reproduces an image exactly.

mod bvh;
mod camera;
mod cuboid;
mod hittable;
mod material;
mod moving_sphere;
mod rect;
mod renderer;
mod sphere;
mod texture;

pub use bvh::{BvhError, BvhNode, BvhResult};
pub use camera::{Camera, CameraSettings};
pub use cuboid::Cuboid;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, DiffuseLight, Lambertian, Material, Metal};
pub use moving_sphere::MovingSphere;
pub use rect::{XyRect, XzRect, YzRect};
pub use renderer::{
    color_to_rgb8, ray_color, render, render_pixel, ImageBuffer, RenderConfig,
    MAX_DERIVED_HEIGHT, T_MIN,
};
pub use sphere::{sphere_uv, Sphere};
pub use texture::{
    CheckerTexture, ImageTexture, SolidColor, Texture, TextureError, TextureResult,
    MISSING_TEXTURE_COLOR,
};

/// Re-export the math types scenes are built with
pub use ember_math::{Aabb, Color, Interval, Point3, Ray, Vec3};
