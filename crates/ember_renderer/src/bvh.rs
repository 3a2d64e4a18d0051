//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree over the scene's primitives. Each node caches the box around
//! both children; rays that miss a node's box skip its whole subtree.

use crate::{HitRecord, Hittable, HittableList, Ray};
use ember_math::{axis, Aabb, Interval};
use rand::{Rng, RngCore};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while building a BVH.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BvhError {
    #[error("cannot build a BVH from an empty object list")]
    Empty,

    #[error("object {index} has no bounding box and cannot be placed in a BVH")]
    MissingBoundingBox { index: usize },
}

pub type BvhResult<T> = Result<T, BvhError>;

/// Interior BVH node with two children and the box around both.
///
/// Children are either leaf primitives or further nodes. A node built over a
/// single object holds that object as both children.
pub struct BvhNode {
    left: Arc<dyn Hittable>,
    right: Arc<dyn Hittable>,
    bbox: Aabb,
}

/// An object paired with its precomputed bounds.
struct BuildEntry {
    object: Arc<dyn Hittable>,
    bbox: Aabb,
}

impl BvhNode {
    /// Build a BVH over `objects` for the shutter window `[time0, time1]`.
    ///
    /// Split axes are drawn from `rng`, so a seeded generator gives a
    /// reproducible tree. Fails if the list is empty or any object has no
    /// bounding box.
    pub fn new(
        objects: Vec<Arc<dyn Hittable>>,
        time0: f64,
        time1: f64,
        rng: &mut dyn RngCore,
    ) -> BvhResult<Self> {
        if objects.is_empty() {
            return Err(BvhError::Empty);
        }

        let mut entries = objects
            .into_iter()
            .enumerate()
            .map(|(index, object)| {
                let bbox = object
                    .bounding_box(time0, time1)
                    .ok_or(BvhError::MissingBoundingBox { index })?;
                Ok(BuildEntry { object, bbox })
            })
            .collect::<BvhResult<Vec<_>>>()?;

        let primitives = entries.len();
        let mut total_nodes = 0;
        let root = Self::build(&mut entries, &mut total_nodes, rng);

        log::debug!(
            "Built BVH: {} primitives, {} nodes",
            primitives,
            total_nodes
        );

        Ok(root)
    }

    /// Build a BVH over the contents of a scene list.
    pub fn from_list(
        list: HittableList,
        time0: f64,
        time1: f64,
        rng: &mut dyn RngCore,
    ) -> BvhResult<Self> {
        Self::new(list.into_objects(), time0, time1, rng)
    }

    /// Recursive median-split construction.
    ///
    /// Sorts the span by the minimum corner along a random axis and splits it
    /// in half by count.
    fn build(entries: &mut [BuildEntry], total_nodes: &mut usize, rng: &mut dyn RngCore) -> Self {
        *total_nodes += 1;

        let split_axis = rng.gen_range(0..=2);
        entries.sort_by(|a, b| {
            axis(a.bbox.min, split_axis).total_cmp(&axis(b.bbox.min, split_axis))
        });

        let ((left, left_box), (right, right_box)) = match entries.len() {
            1 => {
                let leaf = (entries[0].object.clone(), entries[0].bbox);
                (leaf.clone(), leaf)
            }
            2 => (
                (entries[0].object.clone(), entries[0].bbox),
                (entries[1].object.clone(), entries[1].bbox),
            ),
            _ => {
                let mid = entries.len() / 2;
                let (lower, upper) = entries.split_at_mut(mid);
                let left = Self::build(lower, total_nodes, rng);
                let right = Self::build(upper, total_nodes, rng);
                let (left_box, right_box) = (left.bbox, right.bbox);
                (
                    (Arc::new(left) as Arc<dyn Hittable>, left_box),
                    (Arc::new(right) as Arc<dyn Hittable>, right_box),
                )
            }
        };

        Self {
            left,
            right,
            bbox: Aabb::surrounding(&left_box, &right_box),
        }
    }

    pub fn bbox(&self) -> Aabb {
        self.bbox
    }
}

impl Hittable for BvhNode {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        if !self.bbox.hit(ray, ray_t) {
            return None;
        }

        // Both children are tested over the full interval; the closer hit wins
        let left = self.left.hit(ray, ray_t);
        let right = self.right.hit(ray, ray_t);

        match (left, right) {
            (Some(left), Some(right)) => {
                if right.t < left.t {
                    Some(right)
                } else {
                    Some(left)
                }
            }
            (left, None) => left,
            (None, right) => right,
        }
    }

    fn bounding_box(&self, _time0: f64, _time1: f64) -> Option<Aabb> {
        Some(self.bbox)
    }
}
