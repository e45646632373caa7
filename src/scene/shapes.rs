//! A self-contained scene made of positioned parry shapes.

use crate::float_types::{
    Real,
    parry3d::{
        query::Ray,
        shape::{Cuboid, SharedShape},
    },
};
use crate::errors::ShadowError;
use crate::scene::{Occluder, ProxyId, RayHit};
use crate::traits::SceneQuery;
use nalgebra::{Isometry3, Vector3};

/// One collidable object of a [`ShapeScene`].
#[derive(Clone)]
pub struct SceneShape {
    pub id: ProxyId,
    pub position: Isometry3<Real>,
    pub shape: SharedShape,
}

impl std::fmt::Debug for SceneShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneShape")
            .field("id", &self.id)
            .field("position", &self.position)
            .field("shape_type", &self.shape.shape_type())
            .finish()
    }
}

/// Brute-force ray casting over a list of shapes.
///
/// Useful for tests and small scenes; larger hosts should implement
/// [`SceneQuery`] over their own acceleration structure or use
/// [`RapierScene`](crate::scene::RapierScene).
#[derive(Debug, Clone, Default)]
pub struct ShapeScene {
    shapes: Vec<SceneShape>,
}

impl ShapeScene {
    pub const fn new() -> Self {
        ShapeScene { shapes: Vec::new() }
    }

    /// Add `shape` at `position`, identified by `id`.
    pub fn insert(&mut self, id: ProxyId, position: Isometry3<Real>, shape: SharedShape) {
        self.shapes.push(SceneShape { id, position, shape });
    }

    /// Chained version of [`insert`](Self::insert).
    pub fn with_shape(
        mut self,
        id: ProxyId,
        position: Isometry3<Real>,
        shape: SharedShape,
    ) -> Self {
        self.insert(id, position, shape);
        self
    }

    /// Add an axis-aligned box with the given half extents centred at `position`.
    pub fn with_cuboid(
        self,
        id: ProxyId,
        position: Isometry3<Real>,
        half_extents: Vector3<Real>,
    ) -> Self {
        self.with_shape(id, position, SharedShape::new(Cuboid::new(half_extents)))
    }

    /// Add the self proxy of `occluder`, shrunk by `shrink`, under the occluder's
    /// own id. Use instead of a full-size collider for the occluder.
    pub fn with_occluder_proxy(
        self,
        occluder: &Occluder,
        shrink: Real,
    ) -> Result<Self, ShadowError> {
        let shape = occluder.proxy_shape(shrink)?;
        Ok(self.with_shape(occluder.proxy, occluder.position, shape))
    }

    /// Remove every shape carrying `id`. Returns how many were removed.
    pub fn remove(&mut self, id: ProxyId) -> usize {
        let before = self.shapes.len();
        self.shapes.retain(|s| s.id != id);
        before - self.shapes.len()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn shapes(&self) -> &[SceneShape] {
        &self.shapes
    }
}

impl SceneQuery for ShapeScene {
    fn cast_ray(&self, ray: &Ray, max_toi: Real, solid: bool) -> Vec<RayHit> {
        let mut hits: Vec<RayHit> = self
            .shapes
            .iter()
            .filter_map(|s| {
                s.shape
                    .cast_ray_and_get_normal(&s.position, ray, max_toi, solid)
                    .map(|hit| RayHit {
                        point: ray.point_at(hit.time_of_impact),
                        normal: hit.normal,
                        time_of_impact: hit.time_of_impact,
                        proxy: s.id,
                    })
            })
            .collect();

        // Sort hits by ascending distance (toi):
        hits.sort_by(|a, b| {
            a.time_of_impact
                .partial_cmp(&b.time_of_impact)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits
    }
}
