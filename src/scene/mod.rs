//! Inputs consumed by the projector: hit records, proxy identities and occluder snapshots.

use crate::errors::ShadowError;
use crate::float_types::{
    Real,
    parry3d::shape::{SharedShape, TriMesh},
    rapier3d::prelude::{Collider, ColliderBuilder},
};
use nalgebra::{Isometry3, Point3, Vector3};

pub mod rapier;
pub mod shapes;

pub use rapier::RapierScene;
pub use shapes::ShapeScene;

/// Identity of a scene object that rays can hit.
///
/// The occluder carries the id of its own collision proxy so the projector can
/// tell a self-hit from a hit on the surface behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProxyId(pub u64);

impl From<u64> for ProxyId {
    fn from(value: u64) -> Self {
        ProxyId(value)
    }
}

/// One surface intersection reported by a [`SceneQuery`](crate::traits::SceneQuery).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// World-space intersection point.
    pub point: Point3<Real>,
    /// Surface normal at `point`.
    pub normal: Vector3<Real>,
    /// Ray parameter of the hit, in units of the ray direction's length.
    pub time_of_impact: Real,
    /// Which object was struck.
    pub proxy: ProxyId,
}

/// Scale of the occluder's self proxy relative to the occluder.
///
/// Rays through silhouette vertices slip past a proxy this size, rays through
/// vertices hidden behind the occluder still strike it.
pub const DEFAULT_PROXY_SHRINK: Real = 0.9999;

/// Snapshot of the occluder for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Occluder {
    /// Local-space vertices.
    pub vertices: Vec<Point3<Real>>,
    /// Local-space triangles over `vertices`; empty for a bare point cloud.
    pub triangles: Vec<[u32; 3]>,
    /// World placement (rotation + translation).
    pub position: Isometry3<Real>,
    /// Per-axis local scale, applied before `position`.
    pub scale: Vector3<Real>,
    /// The occluder's own collision proxy.
    pub proxy: ProxyId,
}

impl Occluder {
    pub fn new(vertices: Vec<Point3<Real>>, proxy: ProxyId) -> Self {
        Occluder {
            vertices,
            triangles: Vec::new(),
            position: Isometry3::identity(),
            scale: Vector3::new(1.0, 1.0, 1.0),
            proxy,
        }
    }

    /// Occluder with a surface, so its self proxy can follow concave shapes.
    pub fn from_mesh(
        vertices: Vec<Point3<Real>>,
        triangles: Vec<[u32; 3]>,
        proxy: ProxyId,
    ) -> Self {
        let mut occluder = Self::new(vertices, proxy);
        occluder.triangles = triangles;
        occluder
    }

    /// Occluder built from a parry trimesh.
    pub fn from_trimesh(trimesh: &TriMesh, proxy: ProxyId) -> Self {
        Self::from_mesh(trimesh.vertices().to_vec(), trimesh.indices().to_vec(), proxy)
    }

    pub fn with_position(mut self, position: Isometry3<Real>) -> Self {
        self.position = position;
        self
    }

    pub fn with_scale(mut self, scale: Vector3<Real>) -> Self {
        self.scale = scale;
        self
    }

    /// Map a local-space point to world space: scale, then rotate, then translate.
    pub fn to_world(&self, local: &Point3<Real>) -> Point3<Real> {
        self.position * Point3::from(local.coords.component_mul(&self.scale))
    }

    /// World-space position of vertex `index`.
    pub fn world_vertex(&self, index: usize) -> Option<Point3<Real>> {
        self.vertices.get(index).map(|v| self.to_world(v))
    }

    pub fn world_vertices(&self) -> impl Iterator<Item = Point3<Real>> + '_ {
        self.vertices.iter().map(|v| self.to_world(v))
    }

    /// Collision shape of the occluder shrunk by `shrink` about its local origin,
    /// in local space; place it at [`position`](Self::position).
    ///
    /// This proxy must replace the occluder's full-size collider in the scene and
    /// carry [`proxy`](Self::proxy). A trimesh is built from `triangles`, the
    /// convex hull of the vertices otherwise.
    ///
    /// ## Errors
    /// `ProxyShape` when the vertices span no volume, `TriMesh` when parry
    /// rejects the triangles.
    pub fn proxy_shape(&self, shrink: Real) -> Result<SharedShape, ShadowError> {
        let points: Vec<Point3<Real>> = self
            .vertices
            .iter()
            .map(|v| Point3::from(v.coords.component_mul(&self.scale) * shrink))
            .collect();

        if self.triangles.is_empty() {
            SharedShape::convex_hull(&points)
                .ok_or(ShadowError::ProxyShape { points: points.len() })
        } else {
            Ok(SharedShape::new(TriMesh::new(points, self.triangles.clone())?))
        }
    }

    /// [`proxy_shape`](Self::proxy_shape) as a Rapier collider at the occluder's position.
    pub fn proxy_collider(&self, shrink: Real) -> Result<Collider, ShadowError> {
        Ok(ColliderBuilder::new(self.proxy_shape(shrink)?)
            .position(self.position)
            .build())
    }
}
