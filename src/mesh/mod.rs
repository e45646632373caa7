//! `ShadowVolume`, the assembled per-frame mesh, and the resources it is written into.

use crate::config::ShadowConfig;
use crate::errors::ShadowError;
use crate::float_types::{
    Real,
    parry3d::{bounding_volume::Aabb, shape::TriMesh},
    rapier3d::prelude::{Collider, ColliderBuilder, SharedShape},
    tolerance,
};
use crate::shadow::{extrude, orderer::OrderedPolygon};
use hashbrown::HashMap;
use nalgebra::{Point3, Vector3};

pub mod resource;

pub use resource::{ColliderTarget, ShadowMeshResource};

/// Render/collision geometry of one frame's shadow.
///
/// Vertices `0..outline_len` are the outline on the struck surface, the rest
/// are their extruded copies.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowVolume {
    /// Front outline followed by the extruded back outline.
    pub vertices: Vec<Point3<Real>>,
    /// Area-weighted vertex normals, recomputed from `triangles`.
    pub normals: Vec<Vector3<Real>>,
    /// Triangle list, counter-clockwise when seen from outside.
    pub triangles: Vec<[u32; 3]>,
    /// Normals of the struck surfaces, one per outline vertex.
    pub surface_normals: Vec<Vector3<Real>>,
    /// Bounds of `vertices`.
    pub bounding_box: Aabb,
}

impl ShadowVolume {
    /// Extrude an ordered outline and assemble the resulting mesh data.
    pub fn assemble(polygon: &OrderedPolygon, config: &ShadowConfig) -> Result<Self, ShadowError> {
        let extrusion = extrude::extrude(polygon, &config.extrusion, config.cap)?;
        Self::from_parts(
            extrusion.vertices,
            extrusion.triangles,
            polygon.surface_normals().collect(),
        )
    }

    /// Build a volume from raw arrays, recomputing normals and bounds.
    ///
    /// ## Errors
    /// `IndexOutOfRange` if a triangle references a missing vertex.
    pub fn from_parts(
        vertices: Vec<Point3<Real>>,
        triangles: Vec<[u32; 3]>,
        surface_normals: Vec<Vector3<Real>>,
    ) -> Result<Self, ShadowError> {
        let len = vertices.len();
        if let Some(&index) = triangles.iter().flatten().find(|&&i| i as usize >= len) {
            return Err(ShadowError::IndexOutOfRange { index: index as usize, len });
        }

        let normals = Self::compute_vertex_normals(&vertices, &triangles);
        let bounding_box = Self::compute_bounding_box(&vertices);
        Ok(ShadowVolume {
            vertices,
            normals,
            triangles,
            surface_normals,
            bounding_box,
        })
    }

    /// Sum of the (area-weighted) face normals around each vertex, normalized.
    pub fn compute_vertex_normals(
        vertices: &[Point3<Real>],
        triangles: &[[u32; 3]],
    ) -> Vec<Vector3<Real>> {
        let mut normals = vec![Vector3::zeros(); vertices.len()];
        for &[a, b, c] in triangles {
            let (a, b, c) = (a as usize, b as usize, c as usize);
            // cross product length is twice the triangle area
            let face = (vertices[b] - vertices[a]).cross(&(vertices[c] - vertices[a]));
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }

        for normal in &mut normals {
            let norm = normal.norm();
            if norm > tolerance() {
                *normal /= norm;
            } else {
                // Default normal for degenerate cases
                *normal = Vector3::new(0.0, 0.0, 1.0);
            }
        }
        normals
    }

    fn compute_bounding_box(vertices: &[Point3<Real>]) -> Aabb {
        let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
        let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
        for v in vertices {
            for axis in 0..3 {
                mins[axis] = mins[axis].min(v[axis]);
                maxs[axis] = maxs[axis].max(v[axis]);
            }
        }

        // If still uninitialized (no vertices), return a trivial AABB at origin
        if mins.x > maxs.x {
            return Aabb::new(Point3::origin(), Point3::origin());
        }
        Aabb::new(mins, maxs)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Number of outline vertices on the struck surface.
    pub fn outline_len(&self) -> usize {
        self.surface_normals.len()
    }

    /// Flat index buffer, three entries per triangle.
    pub fn indices(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// Line segments of the front outline, for debug drawing.
    pub fn outline(&self) -> impl Iterator<Item = (Point3<Real>, Point3<Real>)> + '_ {
        let n = self.outline_len().min(self.vertices.len());
        (0..n).map(move |i| (self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// `true` when every edge is shared by exactly two triangles that traverse it
    /// in opposite directions.
    pub fn is_closed(&self) -> bool {
        let mut directed: HashMap<(u32, u32), usize> = HashMap::new();
        for &[a, b, c] in &self.triangles {
            for edge in [(a, b), (b, c), (c, a)] {
                *directed.entry(edge).or_insert(0) += 1;
            }
        }
        !directed.is_empty()
            && directed
                .iter()
                .all(|(&(a, b), &count)| count == 1 && directed.get(&(b, a)) == Some(&1))
    }

    /// Enclosed volume; positive when the triangles face outwards.
    pub fn signed_volume(&self) -> Real {
        self.triangles
            .iter()
            .map(|&[a, b, c]| {
                let (a, b, c) = (
                    self.vertices[a as usize].coords,
                    self.vertices[b as usize].coords,
                    self.vertices[c as usize].coords,
                );
                a.dot(&b.cross(&c))
            })
            .sum::<Real>()
            / 6.0
    }

    /// Convert to a Parry `TriMesh` for collision queries.
    pub fn to_trimesh(&self) -> Result<TriMesh, ShadowError> {
        Ok(TriMesh::new(self.vertices.clone(), self.triangles.clone())?)
    }

    /// The trimesh wrapped in a `SharedShape` to be used in Rapier.
    pub fn to_shared_shape(&self) -> Result<SharedShape, ShadowError> {
        Ok(SharedShape::new(self.to_trimesh()?))
    }

    /// A Rapier collider holding the volume.
    pub fn to_collider(&self) -> Result<Collider, ShadowError> {
        Ok(ColliderBuilder::new(self.to_shared_shape()?).build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shadow::projector::Projection;

    fn square_volume() -> ShadowVolume {
        let outline = OrderedPolygon::from_projections(
            [[-1.0, -1.0], [1.0, -1.0], [1.0, 1.0], [-1.0, 1.0]]
                .iter()
                .map(|&[x, y]| Projection::new(Point3::new(x, y, 0.0), Vector3::z()))
                .collect(),
        )
        .expect("square orders");
        ShadowVolume::assemble(&outline, &ShadowConfig::default()).expect("square assembles")
    }

    #[test]
    fn square_prism_is_closed_and_outward() {
        let volume = square_volume();
        assert_eq!(volume.vertex_count(), 8);
        assert_eq!(volume.triangle_count(), 12);
        assert_eq!(volume.indices().len(), 36);
        assert!(volume.is_closed());
        // 2 x 2 x 1 box
        assert!((volume.signed_volume() - 4.0).abs() < tolerance());
    }

    #[test]
    fn bounds_and_normals() {
        let volume = square_volume();
        assert_eq!(volume.bounding_box.mins, Point3::new(-1.0, -1.0, -1.0));
        assert_eq!(volume.bounding_box.maxs, Point3::new(1.0, 1.0, 0.0));
        for n in &volume.normals {
            assert!((n.norm() - 1.0).abs() < tolerance());
        }
        // a front corner leans outwards and towards +z
        let front = volume.normals[0];
        assert!(front.z > 0.0);
    }

    #[test]
    fn outline_is_a_closed_loop() {
        let volume = square_volume();
        let segments: Vec<_> = volume.outline().collect();
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[3].1, segments[0].0);
        for w in segments.windows(2) {
            assert_eq!(w[0].1, w[1].0);
        }
    }

    #[test]
    fn rejects_out_of_range_indices() {
        let err = ShadowVolume::from_parts(
            vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)],
            vec![[0, 1, 3]],
            Vec::new(),
        )
        .unwrap_err();
        assert_eq!(err, ShadowError::IndexOutOfRange { index: 3, len: 3 });
    }

    #[test]
    fn converts_to_collision_shapes() {
        let volume = square_volume();
        let trimesh = volume.to_trimesh().expect("non-empty trimesh");
        assert_eq!(trimesh.indices().len(), 12);
        let collider = volume.to_collider().expect("collider");
        let aabb = collider.compute_aabb();
        assert!((aabb.maxs.x - 1.0).abs() < tolerance());
    }
}
