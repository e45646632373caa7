//! Errors raised while building a shadow volume

use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// All the reasons a frame's shadow volume can fail to build.
///
/// None of these leave a [`MeshTarget`](crate::traits::MeshTarget) half written:
/// the previous mesh stays in place when a frame fails.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ShadowError {
    /// Fewer than three distinct points survived projection and deduplication
    #[error("(DegeneratePolygon) need at least 3 distinct projected points, got {points}")]
    DegeneratePolygon { points: usize },
    /// A projected point has a NaN or infinite coordinate
    #[error("(InvalidCoordinate) the coordinate ({0}) has a NaN or infinite")]
    InvalidCoordinate(Point3<Real>),
    /// The extrusion vector is zero-length or not finite
    #[error("(InvalidExtrusion) cannot extrude along {0}")]
    InvalidExtrusion(Vector3<Real>),
    /// An index list references a point that does not exist
    #[error("(IndexOutOfRange) index {index} is out of range (points.len = {len})")]
    IndexOutOfRange { index: usize, len: usize },
    /// The occluder's vertices do not enclose a volume to build a self proxy from
    #[error("(ProxyShape) cannot build a collision proxy from {points} vertices")]
    ProxyShape { points: usize },
    /// The collider a volume should be written into is no longer in its set
    #[error("(MissingCollider) the target collider no longer exists")]
    MissingCollider,
    /// Parry refused to build the collision trimesh
    #[error(transparent)]
    TriMesh(#[from] crate::float_types::parry3d::shape::TriMeshBuilderError),
}
