//! Removal of repeated projected points.

use crate::float_types::Real;
use crate::shadow::projector::Projection;
use hashbrown::HashSet;
use nalgebra::Point3;

/// Bit pattern of a point, so that only bit-identical coordinates collapse.
#[inline]
fn point_key(p: &Point3<Real>) -> [u64; 3] {
    [
        u64::from(p.x.to_bits()),
        u64::from(p.y.to_bits()),
        u64::from(p.z.to_bits()),
    ]
}

#[inline]
fn is_origin(p: &Point3<Real>) -> bool {
    p.x == 0.0 && p.y == 0.0 && p.z == 0.0
}

/// Drop bit-identical repeats (keeping the first occurrence and its normal) and,
/// when `drop_origin` is set, any point exactly at the origin.
///
/// Order of the surviving projections is preserved, so the result is idempotent.
pub fn deduplicate(projections: &[Projection], drop_origin: bool) -> Vec<Projection> {
    let mut seen = HashSet::with_capacity(projections.len());
    let unique: Vec<Projection> = projections
        .iter()
        .filter(|p| !(drop_origin && is_origin(&p.point)))
        .filter(|p| seen.insert(point_key(&p.point)))
        .copied()
        .collect();

    if unique.len() != projections.len() {
        log::trace!(
            "deduplicated {} projected points down to {}",
            projections.len(),
            unique.len()
        );
    }
    unique
}

/// [`deduplicate`] over bare points.
pub fn deduplicate_points(points: &[Point3<Real>], drop_origin: bool) -> Vec<Point3<Real>> {
    let mut seen = HashSet::with_capacity(points.len());
    points
        .iter()
        .filter(|p| !(drop_origin && is_origin(p)))
        .filter(|p| seen.insert(point_key(p)))
        .copied()
        .collect()
}
