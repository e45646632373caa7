//! Ordering of projected points into a closed outline.
//!
//! The points are sorted along y, split into a right and a left chain by the
//! line joining the highest and lowest point, and stitched back together so that
//! walking the result visits the boundary once. This is exact for outlines that
//! are convex or star-shaped with respect to the y axis; strongly concave
//! silhouettes come out self-intersecting.

use crate::errors::ShadowError;
use crate::float_types::{Real, tolerance};
use crate::shadow::projector::Projection;
use nalgebra::{Point3, Vector3};

/// Half-plane test in the xy plane: `true` when `c` lies on the right-hand side of
/// the directed line `a -> b` (or on it).
#[inline]
pub fn is_right_of(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> bool {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x) >= 0.0
}

/// Boundary ordering of points already sorted by ascending y.
///
/// Returns a permutation of `0..points.len()`: the left chain bottom to top, the
/// topmost point, the right chain top to bottom, and finally the bottom point.
pub fn order_indices(points: &[Point3<Real>]) -> Result<Vec<usize>, ShadowError> {
    let n = points.len();
    if n < 3 {
        return Err(ShadowError::DegeneratePolygon { points: n });
    }

    let bottom = &points[0];
    let top = &points[n - 1];

    let mut indices = Vec::with_capacity(n);
    let mut placed = vec![false; n];
    indices.push(0);
    placed[0] = true;

    // right side of the top -> bottom line, top to bottom after the final reverse
    for (i, p) in points.iter().enumerate().take(n - 1).skip(1) {
        if is_right_of(top, bottom, p) {
            indices.push(i);
            placed[i] = true;
        }
    }

    // everything else, walking back down
    for i in (1..n).rev() {
        if !placed[i] {
            indices.push(i);
        }
    }

    indices.reverse();
    Ok(indices)
}

/// A closed outline: vertex `i` connects to vertex `(i + 1) % len`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedPolygon {
    vertices: Vec<Projection>,
}

impl OrderedPolygon {
    /// Sort `projections` by y and reorder them along the boundary.
    ///
    /// ## Errors
    /// `DegeneratePolygon` for fewer than 3 points, `InvalidCoordinate` for NaN or
    /// infinite coordinates.
    pub fn from_projections(mut projections: Vec<Projection>) -> Result<Self, ShadowError> {
        if projections.len() < 3 {
            return Err(ShadowError::DegeneratePolygon { points: projections.len() });
        }
        if let Some(bad) = projections
            .iter()
            .find(|p| !(p.point.x.is_finite() && p.point.y.is_finite() && p.point.z.is_finite()))
        {
            return Err(ShadowError::InvalidCoordinate(bad.point));
        }

        projections.sort_by(|a, b| a.point.y.total_cmp(&b.point.y));
        let positions: Vec<Point3<Real>> = projections.iter().map(|p| p.point).collect();
        let indices = order_indices(&positions)?;

        let vertices: Vec<Projection> = indices.iter().map(|&i| projections[i]).collect();
        let polygon = OrderedPolygon { vertices };

        if polygon.newell_normal().norm() <= tolerance() {
            log::warn!("shadow outline of {} points has no area", polygon.len());
        } else if !polygon.is_simple_xy() {
            log::warn!("shadow outline of {} points self-intersects", polygon.len());
        }
        Ok(polygon)
    }

    /// Wrap projections that are already in boundary order.
    pub fn from_ordered(vertices: Vec<Projection>) -> Result<Self, ShadowError> {
        if vertices.len() < 3 {
            return Err(ShadowError::DegeneratePolygon { points: vertices.len() });
        }
        Ok(OrderedPolygon { vertices })
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Projection] {
        &self.vertices
    }

    pub fn positions(&self) -> impl Iterator<Item = Point3<Real>> + '_ {
        self.vertices.iter().map(|v| v.point)
    }

    /// Surface normals carried from projection, one per outline vertex.
    pub fn surface_normals(&self) -> impl Iterator<Item = Vector3<Real>> + '_ {
        self.vertices.iter().map(|v| v.normal)
    }

    /// Edges `(i, (i + 1) % len)` of the closed loop.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (i, (i + 1) % n))
    }

    /// Area-weighted normal of the loop (Newell's method); its length is twice the area.
    pub fn newell_normal(&self) -> Vector3<Real> {
        self.edges().fold(Vector3::zeros(), |acc, (i, j)| {
            let a = self.vertices[i].point;
            let b = self.vertices[j].point;
            acc + Vector3::new(
                (a.y - b.y) * (a.z + b.z),
                (a.z - b.z) * (a.x + b.x),
                (a.x - b.x) * (a.y + b.y),
            )
        })
    }

    /// Shoelace area of the loop projected onto the xy plane, positive when
    /// counter-clockwise.
    pub fn signed_area_xy(&self) -> Real {
        0.5 * self.edges().fold(0.0, |acc, (i, j)| {
            let a = self.vertices[i].point;
            let b = self.vertices[j].point;
            acc + (a.x * b.y - b.x * a.y)
        })
    }

    /// `true` when no two non-adjacent edges cross in the xy projection.
    pub fn is_simple_xy(&self) -> bool {
        for (i, j) in self.edges() {
            for (k, l) in self.edges().skip(i + 2) {
                // the first and last edge share vertex 0
                if i == 0 && l == 0 {
                    continue;
                }
                let (a, b) = (&self.vertices[i].point, &self.vertices[j].point);
                let (c, d) = (&self.vertices[k].point, &self.vertices[l].point);
                if segments_cross_xy(a, b, c, d) {
                    return false;
                }
            }
        }
        true
    }
}

#[inline]
fn orient_xy(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Real {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Proper crossing of segments `ab` and `cd` in the xy plane.
fn segments_cross_xy(
    a: &Point3<Real>,
    b: &Point3<Real>,
    c: &Point3<Real>,
    d: &Point3<Real>,
) -> bool {
    let eps = tolerance();
    let d1 = orient_xy(c, d, a);
    let d2 = orient_xy(c, d, b);
    let d3 = orient_xy(a, b, c);
    let d4 = orient_xy(a, b, d);
    ((d1 > eps && d2 < -eps) || (d1 < -eps && d2 > eps))
        && ((d3 > eps && d4 < -eps) || (d3 < -eps && d4 > eps))
}
