//! Extrusion of an ordered outline into a closed prism.
//!
//! For an outline of `n` points the prism has `2n` vertices: the outline itself
//! (front) followed by the outline shifted by the extrusion vector (back), so
//! back vertex `n + i` is front vertex `i` moved. Triangles come in this order:
//!
//! 1. front cap, `n - 2` triangles
//! 2. back cap, `n - 2` triangles, wound opposite to the front
//! 3. side band, two triangles for each edge `i -> i + 1`, `i < n - 1`
//! 4. the closing pair joining vertex `n - 1` back to vertex `0`
//!
//! `2(n - 2) + 2(n - 1) + 2 = 4n - 4` triangles in total.

use crate::config::CapTriangulation;
use crate::errors::ShadowError;
use crate::float_types::{Real, tolerance};
use crate::shadow::orderer::OrderedPolygon;
use geo::{Coord, LineString, Polygon as GeoPolygon, TriangulateEarcut};
use nalgebra::{Point3, Vector3};

/// Vertex and triangle arrays of an extruded outline.
#[derive(Debug, Clone, PartialEq)]
pub struct Extrusion {
    pub vertices: Vec<Point3<Real>>,
    pub triangles: Vec<[u32; 3]>,
}

/// Number of triangles produced for an outline of `n` points, zero below three.
pub const fn triangle_count(n: usize) -> usize {
    if n < 3 { 0 } else { 4 * n - 4 }
}

/// Front vertices followed by the same vertices moved by `offset`.
pub fn extrude_vertices(points: &[Point3<Real>], offset: &Vector3<Real>) -> Vec<Point3<Real>> {
    let mut vertices = Vec::with_capacity(points.len() * 2);
    vertices.extend_from_slice(points);
    vertices.extend(points.iter().map(|p| p + offset));
    vertices
}

/// Fan anchored at vertex 0: `(0, i, i + 1)` for `i` in `1..n - 1`.
pub fn fan_triangles(n: usize) -> Vec<[usize; 3]> {
    (1..n.saturating_sub(1)).map(|i| [0, i, i + 1]).collect()
}

fn signed_area_xy(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Real {
    0.5 * ((b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x))
}

/// Ear clipping of the (x, y) projection of an outline.
///
/// Triangles are wound like the outline itself, matching [`fan_triangles`] on a
/// convex outline. Returns `None` when the projection has no area or earcut
/// could not cover the outline with `n - 2` triangles.
pub fn earcut_triangles(polygon: &OrderedPolygon) -> Option<Vec<[usize; 3]>> {
    let n = polygon.len();
    let outline_area = polygon.signed_area_xy();
    if outline_area.abs() <= tolerance() {
        return None;
    }

    let ring: Vec<Coord<Real>> = polygon.positions().map(|p| Coord { x: p.x, y: p.y }).collect();
    let raw = GeoPolygon::new(LineString::new(ring), vec![]).earcut_triangles_raw();

    let points = polygon.vertices();
    let triangles: Vec<[usize; 3]> = raw
        .triangle_indices
        .chunks_exact(3)
        // the closing coordinate of the ring aliases vertex 0
        .map(|t| [t[0] % n, t[1] % n, t[2] % n])
        .map(|[a, b, c]| {
            let area = signed_area_xy(&points[a].point, &points[b].point, &points[c].point);
            if area * outline_area < 0.0 { [a, c, b] } else { [a, b, c] }
        })
        .collect();

    (triangles.len() == n - 2).then_some(triangles)
}

/// Full triangle list of the prism given the front cap triangulation `cap`
/// (wound like the outline) of an `n` point outline. Empty below three points.
pub fn extrude_triangles(cap: &[[usize; 3]], n: usize) -> Vec<[usize; 3]> {
    if n < 3 {
        return Vec::new();
    }
    let mut tris = Vec::with_capacity(2 * cap.len() + 2 * n);

    // front cap faces away from the back cap
    tris.extend(cap.iter().map(|&[a, b, c]| [a, c, b]));
    tris.extend(cap.iter().map(|&[a, b, c]| [a + n, b + n, c + n]));

    // side band
    for i in 0..n - 1 {
        tris.push([n + i + 1, n + i, i]);
        tris.push([i + 1, n + i + 1, i]);
    }

    // close the band between the last and first outline vertex
    let j = n - 1;
    tris.push([n, 2 * n - 1, j]);
    tris.push([0, n, j]);

    tris
}

/// Extrude `polygon` along `offset` into a closed, outward-facing prism.
///
/// ## Errors
/// `InvalidExtrusion` for a zero or non-finite `offset`, `IndexOutOfRange` when
/// the vertex count does not fit the `u32` index type.
pub fn extrude(
    polygon: &OrderedPolygon,
    offset: &Vector3<Real>,
    cap: CapTriangulation,
) -> Result<Extrusion, ShadowError> {
    let n = polygon.len();
    if n < 3 {
        return Err(ShadowError::DegeneratePolygon { points: n });
    }
    if !(offset.x.is_finite() && offset.y.is_finite() && offset.z.is_finite())
        || offset.norm_squared() <= Real::EPSILON
    {
        return Err(ShadowError::InvalidExtrusion(*offset));
    }

    let cap_triangles = match cap {
        CapTriangulation::Fan => fan_triangles(n),
        CapTriangulation::Earcut => earcut_triangles(polygon).unwrap_or_else(|| {
            log::warn!("earcut could not triangulate a {}-point outline, using a fan", n);
            fan_triangles(n)
        }),
    };

    let mut triangles = extrude_triangles(&cap_triangles, n);

    // The front cap must face against the extrusion; an outline walking the other
    // way round flips every face.
    let facing = polygon.newell_normal().dot(offset);
    if facing < 0.0 {
        for tri in &mut triangles {
            tri.swap(1, 2);
        }
    } else if facing == 0.0 {
        log::warn!("extrusion vector lies in the plane of the shadow outline");
    }

    let points: Vec<Point3<Real>> = polygon.positions().collect();
    let vertices = extrude_vertices(&points, offset);

    let len = vertices.len();
    let triangles = triangles
        .into_iter()
        .map(|tri| {
            let mut out = [0u32; 3];
            for (slot, &index) in out.iter_mut().zip(tri.iter()) {
                *slot = u32::try_from(index)
                    .map_err(|_| ShadowError::IndexOutOfRange { index, len })?;
            }
            Ok(out)
        })
        .collect::<Result<Vec<_>, ShadowError>>()?;

    Ok(Extrusion { vertices, triangles })
}
