//! Per-caster settings supplied by the host.

use crate::errors::ShadowError;
use crate::float_types::Real;
use nalgebra::Vector3;

/// How the front and back caps of the volume are triangulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CapTriangulation {
    /// Triangle fan anchored at the first outline vertex.
    /// Correct for convex and star-shaped outlines only.
    #[default]
    Fan,
    /// Ear clipping on the (x, y) projection of the outline.
    /// Handles concave but simple outlines.
    Earcut,
}

/// Settings for a [`ShadowCaster`](crate::shadow::ShadowCaster).
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowConfig {
    /// Offset from the front face (on the struck surface) to the back face.
    pub extrusion: Vector3<Real>,
    /// Maximum ray parameter passed to the scene query.
    /// Rays are cast with an unnormalized `light -> vertex` direction, so `1.0`
    /// stops at the vertex.
    pub max_ray_distance: Real,
    /// Whether rays starting inside a shape report an immediate hit.
    pub solid_rays: bool,
    /// When a ray's nearest hit is the occluder's own proxy, use the next hit along the ray
    /// instead of dropping the vertex. Only for flat occluders with no shrunk self
    /// proxy in the scene; hidden vertices of a solid occluder would leak through.
    pub pierce_occluder: bool,
    /// Drop a projected point sitting exactly at the origin during deduplication.
    pub drop_origin: bool,
    /// Cap triangulation strategy.
    pub cap: CapTriangulation,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        ShadowConfig {
            extrusion: Vector3::new(0.0, 0.0, -1.0),
            max_ray_distance: Real::MAX,
            solid_rays: true,
            pierce_occluder: false,
            drop_origin: true,
            cap: CapTriangulation::Fan,
        }
    }
}

impl ShadowConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_extrusion(mut self, extrusion: Vector3<Real>) -> Self {
        self.extrusion = extrusion;
        self
    }

    /// Extrude `depth` units along `direction` (normalized here).
    pub fn with_depth(mut self, direction: Vector3<Real>, depth: Real) -> Self {
        self.extrusion = direction.normalize() * depth;
        self
    }

    pub const fn with_max_ray_distance(mut self, distance: Real) -> Self {
        self.max_ray_distance = distance;
        self
    }

    pub const fn with_solid_rays(mut self, solid: bool) -> Self {
        self.solid_rays = solid;
        self
    }

    pub const fn with_pierce_occluder(mut self, pierce: bool) -> Self {
        self.pierce_occluder = pierce;
        self
    }

    pub const fn with_drop_origin(mut self, drop_origin: bool) -> Self {
        self.drop_origin = drop_origin;
        self
    }

    pub const fn with_cap(mut self, cap: CapTriangulation) -> Self {
        self.cap = cap;
        self
    }

    /// Reject settings that cannot produce a volume.
    pub fn validate(&self) -> Result<(), ShadowError> {
        let e = self.extrusion;
        if !(e.x.is_finite() && e.y.is_finite() && e.z.is_finite())
            || e.norm_squared() <= Real::EPSILON
        {
            return Err(ShadowError::InvalidExtrusion(e));
        }
        Ok(())
    }
}
