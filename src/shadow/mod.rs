//! The per-frame shadow pipeline: project, deduplicate, order, extrude, assemble.
//!
//! Nothing is retained between frames; every call to [`ShadowCaster::recompute`]
//! starts from the light position, the occluder snapshot and the scene.

use crate::config::ShadowConfig;
use crate::errors::ShadowError;
use crate::float_types::Real;
use crate::mesh::ShadowVolume;
use crate::scene::Occluder;
use crate::traits::MeshTarget;
use nalgebra::Point3;

pub mod dedup;
pub mod extrude;
pub mod orderer;
pub mod projector;

pub use orderer::OrderedPolygon;
pub use projector::{Projection, ProjectionScene};

/// Builds the shadow volume of one occluder lit by one point light.
#[derive(Debug, Clone, Default)]
pub struct ShadowCaster {
    config: ShadowConfig,
}

impl ShadowCaster {
    pub const fn new(config: ShadowConfig) -> Self {
        ShadowCaster { config }
    }

    pub const fn config(&self) -> &ShadowConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ShadowConfig {
        &mut self.config
    }

    /// Projected, deduplicated outline points for this frame, in occluder vertex order.
    pub fn silhouette<Q: ProjectionScene + ?Sized>(
        &self,
        light: &Point3<Real>,
        occluder: &Occluder,
        scene: &Q,
    ) -> Vec<Projection> {
        let projected: Vec<Projection> =
            projector::project_vertices(light, occluder, scene, &self.config)
                .into_iter()
                .flatten()
                .collect();
        let unique = dedup::deduplicate(&projected, self.config.drop_origin);
        log::debug!(
            "{} of {} occluder vertices projected, {} distinct",
            projected.len(),
            occluder.vertices.len(),
            unique.len()
        );
        unique
    }

    /// Rebuild the shadow volume from scratch.
    ///
    /// ## Errors
    /// `DegeneratePolygon` when fewer than three distinct points land on the scene,
    /// `InvalidExtrusion` for a bad configuration, and anything the orderer or
    /// mesh assembly reports.
    pub fn recompute<Q: ProjectionScene + ?Sized>(
        &self,
        light: &Point3<Real>,
        occluder: &Occluder,
        scene: &Q,
    ) -> Result<ShadowVolume, ShadowError> {
        self.config.validate()?;

        let points = self.silhouette(light, occluder, scene);
        if points.len() < 3 {
            log::warn!(
                "only {} distinct shadow points, skipping this frame",
                points.len()
            );
            return Err(ShadowError::DegeneratePolygon { points: points.len() });
        }

        let outline = OrderedPolygon::from_projections(points)?;
        let volume = ShadowVolume::assemble(&outline, &self.config)?;
        log::debug!(
            "shadow volume: {} vertices, {} triangles",
            volume.vertex_count(),
            volume.triangle_count()
        );
        if log::log_enabled!(log::Level::Trace) {
            for (a, b) in volume.outline() {
                log::trace!("outline {} -> {}", a, b);
            }
        }
        Ok(volume)
    }

    /// Recompute and hand the new volume to `target`.
    ///
    /// On error `target` is not touched and keeps the previous frame's geometry.
    pub fn update<Q, T>(
        &self,
        light: &Point3<Real>,
        occluder: &Occluder,
        scene: &Q,
        target: &mut T,
    ) -> Result<(), ShadowError>
    where
        Q: ProjectionScene + ?Sized,
        T: MeshTarget + ?Sized,
    {
        let volume = self.recompute(light, occluder, scene)?;
        target.replace_geometry(volume)
    }
}
