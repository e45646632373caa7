//! Projection of occluder vertices through the light onto scene surfaces.

use crate::config::ShadowConfig;
use crate::float_types::{Real, parry3d::query::Ray};
use crate::scene::{Occluder, ProxyId};
use crate::traits::SceneQuery;
use nalgebra::{Point3, Vector3};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Scenes the projector can fan rays out over; `Sync` when the `parallel`
/// feature projects vertices on the rayon pool.
#[cfg(not(feature = "parallel"))]
pub trait ProjectionScene: SceneQuery {}
#[cfg(not(feature = "parallel"))]
impl<T: SceneQuery + ?Sized> ProjectionScene for T {}

#[cfg(feature = "parallel")]
pub trait ProjectionScene: SceneQuery + Sync {}
#[cfg(feature = "parallel")]
impl<T: SceneQuery + Sync + ?Sized> ProjectionScene for T {}

/// Where the ray through one occluder vertex struck the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// World-space point on the struck surface.
    pub point: Point3<Real>,
    /// Surface normal at `point`.
    pub normal: Vector3<Real>,
}

impl Projection {
    pub const fn new(point: Point3<Real>, normal: Vector3<Real>) -> Self {
        Projection { point, normal }
    }
}

/// Cast a ray from `light` through `vertex` and return the first surface it strikes.
///
/// A nearest hit on `occluder_proxy` is a self-hit: the vertex is dropped, or with
/// [`ShadowConfig::pierce_occluder`] the next hit along the ray is used instead.
pub fn project_vertex<Q: SceneQuery + ?Sized>(
    light: &Point3<Real>,
    vertex: &Point3<Real>,
    occluder_proxy: ProxyId,
    scene: &Q,
    config: &ShadowConfig,
) -> Option<Projection> {
    let direction = vertex - light;
    if direction.norm_squared() <= Real::EPSILON {
        log::trace!("vertex {} coincides with the light, no ray", vertex);
        return None;
    }

    let ray = Ray::new(*light, direction);
    let hit = if config.pierce_occluder {
        scene
            .cast_ray(&ray, config.max_ray_distance, config.solid_rays)
            .into_iter()
            .find(|hit| hit.proxy != occluder_proxy)
    } else {
        match scene.nearest_hit(&ray, config.max_ray_distance, config.solid_rays) {
            Some(hit) if hit.proxy == occluder_proxy => {
                log::trace!("ray through {} hit the occluder itself", vertex);
                None
            },
            other => other,
        }
    };

    match hit {
        Some(hit) => Some(Projection::new(hit.point, hit.normal)),
        None => {
            log::trace!("ray through {} missed", vertex);
            None
        },
    }
}

/// Project every occluder vertex; entry `i` is the projection of vertex `i`, or
/// `None` when its ray missed or struck the occluder.
#[cfg(not(feature = "parallel"))]
pub fn project_vertices<Q: ProjectionScene + ?Sized>(
    light: &Point3<Real>,
    occluder: &Occluder,
    scene: &Q,
    config: &ShadowConfig,
) -> Vec<Option<Projection>> {
    occluder
        .world_vertices()
        .map(|vertex| project_vertex(light, &vertex, occluder.proxy, scene, config))
        .collect()
}

/// Parallel projection of every occluder vertex; entry `i` is the projection of
/// vertex `i`, or `None` when its ray missed or struck the occluder.
#[cfg(feature = "parallel")]
pub fn project_vertices<Q: ProjectionScene + ?Sized>(
    light: &Point3<Real>,
    occluder: &Occluder,
    scene: &Q,
    config: &ShadowConfig,
) -> Vec<Option<Projection>> {
    occluder
        .vertices
        .par_iter()
        .map(|local| {
            let vertex = occluder.to_world(local);
            project_vertex(light, &vertex, occluder.proxy, scene, config)
        })
        .collect()
}
