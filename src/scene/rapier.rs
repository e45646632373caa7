//! [`SceneQuery`] over a Rapier physics world.

use crate::float_types::{
    Real,
    parry3d::query::Ray,
    rapier3d::prelude::{ColliderHandle, ColliderSet, QueryFilter, QueryPipeline, RigidBodySet},
};
use crate::scene::{ProxyId, RayHit};
use crate::traits::SceneQuery;

/// The [`ProxyId`] under which a Rapier collider shows up in hit records.
pub fn proxy_id(handle: ColliderHandle) -> ProxyId {
    let (index, generation) = handle.into_raw_parts();
    ProxyId((u64::from(generation) << 32) | u64::from(index))
}

/// Borrowed view of a Rapier world used to project occluder vertices.
///
/// The `QueryPipeline` must have been updated against `colliders` by the host
/// before the frame is computed.
pub struct RapierScene<'a> {
    pipeline: &'a QueryPipeline,
    bodies: &'a RigidBodySet,
    colliders: &'a ColliderSet,
    excluded: Option<ColliderHandle>,
    exclude_sensors: bool,
}

impl<'a> RapierScene<'a> {
    pub const fn new(
        pipeline: &'a QueryPipeline,
        bodies: &'a RigidBodySet,
        colliders: &'a ColliderSet,
    ) -> Self {
        RapierScene {
            pipeline,
            bodies,
            colliders,
            excluded: None,
            exclude_sensors: false,
        }
    }

    /// Never report hits on `handle`, typically the shadow volume's own collider.
    pub const fn excluding(mut self, handle: ColliderHandle) -> Self {
        self.excluded = Some(handle);
        self
    }

    /// Ignore sensor colliders.
    pub const fn excluding_sensors(mut self) -> Self {
        self.exclude_sensors = true;
        self
    }

    fn filter(&self) -> QueryFilter<'static> {
        let filter = QueryFilter::default();
        let filter = if self.exclude_sensors {
            filter.exclude_sensors()
        } else {
            filter
        };
        match self.excluded {
            Some(handle) => filter.exclude_collider(handle),
            None => filter,
        }
    }
}

impl SceneQuery for RapierScene<'_> {
    fn cast_ray(&self, ray: &Ray, max_toi: Real, solid: bool) -> Vec<RayHit> {
        let mut hits = Vec::new();
        self.pipeline.intersections_with_ray(
            self.bodies,
            self.colliders,
            ray,
            max_toi,
            solid,
            self.filter(),
            |handle, intersection| {
                hits.push(RayHit {
                    point: ray.point_at(intersection.time_of_impact),
                    normal: intersection.normal,
                    time_of_impact: intersection.time_of_impact,
                    proxy: proxy_id(handle),
                });
                true
            },
        );

        hits.sort_by(|a, b| {
            a.time_of_impact
                .partial_cmp(&b.time_of_impact)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits
    }
}
