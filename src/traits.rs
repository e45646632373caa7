use crate::errors::ShadowError;
use crate::float_types::{Real, parry3d::query::Ray};
use crate::mesh::ShadowVolume;
use crate::scene::RayHit;

/// Read-only ray intersection service of the host scene.
pub trait SceneQuery {
    /// Every surface hit along `ray` with a ray parameter in `[0, max_toi]`,
    /// sorted by ascending time of impact.
    fn cast_ray(&self, ray: &Ray, max_toi: Real, solid: bool) -> Vec<RayHit>;

    /// The closest hit along `ray`, if any.
    fn nearest_hit(&self, ray: &Ray, max_toi: Real, solid: bool) -> Option<RayHit> {
        self.cast_ray(ray, max_toi, solid).into_iter().next()
    }
}

impl<T: SceneQuery + ?Sized> SceneQuery for &T {
    fn cast_ray(&self, ray: &Ray, max_toi: Real, solid: bool) -> Vec<RayHit> {
        (**self).cast_ray(ray, max_toi, solid)
    }

    fn nearest_hit(&self, ray: &Ray, max_toi: Real, solid: bool) -> Option<RayHit> {
        (**self).nearest_hit(ray, max_toi, solid)
    }
}

/// A render/collision mesh resource owned by the host.
pub trait MeshTarget {
    /// Swap in a freshly built volume.
    ///
    /// Implementations must either apply the whole volume or leave the
    /// previous geometry untouched and return the error.
    fn replace_geometry(&mut self, volume: ShadowVolume) -> Result<(), ShadowError>;
}
