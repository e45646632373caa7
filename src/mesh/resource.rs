//! Mesh resources that receive a new [`ShadowVolume`] every frame.

use crate::errors::ShadowError;
use crate::float_types::rapier3d::prelude::{ColliderHandle, ColliderSet, SharedShape};
use crate::mesh::ShadowVolume;
use crate::traits::MeshTarget;

/// Owned render mesh plus collision shape, replaced as a unit.
#[derive(Clone, Default)]
pub struct ShadowMeshResource {
    volume: Option<ShadowVolume>,
    collider: Option<SharedShape>,
    generation: u64,
}

impl std::fmt::Debug for ShadowMeshResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShadowMeshResource")
            .field("volume", &self.volume)
            .field("has_collider", &self.collider.is_some())
            .field("generation", &self.generation)
            .finish()
    }
}

impl ShadowMeshResource {
    pub fn new() -> Self {
        Self::default()
    }

    /// The geometry of the last successful frame.
    pub const fn volume(&self) -> Option<&ShadowVolume> {
        self.volume.as_ref()
    }

    /// Collision shape built from [`volume`](Self::volume).
    pub const fn collider(&self) -> Option<&SharedShape> {
        self.collider.as_ref()
    }

    /// Number of successful replacements so far.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Drop the current geometry.
    pub fn clear(&mut self) {
        self.volume = None;
        self.collider = None;
    }
}

impl MeshTarget for ShadowMeshResource {
    fn replace_geometry(&mut self, volume: ShadowVolume) -> Result<(), ShadowError> {
        // build the collision shape before touching anything
        let collider = volume.to_shared_shape()?;
        self.volume = Some(volume);
        self.collider = Some(collider);
        self.generation += 1;
        Ok(())
    }
}

/// Writes each frame's volume into an existing Rapier collider.
pub struct ColliderTarget<'a> {
    colliders: &'a mut ColliderSet,
    handle: ColliderHandle,
}

impl<'a> ColliderTarget<'a> {
    pub const fn new(colliders: &'a mut ColliderSet, handle: ColliderHandle) -> Self {
        ColliderTarget { colliders, handle }
    }
}

impl MeshTarget for ColliderTarget<'_> {
    fn replace_geometry(&mut self, volume: ShadowVolume) -> Result<(), ShadowError> {
        let shape = volume.to_shared_shape()?;
        let collider = self
            .colliders
            .get_mut(self.handle)
            .ok_or(ShadowError::MissingCollider)?;
        collider.set_shape(shape);
        Ok(())
    }
}
