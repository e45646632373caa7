//! Test support library
//! Provides scenes, occluders and assertions shared by the integration tests.
#![allow(dead_code)]

use nalgebra::{Isometry3, Point3, Vector3};
use shadowmesh::{
    Occluder, ProxyId, RayHit, SceneQuery, ShadowVolume,
    float_types::{
        Real,
        parry3d::{query::Ray, shape::Cuboid},
    },
    scene::ShapeScene,
};

pub const WALL: ProxyId = ProxyId(1);
pub const OCCLUDER: ProxyId = ProxyId(2);

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// A large slab whose front face is the plane `z = -9.5`.
pub fn wall_scene() -> ShapeScene {
    ShapeScene::new().with_cuboid(
        WALL,
        Isometry3::translation(0.0, 0.0, -10.0),
        Vector3::new(50.0, 50.0, 0.5),
    )
}

/// Axis-aligned square of half size `half` in the plane `z`.
pub fn square_occluder(half: Real, z: Real) -> Occluder {
    Occluder::new(
        vec![
            Point3::new(-half, -half, z),
            Point3::new(half, -half, z),
            Point3::new(half, half, z),
            Point3::new(-half, half, z),
        ],
        OCCLUDER,
    )
}

/// Solid cube of half size `half` centred on the z axis at `z`, with its surface.
pub fn cube_occluder(half: Real, z: Real) -> Occluder {
    let (vertices, triangles) = Cuboid::new(Vector3::repeat(half)).to_trimesh();
    Occluder::from_mesh(vertices, triangles, OCCLUDER)
        .with_position(Isometry3::translation(0.0, 0.0, z))
}

/// Every ray reports the occluder first and nothing behind it.
pub struct SelfOnly;

impl SceneQuery for SelfOnly {
    fn cast_ray(&self, ray: &Ray, _max_toi: Real, _solid: bool) -> Vec<RayHit> {
        vec![RayHit {
            point: ray.point_at(1.0),
            normal: -ray.dir.normalize(),
            time_of_impact: 1.0,
            proxy: OCCLUDER,
        }]
    }
}

/// Checks every invariant a finished volume must hold.
pub fn assert_well_formed(volume: &ShadowVolume) {
    let n = volume.outline_len();
    assert!(n >= 3, "outline needs at least three points, got {}", n);
    assert_eq!(volume.vertex_count(), 2 * n, "front and back outline");
    assert_eq!(volume.triangle_count(), 4 * n - 4, "caps plus side band");
    assert_eq!(volume.indices().len() % 3, 0);
    assert!(
        volume
            .indices()
            .iter()
            .all(|&i| (i as usize) < volume.vertex_count()),
        "index out of range"
    );
    assert_eq!(volume.normals.len(), volume.vertex_count());
    assert!(volume.is_closed(), "volume must be watertight");
    assert!(volume.signed_volume() > 0.0, "faces must point outwards");
}
