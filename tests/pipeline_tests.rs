mod support;

use approx::assert_relative_eq;
use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};
use shadowmesh::{
    CapTriangulation, MeshTarget, Occluder, ShadowCaster, ShadowConfig, ShadowError,
    ShadowMeshResource,
    float_types::{Real, tolerance},
    scene::DEFAULT_PROXY_SHRINK,
    shadow::dedup,
};
use support::*;

#[test]
fn square_occluder_casts_a_box_on_the_wall() {
    let caster = ShadowCaster::default();
    let volume = caster
        .recompute(&Point3::origin(), &square_occluder(1.0, -2.0), &wall_scene())
        .expect("all four corners reach the wall");

    assert_eq!(volume.outline_len(), 4);
    assert_eq!(volume.vertex_count(), 8);
    assert_eq!(volume.triangle_count(), 12);
    assert_well_formed(&volume);

    // the wall face is at z = -9.5, so the square is magnified 4.75 times
    for v in &volume.vertices[..4] {
        assert_relative_eq!(v.z, -9.5, epsilon = tolerance());
        assert_relative_eq!(v.x.abs(), 4.75, epsilon = tolerance());
        assert_relative_eq!(v.y.abs(), 4.75, epsilon = tolerance());
    }
    for normal in &volume.surface_normals {
        assert_relative_eq!(*normal, Vector3::z(), epsilon = tolerance());
    }
    // 9.5 x 9.5 outline, one unit deep
    assert_relative_eq!(volume.signed_volume(), 9.5 * 9.5, epsilon = tolerance());
}

#[test]
fn outline_visits_each_projected_point_once() {
    let caster = ShadowCaster::default();
    let occluder = square_occluder(1.0, -2.0);
    let scene = wall_scene();
    let silhouette = caster.silhouette(&Point3::origin(), &occluder, &scene);
    let volume = caster
        .recompute(&Point3::origin(), &occluder, &scene)
        .expect("square projects");

    assert_eq!(silhouette.len(), volume.outline_len());
    for p in &silhouette {
        let count = volume.vertices[..volume.outline_len()]
            .iter()
            .filter(|v| **v == p.point)
            .count();
        assert_eq!(count, 1, "{} must appear exactly once", p.point);
    }

    let segments: Vec<_> = volume.outline().collect();
    assert_eq!(segments.len(), 4);
    assert_eq!(segments[3].1, segments[0].0, "outline closes on itself");
}

#[test]
fn coinciding_projections_collapse() {
    // the fifth vertex sits on the ray through the third one
    let mut occluder = square_occluder(1.0, -2.0);
    occluder.vertices.push(Point3::new(2.0, 2.0, -4.0));

    let caster = ShadowCaster::default();
    let silhouette = caster.silhouette(&Point3::origin(), &occluder, &wall_scene());
    assert_eq!(silhouette.len(), 4);

    let volume = caster
        .recompute(&Point3::origin(), &occluder, &wall_scene())
        .expect("four distinct points");
    assert_eq!(volume.vertex_count(), 8);
    assert_eq!(dedup::deduplicate(&silhouette, true), silhouette);
}

#[test]
fn self_hits_leave_the_previous_mesh_in_place() {
    let caster = ShadowCaster::default();
    let mut target = ShadowMeshResource::new();
    caster
        .update(&Point3::origin(), &square_occluder(1.0, -2.0), &wall_scene(), &mut target)
        .expect("first frame builds");
    let before = target.volume().cloned().expect("first frame stored");

    let err = caster
        .update(&Point3::origin(), &square_occluder(1.0, -2.0), &SelfOnly, &mut target)
        .unwrap_err();
    assert_eq!(err, ShadowError::DegeneratePolygon { points: 0 });
    assert_eq!(target.generation(), 1);
    assert_eq!(target.volume(), Some(&before));
}

#[test]
fn two_points_are_not_enough() {
    // a flat sliver: only two corners are distinct after projection
    let occluder = Occluder::new(
        vec![
            Point3::new(-1.0, 0.0, -2.0),
            Point3::new(1.0, 0.0, -2.0),
            Point3::new(2.0, 0.0, -4.0),
        ],
        OCCLUDER,
    );
    let err = ShadowCaster::default()
        .recompute(&Point3::origin(), &occluder, &wall_scene())
        .unwrap_err();
    assert_eq!(err, ShadowError::DegeneratePolygon { points: 2 });
}

#[test]
fn light_position_moves_the_shadow() {
    let caster = ShadowCaster::default();
    let occluder = square_occluder(1.0, -2.0);
    let centred = caster
        .recompute(&Point3::origin(), &occluder, &wall_scene())
        .expect("centred light");
    let shifted = caster
        .recompute(&Point3::new(-1.0, 0.0, 0.0), &occluder, &wall_scene())
        .expect("shifted light");

    let centre_x = |volume: &shadowmesh::ShadowVolume| {
        volume.vertices[..4].iter().map(|v| v.x).sum::<Real>() / 4.0
    };
    assert_relative_eq!(centre_x(&centred), 0.0, epsilon = tolerance());
    assert!(centre_x(&shifted) > 1.0, "shadow slides away from the light");
    assert_well_formed(&shifted);
}

#[test]
fn occluder_transform_is_applied() {
    let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.3);
    let occluder = square_occluder(0.5, 0.0)
        .with_scale(Vector3::new(2.0, 2.0, 1.0))
        .with_position(Isometry3::from_parts(Translation3::new(0.0, 0.0, -2.0), rotation));

    let volume = ShadowCaster::default()
        .recompute(&Point3::origin(), &occluder, &wall_scene())
        .expect("rotated square projects");
    assert_well_formed(&volume);
    // rotation about the light axis keeps the distance of every corner
    for v in &volume.vertices[..4] {
        assert_relative_eq!(v.coords.xy().norm(), 4.75 * Real::sqrt(2.0), epsilon = tolerance());
    }
}

#[test]
fn extrusion_depth_and_direction_follow_the_config() {
    let config = ShadowConfig::default().with_depth(Vector3::new(0.0, 0.0, -3.0), 0.25);
    let volume = ShadowCaster::new(config)
        .recompute(&Point3::origin(), &square_occluder(1.0, -2.0), &wall_scene())
        .expect("square projects");
    assert_relative_eq!(volume.bounding_box.mins.z, -9.75, epsilon = tolerance());
    assert_relative_eq!(volume.bounding_box.maxs.z, -9.5, epsilon = tolerance());

    // extruding towards the light still yields an outward volume
    let towards_light = ShadowConfig::default().with_extrusion(Vector3::new(0.0, 0.0, 0.5));
    let volume = ShadowCaster::new(towards_light)
        .recompute(&Point3::origin(), &square_occluder(1.0, -2.0), &wall_scene())
        .expect("square projects");
    assert_well_formed(&volume);
}

#[test]
fn earcut_caps_match_the_fan_on_convex_outlines() {
    let fan = ShadowCaster::default()
        .recompute(&Point3::origin(), &square_occluder(1.0, -2.0), &wall_scene())
        .expect("fan");
    let earcut = ShadowCaster::new(ShadowConfig::default().with_cap(CapTriangulation::Earcut))
        .recompute(&Point3::origin(), &square_occluder(1.0, -2.0), &wall_scene())
        .expect("earcut");

    assert_well_formed(&earcut);
    assert_eq!(earcut.vertices, fan.vertices);
    assert_relative_eq!(earcut.signed_volume(), fan.signed_volume(), epsilon = tolerance());
}

#[test]
fn resource_builds_a_collider_from_the_volume() {
    let caster = ShadowCaster::default();
    let mut target = ShadowMeshResource::new();
    caster
        .update(&Point3::origin(), &square_occluder(1.0, -2.0), &wall_scene(), &mut target)
        .expect("frame builds");

    let shape = target.collider().expect("collider stored");
    let trimesh = shape.as_trimesh().expect("shadow collider is a trimesh");
    assert_eq!(trimesh.indices().len(), 12);
    assert_eq!(trimesh.vertices().len(), 8);

    // replacing through the trait object works the same
    let volume = target.volume().cloned().expect("volume stored");
    let dyn_target: &mut dyn MeshTarget = &mut target;
    dyn_target.replace_geometry(volume).expect("same volume again");
    assert_eq!(target.generation(), 2);
}

#[test]
fn solid_cube_casts_only_its_front_face() {
    // front face at z = -2.5, back face at z = -3.5
    let cube = cube_occluder(0.5, -3.0);
    let scene = wall_scene()
        .with_occluder_proxy(&cube, DEFAULT_PROXY_SHRINK)
        .expect("cube proxy");
    let caster = ShadowCaster::default();

    let silhouette = caster.silhouette(&Point3::origin(), &cube, &scene);
    assert_eq!(silhouette.len(), 4, "back corners are hidden behind the proxy");

    let volume = caster
        .recompute(&Point3::origin(), &cube, &scene)
        .expect("front corners graze past the proxy");
    assert_well_formed(&volume);
    assert_eq!(volume.outline_len(), 4);
    // front corners at distance 2.5 magnified onto the wall at 9.5
    for v in &volume.vertices[..4] {
        assert_relative_eq!(v.z, -9.5, epsilon = tolerance());
        assert_relative_eq!(v.x.abs(), 1.9, epsilon = tolerance());
        assert_relative_eq!(v.y.abs(), 1.9, epsilon = tolerance());
    }
    assert!(volume.signed_volume() > 0.0);
    assert_relative_eq!(volume.signed_volume(), 3.8 * 3.8, epsilon = 10.0 * tolerance());
}
