//! Per-frame **shadow volume** generation for a single occluder and a point light.
//!
//! Each frame the occluder's vertices are projected through the light onto whatever
//! scene surfaces the rays strike, the hits are deduplicated and ordered into a
//! closed outline, and the outline is extruded into a closed prism that can be used
//! as a render mesh or a [Rapier](https://rapier.rs) collider.
//!
//! ```no_run
//! use nalgebra::{Isometry3, Point3, Vector3};
//! use shadowmesh::{Occluder, ProxyId, ShadowCaster, ShadowConfig, scene::ShapeScene};
//!
//! let wall = ShapeScene::new().with_cuboid(
//!     ProxyId(1),
//!     Isometry3::translation(0.0, 0.0, -10.0),
//!     Vector3::new(50.0, 50.0, 0.5),
//! );
//! let square = Occluder::new(
//!     vec![
//!         Point3::new(-1.0, -1.0, -2.0),
//!         Point3::new(1.0, -1.0, -2.0),
//!         Point3::new(1.0, 1.0, -2.0),
//!         Point3::new(-1.0, 1.0, -2.0),
//!     ],
//!     ProxyId(2),
//! );
//! let caster = ShadowCaster::new(ShadowConfig::default());
//! let volume = caster.recompute(&Point3::origin(), &square, &wall)?;
//! assert_eq!(volume.triangle_count(), 12);
//! # Ok::<(), shadowmesh::ShadowError>(())
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to cast the per-vertex rays in parallel

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod config;
pub mod errors;
pub mod float_types;
pub mod mesh;
pub mod scene;
pub mod shadow;
pub mod traits;

#[cfg(any(
    all(feature = "f64", feature = "f32"),
    not(any(feature = "f64", feature = "f32"))
))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use config::{CapTriangulation, ShadowConfig};
pub use errors::ShadowError;
pub use mesh::{ShadowMeshResource, ShadowVolume};
pub use scene::{Occluder, ProxyId, RayHit};
pub use shadow::ShadowCaster;
pub use traits::{MeshTarget, SceneQuery};
