// Re-export parry and rapier for the appropriate float size
#[cfg(feature = "f64")]
pub use parry3d_f64 as parry3d;
#[cfg(feature = "f64")]
pub use rapier3d_f64 as rapier3d;

#[cfg(feature = "f32")]
pub use parry3d;
#[cfg(feature = "f32")]
pub use rapier3d;

// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized tolerance used for area and length checks across the crate.
/// Defaults depend on precision (`f32` vs `f64`), but can be overridden:
///  1) **Build-time**: set env var `SHADOWMESH_TOLERANCE`
///     (e.g. `SHADOWMESH_TOLERANCE=1e-7 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before the first frame is computed
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    #[cfg(feature = "f32")]
    {
        1e-4
    }
    #[cfg(feature = "f64")]
    {
        1e-6
    }
}

/// Returns the current tolerance.
/// If not set yet, it tries `SHADOWMESH_TOLERANCE` (parsed as the active `Real`) and
/// falls back to the precision default.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        if let Some(environment_variable) = option_env!("SHADOWMESH_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_tolerance()
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_is_positive_and_stable() {
        let first = tolerance();
        assert!(first > 0.0);
        // Once initialised the value is frozen.
        set_tolerance(first * 10.0);
        assert_eq!(tolerance(), first);
    }
}
