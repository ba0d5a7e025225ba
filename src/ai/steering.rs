//! Steering math
//!
//! Pure functions producing desired movement directions on the horizontal
//! plane. Every function guards zero-length vectors so degenerate geometry
//! yields a zero force rather than NaN.

use glam::Vec3;

/// Velocity magnitudes below this are treated as standing still
pub const VELOCITY_EPSILON: f32 = 1e-3;

#[inline]
fn flat(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Unit direction for a wander heading angle
pub fn wander_direction(heading: f32) -> Vec3 {
    Vec3::new(heading.cos(), 0.0, heading.sin())
}

/// Unit direction from `from` toward `to`; zero if coincident
pub fn seek(from: Vec3, to: Vec3) -> Vec3 {
    flat(to - from).normalize_or_zero()
}

/// Unit direction from `from` directly away from `threat`; zero if coincident
pub fn flee(from: Vec3, threat: Vec3) -> Vec3 {
    flat(from - threat).normalize_or_zero()
}

/// Separation force away from crowding neighbors
///
/// Averaged over all neighbors closer than `radius`, each contribution
/// weighted inversely by distance. Coincident neighbors are skipped.
pub fn separation(pos: Vec3, neighbors: &[Vec3], radius: f32) -> Vec3 {
    let mut force = Vec3::ZERO;
    let mut count = 0u32;
    for &other in neighbors {
        let away = flat(pos - other);
        let dist = away.length();
        if dist >= radius || dist < VELOCITY_EPSILON {
            continue;
        }
        force += away / dist / dist;
        count += 1;
    }
    if count == 0 {
        return Vec3::ZERO;
    }
    force / count as f32
}
