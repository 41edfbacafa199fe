//! Static level geometry and spatial queries against it.
//!
//! [`CollisionWorld`] holds the solid, non-moving boxes of the current scene
//! (floors, walls, platforms). It answers the two questions gameplay asks of
//! the physics service:
//!
//! - [`CollisionWorld::probe`]: sweep a box along a direction and report the
//!   first hit, used once per tick by the ground check.
//! - [`CollisionWorld::overlapping`]: which statics a box currently
//!   intersects, used by integration to resolve contacts.
//!
//! The scene loader clears it before building the next scene.

use bevy_ecs::prelude::Resource;
use glam::Vec3;

use crate::components::boxcollider::{Aabb, LayerMask, mask_contains};

/// World gravity applied to every [`RigidBody`](crate::components::rigidbody::RigidBody)
/// with a non-zero gravity scale.
#[derive(Resource, Clone, Copy, Debug)]
pub struct Gravity(pub Vec3);

impl Default for Gravity {
    fn default() -> Self {
        Gravity(Vec3::new(0.0, -9.81, 0.0))
    }
}

/// One solid box of level geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticCollider {
    pub aabb: Aabb,
    pub layer: u8,
}

/// Result of a successful [`CollisionWorld::probe`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    /// Index of the static that was hit.
    pub index: usize,
    /// Distance travelled along the direction before contact. Zero when the
    /// box already overlapped at its origin.
    pub distance: f32,
    /// Centre of the swept box at the moment of contact.
    pub point: Vec3,
}

#[derive(Resource, Debug, Default, Clone)]
pub struct CollisionWorld {
    statics: Vec<StaticCollider>,
}

impl CollisionWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a solid box and return its index.
    pub fn add(&mut self, aabb: Aabb, layer: u8) -> usize {
        self.statics.push(StaticCollider { aabb, layer });
        self.statics.len() - 1
    }

    pub fn clear(&mut self) {
        self.statics.clear();
    }

    pub fn len(&self) -> usize {
        self.statics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statics.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StaticCollider> {
        self.statics.get(index)
    }

    /// Statics on a layer in `mask` that strictly overlap `aabb`.
    pub fn overlapping(&self, aabb: &Aabb, mask: LayerMask) -> impl Iterator<Item = &StaticCollider> {
        self.statics
            .iter()
            .filter(move |s| mask_contains(mask, s.layer) && s.aabb.overlaps(aabb))
    }

    /// Sweep a box of `half_extents` from `origin` along `direction` for at
    /// most `max_distance` and return the nearest hit on a layer in `mask`.
    ///
    /// A zero direction only tests overlap at the origin. A miss is `None`,
    /// never an error.
    pub fn probe(
        &self,
        origin: Vec3,
        half_extents: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<ProbeHit> {
        let dir = direction.normalize_or_zero();
        let max_distance = max_distance.max(0.0);
        let half = half_extents.abs();

        let mut best: Option<ProbeHit> = None;
        for (index, s) in self.statics.iter().enumerate() {
            if !mask_contains(mask, s.layer) {
                continue;
            }
            // Sweeping a box against a box is a ray cast against the static
            // grown by the moving box's half extents.
            let grown = Aabb {
                min: s.aabb.min - half,
                max: s.aabb.max + half,
            };
            let Some(distance) = ray_slab(origin, dir, &grown) else {
                continue;
            };
            if distance > max_distance {
                continue;
            }
            if best.is_none_or(|b| distance < b.distance) {
                best = Some(ProbeHit {
                    index,
                    distance,
                    point: origin + dir * distance,
                });
            }
        }
        best
    }
}

/// Entry distance of a ray into a box, clamped at 0 when the ray starts
/// inside. Faces only touched by the ray do not count.
fn ray_slab(origin: Vec3, dir: Vec3, aabb: &Aabb) -> Option<f32> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;
    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        let (lo, hi) = (aabb.min[axis], aabb.max[axis]);
        if d.abs() < 1e-8 {
            if o <= lo || o >= hi {
                return None;
            }
            continue;
        }
        let t1 = (lo - o) / d;
        let t2 = (hi - o) / d;
        let (near, far) = if t1 < t2 { (t1, t2) } else { (t2, t1) };
        t_enter = t_enter.max(near);
        t_exit = t_exit.min(far);
    }
    if t_exit <= t_enter || t_exit <= 0.0 {
        return None;
    }
    Some(t_enter.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::boxcollider::{ALL_LAYERS, layer_bit};

    const EPSILON: f32 = 1e-5;

    fn floor_world() -> CollisionWorld {
        let mut cw = CollisionWorld::new();
        // Top face at y = 0.
        cw.add(
            Aabb {
                min: Vec3::new(-10.0, -1.0, -1.0),
                max: Vec3::new(10.0, 0.0, 1.0),
            },
            0,
        );
        cw
    }

    #[test]
    fn probe_down_hits_floor_within_distance() {
        let cw = floor_world();
        let half = Vec3::new(0.4, 0.05, 0.4);
        let hit = cw
            .probe(Vec3::new(0.0, 0.12, 0.0), half, Vec3::NEG_Y, 0.1, ALL_LAYERS)
            .expect("floor is 0.07 below the probe box");
        assert!((hit.distance - 0.07).abs() < EPSILON);
        assert_eq!(hit.index, 0);
    }

    #[test]
    fn probe_misses_when_floor_is_too_far() {
        let cw = floor_world();
        let half = Vec3::new(0.4, 0.05, 0.4);
        assert!(
            cw.probe(Vec3::new(0.0, 0.5, 0.0), half, Vec3::NEG_Y, 0.1, ALL_LAYERS)
                .is_none()
        );
    }

    #[test]
    fn probe_respects_layer_mask() {
        let cw = floor_world();
        let half = Vec3::new(0.4, 0.05, 0.4);
        let origin = Vec3::new(0.0, 0.1, 0.0);
        assert!(cw.probe(origin, half, Vec3::NEG_Y, 0.1, layer_bit(3)).is_none());
        assert!(cw.probe(origin, half, Vec3::NEG_Y, 0.1, layer_bit(0)).is_some());
    }

    #[test]
    fn probe_starting_inside_reports_zero_distance() {
        let cw = floor_world();
        let hit = cw
            .probe(Vec3::new(0.0, -0.5, 0.0), Vec3::splat(0.1), Vec3::NEG_Y, 0.1, ALL_LAYERS)
            .unwrap();
        assert_eq!(hit.distance, 0.0);
    }

    #[test]
    fn probe_ignores_geometry_behind() {
        let cw = floor_world();
        assert!(
            cw.probe(Vec3::new(0.0, 0.5, 0.0), Vec3::splat(0.1), Vec3::Y, 5.0, ALL_LAYERS)
                .is_none()
        );
    }

    #[test]
    fn box_past_the_ledge_edge_misses() {
        let cw = floor_world();
        let half = Vec3::new(0.4, 0.05, 0.4);
        assert!(
            cw.probe(Vec3::new(10.5, 0.1, 0.0), half, Vec3::NEG_Y, 0.1, ALL_LAYERS)
                .is_none()
        );
    }

    #[test]
    fn overlapping_lists_intersecting_statics() {
        let cw = floor_world();
        let inside = Aabb::from_center(Vec3::new(0.0, -0.1, 0.0), Vec3::splat(0.2));
        let resting = Aabb::from_center(Vec3::new(0.0, 0.2, 0.0), Vec3::splat(0.2));
        assert_eq!(cw.overlapping(&inside, ALL_LAYERS).count(), 1);
        assert_eq!(cw.overlapping(&resting, ALL_LAYERS).count(), 0);
    }
}
