//! Axis-aligned box collider and the layer mask vocabulary.
//!
//! Every collider sits on one of 32 layers. Queries (ground probes,
//! projectile hits) carry a [`LayerMask`] and only see colliders whose layer
//! bit is set in the mask.

use bevy_ecs::prelude::Component;
use glam::Vec3;

/// Bit set of collision layers.
pub type LayerMask = u32;

/// Mask that accepts every layer.
pub const ALL_LAYERS: LayerMask = u32::MAX;

/// Layer used when nothing else is specified.
pub const DEFAULT_LAYER: u8 = 0;

/// Mask bit for a single layer index. Indices above 31 map to no bit.
pub fn layer_bit(layer: u8) -> LayerMask {
    1u32.checked_shl(layer as u32).unwrap_or(0)
}

/// True when `layer` is selected by `mask`.
pub fn mask_contains(mask: LayerMask, layer: u8) -> bool {
    mask & layer_bit(layer) != 0
}

/// World-space box given by its corners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn half_extents(&self) -> Vec3 {
        self.size() * 0.5
    }

    /// Strict overlap: boxes that only touch do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

/// Box collider attached to an actor, centred on its translation plus
/// `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub half_extents: Vec3,
    pub offset: Vec3,
    pub layer: u8,
    /// Layers this body is blocked by when integrated.
    pub collides_with: LayerMask,
    /// Triggers report overlaps but never block movement.
    pub is_trigger: bool,
}

/// Depth given to 2D colliders so they overlap on the z = 0 plane.
const PLANAR_HALF_DEPTH: f32 = 0.5;

impl BoxCollider {
    /// Collider with full `size` (not half extents).
    pub fn new(size: Vec3) -> Self {
        Self {
            half_extents: size.abs() * 0.5,
            offset: Vec3::ZERO,
            layer: DEFAULT_LAYER,
            collides_with: ALL_LAYERS,
            is_trigger: false,
        }
    }

    /// Collider for an actor living in the x/y plane.
    pub fn planar(width: f32, height: f32) -> Self {
        Self::new(Vec3::new(width, height, PLANAR_HALF_DEPTH * 2.0))
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_layer(mut self, layer: u8) -> Self {
        self.layer = layer;
        self
    }

    pub fn with_collides_with(mut self, mask: LayerMask) -> Self {
        self.collides_with = mask;
        self
    }

    pub fn as_trigger(mut self) -> Self {
        self.is_trigger = true;
        self
    }

    /// World-space bounds for an actor at `position`.
    pub fn aabb(&self, position: Vec3) -> Aabb {
        Aabb::from_center(position + self.offset, self.half_extents)
    }

    pub fn overlaps(&self, position: Vec3, other: &Self, other_position: Vec3) -> bool {
        self.aabb(position).overlaps(&other.aabb(other_position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_bits() {
        assert_eq!(layer_bit(0), 1);
        assert_eq!(layer_bit(3), 8);
        assert_eq!(layer_bit(40), 0);
        assert!(mask_contains(ALL_LAYERS, 17));
        assert!(!mask_contains(layer_bit(2), 3));
    }

    #[test]
    fn aabb_uses_offset() {
        let c = BoxCollider::planar(2.0, 4.0).with_offset(Vec3::new(0.0, 2.0, 0.0));
        let b = c.aabb(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(b.min, Vec3::new(0.0, 0.0, -0.5));
        assert_eq!(b.max, Vec3::new(2.0, 4.0, 0.5));
    }

    #[test]
    fn touching_boxes_do_not_overlap() {
        let a = BoxCollider::planar(1.0, 1.0);
        let b = BoxCollider::planar(1.0, 1.0);
        assert!(!a.overlaps(Vec3::ZERO, &b, Vec3::new(1.0, 0.0, 0.0)));
        assert!(a.overlaps(Vec3::ZERO, &b, Vec3::new(0.9, 0.0, 0.0)));
    }

    #[test]
    fn contains_point_is_inclusive() {
        let b = Aabb::from_center(Vec3::ZERO, Vec3::ONE);
        assert!(b.contains_point(Vec3::new(1.0, -1.0, 0.0)));
        assert!(!b.contains_point(Vec3::new(1.1, 0.0, 0.0)));
    }
}
