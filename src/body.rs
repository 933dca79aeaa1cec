use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::api::{Collidable, NarrowphaseApi};
use crate::narrowphase::Narrowphase;
use crate::types::EntityId;

/// Axis-aligned collision rectangle of one entity.
///
/// A body is always centered on its owner's center. Its size either follows the
/// owner's bounds (`tracks_owner`) or is a fixed override.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Body {
    owner: EntityId,
    dimension: Vec2,
    /// Top-left corner as of the last fit.
    position: Vec2,
    tracks_owner: bool,
    /// Last computed overlap area per partner. Keys are never pruned.
    overlap_history: HashMap<EntityId, f32>,
}

impl Body {
    /// Body matching the owner's current bounds and following them from now on.
    pub fn new(owner: EntityId, owner_position: Vec2, owner_dimension: Vec2) -> Self {
        Self {
            owner,
            dimension: owner_dimension,
            position: owner_position,
            tracks_owner: true,
            overlap_history: HashMap::new(),
        }
    }

    /// Body with a fixed size; only its placement follows the owner.
    /// Position stays at the origin until the first fit.
    pub fn with_dimension(owner: EntityId, dimension: Vec2) -> Self {
        Self {
            owner,
            dimension,
            position: Vec2::ZERO,
            tracks_owner: false,
            overlap_history: HashMap::new(),
        }
    }

    pub fn owner(&self) -> EntityId {
        self.owner
    }

    pub fn dimension(&self) -> Vec2 {
        self.dimension
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn tracks_owner(&self) -> bool {
        self.tracks_owner
    }

    /// Override the size. Disengages owner tracking until re-enabled with
    /// [`Body::set_tracks_owner`].
    pub fn set_dimension(&mut self, dimension: Vec2) {
        self.dimension = dimension;
        self.tracks_owner = false;
    }

    pub fn set_tracks_owner(&mut self, value: bool) {
        self.tracks_owner = value;
    }

    pub fn min(&self) -> Vec2 {
        self.position
    }

    pub fn max(&self) -> Vec2 {
        self.position + self.dimension
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.dimension * 0.5
    }

    pub fn area(&self) -> f32 {
        self.dimension.x * self.dimension.y
    }

    /// Re-center on the owner's bounds (and adopt its size when tracking).
    /// Returns the owner's center. Idempotent for unchanged owner bounds.
    pub(crate) fn fit_to_owner(&mut self, owner_position: Vec2, owner_dimension: Vec2) -> Vec2 {
        let center = owner_position + owner_dimension * 0.5;
        if self.tracks_owner {
            self.dimension = owner_dimension;
        }
        self.position = center - self.dimension * 0.5;
        center
    }

    /// Intersection area of the two rectangles as last fitted.
    pub fn overlap_area(&self, other: &Body) -> f32 {
        Narrowphase::overlap_area_rect_rect(self.min(), self.max(), other.min(), other.max())
    }

    /// Overlap stored by the last check against `other`; 0 if never checked.
    pub fn stored_overlap(&self, other: EntityId) -> f32 {
        self.overlap_history.get(&other).copied().unwrap_or(0.0)
    }

    /// Stored overlap with `other` as a fraction of this body's own area.
    pub fn overlap_ratio(&self, other: EntityId) -> f32 {
        let area = self.area();
        if area > 0.0 { self.stored_overlap(other) / area } else { 0.0 }
    }

    /// Partners currently in contact, with their stored overlap.
    pub fn contacts(&self) -> impl Iterator<Item = (EntityId, f32)> + '_ {
        self.overlap_history
            .iter()
            .filter(|(_, area)| **area > 0.0)
            .map(|(id, area)| (*id, *area))
    }

    /// Number of partners this body was ever checked against.
    pub fn history_len(&self) -> usize {
        self.overlap_history.len()
    }

    pub(crate) fn record_overlap(&mut self, other: EntityId, area: f32) {
        self.overlap_history.insert(other, area);
    }
}

/// Fit an entity's body to the entity's current bounds; returns the entity center.
pub(crate) fn fit_to_owner<E: Collidable>(entity: &mut E) -> Vec2 {
    let (position, dimension) = (entity.position(), entity.dimension());
    entity.body_mut().fit_to_owner(position, dimension)
}

/// Fit both bodies to their owners, then compute their intersection area.
pub(crate) fn fitted_overlap_area<E: Collidable>(a: &mut E, b: &mut E) -> f32 {
    fit_to_owner(a);
    fit_to_owner(b);
    a.body().overlap_area(b.body())
}
