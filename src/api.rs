use glam::Vec2;

use crate::body::Body;
use crate::types::*;

/// The partner side of a notification: its body and the entity owning it.
pub struct Partner<'a, E: ?Sized> {
    pub body: &'a Body,
    pub owner: &'a E,
}

impl<'a, E: Collidable> Partner<'a, E> {
    pub fn of(owner: &'a E) -> Self {
        Self { body: owner.body(), owner }
    }

    pub fn id(&self) -> EntityId {
        self.body.owner()
    }

    pub fn mobility(&self) -> Mobility {
        self.owner.mobility()
    }
}

/// Capabilities an entity must expose to take part in collision checks.
///
/// The entity owns its [`Body`]; the body only refers back to it by [`EntityId`].
pub trait Collidable {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;

    /// Top-left corner of the entity's own bounds.
    fn position(&self) -> Vec2;
    /// Width/height of the entity's own bounds.
    fn dimension(&self) -> Vec2;
    fn mobility(&self) -> Mobility;

    // --- Notification hooks -----------------------------------------------
    // Hooks may mutate local entity state (position, flags) but must not
    // re-enter `check_all`.

    /// The pair went from no contact to contact.
    fn on_collision_enter(&mut self, _other: Partner<'_, Self>) {}

    /// The pair was in contact last check and still is.
    fn on_collision_stay(&mut self, _other: Partner<'_, Self>) {}

    /// The pair was in contact last check and no longer is.
    fn on_collision_exit(&mut self, _other: Partner<'_, Self>) {}
}

/// Public API contract for the per-frame collision engine.
pub trait CollisionEngineApi {
    /// Construct a new engine with the given configuration.
    fn new(cfg: EngineConfig) -> Self
    where
        Self: Sized;

    /// Evaluate every dynamic x dynamic and dynamic x static pair of this frame's
    /// entities and fire enter/stay/exit hooks on both owners of each pair.
    fn check_all<E: Collidable>(&mut self, entities: &mut [E]);

    /// Drain and return the events recorded by the last `check_all`.
    fn drain_events(&mut self) -> Vec<ContactEvent>;

    /// Counters of the last `check_all`.
    fn stats(&self) -> EngineStats;
}

/// Rectangle primitives. Rectangles are given as (min, max) corners.
pub trait NarrowphaseApi {
    /// Intersection rectangle, `None` when the rectangles only touch or are apart.
    fn intersect_rect_rect(min0: Vec2, max0: Vec2, min1: Vec2, max1: Vec2) -> Option<(Vec2, Vec2)>;

    /// Intersection area, 0 when the rectangles only touch or are apart.
    fn overlap_area_rect_rect(min0: Vec2, max0: Vec2, min1: Vec2, max1: Vec2) -> f32;
}
