use std::collections::HashSet;
use std::time::Instant;

use crate::api::{Collidable, CollisionEngineApi, Partner};
use crate::body::fitted_overlap_area;
use crate::types::*;

/// Per-frame contact tracker. Overlap state lives in the bodies; the engine
/// only keeps frame-local bookkeeping.
pub struct CollisionEngine {
    pub cfg: EngineConfig,
    pub frame_counter: u32,

    // Event buffer for the last frame
    events: Vec<ContactEvent>,
    dropped_events: usize,

    stats: EngineStats,
    last_timing: Option<EngineTiming>,
}

impl CollisionEngineApi for CollisionEngine {
    fn new(cfg: EngineConfig) -> Self {
        Self {
            cfg,
            frame_counter: 0,
            events: Vec::new(),
            dropped_events: 0,
            stats: EngineStats::default(),
            last_timing: None,
        }
    }

    fn check_all<E: Collidable>(&mut self, entities: &mut [E]) {
        let t_all = if self.cfg.enable_timing { Some(Instant::now()) } else { None };
        self.frame_counter = self.frame_counter.wrapping_add(1);
        self.events.clear();
        self.dropped_events = 0;
        self.stats = EngineStats::default();
        self.last_timing = None;

        // Partition keeps the caller's order within each group.
        let (dynamics, statics): (Vec<usize>, Vec<usize>) =
            (0..entities.len()).partition(|&i| entities[i].mobility().is_dynamic());
        let partition_ms = t_all.map(|t| t.elapsed().as_secs_f64() * 1000.0).unwrap_or(0.0);

        self.stats.dynamics = dynamics.len();
        self.stats.statics = statics.len();
        self.stats.static_pairs_skipped = statics.len() * statics.len().saturating_sub(1) / 2;

        let t_pairs = if self.cfg.enable_timing { Some(Instant::now()) } else { None };
        let mut seen: HashSet<(EntityId, EntityId)> = HashSet::new();

        for (n, &a) in dynamics.iter().enumerate() {
            for &b in &dynamics[n + 1..] {
                self.check_pair(entities, a, b, &mut seen);
            }
        }
        for &a in &dynamics {
            for &b in &statics {
                self.check_pair(entities, a, b, &mut seen);
            }
        }

        let pairs_ms = t_pairs.map(|t| t.elapsed().as_secs_f64() * 1000.0).unwrap_or(0.0);
        if let Some(t_all) = t_all {
            self.last_timing = Some(EngineTiming {
                check_all_ms: t_all.elapsed().as_secs_f64() * 1000.0,
                partition_ms,
                pairs_ms,
            });
        }

        if self.dropped_events > 0 {
            log::warn!(
                "frame {}: event buffer full, dropped {} events (max_events = {})",
                self.frame_counter,
                self.dropped_events,
                self.cfg.max_events
            );
        }
        log::debug!(
            "frame {}: {} dynamic, {} static, {} pairs checked, {} notifications",
            self.frame_counter,
            self.stats.dynamics,
            self.stats.statics,
            self.stats.pairs_checked,
            self.stats.notifications
        );
    }

    fn drain_events(&mut self) -> Vec<ContactEvent> {
        std::mem::take(&mut self.events)
    }

    fn stats(&self) -> EngineStats {
        self.stats
    }
}

impl Default for CollisionEngine {
    fn default() -> Self {
        <Self as CollisionEngineApi>::new(EngineConfig::default())
    }
}

impl CollisionEngine {
    fn check_pair<E: Collidable>(
        &mut self,
        entities: &mut [E],
        ia: usize,
        ib: usize,
        seen: &mut HashSet<(EntityId, EntityId)>,
    ) {
        let id_a = entities[ia].body().owner();
        let id_b = entities[ib].body().owner();
        if id_a == id_b {
            log::warn!("entities #{} and #{} share identity {:?}; pair skipped", ia, ib, id_a);
            self.stats.duplicate_pairs_skipped += 1;
            return;
        }
        // Each unordered pair is measured and notified at most once per frame.
        if !seen.insert(id_a.pair(id_b)) {
            self.stats.duplicate_pairs_skipped += 1;
            return;
        }

        let (a, b) = pair_mut(entities, ia, ib);
        let area = fitted_overlap_area(a, b);
        // Read before overwrite
        let prior = a.body().stored_overlap(id_b);
        self.stats.pairs_checked += 1;

        if let Some(phase) = ContactPhase::classify(prior, area) {
            log::trace!("{:?} {:?} <-> {:?} area={} prior={}", phase, id_a, id_b, area, prior);
            notify(phase, a, b);
            self.stats.notifications += 2;
            self.push_event(ContactEvent { phase, a: id_a, b: id_b, area, prior });
        }

        a.body_mut().record_overlap(id_b, area);
        b.body_mut().record_overlap(id_a, area);
    }

    fn push_event(&mut self, ev: ContactEvent) {
        if !self.cfg.record_events {
            return;
        }
        if self.events.len() < self.cfg.max_events {
            self.events.push(ev);
        } else {
            self.dropped_events += 1;
        }
    }

    /// Return timing breakdown for the last `check_all` run.
    pub fn timing(&self) -> Option<EngineTiming> {
        self.last_timing
    }
}

/// Fire `phase` on both owners: A learns about B first, then B about A.
fn notify<E: Collidable>(phase: ContactPhase, a: &mut E, b: &mut E) {
    match phase {
        ContactPhase::Enter => {
            a.on_collision_enter(Partner::of(b));
            b.on_collision_enter(Partner::of(a));
        }
        ContactPhase::Stay => {
            a.on_collision_stay(Partner::of(b));
            b.on_collision_stay(Partner::of(a));
        }
        ContactPhase::Exit => {
            a.on_collision_exit(Partner::of(b));
            b.on_collision_exit(Partner::of(a));
        }
    }
}

/// Two distinct mutable elements of a slice.
fn pair_mut<E>(items: &mut [E], i: usize, j: usize) -> (&mut E, &mut E) {
    debug_assert_ne!(i, j);
    if i < j {
        let (lo, hi) = items.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}
