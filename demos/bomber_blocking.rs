use glam::Vec2;
use touchy::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Kind {
    Bomber,
    Wall,
    Portal,
}

struct Actor {
    kind: Kind,
    body: Body,
    position: Vec2,
    dimension: Vec2,
    old_position: Vec2,
    blocked: bool,
    next_level: bool,
}

impl Actor {
    fn new(id: u32, kind: Kind, position: Vec2, dimension: Vec2) -> Self {
        Self {
            kind,
            body: Body::new(EntityId(id), position, dimension),
            position,
            dimension,
            old_position: position,
            blocked: false,
            next_level: false,
        }
    }

    fn step(&mut self, delta: Vec2) {
        if !self.blocked {
            self.old_position = self.position;
            self.position += delta;
        }
    }
}

impl Collidable for Actor {
    fn body(&self) -> &Body {
        &self.body
    }
    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
    fn position(&self) -> Vec2 {
        self.position
    }
    fn dimension(&self) -> Vec2 {
        self.dimension
    }
    fn mobility(&self) -> Mobility {
        match self.kind {
            Kind::Bomber => Mobility::Dynamic,
            Kind::Wall | Kind::Portal => Mobility::Static,
        }
    }

    fn on_collision_enter(&mut self, other: Partner<'_, Self>) {
        if self.kind == Kind::Bomber && other.owner.kind == Kind::Wall {
            // Step back out of the wall and wait for the exit.
            self.position = self.old_position;
            self.blocked = true;
        }
    }

    fn on_collision_stay(&mut self, other: Partner<'_, Self>) {
        if self.kind == Kind::Bomber
            && other.owner.kind == Kind::Portal
            && self.body.overlap_ratio(other.id()) > 0.85
        {
            self.blocked = true;
            self.next_level = true;
        }
    }

    fn on_collision_exit(&mut self, other: Partner<'_, Self>) {
        if self.kind == Kind::Bomber && other.owner.kind == Kind::Wall {
            self.blocked = false;
        }
    }
}

fn main() {
    simple_logger::init_with_level(log::Level::Debug).unwrap();

    let mut engine = CollisionEngine::default();
    let tile = Vec2::splat(32.0);
    let mut actors = vec![
        Actor::new(1, Kind::Bomber, Vec2::new(0.0, 0.0), tile),
        Actor::new(2, Kind::Wall, Vec2::new(64.0, 0.0), tile),
        Actor::new(3, Kind::Portal, Vec2::new(0.0, 64.0), tile),
    ];

    // Walk right into the wall.
    for frame in 0..12 {
        actors[0].step(Vec2::new(4.0, 0.0));
        engine.check_all(&mut actors);
        for ev in engine.drain_events() {
            println!("frame {frame}: {:?} {:?} vs {:?} area={:.1}", ev.phase, ev.a, ev.b, ev.area);
        }
        if actors[0].blocked {
            println!("frame {frame}: bomber blocked at {:?}", actors[0].position);
            break;
        }
    }

    // Reset to the start and walk down onto the portal.
    actors[0].position = Vec2::new(0.0, 0.0);
    engine.check_all(&mut actors);
    actors[0].blocked = false;
    for frame in 0..24 {
        actors[0].step(Vec2::new(0.0, 4.0));
        engine.check_all(&mut actors);
        for ev in engine.drain_events() {
            println!("frame {frame}: {:?} {:?} vs {:?} area={:.1}", ev.phase, ev.a, ev.b, ev.area);
        }
        if actors[0].next_level {
            println!("frame {frame}: bomber reached the portal, next level");
            break;
        }
    }
}
