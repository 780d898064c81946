//! The harbor: static map, live entities, interactables and the lighthouse flag.

pub mod interactables;

use std::f64::consts::TAU;

use tracing::{debug, info};

use crate::{
    clock::DayBand,
    data::props::STATIC_PROPS,
    ecs::{
        EcsWorld,
        components::{CreatureKind, ShadeKind},
        resources::{FrameContext, FrameEvents},
    },
    field::{self, WaterField},
    map::{Collider, HarborMap, Vec2},
};

use self::interactables::Interactables;

pub const MAX_SHADOW_FIGURES: usize = 3;
pub const SHADOW_SPAWN_COOLDOWN: f64 = 3.0;
pub const MAX_GHOSTS: usize = 2;
pub const GHOST_SPAWN_COOLDOWN: f64 = 15.0;
/// Shadow figures only gather below this sanity.
pub const SHADOW_SANITY: f32 = 50.0;
pub const GHOST_SANITY: f32 = 40.0;

/// What the world needs from the rest of the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldFrame {
    pub dt: f64,
    pub time: f64,
    pub hours: f64,
    pub sanity: f32,
    pub player: Vec2,
    /// No new entities while the player stands in a critical zone.
    pub suppressed: bool,
}

pub struct HarborWorld {
    pub map: HarborMap,
    pub ecs: EcsWorld,
    pub interactables: Interactables,
    inside_lighthouse: bool,
    last_shadow_spawn: f64,
    last_ghost_spawn: f64,
    water: WaterField,
}

impl HarborWorld {
    pub fn pale_harbor(seed: u64) -> Self {
        let map = HarborMap::pale_harbor();
        let mut ecs = EcsWorld::new();
        for prop in STATIC_PROPS {
            ecs.spawn_prop(prop);
        }
        ecs.seed_atmosphere();
        ecs.spawn_creature(CreatureKind::Cat, Vec2::new(1240.0, 420.0));
        ecs.spawn_creature(CreatureKind::Rat, Vec2::new(900.0, 700.0));
        ecs.spawn_creature(CreatureKind::Seagull, Vec2::new(420.0, 820.0));
        let interactables = Interactables::pale_harbor();
        info!(
            props = ecs.prop_count(),
            dynamic = ecs.dynamic_count(),
            interactables = interactables.len(),
            "harbor built"
        );
        Self {
            map,
            ecs,
            interactables,
            inside_lighthouse: false,
            last_shadow_spawn: 0.0,
            last_ghost_spawn: 0.0,
            water: WaterField::new(seed),
        }
    }

    pub fn inside_lighthouse(&self) -> bool {
        self.inside_lighthouse
    }

    pub fn enter_lighthouse(&mut self) {
        self.inside_lighthouse = true;
        self.interactables.load_interior();
        debug!(interactables = self.interactables.len(), "entered lighthouse");
    }

    pub fn exit_lighthouse(&mut self) {
        self.inside_lighthouse = false;
        self.interactables.stow_interior();
        debug!(interactables = self.interactables.len(), "left lighthouse");
    }

    pub fn collider(&self) -> &impl Collider {
        &self.map
    }

    pub fn water_height(&self, point: Vec2, time: f64, sanity: f32) -> f32 {
        self.water.height(point.x, point.y, time, sanity)
    }

    pub fn spawn_moving_shadow(&mut self, from: Vec2, to: Vec2) {
        self.ecs.spawn_moving_shadow(from, to);
    }

    /// Spawns what the hour and sanity call for, then runs the entity systems.
    pub fn update(&mut self, frame: &WorldFrame) -> FrameEvents {
        if !frame.suppressed {
            if frame.sanity < SHADOW_SANITY {
                self.gather_shadows(frame);
            }
            if frame.sanity < GHOST_SANITY && DayBand::at(frame.hours) == DayBand::Night {
                self.summon_ghost(frame);
            }
        }
        self.ecs.advance(FrameContext {
            dt: frame.dt as f32,
            time: frame.time,
            sanity: frame.sanity,
            player: frame.player,
        });
        self.ecs.drain_events()
    }

    fn gather_shadows(&mut self, frame: &WorldFrame) {
        if self.ecs.shade_count(ShadeKind::Figure) >= MAX_SHADOW_FIGURES {
            return;
        }
        let t = frame.time;
        let chance = (t * 0.3).sin() * (1.0 - f64::from(frame.sanity) / 100.0);
        if chance <= 0.8 || t - self.last_shadow_spawn <= SHADOW_SPAWN_COOLDOWN {
            return;
        }
        let slot = (t * 0.5).floor().max(0.0) as usize % 8;
        let angle = slot as f64 / 8.0 * TAU;
        let distance = 300.0 + (t * 0.7).sin() * 100.0;
        let at = frame.player + Vec2::from_angle(angle as f32) * distance as f32;
        let opacity = 0.3 + ((t * 1.2).sin() + 1.0) * 0.2;
        let lifetime = 2.0 + ((t * 0.8).cos() + 1.0) * 1.5;
        self.ecs.spawn_shadow_figure(at, opacity as f32, lifetime as f32);
        self.last_shadow_spawn = t;
        debug!(x = at.x, y = at.y, "shadow figure");
    }

    fn summon_ghost(&mut self, frame: &WorldFrame) {
        let t = frame.time;
        if self.ecs.ghost_count() >= MAX_GHOSTS
            || t - self.last_ghost_spawn <= GHOST_SPAWN_COOLDOWN
            || field::sin01(t, 0.21) <= 0.9
        {
            return;
        }
        let (x, y) = (f64::from(frame.player.x), f64::from(frame.player.y));
        let dir = Vec2::from_angle(field::heading(x, y, t, 12) as f32);
        let reach = field::range(field::spatial(x, y, t, 13), 150.0, 250.0) as f32;
        let at = frame.player + dir * reach;
        self.ecs.spawn_ghost(at);
        self.last_ghost_spawn = t;
        debug!(x = at.x, y = at.y, "ghostly figure");
    }
}
