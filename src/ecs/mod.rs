#![allow(dead_code)]

pub mod components;
pub mod resources;
pub mod systems;

use bracket_terminal::prelude::{RGB, to_cp437};
use specs::prelude::{
    Builder, Dispatcher, DispatcherBuilder, Join, World as SpecsWorld, WorldExt,
};

use crate::map::{PropDescriptor, PropKind, Vec2};

use self::{
    components::{
        Body, Creature, CreatureKind, Drifter, Dynamic, Expired, Ghost, Haunt, Position,
        Renderable, Shade, ShadeKind, StaticProp,
    },
    resources::{FrameContext, FrameEvents},
    systems::{CleanupSystem, CreatureSystem, DriftSystem, GhostSystem, ShadeSystem},
};

pub const MAX_DYNAMIC_ENTITIES: usize = 60;
pub const FOG_BANKS: usize = 50;
pub const DISTANT_GULLS: usize = 8;

pub struct EcsWorld {
    specs_world: SpecsWorld,
    dispatcher: Dispatcher<'static, 'static>,
    next_spawn: u64,
    pub frame: u64,
}

impl EcsWorld {
    pub fn new() -> Self {
        let mut specs_world = SpecsWorld::new();
        Self::register_components(&mut specs_world);
        specs_world.insert(FrameContext::default());
        specs_world.insert(FrameEvents::default());
        let dispatcher = DispatcherBuilder::new()
            .with(GhostSystem::default(), "ghosts", &[])
            .with(ShadeSystem::default(), "shades", &["ghosts"])
            .with(CreatureSystem::default(), "creatures", &["shades"])
            .with(DriftSystem::default(), "drift", &["creatures"])
            .with(
                CleanupSystem::default(),
                "cleanup",
                &["ghosts", "shades", "creatures", "drift"],
            )
            .build();

        Self {
            specs_world,
            dispatcher,
            next_spawn: 0,
            frame: 0,
        }
    }

    fn register_components(world: &mut SpecsWorld) {
        world.register::<Position>();
        world.register::<Body>();
        world.register::<Renderable>();
        world.register::<StaticProp>();
        world.register::<Ghost>();
        world.register::<Creature>();
        world.register::<Drifter>();
        world.register::<Shade>();
        world.register::<Dynamic>();
        world.register::<Expired>();
    }

    pub fn advance(&mut self, context: FrameContext) {
        self.specs_world.insert(context);
        self.dispatcher.dispatch_seq(&self.specs_world);
        self.specs_world.maintain();
        self.frame = self.frame.wrapping_add(1);
    }

    pub fn drain_events(&mut self) -> FrameEvents {
        let mut events = self.specs_world.write_resource::<FrameEvents>();
        std::mem::take(&mut *events)
    }

    fn next_order(&mut self) -> u64 {
        let order = self.next_spawn;
        self.next_spawn += 1;
        order
    }

    pub fn spawn_prop(&mut self, prop: &PropDescriptor) {
        let bounds = prop.bounds;
        self.specs_world
            .create_entity()
            .with(Position {
                point: bounds.center(),
            })
            .with(Body {
                extent: Vec2::new(bounds.width, bounds.height),
                active: true,
            })
            .with(Renderable {
                glyph: prop_glyph(prop.kind),
                color: prop_color(prop.kind),
                order: 0,
                opacity: 1.0,
            })
            .with(StaticProp { kind: prop.kind })
            .build();
    }

    /// Fog banks and distant gulls laid out from their index alone.
    pub fn seed_atmosphere(&mut self) {
        for i in 0..FOG_BANKS {
            let k = i as f32;
            let size = 20.0 + ((k * 0.7).sin() + 1.0) * 20.0;
            let opacity = 0.1 + ((k * 1.3).sin() + 1.0) * 0.1;
            let velocity = Vec2::new(
                ((k * 2.1).sin() - 0.5) * 10.0,
                ((k * 1.7).cos() - 0.5) * 5.0,
            );
            let at = Vec2::new((k * 73.7) % 2048.0, (k * 127.3) % 1536.0);
            self.spawn_drifter(
                at,
                velocity,
                size,
                None,
                opacity,
                to_cp437('░'),
                RGB::from_u8(220, 220, 230),
                3,
            );
        }
        for i in 0..DISTANT_GULLS {
            let k = i as f32;
            let speed = 30.0 + ((k * 0.8).cos() + 1.0) * 10.0;
            let heading = k / DISTANT_GULLS as f32 * std::f32::consts::TAU;
            let size = 3.0 + (k * 1.1).sin() + 1.0;
            let at = Vec2::new((k * 256.0) % 2048.0, 100.0 + ((k * 1.5).sin() + 1.0) * 100.0);
            self.spawn_drifter(
                at,
                Vec2::from_angle(heading) * speed,
                size,
                Some((50.0, 350.0)),
                1.0,
                to_cp437('v'),
                RGB::from_u8(255, 255, 255),
                2,
            );
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn spawn_drifter(
        &mut self,
        at: Vec2,
        velocity: Vec2,
        size: f32,
        band: Option<(f32, f32)>,
        opacity: f32,
        glyph: u16,
        color: RGB,
        order: i32,
    ) {
        let spawn_order = self.next_order();
        self.specs_world
            .create_entity()
            .with(Position { point: at })
            .with(Body {
                extent: Vec2::new(size * 2.0, size * 2.0),
                active: true,
            })
            .with(Renderable {
                glyph,
                color,
                order,
                opacity,
            })
            .with(Drifter {
                velocity,
                size,
                turn_timer: 0.0,
                band,
            })
            .with(Dynamic {
                spawn_order,
                capped: true,
            })
            .build();
    }

    pub fn spawn_creature(&mut self, kind: CreatureKind, at: Vec2) {
        let (glyph, color) = match kind {
            CreatureKind::Seagull => ('v', RGB::from_u8(255, 255, 255)),
            CreatureKind::Cat => ('c', RGB::from_u8(42, 42, 42)),
            CreatureKind::Rat => ('r', RGB::from_u8(74, 74, 74)),
        };
        let spawn_order = self.next_order();
        self.specs_world
            .create_entity()
            .with(Position { point: at })
            .with(Body {
                extent: Vec2::new(8.0, 8.0),
                active: true,
            })
            .with(Renderable {
                glyph: to_cp437(glyph),
                color,
                order: 1,
                opacity: 1.0,
            })
            .with(Creature {
                kind,
                heading: (at.x * 0.01 + at.y * 0.01) * std::f32::consts::TAU,
                speed: 40.0 + ((at.x * 0.1 + at.y * 0.1).sin() + 1.0) * 30.0,
                timer: 0.0,
                home: at,
                goal: at,
                wander_radius: 200.0 + ((at.x * 0.05).cos() + 1.0) * 150.0,
                call_cooldown: 0.0,
            })
            .with(Dynamic {
                spawn_order,
                capped: kind == CreatureKind::Seagull,
            })
            .build();
    }

    pub fn spawn_ghost(&mut self, at: Vec2) {
        let (x, y) = (at.x, at.y);
        let lifetime = 5.0 + ((x * 0.02 + y * 0.02).sin() + 1.0) * 5.0;
        let spawn_order = self.next_order();
        self.specs_world
            .create_entity()
            .with(Position { point: at })
            .with(Body {
                extent: Vec2::new(20.0, 40.0),
                active: true,
            })
            .with(Renderable {
                glyph: to_cp437('Ω'),
                color: RGB::from_u8(224, 224, 255),
                order: 2,
                opacity: 0.3 + ((x * 0.1 + y * 0.1).sin() + 1.0) * 0.2,
            })
            .with(Ghost {
                haunt: if (x * 0.1).sin() > 0.0 {
                    Haunt::Wandering
                } else {
                    Haunt::Following
                },
                heading: (x * 0.01 + y * 0.01) * std::f32::consts::TAU,
                speed: 20.0 + ((x * 0.05 + y * 0.05).cos() + 1.0) * 15.0,
                lifetime,
                max_lifetime: lifetime,
                awareness: 100.0 + ((y * 0.1).cos() + 1.0) * 50.0,
                flicker: 0.0,
                visible: true,
                watch_cooldown: 0.0,
            })
            .with(Dynamic {
                spawn_order,
                capped: false,
            })
            .build();
    }

    pub fn spawn_shadow_figure(&mut self, at: Vec2, opacity: f32, lifetime: f32) {
        self.spawn_shade(
            at,
            Shade {
                kind: ShadeKind::Figure,
                lifetime,
                target: at,
                speed: 0.0,
            },
            opacity,
            Vec2::new(20.0, 40.0),
        );
    }

    /// A shadow that glides from `from` to `to` over three seconds.
    pub fn spawn_moving_shadow(&mut self, from: Vec2, to: Vec2) {
        self.spawn_shade(
            from,
            Shade {
                kind: ShadeKind::Moving,
                lifetime: 3.0,
                target: to,
                speed: 50.0,
            },
            0.6,
            Vec2::new(30.0, 60.0),
        );
    }

    fn spawn_shade(&mut self, at: Vec2, shade: Shade, opacity: f32, extent: Vec2) {
        let spawn_order = self.next_order();
        let capped = shade.kind == ShadeKind::Figure;
        self.specs_world
            .create_entity()
            .with(Position { point: at })
            .with(Body {
                extent,
                active: true,
            })
            .with(Renderable {
                glyph: to_cp437('█'),
                color: RGB::from_u8(0, 0, 0),
                order: 2,
                opacity,
            })
            .with(shade)
            .with(Dynamic {
                spawn_order,
                capped,
            })
            .build();
    }

    pub fn shade_count(&self, kind: ShadeKind) -> usize {
        let shades = self.specs_world.read_component::<Shade>();
        shades.join().filter(|shade| shade.kind == kind).count()
    }

    pub fn ghost_count(&self) -> usize {
        self.specs_world.read_component::<Ghost>().join().count()
    }

    pub fn dynamic_count(&self) -> usize {
        self.specs_world.read_component::<Dynamic>().join().count()
    }

    pub fn capped_count(&self) -> usize {
        let dynamics = self.specs_world.read_component::<Dynamic>();
        dynamics.join().filter(|dynamic| dynamic.capped).count()
    }

    pub fn drifter_count(&self) -> usize {
        self.specs_world.read_component::<Drifter>().join().count()
    }

    pub fn creature_count(&self, kind: CreatureKind) -> usize {
        let creatures = self.specs_world.read_component::<Creature>();
        creatures.join().filter(|creature| creature.kind == kind).count()
    }

    pub fn prop_count(&self) -> usize {
        self.specs_world.read_component::<StaticProp>().join().count()
    }

    /// Visits renderables in draw order: by layer, then top to bottom.
    pub fn each_renderable<F>(&self, mut f: F)
    where
        F: FnMut(Vec2, Vec2, &Renderable),
    {
        let positions = self.specs_world.read_component::<Position>();
        let bodies = self.specs_world.read_component::<Body>();
        let renderables = self.specs_world.read_component::<Renderable>();
        let mut visible: Vec<(Vec2, Vec2, &Renderable)> = (&positions, &bodies, &renderables)
            .join()
            .filter(|(_, body, render)| body.active && render.opacity > 0.0)
            .map(|(pos, body, render)| (pos.point, body.extent, render))
            .collect();
        visible.sort_by(|a, b| a.2.order.cmp(&b.2.order).then(a.0.y.total_cmp(&b.0.y)));
        for (point, extent, render) in visible {
            f(point, extent, render);
        }
    }

    /// Positions of every dynamic entity, for replay comparisons.
    pub fn dynamic_positions(&self) -> Vec<(u64, Vec2)> {
        let positions = self.specs_world.read_component::<Position>();
        let dynamics = self.specs_world.read_component::<Dynamic>();
        let mut out: Vec<(u64, Vec2)> = (&positions, &dynamics)
            .join()
            .map(|(pos, dynamic)| (dynamic.spawn_order, pos.point))
            .collect();
        out.sort_by_key(|(order, _)| *order);
        out
    }
}

impl Default for EcsWorld {
    fn default() -> Self {
        Self::new()
    }
}

fn prop_glyph(kind: PropKind) -> u16 {
    to_cp437(match kind {
        PropKind::Lighthouse => '▲',
        PropKind::Dock => '=',
        PropKind::Building => '#',
        PropKind::Sign => '¶',
        PropKind::Sailboat => 'Φ',
        PropKind::Tree => '♣',
        PropKind::Lamppost => '¡',
        PropKind::Rock => '•',
    })
}

fn prop_color(kind: PropKind) -> RGB {
    match kind {
        PropKind::Lighthouse => RGB::from_u8(232, 232, 232),
        PropKind::Dock => RGB::from_u8(101, 67, 33),
        PropKind::Building => RGB::from_u8(90, 74, 58),
        PropKind::Sign => RGB::from_u8(139, 115, 85),
        PropKind::Sailboat => RGB::from_u8(210, 200, 180),
        PropKind::Tree => RGB::from_u8(34, 68, 34),
        PropKind::Lamppost => RGB::from_u8(255, 200, 100),
        PropKind::Rock => RGB::from_u8(102, 102, 102),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(dt: f32, time: f64, sanity: f32, player: Vec2) -> FrameContext {
        FrameContext {
            dt,
            time,
            sanity,
            player,
        }
    }

    #[test]
    fn test_fresh_harbor_keeps_all_fog() {
        let mut ecs = EcsWorld::new();
        ecs.seed_atmosphere();
        ecs.spawn_creature(CreatureKind::Cat, Vec2::new(1240.0, 420.0));
        ecs.spawn_creature(CreatureKind::Rat, Vec2::new(900.0, 700.0));
        ecs.spawn_creature(CreatureKind::Seagull, Vec2::new(420.0, 820.0));
        ecs.advance(frame(0.016, 0.0, 100.0, Vec2::ZERO));
        assert_eq!(ecs.drifter_count(), FOG_BANKS + DISTANT_GULLS);
        assert_eq!(ecs.creature_count(CreatureKind::Cat), 1);
        assert_eq!(ecs.creature_count(CreatureKind::Rat), 1);
        assert_eq!(ecs.creature_count(CreatureKind::Seagull), 1);
    }

    #[test]
    fn test_cap_trims_oldest_capped_and_spares_cats_and_rats() {
        let mut ecs = EcsWorld::new();
        ecs.seed_atmosphere();
        for i in 0..10 {
            ecs.spawn_creature(CreatureKind::Rat, Vec2::new(100.0 + i as f32, 100.0));
            ecs.spawn_creature(CreatureKind::Cat, Vec2::new(100.0 + i as f32, 200.0));
        }
        for i in 0..5 {
            ecs.spawn_shadow_figure(Vec2::new(i as f32 * 40.0, 0.0), 0.5, 5.0);
        }
        assert_eq!(ecs.capped_count(), 63);
        ecs.advance(frame(0.016, 0.0, 100.0, Vec2::ZERO));
        assert_eq!(ecs.capped_count(), MAX_DYNAMIC_ENTITIES);
        assert_eq!(ecs.creature_count(CreatureKind::Rat), 10);
        assert_eq!(ecs.creature_count(CreatureKind::Cat), 10);
        assert_eq!(ecs.shade_count(ShadeKind::Figure), 5);
        let orders: Vec<u64> = ecs.dynamic_positions().iter().map(|(o, _)| *o).collect();
        assert_eq!(orders.first(), Some(&3));
    }

    #[test]
    fn test_props_survive_cleanup() {
        let mut ecs = EcsWorld::new();
        for prop in crate::data::props::STATIC_PROPS {
            ecs.spawn_prop(prop);
        }
        let props = ecs.prop_count();
        for i in 0..100 {
            ecs.spawn_creature(CreatureKind::Seagull, Vec2::new(i as f32, 0.0));
        }
        ecs.advance(frame(0.016, 0.0, 100.0, Vec2::ZERO));
        assert_eq!(ecs.prop_count(), props);
    }

    #[test]
    fn test_ghost_drains_nearby_player() {
        let mut ecs = EcsWorld::new();
        let player = Vec2::new(500.0, 500.0);
        ecs.spawn_ghost(Vec2::new(520.0, 500.0));
        ecs.advance(frame(0.5, 1.0, 80.0, player));
        let events = ecs.drain_events();
        assert!((events.sanity_loss - 3.0).abs() < 1e-4);
        assert!(ecs.drain_events().is_empty());
    }

    #[test]
    fn test_moving_shadow_touch_needs_low_sanity() {
        let mut ecs = EcsWorld::new();
        let player = Vec2::new(500.0, 500.0);
        ecs.spawn_moving_shadow(Vec2::new(510.0, 500.0), Vec2::new(400.0, 500.0));
        ecs.advance(frame(0.016, 0.0, 50.0, player));
        assert!(!ecs.drain_events().shadow_touch);
        ecs.advance(frame(0.016, 0.016, 5.0, player));
        assert!(ecs.drain_events().shadow_touch);
    }

    #[test]
    fn test_shadow_figures_fade_away() {
        let mut ecs = EcsWorld::new();
        ecs.spawn_shadow_figure(Vec2::new(0.0, 0.0), 0.5, 5.0);
        assert_eq!(ecs.shade_count(ShadeKind::Figure), 1);
        for step in 0..300 {
            ecs.advance(frame(0.016, step as f64 * 0.016, 50.0, Vec2::new(900.0, 900.0)));
        }
        assert_eq!(ecs.shade_count(ShadeKind::Figure), 0);
    }

    #[test]
    fn test_fog_wraps_inside_margin() {
        let mut ecs = EcsWorld::new();
        ecs.seed_atmosphere();
        for step in 0..600 {
            ecs.advance(frame(0.1, step as f64 * 0.1, 100.0, Vec2::ZERO));
        }
        for (_, point) in ecs.dynamic_positions() {
            assert!(point.x >= -60.0 && point.x <= MAP_WIDTH_CHECK);
        }
    }

    const MAP_WIDTH_CHECK: f32 = crate::map::MAP_WIDTH + 60.0;
}
