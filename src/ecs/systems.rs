#![allow(dead_code)]

use std::f32::consts::PI;

use specs::prelude::*;

use super::{
    components::{
        Creature, CreatureKind, Drifter, Dynamic, Expired, Ghost, Haunt, Position, Renderable,
        Shade, ShadeKind, StaticProp,
    },
    resources::{FrameContext, FrameEvents},
    MAX_DYNAMIC_ENTITIES,
};
use crate::{
    data::narrative::WATCHED,
    map::{MAP_HEIGHT, MAP_WIDTH, Vec2},
    ports::ToneRequest,
};

pub const GHOST_FEAR_RADIUS: f32 = 80.0;
pub const GHOST_DRAIN_PER_SECOND: f32 = 6.0;
pub const SHADOW_TOUCH_RADIUS: f32 = 30.0;
pub const SHADOW_TOUCH_SANITY: f32 = 10.0;

const WRAP_MARGIN: f32 = 50.0;

#[derive(Default)]
pub struct GhostSystem;

impl<'a> System<'a> for GhostSystem {
    type SystemData = (
        Entities<'a>,
        WriteStorage<'a, Ghost>,
        WriteStorage<'a, Position>,
        WriteStorage<'a, Renderable>,
        WriteStorage<'a, Expired>,
        ReadExpect<'a, FrameContext>,
        WriteExpect<'a, FrameEvents>,
    );

    fn run(
        &mut self,
        (entities, mut ghosts, mut positions, mut renderables, mut expired, frame, mut events): Self::SystemData,
    ) {
        let dt = frame.dt;
        let time = frame.time as f32;
        for (entity, ghost, pos) in (&entities, &mut ghosts, &mut positions).join() {
            ghost.lifetime -= dt;
            ghost.flicker += dt;
            ghost.watch_cooldown = (ghost.watch_cooldown - dt).max(0.0);
            let x = pos.point.x;
            if ghost.flicker > 0.1 + ((x * 0.1).sin() + 1.0) * 0.15 {
                ghost.visible = !ghost.visible;
                ghost.flicker = 0.0;
            }

            let offset = frame.player - pos.point;
            let distance = offset.length();
            match ghost.haunt {
                Haunt::Wandering => {
                    pos.point = pos.point + Vec2::from_angle(ghost.heading) * (ghost.speed * dt);
                    if (pos.point.x * 0.01 + time).sin() > 0.8 {
                        ghost.heading += ((pos.point.x * 0.1 + time).sin() - 0.5) * PI * dt;
                    }
                }
                Haunt::Following if distance > 0.0 => {
                    let toward = offset * (1.0 / distance);
                    if distance > 50.0 && distance < ghost.awareness {
                        pos.point = pos.point + toward * (ghost.speed * 0.7 * dt);
                    } else if distance <= 50.0 {
                        pos.point = pos.point - toward * (ghost.speed * 0.5 * dt);
                    }
                }
                Haunt::Following => {}
            }

            if distance < GHOST_FEAR_RADIUS {
                events.sanity_loss += GHOST_DRAIN_PER_SECOND * dt;
                if ghost.watch_cooldown <= 0.0 && (time * 2.0 + x * 0.1).sin() > 0.99 {
                    events.shakes.push(3.0);
                    events.thoughts.push(WATCHED);
                    ghost.watch_cooldown = 2.0;
                }
            }

            if let Some(render) = renderables.get_mut(entity) {
                let fade = (ghost.lifetime / ghost.max_lifetime).max(0.0) * 0.7;
                render.opacity = if ghost.visible { fade } else { 0.0 };
            }
            if ghost.lifetime <= 0.0 {
                let _ = expired.insert(entity, Expired);
            }
        }
    }
}

#[derive(Default)]
pub struct CreatureSystem;

impl<'a> System<'a> for CreatureSystem {
    type SystemData = (
        WriteStorage<'a, Creature>,
        WriteStorage<'a, Position>,
        ReadExpect<'a, FrameContext>,
        WriteExpect<'a, FrameEvents>,
    );

    fn run(&mut self, (mut creatures, mut positions, frame, mut events): Self::SystemData) {
        let dt = frame.dt;
        for (creature, pos) in (&mut creatures, &mut positions).join() {
            creature.timer += dt;
            creature.call_cooldown -= dt;

            let offset = creature.goal - pos.point;
            let distance = offset.length();
            if distance > 20.0 {
                pos.point = pos.point + offset * (creature.speed * dt / distance);
                creature.heading = offset.y.atan2(offset.x);
            } else {
                let angle = (pos.point.x * 0.01 + creature.timer * 0.1) * PI * 2.0;
                let radius = ((pos.point.y * 0.1 + creature.timer * 0.05).sin() + 1.0)
                    * 0.5
                    * creature.wander_radius;
                creature.goal = creature.home + Vec2::from_angle(angle) * radius;
            }

            match creature.kind {
                CreatureKind::Seagull => {
                    pos.point.y += (creature.timer * 4.0).sin() * 10.0 * dt;
                }
                CreatureKind::Cat => {
                    if (creature.timer * 0.5 + pos.point.x * 0.1).sin() > 0.7 {
                        creature.speed = if (pos.point.y * 0.1).cos() > 0.0 { 0.0 } else { 60.0 };
                    }
                }
                CreatureKind::Rat => {
                    creature.speed = 80.0 + (creature.timer * 6.0).sin() * 20.0;
                }
            }

            if creature.call_cooldown <= 0.0
                && (pos.point.x * 0.01 + creature.timer * 0.5).sin() > 0.95
            {
                events.tones.push(creature_call(creature.kind));
                creature.call_cooldown = 3.0 + ((pos.point.x * 0.1).cos() + 1.0) * 3.5;
            }
        }
    }
}

fn creature_call(kind: CreatureKind) -> ToneRequest {
    match kind {
        CreatureKind::Seagull => ToneRequest::sine(800.0, 0.05, 0.3),
        CreatureKind::Cat => ToneRequest::sine(600.0, 0.04, 0.2),
        CreatureKind::Rat => ToneRequest::sine(1200.0, 0.03, 0.1),
    }
}

#[derive(Default)]
pub struct DriftSystem;

impl<'a> System<'a> for DriftSystem {
    type SystemData = (
        WriteStorage<'a, Drifter>,
        WriteStorage<'a, Position>,
        ReadExpect<'a, FrameContext>,
    );

    fn run(&mut self, (mut drifters, mut positions, frame): Self::SystemData) {
        let dt = frame.dt;
        for (drifter, pos) in (&mut drifters, &mut positions).join() {
            pos.point = pos.point + drifter.velocity * dt;

            if drifter.band.is_some() {
                drifter.turn_timer += dt;
                if drifter.turn_timer > 2.0 + (pos.point.x * 0.01).sin() * 2.0 {
                    let turn = ((pos.point.x * 0.1 + pos.point.y * 0.1).sin() - 0.5) * 0.5;
                    let speed = drifter.velocity.length();
                    let heading = drifter.velocity.y.atan2(drifter.velocity.x) + turn;
                    drifter.velocity = Vec2::from_angle(heading) * speed;
                    drifter.turn_timer = 0.0;
                }
            }

            let p = &mut pos.point;
            if p.x < -WRAP_MARGIN {
                p.x = MAP_WIDTH + WRAP_MARGIN;
            } else if p.x > MAP_WIDTH + WRAP_MARGIN {
                p.x = -WRAP_MARGIN;
            }
            let (top, bottom) = drifter
                .band
                .unwrap_or((-WRAP_MARGIN, MAP_HEIGHT + WRAP_MARGIN));
            if p.y < top {
                p.y = bottom;
            } else if p.y > bottom {
                p.y = top;
            }
        }
    }
}

#[derive(Default)]
pub struct ShadeSystem;

impl<'a> System<'a> for ShadeSystem {
    type SystemData = (
        Entities<'a>,
        WriteStorage<'a, Shade>,
        WriteStorage<'a, Position>,
        WriteStorage<'a, Renderable>,
        WriteStorage<'a, Expired>,
        ReadExpect<'a, FrameContext>,
        WriteExpect<'a, FrameEvents>,
    );

    fn run(
        &mut self,
        (entities, mut shades, mut positions, mut renderables, mut expired, frame, mut events): Self::SystemData,
    ) {
        let dt = frame.dt;
        for (entity, shade, pos) in (&entities, &mut shades, &mut positions).join() {
            shade.lifetime -= dt;
            let mut gone = shade.lifetime <= 0.0;
            match shade.kind {
                ShadeKind::Figure => {
                    if let Some(render) = renderables.get_mut(entity) {
                        render.opacity -= dt * 0.2;
                        gone |= render.opacity <= 0.0;
                    }
                }
                ShadeKind::Moving => {
                    let offset = shade.target - pos.point;
                    let distance = offset.length();
                    if distance > 5.0 {
                        pos.point = pos.point + offset * (shade.speed * dt / distance);
                    }
                    if pos.point.distance(frame.player) < SHADOW_TOUCH_RADIUS
                        && frame.sanity < SHADOW_TOUCH_SANITY
                    {
                        events.shadow_touch = true;
                    }
                }
            }
            if gone {
                let _ = expired.insert(entity, Expired);
            }
        }
    }
}

/// Deletes expired entities and holds the capped population (fog, gulls,
/// shadow figures) at its limit, oldest first. Static props are never removed.
#[derive(Default)]
pub struct CleanupSystem;

impl<'a> System<'a> for CleanupSystem {
    type SystemData = (
        Entities<'a>,
        ReadStorage<'a, Expired>,
        ReadStorage<'a, StaticProp>,
        ReadStorage<'a, Dynamic>,
    );

    fn run(&mut self, (entities, expired, props, dynamics): Self::SystemData) {
        for (entity, _, _) in (&entities, &expired, !&props).join() {
            let _ = entities.delete(entity);
        }

        let mut living: Vec<(u64, Entity)> = (&entities, &dynamics, !&expired, !&props)
            .join()
            .filter(|(_, dynamic, _, _)| dynamic.capped)
            .map(|(entity, dynamic, _, _)| (dynamic.spawn_order, entity))
            .collect();
        if living.len() > MAX_DYNAMIC_ENTITIES {
            living.sort_by_key(|(order, _)| *order);
            let excess = living.len() - MAX_DYNAMIC_ENTITIES;
            for (_, entity) in living.into_iter().take(excess) {
                let _ = entities.delete(entity);
            }
        }
    }
}
