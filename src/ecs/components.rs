#![allow(dead_code)]

use bracket_terminal::prelude::RGB;
use specs::prelude::{Component, NullStorage, VecStorage};

use crate::map::{PropKind, Vec2};

#[derive(Clone, Debug)]
pub struct Position {
    pub point: Vec2,
}

impl Component for Position {
    type Storage = VecStorage<Self>;
}

/// Axis-aligned footprint centered on the position.
#[derive(Clone, Debug)]
pub struct Body {
    pub extent: Vec2,
    pub active: bool,
}

impl Component for Body {
    type Storage = VecStorage<Self>;
}

#[derive(Clone, Debug)]
pub struct Renderable {
    pub glyph: u16,
    pub color: RGB,
    pub order: i32,
    pub opacity: f32,
}

impl Component for Renderable {
    type Storage = VecStorage<Self>;
}

#[derive(Clone, Debug)]
pub struct StaticProp {
    pub kind: PropKind,
}

impl Component for StaticProp {
    type Storage = VecStorage<Self>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Haunt {
    Wandering,
    Following,
}

#[derive(Clone, Debug)]
pub struct Ghost {
    pub haunt: Haunt,
    pub heading: f32,
    pub speed: f32,
    pub lifetime: f32,
    pub max_lifetime: f32,
    pub awareness: f32,
    pub flicker: f32,
    pub visible: bool,
    pub watch_cooldown: f32,
}

impl Component for Ghost {
    type Storage = VecStorage<Self>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CreatureKind {
    Seagull,
    Cat,
    Rat,
}

#[derive(Clone, Debug)]
pub struct Creature {
    pub kind: CreatureKind,
    pub heading: f32,
    pub speed: f32,
    pub timer: f32,
    pub home: Vec2,
    pub goal: Vec2,
    pub wander_radius: f32,
    pub call_cooldown: f32,
}

impl Component for Creature {
    type Storage = VecStorage<Self>;
}

/// Fog banks and far-off gulls: straight-line drift that wraps at the edges.
#[derive(Clone, Debug)]
pub struct Drifter {
    pub velocity: Vec2,
    pub size: f32,
    pub turn_timer: f32,
    pub band: Option<(f32, f32)>,
}

impl Component for Drifter {
    type Storage = VecStorage<Self>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShadeKind {
    /// Stands still and fades.
    Figure,
    /// Crosses the player's path.
    Moving,
}

#[derive(Clone, Debug)]
pub struct Shade {
    pub kind: ShadeKind,
    pub lifetime: f32,
    pub target: Vec2,
    pub speed: f32,
}

impl Component for Shade {
    type Storage = VecStorage<Self>;
}

/// A spawned, non-static entity; lower orders are older. Only `capped`
/// entities (fog, gulls, shadow figures) count against the population cap.
#[derive(Clone, Debug)]
pub struct Dynamic {
    pub spawn_order: u64,
    pub capped: bool,
}

impl Component for Dynamic {
    type Storage = VecStorage<Self>;
}

#[derive(Clone, Debug, Default)]
pub struct Expired;

impl Component for Expired {
    type Storage = NullStorage<Self>;
}
