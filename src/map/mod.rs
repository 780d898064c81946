//! Harbor geometry: props, collision volumes, named zones.

use std::ops::{Add, Mul, Sub};

use serde::Serialize;

use crate::data::props::{STATIC_PROPS, ZONES};

pub const MAP_WIDTH: f32 = 2048.0;
pub const MAP_HEIGHT: f32 = 1536.0;
pub const WATER_LINE: f32 = 780.0;
/// Below this line the shore is too exposed to rest.
pub const UNSAFE_SHORE_Y: f32 = 750.0;
const DOOR_OFFSET: f32 = 35.0;
const DOOR_WIDTH: f32 = 30.0;
const WALL: f32 = 15.0;
const DOCK_BUFFER: f32 = 5.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2::new(0.0, 0.0);

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Vec2) -> f32 {
        (self - other).length()
    }

    pub fn from_angle(radians: f32) -> Self {
        Self::new(radians.cos(), radians.sin())
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle, origin at the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Strict overlap; touching edges do not collide.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Edge-inclusive containment, used for zones.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    pub fn within(&self, width: f32, height: f32) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.right() <= width && self.bottom() <= height
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum PropKind {
    Lighthouse,
    Dock,
    Building,
    Sign,
    Sailboat,
    Tree,
    Lamppost,
    Rock,
}

impl PropKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PropKind::Lighthouse => "lighthouse",
            PropKind::Dock => "dock",
            PropKind::Building => "building",
            PropKind::Sign => "sign",
            PropKind::Sailboat => "sailboat",
            PropKind::Tree => "tree",
            PropKind::Lamppost => "lamppost",
            PropKind::Rock => "rock",
        }
    }

    /// Docks are walked on and lampposts are too thin to stop anyone.
    pub fn is_passable(self) -> bool {
        matches!(self, PropKind::Dock | PropKind::Lamppost)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropDescriptor {
    pub kind: PropKind,
    pub bounds: Bounds,
}

impl PropDescriptor {
    pub const fn new(kind: PropKind, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            kind,
            bounds: Bounds::new(x, y, width, height),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VolumeTag {
    Prop(PropKind),
    LighthouseWall,
    /// Always solid. The door opens through interaction, never by walking.
    LighthouseDoor,
    Water,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollisionVolume {
    pub bounds: Bounds,
    pub tag: VolumeTag,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Zone {
    LighthouseEntrance,
    LighthouseInterior,
    HarborDocks,
    TownSquare,
}

impl Zone {
    pub fn as_str(self) -> &'static str {
        match self {
            Zone::LighthouseEntrance => "Lighthouse Entrance",
            Zone::LighthouseInterior => "Lighthouse Interior",
            Zone::HarborDocks => "Harbor Docks",
            Zone::TownSquare => "Town Square",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneArea {
    pub zone: Zone,
    pub bounds: Bounds,
}

impl ZoneArea {
    pub const fn new(zone: Zone, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            zone,
            bounds: Bounds::new(x, y, width, height),
        }
    }
}

/// What the player controller needs from the terrain.
pub trait Collider {
    fn collides(&self, bounds: &Bounds) -> bool;
    fn zone_at(&self, point: Vec2) -> Option<Zone>;
}

#[derive(Clone, Debug)]
pub struct HarborMap {
    pub width: f32,
    pub height: f32,
    pub props: Vec<PropDescriptor>,
    pub volumes: Vec<CollisionVolume>,
    pub zones: Vec<ZoneArea>,
}

impl HarborMap {
    pub fn pale_harbor() -> Self {
        Self::from_props(MAP_WIDTH, MAP_HEIGHT, STATIC_PROPS, ZONES)
    }

    pub fn from_props(
        width: f32,
        height: f32,
        props: &[PropDescriptor],
        zones: &[ZoneArea],
    ) -> Self {
        let mut volumes = Vec::new();
        for prop in props {
            match prop.kind {
                PropKind::Lighthouse => volumes.extend(lighthouse_volumes(prop.bounds)),
                PropKind::Dock => volumes.extend(water_volumes(prop.bounds, width, height)),
                kind if kind.is_passable() => {}
                kind => volumes.push(CollisionVolume {
                    bounds: prop.bounds,
                    tag: VolumeTag::Prop(kind),
                }),
            }
        }
        Self {
            width,
            height,
            props: props.to_vec(),
            volumes,
            zones: zones.to_vec(),
        }
    }

    pub fn blocking_volume(&self, bounds: &Bounds) -> Option<&CollisionVolume> {
        self.volumes.iter().find(|v| v.bounds.intersects(bounds))
    }

    pub fn in_bounds(&self, bounds: &Bounds) -> bool {
        bounds.within(self.width, self.height)
    }

    pub fn lighthouse(&self) -> Option<Bounds> {
        self.props
            .iter()
            .find(|p| p.kind == PropKind::Lighthouse)
            .map(|p| p.bounds)
    }

    /// Open shore near the water where rest is impossible.
    pub fn is_unsafe(&self, point: Vec2) -> bool {
        point.y > UNSAFE_SHORE_Y
    }

    /// The dock approach, where horror effects are held back.
    pub fn is_critical(&self, point: Vec2) -> bool {
        point.x > 350.0 && point.x < 550.0 && point.y > 750.0 && point.y < 1050.0
    }

    pub fn is_water(&self, point: Vec2) -> bool {
        let probe = Bounds::new(point.x, point.y, 0.5, 0.5);
        self.volumes
            .iter()
            .any(|v| v.tag == VolumeTag::Water && v.bounds.intersects(&probe))
    }
}

impl Collider for HarborMap {
    fn collides(&self, bounds: &Bounds) -> bool {
        !self.in_bounds(bounds) || self.blocking_volume(bounds).is_some()
    }

    /// First listed zone wins where areas overlap.
    fn zone_at(&self, point: Vec2) -> Option<Zone> {
        self.zones
            .iter()
            .find(|area| area.bounds.contains(point))
            .map(|area| area.zone)
    }
}

fn lighthouse_volumes(b: Bounds) -> [CollisionVolume; 6] {
    let wall = |bounds| CollisionVolume {
        bounds,
        tag: VolumeTag::LighthouseWall,
    };
    let sill = b.bottom() - WALL;
    let door_right = b.x + DOOR_OFFSET + DOOR_WIDTH;
    [
        wall(Bounds::new(b.x, b.y, WALL, b.height)),
        wall(Bounds::new(b.right() - WALL, b.y, WALL, b.height)),
        wall(Bounds::new(b.x, b.y, b.width, WALL)),
        wall(Bounds::new(b.x, sill, DOOR_OFFSET, WALL)),
        wall(Bounds::new(door_right, sill, b.right() - door_right, WALL)),
        CollisionVolume {
            bounds: Bounds::new(b.x + DOOR_OFFSET, sill, DOOR_WIDTH, WALL),
            tag: VolumeTag::LighthouseDoor,
        },
    ]
}

/// Solid water everywhere below the waterline except the dock corridor,
/// with thin buffers so the dock edges cannot be walked around.
fn water_volumes(dock: Bounds, width: f32, height: f32) -> [CollisionVolume; 5] {
    let water = |bounds| CollisionVolume {
        bounds,
        tag: VolumeTag::Water,
    };
    let depth = height - WATER_LINE;
    [
        water(Bounds::new(0.0, WATER_LINE, dock.x, depth)),
        water(Bounds::new(dock.right(), WATER_LINE, width - dock.right(), depth)),
        water(Bounds::new(dock.x, dock.bottom(), dock.width, height - dock.bottom())),
        water(Bounds::new(dock.x - DOCK_BUFFER, WATER_LINE, DOCK_BUFFER, dock.height)),
        water(Bounds::new(dock.right(), WATER_LINE, DOCK_BUFFER, dock.height)),
    ]
}
