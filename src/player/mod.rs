//! The lighthouse visitor: movement, stamina, fear and zone tracking.

use std::collections::HashSet;

use serde::Serialize;
use tracing::info;

use crate::map::{Bounds, Collider, Vec2, Zone};

pub const PLAYER_WIDTH: f32 = 24.0;
pub const PLAYER_HEIGHT: f32 = 32.0;
pub const BASE_SPEED: f32 = 120.0;
pub const RUN_MULTIPLIER: f32 = 1.8;
pub const STAMINA_DRAIN: f32 = 30.0;
pub const STAMINA_REGEN: f32 = 20.0;
pub const MAX_STAMINA: f32 = 100.0;
pub const FEAR_SANITY: f32 = 50.0;
pub const SPAWN: Vec2 = Vec2::new(550.0, 630.0);

const DIAGONAL: f32 = std::f32::consts::FRAC_1_SQRT_2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub run: bool,
}

impl MoveIntent {
    pub fn is_moving(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Unit-or-zero direction; diagonals are scaled by `1/sqrt(2)`.
    pub fn direction(&self) -> Vec2 {
        let mut dx: f32 = 0.0;
        let mut dy: f32 = 0.0;
        if self.up {
            dy -= 1.0;
        }
        if self.down {
            dy += 1.0;
        }
        if self.left {
            dx -= 1.0;
        }
        if self.right {
            dx += 1.0;
        }
        if dx != 0.0 && dy != 0.0 {
            dx *= DIAGONAL;
            dy *= DIAGONAL;
        }
        Vec2::new(dx, dy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

/// Reported when the player walks into a different named zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoneChange {
    pub zone: Zone,
    pub first_visit: bool,
}

/// Speed multiplier from fear: 1 at or above 50 sanity, falling linearly to
/// one half at zero.
pub fn fear_factor(sanity: f32) -> f32 {
    if sanity < FEAR_SANITY {
        0.5 + (sanity.max(0.0) / 100.0) * 0.5
    } else {
        1.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub position: Vec2,
    pub stamina: f32,
    pub facing: Facing,
    pub moving: bool,
    current_zone: Option<Zone>,
    visited: HashSet<Zone>,
    stride: f32,
}

impl Player {
    /// Starts at `position`; the zone it stands in counts as visited.
    pub fn new<C: Collider>(position: Vec2, collider: &C) -> Self {
        let current_zone = collider.zone_at(position);
        Self {
            position,
            stamina: MAX_STAMINA,
            facing: Facing::Down,
            moving: false,
            current_zone,
            visited: current_zone.into_iter().collect(),
            stride: 0.0,
        }
    }

    pub fn current_zone(&self) -> Option<Zone> {
        self.current_zone
    }

    pub fn has_visited(&self, zone: Zone) -> bool {
        self.visited.contains(&zone)
    }

    /// Walk-cycle frame, 0..4.
    pub fn stride_frame(&self) -> u8 {
        (self.stride.floor() as u32 % 4) as u8
    }

    /// Feet-only box: the lower 40% of the sprite.
    pub fn collision_bounds_at(position: Vec2) -> Bounds {
        Bounds::new(
            position.x - PLAYER_WIDTH / 2.0,
            position.y - PLAYER_HEIGHT / 2.0 + PLAYER_HEIGHT * 0.6,
            PLAYER_WIDTH,
            PLAYER_HEIGHT * 0.4,
        )
    }

    pub fn collision_bounds(&self) -> Bounds {
        Self::collision_bounds_at(self.position)
    }

    pub fn speed(&mut self, intent: &MoveIntent, sanity: f32, dt: f32) -> f32 {
        let mut speed = BASE_SPEED;
        if intent.run && intent.is_moving() && self.stamina > 0.0 {
            speed *= RUN_MULTIPLIER;
            self.stamina = (self.stamina - STAMINA_DRAIN * dt).max(0.0);
        }
        speed * fear_factor(sanity)
    }

    pub fn update<C: Collider>(
        &mut self,
        dt: f32,
        intent: &MoveIntent,
        sanity: f32,
        collider: &C,
    ) -> Option<ZoneChange> {
        self.face(intent);
        let speed = self.speed(intent, sanity, dt);
        let velocity = intent.direction() * (speed * dt);
        self.moving = intent.is_moving();
        self.stride = if self.moving { self.stride + dt * 8.0 } else { 0.0 };

        let try_x = Vec2::new(self.position.x + velocity.x, self.position.y);
        if !collider.collides(&Self::collision_bounds_at(try_x)) {
            self.position = try_x;
        }
        let try_y = Vec2::new(self.position.x, self.position.y + velocity.y);
        if !collider.collides(&Self::collision_bounds_at(try_y)) {
            self.position = try_y;
        }

        self.stamina = (self.stamina + STAMINA_REGEN * dt).min(MAX_STAMINA);
        self.track_zone(collider)
    }

    /// Moves without collision checks, as doors do.
    pub fn teleport<C: Collider>(&mut self, to: Vec2, collider: &C) -> Option<ZoneChange> {
        self.position = to;
        self.track_zone(collider)
    }

    fn face(&mut self, intent: &MoveIntent) {
        if intent.up {
            self.facing = Facing::Up;
        }
        if intent.down {
            self.facing = Facing::Down;
        }
        if intent.left {
            self.facing = Facing::Left;
        }
        if intent.right {
            self.facing = Facing::Right;
        }
    }

    fn track_zone<C: Collider>(&mut self, collider: &C) -> Option<ZoneChange> {
        let zone = collider.zone_at(self.position)?;
        if self.current_zone == Some(zone) {
            return None;
        }
        self.current_zone = Some(zone);
        let first_visit = self.visited.insert(zone);
        info!(zone = zone.as_str(), first_visit, "zone entered");
        Some(ZoneChange { zone, first_visit })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::HarborMap;

    struct Walls {
        blocks: Vec<Bounds>,
    }

    impl Collider for Walls {
        fn collides(&self, bounds: &Bounds) -> bool {
            self.blocks.iter().any(|b| b.intersects(bounds))
        }

        fn zone_at(&self, point: Vec2) -> Option<Zone> {
            if point.x > 500.0 {
                Some(Zone::TownSquare)
            } else {
                Some(Zone::HarborDocks)
            }
        }
    }

    fn open() -> Walls {
        Walls { blocks: Vec::new() }
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let intent = MoveIntent {
            up: true,
            right: true,
            ..MoveIntent::default()
        };
        let d = intent.direction();
        assert!((d.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_fear_slows_toward_half() {
        assert_eq!(fear_factor(80.0), 1.0);
        assert_eq!(fear_factor(50.0), 1.0);
        assert_eq!(fear_factor(0.0), 0.5);
        assert!((fear_factor(40.0) - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_running_spends_and_regains_stamina() {
        let walls = open();
        let mut player = Player::new(Vec2::new(100.0, 100.0), &walls);
        let run = MoveIntent {
            right: true,
            run: true,
            ..MoveIntent::default()
        };
        player.update(1.0, &run, 100.0, &walls);
        assert!((player.position.x - (100.0 + 216.0)).abs() < 1e-3);
        assert_eq!(player.stamina, 90.0);
        player.update(1.0, &MoveIntent::default(), 100.0, &walls);
        assert_eq!(player.stamina, 100.0);
    }

    #[test]
    fn test_blocked_axis_still_slides() {
        let walls = Walls {
            blocks: vec![Bounds::new(110.0, 0.0, 50.0, 400.0)],
        };
        let mut player = Player::new(Vec2::new(90.0, 100.0), &walls);
        let diagonal = MoveIntent {
            right: true,
            down: true,
            ..MoveIntent::default()
        };
        player.update(0.5, &diagonal, 100.0, &walls);
        assert_eq!(player.position.x, 90.0);
        assert!(player.position.y > 100.0);
    }

    #[test]
    fn test_zone_first_visit_fires_once() {
        let walls = open();
        let mut player = Player::new(Vec2::new(400.0, 100.0), &walls);
        assert!(player.has_visited(Zone::HarborDocks));
        let change = player.teleport(Vec2::new(600.0, 100.0), &walls);
        assert_eq!(
            change,
            Some(ZoneChange {
                zone: Zone::TownSquare,
                first_visit: true
            })
        );
        player.teleport(Vec2::new(400.0, 100.0), &walls);
        let back = player.teleport(Vec2::new(600.0, 100.0), &walls);
        assert_eq!(
            back,
            Some(ZoneChange {
                zone: Zone::TownSquare,
                first_visit: false
            })
        );
        assert_eq!(player.teleport(Vec2::new(650.0, 100.0), &walls), None);
    }

    #[test]
    fn test_lighthouse_door_always_blocks() {
        let map = HarborMap::pale_harbor();
        let lighthouse = map.lighthouse().unwrap();
        let below_door = Vec2::new(lighthouse.x + 50.0, lighthouse.bottom() + 10.0);
        let mut player = Player::new(below_door, &map);
        let up = MoveIntent {
            up: true,
            ..MoveIntent::default()
        };
        for _ in 0..120 {
            player.update(1.0 / 60.0, &up, 100.0, &map);
        }
        assert!(player.collision_bounds().y >= lighthouse.bottom() - 1.0);
    }

    #[test]
    fn test_spawn_point_is_clear() {
        let map = HarborMap::pale_harbor();
        assert!(!map.collides(&Player::collision_bounds_at(SPAWN)));
    }
}
