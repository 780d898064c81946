//! Proximity-gated world objects and their per-kind state machines.
//!
//! `interact` never touches the game directly. It reports an [`Outcome`]:
//! dialogue lines plus an ordered list of [`Effect`]s for the caller to apply.

use smallvec::SmallVec;
use tracing::debug;

use crate::{
    data::{
        interactables::{
            COT_AT_NIGHT, COT_REST, DOOR_ENTER, DOOR_EXIT, DOOR_EXIT_WITH_LENS, DOOR_LOCKED,
            EXTERIOR, EXTERIOR_EXIT, INTERIOR, INTERIOR_ENTRY, LAMP_ROOM_BOUNDS, LENS_EFFECTS,
            LENS_EMPTY, LENS_NOT_UNDERSTOOD, LENS_OUT_OF_REACH, LENS_TAKEN, LENS_UNREADY_EFFECTS,
            LIGHTHOUSE_ENTRY_COST, MYSTERIOUS_PANIC, STATUE_AT_NIGHT, STATUE_AT_PEACE,
            STATUE_PRAYER, CHAPTER_END_DELAY,
        },
        narrative::Lines,
    },
    effects::Tint,
    game::{deferred::DeferredAction, inventory::Inventory},
    map::{Bounds, Vec2},
};

pub const DEFAULT_INTERACTION_RADIUS: f32 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    Grant(&'static str),
    /// Signed sanity change; losses also shake the camera.
    Sanity(f32),
    Teleport(Vec2),
    AdvanceClock(f64),
    EnterLighthouse,
    ExitLighthouse,
    Flash {
        tint: Tint,
        intensity: f32,
        duration: f64,
    },
    Shake(f32),
    Defer {
        delay: f64,
        action: DeferredAction,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutcomeStatus {
    Performed,
    /// A precondition (item, place, hour) was not met.
    Rejected,
    AlreadyDone,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub status: OutcomeStatus,
    pub lines: Lines,
    pub effects: SmallVec<[Effect; 4]>,
}

impl Outcome {
    fn new(status: OutcomeStatus, lines: Lines, effects: &[Effect]) -> Self {
        Self {
            status,
            lines,
            effects: SmallVec::from_slice(effects),
        }
    }

    fn performed(lines: Lines, effects: &[Effect]) -> Self {
        Self::new(OutcomeStatus::Performed, lines, effects)
    }

    fn already_done(lines: Lines) -> Self {
        Self::new(OutcomeStatus::AlreadyDone, lines, &[])
    }

    fn rejected(lines: Lines, effects: &[Effect]) -> Self {
        Self::new(OutcomeStatus::Rejected, lines, effects)
    }
}

/// One read-only look at the game, taken when the player presses interact.
#[derive(Clone, Copy, Debug)]
pub struct InteractionView<'a> {
    pub sanity: f32,
    pub hours: f64,
    pub actor: Vec2,
    pub inside_lighthouse: bool,
    pub inventory: &'a Inventory,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Branch {
    pub requires: &'static [&'static str],
    pub lacks: &'static [&'static str],
    pub lines: Lines,
    pub effects: &'static [Effect],
    pub status: OutcomeStatus,
}

impl Branch {
    pub const fn new(
        requires: &'static [&'static str],
        lines: Lines,
        effects: &'static [Effect],
        status: OutcomeStatus,
    ) -> Self {
        Self {
            requires,
            lacks: &[],
            lines,
            effects,
            status,
        }
    }

    pub const fn lacking(self, lacks: &'static [&'static str]) -> Self {
        Self { lacks, ..self }
    }

    fn admits(&self, inventory: &Inventory) -> bool {
        self.requires.iter().all(|item| inventory.contains(item))
            && !self.lacks.iter().any(|item| inventory.contains(item))
    }

    fn outcome(&self) -> Outcome {
        Outcome::new(self.status, self.lines, self.effects)
    }
}

/// Item-gated branches, first admitted branch wins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gate {
    pub branches: &'static [Branch],
    pub fallback: Branch,
}

/// Read or picked up once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pickup {
    pub lines: Lines,
    pub effects: &'static [Effect],
    pub after: Lines,
}

/// Message variants that darken as sanity falls.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tiered {
    pub variants: &'static [Lines],
    pub step: f32,
    pub base_loss: f32,
    pub per_level: f32,
    /// The calmest variant costs nothing.
    pub spare_calm: bool,
}

impl Tiered {
    /// `floor((100 - sanity) / step)`, clamped to the variant list.
    pub fn level(&self, sanity: f32) -> usize {
        let last = self.variants.len().saturating_sub(1);
        let raw = ((100.0 - sanity) / self.step).floor();
        if raw.is_finite() && raw > 0.0 {
            (raw as usize).min(last)
        } else {
            0
        }
    }

    pub fn loss(&self, level: usize) -> f32 {
        if self.spare_calm && level == 0 {
            0.0
        } else {
            self.base_loss + self.per_level * level as f32
        }
    }

    fn lines(&self, level: usize) -> Lines {
        self.variants.get(level).copied().unwrap_or(&[])
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Aftermath {
    Flavor(Lines),
    /// A bed: daytime rest heals and passes half an hour.
    Rest,
}

/// Searched once for a reward, then only flavor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Search {
    pub lines: Lines,
    /// Below this sanity the alternative lines are shown.
    pub shaken: Option<(f32, Lines)>,
    pub effects: &'static [Effect],
    pub after: Aftermath,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InteractableKind {
    Note(Pickup),
    Key(Pickup),
    Door(Gate),
    Well(Gate),
    Stairs(Gate),
    Fixture(Gate),
    LighthouseDoor,
    Sign(Tiered),
    MysteriousObject(Tiered),
    Statue(Tiered),
    Furniture(Search),
    /// Like furniture, but gone from reach once searched.
    Salvage(Search),
    Lens,
}

impl InteractableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractableKind::Note(_) => "note",
            InteractableKind::Key(_) => "key",
            InteractableKind::Door(_) => "door",
            InteractableKind::Well(_) => "well",
            InteractableKind::Stairs(_) => "stairs",
            InteractableKind::Fixture(_) => "fixture",
            InteractableKind::LighthouseDoor => "lighthouse_door",
            InteractableKind::Sign(_) => "sign",
            InteractableKind::MysteriousObject(_) => "mysterious_object",
            InteractableKind::Statue(_) => "statue",
            InteractableKind::Furniture(_) => "furniture",
            InteractableKind::Salvage(_) => "salvage",
            InteractableKind::Lens => "lens",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Interactable {
    pub name: &'static str,
    pub bounds: Bounds,
    pub kind: InteractableKind,
    pub interaction_radius: f32,
    pub active: bool,
    pub interacted: bool,
    pub searched: bool,
    pub interior: bool,
}

impl Interactable {
    pub const fn new(name: &'static str, bounds: Bounds, kind: InteractableKind) -> Self {
        Self {
            name,
            bounds,
            kind,
            interaction_radius: DEFAULT_INTERACTION_RADIUS,
            active: true,
            interacted: false,
            searched: false,
            interior: false,
        }
    }

    pub const fn with_radius(self, interaction_radius: f32) -> Self {
        Self {
            interaction_radius,
            ..self
        }
    }

    pub const fn interior(self) -> Self {
        Self {
            interior: true,
            ..self
        }
    }

    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    /// Pickups, salvage and the lens are used up by their first success.
    pub fn is_repeatable(&self) -> bool {
        !matches!(
            self.kind,
            InteractableKind::Note(_)
                | InteractableKind::Key(_)
                | InteractableKind::Salvage(_)
                | InteractableKind::Lens
        )
    }

    pub fn is_consumed(&self) -> bool {
        match self.kind {
            InteractableKind::Salvage(_) => self.searched,
            _ => !self.is_repeatable() && self.interacted,
        }
    }

    /// Collected keys and stripped salvage leave the world. Spent notes and
    /// furniture stay reachable and answer with their "already done" lines.
    pub fn is_gone(&self) -> bool {
        !self.active || (matches!(self.kind, InteractableKind::Salvage(_)) && self.searched)
    }

    pub fn can_interact(&self, actor: Vec2) -> bool {
        !self.is_gone() && actor.distance(self.center()) <= self.interaction_radius
    }

    pub fn interact(&mut self, view: &InteractionView<'_>) -> Outcome {
        let outcome = self.resolve(view);
        debug!(
            object = self.name,
            kind = self.kind.as_str(),
            status = ?outcome.status,
            "interaction resolved"
        );
        outcome
    }

    fn resolve(&mut self, view: &InteractionView<'_>) -> Outcome {
        if self.is_consumed() {
            return Outcome::already_done(self.spent_lines());
        }
        match self.kind {
            InteractableKind::Note(pickup) => {
                self.interacted = true;
                Outcome::performed(pickup.lines, pickup.effects)
            }
            InteractableKind::Key(pickup) => {
                self.interacted = true;
                self.active = false;
                Outcome::performed(pickup.lines, pickup.effects)
            }
            InteractableKind::Door(gate)
            | InteractableKind::Well(gate)
            | InteractableKind::Stairs(gate)
            | InteractableKind::Fixture(gate) => {
                let branch = gate
                    .branches
                    .iter()
                    .find(|b| b.admits(view.inventory))
                    .unwrap_or(&gate.fallback);
                if branch.status == OutcomeStatus::Performed {
                    self.interacted = true;
                }
                branch.outcome()
            }
            InteractableKind::LighthouseDoor => lighthouse_door(view),
            InteractableKind::Sign(tiers) => {
                let level = tiers.level(view.sanity);
                let mut outcome = Outcome::performed(tiers.lines(level), &[]);
                let loss = tiers.loss(level);
                if loss > 0.0 {
                    outcome.effects.push(Effect::Sanity(-loss));
                }
                self.interacted = true;
                outcome
            }
            InteractableKind::MysteriousObject(tiers) => {
                let level = tiers.level(view.sanity);
                let loss = tiers.loss(level);
                let mut outcome = Outcome::performed(tiers.lines(level), &[Effect::Sanity(-loss)]);
                if view.sanity - loss < 30.0 {
                    outcome.effects.extend_from_slice(&MYSTERIOUS_PANIC);
                }
                self.interacted = true;
                outcome
            }
            InteractableKind::Statue(tiers) => {
                if !self.interacted {
                    self.interacted = true;
                    let level = tiers.level(view.sanity);
                    return Outcome::performed(
                        tiers.lines(level),
                        &[Effect::Sanity(-tiers.loss(level))],
                    );
                }
                let daylight = (6.0..=18.0).contains(&view.hours);
                if daylight && view.sanity < 80.0 {
                    Outcome::performed(
                        STATUE_PRAYER,
                        &[Effect::Sanity(12.0), Effect::AdvanceClock(0.25)],
                    )
                } else if !daylight {
                    Outcome::performed(STATUE_AT_NIGHT, &[Effect::Sanity(-3.0)])
                } else {
                    Outcome::already_done(STATUE_AT_PEACE)
                }
            }
            InteractableKind::Furniture(search) | InteractableKind::Salvage(search) => {
                if !self.searched {
                    self.searched = true;
                    self.interacted = true;
                    let lines = match search.shaken {
                        Some((threshold, shaken)) if view.sanity < threshold => shaken,
                        _ => search.lines,
                    };
                    return Outcome::performed(lines, search.effects);
                }
                match search.after {
                    Aftermath::Flavor(lines) => Outcome::already_done(lines),
                    Aftermath::Rest if (6.0..=18.0).contains(&view.hours) => Outcome::performed(
                        COT_REST,
                        &[Effect::Sanity(8.0), Effect::AdvanceClock(0.5)],
                    ),
                    Aftermath::Rest => Outcome::performed(COT_AT_NIGHT, &[Effect::Sanity(-2.0)]),
                }
            }
            InteractableKind::Lens => {
                let room = LAMP_ROOM_BOUNDS;
                let at_top = view.actor.x > room.x
                    && view.actor.x < room.right()
                    && view.actor.y > room.y
                    && view.actor.y < room.bottom();
                if !at_top {
                    return Outcome::rejected(LENS_OUT_OF_REACH, &[]);
                }
                if view.inventory.contains("Final Entry") && view.inventory.contains("Cursed Tome")
                {
                    self.interacted = true;
                    Outcome::performed(LENS_TAKEN, LENS_EFFECTS)
                } else {
                    Outcome::rejected(LENS_NOT_UNDERSTOOD, LENS_UNREADY_EFFECTS)
                }
            }
        }
    }

    fn spent_lines(&self) -> Lines {
        match self.kind {
            InteractableKind::Note(pickup) | InteractableKind::Key(pickup) => pickup.after,
            InteractableKind::Furniture(search) | InteractableKind::Salvage(search) => {
                match search.after {
                    Aftermath::Flavor(lines) => lines,
                    Aftermath::Rest => COT_AT_NIGHT,
                }
            }
            InteractableKind::Lens => LENS_EMPTY,
            _ => &[],
        }
    }
}

fn lighthouse_door(view: &InteractionView<'_>) -> Outcome {
    if view.inside_lighthouse {
        if view.inventory.contains("Lighthouse Lens") {
            return Outcome::performed(
                DOOR_EXIT_WITH_LENS,
                &[
                    Effect::Sanity(10.0),
                    Effect::Teleport(EXTERIOR_EXIT),
                    Effect::ExitLighthouse,
                    Effect::Defer {
                        delay: CHAPTER_END_DELAY,
                        action: DeferredAction::ChapterEnd,
                    },
                ],
            );
        }
        return Outcome::performed(
            DOOR_EXIT,
            &[Effect::Teleport(EXTERIOR_EXIT), Effect::ExitLighthouse],
        );
    }
    if view.inventory.contains("Lighthouse Key") {
        Outcome::performed(
            DOOR_ENTER,
            &[
                Effect::Teleport(INTERIOR_ENTRY),
                Effect::Sanity(-LIGHTHOUSE_ENTRY_COST),
                Effect::EnterLighthouse,
            ],
        )
    } else {
        Outcome::rejected(DOOR_LOCKED, &[])
    }
}

/// The harbor's interactables. Interior objects live here only while the
/// player is inside; their state is kept across visits.
#[derive(Clone, Debug, Default)]
pub struct Interactables {
    entries: Vec<Interactable>,
    stowed: Vec<Interactable>,
    interior_built: bool,
}

impl Interactables {
    pub fn pale_harbor() -> Self {
        Self::new(EXTERIOR.to_vec())
    }

    pub fn new(entries: Vec<Interactable>) -> Self {
        Self {
            entries,
            stowed: Vec::new(),
            interior_built: false,
        }
    }

    pub fn interior_loaded(&self) -> bool {
        self.entries.iter().any(|entry| entry.interior)
    }

    pub fn load_interior(&mut self) {
        if self.interior_loaded() {
            return;
        }
        if self.interior_built {
            self.entries.append(&mut self.stowed);
        } else {
            self.entries.extend(INTERIOR.iter().cloned());
            self.interior_built = true;
        }
    }

    pub fn stow_interior(&mut self) {
        let (interior, exterior): (Vec<_>, Vec<_>) =
            self.entries.drain(..).partition(|entry| entry.interior);
        self.entries = exterior;
        self.stowed.extend(interior);
    }

    /// Indices of everything within reach of `point`, nearest first.
    pub fn near(&self, point: Vec2) -> Vec<usize> {
        let mut found: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.can_interact(point))
            .map(|(idx, entry)| (idx, point.distance(entry.center())))
            .collect();
        found.sort_by(|a, b| a.1.total_cmp(&b.1));
        found.into_iter().map(|(idx, _)| idx).collect()
    }

    pub fn nearest(&self, point: Vec2) -> Option<usize> {
        self.near(point).first().copied()
    }

    pub fn get(&self, idx: usize) -> Option<&Interactable> {
        self.entries.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Interactable> {
        self.entries.get_mut(idx)
    }

    pub fn find(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interactable> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view<'a>(inventory: &'a Inventory, sanity: f32, actor: Vec2) -> InteractionView<'a> {
        InteractionView {
            sanity,
            hours: 12.0,
            actor,
            inside_lighthouse: false,
            inventory,
        }
    }

    fn exterior(name: &str) -> Interactable {
        EXTERIOR
            .iter()
            .find(|entry| entry.name == name)
            .cloned()
            .unwrap()
    }

    fn interior(name: &str) -> Interactable {
        INTERIOR
            .iter()
            .find(|entry| entry.name == name)
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_key_pickup_is_one_shot() {
        let inventory = Inventory::default();
        let mut key = exterior("Lighthouse Key");
        let first = key.interact(&view(&inventory, 80.0, key.center()));
        assert_eq!(first.status, OutcomeStatus::Performed);
        assert!(first.effects.contains(&Effect::Grant("Lighthouse Key")));

        let second = key.interact(&view(&inventory, 80.0, key.center()));
        assert_eq!(second.status, OutcomeStatus::AlreadyDone);
        assert_eq!(second.lines, &["The key is no longer here."]);
        assert!(second.effects.is_empty());
        assert!(!key.can_interact(key.center()));
    }

    #[test]
    fn test_tiers_escalate_with_lost_sanity() {
        let sign = match exterior("Welcome Sign").kind {
            InteractableKind::Sign(tiers) => tiers,
            other => panic!("unexpected kind {other:?}"),
        };
        assert_eq!(sign.level(100.0), 0);
        assert_eq!(sign.level(60.0), 1);
        assert_eq!(sign.level(0.0), 2);
        assert_eq!(sign.loss(0), 0.0);
        assert_eq!(sign.loss(2), 7.0);
        let mut previous = 0;
        for s in (0..=100).rev() {
            let level = sign.level(s as f32);
            assert!(level >= previous);
            previous = level;
        }
    }

    #[test]
    fn test_statue_examines_then_prays() {
        let inventory = Inventory::default();
        let mut statue = exterior("Weathered Statue");
        let examine = statue.interact(&view(&inventory, 50.0, statue.center()));
        assert_eq!(examine.effects.as_slice(), &[Effect::Sanity(-8.0)]);

        let prayer = statue.interact(&view(&inventory, 50.0, statue.center()));
        assert_eq!(prayer.lines, STATUE_PRAYER);
        assert!(prayer.effects.contains(&Effect::AdvanceClock(0.25)));

        let mut night = view(&inventory, 50.0, statue.center());
        night.hours = 23.0;
        let dread = statue.interact(&night);
        assert_eq!(dread.effects.as_slice(), &[Effect::Sanity(-3.0)]);
    }

    #[test]
    fn test_lighthouse_door_requires_key() {
        let mut inventory = Inventory::default();
        let mut door = exterior("Lighthouse Door");
        let locked = door.interact(&view(&inventory, 80.0, door.center()));
        assert_eq!(locked.status, OutcomeStatus::Rejected);
        assert_eq!(locked.lines, DOOR_LOCKED);
        assert!(locked.effects.is_empty());

        inventory.add("Lighthouse Key");
        let open = door.interact(&view(&inventory, 80.0, door.center()));
        assert_eq!(open.lines, DOOR_ENTER);
        assert!(open.effects.contains(&Effect::EnterLighthouse));
        assert!(open.effects.contains(&Effect::Sanity(-LIGHTHOUSE_ENTRY_COST)));
    }

    #[test]
    fn test_lens_needs_the_lamp_room_and_knowledge() {
        let mut inventory = Inventory::default();
        let mut lens = interior("Lighthouse Lens");
        let below = lens.interact(&view(&inventory, 60.0, Vec2::new(550.0, 550.0)));
        assert_eq!(below.lines, LENS_OUT_OF_REACH);
        assert!(below.effects.is_empty());

        let unready = lens.interact(&view(&inventory, 60.0, Vec2::new(550.0, 370.0)));
        assert_eq!(unready.status, OutcomeStatus::Rejected);

        inventory.add("Final Entry");
        inventory.add("Cursed Tome");
        let taken = lens.interact(&view(&inventory, 60.0, Vec2::new(550.0, 370.0)));
        assert_eq!(taken.status, OutcomeStatus::Performed);
        assert!(lens.is_consumed());
        let again = lens.interact(&view(&inventory, 60.0, Vec2::new(550.0, 370.0)));
        assert_eq!(again.lines, LENS_EMPTY);
    }

    #[test]
    fn test_bookshop_grants_tome_once() {
        let mut inventory = Inventory::default();
        inventory.add("Keeper's Journal");
        let mut shop = exterior("Old Bookshop");
        let first = shop.interact(&view(&inventory, 80.0, shop.center()));
        assert!(first.effects.contains(&Effect::Grant("Cursed Tome")));
        inventory.add("Cursed Tome");
        let second = shop.interact(&view(&inventory, 80.0, shop.center()));
        assert_eq!(second.status, OutcomeStatus::AlreadyDone);
        assert!(second.effects.is_empty());
    }

    #[test]
    fn test_sailboat_leaves_reach_once_searched() {
        let inventory = Inventory::default();
        let mut boat = exterior("Abandoned Sailboat");
        let from_dock = Vec2::new(402.0, 964.0);
        assert!(boat.can_interact(from_dock));
        let shaken = boat.interact(&view(&inventory, 40.0, from_dock));
        assert!(shaken.lines[0].starts_with("The sailboat rocks"));
        assert!(!boat.can_interact(from_dock));
    }

    #[test]
    fn test_mysterious_object_panics_when_fragile() {
        let inventory = Inventory::default();
        let mut idol = exterior("Driftwood Idol");
        let calm = idol.interact(&view(&inventory, 100.0, idol.center()));
        assert_eq!(calm.effects.as_slice(), &[Effect::Sanity(-5.0)]);
        let fragile = idol.interact(&view(&inventory, 20.0, idol.center()));
        assert_eq!(fragile.effects[0], Effect::Sanity(-14.0));
        assert!(fragile.effects.contains(&Effect::Shake(8.0)));
    }

    #[test]
    fn test_interior_cycle_keeps_state() {
        let inventory = Inventory::default();
        let mut set = Interactables::pale_harbor();
        let outside = set.len();
        set.load_interior();
        set.load_interior();
        assert_eq!(set.len(), outside + INTERIOR.len());
        let desk = set.find("Keeper's Desk").unwrap();
        let actor = set.get(desk).unwrap().center();
        let _ = set.get_mut(desk).unwrap().interact(&view(&inventory, 80.0, actor));
        set.stow_interior();
        assert_eq!(set.len(), outside);
        assert!(!set.interior_loaded());
        set.load_interior();
        let desk = set.find("Keeper's Desk").unwrap();
        assert!(set.get(desk).unwrap().searched);
    }

    #[test]
    fn test_near_sorts_nearest_first() {
        let mut set = Interactables::pale_harbor();
        set.load_interior();
        let hits = set.near(Vec2::new(540.0, 480.0));
        assert!(hits.len() > 2);
        let distances: Vec<f32> = hits
            .iter()
            .map(|idx| set.get(*idx).unwrap().center().distance(Vec2::new(540.0, 480.0)))
            .collect();
        assert!(distances.windows(2).all(|w| w[0] <= w[1]));
    }
}
