use super::narrative::Lines;

/// Items whose first pickup steadies the mind.
pub const IMPORTANT_ITEMS: &[&str] = &[
    "Lighthouse Key",
    "Keeper's Journal",
    "Old Lantern",
    "Cursed Tome",
    "Ship's Log",
    "Final Entry",
    "Lighthouse Lens",
];

pub const IMPORTANT_ITEM_BONUS: f32 = 5.0;

#[derive(Clone, Copy, Debug)]
pub struct ItemDescription {
    pub name: &'static str,
    pub lines: Lines,
}

impl ItemDescription {
    pub const fn new(name: &'static str, lines: Lines) -> Self {
        Self { name, lines }
    }
}

pub const ITEM_DESCRIPTIONS: &[ItemDescription] = &[
    ItemDescription::new(
        "Lighthouse Key",
        &[
            "A heavy brass key, tarnished with age and salt air.",
            "The metal feels cold to the touch, as if it holds memories.",
            "This key unlocks the lighthouse door, but what secrets lie within?",
        ],
    ),
    ItemDescription::new(
        "Keeper's Journal",
        &[
            "A water-damaged journal with pages yellowed by time.",
            "The entries speak of strange happenings and growing dread.",
            "Reading it fills you with unease, but also understanding.",
        ],
    ),
    ItemDescription::new(
        "Old Lantern",
        &[
            "A rusted lantern that still contains some oil.",
            "Despite its age, the flame burns steady and bright.",
            "Light is precious in this fog-shrouded harbor.",
        ],
    ),
    ItemDescription::new(
        "Cursed Tome",
        &[
            "'Maritime Legends of Pale Harbor' by E. Blackwood",
            "The pages describe ancient horrors from beneath the waves.",
            "Knowledge is power, but some truths come at a cost.",
        ],
    ),
    ItemDescription::new(
        "Ship's Log",
        &[
            "A captain's log from a vessel that never made it home.",
            "The entries tell of strange lights and inhuman singing.",
            "The final pages are stained with what looks like seawater... or tears.",
        ],
    ),
    ItemDescription::new(
        "Final Entry",
        &[
            "The lighthouse keeper's last desperate message.",
            "His handwriting grows more erratic with each word.",
            "A warning about the deep ones and their calling song.",
        ],
    ),
    ItemDescription::new(
        "Lighthouse Lens",
        &[
            "The massive focusing lens from the lighthouse beacon.",
            "It pulses with an otherworldly energy.",
            "This lens doesn't just guide ships - it holds back darker things.",
        ],
    ),
    ItemDescription::new(
        "Tunnel Access",
        &[
            "Knowledge of the hidden entrance to underground tunnels.",
            "The carvings match symbols from the cursed tome.",
            "Some paths are better left unexplored.",
        ],
    ),
    ItemDescription::new(
        "Navigation Notes",
        &[
            "A small notebook filled with maritime observations.",
            "The keeper noted strange changes in local weather patterns.",
            "His final entries speak of 'singing rocks' and unnatural fog.",
        ],
    ),
    ItemDescription::new(
        "Personal Letter",
        &[
            "A crumpled letter to someone named Martha.",
            "The lighthouse keeper's loneliness and fear are evident.",
            "His isolation was taking a heavy toll on his mind.",
        ],
    ),
    ItemDescription::new(
        "Broken Compass",
        &[
            "A brass compass that spins wildly without direction.",
            "Something in this area disrupts magnetic navigation.",
            "The supernatural forces here affect even simple instruments.",
        ],
    ),
];

pub fn is_important(item: &str) -> bool {
    IMPORTANT_ITEMS.contains(&item)
}

/// Description lines for an inventory entry, with a generic fallback.
pub fn describe(item: &str) -> Vec<String> {
    match ITEM_DESCRIPTIONS.iter().find(|d| d.name == item) {
        Some(description) => description.lines.iter().map(|l| l.to_string()).collect(),
        None => vec![
            format!("You examine the {item} closely."),
            "It seems ordinary enough, but in this place...".to_string(),
            "Nothing is quite what it appears to be.".to_string(),
        ],
    }
}
