//! Everything the keeper left behind, as data.

use crate::{
    effects::Tint,
    game::deferred::DeferredAction,
    map::{Bounds, Vec2},
    world::interactables::{
        Aftermath, Branch, Effect, Gate, Interactable, InteractableKind, OutcomeStatus, Pickup,
        Search, Tiered,
    },
};

use super::narrative::Lines;

pub const INTERIOR_ENTRY: Vec2 = Vec2::new(550.0, 550.0);
pub const EXTERIOR_EXIT: Vec2 = Vec2::new(550.0, 620.0);
pub const LAMP_ROOM: Vec2 = Vec2::new(550.0, 370.0);
pub const LIGHTHOUSE_ENTRY_COST: f32 = 8.0;

pub const DOOR_ENTER: Lines = &[
    "The key turns with a heavy click.",
    "The door creaks open, revealing the lighthouse interior.",
    "A musty smell wafts out, carrying whispers of the past.",
    "You step inside and hear the door close behind you...",
];

pub const DOOR_LOCKED: Lines = &[
    "The lighthouse door is locked.",
    "You need a key to enter.",
    "Perhaps the previous keeper left it somewhere nearby...",
];

pub const DOOR_EXIT_WITH_LENS: Lines = &[
    "With the lighthouse lens in hand, you feel a sense of completion.",
    "The fog outside seems less threatening now.",
    "You step back outside, ready to face whatever comes next.",
];

pub const DOOR_EXIT: Lines = &[
    "You step back outside into the fog-shrouded harbor.",
    "The lighthouse door closes with a heavy thud behind you.",
    "You feel like you're missing something important inside...",
];

pub const STATUE_PRAYER: Lines = &[
    "You kneel before the weathered statue and close your eyes.",
    "Despite its unsettling presence, you find a moment of peace.",
    "The daylight feels warm and protective.",
    "Your troubled mind feels slightly calmer.",
];

pub const STATUE_AT_NIGHT: Lines = &[
    "At night, the statue's presence feels malevolent.",
    "You dare not linger here in the darkness.",
    "Those stone eyes seem to pierce your soul.",
];

pub const STATUE_AT_PEACE: Lines = &[
    "The statue watches silently over the town square.",
    "You've found what peace you can here.",
];

pub const COT_REST: Lines = &[
    "Despite the unpleasant surroundings, you rest briefly.",
    "The daylight streaming through the windows is comforting.",
    "You feel slightly more at ease.",
];

pub const COT_AT_NIGHT: Lines = &[
    "The cot creaks ominously in the lighthouse wind.",
    "You wouldn't want to sleep here at night.",
    "The darkness holds too many unknowns.",
];

pub const LENS_OUT_OF_REACH: Lines = &[
    "You can see a large lens mechanism above.",
    "You need to climb the stairs to reach it.",
];

pub const LENS_TAKEN: Lines = &[
    "The lighthouse lens gleams with an otherworldly light.",
    "As you touch it, visions flash before your eyes:",
    "Ships lost at sea, creatures rising from the depths...",
    "You understand now - this lens doesn't just guide ships,",
    "It holds back something far more sinister.",
    "You carefully remove the lens. The town's fate now rests with you.",
];

pub const LENS_NOT_UNDERSTOOD: Lines = &[
    "The lighthouse lens pulses with strange energy.",
    "But you don't understand its true purpose yet.",
    "You need more knowledge before disturbing it.",
];

pub const LENS_EMPTY: Lines = &[
    "The lens housing sits empty now.",
    "Whatever power it held, you now carry with you.",
];

pub const LENS_CLARITY_DELAY: f64 = 2.0;
pub const CHAPTER_END_DELAY: f64 = 4.0;
/// Reaching the lens means standing in the lamp room.
pub const LAMP_ROOM_BOUNDS: Bounds = Bounds::new(520.0, 340.0, 60.0, 50.0);

pub const MYSTERIOUS_VARIANTS: &[Lines] = &[
    &["A strange object lies before you."],
    &["The object seems to pulse with an otherworldly energy."],
    &["The object whispers secrets you shouldn't hear."],
    &["The object... it knows you're here. It sees you."],
];

const STATUE_EXAMINE: &[Lines] = &[
    &[
        "An old statue stands in the center of the town square.",
        "The inscription is too weathered to read clearly.",
        "But you can make out: '...those who watch... harbor...'",
    ],
    &[
        "As you examine the statue closer, you notice its eyes...",
        "They seem to follow you as you move around the square.",
        "Surely it's just a trick of the light... right?",
    ],
    &[
        "The statue's expression seems different now.",
        "More... knowing. More aware.",
        "You feel watched, even when you look away from the square.",
    ],
];

const SIGN_VARIANTS: &[Lines] = &[
    &[
        "A weathered welcome sign stands at the town entrance.",
        "'Welcome to Pale Harbor - Est. 1847'",
        "'Population... the number appears scratched out.'",
    ],
    &[
        "The sign looks different now... older somehow.",
        "The paint is peeling, revealing something underneath.",
        "'Abandon Hope All Ye Who Enter Here' ...no, that can't be right.",
    ],
    &[
        "The welcome sign now reads something else entirely.",
        "'They're all watching... they know you're here...'",
        "Your eyes must be playing tricks on you.",
    ],
];

const PLANT_VARIANTS: &[Lines] = &[
    &[
        "A small potted plant sits in the corner.",
        "Its leaves are brown and brittle from neglect.",
        "Even plants can't thrive in this cursed place.",
    ],
    &[
        "The plant's leaves seem to move without any breeze.",
        "Upon closer inspection, they appear to be... breathing?",
        "You step back, disturbed by what you've seen.",
    ],
    &[
        "The plant's branches now resemble twisted fingers.",
        "Dark veins pulse through its withered leaves.",
        "Nature itself recoils from the evil in this place.",
    ],
];

pub const EXTERIOR: &[Interactable] = &[
    Interactable::new(
        "Lighthouse Door",
        Bounds::new(520.0, 580.0, 30.0, 20.0),
        InteractableKind::LighthouseDoor,
    ),
    Interactable::new(
        "Soggy Journal",
        Bounds::new(440.0, 900.0, 20.0, 15.0),
        InteractableKind::Note(Pickup {
            lines: &[
                "A water-damaged journal lies abandoned on the dock.",
                "'Day 23: The fog hasn't lifted. Something moves in it...'",
                "'Day 24: I can hear them calling my name. I must resist.'",
                "'Day 25: The lighthouse... it's not what it seems...'",
            ],
            effects: &[Effect::Grant("Keeper's Journal"), Effect::Sanity(-12.0)],
            after: &["You've already taken the journal."],
        }),
    ),
    Interactable::new(
        "Weathered Statue",
        Bounds::new(1120.0, 550.0, 40.0, 60.0),
        InteractableKind::Statue(Tiered {
            variants: STATUE_EXAMINE,
            step: 30.0,
            base_loss: 5.0,
            per_level: 3.0,
            spare_calm: false,
        }),
    ),
    Interactable::new(
        "Rusted Lantern",
        Bounds::new(580.0, 420.0, 15.0, 10.0),
        InteractableKind::Note(Pickup {
            lines: &[
                "A rusted lantern is hidden behind the lighthouse.",
                "Despite its age, it still contains some oil.",
                "It might be useful in dark places...",
            ],
            effects: &[Effect::Grant("Old Lantern"), Effect::Sanity(5.0)],
            after: &["The hiding spot is empty now."],
        }),
    ),
    Interactable::new(
        "Welcome Sign",
        Bounds::new(800.0, 520.0, 40.0, 60.0),
        InteractableKind::Sign(Tiered {
            variants: SIGN_VARIANTS,
            step: 35.0,
            base_loss: 3.0,
            per_level: 2.0,
            spare_calm: true,
        }),
    ),
    Interactable::new(
        "Lighthouse Key",
        Bounds::new(1180.0, 690.0, 15.0, 10.0),
        InteractableKind::Key(Pickup {
            lines: &[
                "A brass key lies partially buried near an old building.",
                "It's tarnished with age, but still solid.",
                "This must be the lighthouse key you need.",
                "You feel a chill as you pick it up... as if something is watching.",
            ],
            effects: &[Effect::Grant("Lighthouse Key"), Effect::Sanity(-5.0)],
            after: &["The key is no longer here."],
        }),
    ),
    Interactable::new(
        "Old Bookshop",
        Bounds::new(860.0, 440.0, 30.0, 30.0),
        InteractableKind::Door(Gate {
            branches: &[
                Branch::new(
                    &["Keeper's Journal"],
                    &[
                        "Inside the dusty bookshop, you find a tome that matches the journal.",
                        "'Maritime Legends of Pale Harbor' by E. Blackwood",
                        "'Chapter 7: The Lighthouse Keeper's Curse'",
                        "The pages describe strange lights and voices from the sea...",
                        "This explains what happened to the previous keeper.",
                    ],
                    &[Effect::Grant("Cursed Tome"), Effect::Sanity(-15.0)],
                    OutcomeStatus::Performed,
                )
                .lacking(&["Cursed Tome"]),
                Branch::new(
                    &["Cursed Tome"],
                    &[
                        "The bookshop shelves sag under damp, unreadable volumes.",
                        "Whatever it had to teach you, you already carry.",
                    ],
                    &[],
                    OutcomeStatus::AlreadyDone,
                ),
            ],
            fallback: Branch::new(
                &[],
                &[
                    "The old bookshop is locked tight.",
                    "A sign reads: 'Key holders only'",
                    "You need to find something that proves your purpose here.",
                ],
                &[],
                OutcomeStatus::Rejected,
            ),
        }),
    ),
    Interactable::new(
        "Ancient Well",
        Bounds::new(1000.0, 520.0, 40.0, 40.0),
        InteractableKind::Well(Gate {
            branches: &[
                Branch::new(
                    &["Old Lantern", "Cursed Tome"],
                    &[
                        "You lower the lantern into the well by its chain.",
                        "The light reveals strange carvings on the walls below.",
                        "They match the symbols from the cursed tome...",
                        "A rope ladder descends into darkness.",
                        "You've found the entrance to the underground tunnels!",
                    ],
                    &[Effect::Grant("Tunnel Access"), Effect::Sanity(-20.0)],
                    OutcomeStatus::Performed,
                )
                .lacking(&["Tunnel Access"]),
                Branch::new(
                    &["Tunnel Access"],
                    &[
                        "The rope ladder sways in the dark shaft below.",
                        "The tunnels will still be there when you are ready.",
                    ],
                    &[],
                    OutcomeStatus::AlreadyDone,
                ),
                Branch::new(
                    &["Old Lantern"],
                    &[
                        "You peer into the well with your lantern.",
                        "There's something carved into the walls below...",
                        "But you can't make sense of the symbols.",
                        "You need more knowledge to understand this place.",
                    ],
                    &[Effect::Sanity(-8.0)],
                    OutcomeStatus::Performed,
                ),
            ],
            fallback: Branch::new(
                &[],
                &[
                    "An ancient stone well sits in the town center.",
                    "It's too dark to see the bottom.",
                    "You need light to explore it properly.",
                ],
                &[],
                OutcomeStatus::Rejected,
            ),
        }),
    ),
    Interactable::new(
        "Abandoned Sailboat",
        Bounds::new(320.0, 1000.0, 60.0, 40.0),
        InteractableKind::Salvage(Search {
            lines: &[
                "An old sailboat bobs in the harbor.",
                "Inside, you find a ship's log with concerning entries:",
                "'Lighthouse has been dark for days.'",
                "'Strange sounds from the water at night.'",
                "The entries abruptly stop two weeks ago.",
            ],
            shaken: Some((
                70.0,
                &[
                    "The sailboat rocks gently in the harbor.",
                    "Inside, you find a captain's log, water-damaged but readable:",
                    "'Day 12: The lighthouse hasn't lit for three nights...'",
                    "'Day 15: We can hear singing from the water. Not human singing.'",
                    "'Day 18: God help us. They're coming up from the deep.'",
                ],
            )),
            effects: &[Effect::Grant("Ship's Log"), Effect::Sanity(-10.0)],
            after: Aftermath::Flavor(&[
                "The sailboat creaks ominously in the wind.",
                "You've already searched it thoroughly.",
            ]),
        }),
    )
    .with_radius(80.0),
    Interactable::new(
        "Driftwood Idol",
        Bounds::new(230.0, 640.0, 14.0, 18.0),
        InteractableKind::MysteriousObject(Tiered {
            variants: MYSTERIOUS_VARIANTS,
            step: 25.0,
            base_loss: 5.0,
            per_level: 3.0,
            spare_calm: false,
        }),
    ),
];

pub const INTERIOR: &[Interactable] = &[
    Interactable::new(
        "Spiral Staircase",
        Bounds::new(545.0, 420.0, 20.0, 30.0),
        InteractableKind::Stairs(Gate {
            branches: &[Branch::new(
                &["Cursed Tome"],
                &[
                    "The wooden stairs creak ominously as you climb.",
                    "Each step echoes in the hollow tower.",
                    "You reach the lamp room at the top.",
                    "The massive lens sits dark and cold.",
                    "But now you understand what needs to be done...",
                ],
                &[Effect::Teleport(LAMP_ROOM), Effect::Sanity(-5.0)],
                OutcomeStatus::Performed,
            )],
            fallback: Branch::new(
                &[],
                &[
                    "Ancient wooden stairs spiral upward.",
                    "But something feels wrong... dangerous.",
                    "You need to understand this place better before ascending.",
                    "Perhaps there's knowledge to be found elsewhere first.",
                ],
                &[Effect::Sanity(-3.0)],
                OutcomeStatus::Rejected,
            ),
        }),
    )
    .interior(),
    Interactable::new(
        "Keeper's Desk",
        Bounds::new(520.0, 500.0, 25.0, 20.0),
        InteractableKind::Furniture(Search {
            lines: &[
                "The lighthouse keeper's desk is covered in dust.",
                "Among the papers, you find a final log entry:",
                "'The voices from the sea grow stronger each night.'",
                "'I can see shapes moving beneath the waves.'",
                "'If anyone finds this, beware the calling of the deep ones.'",
            ],
            shaken: None,
            effects: &[Effect::Grant("Final Entry"), Effect::Sanity(-12.0)],
            after: Aftermath::Flavor(&[
                "The desk has been thoroughly searched.",
                "Only dust and shadows remain.",
            ]),
        }),
    )
    .interior(),
    Interactable::new(
        "Lighthouse Lens",
        Bounds::new(540.0, 350.0, 30.0, 30.0),
        InteractableKind::Lens,
    )
    .interior(),
    Interactable::new(
        "Keeper's Bookshelf",
        Bounds::new(515.0, 440.0, 15.0, 30.0),
        InteractableKind::Furniture(Search {
            lines: &[
                "The bookshelf holds maritime charts and weather logs.",
                "Most books are damaged by salt air and neglect.",
                "You find a small notebook tucked between volumes:",
                "'Navigation Notes - Beware the singing rocks near the harbor mouth.'",
                "'The fog patterns have changed... something stirs below.'",
            ],
            shaken: None,
            effects: &[Effect::Grant("Navigation Notes"), Effect::Sanity(-5.0)],
            after: Aftermath::Flavor(&[
                "The remaining books are too damaged to read.",
                "Salt and moisture have claimed most of the collection.",
            ]),
        }),
    )
    .interior(),
    Interactable::new(
        "Dying Plant",
        Bounds::new(580.0, 540.0, 12.0, 15.0),
        InteractableKind::Sign(Tiered {
            variants: PLANT_VARIANTS,
            step: 35.0,
            base_loss: 3.0,
            per_level: 2.0,
            spare_calm: false,
        }),
    )
    .interior(),
    Interactable::new(
        "Keeper's Cot",
        Bounds::new(565.0, 465.0, 25.0, 15.0),
        InteractableKind::Furniture(Search {
            lines: &[
                "A simple cot where the lighthouse keeper once slept.",
                "The blankets are musty and moth-eaten.",
                "Under the pillow, you find a crumpled letter:",
                "'My dearest Martha, the isolation grows harder each day...'",
                "'The sounds from the water at night... they're not natural.'",
            ],
            shaken: None,
            effects: &[Effect::Grant("Personal Letter"), Effect::Sanity(-8.0)],
            after: Aftermath::Rest,
        }),
    )
    .interior(),
    Interactable::new(
        "Oil Lamp",
        Bounds::new(530.0, 470.0, 8.0, 12.0),
        InteractableKind::Fixture(Gate {
            branches: &[Branch::new(
                &["Old Lantern"],
                &[
                    "An old oil lamp sits on a small wooden table.",
                    "You refill your lantern with oil from the lamp's reservoir.",
                    "The flame burns brighter now, pushing back the darkness.",
                ],
                &[Effect::Sanity(3.0)],
                OutcomeStatus::Performed,
            )],
            fallback: Branch::new(
                &[],
                &[
                    "An oil lamp with a cracked glass chimney.",
                    "There's still some oil in the base.",
                    "If only you had something to carry it in...",
                ],
                &[],
                OutcomeStatus::Rejected,
            ),
        }),
    )
    .interior(),
    Interactable::new(
        "Weather Instruments",
        Bounds::new(505.0, 445.0, 8.0, 15.0),
        InteractableKind::Fixture(Gate {
            branches: &[],
            fallback: Branch::new(
                &[],
                &[
                    "A barometer and thermometer hang on the wall.",
                    "The barometer needle points to 'STORM' and won't budge.",
                    "The thermometer reads an impossible -20 degrees.",
                    "These instruments haven't worked properly in years...",
                ],
                &[Effect::Sanity(-4.0)],
                OutcomeStatus::Performed,
            ),
        }),
    )
    .interior(),
    Interactable::new(
        "Keeper's Coat",
        Bounds::new(580.0, 455.0, 8.0, 20.0),
        InteractableKind::Furniture(Search {
            lines: &[
                "The lighthouse keeper's heavy wool coat hangs on a peg.",
                "The fabric is stiff with salt and age.",
                "In the pocket, you find a brass compass.",
                "The needle spins wildly, unable to find magnetic north.",
                "Something is interfering with natural forces here.",
            ],
            shaken: None,
            effects: &[Effect::Grant("Broken Compass"), Effect::Sanity(-6.0)],
            after: Aftermath::Flavor(&[
                "The coat sways slightly in the lighthouse draft.",
                "It still carries the scent of tobacco and fear.",
            ]),
        }),
    )
    .interior(),
];

/// Effects of prying the lens loose once the keeper's secrets are known.
pub const LENS_EFFECTS: &[Effect] = &[
    Effect::Grant("Lighthouse Lens"),
    Effect::Sanity(-25.0),
    Effect::Defer {
        delay: LENS_CLARITY_DELAY,
        action: DeferredAction::LensClarity,
    },
];

pub const LENS_UNREADY_EFFECTS: &[Effect] = &[Effect::Sanity(-8.0)];

pub const MYSTERIOUS_PANIC: [Effect; 2] = [
    Effect::Flash {
        tint: Tint::Red,
        intensity: 0.5,
        duration: 0.2,
    },
    Effect::Shake(8.0),
];
