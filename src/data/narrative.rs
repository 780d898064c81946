use crate::map::Zone;

pub type Lines = &'static [&'static str];

pub const INTRO: Lines = &[
    "The boat's engine sputters to silence as you reach the dock.",
    "Pale Harbor stretches before you, shrouded in an unnatural fog.",
    "The lighthouse beam hasn't been seen for three days...",
    "Something is wrong here. You can feel it in your bones.",
    "",
    "Remember: Your sanity will drain at night but heal during dawn and day.",
    "Press 'M' to meditate in safe places during daylight to restore sanity.",
    "Sleep in beds, pray at statues, and find important items to stay sane.",
];

#[derive(Clone, Copy, Debug)]
pub struct AreaNarrative {
    pub zone: Zone,
    pub lines: Lines,
    pub sanity_loss: f32,
}

impl AreaNarrative {
    pub const fn new(zone: Zone, lines: Lines, sanity_loss: f32) -> Self {
        Self {
            zone,
            lines,
            sanity_loss,
        }
    }
}

pub const AREA_NARRATIVES: &[AreaNarrative] = &[
    AreaNarrative::new(
        Zone::LighthouseInterior,
        &[
            "The lighthouse creaks ominously as you step inside.",
            "Dust motes dance in the pale light filtering through grimy windows.",
            "Something feels... wrong about this place.",
        ],
        5.0,
    ),
    AreaNarrative::new(
        Zone::HarborDocks,
        &[
            "The docks stretch into the fog like skeletal fingers.",
            "You can hear water lapping against the posts, but can't see the shore.",
            "Is that... whispering you hear in the mist?",
        ],
        3.0,
    ),
    AreaNarrative::new(
        Zone::TownSquare,
        &[
            "The town square is eerily empty.",
            "Street lamps flicker intermittently, casting dancing shadows.",
            "Where is everyone?",
        ],
        0.0,
    ),
];

pub fn area_narrative(zone: Zone) -> Option<&'static AreaNarrative> {
    AREA_NARRATIVES.iter().find(|n| n.zone == zone)
}

pub const MEDITATION_TOO_DARK: Lines = &[
    "It's too dark to find peace right now.",
    "You can meditate safely from 6 AM to 9 PM.",
];

pub const MEDITATION_CALM: Lines = &[
    "You feel as calm as you can be in this place.",
    "Your mind is already at relative peace.",
];

pub const MEDITATION_UNSAFE: Lines = &[
    "This doesn't feel like a safe place to rest.",
    "You need to find a quieter location away from the water.",
];

pub const MEDITATION_SUCCESS: Lines = &[
    "You sit quietly and close your eyes.",
    "Taking deep breaths, you try to center yourself.",
    "The daylight warms your face and calms your nerves.",
];

pub const MADNESS_LINES: Lines = &[
    "The shadows close in around you...",
    "Your mind fractures under the weight of unspeakable truths.",
    "In the darkness, whispers become screams.",
    "The lighthouse beam fades forever.",
    "",
    "You have been consumed by the horror of Pale Harbor.",
    "",
    "GAME OVER - MADNESS CLAIMED YOU",
    "",
    "Press F5 to restart your journey.",
];

pub const SHADOW_LINES: Lines = &[
    "The shadow figure reaches out with impossible fingers...",
    "Cold touches your soul as reality tears apart.",
    "You become one with the eternal darkness.",
    "",
    "CONSUMED BY SHADOWS",
    "",
    "Press F5 to restart your journey.",
];

pub const WHISPERS: Lines = &[
    "...behind you...",
    "...they're coming...",
    "...you don't belong here...",
    "...leave while you can...",
    "...we see you...",
    "...the lighthouse calls...",
];

pub const FRACTURED_MURMURS: Lines = &[
    "Did you hear that? No... it's nothing.",
    "The fog seems to be moving closer...",
    "I could swear someone just called my name.",
    "The shadows... they're not where they should be.",
];

pub const UNEASY_MURMURS: Lines = &[
    "Something doesn't feel right about this place.",
    "The air feels heavy here.",
    "I should stay alert.",
    "This fog is unnaturally thick.",
];

pub const OBSERVATIONS: Lines = &[
    "The lighthouse beam cuts through the fog intermittently.",
    "Seagulls cry in the distance.",
    "The harbor water laps gently against the docks.",
    "A cold breeze carries the scent of salt and decay.",
];

pub const LENS_CLARITY: Lines = &[
    "As the shock passes, you feel a strange sense of purpose.",
    "Understanding the truth, however horrible, brings clarity.",
    "You are no longer helpless against the unknown.",
];

pub const WATCHED: &str = "Something's watching me...";
pub const ICE_COLD: &str = "The air suddenly feels ice cold...";
pub const CHORUS: &str = "Voices... so many voices...";
pub const LOST_TIME: &str = "How long was I standing here?";
pub const PHANTOM_PERSON: &str = "Was that... someone standing there?";
pub const VANISHING_OBJECT: &str = "Did I just see something there?";
pub const FALSE_EXIT: &str = "Is that... a way out?";
pub const MIRROR_SELF: &str = "That figure... it looks like me.";

/// Copy for the full-screen end panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EndCopy {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub flavor: &'static str,
    pub footer: &'static str,
}

pub const MADNESS_END: EndCopy = EndCopy {
    title: "MADNESS CONSUMED YOU",
    subtitle: "Your sanity reached zero in the cursed harbor",
    flavor: "The whispers from the deep claimed your mind...",
    footer: "Press F5 to restart your journey into darkness",
};

pub const SHADOW_END: EndCopy = EndCopy {
    title: "SHADOW TOUCHED",
    subtitle: "The darkness between worlds found you",
    flavor: "You became one with the eternal shadow...",
    footer: "Press F5 to restart your journey into darkness",
};

pub const CHAPTER_ONE_END: EndCopy = EndCopy {
    title: "CHAPTER ONE COMPLETE",
    subtitle: "\"The Lighthouse Keeper's Secret\"",
    flavor: "You have uncovered the truth behind the lighthouse and claimed the mysterious lens. \
             The first chapter of your journey through Pale Harbor has ended, but darker mysteries await...",
    footer: "Preparing for Chapter Two...",
};

pub const CHAPTER_TWO_TEASER: EndCopy = EndCopy {
    title: "CHAPTER TWO",
    subtitle: "\"The Deep Ones Rising\"",
    flavor: "The lighthouse lens pulses with otherworldly energy in your hands. \
             Something stirs in the harbor depths, drawn by the lens's power. \
             Your true test is only beginning...",
    footer: "TO BE CONTINUED...",
};
