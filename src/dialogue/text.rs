//! Sanity-driven text mutation, emphasis and the dialogue box palette.
//!
//! Every mutation is a pure function of the text (and, for glitches, the
//! clock), so the same line always breaks the same way.

use serde::Serialize;

use crate::data::narrative::{FRACTURED_MURMURS, OBSERVATIONS, UNEASY_MURMURS};

pub const FRACTURED_SANITY: f32 = 30.0;
pub const UNEASY_SANITY: f32 = 60.0;

const BLOCKS: [char; 7] = ['█', '▓', '▒', '░', '?', '#', '@'];
const INTRUSIONS: [&str; 4] = [
    " ...they watch...",
    " ...whispers in the fog...",
    " ...it's not real...",
    " ...behind you...",
];

/// Rewrites a line as it is about to be typed out.
pub fn process(text: &str, sanity: f32) -> String {
    if sanity < FRACTURED_SANITY {
        distort(text)
    } else if sanity < UNEASY_SANITY {
        stutter(text)
    } else {
        text.to_string()
    }
}

/// Heavy corruption: block characters, doubled letters and a trailing
/// intrusion for some line lengths. Spaces always survive.
pub fn distort(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 32);
    for (i, ch) in text.chars().enumerate() {
        if ch == ' ' {
            out.push(' ');
            continue;
        }
        let code = ch as usize;
        if (i * 7 + code * 3) % 100 < 5 {
            out.push(BLOCKS[code % BLOCKS.len()]);
        } else if (i * 11 + code * 5) % 100 < 3 {
            out.push(ch);
            out.push(ch);
        } else {
            out.push(ch);
        }
    }
    let len = text.chars().count();
    if (len * 13) % 100 < 30 {
        out.push_str(INTRUSIONS[len % INTRUSIONS.len()]);
    }
    out
}

/// Light unease: some longer words stutter on their first letter.
pub fn stutter(text: &str) -> String {
    text.split(' ')
        .enumerate()
        .map(|(i, word)| {
            let len = word.chars().count();
            match word.chars().next() {
                Some(first) if len > 3 && (i * 17 + len * 7) % 100 < 10 => {
                    format!("{first}-{word}")
                }
                _ => word.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Flickering corruption of already-revealed text. Spaces and basic
/// punctuation are left alone.
pub fn glitch(text: &str, time: f64) -> String {
    let tick = (time * 5.0).floor().max(0.0) as usize;
    text.chars()
        .enumerate()
        .map(|(i, ch)| {
            if matches!(ch, ' ' | '.' | ',' | '!' | '?') {
                return ch;
            }
            let code = ch as usize;
            if (i * 13 + tick + code) % 100 < 5 {
                char::from(33 + ((i * 7 + code) % 94) as u8)
            } else {
                ch
            }
        })
        .collect()
}

/// Whether the glitch pass applies on this frame.
pub fn glitch_frame(time: f64, sanity: f32) -> bool {
    sanity < FRACTURED_SANITY && ((time * 10.0).floor().max(0.0) as u64 % 100) < 10
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Emphasis {
    Lighthouse,
    Key,
    Journal,
}

impl Emphasis {
    fn of(word: &str) -> Option<Self> {
        if word.eq_ignore_ascii_case("lighthouse") {
            Some(Emphasis::Lighthouse)
        } else if word.eq_ignore_ascii_case("key") {
            Some(Emphasis::Key)
        } else if word.eq_ignore_ascii_case("journal") {
            Some(Emphasis::Journal)
        } else {
            None
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Emphasis::Lighthouse => (0xff, 0xff, 0xff),
            Emphasis::Key => (0xff, 0xdd, 0x00),
            Emphasis::Journal => (0x88, 0xcc, 0xff),
        }
    }
}

/// A highlighted word, as a char range into the displayed line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct EmphasisSpan {
    pub start: usize,
    pub end: usize,
    pub emphasis: Emphasis,
}

/// Bare whole words only: "lighthouse." with trailing punctuation is not
/// highlighted.
pub fn emphasis_spans(text: &str) -> Vec<EmphasisSpan> {
    fn flush(word: &mut String, start: usize, spans: &mut Vec<EmphasisSpan>) {
        if let Some(emphasis) = Emphasis::of(word) {
            spans.push(EmphasisSpan {
                start,
                end: start + word.chars().count(),
                emphasis,
            });
        }
        word.clear();
    }

    let mut spans = Vec::new();
    let mut start = 0;
    let mut word = String::new();
    for (i, ch) in text.chars().enumerate() {
        if ch.is_whitespace() {
            flush(&mut word, start, &mut spans);
            start = i + 1;
        } else {
            word.push(ch);
        }
    }
    flush(&mut word, start, &mut spans);
    spans
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BoxStyle {
    pub background: (u8, u8, u8),
    pub border: (u8, u8, u8),
    pub text: (u8, u8, u8),
}

impl BoxStyle {
    pub fn for_sanity(sanity: f32) -> Self {
        if sanity < FRACTURED_SANITY {
            Self {
                background: (20, 0, 0),
                border: (0x80, 0x00, 0x00),
                text: (0xff, 0xcc, 0xcc),
            }
        } else if sanity < UNEASY_SANITY {
            Self {
                background: (10, 10, 0),
                border: (0x66, 0x66, 0x00),
                text: (0xff, 0xff, 0xcc),
            }
        } else {
            Self {
                background: (0, 0, 0),
                border: (0x66, 0x66, 0x66),
                text: (0xff, 0xff, 0xff),
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MurmurTrigger {
    /// Inner voice, only when sanity has slipped.
    Random,
    Environmental,
}

/// A passing remark for the event log, or nothing on most frames.
pub fn murmur(trigger: MurmurTrigger, sanity: f32, time: f64) -> Option<&'static str> {
    let gate = (time * 3.0).floor().max(0.0) as u64 % 100;
    let second = time.floor().max(0.0) as usize;
    let table = match trigger {
        MurmurTrigger::Random if sanity < FRACTURED_SANITY && gate < 30 => FRACTURED_MURMURS,
        MurmurTrigger::Random if sanity < UNEASY_SANITY && gate < 20 => UNEASY_MURMURS,
        MurmurTrigger::Environmental if gate < 10 => OBSERVATIONS,
        _ => return None,
    };
    table.get(second % table.len()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calm_text_is_untouched() {
        let line = "The lighthouse stands silent.";
        assert_eq!(process(line, 80.0), line);
    }

    #[test]
    fn test_distortion_keeps_every_space() {
        let line = "The shadows are not where they should be at all tonight";
        let out = distort(line);
        assert!(out.matches(' ').count() >= line.matches(' ').count());
        assert!(out.chars().count() >= line.chars().count());
        assert_eq!(distort(line), out);
    }

    #[test]
    fn test_intrusion_depends_on_length() {
        // 10 chars: 130 % 100 = 30, no intrusion; 2 chars: 26, intrusion.
        assert!(!distort("aaaaaaaaaa").contains("..."));
        assert!(distort("zz").ends_with("..."));
    }

    #[test]
    fn test_stutter_only_long_words() {
        assert_eq!(stutter("fogs"), "fogs");
        assert_eq!(stutter("a b"), "a b");
        assert_eq!(stutter("x unnaturally"), "x unnaturally");
        // Second word, 13 letters: (17 + 91) % 100 = 8.
        assert_eq!(
            stutter("lighthouseman lighthouseman"),
            "lighthouseman l-lighthouseman"
        );
    }

    #[test]
    fn test_glitch_spares_punctuation() {
        let line = ". , ! ?";
        assert_eq!(glitch(line, 12.3), line);
        assert_eq!(glitch("abc", 0.0).chars().count(), 3);
    }

    #[test]
    fn test_emphasis_marks_whole_words() {
        let spans = emphasis_spans("The Key opens the lighthouse. Read the journal");
        assert_eq!(
            spans,
            vec![
                EmphasisSpan {
                    start: 4,
                    end: 7,
                    emphasis: Emphasis::Key
                },
                EmphasisSpan {
                    start: 39,
                    end: 46,
                    emphasis: Emphasis::Journal
                },
            ]
        );
    }

    #[test]
    fn test_box_darkens_with_sanity() {
        assert_eq!(BoxStyle::for_sanity(90.0).border, (0x66, 0x66, 0x66));
        assert_eq!(BoxStyle::for_sanity(45.0).text, (0xff, 0xff, 0xcc));
        assert_eq!(BoxStyle::for_sanity(10.0).background, (20, 0, 0));
    }

    #[test]
    fn test_murmurs_follow_the_gate() {
        // time 1.0: gate 3, second 1.
        assert_eq!(
            murmur(MurmurTrigger::Random, 10.0, 1.0),
            Some(FRACTURED_MURMURS[1])
        );
        assert_eq!(
            murmur(MurmurTrigger::Random, 50.0, 1.0),
            Some(UNEASY_MURMURS[1])
        );
        assert_eq!(murmur(MurmurTrigger::Random, 90.0, 1.0), None);
        assert_eq!(
            murmur(MurmurTrigger::Environmental, 90.0, 1.0),
            Some(OBSERVATIONS[1])
        );
        // time 20.0: gate 60.
        assert_eq!(murmur(MurmurTrigger::Environmental, 90.0, 20.0), None);
    }
}
