//! Typewriter dialogue sessions.
//!
//! A session is a list of lines revealed one at a time at a fixed rate.
//! Lines are rewritten for the current sanity when they start typing, and
//! thoughts raised mid-session queue behind what is already showing.

pub mod text;

use serde::Serialize;
use tracing::debug;

use crate::ports::{ToneRequest, Waveform};

use self::text::{BoxStyle, EmphasisSpan};

/// Characters revealed per second.
pub const TEXT_SPEED: f64 = 30.0;
/// Seconds between typewriter clicks.
pub const CHAR_TONE_INTERVAL: f64 = 0.08;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DialogueView {
    /// What is on screen this frame, glitches included.
    pub text: String,
    /// The full line being typed, without per-frame glitches.
    pub line: String,
    pub complete: bool,
    pub style: BoxStyle,
    /// Only filled once the line is complete.
    pub emphasis: Vec<EmphasisSpan>,
    pub index: usize,
    pub total: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// The current line was cut short and shown whole.
    Revealed,
    NextLine,
    Closed,
    Idle,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dialogue {
    lines: Vec<String>,
    index: usize,
    full: String,
    shown: usize,
    timer: f64,
    last_tone: f64,
    complete: bool,
    active: bool,
}

impl Dialogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn remaining(&self) -> usize {
        self.lines.len().saturating_sub(self.index)
    }

    /// Replaces whatever is showing with a fresh session.
    pub fn start<I, S>(&mut self, lines: I, sanity: f32)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines = lines.into_iter().map(Into::into).collect();
        self.index = 0;
        self.active = true;
        debug!(lines = self.lines.len(), "dialogue started");
        self.begin_line(sanity);
    }

    /// An inner thought in asterisks. Queued behind an open session,
    /// otherwise shown on its own.
    pub fn thought(&mut self, text: &str, sanity: f32) {
        let line = format!("*{text}*");
        if self.active {
            self.lines.push(line);
        } else {
            self.start([line], sanity);
        }
    }

    /// Types out the current line. Returns a click tone when one is due.
    pub fn update(&mut self, dt: f64) -> Option<ToneRequest> {
        if !self.active || self.complete {
            return None;
        }
        self.timer += dt;
        let total = self.full.chars().count();
        self.shown = ((self.timer * TEXT_SPEED).floor().max(0.0) as usize).min(total);

        let mut tone = None;
        if self.timer - self.last_tone > CHAR_TONE_INTERVAL {
            tone = Some(char_tone(self.shown));
            self.last_tone = self.timer;
        }
        if self.shown >= total {
            self.complete = true;
        }
        tone
    }

    /// The player pressed continue.
    pub fn advance(&mut self, sanity: f32) -> Advance {
        if !self.active {
            return Advance::Idle;
        }
        if !self.complete {
            self.shown = self.full.chars().count();
            self.complete = true;
            return Advance::Revealed;
        }
        self.index += 1;
        self.begin_line(sanity);
        if self.active {
            Advance::NextLine
        } else {
            Advance::Closed
        }
    }

    pub fn close(&mut self) {
        self.active = false;
        self.lines.clear();
        self.index = 0;
        self.full.clear();
        self.shown = 0;
        self.complete = false;
    }

    pub fn view(&self, sanity: f32, time: f64) -> Option<DialogueView> {
        if !self.active {
            return None;
        }
        let revealed: String = self.full.chars().take(self.shown).collect();
        let shown = if text::glitch_frame(time, sanity) {
            text::glitch(&revealed, time)
        } else {
            revealed
        };
        let emphasis = if self.complete {
            text::emphasis_spans(&shown)
        } else {
            Vec::new()
        };
        Some(DialogueView {
            text: shown,
            line: self.full.clone(),
            complete: self.complete,
            style: BoxStyle::for_sanity(sanity),
            emphasis,
            index: self.index,
            total: self.lines.len(),
        })
    }

    /// Moves to the first non-blank line at or after `index`, or closes.
    fn begin_line(&mut self, sanity: f32) {
        while self
            .lines
            .get(self.index)
            .is_some_and(|line| line.trim().is_empty())
        {
            self.index += 1;
        }
        let Some(line) = self.lines.get(self.index) else {
            self.close();
            debug!("dialogue closed");
            return;
        };
        self.full = text::process(line, sanity);
        self.shown = 0;
        self.timer = 0.0;
        self.last_tone = 0.0;
        self.complete = self.full.is_empty();
    }
}

/// Pitch wanders with how much of the line has been revealed.
pub fn char_tone(revealed: usize) -> ToneRequest {
    let frequency = 800 + (revealed * 23) % 200;
    ToneRequest::new(frequency as f32, Waveform::Square, 0.02, 0.1)
}
