//! Seams to the outside: what the core pushes to a UI and to an audio backend.

use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    clock::{DayBand, SanityBand},
    dialogue::DialogueView,
    game::EndScreen,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
}

/// Fire-and-forget tone; nothing waits on playback.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ToneRequest {
    pub frequency: f32,
    pub waveform: Waveform,
    pub volume: f32,
    pub duration: f32,
}

impl ToneRequest {
    pub const fn new(frequency: f32, waveform: Waveform, volume: f32, duration: f32) -> Self {
        Self {
            frequency,
            waveform,
            volume,
            duration,
        }
    }

    pub const fn sine(frequency: f32, volume: f32, duration: f32) -> Self {
        Self::new(frequency, Waveform::Sine, volume, duration)
    }

    pub const fn whisper(frequency: f32, volume: f32) -> Self {
        Self::new(frequency, Waveform::Sawtooth, volume, 0.5)
    }
}

/// One-way presentation pushes. The core never reads anything back.
#[cfg_attr(test, mockall::automock)]
pub trait Presenter {
    fn set_sanity(&mut self, value: f32, band: SanityBand);
    fn set_clock(&mut self, label: &str, band: DayBand);
    fn set_location(&mut self, label: &str);
    fn set_inventory(&mut self, items: &[String]);
    fn set_inventory_visible(&mut self, visible: bool);
    fn show_dialogue(&mut self, view: &DialogueView);
    fn hide_dialogue(&mut self);
    fn push_log(&mut self, line: &str);
    fn show_end_screen(&mut self, screen: &EndScreen);
}

#[cfg_attr(test, mockall::automock)]
pub trait AudioSink {
    fn play(&mut self, tone: ToneRequest);
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn set_sanity(&mut self, _value: f32, _band: SanityBand) {}
    fn set_clock(&mut self, _label: &str, _band: DayBand) {}
    fn set_location(&mut self, _label: &str) {}
    fn set_inventory(&mut self, _items: &[String]) {}
    fn set_inventory_visible(&mut self, _visible: bool) {}
    fn show_dialogue(&mut self, _view: &DialogueView) {}
    fn hide_dialogue(&mut self) {}
    fn push_log(&mut self, _line: &str) {}
    fn show_end_screen(&mut self, _screen: &EndScreen) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _tone: ToneRequest) {}
}

/// Audio backend for hosts without sound: every request becomes a trace event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingAudio;

impl AudioSink for TracingAudio {
    fn play(&mut self, tone: ToneRequest) {
        trace!(
            frequency = tone.frequency,
            waveform = ?tone.waveform,
            volume = tone.volume,
            duration = tone.duration,
            "tone"
        );
    }
}

/// Keeps the latest pushed state and a transcript of every dialogue line and
/// end screen. Used for scripted replays where no terminal is attached.
#[derive(Clone, Debug, Default)]
pub struct HeadlessPresenter {
    pub sanity: f32,
    pub sanity_band: Option<SanityBand>,
    pub clock: String,
    pub location: String,
    pub inventory: Vec<String>,
    pub inventory_visible: bool,
    pub dialogue: Option<String>,
    pub transcript: Vec<String>,
    pub log: Vec<String>,
    pub end_screens: Vec<EndScreen>,
}

impl Presenter for HeadlessPresenter {
    fn set_sanity(&mut self, value: f32, band: SanityBand) {
        self.sanity = value;
        self.sanity_band = Some(band);
    }

    fn set_clock(&mut self, label: &str, _band: DayBand) {
        self.clock.clear();
        self.clock.push_str(label);
    }

    fn set_location(&mut self, label: &str) {
        self.location = label.to_string();
    }

    fn set_inventory(&mut self, items: &[String]) {
        self.inventory = items.to_vec();
    }

    fn set_inventory_visible(&mut self, visible: bool) {
        self.inventory_visible = visible;
    }

    fn show_dialogue(&mut self, view: &DialogueView) {
        if view.complete && self.dialogue.as_deref() != Some(view.line.as_str()) {
            self.transcript.push(view.line.clone());
            self.dialogue = Some(view.line.clone());
        }
    }

    fn hide_dialogue(&mut self) {
        self.dialogue = None;
    }

    fn push_log(&mut self, line: &str) {
        self.log.push(line.to_string());
    }

    fn show_end_screen(&mut self, screen: &EndScreen) {
        debug!(title = %screen.title, "end screen");
        self.end_screens.push(screen.clone());
    }
}
