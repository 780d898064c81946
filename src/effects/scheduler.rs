//! Decides, frame by frame, which horror effect fires next.
//!
//! Every trigger and pick reads the deterministic field at the current
//! elapsed time. Each family (sanity band, night, witching hour, ambient,
//! weather) has its own cooldown.

use serde::Serialize;
use tracing::{debug, warn};

use super::{Apparition, Cue, EffectKind, Hallucination, Overlay, Tint, TransientEffect};
use crate::{
    clock::{DayBand, SanityBand},
    data::narrative::{
        CHORUS, FALSE_EXIT, ICE_COLD, LOST_TIME, MIRROR_SELF, PHANTOM_PERSON, VANISHING_OBJECT,
        WHISPERS,
    },
    field,
    game::deferred::DeferredAction,
    map::Vec2,
    ports::{ToneRequest, Waveform},
};

pub const MAX_EFFECTS: usize = 10;
pub const MAX_HALLUCINATIONS: usize = 3;

const FRACTURED_COOLDOWN: f64 = 3.0;
const UNEASY_COOLDOWN: f64 = 8.0;
const NIGHT_COOLDOWN: f64 = 12.0;
const WITCHING_COOLDOWN: f64 = 10.0;
const AMBIENT_COOLDOWN: f64 = 20.0;
const WEATHER_COOLDOWN: f64 = 30.0;

const BASE_FOG: f32 = 0.1;
const FOG_RELAX_PER_SECOND: f32 = 0.05;
const WEATHER_DECAY_PER_SECOND: f32 = 0.02;

const FRACTURED_OPTIONS: usize = 7;
const UNEASY_OPTIONS: usize = 5;
const HALLUCINATION_OPTIONS: usize = 5;
const NIGHT_OPTIONS: usize = 4;
const WITCHING_OPTIONS: usize = 4;
const AMBIENT_OPTIONS: usize = 5;
const WEATHER_OPTIONS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Family {
    Fractured,
    Uneasy,
    Hallucination,
    Night,
    Witching,
    Ambient,
    Weather,
}

/// The most recent pick, kept for replays and diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Selection {
    pub family: Family,
    pub index: usize,
    pub time: f64,
}

/// Everything the scheduler reads in one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectContext {
    pub dt: f64,
    pub time: f64,
    pub hours: f64,
    pub sanity: f32,
    pub player: Vec2,
    /// Critical zones and ended games: existing effects age, nothing new fires.
    pub suppressed: bool,
}

/// World-wide darkening and fog, derived each frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Atmosphere {
    pub night_alpha: f32,
    pub fog_alpha: f32,
    pub distortion: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct LastFired {
    sanity: f64,
    night: f64,
    witching: f64,
    ambient: f64,
    weather: f64,
}

fn ready(last: f64, now: f64, cooldown: f64) -> bool {
    now - last > cooldown
}

#[derive(Clone, Debug, PartialEq)]
pub struct HorrorEffects {
    effects: Vec<TransientEffect>,
    hallucinations: Vec<Hallucination>,
    ambient_timer: f64,
    hallucination_cooldown: f64,
    last: LastFired,
    distortion: f32,
    fog_intensity: f32,
    weather_intensity: f32,
    triggered: u64,
    last_selection: Option<Selection>,
}

impl Default for HorrorEffects {
    fn default() -> Self {
        Self {
            effects: Vec::new(),
            hallucinations: Vec::new(),
            ambient_timer: 0.0,
            hallucination_cooldown: 0.0,
            last: LastFired::default(),
            distortion: 0.0,
            fog_intensity: BASE_FOG,
            weather_intensity: 0.0,
            triggered: 0,
            last_selection: None,
        }
    }
}

impl HorrorEffects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, ctx: &EffectContext) -> Vec<Cue> {
        let mut cues = Vec::new();
        self.ambient_timer += ctx.dt;
        self.hallucination_cooldown -= ctx.dt;
        self.age(ctx.dt);
        self.distortion = (100.0 - ctx.sanity.clamp(0.0, 100.0)) / 100.0 * 0.3;
        self.relax(ctx.dt as f32);

        if !ctx.suppressed {
            self.sanity_band(ctx, &mut cues);
            self.time_band(ctx, &mut cues);
            self.ambient(ctx, &mut cues);
            self.weather(ctx, &mut cues);
        }
        self.trim();
        cues
    }

    /// Adds a full-screen flash, as interactions and lightning do.
    pub fn screen_flash(&mut self, tint: Tint, intensity: f32, duration: f64) {
        self.push(EffectKind::Flash { tint, intensity }, duration);
    }

    pub fn push(&mut self, kind: EffectKind, duration: f64) {
        self.effects.push(TransientEffect::new(kind, duration));
        self.trim();
    }

    pub fn effects(&self) -> &[TransientEffect] {
        &self.effects
    }

    pub fn hallucinations(&self) -> &[Hallucination] {
        &self.hallucinations
    }

    pub fn overlays(&self) -> Vec<Overlay> {
        self.effects
            .iter()
            .filter_map(TransientEffect::overlay)
            .collect()
    }

    pub fn atmosphere(&self, hours: f64, sanity: f32) -> Atmosphere {
        let night_alpha = if hours > 20.0 || hours < 6.0 {
            if sanity < 50.0 { 0.5 } else { 0.3 }
        } else {
            0.0
        };
        let swirl = (self.ambient_timer * 0.3).sin() as f32 * 0.05;
        Atmosphere {
            night_alpha,
            fog_alpha: (self.fog_intensity + swirl).clamp(0.0, 1.0),
            distortion: self.distortion,
        }
    }

    pub fn distortion(&self) -> f32 {
        self.distortion
    }

    pub fn fog_intensity(&self) -> f32 {
        self.fog_intensity
    }

    pub fn weather_intensity(&self) -> f32 {
        self.weather_intensity
    }

    pub fn triggered(&self) -> u64 {
        self.triggered
    }

    pub fn last_selection(&self) -> Option<Selection> {
        self.last_selection
    }

    fn age(&mut self, dt: f64) {
        self.effects.retain_mut(|effect| match effect.update(dt) {
            Ok(()) => effect.active,
            Err(err) => {
                warn!(%err, "dropping transient effect");
                false
            }
        });
        for hallucination in &mut self.hallucinations {
            hallucination.life -= dt;
        }
        self.hallucinations.retain(|h| h.life > 0.0);
    }

    fn relax(&mut self, dt: f32) {
        let step = FOG_RELAX_PER_SECOND * dt;
        if self.fog_intensity > BASE_FOG {
            self.fog_intensity = (self.fog_intensity - step).max(BASE_FOG);
        } else {
            self.fog_intensity = (self.fog_intensity + step).min(BASE_FOG);
        }
        self.weather_intensity = (self.weather_intensity - WEATHER_DECAY_PER_SECOND * dt).max(0.0);
    }

    /// Oldest first.
    fn trim(&mut self) {
        if self.effects.len() > MAX_EFFECTS {
            let excess = self.effects.len() - MAX_EFFECTS;
            self.effects.drain(..excess);
        }
        if self.hallucinations.len() > MAX_HALLUCINATIONS {
            let excess = self.hallucinations.len() - MAX_HALLUCINATIONS;
            self.hallucinations.drain(..excess);
        }
    }

    fn note(&mut self, family: Family, index: usize, time: f64) {
        debug!(?family, index, time, "horror effect");
        self.triggered += 1;
        self.last_selection = Some(Selection {
            family,
            index,
            time,
        });
    }

    fn sanity_band(&mut self, ctx: &EffectContext, cues: &mut Vec<Cue>) {
        let t = ctx.time;
        let since = t - self.last.sanity;
        match SanityBand::of(ctx.sanity) {
            SanityBand::Fractured => {
                if field::sin01(t, 0.5) > 0.7 && since > FRACTURED_COOLDOWN {
                    let index = field::select_sin(t, 0.73, FRACTURED_OPTIONS);
                    self.fractured(index, ctx, cues);
                    self.last.sanity = t;
                    self.note(Family::Fractured, index, t);
                }
                if field::cos01(t, 0.3) > 0.9 && self.hallucination_cooldown <= 0.0 {
                    self.hallucinate(ctx, cues);
                    self.hallucination_cooldown = 5.0 + ((t * 0.2).sin() + 1.0) * 5.0;
                }
            }
            SanityBand::Uneasy => {
                if field::sin01(t, 0.2) > 0.85 && since > UNEASY_COOLDOWN {
                    let index = field::select_cos(t, 0.67, UNEASY_OPTIONS);
                    self.uneasy(index, cues);
                    self.last.sanity = t;
                    self.note(Family::Uneasy, index, t);
                }
            }
            SanityBand::Steady => {}
        }
    }

    fn fractured(&mut self, index: usize, ctx: &EffectContext, cues: &mut Vec<Cue>) {
        let t = ctx.time;
        match index {
            0 => self.screen_flash(Tint::Red, 0.3, 0.1),
            1 => cues.push(Cue::Shake(15.0)),
            2 => self.push(EffectKind::Noise { intensity: 0.4 }, 2.0),
            3 => {
                cues.push(Cue::Tone(ToneRequest::whisper(200.0, 0.3)));
                let whisper = WHISPERS[field::select_sin(t, 1.37, WHISPERS.len())];
                cues.push(Cue::Thought(whisper));
            }
            4 => {
                let (x, y) = (f64::from(ctx.player.x), f64::from(ctx.player.y));
                let dir = Vec2::from_angle(field::heading(x, y, t, 4) as f32);
                let reach = field::range(field::spatial(x, y, t, 5), 100.0, 300.0) as f32;
                cues.push(Cue::SpawnMovingShadow {
                    from: ctx.player + dir * reach,
                    to: ctx.player - dir * reach,
                });
            }
            5 => self.push(EffectKind::Blindness, 0.5),
            _ => self.push(EffectKind::Pulse { tint: Tint::Maroon }, 2.0),
        }
    }

    fn uneasy(&mut self, index: usize, cues: &mut Vec<Cue>) {
        match index {
            0 => self.screen_flash(Tint::Yellow, 0.1, 0.05),
            1 => cues.push(Cue::Shake(5.0)),
            2 => self.push(EffectKind::Noise { intensity: 0.1 }, 1.0),
            3 => cues.push(Cue::Tone(ToneRequest::whisper(150.0, 0.1))),
            _ => cues.push(Cue::Shake(2.0)),
        }
    }

    fn hallucinate(&mut self, ctx: &EffectContext, cues: &mut Vec<Cue>) {
        let t = ctx.time;
        let seed = t * 0.89 + f64::from(100.0 - ctx.sanity) * 0.01;
        let index = field::pick(field::unit(seed.sin()), HALLUCINATION_OPTIONS);
        let (x, y) = (f64::from(ctx.player.x), f64::from(ctx.player.y));
        let dir = Vec2::from_angle(field::heading(x, y, t, 9) as f32);
        let d = field::spatial(x, y, t, 10);
        let l = field::spatial(x, y, t, 11);

        let (kind, reach, life, opacity, thought) = match index {
            0 => (
                Apparition::PhantomPerson,
                (150.0, 250.0),
                (2.0, 5.0),
                0.55,
                PHANTOM_PERSON,
            ),
            1 => (
                Apparition::VanishingObject,
                (80.0, 140.0),
                (3.0, 5.0),
                0.6,
                VANISHING_OBJECT,
            ),
            2 => (
                Apparition::FalseExit,
                (100.0, 180.0),
                (4.0, 7.0),
                0.7,
                FALSE_EXIT,
            ),
            3 => (
                Apparition::MirrorSelf,
                (120.0, 220.0),
                (3.0, 5.0),
                0.5,
                MIRROR_SELF,
            ),
            _ => {
                self.screen_flash(Tint::White, 0.8, 0.1);
                cues.push(Cue::SkipClock(field::range(d, 0.1, 0.3)));
                cues.push(Cue::Thought(LOST_TIME));
                self.note(Family::Hallucination, index, t);
                return;
            }
        };
        let distance = field::range(d, reach.0, reach.1) as f32;
        self.hallucinations.push(Hallucination {
            kind,
            position: ctx.player + dir * distance,
            life: field::range(l, life.0, life.1),
            opacity,
        });
        cues.push(Cue::Thought(thought));
        self.note(Family::Hallucination, index, t);
    }

    fn time_band(&mut self, ctx: &EffectContext, cues: &mut Vec<Cue>) {
        let t = ctx.time;
        if (3.0..=4.0).contains(&ctx.hours)
            && field::cos01(t, 0.07) > 0.9
            && ready(self.last.witching, t, WITCHING_COOLDOWN)
        {
            let index = field::select_cos(t, 0.37, WITCHING_OPTIONS);
            self.witching(index, cues);
            cues.push(Cue::SanityLoss(1.0));
            self.last.witching = t;
            self.note(Family::Witching, index, t);
        }
        if DayBand::at(ctx.hours) == DayBand::Night
            && field::sin01(t, 0.1) > 0.95
            && ready(self.last.night, t, NIGHT_COOLDOWN)
        {
            let index = field::select_sin(t, 0.43, NIGHT_OPTIONS);
            self.night(index, cues);
            self.last.night = t;
            self.note(Family::Night, index, t);
        }
    }

    fn night(&mut self, index: usize, cues: &mut Vec<Cue>) {
        match index {
            0 => self.fog_intensity = (self.fog_intensity + 0.3).min(1.0),
            1 => cues.push(Cue::Tone(ToneRequest::sine(400.0, 0.1, 0.4))),
            2 => self.screen_flash(Tint::Lamp, 0.2, 0.3),
            _ => self.push(EffectKind::ShadowLengthen, 2.0),
        }
    }

    fn witching(&mut self, index: usize, cues: &mut Vec<Cue>) {
        match index {
            0 => {
                self.screen_flash(Tint::Lamp, 0.2, 0.3);
                self.screen_flash(Tint::Lamp, 0.1, 0.2);
            }
            1 => {
                self.push(EffectKind::TemperatureDrop, 3.0);
                cues.push(Cue::Thought(ICE_COLD));
            }
            2 => {
                for frequency in [180.0, 220.0, 260.0] {
                    cues.push(Cue::Tone(ToneRequest::whisper(frequency, 0.15)));
                }
                cues.push(Cue::Thought(CHORUS));
            }
            _ => self.push(EffectKind::RealityDistortion, 2.0),
        }
    }

    fn ambient(&mut self, ctx: &EffectContext, cues: &mut Vec<Cue>) {
        let t = ctx.time;
        if !(field::sin01(t, 0.05) > 0.98 && ready(self.last.ambient, t, AMBIENT_COOLDOWN)) {
            return;
        }
        let index = field::select_sin(t, 0.67, AMBIENT_OPTIONS);
        match index {
            0 => cues.push(Cue::Tone(ToneRequest::sine(800.0, 0.1, 0.3))),
            1 => cues.push(Cue::Tone(ToneRequest::new(80.0, Waveform::Sawtooth, 0.2, 2.0))),
            2 => cues.push(Cue::Tone(ToneRequest::sine(60.0, 0.15, 1.5))),
            3 => cues.push(Cue::Shake(3.0)),
            _ => self.fog_intensity = (self.fog_intensity + 0.1).min(0.8),
        }
        self.last.ambient = t;
        self.note(Family::Ambient, index, t);
    }

    fn weather(&mut self, ctx: &EffectContext, cues: &mut Vec<Cue>) {
        let t = ctx.time;
        if !(field::cos01(t, 0.03) > 0.99 && ready(self.last.weather, t, WEATHER_COOLDOWN)) {
            return;
        }
        let index = field::select_sin(t, 1.13, WEATHER_OPTIONS);
        match index {
            0 => self.weather_intensity = (self.weather_intensity + 0.3).min(1.0),
            1 => cues.push(Cue::Shake(2.0)),
            2 => self.fog_intensity = (self.fog_intensity + 0.2).min(1.0),
            _ => {
                self.screen_flash(Tint::White, 0.7, 0.05);
                cues.push(Cue::Defer {
                    delay: 0.08,
                    action: DeferredAction::SecondFlash,
                });
                cues.push(Cue::Defer {
                    delay: t.sin() * 0.8 + 1.2,
                    action: DeferredAction::Thunder,
                });
            }
        }
        self.last.weather = t;
        self.note(Family::Weather, index, t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(time: f64, hours: f64, sanity: f32) -> EffectContext {
        EffectContext {
            dt: 1.0 / 60.0,
            time,
            hours,
            sanity,
            player: Vec2::new(1000.0, 400.0),
            suppressed: false,
        }
    }

    fn run(effects: &mut HorrorEffects, seconds: f64, hours: f64, sanity: f32) -> Vec<Cue> {
        let mut cues = Vec::new();
        let frames = (seconds * 60.0) as usize;
        for frame in 0..frames {
            cues.extend(effects.update(&ctx(frame as f64 / 60.0, hours, sanity)));
        }
        cues
    }

    #[test]
    fn test_caps_hold_under_pressure() {
        let mut effects = HorrorEffects::new();
        for _ in 0..25 {
            effects.screen_flash(Tint::Red, 0.5, 10.0);
        }
        assert_eq!(effects.effects().len(), MAX_EFFECTS);
        run(&mut effects, 120.0, 3.5, 5.0);
        assert!(effects.effects().len() <= MAX_EFFECTS);
        assert!(effects.hallucinations().len() <= MAX_HALLUCINATIONS);
    }

    #[test]
    fn test_steady_daytime_is_quiet() {
        let mut effects = HorrorEffects::new();
        let cues = run(&mut effects, 20.0, 12.0, 95.0);
        assert!(cues.is_empty());
        assert_eq!(effects.triggered(), 0);
    }

    #[test]
    fn test_fractured_mind_triggers_effects() {
        let mut effects = HorrorEffects::new();
        run(&mut effects, 60.0, 12.0, 10.0);
        assert!(effects.triggered() > 0);
    }

    #[test]
    fn test_suppressed_frames_only_age() {
        let mut effects = HorrorEffects::new();
        effects.screen_flash(Tint::White, 0.5, 0.5);
        for frame in 0..120 {
            let mut c = ctx(frame as f64 / 60.0, 3.5, 5.0);
            c.suppressed = true;
            assert!(effects.update(&c).is_empty());
        }
        assert!(effects.effects().is_empty());
        assert_eq!(effects.triggered(), 0);
    }

    #[test]
    fn test_same_inputs_same_choices() {
        let mut a = HorrorEffects::new();
        let mut b = HorrorEffects::new();
        let cues_a = run(&mut a, 90.0, 23.0, 20.0);
        let cues_b = run(&mut b, 90.0, 23.0, 20.0);
        assert_eq!(cues_a, cues_b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_distortion_tracks_sanity() {
        let mut effects = HorrorEffects::new();
        effects.update(&ctx(0.0, 12.0, 50.0));
        assert!((effects.distortion() - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_night_darkens_more_when_shaken() {
        let effects = HorrorEffects::new();
        assert_eq!(effects.atmosphere(23.0, 80.0).night_alpha, 0.3);
        assert_eq!(effects.atmosphere(23.0, 40.0).night_alpha, 0.5);
        assert_eq!(effects.atmosphere(12.0, 40.0).night_alpha, 0.0);
    }

    #[test]
    fn test_invalid_effect_is_dropped() {
        let mut effects = HorrorEffects::new();
        effects.push(EffectKind::Blindness, -1.0);
        effects.update(&ctx(0.0, 12.0, 100.0));
        assert!(effects.effects().is_empty());
    }
}
