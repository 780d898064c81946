//! Screen-space horror: short timed overlays, hallucinations, and the
//! scheduler that decides when they happen.

pub mod scheduler;

use serde::Serialize;

use crate::{
    error::EffectError, field, game::deferred::DeferredAction, map::Vec2, ports::ToneRequest,
};

pub use scheduler::{Atmosphere, EffectContext, HorrorEffects, Selection};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Tint {
    Red,
    Black,
    Yellow,
    Lamp,
    White,
    PaleBlue,
    Maroon,
    Frost,
}

impl Tint {
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Tint::Red => (255, 0, 0),
            Tint::Black => (0, 0, 0),
            Tint::Yellow => (255, 255, 0),
            Tint::Lamp => (255, 200, 100),
            Tint::White => (255, 255, 255),
            Tint::PaleBlue => (100, 100, 255),
            Tint::Maroon => (128, 0, 0),
            Tint::Frost => (200, 220, 255),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum EffectKind {
    Flash { tint: Tint, intensity: f32 },
    Noise { intensity: f32 },
    Blindness,
    Pulse { tint: Tint },
    ShadowLengthen,
    TemperatureDrop,
    RealityDistortion,
    FinalFade,
}

impl EffectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectKind::Flash { .. } => "flash",
            EffectKind::Noise { .. } => "noise",
            EffectKind::Blindness => "blindness",
            EffectKind::Pulse { .. } => "pulse",
            EffectKind::ShadowLengthen => "shadow_lengthen",
            EffectKind::TemperatureDrop => "temperature_drop",
            EffectKind::RealityDistortion => "reality_distortion",
            EffectKind::FinalFade => "final_fade",
        }
    }
}

/// How an overlay covers the screen.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum Pattern {
    Fill,
    /// Scattered specks, reseeded from the elapsed time.
    Static { seed: f64 },
    /// Long shadows reaching down from the top of the screen.
    Columns,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Overlay {
    pub tint: Tint,
    pub alpha: f32,
    pub pattern: Pattern,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TransientEffect {
    pub kind: EffectKind,
    pub elapsed: f64,
    pub duration: f64,
    pub active: bool,
}

impl TransientEffect {
    pub fn new(kind: EffectKind, duration: f64) -> Self {
        Self {
            kind,
            elapsed: 0.0,
            duration,
            active: true,
        }
    }

    /// Fraction of the lifetime used, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Ages the effect. A malformed effect is reported instead of drawn.
    pub fn update(&mut self, dt: f64) -> Result<(), EffectError> {
        let kind = self.kind.as_str();
        if !self.duration.is_finite() || self.duration <= 0.0 {
            self.active = false;
            return Err(EffectError::InvalidDuration {
                kind,
                duration: self.duration,
            });
        }
        if !dt.is_finite() {
            self.active = false;
            return Err(EffectError::NonFinite { kind });
        }
        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.active = false;
        }
        Ok(())
    }

    /// What the effect looks like right now. Pure.
    pub fn overlay(&self) -> Option<Overlay> {
        let p = self.progress() as f32;
        let fade = 1.0 - p;
        let e = self.elapsed;
        let (tint, alpha, pattern) = match self.kind {
            EffectKind::Flash { tint, intensity } => {
                (tint, (intensity * fade).max(0.0), Pattern::Fill)
            }
            EffectKind::Noise { intensity } => (
                Tint::White,
                intensity * fade,
                Pattern::Static { seed: e },
            ),
            EffectKind::Blindness => (Tint::Black, 0.9 * fade, Pattern::Fill),
            EffectKind::Pulse { tint } => (
                tint,
                field::sin01(e, 8.0) as f32 * 0.2 * fade,
                Pattern::Fill,
            ),
            EffectKind::ShadowLengthen => (Tint::Black, 0.3 * fade, Pattern::Columns),
            EffectKind::TemperatureDrop => (
                Tint::Frost,
                (0.2 * (e * 5.0).sin() as f32 * fade).abs(),
                Pattern::Fill,
            ),
            EffectKind::RealityDistortion => {
                let wave = 0.3 * (e * 10.0).sin() as f32 * fade;
                if wave.abs() <= 0.1 {
                    return None;
                }
                let tint = if wave > 0.0 { Tint::Red } else { Tint::PaleBlue };
                (tint, wave.abs(), Pattern::Fill)
            }
            EffectKind::FinalFade => (Tint::Black, (p * 0.95).min(0.95), Pattern::Fill),
        };
        if alpha > 0.001 {
            Some(Overlay {
                tint,
                alpha: alpha.min(1.0),
                pattern,
            })
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Apparition {
    PhantomPerson,
    VanishingObject,
    FalseExit,
    MirrorSelf,
}

/// Something that is not there, drawn at a world position until it fades.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Hallucination {
    pub kind: Apparition,
    pub position: Vec2,
    pub life: f64,
    pub opacity: f32,
}

impl Hallucination {
    /// Opacity, fading out over the final second.
    pub fn alpha(&self) -> f32 {
        self.opacity * self.life.clamp(0.0, 1.0) as f32
    }
}

/// Side effects the scheduler asks the game to carry out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Cue {
    Shake(f32),
    SanityLoss(f32),
    Thought(&'static str),
    Tone(ToneRequest),
    SpawnMovingShadow { from: Vec2, to: Vec2 },
    SkipClock(f64),
    Defer { delay: f64, action: DeferredAction },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_fades_linearly() {
        let mut flash = TransientEffect::new(
            EffectKind::Flash {
                tint: Tint::Red,
                intensity: 0.6,
            },
            1.0,
        );
        assert_eq!(flash.overlay().map(|o| o.alpha), Some(0.6));
        flash.update(0.5).unwrap();
        let half = flash.overlay().unwrap().alpha;
        assert!((half - 0.3).abs() < 1e-6);
        flash.update(0.5).unwrap();
        assert!(!flash.active);
        assert!(flash.overlay().is_none());
    }

    #[test]
    fn test_final_fade_caps_below_black() {
        let mut fade = TransientEffect::new(EffectKind::FinalFade, 2.0);
        fade.update(5.0).unwrap();
        assert_eq!(fade.overlay().unwrap().alpha, 0.95);
    }

    #[test]
    fn test_bad_duration_is_an_error() {
        let mut broken = TransientEffect::new(EffectKind::Blindness, f64::NAN);
        assert!(matches!(
            broken.update(0.1),
            Err(EffectError::InvalidDuration { kind: "blindness", .. })
        ));
        assert!(!broken.active);
    }

    #[test]
    fn test_distortion_hides_small_waves() {
        let distortion = TransientEffect::new(EffectKind::RealityDistortion, 2.0);
        assert!(distortion.overlay().is_none());
    }

    #[test]
    fn test_hallucination_fades_in_last_second() {
        let mut ghost = Hallucination {
            kind: Apparition::MirrorSelf,
            position: Vec2::ZERO,
            life: 3.0,
            opacity: 0.5,
        };
        assert_eq!(ghost.alpha(), 0.5);
        ghost.life = 0.5;
        assert_eq!(ghost.alpha(), 0.25);
    }
}
