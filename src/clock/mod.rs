//! Game clock and the sanity meter it drives.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::field;

pub const MAX_SANITY: f32 = 100.0;
pub const START_HOUR: f64 = 18.5;
/// One real second advances the clock by one game minute.
pub const HOURS_PER_SECOND: f64 = 1.0 / 60.0;
pub const MEDITATION_HOURS: f64 = 0.25;
pub const MEDITATION_GAIN_MIN: f32 = 12.0;
pub const MEDITATION_GAIN_MAX: f32 = 19.0;
pub const CALM_CEILING: f32 = 95.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DayBand {
    Dawn,
    Day,
    Dusk,
    Night,
}

impl DayBand {
    pub fn at(hours: f64) -> Self {
        if hours >= 22.0 || hours < 6.0 {
            DayBand::Night
        } else if hours <= 8.0 {
            DayBand::Dawn
        } else if (10.0..=16.0).contains(&hours) {
            DayBand::Day
        } else {
            DayBand::Dusk
        }
    }

    pub fn status(self) -> &'static str {
        match self {
            DayBand::Dawn => " (Dawn - Slowly Healing)",
            DayBand::Day => " (Daylight - Healing)",
            DayBand::Dusk => "",
            DayBand::Night => " (Night - Losing Sanity)",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SanityBand {
    Fractured,
    Uneasy,
    Steady,
}

impl SanityBand {
    pub fn of(sanity: f32) -> Self {
        if sanity < 30.0 {
            SanityBand::Fractured
        } else if sanity < 60.0 {
            SanityBand::Uneasy
        } else {
            SanityBand::Steady
        }
    }
}

/// Passive drift per real second, by band. Night drains, dawn and day heal.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftRates {
    pub night: f32,
    pub dawn: f32,
    pub day: f32,
}

impl Default for DriftRates {
    fn default() -> Self {
        Self {
            night: 0.2,
            dawn: 0.3,
            day: 0.1,
        }
    }
}

impl DriftRates {
    pub fn per_second(&self, band: DayBand) -> f32 {
        match band {
            DayBand::Night => -self.night,
            DayBand::Dawn => self.dawn,
            DayBand::Day => self.day,
            DayBand::Dusk => 0.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MeditationRefusal {
    #[error("too dark to meditate")]
    TooDark,
    #[error("already calm")]
    AlreadyCalm,
    #[error("unsafe place to rest")]
    UnsafeLocation,
    /// Dialogue or an end screen is up.
    #[error("busy")]
    Busy,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SanityClock {
    sanity: f32,
    elapsed: f64,
    hours: f64,
    rates: DriftRates,
}

impl Default for SanityClock {
    fn default() -> Self {
        Self::new(START_HOUR, MAX_SANITY, DriftRates::default())
    }
}

impl SanityClock {
    pub fn new(start_hour: f64, sanity: f32, rates: DriftRates) -> Self {
        Self {
            sanity: sanity.clamp(0.0, MAX_SANITY),
            elapsed: 0.0,
            hours: wrap_hours(start_hour),
            rates,
        }
    }

    pub fn sanity(&self) -> f32 {
        self.sanity
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn hours(&self) -> f64 {
        self.hours
    }

    pub fn day_band(&self) -> DayBand {
        DayBand::at(self.hours)
    }

    pub fn sanity_band(&self) -> SanityBand {
        SanityBand::of(self.sanity)
    }

    pub fn is_depleted(&self) -> bool {
        self.sanity <= 0.0
    }

    /// Moves real and game time forward. Sanity is untouched.
    pub fn advance(&mut self, dt: f64) {
        self.elapsed += dt;
        self.hours = wrap_hours(self.hours + dt * HOURS_PER_SECOND);
    }

    /// Applies the current band's passive drift; returns the signed change.
    pub fn apply_drift(&mut self, dt: f64) -> f32 {
        let rate = self.rates.per_second(self.day_band());
        let delta = rate * dt as f32;
        if delta < 0.0 {
            -self.decrease(-delta)
        } else {
            self.increase(delta)
        }
    }

    /// Returns the amount actually removed.
    pub fn decrease(&mut self, amount: f32) -> f32 {
        let before = self.sanity;
        self.sanity = (self.sanity - amount.max(0.0)).clamp(0.0, MAX_SANITY);
        before - self.sanity
    }

    /// Returns the amount actually restored.
    pub fn increase(&mut self, amount: f32) -> f32 {
        let before = self.sanity;
        self.sanity = (self.sanity + amount.max(0.0)).clamp(0.0, MAX_SANITY);
        self.sanity - before
    }

    pub fn skip_hours(&mut self, hours: f64) {
        self.hours = wrap_hours(self.hours + hours);
    }

    pub fn can_meditate(&self, unsafe_location: bool) -> Result<(), MeditationRefusal> {
        if self.hours < 6.0 || self.hours > 21.0 {
            return Err(MeditationRefusal::TooDark);
        }
        if self.sanity >= CALM_CEILING {
            return Err(MeditationRefusal::AlreadyCalm);
        }
        if unsafe_location {
            return Err(MeditationRefusal::UnsafeLocation);
        }
        Ok(())
    }

    /// Quiet meditation. On success returns the rolled gain and advances the
    /// clock by a quarter hour; refusals leave every field untouched.
    pub fn meditate(&mut self, unsafe_location: bool) -> Result<f32, MeditationRefusal> {
        self.can_meditate(unsafe_location)?;
        let roll = field::spatial(self.hours * 60.0, f64::from(self.sanity), self.elapsed, 12);
        let spread = MEDITATION_GAIN_MAX - MEDITATION_GAIN_MIN + 1.0;
        let gain = (MEDITATION_GAIN_MIN + (roll as f32 * spread).floor()).min(MEDITATION_GAIN_MAX);
        self.increase(gain);
        self.skip_hours(MEDITATION_HOURS);
        Ok(gain)
    }

    /// `HH:MM` of the game clock.
    pub fn clock_label(&self) -> String {
        let hours = self.hours.floor() as u32;
        let minutes = ((self.hours - self.hours.floor()) * 60.0).floor() as u32;
        format!("{hours:02}:{minutes:02}")
    }

    /// Darkness applied over the whole scene by time of day.
    pub fn time_alpha(&self) -> f32 {
        if (6.0..=18.0).contains(&self.hours) {
            0.2
        } else {
            (0.3 + (1.0 - self.sanity / MAX_SANITY) * 0.5).min(0.8)
        }
    }
}

fn wrap_hours(hours: f64) -> f64 {
    let wrapped = hours.rem_euclid(24.0);
    if wrapped >= 24.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_follow_the_clock() {
        assert_eq!(DayBand::at(2.0), DayBand::Night);
        assert_eq!(DayBand::at(22.0), DayBand::Night);
        assert_eq!(DayBand::at(6.0), DayBand::Dawn);
        assert_eq!(DayBand::at(8.0), DayBand::Dawn);
        assert_eq!(DayBand::at(9.0), DayBand::Dusk);
        assert_eq!(DayBand::at(12.0), DayBand::Day);
        assert_eq!(DayBand::at(18.5), DayBand::Dusk);
    }

    #[test]
    fn test_clock_wraps_past_midnight() {
        let mut clock = SanityClock::new(23.9, 80.0, DriftRates::default());
        clock.advance(12.0);
        assert!(clock.hours() < 1.0);
        assert!((clock.hours() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_decrease_clamps_to_zero() {
        let mut clock = SanityClock::default();
        let removed = clock.decrease(150.0);
        assert_eq!(removed, 100.0);
        assert_eq!(clock.sanity(), 0.0);
        assert!(clock.is_depleted());
    }

    #[test]
    fn test_night_drift_drains() {
        let mut clock = SanityClock::new(23.0, 50.0, DriftRates::default());
        let delta = clock.apply_drift(10.0);
        assert!((delta + 2.0).abs() < 1e-5);
        assert!((clock.sanity() - 48.0).abs() < 1e-5);
    }

    #[test]
    fn test_dusk_has_no_drift() {
        let mut clock = SanityClock::new(18.5, 50.0, DriftRates::default());
        assert_eq!(clock.apply_drift(5.0), 0.0);
        assert_eq!(clock.sanity(), 50.0);
    }

    #[test]
    fn test_meditation_by_day() {
        let mut clock = SanityClock::new(12.0, 50.0, DriftRates::default());
        let gain = clock.meditate(false).unwrap();
        assert!((MEDITATION_GAIN_MIN..=MEDITATION_GAIN_MAX).contains(&gain));
        assert_eq!(clock.sanity(), 50.0 + gain);
        assert!((clock.hours() - 12.25).abs() < 1e-9);
    }

    #[test]
    fn test_meditation_refusals_have_no_side_effects() {
        let mut night = SanityClock::new(2.0, 50.0, DriftRates::default());
        let before = night.clone();
        assert_eq!(night.meditate(false), Err(MeditationRefusal::TooDark));
        assert_eq!(night, before);

        let mut calm = SanityClock::new(12.0, 96.0, DriftRates::default());
        assert_eq!(calm.meditate(false), Err(MeditationRefusal::AlreadyCalm));

        let mut wet = SanityClock::new(12.0, 50.0, DriftRates::default());
        assert_eq!(wet.meditate(true), Err(MeditationRefusal::UnsafeLocation));
        assert_eq!(wet.sanity(), 50.0);
    }

    #[test]
    fn test_clock_label() {
        let clock = SanityClock::new(18.5, 100.0, DriftRates::default());
        assert_eq!(clock.clock_label(), "18:30");
    }

    #[test]
    fn test_time_alpha_darkens_with_madness() {
        let day = SanityClock::new(12.0, 10.0, DriftRates::default());
        assert_eq!(day.time_alpha(), 0.2);
        let night = SanityClock::new(23.0, 0.0, DriftRates::default());
        assert_eq!(night.time_alpha(), 0.8);
    }
}
