//! Time-of-day singleton
//!
//! Advances a wall-clock-like hour value and derives the discrete day phase
//! plus the lighting/fog parameters the render collaborator reads.

use serde::{Deserialize, Serialize};

/// Discrete phase of the day, a pure function of the hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayPhase {
    /// 05:00-07:00
    Dawn,
    /// 07:00-17:00
    Day,
    /// 17:00-19:00
    Dusk,
    /// 19:00-05:00 (wraps midnight)
    Night,
}

impl DayPhase {
    pub fn from_hour(hour: f32) -> Self {
        match hour {
            h if (5.0..7.0).contains(&h) => Self::Dawn,
            h if (7.0..17.0).contains(&h) => Self::Day,
            h if (17.0..19.0).contains(&h) => Self::Dusk,
            _ => Self::Night,
        }
    }

    /// Ambient light level for this phase (0.0-1.0)
    pub fn light_level(&self) -> f32 {
        match self {
            Self::Dawn => 0.5,
            Self::Day => 1.0,
            Self::Dusk => 0.5,
            Self::Night => 0.1,
        }
    }

    /// Baseline fog density for this phase
    pub fn fog_density(&self) -> f32 {
        match self {
            Self::Dawn => 0.02,
            Self::Day => 0.005,
            Self::Dusk => 0.02,
            Self::Night => 0.04,
        }
    }
}

/// Time-of-day state, created once per session and only mutated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeOfDay {
    /// Hour of day, always within [0, 24)
    pub hour: f32,
    pub phase: DayPhase,
    /// Simulated hours advanced per real minute
    pub time_scale: f32,
    pub light_level: f32,
    pub fog_density: f32,
}

impl TimeOfDay {
    pub fn new(start_hour: f32, time_scale: f32) -> Self {
        let hour = start_hour.rem_euclid(24.0);
        let phase = DayPhase::from_hour(hour);
        Self {
            hour,
            phase,
            time_scale,
            light_level: phase.light_level(),
            fog_density: phase.fog_density(),
        }
    }

    /// Jump the clock to an absolute hour, wrapping into [0, 24)
    ///
    /// Phase and lighting are recomputed immediately, so a restored hour
    /// never leaves them describing the pre-restore time.
    pub fn set_hour(&mut self, hour: f32) {
        if !hour.is_finite() {
            return;
        }
        self.hour = hour.rem_euclid(24.0);
        self.phase = DayPhase::from_hour(self.hour);
        self.light_level = self.phase.light_level();
        self.fog_density = self.phase.fog_density();
    }

    /// Advance the clock by `dt` seconds of real time
    ///
    /// Lighting/fog are recomputed every call so a mid-tick phase change
    /// takes effect immediately. Returns the phase change if one occurred.
    pub fn advance(&mut self, dt: f32) -> Option<(DayPhase, DayPhase)> {
        if !dt.is_finite() || dt <= 0.0 {
            return None;
        }
        self.hour = (self.hour + dt * self.time_scale / 60.0).rem_euclid(24.0);

        let old = self.phase;
        self.phase = DayPhase::from_hour(self.hour);
        self.light_level = self.phase.light_level();
        self.fog_density = self.phase.fog_density();

        (old != self.phase).then_some((old, self.phase))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_partition() {
        assert_eq!(DayPhase::from_hour(5.0), DayPhase::Dawn);
        assert_eq!(DayPhase::from_hour(6.5), DayPhase::Dawn);
        assert_eq!(DayPhase::from_hour(7.0), DayPhase::Day);
        assert_eq!(DayPhase::from_hour(12.0), DayPhase::Day);
        assert_eq!(DayPhase::from_hour(17.0), DayPhase::Dusk);
        assert_eq!(DayPhase::from_hour(18.0), DayPhase::Dusk);
        assert_eq!(DayPhase::from_hour(19.0), DayPhase::Night);
        assert_eq!(DayPhase::from_hour(23.0), DayPhase::Night);
        assert_eq!(DayPhase::from_hour(0.0), DayPhase::Night);
        assert_eq!(DayPhase::from_hour(4.9), DayPhase::Night);
    }

    #[test]
    fn test_hour_advancement_wraps() {
        let mut time = TimeOfDay::new(23.5, 60.0);
        // 60 real seconds at scale 60 = 60 in-game hours... so 1 real
        // second advances 1 hour.
        time.advance(1.0);
        assert!((time.hour - 0.5).abs() < 1e-4);
        assert!(time.hour >= 0.0 && time.hour < 24.0);
    }

    #[test]
    fn test_dawn_to_day_flip() {
        let mut time = TimeOfDay::new(6.9, 60.0);
        assert_eq!(time.phase, DayPhase::Dawn);
        let change = time.advance(0.1);
        assert!((time.hour - 7.0).abs() < 1e-4);
        assert_eq!(change, Some((DayPhase::Dawn, DayPhase::Day)));
        assert_eq!(time.light_level, DayPhase::Day.light_level());
    }

    #[test]
    fn test_degenerate_dt_ignored() {
        let mut time = TimeOfDay::new(12.0, 60.0);
        assert!(time.advance(f32::NAN).is_none());
        assert!(time.advance(-1.0).is_none());
        assert_eq!(time.hour, 12.0);
    }

    #[test]
    fn test_set_hour_recomputes_phase_and_lighting() {
        let mut time = TimeOfDay::new(12.0, 60.0);
        time.set_hour(22.0);
        assert_eq!(time.phase, DayPhase::Night);
        assert_eq!(time.light_level, DayPhase::Night.light_level());
        assert_eq!(time.fog_density, DayPhase::Night.fog_density());

        // Wraps and ignores junk
        time.set_hour(25.0);
        assert!((time.hour - 1.0).abs() < 1e-4);
        time.set_hour(f32::NAN);
        assert!((time.hour - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_huge_dt_stays_finite() {
        let mut time = TimeOfDay::new(12.0, 60.0);
        time.advance(1e12);
        assert!(time.hour.is_finite());
        assert!(time.hour >= 0.0 && time.hour < 24.0);
    }
}
