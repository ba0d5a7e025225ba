//! Weather singleton
//!
//! A probabilistic state machine over discrete weather kinds with smoothed
//! 30-second transitions. Visibility and movement multipliers feed the AI,
//! render and audio collaborators.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Seconds a weather-to-weather transition takes
pub const TRANSITION_SECS: f32 = 30.0;

/// Bounds on how long a weather kind persists (seconds)
pub const MIN_DURATION_SECS: f64 = 300.0;
pub const MAX_DURATION_SECS: f64 = 1200.0;

/// Current weather condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherKind {
    Clear,
    Rain,
    Fog,
    Snow,
    Storm,
    Sandstorm,
}

impl WeatherKind {
    pub const ALL: [WeatherKind; 6] = [
        Self::Clear,
        Self::Rain,
        Self::Fog,
        Self::Snow,
        Self::Storm,
        Self::Sandstorm,
    ];

    /// Target precipitation/particle intensity (0.0-1.0)
    pub fn intensity(&self) -> f32 {
        match self {
            Self::Clear => 0.0,
            Self::Rain => 0.6,
            Self::Fog => 0.3,
            Self::Snow => 0.5,
            Self::Storm => 1.0,
            Self::Sandstorm => 0.9,
        }
    }

    /// Visibility range multiplier (1.0 = unobstructed)
    pub fn visibility_modifier(&self) -> f32 {
        match self {
            Self::Clear => 1.0,
            Self::Rain => 0.6,
            Self::Fog => 0.3,
            Self::Snow => 0.7,
            Self::Storm => 0.4,
            Self::Sandstorm => 0.2,
        }
    }

    /// Wind speed in world units per second
    pub fn wind_speed(&self) -> f32 {
        match self {
            Self::Clear => 1.0,
            Self::Rain => 4.0,
            Self::Fog => 0.5,
            Self::Snow => 3.0,
            Self::Storm => 12.0,
            Self::Sandstorm => 10.0,
        }
    }

    /// Movement speed multiplier (1.0 = normal)
    ///
    /// A pure read of the current kind, never interpolated during
    /// transitions.
    pub fn movement_modifier(&self) -> f32 {
        match self {
            Self::Clear => 1.0,
            Self::Rain => 0.9,
            Self::Fog => 0.95,
            Self::Snow => 0.8,
            Self::Storm => 0.7,
            Self::Sandstorm => 0.6,
        }
    }
}

impl Default for WeatherKind {
    fn default() -> Self {
        Self::Clear
    }
}

/// Weather state, created once per session and only mutated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherState {
    pub current: WeatherKind,
    /// Kind being transitioned into, if a transition is running
    pub next: Option<WeatherKind>,
    /// Transition progress, clamped to [0, 1]
    pub progress: f32,
    pub intensity: f32,
    /// Clamped to [0, 1] after every update
    pub visibility: f32,
    pub wind: f32,
    /// Session clock when the current kind became current
    pub epoch_start: f64,
    /// Seconds the current kind persists before a new one is rolled
    pub duration: f64,
}

impl WeatherState {
    pub fn new(rng: &mut impl Rng) -> Self {
        let current = WeatherKind::Clear;
        Self {
            current,
            next: None,
            progress: 0.0,
            intensity: current.intensity(),
            visibility: current.visibility_modifier(),
            wind: current.wind_speed(),
            epoch_start: 0.0,
            duration: rng.gen_range(MIN_DURATION_SECS..=MAX_DURATION_SECS),
        }
    }

    /// Advance the weather machine by `dt` seconds
    ///
    /// Returns the completed `(old, new)` change when a transition finishes.
    pub fn update(
        &mut self,
        dt: f32,
        clock: f64,
        rng: &mut impl Rng,
    ) -> Option<(WeatherKind, WeatherKind)> {
        if !dt.is_finite() || dt <= 0.0 {
            return None;
        }

        let mut completed = None;

        match self.next {
            None => {
                if clock - self.epoch_start >= self.duration {
                    // Roll a new kind, excluding the current one
                    let pool: Vec<WeatherKind> = WeatherKind::ALL
                        .into_iter()
                        .filter(|k| *k != self.current)
                        .collect();
                    self.next = Some(pool[rng.gen_range(0..pool.len())]);
                    self.progress = 0.0;
                }
            }
            Some(next) => {
                self.progress = (self.progress + dt / TRANSITION_SECS).clamp(0.0, 1.0);
                let t = self.progress;
                self.intensity = lerp(self.current.intensity(), next.intensity(), t);
                self.visibility =
                    lerp(self.current.visibility_modifier(), next.visibility_modifier(), t);
                self.wind = lerp(self.current.wind_speed(), next.wind_speed(), t);

                if self.progress >= 1.0 {
                    completed = Some((self.current, next));
                    self.current = next;
                    self.next = None;
                    self.progress = 0.0;
                    self.epoch_start = clock;
                    self.duration = rng.gen_range(MIN_DURATION_SECS..=MAX_DURATION_SECS);
                }
            }
        }

        self.visibility = self.visibility.clamp(0.0, 1.0);
        completed
    }

    pub fn in_transition(&self) -> bool {
        self.next.is_some()
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
