//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for entities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Game tick counter (simulation time unit)
pub type Tick = u64;

/// Broad behavioral role of a species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    Player,
    Predator,
    Prey,
}

/// Species enumeration for the simulated bestiary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpeciesKind {
    Human,
    Deer,
    Rabbit,
    Fox,
    Wolf,
}

impl SpeciesKind {
    pub fn archetype(&self) -> Archetype {
        match self {
            Self::Human => Archetype::Player,
            Self::Deer | Self::Rabbit => Archetype::Prey,
            Self::Fox | Self::Wolf => Archetype::Predator,
        }
    }

    /// Base movement speed in world units per second
    pub fn base_speed(&self) -> f32 {
        match self {
            Self::Human => 4.0,
            Self::Deer => 5.0,
            Self::Rabbit => 4.5,
            Self::Fox => 5.5,
            Self::Wolf => 6.0,
        }
    }

    pub fn max_health(&self) -> f32 {
        match self {
            Self::Human => 100.0,
            Self::Deer => 40.0,
            Self::Rabbit => 15.0,
            Self::Fox => 30.0,
            Self::Wolf => 60.0,
        }
    }

    pub fn max_stamina(&self) -> f32 {
        match self {
            Self::Human => 100.0,
            Self::Deer => 60.0,
            Self::Rabbit => 40.0,
            Self::Fox => 50.0,
            Self::Wolf => 80.0,
        }
    }

    /// Damage dealt per strike while attacking
    pub fn attack_damage(&self) -> f32 {
        match self {
            Self::Human => 10.0,
            Self::Deer => 0.0,
            Self::Rabbit => 0.0,
            Self::Fox => 5.0,
            Self::Wolf => 12.0,
        }
    }

    /// How far this species notices other entities
    pub fn awareness_radius(&self) -> f32 {
        match self {
            Self::Human => 15.0,
            Self::Deer => 12.0,
            Self::Rabbit => 10.0,
            Self::Fox => 14.0,
            Self::Wolf => 18.0,
        }
    }
}

/// Behavioral mode of an entity, driven by the AI system
///
/// `Dead` is terminal: it is entered by the health mutators when health
/// reaches zero, never by the AI system itself, and no transition leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BehaviorState {
    #[default]
    Idle,
    Walk,
    Flee,
    Chase,
    Attack,
    Dead,
}

impl BehaviorState {
    /// Multiplier applied to base speed while in this state
    pub fn speed_multiplier(&self) -> f32 {
        match self {
            Self::Idle => 0.0,
            Self::Walk => 0.6,
            Self::Flee => 1.5,
            Self::Chase => 1.4,
            Self::Attack => 0.2,
            Self::Dead => 0.0,
        }
    }
}

/// World pickup kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Berries,
    Mushroom,
    SpringWater,
    Honey,
}

impl ResourceKind {
    pub fn health_restore(&self) -> f32 {
        match self {
            Self::Berries => 10.0,
            Self::Mushroom => 15.0,
            Self::SpringWater => 5.0,
            Self::Honey => 20.0,
        }
    }

    pub fn stamina_restore(&self) -> f32 {
        match self {
            Self::Berries => 15.0,
            Self::Mushroom => 5.0,
            Self::SpringWater => 25.0,
            Self::Honey => 10.0,
        }
    }

    /// Seconds until a collected instance becomes collectible again
    pub fn respawn_secs(&self) -> f32 {
        match self {
            Self::Berries => 60.0,
            Self::Mushroom => 90.0,
            Self::SpringWater => 30.0,
            Self::Honey => 120.0,
        }
    }
}
