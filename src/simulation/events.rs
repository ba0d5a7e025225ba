//! Events generated during a simulation tick
//!
//! Fire-and-forget notifications for the audio/VFX collaborators. The
//! scheduler returns them per tick; nothing in the core waits on a consumer.

use crate::core::types::{BehaviorState, EntityId, ResourceKind, SpeciesKind};
use crate::environment::{BiomeKind, DayPhase, WeatherKind};

#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    /// The player picked up a resource
    ResourceCollected {
        entity: EntityId,
        kind: ResourceKind,
    },
    /// A predator struck the player
    PlayerHit {
        attacker: EntityId,
        species: SpeciesKind,
        amount: f32,
    },
    /// An entity changed behavioral state (vocalization trigger)
    Vocalization {
        entity: EntityId,
        species: SpeciesKind,
        state: BehaviorState,
    },
    WeatherChanged {
        old: WeatherKind,
        new: WeatherKind,
    },
    PhaseChanged {
        old: DayPhase,
        new: DayPhase,
    },
    BiomeChanged {
        old: BiomeKind,
        new: BiomeKind,
    },
}
