//! Component definitions
//!
//! Components are plain data records. An entity is an id plus whichever
//! subset of these the spawn logic attached; behavior is driven entirely by
//! which components are present.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::types::{Archetype, BehaviorState, EntityId, ResourceKind, SpeciesKind};

/// Position, orientation and scale in world space
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

/// Kinematic state integrated by the AI system
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Movement {
    pub velocity: Vec3,
    /// Hard cap on speed regardless of state multipliers
    pub max_speed: f32,
    /// Radians per second the heading may turn
    pub turn_rate: f32,
}

impl Movement {
    pub fn new(max_speed: f32) -> Self {
        Self {
            velocity: Vec3::ZERO,
            max_speed,
            turn_rate: 6.0,
        }
    }
}

/// Identity and vital stats
///
/// All stat mutations go through the methods here, which clamp into
/// `[0, max]` and force the `Dead` state the instant health hits zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Species {
    pub kind: SpeciesKind,
    pub archetype: Archetype,
    pub health: f32,
    pub max_health: f32,
    pub stamina: f32,
    pub max_stamina: f32,
    pub base_speed: f32,
    pub state: BehaviorState,
}

impl Species {
    pub fn new(kind: SpeciesKind) -> Self {
        Self {
            kind,
            archetype: kind.archetype(),
            health: kind.max_health(),
            max_health: kind.max_health(),
            stamina: kind.max_stamina(),
            max_stamina: kind.max_stamina(),
            base_speed: kind.base_speed(),
            state: BehaviorState::Idle,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.state != BehaviorState::Dead
    }

    /// Apply damage; forces `Dead` synchronously on reaching zero health
    pub fn apply_damage(&mut self, amount: f32) {
        if !amount.is_finite() {
            return;
        }
        self.health = (self.health - amount.max(0.0)).clamp(0.0, self.max_health);
        if self.health <= 0.0 {
            self.state = BehaviorState::Dead;
        }
    }

    pub fn heal(&mut self, amount: f32) {
        if !amount.is_finite() || !self.is_alive() {
            return;
        }
        self.health = (self.health + amount.max(0.0)).clamp(0.0, self.max_health);
    }

    pub fn restore_stamina(&mut self, amount: f32) {
        if !amount.is_finite() {
            return;
        }
        self.stamina = (self.stamina + amount.max(0.0)).clamp(0.0, self.max_stamina);
    }

    pub fn drain_stamina(&mut self, amount: f32) {
        if !amount.is_finite() {
            return;
        }
        self.stamina = (self.stamina - amount.max(0.0)).clamp(0.0, self.max_stamina);
    }

    /// Change behavioral state; `Dead` is terminal
    ///
    /// Returns true if the state actually changed.
    pub fn set_state(&mut self, state: BehaviorState) -> bool {
        if self.state == BehaviorState::Dead || self.state == state {
            return false;
        }
        self.state = state;
        true
    }
}

/// Steering memory for AI-driven entities
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Steering {
    /// Current chase/flee target; re-validated before every use
    pub target: Option<EntityId>,
    pub awareness_radius: f32,
    /// Wander heading angle on the horizontal plane (radians)
    pub wander_heading: f32,
    /// Seconds until a new wander heading is picked
    pub wander_timer: f32,
}

impl Steering {
    pub fn new(awareness_radius: f32) -> Self {
        Self {
            target: None,
            awareness_radius,
            wander_heading: 0.0,
            wander_timer: 0.0,
        }
    }
}

/// A world pickup
///
/// Collected nodes are never despawned; they are flagged with a timestamp
/// and silently reactivate in place once the respawn duration elapses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ResourceNode {
    pub kind: ResourceKind,
    pub health_restore: f32,
    pub stamina_restore: f32,
    pub respawn_secs: f32,
    pub collected: bool,
    /// Session clock at the moment of collection
    pub collected_at: f64,
}

impl ResourceNode {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            health_restore: kind.health_restore(),
            stamina_restore: kind.stamina_restore(),
            respawn_secs: kind.respawn_secs(),
            collected: false,
            collected_at: 0.0,
        }
    }

    pub fn collect(&mut self, now: f64) {
        self.collected = true;
        self.collected_at = now;
    }

    pub fn ready_to_respawn(&self, now: f64) -> bool {
        self.collected && now - self.collected_at >= self.respawn_secs as f64
    }

    pub fn respawn(&mut self) {
        self.collected = false;
    }
}
