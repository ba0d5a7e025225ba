//! Biome singleton and region lookup
//!
//! Resolves the biome under a world position by nearest-center lookup over a
//! fixed region list. Supplies per-biome validity tables to spawning and the
//! resource system.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::types::{ResourceKind, SpeciesKind};

/// Seconds a biome crossfade takes (ambience/audio collaborators read it)
pub const BIOME_FADE_SECS: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiomeKind {
    Meadow,
    Forest,
    Desert,
    Tundra,
}

impl BiomeKind {
    /// Species that may spawn or act in this biome
    pub fn valid_species(&self) -> &'static [SpeciesKind] {
        match self {
            Self::Meadow => &[SpeciesKind::Deer, SpeciesKind::Rabbit, SpeciesKind::Fox],
            Self::Forest => &[
                SpeciesKind::Deer,
                SpeciesKind::Rabbit,
                SpeciesKind::Fox,
                SpeciesKind::Wolf,
            ],
            Self::Desert => &[SpeciesKind::Fox],
            Self::Tundra => &[SpeciesKind::Rabbit, SpeciesKind::Wolf],
        }
    }

    /// Resource kinds that may spawn in this biome
    pub fn valid_resources(&self) -> &'static [ResourceKind] {
        match self {
            Self::Meadow => &[ResourceKind::Berries, ResourceKind::Honey, ResourceKind::SpringWater],
            Self::Forest => &[ResourceKind::Berries, ResourceKind::Mushroom, ResourceKind::SpringWater],
            Self::Desert => &[ResourceKind::SpringWater],
            Self::Tundra => &[ResourceKind::Mushroom, ResourceKind::SpringWater],
        }
    }
}

/// A named world region with a center and radius on the horizontal plane
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BiomeRegion {
    pub kind: BiomeKind,
    pub center: Vec2,
    pub radius: f32,
}

impl BiomeRegion {
    pub fn contains(&self, pos: Vec3) -> bool {
        Vec2::new(pos.x, pos.z).distance(self.center) <= self.radius
    }
}

/// Fixed list of biome regions for the session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiomeMap {
    pub regions: Vec<BiomeRegion>,
}

impl BiomeMap {
    pub fn new(regions: Vec<BiomeRegion>) -> Self {
        Self { regions }
    }

    /// Resolve the biome at a world position by nearest region center
    ///
    /// Ties are broken by list order: only a strictly closer center wins.
    pub fn resolve(&self, pos: Vec3) -> BiomeKind {
        let p = Vec2::new(pos.x, pos.z);
        let Some(first) = self.regions.first() else {
            return BiomeKind::Meadow;
        };
        let mut best = first.kind;
        let mut best_dist = first.center.distance_squared(p);
        for region in &self.regions[1..] {
            let d = region.center.distance_squared(p);
            if d < best_dist {
                best = region.kind;
                best_dist = d;
            }
        }
        best
    }
}

impl Default for BiomeMap {
    fn default() -> Self {
        Self::new(vec![
            BiomeRegion {
                kind: BiomeKind::Meadow,
                center: Vec2::new(0.0, 0.0),
                radius: 80.0,
            },
            BiomeRegion {
                kind: BiomeKind::Forest,
                center: Vec2::new(150.0, 0.0),
                radius: 100.0,
            },
            BiomeRegion {
                kind: BiomeKind::Desert,
                center: Vec2::new(0.0, 180.0),
                radius: 90.0,
            },
            BiomeRegion {
                kind: BiomeKind::Tundra,
                center: Vec2::new(-160.0, -40.0),
                radius: 90.0,
            },
        ])
    }
}

/// Biome state under the player, created once per session and only mutated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BiomeState {
    pub current: BiomeKind,
    /// Crossfade progress after a biome change, clamped to [0, 1]
    pub transition: f32,
}

impl BiomeState {
    pub fn new(current: BiomeKind) -> Self {
        Self {
            current,
            transition: 1.0,
        }
    }

    /// Re-resolve the biome under `player_pos`, restarting the crossfade on
    /// a change. Returns the change if one occurred.
    pub fn update(
        &mut self,
        map: &BiomeMap,
        player_pos: Vec3,
        dt: f32,
    ) -> Option<(BiomeKind, BiomeKind)> {
        let resolved = map.resolve(player_pos);
        if resolved != self.current {
            let old = self.current;
            self.current = resolved;
            self.transition = 0.0;
            return Some((old, resolved));
        }
        if dt.is_finite() && dt > 0.0 {
            self.transition = (self.transition + dt / BIOME_FADE_SECS).clamp(0.0, 1.0);
        }
        None
    }
}
