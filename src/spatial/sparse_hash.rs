//! Sparse hash grid for efficient spatial queries
//!
//! Rebuilt once per tick from current entity positions. Buckets are cleared
//! in place rather than dropped so the backing storage is reused across
//! frames.

use ahash::AHashMap;
use glam::Vec3;

use crate::core::types::EntityId;

/// Conservative widening of the exact-distance filter so neighbors sitting
/// just across a cell boundary are never missed
const WIDEN_FACTOR: f32 = 2.0;

/// Sparse hash grid over the horizontal (x, z) plane
pub struct SparseHashGrid {
    cell_size: f32,
    cells: AHashMap<(i32, i32), Vec<EntityId>>,
}

impl SparseHashGrid {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            cells: AHashMap::new(),
        }
    }

    #[inline]
    fn cell_coord(&self, pos: Vec3) -> (i32, i32) {
        (
            (pos.x / self.cell_size).floor() as i32,
            (pos.z / self.cell_size).floor() as i32,
        )
    }

    /// Empty every bucket in place, keeping allocations
    pub fn clear(&mut self) {
        for bucket in self.cells.values_mut() {
            bucket.clear();
        }
    }

    pub fn insert(&mut self, entity: EntityId, pos: Vec3) {
        let coord = self.cell_coord(pos);
        self.cells.entry(coord).or_default().push(entity);
    }

    /// Rebuild grid from positions
    pub fn rebuild(&mut self, entities: impl Iterator<Item = (EntityId, Vec3)>) {
        self.clear();
        for (entity, pos) in entities {
            self.insert(entity, pos);
        }
    }

    /// All entities in the 3x3 cell neighborhood of a position
    pub fn query_neighbors(&self, pos: Vec3) -> impl Iterator<Item = EntityId> + '_ {
        let (cx, cz) = self.cell_coord(pos);

        (-1..=1).flat_map(move |dx| {
            (-1..=1).flat_map(move |dz| {
                self.cells
                    .get(&(cx + dx, cz + dz))
                    .into_iter()
                    .flatten()
                    .copied()
            })
        })
    }

    /// Entities within `radius` of `center`, excluding `exclude`
    ///
    /// Filters the 3x3 neighborhood by horizontal Euclidean distance
    /// against `radius * WIDEN_FACTOR`. Result order follows the fixed cell
    /// walk, then insertion order within each bucket.
    pub fn query_radius(
        &self,
        exclude: EntityId,
        center: Vec3,
        radius: f32,
        pos_of: impl Fn(EntityId) -> Option<Vec3>,
    ) -> Vec<EntityId> {
        let widened = radius * WIDEN_FACTOR;
        self.query_neighbors(center)
            .filter(|&entity| {
                if entity == exclude {
                    return false;
                }
                pos_of(entity)
                    .map(|pos| horizontal_distance(center, pos) <= widened)
                    .unwrap_or(false)
            })
            .collect()
    }
}

#[inline]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}
