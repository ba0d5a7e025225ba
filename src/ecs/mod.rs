pub mod components;
pub mod world;

pub use components::{Movement, ResourceNode, Species, Steering, Transform};
pub use world::{World, WorldSnapshot};
