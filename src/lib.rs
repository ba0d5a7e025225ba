//! Wildreach - real-time world-simulation core for a 3D exploration game
//!
//! Advances the state of every living and environmental entity once per
//! rendered frame. Rendering, audio, input and persistence are external
//! collaborators; they only exchange component data and events with this
//! crate.

pub mod ai;
pub mod collision;
pub mod core;
pub mod ecs;
pub mod environment;
pub mod resource;
pub mod simulation;
pub mod spatial;
