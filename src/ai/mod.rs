pub mod steering;
pub mod system;

pub use system::AiSystem;
