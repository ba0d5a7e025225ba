pub mod events;
pub mod scheduler;

pub use events::SimEvent;
pub use scheduler::FrameScheduler;
