//! Bevy ECS Systems - Progression logic that operates on resources and messages

mod flow;
mod level;
mod milestone;
mod stats;
mod trail;

pub use flow::*;
pub use level::*;
pub use milestone::*;
pub use stats::*;
pub use trail::*;
