pub mod constants;
pub mod easing;
pub mod engine;
pub mod error;
pub mod participant;
pub mod reel;
pub mod samples;
pub mod settings;
pub mod ticket;

pub use easing::*;
pub use engine::*;
pub use error::*;
pub use participant::*;
pub use reel::*;
pub use settings::*;
pub use ticket::*;
