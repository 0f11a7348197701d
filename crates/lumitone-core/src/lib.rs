pub mod calibration;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod gain;
pub mod mute;
pub mod pitch;
pub mod render_loop;
pub mod session;
pub mod sink;
pub mod smoothing;
pub mod visual;

pub use calibration::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use events::*;
pub use gain::*;
pub use mute::*;
pub use pitch::*;
pub use render_loop::*;
pub use session::*;
pub use sink::*;
pub use smoothing::*;
pub use visual::*;

pub use glam::Vec2;
