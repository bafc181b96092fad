mod command;
mod console;
mod drone;
mod error;
mod sphero;
mod tello;

pub use command::{Direction, MotionCommand, MAX_MAGNITUDE};
pub use console::{ConsoleDrone, ConsoleSphero};
pub use drone::Drone;
pub use error::{Error, Result};
pub use sphero::Sphero;
pub use tello::{TelloLink, TelloSettings};
