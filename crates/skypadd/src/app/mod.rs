pub mod mapper;
pub mod pilot;
pub mod roll;
pub mod vision;

use thiserror::Error;

pub use mapper::{AxisId, StickMapper, StickSide};
pub use pilot::Pilot;
pub use roll::{RollStep, Roller};
pub use vision::{VideoPipeline, VisionError};

#[derive(Debug, Error)]
pub enum Error {
    #[error("profile error: {0}")]
    Profile(#[from] skypad_workspace::ProfileError),
    #[error("drone error: {0}")]
    Device(#[from] skypad_device::Error),
    #[error("controller error: {0}")]
    Gamepad(#[from] skypad_gamepad::Error),
    #[error("vision error: {0}")]
    Vision(#[from] VisionError),
    #[error("thread error: {0}")]
    Thread(#[from] std::io::Error),
}
