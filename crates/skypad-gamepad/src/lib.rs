mod error;
mod events;
mod manager;
mod runtime;
mod types;

pub use crate::error::{Error, Result};
pub use crate::events::{ControllerEvent, EventReceiver};
pub use crate::manager::ControllerManager;
pub use crate::types::{Axis, Button, ControllerId, ControllerInfo};
