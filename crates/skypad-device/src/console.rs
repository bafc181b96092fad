use std::sync::atomic::{AtomicI8, Ordering};

use crate::command::{Direction, MotionCommand};
use crate::{Drone, Sphero};

/// Dry-run drone that logs commands instead of flying.
///
/// Motion commands arrive every tick, so only changes are logged.
#[derive(Debug, Default)]
pub struct ConsoleDrone {
    // forward/backward, left/right, up/down, yaw
    last: [AtomicI8; 4],
}

impl ConsoleDrone {
    pub fn new() -> Self {
        Self::default()
    }

    fn motion(&self, direction: Direction, magnitude: u8) {
        let command = MotionCommand::new(direction, magnitude);
        if self.record(command) {
            log::info!("drone {command}");
        }
    }

    /// Store the signed value of `command` on its axis. True when it differs
    /// from the previous value on that axis.
    fn record(&self, command: MotionCommand) -> bool {
        let slot = match command.direction {
            Direction::Forward | Direction::Backward => 0,
            Direction::Left | Direction::Right => 1,
            Direction::Up | Direction::Down => 2,
            Direction::Clockwise | Direction::CounterClockwise => 3,
        };
        let value = command.signed();
        self.last[slot].swap(value, Ordering::Relaxed) != value
    }
}

impl Drone for ConsoleDrone {
    fn forward(&self, magnitude: u8) {
        self.motion(Direction::Forward, magnitude);
    }

    fn backward(&self, magnitude: u8) {
        self.motion(Direction::Backward, magnitude);
    }

    fn left(&self, magnitude: u8) {
        self.motion(Direction::Left, magnitude);
    }

    fn right(&self, magnitude: u8) {
        self.motion(Direction::Right, magnitude);
    }

    fn up(&self, magnitude: u8) {
        self.motion(Direction::Up, magnitude);
    }

    fn down(&self, magnitude: u8) {
        self.motion(Direction::Down, magnitude);
    }

    fn clockwise(&self, magnitude: u8) {
        self.motion(Direction::Clockwise, magnitude);
    }

    fn counter_clockwise(&self, magnitude: u8) {
        self.motion(Direction::CounterClockwise, magnitude);
    }

    fn take_off(&self) {
        log::info!("drone take off");
    }

    fn land(&self) {
        log::info!("drone land");
    }

    fn start_video(&self) {
        log::debug!("drone stream on");
    }
}

/// Dry-run Sphero that logs commands with the device it stands in for.
#[derive(Debug)]
pub struct ConsoleSphero {
    address: String,
}

impl ConsoleSphero {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl Sphero for ConsoleSphero {
    fn set_rgb(&self, r: u8, g: u8, b: u8) {
        log::info!("{} rgb #{r:02x}{g:02x}{b:02x}", self.address);
    }

    fn roll(&self, speed: u8, heading: u16) {
        log::info!("{} roll speed={speed} heading={heading}", self.address);
    }
}
