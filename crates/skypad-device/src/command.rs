use std::fmt;

use crate::Drone;

/// Largest magnitude a drone accepts for a motion command.
pub const MAX_MAGNITUDE: u8 = 100;

/// Direction tag of a motion command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    Clockwise,
    CounterClockwise,
}

impl Direction {
    /// Whether this direction counts positive on its axis.
    pub fn is_positive(self) -> bool {
        matches!(
            self,
            Direction::Forward | Direction::Right | Direction::Up | Direction::Clockwise
        )
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Forward => "forward",
            Direction::Backward => "backward",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Clockwise => "clockwise",
            Direction::CounterClockwise => "counter-clockwise",
        };
        f.write_str(name)
    }
}

/// A directional instruction with a magnitude in `0..=MAX_MAGNITUDE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionCommand {
    pub direction: Direction,
    pub magnitude: u8,
}

impl MotionCommand {
    pub fn new(direction: Direction, magnitude: u8) -> Self {
        Self {
            direction,
            magnitude: magnitude.min(MAX_MAGNITUDE),
        }
    }

    /// Zero-magnitude command in the given direction.
    pub fn zero(direction: Direction) -> Self {
        Self { direction, magnitude: 0 }
    }

    /// Signed value on the command's axis, positive for
    /// forward/right/up/clockwise.
    pub fn signed(&self) -> i8 {
        let magnitude = i8::try_from(self.magnitude.min(MAX_MAGNITUDE)).unwrap_or(i8::MAX);
        if self.direction.is_positive() {
            magnitude
        } else {
            -magnitude
        }
    }

    /// Issue the command on a drone.
    pub fn send_to(&self, drone: &dyn Drone) {
        let m = self.magnitude;
        match self.direction {
            Direction::Forward => drone.forward(m),
            Direction::Backward => drone.backward(m),
            Direction::Left => drone.left(m),
            Direction::Right => drone.right(m),
            Direction::Up => drone.up(m),
            Direction::Down => drone.down(m),
            Direction::Clockwise => drone.clockwise(m),
            Direction::CounterClockwise => drone.counter_clockwise(m),
        }
    }
}

impl fmt::Display for MotionCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.direction, self.magnitude)
    }
}
