use std::sync::atomic::{AtomicI16, Ordering};

use skypad_gamepad::Axis;

/// Stick axes the mapper tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisId {
    LeftX,
    LeftY,
    RightX,
    RightY,
}

impl AxisId {
    /// Stick axis for a controller axis. Triggers are not sticks.
    pub fn from_controller(axis: Axis) -> Option<Self> {
        Some(match axis {
            Axis::LeftX => AxisId::LeftX,
            Axis::LeftY => AxisId::LeftY,
            Axis::RightX => AxisId::RightX,
            Axis::RightY => AxisId::RightY,
            Axis::LeftTrigger | Axis::RightTrigger => return None,
        })
    }

    #[inline]
    fn index(self) -> usize {
        match self {
            AxisId::LeftX => 0,
            AxisId::LeftY => 1,
            AxisId::RightX => 2,
            AxisId::RightY => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickSide {
    Left,
    Right,
}

impl StickSide {
    pub fn axes(self) -> (AxisId, AxisId) {
        match self {
            StickSide::Left => (AxisId::LeftX, AxisId::LeftY),
            StickSide::Right => (AxisId::RightX, AxisId::RightY),
        }
    }
}

/// Latest `(x, y)` of one stick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StickPair {
    pub x: i32,
    pub y: i32,
}

/// Last-known raw value of every stick axis.
///
/// One atomic cell per axis: the event thread writes, tickers read.
/// Unset axes read as zero.
#[derive(Debug, Default)]
pub struct AxisStore {
    cells: [AtomicI16; 4],
}

impl AxisStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn store(&self, axis: AxisId, raw: i16) {
        self.cells[axis.index()].store(raw, Ordering::Release);
    }

    #[inline]
    pub fn load(&self, axis: AxisId) -> i16 {
        self.cells[axis.index()].load(Ordering::Acquire)
    }

    pub fn stick(&self, side: StickSide) -> StickPair {
        let (x, y) = side.axes();
        StickPair {
            x: i32::from(self.load(x)),
            y: i32::from(self.load(y)),
        }
    }
}
