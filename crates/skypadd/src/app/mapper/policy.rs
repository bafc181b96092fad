use skypad_device::{Direction, MotionCommand, MAX_MAGNITUDE};
use skypad_workspace::MapperSettings;

use super::store::{StickPair, StickSide};

/// Maps raw deflection onto the drone's `0..=100` magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    offset: f64,
    floor: f64,
}

impl Normalizer {
    pub fn new(offset: f64, floor: f64) -> Self {
        Self { offset, floor }
    }

    /// `|value| / offset` as a whole percentage. Ratios under the floor
    /// give 0, ratios over 1 give the maximum.
    // the truncated product lies in 0..=100
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn normalize(&self, value: i32) -> u8 {
        let ratio = f64::from(value).abs() / self.offset;
        if ratio < self.floor {
            0
        } else if ratio <= 1.0 {
            (ratio * f64::from(MAX_MAGNITUDE)).trunc() as u8
        } else {
            MAX_MAGNITUDE
        }
    }
}

/// Polarity and dead zone of one logical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisRule {
    /// Issued when the value is above the dead zone.
    pub above: Direction,
    /// Issued when the value is below the negative dead zone.
    pub below: Direction,
    /// Issued at zero magnitude inside the dead zone.
    pub idle: Direction,
    pub deadzone: i32,
}

impl AxisRule {
    pub fn command(&self, value: i32, normalizer: &Normalizer) -> MotionCommand {
        if value < -self.deadzone {
            MotionCommand::new(self.below, normalizer.normalize(value))
        } else if value > self.deadzone {
            MotionCommand::new(self.above, normalizer.normalize(value))
        } else {
            MotionCommand::zero(self.idle)
        }
    }
}

/// Rules for both axes of one stick. `y` is issued before `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StickRules {
    pub x: AxisRule,
    pub y: AxisRule,
}

/// The full stick-to-command policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Policy {
    pub left: StickRules,
    pub right: StickRules,
    pub normalizer: Normalizer,
}

impl Policy {
    pub fn from_settings(settings: &MapperSettings) -> Self {
        let translate = settings.deadzone.translate;
        Self {
            // Left stick: throttle on y (up is negative), yaw on x.
            left: StickRules {
                y: AxisRule {
                    above: Direction::Down,
                    below: Direction::Up,
                    idle: Direction::Up,
                    deadzone: translate,
                },
                x: AxisRule {
                    above: Direction::Clockwise,
                    below: Direction::CounterClockwise,
                    idle: Direction::Clockwise,
                    deadzone: settings.deadzone.yaw,
                },
            },
            // Right stick: pitch on y (forward is negative), roll on x.
            right: StickRules {
                y: AxisRule {
                    above: Direction::Backward,
                    below: Direction::Forward,
                    idle: Direction::Forward,
                    deadzone: translate,
                },
                x: AxisRule {
                    above: Direction::Right,
                    below: Direction::Left,
                    idle: Direction::Right,
                    deadzone: translate,
                },
            },
            normalizer: Normalizer::new(settings.offset, settings.floor),
        }
    }

    pub fn rules(&self, side: StickSide) -> &StickRules {
        match side {
            StickSide::Left => &self.left,
            StickSide::Right => &self.right,
        }
    }

    /// Commands for one stick, in issue order.
    pub fn commands(&self, side: StickSide, stick: StickPair) -> [MotionCommand; 2] {
        let rules = self.rules(side);
        [
            rules.y.command(stick.y, &self.normalizer),
            rules.x.command(stick.x, &self.normalizer),
        ]
    }
}

impl Default for Policy {
    fn default() -> Self {
        Self::from_settings(&MapperSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(direction: Direction, magnitude: u8) -> MotionCommand {
        MotionCommand::new(direction, magnitude)
    }

    fn right(x: i32, y: i32) -> [MotionCommand; 2] {
        Policy::default().commands(StickSide::Right, StickPair { x, y })
    }

    fn left(x: i32, y: i32) -> [MotionCommand; 2] {
        Policy::default().commands(StickSide::Left, StickPair { x, y })
    }

    #[test]
    fn normalize_scales_linearly_to_percent() {
        let n = Normalizer::new(32767.0, 0.1);
        assert_eq!(n.normalize(32767), 100);
        assert_eq!(n.normalize(-32767), 100);
        assert_eq!(n.normalize(16384), 50);
        assert_eq!(n.normalize(-9830), 29);
        assert_eq!(n.normalize(19005), 58);
    }

    #[test]
    fn normalize_floor_zeroes_small_deflection() {
        let n = Normalizer::new(32767.0, 0.1);
        assert_eq!(n.normalize(-50), 0);
        assert_eq!(n.normalize(3276), 0);
        assert_eq!(n.normalize(3277), 10);
    }

    #[test]
    fn normalize_clamps_past_offset() {
        let n = Normalizer::new(32767.0, 0.1);
        assert_eq!(n.normalize(-32768), 100);
        assert_eq!(Normalizer::new(1000.0, 0.0).normalize(5000), 100);
    }

    #[test]
    fn normalize_without_floor_keeps_small_values() {
        let n = Normalizer::new(1000.0, 0.0);
        assert_eq!(n.normalize(25), 2);
        assert_eq!(n.normalize(0), 0);
    }

    #[test]
    fn translation_dead_zone_issues_default_direction_at_zero() {
        for v in -10..=10 {
            assert_eq!(right(v, v), [cmd(Direction::Forward, 0), cmd(Direction::Right, 0)]);
            assert_eq!(left(0, v)[0], cmd(Direction::Up, 0));
        }
    }

    #[test]
    fn yaw_dead_zone_is_wider() {
        for v in -20..=20 {
            assert_eq!(left(v, 0)[1], cmd(Direction::Clockwise, 0));
        }
        assert_eq!(left(-15, 0)[1], cmd(Direction::Clockwise, 0));
    }

    #[test]
    fn right_stick_polarity() {
        assert_eq!(right(0, -16384)[0], cmd(Direction::Forward, 50));
        assert_eq!(right(0, 16384)[0], cmd(Direction::Backward, 50));
        assert_eq!(right(16384, 0)[1], cmd(Direction::Right, 50));
        assert_eq!(right(-16384, 0)[1], cmd(Direction::Left, 50));
    }

    #[test]
    fn left_stick_polarity() {
        assert_eq!(left(0, -32767)[0], cmd(Direction::Up, 100));
        assert_eq!(left(0, 32767)[0], cmd(Direction::Down, 100));
        assert_eq!(left(32767, 0)[1], cmd(Direction::Clockwise, 100));
        assert_eq!(left(-32767, 0)[1], cmd(Direction::CounterClockwise, 100));
    }

    #[test]
    fn just_outside_dead_zone_takes_the_branch() {
        let n = Normalizer::new(32767.0, 0.1);
        assert_eq!(right(0, -11)[0], cmd(Direction::Forward, n.normalize(-11)));
        assert_eq!(right(0, 11)[0], cmd(Direction::Backward, n.normalize(11)));
        assert_eq!(left(25, 0)[1], cmd(Direction::Clockwise, n.normalize(25)));
        assert_eq!(left(-21, 0)[1], cmd(Direction::CounterClockwise, n.normalize(-21)));
    }

    #[test]
    fn y_is_issued_before_x() {
        let [first, second] = right(16384, -16384);
        assert_eq!(first.direction, Direction::Forward);
        assert_eq!(second.direction, Direction::Right);
    }

    #[test]
    fn custom_dead_zones_apply() {
        let mut settings = MapperSettings::default();
        settings.deadzone.translate = 4000;
        settings.deadzone.yaw = 8000;
        let policy = Policy::from_settings(&settings);
        let [y, x] = policy.commands(StickSide::Left, StickPair { x: 7000, y: -3999 });
        assert_eq!(y, cmd(Direction::Up, 0));
        assert_eq!(x, cmd(Direction::Clockwise, 0));
    }
}
