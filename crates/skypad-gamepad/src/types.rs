use std::fmt;
use std::str::FromStr;

/// Unique identifier of a controller device.
pub type ControllerId = u32;

/// Logical controller buttons, named after the DualShock layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Cross,
    Circle,
    Square,
    Triangle,
    Select,
    Home,
    Start,
    L1,
    R1,
    L2,
    R2,
    L3,
    R3,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
}

impl Button {
    pub const ALL: [Button; 17] = [
        Button::Cross,
        Button::Circle,
        Button::Square,
        Button::Triangle,
        Button::Select,
        Button::Home,
        Button::Start,
        Button::L1,
        Button::R1,
        Button::L2,
        Button::R2,
        Button::L3,
        Button::R3,
        Button::DPadUp,
        Button::DPadDown,
        Button::DPadLeft,
        Button::DPadRight,
    ];

    /// Profile name of the button.
    pub fn name(self) -> &'static str {
        match self {
            Button::Cross => "cross",
            Button::Circle => "circle",
            Button::Square => "square",
            Button::Triangle => "triangle",
            Button::Select => "select",
            Button::Home => "home",
            Button::Start => "start",
            Button::L1 => "l1",
            Button::R1 => "r1",
            Button::L2 => "l2",
            Button::R2 => "r2",
            Button::L3 => "l3",
            Button::R3 => "r3",
            Button::DPadUp => "dpad_up",
            Button::DPadDown => "dpad_down",
            Button::DPadLeft => "dpad_left",
            Button::DPadRight => "dpad_right",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Button {
    type Err = String;

    /// Accepts the DualShock names plus the common aliases
    /// (`x` for cross, `a`/`b`/`y` for the Xbox positions).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let button = match lower.as_str() {
            "x" | "a" => Button::Cross,
            "b" => Button::Circle,
            "y" => Button::Triangle,
            "back" => Button::Select,
            "guide" | "ps" => Button::Home,
            other => {
                return Button::ALL
                    .into_iter()
                    .find(|b| b.name() == other)
                    .ok_or_else(|| s.to_string());
            }
        };
        Ok(button)
    }
}

/// Analog axes of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    LeftTrigger,
    RightTrigger,
}

/// Controller meta information that remains stable across events.
#[derive(Debug, Clone)]
pub struct ControllerInfo {
    pub id: ControllerId,
    pub name: String,
    pub vendor_id: u16,
    pub product_id: u16,
}
