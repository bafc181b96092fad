use std::time::Duration;

use ahash::AHashMap;
use skypad_device::TelloSettings;
use skypad_gamepad::Button;

/// Discrete action bound to a button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonAction {
    TakeOff,
    Land,
}

/// Button -> action dispatch table.
pub type ButtonBindings = AHashMap<Button, ButtonAction>;

/// Dead zones in raw axis units. Values with `|v| <= zone` are neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadZones {
    pub translate: i32,
    pub yaw: i32,
}

impl Default for DeadZones {
    fn default() -> Self {
        Self {
            translate: 10,
            yaw: 20,
        }
    }
}

/// Stick mapping parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapperSettings {
    /// Largest magnitude the input device reports.
    pub offset: f64,
    /// Deflection ratio below which the magnitude is zero.
    pub floor: f64,
    /// Stick ticker period.
    pub tick: Duration,
    pub deadzone: DeadZones,
}

impl Default for MapperSettings {
    fn default() -> Self {
        Self {
            offset: 32767.0,
            floor: 0.1,
            tick: Duration::from_millis(10),
            deadzone: DeadZones::default(),
        }
    }
}

/// Camera stream decoding parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoSettings {
    /// UDP port the drone streams H.264 to.
    pub port: u16,
    pub width: u32,
    pub height: u32,
    /// ffmpeg executable.
    pub ffmpeg: String,
    /// How often the stream request is repeated.
    pub restart: Duration,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            port: 11111,
            width: 960,
            height: 720,
            ffmpeg: "ffmpeg".into(),
            restart: Duration::from_millis(100),
        }
    }
}

impl VideoSettings {
    /// Size in bytes of one decoded bgr24 frame.
    pub fn frame_size(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

/// Sphero demo parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollSettings {
    pub interval: Duration,
    pub speed: u8,
}

impl Default for RollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3),
            speed: 15,
        }
    }
}

/// Resolved profile.
#[derive(Debug, Clone)]
pub struct Profile {
    pub mapper: MapperSettings,
    pub buttons: ButtonBindings,
    pub drone: TelloSettings,
    pub video: VideoSettings,
    pub roll: RollSettings,
}

impl Default for Profile {
    fn default() -> Self {
        let mut buttons = ButtonBindings::new();
        buttons.insert(Button::Triangle, ButtonAction::TakeOff);
        buttons.insert(Button::Cross, ButtonAction::Land);
        Self {
            mapper: MapperSettings::default(),
            buttons,
            drone: TelloSettings::default(),
            video: VideoSettings::default(),
            roll: RollSettings::default(),
        }
    }
}
