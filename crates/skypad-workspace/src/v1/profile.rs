use ahash::AHashMap;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileV1 {
    pub version: u8,
    #[serde(default)]
    pub mapper: ProfileV1Mapper,
    /// `None` keeps the default bindings, an empty map disables buttons.
    #[serde(default)]
    pub buttons: Option<AHashMap<String, String>>, // button -> action
    #[serde(default)]
    pub drone: ProfileV1Drone,
    #[serde(default)]
    pub video: ProfileV1Video,
    #[serde(default)]
    pub roll: ProfileV1Roll,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProfileV1Mapper {
    #[serde(default)]
    pub offset: Option<f64>,
    #[serde(default)]
    pub floor: Option<f64>,
    #[serde(default)]
    pub tick_ms: Option<u64>,
    #[serde(default)]
    pub deadzone: ProfileV1DeadZone,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProfileV1DeadZone {
    #[serde(default)]
    pub translate: Option<i32>,
    #[serde(default)]
    pub yaw: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProfileV1Drone {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub local: Option<String>,
    #[serde(default)]
    pub stick_interval_ms: Option<u64>,
    #[serde(default)]
    pub keepalive_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProfileV1Video {
    #[serde(default)]
    pub port: Option<u16>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub ffmpeg: Option<String>,
    #[serde(default)]
    pub restart_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProfileV1Roll {
    #[serde(default)]
    pub interval_ms: Option<u64>,
    #[serde(default)]
    pub speed: Option<u8>,
}
