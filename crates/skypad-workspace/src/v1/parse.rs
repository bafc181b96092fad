use std::time::Duration;

use skypad_device::TelloSettings;
use skypad_gamepad::Button;

use crate::profile::{
    ButtonAction, ButtonBindings, DeadZones, MapperSettings, Profile, RollSettings,
    VideoSettings,
};

use super::profile::{
    ProfileV1, ProfileV1Drone, ProfileV1Mapper, ProfileV1Roll, ProfileV1Video,
};
use super::Error;

impl ProfileV1 {
    pub fn parse(&self) -> Result<Profile, Error> {
        let defaults = Profile::default();
        let buttons = match &self.buttons {
            Some(raw) => parse_buttons(raw.iter())?,
            None => defaults.buttons,
        };

        Ok(Profile {
            mapper: parse_mapper(&self.mapper)?,
            buttons,
            drone: parse_drone(&self.drone)?,
            video: parse_video(&self.video)?,
            roll: parse_roll(&self.roll)?,
        })
    }
}

fn parse_buttons<'a>(
    raw: impl Iterator<Item = (&'a String, &'a String)>,
) -> Result<ButtonBindings, Error> {
    let mut bindings = ButtonBindings::new();
    for (button, action) in raw {
        let button = button
            .parse::<Button>()
            .map_err(Error::InvalidButton)?;
        let action = parse_button_action(action)
            .ok_or_else(|| Error::InvalidAction(button.to_string(), action.clone()))?;
        bindings.insert(button, action);
    }
    Ok(bindings)
}

fn parse_button_action(raw: &str) -> Option<ButtonAction> {
    Some(match raw.trim().to_lowercase().as_str() {
        "take_off" | "takeoff" => ButtonAction::TakeOff,
        "land" => ButtonAction::Land,
        _ => return None,
    })
}

fn parse_mapper(raw: &ProfileV1Mapper) -> Result<MapperSettings, Error> {
    let defaults = MapperSettings::default();

    let offset = raw.offset.unwrap_or(defaults.offset);
    if !offset.is_finite() || offset <= 0.0 {
        return Err(Error::InvalidValue("mapper.offset", offset.to_string()));
    }
    let floor = raw.floor.unwrap_or(defaults.floor);
    if !(0.0..1.0).contains(&floor) {
        return Err(Error::InvalidValue("mapper.floor", floor.to_string()));
    }
    let tick = positive_ms("mapper.tick_ms", raw.tick_ms, defaults.tick)?;

    let translate = raw.deadzone.translate.unwrap_or(defaults.deadzone.translate);
    if translate < 0 {
        return Err(Error::InvalidValue(
            "mapper.deadzone.translate",
            translate.to_string(),
        ));
    }
    let yaw = raw.deadzone.yaw.unwrap_or(defaults.deadzone.yaw);
    if yaw < 0 {
        return Err(Error::InvalidValue("mapper.deadzone.yaw", yaw.to_string()));
    }

    Ok(MapperSettings {
        offset,
        floor,
        tick,
        deadzone: DeadZones { translate, yaw },
    })
}

fn parse_drone(raw: &ProfileV1Drone) -> Result<TelloSettings, Error> {
    let defaults = TelloSettings::default();
    Ok(TelloSettings {
        address: raw.address.clone().unwrap_or(defaults.address),
        local: raw.local.clone().unwrap_or(defaults.local),
        stick_interval: positive_ms(
            "drone.stick_interval_ms",
            raw.stick_interval_ms,
            defaults.stick_interval,
        )?,
        keepalive: positive_ms("drone.keepalive_ms", raw.keepalive_ms, defaults.keepalive)?,
    })
}

fn parse_video(raw: &ProfileV1Video) -> Result<VideoSettings, Error> {
    let defaults = VideoSettings::default();
    let width = raw.width.unwrap_or(defaults.width);
    if width == 0 {
        return Err(Error::InvalidValue("video.width", width.to_string()));
    }
    let height = raw.height.unwrap_or(defaults.height);
    if height == 0 {
        return Err(Error::InvalidValue("video.height", height.to_string()));
    }
    Ok(VideoSettings {
        port: raw.port.unwrap_or(defaults.port),
        width,
        height,
        ffmpeg: raw.ffmpeg.clone().unwrap_or(defaults.ffmpeg),
        restart: positive_ms("video.restart_ms", raw.restart_ms, defaults.restart)?,
    })
}

fn parse_roll(raw: &ProfileV1Roll) -> Result<RollSettings, Error> {
    let defaults = RollSettings::default();
    Ok(RollSettings {
        interval: positive_ms("roll.interval_ms", raw.interval_ms, defaults.interval)?,
        speed: raw.speed.unwrap_or(defaults.speed),
    })
}

fn positive_ms(
    field: &'static str,
    raw: Option<u64>,
    default: Duration,
) -> Result<Duration, Error> {
    match raw {
        Some(0) => Err(Error::InvalidValue(field, "0".into())),
        Some(ms) => Ok(Duration::from_millis(ms)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Result<Profile, Error> {
        let raw: ProfileV1 = serde_yaml::from_str(yaml).expect("valid yaml");
        raw.parse()
    }

    #[test]
    fn full_profile_overrides_defaults() {
        let profile = parse(
            r#"
version: 1
mapper:
  offset: 32768
  floor: 0.05
  tick_ms: 20
  deadzone:
    translate: 500
    yaw: 1000
buttons:
  start: take_off
  select: land
drone:
  address: 127.0.0.1:9000
  stick_interval_ms: 50
video:
  port: 6038
  width: 640
  height: 480
  ffmpeg: /usr/local/bin/ffmpeg
roll:
  interval_ms: 1000
  speed: 40
"#,
        )
        .unwrap();

        assert_eq!(profile.mapper.offset, 32768.0);
        assert_eq!(profile.mapper.floor, 0.05);
        assert_eq!(profile.mapper.tick, Duration::from_millis(20));
        assert_eq!(profile.mapper.deadzone, DeadZones { translate: 500, yaw: 1000 });
        assert_eq!(profile.buttons.get(&Button::Start), Some(&ButtonAction::TakeOff));
        assert_eq!(profile.buttons.get(&Button::Select), Some(&ButtonAction::Land));
        assert_eq!(profile.buttons.get(&Button::Triangle), None);
        assert_eq!(profile.drone.address, "127.0.0.1:9000");
        assert_eq!(profile.drone.local, TelloSettings::default().local);
        assert_eq!(profile.drone.stick_interval, Duration::from_millis(50));
        assert_eq!(profile.video.frame_size(), 640 * 480 * 3);
        assert_eq!(profile.video.port, 6038);
        assert_eq!(profile.roll, RollSettings { interval: Duration::from_secs(1), speed: 40 });
    }

    #[test]
    fn default_buttons_are_triangle_and_cross() {
        let profile = parse("version: 1\n").unwrap();
        assert_eq!(profile.buttons.get(&Button::Triangle), Some(&ButtonAction::TakeOff));
        assert_eq!(profile.buttons.get(&Button::Cross), Some(&ButtonAction::Land));
    }

    #[test]
    fn empty_button_map_disables_buttons() {
        let profile = parse("version: 1\nbuttons: {}\n").unwrap();
        assert!(profile.buttons.is_empty());
    }

    #[test]
    fn rejects_unknown_button() {
        let err = parse("version: 1\nbuttons:\n  turbo: land\n").unwrap_err();
        assert!(matches!(err, Error::InvalidButton(name) if name == "turbo"));
    }

    #[test]
    fn rejects_unknown_action() {
        let err = parse("version: 1\nbuttons:\n  cross: flip\n").unwrap_err();
        assert!(matches!(err, Error::InvalidAction(_, action) if action == "flip"));
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(
            parse("version: 1\nmapper:\n  offset: 0\n"),
            Err(Error::InvalidValue("mapper.offset", _))
        ));
        assert!(matches!(
            parse("version: 1\nmapper:\n  floor: 1.0\n"),
            Err(Error::InvalidValue("mapper.floor", _))
        ));
        assert!(matches!(
            parse("version: 1\nmapper:\n  deadzone:\n    yaw: -1\n"),
            Err(Error::InvalidValue("mapper.deadzone.yaw", _))
        ));
        assert!(matches!(
            parse("version: 1\nmapper:\n  tick_ms: 0\n"),
            Err(Error::InvalidValue("mapper.tick_ms", _))
        ));
        assert!(matches!(
            parse("version: 1\nvideo:\n  width: 0\n"),
            Err(Error::InvalidValue("video.width", _))
        ));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let raw: Result<ProfileV1, _> = serde_yaml::from_str("version: 1\nmapper:\n  gain: 2\n");
        assert!(raw.is_err());
    }
}
