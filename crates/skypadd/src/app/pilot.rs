use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use colored::Colorize;
use crossbeam_channel::{never, select, tick, Receiver};
use skypad_device::Drone;
use skypad_gamepad::{ControllerEvent, EventReceiver};

use crate::{print_debug, print_error, print_info};

use super::mapper::{AxisId, StickMapper, StickSide};

/// Runs the mapper: one event thread feeding it controller input and one
/// ticker thread per stick.
///
/// Every thread exits once the stop channel is closed.
pub struct Pilot {
    mapper: Arc<StickMapper>,
    drone: Arc<dyn Drone>,
    tick: Duration,
    video_restart: Option<Duration>,
}

impl Pilot {
    pub fn new(mapper: Arc<StickMapper>, drone: Arc<dyn Drone>, tick: Duration) -> Self {
        Self {
            mapper,
            drone,
            tick,
            video_restart: None,
        }
    }

    /// Re-request the camera stream every `period`.
    #[must_use]
    pub fn with_video_restart(mut self, period: Duration) -> Self {
        self.video_restart = Some(period);
        self
    }

    pub fn spawn(
        self,
        events: EventReceiver,
        stop: &Receiver<()>,
    ) -> std::io::Result<Vec<JoinHandle<()>>> {
        let mut handles = Vec::with_capacity(3);
        handles.push(self.spawn_events(events, stop.clone())?);
        for side in [StickSide::Left, StickSide::Right] {
            handles.push(spawn_ticker(self.mapper.clone(), side, self.tick, stop.clone())?);
        }
        Ok(handles)
    }

    fn spawn_events(
        &self,
        events: EventReceiver,
        stop: Receiver<()>,
    ) -> std::io::Result<JoinHandle<()>> {
        let mapper = self.mapper.clone();
        let drone = self.drone.clone();
        let restart = match self.video_restart {
            Some(period) => {
                drone.start_video();
                tick(period)
            }
            None => never(),
        };
        thread::Builder::new()
            .name("skypad-events".into())
            .spawn(move || loop {
                select! {
                    recv(stop) -> _ => break,
                    recv(restart) -> _ => drone.start_video(),
                    recv(events) -> msg => match msg {
                        Ok(event) => handle_event(&mapper, event),
                        Err(err) => {
                            print_error!("event channel closed: {err}");
                            break;
                        }
                    },
                }
            })
    }
}

fn spawn_ticker(
    mapper: Arc<StickMapper>,
    side: StickSide,
    period: Duration,
    stop: Receiver<()>,
) -> std::io::Result<JoinHandle<()>> {
    let ticker = tick(period);
    thread::Builder::new()
        .name(format!("skypad-{side:?}-stick").to_lowercase())
        .spawn(move || loop {
            select! {
                recv(stop) -> _ => break,
                recv(ticker) -> _ => {
                    mapper.tick(side);
                }
            }
        })
}

pub(crate) fn handle_event(mapper: &StickMapper, event: ControllerEvent) {
    match event {
        ControllerEvent::Connected(info) => {
            print_info!(
                "controller connected - {0} id={1} vid=0x{2:x} pid=0x{3:x}",
                info.name,
                info.id,
                info.vendor_id,
                info.product_id
            );
        }
        ControllerEvent::Disconnected(id) => {
            print_info!("controller disconnected - id={id}");
        }
        ControllerEvent::ButtonPressed { button, .. } => {
            if let Some(action) = mapper.on_button_press(button) {
                print_info!("{button} -> {action:?}");
            }
        }
        ControllerEvent::ButtonReleased { .. } => {}
        ControllerEvent::AxisMotion { axis, value, .. } => {
            if let Some(axis) = AxisId::from_controller(axis) {
                mapper.on_axis_update(axis, value);
            } else {
                print_debug!("ignored axis {axis:?}={value}");
            }
        }
    }
}
