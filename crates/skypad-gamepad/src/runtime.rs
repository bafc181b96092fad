use std::sync::mpsc::Sender as ReadySender;
use std::sync::Arc;
use std::thread;

use ahash::AHashMap;
use sdl2::controller::{Axis as SdlAxis, Button as SdlButton, GameController};
use sdl2::event::Event;
use sdl2::GameControllerSubsystem;

use crate::error::Result;
use crate::events::ControllerEvent;
use crate::manager::Inner;
use crate::types::{Axis, Button, ControllerId, ControllerInfo};

/// Analog trigger travel above which L2/R2 count as pressed.
const TRIGGER_THRESHOLD: i16 = 20000;

/// Per-thread SDL state. SDL must live entirely within the runtime thread.
struct Devices {
    subsystem: GameControllerSubsystem,
    controllers: AHashMap<ControllerId, GameController>,
    trigger_state: AHashMap<ControllerId, (bool, bool)>,
}

/// Starts the SDL2-backed runtime thread that drives device discovery and events.
pub(crate) fn start_runtime_thread(
    inner: Arc<Inner>,
    ready_tx: ReadySender<std::result::Result<(), String>>,
) -> Result<()> {
    thread::Builder::new()
        .name("skypad-gamepad".into())
        .spawn(move || {
            let sdl_ctx = match sdl2::init() {
                Ok(ctx) => ctx,
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };
            let subsystem = match sdl_ctx.game_controller() {
                Ok(c) => c,
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };
            let mut event_pump = match sdl_ctx.event_pump() {
                Ok(p) => p,
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };

            let mut devices = Devices {
                subsystem,
                controllers: AHashMap::new(),
                trigger_state: AHashMap::new(),
            };

            // Initial enumeration
            if let Ok(num_joysticks) = devices.subsystem.num_joysticks() {
                for index in 0..num_joysticks {
                    devices.open(&inner, index);
                }
            }

            let _ = ready_tx.send(Ok(()));

            loop {
                // Wait for an SDL event or timeout to reduce idle CPU usage
                if let Some(event) = event_pump.wait_event_timeout(10) {
                    devices.handle(&inner, event);
                    // Drain any additional queued events quickly
                    for event in event_pump.poll_iter() {
                        devices.handle(&inner, event);
                    }
                }
            }
        })?;
    Ok(())
}

impl Devices {
    fn open(&mut self, inner: &Inner, index: u32) {
        if !self.subsystem.is_game_controller(index) {
            return;
        }
        let Ok(controller) = self.subsystem.open(index) else {
            return;
        };
        let id: ControllerId = controller.instance_id();
        if self.controllers.contains_key(&id) {
            return;
        }
        let info = ControllerInfo {
            id,
            name: controller.name(),
            vendor_id: controller.vendor_id().unwrap_or(0),
            product_id: controller.product_id().unwrap_or(0),
        };
        self.controllers.insert(id, controller);
        broadcast(inner, ControllerEvent::Connected(info));
    }

    fn handle(&mut self, inner: &Inner, event: Event) {
        match event {
            Event::ControllerDeviceAdded { which, .. } => {
                self.open(inner, which);
            }
            Event::ControllerDeviceRemoved { which, .. } => {
                let id: ControllerId = which;
                self.controllers.remove(&id);
                self.trigger_state.remove(&id);
                broadcast(inner, ControllerEvent::Disconnected(id));
            }
            Event::ControllerButtonDown { which, button, .. } => {
                if let Some(button) = map_sdl_button(button) {
                    broadcast(inner, ControllerEvent::ButtonPressed { id: which, button });
                }
            }
            Event::ControllerButtonUp { which, button, .. } => {
                if let Some(button) = map_sdl_button(button) {
                    broadcast(inner, ControllerEvent::ButtonReleased { id: which, button });
                }
            }
            Event::ControllerAxisMotion {
                which, axis, value, ..
            } => {
                let id = which;
                broadcast(
                    inner,
                    ControllerEvent::AxisMotion {
                        id,
                        axis: map_sdl_axis(axis),
                        value,
                    },
                );

                // Triggers also report as L2/R2 buttons
                let entry = self.trigger_state.entry(id).or_insert((false, false));
                let (held, button) = match axis {
                    SdlAxis::TriggerLeft => (&mut entry.0, Button::L2),
                    SdlAxis::TriggerRight => (&mut entry.1, Button::R2),
                    _ => return,
                };
                let pressed = value > TRIGGER_THRESHOLD;
                if pressed && !*held {
                    *held = true;
                    broadcast(inner, ControllerEvent::ButtonPressed { id, button });
                } else if !pressed && *held {
                    *held = false;
                    broadcast(inner, ControllerEvent::ButtonReleased { id, button });
                }
            }
            _ => {}
        }
    }
}

fn map_sdl_button(button: SdlButton) -> Option<Button> {
    Some(match button {
        SdlButton::A => Button::Cross,
        SdlButton::B => Button::Circle,
        SdlButton::X => Button::Square,
        SdlButton::Y => Button::Triangle,
        SdlButton::Back => Button::Select,
        SdlButton::Guide => Button::Home,
        SdlButton::Start => Button::Start,
        SdlButton::LeftStick => Button::L3,
        SdlButton::RightStick => Button::R3,
        SdlButton::LeftShoulder => Button::L1,
        SdlButton::RightShoulder => Button::R1,
        SdlButton::DPadUp => Button::DPadUp,
        SdlButton::DPadDown => Button::DPadDown,
        SdlButton::DPadLeft => Button::DPadLeft,
        SdlButton::DPadRight => Button::DPadRight,
        _ => return None,
    })
}

fn map_sdl_axis(axis: SdlAxis) -> Axis {
    match axis {
        SdlAxis::LeftX => Axis::LeftX,
        SdlAxis::LeftY => Axis::LeftY,
        SdlAxis::RightX => Axis::RightX,
        SdlAxis::RightY => Axis::RightY,
        SdlAxis::TriggerLeft => Axis::LeftTrigger,
        SdlAxis::TriggerRight => Axis::RightTrigger,
    }
}

fn broadcast(inner: &Inner, event: ControllerEvent) {
    if let Ok(mut subs) = inner.subscribers.lock() {
        subs.retain(|tx| tx.send(event.clone()).is_ok());
    }
}
