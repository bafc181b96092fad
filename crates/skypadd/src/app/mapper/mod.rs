mod policy;
mod store;

use std::sync::Arc;

use skypad_device::{Drone, MotionCommand};
use skypad_gamepad::Button;
use skypad_workspace::{ButtonAction, ButtonBindings, MapperSettings};

pub use policy::{AxisRule, Normalizer, Policy, StickRules};
pub use store::{AxisId, AxisStore, StickPair, StickSide};

/// Turns stick positions into drone motion commands and button presses
/// into discrete actions.
///
/// All methods take `&self`: the event thread calls the `on_*` handlers
/// while one ticker per stick calls [`StickMapper::tick`].
pub struct StickMapper {
    store: AxisStore,
    policy: Policy,
    bindings: ButtonBindings,
    drone: Arc<dyn Drone>,
}

impl StickMapper {
    pub fn new(
        settings: &MapperSettings,
        bindings: ButtonBindings,
        drone: Arc<dyn Drone>,
    ) -> Self {
        Self {
            store: AxisStore::new(),
            policy: Policy::from_settings(settings),
            bindings,
            drone,
        }
    }

    /// Record the latest raw value of an axis.
    #[inline]
    pub fn on_axis_update(&self, axis: AxisId, raw: i16) {
        self.store.store(axis, raw);
    }

    /// Fire the action bound to `button`, if any.
    pub fn on_button_press(&self, button: Button) -> Option<ButtonAction> {
        let action = *self.bindings.get(&button)?;
        match action {
            ButtonAction::TakeOff => self.drone.take_off(),
            ButtonAction::Land => self.drone.land(),
        }
        Some(action)
    }

    /// Issue one command per axis of `side` from the latest stick values.
    pub fn tick(&self, side: StickSide) -> [MotionCommand; 2] {
        let commands = self.policy.commands(side, self.store.stick(side));
        for command in &commands {
            command.send_to(self.drone.as_ref());
        }
        commands
    }

    pub fn store(&self) -> &AxisStore {
        &self.store
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }
}
