use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossbeam_channel::{unbounded, Sender};

use crate::error::{Error, Result};
use crate::events::{ControllerEvent, EventReceiver};
use crate::runtime::start_runtime_thread;

/// Shared state used by the manager and the runtime loop.
pub(crate) struct Inner {
    pub subscribers: Mutex<Vec<Sender<ControllerEvent>>>,
}

/// Manager responsible for discovering controllers and emitting events.
pub struct ControllerManager {
    pub(crate) inner: Arc<Inner>,
}

impl ControllerManager {
    /// Creates a new manager and starts the background runtime thread.
    /// Blocks briefly until the initial device enumeration completes (up to 1s).
    pub fn new() -> Result<Self> {
        let inner = Arc::new(Inner {
            subscribers: Mutex::new(Vec::new()),
        });

        let (ready_tx, ready_rx) = std::sync::mpsc::channel();
        start_runtime_thread(inner.clone(), ready_tx)?;

        // A slow enumeration is not fatal, a failed backend is.
        if let Ok(Err(reason)) = ready_rx.recv_timeout(Duration::from_secs(1)) {
            return Err(Error::BackendInit(reason));
        }

        Ok(Self { inner })
    }

    /// Subscribes to controller events. Dropped subscribers are cleaned automatically.
    pub fn subscribe(&self) -> EventReceiver {
        let (tx, rx) = unbounded();
        if let Ok(mut subs) = self.inner.subscribers.lock() {
            subs.push(tx);
        }
        rx
    }
}
