use std::sync::Arc;
use std::thread::{self, JoinHandle};

use colored::Colorize;
use crossbeam_channel::{select, tick, Receiver};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use skypad_device::Sphero;
use skypad_workspace::RollSettings;

use crate::print_debug;

/// One colour and roll issued to the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollStep {
    pub rgb: (u8, u8, u8),
    pub speed: u8,
    pub heading: u16,
}

/// Gives a Sphero a random colour and heading on every period.
pub struct Roller {
    sphero: Arc<dyn Sphero>,
    settings: RollSettings,
}

impl Roller {
    pub fn new(sphero: Arc<dyn Sphero>, settings: RollSettings) -> Self {
        Self { sphero, settings }
    }

    pub fn step<R: Rng>(&self, rng: &mut R) -> RollStep {
        let rgb = (rng.gen_range(0..255), rng.gen_range(0..255), rng.gen_range(0..255));
        let heading = rng.gen_range(0..360);
        self.sphero.set_rgb(rgb.0, rgb.1, rgb.2);
        self.sphero.roll(self.settings.speed, heading);
        RollStep {
            rgb,
            speed: self.settings.speed,
            heading,
        }
    }

    /// Step on every interval until `stop` closes.
    pub fn spawn(self, stop: &Receiver<()>) -> std::io::Result<JoinHandle<()>> {
        let stop = stop.clone();
        let ticker = tick(self.settings.interval);
        thread::Builder::new()
            .name("skypad-roll".into())
            .spawn(move || {
                let mut rng = StdRng::from_entropy();
                loop {
                    select! {
                        recv(stop) -> _ => break,
                        recv(ticker) -> _ => {
                            let step = self.step(&mut rng);
                            print_debug!("roll {step:?}");
                        }
                    }
                }
            })
    }
}
