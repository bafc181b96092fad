use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::sync::atomic::{AtomicI8, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, select, tick, Sender};

use crate::command::{Direction, MotionCommand};
use crate::error::{Error, Result};
use crate::Drone;

const SDK_MODE: &str = "command";
const TAKE_OFF: &str = "takeoff";
const LAND: &str = "land";
const STREAM_ON: &str = "streamon";

/// Connection parameters of a Tello drone.
#[derive(Debug, Clone)]
pub struct TelloSettings {
    /// Drone command endpoint, `192.168.10.1:8889` on the stock firmware.
    pub address: String,
    /// Local address the command socket binds to.
    pub local: String,
    /// Period of the `rc` stick updates.
    pub stick_interval: Duration,
    /// Period of the SDK-mode keepalive.
    pub keepalive: Duration,
}

impl Default for TelloSettings {
    fn default() -> Self {
        Self {
            address: "192.168.10.1:8889".into(),
            local: "0.0.0.0:8889".into(),
            stick_interval: Duration::from_millis(20),
            keepalive: Duration::from_secs(5),
        }
    }
}

/// Latest stick state, each channel in `-100..=100`.
#[derive(Debug, Default)]
struct Sticks {
    left_right: AtomicI8,
    forward_backward: AtomicI8,
    up_down: AtomicI8,
    yaw: AtomicI8,
}

impl Sticks {
    fn rc_line(&self) -> String {
        format!(
            "rc {} {} {} {}",
            self.left_right.load(Ordering::Relaxed),
            self.forward_backward.load(Ordering::Relaxed),
            self.up_down.load(Ordering::Relaxed),
            self.yaw.load(Ordering::Relaxed),
        )
    }

    fn channel(&self, direction: Direction) -> &AtomicI8 {
        match direction {
            Direction::Left | Direction::Right => &self.left_right,
            Direction::Forward | Direction::Backward => &self.forward_backward,
            Direction::Up | Direction::Down => &self.up_down,
            Direction::Clockwise | Direction::CounterClockwise => &self.yaw,
        }
    }

    fn set(&self, direction: Direction, magnitude: u8) {
        let command = MotionCommand::new(direction, magnitude);
        self.channel(direction).store(command.signed(), Ordering::Relaxed);
    }
}

/// Tello connection over the SDK text interface.
///
/// Motion calls only update the stick state; a background thread sends
/// it as an `rc` command every `stick_interval`.
pub struct TelloLink {
    socket: UdpSocket,
    target: SocketAddr,
    sticks: Arc<Sticks>,
    stop_tx: Sender<()>,
    worker: Option<JoinHandle<()>>,
}

impl TelloLink {
    /// Bind the command socket, enter SDK mode and start the stick loop.
    pub fn connect(settings: &TelloSettings) -> Result<Self> {
        let target = settings
            .address
            .to_socket_addrs()
            .map_err(|_| Error::InvalidAddress(settings.address.clone()))?
            .next()
            .ok_or_else(|| Error::InvalidAddress(settings.address.clone()))?;
        let socket = UdpSocket::bind(&settings.local)?;
        socket.send_to(SDK_MODE.as_bytes(), target)?;

        let sticks = Arc::new(Sticks::default());
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let worker_socket = socket.try_clone()?;
        let worker_sticks = sticks.clone();
        let stick_ticker = tick(settings.stick_interval);
        let keepalive_ticker = tick(settings.keepalive);

        let worker = thread::Builder::new()
            .name("skypad-tello".into())
            .spawn(move || loop {
                select! {
                    recv(stop_rx) -> _ => break,
                    recv(stick_ticker) -> _ => {
                        send_line(&worker_socket, target, &worker_sticks.rc_line());
                    }
                    recv(keepalive_ticker) -> _ => {
                        send_line(&worker_socket, target, SDK_MODE);
                    }
                }
            })?;

        log::info!("tello link up - {target}");
        Ok(Self {
            socket,
            target,
            sticks,
            stop_tx,
            worker: Some(worker),
        })
    }

    /// Address of the drone this link talks to.
    pub fn target(&self) -> SocketAddr {
        self.target
    }

    fn send(&self, line: &str) {
        send_line(&self.socket, self.target, line);
    }
}

fn send_line(socket: &UdpSocket, target: SocketAddr, line: &str) {
    if let Err(e) = socket.send_to(line.as_bytes(), target) {
        log::error!("tello send failed ({line}): {e}");
    }
}

impl Drone for TelloLink {
    fn forward(&self, magnitude: u8) {
        self.sticks.set(Direction::Forward, magnitude);
    }

    fn backward(&self, magnitude: u8) {
        self.sticks.set(Direction::Backward, magnitude);
    }

    fn left(&self, magnitude: u8) {
        self.sticks.set(Direction::Left, magnitude);
    }

    fn right(&self, magnitude: u8) {
        self.sticks.set(Direction::Right, magnitude);
    }

    fn up(&self, magnitude: u8) {
        self.sticks.set(Direction::Up, magnitude);
    }

    fn down(&self, magnitude: u8) {
        self.sticks.set(Direction::Down, magnitude);
    }

    fn clockwise(&self, magnitude: u8) {
        self.sticks.set(Direction::Clockwise, magnitude);
    }

    fn counter_clockwise(&self, magnitude: u8) {
        self.sticks.set(Direction::CounterClockwise, magnitude);
    }

    fn take_off(&self) {
        self.send(TAKE_OFF);
    }

    fn land(&self) {
        self.send(LAND);
    }

    fn start_video(&self) {
        self.send(STREAM_ON);
    }
}

impl Drop for TelloLink {
    fn drop(&mut self) {
        let _ = self.stop_tx.try_send(());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drone_socket() -> UdpSocket {
        let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
        socket
            .set_read_timeout(Some(Duration::from_secs(2)))
            .unwrap();
        socket
    }

    fn link_to(drone: &UdpSocket) -> TelloLink {
        let settings = TelloSettings {
            address: drone.local_addr().unwrap().to_string(),
            local: "127.0.0.1:0".into(),
            stick_interval: Duration::from_millis(5),
            keepalive: Duration::from_secs(60),
        };
        TelloLink::connect(&settings).unwrap()
    }

    fn wait_for(drone: &UdpSocket, wanted: impl Fn(&str) -> bool) -> String {
        let mut buf = [0u8; 64];
        for _ in 0..500 {
            let (n, _) = drone.recv_from(&mut buf).unwrap();
            let line = String::from_utf8_lossy(&buf[..n]).to_string();
            if wanted(&line) {
                return line;
            }
        }
        panic!("expected datagram never arrived");
    }

    #[test]
    fn rc_line_lists_channels_in_sdk_order() {
        let sticks = Sticks::default();
        sticks.left_right.store(-5, Ordering::Relaxed);
        sticks.forward_backward.store(30, Ordering::Relaxed);
        sticks.up_down.store(0, Ordering::Relaxed);
        sticks.yaw.store(-100, Ordering::Relaxed);
        assert_eq!(sticks.rc_line(), "rc -5 30 0 -100");
    }

    #[test]
    fn set_writes_the_signed_value_to_its_channel() {
        let sticks = Sticks::default();
        sticks.set(Direction::Right, 30);
        sticks.set(Direction::Backward, 250);
        sticks.set(Direction::Down, 7);
        sticks.set(Direction::Clockwise, 100);
        sticks.set(Direction::CounterClockwise, 12);
        assert_eq!(sticks.rc_line(), "rc 30 -100 -7 -12");
    }

    #[test]
    fn connect_enters_sdk_mode_first() {
        let drone = drone_socket();
        let _link = link_to(&drone);
        let mut buf = [0u8; 64];
        let (n, _) = drone.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"command");
    }

    #[test]
    fn motion_calls_show_up_in_rc_updates() {
        let drone = drone_socket();
        let link = link_to(&drone);
        link.backward(40);
        link.left(10);
        link.up(100);
        link.counter_clockwise(25);
        let line = wait_for(&drone, |l| l == "rc -10 -40 100 -25");
        assert_eq!(line, "rc -10 -40 100 -25");
    }

    #[test]
    fn take_off_and_land_are_sent_verbatim() {
        let drone = drone_socket();
        let link = link_to(&drone);
        link.take_off();
        assert_eq!(wait_for(&drone, |l| !l.starts_with("rc") && l != "command"), "takeoff");
        link.land();
        assert_eq!(wait_for(&drone, |l| !l.starts_with("rc") && l != "command"), "land");
    }

    #[test]
    fn connect_rejects_unresolvable_address() {
        let settings = TelloSettings {
            address: "not an address".into(),
            local: "127.0.0.1:0".into(),
            ..TelloSettings::default()
        };
        assert!(matches!(
            TelloLink::connect(&settings),
            Err(Error::InvalidAddress(_))
        ));
    }
}
