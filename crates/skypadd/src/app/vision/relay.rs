use std::io::{ErrorKind, Write};
use std::net::UdpSocket;
use std::time::Duration;

use colored::Colorize;
use crossbeam_channel::{Receiver, TryRecvError};

use crate::print_error;

/// How long a receive may block before the stop channel is checked again.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Largest datagram the drone sends.
const MAX_DATAGRAM: usize = 2048;

/// Copy video datagrams from `socket` into `sink` until `stop` closes or
/// the sink is gone. Returns the sink.
pub fn relay<W: Write>(socket: &UdpSocket, mut sink: W, stop: &Receiver<()>) -> W {
    if let Err(e) = socket.set_read_timeout(Some(POLL_INTERVAL)) {
        print_error!("video socket setup failed: {e}");
        return sink;
    }
    let mut buf = [0u8; MAX_DATAGRAM];
    loop {
        if !matches!(stop.try_recv(), Err(TryRecvError::Empty)) {
            break;
        }
        let n = match socket.recv_from(&mut buf) {
            Ok((n, _)) => n,
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => continue,
            Err(e) => {
                print_error!("video receive failed: {e}");
                continue;
            }
        };
        if let Err(e) = sink.write_all(&buf[..n]) {
            print_error!("video decoder write failed: {e}");
            if e.kind() == ErrorKind::BrokenPipe {
                break;
            }
        }
    }
    sink
}
