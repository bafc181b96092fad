use std::io::{self, Read};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use skypad_workspace::VideoSettings;

use super::VisionError;

/// ffmpeg arguments turning an H.264 stream on stdin into raw bgr24
/// frames of `width`x`height` on stdout.
pub fn ffmpeg_args(width: u32, height: u32) -> Vec<String> {
    [
        "-i",
        "pipe:0",
        "-pix_fmt",
        "bgr24",
        "-vcodec",
        "rawvideo",
        "-an",
        "-sn",
        "-s",
        &format!("{width}x{height}"),
        "-f",
        "rawvideo",
        "pipe:1",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

/// Running ffmpeg decoder process.
pub struct Decoder {
    child: Child,
}

impl Decoder {
    /// Spawn ffmpeg and hand back its stdin and stdout.
    pub fn spawn(settings: &VideoSettings) -> Result<(Self, ChildStdin, ChildStdout), VisionError> {
        let mut child = Command::new(&settings.ffmpeg)
            .args(ffmpeg_args(settings.width, settings.height))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| VisionError::Decoder(settings.ffmpeg.clone(), e))?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| VisionError::Decoder(settings.ffmpeg.clone(), io::ErrorKind::BrokenPipe.into()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| VisionError::Decoder(settings.ffmpeg.clone(), io::ErrorKind::BrokenPipe.into()))?;
        Ok((Self { child }, stdin, stdout))
    }

    /// Stop the decoder. Its stdout reaches EOF afterwards.
    pub fn kill(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl Drop for Decoder {
    fn drop(&mut self) {
        self.kill();
    }
}

/// Splits a raw video stream into fixed-size frames.
pub struct FrameReader<R> {
    inner: R,
    frame_size: usize,
}

impl<R: Read> FrameReader<R> {
    pub fn new(inner: R, frame_size: usize) -> Self {
        Self { inner, frame_size }
    }

    /// Read exactly one frame. `Ok(None)` at end of stream, including a
    /// trailing partial frame.
    pub fn next_frame(&mut self) -> io::Result<Option<Vec<u8>>> {
        let mut buf = vec![0u8; self.frame_size];
        match self.inner.read_exact(&mut buf) {
            Ok(()) => Ok(Some(buf)),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e),
        }
    }
}
