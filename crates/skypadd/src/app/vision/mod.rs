mod classify;
mod decoder;
mod labels;
mod onnx;
mod relay;

use std::io::Read;
use std::net::UdpSocket;
use std::thread::{self, JoinHandle};

use colored::Colorize;
use crossbeam_channel::Receiver;
use skypad_workspace::VideoSettings;
use thiserror::Error;

use crate::{print_error, print_info};

pub use classify::{Classification, Classifier, Frame, INPUT_SIZE};
pub use decoder::{ffmpeg_args, Decoder, FrameReader};
pub use labels::{Labels, UNKNOWN_LABEL};
pub use onnx::OnnxClassifier;
pub use relay::relay;

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("cannot read labels {0}: {1}")]
    Labels(String, std::io::Error),
    #[error("cannot load model {0}: {1}")]
    Model(String, String),
    #[error("inference failed: {0}")]
    Inference(String),
    #[error("cannot start decoder {0}: {1}")]
    Decoder(String, std::io::Error),
    #[error("video socket error: {0}")]
    Socket(#[from] std::io::Error),
}

/// Camera stream -> ffmpeg -> classifier.
///
/// The relay thread stops with the stop channel; the frame thread stops
/// when the decoder exits.
pub struct VideoPipeline {
    decoder: Decoder,
    handles: Vec<JoinHandle<()>>,
}

impl VideoPipeline {
    pub fn start(
        settings: &VideoSettings,
        mut classifier: Box<dyn Classifier>,
        labels: Labels,
        stop: &Receiver<()>,
    ) -> Result<Self, VisionError> {
        let socket = UdpSocket::bind(("0.0.0.0", settings.port))?;
        let (decoder, stdin, stdout) = Decoder::spawn(settings)?;

        let relay_stop = stop.clone();
        let relay_handle = thread::Builder::new()
            .name("skypad-video-relay".into())
            .spawn(move || {
                drop(relay(&socket, stdin, &relay_stop));
            })?;

        let (width, height) = (settings.width as usize, settings.height as usize);
        let frames = FrameReader::new(stdout, settings.frame_size());
        let frame_handle = thread::Builder::new()
            .name("skypad-video-frames".into())
            .spawn(move || {
                classify_frames(frames, width, height, classifier.as_mut(), &labels, |c| {
                    print_info!("{c}");
                });
            })?;

        print_info!("video pipeline listening on udp/{}", settings.port);
        Ok(Self {
            decoder,
            handles: vec![relay_handle, frame_handle],
        })
    }

    /// Stop the decoder and wait for both threads. The stop channel must
    /// already be closed.
    pub fn shutdown(mut self) {
        self.decoder.kill();
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

/// Classify every frame until the stream ends.
pub fn classify_frames<R: Read>(
    mut frames: FrameReader<R>,
    width: usize,
    height: usize,
    classifier: &mut dyn Classifier,
    labels: &Labels,
    mut report: impl FnMut(Classification),
) {
    loop {
        let data = match frames.next_frame() {
            Ok(Some(data)) => data,
            Ok(None) => break,
            Err(e) => {
                print_error!("video decoder read failed: {e}");
                break;
            }
        };
        let frame = Frame::new(width, height, data);
        if frame.is_empty() {
            continue;
        }
        match classifier.classify(&frame) {
            Ok(scores) => {
                if let Some(best) = Classification::best(&scores, labels) {
                    report(best);
                }
            }
            Err(e) => {
                print_error!("{e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    /// Scores each frame by its first byte: class = byte value.
    struct FirstByte;

    impl Classifier for FirstByte {
        fn classify(&mut self, frame: &Frame) -> Result<Vec<f32>, VisionError> {
            let mut scores = vec![0.0; 4];
            let class = usize::from(frame.data[0]);
            if class >= scores.len() {
                return Err(VisionError::Inference(format!("class {class}")));
            }
            scores[class] = 1.0;
            Ok(scores)
        }
    }

    #[test]
    fn each_frame_is_classified_in_order() {
        // three 1x1 frames: class 2, bad class 9, class 1, then a partial frame
        let stream = vec![2, 0, 0, 9, 0, 0, 1, 0, 0, 3];
        let labels = Labels::from_reader(Cursor::new("zero\none\ntwo\nthree\n")).unwrap();
        let mut seen = Vec::new();
        classify_frames(
            FrameReader::new(Cursor::new(stream), 3),
            1,
            1,
            &mut FirstByte,
            &labels,
            |c| seen.push(c.description),
        );
        assert_eq!(seen, vec!["two", "one"]);
    }
}
