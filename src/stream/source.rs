//! src/stream/source.rs
//!
//! Line readers for stdin and serial ports, with end-of-stream detection.

use std::io::{self, BufRead, BufReader, ErrorKind};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use log::{debug, info, warn};

/// Lines buffered between the reader thread and the engine.
const BACKLOG: usize = 256;

/// Where input lines come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    Serial { port: String, baud: u32 },
}

pub struct LineSource {
    reader: Box<dyn BufRead + Send>,
    buf: Vec<u8>,
    line: String,
}

impl LineSource {
    pub fn new(reader: Box<dyn BufRead + Send>) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line: String::new(),
        }
    }

    /// Open the given input.
    pub fn open(source: &InputSource) -> Result<Self> {
        match source {
            InputSource::Stdin => Ok(Self::new(Box::new(BufReader::new(io::stdin())))),
            InputSource::Serial { port, baud } => {
                let serial = serialport::new(port, *baud)
                    .timeout(Duration::from_secs(10))
                    .open()
                    .wrap_err_with(|| format!("failed to open serial port {port}"))?;
                info!("reading from serial port {port} @ {baud} baud");
                Ok(Self::new(Box::new(BufReader::new(serial))))
            }
        }
    }

    /// Next line, without its terminator.
    ///
    /// `None` marks end of stream: EOF, a blank line, or a read failure.
    /// Read timeouts are retried and keep the part of the line already read.
    /// Bytes that are not UTF-8 are replaced, not fatal.
    pub fn next_line(&mut self) -> Option<&str> {
        self.buf.clear();
        loop {
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) if self.buf.is_empty() => return None,
                Ok(_) => break,
                Err(e) if e.kind() == ErrorKind::TimedOut => {
                    debug!("read timed out after {} bytes, retrying", self.buf.len());
                }
                Err(e) => {
                    warn!("read failed, ending stream: {e}");
                    return None;
                }
            }
        }
        self.line = String::from_utf8_lossy(&self.buf).into_owned();
        let line = self.line.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            return None;
        }
        Some(line)
    }

    /// Read on a background thread until end of stream.
    ///
    /// The channel disconnects once the stream has ended.
    pub fn spawn(mut self) -> Receiver<String> {
        let (tx, rx) = mpsc::sync_channel(BACKLOG);
        thread::spawn(move || {
            while let Some(line) = self.next_line() {
                if tx.send(line.to_string()).is_err() {
                    break;
                }
            }
            debug!("reader exiting");
        });
        rx
    }
}
