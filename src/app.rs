//! src/app.rs
//!
//! Top-level application: validate the configuration, open the input, then
//! stream lines into the engine until the input ends.
//!
//! # Overview
//!
//! Each input line is cut into fields and fed to every figure. A figure
//! holds one series per column (or per `--pattern`), each keeping the last
//! `--window` samples. Figures redraw at most once per `--refresh` seconds
//! while data flows, and once more, trimmed to the samples actually seen,
//! when the stream ends. The final picture then stays on screen until `q`.
//!
//! # Input rules
//!
//! - A line with no number in any observed column names the series and adds
//!   no samples:
//!   ```text
//!   time  speed
//!   1     2.5
//!   ```
//! - A non-numeric or missing value on a data line repeats the previous
//!   sample of that series (0 if there is none), and the first such text
//!   becomes the series title if it has none yet.
//! - A blank line, end of input, or a read error ends the stream.
//!
//! # Examples
//!
//! ```text
//! $ seq 1000 | awk '{print sin($1/20), cos($1/20)}' | streamplot -w 200
//! $ tail -f sensors.csv | streamplot -d -c 1,3 -c 2 --memory
//! $ streamplot --serial /dev/ttyACM0 -p 'MSG (\d+) .*' -p 'RSSI_PACKET: (\S+) dBm'
//! ```

use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use color_eyre::Result;
use log::info;

use crate::cli::Cli;
use crate::config::PlotConfig;
use crate::render::{RenderSurface, TerminalSurface};
use crate::stream::{LineSource, StreamEngine};

/// How long to wait for a line before checking the surface for input.
const IDLE_TICK: Duration = Duration::from_millis(100);

/// Feed every line of `source` to the engine, then finalize it.
///
/// Lines are read on their own thread so the surface keeps getting polled
/// while the input is stalled. An error from `poll` aborts the stream.
pub fn stream(
    engine: &mut StreamEngine,
    source: LineSource,
    surface: &mut dyn RenderSurface,
) -> Result<()> {
    let lines = source.spawn();
    loop {
        match lines.recv_timeout(IDLE_TICK) {
            Ok(line) => engine.ingest(&line, surface)?,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        surface.poll()?;
    }
    engine.finalize(surface)
}

pub fn run(cli: &Cli) -> Result<()> {
    let config = PlotConfig::from_cli(cli)?;
    let heading = config.describe();
    info!("{heading}");

    let source = LineSource::open(&config.input)?;
    let mut engine = StreamEngine::new(config.figures, config.prefilter, config.format);

    let mut surface = TerminalSurface::init(&heading)?;
    stream(&mut engine, source, &mut surface)
}
