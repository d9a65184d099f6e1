//! src/cli.rs
//!
//! Command-line arguments.

use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "streamplot",
    version,
    about = "Plot numeric columns streamed on stdin in the terminal",
    long_about = "Reads lines from stdin (or a serial port) and keeps a sliding window of the \
                  last N samples per column, redrawn live. A line without any number names the \
                  series; a blank line or end of input ends the stream."
)]
pub struct Cli {
    /// Samples kept per series
    #[arg(short, long, default_value_t = 500)]
    pub window: usize,

    /// Minimum seconds between redraws
    #[arg(short, long, default_value_t = 0.1)]
    pub refresh: f64,

    /// Fixed lower y bound (initial bound when autoscaling)
    #[arg(long, allow_negative_numbers = true)]
    pub ymin: Option<f64>,

    /// Fixed upper y bound (initial bound when autoscaling)
    #[arg(long, allow_negative_numbers = true)]
    pub ymax: Option<f64>,

    /// Keep the y axis fixed at --ymin/--ymax
    #[arg(long)]
    pub no_autoscale: bool,

    /// Autoscale only widens, keeping extrema that scrolled out of the window
    #[arg(short, long)]
    pub memory: bool,

    /// Split on SEP instead of whitespace (',' if no SEP is given)
    #[arg(short, long, value_name = "SEP", num_args = 0..=1, default_missing_value = ",")]
    pub delimiter: Option<String>,

    /// 1-based columns for one figure, e.g. "1,3". Repeat for more figures
    #[arg(short, long, value_name = "LIST")]
    pub columns: Vec<ColumnSet>,

    /// Only keep lines fully matching REGEX, and plot its first group
    #[arg(short, long, value_name = "REGEX")]
    pub filter: Option<String>,

    /// One series per REGEX, valued by its first group (replaces columns)
    #[arg(short, long, value_name = "REGEX")]
    pub pattern: Vec<String>,

    /// Figure title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Read from a serial port instead of stdin
    #[arg(long, value_name = "PORT")]
    pub serial: Option<String>,

    /// Serial baud rate
    #[arg(long, default_value_t = 115_200)]
    pub baud: u32,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write log output to a file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Comma-separated list of column numbers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnSet(pub Vec<usize>);

impl FromStr for ColumnSet {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|c| c.parse::<usize>().map_err(|e| format!("{c:?}: {e}")))
            .collect::<Result<Vec<_>, _>>()
            .map(ColumnSet)
    }
}
