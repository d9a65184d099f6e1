//! src/config.rs
//!
//! Validated run configuration built from the command line.
//!
//! Everything that can be wrong with the arguments is caught here, before
//! any input is read or the terminal is touched.

use std::time::Duration;

use thiserror::Error;

use crate::cli::Cli;
use crate::graph::{FigureConfig, Pattern, ScaleConfig};
use crate::stream::{FormatMode, InputSource};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("--no-autoscale needs both --ymin and --ymax")]
    FixedBoundsMissing,

    #[error("--ymin ({min}) must be below --ymax ({max})")]
    InvertedBounds { min: f64, max: f64 },

    #[error("--window must be at least 1")]
    EmptyWindow,

    #[error("--refresh must be a non-negative number of seconds, got {0}")]
    BadRefresh(f64),

    #[error("column lists are 1-based and non-empty, got {0:?}")]
    BadColumns(Vec<usize>),

    #[error("invalid pattern {pattern:?}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("pattern {0:?} has no capture group")]
    NoCaptureGroup(String),

    #[error("--delimiter cannot be combined with --pattern")]
    DelimiterWithPattern,
}

#[derive(Debug)]
pub struct PlotConfig {
    pub figures: Vec<FigureConfig>,
    pub prefilter: Option<Pattern>,
    pub format: FormatMode,
    pub input: InputSource,
}

fn compile(source: &str) -> Result<Pattern, ConfigError> {
    let pattern = Pattern::compile(source).map_err(|e| ConfigError::Pattern {
        pattern: source.to_string(),
        source: e,
    })?;
    if pattern.groups() == 0 {
        return Err(ConfigError::NoCaptureGroup(source.to_string()));
    }
    Ok(pattern)
}

impl PlotConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let autoscale = !cli.no_autoscale;
        if !autoscale && (cli.ymin.is_none() || cli.ymax.is_none()) {
            return Err(ConfigError::FixedBoundsMissing);
        }
        if let (Some(min), Some(max)) = (cli.ymin, cli.ymax) {
            if min >= max {
                return Err(ConfigError::InvertedBounds { min, max });
            }
        }
        if cli.window == 0 {
            return Err(ConfigError::EmptyWindow);
        }
        let refresh = Duration::try_from_secs_f64(cli.refresh)
            .map_err(|_| ConfigError::BadRefresh(cli.refresh))?;
        for set in &cli.columns {
            if set.0.is_empty() || set.0.contains(&0) {
                return Err(ConfigError::BadColumns(set.0.clone()));
            }
        }

        let patterns = cli
            .pattern
            .iter()
            .map(|p| compile(p))
            .collect::<Result<Vec<_>, _>>()?;
        let prefilter = cli.filter.as_deref().map(compile).transpose()?;

        let format = match (&cli.delimiter, patterns.is_empty()) {
            (Some(_), false) => return Err(ConfigError::DelimiterWithPattern),
            (Some(sep), true) => FormatMode::Delimited(sep.clone()),
            (None, true) => FormatMode::Whitespace,
            (None, false) => FormatMode::Pattern,
        };

        let scale = ScaleConfig {
            ymin: cli.ymin,
            ymax: cli.ymax,
            autoscale,
            memory: cli.memory,
        };
        let selections: Vec<Vec<usize>> = if cli.columns.is_empty() {
            vec![Vec::new()]
        } else {
            cli.columns.iter().map(|s| s.0.clone()).collect()
        };
        let figures = selections
            .into_iter()
            .enumerate()
            .map(|(i, columns)| FigureConfig {
                title: cli
                    .title
                    .clone()
                    .unwrap_or_else(|| format!("Figure {}", i + 1)),
                window: cli.window,
                refresh,
                columns,
                patterns: patterns.clone(),
                scale: scale.clone(),
            })
            .collect();

        let input = match &cli.serial {
            Some(port) => InputSource::Serial {
                port: port.clone(),
                baud: cli.baud,
            },
            None => InputSource::Stdin,
        };

        Ok(Self {
            figures,
            prefilter,
            format,
            input,
        })
    }

    /// One-line summary for the header and the log.
    pub fn describe(&self) -> String {
        let input = match &self.input {
            InputSource::Stdin => "stdin".to_string(),
            InputSource::Serial { port, baud } => format!("{port} @ {baud}"),
        };
        let format = match &self.format {
            FormatMode::Whitespace => "whitespace-separated".to_string(),
            FormatMode::Delimited(sep) => format!("separated by {sep:?}"),
            FormatMode::Pattern => "pattern-matched".to_string(),
        };
        let filtered = if self.prefilter.is_some() {
            ", pre-filtered"
        } else {
            ""
        };
        let window = self.figures.first().map_or(0, |f| f.window);
        format!(
            "{input}, {format}{filtered}, {} figure(s), window {window}",
            self.figures.len()
        )
    }
}
