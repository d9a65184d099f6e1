//! src/graph/config.rs
//!
//! Construction parameters for a figure and its series.

use std::time::Duration;

use regex::Regex;

/// Y-scale parameters shared by all series of one figure.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
    /// Fixed lower bound, or the starting lower bound under autoscale.
    pub ymin: Option<f64>,

    /// Fixed upper bound, or the starting upper bound under autoscale.
    pub ymax: Option<f64>,

    pub autoscale: bool,

    /// Widen-only autoscale.
    pub memory: bool,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            ymin: None,
            ymax: None,
            autoscale: true,
            memory: false,
        }
    }
}

/// A full-match extraction pattern. The first capture group is the value.
#[derive(Clone, Debug)]
pub struct Pattern {
    /// Text as given by the user, used as the default series label.
    pub source: String,
    pub regex: Regex,
}

impl Pattern {
    /// Compile `source` anchored at both ends.
    pub fn compile(source: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{source})$"))?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// Number of capture groups, not counting the implicit whole match.
    pub fn groups(&self) -> usize {
        self.regex.captures_len() - 1
    }

    /// First capture group of a full match. `None` if the text does not match.
    /// A group that did not participate yields an empty string.
    pub fn extract<'t>(&self, text: &'t str) -> Option<&'t str> {
        let caps = self.regex.captures(text)?;
        Some(caps.get(1).map_or("", |m| m.as_str()))
    }
}

#[derive(Clone, Debug)]
pub struct FigureConfig {
    /// Shown above the chart.
    pub title: String,

    /// Number of samples visible per series.
    pub window: usize,

    /// Minimum time between redraws caused by the same series.
    pub refresh: Duration,

    /// 1-based columns (column mode) or pattern indices (pattern mode) to
    /// observe. Empty means all.
    pub columns: Vec<usize>,

    /// Extraction patterns. Empty means column mode.
    pub patterns: Vec<Pattern>,

    pub scale: ScaleConfig,
}

impl FigureConfig {
    pub fn pattern_mode(&self) -> bool {
        !self.patterns.is_empty()
    }
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            title: "Figure 1".to_string(),
            window: 500,
            refresh: Duration::from_millis(100),
            columns: Vec::new(),
            patterns: Vec::new(),
            scale: ScaleConfig::default(),
        }
    }
}
