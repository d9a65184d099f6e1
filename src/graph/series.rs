//! src/graph/series.rs
//!
//! One plotted line: an extraction strategy, a learned title, and a sliding
//! window of samples that comes into existence with the first sample.

use std::time::{Duration, Instant};

use log::debug;

use super::config::Pattern;
use super::window::SampleWindow;

/// Parse a raw field as a sample. Only finite numbers count.
pub fn parse_sample(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Where a series reads its raw value from.
#[derive(Clone, Debug)]
pub enum Extractor {
    /// 1-based field index.
    Column(usize),

    /// First capture group of a full match against the whole line.
    Pattern(Pattern),
}

#[derive(Debug)]
enum SeriesState {
    /// No sample seen yet.
    Uninitialized,

    Active {
        window: SampleWindow,

        /// samples ever appended, including the first
        samples: u64,
    },
}

#[derive(Debug)]
pub struct Series {
    extractor: Extractor,
    default_label: String,
    title: Option<String>,
    window_size: usize,
    state: SeriesState,
    last_draw: Option<Instant>,
}

impl Series {
    pub fn new(extractor: Extractor, window_size: usize) -> Self {
        let default_label = match &extractor {
            Extractor::Column(n) => format!("column{n}"),
            Extractor::Pattern(p) => p.source.clone(),
        };
        Self {
            extractor,
            default_label,
            title: None,
            window_size,
            state: SeriesState::Uninitialized,
            last_draw: None,
        }
    }

    /// Learned title, else "columnN" or the pattern text.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.default_label)
    }

    #[cfg(test)]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Resolve this series' sample for one line.
    ///
    /// Returns `None` when nothing should be appended: the pattern did not
    /// match, or the value is not numeric on a title-only line. Non-numeric
    /// values teach the series its title if it has none yet. On data lines a
    /// non-numeric or absent value repeats the previous sample (0.0 if none).
    pub fn resolve(&mut self, fields: &[&str], data_line: bool) -> Option<f64> {
        let raw = match &self.extractor {
            Extractor::Column(n) => n
                .checked_sub(1)
                .and_then(|i| fields.get(i))
                .copied()
                .unwrap_or(""),
            Extractor::Pattern(p) => p.extract(fields.first().copied().unwrap_or(""))?,
        };
        if let Some(v) = parse_sample(raw) {
            return Some(v);
        }
        self.learn_title(raw);
        data_line.then(|| self.last().unwrap_or(0.0))
    }

    fn learn_title(&mut self, raw: &str) {
        let raw = raw.trim();
        if self.title.is_none() && !raw.is_empty() {
            debug!("{} titled {:?}", self.default_label, raw);
            self.title = Some(raw.to_string());
        }
    }

    /// Append a sample; the first one fills the whole window.
    pub fn append(&mut self, sample: f64) {
        if let SeriesState::Active { window, samples } = &mut self.state {
            window.push(sample);
            *samples += 1;
            return;
        }
        self.state = SeriesState::Active {
            window: SampleWindow::prefilled(self.window_size, sample),
            samples: 1,
        };
    }

    /// Redraw vote: always for the first draw, then at most once per `refresh`.
    pub fn needs_redraw(&mut self, now: Instant, refresh: Duration) -> bool {
        let due = self
            .last_draw
            .is_none_or(|t| now.duration_since(t) >= refresh);
        if due {
            self.last_draw = Some(now);
        }
        due
    }

    /// Resolve, append, and vote. Returns whether this series wants a redraw.
    pub fn update(
        &mut self,
        fields: &[&str],
        data_line: bool,
        now: Instant,
        refresh: Duration,
    ) -> bool {
        match self.resolve(fields, data_line) {
            Some(sample) => {
                self.append(sample);
                self.needs_redraw(now, refresh)
            }
            None => false,
        }
    }

    /// Drop prefill so only the trailing `keep` samples remain.
    pub fn compact(&mut self, keep: usize) {
        if let SeriesState::Active { window, .. } = &mut self.state {
            window.compact(keep);
        }
    }

    pub fn sample_count(&self) -> u64 {
        match &self.state {
            SeriesState::Uninitialized => 0,
            SeriesState::Active { samples, .. } => *samples,
        }
    }

    pub fn last(&self) -> Option<f64> {
        match &self.state {
            SeriesState::Uninitialized => None,
            SeriesState::Active { window, .. } => window.last(),
        }
    }

    /// (min, max) of the window; `None` before the first sample.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        match &self.state {
            SeriesState::Uninitialized => None,
            SeriesState::Active { window, .. } => window.bounds(),
        }
    }

    /// Window contents, oldest first. Empty before the first sample.
    pub fn snapshot(&self) -> Vec<f64> {
        match &self.state {
            SeriesState::Uninitialized => Vec::new(),
            SeriesState::Active { window, .. } => window.snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(n: usize, window: usize) -> Series {
        Series::new(Extractor::Column(n), window)
    }

    #[test]
    fn parse_rejects_text_and_non_finite() {
        assert_eq!(parse_sample(" 4.5 "), Some(4.5));
        assert_eq!(parse_sample("-1e3"), Some(-1000.0));
        assert_eq!(parse_sample("B"), None);
        assert_eq!(parse_sample(""), None);
        assert_eq!(parse_sample("NaN"), None);
        assert_eq!(parse_sample("inf"), None);
    }

    #[test]
    fn first_sample_fills_window() {
        let mut s = column(1, 4);
        assert_eq!(s.bounds(), None);
        s.append(3.0);
        assert_eq!(s.snapshot(), vec![3.0; 4]);
        assert_eq!(s.sample_count(), 1);
        s.append(5.0);
        assert_eq!(s.snapshot(), vec![3.0, 3.0, 3.0, 5.0]);
        assert_eq!(s.sample_count(), 2);
    }

    #[test]
    fn title_is_learned_once() {
        let mut s = column(2, 3);
        assert_eq!(s.label(), "column2");
        assert_eq!(s.resolve(&["1", "speed"], false), None);
        assert_eq!(s.resolve(&["1", "other"], false), None);
        assert_eq!(s.title(), Some("speed"));
        assert_eq!(s.label(), "speed");
    }

    #[test]
    fn empty_value_does_not_set_title() {
        let mut s = column(2, 3);
        s.resolve(&["1", ""], true);
        s.resolve(&["1"], true);
        assert_eq!(s.title(), None);
    }

    #[test]
    fn missing_value_repeats_previous_on_data_lines() {
        let mut s = column(3, 5);
        assert_eq!(s.resolve(&["1", "2"], true), Some(0.0));
        s.append(0.0);
        assert_eq!(s.resolve(&["1", "2", "8"], true), Some(8.0));
        s.append(8.0);
        assert_eq!(s.resolve(&["1", "2", "x"], true), Some(8.0));
        assert_eq!(s.resolve(&["1", "2", "x"], false), None);
    }

    #[test]
    fn pattern_series_skips_non_matching_lines() {
        let p = Pattern::compile(r"rssi=(\S*)").unwrap();
        let mut s = Series::new(Extractor::Pattern(p), 3);
        assert_eq!(s.label(), r"rssi=(\S*)");
        assert_eq!(s.resolve(&["snr=4"], true), None);
        assert_eq!(s.resolve(&["rssi=-90"], true), Some(-90.0));
        s.append(-90.0);
        assert_eq!(s.resolve(&["rssi=dBm"], true), Some(-90.0));
        assert_eq!(s.title(), Some("dBm"));
    }

    #[test]
    fn redraw_is_throttled() {
        let mut s = column(1, 3);
        let t0 = Instant::now();
        let refresh = Duration::from_millis(100);
        assert!(s.needs_redraw(t0, refresh));
        assert!(!s.needs_redraw(t0 + Duration::from_millis(50), refresh));
        assert!(s.needs_redraw(t0 + Duration::from_millis(100), refresh));
        assert!(!s.needs_redraw(t0 + Duration::from_millis(150), refresh));
    }

    #[test]
    fn update_only_votes_when_appending() {
        let mut s = column(1, 3);
        let t0 = Instant::now();
        let refresh = Duration::from_secs(1);
        assert!(!s.update(&["label"], false, t0, refresh));
        assert!(s.update(&["1"], true, t0, refresh));
        assert!(!s.update(&["2"], true, t0, refresh));
        assert_eq!(s.snapshot(), vec![1.0, 1.0, 2.0]);
    }
}
