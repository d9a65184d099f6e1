//! src/stream/engine.rs
//!
//! Line-at-a-time driver: pre-filter, split, classify, fan out to figures,
//! and redraw the figures that asked for it.

use std::time::Instant;

use color_eyre::Result;
use log::{info, trace};

use super::format::FormatMode;
use crate::graph::{Figure, FigureConfig, Pattern};
use crate::render::RenderSurface;

#[derive(Debug)]
pub struct StreamEngine {
    figures: Vec<Figure>,
    prefilter: Option<Pattern>,
    format: FormatMode,
    lines: u64,
}

impl StreamEngine {
    /// One figure per config, numbered in order.
    pub fn new(
        figures: Vec<FigureConfig>,
        prefilter: Option<Pattern>,
        format: FormatMode,
    ) -> Self {
        let figures = figures
            .into_iter()
            .enumerate()
            .map(|(i, cfg)| Figure::new(i, cfg))
            .collect();
        Self {
            figures,
            prefilter,
            format,
            lines: 0,
        }
    }

    #[cfg(test)]
    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    /// Lines that made it past the pre-filter.
    pub fn lines(&self) -> u64 {
        self.lines
    }

    pub fn ingest(&mut self, line: &str, surface: &mut dyn RenderSurface) -> Result<()> {
        self.ingest_at(line, Instant::now(), surface)
    }

    /// Process one raw line as if it arrived at `now`.
    pub fn ingest_at(
        &mut self,
        line: &str,
        now: Instant,
        surface: &mut dyn RenderSurface,
    ) -> Result<()> {
        let line = match &self.prefilter {
            Some(p) => match p.extract(line) {
                Some(payload) => payload,
                None => {
                    trace!("filtered out: {line:?}");
                    return Ok(());
                }
            },
            None => line,
        };
        self.lines += 1;

        let fields = self.format.split(line);
        let mut title_only = true;
        for figure in &mut self.figures {
            figure.init(&fields);
            title_only &= figure.is_title_only(&fields);
        }

        for figure in &mut self.figures {
            if figure.update(&fields, !title_only, now) {
                figure.draw(surface, false)?;
            }
        }
        Ok(())
    }

    /// End of stream: one last compacted draw of every figure, then hand
    /// control to the surface until the user closes it.
    pub fn finalize(&mut self, surface: &mut dyn RenderSurface) -> Result<()> {
        info!("end of stream after {} lines", self.lines());
        for figure in &mut self.figures {
            for s in figure.series() {
                info!(
                    "figure {} {:?}: {} samples",
                    figure.id(),
                    s.label(),
                    s.sample_count()
                );
            }
            figure.draw(surface, true)?;
        }
        surface.show()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::graph::series::Series;
    use crate::render::recording::RecordingSurface;

    fn figure(window: usize, columns: Vec<usize>) -> FigureConfig {
        FigureConfig {
            window,
            columns,
            refresh: Duration::ZERO,
            ..FigureConfig::default()
        }
    }

    fn run(engine: &mut StreamEngine, lines: &[&str]) -> RecordingSurface {
        let mut surface = RecordingSurface::default();
        for line in lines {
            engine.ingest(line, &mut surface).unwrap();
        }
        engine.finalize(&mut surface).unwrap();
        surface
    }

    #[test]
    fn delimited_example_resolves_titles_and_gaps() {
        let mut engine = StreamEngine::new(
            vec![figure(500, vec![])],
            None,
            FormatMode::Delimited(",".into()),
        );
        let surface = run(&mut engine, &["5, B, 10", "1,, 3", "Z, 5, 6, 42", "7, 8"]);

        let fig = surface.figure(0);
        assert_eq!(fig.lines.len(), 3);
        assert_eq!(fig.line(0), ("Z", &[5.0, 1.0, 1.0, 7.0][..]));
        assert_eq!(fig.line(1), ("B", &[0.0, 0.0, 5.0, 8.0][..]));
        assert_eq!(fig.line(2), ("column3", &[10.0, 3.0, 6.0, 6.0][..]));
        assert_eq!(fig.x_domain, (0.0, 3.0));
        assert!(surface.shown);
    }

    #[test]
    fn header_line_sets_titles_without_samples() {
        let mut engine = StreamEngine::new(vec![figure(10, vec![])], None, FormatMode::Whitespace);
        let surface = run(&mut engine, &["time speed", "1 2", "height depth", "3 4"]);

        let fig = surface.figure(0);
        assert_eq!(fig.line(0), ("time", &[1.0, 3.0][..]));
        assert_eq!(fig.line(1), ("speed", &[2.0, 4.0][..]));
        let counts: Vec<u64> = engine.figures()[0]
            .series()
            .iter()
            .map(Series::sample_count)
            .collect();
        assert_eq!(counts, vec![2, 2]);
    }

    #[test]
    fn column_selection_ignores_other_columns() {
        let mut engine = StreamEngine::new(
            vec![figure(10, vec![1, 3])],
            None,
            FormatMode::Delimited(",".into()),
        );
        let surface = run(&mut engine, &["1, x, 3", "a, 2, b", "4, 5, 6"]);

        let fig = surface.figure(0);
        assert_eq!(fig.lines.len(), 2);
        // the middle line is title-only for columns 1 and 3
        assert_eq!(fig.line(0), ("a", &[1.0, 4.0][..]));
        assert_eq!(fig.line(1), ("b", &[3.0, 6.0][..]));
    }

    #[test]
    fn a_line_is_data_if_any_figure_sees_data() {
        let mut engine = StreamEngine::new(
            vec![figure(10, vec![1]), figure(10, vec![2])],
            None,
            FormatMode::Whitespace,
        );
        let surface = run(&mut engine, &["1 2", "label 5"]);

        // figure 0 saw no number but the line still counts as data
        assert_eq!(surface.figure(0).line(0), ("label", &[1.0, 1.0][..]));
        assert_eq!(surface.figure(1).line(0), ("column2", &[2.0, 5.0][..]));
    }

    #[test]
    fn prefilter_drops_and_extracts() {
        let mut engine = StreamEngine::new(
            vec![figure(10, vec![])],
            Some(Pattern::compile(r"DATA: (.*)").unwrap()),
            FormatMode::Whitespace,
        );
        let surface = run(&mut engine, &["boot ok", "DATA: 1 2", "noise 9 9", "DATA: 3 4"]);

        assert_eq!(engine.lines(), 2);
        let fig = surface.figure(0);
        assert_eq!(fig.line(0).1, &[1.0, 3.0]);
        assert_eq!(fig.line(1).1, &[2.0, 4.0]);
    }

    #[test]
    fn pattern_mode_matches_series_independently() {
        let mut cfg = figure(10, vec![]);
        cfg.patterns = vec![
            Pattern::compile(r"MSG (\d+) .*").unwrap(),
            Pattern::compile(r"RSSI_PACKET: (\S+) dBm").unwrap(),
        ];
        let mut engine = StreamEngine::new(vec![cfg], None, FormatMode::Pattern);
        let surface = run(
            &mut engine,
            &[
                "MSG 9 RSSI -94.5",
                "RSSI_PACKET: -93.5 dBm",
                "ACK sent back automatically.",
                "MSG 10 RSSI -90",
                "RSSI_PACKET: -91 dBm",
            ],
        );

        let fig = surface.figure(0);
        assert_eq!(fig.line(0), (r"MSG (\d+) .*", &[9.0, 10.0][..]));
        assert_eq!(fig.line(1), ("RSSI_PACKET: (\\S+) dBm", &[-93.5, -91.0][..]));
    }

    #[test]
    fn redraws_are_throttled_per_figure() {
        let mut cfg = figure(10, vec![]);
        cfg.refresh = Duration::from_millis(100);
        let mut engine = StreamEngine::new(vec![cfg], None, FormatMode::Whitespace);
        let mut surface = RecordingSurface::default();
        let t0 = Instant::now();

        for ms in [0, 10, 20, 120, 130] {
            engine
                .ingest_at("1", t0 + Duration::from_millis(ms), &mut surface)
                .unwrap();
        }
        assert_eq!(surface.draws(0), 2);

        engine.finalize(&mut surface).unwrap();
        assert_eq!(surface.draws(0), 3);
        assert_eq!(surface.figure(0).line(0).1.len(), 5);
    }

    #[test]
    fn finalize_before_any_data_draws_nothing() {
        let mut engine = StreamEngine::new(vec![figure(10, vec![])], None, FormatMode::Whitespace);
        let surface = run(&mut engine, &[]);
        assert_eq!(surface.presents, 0);
    }
}
