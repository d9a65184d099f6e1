//! src/graph/figure.rs
//!
//! A figure: one y-axis, one scale policy, and the series drawn on it.
//!
//! Series are created lazily from the first line seen, so the number of
//! columns does not have to be known up front.

use std::time::Instant;

use color_eyre::Result;
use log::debug;

use super::config::FigureConfig;
use super::scale::ScaleState;
use super::series::{Extractor, Series, parse_sample};
use crate::render::RenderSurface;

#[derive(Debug)]
pub struct Figure {
    /// Index handed to the render surface.
    id: usize,
    config: FigureConfig,
    series: Vec<Series>,
    initialized: bool,
    scale: ScaleState,
    x_domain: (f64, f64),
}

impl Figure {
    pub fn new(id: usize, config: FigureConfig) -> Self {
        let scale = ScaleState::new(&config.scale);
        let x_domain = (0.0, config.window.saturating_sub(1) as f64);
        Self {
            id,
            config,
            series: Vec::new(),
            initialized: false,
            scale,
            x_domain,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    #[cfg(test)]
    pub fn scale(&self) -> &ScaleState {
        &self.scale
    }

    /// Create the series on the first call; later calls do nothing.
    ///
    /// Column mode makes one series per selected column, or per field of
    /// this line when no columns are selected. Pattern mode makes one series
    /// per selected pattern; selections past the last pattern are skipped.
    pub fn init(&mut self, fields: &[&str]) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        let window = self.config.window;
        let extractors: Vec<Extractor> = if self.config.pattern_mode() {
            let patterns = &self.config.patterns;
            if self.config.columns.is_empty() {
                patterns.iter().cloned().map(Extractor::Pattern).collect()
            } else {
                self.config
                    .columns
                    .iter()
                    .filter_map(|&i| {
                        let p = i.checked_sub(1).and_then(|i| patterns.get(i));
                        if p.is_none() {
                            debug!("figure {}: no pattern #{i}, skipped", self.id);
                        }
                        p.cloned().map(Extractor::Pattern)
                    })
                    .collect()
            }
        } else if self.config.columns.is_empty() {
            (1..=fields.len()).map(Extractor::Column).collect()
        } else {
            self.config
                .columns
                .iter()
                .copied()
                .map(Extractor::Column)
                .collect()
        };

        self.series = extractors
            .into_iter()
            .map(|e| Series::new(e, window))
            .collect();
        debug!(
            "figure {} initialized with {} series",
            self.id,
            self.series.len()
        );
    }

    /// True when the line carries no numeric value in any selected column.
    /// Pattern-mode lines are never title-only.
    pub fn is_title_only(&self, fields: &[&str]) -> bool {
        if self.config.pattern_mode() {
            return false;
        }
        let numeric = |raw: Option<&&str>| raw.and_then(|r| parse_sample(r)).is_some();
        if self.config.columns.is_empty() {
            !fields.iter().any(|f| numeric(Some(f)))
        } else {
            !self
                .config
                .columns
                .iter()
                .any(|&c| numeric(c.checked_sub(1).and_then(|i| fields.get(i))))
        }
    }

    /// Feed one line to every series. Returns whether any series wants a redraw.
    pub fn update(&mut self, fields: &[&str], data_line: bool, now: Instant) -> bool {
        let refresh = self.config.refresh;
        let mut needs_draw = false;
        for s in &mut self.series {
            needs_draw |= s.update(fields, data_line, now, refresh);
        }
        needs_draw
    }

    /// Redraw onto `surface`.
    ///
    /// With `compact`, a figure that never filled its window is trimmed to
    /// the samples actually seen and its x-domain shrinks to match.
    pub fn draw(&mut self, surface: &mut dyn RenderSurface, compact: bool) -> Result<()> {
        if self.series.is_empty() {
            return Ok(());
        }

        if compact {
            let observed = self
                .series
                .iter()
                .map(Series::sample_count)
                .max()
                .unwrap_or(0);
            let observed = usize::try_from(observed).unwrap_or(usize::MAX);
            if observed < self.config.window {
                for s in &mut self.series {
                    s.compact(observed);
                }
                self.x_domain = (0.0, observed.saturating_sub(1) as f64);
            }
        }

        if self.scale.autoscale {
            let visible = self
                .series
                .iter()
                .filter_map(Series::bounds)
                .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1)));
            if let Some((mn, mx)) = visible {
                self.scale.observe(mn, mx);
            }
        }

        surface.begin_figure(self.id, &self.config.title, self.x_domain);
        for (i, s) in self.series.iter().enumerate() {
            surface.plot_series(self.id, i, s.label(), &s.snapshot());
        }
        if let Some(bounds) = self.scale.take_pending() {
            surface.set_y_bounds(self.id, bounds);
        }
        surface.present()
    }
}
