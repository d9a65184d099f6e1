//! src/render/recording.rs
//!
//! In-memory surface for tests: keeps the last frame of every figure.

use std::collections::BTreeMap;

use color_eyre::Result;
use color_eyre::eyre::eyre;

use super::RenderSurface;

#[derive(Debug, Default, Clone)]
pub struct RecordedFigure {
    pub title: String,
    pub x_domain: (f64, f64),
    pub y_bounds: Option<(f64, f64)>,
    /// series index -> (label, samples)
    pub lines: BTreeMap<usize, (String, Vec<f64>)>,
    /// number of `begin_figure` calls
    pub draws: usize,
}

impl RecordedFigure {
    pub fn line(&self, series: usize) -> (&str, &[f64]) {
        let (label, samples) = &self.lines[&series];
        (label.as_str(), samples.as_slice())
    }
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub figures: BTreeMap<usize, RecordedFigure>,
    pub presents: usize,
    pub shown: bool,
    /// number of `poll` calls
    pub polls: usize,
    /// `poll` call that reports an interrupt, counting from 1
    pub interrupt_at: Option<usize>,
}

impl RecordingSurface {
    pub fn figure(&self, figure: usize) -> &RecordedFigure {
        &self.figures[&figure]
    }

    pub fn draws(&self, figure: usize) -> usize {
        self.figures.get(&figure).map_or(0, |f| f.draws)
    }
}

impl RenderSurface for RecordingSurface {
    fn begin_figure(&mut self, figure: usize, title: &str, x_domain: (f64, f64)) {
        let f = self.figures.entry(figure).or_default();
        f.title = title.to_string();
        f.x_domain = x_domain;
        f.draws += 1;
    }

    fn plot_series(&mut self, figure: usize, series: usize, label: &str, samples: &[f64]) {
        self.figures
            .entry(figure)
            .or_default()
            .lines
            .insert(series, (label.to_string(), samples.to_vec()));
    }

    fn set_y_bounds(&mut self, figure: usize, bounds: (f64, f64)) {
        self.figures.entry(figure).or_default().y_bounds = Some(bounds);
    }

    fn present(&mut self) -> Result<()> {
        self.presents += 1;
        Ok(())
    }

    fn poll(&mut self) -> Result<()> {
        self.polls += 1;
        if self.interrupt_at.is_some_and(|n| self.polls >= n) {
            return Err(eyre!("interrupted"));
        }
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        self.shown = true;
        Ok(())
    }
}
