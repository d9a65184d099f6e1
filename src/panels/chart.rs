//! src/panels/chart.rs
//!
//! Chart panel: one figure's lines with a legend, axis labels, and the
//! bounds the figure applied.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::Style,
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
};

use crate::render::terminal::FigureView;

/// Renders a borrowed figure view.
pub struct ChartPanel<'a> {
    pub view: &'a FigureView,
}

impl<'a> ChartPanel<'a> {
    pub fn new(view: &'a FigureView) -> Self {
        Self { view }
    }

    /// Y-bounds to draw with: the applied bounds, else the data range
    /// padded so a flat line stays visible, else `[-1, 1]`.
    fn y_bounds(view: &FigureView) -> (f64, f64) {
        if let Some(bounds) = view.y_bounds {
            return bounds;
        }
        match view.data_range() {
            Some((mn, mx)) if (mx - mn).abs() < f64::EPSILON => {
                let pad = mn.abs().max(1.0) * 0.1;
                (mn - pad, mx + pad)
            }
            Some(range) => range,
            None => (-1.0, 1.0),
        }
    }

    /// A single-sample domain is widened so the x-axis has a span.
    fn x_bounds(view: &FigureView) -> (f64, f64) {
        let (lo, hi) = view.x_domain;
        if hi > lo { (lo, hi) } else { (lo, lo + 1.0) }
    }

    fn labels(lo: f64, hi: f64, n: usize, precision: usize) -> Vec<String> {
        let span = hi - lo;
        (0..n)
            .map(|i| format!("{:.*}", precision, lo + span * i as f64 / (n - 1) as f64))
            .collect()
    }
}

impl crate::ui::Panel for ChartPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let (ymin, ymax) = Self::y_bounds(self.view);
        let (xmin, xmax) = Self::x_bounds(self.view);

        let datasets: Vec<Dataset> = self
            .view
            .lines
            .values()
            .map(|line| {
                Dataset::default()
                    .name(line.label.clone())
                    .marker(symbols::Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(line.color))
                    .data(&line.points)
            })
            .collect();

        let chart = Chart::new(datasets)
            .block(
                Block::default()
                    .title(self.view.title.clone())
                    .borders(Borders::ALL),
            )
            .x_axis(
                Axis::default()
                    .bounds([xmin, xmax])
                    .labels(Self::labels(xmin, xmax, 3, 0)),
            )
            .y_axis(
                Axis::default()
                    .bounds([ymin, ymax])
                    .labels(Self::labels(ymin, ymax, 5, 3)),
            )
            .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)));

        f.render_widget(chart, area);
    }
}
