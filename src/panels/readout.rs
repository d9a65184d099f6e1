//! src/panels/readout.rs
//!
//! Readout panel: one row per series with its last, min, and max sample.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::render::terminal::FigureView;

pub struct ReadoutPanel<'a> {
    pub view: &'a FigureView,
}

impl<'a> ReadoutPanel<'a> {
    pub fn new(view: &'a FigureView) -> Self {
        Self { view }
    }
}

fn fmt(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |v| format!("{v:.3}"))
}

impl crate::ui::Panel for ReadoutPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let key = Style::default().fg(Color::Yellow);
        let lines: Vec<Line> = self
            .view
            .lines
            .values()
            .map(|line| {
                let range = line.range();
                Line::from(vec![
                    Span::styled(
                        format!("{:<16}", line.label),
                        Style::default().fg(line.color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(" last ", key),
                    Span::raw(format!("{:>10}", fmt(line.last()))),
                    Span::styled(" min ", key),
                    Span::raw(format!("{:>10}", fmt(range.map(|r| r.0)))),
                    Span::styled(" max ", key),
                    Span::raw(format!("{:>10}", fmt(range.map(|r| r.1)))),
                ])
            })
            .collect();

        let block = Block::default().title("Series").borders(Borders::ALL);
        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
