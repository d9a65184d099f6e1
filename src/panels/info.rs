//! src/panels/info.rs
//!
//! Figure info panel: applied bounds, x-domain, and redraw count.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::render::terminal::FigureView;

/// Read-only info panel; `highlighted` marks the focused figure.
pub struct InfoPanel<'a> {
    pub view: &'a FigureView,
    pub highlighted: bool,
}

impl<'a> InfoPanel<'a> {
    pub fn new(view: &'a FigureView, highlighted: bool) -> Self {
        Self { view, highlighted }
    }
}

impl crate::ui::Panel for InfoPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let v = self.view;
        let bounds = match v.y_bounds {
            Some((lo, hi)) => format!("[{lo:.3}, {hi:.3}]"),
            None => "auto (unset)".to_string(),
        };

        let lines = vec![
            Line::from(vec![
                Span::styled(&v.title, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!("  series={}", v.lines.len())),
            ]),
            Line::from(vec![Span::raw(format!("y={bounds}"))]),
            Line::from(vec![Span::raw(format!(
                "x=[{:.0}, {:.0}]  draws={}",
                v.x_domain.0, v.x_domain.1, v.draws
            ))]),
        ];

        let mut block = Block::default().title("Info").borders(Borders::ALL);
        if self.highlighted {
            block = block.style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        }

        f.render_widget(Paragraph::new(lines).block(block), area);
    }
}
