//! src/panels/title.rs
//!
//! Header panel: input description and stream status.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub struct TitlePanel<'a> {
    pub heading: &'a str,
    pub status: &'a str,
}

impl<'a> TitlePanel<'a> {
    pub fn new(heading: &'a str, status: &'a str) -> Self {
        Self { heading, status }
    }
}

impl crate::ui::Panel for TitlePanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::raw(self.heading),
            Span::raw("  "),
            Span::styled(format!("[{}]", self.status), Style::default().fg(Color::Green)),
        ]);
        let p = Paragraph::new(line)
            .block(Block::default().title("streamplot").borders(Borders::ALL));
        f.render_widget(p, area);
    }
}
