//! src/render/terminal.rs
//!
//! `RenderSurface` on a ratatui terminal.
//!
//! The surface keeps a view model per figure (lines, axis domain, bounds)
//! and repaints the whole screen on `present`. Layout:
//!
//! ```text
//! +---------------- title ----------------+
//! | figure 0 chart (legend)               |
//! | readout (last/min/max) | scale info   |
//! | figure 1 ...                          |
//! +---------------- keys -----------------+
//! ```
//!
//! While streaming, `Ctrl-C` aborts. Raw mode turns it into a key event,
//! which `poll` picks up between lines and while the input is idle. After
//! the stream ends, `show` blocks until `q`/`Esc`; `Tab` moves focus
//! between figures.

use std::collections::BTreeMap;
use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use ratatui::layout::{Constraint, Direction};
use ratatui::style::Color;

use super::RenderSurface;
use crate::panels::{ChartPanel, InfoPanel, ParagraphPanel, ReadoutPanel, TitlePanel};
use crate::ui::{Node, group, leaf};

const PALETTE: [Color; 8] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::LightRed,
    Color::LightBlue,
    Color::LightCyan,
    Color::LightMagenta,
];

/// One plotted line as last handed over by a figure.
#[derive(Debug, Clone)]
pub struct LineView {
    pub label: String,
    pub color: Color,
    /// (x, y) with x = sample position in the window
    pub points: Vec<(f64, f64)>,
}

impl LineView {
    pub fn last(&self) -> Option<f64> {
        self.points.last().map(|p| p.1)
    }

    /// (min, max) of the plotted samples.
    pub fn range(&self) -> Option<(f64, f64)> {
        self.points.iter().fold(None, |acc, &(_, y)| match acc {
            None => Some((y, y)),
            Some((mn, mx)) => Some((mn.min(y), mx.max(y))),
        })
    }
}

/// Everything the panels need to draw one figure.
#[derive(Debug, Clone, Default)]
pub struct FigureView {
    pub title: String,
    pub x_domain: (f64, f64),
    /// Applied y-bounds; `None` until a figure sets them.
    pub y_bounds: Option<(f64, f64)>,
    pub lines: BTreeMap<usize, LineView>,
    pub draws: u64,
}

impl FigureView {
    /// (min, max) over all lines.
    pub fn data_range(&self) -> Option<(f64, f64)> {
        self.lines
            .values()
            .filter_map(LineView::range)
            .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1)))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Streaming,
    Ended,
}

pub struct TerminalSurface {
    terminal: DefaultTerminal,
    heading: String,
    figures: BTreeMap<usize, FigureView>,
    focused: usize,
    phase: Phase,
}

impl TerminalSurface {
    /// Switch the terminal to the alternate screen in raw mode.
    /// The terminal is restored when the surface is dropped.
    pub fn init(heading: &str) -> Result<Self> {
        Ok(Self {
            terminal: ratatui::try_init()?,
            heading: heading.to_string(),
            figures: BTreeMap::new(),
            focused: 0,
            phase: Phase::Streaming,
        })
    }

    fn render(&mut self) -> Result<()> {
        let root = layout(&self.heading, &self.figures, self.focused, self.phase);
        self.terminal.draw(|f| {
            let area = f.area();
            root.draw(f, area);
        })?;
        Ok(())
    }
}

impl Drop for TerminalSurface {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

impl RenderSurface for TerminalSurface {
    fn begin_figure(&mut self, figure: usize, title: &str, x_domain: (f64, f64)) {
        let view = self.figures.entry(figure).or_default();
        view.title = title.to_string();
        view.x_domain = x_domain;
        view.draws += 1;
    }

    fn plot_series(&mut self, figure: usize, series: usize, label: &str, samples: &[f64]) {
        let points = samples
            .iter()
            .enumerate()
            .map(|(x, &y)| (x as f64, y))
            .collect();
        self.figures.entry(figure).or_default().lines.insert(
            series,
            LineView {
                label: label.to_string(),
                color: PALETTE[series % PALETTE.len()],
                points,
            },
        );
    }

    fn set_y_bounds(&mut self, figure: usize, bounds: (f64, f64)) {
        self.figures.entry(figure).or_default().y_bounds = Some(bounds);
    }

    fn present(&mut self) -> Result<()> {
        self.render()
    }

    fn poll(&mut self) -> Result<()> {
        // raw mode swallows SIGINT
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && is_ctrl_c(&key) {
                    return Err(eyre!("interrupted"));
                }
            }
        }
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        self.phase = Phase::Ended;
        loop {
            self.render()?;
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Tab if !self.figures.is_empty() => {
                        self.focused = (self.focused + 1) % self.figures.len();
                    }
                    _ if is_ctrl_c(&key) => break,
                    _ => {}
                },
                _ => {}
            }
        }
        Ok(())
    }
}

/// Build the node tree for one frame.
fn layout<'a>(
    heading: &'a str,
    figures: &'a BTreeMap<usize, FigureView>,
    focused: usize,
    phase: Phase,
) -> Node<'a> {
    let status = match phase {
        Phase::Streaming => "streaming",
        Phase::Ended => "stream ended",
    };
    let keys = match phase {
        Phase::Streaming => "Ctrl-C=Abort",
        Phase::Ended => "TAB=Focus  Q/Esc=Quit",
    };

    let regions: Vec<Node<'a>> = figures
        .values()
        .enumerate()
        .map(|(i, view)| {
            group(
                Direction::Vertical,
                vec![Constraint::Percentage(75), Constraint::Percentage(25)],
                vec![
                    leaf(ChartPanel::new(view)),
                    group(
                        Direction::Horizontal,
                        vec![Constraint::Percentage(60), Constraint::Percentage(40)],
                        vec![
                            leaf(ReadoutPanel::new(view)),
                            leaf(InfoPanel::new(view, i == focused)),
                        ],
                    ),
                ],
            )
        })
        .collect();

    let body = if regions.is_empty() {
        leaf(ParagraphPanel::new("Waiting for data...", "Figures"))
    } else {
        let n = regions.len() as u32;
        group(
            Direction::Vertical,
            (0..n).map(|_| Constraint::Ratio(1, n)).collect(),
            regions,
        )
    };

    group(
        Direction::Vertical,
        vec![
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ],
        vec![
            leaf(TitlePanel::new(heading, status)),
            body,
            leaf(ParagraphPanel::new(keys, "Keys")),
        ],
    )
}
