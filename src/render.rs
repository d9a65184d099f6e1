//! src/render.rs
//!
//! The drawing seam between the stream engine and whatever paints plots.
//!
//! Every figure draw receives the surface explicitly; there is no ambient
//! "current figure" state.

pub mod terminal;

#[cfg(test)]
pub mod recording;

use color_eyre::Result;

pub use terminal::TerminalSurface;

/// A target that can display one line plot per figure.
///
/// A figure draw is `begin_figure`, one `plot_series` per series, an
/// optional `set_y_bounds`, then `present`.
pub trait RenderSurface {
    /// Start redrawing figure number `figure`.
    fn begin_figure(&mut self, figure: usize, title: &str, x_domain: (f64, f64));

    /// Replace line `series` of `figure`. Samples sit at x = 0, 1, 2, ...
    fn plot_series(&mut self, figure: usize, series: usize, label: &str, samples: &[f64]);

    /// Apply y-axis limits. Only called with changed, non-degenerate bounds.
    fn set_y_bounds(&mut self, figure: usize, bounds: (f64, f64));

    /// Flush everything drawn so far.
    fn present(&mut self) -> Result<()>;

    /// Handle pending user input while streaming. Called between lines and
    /// while the input is idle; an error aborts the stream.
    fn poll(&mut self) -> Result<()> {
        Ok(())
    }

    /// Block in the interactive loop until the user closes the view.
    fn show(&mut self) -> Result<()>;
}
