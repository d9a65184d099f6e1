//! src/graph/scale.rs
//!
//! Y-axis scale state for a figure: fixed bounds, or autoscale with an
//! optional "memory" policy that only ever widens the bounds.

use super::config::ScaleConfig;

#[derive(Debug, Clone)]
pub struct ScaleState {
    /// Current lower bound. `None` means not yet observed.
    pub min: Option<f64>,

    /// Current upper bound. `None` means not yet observed.
    pub max: Option<f64>,

    pub autoscale: bool,
    pub memory: bool,

    /// Bounds last handed to the render surface.
    pub applied: Option<(f64, f64)>,
}

impl ScaleState {
    pub fn new(cfg: &ScaleConfig) -> Self {
        Self {
            min: cfg.ymin,
            max: cfg.ymax,
            autoscale: cfg.autoscale,
            memory: cfg.memory,
            applied: None,
        }
    }

    /// Fold the extrema of the visible data into the bounds.
    ///
    /// Without memory the bounds snap to the visible range. With memory
    /// they only widen. Fixed scales are left untouched.
    pub fn observe(&mut self, visible_min: f64, visible_max: f64) {
        if !self.autoscale {
            return;
        }
        if !self.memory {
            self.min = Some(visible_min);
            self.max = Some(visible_max);
            return;
        }
        if self.min.is_none_or(|m| visible_min < m) {
            self.min = Some(visible_min);
        }
        if self.max.is_none_or(|m| visible_max > m) {
            self.max = Some(visible_max);
        }
    }

    /// Bounds that should be pushed to the axis, if any.
    ///
    /// Returns `None` when unchanged since the last apply or degenerate
    /// (`min == max`); in both cases the previously applied bounds stand.
    pub fn take_pending(&mut self) -> Option<(f64, f64)> {
        let bounds = (self.min?, self.max?);
        if bounds.0 == bounds.1 || self.applied == Some(bounds) {
            return None;
        }
        self.applied = Some(bounds);
        Some(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn auto(memory: bool) -> ScaleState {
        ScaleState::new(&ScaleConfig {
            ymin: None,
            ymax: None,
            autoscale: true,
            memory,
        })
    }

    #[test]
    fn without_memory_bounds_track_visible_range() {
        let mut s = auto(false);
        s.observe(-5.0, 5.0);
        s.observe(1.0, 2.0);
        assert_eq!((s.min, s.max), (Some(1.0), Some(2.0)));
    }

    #[test]
    fn memory_bounds_never_shrink() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = auto(true);
        let mut prev: Option<(f64, f64)> = None;
        for _ in 0..200 {
            let a: f64 = rng.random_range(-100.0..100.0);
            let b: f64 = rng.random_range(-100.0..100.0);
            s.observe(a.min(b), a.max(b));
            let cur = (s.min.unwrap(), s.max.unwrap());
            if let Some((pmin, pmax)) = prev {
                assert!(cur.0 <= pmin);
                assert!(cur.1 >= pmax);
            }
            prev = Some(cur);
        }
    }

    #[test]
    fn memory_starts_from_configured_bounds() {
        let mut s = ScaleState::new(&ScaleConfig {
            ymin: Some(-1.0),
            ymax: Some(1.0),
            autoscale: true,
            memory: true,
        });
        s.observe(0.0, 0.5);
        assert_eq!((s.min, s.max), (Some(-1.0), Some(1.0)));
        s.observe(-3.0, 0.5);
        assert_eq!((s.min, s.max), (Some(-3.0), Some(1.0)));
    }

    #[test]
    fn fixed_scale_is_never_mutated() {
        let mut s = ScaleState::new(&ScaleConfig {
            ymin: Some(0.0),
            ymax: Some(10.0),
            autoscale: false,
            memory: true,
        });
        s.observe(-100.0, 100.0);
        assert_eq!((s.min, s.max), (Some(0.0), Some(10.0)));
        assert_eq!(s.take_pending(), Some((0.0, 10.0)));
        assert_eq!(s.take_pending(), None);
    }

    #[test]
    fn degenerate_range_is_not_applied() {
        let mut s = auto(false);
        s.observe(1.0, 3.0);
        assert_eq!(s.take_pending(), Some((1.0, 3.0)));
        s.observe(2.0, 2.0);
        assert_eq!(s.take_pending(), None);
        assert_eq!(s.applied, Some((1.0, 3.0)));
    }
}
