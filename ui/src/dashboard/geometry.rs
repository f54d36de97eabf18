//! Plot geometry for the inline SVG charts. Data space is mapped onto a
//! fixed view box; the browser scales the SVG to its container.

/// Inclusive data range on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axis {
    pub min: f64,
    pub max: f64,
}

impl Axis {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Span of `values` padded by `pad` on both ends. Falls back to `[0, 1]`.
    pub fn fit<I>(values: I, pad: f64) -> Self
    where
        I: IntoIterator<Item = f64>,
    {
        let (lo, hi) = values
            .into_iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if lo > hi {
            return Self::new(0.0, 1.0);
        }
        if lo == hi {
            return Self::new(lo - 1.0, hi + 1.0);
        }
        Self::new(lo - pad, hi + pad)
    }

    /// Position of `value` as a 0..=1 fraction of the range (clamped).
    pub fn fraction(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Plot area inside the view box, leaving room for axis labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame2D {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub bottom: f64,
    pub top: f64,
    pub right: f64,
}

impl Frame2D {
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            left: 36.0,
            bottom: 24.0,
            top: 8.0,
            right: 8.0,
        }
    }

    pub fn view_box(&self) -> String {
        format!("0 0 {} {}", self.width, self.height)
    }

    pub fn x(&self, axis: &Axis, value: f64) -> f64 {
        self.left + axis.fraction(value) * (self.width - self.left - self.right)
    }

    /// SVG y grows downward, so larger values map closer to `top`.
    pub fn y(&self, axis: &Axis, value: f64) -> f64 {
        let plot_height = self.height - self.top - self.bottom;
        self.top + (1.0 - axis.fraction(value)) * plot_height
    }

    pub fn baseline(&self) -> f64 {
        self.height - self.bottom
    }
}

/// `points` attribute for an SVG `polyline`.
pub fn polyline_points(frame: &Frame2D, x_axis: &Axis, y_axis: &Axis, data: &[(f64, f64)]) -> String {
    data.iter()
        .map(|(x, y)| format!("{:.1},{:.1}", frame.x(x_axis, *x), frame.y(y_axis, *y)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Evenly spaced tick values from `axis.min` to `axis.max`.
pub fn ticks(axis: &Axis, count: usize) -> Vec<f64> {
    if count < 2 {
        return vec![axis.min];
    }
    let step = (axis.max - axis.min) / (count - 1) as f64;
    (0..count).map(|i| axis.min + step * i as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_pads_and_handles_degenerate_input() {
        assert_eq!(Axis::fit([2.0, 5.0], 0.5), Axis::new(1.5, 5.5));
        assert_eq!(Axis::fit([3.0], 0.5), Axis::new(2.0, 4.0));
        assert_eq!(Axis::fit(std::iter::empty(), 0.5), Axis::new(0.0, 1.0));
    }

    #[test]
    fn y_is_inverted() {
        let frame = Frame2D::new(200.0, 100.0);
        let axis = Axis::new(0.0, 1.0);
        assert_eq!(frame.y(&axis, 1.0), frame.top);
        assert_eq!(frame.y(&axis, 0.0), frame.baseline());
    }

    #[test]
    fn polyline_maps_corners() {
        let frame = Frame2D::new(136.0, 132.0);
        let x = Axis::new(0.0, 10.0);
        let y = Axis::new(0.0, 100.0);
        let points = polyline_points(&frame, &x, &y, &[(0.0, 0.0), (10.0, 100.0)]);
        assert_eq!(points, "36.0,108.0 128.0,8.0");
    }

    #[test]
    fn ticks_cover_range() {
        assert_eq!(ticks(&Axis::new(0.0, 1.0), 3), vec![0.0, 0.5, 1.0]);
    }
}
