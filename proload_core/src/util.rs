//! Display helpers that tolerate non-finite numbers.

/// Placeholder shown instead of NaN/±Inf.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format `x` with a fixed number of decimals, or `N/A` when non-finite.
pub fn fmt_fixed(x: f64, decimals: usize) -> String {
    if x.is_finite() {
        format!("{x:.decimals$}")
    } else {
        NOT_AVAILABLE.to_string()
    }
}

/// Text load bar of `width` cells. The fill is clamped to 0..=100 %; a NaN
/// percentage draws an empty bar.
pub fn render_load_bar(percent: f64, width: usize) -> String {
    let frac = if percent.is_nan() {
        0.0
    } else {
        (percent / 100.0).clamp(0.0, 1.0)
    };
    let filled = ((frac * width as f64).round() as usize).min(width);
    let mut s = String::with_capacity(width + 2);
    s.push('[');
    s.extend(std::iter::repeat_n('#', filled));
    s.extend(std::iter::repeat_n('-', width - filled));
    s.push(']');
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_formatting() {
        assert_eq!(fmt_fixed(2500.0, 4), "2500.0000");
        assert_eq!(fmt_fixed(-1250.0, 4), "-1250.0000");
        assert_eq!(fmt_fixed(2.456, 2), "2.46");
        assert_eq!(fmt_fixed(f64::NAN, 4), "N/A");
        assert_eq!(fmt_fixed(f64::INFINITY, 1), "N/A");
        assert_eq!(fmt_fixed(f64::NEG_INFINITY, 1), "N/A");
    }

    #[test]
    fn load_bar() {
        assert_eq!(render_load_bar(50.0, 10), "[#####-----]");
        assert_eq!(render_load_bar(0.0, 4), "[----]");
        assert_eq!(render_load_bar(250.0, 4), "[####]");
        assert_eq!(render_load_bar(-3.0, 4), "[----]");
        assert_eq!(render_load_bar(f64::NAN, 4), "[----]");
        assert_eq!(render_load_bar(f64::INFINITY, 4), "[####]");
    }
}
