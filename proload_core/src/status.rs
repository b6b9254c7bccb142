//! Load status classification.

use std::fmt;

/// Severity of the current load, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LoadStatus {
    Normal,
    Warning,
    Danger,
    Full,
    Overload,
}

impl LoadStatus {
    /// Classify a load percentage. Thresholds are strict: exactly 95.0 % is
    /// still `Danger`. NaN falls through to `Normal`.
    pub fn from_percentage(pct: f64) -> Self {
        if pct > 100.0 {
            Self::Overload
        } else if pct > 95.0 {
            Self::Full
        } else if pct > 85.0 {
            Self::Danger
        } else if pct > 70.0 {
            Self::Warning
        } else {
            Self::Normal
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Warning => "WARNING",
            Self::Danger => "DANGER",
            Self::Full => "FULL",
            Self::Overload => "OVERLOAD",
        }
    }

    /// Indicator colour as `#rrggbb`. Full shares the danger orange.
    pub const fn color_hex(self) -> &'static str {
        match self {
            Self::Normal => "#22c55e",
            Self::Warning => "#eab308",
            Self::Danger | Self::Full => "#f97316",
            Self::Overload => "#ef4444",
        }
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::LoadStatus;

    #[test]
    fn severity_order() {
        assert!(LoadStatus::Normal < LoadStatus::Warning);
        assert!(LoadStatus::Warning < LoadStatus::Danger);
        assert!(LoadStatus::Danger < LoadStatus::Full);
        assert!(LoadStatus::Full < LoadStatus::Overload);
    }

    #[test]
    fn nan_is_normal() {
        assert_eq!(LoadStatus::from_percentage(f64::NAN), LoadStatus::Normal);
    }

    #[test]
    fn labels() {
        assert_eq!(LoadStatus::Overload.to_string(), "OVERLOAD");
        assert_eq!(LoadStatus::Full.color_hex(), LoadStatus::Danger.color_hex());
    }
}
