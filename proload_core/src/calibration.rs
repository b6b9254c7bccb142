//! Linear voltage→weight calibration.
//!
//! A calibration set is a handful of user-captured samples "at sensor voltage V
//! the true weight is W". The solver fits `weight = slope * voltage + intercept`
//! over all of them with ordinary least squares.

use crate::error::CalibrationError;

/// One user-supplied calibration sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationPoint {
    pub id: u32,
    pub voltage: f64,
    pub weight: f64,
}

impl CalibrationPoint {
    pub const fn new(id: u32, voltage: f64, weight: f64) -> Self {
        Self {
            id,
            voltage,
            weight,
        }
    }
}

/// Fitted line `weight = slope * voltage + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationCoefficients {
    pub slope: f64,
    pub intercept: f64,
}

impl CalibrationCoefficients {
    /// 1:1 mapping used while the device is uncalibrated.
    pub const IDENTITY: Self = Self {
        slope: 1.0,
        intercept: 0.0,
    };

    #[inline]
    pub fn weight_at(&self, voltage: f64) -> f64 {
        voltage * self.slope + self.intercept
    }

    pub fn is_finite(&self) -> bool {
        self.slope.is_finite() && self.intercept.is_finite()
    }
}

impl Default for CalibrationCoefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Least-squares fit over all points.
///
/// Fewer than two points yield [`CalibrationCoefficients::IDENTITY`].
/// When every voltage is the same the denominator collapses to zero and the
/// resulting NaN/Inf is returned as-is; use [`try_fit`] to reject that case.
pub fn fit(points: &[CalibrationPoint]) -> CalibrationCoefficients {
    if points.len() < 2 {
        return CalibrationCoefficients::IDENTITY;
    }

    let n = points.len() as f64;
    let mut sum_x = 0.0f64;
    let mut sum_y = 0.0f64;
    let mut sum_xy = 0.0f64;
    let mut sum_xx = 0.0f64;
    for p in points {
        sum_x += p.voltage;
        sum_y += p.weight;
        sum_xy += p.voltage * p.weight;
        sum_xx += p.voltage * p.voltage;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_xx - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;
    CalibrationCoefficients { slope, intercept }
}

/// Checked variant of [`fit`]: rejects non-finite samples and sets whose
/// voltages cannot determine a slope.
pub fn try_fit(points: &[CalibrationPoint]) -> Result<CalibrationCoefficients, CalibrationError> {
    if let Some(bad) = points
        .iter()
        .find(|p| !(p.voltage.is_finite() && p.weight.is_finite()))
    {
        return Err(CalibrationError::NonFinite { id: bad.id });
    }
    if points.len() < 2 {
        return Ok(CalibrationCoefficients::IDENTITY);
    }

    let v0 = points[0].voltage;
    if points.iter().all(|p| p.voltage == v0) {
        return Err(CalibrationError::DegenerateVoltages(v0));
    }

    let coeffs = fit(points);
    // Sums can overflow even when the voltages differ.
    if !coeffs.is_finite() {
        return Err(CalibrationError::IllConditioned);
    }
    Ok(coeffs)
}

/// Ordered calibration samples with unique ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalibrationSet {
    points: Vec<CalibrationPoint>,
}

impl CalibrationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<CalibrationPoint>) -> Result<Self, CalibrationError> {
        for (i, p) in points.iter().enumerate() {
            if points[..i].iter().any(|q| q.id == p.id) {
                return Err(CalibrationError::DuplicateId(p.id));
            }
        }
        Ok(Self { points })
    }

    /// Two-point factory calibration: 0.5 V at empty, 4.5 V at 10 t.
    pub fn factory() -> Self {
        Self {
            points: vec![
                CalibrationPoint::new(1, 0.5, 0.0),
                CalibrationPoint::new(2, 4.5, 10_000.0),
            ],
        }
    }

    pub fn points(&self) -> &[CalibrationPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&CalibrationPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    /// Next free id: one past the largest id in use, starting at 1.
    pub fn next_id(&self) -> Result<u32, CalibrationError> {
        match self.points.iter().map(|p| p.id).max() {
            None => Ok(1),
            Some(m) => m.checked_add(1).ok_or(CalibrationError::IdsExhausted),
        }
    }

    /// Append a sample taken at `voltage`, returning its id.
    pub fn capture(&mut self, voltage: f64, weight: f64) -> Result<u32, CalibrationError> {
        let id = self.next_id()?;
        self.points.push(CalibrationPoint::new(id, voltage, weight));
        tracing::debug!(id, voltage, weight, "calibration point captured");
        Ok(id)
    }

    /// Change the reference weight of an existing sample.
    pub fn update(&mut self, id: u32, weight: f64) -> Result<(), CalibrationError> {
        let p = self
            .points
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(CalibrationError::UnknownId(id))?;
        p.weight = weight;
        Ok(())
    }

    pub fn remove(&mut self, id: u32) -> Result<CalibrationPoint, CalibrationError> {
        let idx = self
            .points
            .iter()
            .position(|p| p.id == id)
            .ok_or(CalibrationError::UnknownId(id))?;
        Ok(self.points.remove(idx))
    }

    pub fn fit(&self) -> CalibrationCoefficients {
        fit(&self.points)
    }

    pub fn try_fit(&self) -> Result<CalibrationCoefficients, CalibrationError> {
        try_fit(&self.points)
    }
}
