#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquityPoint {
    pub value: f64,
    pub recorded_at_ms: i64,
}

/// Rolling window of portfolio samples backing the chart panel.
#[derive(Debug, Clone, PartialEq)]
pub struct EquityCurve {
    points: Vec<EquityPoint>,
    capacity: usize,
}

impl EquityCurve {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "equity curve capacity must be positive");
        Self {
            points: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn points(&self) -> &[EquityPoint] {
        &self.points
    }

    /// Appends a sample, evicting the oldest point once the window is full.
    pub fn record(&mut self, value: f64, recorded_at_ms: i64) {
        if self.points.len() == self.capacity {
            self.points.remove(0);
        }
        self.points.push(EquityPoint {
            value,
            recorded_at_ms,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::EquityCurve;

    #[test]
    fn curve_holds_at_most_its_capacity() {
        let mut curve = EquityCurve::new(30);

        for tick in 0..500 {
            curve.record(100.0 + tick as f64, tick);
            assert!(curve.points().len() <= 30);
        }
        assert_eq!(curve.points().len(), 30);
    }

    #[test]
    fn eviction_keeps_the_most_recent_samples_in_order() {
        let mut curve = EquityCurve::new(3);

        for tick in 0..5 {
            curve.record(tick as f64, tick);
        }

        let values: Vec<f64> = curve.points().iter().map(|p| p.value).collect();
        assert_eq!(values, [2.0, 3.0, 4.0]);
    }

    #[test]
    #[should_panic(expected = "equity curve capacity must be positive")]
    fn zero_capacity_curve_is_rejected() {
        let _ = EquityCurve::new(0);
    }
}
