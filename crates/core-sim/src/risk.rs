use crate::rng::SimRng;

const VAR_95_FRACTION: f64 = 0.02;
const SHARPE_BASE: f64 = 1.8;
const SHARPE_JITTER: f64 = 0.4;
const LEVERAGE_BASE: f64 = 3.2;
const LEVERAGE_JITTER: f64 = 0.6;
const MODERATE_VOLATILITY_PCT: f64 = 2.0;
const HIGH_VOLATILITY_PCT: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    Low,
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskMetrics {
    pub volatility_pct: f64,
    pub max_drawdown_pct: f64,
    pub value_at_risk: f64,
    pub sharpe_ratio: f64,
    pub leverage: f64,
    pub band: RiskBand,
}

/// Derives the risk panel from the current portfolio value against the
/// session's initial value. Sharpe and leverage are cosmetic jitter.
pub fn assess(portfolio_value: f64, initial_value: f64, rng: &mut SimRng) -> RiskMetrics {
    assert!(
        initial_value.is_finite() && initial_value > 0.0,
        "initial value must be finite and positive"
    );

    let volatility_pct = ((portfolio_value - initial_value) / initial_value).abs() * 100.0;
    let max_drawdown_pct = ((initial_value - portfolio_value) / initial_value * 100.0).max(0.0);

    RiskMetrics {
        volatility_pct,
        max_drawdown_pct,
        value_at_risk: portfolio_value * VAR_95_FRACTION,
        sharpe_ratio: SHARPE_BASE + rng.unit() * SHARPE_JITTER,
        leverage: LEVERAGE_BASE + rng.unit() * LEVERAGE_JITTER,
        band: band_for(volatility_pct),
    }
}

fn band_for(volatility_pct: f64) -> RiskBand {
    if volatility_pct < MODERATE_VOLATILITY_PCT {
        RiskBand::Low
    } else if volatility_pct < HIGH_VOLATILITY_PCT {
        RiskBand::Moderate
    } else {
        RiskBand::High
    }
}

#[cfg(test)]
mod tests {
    use crate::rng::SimRng;

    use super::{assess, RiskBand};

    #[test]
    fn flat_portfolio_reads_as_low_risk() {
        let mut rng = SimRng::new(1);
        let metrics = assess(100.0, 100.0, &mut rng);

        assert_eq!(metrics.volatility_pct, 0.0);
        assert_eq!(metrics.max_drawdown_pct, 0.0);
        assert_eq!(metrics.band, RiskBand::Low);
    }

    #[test]
    fn band_thresholds_sit_at_two_and_five_percent() {
        let mut rng = SimRng::new(2);

        assert_eq!(assess(101.9, 100.0, &mut rng).band, RiskBand::Low);
        assert_eq!(assess(102.0, 100.0, &mut rng).band, RiskBand::Moderate);
        assert_eq!(assess(104.9, 100.0, &mut rng).band, RiskBand::Moderate);
        assert_eq!(assess(105.0, 100.0, &mut rng).band, RiskBand::High);
        assert_eq!(assess(95.0, 100.0, &mut rng).band, RiskBand::High);
    }

    #[test]
    fn drawdown_only_counts_losses() {
        let mut rng = SimRng::new(3);

        assert_eq!(assess(120.0, 100.0, &mut rng).max_drawdown_pct, 0.0);
        assert_eq!(assess(80.0, 100.0, &mut rng).max_drawdown_pct, 20.0);
    }

    #[test]
    fn cosmetic_figures_stay_in_their_jitter_windows() {
        let mut rng = SimRng::new(4);

        for _ in 0..1_000 {
            let metrics = assess(100.0, 100.0, &mut rng);
            assert!((1.8..2.2).contains(&metrics.sharpe_ratio));
            assert!((3.2..3.8).contains(&metrics.leverage));
        }
    }

    #[test]
    #[should_panic(expected = "initial value must be finite and positive")]
    fn zero_initial_value_is_rejected() {
        let mut rng = SimRng::new(5);
        let _ = assess(100.0, 0.0, &mut rng);
    }
}
