use crate::config::SimConfig;
use crate::rng::SimRng;

const START_VALUE: f64 = 100.0;
const NOISE_SCALE: f64 = 0.01;
const TREND_SCALE: f64 = 0.01;
const TREND_PHASE_PER_HOUR: f64 = 0.5;
const MOMENTUM_UP: f64 = 0.005;
const MOMENTUM_DOWN: f64 = -0.002;
const MOMENTUM_UP_PROBABILITY: f64 = 0.4;

/// One tick's worth of randomness for the portfolio walk, drawn up front so
/// the step itself is a pure function of `(state, sample)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortfolioSample {
    /// Uniform noise in `[-1, 1)`, scaled to a ±1% move by the step.
    pub noise: f64,
    /// Momentum bias already resolved to its additive delta.
    pub momentum: f64,
    /// Roll in `[0, 1)` deciding whether a trade is recorded this tick.
    pub trade_roll: f64,
    /// Roll in `[0, 1)` deciding whether a recorded trade is a win.
    pub win_roll: f64,
}

impl PortfolioSample {
    pub fn draw(rng: &mut SimRng) -> Self {
        Self {
            noise: rng.centered(),
            momentum: if rng.chance(MOMENTUM_UP_PROBABILITY) {
                MOMENTUM_UP
            } else {
                MOMENTUM_DOWN
            },
            trade_roll: rng.unit(),
            win_roll: rng.unit(),
        }
    }

    /// A sample with every term zeroed. Stepping with it leaves the value
    /// and counters untouched on the first tick after a start.
    pub fn flat() -> Self {
        Self {
            noise: 0.0,
            momentum: 0.0,
            trade_roll: 1.0,
            win_roll: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortfolioState {
    pub value: f64,
    pub total_trades: u64,
    pub wins: u64,
    /// Completed ticks since the current trading session began, the key for
    /// the sinusoidal trend phase.
    pub ticks_elapsed: u64,
}

impl Default for PortfolioState {
    fn default() -> Self {
        Self {
            value: START_VALUE,
            total_trades: 0,
            wins: 0,
            ticks_elapsed: 0,
        }
    }
}

impl PortfolioState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins a trading session: counters and trend phase reset, the value
    /// carries over from wherever the last session left it.
    pub fn start_session(&mut self) {
        self.total_trades = 0;
        self.wins = 0;
        self.ticks_elapsed = 0;
    }

    pub fn win_rate(&self) -> f64 {
        if self.total_trades == 0 {
            return 0.0;
        }
        self.wins as f64 / self.total_trades as f64
    }

    /// Advances the walk one tick. The delta is uniform noise plus a
    /// sinusoidal trend keyed to session elapsed time plus the momentum
    /// bias, applied multiplicatively and floored at the configured value.
    pub fn step(&mut self, sample: &PortfolioSample, config: &SimConfig) {
        let trend = (self.hours_elapsed(config) * TREND_PHASE_PER_HOUR).sin() * TREND_SCALE;
        let delta = sample.noise * NOISE_SCALE + trend + sample.momentum;

        self.value = (self.value * (1.0 + delta)).max(config.portfolio_floor);
        self.ticks_elapsed += 1;

        if sample.trade_roll < config.trade_probability {
            self.total_trades += 1;
            if sample.win_roll < config.win_probability {
                self.wins += 1;
            }
        }
    }

    fn hours_elapsed(&self, config: &SimConfig) -> f64 {
        (self.ticks_elapsed * config.portfolio_tick_ms) as f64 / 3_600_000.0
    }
}

#[cfg(test)]
mod tests {
    use crate::config::SimConfig;
    use crate::rng::SimRng;

    use super::{PortfolioSample, PortfolioState, MOMENTUM_DOWN};

    #[test]
    fn value_never_drops_below_floor() {
        let config = SimConfig::default();
        let mut state = PortfolioState::new();
        let worst_case = PortfolioSample {
            noise: -1.0,
            momentum: MOMENTUM_DOWN,
            trade_roll: 1.0,
            win_roll: 1.0,
        };

        for _ in 0..10_000 {
            state.step(&worst_case, &config);
            assert!(state.value >= config.portfolio_floor);
        }
    }

    #[test]
    fn value_stays_floored_under_random_samples() {
        let config = SimConfig::default();
        let mut rng = SimRng::new(2024);
        let mut state = PortfolioState::new();

        for _ in 0..50_000 {
            let sample = PortfolioSample::draw(&mut rng);
            state.step(&sample, &config);
            assert!(state.value >= config.portfolio_floor);
        }
    }

    #[test]
    fn win_rate_stays_in_unit_interval() {
        let config = SimConfig::default();
        let mut rng = SimRng::new(7);
        let mut state = PortfolioState::new();

        for _ in 0..10_000 {
            let sample = PortfolioSample::draw(&mut rng);
            state.step(&sample, &config);
            let rate = state.win_rate();
            assert!((0.0..=1.0).contains(&rate));
        }
        assert!(state.total_trades > 0);
    }

    #[test]
    fn flat_sample_on_fresh_session_is_a_no_op() {
        let config = SimConfig::default();
        let mut state = PortfolioState::new();
        state.start_session();

        state.step(&PortfolioSample::flat(), &config);

        assert_eq!(state.value, 100.0);
        assert_eq!(state.total_trades, 0);
        assert_eq!(state.win_rate(), 0.0);
    }

    #[test]
    fn start_session_resets_counters_but_not_value() {
        let config = SimConfig::default();
        let mut rng = SimRng::new(99);
        let mut state = PortfolioState::new();

        for _ in 0..200 {
            let sample = PortfolioSample::draw(&mut rng);
            state.step(&sample, &config);
        }
        let value_before = state.value;
        assert!(state.total_trades > 0);

        state.start_session();

        assert_eq!(state.value, value_before);
        assert_eq!(state.total_trades, 0);
        assert_eq!(state.wins, 0);
        assert_eq!(state.ticks_elapsed, 0);
    }

    #[test]
    fn seeded_walks_are_identical() {
        let config = SimConfig::default();
        let mut rng_a = SimRng::new(31);
        let mut rng_b = SimRng::new(31);
        let mut state_a = PortfolioState::new();
        let mut state_b = PortfolioState::new();

        for _ in 0..1_000 {
            state_a.step(&PortfolioSample::draw(&mut rng_a), &config);
            state_b.step(&PortfolioSample::draw(&mut rng_b), &config);
        }

        assert_eq!(state_a, state_b);
    }

    #[test]
    fn trade_counter_tracks_wins_bound() {
        let config = SimConfig::default();
        let mut rng = SimRng::new(55);
        let mut state = PortfolioState::new();

        for _ in 0..5_000 {
            state.step(&PortfolioSample::draw(&mut rng), &config);
        }

        assert!(state.wins <= state.total_trades);
    }
}
