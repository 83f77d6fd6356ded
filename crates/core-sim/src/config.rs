/// Whether the gated simulators advance on their next tick.
///
/// The mode is an explicit input to every step call rather than ambient
/// shared state, so a step is fully determined by its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradingMode {
    Idle,
    Trading,
}

impl TradingMode {
    pub fn is_trading(self) -> bool {
        matches!(self, Self::Trading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    pub portfolio_tick_ms: u64,
    pub quotes_tick_ms: u64,
    pub book_tick_ms: u64,
    pub positions_tick_ms: u64,
    pub history_tick_ms: u64,
    pub equity_tick_ms: u64,
    pub portfolio_floor: f64,
    pub trade_probability: f64,
    pub win_probability: f64,
    pub open_probability: f64,
    pub close_probability: f64,
    pub history_fill_probability: f64,
    pub max_open_positions: usize,
    pub book_depth: usize,
    pub equity_curve_len: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            portfolio_tick_ms: 2_000,
            quotes_tick_ms: 1_500,
            book_tick_ms: 1_000,
            positions_tick_ms: 3_000,
            history_tick_ms: 5_000,
            equity_tick_ms: 1_000,
            portfolio_floor: 50.0,
            trade_probability: 0.3,
            win_probability: 0.65,
            open_probability: 0.2,
            close_probability: 0.15,
            history_fill_probability: 0.4,
            max_open_positions: 8,
            book_depth: 8,
            equity_curve_len: 30,
        }
    }
}
