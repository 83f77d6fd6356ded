use crate::config::SimConfig;
use crate::rng::SimRng;

const MAX_ENTRIES: usize = 10;
const MIN_AMOUNT: f64 = 0.01;
const MAX_AMOUNT: f64 = 0.11;
const PRICE_JITTER_SCALE: f64 = 0.01;
const PROFIT_SPAN: f64 = 500.0;
const PROFIT_BIAS: f64 = 0.35;

const SYMBOLS: &[(&str, f64)] = &[
    ("BTC", 43_250.0),
    ("ETH", 2_680.0),
    ("ADA", 0.485),
    ("SOL", 98.75),
    ("DOT", 6.42),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    Buy,
    Sell,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalTrade {
    pub id: u64,
    pub side: TradeSide,
    pub symbol: &'static str,
    pub amount: f64,
    pub price: f64,
    pub executed_at_ms: i64,
    pub profit: Option<f64>,
}

/// Recent synthesized fills, most recent first, capped at ten entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TradeTape {
    trades: Vec<HistoricalTrade>,
    next_id: u64,
}

impl TradeTape {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn trades(&self) -> &[HistoricalTrade] {
        &self.trades
    }

    /// With the configured probability, synthesizes one fill and prepends it,
    /// trimming the tape to the last ten trades. Returns the new trade when
    /// one was recorded.
    pub fn step(
        &mut self,
        rng: &mut SimRng,
        config: &SimConfig,
        now_ms: i64,
    ) -> Option<HistoricalTrade> {
        if !rng.chance(config.history_fill_probability) {
            return None;
        }

        let (symbol, base_price) = *rng.pick(SYMBOLS);
        let side = if rng.chance(0.5) {
            TradeSide::Buy
        } else {
            TradeSide::Sell
        };
        let amount = rng.range(MIN_AMOUNT, MAX_AMOUNT);
        let price = base_price * (1.0 + rng.centered() * PRICE_JITTER_SCALE);
        let profit = (rng.unit() - PROFIT_BIAS) * PROFIT_SPAN;

        self.next_id += 1;
        let trade = HistoricalTrade {
            id: self.next_id,
            side,
            symbol,
            amount,
            price,
            executed_at_ms: now_ms,
            profit: Some(profit),
        };
        self.trades.insert(0, trade.clone());
        self.trades.truncate(MAX_ENTRIES);
        Some(trade)
    }
}
