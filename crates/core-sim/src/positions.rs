use crate::config::SimConfig;
use crate::rng::SimRng;

const PRICE_WALK_SCALE: f64 = 0.01;
const ENTRY_JITTER_SCALE: f64 = 0.005;
const MIN_SIZE: f64 = 0.1;
const MAX_SIZE: f64 = 0.6;

const SYMBOLS: &[(&str, f64)] = &[
    ("BTC/USDT", 43_250.0),
    ("ETH/USDT", 2_680.0),
    ("SOL/USDT", 98.75),
    ("ADA/USDT", 0.485),
    ("DOT/USDT", 6.42),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Long,
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LivePosition {
    pub id: u64,
    pub symbol: &'static str,
    pub side: Side,
    pub size: f64,
    pub entry_price: f64,
    pub current_price: f64,
    pub pnl: f64,
    pub opened_at_ms: i64,
    pub status: PositionStatus,
}

impl LivePosition {
    fn mark(&mut self, current_price: f64) {
        self.current_price = current_price;
        self.pnl = match self.side {
            Side::Long => (current_price - self.entry_price) * self.size,
            Side::Short => (self.entry_price - current_price) * self.size,
        };
    }
}

/// What a single tick did to the book, for callers that surface activity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionDelta {
    pub opened: Option<LivePosition>,
    pub closed: Option<LivePosition>,
}

/// The set of simulated open positions, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionBook {
    positions: Vec<LivePosition>,
    next_id: u64,
}

impl PositionBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positions(&self) -> &[LivePosition] {
        &self.positions
    }

    pub fn open_count(&self) -> usize {
        self.positions.len()
    }

    /// Advances the book one tick in a fixed order: mark every open position
    /// against a fresh price walk, maybe open one new position, maybe close
    /// the oldest.
    pub fn step(&mut self, rng: &mut SimRng, config: &SimConfig, now_ms: i64) -> PositionDelta {
        let mut delta = PositionDelta::default();

        for position in &mut self.positions {
            let walked = position.current_price * (1.0 + rng.centered() * PRICE_WALK_SCALE);
            position.mark(walked);
        }

        if rng.chance(config.open_probability) && self.positions.len() < config.max_open_positions {
            let position = self.open_position(rng, now_ms);
            delta.opened = Some(position.clone());
            self.positions.push(position);
        }

        if rng.chance(config.close_probability) && !self.positions.is_empty() {
            let mut closed = self.positions.remove(0);
            closed.status = PositionStatus::Closed;
            delta.closed = Some(closed);
        }

        delta
    }

    fn open_position(&mut self, rng: &mut SimRng, now_ms: i64) -> LivePosition {
        let (symbol, base_price) = *rng.pick(SYMBOLS);
        let side = if rng.chance(0.5) {
            Side::Long
        } else {
            Side::Short
        };
        let size = rng.range(MIN_SIZE, MAX_SIZE);
        let entry_price = base_price * (1.0 + rng.centered() * ENTRY_JITTER_SCALE);

        self.next_id += 1;
        LivePosition {
            id: self.next_id,
            symbol,
            side,
            size,
            entry_price,
            current_price: entry_price,
            pnl: 0.0,
            opened_at_ms: now_ms,
            status: PositionStatus::Open,
        }
    }
}
