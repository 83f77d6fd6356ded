use crate::rng::SimRng;

const PRICE_WALK_SCALE: f64 = 0.0025;
const CHANGE_NUDGE_SCALE: f64 = 0.1;

const LISTINGS: &[(&str, f64, f64)] = &[
    ("BTC/USDT", 43_250.00, 2.45),
    ("ETH/USDT", 2_680.50, -1.23),
    ("SOL/USDT", 98.75, 3.21),
    ("ADA/USDT", 0.485, 4.56),
    ("DOT/USDT", 6.42, -0.87),
    ("AVAX/USDT", 24.85, 1.89),
];

#[derive(Debug, Clone, PartialEq)]
pub struct MarketQuote {
    pub symbol: &'static str,
    pub price: f64,
    pub change_24h: f64,
}

/// The market-watch panel: a fixed symbol set whose prices random-walk on
/// every tick regardless of trading mode.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketBoard {
    quotes: Vec<MarketQuote>,
}

impl Default for MarketBoard {
    fn default() -> Self {
        Self {
            quotes: LISTINGS
                .iter()
                .map(|&(symbol, price, change_24h)| MarketQuote {
                    symbol,
                    price,
                    change_24h,
                })
                .collect(),
        }
    }
}

impl MarketBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quotes(&self) -> &[MarketQuote] {
        &self.quotes
    }

    /// Perturbs every quote: a ±0.25% multiplicative price walk and a small
    /// additive nudge to the 24h-change figure.
    pub fn step(&mut self, rng: &mut SimRng) {
        for quote in &mut self.quotes {
            quote.price *= 1.0 + rng.centered() * PRICE_WALK_SCALE;
            quote.change_24h += rng.centered() * CHANGE_NUDGE_SCALE;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::rng::SimRng;

    use super::MarketBoard;

    #[test]
    fn board_lists_the_fixed_symbol_set() {
        let board = MarketBoard::new();
        let symbols: Vec<&str> = board.quotes().iter().map(|q| q.symbol).collect();

        assert_eq!(
            symbols,
            [
                "BTC/USDT",
                "ETH/USDT",
                "SOL/USDT",
                "ADA/USDT",
                "DOT/USDT",
                "AVAX/USDT"
            ]
        );
    }

    #[test]
    fn step_moves_prices_within_walk_bounds() {
        let mut rng = SimRng::new(12);
        let mut board = MarketBoard::new();
        let before: Vec<f64> = board.quotes().iter().map(|q| q.price).collect();

        board.step(&mut rng);

        for (quote, old_price) in board.quotes().iter().zip(before) {
            let ratio = quote.price / old_price;
            assert!((0.9975..1.0025).contains(&ratio));
        }
    }

    #[test]
    fn prices_stay_positive_over_long_runs() {
        let mut rng = SimRng::new(77);
        let mut board = MarketBoard::new();

        for _ in 0..100_000 {
            board.step(&mut rng);
        }

        for quote in board.quotes() {
            assert!(quote.price > 0.0);
        }
    }

    #[test]
    fn seeded_boards_stay_in_lockstep() {
        let mut rng_a = SimRng::new(8);
        let mut rng_b = SimRng::new(8);
        let mut board_a = MarketBoard::new();
        let mut board_b = MarketBoard::new();

        for _ in 0..500 {
            board_a.step(&mut rng_a);
            board_b.step(&mut rng_b);
        }

        assert_eq!(board_a, board_b);
    }
}
