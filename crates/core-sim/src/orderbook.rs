use crate::rng::SimRng;

const BASE_PRICE: f64 = 43_250.0;
const LEVEL_SPACING: f64 = 0.5;
const MIN_SIZE: f64 = 0.1;
const MAX_SIZE: f64 = 2.1;
const SIZE_FLOOR: f64 = 0.01;
const PRICE_JITTER_SCALE: f64 = 0.000_05;
const SIZE_JITTER_SCALE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookLevel {
    pub price: f64,
    pub size: f64,
    /// Cumulative display total, fixed at initialization.
    pub total: f64,
}

/// A display-only depth ladder: bids descending and asks ascending from a
/// fixed base price, perturbed on every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBook {
    bids: Vec<BookLevel>,
    asks: Vec<BookLevel>,
    spread: f64,
}

impl OrderBook {
    /// Builds a book of `depth` levels per side with linearly spaced prices
    /// and random sizes, `total = size * (index + 1)`.
    pub fn generate(rng: &mut SimRng, depth: usize) -> Self {
        assert!(depth > 0, "book depth must be positive");

        let mut bids = Vec::with_capacity(depth);
        let mut asks = Vec::with_capacity(depth);

        for index in 0..depth {
            let offset = (index + 1) as f64 * LEVEL_SPACING;
            let rank = (index + 1) as f64;

            let bid_size = rng.range(MIN_SIZE, MAX_SIZE);
            bids.push(BookLevel {
                price: BASE_PRICE - offset,
                size: bid_size,
                total: bid_size * rank,
            });

            let ask_size = rng.range(MIN_SIZE, MAX_SIZE);
            asks.push(BookLevel {
                price: BASE_PRICE + offset,
                size: ask_size,
                total: ask_size * rank,
            });
        }

        let mut book = Self {
            bids,
            asks,
            spread: 0.0,
        };
        book.spread = book.recompute_spread();
        book
    }

    pub fn bids(&self) -> &[BookLevel] {
        &self.bids
    }

    pub fn asks(&self) -> &[BookLevel] {
        &self.asks
    }

    pub fn spread(&self) -> f64 {
        self.spread
    }

    pub fn best_bid(&self) -> Option<f64> {
        self.bids.first().map(|level| level.price)
    }

    pub fn best_ask(&self) -> Option<f64> {
        self.asks.first().map(|level| level.price)
    }

    /// Jitters every level's price and size, then recomputes the spread from
    /// the top of book so the displayed figure always agrees with the ladder.
    pub fn step(&mut self, rng: &mut SimRng) {
        for level in self.bids.iter_mut().chain(self.asks.iter_mut()) {
            level.price *= 1.0 + rng.centered() * PRICE_JITTER_SCALE;
            level.size = (level.size + rng.centered() * SIZE_JITTER_SCALE).max(SIZE_FLOOR);
        }
        self.spread = self.recompute_spread();
    }

    fn recompute_spread(&self) -> f64 {
        match (self.best_ask(), self.best_bid()) {
            (Some(ask), Some(bid)) => ask - bid,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::rng::SimRng;

    use super::{OrderBook, SIZE_FLOOR};

    #[test]
    fn generated_bids_sit_strictly_below_matching_asks() {
        let mut rng = SimRng::new(9);
        let book = OrderBook::generate(&mut rng, 8);

        assert_eq!(book.bids().len(), 8);
        assert_eq!(book.asks().len(), 8);
        for (bid, ask) in book.bids().iter().zip(book.asks()) {
            assert!(bid.price < ask.price);
        }
    }

    #[test]
    fn generated_totals_scale_with_depth_rank() {
        let mut rng = SimRng::new(13);
        let book = OrderBook::generate(&mut rng, 8);

        for (index, level) in book.bids().iter().enumerate() {
            assert_eq!(level.total, level.size * (index + 1) as f64);
        }
        for (index, level) in book.asks().iter().enumerate() {
            assert_eq!(level.total, level.size * (index + 1) as f64);
        }
    }

    #[test]
    fn bids_descend_and_asks_ascend_from_the_touch() {
        let mut rng = SimRng::new(3);
        let book = OrderBook::generate(&mut rng, 8);

        for pair in book.bids().windows(2) {
            assert!(pair[0].price > pair[1].price);
        }
        for pair in book.asks().windows(2) {
            assert!(pair[0].price < pair[1].price);
        }
    }

    #[test]
    fn spread_tracks_top_of_book_after_steps() {
        let mut rng = SimRng::new(21);
        let mut book = OrderBook::generate(&mut rng, 8);

        for _ in 0..1_000 {
            book.step(&mut rng);
            let expected = book.best_ask().unwrap() - book.best_bid().unwrap();
            assert_eq!(book.spread(), expected);
        }
    }

    #[test]
    fn sizes_never_fall_below_the_floor() {
        let mut rng = SimRng::new(33);
        let mut book = OrderBook::generate(&mut rng, 8);

        for _ in 0..50_000 {
            book.step(&mut rng);
        }

        for level in book.bids().iter().chain(book.asks()) {
            assert!(level.size >= SIZE_FLOOR);
        }
    }

    #[test]
    #[should_panic(expected = "book depth must be positive")]
    fn zero_depth_book_is_rejected() {
        let mut rng = SimRng::new(1);
        let _ = OrderBook::generate(&mut rng, 0);
    }
}
