use std::time::Duration;

use core_sim::{
    EquityCurve, MarketBoard, OrderBook, PortfolioSample, PortfolioState, PositionBook, SimConfig,
    SimRng, TradeTape, TradingMode,
};
use tokio::sync::{broadcast, watch};
use tokio::time::{Instant, MissedTickBehavior};

use crate::events::DashboardEvent;
use crate::snapshot::{
    BookSnapshot, DashboardSnapshot, EquityPointSnapshot, PortfolioFrame, PortfolioSnapshot,
    PositionSnapshot, QuoteSnapshot, TradeSnapshot,
};
use crate::ticker::Ticker;

const EVENT_CHANNEL_CAPACITY: usize = 256;

// Stream ids keep each simulator on its own deterministic sample sequence.
const PORTFOLIO_STREAM: u64 = 1;
const POSITIONS_STREAM: u64 = 2;
const QUOTES_STREAM: u64 = 3;
const BOOK_STREAM: u64 = 4;
const HISTORY_STREAM: u64 = 5;

/// Owns the five simulator tasks and the channels they publish through.
///
/// Every simulator's state lives inside its own task; the handle only holds
/// watch receivers (read-only snapshots) and the mode sender. Shutdown
/// aborts every task and is idempotent.
pub struct Dashboard {
    mode_tx: watch::Sender<TradingMode>,
    events_tx: broadcast::Sender<DashboardEvent>,
    portfolio_rx: watch::Receiver<PortfolioFrame>,
    positions_rx: watch::Receiver<Vec<PositionSnapshot>>,
    quotes_rx: watch::Receiver<Vec<QuoteSnapshot>>,
    book_rx: watch::Receiver<BookSnapshot>,
    history_rx: watch::Receiver<Vec<TradeSnapshot>>,
    equity_rx: watch::Receiver<Vec<EquityPointSnapshot>>,
    tickers: Vec<Ticker>,
}

impl Dashboard {
    /// Spawns every simulator task. Must be called within a tokio runtime.
    pub fn spawn(config: SimConfig, seed: u64) -> Self {
        let root = SimRng::new(seed);
        let (mode_tx, _) = watch::channel(TradingMode::Idle);
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let mut tickers = Vec::with_capacity(6);

        let (portfolio_rx, portfolio_ticker) =
            spawn_portfolio(&config, root.split(PORTFOLIO_STREAM), &mode_tx);
        tickers.push(portfolio_ticker);

        let (positions_rx, positions_ticker) = spawn_positions(
            &config,
            root.split(POSITIONS_STREAM),
            &mode_tx,
            events_tx.clone(),
        );
        tickers.push(positions_ticker);

        let (quotes_rx, quotes_ticker) = spawn_quotes(&config, root.split(QUOTES_STREAM));
        tickers.push(quotes_ticker);

        let (book_rx, book_ticker) = spawn_book(&config, root.split(BOOK_STREAM));
        tickers.push(book_ticker);

        let (history_rx, history_ticker) = spawn_history(
            &config,
            root.split(HISTORY_STREAM),
            &mode_tx,
            events_tx.clone(),
        );
        tickers.push(history_ticker);

        let (equity_rx, equity_ticker) = spawn_equity(&config, portfolio_rx.clone());
        tickers.push(equity_ticker);

        Self {
            mode_tx,
            events_tx,
            portfolio_rx,
            positions_rx,
            quotes_rx,
            book_rx,
            history_rx,
            equity_rx,
            tickers,
        }
    }

    /// Activates trading. Returns false when trading was already active, in
    /// which case nothing changes and no event is published.
    pub fn start_trading(&self) -> bool {
        let flipped = self.mode_tx.send_if_modified(|mode| {
            if mode.is_trading() {
                false
            } else {
                *mode = TradingMode::Trading;
                true
            }
        });
        if flipped {
            let _ = self.events_tx.send(DashboardEvent::TradingStarted);
        }
        flipped
    }

    /// Deactivates trading, freezing the gated simulators in place.
    pub fn stop_trading(&self) -> bool {
        let flipped = self.mode_tx.send_if_modified(|mode| {
            if mode.is_trading() {
                *mode = TradingMode::Idle;
                true
            } else {
                false
            }
        });
        if flipped {
            let _ = self.events_tx.send(DashboardEvent::TradingStopped);
        }
        flipped
    }

    pub fn trading_active(&self) -> bool {
        self.mode_tx.borrow().is_trading()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<DashboardEvent> {
        self.events_tx.subscribe()
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let frame = self.portfolio_rx.borrow().clone();
        DashboardSnapshot {
            trading_active: self.trading_active(),
            portfolio: frame.portfolio,
            risk: frame.risk,
            positions: self.positions_rx.borrow().clone(),
            quotes: self.quotes_rx.borrow().clone(),
            order_book: self.book_rx.borrow().clone(),
            history: self.history_rx.borrow().clone(),
            equity_curve: self.equity_rx.borrow().clone(),
        }
    }

    /// Aborts every simulator task. Safe to call more than once; no tick
    /// callback runs after this returns.
    pub fn shutdown(&mut self) {
        for ticker in &mut self.tickers {
            ticker.shutdown();
        }
    }
}

fn spawn_portfolio(
    config: &SimConfig,
    mut rng: SimRng,
    mode_tx: &watch::Sender<TradingMode>,
) -> (watch::Receiver<PortfolioFrame>, Ticker) {
    let (frame_tx, frame_rx) = watch::channel(PortfolioFrame::default());
    let mut mode_rx = mode_tx.subscribe();
    let period = Duration::from_millis(config.portfolio_tick_ms);
    let config = *config;

    let handle = tokio::spawn(async move {
        let mut state = PortfolioState::new();
        let initial_value = state.value;
        let mut session_started: Option<Instant> = None;
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if !mode_rx.borrow().is_trading() {
                        continue;
                    }
                    let sample = PortfolioSample::draw(&mut rng);
                    state.step(&sample, &config);
                    publish_frame(&frame_tx, &state, initial_value, session_started, &mut rng);
                }
                changed = mode_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    // Counters reset the moment a session starts, not on the
                    // next tick, so a snapshot taken right after start is
                    // already zeroed.
                    if mode_rx.borrow_and_update().is_trading() {
                        state.start_session();
                        session_started = Some(Instant::now());
                        publish_frame(&frame_tx, &state, initial_value, session_started, &mut rng);
                    }
                }
            }
        }
    });

    (frame_rx, Ticker::from_handle(handle))
}

fn publish_frame(
    frame_tx: &watch::Sender<PortfolioFrame>,
    state: &PortfolioState,
    initial_value: f64,
    session_started: Option<Instant>,
    rng: &mut SimRng,
) {
    let uptime_secs = session_started.map_or(0, |started| started.elapsed().as_secs());
    let risk = core_sim::assess(state.value, initial_value, rng).into();
    let _ = frame_tx.send(PortfolioFrame {
        portfolio: PortfolioSnapshot::of(state, uptime_secs),
        risk,
    });
}

fn spawn_positions(
    config: &SimConfig,
    mut rng: SimRng,
    mode_tx: &watch::Sender<TradingMode>,
    events_tx: broadcast::Sender<DashboardEvent>,
) -> (watch::Receiver<Vec<PositionSnapshot>>, Ticker) {
    let (positions_tx, positions_rx) = watch::channel(Vec::new());
    let mode_rx = mode_tx.subscribe();
    let period = Duration::from_millis(config.positions_tick_ms);
    let config = *config;
    let mut book = PositionBook::new();

    let ticker = Ticker::spawn(period, move || {
        if !mode_rx.borrow().is_trading() {
            return;
        }
        let delta = book.step(&mut rng, &config, now_unix_ms());
        if let Some(opened) = &delta.opened {
            let _ = events_tx.send(DashboardEvent::position_opened(opened));
        }
        if let Some(closed) = &delta.closed {
            let _ = events_tx.send(DashboardEvent::position_closed(closed));
        }
        let _ = positions_tx.send(book.positions().iter().map(Into::into).collect());
    });

    (positions_rx, ticker)
}

fn spawn_quotes(config: &SimConfig, mut rng: SimRng) -> (watch::Receiver<Vec<QuoteSnapshot>>, Ticker) {
    let mut board = MarketBoard::new();
    let (quotes_tx, quotes_rx) =
        watch::channel(board.quotes().iter().map(Into::into).collect::<Vec<_>>());
    let period = Duration::from_millis(config.quotes_tick_ms);

    let ticker = Ticker::spawn(period, move || {
        board.step(&mut rng);
        let _ = quotes_tx.send(board.quotes().iter().map(Into::into).collect());
    });

    (quotes_rx, ticker)
}

fn spawn_book(config: &SimConfig, mut rng: SimRng) -> (watch::Receiver<BookSnapshot>, Ticker) {
    let mut book = OrderBook::generate(&mut rng, config.book_depth);
    let (book_tx, book_rx) = watch::channel(BookSnapshot::from(&book));
    let period = Duration::from_millis(config.book_tick_ms);

    let ticker = Ticker::spawn(period, move || {
        book.step(&mut rng);
        let _ = book_tx.send(BookSnapshot::from(&book));
    });

    (book_rx, ticker)
}

fn spawn_history(
    config: &SimConfig,
    mut rng: SimRng,
    mode_tx: &watch::Sender<TradingMode>,
    events_tx: broadcast::Sender<DashboardEvent>,
) -> (watch::Receiver<Vec<TradeSnapshot>>, Ticker) {
    let (history_tx, history_rx) = watch::channel(Vec::new());
    let mode_rx = mode_tx.subscribe();
    let period = Duration::from_millis(config.history_tick_ms);
    let config = *config;
    let mut tape = TradeTape::new();

    let ticker = Ticker::spawn(period, move || {
        if !mode_rx.borrow().is_trading() {
            return;
        }
        if let Some(trade) = tape.step(&mut rng, &config, now_unix_ms()) {
            let _ = events_tx.send(DashboardEvent::trade_recorded(&trade));
            let _ = history_tx.send(tape.trades().iter().map(Into::into).collect());
        }
    });

    (history_rx, ticker)
}

fn spawn_equity(
    config: &SimConfig,
    portfolio_rx: watch::Receiver<PortfolioFrame>,
) -> (watch::Receiver<Vec<EquityPointSnapshot>>, Ticker) {
    let (equity_tx, equity_rx) = watch::channel(Vec::new());
    let period = Duration::from_millis(config.equity_tick_ms);
    let mut curve = EquityCurve::new(config.equity_curve_len);

    let ticker = Ticker::spawn(period, move || {
        let value = portfolio_rx.borrow().portfolio.value;
        curve.record(value, now_unix_ms());
        let _ = equity_tx.send(curve.points().iter().map(Into::into).collect());
    });

    (equity_rx, ticker)
}

fn now_unix_ms() -> i64 {
    (time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}
