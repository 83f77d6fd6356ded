//! Read-only views of simulator state, serialized for the presentation layer.

use core_sim::{
    BookLevel, EquityPoint, HistoricalTrade, LivePosition, MarketQuote, OrderBook, PortfolioState,
    PositionStatus, RiskBand, RiskMetrics, Side, TradeSide,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SideSnapshot {
    Long,
    Short,
}

impl From<Side> for SideSnapshot {
    fn from(side: Side) -> Self {
        match side {
            Side::Long => Self::Long,
            Side::Short => Self::Short,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeSideSnapshot {
    Buy,
    Sell,
}

impl From<TradeSide> for TradeSideSnapshot {
    fn from(side: TradeSide) -> Self {
        match side {
            TradeSide::Buy => Self::Buy,
            TradeSide::Sell => Self::Sell,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusSnapshot {
    Open,
    Closed,
}

impl From<PositionStatus> for StatusSnapshot {
    fn from(status: PositionStatus) -> Self {
        match status {
            PositionStatus::Open => Self::Open,
            PositionStatus::Closed => Self::Closed,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBandSnapshot {
    Low,
    Moderate,
    High,
}

impl From<RiskBand> for RiskBandSnapshot {
    fn from(band: RiskBand) -> Self {
        match band {
            RiskBand::Low => Self::Low,
            RiskBand::Moderate => Self::Moderate,
            RiskBand::High => Self::High,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PortfolioSnapshot {
    pub value: f64,
    pub total_trades: u64,
    pub win_rate: f64,
    pub uptime_secs: u64,
}

impl PortfolioSnapshot {
    pub fn of(state: &PortfolioState, uptime_secs: u64) -> Self {
        Self {
            value: state.value,
            total_trades: state.total_trades,
            win_rate: state.win_rate(),
            uptime_secs,
        }
    }
}

impl Default for PortfolioSnapshot {
    fn default() -> Self {
        Self::of(&PortfolioState::default(), 0)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RiskSnapshot {
    pub volatility_pct: f64,
    pub max_drawdown_pct: f64,
    pub value_at_risk: f64,
    pub sharpe_ratio: f64,
    pub leverage: f64,
    pub band: RiskBandSnapshot,
}

impl From<RiskMetrics> for RiskSnapshot {
    fn from(metrics: RiskMetrics) -> Self {
        Self {
            volatility_pct: metrics.volatility_pct,
            max_drawdown_pct: metrics.max_drawdown_pct,
            value_at_risk: metrics.value_at_risk,
            sharpe_ratio: metrics.sharpe_ratio,
            leverage: metrics.leverage,
            band: metrics.band.into(),
        }
    }
}

/// Portfolio and its derived risk figures travel together since both are
/// produced by the same tick.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PortfolioFrame {
    pub portfolio: PortfolioSnapshot,
    pub risk: RiskSnapshot,
}

impl Default for PortfolioFrame {
    fn default() -> Self {
        Self {
            portfolio: PortfolioSnapshot::default(),
            risk: RiskSnapshot {
                volatility_pct: 0.0,
                max_drawdown_pct: 0.0,
                value_at_risk: 2.0,
                sharpe_ratio: 1.8,
                leverage: 3.2,
                band: RiskBandSnapshot::Low,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PositionSnapshot {
    pub id: u64,
    pub symbol: String,
    pub side: SideSnapshot,
    pub size: f64,
    pub entry_price: f64,
    pub current_price: f64,
    pub pnl: f64,
    pub opened_at_ms: i64,
    pub status: StatusSnapshot,
}

impl From<&LivePosition> for PositionSnapshot {
    fn from(position: &LivePosition) -> Self {
        Self {
            id: position.id,
            symbol: position.symbol.to_string(),
            side: position.side.into(),
            size: position.size,
            entry_price: position.entry_price,
            current_price: position.current_price,
            pnl: position.pnl,
            opened_at_ms: position.opened_at_ms,
            status: position.status.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct QuoteSnapshot {
    pub symbol: String,
    pub price: f64,
    pub change_24h: f64,
}

impl From<&MarketQuote> for QuoteSnapshot {
    fn from(quote: &MarketQuote) -> Self {
        Self {
            symbol: quote.symbol.to_string(),
            price: quote.price,
            change_24h: quote.change_24h,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BookLevelSnapshot {
    pub price: f64,
    pub size: f64,
    pub total: f64,
}

impl From<&BookLevel> for BookLevelSnapshot {
    fn from(level: &BookLevel) -> Self {
        Self {
            price: level.price,
            size: level.size,
            total: level.total,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct BookSnapshot {
    pub bids: Vec<BookLevelSnapshot>,
    pub asks: Vec<BookLevelSnapshot>,
    pub spread: f64,
}

impl From<&OrderBook> for BookSnapshot {
    fn from(book: &OrderBook) -> Self {
        Self {
            bids: book.bids().iter().map(Into::into).collect(),
            asks: book.asks().iter().map(Into::into).collect(),
            spread: book.spread(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TradeSnapshot {
    pub id: u64,
    pub side: TradeSideSnapshot,
    pub symbol: String,
    pub amount: f64,
    pub price: f64,
    pub executed_at_ms: i64,
    pub profit: Option<f64>,
}

impl From<&HistoricalTrade> for TradeSnapshot {
    fn from(trade: &HistoricalTrade) -> Self {
        Self {
            id: trade.id,
            side: trade.side.into(),
            symbol: trade.symbol.to_string(),
            amount: trade.amount,
            price: trade.price,
            executed_at_ms: trade.executed_at_ms,
            profit: trade.profit,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct EquityPointSnapshot {
    pub value: f64,
    pub recorded_at_ms: i64,
}

impl From<&EquityPoint> for EquityPointSnapshot {
    fn from(point: &EquityPoint) -> Self {
        Self {
            value: point.value,
            recorded_at_ms: point.recorded_at_ms,
        }
    }
}

/// The aggregate view the API layer serves.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DashboardSnapshot {
    pub trading_active: bool,
    pub portfolio: PortfolioSnapshot,
    pub risk: RiskSnapshot,
    pub positions: Vec<PositionSnapshot>,
    pub quotes: Vec<QuoteSnapshot>,
    pub order_book: BookSnapshot,
    pub history: Vec<TradeSnapshot>,
    pub equity_curve: Vec<EquityPointSnapshot>,
}

#[cfg(test)]
mod tests {
    use core_sim::{PortfolioState, SimRng};

    use super::{PortfolioFrame, PortfolioSnapshot, RiskBandSnapshot, RiskSnapshot};

    #[test]
    fn portfolio_snapshot_reflects_state() {
        let mut state = PortfolioState::new();
        state.total_trades = 4;
        state.wins = 3;

        let snapshot = PortfolioSnapshot::of(&state, 17);

        assert_eq!(snapshot.value, 100.0);
        assert_eq!(snapshot.total_trades, 4);
        assert_eq!(snapshot.win_rate, 0.75);
        assert_eq!(snapshot.uptime_secs, 17);
    }

    #[test]
    fn default_frame_matches_fresh_portfolio() {
        let mut rng = SimRng::new(1);
        let frame = PortfolioFrame::default();
        let assessed: RiskSnapshot = core_sim::assess(100.0, 100.0, &mut rng).into();

        assert_eq!(frame.portfolio.value, 100.0);
        assert_eq!(frame.risk.band, RiskBandSnapshot::Low);
        assert_eq!(frame.risk.value_at_risk, assessed.value_at_risk);
    }

    #[test]
    fn snapshot_serializes_with_snake_case_fields() {
        let frame = PortfolioFrame::default();
        let json = serde_json::to_value(&frame).unwrap();

        assert_eq!(json["portfolio"]["total_trades"], 0);
        assert_eq!(json["risk"]["band"], "low");
    }
}
