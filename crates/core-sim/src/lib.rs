mod config;
mod equity;
mod history;
mod orderbook;
mod portfolio;
mod positions;
mod quotes;
mod risk;
mod rng;

pub use config::{SimConfig, TradingMode};
pub use equity::{EquityCurve, EquityPoint};
pub use history::{HistoricalTrade, TradeSide, TradeTape};
pub use orderbook::{BookLevel, OrderBook};
pub use portfolio::{PortfolioSample, PortfolioState};
pub use positions::{LivePosition, PositionBook, PositionDelta, PositionStatus, Side};
pub use quotes::{MarketBoard, MarketQuote};
pub use risk::{assess, RiskBand, RiskMetrics};
pub use rng::SimRng;
