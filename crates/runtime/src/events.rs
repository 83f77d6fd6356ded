use crate::snapshot::{SideSnapshot, TradeSideSnapshot};

/// Notifications pushed to event subscribers (the WebSocket stream and the
/// run log) as the simulators tick.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum DashboardEvent {
    Connected,
    TradingStarted,
    TradingStopped,
    PositionOpened {
        symbol: String,
        side: SideSnapshot,
        size: f64,
        entry_price: f64,
    },
    PositionClosed {
        symbol: String,
        pnl: f64,
    },
    TradeRecorded {
        symbol: String,
        side: TradeSideSnapshot,
        amount: f64,
        price: f64,
    },
}

impl DashboardEvent {
    pub fn position_opened(position: &core_sim::LivePosition) -> Self {
        Self::PositionOpened {
            symbol: position.symbol.to_string(),
            side: position.side.into(),
            size: position.size,
            entry_price: position.entry_price,
        }
    }

    pub fn position_closed(position: &core_sim::LivePosition) -> Self {
        Self::PositionClosed {
            symbol: position.symbol.to_string(),
            pnl: position.pnl,
        }
    }

    pub fn trade_recorded(trade: &core_sim::HistoricalTrade) -> Self {
        Self::TradeRecorded {
            symbol: trade.symbol.to_string(),
            side: trade.side.into(),
            amount: trade.amount,
            price: trade.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::DashboardEvent;

    #[test]
    fn events_serialize_with_event_type_tag() {
        let json = serde_json::to_value(DashboardEvent::TradingStarted).unwrap();
        assert_eq!(json["event_type"], "trading_started");

        let json = serde_json::to_value(DashboardEvent::PositionClosed {
            symbol: "BTC/USDT".to_string(),
            pnl: -1.25,
        })
        .unwrap();
        assert_eq!(json["event_type"], "position_closed");
        assert_eq!(json["symbol"], "BTC/USDT");
        assert_eq!(json["pnl"], -1.25);
    }
}
