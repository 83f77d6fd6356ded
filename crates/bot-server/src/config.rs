use std::{
    env, fmt,
    net::{AddrParseError, SocketAddr},
    time::{SystemTime, UNIX_EPOCH},
};

use core_sim::SimConfig;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_RUN_LOG_PATH: &str = "artifacts/runlog.jsonl";

const TICK_VARS: &[(&str, TickField)] = &[
    ("BOT_PORTFOLIO_TICK_MS", TickField::Portfolio),
    ("BOT_QUOTES_TICK_MS", TickField::Quotes),
    ("BOT_BOOK_TICK_MS", TickField::Book),
    ("BOT_POSITIONS_TICK_MS", TickField::Positions),
    ("BOT_HISTORY_TICK_MS", TickField::History),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TickField {
    Portfolio,
    Quotes,
    Book,
    Positions,
    History,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub sim_seed: u64,
    pub run_log_path: String,
    pub sim: SimConfig,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidListenAddr(AddrParseError),
    InvalidSimSeed,
    InvalidRunLogPath,
    InvalidMaxOpenPositions,
    InvalidTickPeriod(&'static str),
    NonUnicodeListenAddr,
    NonUnicodeSimSeed,
    NonUnicodeRunLogPath,
    NonUnicodeMaxOpenPositions,
    NonUnicodeTickPeriod(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidListenAddr(err) => {
                write!(f, "BOT_SERVER_ADDR is not a valid socket address: {err}")
            }
            Self::InvalidSimSeed => {
                write!(f, "BOT_SIM_SEED must be an unsigned 64-bit integer")
            }
            Self::InvalidRunLogPath => {
                write!(f, "BOT_RUN_LOG_PATH must not be empty or whitespace")
            }
            Self::InvalidMaxOpenPositions => {
                write!(f, "BOT_MAX_OPEN_POSITIONS must be a positive integer")
            }
            Self::InvalidTickPeriod(var) => {
                write!(f, "{var} must be a positive millisecond count")
            }
            Self::NonUnicodeListenAddr => {
                write!(f, "BOT_SERVER_ADDR contains non-unicode data")
            }
            Self::NonUnicodeSimSeed => {
                write!(f, "BOT_SIM_SEED contains non-unicode data")
            }
            Self::NonUnicodeRunLogPath => {
                write!(f, "BOT_RUN_LOG_PATH contains non-unicode data")
            }
            Self::NonUnicodeMaxOpenPositions => {
                write!(f, "BOT_MAX_OPEN_POSITIONS contains non-unicode data")
            }
            Self::NonUnicodeTickPeriod(var) => {
                write!(f, "{var} contains non-unicode data")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidListenAddr(err) => Some(err),
            _ => None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let listen_addr = match env::var("BOT_SERVER_ADDR") {
            Ok(value) => value.parse().map_err(ConfigError::InvalidListenAddr)?,
            Err(env::VarError::NotPresent) => DEFAULT_LISTEN_ADDR
                .parse()
                .expect("default listen address must be valid"),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::NonUnicodeListenAddr);
            }
        };

        let sim_seed = match env::var("BOT_SIM_SEED") {
            Ok(value) => value.parse().map_err(|_| ConfigError::InvalidSimSeed)?,
            Err(env::VarError::NotPresent) => seed_from_clock(),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::NonUnicodeSimSeed);
            }
        };

        let run_log_path = match env::var("BOT_RUN_LOG_PATH") {
            Ok(value) => {
                if value.trim().is_empty() {
                    return Err(ConfigError::InvalidRunLogPath);
                }
                value
            }
            Err(env::VarError::NotPresent) => DEFAULT_RUN_LOG_PATH.to_owned(),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::NonUnicodeRunLogPath);
            }
        };

        let mut sim = SimConfig::default();

        match env::var("BOT_MAX_OPEN_POSITIONS") {
            Ok(value) => {
                let parsed: usize = value
                    .parse()
                    .map_err(|_| ConfigError::InvalidMaxOpenPositions)?;
                if parsed == 0 {
                    return Err(ConfigError::InvalidMaxOpenPositions);
                }
                sim.max_open_positions = parsed;
            }
            Err(env::VarError::NotPresent) => {}
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigError::NonUnicodeMaxOpenPositions);
            }
        }

        for (var, field) in TICK_VARS {
            if let Some(period_ms) = parse_tick_env(var)? {
                match field {
                    TickField::Portfolio => sim.portfolio_tick_ms = period_ms,
                    TickField::Quotes => sim.quotes_tick_ms = period_ms,
                    TickField::Book => sim.book_tick_ms = period_ms,
                    TickField::Positions => sim.positions_tick_ms = period_ms,
                    TickField::History => sim.history_tick_ms = period_ms,
                }
            }
        }

        Ok(Self {
            listen_addr,
            sim_seed,
            run_log_path,
            sim,
        })
    }
}

fn parse_tick_env(var: &'static str) -> Result<Option<u64>, ConfigError> {
    match env::var(var) {
        Ok(value) => {
            let parsed: u64 = value
                .parse()
                .map_err(|_| ConfigError::InvalidTickPeriod(var))?;
            if parsed == 0 {
                return Err(ConfigError::InvalidTickPeriod(var));
            }
            Ok(Some(parsed))
        }
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::NonUnicodeTickPeriod(var)),
    }
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(0)
}
