use crate::config::AppConfig;
use crate::models::NormalDistribution;
use portable_atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

// ── Option side ──

/// Resolved once at the boundary: a case-insensitive "put" is a put,
/// every other token (including empty or misspelt ones) is a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum OptionSide {
    #[default]
    Call,
    Put,
}

impl OptionSide {
    pub fn from_token(token: &str) -> Self {
        if token.eq_ignore_ascii_case("put") {
            Self::Put
        } else {
            Self::Call
        }
    }
}

impl From<String> for OptionSide {
    fn from(token: String) -> Self {
        Self::from_token(&token)
    }
}

impl std::fmt::Display for OptionSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

// ── Pricing input (stack, Copy) ──

/// Market and contract parameters for one European option.
///
/// Rates and volatility are decimals (0.05 for 5%). Caller precondition:
/// `spot`, `strike` and `expiry_years` positive and finite, `volatility`
/// non-negative. Non-positive spot or strike gives non-finite results.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[repr(C)]
pub struct PricingInput {
    pub spot: f64,
    pub strike: f64,
    pub expiry_years: f64,
    pub rate: f64,
    pub volatility: f64,
    #[serde(default)]
    pub side: OptionSide,
}

impl PricingInput {
    #[inline]
    pub fn with_side(self, side: OptionSide) -> Self {
        Self { side, ..self }
    }
}

// ── Moneyness ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Moneyness {
    InTheMoney,
    AtTheMoney,
    OutOfTheMoney,
}

impl Moneyness {
    pub fn classify(side: OptionSide, spot: f64, strike: f64) -> Self {
        let (itm, otm) = match side {
            OptionSide::Call => (spot > strike, spot < strike),
            OptionSide::Put => (spot < strike, spot > strike),
        };
        if itm {
            Self::InTheMoney
        } else if otm {
            Self::OutOfTheMoney
        } else {
            Self::AtTheMoney
        }
    }
}

impl std::fmt::Display for Moneyness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InTheMoney => write!(f, "in-the-money"),
            Self::AtTheMoney => write!(f, "at-the-money"),
            Self::OutOfTheMoney => write!(f, "out-of-the-money"),
        }
    }
}

// ── Performance Counters (lock-free) ──

pub struct PerfCounters {
    pub prices_computed: AtomicU64,
    pub greeks_computed: AtomicU64,
    pub quotes_served: AtomicU64,
    pub requests_rejected: AtomicU64,
}

impl PerfCounters {
    pub fn new() -> Self {
        Self {
            prices_computed: AtomicU64::new(0),
            greeks_computed: AtomicU64::new(0),
            quotes_served: AtomicU64::new(0),
            requests_rejected: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn bump(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

// ── Application shared state (immutable config + atomics, no locks) ──

pub struct AppState {
    pub config: AppConfig,
    /// Injected into every engine built by a handler.
    pub normal: Arc<dyn NormalDistribution>,
    pub counters: PerfCounters,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config: AppConfig) -> Arc<Self> {
        let normal = config.normal_backend.build();
        Arc::new(Self {
            config,
            normal,
            counters: PerfCounters::new(),
            started_at: Instant::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_token_resolution() {
        assert_eq!(OptionSide::from_token("put"), OptionSide::Put);
        assert_eq!(OptionSide::from_token("PUT"), OptionSide::Put);
        assert_eq!(OptionSide::from_token("Put"), OptionSide::Put);
        assert_eq!(OptionSide::from_token("call"), OptionSide::Call);
        assert_eq!(OptionSide::from_token(""), OptionSide::Call);
        assert_eq!(OptionSide::from_token("puts"), OptionSide::Call);
        assert_eq!(OptionSide::from_token(" put"), OptionSide::Call);
    }

    #[test]
    fn test_side_deserializes_leniently() {
        let input: PricingInput = serde_json::from_str(
            r#"{"spot":100,"strike":100,"expiry_years":1,"rate":0.05,"volatility":0.2,"side":"Put"}"#,
        )
        .unwrap();
        assert_eq!(input.side, OptionSide::Put);

        let input: PricingInput = serde_json::from_str(
            r#"{"spot":100,"strike":100,"expiry_years":1,"rate":0.05,"volatility":0.2}"#,
        )
        .unwrap();
        assert_eq!(input.side, OptionSide::Call);
    }

    #[test]
    fn test_moneyness() {
        assert_eq!(Moneyness::classify(OptionSide::Call, 110.0, 100.0), Moneyness::InTheMoney);
        assert_eq!(Moneyness::classify(OptionSide::Call, 90.0, 100.0), Moneyness::OutOfTheMoney);
        assert_eq!(Moneyness::classify(OptionSide::Put, 90.0, 100.0), Moneyness::InTheMoney);
        assert_eq!(Moneyness::classify(OptionSide::Put, 110.0, 100.0), Moneyness::OutOfTheMoney);
        assert_eq!(Moneyness::classify(OptionSide::Put, 100.0, 100.0), Moneyness::AtTheMoney);
        assert_eq!(Moneyness::InTheMoney.to_string(), "in-the-money");
    }

    #[test]
    fn test_app_state_uses_configured_backend() {
        let cfg = AppConfig {
            normal_backend: crate::models::normal::NormalBackend::Hart,
            ..AppConfig::default()
        };
        let state = AppState::new(cfg);
        assert_eq!(state.normal.name(), "hart");
    }
}
