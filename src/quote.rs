//! Full quote for one set of market parameters.
//!
//! Both sides are priced regardless of the requested side; Greeks and
//! moneyness follow the requested side. Pure function, no allocations.

use crate::models::black_scholes::PricingEngine;
use crate::models::greeks::{GreeksEngine, GreeksResult};
use crate::models::NormalDistribution;
use crate::state::{Moneyness, OptionSide, PricingInput};

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Quote {
    pub side: OptionSide,
    pub call_price: f64,
    pub put_price: f64,
    pub greeks: GreeksResult,
    pub moneyness: Moneyness,
}

pub fn build_quote<N: NormalDistribution + ?Sized>(normal: &N, input: &PricingInput) -> Quote {
    let pricer = PricingEngine::new(normal);
    let call = pricer.price(&input.with_side(OptionSide::Call));
    let put = pricer.price(&input.with_side(OptionSide::Put));
    let greeks = GreeksEngine::new(normal).compute(input);

    Quote {
        side: input.side,
        call_price: call.price,
        put_price: put.price,
        greeks,
        moneyness: Moneyness::classify(input.side, input.spot, input.strike),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::normal::StatrsNormal;

    #[test]
    fn test_quote_prices_both_sides() {
        let input = PricingInput {
            spot: 100.0,
            strike: 100.0,
            expiry_years: 1.0,
            rate: 0.05,
            volatility: 0.2,
            side: OptionSide::Put,
        };
        let q = build_quote(&StatrsNormal::new(), &input);
        assert_eq!(q.call_price, 10.45);
        assert_eq!(q.put_price, 5.57);
        assert_eq!(q.side, OptionSide::Put);
        assert_eq!(q.greeks.delta, -0.3632, "put greeks expected, got {:?}", q.greeks);
        assert_eq!(q.moneyness, Moneyness::AtTheMoney);
    }

    #[test]
    fn test_quote_through_trait_object() {
        let normal: std::sync::Arc<dyn NormalDistribution> = std::sync::Arc::new(StatrsNormal::new());
        let input = PricingInput {
            spot: 120.0,
            strike: 100.0,
            expiry_years: 0.5,
            rate: 0.03,
            volatility: 0.25,
            side: OptionSide::Call,
        };
        let q = build_quote(normal.as_ref(), &input);
        assert_eq!(q.moneyness, Moneyness::InTheMoney);
        assert!(q.call_price > q.put_price, "ITM call {} should exceed put {}", q.call_price, q.put_price);
    }
}
