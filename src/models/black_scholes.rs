use crate::models::guard::floor_volatility;
use crate::models::{round_to, IntermediateTerms, NormalDistribution};
use crate::state::{OptionSide, PricingInput};

/// Priced value of one side, rounded to cents.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct PriceResult {
    pub side: OptionSide,
    pub price: f64,
}

/// Black-Scholes closed form for European options.
///
/// call = S * Phi(d1) - K * e^(-rT) * Phi(d2)
/// put  = K * e^(-rT) * Phi(-d2) - S * Phi(-d1)
///
/// Volatility is floored before use; expiry is not, so prices converge to
/// intrinsic value as T -> 0+. Stateless apart from the injected normal.
pub struct PricingEngine<N> {
    normal: N,
}

impl<N: NormalDistribution> PricingEngine<N> {
    pub fn new(normal: N) -> Self {
        Self { normal }
    }

    /// Pure function: same input, same bits out.
    pub fn price(&self, input: &PricingInput) -> PriceResult {
        PriceResult {
            side: input.side,
            price: round_to(self.raw_price(input), 2),
        }
    }

    #[inline]
    pub(crate) fn raw_price(&self, input: &PricingInput) -> f64 {
        let sigma = floor_volatility(input.volatility);
        let terms = IntermediateTerms::new(input.spot, input.strike, input.expiry_years, input.rate, sigma);
        let pv_strike = input.strike * terms.discount;

        match input.side {
            OptionSide::Call => input.spot * self.normal.cdf(terms.d1) - pv_strike * self.normal.cdf(terms.d2),
            OptionSide::Put => pv_strike * self.normal.cdf(-terms.d2) - input.spot * self.normal.cdf(-terms.d1),
        }
    }
}

#[cfg(test)]
impl Default for PricingEngine<crate::models::normal::StatrsNormal> {
    fn default() -> Self {
        Self::new(crate::models::normal::StatrsNormal::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::normal::HartNormal;

    fn input(spot: f64, strike: f64, expiry_years: f64, rate: f64, volatility: f64, side: OptionSide) -> PricingInput {
        PricingInput { spot, strike, expiry_years, rate, volatility, side }
    }

    #[test]
    fn test_atm_reference_prices() {
        let engine = PricingEngine::default();
        let call = engine.price(&input(100.0, 100.0, 1.0, 0.05, 0.2, OptionSide::Call));
        let put = engine.price(&input(100.0, 100.0, 1.0, 0.05, 0.2, OptionSide::Put));
        assert_eq!(call.price, 10.45, "call={}", call.price);
        assert_eq!(put.price, 5.57, "put={}", put.price);
        assert_eq!(put.side, OptionSide::Put);
    }

    #[test]
    fn test_put_call_parity() {
        let engine = PricingEngine::default();
        for &(s, k, t, r, sigma) in &[
            (100.0, 100.0, 1.0, 0.05, 0.2),
            (80.0, 100.0, 0.25, 0.01, 0.35),
            (150.0, 120.0, 2.0, 0.0, 0.6),
            (50.0, 55.0, 0.5, -0.01, 0.15),
            (1000.0, 900.0, 10.0, 0.08, 0.05),
        ] {
            let call = engine.price(&input(s, k, t, r, sigma, OptionSide::Call)).price;
            let put = engine.price(&input(s, k, t, r, sigma, OptionSide::Put)).price;
            let forward_gap = s - k * (-r * t).exp();
            assert!(
                (call - put - forward_gap).abs() <= 0.02,
                "parity broken at S={s} K={k}: call={call} put={put} gap={forward_gap}"
            );
        }
    }

    #[test]
    fn test_monotone_in_spot() {
        let engine = PricingEngine::default();
        let mut prev_call = f64::NEG_INFINITY;
        let mut prev_put = f64::INFINITY;
        let mut spot = 50.0;
        while spot <= 150.0 {
            let call = engine.price(&input(spot, 100.0, 0.75, 0.03, 0.25, OptionSide::Call)).price;
            let put = engine.price(&input(spot, 100.0, 0.75, 0.03, 0.25, OptionSide::Put)).price;
            assert!(call >= prev_call, "call decreased at S={spot}: {call} < {prev_call}");
            assert!(put <= prev_put, "put increased at S={spot}: {put} > {prev_put}");
            prev_call = call;
            prev_put = put;
            spot += 2.5;
        }
    }

    #[test]
    fn test_converges_to_intrinsic_near_expiry() {
        let engine = PricingEngine::default();
        let t = 1e-10;
        for &(s, k) in &[(110.0, 100.0), (90.0, 100.0), (100.0, 100.0)] {
            let call = engine.price(&input(s, k, t, 0.05, 0.2, OptionSide::Call)).price;
            let put = engine.price(&input(s, k, t, 0.05, 0.2, OptionSide::Put)).price;
            assert!((call - f64::max(s - k, 0.0)).abs() < 0.01, "call={call} at S={s}");
            assert!((put - f64::max(k - s, 0.0)).abs() < 0.01, "put={put} at S={s}");
        }
    }

    #[test]
    fn test_zero_volatility_is_floored() {
        let engine = PricingEngine::default();
        let call = engine.price(&input(100.0, 100.0, 1.0, 0.05, 0.0, OptionSide::Call));
        assert!(call.price.is_finite());
        // Deterministic forward: S - K e^(-rT)
        assert_eq!(call.price, 4.88, "call={}", call.price);
        let floored = engine.price(&input(100.0, 100.0, 1.0, 0.05, 0.001, OptionSide::Call));
        assert_eq!(call, floored);
    }

    #[test]
    fn test_deterministic() {
        let engine = PricingEngine::default();
        let i = input(123.4, 117.0, 0.37, 0.021, 0.31, OptionSide::Put);
        let a = engine.price(&i);
        let b = engine.price(&i);
        assert_eq!(a.price.to_bits(), b.price.to_bits());
    }

    #[test]
    fn test_backends_agree_to_the_cent() {
        let reference = PricingEngine::default();
        let hart = PricingEngine::new(HartNormal);
        let i = input(100.0, 95.0, 0.5, 0.04, 0.3, OptionSide::Call);
        assert!((reference.raw_price(&i) - hart.raw_price(&i)).abs() < 1e-4);
    }
}
