pub mod black_scholes;
pub mod greeks;
pub mod guard;
pub mod normal;

/// Standard normal distribution as seen by the pricing engines.
/// Both functions must be pure and total over finite reals.
/// Send + Sync required so one backend can be shared across handlers.
pub trait NormalDistribution: Send + Sync {
    fn name(&self) -> &'static str;

    /// Phi(x), in (0, 1).
    fn cdf(&self, x: f64) -> f64;

    /// phi(x), >= 0.
    fn pdf(&self, x: f64) -> f64;
}

impl<T: NormalDistribution + ?Sized> NormalDistribution for &T {
    #[inline]
    fn name(&self) -> &'static str {
        (**self).name()
    }

    #[inline]
    fn cdf(&self, x: f64) -> f64 {
        (**self).cdf(x)
    }

    #[inline]
    fn pdf(&self, x: f64) -> f64 {
        (**self).pdf(x)
    }
}

/// Black-Scholes d1/d2 plus the pieces both engines reuse.
/// Stack-allocated, Copy. Build it from already-guarded inputs.
#[derive(Debug, Clone, Copy)]
#[repr(C)]
pub struct IntermediateTerms {
    pub d1: f64,
    pub d2: f64,
    pub sqrt_t: f64,
    pub sigma_sqrt_t: f64,
    /// e^(-rT)
    pub discount: f64,
}

impl IntermediateTerms {
    /// Caller precondition: `spot > 0` and `strike > 0`, otherwise ln(S/K)
    /// is not finite and neither is anything derived from it.
    #[inline]
    pub fn new(spot: f64, strike: f64, expiry_years: f64, rate: f64, sigma: f64) -> Self {
        let sqrt_t = expiry_years.sqrt();
        let sigma_sqrt_t = sigma * sqrt_t;
        let d1 = ((spot / strike).ln() + (rate + 0.5 * sigma * sigma) * expiry_years) / sigma_sqrt_t;
        let d2 = d1 - sigma_sqrt_t;
        Self {
            d1,
            d2,
            sqrt_t,
            sigma_sqrt_t,
            discount: (-rate * expiry_years).exp(),
        }
    }
}

/// Round half away from zero to `decimals` places. Never returns -0.0.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atm_terms() {
        let terms = IntermediateTerms::new(100.0, 100.0, 1.0, 0.05, 0.2);
        assert!((terms.d1 - 0.35).abs() < 1e-12, "d1={}", terms.d1);
        assert!((terms.d2 - 0.15).abs() < 1e-12, "d2={}", terms.d2);
        assert!((terms.discount - (-0.05f64).exp()).abs() < 1e-15);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(10.450_583, 2), 10.45);
        assert_eq!(round_to(-0.017_573, 4), -0.0176);
        assert_eq!(round_to(0.636_83, 4), 0.6368);
        assert!(round_to(-0.000_01, 4).is_sign_positive());
    }
}
