//! Numerical safety floors applied before any division by sigma*sqrt(T).
//!
//! These are not input validation: callers reject non-positive spot, strike
//! or expiry upstream. The floors only catch the two degenerate cases that
//! validated input can still reach (zero volatility, expiry at the limit).
//!
//! The two floors are independent. Pricing floors volatility only, so
//! short-dated prices still converge to intrinsic value. The Greeks also
//! floor expiry, which keeps theta and gamma finite at expiry.

/// Smallest volatility the engines will divide by.
pub const MIN_VOLATILITY: f64 = 0.001;

/// Smallest expiry, in years, used when computing sensitivities.
pub const MIN_EXPIRY_YEARS: f64 = 0.001;

#[inline]
pub fn floor_volatility(sigma: f64) -> f64 {
    sigma.max(MIN_VOLATILITY)
}

/// Applied on the Greeks path only.
#[inline]
pub fn floor_expiry(expiry_years: f64) -> f64 {
    expiry_years.max(MIN_EXPIRY_YEARS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_volatility_floor() {
        assert_eq!(floor_volatility(0.0), MIN_VOLATILITY);
        assert_eq!(floor_volatility(-0.3), MIN_VOLATILITY);
        assert_eq!(floor_volatility(0.2), 0.2);
    }

    #[test]
    fn test_expiry_floor() {
        assert_eq!(floor_expiry(0.0), MIN_EXPIRY_YEARS);
        assert_eq!(floor_expiry(0.5), 0.5);
    }
}
