use crate::errors::{PricerError, PricerResult};
use crate::state::PricingInput;

/// Caller-side checks. The pricing core assumes these already hold and only
/// floors volatility/expiry as a numerical safety net.
pub fn validate(input: &PricingInput, max_expiry_years: f64) -> PricerResult<()> {
    finite("spot", input.spot)?;
    finite("strike", input.strike)?;
    finite("expiry_years", input.expiry_years)?;
    finite("rate", input.rate)?;
    finite("volatility", input.volatility)?;

    if input.spot <= 0.0 {
        return Err(PricerError::invalid("spot", "must be positive"));
    }
    if input.strike <= 0.0 {
        return Err(PricerError::invalid("strike", "must be positive"));
    }
    if input.expiry_years <= 0.0 {
        return Err(PricerError::invalid("expiry_years", "must be positive"));
    }
    if input.expiry_years > max_expiry_years {
        return Err(PricerError::invalid(
            "expiry_years",
            format!("must not exceed {max_expiry_years} years"),
        ));
    }
    if input.volatility < 0.0 {
        return Err(PricerError::invalid("volatility", "must not be negative"));
    }

    Ok(())
}

#[inline]
fn finite(field: &'static str, value: f64) -> PricerResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricerError::invalid(field, format!("must be finite, got {value}")))
    }
}
