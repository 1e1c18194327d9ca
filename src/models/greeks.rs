use crate::models::guard::{floor_expiry, floor_volatility};
use crate::models::{round_to, IntermediateTerms, NormalDistribution};
use crate::state::{OptionSide, PricingInput};

/// Calendar days per year used to turn annual theta into daily theta.
const DAYS_PER_YEAR: f64 = 365.0;

/// Vega and rho are quoted per one percentage point move.
const PER_POINT: f64 = 0.01;

/// Option sensitivities. Fixed shape, stack-allocated.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct GreeksResult {
    /// dV/dS
    pub delta: f64,
    /// d2V/dS2, same for calls and puts
    pub gamma: f64,
    /// Per calendar day
    pub theta: f64,
    /// Per 1% volatility move
    pub vega: f64,
    /// Per 1% rate move
    pub rho: f64,
}

impl GreeksResult {
    /// Each field rounded to 4 dp on its own.
    fn rounded(self) -> Self {
        Self {
            delta: round_to(self.delta, 4),
            gamma: round_to(self.gamma, 4),
            theta: round_to(self.theta, 4),
            vega: round_to(self.vega, 4),
            rho: round_to(self.rho, 4),
        }
    }
}

/// Closed-form Black-Scholes Greeks.
///
/// Both volatility and expiry are floored here, unlike the pricing path,
/// so theta and gamma stay finite as T -> 0. d1/d2 are recomputed rather
/// than shared with `PricingEngine`.
pub struct GreeksEngine<N> {
    normal: N,
}

impl<N: NormalDistribution> GreeksEngine<N> {
    pub fn new(normal: N) -> Self {
        Self { normal }
    }

    pub fn compute(&self, input: &PricingInput) -> GreeksResult {
        self.raw(input).rounded()
    }

    pub(crate) fn raw(&self, input: &PricingInput) -> GreeksResult {
        let sigma = floor_volatility(input.volatility);
        let t = floor_expiry(input.expiry_years);
        let (s, k, r) = (input.spot, input.strike, input.rate);

        let terms = IntermediateTerms::new(s, k, t, r, sigma);
        let n = &self.normal;
        let pdf_d1 = n.pdf(terms.d1);
        let cdf_d1 = n.cdf(terms.d1);
        let pv_strike = k * terms.discount;

        let gamma = pdf_d1 / (s * terms.sigma_sqrt_t);
        let vega = s * terms.sqrt_t * pdf_d1 * PER_POINT;
        let time_decay = -s * pdf_d1 * sigma / (2.0 * terms.sqrt_t);

        let (delta, theta, rho) = match input.side {
            OptionSide::Call => {
                let cdf_d2 = n.cdf(terms.d2);
                (
                    cdf_d1,
                    (time_decay - r * pv_strike * cdf_d2) / DAYS_PER_YEAR,
                    pv_strike * t * cdf_d2 * PER_POINT,
                )
            }
            OptionSide::Put => {
                let cdf_neg_d2 = n.cdf(-terms.d2);
                (
                    cdf_d1 - 1.0,
                    (time_decay + r * pv_strike * cdf_neg_d2) / DAYS_PER_YEAR,
                    -pv_strike * t * cdf_neg_d2 * PER_POINT,
                )
            }
        };

        GreeksResult { delta, gamma, theta, vega, rho }
    }
}

#[cfg(test)]
impl Default for GreeksEngine<crate::models::normal::StatrsNormal> {
    fn default() -> Self {
        Self::new(crate::models::normal::StatrsNormal::new())
    }
}
