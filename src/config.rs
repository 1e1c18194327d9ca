use crate::errors::{PricerError, PricerResult};
use crate::models::normal::NormalBackend;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub normal_backend: NormalBackend,
    /// Longest expiry the service will accept, in years.
    pub max_expiry_years: f64,
}

impl AppConfig {
    pub fn from_env() -> PricerResult<Self> {
        dotenvy::dotenv().ok();

        let server_port = env_var_or("SERVER_PORT", "5001")
            .parse::<u16>()
            .map_err(|e| PricerError::Config(format!("SERVER_PORT: {e}")))?;

        let normal_backend = env_var_or("NORMAL_CDF", "statrs")
            .parse::<NormalBackend>()
            .map_err(|e| PricerError::Config(format!("NORMAL_CDF: {e}")))?;

        let max_expiry_years = env_var_or("MAX_EXPIRY_YEARS", "30")
            .parse::<f64>()
            .map_err(|e| PricerError::Config(format!("MAX_EXPIRY_YEARS: {e}")))?;

        if !max_expiry_years.is_finite() || max_expiry_years <= 0.0 {
            return Err(PricerError::Config(format!(
                "MAX_EXPIRY_YEARS: must be positive, got {max_expiry_years}"
            )));
        }

        Ok(Self {
            server_host: env_var_or("SERVER_HOST", "0.0.0.0"),
            server_port,
            normal_backend,
            max_expiry_years,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".into(),
            server_port: 5001,
            normal_backend: NormalBackend::Statrs,
            max_expiry_years: 30.0,
        }
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
