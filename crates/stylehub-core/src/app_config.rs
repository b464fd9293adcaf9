use std::time::Duration;

use crate::pricing::ShippingRates;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the commerce API, e.g. `"https://shop.example/api"`.
    pub api_base_url: String,
    pub env: Environment,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub shipping_rates: ShippingRates,
    pub auto_close_secs: u64,
    pub open_delay_ms: u64,
    pub catalog_page_size: usize,
}

impl AppConfig {
    #[must_use]
    pub fn auto_close_delay(&self) -> Duration {
        Duration::from_secs(self.auto_close_secs)
    }

    #[must_use]
    pub fn open_delay(&self) -> Duration {
        Duration::from_millis(self.open_delay_ms)
    }
}
