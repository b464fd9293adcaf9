use std::str::FromStr;

use rust_decimal::Decimal;

use crate::app_config::{AppConfig, Environment};
use crate::pricing::ShippingRates;
use crate::ConfigError;

/// Reads `.env` (if present) and then the process environment.
///
/// # Errors
///
/// Returns `ConfigError` when `STYLEHUB_API_BASE_URL` is unset or any
/// tuning variable fails to parse or validate.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Like [`load_app_config`] but never touches `.env`.
///
/// # Errors
///
/// Same as [`load_app_config`].
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

fn invalid(var: &str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_var<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| invalid(var, e))
}

fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_fee = |var: &str, default: &str| -> Result<Decimal, ConfigError> {
        let fee: Decimal = parse_var(var, &or_default(var, default))?;
        if fee <= Decimal::ZERO {
            return Err(invalid(var, format!("shipping fee must be positive, got {fee}")));
        }
        Ok(fee)
    };

    let api_base_url = require("STYLEHUB_API_BASE_URL")?;

    let env = parse_environment(&or_default("STYLEHUB_ENV", "development"));
    let log_level = or_default("STYLEHUB_LOG_LEVEL", "info");

    let request_timeout_secs = parse_var::<u64>(
        "STYLEHUB_REQUEST_TIMEOUT_SECS",
        &or_default("STYLEHUB_REQUEST_TIMEOUT_SECS", "30"),
    )?;
    let user_agent = or_default("STYLEHUB_USER_AGENT", "stylehub/0.1 (storefront-client)");

    let near = parse_fee("STYLEHUB_SHIPPING_NEAR_FEE", "80")?;
    let far = parse_fee("STYLEHUB_SHIPPING_FAR_FEE", "140")?;
    if near == far {
        return Err(invalid(
            "STYLEHUB_SHIPPING_FAR_FEE",
            format!("must differ from STYLEHUB_SHIPPING_NEAR_FEE ({near})"),
        ));
    }

    let auto_close_secs = parse_var::<u64>(
        "STYLEHUB_AUTO_CLOSE_SECS",
        &or_default("STYLEHUB_AUTO_CLOSE_SECS", "3"),
    )?;
    let open_delay_ms = parse_var::<u64>(
        "STYLEHUB_OPEN_DELAY_MS",
        &or_default("STYLEHUB_OPEN_DELAY_MS", "50"),
    )?;
    let catalog_page_size = parse_var::<usize>(
        "STYLEHUB_CATALOG_PAGE_SIZE",
        &or_default("STYLEHUB_CATALOG_PAGE_SIZE", "8"),
    )?;
    if catalog_page_size == 0 {
        return Err(invalid("STYLEHUB_CATALOG_PAGE_SIZE", "page size must be at least 1"));
    }

    Ok(AppConfig {
        api_base_url,
        env,
        log_level,
        request_timeout_secs,
        user_agent,
        shipping_rates: ShippingRates { near, far },
        auto_close_secs,
        open_delay_ms,
        catalog_page_size,
    })
}

/// Anything other than `production` or `test` is treated as development.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
