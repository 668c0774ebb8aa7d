use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if any value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_nonzero_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        match parse_u64(var, default)? {
            0 => Err(invalid(var, "must be greater than zero".to_string())),
            n => Ok(n),
        }
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("FOODBRIDGE_ENV", "development"))?;
    let bind_addr = parse_addr("FOODBRIDGE_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("FOODBRIDGE_LOG_LEVEL", "info");

    let nominatim_url = or_default(
        "FOODBRIDGE_NOMINATIM_URL",
        "https://nominatim.openstreetmap.org/search",
    );
    let overpass_url = or_default(
        "FOODBRIDGE_OVERPASS_URL",
        "https://overpass-api.de/api/interpreter",
    );
    let user_agent = or_default("FOODBRIDGE_USER_AGENT", "FoodBridge/1.0");

    let http_timeout_secs = parse_nonzero_u64("FOODBRIDGE_HTTP_TIMEOUT_SECS", "30")?;
    let overpass_timeout_secs = parse_u32("FOODBRIDGE_OVERPASS_TIMEOUT_SECS", "25")?;
    let search_timeout_secs = parse_nonzero_u64("FOODBRIDGE_SEARCH_TIMEOUT_SECS", "40")?;

    // Unset means no cap: any positive radius is a valid request.
    let max_radius_miles = match lookup("FOODBRIDGE_MAX_RADIUS_MILES") {
        Ok(raw) if !raw.trim().is_empty() => {
            let miles = raw
                .trim()
                .parse::<f64>()
                .map_err(|e| invalid("FOODBRIDGE_MAX_RADIUS_MILES", e.to_string()))?;
            if !miles.is_finite() || miles <= 0.0 {
                return Err(invalid(
                    "FOODBRIDGE_MAX_RADIUS_MILES",
                    format!("must be a positive number, got '{raw}'"),
                ));
            }
            Some(miles)
        }
        _ => None,
    };

    let rate_limit_per_minute = parse_usize("FOODBRIDGE_RATE_LIMIT_PER_MINUTE", "120")?;
    if rate_limit_per_minute == 0 {
        return Err(invalid(
            "FOODBRIDGE_RATE_LIMIT_PER_MINUTE",
            "must be greater than zero".to_string(),
        ));
    }
    let categories_path = lookup("FOODBRIDGE_CATEGORIES_PATH")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        nominatim_url,
        overpass_url,
        user_agent,
        http_timeout_secs,
        overpass_timeout_secs,
        search_timeout_secs,
        max_radius_miles,
        rate_limit_per_minute,
        categories_path,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "FOODBRIDGE_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
