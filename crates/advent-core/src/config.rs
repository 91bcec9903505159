use std::time::Duration;

use crate::app_config::AppConfig;
use crate::store::Store;
use crate::ConfigError;

pub(crate) const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/138.0.0.0 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields the Galaxus
/// store on `0.0.0.0:8080` with a five minute cache.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let store = or_default("ADVENT_STORE", "galaxus").parse::<Store>()?;

    let bind_addr = or_default("ADVENT_BIND_ADDR", "0.0.0.0:8080")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("ADVENT_BIND_ADDR", e.to_string()))?;

    let cache_ttl = parse_duration(&or_default("ADVENT_CACHE_TTL", "5m"))
        .map_err(|reason| invalid("ADVENT_CACHE_TTL", reason))?;

    let user_agent = or_default("ADVENT_USER_AGENT", DEFAULT_USER_AGENT);
    if user_agent.trim().is_empty() {
        return Err(invalid("ADVENT_USER_AGENT", "must not be empty".into()));
    }

    let log_level = or_default("ADVENT_LOG_LEVEL", "info");

    let mut profile = store.profile();
    if let Ok(api_url) = lookup("ADVENT_API_URL") {
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(invalid(
                "ADVENT_API_URL",
                format!("\"{api_url}\" is not an http(s) URL"),
            ));
        }
        profile = profile.with_api_url(api_url);
    }

    Ok(AppConfig {
        store,
        profile,
        bind_addr,
        log_level,
        cache_ttl,
        user_agent,
    })
}

/// Parses a cache duration such as `"5m"`, `"1h30m"`, `"45s"` or `"300"`.
///
/// A bare number is read as seconds. Units are `h`, `m` and `s`.
///
/// # Errors
///
/// Returns a human-readable reason when the input is empty, has an unknown
/// unit, or overflows.
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err("duration must not be empty".into());
    }

    if let Ok(secs) = raw.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let mut total: u64 = 0;
    let mut digits = String::new();
    for ch in raw.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        let multiplier = match ch {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            other => return Err(format!("unknown unit '{other}' in \"{raw}\"")),
        };
        if digits.is_empty() {
            return Err(format!("missing number before '{ch}' in \"{raw}\""));
        }
        let value = digits
            .parse::<u64>()
            .map_err(|e| format!("invalid number in \"{raw}\": {e}"))?;
        digits.clear();
        total = value
            .checked_mul(multiplier)
            .and_then(|v| total.checked_add(v))
            .ok_or_else(|| format!("duration \"{raw}\" is too large"))?;
    }

    if !digits.is_empty() {
        return Err(format!("trailing number without unit in \"{raw}\""));
    }

    Ok(Duration::from_secs(total))
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
