//! Reading session toggles out of the environment.
//!
//! Every variable goes through the same two steps: [`read_env`] classifies
//! the raw text, then [`resolve`] decides between the parsed value, the
//! debug fallback and a startup error.

use std::fmt;

use actix_web::cookie::SameSite;
use mockable::Env;
use tracing::warn;

use super::{BuildMode, SessionConfigError};

pub(super) const FLAG_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
pub(super) const SAME_SITE_EXPECTED: &str = "Strict|Lax|None";
pub(super) const MINUTES_EXPECTED: &str = "a positive number of minutes";

/// Outcome of looking up one variable.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Reading<T> {
    Parsed(T),
    Missing,
    Malformed(String),
}

pub(super) fn read_env<E, T, P>(env: &E, name: &'static str, parse: P) -> Reading<T>
where
    E: Env,
    P: FnOnce(&str) -> Option<T>,
{
    match env.string(name) {
        None => Reading::Missing,
        Some(raw) => match parse(raw.trim()) {
            Some(value) => Reading::Parsed(value),
            None => Reading::Malformed(raw),
        },
    }
}

/// Turn a reading into a value.
///
/// Release builds reject anything but a parsed value. Debug builds log and
/// carry on with `fallback`.
pub(super) fn resolve<T: fmt::Debug>(
    reading: Reading<T>,
    name: &'static str,
    expected: &'static str,
    mode: BuildMode,
    fallback: T,
) -> Result<T, SessionConfigError> {
    let error = match reading {
        Reading::Parsed(value) => return Ok(value),
        Reading::Missing => SessionConfigError::MissingEnv { name },
        Reading::Malformed(value) => SessionConfigError::InvalidEnv {
            name,
            value,
            expected,
        },
    };
    if mode.is_debug() {
        warn!(%error, ?fallback, "session setting falls back to its debug default");
        Ok(fallback)
    } else {
        Err(error)
    }
}

/// `SameSite=None` cookies are dropped by browsers unless marked `Secure`.
pub(super) fn check_same_site_none(
    same_site: SameSite,
    cookie_secure: bool,
    mode: BuildMode,
) -> Result<(), SessionConfigError> {
    if same_site != SameSite::None || cookie_secure {
        return Ok(());
    }
    if mode.is_debug() {
        warn!("SameSite=None without Secure; browsers may reject the session cookie");
        Ok(())
    } else {
        Err(SessionConfigError::InsecureSameSiteNone)
    }
}

pub(super) fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

pub(super) fn parse_same_site(raw: &str) -> Option<SameSite> {
    match raw.to_ascii_lowercase().as_str() {
        "strict" => Some(SameSite::Strict),
        "lax" => Some(SameSite::Lax),
        "none" => Some(SameSite::None),
        _ => None,
    }
}

pub(super) fn parse_minutes(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().filter(|minutes| *minutes > 0)
}
