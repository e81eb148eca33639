//! Session configuration parsing and validation.
//!
//! Cookie session behaviour is driven by environment variables read through
//! [`mockable::Env`] so every branch can be exercised without touching the
//! process environment. Debug builds fall back to defaults with a warning;
//! release builds refuse to start on missing or invalid values.

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite, time::Duration};
use mockable::Env;
use std::path::PathBuf;
use tracing::warn;
use zeroize::Zeroize;

pub mod fingerprint;
mod parsing;

use parsing::{
    FLAG_EXPECTED, MINUTES_EXPECTED, Reading, SAME_SITE_EXPECTED, check_same_site_none,
    parse_flag, parse_minutes, parse_same_site, read_env, resolve,
};

const SESSION_KEY_DEFAULT_PATH: &str = "/run/secrets/inventory_session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
// `Key::derive_from` panics below this length.
const SESSION_KEY_DERIVE_MIN_LEN: usize = 32;
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const TTL_MINUTES_ENV: &str = "SESSION_TTL_MINUTES";

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "session";

/// Session lifetime used when `SESSION_TTL_MINUTES` is unset.
pub const DEFAULT_SESSION_TTL_MINUTES: u32 = 120;

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate defaults and emit warnings for missing toggles.
    Debug,
    /// Release builds require explicit, valid session toggles.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }

    fn is_debug(self) -> bool {
        matches!(self, Self::Debug)
    }
}

/// Validated cookie session settings.
#[derive(Clone)]
pub struct SessionSettings {
    /// Signing and encryption key for cookie sessions.
    pub key: Key,
    /// Whether session cookies are marked `Secure`.
    pub cookie_secure: bool,
    /// `SameSite` policy for session cookies.
    pub same_site: SameSite,
    /// Session lifetime in minutes.
    pub ttl_minutes: u32,
}

impl SessionSettings {
    /// Build the cookie session middleware: private (encrypted and signed)
    /// content in an HttpOnly `session` cookie scoped to `/`.
    pub fn middleware(&self) -> SessionMiddleware<CookieSessionStore> {
        SessionMiddleware::builder(CookieSessionStore::default(), self.key.clone())
            .cookie_name(SESSION_COOKIE_NAME.to_owned())
            .cookie_path("/".to_owned())
            .cookie_secure(self.cookie_secure)
            .cookie_http_only(true)
            .cookie_content_security(CookieContentSecurity::Private)
            .cookie_same_site(self.same_site)
            .session_lifecycle(
                PersistentSession::default()
                    .session_ttl(Duration::minutes(i64::from(self.ttl_minutes))),
            )
            .build()
    }
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    /// A variable is present but contains an invalid value.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    /// Reading the session key file failed.
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The session key file is too short for the build mode.
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    /// `SameSite=None` requires a secure cookie in release builds.
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    /// Release builds must not allow ephemeral session keys.
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Build session settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use inventory::inbound::http::session_config::{
///     BuildMode, DEFAULT_SESSION_TTL_MINUTES, session_settings_from_env,
/// };
/// use mockable::MockEnv;
///
/// let mut env = MockEnv::new();
/// env.expect_string().returning(|_| None);
///
/// let settings = session_settings_from_env(&env, BuildMode::Debug)?;
/// assert!(settings.cookie_secure);
/// assert_eq!(settings.ttl_minutes, DEFAULT_SESSION_TTL_MINUTES);
/// # Ok::<(), inventory::inbound::http::session_config::SessionConfigError>(())
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let cookie_secure = resolve(
        read_env(env, COOKIE_SECURE_ENV, parse_flag),
        COOKIE_SECURE_ENV,
        FLAG_EXPECTED,
        mode,
        true,
    )?;
    let same_site = same_site_from_env(env, mode, cookie_secure)?;
    let allow_ephemeral = resolve(
        read_env(env, ALLOW_EPHEMERAL_ENV, parse_flag),
        ALLOW_EPHEMERAL_ENV,
        FLAG_EXPECTED,
        mode,
        false,
    )?;
    if allow_ephemeral && !mode.is_debug() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let ttl_minutes = ttl_from_env(env, mode)?;
    let key = session_key_from_env(env, mode, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
        ttl_minutes,
    })
}

fn same_site_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    cookie_secure: bool,
) -> Result<SameSite, SessionConfigError> {
    let default_same_site = if mode.is_debug() {
        SameSite::Lax
    } else {
        SameSite::Strict
    };
    let same_site = resolve(
        read_env(env, SAMESITE_ENV, parse_same_site),
        SAMESITE_ENV,
        SAME_SITE_EXPECTED,
        mode,
        default_same_site,
    )?;
    check_same_site_none(same_site, cookie_secure, mode)?;
    Ok(same_site)
}

/// TTL is optional in every mode; only a present but malformed value is an
/// error in release builds.
fn ttl_from_env<E: Env>(env: &E, mode: BuildMode) -> Result<u32, SessionConfigError> {
    match read_env(env, TTL_MINUTES_ENV, parse_minutes) {
        Reading::Missing => Ok(DEFAULT_SESSION_TTL_MINUTES),
        reading => resolve(
            reading,
            TTL_MINUTES_ENV,
            MINUTES_EXPECTED,
            mode,
            DEFAULT_SESSION_TTL_MINUTES,
        ),
    }
}

fn session_key_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        env.string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );

    match std::fs::read(&path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            let min_len = match mode {
                BuildMode::Release => SESSION_KEY_MIN_LEN,
                BuildMode::Debug => SESSION_KEY_DERIVE_MIN_LEN,
            };
            if length < min_len {
                bytes.zeroize();
                return Err(SessionConfigError::KeyTooShort {
                    path,
                    length,
                    min_len,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(error) if mode.is_debug() || allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary session key (dev only)"
            );
            Ok(Key::generate())
        }
        Err(error) => Err(SessionConfigError::KeyRead {
            path,
            source: error,
        }),
    }
}
