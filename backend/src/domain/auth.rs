//! Authentication primitives: submitted credentials and password digests.
//!
//! Inbound adapters build [`Credentials`] from raw form fields; the identity
//! service turns passwords into [`PasswordDigest`]s before anything reaches
//! the store.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use zeroize::Zeroizing;

use super::{UserValidationError, Username};

/// Domain error returned when submitted credential values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsValidationError {
    /// The username failed validation.
    #[error(transparent)]
    Username(#[from] UserValidationError),
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated credentials used for both registration and login.
///
/// ## Invariants
/// - `username` satisfies the [`Username`] rules.
/// - `password` is non-empty but retains caller-provided whitespace to avoid
///   surprising credential comparisons. It is wiped from memory on drop.
///
/// # Examples
/// ```
/// use inventory::domain::Credentials;
///
/// let creds = Credentials::try_from_parts("alice", "pw123").unwrap();
/// assert_eq!(creds.username().as_ref(), "alice");
/// assert_eq!(creds.password(), "pw123");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: Username,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let username = Username::new(username)?;
        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }

        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Failures while hashing or parsing a password digest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordDigestError {
    /// The hasher rejected its input.
    #[error("password hashing failed: {message}")]
    Hash {
        /// Description from the hashing library.
        message: String,
    },
    /// A stored digest was not a valid PHC string.
    #[error("stored password digest is malformed: {message}")]
    Malformed {
        /// Description from the parser.
        message: String,
    },
}

/// Salted Argon2id digest in PHC string format.
///
/// Each call to [`PasswordDigest::hash`] draws a fresh salt from the OS
/// generator, so hashing the same password twice yields different digests.
///
/// # Examples
/// ```
/// use inventory::domain::PasswordDigest;
///
/// let digest = PasswordDigest::hash("pw123").unwrap();
/// assert!(digest.verify("pw123").unwrap());
/// assert!(!digest.verify("wrong").unwrap());
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Hash a plaintext password with a random salt.
    pub fn hash(password: &str) -> Result<Self, PasswordDigestError> {
        let salt = SaltString::generate(&mut OsRng);
        let hashed = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| PasswordDigestError::Hash {
                message: err.to_string(),
            })?;
        Ok(Self(hashed.to_string()))
    }

    /// Wrap a digest loaded from storage, checking it parses.
    pub fn from_stored(raw: impl Into<String>) -> Result<Self, PasswordDigestError> {
        let raw = raw.into();
        PasswordHash::new(&raw).map_err(|err| PasswordDigestError::Malformed {
            message: err.to_string(),
        })?;
        Ok(Self(raw))
    }

    /// Check a plaintext password against this digest.
    ///
    /// Returns `Ok(false)` for a mismatch; errors only when the digest itself
    /// cannot be parsed.
    pub fn verify(&self, password: &str) -> Result<bool, PasswordDigestError> {
        let parsed = PasswordHash::new(&self.0).map_err(|err| PasswordDigestError::Malformed {
            message: err.to_string(),
        })?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// PHC string suitable for persistence.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}
