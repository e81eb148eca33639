//! Domain primitives, ports, and services.
//!
//! Purpose: define strongly typed entities used by the HTTP and persistence
//! adapters and the use-cases that connect them. Types validate on
//! construction so adapters cannot smuggle unchecked form text past this
//! boundary.
//!
//! Public surface:
//! - Error / ErrorCode — transport-agnostic failure payload.
//! - User, UserId, Username — registered accounts.
//! - Credentials, PasswordDigest — submitted credentials and salted hashes.
//! - InventoryItem, ItemId, ItemName, Quantity — shared inventory records.
//! - IdentityService, InventoryService — implementations of the driving ports.

pub mod auth;
pub mod error;
pub mod identity_service;
pub mod inventory;
pub mod inventory_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{Credentials, CredentialsValidationError, PasswordDigest, PasswordDigestError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity_service::{
    DUPLICATE_USERNAME_MESSAGE, INVALID_CREDENTIALS_MESSAGE, IdentityService,
};
pub use self::inventory::{
    ITEM_NAME_MAX, InventoryItem, InventoryValidationError, ItemId, ItemName, NewInventoryItem,
    Quantity,
};
pub use self::inventory_service::InventoryService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{USERNAME_MAX, User, UserId, UserValidationError, Username};
