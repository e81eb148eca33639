//! Diesel table definitions for the SQLite schema.
//!
//! These definitions must match `migrations/` exactly. When a migration
//! changes a table, regenerate with `diesel print-schema` or edit by hand.

diesel::table! {
    /// Registered accounts.
    users (id) {
        /// Auto-incremented primary key.
        id -> Integer,
        /// Unique login name (at most 50 characters).
        username -> Text,
        /// Argon2 PHC string; never plaintext.
        password_hash -> Text,
    }
}

diesel::table! {
    /// Shared inventory records.
    inventory (id) {
        /// Auto-incremented primary key.
        id -> Integer,
        /// Item name (at most 100 characters).
        item_name -> Text,
        /// Non-negative stock count.
        quantity -> Integer,
    }
}
