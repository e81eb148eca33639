//! Inventory items and the value types that guard them.
//!
//! Form input arrives as untyped text; these constructors are the single
//! place where names and quantities are parsed and checked before an item
//! can be stored.

use std::fmt;

/// Maximum item name length, matching the `inventory.item_name` column width.
pub const ITEM_NAME_MAX: usize = 100;

/// Validation errors raised while building inventory values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryValidationError {
    /// Identifiers are assigned by the store and always positive.
    #[error("item id must be a positive integer")]
    InvalidId,
    /// Item name was blank once trimmed.
    #[error("Item name must not be empty.")]
    EmptyName,
    /// Item name exceeded [`ITEM_NAME_MAX`] characters.
    #[error("Item name must be at most {max} characters.")]
    NameTooLong {
        /// Maximum accepted length.
        max: usize,
    },
    /// Quantity text was not a whole number.
    #[error("Quantity must be a whole number.")]
    QuantityNotANumber,
    /// Quantity was below zero.
    #[error("Quantity must not be negative.")]
    NegativeQuantity,
}

/// Store-assigned item identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(i32);

impl ItemId {
    /// Validate and wrap a raw identifier.
    pub fn new(raw: i32) -> Result<Self, InventoryValidationError> {
        if raw <= 0 {
            return Err(InventoryValidationError::InvalidId);
        }
        Ok(Self(raw))
    }

    /// Underlying integer value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-readable item name, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemName(String);

impl ItemName {
    /// Validate and normalise an item name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, InventoryValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(InventoryValidationError::EmptyName);
        }
        if trimmed.chars().count() > ITEM_NAME_MAX {
            return Err(InventoryValidationError::NameTooLong { max: ITEM_NAME_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Non-negative stock count.
///
/// # Examples
/// ```
/// use inventory::domain::Quantity;
///
/// assert_eq!(Quantity::parse(" 5 ").unwrap().get(), 5);
/// assert!(Quantity::parse("-1").is_err());
/// assert!(Quantity::parse("five").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quantity(i32);

impl Quantity {
    /// Wrap an integer, rejecting negatives.
    pub fn new(raw: i32) -> Result<Self, InventoryValidationError> {
        if raw < 0 {
            return Err(InventoryValidationError::NegativeQuantity);
        }
        Ok(Self(raw))
    }

    /// Parse base-10 form text.
    pub fn parse(raw: &str) -> Result<Self, InventoryValidationError> {
        let value: i64 = raw
            .trim()
            .parse()
            .map_err(|_| InventoryValidationError::QuantityNotANumber)?;
        if value < 0 {
            return Err(InventoryValidationError::NegativeQuantity);
        }
        let value = i32::try_from(value).map_err(|_| InventoryValidationError::QuantityNotANumber)?;
        Self::new(value)
    }

    /// Underlying integer value.
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Item values submitted for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInventoryItem {
    name: ItemName,
    quantity: Quantity,
}

impl NewInventoryItem {
    /// Pair a validated name and quantity.
    pub fn new(name: ItemName, quantity: Quantity) -> Self {
        Self { name, quantity }
    }

    /// Parse raw form fields.
    pub fn try_from_parts(name: &str, quantity: &str) -> Result<Self, InventoryValidationError> {
        Ok(Self::new(ItemName::new(name)?, Quantity::parse(quantity)?))
    }

    /// Item name.
    pub fn name(&self) -> &ItemName {
        &self.name
    }

    /// Item quantity.
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }
}

/// A stored inventory record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    id: ItemId,
    name: ItemName,
    quantity: Quantity,
}

impl InventoryItem {
    /// Build an item from validated parts.
    pub fn new(id: ItemId, name: ItemName, quantity: Quantity) -> Self {
        Self { id, name, quantity }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Item name.
    pub fn name(&self) -> &ItemName {
        &self.name
    }

    /// Item quantity.
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }
}
