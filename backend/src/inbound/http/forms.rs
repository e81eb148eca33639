//! URL-encoded form bodies accepted by the HTML handlers.
//!
//! Every field defaults to empty so a missing field reaches domain validation
//! and produces a readable message instead of a bare extractor rejection.

use serde::Deserialize;

use crate::domain::{
    Credentials, CredentialsValidationError, InventoryValidationError, NewInventoryItem,
};

/// `username` and `password` fields shared by the login and register forms.
#[derive(Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl TryFrom<CredentialsForm> for Credentials {
    type Error = CredentialsValidationError;

    fn try_from(form: CredentialsForm) -> Result<Self, Self::Error> {
        Self::try_from_parts(&form.username, &form.password)
    }
}

/// Body of `POST /add_item`.
#[derive(Debug, Deserialize)]
pub struct NewItemForm {
    #[serde(default)]
    pub item_name: String,
    #[serde(default)]
    pub quantity: String,
}

impl TryFrom<NewItemForm> for NewInventoryItem {
    type Error = InventoryValidationError;

    fn try_from(form: NewItemForm) -> Result<Self, Self::Error> {
        Self::try_from_parts(&form.item_name, &form.quantity)
    }
}

/// Body of `POST /delete_item/{id}`.
#[derive(Deserialize)]
pub struct DeleteItemForm {
    #[serde(default)]
    pub csrf_token: String,
}
