//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{InventoryCommand, InventoryQuery, LoginService, RegistrationService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub inventory: Arc<dyn InventoryQuery>,
    pub inventory_command: Arc<dyn InventoryCommand>,
}

impl HttpState {
    /// Bundle port implementations for the handlers.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use inventory::domain::{IdentityService, InventoryService};
    /// use inventory::inbound::http::state::HttpState;
    /// # fn demo(identity: IdentityService, items: InventoryService) {
    /// let identity = Arc::new(identity);
    /// let items = Arc::new(items);
    /// let state = HttpState::new(identity.clone(), identity, items.clone(), items);
    /// # let _ = state;
    /// # }
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        registration: Arc<dyn RegistrationService>,
        inventory: Arc<dyn InventoryQuery>,
        inventory_command: Arc<dyn InventoryCommand>,
    ) -> Self {
        Self {
            login,
            registration,
            inventory,
            inventory_command,
        }
    }
}
