//! Wiring of Diesel repositories into the domain services behind
//! [`HttpState`].

use std::sync::Arc;

use inventory::domain::{IdentityService, InventoryService};
use inventory::inbound::http::state::HttpState;
use inventory::outbound::persistence::{DbPool, DieselInventoryRepository, DieselUserRepository};

/// Build handler state over the shared pool.
///
/// One service instance backs both halves of each query/command pair.
pub(super) fn build_http_state(pool: &DbPool) -> HttpState {
    let identity = Arc::new(IdentityService::new(Arc::new(DieselUserRepository::new(
        pool.clone(),
    ))));
    let inventory = Arc::new(InventoryService::new(Arc::new(
        DieselInventoryRepository::new(pool.clone()),
    )));
    HttpState::new(identity.clone(), identity, inventory.clone(), inventory)
}
