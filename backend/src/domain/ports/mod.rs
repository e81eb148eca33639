//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`LoginService`, `RegistrationService`, `InventoryQuery`,
//! `InventoryCommand`) are called by inbound adapters. Driven ports
//! (`UserRepository`, `InventoryRepository`) are implemented by outbound
//! persistence adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod inventory_command;
mod inventory_query;
mod inventory_repository;
mod login_service;
mod registration_service;
mod user_repository;

pub use inventory_command::InventoryCommand;
#[cfg(test)]
pub use inventory_command::MockInventoryCommand;
pub use inventory_query::InventoryQuery;
#[cfg(test)]
pub use inventory_query::MockInventoryQuery;
#[cfg(test)]
pub use inventory_repository::MockInventoryRepository;
pub use inventory_repository::{InventoryPersistenceError, InventoryRepository};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use registration_service::MockRegistrationService;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{StoredUser, UserPersistenceError, UserRepository};
