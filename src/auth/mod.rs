//! Authentication and authorization module

pub mod identity;
pub mod password;
pub mod token;

pub use identity::{extract_bearer, resolve_identity, Identity, RoleGate};
pub use password::PasswordHasher;
pub use token::{Claims, TokenService};
