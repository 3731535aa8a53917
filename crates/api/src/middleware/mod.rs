//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller, from a Bearer access token.
//! - [`rbac::RequireAdmin`] -- the caller, who must be an admin.

pub mod auth;
pub mod rbac;
