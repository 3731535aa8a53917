//! Domain core for the surprise carousel service.
//!
//! Has no internal workspace dependencies so that the database layer, the
//! HTTP layer and the carousel client can all share the same rules.

pub mod booking;
pub mod content;
pub mod error;
pub mod record;
pub mod roles;
pub mod slide;
pub mod template;
pub mod types;
