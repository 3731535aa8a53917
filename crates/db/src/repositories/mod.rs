//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod booking_repo;
pub mod session_repo;
pub mod slide_repo;
pub mod user_repo;

pub use booking_repo::BookingRepo;
pub use session_repo::SessionRepo;
pub use slide_repo::SlideRepo;
pub use user_repo::UserRepo;
