pub mod auth;
pub mod bookings;
pub mod content;
pub mod slides;
