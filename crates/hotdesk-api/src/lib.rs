pub mod auth;
pub mod bookings;
mod convert;
pub mod error;
pub mod middleware;
pub mod policy;
pub mod routes;
pub mod spaces;
