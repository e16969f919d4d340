//! Business logic for the hospital record system.
//!
//! Services are generic over the store traits in [`hospital_core::store`]
//! and never touch the network or a concrete database. Each holds its store
//! behind an [`std::sync::Arc`] so handlers can clone it per request.

pub mod auth;
pub mod booking;
pub mod credential;
pub mod doctors;
pub mod error;
pub mod patients;
pub mod token;

pub use auth::{AuthService, Registration};
pub use booking::BookingService;
pub use doctors::DoctorService;
pub use error::{Error, Result};
pub use patients::{PatientService, PatientUpdate};
pub use token::{TokenConfig, TokenIssuer, TokenPair};

#[cfg(test)]
mod tests;
