//! Diesel models mapping the SQLite tables to domain types.

#[cfg(feature = "server")]
pub mod auth;
pub mod config;
pub mod customer;
pub mod estimate;
pub mod invoice;
pub mod job;
pub mod lead;
pub mod material;
pub mod payment;
pub mod profile;
pub mod site_visit;
