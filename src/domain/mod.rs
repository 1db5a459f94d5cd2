//! Domain entities, value objects and the arithmetic shared by services.

pub mod customer;
pub mod estimate;
pub mod invoice;
pub mod job;
pub mod lead;
pub mod material;
pub mod money;
pub mod payment;
pub mod profile;
pub mod report;
pub mod site_visit;
pub mod types;
