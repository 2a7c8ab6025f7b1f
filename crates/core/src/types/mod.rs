//! Core types for the customer registry.

pub mod customer;
pub mod id;

pub use customer::{Customer, SaveCustomer};
pub use id::*;
