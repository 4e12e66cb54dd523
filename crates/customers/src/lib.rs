//! Customers domain module.
//!
//! Customers exist to attribute outbound stock movements; their lifecycle is
//! create/delete only.

pub mod customer;

pub use customer::Customer;
