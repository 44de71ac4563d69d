//! Cinema
//!
//! An in-memory cinema catalog: administrators add films under a pricing tier
//! and schedule showtimes; customers browse the schedule and reserve seats.

pub mod catalog;
pub mod films;
pub mod pricing;
pub mod records;
pub mod showtimes;
pub mod store;
pub mod strategies;

pub mod prelude;
