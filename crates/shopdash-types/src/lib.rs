//! Shopdash Types - Pure data types shared by the dashboard and services
//!
//! This crate contains only plain data types with no async runtime
//! dependencies, so the browser dashboard and every backing service can share
//! one definition of the wire format.

pub mod product;
pub mod user;

pub use product::*;
pub use user::*;
