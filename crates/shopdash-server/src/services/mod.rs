//! Business logic services

pub mod document;
pub mod gateway;
pub mod relational;
pub mod users_api;

pub use document::DocumentGateway;
pub use gateway::ProductGateway;
pub use relational::RelationalGateway;
pub use users_api::{UserDirectory, UsersApiClient};
