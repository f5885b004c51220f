//! Domain types shared by the query engine and the HTTP layer.

pub mod customer;
pub mod query;
pub mod types;
