//! Job API: the service layer and its HTTP surface.
//!
//! - [`service`] - validation and CRUD routing against a [`crate::storage::JobStore`]
//! - [`server`] - axum router and listener

pub mod server;
pub mod service;

pub use server::{build_router, listen};
pub use service::JobService;
