//! Core types and trait definitions for the call manager.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! The store backend, the API and the server all depend on it.

pub mod call;
pub mod error;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
