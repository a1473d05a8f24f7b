//! # Docket Shared Library
//!
//! This crate contains the data model and the access-control engine shared
//! by the Docket API server and any future store-side tooling.
//!
//! ## Module Organization
//!
//! - `models`: Database models (tenants, employees, cases, dependent records, roles)
//! - `access`: The authorization engine (catalog, scope, visibility evaluators, row filters)
//! - `auth`: Validation of identity claims issued by the external identity provider
//! - `db`: Connection pool and migration runner
//! - `error`: Common error taxonomy

pub mod access;
pub mod auth;
pub mod db;
pub mod error;
pub mod models;

/// Current version of the Docket shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
