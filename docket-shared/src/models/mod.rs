/// Database models for Docket
///
/// This module contains the persistent data model the access engine
/// operates on. Case, document, task, and hearing records are written by
/// the application's CRUD layer, which lives outside this crate - here
/// they are read-only: the engine only consumes their visibility-relevant
/// fields. Roles and role assignments are the exception; their mutation
/// surface is part of the engine.
///
/// # Models
///
/// - `user`: Authenticated principals (identity itself is external)
/// - `employee`: Per-tenant profile carrying data scope and manager link
/// - `case`: The visibility anchor for all dependent records
/// - `document`, `task`, `hearing`: Case-linked dependent records
/// - `role`: Role definitions (system-seeded and tenant custom)
/// - `role_assignment`: Soft-toggled role grants with provenance

pub mod case;
pub mod document;
pub mod employee;
pub mod hearing;
pub mod role;
pub mod role_assignment;
pub mod task;
pub mod user;
