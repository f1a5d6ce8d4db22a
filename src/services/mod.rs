//! Ownership-scoped operations on projects and tasks.
//!
//! Every function takes the authenticated caller's id and the store, and
//! returns `AppError` kinds that map one-to-one onto HTTP responses.

pub mod access;
pub mod aggregation;
pub mod projects;
pub mod tasks;
pub mod validation;
